//! Entrypoint for the `tweakforge` binary.
//!
//! All work happens in [`tweakforge_cli::run`], which loads configuration,
//! installs telemetry and dispatches the requested subcommand.

use std::io::{self, StderrLock, StdinLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdin: StdinLock<'_> = io::stdin().lock();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    tweakforge_cli::run(std::env::args_os(), &mut stdin, &mut stdout, &mut stderr)
}
