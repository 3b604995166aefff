//! Command-line runtime for tweakforge.
//!
//! The runtime splits leading configuration flags from the subcommand,
//! loads layered configuration, installs telemetry and dispatches to the
//! `compose`, `highlight`, `redact` or `gutter` command. It is driven both
//! from the binary and from tests, where the configuration loader and the IO
//! streams are substituted.

use std::ffi::OsString;
use std::io::{Read, Write};
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

mod cli;
mod commands;
mod config;
mod errors;
mod telemetry;

use cli::Cli;
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
use config::split_config_arguments;
pub(crate) use errors::AppError;

const CLI_TARGET: &str = "tweakforge_cli";

/// Bundles the IO streams the runtime reads from and writes to.
pub(crate) struct IoStreams<'a, R: Read, W: Write, E: Write> {
    pub(crate) stdin: &'a mut R,
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, R: Read, W: Write, E: Write> IoStreams<'a, R, W, E> {
    pub(crate) const fn new(stdin: &'a mut R, stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self {
            stdin,
            stdout,
            stderr,
        }
    }
}

struct CliRunner<'a, 'io, R: Read, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'io, R, W, E>,
    loader: &'a L,
}

impl<R, W, E, L> CliRunner<'_, '_, R, W, E, L>
where
    R: Read,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);

        let cli = match Cli::try_parse_from(&split.command_arguments) {
            Ok(cli) => cli,
            Err(error) => return self.report_usage(error),
        };

        let result = self.loader.load(&split.config_arguments).and_then(|config| {
            telemetry::initialise(&config)?;
            commands::execute(cli.command, &config, self.io)
        });

        match result {
            Ok(exit_code) => exit_code,
            Err(error) => {
                if writeln!(self.io.stderr, "{error}").is_err() {
                    tracing::error!(target: CLI_TARGET, %error, "failed to report error");
                }
                ExitCode::FAILURE
            }
        }
    }

    fn report_usage(&mut self, error: clap::Error) -> ExitCode {
        if matches!(
            error.kind(),
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
        ) {
            return match write!(self.io.stdout, "{error}") {
                Ok(()) => ExitCode::SUCCESS,
                Err(_) => ExitCode::FAILURE,
            };
        }
        if write!(self.io.stderr, "{}", AppError::CliUsage(error)).is_err() {
            tracing::error!(target: CLI_TARGET, "failed to report usage error");
        }
        ExitCode::FAILURE
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, R, W, E>(args: I, stdin: &mut R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdin, stdout, stderr);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
#[must_use]
pub(crate) fn run_with_loader<I, R, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, R, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner { io, loader }.run(args)
}

#[cfg(test)]
mod tests;
