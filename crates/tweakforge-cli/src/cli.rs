//! Command-line argument definitions.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};

/// Columns assumed by `gutter` when none are given.
pub(crate) const DEFAULT_GUTTER_COLUMNS: usize = 80;

/// Rendering for `highlight` output.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub(crate) enum HighlightOutput {
    /// One line per logical line listing `kind:"value"` pairs.
    #[default]
    Human,
    /// A JSON array of token rows.
    Json,
}

/// Compose, inspect and redact PowerShell tweak scripts.
#[derive(Parser, Debug)]
#[command(name = "tweakforge", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Composes a JSON selection of tweaks into scripts.
    Compose {
        /// JSON array of tweaks, or an object with a `tweaks` array.
        #[arg(value_name = "SELECTION")]
        selection: Utf8PathBuf,
        /// Writes artifacts into this directory instead of stdout.
        #[arg(long, value_name = "DIR")]
        out_dir: Option<Utf8PathBuf>,
        /// Hand-edited script emitted verbatim in place of the selection.
        #[arg(long = "override", value_name = "FILE")]
        custom_script: Option<Utf8PathBuf>,
    },
    /// Prints the token rows for a script.
    Highlight {
        /// Script to tokenize.
        #[arg(value_name = "FILE")]
        file: Utf8PathBuf,
        /// Output rendering.
        #[arg(long, value_enum, default_value_t = HighlightOutput::Human)]
        output: HighlightOutput,
    },
    /// Masks secrets and personal data in a file or stdin.
    Redact {
        /// File to redact; stdin when omitted.
        #[arg(value_name = "FILE")]
        file: Option<Utf8PathBuf>,
    },
    /// Prints visual line numbers for a script under the word-wrap setting.
    Gutter {
        /// Script to number.
        #[arg(value_name = "FILE")]
        file: Utf8PathBuf,
        /// Character columns per visual row.
        #[arg(long, default_value_t = DEFAULT_GUTTER_COLUMNS)]
        columns: usize,
    },
}
