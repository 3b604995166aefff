//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read stdin: {0}")]
    ReadStdin(io::Error),
    #[error("failed to parse selection {path}: {source}")]
    ParseSelection {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    WriteArtifact {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialise token rows: {0}")]
    SerialiseTokens(serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(#[from] io::Error),
}

impl AppError {
    pub(crate) fn read_input(path: &Utf8Path, source: io::Error) -> Self {
        Self::ReadInput {
            path: path.to_path_buf(),
            source,
        }
    }
}
