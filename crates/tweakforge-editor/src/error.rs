//! Failures on the background highlighting path.

use std::io;

use thiserror::Error;

/// Errors raised by the deferred highlighter.
///
/// None of these reach the caller. The highlighter logs them and tokenizes
/// the same buffer synchronously instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HighlightError {
    /// The worker thread could not be started.
    #[error("failed to spawn highlight worker: {source}")]
    Spawn {
        /// Underlying spawn failure.
        #[source]
        source: io::Error,
    },

    /// The worker exited without reporting a result.
    #[error("highlight worker for generation {generation} exited without a result")]
    WorkerLost {
        /// Generation the lost worker was tokenizing.
        generation: u64,
    },
}

impl HighlightError {
    /// Creates a spawn failure.
    #[must_use]
    pub const fn spawn(source: io::Error) -> Self {
        Self::Spawn { source }
    }

    /// Creates a lost-worker failure.
    #[must_use]
    pub const fn worker_lost(generation: u64) -> Self {
        Self::WorkerLost { generation }
    }
}
