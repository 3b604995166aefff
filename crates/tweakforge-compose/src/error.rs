//! Per-tweak processing failures.
//!
//! None of these abort composition. The composer downgrades each one to a
//! [`crate::ComposeWarning`] and emits the tweak's cleaned code unprocessed.

use thiserror::Error;

/// Reasons a single tweak could not be redacted or annotated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TweakProcessingError {
    /// The code contains control characters that do not belong in a script.
    #[error("code contains a non-text control character (U+{codepoint:04X}) on line {line}")]
    BinaryContent {
        /// One-based line of the first offending character.
        line: usize,
        /// Code point of the offending character.
        codepoint: u32,
    },

    /// Redacting the already redacted code changed it again.
    #[error("redaction did not converge after {substitutions} substitutions")]
    UnstableRedaction {
        /// Substitutions made by the first redaction run.
        substitutions: usize,
    },
}

impl TweakProcessingError {
    /// Creates a binary content error.
    #[must_use]
    pub const fn binary_content(line: usize, codepoint: u32) -> Self {
        Self::BinaryContent { line, codepoint }
    }

    /// Creates an unstable redaction error.
    #[must_use]
    pub const fn unstable_redaction(substitutions: usize) -> Self {
        Self::UnstableRedaction { substitutions }
    }
}
