//! Composition of selected tweaks into distributable PowerShell scripts.
//!
//! A [`Selection`] of [`Tweak`]s is turned into one or more [`Artifact`]s by
//! [`compose`]. Each tweak's code is cleaned, optionally redacted and
//! annotated, and the resulting blocks are combined according to the
//! [`Settings`] bundle:
//!
//! - a hand-edited custom script, when supplied, is emitted verbatim;
//! - with `download_each_tweak`, every tweak becomes its own artifact;
//! - otherwise all blocks are joined, in selection order, into one artifact.
//!
//! Every artifact's final `script` is wrapped with a guarded preamble
//! (optional restore point, status line) and a postamble that reports
//! success or failure and offers a bounded reboot prompt.
//!
//! Composition never fails. A tweak that cannot be processed is emitted
//! unprocessed and reported as a [`ComposeWarning`].
//!
//! # Example
//!
//! ```
//! use tweakforge_compose::{Selection, Settings, Tweak, compose};
//!
//! let mut selection = Selection::new();
//! selection.insert(Tweak::new("1", "Disable Telemetry", "Stop-Service DiagTrack"));
//! let composition = compose(&selection, &Settings::default());
//! assert_eq!(composition.artifacts().len(), 1);
//! ```

mod annotate;
mod cleanup;
mod compose;
mod error;
mod settings;
mod tweak;
mod wrap;

pub use cleanup::clean_code;
pub use compose::{
    Artifact, COMBINED_FILE_NAME, CUSTOM_FILE_NAME, CombineMode, ComposeOptions, ComposeWarning,
    Composition, EMPTY_SELECTION_PLACEHOLDER, compose, compose_with, sanitize_file_name,
};
pub use error::TweakProcessingError;
pub use settings::{DEFAULT_REBOOT_COUNTDOWN_SECS, ScriptOptions, Settings};
pub use tweak::{Selection, Tweak, TweakMetadata};
pub use wrap::wrap_script;
