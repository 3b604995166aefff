//! Presentation logic for the script editor.
//!
//! The editor shows either the composed script or a saved hand edit
//! ([`EditorMode::Preview`]), or an editable buffer ([`EditorMode::Edit`]).
//! [`EditorState`] models the transitions between them as a pure function
//! over three text slots. [`Highlighter`] keeps token rows in step with the
//! displayed text, deferring long buffers to a background thread with
//! last-write-wins semantics. [`visual_line_numbers`] turns measured row
//! heights into the flat numbering a gutter renders under word wrap.
//!
//! [`EditorSession`] ties these together for a single mounted editor.

mod error;
mod gutter;
mod highlight;
mod layout;
mod session;
mod state;

pub use error::HighlightError;
pub use gutter::Gutter;
pub use highlight::{DEFAULT_HIGHLIGHT_THRESHOLD, HighlightStatus, Highlighter, TokenRows};
pub use layout::{
    MonospaceRows, RowHeightProvider, rows_for_height, rows_per_line, visual_line_numbers,
};
pub use session::{EditorSession, SessionOptions};
pub use state::{EditorEvent, EditorMode, EditorState};
