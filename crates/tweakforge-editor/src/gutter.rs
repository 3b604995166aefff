//! Cached gutter numbering keyed by content revision and container width.

use tracing::trace;

use crate::layout::{RowHeightProvider, rows_per_line};

const GUTTER_TARGET: &str = "tweakforge_editor::gutter";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LayoutKey {
    revision: u64,
    width: u32,
    word_wrap: bool,
}

/// Visual line numbers for the current buffer, recomputed only when the
/// content, the container width or the wrap setting changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gutter {
    key: Option<LayoutKey>,
    numbers: Vec<usize>,
    line_starts: Vec<usize>,
}

impl Gutter {
    /// Creates an empty gutter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the numbering up to date for `text`.
    ///
    /// `revision` must change whenever `text` does. Returns true when the
    /// numbers were recomputed.
    pub fn update<P>(
        &mut self,
        text: &str,
        revision: u64,
        width: u32,
        word_wrap: bool,
        provider: &P,
    ) -> bool
    where
        P: RowHeightProvider + ?Sized,
    {
        let key = LayoutKey {
            revision,
            width,
            word_wrap,
        };
        if self.key == Some(key) {
            return false;
        }

        let rows = rows_per_line(text, word_wrap, provider);
        let mut next_row = 1;
        self.line_starts = rows
            .iter()
            .map(|count| {
                let start = next_row;
                next_row += count;
                start
            })
            .collect();
        self.numbers = (1..next_row).collect();
        self.key = Some(key);
        trace!(
            target: GUTTER_TARGET,
            revision,
            width,
            logical = self.line_starts.len(),
            visual = self.numbers.len(),
            "recomputed gutter"
        );
        true
    }

    /// Forces the next [`Gutter::update`] to recompute.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// Flat visual row numbers, `1..=N`.
    #[must_use]
    pub fn numbers(&self) -> &[usize] {
        &self.numbers
    }

    /// Visual row on which each logical line starts.
    #[must_use]
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }

    /// Total visual rows.
    #[must_use]
    pub fn visual_rows(&self) -> usize {
        self.numbers.len()
    }
}
