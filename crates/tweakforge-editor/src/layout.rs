//! Visual line numbering for soft-wrapped buffers.
//!
//! Row heights come from a [`RowHeightProvider`], so the accumulation works
//! the same against a real layout engine, the fixed-width estimate in
//! [`MonospaceRows`] or a test double.

use unicode_width::UnicodeWidthStr;

const TAB_WIDTH: usize = 4;

/// Measures how tall logical lines render.
pub trait RowHeightProvider {
    /// Rendered height of `line`, the logical line at `index`.
    fn line_height(&self, index: usize, line: &str) -> f64;

    /// Height of a single visual row.
    fn row_height(&self) -> f64;
}

/// Number of visual rows each logical line of `text` occupies.
///
/// Without word wrap every logical line is one row and the provider is not
/// consulted.
pub fn rows_per_line<P>(text: &str, word_wrap: bool, provider: &P) -> Vec<usize>
where
    P: RowHeightProvider + ?Sized,
{
    let lines = text.split('\n');
    if !word_wrap {
        return lines.map(|_| 1).collect();
    }
    let row_height = provider.row_height();
    lines
        .enumerate()
        .map(|(index, line)| rows_for_height(provider.line_height(index, line), row_height))
        .collect()
}

/// Flat, sequential visual row numbers (`1..=N`) for `text`.
pub fn visual_line_numbers<P>(text: &str, word_wrap: bool, provider: &P) -> Vec<usize>
where
    P: RowHeightProvider + ?Sized,
{
    let total: usize = rows_per_line(text, word_wrap, provider).iter().sum();
    (1..=total).collect()
}

/// Rounds `height / row_height` up, never returning less than one row.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "layout heights are fractional pixels; the quotient is clamped to at least one row"
)]
pub fn rows_for_height(height: f64, row_height: f64) -> usize {
    if !height.is_finite() || !row_height.is_finite() || row_height <= 0.0 {
        return 1;
    }
    let rows = (height / row_height).ceil();
    if rows <= 1.0 { 1 } else { rows as usize }
}

/// Row heights estimated for a fixed-width character grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceRows {
    columns: usize,
    row_height: f64,
}

impl MonospaceRows {
    /// Creates a provider wrapping at `columns` cells, each row
    /// `row_height` high. Zero columns is treated as one.
    #[must_use]
    pub fn new(columns: usize, row_height: f64) -> Self {
        Self {
            columns: columns.max(1),
            row_height,
        }
    }

    /// Cells per visual row.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Visual rows `line` wraps onto.
    #[must_use]
    pub fn rows(&self, line: &str) -> usize {
        let width = if line.contains('\t') {
            line.replace('\t', &" ".repeat(TAB_WIDTH)).width()
        } else {
            line.width()
        };
        width.div_ceil(self.columns).max(1)
    }
}

impl RowHeightProvider for MonospaceRows {
    #[expect(
        clippy::float_arithmetic,
        reason = "heights are reported in the provider's fractional units"
    )]
    fn line_height(&self, _index: usize, line: &str) -> f64 {
        let rows = u32::try_from(self.rows(line)).unwrap_or(u32::MAX);
        f64::from(rows) * self.row_height
    }

    fn row_height(&self) -> f64 {
        self.row_height
    }
}
