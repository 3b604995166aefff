//! Whitespace normalisation applied to every tweak before processing.

/// Runs of blank lines at least this long collapse to a single blank line.
const COLLAPSE_THRESHOLD: usize = 3;

/// Normalises raw tweak code.
///
/// - `\r\n` and lone `\r` line endings become `\n`;
/// - trailing whitespace is stripped from every line;
/// - runs of three or more blank lines collapse to exactly one;
/// - leading and trailing blank lines are removed.
///
/// The result has no trailing newline and applying the function again
/// returns it unchanged.
#[must_use]
pub fn clean_code(code: &str) -> String {
    let normalised = code.replace("\r\n", "\n").replace('\r', "\n");

    let mut lines: Vec<&str> = Vec::new();
    let mut pending_blanks = 0;
    for line in normalised.split('\n').map(str::trim_end) {
        if line.is_empty() {
            pending_blanks += 1;
            continue;
        }
        if !lines.is_empty() {
            let kept = if pending_blanks >= COLLAPSE_THRESHOLD {
                1
            } else {
                pending_blanks
            };
            lines.extend(std::iter::repeat_n("", kept));
        }
        pending_blanks = 0;
        lines.push(line);
    }
    lines.join("\n")
}
