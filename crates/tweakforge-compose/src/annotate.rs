//! Comment headers describing a tweak above its code.

use crate::tweak::Tweak;

const RULE: &str = "# ==================================================";
const DIVIDER: &str = "# --------------------------------------------------";

/// Builds the comment block placed above a tweak's code.
///
/// The block names the tweak, carries its description line by line and
/// summarises the catalogue metadata. Every line starts with `#`.
pub(crate) fn annotation(tweak: &Tweak) -> String {
    let mut lines = vec![RULE.to_owned(), comment_line(tweak.title.trim())];

    let description: Vec<&str> = tweak
        .description
        .lines()
        .map(str::trim_end)
        .skip_while(|line| line.trim().is_empty())
        .collect();
    let description_end = description
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(0, |index| index + 1);
    if description_end > 0 {
        lines.push(DIVIDER.to_owned());
        lines.extend(
            description
                .iter()
                .take(description_end)
                .map(|line| comment_line(line)),
        );
    }

    let metadata = &tweak.metadata;
    lines.push(DIVIDER.to_owned());
    lines.push(format!(
        "# Downloads: {} | Favorites: {} | Reports: {}",
        metadata.downloads, metadata.favorites, metadata.reports
    ));
    if metadata.reports > 0 {
        lines.push(String::from(
            "# Warning: other users reported problems with this tweak. Review it before running.",
        ));
    }
    if let Some(note) = metadata
        .author_comment
        .as_deref()
        .map(str::trim)
        .filter(|note| !note.is_empty())
    {
        let mut note_lines = note.lines();
        if let Some(first) = note_lines.next() {
            lines.push(format!("# Author note: {}", first.trim_end()));
        }
        lines.extend(note_lines.map(comment_line));
    }
    lines.push(RULE.to_owned());
    lines.join("\n")
}

fn comment_line(text: &str) -> String {
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        String::from("#")
    } else {
        format!("# {trimmed}")
    }
}
