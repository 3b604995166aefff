//! Single-pass, priority-ordered line tokenizer.
//!
//! Every pattern class is a named group in one alternation. The regex engine
//! reports the leftmost match and, among alternatives starting at the same
//! position, the first one listed, which is exactly the precedence order the
//! classes are declared in below. Gaps between matches become text tokens.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::error;

use crate::token::{Token, TokenKind};

const LEXER_TARGET: &str = "tweakforge_lexer::lexer";

const COMMENT: &str = r"(?P<comment>#.*)";
const SINGLE_QUOTED: &str = r"(?P<single>'[^']*')";
const DOUBLE_QUOTED: &str = r#"(?P<double>"(?:[^"\\]|\\.)*")"#;
const VARIABLE: &str = r"(?P<variable>\$[A-Za-z_][A-Za-z0-9_]*(?::[A-Za-z_][A-Za-z0-9_]*)?)";
// Also matches `a-b` written without spaces; cmdlet names and bare-word
// subtraction are indistinguishable at this level.
const COMMAND: &str = r"(?P<command>\b[A-Za-z][A-Za-z0-9]*-[A-Za-z][A-Za-z0-9]*\b)";
const NUMBER: &str = r"(?P<number>\b(?:0[xX][0-9A-Fa-f]+|\d+(?:\.\d+)?)\b)";
const KEYWORD: &str = concat!(
    r"(?P<keyword>(?i:\b(?:",
    r"if|elseif|else|switch|foreach|for|while|do|until|",
    r"function|filter|param|begin|process|end|return|",
    r"try|catch|finally|throw|trap|break|continue|exit|in",
    r")\b))"
);
const BOOLEAN: &str = r"(?P<boolean>(?i:\b(?:true|false)\b))";
const OPERATOR: &str = concat!(
    r"(?P<operator>(?i:-(?:",
    r"eq|ne|gt|ge|lt|le|like|notlike|match|notmatch|contains|notcontains|",
    r"in|notin|replace|split|join|and|or|xor|not|band|bor|bxor|isnot|is|as|f",
    r")\b)|[=!<>+\-*/%|&]+)"
);
const PUNCTUATION: &str = r"(?P<punctuation>[{}()\[\];,.:@])";

/// Group names paired with the kind they produce, in precedence order.
const CLASSES: [(&str, TokenKind); 10] = [
    ("comment", TokenKind::Comment),
    ("single", TokenKind::String),
    ("double", TokenKind::String),
    ("variable", TokenKind::Variable),
    ("command", TokenKind::Command),
    ("number", TokenKind::Number),
    ("keyword", TokenKind::Keyword),
    ("boolean", TokenKind::Boolean),
    ("operator", TokenKind::Operator),
    ("punctuation", TokenKind::Punctuation),
];

/// Automatic variables that read as literals rather than references.
const LITERAL_VARIABLES: [&str; 3] = ["$true", "$false", "$null"];

static TOKEN_PATTERN: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| {
    Regex::new(
        &[
            COMMENT,
            SINGLE_QUOTED,
            DOUBLE_QUOTED,
            VARIABLE,
            COMMAND,
            NUMBER,
            KEYWORD,
            BOOLEAN,
            OPERATOR,
            PUNCTUATION,
        ]
        .join("|"),
    )
});

/// Splits one line of script text into classified tokens.
///
/// The result is lossless: concatenating every [`Token::value`] in order
/// yields `line` exactly. An empty line produces no tokens. The function
/// keeps no state between calls, so identical input always yields an
/// identical token sequence.
#[must_use]
pub fn tokenize(line: &str) -> Vec<Token> {
    if line.is_empty() {
        return Vec::new();
    }

    let pattern = match TOKEN_PATTERN.as_ref() {
        Ok(pattern) => pattern,
        Err(err) => {
            error!(target: LEXER_TARGET, error = %err, "token pattern failed to compile");
            return vec![Token::new(TokenKind::Text, line)];
        }
    };

    let mut tokens = Vec::new();
    let mut cursor = 0;
    for captures in pattern.captures_iter(line) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        if let Some(gap) = line.get(cursor..whole.start()).filter(|gap| !gap.is_empty()) {
            tokens.push(Token::new(TokenKind::Text, gap));
        }
        tokens.push(Token::new(classify(&captures), whole.as_str()));
        cursor = whole.end();
    }
    if let Some(rest) = line.get(cursor..).filter(|rest| !rest.is_empty()) {
        tokens.push(Token::new(TokenKind::Text, rest));
    }
    tokens
}

/// Tokenizes every logical line of `text`.
///
/// Lines are split on `\n` only; a trailing `\r` stays in the last token of
/// its line so each row still reproduces its source exactly. A trailing
/// newline yields a final empty row.
#[must_use]
pub fn tokenize_lines(text: &str) -> Vec<Vec<Token>> {
    text.split('\n').map(tokenize).collect()
}

fn classify(captures: &Captures<'_>) -> TokenKind {
    let kind = CLASSES
        .iter()
        .find(|(group, _)| captures.name(group).is_some())
        .map_or(TokenKind::Text, |(_, kind)| *kind);

    if kind == TokenKind::Variable
        && captures.get(0).is_some_and(|m| {
            LITERAL_VARIABLES
                .iter()
                .any(|literal| m.as_str().eq_ignore_ascii_case(literal))
        })
    {
        return TokenKind::Boolean;
    }
    kind
}

#[cfg(test)]
pub(crate) fn pattern_compiles() -> bool {
    TOKEN_PATTERN.is_ok()
}
