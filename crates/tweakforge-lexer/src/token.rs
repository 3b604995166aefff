//! Token types produced by the tokenizer.

use serde::Serialize;

/// Classification of a token within one line of script text.
///
/// Variants are listed in the precedence order the tokenizer applies when
/// several classes could match at the same position. [`TokenKind::Text`] is
/// the fallback for everything else, including whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// A `#` comment running to the end of the line.
    Comment,
    /// A single- or double-quoted string literal closed on the same line.
    String,
    /// A `$name` or `$scope:name` variable reference.
    Variable,
    /// A `Verb-Noun` command name.
    Command,
    /// A decimal or hexadecimal numeric literal.
    Number,
    /// A reserved control-flow word.
    Keyword,
    /// `$true`, `$false`, `$null` or a bare `true`/`false`.
    Boolean,
    /// A comparison operator such as `-eq` or a run of symbolic operators.
    Operator,
    /// Brackets, separators and member access punctuation.
    Punctuation,
    /// Anything that matched no other class.
    Text,
}

impl TokenKind {
    /// Returns the stable class name used by renderers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::String => "string",
            Self::Variable => "variable",
            Self::Command => "command",
            Self::Number => "number",
            Self::Keyword => "keyword",
            Self::Boolean => "boolean",
            Self::Operator => "operator",
            Self::Punctuation => "punctuation",
            Self::Text => "text",
        }
    }
}

/// A classified slice of one line of script text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    kind: TokenKind,
    value: String,
}

impl Token {
    /// Creates a token of `kind` holding `value`.
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Returns the token classification.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the exact source text covered by the token.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}
