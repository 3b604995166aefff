//! Line-oriented lexical classification of generated PowerShell tweak scripts.
//!
//! The tokenizer turns a single line of script text into a sequence of
//! [`Token`]s for span-painting renderers. It is deliberately shallow: there
//! is no syntax tree and no state carried between lines, so a string literal
//! that spans several lines is classified line by line.
//!
//! Two guarantees hold for every input:
//!
//! - **Totality**: [`tokenize`] never fails. Text that matches no pattern
//!   class is emitted as a [`TokenKind::Text`] token.
//! - **Losslessness**: concatenating the values of the returned tokens
//!   reproduces the input line byte for byte.
//!
//! # Example
//!
//! ```
//! use tweakforge_lexer::{TokenKind, tokenize};
//!
//! let tokens = tokenize("Set-Service -Name DiagTrack # stop it");
//! assert_eq!(tokens.first().map(|t| t.kind()), Some(TokenKind::Command));
//! let rebuilt: String = tokens.iter().map(|t| t.value()).collect();
//! assert_eq!(rebuilt, "Set-Service -Name DiagTrack # stop it");
//! ```

mod lexer;
mod token;

pub use lexer::{tokenize, tokenize_lines};
pub use token::{Token, TokenKind};

#[cfg(test)]
mod tests;
