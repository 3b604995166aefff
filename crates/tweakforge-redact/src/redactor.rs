//! Pattern passes and placeholder substitution.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::error;

const REDACT_TARGET: &str = "tweakforge_redact::redactor";

/// Replacement for email-like substrings.
pub const EMAIL_PLACEHOLDER: &str = "[REDACTED_EMAIL]";
/// Replacement for the value half of a secret assignment.
pub const SECRET_PLACEHOLDER: &str = "[REDACTED]";
/// Replacement for long opaque tokens.
pub const TOKEN_PLACEHOLDER: &str = "[REDACTED_TOKEN]";

/// Shortest assignment value treated as a secret.
pub const MIN_SECRET_VALUE_LEN: usize = 8;
/// Shortest run of token characters treated as an opaque credential.
pub const MIN_OPAQUE_TOKEN_LEN: usize = 20;

static EMAIL: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}"));

// Values exclude brackets so a masked value can never be matched again.
static SECRET_ASSIGNMENT: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| {
    Regex::new(&format!(
        r#"(?i)(?P<head>[A-Za-z0-9_\-]*(?:api[_\-\s]?key|secret|token|passw(?:or)?d)[A-Za-z0-9_\-]*\s*[:=]\s*["']?)(?P<value>[^\s"'\[\]]{{{MIN_SECRET_VALUE_LEN},}})"#
    ))
});

// Length is the only gate. Access keys such as `AKIA...` are exactly this long.
static OPAQUE_TOKEN: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(&format!(r"\b[A-Za-z0-9_\-]{{{MIN_OPAQUE_TOKEN_LEN},}}\b")));

/// Outcome of a redaction run with per-pass substitution counts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Redaction {
    /// The redacted text.
    pub text: String,
    /// Number of email-like substrings replaced.
    pub emails: usize,
    /// Number of secret assignment values replaced.
    pub secrets: usize,
    /// Number of opaque tokens replaced.
    pub tokens: usize,
}

impl Redaction {
    /// Total substitutions across all passes.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.emails + self.secrets + self.tokens
    }

    /// Returns true when no pass changed the input.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        self.total() == 0
    }
}

/// Masks likely secrets and personal data in `text`.
///
/// Equivalent to `redact_with_report(text).text`.
#[must_use]
pub fn redact(text: &str) -> String {
    redact_with_report(text).text
}

/// Masks likely secrets and personal data, reporting what was replaced.
#[must_use]
pub fn redact_with_report(text: &str) -> Redaction {
    if text.is_empty() {
        return Redaction::default();
    }

    let mut emails = 0;
    let after_emails = run_pass(&EMAIL, "email", text, |_| {
        emails += 1;
        EMAIL_PLACEHOLDER.to_owned()
    });

    let mut secrets = 0;
    let after_secrets = run_pass(&SECRET_ASSIGNMENT, "secret", &after_emails, |caps| {
        secrets += 1;
        let head = caps.name("head").map_or("", |m| m.as_str());
        format!("{head}{SECRET_PLACEHOLDER}")
    });

    let mut tokens = 0;
    let after_tokens = run_pass(&OPAQUE_TOKEN, "opaque token", &after_secrets, |_| {
        tokens += 1;
        TOKEN_PLACEHOLDER.to_owned()
    });

    Redaction {
        text: after_tokens.into_owned(),
        emails,
        secrets,
        tokens,
    }
}

fn run_pass<'t, F>(
    pattern: &Lazy<Result<Regex, regex::Error>>,
    pass: &str,
    text: &'t str,
    replacer: F,
) -> Cow<'t, str>
where
    F: FnMut(&Captures<'_>) -> String,
{
    match pattern.as_ref() {
        Ok(regex) => regex.replace_all(text, replacer),
        Err(err) => {
            error!(
                target: REDACT_TARGET,
                pass,
                error = %err,
                "redaction pattern failed to compile"
            );
            Cow::Borrowed(text)
        }
    }
}

#[cfg(test)]
pub(crate) fn patterns_compile() -> bool {
    EMAIL.is_ok() && SECRET_ASSIGNMENT.is_ok() && OPAQUE_TOKEN.is_ok()
}
