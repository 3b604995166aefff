//! Masking of likely secrets and personal data in script text.
//!
//! [`redact`] applies three independent, pattern-based passes in order:
//!
//! 1. email-like substrings become [`EMAIL_PLACEHOLDER`];
//! 2. `key = value` / `key: value` assignments whose key looks like an API
//!    key, secret, token or password keep the key and have values of eight
//!    or more characters replaced with [`SECRET_PLACEHOLDER`];
//! 3. long opaque tokens (access-key IDs and runs of twenty or more
//!    alphanumeric, `_` or `-` characters) become [`TOKEN_PLACEHOLDER`].
//!
//! None of the placeholders can be matched by any pass, which makes
//! redaction idempotent: `redact(&redact(t)) == redact(&t)`.
//!
//! The third pass is gated on length alone and trades precision for safety.
//! Long identifiers such as GUIDs or lengthy cmdlet parameter names are
//! masked as well.

mod redactor;

pub use redactor::{
    EMAIL_PLACEHOLDER, MIN_OPAQUE_TOKEN_LEN, MIN_SECRET_VALUE_LEN, Redaction, SECRET_PLACEHOLDER,
    TOKEN_PLACEHOLDER, redact, redact_with_report,
};

#[cfg(test)]
mod tests;
