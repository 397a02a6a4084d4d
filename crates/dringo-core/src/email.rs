//! Minimal syntactic email check.
//!
//! Accepts `local@domain.tld` where no part contains whitespace and only one
//! `@` appears. Whitespace includes U+FEFF, matching browser regexes. This
//! is a UX guard for the signup form, not RFC 5322 validation, and it is
//! deliberately lax.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").expect("email pattern is a valid regex")
});

/// Returns `true` if `candidate` looks like an email address.
///
/// The input is matched as given. Callers that accept user-typed text are
/// expected to trim it first.
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_PATTERN.is_match(candidate)
}

/// Strip leading and trailing whitespace the way a browser's `trim` does,
/// including U+FEFF.
pub fn trim_input(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}
