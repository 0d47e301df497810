//! Age token parsing and validation.
//!
//! # Responsibility
//! - Parse the trailing age segment of a recording filename into a
//!   numeric age plus optional qualifier letter.
//! - Reject malformed tokens before they reach session classification.
//!
//! # Invariants
//! - `raw` always matches `^[0-9]+[A-Z]?$` for a successfully parsed token.
//! - Ordering for baseline selection uses `numeric` only; the qualifier
//!   never breaks ties.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static AGE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)([A-Z])?$").expect("valid age token regex"));

/// Parsed age marker for one recording session.
///
/// The qualifier letter distinguishes repeat captures at the same numeric
/// age (e.g. `24` vs `24A`). It is preserved for naming and display but is
/// deliberately excluded from ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgeToken {
    /// Numeric age component, e.g. `24` for `"24A"`.
    pub numeric: u32,
    /// Optional uppercase qualifier letter, e.g. `'A'` for `"24A"`.
    pub qualifier: Option<char>,
    /// Original token text; round-trips parsing unchanged.
    pub raw: String,
}

/// Validation error for malformed age tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeParseError {
    /// The rejected input text.
    pub raw: String,
}

impl Display for AgeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid age token `{}`; expected digits with at most one trailing uppercase letter",
            self.raw
        )
    }
}

impl Error for AgeParseError {}

impl AgeToken {
    /// Parses a raw filename age segment.
    ///
    /// # Contract
    /// - Accepts strings matching `^[0-9]+[A-Z]?$` (e.g. `"24"`, `"18A"`).
    /// - Rejects empty input, lowercase qualifiers, multiple trailing
    ///   letters and any non-digit prefix.
    /// - Pure function, no side effects.
    pub fn parse(raw: &str) -> Result<Self, AgeParseError> {
        let captures = AGE_TOKEN_RE.captures(raw).ok_or_else(|| AgeParseError {
            raw: raw.to_string(),
        })?;

        let digits = captures
            .get(1)
            .map(|m| m.as_str())
            .unwrap_or_default();
        let numeric: u32 = digits.parse().map_err(|_| AgeParseError {
            raw: raw.to_string(),
        })?;
        let qualifier = captures
            .get(2)
            .and_then(|m| m.as_str().chars().next());

        Ok(Self {
            numeric,
            qualifier,
            raw: raw.to_string(),
        })
    }
}

impl Display for AgeToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::{AgeParseError, AgeToken};

    #[test]
    fn parse_accepts_plain_numeric_age() {
        let token = AgeToken::parse("24").expect("plain numeric age should parse");
        assert_eq!(token.numeric, 24);
        assert_eq!(token.qualifier, None);
        assert_eq!(token.raw, "24");
    }

    #[test]
    fn parse_accepts_single_uppercase_qualifier() {
        let token = AgeToken::parse("18A").expect("qualified age should parse");
        assert_eq!(token.numeric, 18);
        assert_eq!(token.qualifier, Some('A'));
        assert_eq!(token.raw, "18A");
    }

    #[test]
    fn parse_round_trips_raw_unchanged() {
        for raw in ["0", "7", "24A", "101Z"] {
            let token = AgeToken::parse(raw).expect("valid token should parse");
            assert_eq!(token.raw, raw);
            assert_eq!(token.to_string(), raw);
        }
    }

    #[test]
    fn parse_rejects_malformed_tokens() {
        for raw in ["", "A24", "24a", "24B1", "-3", "2 4", "24AB"] {
            let err = AgeToken::parse(raw).expect_err("malformed token must be rejected");
            assert_eq!(err, AgeParseError { raw: raw.to_string() });
        }
    }
}
