//! Container serial numbers and the sequence that issues them.
//!
//! Every serial has the shape `KON-<tag>-<sequence>`. The sequence number is
//! drawn from a single [`SerialSequence`] shared by all container kinds, so
//! numbering is global rather than per-kind. Unless a caller supplies its own
//! sequence, every factory in the process draws from
//! [`SerialSequence::process_wide`].

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::constants::{FIRST_SEQUENCE, SERIAL_PREFIX};

/// Identifier assigned to a container at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SerialNumber {
    tag: String,
    sequence: u64,
}

impl SerialNumber {
    /// Build a serial from an already-validated tag and a sequence value.
    pub(crate) fn new(tag: &str, sequence: u64) -> Self {
        Self {
            tag: tag.to_string(),
            sequence,
        }
    }

    /// Type tag portion (e.g. `L` for liquid containers).
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Sequence portion drawn from the shared counter.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", SERIAL_PREFIX, self.tag, self.sequence)
    }
}

impl FromStr for SerialNumber {
    type Err = Error;

    /// Parse the canonical `KON-<tag>-<sequence>` form.
    ///
    /// Only the exact text produced by `Display` is accepted: an upper-case
    /// prefix, no surrounding whitespace, and a sequence of plain digits
    /// without sign or leading zeros.
    fn from_str(value: &str) -> Result<Self> {
        let invalid = || Error::InvalidSerial {
            value: value.to_string(),
        };

        let mut parts = value.splitn(3, '-');
        let prefix = parts.next().ok_or_else(invalid)?;
        let tag = parts.next().ok_or_else(invalid)?;
        let sequence = parts.next().ok_or_else(invalid)?;

        if prefix != SERIAL_PREFIX {
            return Err(invalid());
        }
        validate_tag(tag).map_err(|_| invalid())?;
        if !is_canonical_number(sequence) {
            return Err(invalid());
        }
        let sequence = sequence.parse::<u64>().map_err(|_| invalid())?;

        Ok(Self::new(tag, sequence))
    }
}

fn is_canonical_number(digits: &str) -> bool {
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
}

impl From<SerialNumber> for String {
    fn from(serial: SerialNumber) -> Self {
        serial.to_string()
    }
}

impl TryFrom<String> for SerialNumber {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl PartialEq<str> for SerialNumber {
    fn eq(&self, other: &str) -> bool {
        other
            .parse::<SerialNumber>()
            .map(|parsed| parsed == *self)
            .unwrap_or(false)
    }
}

impl PartialEq<&str> for SerialNumber {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Check that a type tag is a non-empty run of ASCII alphanumerics.
pub fn validate_tag(tag: &str) -> Result<()> {
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::InvalidContainer {
            message: format!("type tag '{tag}' must be non-empty ASCII alphanumerics"),
        });
    }
    Ok(())
}

static PROCESS_SEQUENCE: Lazy<Arc<SerialSequence>> =
    Lazy::new(|| Arc::new(SerialSequence::new()));

/// Monotonic counter handing out serial sequence values.
///
/// A fresh sequence starts at 1. Values are issued with an atomic
/// fetch-and-increment, so a sequence shared across threads still never
/// repeats a value; ordering between threads is only guaranteed to be unique,
/// not to follow wall-clock creation order.
#[derive(Debug)]
pub struct SerialSequence {
    next: AtomicU64,
}

impl SerialSequence {
    /// Create a sequence whose first value is 1.
    pub fn new() -> Self {
        Self::starting_at(FIRST_SEQUENCE)
    }

    /// The sequence shared by every default-constructed factory in this process.
    pub fn process_wide() -> Arc<SerialSequence> {
        Arc::clone(&PROCESS_SEQUENCE)
    }

    /// Create a sequence whose first value is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Take the next value, advancing the sequence.
    pub fn advance(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Value the next call to [`advance`](Self::advance) will return.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for SerialSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_starts_at_one_and_increments() {
        let sequence = SerialSequence::new();
        assert_eq!(sequence.peek(), 1);
        assert_eq!(sequence.advance(), 1);
        assert_eq!(sequence.advance(), 2);
        assert_eq!(sequence.peek(), 3);
    }

    #[test]
    fn serial_formats_with_prefix_tag_and_sequence() {
        let serial = SerialNumber::new("L", 7);
        assert_eq!(serial.to_string(), "KON-L-7");
    }

    #[test]
    fn parses_serial_strings() {
        let serial: SerialNumber = "KON-G-12".parse().expect("valid serial");
        assert_eq!(serial.tag(), "G");
        assert_eq!(serial.sequence(), 12);
        assert_eq!(serial, "KON-G-12");
    }

    #[test]
    fn rejects_malformed_serials() {
        let malformed = [
            "",
            "KON",
            "KON-L",
            "BOX-L-1",
            "KON--1",
            "KON-L-x",
            "KON-L-1-2",
        ];
        for bad in malformed {
            assert!(
                bad.parse::<SerialNumber>().is_err(),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_canonical_spellings() {
        for text in ["kon-S-1", "KON-S-+1", "KON-S-01", " KON-S-1"] {
            assert!(
                text.parse::<SerialNumber>().is_err(),
                "expected '{text}' to be rejected"
            );
            assert_ne!(SerialNumber::new("S", 1), text);
        }
    }

    #[test]
    fn process_wide_sequence_is_shared() {
        let a = SerialSequence::process_wide();
        let b = SerialSequence::process_wide();
        assert!(Arc::ptr_eq(&a, &b));
        let first = a.advance();
        assert!(b.advance() > first);
    }

    #[test]
    fn rejects_non_alphanumeric_tags() {
        assert!(validate_tag("L").is_ok());
        assert!(validate_tag("RF2").is_ok());
        assert!(validate_tag("").is_err());
        assert!(validate_tag("L-1").is_err());
    }
}
