//! ESKD designation format validation.
//!
//! Every part and assembly in a division scheme carries a designation of
//! the form `XXXX.XX.XX.XXX`: a base code segment followed by three
//! dot-separated numeric segments of two, two and three digits.
//!
//! Examples:
//! - `1234.00.00.000` — product-level designation
//! - `1234.01.02.003` — third part of the second subassembly
//! - `АБВГ.01.00.000` — Cyrillic base codes are valid
//!
//! [`is_valid`] is the cheap yes/no check; [`check`] additionally names
//! the first structural problem it finds so the caller can report a
//! precise reason.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Regular expression for a well-formed designation.
///
/// The base segment accepts any Unicode letters and digits; the numeric
/// segments are strictly ASCII digits.
pub const DESIGNATION_PATTERN: &str = r"^[\p{L}\p{N}]+\.[0-9]{2}\.[0-9]{2}\.[0-9]{3}$";

/// Required digit widths of the three numeric segments.
pub const NUMERIC_SEGMENT_WIDTHS: [usize; 3] = [2, 2, 3];

static DESIGNATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DESIGNATION_PATTERN).expect("designation pattern is valid"));

/// Reasons a designation string fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DesignationError {
    /// Wrong number of dot-separated segments.
    #[error("expected 4 dot-separated segments, found {found}")]
    SegmentCount {
        /// Number of segments found.
        found: usize,
    },

    /// The base segment is empty.
    #[error("base segment is empty")]
    EmptyBase,

    /// The base segment contains characters outside letters and digits.
    #[error("base segment '{segment}' contains invalid characters")]
    InvalidBase {
        /// The offending base segment.
        segment: String,
    },

    /// A numeric segment contains non-digit characters.
    #[error("segment {index} ('{segment}') must be numeric")]
    NonNumericSegment {
        /// 1-based index among the numeric segments.
        index: usize,
        /// The offending segment.
        segment: String,
    },

    /// A numeric segment has the wrong number of digits.
    #[error("segment {index} ('{segment}') must be exactly {expected} digits")]
    SegmentWidth {
        /// 1-based index among the numeric segments.
        index: usize,
        /// The offending segment.
        segment: String,
        /// Required digit count.
        expected: usize,
    },
}

/// Returns `true` when the designation matches the required pattern.
#[must_use]
pub fn is_valid(designation: &str) -> bool {
    DESIGNATION_RE.is_match(designation)
}

/// Validates a designation, naming the first problem found.
///
/// # Errors
///
/// Returns a [`DesignationError`] describing why the string does not
/// match the `XXXX.XX.XX.XXX` format.
pub fn check(designation: &str) -> Result<(), DesignationError> {
    if is_valid(designation) {
        return Ok(());
    }

    let segments: Vec<&str> = designation.split('.').collect();
    if segments.len() != NUMERIC_SEGMENT_WIDTHS.len() + 1 {
        return Err(DesignationError::SegmentCount {
            found: segments.len(),
        });
    }

    let base = segments[0];
    if base.is_empty() {
        return Err(DesignationError::EmptyBase);
    }
    if !base.chars().all(char::is_alphanumeric) {
        return Err(DesignationError::InvalidBase {
            segment: base.to_string(),
        });
    }

    for (index, (&segment, &expected)) in segments[1..]
        .iter()
        .zip(NUMERIC_SEGMENT_WIDTHS.iter())
        .enumerate()
    {
        let index = index + 1;
        if segment.is_empty() || !segment.chars().all(|c| c.is_ascii_digit()) {
            return Err(DesignationError::NonNumericSegment {
                index,
                segment: segment.to_string(),
            });
        }
        if segment.len() != expected {
            return Err(DesignationError::SegmentWidth {
                index,
                segment: segment.to_string(),
                expected,
            });
        }
    }

    // Segment analysis mirrors the pattern, so reaching this point means
    // the designation is well-formed after all.
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_standard_designation() {
        assert!(is_valid("1234.00.00.000"));
        assert!(check("1234.00.00.000").is_ok());
    }

    #[test]
    fn accepts_cyrillic_base() {
        assert!(is_valid("АБВГ.01.02.003"));
        assert!(check("АБВГ.01.02.003").is_ok());
    }

    #[test]
    fn accepts_mixed_base() {
        assert!(is_valid("АБ12.99.99.999"));
    }

    #[test]
    fn rejects_plain_word() {
        assert!(!is_valid("INVALID"));
        assert_eq!(
            check("INVALID"),
            Err(DesignationError::SegmentCount { found: 1 })
        );
    }

    #[test]
    fn rejects_too_few_segments() {
        assert_eq!(
            check("1234.00.00"),
            Err(DesignationError::SegmentCount { found: 3 })
        );
    }

    #[test]
    fn rejects_too_many_segments() {
        assert_eq!(
            check("1234.00.00.000.1"),
            Err(DesignationError::SegmentCount { found: 5 })
        );
    }

    #[test]
    fn rejects_empty_base() {
        assert_eq!(check(".00.00.000"), Err(DesignationError::EmptyBase));
    }

    #[test]
    fn rejects_base_with_punctuation() {
        assert_eq!(
            check("12-34.00.00.000"),
            Err(DesignationError::InvalidBase {
                segment: "12-34".to_string()
            })
        );
    }

    #[test]
    fn rejects_non_numeric_segment() {
        assert_eq!(
            check("1234.0a.00.000"),
            Err(DesignationError::NonNumericSegment {
                index: 1,
                segment: "0a".to_string()
            })
        );
    }

    #[test]
    fn rejects_wrong_segment_width() {
        assert_eq!(
            check("1234.00.00.00"),
            Err(DesignationError::SegmentWidth {
                index: 3,
                segment: "00".to_string(),
                expected: 3
            })
        );
        assert_eq!(
            check("1234.000.00.000"),
            Err(DesignationError::SegmentWidth {
                index: 1,
                segment: "000".to_string(),
                expected: 2
            })
        );
    }

    #[test]
    fn rejects_whitespace() {
        assert!(!is_valid(" 1234.00.00.000"));
        assert!(!is_valid("1234.00.00.000 "));
        assert!(check("1234.00. 0.000").is_err());
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = check("1234.00.00.00").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("exactly 3 digits"));
    }
}
