//! Single-value classification.
//!
//! Every check that needs to know whether a string "is an int" or "is a
//! date" goes through this module, so the outlier detector and the
//! content-validity check always agree.

use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::schema::DataType;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

static INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());

static FLOAT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").unwrap()
});

/// Date layouts paired with the chrono format that validates them.
static DATE_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(), "%Y-%m-%d"), // ISO date
        (Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap(), "%m/%d/%Y"), // US date
        (Regex::new(r"^\d{2}-\d{2}-\d{4}$").unwrap(), "%m-%d-%Y"), // US date, dashes
        (Regex::new(r"^\d{4}/\d{2}/\d{2}$").unwrap(), "%Y/%m/%d"), // Alt ISO
    ]
});

const BOOLEAN_LITERALS: &[&str] = &["true", "false", "1", "0", "yes", "no", "y", "n", "t", "f"];

/// Category of a single raw value.
///
/// Declaration order is the tie-break order used when two categories are
/// equally common in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Integer,
    Float,
    Date,
    Boolean,
    Text,
}

impl Classification {
    /// All classifications in priority and tie-break order.
    pub const ALL: [Classification; 5] = [
        Classification::Integer,
        Classification::Float,
        Classification::Date,
        Classification::Boolean,
        Classification::Text,
    ];

    /// The column type a column dominated by this classification is given.
    pub fn data_type(&self) -> DataType {
        match self {
            Classification::Integer => DataType::Int,
            Classification::Float => DataType::Float,
            Classification::Date => DataType::Datetime,
            Classification::Boolean => DataType::Bool,
            Classification::Text => DataType::Str,
        }
    }

    /// Name used in reports and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Integer => "integer",
            Classification::Float => "float",
            Classification::Date => "date",
            Classification::Boolean => "boolean",
            Classification::Text => "text",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a value: integer, then float, date, boolean, else text.
pub fn classify(value: &str) -> Classification {
    let trimmed = value.trim();

    if is_integer(trimmed) {
        Classification::Integer
    } else if is_float(trimmed) {
        Classification::Float
    } else if is_date(trimmed) {
        Classification::Date
    } else if is_boolean(trimmed) {
        Classification::Boolean
    } else {
        Classification::Text
    }
}

/// Check a value against one declared type's grammar only.
///
/// Unlike [`classify`] this does not walk the priority chain: `"1"` is a
/// valid bool and a valid float as well as a valid int.
pub fn matches_type(value: &str, data_type: DataType) -> bool {
    let trimmed = value.trim();
    match data_type {
        DataType::Int => is_integer(trimmed),
        DataType::Float => is_float(trimmed),
        DataType::Datetime => is_date(trimmed),
        DataType::Bool => is_boolean(trimmed),
        DataType::Str => true,
    }
}

/// Base-10 integer with optional sign. No decimal point, no exponent.
pub fn is_integer(value: &str) -> bool {
    INTEGER_PATTERN.is_match(value.trim())
}

/// Decimal literal with optional sign and exponent. `NaN` and `inf` are not numbers here.
pub fn is_float(value: &str) -> bool {
    FLOAT_PATTERN.is_match(value.trim())
}

/// One of the four fixed layouts, and a real calendar date under it.
pub fn is_date(value: &str) -> bool {
    try_parse_date(value).is_some()
}

/// Case-insensitive boolean literal.
pub fn is_boolean(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    BOOLEAN_LITERALS.contains(&lower.as_str())
}

/// `true` or `false` in any case. Narrower than [`is_boolean`]; used for storage typing.
pub fn is_boolean_word(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false")
}

/// Parse an integer. Returns `None` for anything outside the grammar or outside `i64`.
pub fn try_parse_int(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if !is_integer(trimmed) {
        return None;
    }
    trimmed.parse().ok()
}

/// Parse a decimal number under the same grammar as [`is_float`].
pub fn try_parse_float(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if !is_float(trimmed) {
        return None;
    }
    trimmed.parse().ok()
}

/// Parse a date in one of the four recognised layouts.
pub fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    DATE_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(trimmed))
        .and_then(|(_, format)| NaiveDate::parse_from_str(trimmed, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_integers() {
        assert_eq!(classify("34"), Classification::Integer);
        assert_eq!(classify("-7"), Classification::Integer);
        assert_eq!(classify("+12"), Classification::Integer);
        assert_eq!(classify("  42 "), Classification::Integer);
        // Digits win over boolean
        assert_eq!(classify("1"), Classification::Integer);
        assert_eq!(classify("0"), Classification::Integer);
    }

    #[test]
    fn test_classify_floats() {
        assert_eq!(classify("12.5"), Classification::Float);
        assert_eq!(classify("-0.25"), Classification::Float);
        assert_eq!(classify(".5"), Classification::Float);
        assert_eq!(classify("3."), Classification::Float);
        assert_eq!(classify("1e5"), Classification::Float);
        assert_eq!(classify("6.02E-23"), Classification::Float);
    }

    #[test]
    fn test_classify_dates() {
        assert_eq!(classify("2025-01-02"), Classification::Date);
        assert_eq!(classify("01/02/2025"), Classification::Date);
        assert_eq!(classify("01-02-2025"), Classification::Date);
        assert_eq!(classify("2025/01/02"), Classification::Date);
    }

    #[test]
    fn test_invalid_calendar_dates_are_text() {
        assert_eq!(classify("2025-13-40"), Classification::Text);
        assert_eq!(classify("13/40/2020"), Classification::Text);
        assert_eq!(classify("2023-02-29"), Classification::Text);
        assert_eq!(classify("2024-02-29"), Classification::Date);
    }

    #[test]
    fn test_classify_booleans() {
        for value in ["true", "FALSE", "Yes", "no", "Y", "n", "t", "F"] {
            assert_eq!(classify(value), Classification::Boolean, "{value}");
        }
    }

    #[test]
    fn test_classify_text() {
        assert_eq!(classify("not_a_date"), Classification::Text);
        assert_eq!(classify("NaN"), Classification::Text);
        assert_eq!(classify("inf"), Classification::Text);
        assert_eq!(classify("120/80"), Classification::Text);
        assert_eq!(classify("M"), Classification::Text);
        assert_eq!(classify("1_000"), Classification::Text);
    }

    #[test]
    fn test_matches_type_ignores_priority() {
        assert!(matches_type("1", DataType::Bool));
        assert!(matches_type("1", DataType::Float));
        assert!(matches_type("1", DataType::Int));
        assert!(!matches_type("12.5", DataType::Int));
        assert!(!matches_type("NaN", DataType::Int));
        assert!(!matches_type("", DataType::Int));
        assert!(matches_type("anything", DataType::Str));
    }

    #[test]
    fn test_try_parse() {
        assert_eq!(try_parse_int(" -15 "), Some(-15));
        assert_eq!(try_parse_int("99999999999999999999"), None);
        assert!(is_integer("99999999999999999999"));
        assert_eq!(try_parse_float("2.5"), Some(2.5));
        assert_eq!(try_parse_float("NaN"), None);
        assert_eq!(
            try_parse_date("12/31/2024"),
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
    }

    #[test]
    fn test_tie_break_order() {
        let mut sorted = Classification::ALL;
        sorted.sort();
        assert_eq!(sorted, Classification::ALL);
    }
}
