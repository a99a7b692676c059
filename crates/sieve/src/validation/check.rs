//! Check result types.
//!
//! Every check produces one [`CheckResult`]. A failed check is a successful
//! execution that found problems; execution failures are
//! [`CheckError`](crate::CheckError)s and never appear here.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::inference::ColumnAnalysis;
use crate::schema::{DataType, StorageType};

/// Maximum number of offending rows listed per column.
pub const MAX_REPORTED_ROWS: usize = 10;

/// Maximum number of sample values shown for a type mismatch.
pub const MAX_SAMPLE_VALUES: usize = 3;

/// Kind of check, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    RowCount,
    DataTypes,
    ValueRanges,
    DataConsistency,
    AutomaticQuality,
}

impl CheckType {
    /// Get a human-readable label for the check.
    pub fn label(&self) -> &'static str {
        match self {
            CheckType::RowCount => "Row count",
            CheckType::DataTypes => "Data type",
            CheckType::ValueRanges => "Value range",
            CheckType::DataConsistency => "Data consistency",
            CheckType::AutomaticQuality => "Automatic quality",
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check_type", rename_all = "snake_case")]
pub enum CheckResult {
    RowCount(RowCountResult),
    DataTypes(DataTypesResult),
    ValueRanges(ValueRangesResult),
    DataConsistency(ConsistencyResult),
    AutomaticQuality(AutomaticQualityResult),
}

impl CheckResult {
    /// Which check produced this result.
    pub fn check_type(&self) -> CheckType {
        match self {
            CheckResult::RowCount(_) => CheckType::RowCount,
            CheckResult::DataTypes(_) => CheckType::DataTypes,
            CheckResult::ValueRanges(_) => CheckType::ValueRanges,
            CheckResult::DataConsistency(_) => CheckType::DataConsistency,
            CheckResult::AutomaticQuality(_) => CheckType::AutomaticQuality,
        }
    }

    /// Whether the check found no problems.
    pub fn passed(&self) -> bool {
        match self {
            CheckResult::RowCount(r) => r.passed,
            CheckResult::DataTypes(r) => r.passed,
            CheckResult::ValueRanges(r) => r.passed,
            CheckResult::DataConsistency(r) => r.passed,
            CheckResult::AutomaticQuality(r) => r.passed,
        }
    }

    /// One-line summary of the outcome.
    pub fn message(&self) -> &str {
        match self {
            CheckResult::RowCount(r) => &r.message,
            CheckResult::DataTypes(r) => &r.message,
            CheckResult::ValueRanges(r) => &r.message,
            CheckResult::DataConsistency(r) => &r.message,
            CheckResult::AutomaticQuality(r) => &r.message,
        }
    }
}

/// Render "passed"/"failed" for messages.
pub(crate) fn outcome(passed: bool) -> &'static str {
    if passed { "passed" } else { "failed" }
}

// =============================================================================
// ROW COUNT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowCountResult {
    pub passed: bool,
    pub row_count: usize,
    pub min_rows_required: usize,
    pub message: String,
}

// =============================================================================
// DATA TYPES
// =============================================================================

/// Declared type disagrees with how the column is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeMismatch {
    pub expected: DataType,
    pub actual: StorageType,
    /// First few cells of the column; missing cells are `null`.
    pub sample_values: Vec<Option<String>>,
}

/// A value that does not satisfy the declared type's grammar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidValue {
    pub row_index: usize,
    pub value: String,
    pub issue: String,
}

/// Invalid values found in one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentIssue {
    pub expected_type: DataType,
    /// At most [`MAX_REPORTED_ROWS`] entries.
    pub invalid_values: Vec<InvalidValue>,
    pub total_invalid: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTypesResult {
    pub passed: bool,
    pub mismatches: IndexMap<String, TypeMismatch>,
    pub content_issues: IndexMap<String, ContentIssue>,
    pub missing_columns: Vec<String>,
    pub message: String,
}

// =============================================================================
// VALUE RANGES
// =============================================================================

/// One broken constraint on one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowViolation {
    pub row_index: usize,
    /// The raw cell, `null` when missing.
    pub value: Option<String>,
    pub rule_violated: String,
}

/// Violations found in one rule column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnViolations {
    /// Set when the rule column does not exist.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    pub violation_count: usize,
    /// At most [`MAX_REPORTED_ROWS`] entries.
    pub violating_rows: Vec<RowViolation>,
    pub total_violations: usize,
}

impl ColumnViolations {
    /// Entry for a rule column that is absent from the table.
    pub fn column_not_found(column: &str) -> Self {
        Self {
            error: Some(format!("Column '{}' not found in table", column)),
            violation_count: 0,
            violating_rows: Vec::new(),
            total_violations: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRangesResult {
    pub passed: bool,
    pub violations: IndexMap<String, ColumnViolations>,
    pub total_violations: usize,
    pub message: String,
}

// =============================================================================
// CONSISTENCY
// =============================================================================

/// A consistency problem in one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConsistencyIssue {
    MissingValues {
        count: usize,
        /// Percent of rows, rounded to two decimals.
        percentage: f64,
    },
    MixedTypes {
        numeric_values: usize,
        text_values: usize,
        suggestion: String,
    },
    ConstantValues {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyResult {
    pub passed: bool,
    pub issues: IndexMap<String, Vec<ConsistencyIssue>>,
    pub total_issues: usize,
    pub message: String,
}

// =============================================================================
// AUTOMATIC QUALITY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomaticQualityResult {
    pub passed: bool,
    pub column_analysis: IndexMap<String, ColumnAnalysis>,
    pub total_outliers: usize,
    pub message: String,
}
