//! The quality checks run by the pipeline.

use std::collections::HashSet;
use std::num::NonZeroUsize;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use super::check::{
    AutomaticQualityResult, CheckResult, CheckType, ColumnViolations, ConsistencyIssue,
    ConsistencyResult, ContentIssue, DataTypesResult, InvalidValue, MAX_REPORTED_ROWS,
    MAX_SAMPLE_VALUES, RowCountResult, RowViolation, TypeMismatch, ValueRangesResult, outcome,
};
use crate::error::CheckError;
use crate::inference::{ColumnInferencer, classifier};
use crate::input::DataTable;
use crate::schema::{DataType, ValueRule, format_bound};

/// Trait for checks.
pub trait Check {
    /// Which check this is.
    fn check_type(&self) -> CheckType;

    /// Run the check against a loaded table.
    fn run(&self, table: &DataTable) -> Result<CheckResult, CheckError>;
}

// =============================================================================
// ROW COUNT
// =============================================================================

/// Requires a minimum number of data rows.
pub struct RowCountCheck {
    min_rows: NonZeroUsize,
}

impl RowCountCheck {
    pub fn new(min_rows: NonZeroUsize) -> Self {
        Self { min_rows }
    }

    pub fn evaluate(&self, table: &DataTable) -> RowCountResult {
        let row_count = table.row_count();
        let min_rows = self.min_rows.get();
        let passed = row_count >= min_rows;

        RowCountResult {
            passed,
            row_count,
            min_rows_required: min_rows,
            message: format!(
                "Row count check {}: {} rows (minimum: {})",
                outcome(passed),
                row_count,
                min_rows
            ),
        }
    }
}

impl Check for RowCountCheck {
    fn check_type(&self) -> CheckType {
        CheckType::RowCount
    }

    fn run(&self, table: &DataTable) -> Result<CheckResult, CheckError> {
        Ok(CheckResult::RowCount(self.evaluate(table)))
    }
}

// =============================================================================
// DATA TYPES
// =============================================================================

/// Compares declared column types against storage and content.
pub struct DataTypeCheck {
    schema: IndexMap<String, DataType>,
}

impl DataTypeCheck {
    pub fn new(schema: IndexMap<String, DataType>) -> Self {
        Self { schema }
    }

    pub fn evaluate(&self, table: &DataTable) -> DataTypesResult {
        let mut mismatches = IndexMap::new();
        let mut content_issues = IndexMap::new();
        let mut missing_columns = Vec::new();

        for (column, &expected) in &self.schema {
            let Some(index) = table.column_index(column) else {
                missing_columns.push(column.clone());
                continue;
            };

            let actual = table.storage_type(index);
            if !expected.accepts_storage(actual) {
                debug!(column = %column, %expected, %actual, "storage type mismatch");
                mismatches.insert(
                    column.clone(),
                    TypeMismatch {
                        expected,
                        actual,
                        sample_values: table
                            .column_cells(index)
                            .take(MAX_SAMPLE_VALUES)
                            .map(|cell| cell.map(str::to_string))
                            .collect(),
                    },
                );
            }

            // Content is checked regardless of storage
            let invalid = find_invalid_values(table, index, expected);
            if !invalid.is_empty() {
                let total_invalid = invalid.len();
                content_issues.insert(
                    column.clone(),
                    ContentIssue {
                        expected_type: expected,
                        invalid_values: invalid.into_iter().take(MAX_REPORTED_ROWS).collect(),
                        total_invalid,
                    },
                );
            }
        }

        let passed = mismatches.is_empty() && content_issues.is_empty() && missing_columns.is_empty();

        DataTypesResult {
            passed,
            message: format!(
                "Data type check {}: {} dtype mismatches, {} content issues, {} missing columns",
                outcome(passed),
                mismatches.len(),
                content_issues.len(),
                missing_columns.len()
            ),
            mismatches,
            content_issues,
            missing_columns,
        }
    }
}

/// Present values of a column that do not satisfy `expected`'s grammar.
fn find_invalid_values(table: &DataTable, index: usize, expected: DataType) -> Vec<InvalidValue> {
    table
        .non_missing(index)
        .filter(|(_, value)| !classifier::matches_type(value, expected))
        .map(|(row_index, value)| InvalidValue {
            row_index,
            value: value.to_string(),
            issue: format!("Invalid {}: \"{}\"", expected, value.trim()),
        })
        .collect()
}

impl Check for DataTypeCheck {
    fn check_type(&self) -> CheckType {
        CheckType::DataTypes
    }

    fn run(&self, table: &DataTable) -> Result<CheckResult, CheckError> {
        Ok(CheckResult::DataTypes(self.evaluate(table)))
    }
}

// =============================================================================
// VALUE RANGES
// =============================================================================

/// Checks numeric bounds and allowed-value sets.
pub struct ValueRangeCheck {
    rules: IndexMap<String, ValueRule>,
}

impl ValueRangeCheck {
    pub fn new(rules: IndexMap<String, ValueRule>) -> Self {
        Self { rules }
    }

    /// Evaluate every rule.
    ///
    /// Fails when a bound targets a column that is not stored as numbers.
    pub fn evaluate(&self, table: &DataTable) -> Result<ValueRangesResult, CheckError> {
        let mut violations = IndexMap::new();

        for (column, rule) in &self.rules {
            let Some(index) = table.column_index(column) else {
                // Reported, but an absent column has nothing to violate
                violations.insert(column.clone(), ColumnViolations::column_not_found(column));
                continue;
            };

            let found = find_rule_violations(table, index, column, rule)?;
            if !found.is_empty() {
                debug!(column = %column, count = found.len(), "value rule violations");
                let total = found.len();
                violations.insert(
                    column.clone(),
                    ColumnViolations {
                        error: None,
                        violation_count: total,
                        violating_rows: found.into_iter().take(MAX_REPORTED_ROWS).collect(),
                        total_violations: total,
                    },
                );
            }
        }

        let total_violations: usize = violations.values().map(|v| v.violation_count).sum();
        let passed = total_violations == 0;

        Ok(ValueRangesResult {
            passed,
            message: format!(
                "Value range check {}: {} total violations across {} columns",
                outcome(passed),
                total_violations,
                violations.len()
            ),
            violations,
            total_violations,
        })
    }
}

/// Apply each constraint of `rule` independently, min then max then allowed.
///
/// A row breaking two constraints is listed twice.
fn find_rule_violations(
    table: &DataTable,
    index: usize,
    column: &str,
    rule: &ValueRule,
) -> Result<Vec<RowViolation>, CheckError> {
    if rule.has_bounds() {
        let storage = table.storage_type(index);
        if !storage.is_numeric() {
            return Err(CheckError::NonNumericColumn {
                column: column.to_string(),
                storage,
            });
        }
    }

    let mut found = Vec::new();

    if let Some(min) = rule.min {
        found.extend(bound_violations(table, index, |v| v < min, || {
            format!("min_value >= {}", format_bound(min))
        }));
    }

    if let Some(max) = rule.max {
        found.extend(bound_violations(table, index, |v| v > max, || {
            format!("max_value <= {}", format_bound(max))
        }));
    }

    if let Some(allowed) = &rule.allowed {
        let description = format!("value must be in {}", Value::Array(allowed.clone()));
        found.extend(
            table
                .column_cells(index)
                .enumerate()
                .filter(|(_, cell)| !rule.allows(*cell))
                .map(|(row_index, cell)| RowViolation {
                    row_index,
                    value: cell.map(str::to_string),
                    rule_violated: description.clone(),
                }),
        );
    }

    Ok(found)
}

/// Rows whose numeric value breaks a bound. Missing cells never do.
fn bound_violations(
    table: &DataTable,
    index: usize,
    violates: impl Fn(f64) -> bool,
    describe: impl Fn() -> String,
) -> Vec<RowViolation> {
    table
        .non_missing(index)
        .filter(|(_, value)| classifier::try_parse_float(value).is_some_and(&violates))
        .map(|(row_index, value)| RowViolation {
            row_index,
            value: Some(value.to_string()),
            rule_violated: describe(),
        })
        .collect()
}

impl Check for ValueRangeCheck {
    fn check_type(&self) -> CheckType {
        CheckType::ValueRanges
    }

    fn run(&self, table: &DataTable) -> Result<CheckResult, CheckError> {
        self.evaluate(table).map(CheckResult::ValueRanges)
    }
}

// =============================================================================
// CONSISTENCY
// =============================================================================

/// Flags missing values, numeric/text mixes and constant columns.
#[derive(Debug, Clone, Default)]
pub struct ConsistencyCheck;

impl ConsistencyCheck {
    pub fn evaluate(&self, table: &DataTable) -> ConsistencyResult {
        let mut issues = IndexMap::new();
        let row_count = table.row_count();

        for (index, column) in table.headers.iter().enumerate() {
            let mut column_issues = Vec::new();

            let missing = table.missing_count(index);
            if missing > 0 {
                column_issues.push(ConsistencyIssue::MissingValues {
                    count: missing,
                    percentage: round2(missing as f64 / row_count as f64 * 100.0),
                });
            }

            // Typed storage cannot mix; only untyped columns are inspected
            if table.storage_type(index).is_untyped() {
                let (numeric_values, text_values) = table
                    .non_missing(index)
                    .fold((0, 0), |(numeric, text), (_, value)| {
                        if classifier::is_float(value) {
                            (numeric + 1, text)
                        } else {
                            (numeric, text + 1)
                        }
                    });

                if numeric_values > 0 && text_values > 0 {
                    column_issues.push(ConsistencyIssue::MixedTypes {
                        numeric_values,
                        text_values,
                        suggestion: "Column contains both numeric and text values".to_string(),
                    });
                }
            }

            let present: Vec<&str> = table.non_missing(index).map(|(_, v)| v.trim()).collect();
            let distinct: HashSet<&str> = present.iter().copied().collect();
            if distinct.len() == 1 && present.len() > 1 {
                column_issues.push(ConsistencyIssue::ConstantValues {
                    message: "All non-null values are identical".to_string(),
                });
            }

            if !column_issues.is_empty() {
                issues.insert(column.clone(), column_issues);
            }
        }

        let total_issues: usize = issues.values().map(Vec::len).sum();
        let passed = issues.is_empty();

        ConsistencyResult {
            passed,
            message: format!(
                "Data consistency check {}: {} issues found across {} columns",
                outcome(passed),
                total_issues,
                issues.len()
            ),
            issues,
            total_issues,
        }
    }
}

fn round2(value: f64) -> f64 {
    if value.is_finite() {
        (value * 100.0).round() / 100.0
    } else {
        0.0
    }
}

impl Check for ConsistencyCheck {
    fn check_type(&self) -> CheckType {
        CheckType::DataConsistency
    }

    fn run(&self, table: &DataTable) -> Result<CheckResult, CheckError> {
        Ok(CheckResult::DataConsistency(self.evaluate(table)))
    }
}

// =============================================================================
// AUTOMATIC QUALITY
// =============================================================================

/// Infers every column's type and reports values that disagree with it.
#[derive(Debug, Clone, Default)]
pub struct AutomaticQualityCheck {
    inferencer: ColumnInferencer,
}

impl AutomaticQualityCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&self, table: &DataTable) -> AutomaticQualityResult {
        let column_analysis: IndexMap<_, _> = table
            .headers
            .iter()
            .enumerate()
            .map(|(index, column)| (column.clone(), self.inferencer.infer_column(table, index)))
            .collect();

        for (column, analysis) in &column_analysis {
            debug!(
                column = %column,
                inferred_type = %analysis.inferred_type,
                confidence = analysis.confidence,
                outliers = analysis.outliers.len(),
                "inferred column type"
            );
        }

        let total_outliers: usize = column_analysis.values().map(|a| a.outliers.len()).sum();
        let affected = column_analysis
            .values()
            .filter(|a| !a.outliers.is_empty())
            .count();
        let passed = total_outliers == 0;

        AutomaticQualityResult {
            passed,
            message: format!(
                "Automatic quality check {}: {} outliers found across {} columns",
                outcome(passed),
                total_outliers,
                affected
            ),
            column_analysis,
            total_outliers,
        }
    }
}

impl Check for AutomaticQualityCheck {
    fn check_type(&self) -> CheckType {
        CheckType::AutomaticQuality
    }

    fn run(&self, table: &DataTable) -> Result<CheckResult, CheckError> {
        Ok(CheckResult::AutomaticQuality(self.evaluate(table)))
    }
}
