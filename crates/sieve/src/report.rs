//! The report produced by one run.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::{DataTable, SourceMetadata};
use crate::validation::{CheckResult, DataTypesResult, RowCountResult, ValueRangesResult};

/// Shape of the loaded table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataInfo {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<String>,
    /// Approximate in-memory size, two decimals.
    pub memory_usage_mb: f64,
}

impl DataInfo {
    pub fn from_table(table: &DataTable) -> Self {
        let megabytes = table.memory_bytes() as f64 / (1024.0 * 1024.0);
        Self {
            row_count: table.row_count(),
            column_count: table.column_count(),
            columns: table.headers.clone(),
            memory_usage_mb: (megabytes * 100.0).round() / 100.0,
        }
    }
}

/// Pass/fail counts over the checks that ran.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_checks: usize,
    pub passed_checks: usize,
    pub failed_checks: usize,
    /// True only when at least one check ran and none failed.
    pub overall_passed: bool,
    /// Percent of checks passed, one decimal.
    pub success_rate: f64,
}

impl ReportSummary {
    pub fn from_checks(checks: &[CheckResult]) -> Self {
        let total_checks = checks.len();
        let passed_checks = checks.iter().filter(|c| c.passed()).count();
        let failed_checks = total_checks - passed_checks;

        let success_rate = if total_checks == 0 {
            0.0
        } else {
            (passed_checks as f64 / total_checks as f64 * 1000.0).round() / 10.0
        };

        Self {
            total_checks,
            passed_checks,
            failed_checks,
            overall_passed: failed_checks == 0 && total_checks > 0,
            success_rate,
        }
    }
}

/// Complete result of checking one table.
///
/// A failed load leaves `load_success` false, no checks and one error.
/// Errors from checks that could not execute sit alongside the checks
/// that did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// File name or label of the data.
    pub source_label: String,
    pub load_success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_info: Option<DataInfo>,
    /// Results in execution order.
    pub checks: Vec<CheckResult>,
    pub summary: ReportSummary,
    pub errors: Vec<String>,
}

impl QualityReport {
    /// Report for data that could not be loaded.
    pub fn load_failed(source_label: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self {
            source_label: source_label.into(),
            load_success: false,
            source: None,
            data_info: None,
            checks: Vec::new(),
            summary: ReportSummary::default(),
            errors: vec![format!("Failed to load CSV: {}", error)],
        }
    }

    /// Report over the checks that ran against a loaded table.
    pub fn completed(
        source_label: impl Into<String>,
        source: Option<SourceMetadata>,
        table: &DataTable,
        checks: Vec<CheckResult>,
        errors: Vec<String>,
    ) -> Self {
        let summary = ReportSummary::from_checks(&checks);
        Self {
            source_label: source_label.into(),
            load_success: true,
            source,
            data_info: Some(DataInfo::from_table(table)),
            checks,
            summary,
            errors,
        }
    }

    /// Whether the data loaded and every check that ran passed.
    pub fn passed(&self) -> bool {
        self.load_success && self.summary.overall_passed
    }

    /// Checks that found problems.
    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed())
    }

    /// Details of the failed row-count, data-type and value-range checks.
    pub fn detailed_issues(&self) -> DetailedIssues {
        let mut issues = DetailedIssues::default();
        for check in self.failed_checks() {
            match check {
                CheckResult::RowCount(r) => issues.row_count = Some(r.clone()),
                CheckResult::DataTypes(r) => issues.data_types = Some(r.clone()),
                CheckResult::ValueRanges(r) => {
                    issues.total_issue_count += r.total_violations;
                    issues.value_ranges = Some(r.clone());
                }
                CheckResult::DataConsistency(_) | CheckResult::AutomaticQuality(_) => {}
            }
        }
        issues
    }

    /// Serialize as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Failed-check details pulled out of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailedIssues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<RowCountResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_types: Option<DataTypesResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_ranges: Option<ValueRangesResult>,
    /// Value-range violations across the failed checks.
    pub total_issue_count: usize,
}

impl DetailedIssues {
    pub fn is_empty(&self) -> bool {
        self.row_count.is_none() && self.data_types.is_none() && self.value_ranges.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{ConsistencyResult, RowCountResult};
    use indexmap::IndexMap;

    fn row_count(passed: bool) -> CheckResult {
        CheckResult::RowCount(RowCountResult {
            passed,
            row_count: 3,
            min_rows_required: if passed { 1 } else { 10 },
            message: String::new(),
        })
    }

    fn consistency(passed: bool) -> CheckResult {
        CheckResult::DataConsistency(ConsistencyResult {
            passed,
            issues: IndexMap::new(),
            total_issues: 0,
            message: String::new(),
        })
    }

    #[test]
    fn test_summary_counts() {
        let summary = ReportSummary::from_checks(&[row_count(true), consistency(false), row_count(true)]);

        assert_eq!(summary.total_checks, 3);
        assert_eq!(summary.passed_checks, 2);
        assert_eq!(summary.failed_checks, 1);
        assert!(!summary.overall_passed);
        assert_eq!(summary.success_rate, 66.7);
    }

    #[test]
    fn test_summary_without_checks_does_not_pass() {
        let summary = ReportSummary::from_checks(&[]);
        assert!(!summary.overall_passed);
        assert_eq!(summary.success_rate, 0.0);
    }

    #[test]
    fn test_load_failed() {
        let report = QualityReport::load_failed("missing.csv", "file not found");

        assert!(!report.load_success);
        assert!(report.checks.is_empty());
        assert_eq!(report.errors, vec!["Failed to load CSV: file not found"]);
        assert!(!report.passed());

        let json = report.to_json_pretty().unwrap();
        assert!(!json.contains("data_info"));
    }

    #[test]
    fn test_detailed_issues_only_failed() {
        let table = DataTable::from_strings(vec!["a"], vec![vec!["1"]]);
        let report = QualityReport::completed(
            "t",
            None,
            &table,
            vec![row_count(false), consistency(false)],
            Vec::new(),
        );

        let issues = report.detailed_issues();
        assert!(issues.row_count.is_some());
        assert!(issues.data_types.is_none());
        assert!(!issues.is_empty());

        let passing = QualityReport::completed("t", None, &table, vec![row_count(true)], Vec::new());
        assert!(passing.detailed_issues().is_empty());
        assert_eq!(passing.detailed_issues().total_issue_count, 0);
        assert!(passing.passed());
    }

    #[test]
    fn test_detailed_issues_counts_range_violations() {
        let table = DataTable::from_strings(vec!["a"], vec![vec!["1"]]);
        let ranges = CheckResult::ValueRanges(ValueRangesResult {
            passed: false,
            violations: IndexMap::new(),
            total_violations: 7,
            message: String::new(),
        });
        let report =
            QualityReport::completed("t", None, &table, vec![row_count(false), ranges], Vec::new());

        let issues = report.detailed_issues();
        assert_eq!(issues.total_issue_count, 7);
        assert!(issues.value_ranges.is_some());
    }

    #[test]
    fn test_data_info_memory_usage() {
        let small = DataTable::from_strings(vec!["a"], vec![vec!["1"]]);
        assert_eq!(DataInfo::from_table(&small).memory_usage_mb, 0.0);

        let wide = "x".repeat(1024 * 1024);
        let large = DataTable::from_strings(vec!["a"], vec![vec![wide.as_str()], vec![wide.as_str()]]);
        let info = DataInfo::from_table(&large);
        assert_eq!(info.memory_usage_mb, 2.0);
        assert_eq!(info.row_count, 2);
    }
}
