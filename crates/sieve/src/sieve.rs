//! Main Sieve struct and public API.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::SieveConfig;
use crate::error::Result;
use crate::inference::{ColumnAnalysis, ColumnInferencer};
use crate::input::{DataTable, Parser, SourceMetadata};
use crate::report::QualityReport;
use crate::validation::{
    AutomaticQualityCheck, Check, ConsistencyCheck, DataTypeCheck, RowCountCheck, ValueRangeCheck,
};

/// Inferred types of every column of a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInference {
    pub source: SourceMetadata,
    pub columns: IndexMap<String, ColumnAnalysis>,
}

/// The quality check pipeline.
pub struct Sieve {
    config: SieveConfig,
    parser: Parser,
}

impl Sieve {
    /// Create a pipeline with default configuration: row count, consistency
    /// and automatic quality checks only.
    pub fn new() -> Self {
        Self::with_config(SieveConfig::default())
    }

    pub fn with_config(config: SieveConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &SieveConfig {
        &self.config
    }

    /// Load a file and run every configured check.
    ///
    /// Never fails: load errors are recorded in the returned report.
    pub fn check_file(&self, path: impl AsRef<Path>) -> QualityReport {
        let path = path.as_ref();
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match self.parser.parse_file(path) {
            Ok((table, source)) => self.run(label, Some(source), &table),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load data");
                QualityReport::load_failed(label, e)
            }
        }
    }

    /// Parse in-memory text and run every configured check.
    pub fn check_str(&self, label: &str, content: &str) -> QualityReport {
        match self.parser.parse_str(label, content) {
            Ok((table, source)) => self.run(label.to_string(), Some(source), &table),
            Err(e) => {
                warn!(label, error = %e, "failed to load data");
                QualityReport::load_failed(label, e)
            }
        }
    }

    /// Run every configured check against an already loaded table.
    pub fn check_table(&self, label: &str, table: &DataTable) -> QualityReport {
        self.run(label.to_string(), None, table)
    }

    /// Infer the type of every column of a file without running checks.
    pub fn infer_file(&self, path: impl AsRef<Path>) -> Result<TableInference> {
        let (table, source) = self.parser.parse_file(path)?;
        let inferencer = ColumnInferencer::new();

        let columns = table
            .headers
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), inferencer.infer_column(&table, index)))
            .collect();

        Ok(TableInference { source, columns })
    }

    /// Checks in execution order. Schema and rule checks only run when configured.
    fn checks(&self) -> Vec<Box<dyn Check>> {
        let checks = &self.config.checks;
        let mut pipeline: Vec<Box<dyn Check>> = vec![Box::new(RowCountCheck::new(checks.min_rows))];

        if let Some(schema) = checks.active_schema() {
            pipeline.push(Box::new(DataTypeCheck::new(schema.clone())));
        }
        if let Some(rules) = checks.active_rules() {
            pipeline.push(Box::new(ValueRangeCheck::new(rules.clone())));
        }

        pipeline.push(Box::new(ConsistencyCheck));
        pipeline.push(Box::new(AutomaticQualityCheck::new()));
        pipeline
    }

    fn run(&self, label: String, source: Option<SourceMetadata>, table: &DataTable) -> QualityReport {
        info!(
            source = %label,
            rows = table.row_count(),
            columns = table.column_count(),
            "running quality checks"
        );

        let mut results = Vec::new();
        let mut errors = Vec::new();

        for check in self.checks() {
            match check.run(table) {
                Ok(result) => results.push(result),
                Err(e) => {
                    let check_type = check.check_type();
                    warn!(check = %check_type, error = %e, "check could not run");
                    errors.push(format!("{} check failed: {}", check_type.label(), e));
                }
            }
        }

        let report = QualityReport::completed(label, source, table, results, errors);
        info!(
            passed = report.summary.passed_checks,
            failed = report.summary.failed_checks,
            errors = report.errors.len(),
            "quality checks complete"
        );
        report
    }
}

impl Default for Sieve {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CheckConfig, Rules, Schema};
    use crate::schema::{DataType, ValueRule};
    use crate::validation::{CheckResult, CheckType};

    fn sieve_with(checks: CheckConfig) -> Sieve {
        Sieve::with_config(SieveConfig {
            checks,
            ..SieveConfig::default()
        })
    }

    fn check_types(report: &QualityReport) -> Vec<CheckType> {
        report.checks.iter().map(CheckResult::check_type).collect()
    }

    #[test]
    fn test_default_pipeline_order() {
        let report = Sieve::new().check_str("gender.csv", "gender\nM\nF\nF\nX\nM\n");

        assert!(report.load_success);
        assert_eq!(
            check_types(&report),
            vec![
                CheckType::RowCount,
                CheckType::DataConsistency,
                CheckType::AutomaticQuality
            ]
        );
        assert!(report.passed());
    }

    #[test]
    fn test_full_pipeline_order() {
        let checks = CheckConfig::default()
            .with_schema(Schema::from([("age".to_string(), DataType::Int)]))
            .with_rules(Rules::from([(
                "age".to_string(),
                ValueRule::new().with_min(0.0),
            )]));
        let report = sieve_with(checks).check_str("ages.csv", "age\n1\n2\n3\n");

        assert_eq!(
            check_types(&report),
            vec![
                CheckType::RowCount,
                CheckType::DataTypes,
                CheckType::ValueRanges,
                CheckType::DataConsistency,
                CheckType::AutomaticQuality
            ]
        );
        assert_eq!(report.summary.total_checks, 5);
    }

    #[test]
    fn test_load_failure_runs_nothing() {
        let report = Sieve::new().check_str("empty.csv", "");

        assert!(!report.load_success);
        assert!(report.checks.is_empty());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Failed to load CSV: "));
    }

    #[test]
    fn test_check_error_does_not_stop_pipeline() {
        let checks = CheckConfig::default().with_rules(Rules::from([(
            "age".to_string(),
            ValueRule::new().with_max(120.0),
        )]));
        let report = sieve_with(checks).check_str("ages.csv", "age\n34\ninvalid_age\n");

        assert_eq!(report.checks.len(), 3);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Value range check failed: "));
    }

    #[test]
    fn test_check_table_has_no_source() {
        let table = DataTable::from_strings(vec!["x"], vec![vec!["1"], vec!["2"]]);
        let report = Sieve::new().check_table("inline", &table);

        assert!(report.source.is_none());
        assert_eq!(report.data_info.unwrap().columns, vec!["x"]);
    }
}
