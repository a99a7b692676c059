//! Sieve: column type inference and data quality checks for tabular datasets.
//!
//! Sieve loads a CSV/TSV table, infers each column's dominant type from its
//! raw values, flags values that disagree with it and runs a fixed set of
//! quality checks. Every check is a pure function of the table and its
//! configuration; the result is a serializable [`QualityReport`].
//!
//! # Checks
//!
//! Run in this order:
//!
//! - **Row count**: at least `min_rows` data rows
//! - **Data types**: declared column types against storage and content (only with a schema)
//! - **Value ranges**: `min`/`max` bounds and `allowed` sets (only with rules)
//! - **Data consistency**: missing values, numeric/text mixes, constant columns
//! - **Automatic quality**: inferred-type outliers
//!
//! # Example
//!
//! ```no_run
//! use sieve::{CheckConfig, DataType, Sieve, SieveConfig};
//!
//! let checks = CheckConfig::default()
//!     .with_schema([("age".to_string(), DataType::Int)].into_iter().collect());
//! let sieve = Sieve::with_config(SieveConfig {
//!     checks,
//!     ..SieveConfig::default()
//! });
//!
//! let report = sieve.check_file("patients.csv");
//! println!("Passed: {}/{}", report.summary.passed_checks, report.summary.total_checks);
//! ```

pub mod config;
pub mod error;
pub mod inference;
pub mod input;
pub mod report;
pub mod schema;
pub mod validation;

mod sieve;

pub use crate::sieve::{Sieve, TableInference};
pub use config::{CheckConfig, Rules, Schema, SieveConfig};
pub use error::{CheckError, Result, SieveError};
pub use inference::{Classification, ColumnAnalysis, ColumnInferencer, Outlier, classify};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use report::{DataInfo, DetailedIssues, QualityReport, ReportSummary};
pub use schema::{DataType, StorageType, ValueRule};
pub use validation::{CheckResult, CheckType};
