//! Quality checks and their results.

mod check;
mod validators;

pub use check::{
    AutomaticQualityResult, CheckResult, CheckType, ColumnViolations, ConsistencyIssue,
    ConsistencyResult, ContentIssue, DataTypesResult, InvalidValue, MAX_REPORTED_ROWS,
    MAX_SAMPLE_VALUES, RowCountResult, RowViolation, TypeMismatch, ValueRangesResult,
};
pub use validators::{
    AutomaticQualityCheck, Check, ConsistencyCheck, DataTypeCheck, RowCountCheck, ValueRangeCheck,
};
