//! Inference engine: value classification and column type inference.

pub mod classifier;
mod column;

pub use classifier::{Classification, classify, matches_type};
pub use column::{ColumnAnalysis, ColumnInferencer, DOMINANCE_THRESHOLD_PERCENT, Outlier};
