//! Column-level type inference and outlier detection.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::classifier::{Classification, classify};
use crate::input::DataTable;
use crate::schema::DataType;

/// Share of values, in percent, a classification needs to dominate a column.
pub const DOMINANCE_THRESHOLD_PERCENT: usize = 70;

/// A value that disagrees with its column's inferred type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlier {
    /// Zero-based row in the original table.
    pub row_index: usize,
    /// The raw value.
    pub value: String,
    /// The column's inferred type.
    pub expected_type: DataType,
    /// What the value itself classified as.
    pub actual_classification: Classification,
    /// Human-readable explanation.
    pub reason: String,
}

/// Result of inferring one column's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAnalysis {
    /// Dominant type, or `str` when nothing dominates.
    pub inferred_type: DataType,
    /// Share of values (0.0-1.0) supporting the inferred type.
    pub confidence: f64,
    /// Count of values per classification, all five always present.
    pub pattern_counts: IndexMap<Classification, usize>,
    /// Percentage of values per classification.
    pub type_percentages: IndexMap<Classification, f64>,
    /// Values that disagree with the inferred type, in row order.
    pub outliers: Vec<Outlier>,
}

impl ColumnAnalysis {
    /// Analysis of a column with no present values.
    pub fn empty() -> Self {
        Self {
            inferred_type: DataType::Str,
            confidence: 0.0,
            pattern_counts: Classification::ALL.iter().map(|c| (*c, 0)).collect(),
            type_percentages: Classification::ALL.iter().map(|c| (*c, 0.0)).collect(),
            outliers: Vec::new(),
        }
    }

    /// Total number of values that were classified.
    pub fn total_values(&self) -> usize {
        self.pattern_counts.values().sum()
    }
}

/// Infers a column's dominant type from its values.
#[derive(Debug, Clone, Default)]
pub struct ColumnInferencer;

impl ColumnInferencer {
    /// Create a new inferencer.
    pub fn new() -> Self {
        Self
    }

    /// Infer the type of a table column, skipping missing cells but keeping row indices.
    pub fn infer_column(&self, table: &DataTable, col_index: usize) -> ColumnAnalysis {
        let values: Vec<(usize, &str)> = table.non_missing(col_index).collect();
        self.infer(&values)
    }

    /// Infer the type of a sequence of present values tagged with their row index.
    pub fn infer(&self, values: &[(usize, &str)]) -> ColumnAnalysis {
        if values.is_empty() {
            return ColumnAnalysis::empty();
        }

        let classified: Vec<(usize, &str, Classification)> = values
            .iter()
            .map(|&(row, value)| (row, value, classify(value)))
            .collect();

        let mut pattern_counts: IndexMap<Classification, usize> =
            Classification::ALL.iter().map(|c| (*c, 0)).collect();
        for (_, _, classification) in &classified {
            *pattern_counts.entry(*classification).or_insert(0) += 1;
        }

        let total = classified.len();
        let type_percentages: IndexMap<Classification, f64> = pattern_counts
            .iter()
            .map(|(c, count)| (*c, *count as f64 * 100.0 / total as f64))
            .collect();

        // First maximum in enumeration order wins ties
        let (dominant, dominant_count) = pattern_counts.iter().fold(
            (Classification::Integer, 0usize),
            |best, (c, count)| if *count > best.1 { (*c, *count) } else { best },
        );

        if dominant_count * 100 >= total * DOMINANCE_THRESHOLD_PERCENT {
            let inferred_type = dominant.data_type();
            let outliers = classified
                .iter()
                .filter(|(_, _, c)| *c != dominant)
                .map(|&(row_index, value, actual)| Outlier {
                    row_index,
                    value: value.to_string(),
                    expected_type: inferred_type,
                    actual_classification: actual,
                    reason: format!("Expected {} but found {}: '{}'", inferred_type, actual, value),
                })
                .collect();

            ColumnAnalysis {
                inferred_type,
                confidence: dominant_count as f64 / total as f64,
                pattern_counts,
                type_percentages,
                outliers,
            }
        } else {
            let text_count = pattern_counts
                .get(&Classification::Text)
                .copied()
                .unwrap_or(0);
            let outliers = classified
                .iter()
                .filter(|(_, _, c)| *c != Classification::Text)
                .map(|&(row_index, value, actual)| Outlier {
                    row_index,
                    value: value.to_string(),
                    expected_type: DataType::Str,
                    actual_classification: actual,
                    reason: format!("Mixed data types in column - found {}: '{}'", actual, value),
                })
                .collect();

            ColumnAnalysis {
                inferred_type: DataType::Str,
                confidence: text_count as f64 / total as f64,
                pattern_counts,
                type_percentages,
                outliers,
            }
        }
    }
}
