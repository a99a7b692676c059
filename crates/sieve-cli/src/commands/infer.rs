//! Infer command - print each column's inferred type and outliers.

use std::path::PathBuf;

use colored::Colorize;
use sieve::Sieve;

/// Maximum outliers printed per column in text mode.
const MAX_PRINTED_OUTLIERS: usize = 5;

pub fn run(file: PathBuf, json_output: bool) -> Result<bool, Box<dyn std::error::Error>> {
    let inference = Sieve::new().infer_file(&file)?;
    let clean = inference.columns.values().all(|a| a.outliers.is_empty());

    if json_output {
        println!("{}", serde_json::to_string_pretty(&inference)?);
        return Ok(clean);
    }

    println!(
        "{} {} ({} rows)",
        "Column types for".cyan().bold(),
        inference.source.file.white(),
        inference.source.row_count
    );
    println!();

    for (column, analysis) in &inference.columns {
        let confidence = format!("{:>5.1}%", analysis.confidence * 100.0);
        let confidence = if analysis.confidence >= 0.9 {
            confidence.green()
        } else if analysis.confidence >= 0.7 {
            confidence.yellow()
        } else {
            confidence.red()
        };

        println!(
            "  {:20} {:10} {} outliers={}",
            column,
            analysis.inferred_type.as_str(),
            confidence,
            analysis.outliers.len()
        );
        for outlier in analysis.outliers.iter().take(MAX_PRINTED_OUTLIERS) {
            println!("      row {}: {}", outlier.row_index, outlier.reason);
        }
        if analysis.outliers.len() > MAX_PRINTED_OUTLIERS {
            println!(
                "      ... and {} more",
                analysis.outliers.len() - MAX_PRINTED_OUTLIERS
            );
        }
    }

    Ok(clean)
}
