//! Example: Run the quality checks on a tabular data file.
//!
//! Usage:
//!   cargo run --example check -- <file_path>
//!
//! Example:
//!   cargo run --example check -- test_data/patients.csv

use std::env;
use std::path::Path;

use sieve::{CheckResult, Sieve};

fn main() -> sieve::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example check -- <file_path>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example check -- test_data/patients.csv");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Sieve Quality Report: {}", file_path);
    println!("{}", separator);
    println!();

    let report = Sieve::new().check_file(path);

    if !report.load_success {
        for error in &report.errors {
            eprintln!("Error: {}", error);
        }
        std::process::exit(1);
    }

    if let Some(source) = &report.source {
        println!("## Source Metadata");
        println!("  File: {}", source.file);
        println!("  Format: {}", source.format);
        println!("  Rows: {}", source.row_count);
        println!("  Columns: {}", source.column_count);
        println!();
    }

    println!("## Checks ({} total)", report.checks.len());
    println!();
    for check in &report.checks {
        let mark = if check.passed() { "PASS" } else { "FAIL" };
        println!("  [{}] {}", mark, check.message());
    }
    println!();

    // Inferred types come with the automatic quality check
    if let Some(CheckResult::AutomaticQuality(quality)) = report
        .checks
        .iter()
        .find(|c| matches!(c, CheckResult::AutomaticQuality(_)))
    {
        println!("## Inferred Types");
        println!();
        for (column, analysis) in &quality.column_analysis {
            println!(
                "  {:20} {:10} confidence={:.0}% outliers={}",
                column,
                analysis.inferred_type.as_str(),
                analysis.confidence * 100.0,
                analysis.outliers.len()
            );
            for outlier in analysis.outliers.iter().take(5) {
                println!("       row {}: {}", outlier.row_index, outlier.reason);
            }
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("## Errors");
        for error in &report.errors {
            println!("  {}", error);
        }
        println!();
    }

    println!("## Summary");
    println!(
        "  Passed: {}/{} ({:.1}%)",
        report.summary.passed_checks, report.summary.total_checks, report.summary.success_rate
    );
    println!();

    println!("{}", separator);

    Ok(())
}
