//! Check command - run the quality checks and print the report.

use std::fs;

use colored::Colorize;
use sieve::validation::ConsistencyIssue;
use sieve::{CheckConfig, CheckResult, QualityReport, Sieve, SieveConfig};
use tracing::info;

use crate::cli::CheckArgs;

pub fn run(args: CheckArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let config = build_config(&args)?;
    let report = Sieve::with_config(config).check_file(&args.file);

    if let Some(output) = &args.output {
        fs::write(output, report.to_json_pretty()?)?;
        info!(path = %output.display(), "saved report");
    }

    if args.json {
        println!("{}", report.to_json_pretty()?);
    } else {
        print_report(&report);
        if let Some(output) = &args.output {
            println!("Report saved to {}", output.display().to_string().cyan());
        }
    }

    Ok(report.passed())
}

/// Layer flags over the optional config file: explicit flags win.
fn build_config(args: &CheckArgs) -> Result<SieveConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => SieveConfig::load(path)?,
        None => SieveConfig::default(),
    };

    if let Some(path) = &args.schema {
        config.checks.schema = Some(CheckConfig::load_schema(path)?);
    }
    if let Some(path) = &args.rules {
        config.checks.rules = Some(CheckConfig::load_rules(path)?);
    }
    if let Some(min_rows) = args.min_rows {
        config.checks.min_rows = min_rows;
    }
    config.parser.na_values.extend(args.na_values.iter().cloned());

    Ok(config)
}

fn print_report(report: &QualityReport) {
    println!(
        "{} {}",
        "Data quality report for".cyan().bold(),
        report.source_label.white()
    );
    println!();

    if !report.load_success {
        for error in &report.errors {
            println!("{} {}", "✗".red().bold(), error.red());
        }
        return;
    }

    if let Some(info) = &report.data_info {
        println!(
            "Loaded {} rows, {} columns ({:.2} MB)",
            info.row_count.to_string().white().bold(),
            info.column_count.to_string().white().bold(),
            info.memory_usage_mb
        );
        println!();
    }

    for check in &report.checks {
        if check.passed() {
            println!("{} {}", "✓".green().bold(), check.message());
        } else {
            println!("{} {}", "✗".red().bold(), check.message().yellow());
            print_details(check);
        }
    }

    if !report.errors.is_empty() {
        println!();
        println!("{}", "Errors:".red().bold());
        for error in &report.errors {
            println!("  {}", error);
        }
    }

    println!();
    let summary = &report.summary;
    let rate = format!("{:.1}%", summary.success_rate);
    let rate = if summary.overall_passed {
        rate.green()
    } else if summary.success_rate >= 50.0 {
        rate.yellow()
    } else {
        rate.red()
    };
    println!(
        "Passed {}/{} checks ({})",
        summary.passed_checks.to_string().white().bold(),
        summary.total_checks,
        rate
    );
}

fn print_details(check: &CheckResult) {
    match check {
        CheckResult::RowCount(_) => {}
        CheckResult::DataTypes(r) => {
            for (column, mismatch) in &r.mismatches {
                println!(
                    "    {}: expected {}, stored as {}",
                    column.white(),
                    mismatch.expected,
                    mismatch.actual
                );
            }
            for (column, issue) in &r.content_issues {
                println!(
                    "    {}: {} invalid {} values",
                    column.white(),
                    issue.total_invalid,
                    issue.expected_type
                );
                for invalid in &issue.invalid_values {
                    println!("      row {}: {}", invalid.row_index, invalid.issue);
                }
            }
            for column in &r.missing_columns {
                println!("    {}: column not found", column.white());
            }
        }
        CheckResult::ValueRanges(r) => {
            for (column, violations) in &r.violations {
                if let Some(error) = &violations.error {
                    println!("    {}: {}", column.white(), error);
                    continue;
                }
                println!(
                    "    {}: {} violations",
                    column.white(),
                    violations.total_violations
                );
                for row in &violations.violating_rows {
                    println!(
                        "      row {}: {} ({})",
                        row.row_index,
                        row.value.as_deref().unwrap_or("<missing>"),
                        row.rule_violated
                    );
                }
            }
        }
        CheckResult::DataConsistency(r) => {
            for (column, issues) in &r.issues {
                for issue in issues {
                    let text = match issue {
                        ConsistencyIssue::MissingValues { count, percentage } => {
                            format!("{} missing values ({}%)", count, percentage)
                        }
                        ConsistencyIssue::MixedTypes {
                            numeric_values,
                            text_values,
                            ..
                        } => format!(
                            "mixed types ({} numeric, {} text)",
                            numeric_values, text_values
                        ),
                        ConsistencyIssue::ConstantValues { message } => message.clone(),
                    };
                    println!("    {}: {}", column.white(), text);
                }
            }
        }
        CheckResult::AutomaticQuality(r) => {
            for (column, analysis) in &r.column_analysis {
                if analysis.outliers.is_empty() {
                    continue;
                }
                println!(
                    "    {} ({}, {:.0}% confidence):",
                    column.white(),
                    analysis.inferred_type,
                    analysis.confidence * 100.0
                );
                for outlier in &analysis.outliers {
                    println!("      row {}: {}", outlier.row_index, outlier.reason);
                }
            }
        }
    }
}
