use anyhow::Result;
use colored::*;
use dq_core::{Outcome, ReportError, ValidationReport};

use crate::OutputFormat;

/// Violations listed per rule before the rest are summarized.
const MAX_LISTED_VIOLATIONS: usize = 20;

pub fn print_validation_report(report: &ValidationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => print_text_report(report),
    }
    Ok(())
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.passed() {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !report.rule_results.is_empty() {
        println!("\n{}", "Rules:".bold());
        for (name, result) in &report.rule_results {
            if result.is_clean() {
                println!("  {} {}: no violations", "✓".green(), name);
                continue;
            }

            println!(
                "  {} {}: {} violation(s), {}",
                "✗".red(),
                name.red().bold(),
                result.violations.len(),
                result.reason
            );
            for key in result.violations.iter().take(MAX_LISTED_VIOLATIONS) {
                println!("      - {}", key);
            }
            if result.violations.len() > MAX_LISTED_VIOLATIONS {
                println!(
                    "      ... and {} more",
                    result.violations.len() - MAX_LISTED_VIOLATIONS
                );
            }
        }
    }

    if !report.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for (i, (name, error)) in report.errors.iter().enumerate() {
            println!("  {}. [{}] {}", i + 1, name, error.to_string().red());
            if let ReportError::Schema(schema) = error {
                for issue in &schema.issues {
                    println!("       - {}", issue);
                }
            }
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Rows examined:  {}", report.rows_examined);
    println!("  Violations:     {}", report.violation_count());
    println!("  Errors:         {}", report.errors.len());
    println!("  Outcome:        {}", outcome_label(report.outcome()));
    println!("{}", "═".repeat(60));
}

fn outcome_label(outcome: Outcome) -> ColoredString {
    match outcome {
        Outcome::Passed => "passed".green(),
        Outcome::DataQualityFailure => "data quality failure".yellow(),
        Outcome::InfrastructureFailure => "infrastructure failure".red(),
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
