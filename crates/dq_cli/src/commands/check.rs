use anyhow::{Context, Result};
use dq_core::SourceConfig;
use dq_parser::parse_file;
use dq_validator::RuleSet;
use serde_json::json;
use std::path::Path;
use tracing::info;

use crate::{OutputFormat, output};

pub fn execute(config_path: &str, format: OutputFormat) -> Result<()> {
    info!("Checking config: {}", config_path);

    let config = parse_file(Path::new(config_path))
        .with_context(|| format!("Failed to parse config file: {}", config_path))?;
    let rule_set = RuleSet::from_config(&config.rules).context("Failed to build rule set")?;

    let source = match &config.source {
        SourceConfig::Fixture { rows: None } => "fixture (sample row)".to_string(),
        SourceConfig::Fixture { rows: Some(rows) } => format!("fixture ({} rows)", rows.len()),
        SourceConfig::Live(live) => format!("live {} ({:?} at {})", live.table, live.format, live.path),
    };
    let current_date = config
        .current_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "today (UTC)".to_string());

    if format == OutputFormat::Json {
        let summary = json!({
            "name": config.name,
            "source": source,
            "current_date": current_date,
            "rules": rule_set.names(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    output::print_success("Config is valid");

    println!("\nConfig Summary:");
    println!("  Name:         {}", config.name);
    println!("  Source:       {}", source);
    println!("  Current date: {}", current_date);
    println!("  Rules:        {}", rule_set.len());
    for rule in rule_set.iter() {
        println!("    - {}: {}", rule.name(), rule.reason());
    }

    Ok(())
}
