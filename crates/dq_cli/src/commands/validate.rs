use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use dq_core::{LiveSourceConfig, Outcome, SourceConfig, ValidationReport};
use dq_datafusion::{LiveSource, session_for};
use dq_parser::parse_file;
use dq_validator::{FixtureSource, RuleSet, ValidationEngine};
use std::path::Path;
use tracing::info;

use crate::{OutputFormat, output};

pub async fn execute(
    config_path: &str,
    current_date: Option<NaiveDate>,
    format: OutputFormat,
) -> Result<Outcome> {
    info!("Validating with config: {}", config_path);

    let path = Path::new(config_path);
    let config = parse_file(path)
        .with_context(|| format!("Failed to parse config file: {}", config_path))?;

    // The clock is read here and nowhere below.
    let current_date = current_date
        .or(config.current_date)
        .unwrap_or_else(|| Utc::now().date_naive());

    let rule_set = RuleSet::from_config(&config.rules).context("Failed to build rule set")?;

    if format == OutputFormat::Text {
        output::print_info(&format!(
            "Config loaded: {} ({} rules, current date {})",
            config.name,
            rule_set.len(),
            current_date
        ));
    }

    let engine = ValidationEngine::new();
    let report = match &config.source {
        SourceConfig::Fixture { rows } => {
            let source = FixtureSource::from_config(rows.clone());
            engine
                .run_provider(&source, &rule_set, current_date)
                .await
                .context("Failed to load fixture dataset")?
        }
        SourceConfig::Live(live) => validate_live(&engine, live, path, &rule_set, current_date)
            .await
            .with_context(|| format!("Failed to validate live table '{}'", live.table))?,
    };

    output::print_validation_report(&report, format)?;
    Ok(report.outcome())
}

/// Registers the live table in a fresh session and validates it.
async fn validate_live(
    engine: &ValidationEngine,
    live: &LiveSourceConfig,
    config_path: &Path,
    rule_set: &RuleSet,
    current_date: NaiveDate,
) -> Result<ValidationReport> {
    let live = LiveSourceConfig {
        path: resolve_table_path(config_path, &live.path),
        ..live.clone()
    };
    info!("Registering {} from {}", live.table, live.path);

    let ctx = session_for(&live)
        .await
        .context("Failed to register table")?;
    let source = LiveSource::new(ctx, &live.table);

    let report = engine.run_provider(&source, rule_set, current_date).await?;
    Ok(report)
}

/// Resolves a relative table path against the directory of the config file.
fn resolve_table_path(config_path: &Path, table_path: &str) -> String {
    let table = Path::new(table_path);
    if table.is_absolute() || table_path.contains("://") {
        return table_path.to_string();
    }

    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(table).to_string_lossy().into_owned(),
        _ => table_path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_follows_config() {
        assert_eq!(
            resolve_table_path(Path::new("configs/daily.yml"), "data/daily.csv"),
            Path::new("configs").join("data/daily.csv").to_string_lossy()
        );
    }

    #[test]
    fn test_absolute_and_url_paths_unchanged() {
        assert_eq!(
            resolve_table_path(Path::new("configs/daily.yml"), "/srv/daily.csv"),
            "/srv/daily.csv"
        );
        assert_eq!(
            resolve_table_path(Path::new("configs/daily.yml"), "s3://lake/daily/"),
            "s3://lake/daily/"
        );
    }

    #[test]
    fn test_config_in_working_directory() {
        assert_eq!(
            resolve_table_path(Path::new("daily.yml"), "daily.csv"),
            "daily.csv"
        );
    }
}
