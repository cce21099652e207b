//! Live table validation through a DataFusion session.

use chrono::NaiveDate;
use dq_core::{LiveSourceConfig, Outcome, TableFormat, Verdict};
use dq_datafusion::{LiveSource, register_table, session_for};
use datafusion::prelude::SessionContext;
use dq_validator::{DatasetProvider, RuleSet, ValidationEngine};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::TempDir;

const HEADER: &str =
    "date,location_lat,location_lon,row_count,avg_temp_c,max_wind_kmh,min_humidity_pct,dq_passed";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 16).unwrap()
}

fn write_csv(dir: &TempDir, name: &str, lines: &[&str]) -> String {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    path.to_string_lossy().into_owned()
}

fn csv_config(path: String) -> LiveSourceConfig {
    LiveSourceConfig {
        table: "weather_silver.daily".to_string(),
        path,
        format: TableFormat::Csv,
    }
}

#[tokio::test]
async fn test_csv_sample_passes() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "daily.csv",
        &[HEADER, "2025-07-15,52.52,13.405,24,20.0,30.0,45.0,true"],
    );

    let config = csv_config(path);
    let ctx = session_for(&config).await.unwrap();
    let source = LiveSource::new(ctx, &config.table);

    let report = ValidationEngine::new()
        .run_provider(&source, &RuleSet::default_rules(), today())
        .await
        .unwrap();

    assert_eq!(report.overall, Verdict::Pass);
    assert_eq!(report.rows_examined, 1);
}

#[tokio::test]
async fn test_csv_violations_are_keyed() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "daily.csv",
        &[
            HEADER,
            "2025-07-15,52.52,13.405,23,20.0,30.0,45.0,true",
            "2025-07-15,48.85,2.35,24,22.5,18.0,50.0,false",
            "2025-07-16,40.42,-3.7,5,30.1,12.0,20.0,true",
        ],
    );

    let config = csv_config(path);
    let ctx = session_for(&config).await.unwrap();
    let report = ValidationEngine::new()
        .run_provider(
            &LiveSource::new(ctx, &config.table),
            &RuleSet::default_rules(),
            today(),
        )
        .await
        .unwrap();

    let completeness: Vec<String> = report
        .violations("completeness")
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    let flagged: Vec<String> = report
        .violations("flag_consistency")
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(completeness, vec!["(2025-07-15, 52.52, 13.405)"]);
    assert_eq!(flagged, vec!["(2025-07-15, 48.85, 2.35)"]);
    assert_eq!(report.outcome(), Outcome::DataQualityFailure);
}

#[tokio::test]
async fn test_csv_missing_column_is_a_schema_error() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "daily.csv",
        &[
            "date,location_lat,location_lon,avg_temp_c,max_wind_kmh,min_humidity_pct,dq_passed",
            "2025-07-15,52.52,13.405,20.0,30.0,45.0,true",
        ],
    );

    let config = csv_config(path);
    let ctx = session_for(&config).await.unwrap();
    let report = ValidationEngine::new()
        .run_provider(
            &LiveSource::new(ctx, &config.table),
            &RuleSet::default_rules(),
            today(),
        )
        .await
        .unwrap();

    assert!(report.rule_results.is_empty());
    assert_eq!(report.schema_error().unwrap().columns(), vec!["row_count"]);
}

#[tokio::test]
async fn test_register_into_existing_session() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "daily.csv",
        &[HEADER, "2025-07-15,52.52,13.405,24,20.0,30.0,45.0,true"],
    );

    let ctx = SessionContext::new();
    let config = LiveSourceConfig {
        table: "daily".to_string(),
        ..csv_config(path)
    };
    register_table(&ctx, &config).await.unwrap();

    let dataset = LiveSource::new(ctx, "daily").load().await.unwrap();
    assert_eq!(dataset.len(), 1);
}
