use anyhow::{Context, Result};
use dq_core::{FixtureRow, RulesConfig, SourceConfig, ValidationConfig};
use dq_parser::{ConfigFormat, render};
use std::fs::File;
use std::io::Write;
use tracing::info;

use crate::{ConfigFileFormat, output};

pub fn execute(output_path: Option<&str>, format: ConfigFileFormat) -> Result<()> {
    info!("Initializing starter config");

    let config = starter_config();
    let format = match format {
        ConfigFileFormat::Yaml => ConfigFormat::Yaml,
        ConfigFileFormat::Toml => ConfigFormat::Toml,
    };
    let rendered = render(&config, format).context("Failed to serialize config")?;

    // Output to file or stdout
    if let Some(path) = output_path {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path))?;
        file.write_all(rendered.as_bytes())
            .with_context(|| format!("Failed to write to file: {}", path))?;
        output::print_success(&format!("Config written to: {}", path));
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

/// Default rules plus the physical ranges, over the fixture source with the
/// sample row spelled out.
fn starter_config() -> ValidationConfig {
    ValidationConfig {
        source: SourceConfig::Fixture {
            rows: Some(vec![FixtureRow::sample()]),
        },
        rules: RulesConfig {
            ranges: RulesConfig::physical_ranges(),
            ..RulesConfig::default()
        },
        ..ValidationConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_parser::{parse_toml, parse_yaml};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_starter_config_round_trips() {
        let config = starter_config();

        let yaml = render(&config, ConfigFormat::Yaml).unwrap();
        assert_eq!(parse_yaml(&yaml).unwrap(), config);

        let toml = render(&config, ConfigFormat::Toml).unwrap();
        assert_eq!(parse_toml(&toml).unwrap(), config);
    }

    #[test]
    fn test_starter_config_carries_physical_ranges() {
        let columns: Vec<_> = starter_config()
            .rules
            .ranges
            .into_iter()
            .map(|r| r.column)
            .collect();
        assert_eq!(columns, vec!["min_humidity_pct", "max_wind_kmh"]);
    }
}
