mod commands;
mod output;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit code for errors raised before a report exists.
const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "silver-dq")]
#[command(version, about = "Silver data quality validation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configured dataset
    Validate {
        /// Path to the validation config (YAML or TOML)
        config: String,

        /// Processing date (YYYY-MM-DD); defaults to the config, then today (UTC)
        #[arg(long)]
        current_date: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check a config and its rule set without reading data
    Check {
        /// Path to the validation config (YAML or TOML)
        config: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Write a starter config
    Init {
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Config format
        #[arg(short, long, value_enum, default_value_t = ConfigFileFormat::Yaml)]
        format: ConfigFileFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFileFormat {
    Yaml,
    Toml,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match run(cli.command).await {
        Ok(code) => code,
        Err(err) => {
            output::print_error(&format!("Error: {:#}", err));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Validate {
            config,
            current_date,
            format,
        } => {
            let outcome = commands::validate::execute(&config, current_date, format).await?;
            Ok(ExitCode::from(outcome.exit_code() as u8))
        }

        Commands::Check { config, format } => {
            commands::check::execute(&config, format)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Init { output, format } => {
            commands::init::execute(output.as_deref(), format)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
