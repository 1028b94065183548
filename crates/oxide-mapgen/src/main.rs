//! oxide-mapgen CLI
//!
//! Resolves the configured tables and prints their decision records.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use oxide_mapgen_core::IntrospectedTable;
use oxide_mapgen_core::pipeline::GeneratorConfig;
use oxide_mapgen_core::record::DecisionRecord;

/// Table metadata resolution for MyBatis-style code generators.
#[derive(Parser)]
#[command(name = "oxide-mapgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve tables and print their decision records as JSON.
    Resolve {
        /// Generator configuration file.
        #[arg(short, long, env = "OXIDE_MAPGEN_CONFIG")]
        config: PathBuf,

        /// Only resolve this table.
        #[arg(short, long)]
        table: Option<String>,

        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print compact JSON.
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Resolve {
            config,
            table,
            output,
            compact,
        } => {
            let mut generator_config = GeneratorConfig::from_path(&config)
                .with_context(|| format!("Failed to load {}", config.display()))?;

            if let Some(name) = &table {
                generator_config = generator_config.retain_table(name);
                if generator_config.tables.is_empty() {
                    bail!("Table '{name}' is not configured in {}", config.display());
                }
            }

            let records: Vec<DecisionRecord> = generator_config
                .resolve()?
                .iter()
                .map(IntrospectedTable::decision_record)
                .collect();

            let json = if compact {
                serde_json::to_string(&records)?
            } else {
                serde_json::to_string_pretty(&records)?
            };

            match output {
                Some(path) => {
                    fs::write(&path, json + "\n")
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(tables = records.len(), path = %path.display(), "Wrote decision records");
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}
