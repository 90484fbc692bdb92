mod classify;
mod config;
mod export;
mod html;
mod layers;
mod parser;
mod render;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use config::MapConfig;

#[derive(Parser)]
#[command(name = "floodmap", about = "Flood-control project map builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract projects from the HTML snapshot and write the interactive map
    Build {
        /// Source HTML snapshot
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output map document
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export the extracted project table as CSV
    Export {
        /// Source HTML snapshot
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output CSV file
        #[arg(short, long, default_value = "output/national_projects_data.csv")]
        output: PathBuf,
    },
    /// Show extraction and per-layer statistics
    Stats {
        /// Source HTML snapshot
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build { input, output } => {
            let mut cfg = MapConfig::default();
            if let Some(p) = input {
                cfg.input = p;
            }
            if let Some(p) = output {
                cfg.output = p;
            }
            let document = load_document(&cfg.input)?;
            let (records, stats) = parser::extract_records(&document);
            stats.print();
            let layer_set = layers::build_layers(&records, &cfg);
            render::write_map(&cfg.output, &layer_set, &cfg)?;
            println!(
                "Map with {} projects saved as '{}'",
                records.len(),
                cfg.output.display()
            );
            Ok(())
        }
        Commands::Export { input, output } => {
            let mut cfg = MapConfig::default();
            if let Some(p) = input {
                cfg.input = p;
            }
            let document = load_document(&cfg.input)?;
            let (records, stats) = parser::extract_records(&document);
            if records.is_empty() {
                println!("No projects extracted; nothing to export.");
                return Ok(());
            }
            export::write_csv(&output, &records)?;
            stats.print();
            println!("Exported {} projects to '{}'", records.len(), output.display());
            Ok(())
        }
        Commands::Stats { input } => {
            let mut cfg = MapConfig::default();
            if let Some(p) = input {
                cfg.input = p;
            }
            let document = load_document(&cfg.input)?;
            let (records, stats) = parser::extract_records(&document);
            let layer_set = layers::build_layers(&records, &cfg);

            stats.print();
            println!();
            println!("{:>2} | {:<12} | {:>6} | {}", "#", "Layer", "Count", "Visible");
            println!("{}", "-".repeat(36));
            for (i, layer) in layer_set.iter().enumerate() {
                println!(
                    "{:>2} | {:<12} | {:>6} | {}",
                    i + 1,
                    layer.name,
                    layer.markers.len(),
                    if layer.show { "yes" } else { "no" }
                );
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

/// Read the snapshot, substituting undecodable bytes. Only I/O failure
/// aborts a run.
fn load_document(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read source document {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
