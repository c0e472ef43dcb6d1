use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use icbuilder::{scenario, sink};
use icbuilder_common::{OutputFormat, ScenarioConfig, Species};
use log::{error, info};
use std::path::PathBuf;
use std::time::Instant;

/// Command-line arguments for the initial-condition builder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (.toml)
    #[arg(short, long, default_value = "scenario.toml")]
    config: PathBuf,

    /// Output path, overriding `output.path`
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Random seed, overriding `random.seed`
    #[arg(long)]
    seed: Option<u64>,

    /// Output format (text, csv, json, bincode, messagepack), overriding `output.format`
    #[arg(long)]
    format: Option<OutputFormat>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    run_with_args(args)
}

fn run_with_args(args: Args) -> Result<()> {
    // Initialize logger, defaulting to info
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting initial-condition builder...");

    // --- Load Configuration ---
    let mut config = ScenarioConfig::load(&args.config)?;
    if let Some(output) = &args.output {
        config.output.path = output.display().to_string();
    }
    if let Some(seed) = args.seed {
        config.override_seed(seed);
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    info!("Scenario: {} -> {} ({})", config.model.kind(), config.output.path, config.output.format);

    // --- Generate ---
    let start_time = Instant::now();
    let ensemble = match scenario::generate(&config) {
        Ok(ensemble) => ensemble,
        Err(e) => {
            error!("Failed to build '{}' model: {}", config.model.kind(), e);
            return Err(e).context("Generation failed");
        }
    };
    info!(
        "Generated {} particles in {:.3} s (baryonic tagged: {}, dark matter: {}).",
        ensemble.len(),
        start_time.elapsed().as_secs_f64(),
        ensemble.count_species(Species::Baryonic),
        ensemble.count_species(Species::DarkMatter)
    );

    // --- Save ---
    sink::save_as(&config.output.path, &ensemble, config.output.format)
        .with_context(|| format!("Failed to write '{}'", config.output.path))?;

    info!("Done.");
    Ok(())
}
