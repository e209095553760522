// src/main.rs
// EPCR: Electronic PCR
// Locates Sequence-Tagged Site markers in genomic DNA by simulating, in
// silico, the primer-pair amplification a real PCR reaction would perform.

mod cli;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use epcr::config::EngineConfig;
use epcr::engine;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    rayon::ThreadPoolBuilder::new()
        .num_threads(cli.threads)
        .build_global()
        .map_err(|e| anyhow::anyhow!("failed to configure thread pool: {e}"))?;

    let config = EngineConfig {
        word_size: cli.word_size,
        margin: cli.margin,
        mismatches: cli.mismatches,
        protection: cli.protection,
        default_pcr_size: cli.default_pcr_size,
        threads: cli.threads,
        iupac: cli.iupac,
    };

    let sts_path = Path::new(&cli.sts);

    let stats = match cli.output.as_deref() {
        Some(path) if path != "-" => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {path}"))?;
            engine::run(&config, sts_path, &cli.targets, BufWriter::new(file))
        }
        _ => engine::run(&config, sts_path, &cli.targets, BufWriter::new(io::stdout())),
    }
    .with_context(|| format!("epcr run failed (STS library: {})", cli.sts))?;

    tracing::info!(
        records_loaded = stats.records_loaded,
        targets_processed = stats.targets_processed,
        total_hits = stats.total_hits,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "run complete"
    );

    Ok(())
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
