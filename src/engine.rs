// src/engine.rs
// ENGINE
// Top-level orchestration: load the STS library, build the hash index,
// stream each target FASTA file through the partitioner, and format hits
// to the output sink. This is the one piece of library code that touches
// the filesystem directly -- everything below it (scanner, partitioner,
// comparator, index) is pure.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::fasta::FastaReader;
use crate::index::HashIndex;
use crate::output::HitWriter;
use crate::partition::search_target;
use crate::sts::parse_sts_library;

/// Summary of a completed run, reported to the operator via `tracing` at
/// the end of `run` -- not required by the core search invariants.
#[derive(Debug, Default, Clone)]
pub struct RunStats {
    pub records_loaded: usize,
    pub targets_processed: usize,
    pub hits_per_target: Vec<(String, usize)>,
    pub total_hits: usize,
    pub elapsed: Duration,
}

/// Loads the STS library at `sts_path`, builds the hash index, and scans
/// every target in `target_paths` in order, writing formatted hits to
/// `output`. Returns a summary once every target has been processed.
pub fn run(
    config: &EngineConfig,
    sts_path: &Path,
    target_paths: &[String],
    output: impl Write,
) -> Result<RunStats> {
    let start = Instant::now();
    config.validate()?;

    let sts_file = File::open(sts_path)?;
    let library = parse_sts_library(BufReader::new(sts_file), config.word_size, config.default_pcr_size)?;

    if library.is_empty() {
        return Err(EngineError::Configuration(format!(
            "no usable STS records loaded from {}",
            sts_path.display()
        )));
    }

    let min_primer_len = library
        .records()
        .iter()
        .map(|s| s.min_primer_len())
        .min()
        .unwrap_or(0);
    config.validate_against_library(min_primer_len)?;

    info!(records = library.len(), "STS library loaded");

    let index = HashIndex::build(library.records(), config.word_size);
    let mut writer = HitWriter::new(output);
    let mut stats = RunStats {
        records_loaded: library.len(),
        ..Default::default()
    };

    for path in target_paths {
        let file = File::open(path)?;
        let reader = FastaReader::new(BufReader::new(file));

        for record in reader {
            let record = record?;
            let hits = search_target(&record.payload, &record.label, &index, library.records(), config);
            for hit in &hits {
                writer.write_hit(hit)?;
            }
            stats.targets_processed += 1;
            stats.total_hits += hits.len();
            stats.hits_per_target.push((record.label, hits.len()));
        }
    }

    writer.flush()?;
    stats.elapsed = start.elapsed();

    if stats.targets_processed == 0 {
        warn!("no target sequences were found in the given FASTA file(s)");
    }

    Ok(stats)
}
