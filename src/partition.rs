// src/partition.rs
// PARTITIONER
// Splits a target payload into overlap-extended worker slices and scans
// each with `rayon`, so a candidate near a slice boundary still has enough
// target context on either side to verify its primary window and search
// its partner across the full margin. Ownership of a candidate is decided
// solely by where its primary primer starts (`start1_global`): each global
// position belongs to exactly one worker's half-open `[owner_start,
// owner_end)` range, so a candidate found redundantly in a neighboring
// worker's overlap region is silently dropped by every worker except its
// owner. This keeps the result independent of the thread count.

use rayon::prelude::*;

use crate::config::{EngineConfig, SINGLE_THREAD_THRESHOLD};
use crate::hit::Hit;
use crate::index::HashIndex;
use crate::scanner::scan;
use crate::sts::Sts;

/// Scans `payload` for every STS in `index`, splitting the work across
/// workers when the payload is large enough and more than one thread is
/// configured. Always returns hits in a deterministic order: grouped by
/// worker index, and within a worker in the order `scan` produced them.
pub fn search_target<'a>(
    payload: &[u8],
    target_label: &str,
    index: &HashIndex<'a>,
    library: &[Sts],
    config: &EngineConfig,
) -> Vec<Hit<'a>> {
    let workers = effective_worker_count(payload.len(), config);

    if workers <= 1 {
        return scan(payload, 0, target_label, index, config)
            .into_iter()
            .map(|sh| sh.hit)
            .collect();
    }

    let overlap = max_overlap(library, config);
    let chunk = payload.len().div_ceil(workers);

    (0..workers)
        .into_par_iter()
        .map(|i| {
            let owner_start = i * chunk;
            let owner_end = ((i + 1) * chunk).min(payload.len());
            if owner_start >= owner_end {
                return Vec::new();
            }

            let slice_start = owner_start.saturating_sub(overlap);
            let slice_end = (owner_end + overlap).min(payload.len());
            let slice = &payload[slice_start..slice_end];

            scan(slice, slice_start as u64, target_label, index, config)
                .into_iter()
                .filter(|sh| {
                    sh.start1_global >= owner_start as u64 && sh.start1_global < owner_end as u64
                })
                .map(|sh| sh.hit)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

fn effective_worker_count(payload_len: usize, config: &EngineConfig) -> usize {
    if payload_len < SINGLE_THREAD_THRESHOLD || config.threads == 1 {
        return 1;
    }
    if config.threads == 0 {
        rayon::current_num_threads().max(1)
    } else {
        config.threads
    }
}

/// The largest span a single candidate verification can need to look past
/// its primary's start: the declared amplicon size, the margin tolerance,
/// and the longer of the STS's two primer lengths (an upper bound on
/// partner length, since reverse-complementing never changes length).
fn max_overlap(library: &[Sts], config: &EngineConfig) -> usize {
    library
        .iter()
        .map(|sts| {
            sts.pcr_size as usize + config.margin as usize + sts.primer1.len().max(sts.primer2.len())
        })
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sts(id: &str, p1: &str, p2: &str, size: u32) -> Sts {
        Sts {
            id: id.to_string(),
            primer1: p1.as_bytes().to_vec(),
            primer2: p2.as_bytes().to_vec(),
            pcr_size: size,
            annotation: String::new(),
        }
    }

    fn config(threads: usize) -> EngineConfig {
        EngineConfig {
            word_size: 4,
            margin: 0,
            mismatches: 0,
            protection: 1,
            default_pcr_size: 20,
            threads,
            iupac: false,
        }
    }

    #[test]
    fn small_payload_forces_single_thread_regardless_of_config() {
        let lib = vec![sts("S1", "ACGTACGA", "TTTTCCCC", 20)];
        let index = HashIndex::build(&lib, 4);
        let target = b"TTTTTACGTACGACCCCGGGGAAAAAAAAA";
        let hits = search_target(target, "t", &index, &lib, &config(8));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].start, 6);
        assert_eq!(hits[0].end, 25);
    }

    #[test]
    fn multi_threaded_result_matches_single_threaded_on_a_large_payload() {
        let lib = vec![sts("S1", "ACGTACGA", "TTTTCCCC", 20)];
        let index = HashIndex::build(&lib, 4);

        let mut target = vec![b'T'; SINGLE_THREAD_THRESHOLD + 1000];
        // Plant the STS at a few scattered locations across the payload.
        let plant = |buf: &mut Vec<u8>, at: usize| {
            buf[at..at + 8].copy_from_slice(b"ACGTACGA");
            buf[at + 12..at + 20].copy_from_slice(b"GGGGAAAA");
        };
        plant(&mut target, 10);
        plant(&mut target, 40_000);
        plant(&mut target, SINGLE_THREAD_THRESHOLD - 50);

        let single = search_target(&target, "t", &index, &lib, &config(1));
        let multi = search_target(&target, "t", &index, &lib, &config(4));

        let mut single_sorted: Vec<_> = single.iter().map(|h| (h.start, h.end)).collect();
        let mut multi_sorted: Vec<_> = multi.iter().map(|h| (h.start, h.end)).collect();
        single_sorted.sort();
        multi_sorted.sort();
        assert_eq!(single_sorted, multi_sorted);
        assert_eq!(single_sorted.len(), 3);
    }
}
