// src/scanner.rs
// SCANNER
// Walks a target slice once, maintaining a rolling 2-bit k-mer hash and the
// length of the current run of unambiguous bases (`valid_run`). Whenever the
// run covers at least a full word, the hash is looked up in the index and
// every anchored candidate is verified against the target; the fully
// ambiguous primers in the fallback list are checked at every position
// regardless of `valid_run`, since they have no hash to anchor on.
//
// FWD and REV are treated symmetrically: whichever primer is "primary" for
// an orientation is anchored at the smaller coordinate (`start1`), and its
// partner is searched to the right within the pcr_size +/- margin window.
// This keeps a non-palindromic STS from producing a FWD and a REV hit at
// the same site -- only self-complementary primer pairs can trigger both
// paths on the same target region.

use rustc_hash::FxHashSet;

use crate::comparator::compare;
use crate::config::EngineConfig;
use crate::hit::{Hit, Strand};
use crate::index::HashIndex;
use crate::nucleotide::{code2, INVALID};
use crate::preprocessor::Orientation;
use crate::sts::Sts;

/// A hit produced by `scan`, carrying the 0-based global position of its
/// primary primer so the partitioner can apply the cross-worker ownership
/// rule before the hit is kept.
pub struct ScanHit<'a> {
    pub hit: Hit<'a>,
    pub start1_global: u64,
}

type SeenKey = (String, u64, u64, String, char);

/// Scans `slice` for every STS in `index`, emitting hits with coordinates
/// offset by `base_offset` (the slice's 0-based position within the full
/// target payload). Hits found via both the indexed and fallback paths at
/// the same site are deduplicated by `Hit::identity`.
pub fn scan<'a>(
    slice: &[u8],
    base_offset: u64,
    target_label: &str,
    index: &HashIndex<'a>,
    config: &EngineConfig,
) -> Vec<ScanHit<'a>> {
    let w = index.word_size();
    let mask: u64 = if w >= 32 { u64::MAX } else { (1u64 << (2 * w)) - 1 };

    let mut hash: u64 = 0;
    let mut valid_run: usize = 0;
    let mut out = Vec::new();
    let mut seen: FxHashSet<SeenKey> = FxHashSet::default();

    for p in 0..slice.len() {
        let code = code2(slice[p]);
        if code == INVALID {
            valid_run = 0;
            hash = 0;
        } else {
            hash = ((hash << 2) | code as u64) & mask;
            valid_run += 1;
        }

        if valid_run >= w {
            for rec in index.records_at(hash) {
                let start1 = p as i64 - w as i64 + 1 - rec.hash_offset as i64;
                try_candidate(
                    rec.sts,
                    rec.orientation,
                    &rec.search_seq,
                    &rec.partner_seq,
                    start1,
                    slice,
                    base_offset,
                    target_label,
                    config,
                    &mut out,
                    &mut seen,
                );
            }
        }
    }

    for rec in index.fallback() {
        for p in 0..slice.len() {
            try_candidate(
                rec.sts,
                rec.orientation,
                &rec.search_seq,
                &rec.partner_seq,
                p as i64,
                slice,
                base_offset,
                target_label,
                config,
                &mut out,
                &mut seen,
            );
        }
    }

    out
}

#[allow(clippy::too_many_arguments)]
fn try_candidate<'a>(
    sts: &'a Sts,
    orientation: Orientation,
    search_seq: &[u8],
    partner_seq: &[u8],
    start1: i64,
    slice: &[u8],
    base_offset: u64,
    target_label: &str,
    config: &EngineConfig,
    out: &mut Vec<ScanHit<'a>>,
    seen: &mut FxHashSet<SeenKey>,
) {
    if start1 < 0 {
        return;
    }
    let start1 = start1 as usize;
    let primary_len = search_seq.len();
    if start1 + primary_len > slice.len() {
        return;
    }

    let window = &slice[start1..start1 + primary_len];
    if !compare(
        search_seq,
        window,
        orientation,
        config.mismatches,
        config.protection,
        config.iupac,
    ) {
        return;
    }

    let pcr_size = sts.pcr_size as i64;
    let margin = config.margin as i64;
    let partner_len = partner_seq.len() as i64;

    let lo = (start1 as i64 + pcr_size - margin - partner_len).max(0);
    let hi = (start1 as i64 + pcr_size + margin - partner_len).min(slice.len() as i64 - partner_len);
    if hi < lo {
        return;
    }

    let strand = match orientation {
        Orientation::Fwd => Strand::Plus,
        Orientation::Rev => Strand::Minus,
    };

    for partner_start in lo..=hi {
        let partner_start = partner_start as usize;
        let target_window = &slice[partner_start..partner_start + partner_seq.len()];
        if !compare(
            partner_seq,
            target_window,
            orientation.opposite(),
            config.mismatches,
            config.protection,
            config.iupac,
        ) {
            continue;
        }

        let local_end = partner_start + partner_seq.len() - 1;
        let global_start = base_offset + start1 as u64 + 1;
        let global_end = base_offset + local_end as u64 + 1;

        let key = (
            target_label.to_string(),
            global_start,
            global_end,
            sts.id.clone(),
            strand.as_char(),
        );
        if !seen.insert(key) {
            continue;
        }

        out.push(ScanHit {
            start1_global: base_offset + start1 as u64,
            hit: Hit {
                target_label: target_label.to_string(),
                start: global_start,
                end: global_end,
                sts,
                strand,
            },
        });
    }
}
