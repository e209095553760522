// src/preprocessor.rs
// PRIMER PREPROCESSOR
// Derives, for each STS, a forward record (primer1 against the + strand)
// and a reverse record (reverse-complement of primer2 against the +
// strand) -- each carrying the leftmost unambiguous W-mer used to seed the
// hash index, or a marker that the primer is fully ambiguous and must be
// searched through the fallback list instead.

use crate::nucleotide::{is_concrete, reverse_complement};
use crate::sts::Sts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Fwd,
    Rev,
}

impl Orientation {
    pub fn opposite(self) -> Orientation {
        match self {
            Orientation::Fwd => Orientation::Rev,
            Orientation::Rev => Orientation::Fwd,
        }
    }
}

/// A primer record that has a concrete W-mer to seed the hash index with.
pub struct IndexedPrimerRecord<'a> {
    pub sts: &'a Sts,
    pub orientation: Orientation,
    pub hash_offset: usize,
    pub hash_value: u64,
    pub ambiguous: bool,
    /// The primer sequence searched at this record's anchor position:
    /// primer1 for FWD, reverse-complement of primer2 for REV.
    pub search_seq: Vec<u8>,
    /// The sequence searched for the opposite end of the amplicon:
    /// reverse-complement of primer2 for FWD, primer1 for REV.
    pub partner_seq: Vec<u8>,
}

/// A primer record with no unambiguous W-window anywhere in the primer; it
/// is probed at every scan position instead of via the hash index.
pub struct FallbackRecord<'a> {
    pub sts: &'a Sts,
    pub orientation: Orientation,
    pub search_seq: Vec<u8>,
    pub partner_seq: Vec<u8>,
}

/// The searched primer sequence for a given orientation: primer1 for FWD,
/// reverse-complement of primer2 for REV.
pub fn search_primer(sts: &Sts, orientation: Orientation) -> Vec<u8> {
    match orientation {
        Orientation::Fwd => sts.primer1.clone(),
        Orientation::Rev => reverse_complement(&sts.primer2),
    }
}

/// Partner primer for the opposite end of the amplicon: reverse-complement
/// of primer2 for FWD candidates, primer1 for REV candidates.
pub fn partner_primer(sts: &Sts, orientation: Orientation) -> Vec<u8> {
    search_primer(sts, orientation.opposite())
}

/// Leftmost offset `j` such that `primer[j..j+w)` contains no ambiguity,
/// or `None` if every W-window is ambiguous.
fn leftmost_unambiguous_window(primer: &[u8], w: usize) -> Option<usize> {
    if primer.len() < w {
        return None;
    }
    'outer: for j in 0..=primer.len() - w {
        for &b in &primer[j..j + w] {
            if !is_concrete(b) {
                continue 'outer;
            }
        }
        return Some(j);
    }
    None
}

fn encode_window(window: &[u8]) -> u64 {
    let mut h: u64 = 0;
    for &b in window {
        h = (h << 2) | crate::nucleotide::code2(b) as u64;
    }
    h
}

fn contains_ambiguity(primer: &[u8]) -> bool {
    primer.iter().any(|&b| !is_concrete(b))
}

/// Builds the indexed and fallback primer records for an entire STS
/// library, for both orientations of every STS.
pub fn build_primer_records<'a>(
    library: &'a [Sts],
    word_size: usize,
) -> (Vec<IndexedPrimerRecord<'a>>, Vec<FallbackRecord<'a>>) {
    let mut indexed = Vec::new();
    let mut fallback = Vec::new();

    for sts in library {
        for orientation in [Orientation::Fwd, Orientation::Rev] {
            let primer = search_primer(sts, orientation);
            let partner = partner_primer(sts, orientation);
            let ambiguous = contains_ambiguity(&primer);

            match leftmost_unambiguous_window(&primer, word_size) {
                Some(hash_offset) => {
                    let hash_value = encode_window(&primer[hash_offset..hash_offset + word_size]);
                    indexed.push(IndexedPrimerRecord {
                        sts,
                        orientation,
                        hash_offset,
                        hash_value,
                        ambiguous,
                        search_seq: primer,
                        partner_seq: partner,
                    });
                }
                None => fallback.push(FallbackRecord {
                    sts,
                    orientation,
                    search_seq: primer,
                    partner_seq: partner,
                }),
            }
        }
    }

    (indexed, fallback)
}
