// src/index.rs
// HASH INDEX
// Maps every observed k-mer word value (0 <= h < 4^W) to the primer
// records that anchor on it. A dense array is used when the key space is
// small (W <= 13, i.e. 4^13 ~= 67M entries of a few bytes each); a sparse
// map is used for larger W, where most of the 4^W key space is never
// populated. The choice is invisible to callers -- both expose the same
// `buckets_for` lookup.

use rustc_hash::FxHashMap;

use crate::preprocessor::{build_primer_records, FallbackRecord, IndexedPrimerRecord};
use crate::sts::Sts;

/// Above this word size the key space (4^W) is sparse enough that a hash
/// map beats a dense array.
const DENSE_WORD_SIZE_LIMIT: usize = 13;

enum Buckets {
    Dense(Vec<Vec<u32>>),
    Sparse(FxHashMap<u64, Vec<u32>>),
}

/// The frozen hash index built over an STS library. Owns the primer
/// records (the arena); records borrow their source `Sts` from the caller's
/// library, whose lifetime must therefore exceed the index's.
pub struct HashIndex<'a> {
    records: Vec<IndexedPrimerRecord<'a>>,
    fallback: Vec<FallbackRecord<'a>>,
    buckets: Buckets,
    word_size: usize,
}

impl<'a> HashIndex<'a> {
    pub fn build(library: &'a [Sts], word_size: usize) -> Self {
        let (records, fallback) = build_primer_records(library, word_size);

        let mut buckets = if word_size <= DENSE_WORD_SIZE_LIMIT {
            Buckets::Dense(vec![Vec::new(); 1usize << (2 * word_size)])
        } else {
            Buckets::Sparse(FxHashMap::default())
        };

        for (idx, rec) in records.iter().enumerate() {
            match &mut buckets {
                Buckets::Dense(table) => table[rec.hash_value as usize].push(idx as u32),
                Buckets::Sparse(map) => map.entry(rec.hash_value).or_default().push(idx as u32),
            }
        }

        HashIndex {
            records,
            fallback,
            buckets,
            word_size,
        }
    }

    pub fn word_size(&self) -> usize {
        self.word_size
    }

    pub fn fallback(&self) -> &[FallbackRecord<'a>] {
        &self.fallback
    }

    /// Iterator over the indexed primer records anchored on hash value `h`.
    pub fn records_at(&self, h: u64) -> impl Iterator<Item = &IndexedPrimerRecord<'a>> {
        let indices: &[u32] = match &self.buckets {
            Buckets::Dense(table) => table.get(h as usize).map(|v| v.as_slice()).unwrap_or(&[]),
            Buckets::Sparse(map) => map.get(&h).map(|v| v.as_slice()).unwrap_or(&[]),
        };
        indices.iter().map(move |&i| &self.records[i as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sts::Sts;

    fn sts(id: &str, p1: &str, p2: &str, size: u32) -> Sts {
        Sts {
            id: id.to_string(),
            primer1: p1.as_bytes().to_vec(),
            primer2: p2.as_bytes().to_vec(),
            pcr_size: size,
            annotation: String::new(),
        }
    }

    #[test]
    fn dense_index_finds_planted_kmer() {
        let lib = vec![sts("S1", "AAAACCCC", "GGGGTTTT", 20)];
        let index = HashIndex::build(&lib, 4);
        // AAAA encodes to 0
        let hits: Vec<_> = index.records_at(0).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].sts.id, "S1");
    }

    #[test]
    fn sparse_index_used_for_large_word_size() {
        let lib = vec![sts("S1", "AAAAAAAAAAAAAAAAAA", "TTTTTTTTTTTTTTTTTT", 20)];
        let index = HashIndex::build(&lib, 14);
        assert!(matches!(index.buckets, Buckets::Sparse(_)));
        let hits: Vec<_> = index.records_at(0).collect();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn empty_bucket_returns_nothing() {
        let lib = vec![sts("S1", "AAAACCCC", "GGGGTTTT", 20)];
        let index = HashIndex::build(&lib, 4);
        assert_eq!(index.records_at(0xFFFF).count(), 0);
    }

    #[test]
    fn insertion_order_is_preserved_within_a_bucket() {
        let lib = vec![
            sts("S1", "AAAACCCC", "GGGGTTTT", 20),
            sts("S2", "AAAAGGGG", "CCCCTTTT", 20),
        ];
        let index = HashIndex::build(&lib, 4);
        let hits: Vec<_> = index.records_at(0).map(|r| r.sts.id.clone()).collect();
        assert_eq!(hits, vec!["S1", "S2"]);
    }
}
