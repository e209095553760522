// src/config.rs
// The engine's frozen configuration surface (spec section 6). Validated
// once at construction; never mutated afterward and shared by reference
// across every worker.

use crate::error::{EngineError, Result};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// k-mer width. 3..16.
    pub word_size: usize,
    /// Tolerance +/- around pcr_size for partner placement. 0..10_000.
    pub margin: u32,
    /// Per-primer mismatch budget outside the protected region. 0..10.
    pub mismatches: usize,
    /// Exact-match length at each primer's 3' end. >= 0.
    pub protection: usize,
    /// Used when an STS record omits its amplicon size. 1..10_000.
    pub default_pcr_size: u32,
    /// Worker count; 0 means "let rayon auto-detect". Overridden to 1 for
    /// payloads below `SINGLE_THREAD_THRESHOLD`.
    pub threads: usize,
    /// Enables IUPAC-aware comparison.
    pub iupac: bool,
}

/// Below this payload length, the scanner always runs single-threaded
/// regardless of the configured thread count.
pub const SINGLE_THREAD_THRESHOLD: usize = 100_000;

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(3..=16).contains(&self.word_size) {
            return Err(EngineError::Configuration(format!(
                "word size must be in 3..=16, got {}",
                self.word_size
            )));
        }
        if self.margin > 10_000 {
            return Err(EngineError::Configuration(format!(
                "margin must be in 0..=10000, got {}",
                self.margin
            )));
        }
        if self.mismatches > 10 {
            return Err(EngineError::Configuration(format!(
                "mismatches must be in 0..=10, got {}",
                self.mismatches
            )));
        }
        if !(1..=10_000).contains(&self.default_pcr_size) {
            return Err(EngineError::Configuration(format!(
                "default PCR size must be in 1..=10000, got {}",
                self.default_pcr_size
            )));
        }
        Ok(())
    }

    /// Validates that `word_size` does not exceed the shortest primer in
    /// `min_primer_len` (the library's minimum primer length). Separate
    /// from `validate` because it depends on the loaded STS library.
    pub fn validate_against_library(&self, min_primer_len: usize) -> Result<()> {
        if self.word_size > min_primer_len {
            return Err(EngineError::Configuration(format!(
                "word size {} exceeds shortest primer length {} in the loaded library",
                self.word_size, min_primer_len
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> EngineConfig {
        EngineConfig {
            word_size: 11,
            margin: 50,
            mismatches: 0,
            protection: 1,
            default_pcr_size: 500,
            threads: 0,
            iupac: false,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn word_size_out_of_range_rejected() {
        let mut c = base_config();
        c.word_size = 2;
        assert!(c.validate().is_err());
        c.word_size = 17;
        assert!(c.validate().is_err());
    }

    #[test]
    fn word_size_exceeding_library_primers_rejected() {
        let c = base_config();
        assert!(c.validate_against_library(20).is_ok());
        assert!(c.validate_against_library(5).is_err());
    }
}
