// src/comparator.rs
// COMPARATOR
// Side-effect-free verification of a candidate primer/target window pair:
// bounded mismatches outside a protected 3' region, optionally IUPAC-aware.

use crate::nucleotide::iupac_match;
use crate::preprocessor::Orientation;

/// Returns true iff `primer` matches `target` (same length) under the
/// configured mismatch budget `n` and 3'-protection length `x`.
///
/// `direction` selects which end of `primer` is protected: the last `x`
/// bases for `Fwd`, the first `x` bases for `Rev` -- in both cases the
/// protected region is the primer's own 3' end in its biological
/// orientation.
pub fn compare(
    primer: &[u8],
    target: &[u8],
    direction: Orientation,
    n: usize,
    x: usize,
    iupac: bool,
) -> bool {
    debug_assert_eq!(primer.len(), target.len());
    let len = primer.len();
    let x = x.min(len);

    let is_protected = |i: usize| -> bool {
        match direction {
            Orientation::Fwd => i >= len - x,
            Orientation::Rev => i < x,
        }
    };

    let mut mismatches = 0usize;
    for i in 0..len {
        let matches = base_matches(primer[i], target[i], iupac);
        if !matches {
            if is_protected(i) {
                return false;
            }
            mismatches += 1;
            if mismatches > n {
                return false;
            }
        }
    }
    true
}

#[inline]
fn base_matches(p: u8, t: u8, iupac: bool) -> bool {
    if iupac {
        iupac_match(p, t)
    } else {
        let p = p.to_ascii_uppercase();
        let t = t.to_ascii_uppercase();
        matches!(p, b'A' | b'C' | b'G' | b'T') && matches!(t, b'A' | b'C' | b'G' | b'T') && p == t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_accepted_with_zero_budget() {
        assert!(compare(b"ACGTACGT", b"ACGTACGT", Orientation::Fwd, 0, 0, false));
    }

    #[test]
    fn mismatch_in_protected_region_rejected() {
        // Fwd: last base protected.
        assert!(!compare(b"ACGTACGT", b"ACGTACGA", Orientation::Fwd, 1, 1, false));
    }

    #[test]
    fn mismatch_outside_protected_region_accepted_within_budget() {
        assert!(compare(b"ACGTACGT", b"ACGAACGT", Orientation::Fwd, 1, 1, false));
    }

    #[test]
    fn rev_protects_leading_bases() {
        // Rev: first base protected.
        assert!(!compare(b"ACGTACGT", b"TCGTACGT", Orientation::Rev, 1, 1, false));
        assert!(compare(b"ACGTACGT", b"ACGTACGA", Orientation::Rev, 1, 1, false));
    }

    #[test]
    fn too_many_mismatches_rejected() {
        assert!(!compare(b"ACGTACGT", b"TCGAACGT", Orientation::Fwd, 1, 0, false));
    }

    #[test]
    fn ambiguity_letters_count_as_mismatch_when_iupac_disabled() {
        assert!(!compare(b"ACGTNCGT", b"ACGTACGT", Orientation::Fwd, 0, 0, false));
    }

    #[test]
    fn ambiguity_letters_resolved_when_iupac_enabled() {
        assert!(compare(b"ACGTNCGT", b"ACGTACGT", Orientation::Fwd, 0, 0, true));
    }
}
