//! Pair eligibility and pair scores.
//!
//! The DP maximizes, so the energy-weighted policy reports the *negated*
//! pair energy: a G-C pair (-5) scores 5, A-U (-4) scores 4, G-U (-1) scores 1.

use crate::Base;
use crate::ExcludedIndices;

/// Scores in the DP table.
pub type Score = i32;

/// Single-pair energies (Clote & Backofen).
/// Returns `None` for combinations that cannot pair.
pub fn pair_energy(a: Base, b: Base) -> Option<Score> {
    use Base::*;
    match (a, b) {
        (G, C) | (C, G) => Some(-5),
        (A, U) | (U, A) => Some(-4),
        (G, U) | (U, G) => Some(-1),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoringPolicy {
    /// Every allowed pair contributes 1, i.e. base-pair maximization.
    Unit,
    /// Every allowed pair contributes its negated pair energy.
    Energy,
}

impl ScoringPolicy {
    /// Base compatibility plus binding-site exclusion.
    pub fn can_pair(&self, seq: &[Base], i: usize, j: usize, excluded: &ExcludedIndices) -> bool {
        if excluded.contains(i) || excluded.contains(j) {
            return false;
        }
        seq[i].pairs_with(seq[j])
    }

    /// Contribution of pairing i with j. Zero for incompatible bases.
    pub fn pair_score(&self, seq: &[Base], i: usize, j: usize) -> Score {
        match self {
            ScoringPolicy::Unit => {
                if seq[i].pairs_with(seq[j]) { 1 } else { 0 }
            }
            ScoringPolicy::Energy => {
                pair_energy(seq[i], seq[j]).map_or(0, |e| -e)
            }
        }
    }
}
