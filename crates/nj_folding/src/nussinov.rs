//! Nussinov-Jacobson table construction.
//!
//! The table is filled by increasing interval length. Entry (i, j) holds
//! the best score attainable on the interval [i, j]:
//!
//! ```text
//! N(i,j) = max { N(i+1,j), N(i,j-1), N(i+1,j-1) + s(i,j), max_k N(i,k) + N(k+1,j) }
//! ```
//!
//! where the pair term only applies if i and j may pair and at least
//! `min_loop` positions lie between them.

use log::debug;
use log::trace;
use ndarray::Array2;

use crate::ExcludedIndices;
use crate::NucleotideVec;
use crate::Score;
use crate::ScoringPolicy;

/// The recurrence for one sequence: policy, exclusions and loop constraint.
#[derive(Debug, Clone, Copy)]
pub struct Recurrence<'a> {
    sequence: &'a NucleotideVec,
    policy: ScoringPolicy,
    excluded: &'a ExcludedIndices,
    min_loop: usize,
}

impl<'a> Recurrence<'a> {
    pub fn new(
        sequence: &'a NucleotideVec,
        policy: ScoringPolicy,
        excluded: &'a ExcludedIndices,
        min_loop: usize,
    ) -> Self {
        Self { sequence, policy, excluded, min_loop }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Score of the (i, j) pair transition, `None` if the transition is not
    /// available for this interval.
    pub fn pair_transition(&self, i: usize, j: usize) -> Option<Score> {
        if i >= j || j - i - 1 < self.min_loop {
            return None;
        }
        // Excluded positions never pair, whatever the policy says.
        if self.excluded.contains(i) || self.excluded.contains(j) {
            return None;
        }
        if !self.policy.can_pair(self.sequence, i, j, self.excluded) {
            return None;
        }
        Some(self.policy.pair_score(self.sequence, i, j))
    }

    /// Fill the score table bottom-up.
    pub fn fill(&self) -> ScoreTable {
        let n = self.len();
        let mut table = ScoreTable { table: Array2::from_elem((n, n), 0) };
        for l in 1..n {
            for i in 0..n - l {
                let j = i + l;
                let mut max_val = table.get(i + 1, j).max(table.get(i, j - 1));
                if let Some(s) = self.pair_transition(i, j) {
                    max_val = max_val.max(table.get(i + 1, j - 1) + s);
                }
                for k in i + 1..j {
                    max_val = max_val.max(table.get(i, k) + table.get(k + 1, j));
                }
                table.table[(i, j)] = max_val;
            }
            trace!("Filled intervals of span {}.", l);
        }
        debug!(
            "Filled {n}x{n} table ({:?}, min loop {}), optimum {}.",
            self.policy, self.min_loop, table.optimum()
        );
        table
    }
}

/// Upper-triangular table of interval optima.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTable {
    table: Array2<Score>,
}

impl ScoreTable {
    /// Sequence length the table was built for.
    pub fn len(&self) -> usize {
        self.table.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Best score on [i, j]. Empty intervals (i > j) score 0.
    pub fn get(&self, i: usize, j: usize) -> Score {
        if i > j {
            0
        } else {
            self.table[(i, j)]
        }
    }

    /// Best score of the whole sequence.
    pub fn optimum(&self) -> Score {
        match self.len() {
            0 => 0,
            n => self.get(0, n - 1),
        }
    }
}

/// Build the score table for a validated sequence.
pub fn compute_table(
    sequence: &NucleotideVec,
    policy: ScoringPolicy,
    excluded: &ExcludedIndices,
    min_loop: usize,
) -> ScoreTable {
    Recurrence::new(sequence, policy, excluded, min_loop).fill()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_table(s: &str, min_loop: usize) -> ScoreTable {
        let seq = NucleotideVec::try_from(s).unwrap();
        compute_table(&seq, ScoringPolicy::Unit, &ExcludedIndices::none(), min_loop)
    }

    #[test]
    fn test_single_nucleotide() {
        let table = unit_table("G", 0);
        assert_eq!(table.len(), 1);
        assert_eq!(table.optimum(), 0);
    }

    #[test]
    fn test_adjacent_pair() {
        assert_eq!(unit_table("GC", 0).optimum(), 1);
        assert_eq!(unit_table("GC", 1).optimum(), 0);
        assert_eq!(unit_table("GAC", 1).optimum(), 1);
    }

    #[test]
    fn test_single_positions_score_zero() {
        let table = unit_table("GGGAAAUCC", 0);
        for i in 0..9 {
            assert_eq!(table.get(i, i), 0);
            assert_eq!(table.get(i + 1, i), 0);
        }
        assert_eq!(table.get(7, 8), 0);
        assert_eq!(table.get(5, 6), 1);
        assert_eq!(table.get(6, 8), 0);
        assert_eq!(table.optimum(), 3);
    }

    #[test]
    fn test_loop_gate_keeps_bifurcation() {
        // Two hairpins GAC|GAC need the split, not an enclosing pair.
        let table = unit_table("GACGAC", 1);
        assert_eq!(table.get(0, 2), 1);
        assert_eq!(table.get(3, 5), 1);
        assert_eq!(table.optimum(), 2);
    }

    #[test]
    fn test_energy_table_values() {
        let seq = NucleotideVec::try_from("GGGAAAUCC").unwrap();
        let none = ExcludedIndices::none();
        let table = compute_table(&seq, ScoringPolicy::Energy, &none, 3);
        assert_eq!(table.optimum(), 11);
        let excluded = ExcludedIndices::resolve(&seq, &["GGG"]).unwrap();
        let table = compute_table(&seq, ScoringPolicy::Energy, &excluded, 0);
        assert_eq!(table.optimum(), 4);
    }

    #[test]
    fn test_pair_transition_gate() {
        let seq = NucleotideVec::try_from("GAAAC").unwrap();
        let none = ExcludedIndices::none();
        let rec = Recurrence::new(&seq, ScoringPolicy::Unit, &none, 3);
        assert_eq!(rec.pair_transition(0, 4), Some(1));
        let rec = Recurrence::new(&seq, ScoringPolicy::Unit, &none, 4);
        assert_eq!(rec.pair_transition(0, 4), None);
        assert_eq!(rec.pair_transition(4, 0), None);
    }
}
