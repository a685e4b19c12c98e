//! Enumeration of all co-optimal structures.
//!
//! Every recurrence term that explains the optimum of an interval is
//! followed, so the output contains each structure reachable by some
//! tie-break. Intended for short sequences: the number of co-optimal
//! structures can grow exponentially.

use ahash::AHashMap;
use ahash::AHashSet;

use nj_structure::Pair;
use nj_structure::PairSet;
use nj_structure::NAIDX;
use nj_structure::P1KEY;

use crate::FoldError;
use crate::Recurrence;
use crate::ScoreTable;

type Memo = AHashMap<P1KEY, AHashSet<Vec<P1KEY>>>;

/// All distinct optimal structures, sorted by their pair lists.
pub fn enumerate_optimal(
    table: &ScoreTable,
    recurrence: &Recurrence<'_>,
) -> Result<Vec<PairSet>, FoldError> {
    let n = recurrence.len();
    if table.len() != n || table.is_empty() {
        return Err(FoldError::InconsistentTable {
            i: 0,
            j: n.saturating_sub(1),
            score: table.optimum()
        });
    }
    let mut memo = Memo::default();
    let keysets = traceback_all(0, n - 1, table, recurrence, &mut memo)?;

    let mut structures: Vec<PairSet> = keysets.into_iter()
        .map(|keys| {
            let mut pset = PairSet::new(n);
            for key in keys {
                pset.insert(Pair::from_key(key));
            }
            pset
        })
        .collect();
    structures.sort_by_key(|ps| ps.to_tuples());
    Ok(structures)
}

fn traceback_all(
    i: usize,
    j: usize,
    table: &ScoreTable,
    rec: &Recurrence<'_>,
    memo: &mut Memo,
) -> Result<AHashSet<Vec<P1KEY>>, FoldError> {
    if i >= j {
        return Ok(AHashSet::from([vec![]]));
    }

    let ij_key = Pair::new(i as NAIDX, j as NAIDX).key();
    if let Some(cached) = memo.get(&ij_key) {
        return Ok(cached.clone());
    }

    let mut results = AHashSet::default();
    let score = table.get(i, j);

    // Case 1: i unpaired
    if score == table.get(i + 1, j) {
        results.extend(traceback_all(i + 1, j, table, rec, memo)?);
    }

    // Case 2: j unpaired
    if score == table.get(i, j - 1) {
        results.extend(traceback_all(i, j - 1, table, rec, memo)?);
    }

    // Case 3: i-j paired
    if let Some(s) = rec.pair_transition(i, j) {
        if score == table.get(i + 1, j - 1) + s {
            for mut sub in traceback_all(i + 1, j - 1, table, rec, memo)? {
                sub.push(ij_key);
                sub.sort_unstable();
                results.insert(sub);
            }
        }
    }

    // Case 4: bifurcation
    for k in i + 1..j {
        if score == table.get(i, k) + table.get(k + 1, j) {
            let lefts = traceback_all(i, k, table, rec, memo)?;
            let rights = traceback_all(k + 1, j, table, rec, memo)?;
            for left in &lefts {
                for right in &rights {
                    let mut combined = left.clone();
                    combined.extend(right);
                    combined.sort_unstable();
                    results.insert(combined);
                }
            }
        }
    }

    if results.is_empty() {
        return Err(FoldError::InconsistentTable { i, j, score });
    }
    memo.insert(ij_key, results.clone());
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExcludedIndices;
    use crate::NucleotideVec;
    use crate::ScoringPolicy;

    #[test]
    fn test_all_optimal_ggccc() {
        let seq = NucleotideVec::try_from("GGCCC").unwrap();
        let none = ExcludedIndices::none();
        let rec = Recurrence::new(&seq, ScoringPolicy::Energy, &none, 0);
        let table = rec.fill();
        let all: Vec<_> = enumerate_optimal(&table, &rec).unwrap()
            .iter()
            .map(|ps| ps.to_tuples())
            .collect();
        assert_eq!(all, vec![
            vec![(0, 3), (1, 2)],
            vec![(0, 4), (1, 2)],
            vec![(0, 4), (1, 3)],
        ]);
    }

    #[test]
    fn test_unique_optimum() {
        let seq = NucleotideVec::try_from("GGGAAAUCC").unwrap();
        let none = ExcludedIndices::none();
        let rec = Recurrence::new(&seq, ScoringPolicy::Energy, &none, 3);
        let table = rec.fill();
        let all = enumerate_optimal(&table, &rec).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].to_tuples(), vec![(0, 8), (1, 7), (2, 6)]);
    }

    #[test]
    fn test_no_pairs_possible() {
        let seq = NucleotideVec::try_from("AAAA").unwrap();
        let none = ExcludedIndices::none();
        let rec = Recurrence::new(&seq, ScoringPolicy::Unit, &none, 0);
        let table = rec.fill();
        let all = enumerate_optimal(&table, &rec).unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_empty());
    }
}
