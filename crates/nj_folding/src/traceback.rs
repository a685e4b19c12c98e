//! Reconstruction of an optimal structure from a filled score table.
//!
//! The traceback walks an explicit stack of intervals. At every interval
//! it re-derives which recurrence term explains the stored optimum, in
//! the order: i unpaired, j unpaired, (i, j) paired, bifurcation.
//! A `TieBreak` may promote the pair move ahead of the unpaired moves
//! and decides between co-optimal bifurcation points.

use std::cmp::Reverse;
use log::debug;

use nj_structure::Pair;
use nj_structure::PairSet;
use nj_structure::NAIDX;

use crate::FoldError;
use crate::Recurrence;
use crate::ScoreTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TracebackMode {
    /// First matching term wins.
    #[default]
    Standard,
    /// Ties are resolved towards longer stems.
    Alternative,
}

/// Read-only view on a table and the recurrence that produced it.
#[derive(Debug, Clone, Copy)]
pub struct StemView<'a> {
    recurrence: &'a Recurrence<'a>,
    table: &'a ScoreTable,
}

impl<'a> StemView<'a> {
    pub fn new(recurrence: &'a Recurrence<'a>, table: &'a ScoreTable) -> Self {
        Self { recurrence, table }
    }

    /// True if pairing (i, j) explains the optimum of [i, j].
    pub fn pair_is_optimal(&self, i: usize, j: usize) -> bool {
        match self.recurrence.pair_transition(i, j) {
            Some(s) => self.table.get(i, j) == self.table.get(i + 1, j - 1) + s,
            None => false,
        }
    }

    /// Number of consecutive optimal pairs (i, j), (i+1, j-1), ...
    pub fn stem_run(&self, i: usize, j: usize) -> usize {
        let (mut i, mut j) = (i, j);
        let mut run = 0;
        while i < j && self.pair_is_optimal(i, j) {
            run += 1;
            i += 1;
            j -= 1;
        }
        run
    }
}

/// Choice between co-optimal transitions.
pub trait TieBreak {
    /// Whether an optimal (i, j) pair is taken before the unpaired moves.
    /// `stem_open` is true if the enclosing interval was closed by a pair.
    fn prefer_pair(&self, view: &StemView<'_>, i: usize, j: usize, stem_open: bool) -> bool;

    /// Pick one of the co-optimal split points `k` of [i, j] (non-empty, increasing).
    fn choose_split(&self, view: &StemView<'_>, i: usize, j: usize, splits: &[usize]) -> Option<usize>;
}

/// Fixed priority order, first bifurcation point.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMatch;

impl TieBreak for FirstMatch {
    fn prefer_pair(&self, _: &StemView<'_>, _: usize, _: usize, _: bool) -> bool {
        false
    }

    fn choose_split(&self, _: &StemView<'_>, _: usize, _: usize, splits: &[usize]) -> Option<usize> {
        splits.first().copied()
    }
}

/// Extends open stems and splits where the longest stem survives.
///
/// Both choices are greedy and only look at the stems adjacent to the
/// current interval, so the result is not guaranteed to hold the longest
/// stem of all optimal structures. On `CCGAUCACCCAGAAUUUUGUUCUC` (unit
/// scores, no minimum loop) the standard traceback keeps a stem of five
/// pairs while this one ends with stems of at most four.
///
/// Split points are ranked by the longest stem on either side, then by the
/// sum of both, then by the smallest `k`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestStem;

impl TieBreak for LongestStem {
    fn prefer_pair(&self, view: &StemView<'_>, i: usize, j: usize, stem_open: bool) -> bool {
        stem_open || view.stem_run(i + 1, j - 1) > 0
    }

    fn choose_split(&self, view: &StemView<'_>, i: usize, j: usize, splits: &[usize]) -> Option<usize> {
        splits.iter().copied().max_by_key(|&k| {
            let left = view.stem_run(i, k);
            let right = view.stem_run(k + 1, j);
            (left.max(right), left + right, Reverse(k))
        })
    }
}

/// Reconstruct one optimal structure.
pub fn traceback(
    table: &ScoreTable,
    recurrence: &Recurrence<'_>,
    mode: TracebackMode,
) -> Result<PairSet, FoldError> {
    match mode {
        TracebackMode::Standard => traceback_with(table, recurrence, &FirstMatch),
        TracebackMode::Alternative => traceback_with(table, recurrence, &LongestStem),
    }
}

/// Reconstruct one optimal structure with a custom tie-break.
pub fn traceback_with<T: TieBreak + ?Sized>(
    table: &ScoreTable,
    recurrence: &Recurrence<'_>,
    tie_break: &T,
) -> Result<PairSet, FoldError> {
    let n = recurrence.len();
    if table.len() != n {
        return Err(FoldError::InconsistentTable {
            i: 0,
            j: table.len().saturating_sub(1),
            score: table.optimum()
        });
    }
    let view = StemView::new(recurrence, table);
    let mut pairs = PairSet::new(n);
    if recurrence.is_empty() {
        return Ok(pairs);
    }

    // (i, j, stem_open)
    let mut stack: Vec<(usize, usize, bool)> = vec![(0, n - 1, false)];
    while let Some((i, j, stem_open)) = stack.pop() {
        if i >= j {
            continue;
        }
        let score = table.get(i, j);
        let pair_optimal = view.pair_is_optimal(i, j);

        if pair_optimal && tie_break.prefer_pair(&view, i, j, stem_open) {
            pairs.insert(Pair::new(i as NAIDX, j as NAIDX));
            stack.push((i + 1, j - 1, true));
        } else if score == table.get(i + 1, j) {
            stack.push((i + 1, j, false));
        } else if score == table.get(i, j - 1) {
            stack.push((i, j - 1, false));
        } else if pair_optimal {
            pairs.insert(Pair::new(i as NAIDX, j as NAIDX));
            stack.push((i + 1, j - 1, true));
        } else {
            let splits: Vec<usize> = (i + 1..j)
                .filter(|&k| score == table.get(i, k) + table.get(k + 1, j))
                .collect();
            let k = tie_break.choose_split(&view, i, j, &splits)
                .ok_or(FoldError::InconsistentTable { i, j, score })?;
            // Left interval first.
            stack.push((k + 1, j, false));
            stack.push((i, k, false));
        }
    }
    debug!("Traceback recovered {} pairs for optimum {}.", pairs.len(), table.optimum());
    Ok(pairs)
}
