use std::fmt;

use crate::Score;

/// Errors raised while preparing or reconstructing a fold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoldError {
    /// The sequence has no nucleotides.
    EmptySequence,
    /// A symbol outside of {A, C, G, U} (case-insensitive).
    InvalidSymbol { symbol: char, position: usize },
    /// The sequence cannot be indexed with `NAIDX`.
    SequenceTooLong(usize),
    /// Minimal loop lengths must be non-negative.
    NegativeLoopLength(i64),
    /// A binding site without nucleotides.
    EmptyBindingSite,
    /// A binding site that does not occur in the sequence.
    BindingSiteNotFound(String),
    /// An excluded index range reaching past the sequence end.
    RangeOutOfBounds { start: usize, end: usize, length: usize },
    /// No recurrence term explains the stored optimum of interval [i, j].
    InconsistentTable { i: usize, j: usize, score: Score },
}

impl FoldError {
    /// True for precondition failures, false for reconstruction failures.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, FoldError::InconsistentTable { .. })
    }
}

impl fmt::Display for FoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoldError::EmptySequence => {
                write!(f, "Invalid input: empty sequence")
            }
            FoldError::InvalidSymbol { symbol, position } => {
                write!(f, "Invalid input: unsupported nucleotide '{}' at position {}", symbol, position)
            }
            FoldError::SequenceTooLong(n) => {
                write!(f, "Invalid input: sequence of length {} exceeds the index range", n)
            }
            FoldError::NegativeLoopLength(l) => {
                write!(f, "Invalid input: negative minimal loop length {}", l)
            }
            FoldError::EmptyBindingSite => {
                write!(f, "Invalid input: empty binding site")
            }
            FoldError::BindingSiteNotFound(site) => {
                write!(f, "Invalid input: binding site '{}' is not a substring of the sequence", site)
            }
            FoldError::RangeOutOfBounds { start, end, length } => {
                write!(f, "Invalid input: range {}..{} exceeds sequence length {}", start, end, length)
            }
            FoldError::InconsistentTable { i, j, score } => {
                write!(f, "Inconsistent state: no transition explains score {} of interval [{}, {}]", score, i, j)
            }
        }
    }
}

impl std::error::Error for FoldError {}
