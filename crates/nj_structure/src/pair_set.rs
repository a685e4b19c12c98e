//! Pair and PairSet definitions.
//!
//! Compact integer-based representation of base pairs.
//!
//! A `Pair` is defined by two 16-bit indices (`NAIDX`) packed into a
//! 32-bit integer key (`P1KEY`) for efficient set and map storage.
//!
//! A `PairSet` does not enforce that its pairs form a secondary structure,
//! use `PairSet::is_secondary_structure` to check that.
//!

use std::fmt;
use nohash_hasher::IntSet;

use crate::DotBracket;
use crate::DotBracketVec;
use crate::StructureError;
use crate::NAIDX;
use crate::P1KEY;


/// A base pair (i, j) with i < j.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pair {
    i: NAIDX,
    j: NAIDX,
}

impl Pair {
    /// Create a new pair (i, j). Panics in debug if i >= j.
    pub fn new(i: NAIDX, j: NAIDX) -> Self {
        debug_assert!(i < j);
        debug_assert!(j < NAIDX::MAX);
        Pair { i, j }
    }

    /// Return the 5'-side index.
    pub fn i(&self) -> NAIDX {
        self.i
    }

    /// Return the 3'-side index.
    pub fn j(&self) -> NAIDX {
        self.j
    }

    /// Compact 32-bit key encoding both indices.
    pub fn key(&self) -> P1KEY {
        ((self.i as P1KEY) << 16) | (self.j as P1KEY)
    }

    /// Decode a key back into a `Pair`.
    pub fn from_key(key: P1KEY) -> Self {
        let i = (key >> 16) as NAIDX;
        let j = (key & 0xFFFF) as NAIDX;
        debug_assert!(i < j);
        Pair { i, j }
    }

    /// True if the two arcs cross (i < k < j < l or k < i < l < j).
    pub fn crosses(&self, other: &Pair) -> bool {
        let (i, j, k, l) = (self.i, self.j, other.i, other.j);
        (i < k && k < j && j < l) || (k < i && i < l && l < j)
    }

    /// True if both pairs use a common position.
    pub fn shares_index(&self, other: &Pair) -> bool {
        self.i == other.i || self.i == other.j || self.j == other.i || self.j == other.j
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.i, self.j)
    }
}

/// A collection of base pairs represented as compact integer keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSet {
    length: usize,
    pairs: IntSet<P1KEY>,
}

impl PairSet {
    /// Create an empty pair set for a given sequence length.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            pairs: IntSet::default(),
        }
    }

    /// Number of pairs contained in the set.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Insert a new pair; returns true if it was newly inserted.
    pub fn insert(&mut self, pair: Pair) -> bool {
        debug_assert!((pair.j() as usize) < self.length);
        self.pairs.insert(pair.key())
    }

    /// Check if a pair exists in the set.
    pub fn contains(&self, pair: &Pair) -> bool {
        self.pairs.contains(&pair.key())
    }

    /// Iterator over all pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = Pair> + '_ {
        self.pairs.iter().map(|&k| Pair::from_key(k))
    }

    /// Return all pairs as a Vec (for deterministic inspection).
    pub fn to_vec(&self) -> Vec<Pair> {
        let mut v: Vec<_> = self.iter().collect();
        v.sort_unstable_by_key(|p| (p.i(), p.j()));
        v
    }

    /// Return all pairs as sorted `(i, j)` tuples.
    pub fn to_tuples(&self) -> Vec<(usize, usize)> {
        self.to_vec()
            .into_iter()
            .map(|p| (p.i() as usize, p.j() as usize))
            .collect()
    }

    /// Underlying sequence length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of pairs present in both sets.
    pub fn intersection_len(&self, other: &PairSet) -> usize {
        self.pairs.intersection(&other.pairs).count()
    }

    /// True if no two pairs cross and no position is used twice.
    pub fn is_secondary_structure(&self) -> bool {
        let pairs = self.to_vec();
        for (a, p) in pairs.iter().enumerate() {
            for q in &pairs[a + 1..] {
                if p.crosses(q) || p.shares_index(q) {
                    return false;
                }
            }
        }
        true
    }

    /// Stack-based parsing of an observed structure annotation.
    ///
    /// Every `(` is matched with the next free `)`. A `)` without an open
    /// partner is skipped, as is any `(` that is never closed. Every other
    /// character counts as unpaired. Annotations must fit the `NAIDX` range.
    pub fn from_annotation(annotation: &str) -> Result<Self, StructureError> {
        let length = annotation.chars().count();
        if length >= NAIDX::MAX as usize {
            return Err(StructureError::TooLong(length));
        }
        let mut stack: Vec<NAIDX> = Vec::new();
        let mut pairs = PairSet::new(length);
        for (j, c) in annotation.chars().enumerate() {
            match c {
                '(' => stack.push(j as NAIDX),
                ')' => {
                    if let Some(i) = stack.pop() {
                        pairs.insert(Pair::new(i, j as NAIDX));
                    }
                }
                _ => (),
            }
        }
        Ok(pairs)
    }
}

impl TryFrom<&DotBracketVec> for PairSet {
    type Error = StructureError;

    /// Strict conversion: unbalanced brackets are errors.
    fn try_from(dbv: &DotBracketVec) -> Result<Self, Self::Error> {
        if dbv.len() >= NAIDX::MAX as usize {
            return Err(StructureError::TooLong(dbv.len()));
        }
        let mut stack: Vec<NAIDX> = Vec::new();
        let mut pairs = PairSet::new(dbv.len());
        for (j, db) in dbv.iter().enumerate() {
            match db {
                DotBracket::Open => stack.push(j as NAIDX),
                DotBracket::Close => {
                    let i = stack.pop().ok_or(StructureError::UnmatchedClose(j))?;
                    pairs.insert(Pair::new(i, j as NAIDX));
                }
                DotBracket::Unpaired | DotBracket::Excluded => (),
            }
        }
        if let Some(i) = stack.pop() {
            return Err(StructureError::UnmatchedOpen(i as usize));
        }
        Ok(pairs)
    }
}

impl fmt::Display for PairSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for pair in self.to_vec() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{}", pair)?;
            first = false;
        }
        Ok(())
    }
}
