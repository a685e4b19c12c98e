//! Resolution of binding sites into excluded sequence positions.
//!
//! A binding site is given as a fragment of the sequence and is resolved
//! to its *first* occurrence. Positions covered by any site cannot pair.

use std::ops::Range;
use nohash_hasher::IntSet;
use log::debug;

use crate::FoldError;
use crate::NucleotideVec;

/// The union of all positions covered by binding sites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludedIndices {
    indices: IntSet<usize>,
}

impl ExcludedIndices {
    /// No excluded positions.
    pub fn none() -> Self {
        Self::default()
    }

    /// Resolve binding-site fragments against the sequence.
    pub fn resolve<S: AsRef<str>>(
        sequence: &NucleotideVec,
        sites: &[S]
    ) -> Result<Self, FoldError> {
        let mut excluded = Self::default();
        for site in sites {
            let site = site.as_ref();
            let fragment = NucleotideVec::parse_fragment(site)?;
            if fragment.is_empty() {
                return Err(FoldError::EmptyBindingSite);
            }
            let start = sequence.find(&fragment)
                .ok_or_else(|| FoldError::BindingSiteNotFound(site.to_string()))?;
            debug!("Binding site {} resolved to [{}, {}).", site, start, start + fragment.len());
            excluded.indices.extend(start..start + fragment.len());
        }
        Ok(excluded)
    }

    /// Exclude explicit half-open ranges.
    pub fn from_ranges(
        length: usize,
        ranges: &[Range<usize>]
    ) -> Result<Self, FoldError> {
        let mut excluded = Self::default();
        for r in ranges {
            if r.end > length || r.start > r.end {
                return Err(FoldError::RangeOutOfBounds {
                    start: r.start,
                    end: r.end,
                    length
                });
            }
            excluded.indices.extend(r.clone());
        }
        Ok(excluded)
    }

    pub fn contains(&self, i: usize) -> bool {
        self.indices.contains(&i)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Excluded positions in increasing order.
    pub fn to_vec(&self) -> Vec<usize> {
        let mut v: Vec<usize> = self.indices.iter().copied().collect();
        v.sort_unstable();
        v
    }
}
