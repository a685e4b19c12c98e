//! RNA nucleotides and validated sequences.
//!
//! Input is case-insensitive, symbols outside of {A, C, G, U} are rejected.

use std::fmt;
use std::ops::Deref;

use nj_structure::NAIDX;

use crate::FoldError;


#[derive(Clone, Hash, Copy, Debug, Eq, PartialEq)]
pub enum Base { A, C, G, U }

impl Base {
    /// Watson-Crick pairs and the G-U wobble.
    pub fn pairs_with(self, other: Base) -> bool {
        matches!(
            (self, other),
            (Base::A, Base::U) | (Base::U, Base::A) |
            (Base::G, Base::C) | (Base::C, Base::G) |
            (Base::G, Base::U) | (Base::U, Base::G)
        )
    }
}

impl TryFrom<char> for Base {
    type Error = FoldError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Base::A),
            'C' => Ok(Base::C),
            'G' => Ok(Base::G),
            'U' => Ok(Base::U),
            _ => Err(FoldError::InvalidSymbol { symbol: c, position: 0 }),
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::U => 'U',
        };
        write!(f, "{}", c)
    }
}


/// A validated, upper-case RNA sequence.
#[derive(Clone, Hash, Debug, Eq, PartialEq)]
pub struct NucleotideVec(Vec<Base>);

impl Deref for NucleotideVec {
    type Target = [Base];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl NucleotideVec {
    /// Parse without the length restrictions of a foldable sequence.
    /// Used for binding-site fragments.
    pub(crate) fn parse_fragment(s: &str) -> Result<Self, FoldError> {
        let mut vec = Vec::with_capacity(s.len());
        for (position, symbol) in s.chars().enumerate() {
            let base = Base::try_from(symbol)
                .map_err(|_| FoldError::InvalidSymbol { symbol, position })?;
            vec.push(base);
        }
        Ok(NucleotideVec(vec))
    }

    /// First position at which `fragment` occurs.
    pub fn find(&self, fragment: &[Base]) -> Option<usize> {
        if fragment.is_empty() || fragment.len() > self.len() {
            return None;
        }
        self.0.windows(fragment.len()).position(|w| w == fragment)
    }
}

impl TryFrom<&str> for NucleotideVec {
    type Error = FoldError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let seq = NucleotideVec::parse_fragment(s)?;
        if seq.is_empty() {
            return Err(FoldError::EmptySequence);
        }
        if seq.len() >= NAIDX::MAX as usize {
            return Err(FoldError::SequenceTooLong(seq.len()));
        }
        Ok(seq)
    }
}

impl fmt::Display for NucleotideVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{}", b)?;
        }
        Ok(())
    }
}
