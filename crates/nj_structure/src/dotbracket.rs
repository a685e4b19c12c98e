use std::fmt;
use std::ops::Deref;
use std::ops::DerefMut;
use std::convert::TryFrom;

use crate::PairSet;
use crate::StructureError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DotBracket {
    Unpaired, // '.'
    Open,     // '('
    Close,    // ')'
    Excluded, // '*', unpaired because it is covered by a binding site
}

impl TryFrom<char> for DotBracket {
    type Error = StructureError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '.' => Ok(DotBracket::Unpaired),
            '(' => Ok(DotBracket::Open),
            ')' => Ok(DotBracket::Close),
            '*' => Ok(DotBracket::Excluded),
            _ => Err(StructureError::InvalidToken(c.to_string(), "dot-bracket".into(), 0)),
        }
    }
}

impl From<DotBracket> for char {
    fn from(db: DotBracket) -> Self {
        match db {
            DotBracket::Open => '(',
            DotBracket::Close => ')',
            DotBracket::Unpaired => '.',
            DotBracket::Excluded => '*',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DotBracketVec(pub Vec<DotBracket>);

impl Deref for DotBracketVec {
    type Target = [DotBracket];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DotBracketVec {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl DotBracketVec {
    /// Mark the given positions with `*`.
    ///
    /// Only unpaired positions are overwritten, pair markers take precedence.
    /// Positions beyond the end of the structure are ignored.
    pub fn mark_excluded<I>(&mut self, indices: I)
    where
        I: IntoIterator<Item = usize>,
    {
        for i in indices {
            if let Some(db) = self.0.get_mut(i) {
                if *db == DotBracket::Unpaired {
                    *db = DotBracket::Excluded;
                }
            }
        }
    }
}

impl TryFrom<&str> for DotBracketVec {
    type Error = StructureError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut vec = Vec::with_capacity(s.len());
        for (i, c) in s.chars().enumerate() {
            match DotBracket::try_from(c) {
                Ok(db) => vec.push(db),
                Err(StructureError::InvalidToken(tok, src, _)) => {
                    return Err(StructureError::InvalidToken(tok, src, i));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(DotBracketVec(vec))
    }
}

impl From<&PairSet> for DotBracketVec {
    fn from(pairs: &PairSet) -> Self {
        let mut dbv = vec![DotBracket::Unpaired; pairs.length()];
        for pair in pairs.iter() {
            dbv[pair.i() as usize] = DotBracket::Open;
            dbv[pair.j() as usize] = DotBracket::Close;
        }
        DotBracketVec(dbv)
    }
}

impl fmt::Display for DotBracketVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for db in &self.0 {
            write!(f, "{}", char::from(*db))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pair;

    #[test]
    fn test_dot_bracket_from_char() {
        assert_eq!(DotBracket::try_from('.').unwrap(), DotBracket::Unpaired);
        assert_eq!(DotBracket::try_from('(').unwrap(), DotBracket::Open);
        assert_eq!(DotBracket::try_from(')').unwrap(), DotBracket::Close);
        assert_eq!(DotBracket::try_from('*').unwrap(), DotBracket::Excluded);
    }

    #[test]
    fn test_dot_bracket_from_invalid_char() {
        let res = DotBracket::try_from('x');
        assert!(matches!(res, Err(StructureError::InvalidToken(_, src, _)) if src == "dot-bracket"));
    }

    #[test]
    fn test_dot_bracket_vec_from_str() {
        let dbv = DotBracketVec::try_from("(.)*").unwrap();
        assert_eq!(format!("{}", dbv), "(.)*");
        assert_eq!(dbv.len(), 4);
        assert_eq!(dbv[0], DotBracket::Open);
        assert_eq!(dbv[3], DotBracket::Excluded);

        let err = DotBracketVec::try_from("((x))").unwrap_err();
        assert_eq!(err, StructureError::InvalidToken("x".into(), "dot-bracket".into(), 2));
    }

    #[test]
    fn test_render_pair_set() {
        let mut ps = PairSet::new(8);
        ps.insert(Pair::new(0, 6));
        ps.insert(Pair::new(2, 5));
        let dbv = DotBracketVec::from(&ps);
        assert_eq!(dbv.to_string(), "(.(..)).");
    }

    #[test]
    fn test_render_with_exclusion() {
        let mut ps = PairSet::new(9);
        ps.insert(Pair::new(5, 6));
        let mut dbv = DotBracketVec::from(&ps);
        // 5 is paired, so its marker wins; 42 is out of range.
        dbv.mark_excluded([0, 1, 2, 5, 42]);
        assert_eq!(dbv.to_string(), "***..()..");
        assert_eq!(dbv.len(), 9);
    }
}
