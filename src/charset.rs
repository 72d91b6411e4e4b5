//! Charset expressions: `all`, `space`, a single char, or a range like `a-z`.

use crate::{PicasciiError, Result};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Printable ASCII, space through tilde.
pub const PRINTABLE: RangeInclusive<char> = ' '..='~';

/// Digits, the charset a fresh session starts with.
pub const DEFAULT_CHARSET: RangeInclusive<char> = '0'..='9';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharsetExpr {
    All,
    Space,
    Single(char),
    /// Inclusive, walked from the first endpoint toward the second.
    Range(char, char),
}

impl CharsetExpr {
    pub fn parse(expr: &str) -> Result<Self> {
        let invalid =
            || PicasciiError::InvalidCommand(format!("incorrect charset format: {expr:?}"));

        match expr {
            "all" => return Ok(Self::All),
            "space" => return Ok(Self::Space),
            _ => {}
        }

        let chars: Vec<char> = expr.chars().collect();
        match chars.as_slice() {
            &[c] if PRINTABLE.contains(&c) => Ok(Self::Single(c)),
            &[a, '-', b] if a != b && PRINTABLE.contains(&a) && PRINTABLE.contains(&b) => {
                Ok(Self::Range(a, b))
            }
            _ => Err(invalid()),
        }
    }

    pub fn chars(&self) -> Vec<char> {
        match *self {
            Self::All => PRINTABLE.collect(),
            Self::Space => vec![' '],
            Self::Single(c) => vec![c],
            Self::Range(a, b) if a <= b => (a..=b).collect(),
            Self::Range(a, b) => (b..=a).rev().collect(),
        }
    }
}

impl FromStr for CharsetExpr {
    type Err = PicasciiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parse and flatten several expressions, keeping first-seen order.
pub fn expand_all<S: AsRef<str>>(exprs: &[S]) -> Result<Vec<char>> {
    let mut out = Vec::new();
    for expr in exprs {
        for c in CharsetExpr::parse(expr.as_ref())?.chars() {
            if !out.contains(&c) {
                out.push(c);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords() {
        assert_eq!(CharsetExpr::parse("all").unwrap().chars().len(), 95);
        assert_eq!(CharsetExpr::parse("space").unwrap().chars(), vec![' ']);
    }

    #[test]
    fn single_chars() {
        assert_eq!(CharsetExpr::parse("x").unwrap(), CharsetExpr::Single('x'));
        assert_eq!(CharsetExpr::parse("-").unwrap(), CharsetExpr::Single('-'));
        assert!(CharsetExpr::parse("é").is_err());
        assert!(CharsetExpr::parse("\t").is_err());
    }

    #[test]
    fn ranges_walk_either_direction() {
        let range = CharsetExpr::parse("a-e").unwrap();
        assert_eq!(range.chars(), vec!['a', 'b', 'c', 'd', 'e']);
        assert_eq!(CharsetExpr::parse("3-0").unwrap().chars(), vec!['3', '2', '1', '0']);
    }

    #[test]
    fn malformed_expressions_are_rejected() {
        for bad in ["", "ab", "a-a", "a-", "-a", "a-bc", "abc-d", "a-é"] {
            assert!(
                matches!(CharsetExpr::parse(bad), Err(PicasciiError::InvalidCommand(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn expand_all_dedups() {
        let chars = expand_all(&["0-2", "1", "space"]).unwrap();
        assert_eq!(chars, vec!['0', '1', '2', ' ']);
        assert_eq!(expand_all::<&str>(&[]).unwrap(), Vec::<char>::new());
        assert_eq!(DEFAULT_CHARSET.count(), 10);
    }
}
