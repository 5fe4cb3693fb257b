use regex::Regex;

use crate::corpus::TaggedToken;
use crate::error::Result;

/// One unit of context: a text fragment or a word boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContextUnit {
    Boundary,
    Text(String),
}

impl ContextUnit {
    pub fn is_boundary(&self) -> bool {
        *self == ContextUnit::Boundary
    }

    /// Length in characters, boundaries have length 0.
    pub fn char_len(&self) -> usize {
        match self {
            ContextUnit::Boundary => 0,
            ContextUnit::Text(text) => text.chars().count(),
        }
    }

    /// Text of the unit, `boundary` stands in for word boundaries.
    pub fn as_str<'a>(&'a self, boundary: &'a str) -> &'a str {
        match self {
            ContextUnit::Boundary => boundary,
            ContextUnit::Text(text) => text,
        }
    }
}

/// Side of the focus word a run of context tokens lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Tokens precede the focus word, their end is adjacent to it.
    Left,
    /// Tokens follow the focus word, their start is adjacent to it.
    Right,
}

/// Bound on the size of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Truncation {
    /// Maximum number of text units.
    Units(usize),
    /// Maximum number of characters.
    Chars(usize),
    Unbounded,
}

/// Computes the context units on one side of a word.
///
/// Words are split into subwords on the subword separator and followed
/// (left side) or preceded (right side) by a word boundary. Truncation keeps
/// the units closest to the focus word, stray boundaries at either end of the
/// result are removed.
#[derive(Clone, Debug)]
pub struct ContextComputer {
    splitter: Regex,
    truncation: Truncation,
}

impl ContextComputer {
    pub fn new(subword_separator: &str, truncation: Truncation) -> Result<Self> {
        let splitter = Regex::new(&format!(r"\s*{}\s*", regex::escape(subword_separator)))?;
        Ok(ContextComputer {
            splitter,
            truncation,
        })
    }

    pub fn compute_context<T>(&self, tokens: &[T], direction: Direction) -> Vec<ContextUnit>
    where
        T: TaggedToken,
    {
        let units = self.split_units(tokens, direction);

        let mut context = match direction {
            Direction::Left => {
                let kept = self.kept_len(units.iter().rev());
                units[units.len() - kept..].to_vec()
            }
            Direction::Right => {
                let kept = self.kept_len(units.iter());
                units[..kept].to_vec()
            }
        };

        trim_boundaries(&mut context);
        context
    }

    fn split_units<T>(&self, tokens: &[T], direction: Direction) -> Vec<ContextUnit>
    where
        T: TaggedToken,
    {
        let mut units = Vec::new();
        for token in tokens {
            if direction == Direction::Right {
                units.push(ContextUnit::Boundary);
            }
            units.extend(
                self.splitter
                    .split(token.form())
                    .map(|subword| ContextUnit::Text(subword.to_owned())),
            );
            if direction == Direction::Left {
                units.push(ContextUnit::Boundary);
            }
        }
        units
    }

    /// Number of units to keep, `units` starts at the focus word.
    fn kept_len<'a, I>(&self, units: I) -> usize
    where
        I: Iterator<Item = &'a ContextUnit>,
    {
        match self.truncation {
            Truncation::Unbounded => units.count(),
            Truncation::Units(0) | Truncation::Chars(0) => 0,
            Truncation::Units(budget) => {
                let mut remaining = budget;
                let mut kept = 0;
                for unit in units {
                    kept += 1;
                    if !unit.is_boundary() {
                        remaining -= 1;
                        if remaining == 0 {
                            break;
                        }
                    }
                }
                kept
            }
            Truncation::Chars(budget) => {
                let mut total = 0;
                let mut kept = 0;
                for unit in units {
                    total += unit.char_len();
                    if total > budget {
                        break;
                    }
                    kept += 1;
                }
                kept
            }
        }
    }
}

/// Removes one leading and one trailing word boundary.
pub fn trim_boundaries(units: &mut Vec<ContextUnit>) {
    if units.last().map_or(false, ContextUnit::is_boundary) {
        units.pop();
    }
    if units.first().map_or(false, ContextUnit::is_boundary) {
        units.remove(0);
    }
}
