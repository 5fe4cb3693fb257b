use crate::corpus::{Row, Token};
use crate::error::Result;

/// Groups a row stream into sentences.
///
/// Boundary rows are dropped and never produce empty sentences. Tokens after
/// the last boundary form the final sentence.
pub fn segment<I>(rows: I) -> Sentences<I::IntoIter>
where
    I: IntoIterator<Item = Result<Row>>,
{
    Sentences {
        rows: rows.into_iter(),
    }
}

/// Iterator over the sentences of a row stream, see [`segment`].
#[derive(Clone, Debug)]
pub struct Sentences<I> {
    rows: I,
}

impl<I> Iterator for Sentences<I>
where
    I: Iterator<Item = Result<Row>>,
{
    type Item = Result<Vec<Token>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut sentence = Vec::new();

        for row in &mut self.rows {
            match row {
                Ok(Some(token)) => sentence.push(token),
                Ok(None) if sentence.is_empty() => continue,
                Ok(None) => return Some(Ok(sentence)),
                Err(err) => return Some(Err(err)),
            }
        }

        if sentence.is_empty() {
            None
        } else {
            Some(Ok(sentence))
        }
    }
}
