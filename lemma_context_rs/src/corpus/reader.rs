use std::io::{BufRead, Lines};

use conllx::graph::Node;
use conllx::io::ReadSentence;

use crate::corpus::Token;
use crate::error::{Error, Result};

/// A corpus row: a token, or `None` for a sentence boundary.
pub type Row = Option<Token>;

/// Zero-based indices of the word, lemma and tag columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnLayout {
    pub word: usize,
    pub lemma: usize,
    pub tag: usize,
}

impl ColumnLayout {
    pub fn new(word: usize, lemma: usize, tag: usize) -> Self {
        ColumnLayout { word, lemma, tag }
    }

    /// Builds a layout from `[word, lemma, tag]` indices.
    pub fn from_indices(indices: &[usize]) -> Result<Self> {
        match indices {
            [word, lemma, tag] => Ok(ColumnLayout::new(*word, *lemma, *tag)),
            _ => Err(Error::invalid_option("column indices", format!("{:?}", indices))),
        }
    }

    fn required_columns(&self) -> usize {
        self.word.max(self.lemma).max(self.tag) + 1
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        ColumnLayout::new(0, 1, 2)
    }
}

/// Reader for whitespace separated columnar corpora.
///
/// Blank lines are sentence boundaries, runs of blank lines collapse into a
/// single boundary. Lines starting with `"` and `# key = value` comment lines
/// are skipped, other rows starting with `#` are data.
pub struct ColumnReader<R> {
    lines: Lines<R>,
    layout: ColumnLayout,
    line_no: usize,
    prev_blank: bool,
}

impl<R: BufRead> ColumnReader<R> {
    pub fn new(read: R, layout: ColumnLayout) -> Self {
        ColumnReader {
            lines: read.lines(),
            layout,
            line_no: 0,
            prev_blank: false,
        }
    }

    /// Reads all tokens, discarding sentence boundaries.
    pub fn tokens(self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        for row in self {
            if let Some(token) = row? {
                tokens.push(token);
            }
        }
        Ok(tokens)
    }

    fn parse_row(&self, line: &str) -> Result<Row> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            return Ok(None);
        }

        let expected = self.layout.required_columns();
        if fields.len() < expected {
            return Err(Error::MalformedRow {
                line: self.line_no,
                expected,
                found: fields.len(),
            });
        }

        Ok(Some(Token::new(
            fields[self.layout.word],
            fields[self.layout.lemma],
            fields[self.layout.tag],
        )))
    }
}

impl<R: BufRead> Iterator for ColumnReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(err.into())),
            };
            self.line_no += 1;

            if line.starts_with('"') || is_comment(&line) {
                continue;
            }

            let row = match self.parse_row(&line) {
                Ok(row) => row,
                Err(err) => return Some(Err(err)),
            };

            if row.is_none() {
                if self.prev_blank {
                    continue;
                }
                self.prev_blank = true;
            } else {
                self.prev_blank = false;
            }

            return Some(Ok(row));
        }
    }
}

/// CoNLL-U style `# key = value` lines.
fn is_comment(line: &str) -> bool {
    let rest = match line.trim_start().strip_prefix('#') {
        Some(rest) => rest,
        None => return false,
    };

    match rest.find('=') {
        Some(idx) => {
            let key = rest[..idx].trim();
            !key.is_empty() && !key.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Reads all sentences from a CoNLL-X reader.
pub fn read_conllx<R: ReadSentence>(mut reader: R) -> Result<Vec<Vec<Token>>> {
    let mut sentences = Vec::new();
    while let Some(sentence) = reader
        .read_sentence()
        .map_err(|err| Error::Conllx(err.to_string()))?
    {
        sentences.push(
            sentence
                .iter()
                .filter_map(Node::token)
                .map(Token::from)
                .collect(),
        );
    }
    Ok(sentences)
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::{BufReader, Cursor};

    use super::{read_conllx, ColumnLayout, ColumnReader, Row};
    use crate::corpus::{TaggedToken, Token};
    use crate::error::Error;

    fn rows(data: &str, layout: ColumnLayout) -> Vec<Row> {
        ColumnReader::new(Cursor::new(data), layout)
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    pub fn blank_lines_collapse_and_comments_are_skipped() {
        let data = "\"quoted comment\nкуче куче noun\n# sent_id = 1\nлае лая verb\n\n\n\nтук тук adv\n";
        let target = vec![
            Some(Token::new("куче", "куче", "noun")),
            Some(Token::new("лае", "лая", "verb")),
            None,
            Some(Token::new("тук", "тук", "adv")),
        ];
        assert_eq!(rows(data, ColumnLayout::default()), target);
    }

    #[test]
    pub fn hash_tokens_are_data() {
        let data = "# text = # е символ\n# # punct\n#куче #куче noun\n";
        assert_eq!(
            rows(data, ColumnLayout::default()),
            vec![
                Some(Token::new("#", "#", "punct")),
                Some(Token::new("#куче", "#куче", "noun")),
            ]
        );
    }

    #[test]
    pub fn custom_column_order() {
        let data = "1\tnoun\tкуче\tкучета\n";
        let layout = ColumnLayout::from_indices(&[3, 2, 1]).unwrap();
        assert_eq!(
            rows(data, layout),
            vec![Some(Token::new("кучета", "куче", "noun"))]
        );
    }

    #[test]
    pub fn short_rows_are_malformed() {
        let data = "куче куче noun\nлае лая\n";
        let result: Result<Vec<Row>, _> =
            ColumnReader::new(Cursor::new(data), ColumnLayout::default()).collect();
        match result {
            Err(Error::MalformedRow {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 2);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected malformed row, got {:?}", other),
        }
    }

    #[test]
    pub fn layout_needs_three_indices() {
        assert!(ColumnLayout::from_indices(&[0, 1]).is_err());
    }

    #[test]
    pub fn tokens_drop_boundaries() {
        let reader = ColumnReader::new(
            BufReader::new(File::open("testdata/sample.txt").unwrap()),
            ColumnLayout::default(),
        );
        let tokens = reader.tokens().unwrap();
        assert_eq!(tokens.len(), 12);
        assert_eq!(tokens[0], Token::new("Кучето", "куче", "noun"));
    }

    #[test]
    pub fn conllx_sentences() {
        let reader = conllx::io::Reader::new(BufReader::new(
            File::open("testdata/sample.conll").unwrap(),
        ));
        let sentences = read_conllx(reader).unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].len(), 4);
        assert_eq!(sentences[1].len(), 2);
        assert_eq!(sentences[0][1], Token::new("лае", "лая", "verb"));
        assert_eq!(sentences[1][1].tag(), "punct");
    }
}
