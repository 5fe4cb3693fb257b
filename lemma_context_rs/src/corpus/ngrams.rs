use crate::corpus::Token;
use crate::error::{Error, Result};

/// Splits word forms into character n-grams.
///
/// Every n-gram except the last one of a word carries the subword separator,
/// n-grams are separated by spaces: `abcde` becomes `ab@@ cd@@ e` for `n = 2`.
#[derive(Clone, Debug)]
pub struct CharNgrams {
    n: usize,
    separator: String,
}

impl CharNgrams {
    /// Fails if `n` is 0.
    pub fn new(n: usize, separator: impl Into<String>) -> Result<Self> {
        if n == 0 {
            return Err(Error::invalid_option("char_n_gram", n));
        }

        Ok(CharNgrams {
            n,
            separator: separator.into(),
        })
    }

    pub fn segment_word(&self, word: &str) -> String {
        let chars: Vec<char> = word.chars().collect();
        let n_grams: Vec<String> = chars.chunks(self.n).map(|c| c.iter().collect()).collect();
        n_grams.join(&format!("{} ", self.separator))
    }

    /// Replaces the form of every token with its segmented form.
    pub fn segment_sentence(&self, sentence: &mut [Token]) {
        for token in sentence {
            let segmented = self.segment_word(&token.form);
            token.set_form(segmented);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CharNgrams;
    use crate::error::Error;
    use crate::corpus::{TaggedToken, Token};

    #[test]
    pub fn test_segment_word() {
        let bigrams = CharNgrams::new(2, "@@").unwrap();
        assert_eq!(bigrams.segment_word("abcde"), "ab@@ cd@@ e");
        assert_eq!(bigrams.segment_word("abcd"), "ab@@ cd");
        assert_eq!(bigrams.segment_word("a"), "a");
        assert_eq!(bigrams.segment_word(""), "");

        let unigrams = CharNgrams::new(1, "@@").unwrap();
        assert_eq!(unigrams.segment_word("лая"), "л@@ а@@ я");
    }

    #[test]
    pub fn zero_size_is_rejected() {
        match CharNgrams::new(0, "@@") {
            Err(Error::InvalidOption { option, value }) => {
                assert_eq!(option, "char_n_gram");
                assert_eq!(value, "0");
            }
            other => panic!("expected invalid option, got {:?}", other),
        }
    }

    #[test]
    pub fn test_segment_sentence() {
        let trigrams = CharNgrams::new(3, "##").unwrap();
        let mut sentence = vec![
            Token::new("Кучето", "куче", "noun"),
            Token::new("лае", "лая", "verb"),
        ];
        trigrams.segment_sentence(&mut sentence);
        assert_eq!(sentence[0].form(), "Куч## ето");
        assert_eq!(sentence[0].lemma(), "куче");
        assert_eq!(sentence[1].form(), "лае");
    }
}
