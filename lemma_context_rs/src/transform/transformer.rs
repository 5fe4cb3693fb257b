use log::{debug, warn};

use crate::corpus::TaggedToken;
use crate::error::Result;
use crate::transform::{ContextComputer, Direction};
use crate::util::{TransformConfig, WordUnitKind};

/// Source and target line of a single focus word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Example {
    pub source: String,
    pub target: String,
}

/// Turns sentences into context-sensitive lemmatization examples.
///
/// Every focus word becomes a source line holding the word surrounded by its
/// bounded left and right context, and a target line holding its lemma:
///
/// ```text
/// <w> к у ч е т о <lc> л а е <rc> с и л н о </w>
/// <w> л а я </w>
/// ```
pub struct Transformer {
    config: TransformConfig,
    context: ContextComputer,
    keep_punct_in_context: bool,
}

impl Transformer {
    pub fn new(config: TransformConfig) -> Result<Self> {
        config.validate()?;
        let context = ContextComputer::new(&config.subword_separator, config.truncation())?;
        Ok(Transformer {
            config,
            context,
            keep_punct_in_context: false,
        })
    }

    /// Punctuation is removed from sentences and context unless kept here.
    pub fn keep_punctuation(mut self, keep: bool) -> Self {
        self.keep_punct_in_context = keep;
        self
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Computes source and target lines for all words of `sentence`.
    ///
    /// `left_context` and `right_context` are neighbouring tokens that only
    /// contribute context. Line `i` of both lists belongs to the `i`-th word.
    pub fn process_sentence<T>(
        &self,
        sentence: &[T],
        left_context: &[T],
        right_context: &[T],
    ) -> (Vec<String>, Vec<String>)
    where
        T: TaggedToken,
    {
        self.examples(sentence, left_context, right_context)
            .into_iter()
            .map(|example| (example.source, example.target))
            .unzip()
    }

    /// Like [`Transformer::process_sentence`], but pairs the lines.
    pub fn examples<T>(&self, sentence: &[T], left_context: &[T], right_context: &[T]) -> Vec<Example>
    where
        T: TaggedToken,
    {
        let left = self.filter(left_context);
        let focus = self.filter(sentence);
        let right = self.filter(right_context);

        if focus.is_empty() {
            warn!("Sentence without words after filtering, skipping it.");
            return Vec::new();
        }

        // bounds of the sentence within the tokens including context
        let start = left.len();
        let end = start + focus.len();

        let tokens: Vec<&T> = left.into_iter().chain(focus).chain(right).collect();

        let examples: Vec<Example> = (start..end)
            .map(|idx| Example {
                source: self.source_line(&tokens, idx),
                target: self.target_line(tokens[idx].lemma()),
            })
            .collect();

        debug!(
            "Transformed sentence of {} words with {} context tokens.",
            examples.len(),
            tokens.len() - examples.len()
        );

        examples
    }

    fn filter<'a, T>(&self, tokens: &'a [T]) -> Vec<&'a T>
    where
        T: TaggedToken,
    {
        tokens
            .iter()
            .filter(|token| self.keep_punct_in_context || !token.is_punct())
            .collect()
    }

    fn source_line<T>(&self, tokens: &[&T], idx: usize) -> String
    where
        T: TaggedToken,
    {
        // the focus word is never split into subwords
        let separator = format!("{} ", self.config.subword_separator);
        let form = tokens[idx].form().replace(&separator, "");

        let left_context = self.context.compute_context(&tokens[..idx], Direction::Left);
        let right_context = self
            .context
            .compute_context(&tokens[idx + 1..], Direction::Right);

        let open_tag = self.config.open_tag();
        let close_tag = self.config.close_tag();
        let boundary = self.config.word_boundary.as_str();

        let mut line: Vec<&str> = vec![open_tag.as_str()];
        line.extend(left_context.iter().map(|unit| unit.as_str(boundary)));
        line.push(&self.config.left_context_boundary);
        self.push_word(&mut line, &form);
        line.push(&self.config.right_context_boundary);
        line.extend(right_context.iter().map(|unit| unit.as_str(boundary)));
        line.push(&close_tag);

        line.join(" ")
    }

    fn target_line(&self, lemma: &str) -> String {
        let open_tag = self.config.open_tag();
        let close_tag = self.config.close_tag();

        let mut line: Vec<&str> = vec![open_tag.as_str()];
        self.push_word(&mut line, lemma);
        line.push(&close_tag);

        line.join(" ")
    }

    fn push_word<'a>(&self, line: &mut Vec<&'a str>, word: &'a str) {
        match self.config.word_unit {
            WordUnitKind::Word => line.push(word),
            WordUnitKind::Char => line.extend(
                word.char_indices()
                    .map(|(idx, c)| &word[idx..idx + c.len_utf8()]),
            ),
        }
    }
}
