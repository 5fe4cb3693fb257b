mod report;
pub use self::report::{job_name, ErrorPair, MatchRates, Proportions, ScoreReport};

use std::collections::{BTreeMap, HashMap, HashSet};

use log::info;

use crate::corpus::{TaggedToken, Token};
use crate::error::{Error, Result};

/// A prediction aligned with its ground truth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoredToken {
    pub prediction: Token,
    pub truth: Token,
    /// The truth word occurs in the training data.
    pub seen_word: bool,
    /// The predicted word has more than one lemma in training or ground truth.
    pub ambiguous: bool,
    /// The truth tag occurs in the training data.
    pub seen_tag: bool,
    /// The predicted tag occurs in training or ground truth.
    pub existent_tag: bool,
}

impl ScoredToken {
    pub fn lemma_match(&self) -> bool {
        self.prediction.lemma() == self.truth.lemma()
    }

    pub fn tag_match(&self) -> bool {
        self.prediction.tag() == self.truth.tag()
    }

    pub fn joint_match(&self) -> bool {
        self.lemma_match() && self.tag_match()
    }
}

/// Scores predictions against ground truth.
///
/// Novelty of words and tags is judged against the training data, ambiguity
/// against both training data and ground truth.
pub struct Scorer {
    ground: Vec<Token>,
    training_words: HashSet<String>,
    training_tags: HashSet<String>,
    ground_tags: HashSet<String>,
    ambiguous_words: HashSet<String>,
}

impl Scorer {
    pub fn new(training: &[Token], ground: Vec<Token>) -> Self {
        let mut ambiguous = ambiguous_words(training);
        ambiguous.extend(ambiguous_words(&ground));

        Scorer {
            training_words: training.iter().map(|t| t.form().to_owned()).collect(),
            training_tags: training.iter().map(|t| t.tag().to_owned()).collect(),
            ground_tags: ground.iter().map(|t| t.tag().to_owned()).collect(),
            ambiguous_words: ambiguous,
            ground,
        }
    }

    /// Aligns predictions with the ground truth row by row.
    ///
    /// Fails if the number of predictions differs from the number of ground
    /// truth rows.
    pub fn align(&self, prediction: Vec<Token>) -> Result<Vec<ScoredToken>> {
        info!(
            "{} predicted rows, {} ground truth rows.",
            prediction.len(),
            self.ground.len()
        );
        if prediction.len() != self.ground.len() {
            return Err(Error::RowCountMismatch {
                prediction: prediction.len(),
                ground: self.ground.len(),
            });
        }

        Ok(prediction
            .into_iter()
            .zip(&self.ground)
            .map(|(prediction, truth)| ScoredToken {
                seen_word: self.training_words.contains(truth.form()),
                ambiguous: self.ambiguous_words.contains(prediction.form()),
                seen_tag: self.training_tags.contains(truth.tag()),
                existent_tag: self.training_tags.contains(prediction.tag())
                    || self.ground_tags.contains(prediction.tag()),
                prediction,
                truth: truth.clone(),
            })
            .collect())
    }

    /// Aligns and scores predictions.
    pub fn score(&self, prediction: Vec<Token>) -> Result<ScoreReport> {
        let scored = self.align(prediction)?;
        Ok(ScoreReport::new(&scored))
    }
}

/// Words that occur with more than one distinct lemma.
fn ambiguous_words(tokens: &[Token]) -> HashSet<String> {
    let mut lemmas: HashMap<&str, HashSet<&str>> = HashMap::new();
    for token in tokens {
        lemmas
            .entry(token.form())
            .or_insert_with(HashSet::new)
            .insert(token.lemma());
    }

    lemmas
        .into_iter()
        .filter(|(_, lemmas)| lemmas.len() > 1)
        .map(|(word, _)| word.to_owned())
        .collect()
}

/// Counts (prediction, truth) pairs, most frequent first.
fn count_pairs<'a, I>(pairs: I) -> Vec<ErrorPair>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for pair in pairs {
        *counts.entry(pair).or_insert(0) += 1;
    }

    let mut pairs: Vec<ErrorPair> = counts
        .into_iter()
        .map(|((prediction, truth), count)| ErrorPair {
            prediction: prediction.to_owned(),
            truth: truth.to_owned(),
            count,
        })
        .collect();
    pairs.sort_by(|a, b| b.count.cmp(&a.count));
    pairs
}
