use std::io::{self, Write};

use serde::Serialize;

use super::{count_pairs, ScoredToken};
use crate::corpus::TaggedToken;
use crate::error::Result;
use crate::util::Pprint;

/// Share of lemma, tag and joint matches among a set of tokens.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MatchRates {
    pub tokens: usize,
    pub lemma: f64,
    pub tag: f64,
    pub joint: f64,
}

impl MatchRates {
    /// Returns `None` for an empty set.
    pub fn compute<'a, I>(tokens: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a ScoredToken>,
    {
        let mut rates = MatchRates {
            tokens: 0,
            lemma: 0.,
            tag: 0.,
            joint: 0.,
        };
        for token in tokens {
            rates.tokens += 1;
            rates.lemma += token.lemma_match() as usize as f64;
            rates.tag += token.tag_match() as usize as f64;
            rates.joint += token.joint_match() as usize as f64;
        }

        if rates.tokens == 0 {
            return None;
        }

        let n = rates.tokens as f64;
        rates.lemma /= n;
        rates.tag /= n;
        rates.joint /= n;
        Some(rates)
    }

    fn write<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (metric, rate) in &[("lemma", self.lemma), ("tag", self.tag), ("joint", self.joint)] {
            writeln!(
                out,
                "{}_match\tTrue {:.5}\tFalse {:.5}",
                metric,
                rate,
                1. - rate
            )?;
        }
        writeln!(out, "{} number of tokens", self.tokens)
    }
}

/// Shares of `true` and `false` among flags.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Proportions {
    pub true_share: f64,
    pub false_share: f64,
}

impl Proportions {
    pub fn compute<I>(flags: I) -> Option<Self>
    where
        I: IntoIterator<Item = bool>,
    {
        let (mut n_true, mut n) = (0usize, 0usize);
        for flag in flags {
            n += 1;
            n_true += flag as usize;
        }

        if n == 0 {
            return None;
        }

        let true_share = n_true as f64 / n as f64;
        Some(Proportions {
            true_share,
            false_share: 1. - true_share,
        })
    }
}

/// Number of times a prediction was made where the truth differs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorPair {
    pub prediction: String,
    pub truth: String,
    pub count: usize,
}

/// Match rates and error analysis of a prediction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreReport {
    pub all: Option<MatchRates>,
    pub unseen: Option<MatchRates>,
    pub ambiguous: Option<MatchRates>,
    pub lemma_errors: Option<MatchRates>,
    pub lemma_errors_by_ambiguity: Option<Proportions>,
    pub lemma_errors_by_seen: Option<Proportions>,
    pub unseen_tags: Option<MatchRates>,
    pub nonexistent_tags: Option<MatchRates>,
    pub tag_errors: Vec<ErrorPair>,
    pub lemma_errors_pairs: Vec<ErrorPair>,
    pub lemma_errors_among_ambiguous: Vec<ErrorPair>,
    pub lemma_errors_among_unseen: Vec<ErrorPair>,
    pub lemma_errors_by_tag: Vec<ErrorPair>,
}

impl ScoreReport {
    pub fn new(scored: &[ScoredToken]) -> Self {
        let lemma_errors: Vec<&ScoredToken> = scored.iter().filter(|t| !t.lemma_match()).collect();

        ScoreReport {
            all: MatchRates::compute(scored),
            unseen: MatchRates::compute(scored.iter().filter(|t| !t.seen_word)),
            ambiguous: MatchRates::compute(scored.iter().filter(|t| t.ambiguous)),
            lemma_errors: MatchRates::compute(lemma_errors.iter().cloned()),
            lemma_errors_by_ambiguity: Proportions::compute(lemma_errors.iter().map(|t| t.ambiguous)),
            lemma_errors_by_seen: Proportions::compute(lemma_errors.iter().map(|t| t.seen_word)),
            unseen_tags: MatchRates::compute(scored.iter().filter(|t| !t.seen_tag)),
            nonexistent_tags: MatchRates::compute(scored.iter().filter(|t| !t.existent_tag)),
            tag_errors: count_pairs(
                scored
                    .iter()
                    .filter(|t| !t.tag_match())
                    .map(|t| (t.prediction.tag(), t.truth.tag())),
            ),
            lemma_errors_pairs: lemma_pairs(&lemma_errors),
            lemma_errors_among_ambiguous: lemma_pairs(
                &lemma_errors
                    .iter()
                    .cloned()
                    .filter(|t| t.ambiguous)
                    .collect::<Vec<_>>(),
            ),
            lemma_errors_among_unseen: lemma_pairs(
                &lemma_errors
                    .iter()
                    .cloned()
                    .filter(|t| !t.seen_word)
                    .collect::<Vec<_>>(),
            ),
            lemma_errors_by_tag: count_pairs(
                lemma_errors
                    .iter()
                    .map(|t| (t.prediction.tag(), t.truth.tag())),
            ),
        }
    }

    /// Comma separated lemma, tag and joint rates of all, unseen and
    /// ambiguous tokens. Empty sets are left out.
    pub fn summary(&self) -> String {
        let mut fields = Vec::new();
        for rates in [self.all, self.unseen, self.ambiguous].iter().flatten() {
            fields.push(format_rate(rates.lemma));
            fields.push(format_rate(rates.tag));
            fields.push(format_rate(rates.joint));
        }
        fields.join(", ")
    }

    /// Writes the human readable report.
    pub fn write_report<W: Write>(&self, out: &mut W, name: &str, pprint: &Pprint) -> io::Result<()> {
        let title = format!(" Prediction results for {} ", name).to_uppercase();
        writeln!(out, "{}", center(&title, pprint))?;
        writeln!(out)?;

        write_rates(out, "All tokens", self.all)?;
        write_rates(out, "Predicting unseen tokens", self.unseen)?;
        write_rates(out, "Ambiguous tokens", self.ambiguous)?;

        writeln!(out, "{}", center("ERROR ANALYSIS", pprint))?;
        write_rates(out, "Lemmatization error statistics", self.lemma_errors)?;
        write_proportions(
            out,
            "Lemmatization error by whether a token is ambiguous (True) or not (False)",
            self.lemma_errors_by_ambiguity,
        )?;
        write_proportions(
            out,
            "Lemmatization error by whether a token is seen (True) or not (False) in training",
            self.lemma_errors_by_seen,
        )?;
        write_rates(out, "Predicting unseen tags [IGNORED IN RESULTS]", self.unseen_tags)?;
        write_rates(
            out,
            "Predicted non-existent tags [IGNORED IN RESULTS]",
            self.nonexistent_tags,
        )?;

        write_pairs(out, "Tagging errors", &self.tag_errors)?;
        write_pairs(out, "Lemmatization errors", &self.lemma_errors_pairs)?;
        write_pairs(
            out,
            "Lemmatization error among ambiguous tokens",
            &self.lemma_errors_among_ambiguous,
        )?;
        write_pairs(
            out,
            "Lemmatization error among unseen tokens",
            &self.lemma_errors_among_unseen,
        )?;
        write_pairs(out, "Lemmatization errors by tags", &self.lemma_errors_by_tag)
    }

    /// Writes the report as JSON under the given job name.
    pub fn export<W: Write>(&self, out: W, job_name: &str) -> Result<()> {
        #[derive(Serialize)]
        struct Export<'a> {
            job_name: &'a str,
            report: &'a ScoreReport,
        }

        serde_json::to_writer_pretty(
            out,
            &Export {
                job_name,
                report: self,
            },
        )?;
        Ok(())
    }
}

fn lemma_pairs(tokens: &[&ScoredToken]) -> Vec<ErrorPair> {
    count_pairs(
        tokens
            .iter()
            .map(|t| (t.prediction.lemma(), t.truth.lemma())),
    )
}

/// Job name of a prediction file, `dev_prediction.1234` is job `1234`.
pub fn job_name(prediction_path: &str) -> String {
    let parts: Vec<&str> = prediction_path.split("prediction.").collect();
    match parts.as_slice() {
        [_, job] => (*job).to_owned(),
        _ => "dev".to_owned(),
    }
}

fn format_rate(rate: f64) -> String {
    if rate == 0. {
        return "0".to_owned();
    }

    let rounded = (rate * 1e5).round() / 1e5;
    if rounded.fract() == 0. {
        format!("{:.1}", rounded)
    } else {
        format!("{}", rounded)
    }
}

fn center(title: &str, pprint: &Pprint) -> String {
    let len = title.chars().count();
    if len >= pprint.title_length {
        return title.to_owned();
    }

    let pad = pprint.title_length - len;
    let left = pad / 2 + (pad & pprint.title_length & 1);
    let fill = |n| pprint.title_ch.to_string().repeat(n);
    format!("{}{}{}", fill(left), title, fill(pad - left))
}

fn write_rates<W: Write>(out: &mut W, heading: &str, rates: Option<MatchRates>) -> io::Result<()> {
    writeln!(out, "{}", heading)?;
    if let Some(rates) = rates {
        rates.write(out)?;
    }
    writeln!(out)
}

fn write_proportions<W: Write>(
    out: &mut W,
    heading: &str,
    proportions: Option<Proportions>,
) -> io::Result<()> {
    writeln!(out, "{}", heading)?;
    if let Some(proportions) = proportions {
        writeln!(out, "True\t{:.5}", proportions.true_share)?;
        writeln!(out, "False\t{:.5}", proportions.false_share)?;
    }
    writeln!(out)
}

fn write_pairs<W: Write>(out: &mut W, heading: &str, pairs: &[ErrorPair]) -> io::Result<()> {
    writeln!(out, "{}", heading)?;
    for pair in pairs {
        writeln!(out, "{}\t{}\t{}", pair.prediction, pair.truth, pair.count)?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::{center, format_rate, job_name, MatchRates, Proportions, ScoreReport};
    use crate::corpus::Token;
    use crate::score::Scorer;
    use crate::util::Pprint;

    fn report() -> ScoreReport {
        let training = vec![
            Token::new("кучета", "куче", "noun"),
            Token::new("мили", "мил", "adj"),
            Token::new("мили", "миля", "noun"),
        ];
        let ground = vec![
            Token::new("кучета", "куче", "noun"),
            Token::new("лаят", "лая", "verb"),
            Token::new("мили", "миля", "noun"),
            Token::new("котки", "котка", "noun"),
        ];
        let prediction = vec![
            Token::new("кучета", "куче", "noun"),
            Token::new("лаят", "лаят", "verb"),
            Token::new("мили", "мил", "adj"),
            Token::new("котки", "котка", "noun"),
        ];
        Scorer::new(&training, ground).score(prediction).unwrap()
    }

    #[test]
    pub fn match_rates() {
        let report = report();
        assert_eq!(
            report.all,
            Some(MatchRates {
                tokens: 4,
                lemma: 0.5,
                tag: 0.75,
                joint: 0.5,
            })
        );
        assert_eq!(
            report.unseen,
            Some(MatchRates {
                tokens: 2,
                lemma: 0.5,
                tag: 1.,
                joint: 0.5,
            })
        );
        assert_eq!(
            report.ambiguous,
            Some(MatchRates {
                tokens: 1,
                lemma: 0.,
                tag: 0.,
                joint: 0.,
            })
        );
        assert_eq!(
            report.lemma_errors_by_ambiguity,
            Some(Proportions {
                true_share: 0.5,
                false_share: 0.5,
            })
        );
        assert_eq!(report.tag_errors.len(), 1);
        assert_eq!(report.tag_errors[0].prediction, "adj");
        assert_eq!(report.lemma_errors_pairs.len(), 2);
        assert_eq!(report.lemma_errors_among_unseen[0].prediction, "лаят");
    }

    #[test]
    pub fn summary_line() {
        assert_eq!(report().summary(), "0.5, 0.75, 0.5, 0.5, 1.0, 0.5, 0, 0, 0");
    }

    #[test]
    pub fn empty_sets_are_left_out_of_the_summary() {
        let tokens = vec![Token::new("a", "a", "x")];
        let report = Scorer::new(&tokens, tokens.clone())
            .score(tokens.clone())
            .unwrap();
        assert_eq!(report.unseen, None);
        assert_eq!(report.ambiguous, None);
        assert_eq!(report.summary(), "1.0, 1.0, 1.0");
    }

    #[test]
    pub fn report_is_written() {
        let mut out = Vec::new();
        report()
            .write_report(&mut out, "dev", &Pprint::default())
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("="));
        assert!(text.contains(" PREDICTION RESULTS FOR DEV "));
        assert!(text.contains("Lemmatization errors by tags\nadj\tnoun\t1\n"));
    }

    #[test]
    pub fn export_json() {
        let mut out = Vec::new();
        report().export(&mut out, "1234").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"job_name\": \"1234\""));
        assert!(text.contains("\"tag_errors\""));
    }

    #[test]
    pub fn rates_are_rounded() {
        assert_eq!(format_rate(2. / 3.), "0.66667");
        assert_eq!(format_rate(1.), "1.0");
        assert_eq!(format_rate(0.), "0");
    }

    #[test]
    pub fn titles_are_centered() {
        let pprint = Pprint {
            title_length: 10,
            title_ch: '=',
        };
        assert_eq!(center(" AB ", &pprint), "=== AB ===");
        assert_eq!(center(" ABC ", &pprint), "== ABC ===");
        assert_eq!(center("ABCDEFGHIJKL", &pprint), "ABCDEFGHIJKL");
    }

    #[test]
    pub fn job_names() {
        assert_eq!(job_name("models/x/data/dev_prediction.131784"), "131784");
        assert_eq!(job_name("predictions/bg-dev-pred.txt"), "dev");
    }
}
