use std::fmt;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::transform::Truncation;

/// Option tables for the transformation and scoring tools.
///
/// Every table and key falls back to its default, so a config file only has
/// to list the options it changes.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub dataset: Dataset,
    pub transform: TransformConfig,
    pub pprint: Pprint,
}

impl Config {
    /// Reads and validates a config in toml format.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = read_to_string(path)?;
        data.parse()
    }

    pub fn validate(&self) -> Result<()> {
        self.transform.validate()?;
        if self.pprint.title_length == 0 {
            return Err(Error::invalid_option("title_length", 0));
        }
        Ok(())
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

/// Location of the dataset partitions.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Dataset {
    pub root: PathBuf,
    pub folder: String,
}

impl Dataset {
    pub fn training_path(&self) -> PathBuf {
        self.root.join(&self.folder).join("training.txt")
    }

    pub fn ground_path(&self) -> PathBuf {
        self.root.join(&self.folder).join("dev.txt")
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Dataset {
            root: PathBuf::from("data/datasets"),
            folder: "MorphoData-NewSplit".to_owned(),
        }
    }
}

/// Banner layout of the scoring report.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Pprint {
    pub title_length: usize,
    pub title_ch: char,
}

impl Default for Pprint {
    fn default() -> Self {
        Pprint {
            title_length: 80,
            title_ch: '=',
        }
    }
}

/// Granularity of the context units surrounding a word.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContextUnitKind {
    Char,
    Bpe,
    Word,
}

impl fmt::Display for ContextUnitKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ContextUnitKind::Char => "char",
            ContextUnitKind::Bpe => "bpe",
            ContextUnitKind::Word => "word",
        };
        f.write_str(name)
    }
}

impl FromStr for ContextUnitKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "char" => Ok(ContextUnitKind::Char),
            "bpe" => Ok(ContextUnitKind::Bpe),
            "word" => Ok(ContextUnitKind::Word),
            other => Err(Error::invalid_option("context_unit", other)),
        }
    }
}

/// Granularity of the focus word and its lemma.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WordUnitKind {
    Char,
    Word,
}

impl FromStr for WordUnitKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "char" => Ok(WordUnitKind::Char),
            "word" => Ok(WordUnitKind::Word),
            other => Err(Error::invalid_option("word_unit", other)),
        }
    }
}

/// Parameters of the context-window transformation.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TransformConfig {
    pub context_unit: ContextUnitKind,
    pub word_unit: WordUnitKind,
    pub char_n_gram: usize,
    /// Context size in units, 0 means the full span.
    pub context_size: usize,
    /// Context size in characters, takes precedence over `context_size`.
    pub context_char_size: Option<usize>,
    /// Number of neighbouring sentences on each side that provide context.
    pub context_span: usize,
    pub left_context_boundary: String,
    pub right_context_boundary: String,
    pub word_boundary: String,
    /// Example boundary tag without angle brackets.
    pub example_boundary_tag: String,
    pub subword_separator: String,
}

impl TransformConfig {
    pub fn truncation(&self) -> Truncation {
        match self.context_char_size {
            Some(0) => Truncation::Unbounded,
            Some(chars) => Truncation::Chars(chars),
            None if self.context_size == 0 => Truncation::Unbounded,
            None => Truncation::Units(self.context_size),
        }
    }

    pub fn open_tag(&self) -> String {
        format!("<{}>", self.example_boundary_tag)
    }

    pub fn close_tag(&self) -> String {
        format!("</{}>", self.example_boundary_tag)
    }

    pub fn validate(&self) -> Result<()> {
        if self.char_n_gram == 0 {
            return Err(Error::invalid_option("char_n_gram", self.char_n_gram));
        }
        if self.subword_separator.trim().is_empty() {
            return Err(Error::invalid_option(
                "subword_separator",
                &self.subword_separator,
            ));
        }
        if self.example_boundary_tag.is_empty() {
            return Err(Error::invalid_option("example_boundary_tag", ""));
        }
        Ok(())
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        TransformConfig {
            context_unit: ContextUnitKind::Char,
            word_unit: WordUnitKind::Char,
            char_n_gram: 1,
            context_size: 20,
            context_char_size: None,
            context_span: 0,
            left_context_boundary: "<lc>".to_owned(),
            right_context_boundary: "<rc>".to_owned(),
            word_boundary: "<wb>".to_owned(),
            example_boundary_tag: "w".to_owned(),
            subword_separator: "@@".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ContextUnitKind, Dataset, Pprint, TransformConfig, WordUnitKind};
    use crate::transform::Truncation;
    use std::path::PathBuf;

    #[test]
    pub fn test_config() {
        let target = Config {
            dataset: Dataset {
                root: PathBuf::from("data/datasets"),
                folder: "UD_Bulgarian-BTB".to_string(),
            },
            transform: TransformConfig {
                context_unit: ContextUnitKind::Bpe,
                word_unit: WordUnitKind::Word,
                char_n_gram: 3,
                context_size: 10,
                context_char_size: Some(40),
                context_span: 1,
                left_context_boundary: "<LC>".to_string(),
                right_context_boundary: "<RC>".to_string(),
                word_boundary: "<WB>".to_string(),
                example_boundary_tag: "ex".to_string(),
                subword_separator: "##".to_string(),
            },
            pprint: Pprint {
                title_length: 60,
                title_ch: '*',
            },
        };
        let config = Config::read("testdata/config.toml").unwrap();
        assert_eq!(target, config);
    }

    #[test]
    pub fn missing_keys_fall_back_to_defaults() {
        let config: Config = "[transform]\ncontext_unit = \"word\"\n".parse().unwrap();
        assert_eq!(config.transform.context_unit, ContextUnitKind::Word);
        assert_eq!(config.transform.word_unit, WordUnitKind::Char);
        assert_eq!(config.transform.subword_separator, "@@");
        assert_eq!(config.pprint, Pprint::default());
        assert_eq!(config.dataset, Dataset::default());
    }

    #[test]
    pub fn zero_n_gram_is_rejected() {
        assert!("[transform]\nchar_n_gram = 0\n".parse::<Config>().is_err());
    }

    #[test]
    pub fn unknown_context_unit_is_rejected() {
        assert!("[transform]\ncontext_unit = \"morph\"\n"
            .parse::<Config>()
            .is_err());
        assert!("morph".parse::<ContextUnitKind>().is_err());
        assert_eq!("bpe".parse::<ContextUnitKind>().unwrap(), ContextUnitKind::Bpe);
    }

    #[test]
    pub fn truncation_follows_precedence() {
        let mut config = TransformConfig::default();
        assert_eq!(config.truncation(), Truncation::Units(20));
        config.context_size = 0;
        assert_eq!(config.truncation(), Truncation::Unbounded);
        config.context_char_size = Some(15);
        assert_eq!(config.truncation(), Truncation::Chars(15));
        config.context_char_size = Some(0);
        assert_eq!(config.truncation(), Truncation::Unbounded);
    }

    #[test]
    pub fn dataset_partitions() {
        let dataset = Dataset::default();
        assert_eq!(
            dataset.training_path(),
            PathBuf::from("data/datasets/MorphoData-NewSplit/training.txt")
        );
        assert_eq!(
            dataset.ground_path(),
            PathBuf::from("data/datasets/MorphoData-NewSplit/dev.txt")
        );
    }
}
