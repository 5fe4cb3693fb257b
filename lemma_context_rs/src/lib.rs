//! A library to prepare context-sensitive lemmatization data and to score
//! lemmatizer predictions.
//!
//! Example usage:
//!
//! ```
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! use lemma_context_rs::{segment, ColumnLayout, ColumnReader, Config, Transformer};
//!
//! // read the option tables
//! let config = Config::read("testdata/config.toml").unwrap();
//!
//! // the transformer is reused for all sentences
//! let transformer = Transformer::new(config.transform).unwrap();
//!
//! // group the rows of a tagged corpus into sentences
//! let input = BufReader::new(File::open("testdata/sample.txt").unwrap());
//! let reader = ColumnReader::new(input, ColumnLayout::default());
//!
//! for sentence in segment(reader) {
//!     let sentence = sentence.unwrap();
//!     let (source, target) = transformer.process_sentence(&sentence, &[], &[]);
//!     for (source, target) in source.iter().zip(&target) {
//!         println!("{}\t{}", source, target);
//!     }
//! }
//! ```

mod corpus;
pub use crate::corpus::{
    read_conllx, segment, CharNgrams, ColumnLayout, ColumnReader, Row, Sentences, TaggedToken,
    Token, PUNCT_TAG,
};

mod error;
pub use crate::error::{Error, Result};

mod score;
pub use crate::score::{
    job_name, ErrorPair, MatchRates, Proportions, ScoreReport, ScoredToken, Scorer,
};

mod transform;
pub use crate::transform::{
    transform_sentences, trim_boundaries, ContextComputer, ContextUnit, Direction, Example,
    ExampleWriter, OutputPaths, TransformStats, Transformer, Truncation,
};

mod util;
pub use crate::util::{Config, ContextUnitKind, Dataset, Pprint, TransformConfig, WordUnitKind};
