mod context;
pub use self::context::{trim_boundaries, ContextComputer, ContextUnit, Direction, Truncation};

mod transformer;
pub use self::transformer::{Example, Transformer};

mod writer;
pub use self::writer::{ExampleWriter, OutputPaths};

use std::io::Write;

use log::info;

use crate::corpus::Token;
use crate::error::Result;

/// Counts of a corpus transformation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransformStats {
    pub sentences: usize,
    pub examples: usize,
}

/// Transforms sentences in order and writes their examples.
///
/// With a context span of `n`, the `n` preceding and following sentences
/// provide additional context. `progress` is called after every sentence.
pub fn transform_sentences<W, F>(
    transformer: &Transformer,
    sentences: &[Vec<Token>],
    writer: &mut ExampleWriter<W>,
    mut progress: F,
) -> Result<TransformStats>
where
    W: Write,
    F: FnMut(&TransformStats),
{
    let span = transformer.config().context_span;
    let mut stats = TransformStats::default();

    for (idx, sentence) in sentences.iter().enumerate() {
        let left_context: Vec<Token> = sentences[idx.saturating_sub(span)..idx]
            .iter()
            .flatten()
            .cloned()
            .collect();
        let right_end = (idx + 1 + span).min(sentences.len());
        let right_context: Vec<Token> = sentences[idx + 1..right_end]
            .iter()
            .flatten()
            .cloned()
            .collect();

        let (source_lines, target_lines) =
            transformer.process_sentence(sentence, &left_context, &right_context);
        writer.write_lines(&source_lines, &target_lines)?;

        stats.sentences += 1;
        stats.examples += source_lines.len();
        progress(&stats);
    }

    info!(
        "Transformed {} sentences into {} examples.",
        stats.sentences, stats.examples
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::BufReader;

    use super::{transform_sentences, ExampleWriter, TransformStats, Transformer};
    use crate::corpus::{segment, ColumnLayout, ColumnReader, Token};
    use crate::util::{ContextUnitKind, TransformConfig, WordUnitKind};

    fn sample_sentences() -> Vec<Vec<Token>> {
        let reader = ColumnReader::new(
            BufReader::new(File::open("testdata/sample.txt").unwrap()),
            ColumnLayout::default(),
        );
        segment(reader).collect::<Result<_, _>>().unwrap()
    }

    fn transform(context_span: usize) -> (TransformStats, Vec<String>, Vec<String>) {
        let config = TransformConfig {
            context_unit: ContextUnitKind::Word,
            word_unit: WordUnitKind::Word,
            context_size: 0,
            context_span,
            ..TransformConfig::default()
        };
        let transformer = Transformer::new(config).unwrap();
        let mut writer = ExampleWriter::new(Vec::new(), Vec::new());
        let mut calls = 0;
        let stats =
            transform_sentences(&transformer, &sample_sentences(), &mut writer, |_| calls += 1)
                .unwrap();
        assert_eq!(calls, stats.sentences);

        let (source, target) = writer.finish().unwrap();
        let lines = |data: Vec<u8>| {
            String::from_utf8(data)
                .unwrap()
                .lines()
                .map(ToOwned::to_owned)
                .collect::<Vec<_>>()
        };
        (stats, lines(source), lines(target))
    }

    #[test]
    pub fn sentences_without_span() {
        let (stats, source, target) = transform(0);
        assert_eq!(
            stats,
            TransformStats {
                sentences: 3,
                examples: 9,
            }
        );
        assert_eq!(source.len(), 9);
        assert_eq!(target.len(), 9);
        assert_eq!(source[3], "<w> <lc> Котката <rc> спи </w>");
        assert_eq!(target[3], "<w> котка </w>");
    }

    #[test]
    pub fn sentences_with_span() {
        let (stats, source, _) = transform(1);
        assert_eq!(stats.examples, 9);
        assert_eq!(
            source[3],
            "<w> Кучето <wb> лае <wb> силно <lc> Котката <rc> спи <wb> Птиците <wb> пеят <wb> рано <wb> днес </w>"
        );
        assert_eq!(
            source[8],
            "<w> Котката <wb> спи <wb> Птиците <wb> пеят <wb> рано <lc> днес <rc> </w>"
        );
    }
}
