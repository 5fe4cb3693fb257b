use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::util::{ContextUnitKind, TransformConfig};

/// Writes source and target lines to two aligned outputs.
///
/// Lines are written sentence-wise and flushed after every sentence.
pub struct ExampleWriter<W>
where
    W: Write,
{
    source: W,
    target: W,
    lines: usize,
}

impl<W> ExampleWriter<W>
where
    W: Write,
{
    pub fn new(source: W, target: W) -> Self {
        ExampleWriter {
            source,
            target,
            lines: 0,
        }
    }

    /// Writes the lines of one sentence.
    pub fn write_lines(&mut self, source_lines: &[String], target_lines: &[String]) -> Result<()> {
        assert_eq!(
            source_lines.len(),
            target_lines.len(),
            "source and target lines are not aligned"
        );

        for (source, target) in source_lines.iter().zip(target_lines) {
            writeln!(self.source, "{}", source)?;
            writeln!(self.target, "{}", target)?;
        }
        self.source.flush()?;
        self.target.flush()?;
        self.lines += source_lines.len();

        Ok(())
    }

    /// Number of lines written to each output.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flushes both outputs and returns them.
    pub fn finish(mut self) -> Result<(W, W)> {
        self.source.flush()?;
        self.target.flush()?;
        Ok((self.source, self.target))
    }
}

impl ExampleWriter<BufWriter<File>> {
    /// Creates both output files, including missing parent directories.
    pub fn create(paths: &OutputPaths) -> Result<Self> {
        for path in &[&paths.source, &paths.target] {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(ExampleWriter::new(
            BufWriter::new(File::create(&paths.source)?),
            BufWriter::new(File::create(&paths.target)?),
        ))
    }
}

/// Locations of the source and target output files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl OutputPaths {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        OutputPaths {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Derives output paths from the input path.
    ///
    /// Outputs of `corpus/dev.txt` are written to
    /// `<output_dir>/corpus_<context size>_<context unit>[_<n>]/dev_source` and
    /// `.../dev_target`.
    pub fn infer<P, Q>(input: Option<P>, output_dir: Q, config: &TransformConfig) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let input = input.ok_or_else(|| {
            Error::AmbiguousOutput(
                "input is read from stdin, use --output to specify paths".to_owned(),
            )
        })?;
        let input = input.as_ref();

        let folder = input
            .parent()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str());
        let file_name = input.file_name().and_then(|name| name.to_str());

        let (folder, file_name) = match (folder, file_name) {
            (Some(folder), Some(file_name)) => (folder, file_name),
            _ => {
                return Err(Error::AmbiguousOutput(format!(
                    "'{}' has no parent directory, use --output to specify paths",
                    input.display()
                )))
            }
        };
        let stem = file_name.split('.').next().unwrap_or(file_name);

        let mut transform_folder = format!(
            "{}_{}_{}",
            folder, config.context_size, config.context_unit
        );
        if config.context_unit == ContextUnitKind::Char {
            transform_folder.push_str(&format!("_{}", config.char_n_gram));
        }

        let dir = output_dir.as_ref().join(transform_folder);
        Ok(OutputPaths {
            source: dir.join(format!("{}_source", stem)),
            target: dir.join(format!("{}_target", stem)),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{ExampleWriter, OutputPaths};
    use crate::error::Error;
    use crate::util::{ContextUnitKind, TransformConfig};

    #[test]
    pub fn writes_aligned_lines() {
        let mut writer = ExampleWriter::new(Vec::new(), Vec::new());
        writer
            .write_lines(
                &["<w> <lc> a <rc> </w>".to_string()],
                &["<w> a </w>".to_string()],
            )
            .unwrap();
        writer
            .write_lines(
                &["<w> <lc> b <rc> c </w>".to_string(), "<w> b <lc> c <rc> </w>".to_string()],
                &["<w> b </w>".to_string(), "<w> c </w>".to_string()],
            )
            .unwrap();
        assert_eq!(writer.lines(), 3);

        let (source, target) = writer.finish().unwrap();
        assert_eq!(
            String::from_utf8(source).unwrap(),
            "<w> <lc> a <rc> </w>\n<w> <lc> b <rc> c </w>\n<w> b <lc> c <rc> </w>\n"
        );
        assert_eq!(
            String::from_utf8(target).unwrap(),
            "<w> a </w>\n<w> b </w>\n<w> c </w>\n"
        );
    }

    #[test]
    pub fn infer_char_paths() {
        let config = TransformConfig {
            char_n_gram: 2,
            ..TransformConfig::default()
        };
        let paths = OutputPaths::infer(Some("data/datasets/btb/dev.txt"), "input", &config).unwrap();
        assert_eq!(
            paths,
            OutputPaths::new("input/btb_20_char_2/dev_source", "input/btb_20_char_2/dev_target")
        );
    }

    #[test]
    pub fn infer_word_paths() {
        let config = TransformConfig {
            context_unit: ContextUnitKind::Word,
            context_size: 5,
            ..TransformConfig::default()
        };
        let paths = OutputPaths::infer(Some("btb/train.v2.txt"), "out", &config).unwrap();
        assert_eq!(paths.source, PathBuf::from("out/btb_5_word/train_source"));
        assert_eq!(paths.target, PathBuf::from("out/btb_5_word/train_target"));
    }

    #[test]
    pub fn ambiguous_outputs() {
        let config = TransformConfig::default();
        match OutputPaths::infer(None::<&str>, "input", &config) {
            Err(Error::AmbiguousOutput(_)) => (),
            other => panic!("expected ambiguous output, got {:?}", other),
        }
        match OutputPaths::infer(Some("dev.txt"), "input", &config) {
            Err(Error::AmbiguousOutput(_)) => (),
            other => panic!("expected ambiguous output, got {:?}", other),
        }
    }
}
