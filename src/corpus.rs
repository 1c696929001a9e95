//! Sentence extraction from line-oriented corpus files.
//!
//! A corpus file holds one call or message per line. Reading never fails:
//! a missing or unreadable file is logged and yields an empty [`Corpus`], so
//! the rest of the pipeline degrades to "no intents".

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::Result;

/// Corpus location used when none is given.
pub const DEFAULT_CORPUS_PATH: &str = "data/contact_data.txt";

/// Lines of a corpus and the unique sentences among them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    /// Unique trimmed lines, in order of first occurrence.
    pub sentences: Vec<String>,
    /// Every trimmed line, duplicates included.
    pub lines: Vec<String>,
}

impl Corpus {
    /// Build a corpus from raw lines. Each line is trimmed; duplicates are
    /// removed by exact equality after trimming.
    ///
    /// # Examples
    ///
    /// ```
    /// use intentify::corpus::Corpus;
    ///
    /// let corpus = Corpus::from_lines(["call me back ", "refund", "call me back"]);
    /// assert_eq!(corpus.sentences, vec!["call me back", "refund"]);
    /// assert_eq!(corpus.num_lines(), 3);
    /// ```
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<String> = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_string())
            .collect();

        let sentences = {
            let mut seen = HashSet::with_capacity(lines.len());
            lines
                .iter()
                .filter(|line| seen.insert(line.as_str()))
                .cloned()
                .collect()
        };

        Corpus { sentences, lines }
    }

    /// Parse corpus text, one entry per line.
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn num_sentences(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Read the corpus at `path` (or [`DEFAULT_CORPUS_PATH`]).
///
/// Never fails: any read error is logged and produces an empty corpus.
pub fn read_corpus(path: Option<&Path>) -> Corpus {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CORPUS_PATH));

    match fs::read_to_string(path) {
        Ok(text) => {
            let corpus = Corpus::parse(&text);
            log::debug!(
                "Read {} lines ({} unique) from {}",
                corpus.num_lines(),
                corpus.num_sentences(),
                path.display()
            );
            corpus
        }
        Err(e) => {
            log::warn!("Cannot read corpus {}: {e}; using an empty corpus", path.display());
            Corpus::default()
        }
    }
}

/// Replace the corpus file at `path` with `contents`.
///
/// The file is written to a temporary sibling and renamed into place, so a
/// reader never observes a half-written corpus.
pub fn install_corpus(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(contents)?;
    temp_file.flush()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    log::info!("Installed corpus at {} ({} bytes)", path.display(), contents.len());
    Ok(())
}
