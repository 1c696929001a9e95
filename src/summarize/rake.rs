//! RAKE (Rapid Automatic Keyword Extraction) summarizer.
//!
//! The sentence is split into candidate phrases at stopwords and punctuation.
//! Each word is scored by degree over frequency, where a word's degree is the
//! total length of the phrases it occurs in, and each phrase scores the sum of
//! its word scores. The label is the top-ranked phrases joined by a space.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::analysis::token_filter::stop::ENGLISH_STOP_WORDS_SET;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::{IntentifyError, Result};
use crate::summarize::summarizer::Summarizer;

/// Number of phrases joined into a label by default.
pub const DEFAULT_MAX_PHRASES: usize = 2;

/// A candidate phrase and its RAKE score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPhrase {
    pub phrase: String,
    pub score: f64,
}

/// Keyword-extraction summarizer.
///
/// # Examples
///
/// ```
/// use intentify::summarize::{RakeSummarizer, Summarizer};
///
/// let rake = RakeSummarizer::new().unwrap();
/// assert_eq!(
///     rake.summarize("Please cancel my order").unwrap(),
///     "please cancel order"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RakeSummarizer {
    tokenizer: RegexTokenizer,
    stop_words: Arc<HashSet<String>>,
    max_phrases: usize,
}

impl RakeSummarizer {
    /// English stopwords, two phrases per label.
    pub fn new() -> Result<Self> {
        Ok(RakeSummarizer {
            tokenizer: RegexTokenizer::word_punct()?,
            stop_words: Arc::new(ENGLISH_STOP_WORDS_SET.clone()),
            max_phrases: DEFAULT_MAX_PHRASES,
        })
    }

    /// Join at most `max_phrases` phrases into each label.
    pub fn with_max_phrases(mut self, max_phrases: usize) -> Result<Self> {
        if max_phrases == 0 {
            return Err(IntentifyError::invalid_argument(
                "max_phrases must be greater than zero",
            ));
        }
        self.max_phrases = max_phrases;
        Ok(self)
    }

    /// Use a custom stopword list (compared against lowercased words).
    pub fn with_stop_words(mut self, stop_words: HashSet<String>) -> Self {
        self.stop_words = Arc::new(stop_words);
        self
    }

    pub fn max_phrases(&self) -> usize {
        self.max_phrases
    }

    // A punctuation run of any length ends a phrase. rake_nltk only drops
    // single punctuation characters, so it would keep "!!!" inside a phrase.
    fn is_delimiter(&self, word: &str) -> bool {
        self.stop_words.contains(word) || !word.chars().any(|c| c.is_alphanumeric() || c == '_')
    }

    /// Split `text` into candidate phrases, lowercased, in order of
    /// appearance. Repeated phrases are kept.
    pub fn candidate_phrases(&self, text: &str) -> Result<Vec<Vec<String>>> {
        let mut phrases = Vec::new();
        let mut current: Vec<String> = Vec::new();

        for token in self.tokenizer.tokenize(text)? {
            let word = token.text.to_lowercase();
            if self.is_delimiter(&word) {
                if !current.is_empty() {
                    phrases.push(std::mem::take(&mut current));
                }
            } else {
                current.push(word);
            }
        }
        if !current.is_empty() {
            phrases.push(current);
        }

        Ok(phrases)
    }

    /// Score every candidate phrase, best first. Equal scores are ordered by
    /// phrase text, descending.
    pub fn ranked_phrases(&self, text: &str) -> Result<Vec<RankedPhrase>> {
        let phrases = self.candidate_phrases(text)?;

        let mut frequency: HashMap<&str, usize> = HashMap::new();
        let mut degree: HashMap<&str, usize> = HashMap::new();
        for phrase in &phrases {
            for word in phrase {
                *frequency.entry(word.as_str()).or_default() += 1;
                *degree.entry(word.as_str()).or_default() += phrase.len();
            }
        }

        let word_score = |word: &str| -> f64 {
            let freq = frequency.get(word).copied().unwrap_or(1);
            let deg = degree.get(word).copied().unwrap_or(0);
            deg as f64 / freq as f64
        };

        let mut ranked: Vec<RankedPhrase> = phrases
            .iter()
            .map(|words| RankedPhrase {
                phrase: words.join(" "),
                score: words.iter().map(|w| word_score(w)).sum(),
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.phrase.cmp(&a.phrase))
        });

        Ok(ranked)
    }
}

impl Summarizer for RakeSummarizer {
    fn summarize(&self, sentence: &str) -> Result<String> {
        let label = self
            .ranked_phrases(sentence)?
            .into_iter()
            .take(self.max_phrases)
            .map(|ranked| ranked.phrase)
            .collect::<Vec<_>>()
            .join(" ");

        Ok(label)
    }

    fn name(&self) -> &str {
        "rake"
    }
}
