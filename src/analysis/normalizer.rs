//! Sentence normalization ahead of embedding.
//!
//! [`TextNormalizer`] lowercases each sentence, deletes punctuation, drops
//! stopwords and lemmatizes what is left, then rejoins the surviving tokens
//! with single spaces. Output is positionally aligned with the input: a
//! sentence made only of stopwords or punctuation normalizes to `""` and keeps
//! its slot, because later stages index embeddings by sentence position.

use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::token_filter::lemma::LemmaFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

/// Turns raw sentences into the normalized strings the encoder consumes.
#[derive(Clone, Debug)]
pub struct TextNormalizer {
    analyzer: PipelineAnalyzer,
}

impl TextNormalizer {
    /// Create a normalizer with the English pipeline:
    /// lowercase → strip punctuation → whitespace split → stopwords → lemma.
    pub fn new() -> Result<Self> {
        let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::whitespace()?))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::strip_punctuation()?))
            .add_filter(Arc::new(StopFilter::new()))
            .add_filter(Arc::new(LemmaFilter::new()))
            .with_name("english_normalizer");

        Ok(Self::with_analyzer(analyzer))
    }

    /// Create a normalizer around a custom analysis pipeline.
    pub fn with_analyzer(analyzer: PipelineAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Normalize a single sentence.
    pub fn normalize(&self, sentence: &str) -> Result<String> {
        let tokens: Vec<String> = self
            .analyzer
            .analyze(sentence)?
            .filter(|token| !token.is_stopped())
            .map(|token| token.text)
            .collect();

        Ok(tokens.join(" "))
    }

    /// Normalize every sentence, preserving order and length.
    pub fn normalize_all(&self, sentences: &[String]) -> Result<Vec<String>> {
        sentences
            .iter()
            .map(|sentence| self.normalize(sentence))
            .collect()
    }
}
