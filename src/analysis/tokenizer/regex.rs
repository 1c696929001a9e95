//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{IntentifyError, Result};

/// Words and runs of punctuation, each as separate tokens.
pub const WORD_PUNCT_PATTERN: &str = r"\w+|[^\w\s]+";

/// Maximal runs of non-whitespace.
pub const WHITESPACE_PATTERN: &str = r"\S+";

/// A regex-based tokenizer that extracts tokens using regular expressions.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with the default pattern.
    ///
    /// The default pattern `r"\w+"` matches sequences of word characters.
    pub fn new() -> Result<Self> {
        Self::with_pattern(r"\w+")
    }

    /// Create a tokenizer that keeps punctuation runs as tokens of their own.
    ///
    /// Phrase extraction uses punctuation tokens as phrase boundaries, so
    /// they must survive tokenization.
    pub fn word_punct() -> Result<Self> {
        Self::with_pattern(WORD_PUNCT_PATTERN)
    }

    /// Create a tokenizer that splits on whitespace and keeps everything else.
    pub fn whitespace() -> Result<Self> {
        Self::with_pattern(WHITESPACE_PATTERN)
    }

    /// Create a new regex tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| IntentifyError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = self
            .pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, m)| Token::new(m.as_str(), position))
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
