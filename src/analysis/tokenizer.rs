//! Tokenizers split text into a stream of tokens.
//!
//! # Available Tokenizers
//!
//! - [`regex::RegexTokenizer`] - Extracts tokens matching a pattern. The
//!   whitespace variant feeds the normalizer; the word/punctuation variant
//!   keeps punctuation runs as their own tokens for phrase extraction.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    ///
    /// # Examples
    ///
    /// ```
    /// use intentify::analysis::tokenizer::Tokenizer;
    /// use intentify::analysis::tokenizer::regex::RegexTokenizer;
    ///
    /// let tokenizer = RegexTokenizer::whitespace().unwrap();
    /// let tokens: Vec<_> = tokenizer.tokenize("call  me\tback").unwrap().collect();
    /// assert_eq!(tokens.len(), 3);
    /// assert_eq!(tokens[2].text, "back");
    /// ```
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;
