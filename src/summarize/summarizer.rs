//! Summarizer trait: turns a representative sentence into an intent label.

use crate::error::Result;

/// Trait for producing a short label from a sentence.
///
/// An empty label is a valid, if degenerate, result; implementations return
/// `Ok(String::new())` rather than an error when they find nothing to say.
///
/// # Examples
///
/// ```
/// use intentify::error::Result;
/// use intentify::summarize::Summarizer;
///
/// struct FirstWord;
///
/// impl Summarizer for FirstWord {
///     fn summarize(&self, sentence: &str) -> Result<String> {
///         Ok(sentence.split_whitespace().next().unwrap_or_default().to_string())
///     }
///
///     fn name(&self) -> &str {
///         "first_word"
///     }
/// }
///
/// assert_eq!(FirstWord.summarize("refund please").unwrap(), "refund");
/// ```
pub trait Summarizer: Send + Sync {
    /// Summarize `sentence` into a label.
    fn summarize(&self, sentence: &str) -> Result<String>;

    /// Name of this summarizer (for logging and configuration).
    fn name(&self) -> &str;
}
