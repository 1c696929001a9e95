//! Sentence encoder trait for the classification pipeline.

use crate::error::{IntentifyError, Result};
use crate::vector::Vector;

/// Trait for converting normalized sentences to dense vectors.
///
/// Encoders are loaded once and shared across runs behind an `Arc`, so they
/// must be `Send + Sync` and must not mutate observable state between calls.
///
/// # Examples
///
/// ```
/// use intentify::embedding::SentenceEncoder;
/// use intentify::error::Result;
/// use intentify::vector::Vector;
///
/// struct LengthEncoder;
///
/// impl SentenceEncoder for LengthEncoder {
///     fn encode(&self, sentences: &[String]) -> Result<Vec<Vector>> {
///         Ok(sentences
///             .iter()
///             .map(|s| Vector::new(vec![s.len() as f32, 1.0]))
///             .collect())
///     }
///
///     fn dimension(&self) -> usize {
///         2
///     }
/// }
///
/// let vectors = LengthEncoder.encode(&["call back".to_string()]).unwrap();
/// assert_eq!(vectors[0].data, vec![9.0, 1.0]);
/// ```
pub trait SentenceEncoder: Send + Sync {
    /// Encode every sentence, returning exactly one vector per input in the
    /// same order.
    fn encode(&self, sentences: &[String]) -> Result<Vec<Vector>>;

    /// Encode a single sentence.
    fn encode_one(&self, sentence: &str) -> Result<Vector> {
        let mut vectors = self.encode(&[sentence.to_string()])?;
        vectors
            .pop()
            .ok_or_else(|| IntentifyError::embedding("encoder returned no vector"))
    }

    /// Dimension of the produced vectors.
    fn dimension(&self) -> usize;

    /// Name of this encoder (for logging and metadata).
    fn name(&self) -> &str {
        "unknown"
    }
}
