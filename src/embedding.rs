//! Sentence embedding support for the classification pipeline.
//!
//! This module provides a trait-based interface for turning normalized
//! sentences into dense vectors. Clustering only relies on cosine distance
//! between the produced vectors being a useful proxy for semantic similarity.
//!
//! # Feature Flags
//!
//! - default: [`HashingEncoder`], a deterministic feature-hashing encoder
//!   that needs no model download
//! - `embeddings-candle` - [`candle::CandleSentenceEncoder`], a BERT
//!   sentence-transformer run locally through HuggingFace Candle
//!
//! Encoders are constructed once and passed to the pipeline by `Arc`, so one
//! loaded model serves every run in the process:
//!
//! ```
//! use std::sync::Arc;
//!
//! use intentify::embedding::{HashingEncoder, SentenceEncoder};
//!
//! let encoder: Arc<dyn SentenceEncoder> = Arc::new(HashingEncoder::default());
//! let vectors = encoder.encode(&["cancel order".to_string()]).unwrap();
//! assert_eq!(vectors.len(), 1);
//! ```

pub mod encoder;
pub mod hashing;

// Candle implementation (requires feature flag)
#[cfg(feature = "embeddings-candle")]
pub mod candle;

pub use encoder::SentenceEncoder;
pub use hashing::HashingEncoder;
