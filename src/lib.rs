//! # Intentify
//!
//! Unsupervised intent discovery for call and message logs.
//!
//! A corpus of utterances is normalized, embedded, grouped by agglomerative
//! clustering and each group is labeled with a short summary of its most
//! central sentence. The result maps each label to the original sentences of
//! its group.
//!
//! ## Features
//!
//! - Granularity knob (0-100) that sets the clustering distance threshold
//! - Hashing sentence encoder with no model download, or BERT via candle
//! - RAKE keyword labels, or abstractive T5 labels via candle
//! - Granularity-keyed JSON cache of runs, invalidated on corpus upload
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use intentify::classify::IntentClassifier;
//! use intentify::cluster::Granularity;
//! use intentify::embedding::HashingEncoder;
//! use intentify::summarize::RakeSummarizer;
//!
//! let classifier = IntentClassifier::new(
//!     Arc::new(HashingEncoder::default()),
//!     Arc::new(RakeSummarizer::new().unwrap()),
//! )
//! .unwrap();
//!
//! let sentences = vec!["Please cancel my order".to_string()];
//! let intents = classifier.classify(&sentences, Granularity::DEFAULT).unwrap();
//! assert_eq!(intents["please cancel order"], sentences);
//! ```

pub mod analysis;
pub mod cache;
pub mod classify;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod representative;
pub mod service;
pub mod summarize;
pub mod vector;

#[cfg(any(feature = "embeddings-candle", feature = "summarize-candle"))]
mod hub;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
