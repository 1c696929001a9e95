//! Error types for the Intentify library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`IntentifyError`] enum. Missing input is never an error in this crate:
//! an absent corpus degrades to an empty result set. Errors are reserved for
//! broken contracts (misaligned embeddings, out-of-range granularity) and for
//! models that cannot be loaded.
//!
//! # Examples
//!
//! ```
//! use intentify::error::{IntentifyError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(IntentifyError::invalid_argument("granularity must be in 0..=100"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Intentify operations.
#[derive(Error, Debug)]
pub enum IntentifyError {
    /// I/O errors (corpus files, cache snapshots)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Text analysis errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Embedding errors
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Clustering errors
    #[error("Cluster error: {0}")]
    Cluster(String),

    /// Summarization errors
    #[error("Summarize error: {0}")]
    Summarize(String),

    /// Cache errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A model could not be loaded; the pipeline cannot run without it.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),
}

/// Result type alias for operations that may fail with IntentifyError.
pub type Result<T> = std::result::Result<T, IntentifyError>;

impl IntentifyError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        IntentifyError::Analysis(msg.into())
    }

    /// Create a new embedding error.
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        IntentifyError::Embedding(msg.into())
    }

    /// Create a new cluster error.
    pub fn cluster<S: Into<String>>(msg: S) -> Self {
        IntentifyError::Cluster(msg.into())
    }

    /// Create a new summarize error.
    pub fn summarize<S: Into<String>>(msg: S) -> Self {
        IntentifyError::Summarize(msg.into())
    }

    /// Create a new cache error.
    pub fn cache<S: Into<String>>(msg: S) -> Self {
        IntentifyError::Cache(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        IntentifyError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        IntentifyError::InvalidArgument(msg.into())
    }

    /// Create a new model unavailable error.
    pub fn model_unavailable<S: Into<String>>(msg: S) -> Self {
        IntentifyError::ModelUnavailable(msg.into())
    }
}
