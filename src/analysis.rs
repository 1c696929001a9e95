//! Text analysis module for Intentify.
//!
//! This module provides char filters, tokenizers and token filters, the
//! [`PipelineAnalyzer`] that chains them, and the [`TextNormalizer`] that
//! prepares sentences for embedding.

pub mod analyzer;
pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, PipelineAnalyzer};
pub use normalizer::TextNormalizer;
pub use token::{Token, TokenStream};
