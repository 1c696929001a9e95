//! Label generation for clusters.
//!
//! The orchestrator only depends on the [`Summarizer`] trait, so the labeling
//! policy is chosen when the pipeline is assembled:
//!
//! - [`RakeSummarizer`] (default) - top-ranked keyword phrases
//! - `t5::T5Summarizer` (feature `summarize-candle`) - a short abstractive
//!   phrase from a T5 model

pub mod rake;
pub mod summarizer;

#[cfg(feature = "summarize-candle")]
pub mod t5;

pub use rake::RakeSummarizer;
pub use summarizer::Summarizer;
