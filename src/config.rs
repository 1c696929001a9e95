//! Application configuration.
//!
//! [`Config`] is plain serde data with defaults for every field, so a config
//! file only needs to name what it changes:
//!
//! ```json
//! {
//!   "default_granularity": 30,
//!   "cluster": { "linkage": "complete" },
//!   "summarizer": { "max_phrases": 3 }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::classify::IntentClassifier;
use crate::cluster::{AgglomerativeClustering, Granularity, Linkage};
use crate::embedding::{HashingEncoder, SentenceEncoder};
use crate::error::{IntentifyError, Result};
use crate::summarize::{RakeSummarizer, Summarizer};
use crate::vector::DistanceMetric;

/// Clustering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClusterConfig {
    pub metric: DistanceMetric,
    pub linkage: Linkage,
}

/// Which sentence encoder to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EncoderKind {
    /// Feature hashing; no model download.
    #[default]
    Hashing,
    /// BERT sentence-transformer (feature `embeddings-candle`).
    Candle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub kind: EncoderKind,
    /// Bucket count of the hashing encoder.
    pub dimension: usize,
    /// HuggingFace model of the candle encoder.
    pub model: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            kind: EncoderKind::default(),
            dimension: crate::embedding::hashing::DEFAULT_DIMENSION,
            model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
        }
    }
}

/// Which summarizer labels clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SummarizerKind {
    /// Keyword phrases.
    #[default]
    Rake,
    /// Abstractive T5 (feature `summarize-candle`).
    T5,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub kind: SummarizerKind,
    /// Phrases per RAKE label.
    pub max_phrases: usize,
    /// HuggingFace model of the T5 summarizer.
    pub model: String,
    pub max_length: usize,
    pub min_length: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        SummarizerConfig {
            kind: SummarizerKind::default(),
            max_phrases: crate::summarize::rake::DEFAULT_MAX_PHRASES,
            model: "t5-small".to_string(),
            max_length: 10,
            min_length: 5,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Granularity used when a run does not ask for one.
    pub default_granularity: Granularity,
    /// Directory holding the corpus file.
    pub data_dir: PathBuf,
    /// Corpus file name inside `data_dir`.
    pub data_file_name: String,
    /// Directory holding cached runs.
    pub cache_dir: PathBuf,
    /// Draw the intent histogram with horizontal bars.
    pub histogram_horizontal: bool,
    pub cluster: ClusterConfig,
    pub encoder: EncoderConfig,
    pub summarizer: SummarizerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_granularity: Granularity::DEFAULT,
            data_dir: PathBuf::from("./data"),
            data_file_name: "contact_data.txt".to_string(),
            cache_dir: PathBuf::from("./data/_cache"),
            histogram_horizontal: true,
            cluster: ClusterConfig::default(),
            encoder: EncoderConfig::default(),
            summarizer: SummarizerConfig::default(),
        }
    }
}

impl Config {
    /// Load a JSON config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            IntentifyError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Config = serde_json::from_str(&text).map_err(|e| {
            IntentifyError::config(format!("cannot parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Full path of the corpus file.
    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(&self.data_file_name)
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_file_name.is_empty() {
            return Err(IntentifyError::config("data_file_name must not be empty"));
        }
        if self.encoder.dimension == 0 {
            return Err(IntentifyError::config(
                "encoder.dimension must be greater than zero",
            ));
        }
        if self.summarizer.max_phrases == 0 {
            return Err(IntentifyError::config(
                "summarizer.max_phrases must be greater than zero",
            ));
        }
        if self.summarizer.min_length > self.summarizer.max_length {
            return Err(IntentifyError::config(format!(
                "summarizer.min_length ({}) exceeds max_length ({})",
                self.summarizer.min_length, self.summarizer.max_length
            )));
        }
        Ok(())
    }

    /// Load the configured encoder.
    pub fn build_encoder(&self) -> Result<Arc<dyn SentenceEncoder>> {
        match self.encoder.kind {
            EncoderKind::Hashing => Ok(Arc::new(HashingEncoder::new(self.encoder.dimension)?)),
            #[cfg(feature = "embeddings-candle")]
            EncoderKind::Candle => Ok(Arc::new(
                crate::embedding::candle::CandleSentenceEncoder::new(&self.encoder.model)?,
            )),
            #[cfg(not(feature = "embeddings-candle"))]
            EncoderKind::Candle => Err(IntentifyError::model_unavailable(
                "the candle encoder requires the `embeddings-candle` feature",
            )),
        }
    }

    /// Load the configured summarizer.
    pub fn build_summarizer(&self) -> Result<Arc<dyn Summarizer>> {
        match self.summarizer.kind {
            SummarizerKind::Rake => Ok(Arc::new(
                RakeSummarizer::new()?.with_max_phrases(self.summarizer.max_phrases)?,
            )),
            #[cfg(feature = "summarize-candle")]
            SummarizerKind::T5 => Ok(Arc::new(crate::summarize::t5::T5Summarizer::new(
                &self.summarizer.model,
                self.summarizer.max_length,
                self.summarizer.min_length,
            )?)),
            #[cfg(not(feature = "summarize-candle"))]
            SummarizerKind::T5 => Err(IntentifyError::model_unavailable(
                "the T5 summarizer requires the `summarize-candle` feature",
            )),
        }
    }

    /// Assemble the classification pipeline, loading both models.
    pub fn build_classifier(&self) -> Result<IntentClassifier> {
        let clustering = AgglomerativeClustering::new()
            .with_metric(self.cluster.metric)
            .with_linkage(self.cluster.linkage);

        Ok(IntentClassifier::new(self.build_encoder()?, self.build_summarizer()?)?
            .with_clustering(clustering))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.default_granularity.value(), 16);
        assert_eq!(config.data_file(), PathBuf::from("./data/contact_data.txt"));
        assert_eq!(config.cache_dir, PathBuf::from("./data/_cache"));
        assert!(config.histogram_horizontal);
        assert_eq!(config.cluster.metric, DistanceMetric::Cosine);
        assert_eq!(config.cluster.linkage, Linkage::Average);
        assert_eq!(config.summarizer.max_phrases, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("intentify.json");
        std::fs::write(
            &path,
            r#"{"default_granularity": 30, "cluster": {"linkage": "complete"}}"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.default_granularity.value(), 30);
        assert_eq!(config.cluster.linkage, Linkage::Complete);
        assert_eq!(config.cluster.metric, DistanceMetric::Cosine);
        assert_eq!(config.data_file_name, "contact_data.txt");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");

        std::fs::write(&path, r#"{"default_granularity": 101}"#).unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(IntentifyError::Config(_))
        ));

        std::fs::write(&path, r#"{"summarizer": {"max_phrases": 0}}"#).unwrap();
        assert!(Config::from_file(&path).is_err());

        std::fs::write(&path, r#"{"summarizer": {"min_length": 20}}"#).unwrap();
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::from_file(&dir.path().join("absent.json")),
            Err(IntentifyError::Config(_))
        ));
    }

    #[test]
    fn test_build_default_classifier() {
        assert!(Config::default().build_classifier().is_ok());
    }

    #[cfg(not(feature = "summarize-candle"))]
    #[test]
    fn test_t5_without_feature_is_model_unavailable() {
        let mut config = Config::default();
        config.summarizer.kind = SummarizerKind::T5;
        assert!(matches!(
            config.build_summarizer(),
            Err(IntentifyError::ModelUnavailable(_))
        ));
    }
}
