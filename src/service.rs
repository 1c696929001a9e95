//! The layer between a front end and the classifier: reads the corpus, serves
//! runs from the cache or computes them, and invalidates the cache when a new
//! corpus is uploaded.

use std::path::PathBuf;

use crate::cache::IntentCache;
use crate::classify::{IntentClassifier, IntentData};
use crate::cluster::Granularity;
use crate::config::Config;
use crate::corpus::{Corpus, install_corpus, read_corpus};
use crate::error::Result;

/// Cache-or-compute access to intent runs over one corpus file.
///
/// # Examples
///
/// ```
/// use intentify::cluster::Granularity;
/// use intentify::config::Config;
/// use intentify::service::IntentService;
///
/// let dir = tempfile::TempDir::new().unwrap();
/// let config = Config {
///     data_dir: dir.path().to_path_buf(),
///     cache_dir: dir.path().join("_cache"),
///     ..Config::default()
/// };
///
/// let service = IntentService::from_config(&config).unwrap();
/// service.upload(b"call me back\ncall me back\n").unwrap();
///
/// let data = service.intent_data(Granularity::DEFAULT).unwrap();
/// assert_eq!(data.metadata.lines, 2);
/// assert_eq!(data.metadata.sentences, 1);
/// assert_eq!(data.metadata.intents, 1);
/// ```
#[derive(Debug)]
pub struct IntentService {
    classifier: IntentClassifier,
    cache: IntentCache,
    data_file: PathBuf,
    default_granularity: Granularity,
}

impl IntentService {
    pub fn new(classifier: IntentClassifier, cache: IntentCache, data_file: PathBuf) -> Self {
        IntentService {
            classifier,
            cache,
            data_file,
            default_granularity: Granularity::DEFAULT,
        }
    }

    /// Build the classifier and open the cache described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        std::fs::create_dir_all(&config.data_dir)?;

        let classifier = config.build_classifier()?;
        let cache = IntentCache::open(&config.cache_dir)?;

        Ok(Self::new(classifier, cache, config.data_file())
            .with_default_granularity(config.default_granularity))
    }

    pub fn with_default_granularity(mut self, granularity: Granularity) -> Self {
        self.default_granularity = granularity;
        self
    }

    pub fn default_granularity(&self) -> Granularity {
        self.default_granularity
    }

    pub fn data_file(&self) -> &std::path::Path {
        &self.data_file
    }

    pub fn cache(&self) -> &IntentCache {
        &self.cache
    }

    /// Read the current corpus; an unreadable file is an empty corpus.
    pub fn corpus(&self) -> Corpus {
        read_corpus(Some(&self.data_file))
    }

    /// Classify the current corpus without touching the cache.
    pub fn compute(&self, granularity: Granularity) -> Result<IntentData> {
        let corpus = self.corpus();
        let intents = self.classifier.classify(&corpus.sentences, granularity)?;
        Ok(IntentData::new(granularity, &corpus, intents))
    }

    /// The run for `granularity`, from the cache when present.
    pub fn intent_data(&self, granularity: Granularity) -> Result<IntentData> {
        self.cache
            .get_or_compute(granularity, || self.compute(granularity))
    }

    /// Replace the corpus and drop every cached run.
    pub fn upload(&self, contents: &[u8]) -> Result<()> {
        install_corpus(&self.data_file, contents)?;
        self.cache.clear()
    }

    /// Drop every cached run.
    pub fn clear_cache(&self) -> Result<()> {
        self.cache.clear()
    }
}
