//! Intent classification: normalize, embed, cluster, pick representatives and
//! label each cluster.
//!
//! Each stage consumes the full output of the previous one:
//!
//! ```text
//! sentences → TextNormalizer → SentenceEncoder → AgglomerativeClustering
//!           → select_representatives → Summarizer → Intents
//! ```
//!
//! Sentences are grouped under their label in their original form. When two
//! clusters summarize to the same label, the cluster with the higher id
//! (whose first member appears later in the input) replaces the earlier
//! group in the result. The collision is logged, not merged.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::TextNormalizer;
use crate::cluster::{AgglomerativeClustering, ClusterAssignment, Granularity};
use crate::corpus::Corpus;
use crate::embedding::SentenceEncoder;
use crate::error::{IntentifyError, Result};
use crate::representative::{Representative, select_representatives};
use crate::summarize::Summarizer;

/// Label → original sentences of the cluster the label was generated for.
pub type Intents = BTreeMap<String, Vec<String>>;

/// One cluster of a run, before labels are folded into [`Intents`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentCluster {
    pub id: usize,
    pub label: String,
    pub representative: Representative,
    /// Indices of member sentences in the input.
    pub members: Vec<usize>,
}

/// Everything a run produced, for callers that need more than the labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub assignment: ClusterAssignment,
    pub clusters: Vec<IntentCluster>,
    pub intents: Intents,
}

/// Description of one classification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub granularity: Granularity,
    /// Corpus lines, duplicates included.
    pub lines: usize,
    /// Unique sentences that were classified.
    pub sentences: usize,
    /// Intents in the result.
    pub intents: usize,
}

/// A classification run together with its metadata; the unit that is cached
/// and reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentData {
    pub metadata: RunMetadata,
    pub intents: Intents,
}

impl IntentData {
    pub fn new(granularity: Granularity, corpus: &Corpus, intents: Intents) -> Self {
        IntentData {
            metadata: RunMetadata {
                granularity,
                lines: corpus.num_lines(),
                sentences: corpus.num_sentences(),
                intents: intents.len(),
            },
            intents,
        }
    }

    /// A run over an empty corpus.
    pub fn empty(granularity: Granularity) -> Self {
        Self::new(granularity, &Corpus::default(), Intents::new())
    }

    /// `(label, sentence count)` pairs, largest intent first; equal counts
    /// are ordered by label.
    pub fn intent_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = self
            .intents
            .iter()
            .map(|(label, sentences)| (label.as_str(), sentences.len()))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        counts
    }
}

/// The classification pipeline.
///
/// Models are loaded once by the caller and shared through `Arc`, so one
/// classifier can serve any number of sequential runs.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use intentify::classify::IntentClassifier;
/// use intentify::cluster::Granularity;
/// use intentify::embedding::HashingEncoder;
/// use intentify::summarize::RakeSummarizer;
///
/// let classifier = IntentClassifier::new(
///     Arc::new(HashingEncoder::default()),
///     Arc::new(RakeSummarizer::new().unwrap()),
/// )
/// .unwrap();
///
/// let intents = classifier.classify(&[], Granularity::DEFAULT).unwrap();
/// assert!(intents.is_empty());
/// ```
#[derive(Clone)]
pub struct IntentClassifier {
    normalizer: TextNormalizer,
    encoder: Arc<dyn SentenceEncoder>,
    clustering: AgglomerativeClustering,
    summarizer: Arc<dyn Summarizer>,
}

impl std::fmt::Debug for IntentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentClassifier")
            .field("normalizer", &self.normalizer)
            .field("encoder", &self.encoder.name())
            .field("clustering", &self.clustering)
            .field("summarizer", &self.summarizer.name())
            .finish()
    }
}

impl IntentClassifier {
    /// English normalization and cosine/average-linkage clustering around
    /// the given models.
    pub fn new(encoder: Arc<dyn SentenceEncoder>, summarizer: Arc<dyn Summarizer>) -> Result<Self> {
        Ok(IntentClassifier {
            normalizer: TextNormalizer::new()?,
            encoder,
            clustering: AgglomerativeClustering::new(),
            summarizer,
        })
    }

    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_clustering(mut self, clustering: AgglomerativeClustering) -> Self {
        self.clustering = clustering;
        self
    }

    /// Classify `sentences` into labeled intents.
    pub fn classify(&self, sentences: &[String], granularity: Granularity) -> Result<Intents> {
        Ok(self.classify_detailed(sentences, granularity)?.intents)
    }

    /// Classify `sentences`, also returning the cluster assignment and the
    /// per-cluster representatives and labels.
    pub fn classify_detailed(
        &self,
        sentences: &[String],
        granularity: Granularity,
    ) -> Result<Classification> {
        if sentences.is_empty() {
            return Ok(Classification {
                assignment: ClusterAssignment::from_labels(&[]),
                clusters: Vec::new(),
                intents: Intents::new(),
            });
        }

        let normalized = self.normalizer.normalize_all(sentences)?;
        log::debug!("Normalized {} sentences", normalized.len());

        let embeddings = self.encoder.encode(&normalized)?;
        if embeddings.len() != sentences.len() {
            return Err(IntentifyError::embedding(format!(
                "encoder {} returned {} vectors for {} sentences",
                self.encoder.name(),
                embeddings.len(),
                sentences.len()
            )));
        }
        log::debug!(
            "Encoded {} sentences with {} ({} dimensions)",
            embeddings.len(),
            self.encoder.name(),
            self.encoder.dimension()
        );

        let assignment = self.clustering.fit(&embeddings, granularity)?;
        let representatives = select_representatives(sentences, &embeddings, &assignment)?;

        let mut clusters = Vec::with_capacity(assignment.num_clusters());
        for (representative, members) in representatives.into_iter().zip(assignment.groups()) {
            let label = self.summarizer.summarize(&representative.sentence)?;
            clusters.push(IntentCluster {
                id: representative.cluster,
                label,
                representative,
                members,
            });
        }

        let intents = group_by_label(sentences, &clusters);
        log::info!(
            "Classified {} sentences into {} clusters and {} intents at granularity {granularity}",
            sentences.len(),
            assignment.num_clusters(),
            intents.len()
        );

        Ok(Classification {
            assignment,
            clusters,
            intents,
        })
    }
}

/// Fold clusters into label-keyed intents. Clusters are visited in id order
/// and a repeated label replaces the earlier group.
fn group_by_label(sentences: &[String], clusters: &[IntentCluster]) -> Intents {
    let mut intents = Intents::new();
    let mut owner: BTreeMap<&str, usize> = BTreeMap::new();

    for cluster in clusters {
        let group: Vec<String> = cluster
            .members
            .iter()
            .map(|&i| sentences[i].clone())
            .collect();

        if let Some(previous) = owner.insert(cluster.label.as_str(), cluster.id) {
            log::warn!(
                "Clusters {previous} and {} share the label {:?}; keeping cluster {}",
                cluster.id,
                cluster.label,
                cluster.id
            );
        }
        intents.insert(cluster.label.clone(), group);
    }

    intents
}
