//! End-to-end behavior of the classification pipeline.

use std::collections::BTreeSet;
use std::sync::Arc;

use intentify::analysis::TextNormalizer;
use intentify::classify::{IntentClassifier, IntentData};
use intentify::cluster::Granularity;
use intentify::corpus::Corpus;
use intentify::embedding::{HashingEncoder, SentenceEncoder};
use intentify::error::Result;
use intentify::summarize::{RakeSummarizer, Summarizer};
use intentify::vector::Vector;

/// Encoder that maps a normalized sentence to the vector of the first
/// keyword it contains, or to the zero vector.
struct KeywordEncoder {
    table: Vec<(String, Vector)>,
    dimension: usize,
}

impl KeywordEncoder {
    fn new(entries: &[(&str, &[f32])]) -> Self {
        let dimension = entries.first().map(|(_, v)| v.len()).unwrap_or(0);
        let table = entries
            .iter()
            .map(|(key, values)| (key.to_string(), Vector::new(values.to_vec())))
            .collect();
        KeywordEncoder { table, dimension }
    }
}

impl SentenceEncoder for KeywordEncoder {
    fn encode(&self, sentences: &[String]) -> Result<Vec<Vector>> {
        Ok(sentences
            .iter()
            .map(|s| {
                self.table
                    .iter()
                    .find(|(key, _)| s.contains(key.as_str()))
                    .map(|(_, vector)| vector.clone())
                    .unwrap_or_else(|| Vector::zeros(self.dimension))
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

/// Summarizer that gives every sentence the same label.
struct ConstantSummarizer(&'static str);

impl Summarizer for ConstantSummarizer {
    fn summarize(&self, _sentence: &str) -> Result<String> {
        Ok(self.0.to_string())
    }

    fn name(&self) -> &str {
        "constant"
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn default_classifier() -> IntentClassifier {
    IntentClassifier::new(
        Arc::new(HashingEncoder::default()),
        Arc::new(RakeSummarizer::new().unwrap()),
    )
    .unwrap()
}

fn utterances() -> Vec<String> {
    strings(&[
        "I want a refund for my order",
        "Please refund my order",
        "Refund my last order please",
        "Can someone call me back",
        "Please call me back tomorrow",
        "My package never arrived",
        "Where is my package",
        "The package arrived damaged",
        "How do I reset my password",
        "I forgot my password",
        "Cancel my subscription",
        "I want to cancel my subscription today",
    ])
}

#[test]
fn empty_input_gives_no_intents() {
    let classifier = default_classifier();
    for g in [0, 1, 16, 50, 99, 100] {
        let intents = classifier.classify(&[], Granularity::new(g).unwrap()).unwrap();
        assert!(intents.is_empty(), "granularity {g}");
    }
}

#[test]
fn normalizer_output_is_aligned_with_input() {
    let normalizer = TextNormalizer::new().unwrap();
    let input = strings(&["Please call me back", "!!!", "", "the a an", "Refunds, please."]);

    let normalized = normalizer.normalize_all(&input).unwrap();

    assert_eq!(normalized.len(), input.len());
    assert_eq!(normalized[1], "");
    assert_eq!(normalized[2], "");
    assert_eq!(normalized[3], "");
    for (i, sentence) in input.iter().enumerate() {
        assert_eq!(normalized[i], normalizer.normalize(sentence).unwrap());
    }
}

#[test]
fn every_sentence_lands_in_exactly_one_cluster() {
    let sentences = utterances();
    for g in [0, 16, 40, 70, 100] {
        let run = default_classifier()
            .classify_detailed(&sentences, Granularity::new(g).unwrap())
            .unwrap();

        assert_eq!(run.assignment.len(), sentences.len());

        let mut seen = BTreeSet::new();
        for cluster in &run.clusters {
            for &member in &cluster.members {
                assert!(seen.insert(member), "index {member} in two clusters");
                assert_eq!(run.assignment.labels()[member], cluster.id);
            }
        }
        assert_eq!(seen, (0..sentences.len()).collect::<BTreeSet<_>>());
    }
}

#[test]
fn finer_granularity_never_gives_fewer_clusters() {
    let sentences = utterances();
    let classifier = default_classifier();

    let mut previous = 0;
    for g in (0..=100).step_by(5) {
        let run = classifier
            .classify_detailed(&sentences, Granularity::new(g).unwrap())
            .unwrap();
        let clusters = run.assignment.num_clusters();
        assert!(
            clusters >= previous,
            "granularity {g} gave {clusters} clusters, fewer than {previous}"
        );
        previous = clusters;
    }
    assert_eq!(previous, sentences.len());
}

#[test]
fn single_sentence_is_one_cluster_at_every_granularity() {
    let sentences = strings(&["Where is my package"]);
    let classifier = default_classifier();

    for g in 0..=100 {
        let run = classifier
            .classify_detailed(&sentences, Granularity::new(g).unwrap())
            .unwrap();
        assert_eq!(run.assignment.num_clusters(), 1);
        assert_eq!(run.clusters.len(), 1);
        assert_eq!(run.clusters[0].representative.sentence, "Where is my package");
        assert_eq!(run.intents.len(), 1);
    }
}

#[test]
fn representative_is_a_member_of_its_cluster() {
    let sentences = utterances();
    for g in [10, 30, 60] {
        let run = default_classifier()
            .classify_detailed(&sentences, Granularity::new(g).unwrap())
            .unwrap();

        for cluster in &run.clusters {
            let representative = &cluster.representative;
            assert_eq!(representative.cluster, cluster.id);
            assert!(cluster.members.contains(&representative.index));
            assert_eq!(representative.sentence, sentences[representative.index].trim());
        }
    }
}

#[test]
fn colliding_labels_keep_the_later_cluster() {
    // Orthogonal vectors sit at distance 1 and never merge.
    let encoder = KeywordEncoder::new(&[("refund", &[1.0, 0.0]), ("call", &[0.0, 1.0])]);
    let classifier = IntentClassifier::new(
        Arc::new(encoder),
        Arc::new(ConstantSummarizer("help")),
    )
    .unwrap();
    let sentences = strings(&["Refund my order", "Refund my order please", "Call me back"]);

    let run = classifier
        .classify_detailed(&sentences, Granularity::new(50).unwrap())
        .unwrap();

    assert_eq!(run.clusters.len(), 2);
    assert_eq!(run.intents.len(), 1);
    assert_eq!(run.intents["help"], strings(&["Call me back"]));
}

#[test]
fn scenario_identical_lines() {
    let corpus = Corpus::from_lines(["call me back"; 5]);
    let g = Granularity::DEFAULT;

    let intents = default_classifier().classify(&corpus.sentences, g).unwrap();
    let data = IntentData::new(g, &corpus, intents);

    assert_eq!(corpus.sentences, strings(&["call me back"]));
    assert_eq!(data.metadata.lines, 5);
    assert_eq!(data.metadata.sentences, 1);
    assert_eq!(data.metadata.intents, 1);
    assert_eq!(data.intents["call back"], strings(&["call me back"]));
}

#[test]
fn scenario_zero_granularity_threshold() {
    assert_eq!(Granularity::MIN.distance_threshold(), 1.0);
    assert_eq!(Granularity::MAX.distance_threshold(), 0.0);

    let encoder = KeywordEncoder::new(&[("hello", &[1.0, 0.0]), ("goodbye", &[0.6, 0.8])]);
    let classifier = IntentClassifier::new(
        Arc::new(encoder),
        Arc::new(RakeSummarizer::new().unwrap()),
    )
    .unwrap();
    let sentences = strings(&["hello there", "goodbye now"]);

    // Cosine distance 0.4 is below 1.0 but not below 0.0.
    let coarse = classifier.classify_detailed(&sentences, Granularity::MIN).unwrap();
    assert_eq!(coarse.assignment.num_clusters(), 1);

    let fine = classifier.classify_detailed(&sentences, Granularity::MAX).unwrap();
    assert_eq!(fine.assignment.num_clusters(), 2);
}

#[test]
fn scenario_punctuation_only_sentence() {
    let sentences = strings(&["!!!", "Where is my package", "Where is my package now"]);

    let run = default_classifier()
        .classify_detailed(&sentences, Granularity::DEFAULT)
        .unwrap();

    assert_eq!(run.assignment.len(), 3);
    let punctuation = run
        .clusters
        .iter()
        .find(|c| c.members.contains(&0))
        .unwrap();
    assert_eq!(punctuation.members, vec![0]);
    assert_eq!(punctuation.label, "");
    assert_eq!(run.intents[""], strings(&["!!!"]));
}
