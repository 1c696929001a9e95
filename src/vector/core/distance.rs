//! Distance metrics for vector similarity calculation.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{IntentifyError, Result};

/// Distance metrics for vector comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Cosine distance (1 - cosine similarity)
    #[default]
    Cosine,
    /// Euclidean (L2) distance
    Euclidean,
    /// Manhattan (L1) distance
    Manhattan,
}

impl DistanceMetric {
    /// Calculate the distance between two vectors using this metric.
    pub fn distance(&self, a: &[f32], b: &[f32]) -> Result<f64> {
        if a.len() != b.len() {
            return Err(IntentifyError::invalid_argument(format!(
                "Vector dimensions must match for distance calculation ({} vs {})",
                a.len(),
                b.len()
            )));
        }

        let result = match self {
            DistanceMetric::Cosine => 1.0 - cosine_similarity(a, b),
            DistanceMetric::Euclidean => a
                .iter()
                .zip(b.iter())
                .map(|(&x, &y)| (x as f64 - y as f64).powi(2))
                .sum::<f64>()
                .sqrt(),
            DistanceMetric::Manhattan => a
                .iter()
                .zip(b.iter())
                .map(|(&x, &y)| (x as f64 - y as f64).abs())
                .sum(),
        };

        Ok(result)
    }

    /// Get the name of this distance metric.
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::Manhattan => "manhattan",
        }
    }

    /// Parse a distance metric from a string.
    pub fn parse_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "cosine" => Ok(DistanceMetric::Cosine),
            "euclidean" | "l2" => Ok(DistanceMetric::Euclidean),
            "manhattan" | "l1" => Ok(DistanceMetric::Manhattan),
            _ => Err(IntentifyError::invalid_argument(format!(
                "Unknown distance metric: {s}"
            ))),
        }
    }

    /// Calculate distance between a query vector and multiple vectors in parallel.
    pub fn batch_distance_parallel(&self, query: &[f32], vectors: &[&[f32]]) -> Result<Vec<f64>> {
        if vectors.is_empty() {
            return Ok(Vec::new());
        }

        if vectors.len() < 100 {
            return vectors
                .iter()
                .map(|v| self.distance(query, v))
                .collect::<Result<Vec<_>>>();
        }

        vectors
            .par_iter()
            .map(|v| self.distance(query, v))
            .collect::<Result<Vec<_>>>()
    }
}

/// Cosine similarity in `[-1, 1]`.
///
/// A zero vector has no direction; its similarity to anything is 0, so its
/// cosine distance to anything is 1.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_distance() {
        let metric = DistanceMetric::Cosine;
        let d = metric.distance(&[1.0, 0.0], &[1.0, 0.0]).unwrap();
        assert!(d.abs() < 1e-12);

        let d = metric.distance(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert_eq!(d, 1.0);

        let d = metric.distance(&[1.0, 0.0], &[-1.0, 0.0]).unwrap();
        assert_eq!(d, 2.0);
    }

    #[test]
    fn test_zero_vector_is_maximally_distant() {
        let metric = DistanceMetric::Cosine;
        assert_eq!(metric.distance(&[0.0, 0.0], &[1.0, 2.0]).unwrap(), 1.0);
        assert_eq!(metric.distance(&[0.0, 0.0], &[0.0, 0.0]).unwrap(), 1.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_euclidean_and_manhattan() {
        assert_eq!(
            DistanceMetric::Euclidean
                .distance(&[0.0, 0.0], &[3.0, 4.0])
                .unwrap(),
            5.0
        );
        assert_eq!(
            DistanceMetric::Manhattan
                .distance(&[0.0, 0.0], &[3.0, 4.0])
                .unwrap(),
            7.0
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        assert!(DistanceMetric::Cosine.distance(&[1.0], &[1.0, 0.0]).is_err());
    }

    #[test]
    fn test_parse_str() {
        assert_eq!(DistanceMetric::parse_str("COSINE").unwrap(), DistanceMetric::Cosine);
        assert_eq!(DistanceMetric::parse_str("l2").unwrap(), DistanceMetric::Euclidean);
        assert_eq!(DistanceMetric::parse_str("l1").unwrap(), DistanceMetric::Manhattan);
        assert!(DistanceMetric::parse_str("hamming").is_err());
    }

    #[test]
    fn test_batch_distance_parallel() {
        let query = [1.0f32, 0.0];
        let a = [1.0f32, 0.0];
        let b = [0.0f32, 1.0];
        let many: Vec<&[f32]> = (0..150).map(|i| if i % 2 == 0 { &a[..] } else { &b[..] }).collect();

        let distances = DistanceMetric::Cosine
            .batch_distance_parallel(&query, &many)
            .unwrap();

        assert_eq!(distances.len(), 150);
        assert!(distances[0].abs() < 1e-12);
        assert_eq!(distances[1], 1.0);
    }
}
