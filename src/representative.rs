//! Representative selection: one member sentence per cluster, the one whose
//! embedding lies closest to the cluster centroid.

use serde::{Deserialize, Serialize};

use crate::cluster::ClusterAssignment;
use crate::error::{IntentifyError, Result};
use crate::vector::Vector;
use crate::vector::core::distance::cosine_similarity;

/// The sentence chosen to stand for one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Representative {
    /// Cluster id the sentence represents.
    pub cluster: usize,
    /// Index of the sentence in the input list.
    pub index: usize,
    /// Sentence text, trimmed.
    pub sentence: String,
    /// Cosine similarity between the sentence embedding and the centroid.
    pub similarity: f64,
}

/// Pick a representative for every cluster of `assignment`.
///
/// `sentences`, `embeddings` and `assignment` must be index-aligned. The
/// result is ordered by cluster id. Ties on similarity go to the member
/// that appears first in the input.
///
/// # Examples
///
/// ```
/// use intentify::cluster::ClusterAssignment;
/// use intentify::representative::select_representatives;
/// use intentify::vector::Vector;
///
/// let sentences = vec!["a".to_string(), "b".to_string(), "c".to_string()];
/// let embeddings = vec![
///     Vector::new(vec![1.0, 0.0]),
///     Vector::new(vec![0.8, 0.6]),
///     Vector::new(vec![0.6, 0.8]),
/// ];
/// let assignment = ClusterAssignment::from_labels(&[0, 0, 0]);
///
/// let reps = select_representatives(&sentences, &embeddings, &assignment).unwrap();
/// assert_eq!(reps[0].sentence, "b");
/// ```
pub fn select_representatives(
    sentences: &[String],
    embeddings: &[Vector],
    assignment: &ClusterAssignment,
) -> Result<Vec<Representative>> {
    if sentences.len() != embeddings.len() || sentences.len() != assignment.len() {
        return Err(IntentifyError::invalid_argument(format!(
            "misaligned inputs: {} sentences, {} embeddings, {} assignments",
            sentences.len(),
            embeddings.len(),
            assignment.len()
        )));
    }

    assignment
        .groups()
        .into_iter()
        .enumerate()
        .map(|(cluster, members)| {
            let centroid = Vector::mean(members.iter().map(|&i| &embeddings[i]))?;

            let mut best: Option<(usize, f64)> = None;
            for &index in &members {
                let similarity = cosine_similarity(&centroid.data, &embeddings[index].data);
                if best.is_none_or(|(_, best_sim)| similarity > best_sim) {
                    best = Some((index, similarity));
                }
            }

            let (index, similarity) = best.ok_or_else(|| {
                IntentifyError::cluster(format!("cluster {cluster} has no members"))
            })?;

            Ok(Representative {
                cluster,
                index,
                sentence: sentences[index].trim().to_string(),
                similarity,
            })
        })
        .collect()
}
