//! Linkage criteria for agglomerative clustering.

use serde::{Deserialize, Serialize};

use crate::error::{IntentifyError, Result};

/// How the distance between two clusters is derived from point distances.
///
/// Each variant is applied through the Lance-Williams update: after merging
/// clusters `i` and `j`, the distance from any other cluster `k` to the merged
/// cluster is computed from `d(k, i)`, `d(k, j)` and the cluster sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    /// Mean of all pairwise distances between the two clusters (UPGMA).
    #[default]
    Average,
    /// Minimum pairwise distance.
    Single,
    /// Maximum pairwise distance.
    Complete,
    /// Unweighted mean of the two merged clusters' distances (WPGMA).
    Weighted,
}

impl Linkage {
    /// Distance from cluster `k` to the union of clusters `i` and `j`.
    pub fn update(&self, d_ki: f64, d_kj: f64, size_i: usize, size_j: usize) -> f64 {
        match self {
            Linkage::Average => {
                let (n_i, n_j) = (size_i as f64, size_j as f64);
                (n_i * d_ki + n_j * d_kj) / (n_i + n_j)
            }
            Linkage::Single => d_ki.min(d_kj),
            Linkage::Complete => d_ki.max(d_kj),
            Linkage::Weighted => (d_ki + d_kj) / 2.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Linkage::Average => "average",
            Linkage::Single => "single",
            Linkage::Complete => "complete",
            Linkage::Weighted => "weighted",
        }
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "average" | "upgma" => Ok(Linkage::Average),
            "single" => Ok(Linkage::Single),
            "complete" => Ok(Linkage::Complete),
            "weighted" | "wpgma" => Ok(Linkage::Weighted),
            _ => Err(IntentifyError::invalid_argument(format!(
                "Unknown linkage '{s}'. Use: average, single, complete, weighted"
            ))),
        }
    }
}
