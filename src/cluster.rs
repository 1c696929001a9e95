//! Cluster engine: hierarchical agglomerative clustering of sentence
//! embeddings, sized automatically by a granularity-derived threshold.

pub mod agglomerative;
pub mod granularity;
pub mod linkage;

pub use agglomerative::{AgglomerativeClustering, ClusterAssignment, Merge};
pub use granularity::Granularity;
pub use linkage::Linkage;
