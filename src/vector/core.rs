//! Core data structures for embeddings: the vector type, distance metrics
//! and the pairwise distance matrix used by clustering.

pub mod distance;
pub mod matrix;
pub mod vector;
