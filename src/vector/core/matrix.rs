//! Condensed pairwise distance matrix.

use rayon::prelude::*;

use crate::error::Result;
use crate::vector::core::distance::DistanceMetric;
use crate::vector::core::vector::Vector;

/// Below this many points the matrix is filled on the calling thread.
const PARALLEL_THRESHOLD: usize = 64;

/// Upper-triangular pairwise distances between `n` points, stored row by row
/// without the diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Compute all pairwise distances between `vectors` under `metric`.
    pub fn compute(vectors: &[Vector], metric: DistanceMetric) -> Result<Self> {
        let n = vectors.len();

        let row = |i: usize| -> Result<Vec<f64>> {
            let rest: Vec<&[f32]> = vectors[i + 1..].iter().map(|v| v.data.as_slice()).collect();
            metric.batch_distance_parallel(&vectors[i].data, &rest)
        };

        let rows: Vec<Vec<f64>> = if n < PARALLEL_THRESHOLD {
            (0..n).map(row).collect::<Result<_>>()?
        } else {
            (0..n).into_par_iter().map(row).collect::<Result<_>>()?
        };

        let data = rows.into_iter().flatten().collect();
        Ok(Self { n, data })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    fn index(&self, i: usize, j: usize) -> usize {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        // Rows before i hold (n-1) + (n-2) + ... + (n-i) entries.
        i * self.n - i * (i + 1) / 2 + (j - i - 1)
    }

    /// Distance between points `i` and `j`. The diagonal is zero.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            0.0
        } else {
            self.data[self.index(i, j)]
        }
    }

    /// Overwrite the distance between `i` and `j` (`i != j`).
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        debug_assert!(i != j, "the diagonal is implicit");
        let index = self.index(i, j);
        self.data[index] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condensed_layout() {
        let vectors: Vec<Vector> = vec![
            Vector::new(vec![0.0, 0.0]),
            Vector::new(vec![3.0, 4.0]),
            Vector::new(vec![6.0, 8.0]),
            Vector::new(vec![0.0, 1.0]),
        ];

        let matrix = DistanceMatrix::compute(&vectors, DistanceMetric::Euclidean).unwrap();

        assert_eq!(matrix.len(), 4);
        assert_eq!(matrix.get(0, 1), 5.0);
        assert_eq!(matrix.get(1, 0), 5.0);
        assert_eq!(matrix.get(0, 2), 10.0);
        assert_eq!(matrix.get(1, 2), 5.0);
        assert_eq!(matrix.get(0, 3), 1.0);
        assert_eq!(matrix.get(2, 2), 0.0);
    }

    #[test]
    fn test_set_is_symmetric() {
        let vectors: Vec<Vector> = (0..3).map(|i| Vector::new(vec![i as f32])).collect();
        let mut matrix = DistanceMatrix::compute(&vectors, DistanceMetric::Manhattan).unwrap();

        matrix.set(2, 0, 42.0);
        assert_eq!(matrix.get(0, 2), 42.0);
        assert_eq!(matrix.get(2, 0), 42.0);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let vectors: Vec<Vector> = (0..100)
            .map(|i| Vector::new(vec![(i as f32 * 0.1).sin(), (i as f32 * 0.1).cos()]))
            .collect();

        let parallel = DistanceMatrix::compute(&vectors, DistanceMetric::Cosine).unwrap();
        let sequential =
            DistanceMatrix::compute(&vectors[..50], DistanceMetric::Cosine).unwrap();

        for i in 0..50 {
            for j in 0..50 {
                assert_eq!(parallel.get(i, j), sequential.get(i, j));
            }
        }
    }

    #[test]
    fn test_long_rows_match_pairwise_distance() {
        // Early rows are longer than the batch cutoff and run in parallel.
        let vectors: Vec<Vector> = (0..130)
            .map(|i| Vector::new(vec![(i as f32 * 0.3).sin(), (i as f32 * 0.7).cos(), 0.5]))
            .collect();

        let matrix = DistanceMatrix::compute(&vectors, DistanceMetric::Cosine).unwrap();

        for (i, j) in [(0, 1), (0, 129), (3, 104), (28, 129), (127, 128)] {
            let expected = DistanceMetric::Cosine
                .distance(&vectors[i].data, &vectors[j].data)
                .unwrap();
            assert_eq!(matrix.get(i, j), expected);
        }
    }

    #[test]
    fn test_empty_and_single() {
        let empty = DistanceMatrix::compute(&[], DistanceMetric::Cosine).unwrap();
        assert!(empty.is_empty());

        let single =
            DistanceMatrix::compute(&[Vector::new(vec![1.0])], DistanceMetric::Cosine).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single.get(0, 0), 0.0);
    }
}
