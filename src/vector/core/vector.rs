//! Core vector data structure.

use serde::{Deserialize, Serialize};

use crate::error::{IntentifyError, Result};

/// A dense embedding vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub data: Vec<f32>,
}

impl Vector {
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    pub fn zeros(dimension: usize) -> Self {
        Self {
            data: vec![0.0; dimension],
        }
    }

    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    pub fn norm(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|x| *x == 0.0)
    }

    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for value in &mut self.data {
                *value /= norm;
            }
        }
    }

    pub fn normalized(&self) -> Self {
        let mut normalized = self.clone();
        normalized.normalize();
        normalized
    }

    pub fn validate_dimension(&self, expected_dim: usize) -> Result<()> {
        if self.data.len() != expected_dim {
            return Err(IntentifyError::invalid_argument(format!(
                "Vector dimension mismatch: expected {}, got {}",
                expected_dim,
                self.data.len()
            )));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    /// Arithmetic mean of a non-empty set of equally sized vectors.
    pub fn mean<'a, I>(vectors: I) -> Result<Vector>
    where
        I: IntoIterator<Item = &'a Vector>,
    {
        let mut iter = vectors.into_iter();
        let first = iter
            .next()
            .ok_or_else(|| IntentifyError::invalid_argument("Cannot average zero vectors"))?;

        let mut sum: Vec<f64> = first.data.iter().map(|&x| x as f64).collect();
        let mut count = 1usize;
        for vector in iter {
            vector.validate_dimension(sum.len())?;
            for (acc, &x) in sum.iter_mut().zip(vector.data.iter()) {
                *acc += x as f64;
            }
            count += 1;
        }

        Ok(Vector::new(
            sum.into_iter().map(|x| (x / count as f64) as f32).collect(),
        ))
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Vector::new(data)
    }
}
