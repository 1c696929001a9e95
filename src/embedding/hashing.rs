//! Model-free sentence encoder based on feature hashing.
//!
//! Every word and every padded character trigram of a sentence is hashed into
//! one of `dimension` buckets; the bucket counts are L2-normalized. Sentences
//! sharing vocabulary (or word fragments) end up with a high cosine
//! similarity, which is all the clustering stage needs. The encoder is fully
//! deterministic within a build and needs no model download, which makes it
//! the default for offline use and for tests.

use std::hash::{BuildHasher, Hash, Hasher};

use ahash::RandomState;
use rayon::prelude::*;

use crate::embedding::encoder::SentenceEncoder;
use crate::error::{IntentifyError, Result};
use crate::vector::Vector;

/// Default number of hash buckets, matching the width of MiniLM embeddings.
pub const DEFAULT_DIMENSION: usize = 384;

const CHAR_NGRAM: usize = 3;

/// Words count more than fragments: a shared word should dominate a few
/// coincidentally shared trigrams.
const WORD_WEIGHT: f32 = 2.0;
const NGRAM_WEIGHT: f32 = 1.0;

/// Fixed seeds keep bucket assignment stable across processes.
const SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// Feature-hashing encoder.
#[derive(Debug, Clone)]
pub struct HashingEncoder {
    dimension: usize,
    hasher: RandomState,
}

impl HashingEncoder {
    /// Create an encoder with `dimension` buckets.
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(IntentifyError::invalid_argument(
                "hashing encoder dimension must be greater than zero",
            ));
        }

        Ok(Self {
            dimension,
            hasher: RandomState::with_seeds(SEEDS[0], SEEDS[1], SEEDS[2], SEEDS[3]),
        })
    }

    fn bucket<T: Hash + ?Sized>(&self, feature: &T) -> usize {
        let mut hasher = self.hasher.build_hasher();
        feature.hash(&mut hasher);
        (hasher.finish() % self.dimension as u64) as usize
    }

    fn encode_sentence(&self, sentence: &str) -> Vector {
        let mut vector = Vector::zeros(self.dimension);

        for word in sentence.split_whitespace() {
            vector.data[self.bucket(word)] += WORD_WEIGHT;

            let padded: Vec<char> = std::iter::once('<')
                .chain(word.chars())
                .chain(std::iter::once('>'))
                .collect();
            for gram in padded.windows(CHAR_NGRAM) {
                let gram: String = gram.iter().collect();
                vector.data[self.bucket(&gram)] += NGRAM_WEIGHT;
            }
        }

        // An empty sentence stays the zero vector.
        vector.normalize();
        vector
    }
}

impl Default for HashingEncoder {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            hasher: RandomState::with_seeds(SEEDS[0], SEEDS[1], SEEDS[2], SEEDS[3]),
        }
    }
}

impl SentenceEncoder for HashingEncoder {
    fn encode(&self, sentences: &[String]) -> Result<Vec<Vector>> {
        if sentences.len() < 100 {
            return Ok(sentences.iter().map(|s| self.encode_sentence(s)).collect());
        }

        Ok(sentences
            .par_iter()
            .map(|s| self.encode_sentence(s))
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "hashing"
    }
}
