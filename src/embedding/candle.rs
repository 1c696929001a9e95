//! Candle-based sentence encoder.
//!
//! Runs a BERT sentence-transformer (by default
//! `sentence-transformers/all-MiniLM-L6-v2`) locally through HuggingFace
//! Candle. Requires the `embeddings-candle` feature.

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use tokenizers::Tokenizer;

use crate::embedding::encoder::SentenceEncoder;
use crate::error::{IntentifyError, Result};
use crate::hub;
use crate::vector::Vector;

/// Default sentence-transformer model.
pub const DEFAULT_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

fn tensor_err(e: candle_core::Error) -> IntentifyError {
    IntentifyError::embedding(e.to_string())
}

/// Sentence encoder backed by a BERT model from the HuggingFace Hub.
///
/// Loading downloads (or reuses cached) weights; any failure there is
/// reported as [`IntentifyError::ModelUnavailable`] because the pipeline
/// cannot produce meaningful clusters without the model.
///
/// # Examples
///
/// ```no_run
/// use intentify::embedding::SentenceEncoder;
/// use intentify::embedding::candle::CandleSentenceEncoder;
///
/// # fn example() -> intentify::error::Result<()> {
/// let encoder = CandleSentenceEncoder::new("sentence-transformers/all-MiniLM-L6-v2")?;
/// let vectors = encoder.encode(&["call back".to_string()])?;
/// assert_eq!(vectors[0].dimension(), encoder.dimension());
/// # Ok(())
/// # }
/// ```
pub struct CandleSentenceEncoder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dimension: usize,
    model_name: String,
}

impl std::fmt::Debug for CandleSentenceEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandleSentenceEncoder")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .finish()
    }
}

impl CandleSentenceEncoder {
    /// Load `model_name` from the HuggingFace Hub.
    pub fn new(model_name: &str) -> Result<Self> {
        let unavailable = |what: &str, e: &dyn std::fmt::Display| {
            IntentifyError::model_unavailable(format!("{model_name}: {what}: {e}"))
        };

        let device = Device::cuda_if_available(0).map_err(|e| unavailable("device setup", &e))?;

        let repo = hub::api()?.model(model_name.to_string());

        let config_filename = repo
            .get("config.json")
            .map_err(|e| unavailable("config download", &e))?;
        let config_str = std::fs::read_to_string(config_filename)
            .map_err(|e| unavailable("config read", &e))?;
        let config: Config =
            serde_json::from_str(&config_str).map_err(|e| unavailable("config parse", &e))?;

        let weights_filename = repo
            .get("model.safetensors")
            .map_err(|e| unavailable("weights download", &e))?;
        // SAFETY: the safetensors file is owned by the hub cache and is not
        // modified while mapped.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_filename], DType::F32, &device)
                .map_err(|e| unavailable("weights load", &e))?
        };

        let model = BertModel::load(vb, &config).map_err(|e| unavailable("model load", &e))?;

        let tokenizer_filename = repo
            .get("tokenizer.json")
            .map_err(|e| unavailable("tokenizer download", &e))?;
        let tokenizer = Tokenizer::from_file(tokenizer_filename)
            .map_err(|e| unavailable("tokenizer load", &e))?;

        log::info!(
            "Loaded sentence encoder {model_name} (dimension {})",
            config.hidden_size
        );

        Ok(Self {
            model,
            tokenizer,
            device,
            dimension: config.hidden_size,
            model_name: model_name.to_string(),
        })
    }

    /// Average token embeddings, ignoring padding through the attention mask.
    fn mean_pool(&self, embeddings: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let mask = attention_mask
            .unsqueeze(2)
            .and_then(|m| m.expand(embeddings.shape()))
            .and_then(|m| m.to_dtype(embeddings.dtype()))
            .map_err(tensor_err)?;

        let summed = embeddings.mul(&mask).and_then(|t| t.sum(1)).map_err(tensor_err)?;
        let counts = mask.sum(1).map_err(tensor_err)?;

        summed.div(&counts).map_err(tensor_err)
    }

    fn encode_sentence(&self, sentence: &str) -> Result<Vector> {
        let encoding = self
            .tokenizer
            .encode(sentence, true)
            .map_err(|e| IntentifyError::embedding(format!("Tokenization failed: {e}")))?;

        let token_ids = Tensor::new(encoding.get_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(tensor_err)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(tensor_err)?;

        let token_type_ids = token_ids.zeros_like().map_err(tensor_err)?;

        let embeddings = self
            .model
            .forward(&token_ids, &token_type_ids, Some(&attention_mask))
            .map_err(tensor_err)?;

        let pooled = self.mean_pool(&embeddings, &attention_mask)?;
        let data: Vec<f32> = pooled
            .squeeze(0)
            .and_then(|t| t.to_vec1())
            .map_err(tensor_err)?;

        let mut vector = Vector::new(data);
        vector.normalize();
        Ok(vector)
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl SentenceEncoder for CandleSentenceEncoder {
    fn encode(&self, sentences: &[String]) -> Result<Vec<Vector>> {
        sentences
            .iter()
            .map(|sentence| self.encode_sentence(sentence))
            .collect()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}
