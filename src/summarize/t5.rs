//! Abstractive summarizer backed by a T5 model run through HuggingFace
//! Candle. Requires the `summarize-candle` feature.

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::t5::{Config, T5ForConditionalGeneration};
use parking_lot::Mutex;
use tokenizers::Tokenizer;

use crate::error::{IntentifyError, Result};
use crate::hub;
use crate::summarize::summarizer::Summarizer;

pub const DEFAULT_MODEL: &str = "t5-small";
/// Upper bound on the decoded sequence, decoder start token included.
pub const DEFAULT_MAX_LENGTH: usize = 10;
/// EOS is suppressed until the decoded sequence reaches this length.
pub const DEFAULT_MIN_LENGTH: usize = 5;

const PROMPT_PREFIX: &str = "summarize: ";

fn tensor_err(e: candle_core::Error) -> IntentifyError {
    IntentifyError::summarize(e.to_string())
}

/// Greedy-decoding T5 summarizer.
///
/// The model keeps a key/value cache while decoding, so generation takes
/// `&mut` access; concurrent callers are serialized on an internal lock.
pub struct T5Summarizer {
    model: Mutex<T5ForConditionalGeneration>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    model_name: String,
    max_length: usize,
    min_length: usize,
}

impl std::fmt::Debug for T5Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("T5Summarizer")
            .field("model_name", &self.model_name)
            .field("max_length", &self.max_length)
            .field("min_length", &self.min_length)
            .finish()
    }
}

impl T5Summarizer {
    /// Load `model_name` from the HuggingFace Hub.
    pub fn new(model_name: &str, max_length: usize, min_length: usize) -> Result<Self> {
        if min_length > max_length || max_length < 2 {
            return Err(IntentifyError::invalid_argument(format!(
                "invalid generation lengths: min {min_length}, max {max_length}"
            )));
        }

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
        let model = T5ForConditionalGeneration::load(vb, &config)
            .map_err(|e| unavailable("model load", &e))?;

        let tokenizer_filename = repo
            .get("tokenizer.json")
            .map_err(|e| unavailable("tokenizer download", &e))?;
        let tokenizer = Tokenizer::from_file(tokenizer_filename)
            .map_err(|e| unavailable("tokenizer load", &e))?;

        log::info!("Loaded summarizer {model_name}");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            config,
            device,
            model_name: model_name.to_string(),
            max_length,
            min_length,
        })
    }

    /// Load the default `t5-small` model with default lengths.
    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_MODEL, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH)
    }

    fn generate(&self, input_ids: &[u32]) -> Result<Vec<u32>> {
        let eos = self.config.eos_token_id;
        let start = self
            .config
            .decoder_start_token_id
            .unwrap_or(self.config.pad_token_id) as u32;

        let mut model = self.model.lock();
        model.clear_kv_cache();

        let input = Tensor::new(input_ids, &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(tensor_err)?;
        let encoder_output = model.encode(&input).map_err(tensor_err)?;

        let mut output = vec![start];
        while output.len() < self.max_length {
            let step: &[u32] = if output.len() == 1 || !self.config.use_cache {
                &output
            } else {
                &output[output.len() - 1..]
            };
            let decoder_input = Tensor::new(step, &self.device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(tensor_err)?;

            let mut logits: Vec<f32> = model
                .decode(&decoder_input, &encoder_output)
                .and_then(|t| t.squeeze(0))
                .and_then(|t| t.to_dtype(DType::F32))
                .and_then(|t| t.to_vec1())
                .map_err(tensor_err)?;

            if output.len() < self.min_length {
                if let Some(score) = logits.get_mut(eos) {
                    *score = f32::NEG_INFINITY;
                }
            }

            let next = logits
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(id, _)| id)
                .ok_or_else(|| IntentifyError::summarize("model produced empty logits"))?;

            if next == eos {
                break;
            }
            output.push(next as u32);
        }

        model.clear_kv_cache();
        Ok(output.split_off(1))
    }
}

impl Summarizer for T5Summarizer {
    fn summarize(&self, sentence: &str) -> Result<String> {
        let prompt = format!("{PROMPT_PREFIX}{sentence}");
        let encoding = self
            .tokenizer
            .encode(prompt, true)
            .map_err(|e| IntentifyError::summarize(format!("Tokenization failed: {e}")))?;

        let generated = self.generate(encoding.get_ids())?;
        let text = self
            .tokenizer
            .decode(&generated, true)
            .map_err(|e| IntentifyError::summarize(format!("Detokenization failed: {e}")))?;

        Ok(text.trim().to_string())
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}
