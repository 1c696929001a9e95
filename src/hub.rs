//! Shared HuggingFace Hub helpers for the model-backed encoder and summarizer.

use hf_hub::api::sync::{Api, ApiBuilder};

use crate::error::{IntentifyError, Result};

/// Resolve the HuggingFace cache directory the same way the hub tooling does.
pub(crate) fn hf_cache_dir() -> String {
    std::env::var("HF_HOME")
        .or_else(|_| std::env::var("HOME").map(|home| format!("{home}/.cache/huggingface")))
        .unwrap_or_else(|_| "/tmp/huggingface".to_string())
}

/// Build a hub client rooted at [`hf_cache_dir`].
pub(crate) fn api() -> Result<Api> {
    ApiBuilder::new()
        .with_cache_dir(hf_cache_dir().into())
        .build()
        .map_err(|e| IntentifyError::model_unavailable(format!("hub initialization failed: {e}")))
}
