//! Embedding provider seam and concrete HTTP backends.

pub mod ollama;
pub mod openai;
pub mod traits;

use std::sync::Arc;
use std::time::Duration;

use paperseg_core::config::EmbeddingConfig;
use reqwest::{Client, Response};

pub use ollama::OllamaEmbedder;
pub use openai::OpenAiEmbedder;
pub use traits::{Embedder, EmbeddingError};

/// Request timeout covering one embedding batch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client shared by all backends.
pub(crate) fn http_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Turn a non-success response into an [`EmbeddingError::Api`] carrying
/// the status and response body.
pub(crate) async fn read_api_error(response: Response) -> EmbeddingError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    EmbeddingError::Api(format!("{status}: {body}"))
}

/// Reject batches whose vectors do not have the configured width.
pub(crate) fn validate_dimensions(
    embeddings: &[Vec<f32>],
    expected: usize,
) -> Result<(), EmbeddingError> {
    match embeddings.first() {
        Some(first) if first.len() != expected => Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: first.len(),
        }),
        _ => Ok(()),
    }
}

/// Build the configured embedding backend.
pub fn embedder_from_config(config: &EmbeddingConfig) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    match config.provider.as_str() {
        "ollama" => Ok(Arc::new(OllamaEmbedder::new(
            config.ollama_url.clone(),
            config.ollama_model.clone(),
            config.dimensions,
        ))),
        "openai" => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or_else(|| EmbeddingError::MissingCredentials("openai".to_string()))?;
            Ok(Arc::new(OpenAiEmbedder::new(
                api_key,
                config.openai_model.clone(),
                config.openai_base_url.clone(),
                config.dimensions,
            )))
        }
        other => Err(EmbeddingError::UnknownProvider(other.to_string())),
    }
}
