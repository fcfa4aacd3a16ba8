use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::traits::{Embedder, EmbeddingError};
use super::{http_client, read_api_error, validate_dimensions};

/// OpenAI-compatible embedding backend.
pub struct OpenAiEmbedder {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl OpenAiEmbedder {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: Option<String>,
        dimensions: usize,
    ) -> Self {
        let base = base_url.unwrap_or_else(|| "https://api.openai.com".to_string());
        Self {
            client: http_client(),
            endpoint: format!("{}/v1/embeddings", base.trim_end_matches('/')),
            api_key: api_key.into(),
            model: model.into(),
            dimensions,
        }
    }

    /// Whether the configured dimensionality can be requested from the
    /// API instead of only being checked on the response. Older models
    /// reject the parameter.
    fn requested_dimensions(&self) -> Option<usize> {
        supports_dimension_param(&self.model).then_some(self.dimensions)
    }
}

fn supports_dimension_param(model: &str) -> bool {
    model.starts_with("text-embedding-3")
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedItem>,
}

#[derive(Deserialize)]
struct EmbedItem {
    embedding: Vec<f32>,
    index: usize,
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&EmbedRequest {
                model: &self.model,
                input: texts.to_vec(),
                dimensions: self.requested_dimensions(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(read_api_error(response).await);
        }

        let mut parsed: EmbedResponse = response.json().await?;

        // Items may arrive out of order.
        parsed.data.sort_unstable_by_key(|item| item.index);
        let embeddings: Vec<Vec<f32>> = parsed.data.into_iter().map(|item| item.embedding).collect();
        validate_dimensions(&embeddings, self.dimensions)?;

        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
