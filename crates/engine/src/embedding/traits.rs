use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embedding API error: {0}")]
    Api(String),

    #[error("expected {expected}-dimensional vectors, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("unknown embedding provider: {0}")]
    UnknownProvider(String),

    #[error("missing credentials for embedding provider: {0}")]
    MissingCredentials(String),
}

/// The embedding collaborator seam. The chunker issues one batched call
/// per text element (all of that element's sentences at once); any error
/// makes the caller fall back to fixed-size splitting.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, returning one vector per input, in order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// The dimensionality of the output vectors.
    fn dimensions(&self) -> usize;
}
