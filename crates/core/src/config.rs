use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_usize(key: &str, default: usize) -> usize {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_f32(key: &str, default: f32) -> f32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub chunking: ChunkingConfig,
    pub context: ContextConfig,
    pub embedding: EmbeddingConfig,
}

impl EngineConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            chunking: ChunkingConfig::from_env(),
            context: ContextConfig::from_env(),
            embedding: EmbeddingConfig::from_env(),
        }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Engine config loaded:");
        tracing::info!(
            "  chunking:  size={}, overlap={}, threshold={}, min={}",
            self.chunking.chunk_size,
            self.chunking.chunk_overlap,
            self.chunking.semantic_threshold,
            self.chunking.min_chunk_size
        );
        tracing::info!(
            "  context:   max_distance={}, window={}",
            self.context.max_distance,
            self.context.context_window
        );
        tracing::info!(
            "  embedding: provider={}, dimensions={}",
            self.embedding.provider,
            self.embedding.dimensions
        );
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunking: ChunkingConfig::default(),
            context: ContextConfig::default(),
            embedding: EmbeddingConfig::default(),
        }
    }
}

// ── Chunking ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters.
    pub chunk_size: usize,
    /// Characters repeated between consecutive fallback chunks.
    pub chunk_overlap: usize,
    /// Minimum cosine similarity keeping adjacent sentences together.
    pub semantic_threshold: f32,
    /// Chunks shorter than this are not emitted.
    pub min_chunk_size: usize,
}

impl ChunkingConfig {
    fn from_env() -> Self {
        Self {
            chunk_size: env_usize("CHUNK_SIZE", 1000),
            chunk_overlap: env_usize("CHUNK_OVERLAP", 200),
            semantic_threshold: env_f32("SEMANTIC_THRESHOLD", 0.75),
            min_chunk_size: env_usize("MIN_CHUNK_SIZE", 100),
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            semantic_threshold: 0.75,
            min_chunk_size: 100,
        }
    }
}

// ── Context extraction ────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Maximum vertical distance (page coordinate units) for a text
    /// block to count as surrounding context.
    pub max_distance: f32,
    /// Characters of context considered around an element.
    pub context_window: usize,
}

impl ContextConfig {
    fn from_env() -> Self {
        Self {
            max_distance: env_f32("CONTEXT_MAX_DISTANCE", 200.0),
            context_window: env_usize("CONTEXT_WINDOW", 500),
        }
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_distance: 200.0,
            context_window: 500,
        }
    }
}

// ── Embedding provider ────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// "ollama" or "openai".
    pub provider: String,
    pub dimensions: usize,
    pub ollama_url: String,
    pub ollama_model: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
}

impl EmbeddingConfig {
    fn from_env() -> Self {
        Self {
            provider: env_or("EMBEDDING_PROVIDER", "ollama"),
            dimensions: env_usize("EMBEDDING_DIMENSIONS", 768),
            ollama_url: env_or("OLLAMA_URL", "http://localhost:11434"),
            ollama_model: env_or("OLLAMA_EMBEDDING_MODEL", "nomic-embed-text"),
            openai_api_key: env_opt("OPENAI_API_KEY"),
            openai_model: env_or("OPENAI_EMBEDDING_MODEL", "text-embedding-3-small"),
            openai_base_url: env_opt("OPENAI_BASE_URL"),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            dimensions: 768,
            ollama_url: "http://localhost:11434".to_string(),
            ollama_model: "nomic-embed-text".to_string(),
            openai_api_key: None,
            openai_model: "text-embedding-3-small".to_string(),
            openai_base_url: None,
        }
    }
}
