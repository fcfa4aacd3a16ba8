//! Chunking parameters and intermediate chunk type.

use paperseg_core::config::ChunkingConfig;
use paperseg_core::ChunkKind;

/// Parameters for one chunking invocation.
#[derive(Debug, Clone)]
pub struct ChunkParams {
    /// Target chunk size in characters.
    pub chunk_size: usize,
    /// Characters repeated between consecutive fallback chunks.
    pub chunk_overlap: usize,
    /// Similarity below this (strictly) opens a chunk boundary.
    pub semantic_threshold: f32,
    /// Chunks shorter than this are not emitted.
    pub min_chunk_size: usize,
}

impl ChunkParams {
    /// Panics on contract violations; these are programming errors, not
    /// recoverable input conditions.
    pub fn new(
        chunk_size: usize,
        chunk_overlap: usize,
        semantic_threshold: f32,
        min_chunk_size: usize,
    ) -> Self {
        assert!(chunk_size > 0, "chunk_size must be positive");
        assert!(
            chunk_overlap < chunk_size,
            "chunk_overlap must be smaller than chunk_size"
        );
        assert!(min_chunk_size > 0, "min_chunk_size must be positive");
        assert!(
            (0.0..=1.0).contains(&semantic_threshold),
            "semantic_threshold must be in [0, 1]"
        );
        Self {
            chunk_size,
            chunk_overlap,
            semantic_threshold,
            min_chunk_size,
        }
    }
}

impl Default for ChunkParams {
    fn default() -> Self {
        Self::new(1000, 200, 0.75, 100)
    }
}

impl From<&ChunkingConfig> for ChunkParams {
    fn from(config: &ChunkingConfig) -> Self {
        Self::new(
            config.chunk_size,
            config.chunk_overlap,
            config.semantic_threshold,
            config.min_chunk_size,
        )
    }
}

/// A chunk before metadata assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftChunk {
    pub text: String,
    pub kind: ChunkKind,
}
