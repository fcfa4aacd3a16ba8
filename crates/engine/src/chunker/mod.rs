//! Semantic sentence-boundary chunking with fixed-size fallback.
//!
//! Splits a text element into sentence-coherent chunks: adjacent
//! sentences stay together while their embedding cosine similarity is
//! at or above the configured threshold, with a greedy size cap. When
//! the embedding provider fails, the text is split deterministically at
//! separator boundaries with overlap instead; the document is never
//! dropped because of an embedding error.

mod helpers;
mod strategies;
mod types;

pub use strategies::{chunk, split_fixed};
pub use types::{ChunkParams, DraftChunk};
