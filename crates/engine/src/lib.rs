//! Multimodal document segmentation engine.
//!
//! Takes the per-page output of a PDF-extraction collaborator (text
//! blocks, images and tables with bounding boxes) and prepares it for
//! vector indexing: nearest-text captions and context for media
//! elements, sentence-coherent text chunks with a deterministic
//! fixed-size fallback, and page-level chunk/media association.
//!
//! The engine is pure computation over supplied inputs; the only
//! suspension point is the batched sentence-embedding call, issued once
//! per text element through an injected [`Embedder`].

pub mod associate;
pub mod chunker;
pub mod context;
pub mod embedding;
pub mod geometry;
pub mod pipeline;

pub use associate::associate_media;
pub use chunker::{chunk, split_fixed, ChunkParams, DraftChunk};
pub use context::{enhance_text_with_context, extract_context};
pub use embedding::{embedder_from_config, Embedder, EmbeddingError};
pub use geometry::{page_blocks, LayoutError, LayoutSource, PageLayout, Word};
pub use pipeline::{ChunkingStats, Segmenter};
