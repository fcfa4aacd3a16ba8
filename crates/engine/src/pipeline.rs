//! The segmentation pipeline facade.
//!
//! [`Segmenter`] owns the embedding provider and configuration and
//! exposes the per-document operations in processing order: chunk the
//! text elements, enrich images and tables with spatial context, then
//! associate chunks and media page by page.

use std::sync::Arc;

use paperseg_core::{
    ChunkMetadata, EngineConfig, ImageElement, RawTextElement, SemanticChunk, TableElement,
    TargetKind, TextBlock,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::associate::associate_media;
use crate::chunker::{chunk, ChunkParams};
use crate::context::{enhance_text_with_context, extract_context};
use crate::embedding::{embedder_from_config, Embedder, EmbeddingError};

pub struct Segmenter {
    embedder: Arc<dyn Embedder>,
    config: EngineConfig,
}

impl Segmenter {
    pub fn new(embedder: Arc<dyn Embedder>, config: EngineConfig) -> Self {
        Self { embedder, config }
    }

    /// Build the provider named by the config and wrap it.
    pub fn from_config(config: EngineConfig) -> Result<Self, EmbeddingError> {
        let embedder = embedder_from_config(&config.embedding)?;
        Ok(Self::new(embedder, config))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Chunk every text element and assemble chunk metadata.
    ///
    /// Elements whose trimmed text is shorter than `min_chunk_size` are
    /// skipped entirely. Chunk ids are `"{page}_{index}"`, or
    /// `"{page}_fallback_{index}"` when the element fell back to
    /// fixed-size splitting.
    pub async fn chunk_text_elements(&self, elements: &[RawTextElement]) -> Vec<SemanticChunk> {
        let params = ChunkParams::from(&self.config.chunking);
        let mut chunks = Vec::new();

        for element in elements {
            if element.text.trim().len() < params.min_chunk_size {
                debug!(
                    page = element.metadata.page,
                    "skipping text element below min chunk size"
                );
                continue;
            }

            let drafts = chunk(&element.text, self.embedder.as_ref(), &params).await;
            let total = drafts.len();
            for (index, draft) in drafts.into_iter().enumerate() {
                let page = element.metadata.page;
                let chunk_id = match draft.kind {
                    paperseg_core::ChunkKind::Semantic => format!("{page}_{index}"),
                    paperseg_core::ChunkKind::Fallback => format!("{page}_fallback_{index}"),
                };
                let chunk_length = draft.text.len();
                chunks.push(SemanticChunk {
                    text: draft.text,
                    metadata: ChunkMetadata {
                        chunk_id,
                        chunk_index: index,
                        total_chunks: total,
                        chunk_type: draft.kind,
                        original_length: element.text.len(),
                        chunk_length,
                        page,
                        source: element.metadata.source.clone(),
                        related_images: 0,
                        related_tables: 0,
                    },
                });
            }
        }

        info!(
            elements = elements.len(),
            chunks = chunks.len(),
            "chunked text elements"
        );
        chunks
    }

    /// Attach caption and context to an image and rebuild its
    /// searchable text from the description plus what was found.
    pub fn enrich_image(&self, image: &mut ImageElement, blocks: &[TextBlock]) {
        let result = extract_context(&image.target(), TargetKind::Image, blocks, &self.config.context);
        image.searchable_text = enhance_text_with_context(&image.searchable_text, &result);
        image.caption = result.caption;
        image.context_text = result.context_text;
    }

    /// Attach caption and context to a table. The markdown rendering is
    /// the base searchable text.
    pub fn enrich_table(&self, table: &mut TableElement, blocks: &[TextBlock]) {
        let result = extract_context(&table.target(), TargetKind::Table, blocks, &self.config.context);
        table.searchable_text = enhance_text_with_context(&table.markdown, &result);
        table.caption = result.caption;
        table.context_text = result.context_text;
    }

    /// Page-level cross-linking of chunks and media.
    pub fn associate(
        &self,
        chunks: &mut [SemanticChunk],
        images: &mut [ImageElement],
        tables: &mut [TableElement],
    ) {
        associate_media(chunks, images, tables);
    }
}

/// Summary statistics over one document's chunks.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkingStats {
    pub total_chunks: usize,
    pub semantic_chunks: usize,
    pub fallback_chunks: usize,
    pub avg_chunk_length: f64,
    pub min_chunk_length: usize,
    pub max_chunk_length: usize,
    pub median_chunk_length: f64,
}

impl ChunkingStats {
    pub fn from_chunks(chunks: &[SemanticChunk]) -> Self {
        if chunks.is_empty() {
            return Self {
                total_chunks: 0,
                semantic_chunks: 0,
                fallback_chunks: 0,
                avg_chunk_length: 0.0,
                min_chunk_length: 0,
                max_chunk_length: 0,
                median_chunk_length: 0.0,
            };
        }

        let mut lengths: Vec<usize> = chunks.iter().map(|c| c.text.len()).collect();
        lengths.sort_unstable();
        let total: usize = lengths.iter().sum();
        let mid = lengths.len() / 2;
        let median = if lengths.len() % 2 == 0 {
            (lengths[mid - 1] + lengths[mid]) as f64 / 2.0
        } else {
            lengths[mid] as f64
        };
        let semantic = chunks
            .iter()
            .filter(|c| c.metadata.chunk_type == paperseg_core::ChunkKind::Semantic)
            .count();

        Self {
            total_chunks: chunks.len(),
            semantic_chunks: semantic,
            fallback_chunks: chunks.len() - semantic,
            avg_chunk_length: total as f64 / lengths.len() as f64,
            min_chunk_length: lengths[0],
            max_chunk_length: *lengths.last().unwrap(),
            median_chunk_length: median,
        }
    }
}
