use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;

/// What kind of content an element carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Image,
    Table,
}

/// Provenance shared by every extracted element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementMetadata {
    /// Originating document (filename).
    pub source: String,
    /// 1-based page number.
    pub page: u32,
    pub content_type: ContentType,
}

impl ElementMetadata {
    pub fn new(source: impl Into<String>, page: u32, content_type: ContentType) -> Self {
        Self {
            source: source.into(),
            page,
            content_type,
        }
    }
}

/// Raw page text as supplied by the extraction collaborator, input to
/// chunking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTextElement {
    pub text: String,
    pub metadata: ElementMetadata,
}

/// An image element awaiting context enrichment and indexing.
///
/// `searchable_text` starts as the captioning collaborator's description
/// of the image and is rebuilt with caption/context once enriched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageElement {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub data: Vec<u8>,
    pub bbox: BoundingBox,
    pub searchable_text: String,
    pub caption: Option<String>,
    pub context_text: Option<String>,
    /// Count of text chunks on the same page, filled by association.
    pub related_text_chunks: usize,
    pub metadata: ElementMetadata,
}

impl ImageElement {
    pub fn target(&self) -> TargetElement {
        TargetElement {
            bbox: self.bbox,
            page_number: self.metadata.page,
        }
    }
}

/// A table element with its structured cells and markdown rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableElement {
    pub markdown: String,
    pub cells: Vec<Vec<String>>,
    pub bbox: BoundingBox,
    pub searchable_text: String,
    pub caption: Option<String>,
    pub context_text: Option<String>,
    /// Count of text chunks on the same page, filled by association.
    pub related_text_chunks: usize,
    pub metadata: ElementMetadata,
}

impl TableElement {
    pub fn target(&self) -> TargetElement {
        TargetElement {
            bbox: self.bbox,
            page_number: self.metadata.page,
        }
    }
}

/// A table or image whose surrounding text is being looked up.
#[derive(Debug, Clone, Copy)]
pub struct TargetElement {
    pub bbox: BoundingBox,
    pub page_number: u32,
}

/// Distinguishes targets during context extraction: table targets get
/// their candidate blocks sanitized against tabular markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Image,
    Table,
}

/// Output of spatial context extraction for one target element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextResult {
    pub caption: Option<String>,
    pub context_text: Option<String>,
}

impl ContextResult {
    /// The degenerate result: no usable surrounding text.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Which strategy produced a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    Semantic,
    Fallback,
}

/// Fixed, typed chunk metadata (no ad hoc key-value maps).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// `"{page}_{index}"`, or `"{page}_fallback_{index}"` for fallback chunks.
    pub chunk_id: String,
    /// Position within the source element's chunk list.
    pub chunk_index: usize,
    pub total_chunks: usize,
    pub chunk_type: ChunkKind,
    /// Length of the source element's full text.
    pub original_length: usize,
    /// Length of this chunk's text, always `text.len()`.
    pub chunk_length: usize,
    pub page: u32,
    pub source: String,
    /// Count of images on the same page, filled by association.
    pub related_images: usize,
    /// Count of tables on the same page, filled by association.
    pub related_tables: usize,
}

/// A chunk of text ready for embedding and storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticChunk {
    pub text: String,
    pub metadata: ChunkMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ChunkKind::Semantic).unwrap(),
            "\"semantic\""
        );
        assert_eq!(
            serde_json::to_string(&ChunkKind::Fallback).unwrap(),
            "\"fallback\""
        );
    }

    #[test]
    fn content_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ContentType::Table).unwrap(),
            "\"table\""
        );
    }

    #[test]
    fn chunk_metadata_round_trips() {
        let meta = ChunkMetadata {
            chunk_id: "3_0".to_string(),
            chunk_index: 0,
            total_chunks: 2,
            chunk_type: ChunkKind::Semantic,
            original_length: 240,
            chunk_length: 120,
            page: 3,
            source: "paper.pdf".to_string(),
            related_images: 1,
            related_tables: 0,
        };
        let json = serde_json::to_string(&meta).unwrap();
        let back: ChunkMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back.chunk_id, "3_0");
        assert_eq!(back.chunk_type, ChunkKind::Semantic);
        assert_eq!(back.page, 3);
    }
}
