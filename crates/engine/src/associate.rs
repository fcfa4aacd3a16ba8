//! Page-level association between text chunks and media elements.
//!
//! Granularity is deliberately the page: a chunk is "related" to every
//! image and table on its page, and vice versa. The counts are stored
//! on both sides so either can be filtered at query time without
//! joining the other.

use std::collections::HashMap;

use paperseg_core::{ImageElement, SemanticChunk, TableElement};
use tracing::info;

/// Cross-link chunks and media elements that share a page.
///
/// Fills `related_images` / `related_tables` on every chunk and
/// `related_text_chunks` on every image and table. Counts for pages
/// absent from the other collection are zero. Idempotent: the counts
/// are overwritten, not accumulated.
pub fn associate_media(
    chunks: &mut [SemanticChunk],
    images: &mut [ImageElement],
    tables: &mut [TableElement],
) {
    let mut chunks_per_page: HashMap<u32, usize> = HashMap::new();
    for chunk in chunks.iter() {
        *chunks_per_page.entry(chunk.metadata.page).or_default() += 1;
    }
    let mut images_per_page: HashMap<u32, usize> = HashMap::new();
    for image in images.iter() {
        *images_per_page.entry(image.metadata.page).or_default() += 1;
    }
    let mut tables_per_page: HashMap<u32, usize> = HashMap::new();
    for table in tables.iter() {
        *tables_per_page.entry(table.metadata.page).or_default() += 1;
    }

    for chunk in chunks.iter_mut() {
        let page = chunk.metadata.page;
        chunk.metadata.related_images = images_per_page.get(&page).copied().unwrap_or(0);
        chunk.metadata.related_tables = tables_per_page.get(&page).copied().unwrap_or(0);
    }
    for image in images.iter_mut() {
        image.related_text_chunks = chunks_per_page
            .get(&image.metadata.page)
            .copied()
            .unwrap_or(0);
    }
    for table in tables.iter_mut() {
        table.related_text_chunks = chunks_per_page
            .get(&table.metadata.page)
            .copied()
            .unwrap_or(0);
    }

    info!(
        chunks = chunks.len(),
        images = images.len(),
        tables = tables.len(),
        "associated media with text chunks"
    );
}

#[cfg(test)]
mod tests {
    use paperseg_core::{
        BoundingBox, ChunkKind, ChunkMetadata, ContentType, ElementMetadata, ImageElement,
        SemanticChunk, TableElement,
    };

    use super::associate_media;

    fn chunk_on_page(page: u32, index: usize) -> SemanticChunk {
        SemanticChunk {
            text: format!("chunk {index} on page {page}"),
            metadata: ChunkMetadata {
                chunk_id: format!("{page}_{index}"),
                chunk_index: index,
                total_chunks: 1,
                chunk_type: ChunkKind::Semantic,
                original_length: 24,
                chunk_length: 24,
                page,
                source: "paper.pdf".to_string(),
                related_images: 0,
                related_tables: 0,
            },
        }
    }

    fn image_on_page(page: u32) -> ImageElement {
        ImageElement {
            data: Vec::new(),
            bbox: BoundingBox::new(0.0, 0.0, 100.0, 100.0),
            searchable_text: "a figure".to_string(),
            caption: None,
            context_text: None,
            related_text_chunks: 0,
            metadata: ElementMetadata::new("paper.pdf", page, ContentType::Image),
        }
    }

    fn table_on_page(page: u32) -> TableElement {
        TableElement {
            markdown: "| a | b |".to_string(),
            cells: vec![vec!["a".to_string(), "b".to_string()]],
            bbox: BoundingBox::new(0.0, 0.0, 100.0, 100.0),
            searchable_text: "a table".to_string(),
            caption: None,
            context_text: None,
            related_text_chunks: 0,
            metadata: ElementMetadata::new("paper.pdf", page, ContentType::Table),
        }
    }

    #[test]
    fn counts_are_symmetric_per_page() {
        let mut chunks = vec![chunk_on_page(1, 0), chunk_on_page(1, 1), chunk_on_page(2, 0)];
        let mut images = vec![image_on_page(1), image_on_page(1), image_on_page(1)];
        let mut tables = vec![table_on_page(2)];

        associate_media(&mut chunks, &mut images, &mut tables);

        assert_eq!(chunks[0].metadata.related_images, 3);
        assert_eq!(chunks[0].metadata.related_tables, 0);
        assert_eq!(chunks[1].metadata.related_images, 3);
        assert_eq!(chunks[2].metadata.related_images, 0);
        assert_eq!(chunks[2].metadata.related_tables, 1);
        for image in &images {
            assert_eq!(image.related_text_chunks, 2);
        }
        assert_eq!(tables[0].related_text_chunks, 1);
    }

    #[test]
    fn pages_without_counterparts_get_zero() {
        let mut chunks = vec![chunk_on_page(5, 0)];
        let mut images = vec![image_on_page(9)];
        let mut tables = Vec::new();

        associate_media(&mut chunks, &mut images, &mut tables);

        assert_eq!(chunks[0].metadata.related_images, 0);
        assert_eq!(images[0].related_text_chunks, 0);
    }

    #[test]
    fn rerunning_overwrites_instead_of_accumulating() {
        let mut chunks = vec![chunk_on_page(1, 0)];
        let mut images = vec![image_on_page(1)];
        let mut tables = Vec::new();

        associate_media(&mut chunks, &mut images, &mut tables);
        associate_media(&mut chunks, &mut images, &mut tables);

        assert_eq!(chunks[0].metadata.related_images, 1);
        assert_eq!(images[0].related_text_chunks, 1);
    }

    #[test]
    fn empty_collections_are_fine() {
        let mut chunks: Vec<SemanticChunk> = Vec::new();
        let mut images: Vec<ImageElement> = Vec::new();
        let mut tables: Vec<TableElement> = Vec::new();
        associate_media(&mut chunks, &mut images, &mut tables);
    }
}
