//! Ordered, position-aware view of a page's text blocks.
//!
//! The PDF-extraction collaborator supplies raw layout data; this module
//! turns it into a list of [`TextBlock`] sorted by vertical center. The
//! primary strategy reads the collaborator's own layout grouping; the
//! fallback groups word-level output into blocks by vertical gaps.

use paperseg_core::{BoundingBox, TextBlock};
use thiserror::Error;
use tracing::{debug, warn};

/// Vertical gap (page coordinate units) that starts a new block in the
/// word-grouping fallback.
const WORD_GAP: f32 = 5.0;

/// Blocks shorter than this after trimming are discarded as noise.
const MIN_BLOCK_CHARS: usize = 4;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout grouping unavailable: {0}")]
    Unavailable(String),

    #[error("malformed layout data: {0}")]
    Malformed(String),
}

/// One span of text inside a layout line.
#[derive(Debug, Clone)]
pub struct LayoutSpan {
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct LayoutLine {
    pub spans: Vec<LayoutSpan>,
}

/// A grouping of lines produced by the extraction collaborator.
#[derive(Debug, Clone)]
pub struct LayoutBlock {
    pub bbox: BoundingBox,
    pub lines: Vec<LayoutLine>,
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub blocks: Vec<LayoutBlock>,
}

/// A single word with its bounding box (fallback granularity).
#[derive(Debug, Clone)]
pub struct Word {
    pub text: String,
    pub bbox: BoundingBox,
}

/// Seam to the PDF-extraction collaborator for one page.
pub trait LayoutSource {
    /// Layout-grouped blocks (primary strategy input).
    fn layout(&self) -> Result<PageLayout, LayoutError>;

    /// Word-level output (fallback strategy input).
    fn words(&self) -> Result<Vec<Word>, LayoutError>;
}

/// Build the ordered block list for a page.
///
/// Tries the layout grouping first and degrades to word grouping on any
/// error; when both fail the page simply has no text blocks (context
/// extraction then yields an empty result, never an error).
pub fn page_blocks(source: &dyn LayoutSource) -> Vec<TextBlock> {
    match source.layout() {
        Ok(layout) => blocks_from_layout(&layout),
        Err(e) => {
            debug!("layout grouping failed, trying word fallback: {e}");
            match source.words() {
                Ok(words) => blocks_from_words(&words),
                Err(e) => {
                    warn!("both block strategies failed, page has no text blocks: {e}");
                    Vec::new()
                }
            }
        }
    }
}

/// Merge each layout grouping into one text block: spans concatenated,
/// one space per line break.
pub fn blocks_from_layout(layout: &PageLayout) -> Vec<TextBlock> {
    let mut blocks = Vec::new();

    for block in &layout.blocks {
        let mut text = String::new();
        for line in &block.lines {
            for span in &line.spans {
                text.push_str(&span.text);
            }
            text.push(' ');
        }
        let trimmed = text.trim();
        if trimmed.len() >= MIN_BLOCK_CHARS {
            blocks.push(TextBlock::new(trimmed, block.bbox));
        }
    }

    sort_by_y_center(&mut blocks);
    debug!("layout grouping produced {} text blocks", blocks.len());
    blocks
}

/// Group words into blocks: a word whose top edge sits more than
/// [`WORD_GAP`] below the current block's bottom starts a new block.
pub fn blocks_from_words(words: &[Word]) -> Vec<TextBlock> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut bbox: Option<BoundingBox> = None;

    for word in words {
        let starts_new = match &bbox {
            Some(b) => word.bbox.y0 > b.y1 + WORD_GAP,
            None => true,
        };
        if starts_new {
            flush_block(&mut blocks, &mut current, bbox.take());
            current.push(&word.text);
            bbox = Some(word.bbox);
        } else {
            current.push(&word.text);
            if let Some(b) = bbox {
                bbox = Some(b.union(&word.bbox));
            }
        }
    }
    flush_block(&mut blocks, &mut current, bbox);

    sort_by_y_center(&mut blocks);
    debug!("word grouping produced {} text blocks", blocks.len());
    blocks
}

fn flush_block(blocks: &mut Vec<TextBlock>, words: &mut Vec<&str>, bbox: Option<BoundingBox>) {
    if let Some(bbox) = bbox {
        let text = words.join(" ");
        let trimmed = text.trim();
        if trimmed.len() >= MIN_BLOCK_CHARS {
            blocks.push(TextBlock::new(trimmed, bbox));
        }
    }
    words.clear();
}

fn sort_by_y_center(blocks: &mut [TextBlock]) {
    blocks.sort_by(|a, b| a.y_center().total_cmp(&b.y_center()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str) -> LayoutSpan {
        LayoutSpan {
            text: text.to_string(),
        }
    }

    fn word(text: &str, y0: f32, y1: f32) -> Word {
        Word {
            text: text.to_string(),
            bbox: BoundingBox::new(10.0, y0, 50.0, y1),
        }
    }

    #[test]
    fn layout_blocks_merge_spans_and_lines() {
        let layout = PageLayout {
            blocks: vec![LayoutBlock {
                bbox: BoundingBox::new(0.0, 0.0, 100.0, 20.0),
                lines: vec![
                    LayoutLine {
                        spans: vec![span("Machine "), span("learning")],
                    },
                    LayoutLine {
                        spans: vec![span("models")],
                    },
                ],
            }],
        };
        let blocks = blocks_from_layout(&layout);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "Machine learning models");
    }

    #[test]
    fn layout_blocks_sorted_by_y_center() {
        let make = |y0: f32, y1: f32, text: &str| LayoutBlock {
            bbox: BoundingBox::new(0.0, y0, 100.0, y1),
            lines: vec![LayoutLine {
                spans: vec![span(text)],
            }],
        };
        let layout = PageLayout {
            blocks: vec![
                make(200.0, 220.0, "lower block"),
                make(10.0, 30.0, "upper block"),
            ],
        };
        let blocks = blocks_from_layout(&layout);
        assert_eq!(blocks[0].text, "upper block");
        assert_eq!(blocks[1].text, "lower block");
    }

    #[test]
    fn short_blocks_are_discarded_as_noise() {
        let layout = PageLayout {
            blocks: vec![LayoutBlock {
                bbox: BoundingBox::new(0.0, 0.0, 100.0, 10.0),
                lines: vec![LayoutLine {
                    spans: vec![span(" ab ")],
                }],
            }],
        };
        assert!(blocks_from_layout(&layout).is_empty());
    }

    #[test]
    fn words_split_into_blocks_at_vertical_gaps() {
        // Two words on one line, then a word 20 units further down.
        let words = vec![
            word("First", 10.0, 20.0),
            word("paragraph", 10.0, 20.0),
            word("Second", 40.0, 50.0),
        ];
        let blocks = blocks_from_words(&words);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "First paragraph");
        assert_eq!(blocks[1].text, "Second");
    }

    #[test]
    fn words_within_gap_margin_stay_in_one_block() {
        // Next line starts exactly WORD_GAP below the previous bottom.
        let words = vec![word("line", 10.0, 20.0), word("continues", 25.0, 35.0)];
        let blocks = blocks_from_words(&words);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "line continues");
    }

    #[test]
    fn word_block_bbox_is_union_of_member_words() {
        let words = vec![
            Word {
                text: "wide".to_string(),
                bbox: BoundingBox::new(10.0, 10.0, 50.0, 20.0),
            },
            Word {
                text: "words".to_string(),
                bbox: BoundingBox::new(60.0, 12.0, 120.0, 22.0),
            },
        ];
        let blocks = blocks_from_words(&words);
        assert_eq!(blocks.len(), 1);
        let b = blocks[0].bbox;
        assert_eq!((b.x0, b.y0, b.x1, b.y1), (10.0, 10.0, 120.0, 22.0));
    }

    struct FailingLayout;

    impl LayoutSource for FailingLayout {
        fn layout(&self) -> Result<PageLayout, LayoutError> {
            Err(LayoutError::Unavailable("no layout dict".to_string()))
        }
        fn words(&self) -> Result<Vec<Word>, LayoutError> {
            Ok(vec![word("fallback", 10.0, 20.0), word("words", 10.0, 20.0)])
        }
    }

    struct DeadPage;

    impl LayoutSource for DeadPage {
        fn layout(&self) -> Result<PageLayout, LayoutError> {
            Err(LayoutError::Unavailable("no layout".to_string()))
        }
        fn words(&self) -> Result<Vec<Word>, LayoutError> {
            Err(LayoutError::Malformed("no words".to_string()))
        }
    }

    #[test]
    fn page_blocks_falls_back_to_words() {
        let blocks = page_blocks(&FailingLayout);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "fallback words");
    }

    #[test]
    fn page_blocks_empty_when_both_strategies_fail() {
        assert!(page_blocks(&DeadPage).is_empty());
    }
}
