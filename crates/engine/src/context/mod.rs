//! Spatial context extraction for tables and images.
//!
//! Given a target bounding box and the page's ordered text blocks, finds
//! the nearest surrounding blocks in the same column, extracts a caption
//! from them via the pattern table, and assembles a context string from
//! the closest blocks above and below. Pure computation: re-running on
//! identical input always yields the same result.

mod patterns;

use paperseg_core::{ContextConfig, ContextResult, TargetElement, TargetKind, TextBlock};
use tracing::debug;

use patterns::{BODY_FILLER, CAPTION_PATTERNS, DECLARATIVE};

/// At most this many blocks are kept per side after ordering.
const MAX_BLOCKS_PER_SIDE: usize = 5;

/// How many nearest blocks per side feed the context string.
const CONTEXT_BLOCKS_PER_SIDE: usize = 3;

const CAPTION_MIN_CHARS: usize = 10;
const CAPTION_MAX_CHARS: usize = 300;
const DECLARATIVE_MIN_CHARS: usize = 15;
const DECLARATIVE_MAX_CHARS: usize = 200;

/// Substrings marking tabular markup; three or more reject a candidate.
const TABLE_INDICATORS: &[&str] = &[
    "|", "table", "tabella", "row", "column", "header", "cell", "---",
];

/// Blocks at or below this length are never treated as table markup.
const TABLE_MARKUP_MIN_CHARS: usize = 50;

/// Maximum ratio of `|`/`-` characters before a block is rejected.
const TABLE_MARKUP_RATIO: f32 = 0.3;

/// Surviving table-context candidates are cut to this many characters.
const TABLE_CONTEXT_TRUNCATE: usize = 200;

/// Derive caption and context text for one table or image.
///
/// Table targets additionally have their candidate blocks sanitized
/// against tabular markup before context assembly (the caption scan
/// still sees the raw candidates).
pub fn extract_context(
    target: &TargetElement,
    kind: TargetKind,
    blocks: &[TextBlock],
    config: &ContextConfig,
) -> ContextResult {
    let (above, below) = partition(target, blocks, config.max_distance);
    let caption = extract_caption(&above, &below);

    let (above, below) = match kind {
        TargetKind::Table => (sanitize_candidates(above), sanitize_candidates(below)),
        TargetKind::Image => (above, below),
    };
    let context_text = assemble_context(&above, &below);

    ContextResult {
        caption,
        context_text,
    }
}

/// Combine an element's own text with its extracted context so the
/// joined string is what gets embedded and searched.
pub fn enhance_text_with_context(element_text: &str, context: &ContextResult) -> String {
    let mut parts = vec![element_text.to_string()];
    if let Some(caption) = &context.caption {
        parts.push(format!("Caption: {caption}"));
    }
    if let Some(text) = &context.context_text {
        parts.push(text.clone());
    }
    parts.join(" | ")
}

/// Split the page's blocks into same-column neighbours above and below
/// the target, nearest first, at most [`MAX_BLOCKS_PER_SIDE`] each.
fn partition(
    target: &TargetElement,
    blocks: &[TextBlock],
    max_distance: f32,
) -> (Vec<String>, Vec<String>) {
    let mut above: Vec<(f32, &TextBlock)> = Vec::new();
    let mut below: Vec<(f32, &TextBlock)> = Vec::new();

    for block in blocks {
        // Different column: no horizontal overlap with the target.
        if !block.bbox.horizontally_overlaps(&target.bbox) {
            continue;
        }
        let y_center = block.y_center();
        if y_center < target.bbox.y0 {
            if target.bbox.y0 - y_center <= max_distance {
                above.push((y_center, block));
            }
        } else if y_center > target.bbox.y1 && y_center - target.bbox.y1 <= max_distance {
            below.push((y_center, block));
        }
    }

    // Nearest to the target first on both sides.
    above.sort_by(|a, b| b.0.total_cmp(&a.0));
    below.sort_by(|a, b| a.0.total_cmp(&b.0));
    above.truncate(MAX_BLOCKS_PER_SIDE);
    below.truncate(MAX_BLOCKS_PER_SIDE);

    debug!(
        "{} blocks above, {} below within distance {max_distance}",
        above.len(),
        below.len()
    );

    (
        above.into_iter().map(|(_, b)| b.text.clone()).collect(),
        below.into_iter().map(|(_, b)| b.text.clone()).collect(),
    )
}

/// Scan candidates (above nearest-first, then below nearest-first) and
/// return the first pattern or heuristic match. Per candidate, the
/// numbered-label patterns run before the declarative heuristic.
fn extract_caption(above: &[String], below: &[String]) -> Option<String> {
    for text in above.iter().chain(below.iter()) {
        let text = text.trim();

        for pattern in CAPTION_PATTERNS.iter() {
            if let Some(m) = pattern.captures(text).and_then(|c| c.get(1)) {
                let caption = m.as_str().trim();
                if (CAPTION_MIN_CHARS..=CAPTION_MAX_CHARS).contains(&caption.len()) {
                    debug!("caption matched: {caption}");
                    return Some(caption.to_string());
                }
            }
        }

        // A short standalone sentence with no body-text connectives can
        // itself be the caption.
        if text.len() > DECLARATIVE_MIN_CHARS
            && text.len() < DECLARATIVE_MAX_CHARS
            && DECLARATIVE.is_match(text)
            && !BODY_FILLER.is_match(text)
        {
            debug!("declarative caption candidate: {text}");
            return Some(text.to_string());
        }
    }
    None
}

/// Join the closest blocks on each side into one context string.
fn assemble_context(above: &[String], below: &[String]) -> Option<String> {
    let mut parts = Vec::new();

    if !above.is_empty() {
        let nearest: Vec<&str> = above
            .iter()
            .take(CONTEXT_BLOCKS_PER_SIDE)
            .map(String::as_str)
            .collect();
        parts.push(format!("Contesto precedente: {}", nearest.join(" | ")));
    }
    if !below.is_empty() {
        let nearest: Vec<&str> = below
            .iter()
            .take(CONTEXT_BLOCKS_PER_SIDE)
            .map(String::as_str)
            .collect();
        parts.push(format!("Contesto successivo: {}", nearest.join(" | ")));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" || "))
    }
}

/// Drop candidates that look like tabular markup and truncate the rest.
fn sanitize_candidates(texts: Vec<String>) -> Vec<String> {
    texts
        .into_iter()
        .filter(|t| !looks_like_table_markup(t))
        .map(|t| truncate_chars(t, TABLE_CONTEXT_TRUNCATE))
        .collect()
}

fn looks_like_table_markup(text: &str) -> bool {
    if text.len() <= TABLE_MARKUP_MIN_CHARS {
        return false;
    }
    let lower = text.to_lowercase();
    let indicator_hits = TABLE_INDICATORS
        .iter()
        .filter(|needle| lower.contains(**needle))
        .count();
    if indicator_hits >= 3 {
        return true;
    }
    let total = text.chars().count();
    let markup = text.chars().filter(|c| *c == '|' || *c == '-').count();
    total > 0 && markup as f32 / total as f32 > TABLE_MARKUP_RATIO
}

fn truncate_chars(text: String, max: usize) -> String {
    if text.chars().count() <= max {
        text
    } else {
        text.chars().take(max).collect()
    }
}
