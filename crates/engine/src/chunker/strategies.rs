//! Chunking strategies: semantic (similarity-driven) and fixed-size
//! fallback.

use paperseg_core::ChunkKind;
use tracing::{debug, warn};

use super::helpers::{cosine_similarity, split_sentences};
use super::types::{ChunkParams, DraftChunk};
use crate::embedding::Embedder;

/// Separator priority for the fixed-size fallback, coarsest first. The
/// empty separator is the character-level last resort.
const SEPARATORS: &[&str] = &["\n\n", "\n", ". ", " ", ""];

/// Split one text element into chunks.
///
/// Embeds all sentences in a single batch; any provider error switches
/// this element to the fixed-size fallback (explicitly, never silently
/// dropping the text). Empty input yields an empty list.
pub async fn chunk(text: &str, embedder: &dyn Embedder, params: &ChunkParams) -> Vec<DraftChunk> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let sentences = split_sentences(text);
    if sentences.len() <= 2 {
        return vec![semantic(text.to_string())];
    }

    let refs: Vec<&str> = sentences.iter().map(String::as_str).collect();
    let embeddings = match embedder.embed_batch(&refs).await {
        Ok(vectors) if vectors.len() == sentences.len() => vectors,
        Ok(vectors) => {
            warn!(
                "embedding batch returned {} vectors for {} sentences, using fixed-size fallback",
                vectors.len(),
                sentences.len()
            );
            return fallback(text, params);
        }
        Err(e) => {
            warn!("sentence embedding failed, using fixed-size fallback: {e}");
            return fallback(text, params);
        }
    };

    let similarities: Vec<f32> = embeddings
        .windows(2)
        .map(|pair| cosine_similarity(&pair[0], &pair[1]))
        .collect();
    let boundaries = select_boundaries(&sentences, &similarities, params);

    let mut chunks = Vec::new();
    for pair in boundaries.windows(2) {
        let joined = sentences[pair[0]..pair[1]].join(" ");
        // Runs shorter than min_chunk_size are discarded, matching the
        // historical behavior: a short trailing run drops its sentences.
        if joined.trim().len() >= params.min_chunk_size {
            chunks.push(semantic(joined));
        }
    }

    if chunks.is_empty() {
        return vec![semantic(text.to_string())];
    }

    debug!(
        "semantic chunking: {} sentences into {} chunks",
        sentences.len(),
        chunks.len()
    );
    chunks
}

fn semantic(text: String) -> DraftChunk {
    DraftChunk {
        text,
        kind: ChunkKind::Semantic,
    }
}

fn fallback(text: &str, params: &ChunkParams) -> Vec<DraftChunk> {
    // The min-size rule applies to fallback fragments too: a stray
    // paragraph stub must not become its own chunk.
    split_fixed(text, params.chunk_size, params.chunk_overlap)
        .into_iter()
        .filter(|t| t.trim().len() >= params.min_chunk_size)
        .map(|text| DraftChunk {
            text,
            kind: ChunkKind::Fallback,
        })
        .collect()
}

/// Greedy boundary selection over adjacent-sentence similarities.
///
/// A boundary opens after sentence `i` when the similarity to the next
/// sentence drops below the threshold (strict `<`) and the running
/// chunk is large enough, or when the running chunk reaches the target
/// size. Boundaries always include 0 and the sentence count.
fn select_boundaries(sentences: &[String], similarities: &[f32], params: &ChunkParams) -> Vec<usize> {
    let mut boundaries = vec![0];
    let mut running_size = 0usize;

    for (i, similarity) in similarities.iter().enumerate() {
        running_size += sentences[i].len();
        if (*similarity < params.semantic_threshold && running_size >= params.min_chunk_size)
            || running_size >= params.chunk_size
        {
            boundaries.push(i + 1);
            running_size = 0;
        }
    }

    boundaries.push(sentences.len());
    boundaries
}

/// Deterministic fixed-size splitting with overlap.
///
/// Splits on the coarsest separator present, recursing into pieces that
/// still exceed `chunk_size`, then packs adjacent pieces into chunks
/// carrying `chunk_overlap` characters of repeated tail content.
pub fn split_fixed(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    split_recursive(text, SEPARATORS, chunk_size, chunk_overlap)
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn split_recursive(text: &str, separators: &[&str], size: usize, overlap: usize) -> Vec<String> {
    // First separator that actually occurs; "" always qualifies.
    let (sep_idx, sep) = separators
        .iter()
        .enumerate()
        .find(|(_, s)| s.is_empty() || text.contains(**s))
        .map(|(i, s)| (i, *s))
        .unwrap_or((SEPARATORS.len() - 1, ""));

    let splits: Vec<String> = if sep.is_empty() {
        // Character-level last resort.
        text.chars()
            .collect::<Vec<_>>()
            .chunks(size.max(1))
            .map(|c| c.iter().collect())
            .collect()
    } else {
        text.split(sep).map(str::to_string).collect()
    };

    let mut chunks = Vec::new();
    let mut fitting: Vec<String> = Vec::new();

    for split in splits {
        if split.is_empty() {
            continue;
        }
        if split.len() <= size {
            fitting.push(split);
        } else {
            // Flush what fits so far, then split the oversized piece
            // with the finer separators.
            if !fitting.is_empty() {
                chunks.extend(merge_with_overlap(&fitting, sep, size, overlap));
                fitting.clear();
            }
            if sep_idx + 1 < separators.len() {
                chunks.extend(split_recursive(&split, &separators[sep_idx + 1..], size, overlap));
            } else {
                chunks.push(split);
            }
        }
    }
    if !fitting.is_empty() {
        chunks.extend(merge_with_overlap(&fitting, sep, size, overlap));
    }
    chunks
}

/// Pack adjacent splits into chunks close to `size`, keeping a tail of
/// previous splits within the `overlap` budget at each chunk start.
fn merge_with_overlap(splits: &[String], sep: &str, size: usize, overlap: usize) -> Vec<String> {
    fn window_len(window: &[&str], sep_len: usize) -> usize {
        if window.is_empty() {
            0
        } else {
            window.iter().map(|s| s.len()).sum::<usize>() + sep_len * (window.len() - 1)
        }
    }

    let sep_len = sep.len();
    let mut chunks = Vec::new();
    let mut window: Vec<&str> = Vec::new();

    for split in splits {
        if !window.is_empty() && window_len(&window, sep_len) + sep_len + split.len() > size {
            chunks.push(window.join(sep));
            while !window.is_empty()
                && (window_len(&window, sep_len) > overlap
                    || window_len(&window, sep_len) + sep_len + split.len() > size)
            {
                window.remove(0);
            }
        }
        window.push(split.as_str());
    }
    if !window.is_empty() {
        chunks.push(window.join(sep));
    }
    chunks
}
