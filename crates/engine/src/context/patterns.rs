//! Ordered caption pattern table.
//!
//! Patterns are evaluated in priority order and the first match wins,
//! so the ordering here is part of the extraction contract: numbered
//! labels (figure, table, graph, chart, diagram) before the generic
//! numbered form.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub(crate) static ref CAPTION_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(fig(?:ure)?\.?\s*\d+[:.\-]?\s*[^\n\r.!?]*[.!?])").unwrap(),
        Regex::new(r"(?i)(figure\s+\d+[:.\-]?\s*[^\n\r.!?]*[.!?])").unwrap(),
        Regex::new(r"(?i)(tab(?:le|ella)?\.?\s*\d+[:.\-]?\s*[^\n\r.!?]*[.!?])").unwrap(),
        Regex::new(r"(?i)(table\s+\d+[:.\-]?\s*[^\n\r.!?]*[.!?])").unwrap(),
        Regex::new(r"(?i)(graph\s+\d+[:.\-]?\s*[^\n\r.!?]*[.!?])").unwrap(),
        Regex::new(r"(?i)(chart\s+\d+[:.\-]?\s*[^\n\r.!?]*[.!?])").unwrap(),
        Regex::new(r"(?i)(diagram\s+\d+[:.\-]?\s*[^\n\r.!?]*[.!?])").unwrap(),
        // Generic numbered element ("Algorithm 2: ...").
        Regex::new(r"(?i)([a-zA-Z]+\s+\d+[:.\-]\s*[^\n\r.!?]*[.!?])").unwrap(),
    ];

    /// Short declarative sentence: uppercase start, terminal punctuation.
    pub(crate) static ref DECLARATIVE: Regex = Regex::new(r"^[A-Z][^.!?]*[.!?]$").unwrap();

    /// Connectives that mark running body text rather than a caption.
    pub(crate) static ref BODY_FILLER: Regex =
        Regex::new(r"(?i)\b(the|this|these|that|those|in|on|at|by|for|with|as)\b").unwrap();
}
