//! Sentence splitting and vector math used by the chunking strategies.

/// Split `text` at sentence boundaries: terminal punctuation (`.` `!`
/// `?`) followed by whitespace followed by an uppercase letter. Results
/// are trimmed; empties dropped.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    let mut i = 0;
    while i < chars.len() {
        if matches!(chars[i], '.' | '!' | '?') {
            // Consume the whitespace run after the terminal.
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j > i + 1 && j < chars.len() && chars[j].is_uppercase() {
                push_trimmed(&mut sentences, &chars[start..=i]);
                start = j;
                i = j;
                continue;
            }
        }
        i += 1;
    }

    push_trimmed(&mut sentences, &chars[start..]);
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, chars: &[char]) {
    let s: String = chars.iter().collect();
    let s = s.trim();
    if !s.is_empty() {
        sentences.push(s.to_string());
    }
}

/// Standard cosine similarity `dot(a,b) / (|a||b|)`; 0.0 when either
/// vector has zero norm.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
