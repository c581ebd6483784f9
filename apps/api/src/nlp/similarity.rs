use crate::nlp::vectors::cosine;
use crate::nlp::LanguageModel;

/// Only the first 100,000 characters of each document are vectorized.
pub const MAX_SCORED_CHARS: usize = 100_000;

/// Similarity of two documents scaled to 0–100 and rounded to 2 decimals.
/// Documents with no content words score 0.0.
pub fn matching_score(model: &dyn LanguageModel, resume_text: &str, job_text: &str) -> f64 {
    let resume_vec = model.document_vector(truncate_chars(resume_text, MAX_SCORED_CHARS));
    let job_vec = model.document_vector(truncate_chars(job_text, MAX_SCORED_CHARS));

    let similarity = cosine(&resume_vec, &job_vec).unwrap_or(0.0);
    round2((f64::from(similarity) * 100.0).clamp(0.0, 100.0))
}

/// Cuts `text` after `max` characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
