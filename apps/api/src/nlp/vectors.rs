//! Hashed document vectors.
//!
//! Each content word contributes to one bucket for the whole word and to one
//! bucket per padded character trigram, so inflections of the same stem
//! ("engineer", "engineering") still overlap. The document vector is the mean
//! over all content words.

use crate::nlp::lexicon::STOP_WORDS;

pub const DIMENSIONS: usize = 300;

const WORD_SALT: u8 = b'w';
const TRIGRAM_SALT: u8 = b't';
const TRIGRAM_WEIGHT: f32 = 0.5;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Returns a `DIMENSIONS`-long vector; all zeros when `text` has no content words.
pub fn document_vector(text: &str) -> Vec<f32> {
    let mut vector = vec![0.0_f32; DIMENSIONS];
    let mut words = 0usize;

    for term in terms(text) {
        vector[bucket(WORD_SALT, &term)] += 1.0;
        for trigram in trigrams(&term) {
            vector[bucket(TRIGRAM_SALT, &trigram)] += TRIGRAM_WEIGHT;
        }
        words += 1;
    }

    if words > 0 {
        let n = words as f32;
        vector.iter_mut().for_each(|v| *v /= n);
    }
    vector
}

/// Cosine similarity. `None` when either vector has zero magnitude.
pub fn cosine(a: &[f32], b: &[f32]) -> Option<f32> {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    Some(dot / (norm_a * norm_b))
}

fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .filter(|t| !STOP_WORDS.contains(&t.as_str()))
}

fn trigrams(term: &str) -> Vec<String> {
    let padded: Vec<char> = format!("<{term}>").chars().collect();
    padded.windows(3).map(|w| w.iter().collect()).collect()
}

fn bucket(salt: u8, feature: &str) -> usize {
    let mut hash = FNV_OFFSET;
    for byte in std::iter::once(salt).chain(feature.bytes()) {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    (hash % DIMENSIONS as u64) as usize
}
