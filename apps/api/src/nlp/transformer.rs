//! Pretrained transformer backend (rust-bert, libtorch).
//!
//! NER uses the default CoNLL-03 BERT model; document vectors are the mean of
//! per-line sentence embeddings (all-MiniLM-L12-v2). Weights are downloaded to
//! the rust-bert cache on first load, which blocks; call `load` off the async runtime.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_bert::pipelines::ner::NERModel;
use rust_bert::pipelines::sentence_embeddings::{
    SentenceEmbeddingsBuilder, SentenceEmbeddingsModel, SentenceEmbeddingsModelType,
};
use rust_bert::RustBertError;
use tracing::{info, warn};

use crate::nlp::{Entity, EntityLabel, LanguageModel};

const BATCH_SIZE: usize = 32;

pub struct TransformerModel {
    ner: Mutex<NERModel>,
    embeddings: Mutex<SentenceEmbeddingsModel>,
}

impl TransformerModel {
    pub fn load() -> Result<Self, RustBertError> {
        info!("Loading NER model");
        let ner = NERModel::new(Default::default())?;
        info!("Loading sentence embeddings model");
        let embeddings =
            SentenceEmbeddingsBuilder::remote(SentenceEmbeddingsModelType::AllMiniLmL12V2)
                .create_model()?;
        Ok(Self {
            ner: Mutex::new(ner),
            embeddings: Mutex::new(embeddings),
        })
    }
}

impl LanguageModel for TransformerModel {
    fn entities(&self, text: &str) -> Vec<Entity> {
        let lines = passages(text);
        let ner = lock(&self.ner);

        let entities: Vec<Entity> = lines
            .chunks(BATCH_SIZE)
            .flat_map(|batch| ner.predict_full_entities(batch))
            .flatten()
            .filter_map(|entity| {
                label_for(&entity.label).map(|label| Entity {
                    text: entity.word,
                    label,
                })
            })
            .collect();
        entities
    }

    fn document_vector(&self, text: &str) -> Vec<f32> {
        let lines = passages(text);
        let model = lock(&self.embeddings);

        let mut sum: Vec<f32> = Vec::new();
        let mut count = 0usize;
        for batch in lines.chunks(BATCH_SIZE) {
            let embeddings = match model.encode(batch) {
                Ok(embeddings) => embeddings,
                Err(e) => {
                    warn!("Sentence embedding failed: {e}");
                    return Vec::new();
                }
            };
            for embedding in embeddings {
                if sum.is_empty() {
                    sum = vec![0.0; embedding.len()];
                }
                sum.iter_mut().zip(&embedding).for_each(|(s, v)| *s += v);
                count += 1;
            }
        }

        if count > 0 {
            let n = count as f32;
            sum.iter_mut().for_each(|s| *s /= n);
        }
        sum
    }

    fn name(&self) -> &str {
        "rust-bert"
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn passages(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// CoNLL tags, with or without the IOB prefix. MISC has no counterpart and is dropped.
fn label_for(tag: &str) -> Option<EntityLabel> {
    let tag = tag
        .strip_prefix("B-")
        .or_else(|| tag.strip_prefix("I-"))
        .unwrap_or(tag);
    match tag {
        "ORG" => Some(EntityLabel::Org),
        "PER" => Some(EntityLabel::Person),
        "LOC" => Some(EntityLabel::Gpe),
        _ => None,
    }
}
