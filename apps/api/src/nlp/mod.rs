//! Language model: entity recognition and document vectors behind one trait.
//!
//! Callers only see `LanguageModel`. Built with the `transformers` feature the
//! shared model is `TransformerModel` (pretrained rust-bert pipelines). Without
//! it, or when the weights cannot be loaded, `HeuristicModel` (rule-based NER
//! and hashed word vectors, deterministic) takes its place; tests use it directly.
//! All calls are CPU-bound and must run inside `tokio::task::spawn_blocking`.

use std::sync::{Arc, OnceLock};

use serde::Serialize;
#[cfg(feature = "transformers")]
use tracing::warn;

pub mod entities;
pub mod lexicon;
pub mod similarity;
pub mod skills;
#[cfg(feature = "transformers")]
pub mod transformer;
pub mod vectors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Org,
    Person,
    Gpe,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

/// Read-only model shared by every request handler.
pub trait LanguageModel: Send + Sync {
    fn entities(&self, text: &str) -> Vec<Entity>;

    fn document_vector(&self, text: &str) -> Vec<f32>;

    /// Backend label, logged at startup.
    fn name(&self) -> &str;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicModel;

impl LanguageModel for HeuristicModel {
    fn entities(&self, text: &str) -> Vec<Entity> {
        entities::recognize(text)
    }

    fn document_vector(&self, text: &str) -> Vec<f32> {
        vectors::document_vector(text)
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}

static SHARED_MODEL: OnceLock<Arc<dyn LanguageModel>> = OnceLock::new();

/// Process-wide model, created on first use and never torn down.
/// The first call may download model weights and blocks until they load.
pub fn shared_model() -> Arc<dyn LanguageModel> {
    SHARED_MODEL.get_or_init(load_model).clone()
}

#[cfg(feature = "transformers")]
fn load_model() -> Arc<dyn LanguageModel> {
    match transformer::TransformerModel::load() {
        Ok(model) => Arc::new(model),
        Err(e) => {
            warn!("Transformer model unavailable ({e}); falling back to heuristic backend");
            Arc::new(HeuristicModel)
        }
    }
}

#[cfg(not(feature = "transformers"))]
fn load_model() -> Arc<dyn LanguageModel> {
    Arc::new(HeuristicModel)
}
