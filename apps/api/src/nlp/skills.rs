use std::collections::BTreeSet;

use crate::nlp::{EntityLabel, LanguageModel};

/// Deduplicated skill names. Ordered so that every run over the same text
/// yields the same sequence.
pub type SkillSet = BTreeSet<String>;

/// Skills are approximated by organization entities. Company names come
/// along for the ride; that is accepted behavior.
pub fn extract_skills(model: &dyn LanguageModel, text: &str) -> SkillSet {
    model
        .entities(text)
        .into_iter()
        .filter(|e| e.label == EntityLabel::Org)
        .map(|e| e.text)
        .collect()
}

/// `job − resume`: always a subset of `job` and disjoint from `resume`.
pub fn missing_skills(job: &SkillSet, resume: &SkillSet) -> SkillSet {
    job.difference(resume).cloned().collect()
}
