//! Analysis Orchestrator: one request, start to finish.
//!
//! Flow: store uploads → extract text → summarize → extract skills →
//!       missing = job − resume → matching score → course lookup →
//!       delete uploads → return report.
//!
//! Extraction and NLP are CPU-bound and run in `spawn_blocking`. Uploads are
//! deleted whether the pipeline succeeds or fails; a failure anywhere returns
//! an error and no partial report.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::extract::extract_text;
use crate::analysis::summary::summarize;
use crate::analysis::upload::{StoredUpload, UploadDir, ValidatedDocument};
use crate::courses::{courses_for_skills, Course, CourseFinder};
use crate::errors::AppError;
use crate::nlp::similarity::matching_score;
use crate::nlp::skills::{extract_skills, missing_skills, SkillSet};
use crate::nlp::LanguageModel;

/// Response payload of `POST /api/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub resume_summary: String,
    pub job_summary: String,
    pub resume_skills: Vec<String>,
    pub job_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matching_score: f64,
    pub courses: Vec<Course>,
}

/// Everything derived from the two texts, before any network call.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnalysis {
    pub resume_summary: String,
    pub job_summary: String,
    pub resume_skills: SkillSet,
    pub job_skills: SkillSet,
    pub missing_skills: SkillSet,
    pub matching_score: f64,
}

/// Pure, synchronous part of the pipeline.
pub fn analyze_texts(model: &dyn LanguageModel, resume_text: &str, job_text: &str) -> TextAnalysis {
    let resume_skills = extract_skills(model, resume_text);
    let job_skills = extract_skills(model, job_text);
    let missing_skills = missing_skills(&job_skills, &resume_skills);

    TextAnalysis {
        resume_summary: summarize(resume_text),
        job_summary: summarize(job_text),
        matching_score: matching_score(model, resume_text, job_text),
        resume_skills,
        job_skills,
        missing_skills,
    }
}

/// Runs the full analysis for two validated uploads.
pub async fn run_analysis(
    uploads: &UploadDir,
    model: Arc<dyn LanguageModel>,
    course_finder: &dyn CourseFinder,
    resume: ValidatedDocument,
    job: ValidatedDocument,
) -> Result<AnalysisReport, AppError> {
    let resume_file = uploads.store("resume", &resume).await?;
    let job_file = match uploads.store("job", &job).await {
        Ok(stored) => stored,
        Err(e) => {
            resume_file.remove().await;
            return Err(e.into());
        }
    };

    let outcome = analyze_stored(model, course_finder, &resume_file, &job_file).await;

    resume_file.remove().await;
    job_file.remove().await;

    outcome
}

async fn analyze_stored(
    model: Arc<dyn LanguageModel>,
    course_finder: &dyn CourseFinder,
    resume_file: &StoredUpload,
    job_file: &StoredUpload,
) -> Result<AnalysisReport, AppError> {
    let resume_file = resume_file.clone();
    let job_file = job_file.clone();

    let analysis = tokio::task::spawn_blocking(move || {
        let resume_text = extract_text(&resume_file.path, &resume_file.extension);
        let job_text = extract_text(&job_file.path, &job_file.extension);
        analyze_texts(model.as_ref(), &resume_text, &job_text)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Text analysis task failed: {e}")))?;

    let courses = courses_for_skills(course_finder, &analysis.missing_skills).await;

    info!(
        "Analysis complete: score={}, resume_skills={}, job_skills={}, missing={}, courses={}",
        analysis.matching_score,
        analysis.resume_skills.len(),
        analysis.job_skills.len(),
        analysis.missing_skills.len(),
        courses.len()
    );

    Ok(AnalysisReport {
        resume_summary: analysis.resume_summary,
        job_summary: analysis.job_summary,
        resume_skills: analysis.resume_skills.into_iter().collect(),
        job_skills: analysis.job_skills.into_iter().collect(),
        missing_skills: analysis.missing_skills.into_iter().collect(),
        matching_score: analysis.matching_score,
        courses,
    })
}
