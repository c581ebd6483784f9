//! Axum route handlers for the Analysis API.

use axum::{
    extract::{rejection::JsonRejection, Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::pipeline::{run_analysis, AnalysisReport};
use crate::analysis::store::{list_analyses, save_analysis, NewAnalysis};
use crate::analysis::upload::{validate_form, UploadForm, UploadedDocument};
use crate::errors::AppError;
use crate::models::analysis::AnalysisRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SaveAnalysisRequest {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub resume_skills: Vec<String>,
    #[serde(default)]
    pub job_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub matching_score: f64,
}

#[derive(Debug, Serialize)]
pub struct SaveAnalysisResponse {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AnalysesQuery {
    pub user_name: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze
///
/// Multipart fields `resume` and `job_description` (pdf, docx or txt).
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let form = read_upload_form(&mut multipart).await?;
    let (resume, job) = validate_form(form)?;

    info!(
        "Analyzing resume '{}' against job description '{}'",
        resume.original_name, job.original_name
    );

    let report = run_analysis(
        &state.uploads,
        state.model.clone(),
        state.course_finder.as_ref(),
        resume,
        job,
    )
    .await?;

    Ok(Json(report))
}

/// POST /api/save-analysis
///
/// `user_name` is stored exactly as sent; blank names are rejected.
pub async fn handle_save_analysis(
    State(state): State<AppState>,
    payload: Result<Json<SaveAnalysisRequest>, JsonRejection>,
) -> Result<Json<SaveAnalysisResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let user_name = request
        .user_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("User name is required".to_string()))?;

    let id = save_analysis(
        &state.db,
        NewAnalysis {
            user_name,
            resume_skills: &request.resume_skills,
            job_skills: &request.job_skills,
            missing_skills: &request.missing_skills,
            matching_score: request.matching_score,
        },
    )
    .await?;

    Ok(Json(SaveAnalysisResponse {
        message: "Analysis saved successfully".to_string(),
        id,
    }))
}

/// GET /api/get-analyses?user_name=<optional>
///
/// An empty `user_name` means no filter. Newest first.
pub async fn handle_get_analyses(
    State(state): State<AppState>,
    Query(params): Query<AnalysesQuery>,
) -> Result<Json<Vec<AnalysisRow>>, AppError> {
    let filter = params.user_name.as_deref().filter(|name| !name.is_empty());
    let rows = list_analyses(&state.db, filter).await?;
    Ok(Json(rows))
}

/// Collects the two file fields. Fields without a filename are not files and are skipped.
async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let slot = match field.name() {
            Some("resume") => &mut form.resume,
            Some("job_description") => &mut form.job_description,
            _ => continue,
        };
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content = field.bytes().await?;
        if slot.is_none() {
            *slot = Some(UploadedDocument {
                original_name,
                content,
            });
        }
    }

    Ok(form)
}
