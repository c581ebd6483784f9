use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// One persisted analysis. Skill lists are JSON arrays in the database and
/// serialize back out as plain arrays.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AnalysisRow {
    pub id: i64,
    pub user_name: String,
    pub resume_skills: Json<Vec<String>>,
    pub job_skills: Json<Vec<String>>,
    pub missing_skills: Json<Vec<String>>,
    pub matching_score: f64,
    pub created_at: DateTime<Utc>,
}
