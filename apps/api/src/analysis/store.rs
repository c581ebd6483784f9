//! Result Store: insert and list persisted analyses.
//! Rows are immutable once written; there is no update or delete.

use sqlx::types::Json;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::analysis::AnalysisRow;

/// Parameters for saving one analysis.
pub struct NewAnalysis<'a> {
    pub user_name: &'a str,
    pub resume_skills: &'a [String],
    pub job_skills: &'a [String],
    pub missing_skills: &'a [String],
    pub matching_score: f64,
}

/// Inserts one row and returns its id. `created_at` is assigned by the database.
pub async fn save_analysis(pool: &SqlitePool, analysis: NewAnalysis<'_>) -> Result<i64, sqlx::Error> {
    let NewAnalysis {
        user_name,
        resume_skills,
        job_skills,
        missing_skills,
        matching_score,
    } = analysis;

    let result = sqlx::query(
        r#"
        INSERT INTO analysis (user_name, resume_skills, job_skills, missing_skills, matching_score)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(user_name)
    .bind(Json(resume_skills))
    .bind(Json(job_skills))
    .bind(Json(missing_skills))
    .bind(matching_score)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    info!("Saved analysis {id} for user '{user_name}'");
    Ok(id)
}

/// Returns analyses newest first, optionally restricted to one user.
pub async fn list_analyses(
    pool: &SqlitePool,
    user_name: Option<&str>,
) -> Result<Vec<AnalysisRow>, sqlx::Error> {
    match user_name {
        Some(name) => {
            sqlx::query_as::<_, AnalysisRow>(
                "SELECT * FROM analysis WHERE user_name = ? ORDER BY created_at DESC, id DESC",
            )
            .bind(name)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, AnalysisRow>(
                "SELECT * FROM analysis ORDER BY created_at DESC, id DESC",
            )
            .fetch_all(pool)
            .await
        }
    }
}
