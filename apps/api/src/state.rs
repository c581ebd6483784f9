use std::sync::Arc;

use sqlx::SqlitePool;

use crate::analysis::upload::UploadDir;
use crate::courses::CourseFinder;
use crate::nlp::LanguageModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Temporary home of uploads while an analysis runs.
    pub uploads: UploadDir,
    /// Process-wide language model; read-only after startup.
    pub model: Arc<dyn LanguageModel>,
    /// Pluggable video search. Default: YouTubeCourseFinder.
    pub course_finder: Arc<dyn CourseFinder>,
}
