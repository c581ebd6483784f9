//! Upload validation and temporary storage.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;

pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "txt"];

/// Combined request body limit, enforced by the router.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// An uploaded file as received from the client, not yet on disk.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub original_name: String,
    pub content: Bytes,
}

/// The two multipart file fields the analysis endpoint expects.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub resume: Option<UploadedDocument>,
    pub job_description: Option<UploadedDocument>,
}

/// A document that passed validation; `extension` is lowercase and allow-listed.
#[derive(Debug, Clone)]
pub struct ValidatedDocument {
    pub original_name: String,
    pub extension: String,
    pub content: Bytes,
}

/// Lowercase extension after the last '.', if it is allow-listed.
pub fn allowed_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Checks presence, filenames and extensions of both files. Nothing touches disk here.
pub fn validate_form(form: UploadForm) -> Result<(ValidatedDocument, ValidatedDocument), AppError> {
    let (Some(resume), Some(job)) = (form.resume, form.job_description) else {
        return Err(AppError::BadRequest(
            "Both resume and job description files are required".to_string(),
        ));
    };

    if resume.original_name.is_empty() || job.original_name.is_empty() {
        return Err(AppError::BadRequest("No files selected".to_string()));
    }

    match (
        allowed_extension(&resume.original_name),
        allowed_extension(&job.original_name),
    ) {
        (Some(resume_ext), Some(job_ext)) => Ok((
            ValidatedDocument {
                original_name: resume.original_name,
                extension: resume_ext,
                content: resume.content,
            },
            ValidatedDocument {
                original_name: job.original_name,
                extension: job_ext,
                content: job.content,
            },
        )),
        _ => Err(AppError::BadRequest(
            "Invalid file type. Only PDF, DOCX, and TXT files are allowed".to_string(),
        )),
    }
}

/// Directory holding uploads for the duration of one analysis.
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_exists(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Writes `doc` as `<prefix>_<uuid>.<ext>` so concurrent requests never collide.
    pub async fn store(
        &self,
        prefix: &str,
        doc: &ValidatedDocument,
    ) -> std::io::Result<StoredUpload> {
        let filename = format!("{prefix}_{}.{}", Uuid::new_v4(), doc.extension);
        let path = self.root.join(filename);
        tokio::fs::write(&path, &doc.content).await?;
        Ok(StoredUpload {
            path,
            extension: doc.extension.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub path: PathBuf,
    pub extension: String,
}

impl StoredUpload {
    /// Best-effort delete. Failures are logged, never returned.
    pub async fn remove(self) {
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            warn!("Failed to delete upload {}: {e}", self.path.display());
        }
    }
}
