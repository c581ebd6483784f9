//! Course Finder: looks up instructional videos for missing skills.
//!
//! Lookups are fallible by type (`CourseError`) so callers can tell
//! "no results" apart from "API failure". The analysis pipeline logs failures
//! and carries on with an empty list.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub mod youtube;

pub use youtube::YouTubeCourseFinder;

/// At most this many missing skills are looked up per analysis.
pub const MAX_SKILLS_LOOKED_UP: usize = 3;
/// Upper bound on courses returned per analysis.
pub const MAX_COURSES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub channel: String,
    pub video_link: String,
}

#[derive(Debug, Error)]
pub enum CourseError {
    #[error("no video search API key configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed search response: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait CourseFinder: Send + Sync {
    async fn find_courses(&self, skill: &str) -> Result<Vec<Course>, CourseError>;
}

/// Looks up the first `MAX_SKILLS_LOOKED_UP` skills in order and concatenates
/// the results, capped at `MAX_COURSES`. Failed lookups contribute nothing.
pub async fn courses_for_skills<'a, I>(finder: &dyn CourseFinder, skills: I) -> Vec<Course>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut courses = Vec::new();
    for skill in skills.into_iter().take(MAX_SKILLS_LOOKED_UP) {
        match finder.find_courses(skill).await {
            Ok(found) => courses.extend(found),
            Err(e) => warn!("Course lookup for '{skill}' failed: {e}"),
        }
    }
    courses.truncate(MAX_COURSES);
    courses
}
