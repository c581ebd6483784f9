//! YouTube Data API v3 search backend for `CourseFinder`.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{Course, CourseError, CourseFinder};

const RESULTS_PER_SKILL: u32 = 5;
const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

#[derive(Clone)]
pub struct YouTubeCourseFinder {
    client: Client,
    api_key: Option<String>,
    search_url: String,
}

impl YouTubeCourseFinder {
    pub fn new(api_key: Option<String>, search_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            search_url,
        }
    }
}

#[async_trait]
impl CourseFinder for YouTubeCourseFinder {
    async fn find_courses(&self, skill: &str) -> Result<Vec<Course>, CourseError> {
        let api_key = self.api_key.as_deref().ok_or(CourseError::MissingApiKey)?;
        let query = search_query(skill);
        let max_results = RESULTS_PER_SKILL.to_string();

        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("part", "snippet"),
                ("q", query.as_str()),
                ("maxResults", max_results.as_str()),
                ("type", "video"),
                ("key", api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CourseError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CourseError::MalformedResponse(e.to_string()))?;
        let courses = parse_search_response(&body);
        debug!("Video search for '{query}' returned {} courses", courses.len());
        Ok(courses)
    }
}

pub fn search_query(skill: &str) -> String {
    format!("{skill} course")
}

/// Keeps only items carrying `id.videoId`, `snippet.title` and
/// `snippet.channelTitle`; anything else is skipped.
pub fn parse_search_response(body: &Value) -> Vec<Course> {
    let Some(items) = body.get("items").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let video_id = item.pointer("/id/videoId")?.as_str()?;
            let title = item.pointer("/snippet/title")?.as_str()?;
            let channel = item.pointer("/snippet/channelTitle")?.as_str()?;
            if video_id.is_empty() || title.is_empty() || channel.is_empty() {
                return None;
            }
            Some(Course {
                title: title.to_string(),
                channel: channel.to_string(),
                video_link: format!("{WATCH_URL_PREFIX}{video_id}"),
            })
        })
        .collect()
}

/// Pulls `error.message` out of a Google API error body, falling back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message")?.as_str().map(String::from))
        .unwrap_or_else(|| body.to_string())
}
