pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    response::Html,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::analysis::upload::MAX_UPLOAD_BYTES;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health::health_handler))
        .route("/api/analyze", post(handlers::handle_analyze))
        .route("/api/save-analysis", post(handlers::handle_save_analysis))
        .route("/api/get-analyses", get(handlers::handle_get_analyses))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::Path;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::analysis::upload::UploadDir;
    use crate::courses::{Course, CourseError, CourseFinder};
    use crate::db::{create_pool, init_schema};
    use crate::nlp::HeuristicModel;

    const BOUNDARY: &str = "skillgap-test-boundary";
    const RESUME: &str = "Backend engineer at Initech. Built services with Docker and PostgreSQL.";
    const JOB: &str = "We are hiring at Globex. You will run Docker, Kafka and Terraform in production.";

    /// Five well-formed results per skill.
    struct StubFinder;

    #[async_trait]
    impl CourseFinder for StubFinder {
        async fn find_courses(&self, skill: &str) -> Result<Vec<Course>, CourseError> {
            Ok((0..5)
                .map(|i| Course {
                    title: format!("{skill} tutorial {i}"),
                    channel: "Stub Channel".to_string(),
                    video_link: format!("https://www.youtube.com/watch?v={}{i}", skill.len()),
                })
                .collect())
        }
    }

    struct TestApp {
        router: Router,
        _dir: TempDir,
        upload_root: std::path::PathBuf,
    }

    async fn test_app() -> TestApp {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite:{}", dir.path().join("test.db").display());
        let db = create_pool(&url).await.unwrap();
        init_schema(&db).await.unwrap();

        let upload_root = dir.path().join("uploads");
        let uploads = UploadDir::new(&upload_root);
        uploads.ensure_exists().await.unwrap();

        let state = AppState {
            db,
            uploads,
            model: Arc::new(HeuristicModel),
            course_finder: Arc::new(StubFinder),
        };
        TestApp {
            router: build_router(state),
            _dir: dir,
            upload_root,
        }
    }

    fn multipart_request(parts: &[(&str, &str, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (field, filename, content) in parts {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n{content}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn string_set(value: &Value) -> BTreeSet<String> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    fn dir_is_empty(path: &Path) -> bool {
        std::fs::read_dir(path).unwrap().next().is_none()
    }

    async fn save(app: &TestApp, user: &str, score: f64) -> (StatusCode, Value) {
        let body = json!({
            "user_name": user,
            "resume_skills": ["Rust"],
            "job_skills": ["Rust", "Kafka"],
            "missing_skills": ["Kafka"],
            "matching_score": score
        });
        send(app, json_request("/api/save-analysis", &body.to_string())).await
    }

    #[tokio::test]
    async fn test_analyze_returns_full_report() {
        let app = test_app().await;
        let request = multipart_request(&[
            ("resume", "resume.txt", RESUME),
            ("job_description", "job.TXT", JOB),
        ]);

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK, "body: {body}");

        let resume_skills = string_set(&body["resume_skills"]);
        let job_skills = string_set(&body["job_skills"]);
        let missing = string_set(&body["missing_skills"]);
        let expected: BTreeSet<String> = job_skills.difference(&resume_skills).cloned().collect();
        assert_eq!(missing, expected);
        assert!(missing.contains("Kafka"));

        let score = body["matching_score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&score));
        assert!(((score * 100.0).round() - score * 100.0).abs() < 1e-6);

        let courses = body["courses"].as_array().unwrap();
        assert_eq!(courses.len(), 10);
        for course in courses {
            assert!(!course["title"].as_str().unwrap().is_empty());
            assert!(!course["channel"].as_str().unwrap().is_empty());
            assert!(course["video_link"]
                .as_str()
                .unwrap()
                .starts_with("https://www.youtube.com/watch?v="));
        }

        assert!(body["resume_summary"].as_str().unwrap().ends_with("..."));
        assert!(body["job_summary"].as_str().unwrap().starts_with("We are hiring"));
        assert!(dir_is_empty(&app.upload_root));
    }

    #[tokio::test]
    async fn test_analyze_is_repeatable() {
        let app = test_app().await;
        let parts = [
            ("resume", "resume.txt", RESUME),
            ("job_description", "job.txt", JOB),
        ];
        let (_, first) = send(&app, multipart_request(&parts)).await;
        let (_, second) = send(&app, multipart_request(&parts)).await;

        assert_eq!(first["resume_skills"], second["resume_skills"]);
        assert_eq!(first["job_skills"], second["job_skills"]);
        assert_eq!(first["missing_skills"], second["missing_skills"]);
        assert_eq!(first["matching_score"], second["matching_score"]);
    }

    #[tokio::test]
    async fn test_analyze_rejects_disallowed_extension_without_side_effects() {
        let app = test_app().await;
        let request = multipart_request(&[
            ("resume", "resume.txt", RESUME),
            ("job_description", "setup.exe", "MZ"),
        ]);

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid file type"));
        assert!(dir_is_empty(&app.upload_root));

        let (_, rows) = send(&app, get_request("/api/get-analyses")).await;
        assert_eq!(rows, json!([]));
    }

    #[tokio::test]
    async fn test_analyze_requires_both_files() {
        let app = test_app().await;
        let request = multipart_request(&[("resume", "resume.txt", RESUME)]);

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("required"));
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_filename() {
        let app = test_app().await;
        let request = multipart_request(&[
            ("resume", "", RESUME),
            ("job_description", "job.txt", JOB),
        ]);

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No files selected");
    }

    #[tokio::test]
    async fn test_analyze_rejects_oversized_upload() {
        let app = test_app().await;
        let big = "a".repeat(MAX_UPLOAD_BYTES + 1024);
        let request = multipart_request(&[
            ("resume", "resume.txt", big.as_str()),
            ("job_description", "job.txt", JOB),
        ]);

        let (status, _) = send(&app, request).await;
        assert!(status.is_client_error(), "status was {status}");
        assert!(dir_is_empty(&app.upload_root));
    }

    #[tokio::test]
    async fn test_save_without_user_name_is_rejected() {
        let app = test_app().await;
        let body = json!({"resume_skills": ["Rust"], "matching_score": 50.0});
        let (status, response) =
            send(&app, json_request("/api/save-analysis", &body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "User name is required");

        let (status, _) = save(&app, "   ", 10.0).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, rows) = send(&app, get_request("/api/get-analyses")).await;
        assert_eq!(rows, json!([]));
    }

    #[tokio::test]
    async fn test_save_rejects_malformed_json() {
        let app = test_app().await;
        let (status, body) = send(&app, json_request("/api/save-analysis", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_save_then_list() {
        let app = test_app().await;
        let (status, body) = save(&app, "alice", 72.25).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Analysis saved successfully");

        let (status, rows) = send(&app, get_request("/api/get-analyses")).await;
        assert_eq!(status, StatusCode::OK);
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], body["id"]);
        assert_eq!(rows[0]["user_name"], "alice");
        assert_eq!(rows[0]["resume_skills"], json!(["Rust"]));
        assert_eq!(rows[0]["job_skills"], json!(["Rust", "Kafka"]));
        assert_eq!(rows[0]["missing_skills"], json!(["Kafka"]));
        assert_eq!(rows[0]["matching_score"], 72.25);
        assert!(rows[0]["created_at"].is_string());
    }

    #[tokio::test]
    async fn test_get_analyses_filters_and_orders_newest_first() {
        let app = test_app().await;
        let (_, a1) = save(&app, "alice", 1.0).await;
        let (_, b1) = save(&app, "bob", 2.0).await;
        let (_, a2) = save(&app, "alice", 3.0).await;

        let ids = |rows: &Value| -> Vec<Value> {
            rows.as_array().unwrap().iter().map(|r| r["id"].clone()).collect()
        };

        let (_, alice) = send(&app, get_request("/api/get-analyses?user_name=alice")).await;
        assert_eq!(ids(&alice), vec![a2["id"].clone(), a1["id"].clone()]);
        assert!(alice
            .as_array()
            .unwrap()
            .iter()
            .all(|r| r["user_name"] == "alice"));

        let (_, all) = send(&app, get_request("/api/get-analyses")).await;
        assert_eq!(
            ids(&all),
            vec![a2["id"].clone(), b1["id"].clone(), a1["id"].clone()]
        );

        let (_, unfiltered) = send(&app, get_request("/api/get-analyses?user_name=")).await;
        assert_eq!(ids(&unfiltered), ids(&all));
    }

    #[tokio::test]
    async fn test_user_name_with_surrounding_spaces_round_trips() {
        let app = test_app().await;
        let (status, saved) = save(&app, " alice ", 4.0).await;
        assert_eq!(status, StatusCode::OK);

        let (_, rows) = send(&app, get_request("/api/get-analyses?user_name=%20alice%20")).await;
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], saved["id"]);
        assert_eq!(rows[0]["user_name"], " alice ");

        let (_, exact) = send(&app, get_request("/api/get-analyses?user_name=alice")).await;
        assert_eq!(exact, json!([]));
    }

    #[tokio::test]
    async fn test_analyze_degrades_unreadable_file() {
        let app = test_app().await;
        let request = multipart_request(&[
            ("resume", "resume.docx", "this is not a zip archive"),
            ("job_description", "job.txt", JOB),
        ]);

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK, "body: {body}");
        assert!(body["resume_summary"]
            .as_str()
            .unwrap()
            .starts_with("Error reading file:"));
        assert!(body["job_summary"].as_str().unwrap().starts_with("We are hiring"));
        assert!(string_set(&body["job_skills"]).contains("Kafka"));
        assert!(dir_is_empty(&app.upload_root));
    }

    #[tokio::test]
    async fn test_analyze_degrades_invalid_utf8_text() {
        let app = test_app().await;
        let mut body = Vec::new();
        for (field, filename, content) in [
            ("resume", "resume.txt", &[0xff_u8, 0xfe, 0xfd][..]),
            ("job_description", "job.txt", JOB.as_bytes()),
        ] {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK, "body: {body}");
        assert!(body["resume_summary"]
            .as_str()
            .unwrap()
            .starts_with("Error reading file:"));
        assert_eq!(body["resume_skills"], json!([]));
        assert!(dir_is_empty(&app.upload_root));
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let app = test_app().await;
        let (status, body) = send(&app, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "skillgap-api");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_index_serves_landing_page() {
        let app = test_app().await;
        let response = app.router.clone().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("/api/analyze"));
    }
}
