mod analysis;
mod config;
mod courses;
mod db;
mod errors;
mod models;
mod nlp;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::upload::UploadDir;
use crate::config::Config;
use crate::courses::YouTubeCourseFinder;
use crate::db::{create_pool, init_schema};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skillgap API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;

    // Upload directory
    let uploads = UploadDir::new(config.upload_dir.clone());
    uploads
        .ensure_exists()
        .await
        .with_context(|| format!("Cannot create upload dir {}", uploads.root().display()))?;
    info!("Uploads stored under {}", uploads.root().display());

    // Language model: loaded once, shared read-only for the life of the process.
    // Loading may download weights over blocking I/O.
    let model = tokio::task::spawn_blocking(nlp::shared_model)
        .await
        .context("Language model initialization panicked")?;
    info!("Language model initialized (backend: {})", model.name());

    // Course finder
    if config.youtube_api_key.is_none() {
        warn!("YOUTUBE_API_KEY is not set; course recommendations will be empty");
    }
    let course_finder = Arc::new(YouTubeCourseFinder::new(
        config.youtube_api_key.clone(),
        config.youtube_search_url.clone(),
    ));

    let state = AppState {
        db,
        uploads,
        model,
        course_finder,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
