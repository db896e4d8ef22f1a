//! HTTP boundary
//!
//! - `GET /api/letterboxd?url=<list url>` - crawl a list
//! - `GET /api/letterboxd/film?url=<film url>` - high resolution poster
//! - `GET /api/health` - liveness check
//!
//! Failures are answered as `{ "error": "<message>" }` with 400, 404 or 500.

use std::any::Any;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::application::MoviePicker;
use crate::commands::movie_commands::INTERNAL_ERROR;
use crate::commands::{self, CommandError};
use crate::infrastructure::config::AppConfig;

const LIST_CACHE_CONTROL: &str = "no-store";
const FILM_CACHE_CONTROL: &str = "public, max-age=3600";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub picker: Arc<MoviePicker>,
}

impl AppState {
    pub fn new(picker: MoviePicker) -> Self {
        Self {
            picker: Arc::new(picker),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UrlQuery {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

impl CommandError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CommandError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}

/// Build the API router with the standard middleware stack
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health_check))
        .route("/letterboxd", get(list_movies))
        .route("/letterboxd/film", get(film_poster))
        .with_state(state);

    apply_middleware(Router::new().nest("/api", api))
}

/// Panic recovery, CORS and request tracing
///
/// A panicking request is answered with the generic internal error payload;
/// other in-flight requests are unaffected.
pub fn apply_middleware(app: Router) -> Router {
    app.layer(CatchPanicLayer::custom(panic_response))
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods([Method::GET])
                .allow_headers(cors::Any),
        )
        .layer(TraceLayer::new_for_http())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!("Request handler panicked: {}", detail);

    CommandError::internal(INTERNAL_ERROR).into_response()
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<UrlQuery>,
) -> Result<Response, CommandError> {
    let response = commands::load_list(&state.picker, query.url.as_deref()).await?;
    Ok(([(header::CACHE_CONTROL, LIST_CACHE_CONTROL)], Json(response)).into_response())
}

async fn film_poster(
    State(state): State<AppState>,
    Query(query): Query<UrlQuery>,
) -> Result<Response, CommandError> {
    let response = commands::film_poster(&state.picker, query.url.as_deref()).await?;
    Ok(([(header::CACHE_CONTROL, FILM_CACHE_CONTROL)], Json(response)).into_response())
}

/// Bind the configured address and serve until Ctrl-C
pub async fn run_server(config: &AppConfig) -> Result<()> {
    let picker = MoviePicker::from_config(&config.scraper)?;
    let app = create_router(AppState::new(picker));

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Movie picker listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
    }
}
