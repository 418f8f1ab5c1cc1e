// Web server: Axum-based single-page comment analysis form.
//
// GET / serves the embedded form. All /api/* routes serve JSON. The scorer
// is loaded once at startup and shared read-only across requests; each
// prediction runs on the blocking pool.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::toxicity::ToxicityScorer;

pub mod handlers;

static INDEX_HTML: &str = include_str!("index.html");

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<dyn ToxicityScorer>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(scorer: Arc<dyn ToxicityScorer>, port: u16, bind: &str) -> Result<()> {
    let app = build_router(AppState { scorer });

    let addr = format!("{bind}:{port}");
    info!("toxfilter web form listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/examples", get(handlers::examples::list_examples))
        .route("/api/analyze", post(handlers::analyze::analyze_comment))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check: always returns 200 OK.
async fn health() -> impl IntoResponse {
    (StatusCode::OK, axum::Json(serde_json::json!({ "status": "ok" })))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
