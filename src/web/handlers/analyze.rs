// POST /api/analyze: score one comment.
//
// Body: {"text": "..."}. Returns the six scores, the verdict, the
// interpretation and the processed text. Blank text is a 400; a scorer
// failure is a 500 carrying the error chain.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::warn;

use crate::toxicity;
use crate::web::{api_error, AppState};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
}

pub async fn analyze_comment(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    if request.text.trim().is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "Please enter a comment to analyze");
    }

    let scorer = Arc::clone(&state.scorer);
    let result =
        tokio::task::spawn_blocking(move || toxicity::analyze(scorer.as_ref(), &request.text))
            .await;

    match result {
        Ok(Ok(analysis)) => Json(analysis).into_response(),
        Ok(Err(e)) => {
            let message = format!("{e:#}");
            warn!(error = %message, "Analysis failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, &message)
        }
        Err(e) => {
            warn!(error = %e, "Analysis task panicked");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed")
        }
    }
}
