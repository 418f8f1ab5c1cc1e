// GET /api/examples: the built-in example comments for the form's picker.

use axum::response::IntoResponse;
use axum::Json;

use crate::toxicity::examples::EXAMPLES;

pub async fn list_examples() -> impl IntoResponse {
    Json(EXAMPLES)
}
