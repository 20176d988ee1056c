use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::email::templates;
use crate::state::SharedState;
use crate::submission::pipeline::{self, Outcome};

pub const SUCCESS_MESSAGE: &str = "Data received and processed";

/// Always answers 200; the JSON `success` flag tells the form what happened.
pub async fn submit(State(state): State<SharedState>, body: Bytes) -> Response {
    match pipeline::run(&state, &body).await {
        Ok(Outcome::Recorded) => {}
        Ok(Outcome::Degraded { raw, cause }) => {
            tracing::error!("Sheet/Email error: {cause}");
            let mail = templates::render_sheet_error(&raw, &cause.to_string(), state.config.sheet_id());
            pipeline::notify_best_effort(&state, templates::SHEET_ERROR_SUBJECT, &mail).await;
        }
        Err(error) => {
            tracing::error!("Submission rejected: {error}");
            let raw_body = String::from_utf8_lossy(&body);
            let mail = templates::render_form_error(&error.to_string(), &raw_body);
            pipeline::notify_best_effort(&state, templates::FORM_ERROR_SUBJECT, &mail).await;

            return (
                StatusCode::OK,
                Json(json!({ "success": false, "error": error.to_string() })),
            )
                .into_response();
        }
    }

    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": SUCCESS_MESSAGE })),
    )
        .into_response()
}
