use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors a handler can bail out with. Expected outcomes (bad forms, failed owner
/// checks, bad credentials) are handled in the handlers; what reaches here is either a
/// 404 or a server fault.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error(transparent)]
    Api(#[from] api::Error),
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl WebError {
    pub fn not_found() -> Self {
        WebError::Api(api::Error::NotFound)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::Api(api::Error::NotFound) => {
                (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"}))).into_response()
            }
            other => {
                tracing::error!("Request failed: {:#}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Internal server error"})),
                )
                    .into_response()
            }
        }
    }
}
