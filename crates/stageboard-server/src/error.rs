use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use stageboard_core::error::StageboardError;

// ---------------------------------------------------------------------------
// Internal sentinel for explicit 400 Bad Request errors
// ---------------------------------------------------------------------------

/// Private sentinel error type used to carry an explicit HTTP 400 through
/// the `anyhow::Error` chain without touching the `StageboardError` enum.
#[derive(Debug)]
struct BadRequestError(String);

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequestError {}

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequestError(msg.into()).into())
    }
}

fn status_for(e: &StageboardError) -> StatusCode {
    match e {
        StageboardError::NotInitialized
        | StageboardError::UnsupportedNiche(_)
        | StageboardError::InvalidStatus(_)
        | StageboardError::InvalidWindow(_) => StatusCode::BAD_REQUEST,
        StageboardError::ItemNotFound(_) => StatusCode::NOT_FOUND,
        StageboardError::ItemExists(_)
        | StageboardError::DragInFlight(_)
        | StageboardError::NoDragInFlight => StatusCode::CONFLICT,
        StageboardError::UnknownStage { .. } | StageboardError::NicheMismatch { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        StageboardError::Http { .. } | StageboardError::Transport(_) => StatusCode::BAD_GATEWAY,
        StageboardError::Io(_) | StageboardError::Yaml(_) | StageboardError::Json(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(b) = self.0.downcast_ref::<BadRequestError>() {
            let body = serde_json::json!({ "error": b.0.clone() });
            return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
        }

        let status = self
            .0
            .downcast_ref::<StageboardError>()
            .map(status_for)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
