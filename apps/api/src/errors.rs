use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Suffix appended to every failure banner shown to the user.
pub const SUPPORT_HINT: &str = "Please try again or contact support.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-2xx reply from the generation endpoint, carried verbatim.
    #[error("Error: {status} , {body}")]
    Upstream { status: u16, body: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Upstream { status, body } => AppError::Upstream { status, body },
            other => AppError::Internal(other.into()),
        }
    }
}

impl AppError {
    /// The banner text a user sees for this failure.
    pub fn banner(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::Upstream { .. } => format!("{self}. {SUPPORT_HINT}"),
            AppError::Internal(_) => {
                format!("An unexpected error occurred while generating content. {SUPPORT_HINT}")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Upstream { status, body } => {
                tracing::error!("Generation endpoint returned {status}: {body}");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.banner()
            }
        }));

        (status, body).into_response()
    }
}
