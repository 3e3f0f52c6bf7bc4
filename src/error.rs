use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::repository::RepositoryError;

/// Failure of a user command (vote, post, comment).
///
/// Auth and validation failures are raised before any remote call is made.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("You'll need to sign in to do that")]
    NotAuthenticated,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Remote(#[from] RepositoryError),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Remote(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
