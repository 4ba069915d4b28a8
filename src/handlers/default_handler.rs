//! Fallback for requests that match no declared route.

use crate::{errors::AppError, state::AppState};
use axum::{extract::State, http::StatusCode};

/// Status and message returned for unmatched routes.
#[derive(Clone, Debug)]
pub struct DefaultRoute {
    pub status: StatusCode,
    pub message: String,
}

impl DefaultRoute {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn error(&self) -> AppError {
        AppError::new(self.status, self.message.clone())
    }
}

impl Default for DefaultRoute {
    fn default() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Unknown Endpoint")
    }
}

/// Any method, any unmatched path. Always fails.
pub async fn unknown_endpoint(State(state): State<AppState>) -> AppError {
    state.default_route.error()
}
