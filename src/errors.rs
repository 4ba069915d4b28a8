use crate::services::address_book_service::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::{error::Error, fmt};

pub const INVALID_JSON_BODY: &str = "Invalid JSON body";

/// A failed request: the status to answer with and the message for the caller.
///
/// The JSON body is rendered later by the error-envelope middleware, which
/// knows the request method and path.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub trace: Option<String>,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
            trace: None,
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    /// Shortcut for 404 Not Found
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    /// Shortcut for 400 Bad Request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    /// A request body that is not a JSON object.
    pub fn invalid_json(err: serde_json::Error) -> Self {
        Self::bad_request(INVALID_JSON_BODY).caused_by(&err)
    }

    /// A service failure the handler expects, answered with `status`.
    pub fn expected(status: StatusCode, err: ServiceError) -> Self {
        Self::new(status, err.to_string()).caused_by(&err)
    }

    /// A service failure the handler has no specific mapping for.
    pub fn unexpected(err: ServiceError) -> Self {
        Self::internal("Internal Server Error").caused_by(&err)
    }

    /// Record the error chain that led here. Only shown in debug mode.
    pub fn caused_by(mut self, err: &(dyn Error + 'static)) -> Self {
        self.trace = Some(format_chain(err));
        self
    }

    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

/// Details of an [`AppError`] carried on the response for the envelope layer.
#[derive(Clone, Debug)]
pub struct ErrorDetails {
    pub message: String,
    pub trace: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut response = self.status.into_response();
        response.extensions_mut().insert(ErrorDetails {
            message: self.message,
            trace: self.trace,
        });
        response
    }
}

/// The uniform JSON body of every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope<'a> {
    pub method: &'a str,
    pub uri: &'a str,
    pub code: u16,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<&'a str>,
}

fn format_chain(err: &(dyn Error + 'static)) -> String {
    let mut lines = vec![format!("{err:?}")];
    let mut source = err.source();
    while let Some(cause) = source {
        lines.push(format!("caused by: {cause}"));
        source = cause.source();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_keep_their_message() {
        let not_found = AppError::expected(
            StatusCode::NOT_FOUND,
            ServiceError::NotFound("abc".into()),
        );
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.message, "address `abc` not found");
        assert!(not_found.trace.unwrap().contains("NotFound"));

        let invalid = AppError::expected(
            StatusCode::BAD_REQUEST,
            ServiceError::InvalidInput("bad name".into()),
        );
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
        assert_eq!(invalid.message, "bad name");
    }

    #[test]
    fn unexpected_service_errors_become_internal() {
        let broken = AppError::unexpected(ServiceError::Unavailable(anyhow::anyhow!("disk full")));
        assert_eq!(broken.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(broken.message, "Internal Server Error");
        assert!(broken.trace.unwrap().contains("disk full"));
    }

    #[test]
    fn invalid_json_keeps_parser_error_as_trace() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app = AppError::invalid_json(err);
        assert_eq!(app.status, StatusCode::BAD_REQUEST);
        assert_eq!(app.message, INVALID_JSON_BODY);
        assert!(app.trace.is_some());
    }

    #[test]
    fn into_response_carries_details_without_body() {
        let response = AppError::not_found("gone").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let details = response.extensions().get::<ErrorDetails>().unwrap();
        assert_eq!(details.message, "gone");
        assert!(details.trace.is_none());
    }

    #[test]
    fn envelope_omits_trace_when_absent() {
        let envelope = ErrorEnvelope {
            method: "GET",
            uri: "/nonexistent",
            code: 404,
            message: "Unknown Endpoint",
            trace: None,
        };
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            serde_json::json!({
                "method": "GET",
                "uri": "/nonexistent",
                "code": 404,
                "message": "Unknown Endpoint"
            })
        );
    }
}
