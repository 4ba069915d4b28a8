//! Renders every non-2xx response as the JSON error envelope
//! `{method, uri, code, message, trace?}`.

use crate::{
    errors::{AppError, ErrorDetails, ErrorEnvelope},
    state::AppState,
};
use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;
use tracing::error;

const JSON_UTF8: &str = "application/json; charset=UTF-8";

/// Marks a non-2xx response whose body is the real answer, e.g. the
/// readiness snapshot behind a 503. The envelope layer leaves it untouched.
#[derive(Clone, Copy, Debug)]
pub struct KeepBody;

pub async fn error_envelope(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let status = response.status();
    if status.is_success() || response.extensions().get::<KeepBody>().is_some() {
        return response;
    }

    let (mut parts, _body) = response.into_parts();
    let details = parts.extensions.remove::<ErrorDetails>();
    let message = details
        .as_ref()
        .map(|d| d.message.as_str())
        .or_else(|| status.canonical_reason())
        .unwrap_or("Unknown Error");
    let trace = details
        .as_ref()
        .and_then(|d| d.trace.as_deref())
        .filter(|_| state.debug);

    let envelope = ErrorEnvelope {
        method: method.as_str(),
        uri: &path,
        code: status.as_u16(),
        message,
        trace,
    };

    let body = match serde_json::to_vec(&envelope) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(parent: &state.span, "failed to encode error envelope: {}", err);
            return Response::from_parts(parts, Body::empty());
        }
    };

    parts
        .headers
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(body))
}

/// Turns a handler panic into a 500 whose trace is the panic payload.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(msg) = err.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = err.downcast_ref::<&str>() {
        (*msg).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::internal("Internal Server Error")
        .with_trace(format!("panic: {detail}"))
        .into_response()
}
