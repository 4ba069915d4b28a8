//! Health & readiness handlers.
//!
//! - GET /healthz    -> liveness, reports process uptime
//! - GET /readiness  -> readiness snapshot from the address-book service

use crate::{
    errors::AppError, middleware::error_envelope::KeepBody, models::health::Liveness,
    state::AppState,
};
use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};

/// `GET /healthz`
///
/// Always 200 while the process is up. Never touches storage.
pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(Liveness {
            uptime_millis: state.service.uptime_millis(),
        }),
    )
}

/// `GET /readiness`
///
/// Returns the service's status snapshot unmodified: HTTP 200 when it reports
/// `ready: true`, HTTP 503 otherwise. The 503 keeps the snapshot as its body.
pub async fn readiness(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let info = state.service.status().await.map_err(AppError::unexpected)?;

    let status = if info.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    Ok((status, Extension(KeepBody), Json(info)))
}
