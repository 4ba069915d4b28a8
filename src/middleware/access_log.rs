//! Request/response logging.
//!
//! Logs `REQUEST: ...` at debug before dispatch and one `RESPONSE: ...` line
//! after, with the level chosen from the final status code.

use crate::state::AppState;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, time::Instant};
use tracing::{Level, debug, error, info, warn};

pub async fn access_log(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let ip = client_ip(&req);

    debug!(parent: &state.span, "REQUEST: {} {} ({})", method, uri, ip);

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    let line = format!(
        "RESPONSE: {} {} {} ({}) {:.2}ms",
        status.as_u16(),
        method,
        uri,
        ip,
        elapsed_ms
    );
    let span = &state.span;
    let level = severity(status);
    if level == Level::ERROR {
        error!(parent: span, "{}", line);
    } else if level == Level::WARN {
        warn!(parent: span, "{}", line);
    } else {
        info!(parent: span, "{}", line);
    }

    response
}

/// `< 400` info, `4xx` warn, `>= 500` error.
pub fn severity(status: StatusCode) -> Level {
    match status.as_u16() {
        0..=399 => Level::INFO,
        400..=499 => Level::WARN,
        _ => Level::ERROR,
    }
}

/// Peer address when the server was started with connect info, else `-`.
fn client_ip(req: &Request) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".into())
}
