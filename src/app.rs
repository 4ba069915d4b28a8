//! Application factory: route table, fallback and global layers in one
//! servable `Router`.

use crate::{
    config::ServiceConfig,
    handlers::default_handler::unknown_endpoint,
    middleware::{
        access_log::access_log,
        error_envelope::{error_envelope, handle_panic},
    },
    routes::routes::routes,
    services::address_book_service::AddressBookService,
    state::AppState,
};
use axum::{Router, middleware};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, compression::CompressionLayer};
use tracing::Span;

/// Build the address-book application.
///
/// `debug` attaches error traces to error envelopes. Every request and
/// access-log event is recorded under `span`.
pub fn make_addrservice_app(
    service: Arc<dyn AddressBookService>,
    config: Arc<ServiceConfig>,
    debug: bool,
    span: Span,
) -> Router {
    build_app(AppState::new(service, config, debug, span))
}

/// Build the application from a prepared state, e.g. one with a custom
/// default route.
pub fn build_app(state: AppState) -> Router {
    // Layers run outermost-last: compression wraps the access log, which
    // wraps the envelope, which wraps panic recovery.
    routes()
        .fallback(unknown_endpoint)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(state.clone(), error_envelope))
        .layer(middleware::from_fn_with_state(state.clone(), access_log))
        .layer(CompressionLayer::new())
        .with_state(state)
}
