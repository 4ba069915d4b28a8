use crate::{
    config::ServiceConfig, handlers::default_handler::DefaultRoute,
    services::address_book_service::AddressBookService,
};
use std::sync::Arc;
use tracing::Span;

/// Shared, read-only references handed to every request.
///
/// Built once by the application factory; handlers only clone the handles.
#[derive(Clone)]
pub struct AppState {
    /// The address-book collaborator.
    pub service: Arc<dyn AddressBookService>,

    /// Opaque settings, passed through untouched.
    pub config: Arc<ServiceConfig>,

    /// Parent span for request and access-log events.
    pub span: Span,

    /// Attach error traces to error envelopes.
    pub debug: bool,

    /// Answer for requests that match no route.
    pub default_route: DefaultRoute,
}

impl AppState {
    pub fn new(
        service: Arc<dyn AddressBookService>,
        config: Arc<ServiceConfig>,
        debug: bool,
        span: Span,
    ) -> Self {
        Self {
            service,
            config,
            span,
            debug,
            default_route: DefaultRoute::default(),
        }
    }

    pub fn with_default_route(mut self, default_route: DefaultRoute) -> Self {
        self.default_route = default_route;
        self
    }
}
