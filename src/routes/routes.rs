//! Route table for the address-book service.
//!
//! ## Structure
//! - **Health endpoints**
//!   - `GET    /healthz`    — liveness
//!   - `GET    /readiness`  — readiness
//!
//! - **Address book endpoints**
//!   - `GET    /addressbook`       — list all entries
//!   - `POST   /addressbook`       — create entry
//!   - `GET    /addressbook/{id}`  — fetch entry
//!   - `PUT    /addressbook/{id}`  — replace entry
//!   - `DELETE /addressbook/{id}`  — delete entry
//!
//! Every path also answers with a trailing slash.

use crate::{
    handlers::{
        address_handlers::{
            create_address, delete_address, get_address, list_addresses, update_address,
        },
        health_handlers::{healthz, readiness},
    },
    state::AppState,
};
use axum::{Router, routing::get};

pub const ADDRESSBOOK_PATH: &str = "/addressbook";
pub const ADDRESSBOOK_ENTRY_PATH: &str = "/addressbook/{id}";

/// Build the router for all declared routes.
///
/// Unmatched requests are not handled here; the application factory installs
/// the fallback.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints
        .route("/healthz", get(healthz))
        .route("/healthz/", get(healthz))
        .route("/readiness", get(readiness))
        .route("/readiness/", get(readiness))
        // collection
        .route(ADDRESSBOOK_PATH, get(list_addresses).post(create_address))
        .route("/addressbook/", get(list_addresses).post(create_address))
        // single entry
        .route(
            ADDRESSBOOK_ENTRY_PATH,
            get(get_address).put(update_address).delete(delete_address),
        )
        .route(
            "/addressbook/{id}/",
            get(get_address).put(update_address).delete(delete_address),
        )
}
