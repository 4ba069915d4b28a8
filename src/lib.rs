//! HTTP service exposing CRUD over an address book plus liveness and
//! readiness probes.

pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use app::make_addrservice_app;
