//! Layers wrapped around every route, including the fallback.

pub mod access_log;
pub mod error_envelope;
