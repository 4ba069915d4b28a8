//! Liveness and readiness records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `GET /healthz`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Liveness {
    /// Milliseconds since the service started.
    pub uptime_millis: u64,
}

/// Readiness snapshot reported by the address-book service.
///
/// `ready` decides the HTTP status; any extra fields are returned as-is.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReadinessStatus {
    pub ready: bool,

    #[serde(flatten)]
    pub details: Map<String, Value>,
}
