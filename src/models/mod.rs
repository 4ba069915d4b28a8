//! Data models exchanged between the HTTP layer and the address-book service.
//!
//! Address entries are opaque JSON objects; the HTTP layer only checks that a
//! request body decodes as one. Health records are produced fresh per request.

pub mod address;
pub mod health;
