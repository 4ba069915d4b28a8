//! src/services/address_book_service.rs
//!
//! Contract between the HTTP layer and whatever owns the address book.
//! Handlers only ever see `Arc<dyn AddressBookService>`; persistence and
//! validation rules live behind this trait.

use crate::models::{
    address::{AddressBook, AddressEntry, AddressId},
    health::ReadinessStatus,
};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// No entry exists for the identifier.
    #[error("address `{0}` not found")]
    NotFound(String),
    /// The entry was rejected by validation.
    #[error("{0}")]
    InvalidInput(String),
    /// The backing store failed for a reason the caller cannot fix.
    #[error(transparent)]
    Unavailable(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Asynchronous address-book operations consumed by the request handlers.
///
/// Implementations are shared across every in-flight request and must handle
/// their own synchronization.
#[async_trait]
pub trait AddressBookService: Send + Sync {
    /// Milliseconds elapsed since the service started.
    fn uptime_millis(&self) -> u64;

    /// Readiness snapshot. Must contain at least the `ready` flag.
    async fn status(&self) -> ServiceResult<ReadinessStatus>;

    async fn get_all_addresses(&self) -> ServiceResult<AddressBook>;

    /// Store a new entry and return the identifier assigned to it.
    async fn post_address(&self, entry: AddressEntry) -> ServiceResult<AddressId>;

    async fn get_address(&self, id: &AddressId) -> ServiceResult<AddressEntry>;

    /// Replace an existing entry.
    async fn put_address(&self, id: &AddressId, entry: AddressEntry) -> ServiceResult<()>;

    async fn delete_address(&self, id: &AddressId) -> ServiceResult<()>;
}
