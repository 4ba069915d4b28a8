//! src/services/in_memory.rs
//!
//! InMemoryAddressBookService keeps the address book in process memory.
//! It backs the binary and the tests; nothing survives a restart.

use crate::{
    models::{
        address::{AddressBook, AddressEntry, AddressId},
        health::ReadinessStatus,
    },
    services::address_book_service::{AddressBookService, ServiceError, ServiceResult},
};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Address book held in a `BTreeMap` behind an async `RwLock`.
///
/// Cloning is cheap and every clone shares the same entries.
#[derive(Clone, Debug)]
pub struct InMemoryAddressBookService {
    entries: Arc<RwLock<AddressBook>>,
    ready: Arc<AtomicBool>,
    started_at: Instant,
}

impl InMemoryAddressBookService {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(AddressBook::new())),
            ready: Arc::new(AtomicBool::new(true)),
            started_at: Instant::now(),
        }
    }

    /// Mark the service as (not) ready, e.g. while draining.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Every entry needs a non-empty string `name`; other fields are kept as sent.
    fn validate(entry: &AddressEntry) -> ServiceResult<()> {
        match entry.get("name") {
            Some(Value::String(name)) if !name.trim().is_empty() => Ok(()),
            Some(Value::String(_)) => Err(ServiceError::InvalidInput(
                "field `name` must not be empty".into(),
            )),
            Some(_) => Err(ServiceError::InvalidInput(
                "field `name` must be a string".into(),
            )),
            None => Err(ServiceError::InvalidInput(
                "missing required field `name`".into(),
            )),
        }
    }
}

impl Default for InMemoryAddressBookService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AddressBookService for InMemoryAddressBookService {
    fn uptime_millis(&self) -> u64 {
        u64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    async fn status(&self) -> ServiceResult<ReadinessStatus> {
        let count = self.entries.read().await.len();
        let mut details = Map::new();
        details.insert("entries".into(), Value::from(count));

        Ok(ReadinessStatus {
            ready: self.is_ready(),
            details,
        })
    }

    async fn get_all_addresses(&self) -> ServiceResult<AddressBook> {
        Ok(self.entries.read().await.clone())
    }

    async fn post_address(&self, entry: AddressEntry) -> ServiceResult<AddressId> {
        Self::validate(&entry)?;
        let id = AddressId::from(Uuid::new_v4());
        self.entries
            .write()
            .await
            .insert(id.as_str().to_string(), entry);
        debug!("stored address {}", id);
        Ok(id)
    }

    async fn get_address(&self, id: &AddressId) -> ServiceResult<AddressEntry> {
        self.entries
            .read()
            .await
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    async fn put_address(&self, id: &AddressId, entry: AddressEntry) -> ServiceResult<()> {
        let mut entries = self.entries.write().await;
        let slot = entries
            .get_mut(id.as_str())
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;
        Self::validate(&entry)?;
        *slot = entry;
        debug!("replaced address {}", id);
        Ok(())
    }

    async fn delete_address(&self, id: &AddressId) -> ServiceResult<()> {
        match self.entries.write().await.remove(id.as_str()) {
            Some(_) => {
                debug!("removed address {}", id);
                Ok(())
            }
            None => Err(ServiceError::NotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> InMemoryAddressBookService {
        InMemoryAddressBookService::new()
    }

    fn entry(value: Value) -> AddressEntry {
        serde_json::from_value(value).expect("object literal")
    }

    fn id(raw: &str) -> AddressId {
        AddressId::parse(raw).expect("valid id")
    }

    #[tokio::test]
    async fn post_then_get_returns_same_entry() {
        let svc = service();
        let ann = entry(json!({"name": "Ann", "email": "a@x.com"}));

        let id = svc.post_address(ann.clone()).await.unwrap();
        assert_eq!(svc.get_address(&id).await.unwrap(), ann);

        let all = svc.get_all_addresses().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all.get(id.as_str()), Some(&ann));
    }

    #[tokio::test]
    async fn post_assigns_distinct_ids() {
        let svc = service();
        let a = svc.post_address(entry(json!({"name": "A"}))).await.unwrap();
        let b = svc.post_address(entry(json!({"name": "B"}))).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn invalid_entries_are_rejected() {
        let svc = service();
        for bad in [json!({}), json!({"name": ""}), json!({"name": 7})] {
            let err = svc.post_address(entry(bad)).await.unwrap_err();
            assert!(matches!(err, ServiceError::InvalidInput(_)));
        }
        assert!(svc.get_all_addresses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn put_requires_existing_entry() {
        let svc = service();
        let err = svc
            .put_address(&id("missing"), entry(json!({"name": "Ann"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref key) if key == "missing"));
    }

    #[tokio::test]
    async fn put_missing_entry_reports_not_found_before_validation() {
        let svc = service();
        let err = svc
            .put_address(&id("missing"), entry(json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn put_replaces_and_validates() {
        let svc = service();
        let id = svc.post_address(entry(json!({"name": "Ann"}))).await.unwrap();

        let err = svc.put_address(&id, entry(json!({"name": ""}))).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));

        let updated = entry(json!({"name": "Ann", "phone": "555"}));
        svc.put_address(&id, updated.clone()).await.unwrap();
        assert_eq!(svc.get_address(&id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn delete_is_durable() {
        let svc = service();
        let id = svc.post_address(entry(json!({"name": "Ann"}))).await.unwrap();

        svc.delete_address(&id).await.unwrap();
        assert!(matches!(
            svc.get_address(&id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            svc.delete_address(&id).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn status_tracks_readiness_and_size() {
        let svc = service();
        svc.post_address(entry(json!({"name": "Ann"}))).await.unwrap();

        let status = svc.status().await.unwrap();
        assert!(status.ready);
        assert_eq!(status.details.get("entries"), Some(&json!(1)));

        svc.set_ready(false);
        assert!(!svc.status().await.unwrap().ready);
    }

    #[test]
    fn uptime_is_monotonic() {
        let svc = service();
        let first = svc.uptime_millis();
        let second = svc.uptime_millis();
        assert!(second >= first);
    }
}
