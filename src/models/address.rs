//! Address entries and their identifiers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{collections::BTreeMap, fmt};
use uuid::Uuid;

/// One address-book record.
///
/// The HTTP layer treats the record as an opaque JSON object. Field-level
/// validation belongs to the `AddressBookService` implementation.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct AddressEntry(pub Map<String, Value>);

impl AddressEntry {
    /// Decode a request body. Fails unless the body is a JSON object.
    pub fn from_json_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

impl From<Map<String, Value>> for AddressEntry {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// The whole collection keyed by identifier.
pub type AddressBook = BTreeMap<String, AddressEntry>;

/// Identifier of an address entry as it appears in `/addressbook/{id}`.
///
/// Only `[a-zA-Z0-9-]+` is accepted. The value is never transformed.
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct AddressId(String);

impl AddressId {
    /// Accepts a path segment if it matches the identifier pattern.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = !raw.is_empty()
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-');
        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical resource path, used for the `Location` header.
    pub fn uri(&self) -> String {
        format!("/addressbook/{}", self.0)
    }
}

/// Generated identifiers use the hyphen-less hex form of the UUID.
impl From<Uuid> for AddressId {
    fn from(id: Uuid) -> Self {
        Self(id.simple().to_string())
    }
}

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_accepts_alphanumerics_and_hyphens() {
        let id = AddressId::parse("abc-123-XYZ").expect("valid id");
        assert_eq!(id.as_str(), "abc-123-XYZ");
        assert_eq!(id.uri(), "/addressbook/abc-123-XYZ");
    }

    #[test]
    fn parse_rejects_other_characters() {
        assert!(AddressId::parse("").is_none());
        assert!(AddressId::parse("abc_def").is_none());
        assert!(AddressId::parse("a.b").is_none());
        assert!(AddressId::parse("caf\u{e9}").is_none());
    }

    #[test]
    fn entry_must_be_a_json_object() {
        assert!(AddressEntry::from_json_slice(br#"{"name":"Ann"}"#).is_ok());
        assert!(AddressEntry::from_json_slice(b"[1, 2]").is_err());
        assert!(AddressEntry::from_json_slice(b"\"Ann\"").is_err());
        assert!(AddressEntry::from_json_slice(b"{not json").is_err());
        assert!(AddressEntry::from_json_slice(b"").is_err());
    }

    #[test]
    fn entry_serializes_as_plain_object() {
        let entry = AddressEntry::from_json_slice(br#"{"name":"Ann","email":"a@x.com"}"#)
            .expect("valid entry");
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"name": "Ann", "email": "a@x.com"})
        );
    }
}
