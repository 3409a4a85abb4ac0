//! Core types for the address book
//!
//! Defines the stored record, the request payloads that create and modify
//! it, and the small value types shared across crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque address identifier
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressId(pub String);

impl AddressId {
    pub fn new(id: impl Into<String>) -> Self {
        AddressId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddressId({})", self.0)
    }
}

impl From<&str> for AddressId {
    fn from(s: &str) -> Self {
        AddressId(s.to_string())
    }
}

impl From<String> for AddressId {
    fn from(s: String) -> Self {
        AddressId(s)
    }
}

/// A stored postal address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub street: String,
    pub city: String,
    pub state_province: String,
    pub country: String,
    pub postal_code: String,
    pub created_at: DateTime<Utc>,
}

impl Address {
    /// Build a record from a request. Only the store should call this.
    pub fn from_request(
        id: AddressId,
        request: CreateAddressRequest,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            street: request.street,
            city: request.city,
            state_province: request.state_province,
            country: request.country,
            postal_code: request.postal_code,
            created_at,
        }
    }

    /// Merge the present fields of `update` into this record.
    ///
    /// Returns true if any field changed.
    pub fn apply(&mut self, update: AddressUpdate) -> bool {
        let mut changed = false;
        let fields = [
            (&mut self.street, update.street),
            (&mut self.city, update.city),
            (&mut self.state_province, update.state_province),
            (&mut self.country, update.country),
            (&mut self.postal_code, update.postal_code),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                if *field != value {
                    *field = value;
                    changed = true;
                }
            }
        }
        changed
    }

    /// Text fields searched by the query engine
    pub fn searchable_fields(&self) -> [&str; 5] {
        [
            &self.street,
            &self.city,
            &self.state_province,
            &self.country,
            &self.postal_code,
        ]
    }
}

/// Payload for adding an address
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    pub state_province: String,
    pub country: String,
    pub postal_code: String,
}

/// Partial update of an address.
///
/// Carries no id or creation time, so those can never be overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressUpdate {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_province: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

impl AddressUpdate {
    pub fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.city.is_none()
            && self.state_province.is_none()
            && self.country.is_none()
            && self.postal_code.is_none()
    }
}

/// Ordering by creation time. `None` at the use site means unsorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Newest,
    Oldest,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Newest => write!(f, "newest first"),
            SortOrder::Oldest => write!(f, "oldest first"),
        }
    }
}

/// Store version, bumped on every effective mutation
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct StoreVersion(pub u64);

impl StoreVersion {
    pub fn new(value: u64) -> Self {
        StoreVersion(value)
    }

    pub fn next(&self) -> StoreVersion {
        StoreVersion(self.0 + 1)
    }
}

impl fmt::Display for StoreVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Debug for StoreVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoreVersion({})", self.0)
    }
}
