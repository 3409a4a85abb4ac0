//! Core traits defining the address store interfaces
//!
//! The query engine and the front end only depend on these contracts.

use crate::types::*;
use std::sync::Arc;

/// Result type for address book operations
pub type AddrbookResult<T> = Result<T, crate::error::AddrbookError>;

/// Immutable snapshot of the address collection
pub type AddressList = Arc<Vec<Address>>;

/// Read side of an address store
pub trait AddressProvider: Send + Sync {
    /// Get the current store version
    fn version(&self) -> StoreVersion;

    /// Get the current collection, in insertion order
    fn list(&self) -> AddressList;

    /// Get an address by id
    fn get(&self, id: &AddressId) -> Option<Address>;

    /// Check if an id is present
    fn contains(&self, id: &AddressId) -> bool {
        self.get(id).is_some()
    }

    /// Number of stored addresses
    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most recent id handed out by `add`, including ones since removed
    fn last_issued_id(&self) -> Option<AddressId> {
        None
    }
}

/// Write side of an address store
pub trait AddressMutator: AddressProvider {
    /// Add an address, assigning its id and creation time
    fn add(&self, request: CreateAddressRequest) -> Address;

    /// Remove an address. Unknown ids are ignored.
    fn remove(&self, id: &AddressId);

    /// Merge fields into an address. Unknown ids are ignored.
    fn update(&self, id: &AddressId, update: AddressUpdate);
}

/// Source of fresh address ids
pub trait IdGenerator: Send + Sync {
    /// Produce the next candidate id.
    ///
    /// The store skips candidates that are already taken.
    fn next_id(&self) -> AddressId;

    /// Record an id already present in the store so it is never produced again
    fn reserve(&self, _id: &AddressId) {}
}
