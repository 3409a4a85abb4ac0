//! In-memory address store

use addrbook_core::{
    AddrbookError, AddrbookResult, Address, AddressId, AddressList, AddressMutator,
    AddressProvider, AddressUpdate, CreateAddressRequest, IdGenerator, StoreVersion,
};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::seed::seed_addresses;
use crate::store::{Listener, StoreEvent, Subscribers, SubscriptionId, UuidIds};

/// In-memory address store
///
/// Readers get a shared immutable snapshot; writers copy on write when a
/// snapshot is still held elsewhere.
pub struct MemoryAddressStore {
    addresses: RwLock<AddressList>,
    version: RwLock<StoreVersion>,
    ids: Box<dyn IdGenerator>,
    last_issued: RwLock<Option<AddressId>>,
    subscribers: Subscribers,
}

impl MemoryAddressStore {
    pub fn new() -> Self {
        Self::with_generator(Box::new(UuidIds))
    }

    /// Empty store using the given id generator
    pub fn with_generator(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            addresses: RwLock::new(Arc::new(Vec::new())),
            version: RwLock::new(StoreVersion::new(0)),
            ids,
            last_issued: RwLock::new(None),
            subscribers: Subscribers::new(),
        }
    }

    /// Store holding the synthetic seed set
    pub fn seeded(ids: Box<dyn IdGenerator>) -> Self {
        let addresses = seed_addresses();
        for address in &addresses {
            ids.reserve(&address.id);
        }
        let store = Self::with_generator(ids);
        *store.addresses.write() = Arc::new(addresses);
        store
    }

    /// Store holding `addresses`, rejecting duplicate ids
    pub fn with_addresses(
        addresses: Vec<Address>,
        ids: Box<dyn IdGenerator>,
    ) -> AddrbookResult<Self> {
        let mut seen = HashSet::with_capacity(addresses.len());
        for address in &addresses {
            if !seen.insert(&address.id) {
                return Err(AddrbookError::DuplicateId(address.id.to_string()));
            }
            ids.reserve(&address.id);
        }

        let store = Self::with_generator(ids);
        *store.addresses.write() = Arc::new(addresses);
        Ok(store)
    }

    /// Overwrite the version counter, used when restoring snapshots
    pub(crate) fn set_version(&self, version: StoreVersion) {
        *self.version.write() = version;
    }

    /// Carry over the last issued id from a snapshot so it is not reissued
    pub(crate) fn set_last_issued(&self, id: AddressId) {
        self.ids.reserve(&id);
        *self.last_issued.write() = Some(id);
    }

    /// Register a change listener
    pub fn subscribe(&self, listener: Listener) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    /// Remove a change listener
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Bump the version. Caller holds the addresses write lock.
    fn bump_version(&self) -> StoreVersion {
        let mut version = self.version.write();
        *version = version.next();
        *version
    }

    fn fresh_id(&self, taken: &[Address]) -> AddressId {
        loop {
            let candidate = self.ids.next_id();
            if !taken.iter().any(|a| a.id == candidate) {
                self.ids.reserve(&candidate);
                *self.last_issued.write() = Some(candidate.clone());
                return candidate;
            }
            debug!("Skipping id {} already in use", candidate);
        }
    }
}

impl Default for MemoryAddressStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressProvider for MemoryAddressStore {
    fn version(&self) -> StoreVersion {
        *self.version.read()
    }

    fn list(&self) -> AddressList {
        self.addresses.read().clone()
    }

    fn get(&self, id: &AddressId) -> Option<Address> {
        self.addresses.read().iter().find(|a| &a.id == id).cloned()
    }

    fn len(&self) -> usize {
        self.addresses.read().len()
    }

    fn last_issued_id(&self) -> Option<AddressId> {
        self.last_issued.read().clone()
    }
}

impl AddressMutator for MemoryAddressStore {
    fn add(&self, request: CreateAddressRequest) -> Address {
        let event = {
            let mut addresses = self.addresses.write();
            let id = self.fresh_id(&addresses);
            let address = Address::from_request(id, request, Utc::now());
            Arc::make_mut(&mut *addresses).push(address.clone());
            let version = self.bump_version();
            info!("Added address {} ({})", address.id, version);
            StoreEvent::Added { address, version }
        };

        self.subscribers.notify(&event);
        event.address().clone()
    }

    fn remove(&self, id: &AddressId) {
        let event = {
            let mut addresses = self.addresses.write();
            let Some(index) = addresses.iter().position(|a| &a.id == id) else {
                debug!("Remove ignored, no address {}", id);
                return;
            };
            let address = Arc::make_mut(&mut *addresses).remove(index);
            let version = self.bump_version();
            info!("Removed address {} ({})", id, version);
            StoreEvent::Removed { address, version }
        };

        self.subscribers.notify(&event);
    }

    fn update(&self, id: &AddressId, update: AddressUpdate) {
        let event = {
            let mut addresses = self.addresses.write();
            let Some(index) = addresses.iter().position(|a| &a.id == id) else {
                debug!("Update ignored, no address {}", id);
                return;
            };
            let list = Arc::make_mut(&mut *addresses);
            if !list[index].apply(update) {
                debug!("Update of {} changed nothing", id);
                return;
            }
            let address = list[index].clone();
            let version = self.bump_version();
            info!("Updated address {} ({})", id, version);
            StoreEvent::Updated { address, version }
        };

        self.subscribers.notify(&event);
    }
}

/// Thread-safe address store wrapper
pub type SharedAddressStore = Arc<MemoryAddressStore>;

/// Create a shared store holding the seed set
pub fn create_seeded_store(ids: Box<dyn IdGenerator>) -> SharedAddressStore {
    Arc::new(MemoryAddressStore::seeded(ids))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SequentialIds;
    use parking_lot::Mutex;

    fn request(street: &str) -> CreateAddressRequest {
        CreateAddressRequest {
            street: street.to_string(),
            address_line2: None,
            city: "Testville".to_string(),
            state_province: "TS".to_string(),
            country: "Testland".to_string(),
            postal_code: "00000".to_string(),
        }
    }

    fn ids_of(store: &MemoryAddressStore) -> Vec<String> {
        store.list().iter().map(|a| a.id.to_string()).collect()
    }

    #[test]
    fn test_seed_scenario() {
        let store = MemoryAddressStore::seeded(Box::new(UuidIds));
        assert_eq!(store.len(), 20);

        store.remove(&AddressId::new("5"));
        let list = store.list();
        assert_eq!(list.len(), 19);
        assert!(list.iter().all(|a| a.id.as_str() != "5"));

        let before = Utc::now();
        let added = store.add(request("1 Test St"));
        let list = store.list();
        assert_eq!(list.len(), 20);
        assert!(list.contains(&added));
        assert!(list.iter().filter(|a| a.id == added.id).count() == 1);
        assert!(added.created_at >= before);
        assert!((added.created_at - before).num_seconds() < 5);
        assert_eq!(added.street, "1 Test St");
    }

    #[test]
    fn test_add_appends_with_fresh_id() {
        let store = MemoryAddressStore::new();
        let a = store.add(request("1 First Street"));
        let b = store.add(request("2 Second Street"));
        assert_ne!(a.id, b.id);
        assert_eq!(*store.list(), vec![a, b]);
        assert_eq!(store.version(), StoreVersion::new(2));
    }

    #[test]
    fn test_sequential_ids_skip_taken() {
        let store = MemoryAddressStore::seeded(Box::new(SequentialIds::default()));
        let added = store.add(request("1 Test St"));
        assert_eq!(added.id, AddressId::new("21"));
    }

    #[test]
    fn test_sequential_ids_not_reused_after_remove() {
        let store = MemoryAddressStore::seeded(Box::new(SequentialIds::default()));
        store.remove(&AddressId::new("5"));
        let first = store.add(request("1 Test St"));
        assert_ne!(first.id, AddressId::new("5"));
        assert_eq!(first.id, AddressId::new("21"));

        store.remove(&first.id);
        let second = store.add(request("2 Test St"));
        assert_eq!(second.id, AddressId::new("22"));
    }

    #[test]
    fn test_address_line2_not_persisted() {
        let store = MemoryAddressStore::new();
        let mut req = request("1 Test St");
        req.address_line2 = Some("Apt 4".to_string());
        let added = store.add(req);
        let json = serde_json::to_value(&added).unwrap();
        assert!(json.get("addressLine2").is_none());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let store = MemoryAddressStore::seeded(Box::new(UuidIds));
        let before = store.list();
        store.remove(&AddressId::new("missing"));
        assert_eq!(*store.list(), *before);
        assert_eq!(store.version(), StoreVersion::new(0));
    }

    #[test]
    fn test_update_merges_fields() {
        let store = MemoryAddressStore::seeded(Box::new(UuidIds));
        let id = AddressId::new("3");
        let original = store.get(&id).unwrap();

        store.update(
            &id,
            AddressUpdate {
                street: Some("1 New Street".to_string()),
                postal_code: Some("99999".to_string()),
                ..Default::default()
            },
        );

        let updated = store.get(&id).unwrap();
        assert_eq!(updated.street, "1 New Street");
        assert_eq!(updated.postal_code, "99999");
        assert_eq!(updated.city, original.city);
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let store = MemoryAddressStore::seeded(Box::new(UuidIds));
        let before = store.list();
        store.update(
            &AddressId::new("missing"),
            AddressUpdate {
                city: Some("Nowhere".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(*store.list(), *before);
    }

    #[test]
    fn test_snapshot_isolated_from_mutation() {
        let store = MemoryAddressStore::seeded(Box::new(UuidIds));
        let snapshot = store.list();
        store.remove(&AddressId::new("1"));
        assert_eq!(snapshot.len(), 20);
        assert_eq!(store.len(), 19);
    }

    #[test]
    fn test_ids_unique_across_operations() {
        let store = MemoryAddressStore::seeded(Box::new(SequentialIds::default()));
        for i in 0..30 {
            let added = store.add(request(&format!("{} Loop Street", i)));
            if i % 3 == 0 {
                store.remove(&added.id);
            }
            if i % 4 == 0 {
                store.remove(&AddressId::new((i + 1).to_string()));
            }
            store.update(
                &added.id,
                AddressUpdate {
                    city: Some("Elsewhere".to_string()),
                    ..Default::default()
                },
            );
        }

        let ids = ids_of(&store);
        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn test_with_addresses_rejects_duplicates() {
        let mut addresses = seed_addresses();
        addresses.push(addresses[0].clone());
        let result = MemoryAddressStore::with_addresses(addresses, Box::new(UuidIds));
        assert!(matches!(result, Err(AddrbookError::DuplicateId(id)) if id == "1"));
    }

    #[test]
    fn test_subscribers_see_effective_changes_only() {
        let store = MemoryAddressStore::seeded(Box::new(UuidIds));
        let events: Arc<Mutex<Vec<StoreEvent>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = events.clone();
        let subscription = store.subscribe(Arc::new(move |event: &StoreEvent| {
            sink.lock().push(event.clone());
        }));

        let added = store.add(request("1 Test St"));
        store.remove(&AddressId::new("missing"));
        store.update(&AddressId::new("missing"), AddressUpdate::default());
        store.update(
            &added.id,
            AddressUpdate {
                city: Some("Elsewhere".to_string()),
                ..Default::default()
            },
        );
        store.remove(&added.id);

        {
            let seen = events.lock();
            assert_eq!(seen.len(), 3);
            assert!(matches!(seen[0], StoreEvent::Added { .. }));
            assert!(matches!(seen[1], StoreEvent::Updated { .. }));
            assert!(matches!(seen[2], StoreEvent::Removed { .. }));
            assert_eq!(seen[2].version(), StoreVersion::new(3));
        }

        assert!(store.unsubscribe(subscription));
        store.add(request("2 Test St"));
        assert_eq!(events.lock().len(), 3);
    }

    #[test]
    fn test_listener_can_read_store() {
        let store = Arc::new(MemoryAddressStore::new());
        let observed = Arc::new(Mutex::new(0usize));

        let reader = Arc::downgrade(&store);
        let sink = observed.clone();
        store.subscribe(Arc::new(move |_event: &StoreEvent| {
            if let Some(store) = reader.upgrade() {
                *sink.lock() = store.len();
            }
        }));

        store.add(request("1 Test St"));
        assert_eq!(*observed.lock(), 1);
    }
}
