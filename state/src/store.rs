//! Store building blocks: id generators and change notification

use addrbook_core::{Address, AddressId, IdGenerator, IdStrategy, StoreVersion};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Random v4 UUID ids
#[derive(Debug, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> AddressId {
        AddressId(Uuid::new_v4().to_string())
    }
}

/// Monotonic counter ids ("1", "2", ...)
///
/// The counter only moves forward, so removed ids are not handed out again.
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl SequentialIds {
    /// Counter starting above the highest numeric id in `addresses`
    pub fn after(addresses: &[Address]) -> Self {
        let ids = Self::default();
        for address in addresses {
            ids.reserve(&address.id);
        }
        ids
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new(1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> AddressId {
        AddressId(self.next.fetch_add(1, Ordering::Relaxed).to_string())
    }

    fn reserve(&self, id: &AddressId) {
        if let Ok(n) = id.as_str().parse::<u64>() {
            self.next.fetch_max(n.saturating_add(1), Ordering::Relaxed);
        }
    }
}

/// Build the generator for a configured strategy
pub fn id_generator(strategy: IdStrategy) -> Box<dyn IdGenerator> {
    match strategy {
        IdStrategy::Uuid => Box::new(UuidIds),
        IdStrategy::Sequential => Box::new(SequentialIds::default()),
    }
}

/// A change applied to the store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Added { address: Address, version: StoreVersion },
    Removed { address: Address, version: StoreVersion },
    Updated { address: Address, version: StoreVersion },
}

impl StoreEvent {
    pub fn version(&self) -> StoreVersion {
        match self {
            StoreEvent::Added { version, .. }
            | StoreEvent::Removed { version, .. }
            | StoreEvent::Updated { version, .. } => *version,
        }
    }

    pub fn address(&self) -> &Address {
        match self {
            StoreEvent::Added { address, .. }
            | StoreEvent::Removed { address, .. }
            | StoreEvent::Updated { address, .. } => address,
        }
    }
}

/// Change listener callback
pub type Listener = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered change listeners
#[derive(Default)]
pub struct Subscribers {
    next_id: AtomicU64,
    listeners: RwLock<Vec<(SubscriptionId, Listener)>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, listener));
        id
    }

    /// Returns false if the subscription was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(sub, _)| *sub != id);
        listeners.len() != before
    }

    /// Invoke every listener. The registry lock is not held while they run.
    pub fn notify(&self, event: &StoreEvent) {
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashSet;
    use std::sync::atomic::AtomicUsize;

    fn address_with_id(id: &str) -> Address {
        Address {
            id: AddressId::new(id),
            street: "1 Test St".to_string(),
            city: "Testville".to_string(),
            state_province: "TS".to_string(),
            country: "Testland".to_string(),
            postal_code: "00000".to_string(),
            created_at: Utc::now(),
        }
    }

    fn event() -> StoreEvent {
        StoreEvent::Added {
            address: address_with_id("1"),
            version: StoreVersion::new(1),
        }
    }

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIds::new(21);
        assert_eq!(ids.next_id(), AddressId::new("21"));
        assert_eq!(ids.next_id(), AddressId::new("22"));
    }

    #[test]
    fn test_sequential_ids_never_step_back() {
        let ids = SequentialIds::after(&[address_with_id("4"), address_with_id("12")]);
        assert_eq!(ids.next_id(), AddressId::new("13"));

        ids.reserve(&AddressId::new("2"));
        ids.reserve(&AddressId::new("not-a-number"));
        assert_eq!(ids.next_id(), AddressId::new("14"));
    }

    #[test]
    fn test_uuid_ids_unique() {
        let ids = UuidIds;
        let generated: HashSet<AddressId> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 1000);
    }

    #[test]
    fn test_subscribe_unsubscribe() {
        let subscribers = Subscribers::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let id = subscribers.subscribe(Arc::new(move |_: &StoreEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        subscribers.notify(&event());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(subscribers.unsubscribe(id));
        assert!(!subscribers.unsubscribe(id));
        subscribers.notify(&event());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(subscribers.is_empty());
    }
}
