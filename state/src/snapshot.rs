//! Address store snapshots

use addrbook_core::{
    AddrbookError, AddrbookResult, Address, AddressId, AddressProvider, IdGenerator,
    StoreVersion,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::memory::MemoryAddressStore;

/// Current snapshot file format
pub const SNAPSHOT_FORMAT: u32 = 1;

/// A complete copy of the store's contents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSnapshot {
    /// File format version
    pub format: u32,
    /// Store version at time of snapshot
    pub version: StoreVersion,
    /// When the snapshot was taken
    pub exported_at: DateTime<Utc>,
    /// All addresses, in store order
    pub addresses: Vec<Address>,
    /// Last id the store handed out, so removed ids stay retired across restarts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_issued_id: Option<AddressId>,
}

impl AddressSnapshot {
    /// Capture the current contents of a store
    pub fn capture(store: &dyn AddressProvider) -> Self {
        Self {
            format: SNAPSHOT_FORMAT,
            version: store.version(),
            exported_at: Utc::now(),
            addresses: store.list().to_vec(),
            last_issued_id: store.last_issued_id(),
        }
    }

    /// Rebuild a store from this snapshot
    pub fn restore(self, ids: Box<dyn IdGenerator>) -> AddrbookResult<MemoryAddressStore> {
        let version = self.version;
        let store = MemoryAddressStore::with_addresses(self.addresses, ids)?;
        store.set_version(version);
        if let Some(id) = self.last_issued_id {
            store.set_last_issued(id);
        }
        Ok(store)
    }

    pub fn to_json(&self) -> AddrbookResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> AddrbookResult<Self> {
        let snapshot: AddressSnapshot = serde_json::from_str(json)?;
        if snapshot.format != SNAPSHOT_FORMAT {
            return Err(AddrbookError::SnapshotFormat {
                expected: SNAPSHOT_FORMAT,
                got: snapshot.format,
            });
        }
        Ok(snapshot)
    }

    /// Write to a file, creating parent directories
    pub fn save(&self, path: &Path) -> AddrbookResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        info!("Saved {} addresses to {}", self.addresses.len(), path.display());
        Ok(())
    }

    /// Read from a file
    pub fn load(path: &Path) -> AddrbookResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;
        info!("Loaded {} addresses from {}", snapshot.addresses.len(), path.display());
        Ok(snapshot)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
