//! Application wiring: configuration and store lifecycle

use addrbook_core::{AddrbookResult, AppConfig};
use addrbook_state::{id_generator, AddressSnapshot, MemoryAddressStore, SharedAddressStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Default config location: `<config dir>/addrbook/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("addrbook").join("config.json"))
}

/// Load configuration.
///
/// An explicit path must exist. The default path is optional and falls back
/// to built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> AddrbookResult<AppConfig> {
    if let Some(path) = explicit {
        return AppConfig::load(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            debug!("Using config {}", path.display());
            AppConfig::load(&path)
        }
        _ => Ok(AppConfig::default()),
    }
}

/// Store plus the file it is persisted to, if any
pub struct AppContext {
    pub config: AppConfig,
    pub store: SharedAddressStore,
    snapshot_path: Option<PathBuf>,
}

impl AppContext {
    /// Build the store: restore the snapshot if it exists, else seed or start empty
    pub fn open(config: AppConfig, snapshot_override: Option<PathBuf>) -> AddrbookResult<Self> {
        let snapshot_path = snapshot_override.or_else(|| config.store.snapshot_path.clone());
        let ids = id_generator(config.store.id_strategy);

        let store = match &snapshot_path {
            Some(path) if path.exists() => AddressSnapshot::load(path)?.restore(ids)?,
            _ if config.store.seed => {
                info!("Starting from seed data");
                MemoryAddressStore::seeded(ids)
            }
            _ => MemoryAddressStore::with_generator(ids),
        };

        Ok(Self {
            config,
            store: Arc::new(store),
            snapshot_path,
        })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Write the store back to the snapshot file, if one is configured
    pub fn persist(&self) -> AddrbookResult<bool> {
        match &self.snapshot_path {
            Some(path) => {
                AddressSnapshot::capture(self.store.as_ref()).save(path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Export the store to an arbitrary file
    pub fn export(&self, path: &Path) -> AddrbookResult<usize> {
        let snapshot = AddressSnapshot::capture(self.store.as_ref());
        snapshot.save(path)?;
        Ok(snapshot.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use addrbook_core::{
        AddressId, AddressMutator, AddressProvider, CreateAddressRequest, IdStrategy,
    };

    fn request() -> CreateAddressRequest {
        CreateAddressRequest {
            street: "1 Test St".to_string(),
            city: "Testville".to_string(),
            state_province: "TS".to_string(),
            country: "Testland".to_string(),
            postal_code: "00000".to_string(),
            ..Default::default()
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("addrbook-cli-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_open_seeded_without_snapshot() {
        let context = AppContext::open(AppConfig::default(), None).unwrap();
        assert_eq!(context.store.len(), 20);
        assert!(!context.persist().unwrap());
    }

    #[test]
    fn test_open_empty_when_seed_disabled() {
        let mut config = AppConfig::default();
        config.store.seed = false;
        let context = AppContext::open(config, None).unwrap();
        assert!(context.store.is_empty());
    }

    #[test]
    fn test_persist_roundtrip() {
        let path = temp_path("roundtrip.json");
        let mut config = AppConfig::default();
        config.store.id_strategy = IdStrategy::Sequential;

        let context = AppContext::open(config.clone(), Some(path.clone())).unwrap();
        context.store.remove(&AddressId::new("2"));
        assert!(context.persist().unwrap());

        let reopened = AppContext::open(config, Some(path.clone())).unwrap();
        assert_eq!(reopened.store.len(), 19);
        assert!(!reopened.store.contains(&AddressId::new("2")));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_sequential_ids_not_reused_across_runs() {
        let path = temp_path("sequential.json");
        let mut config = AppConfig::default();
        config.store.id_strategy = IdStrategy::Sequential;

        let context = AppContext::open(config.clone(), Some(path.clone())).unwrap();
        context.store.remove(&AddressId::new("5"));
        let added = context.store.add(request());
        assert_eq!(added.id, AddressId::new("21"));
        context.store.remove(&added.id);
        context.persist().unwrap();

        let reopened = AppContext::open(config, Some(path.clone())).unwrap();
        let next = reopened.store.add(request());
        assert_eq!(next.id, AddressId::new("22"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let missing = temp_path("does-not-exist.json");
        assert!(load_config(Some(&missing)).is_err());
    }
}
