//! Shortcut store: owns the registry and the listener-active flag
//!
//! All registry mutation goes through this type, which serializes
//! read-modify-write of the persisted record through `&mut self` and
//! performs exactly one durable write per successful mutation. The registry
//! and the flag persist together as a single versioned record, so a partial
//! write can never leave them divergent.
//!
//! # Stored record
//!
//! ```json
//! {
//!   "version": 1,
//!   "listener_active": true,
//!   "shortcuts": {
//!     "ctrl+k": { "action": "open-search", "description": "Open the search palette" }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::conflict;
use crate::defaults::default_bindings;
use crate::error::StoreError;
use crate::models::{KeyCombo, ShortcutBinding};
use crate::registry::ShortcutRegistry;
use quickbind_storage::KeyValueStore;

/// Storage key of the unified settings record
pub const SETTINGS_KEY: &str = "shortcut-settings";

/// Current settings record version
pub const RECORD_VERSION: u32 = 1;

// Pre-unification layout: registry and flag under separate keys.
const LEGACY_SHORTCUTS_KEY: &str = "shortcuts";
const LEGACY_ACTIVE_KEY: &str = "listener-active";

#[derive(Debug, Serialize, Deserialize)]
struct SettingsRecord {
    version: u32,
    listener_active: bool,
    shortcuts: ShortcutRegistry,
}

/// Owner of the shortcut registry and the listener-active flag
pub struct ShortcutStore {
    registry: ShortcutRegistry,
    listener_active: bool,
    storage: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for ShortcutStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortcutStore")
            .field("registry", &self.registry)
            .field("listener_active", &self.listener_active)
            .finish_non_exhaustive()
    }
}

impl ShortcutStore {
    /// Load the store from durable storage
    ///
    /// Falls back to the built-in defaults (and persists them) when nothing
    /// is stored yet. A legacy two-key layout is migrated into the unified
    /// record. A corrupt record or an unknown future version is an error,
    /// not a silent reset.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Result<Self, StoreError> {
        if let Some(text) = storage.read(SETTINGS_KEY)? {
            let record: SettingsRecord =
                serde_json::from_str(&text).map_err(|e| StoreError::Corrupt(e.to_string()))?;

            if record.version != RECORD_VERSION {
                return Err(StoreError::UnsupportedVersion(record.version));
            }

            return Ok(ShortcutStore {
                registry: record.shortcuts,
                listener_active: record.listener_active,
                storage,
            });
        }

        if let Some((registry, listener_active)) = Self::migrate_legacy(&*storage)? {
            let mut store = ShortcutStore {
                registry,
                listener_active,
                storage,
            };
            store.persist()?;
            // Best-effort cleanup; the unified record is already durable.
            for key in [LEGACY_SHORTCUTS_KEY, LEGACY_ACTIVE_KEY] {
                if let Err(e) = store.storage.remove(key) {
                    warn!(key = key, error = %e, "failed to remove legacy record");
                }
            }
            return Ok(store);
        }

        let mut store = ShortcutStore {
            registry: ShortcutRegistry::from_bindings(default_bindings()),
            listener_active: true,
            storage,
        };
        store.persist()?;
        Ok(store)
    }

    fn migrate_legacy(
        storage: &dyn KeyValueStore,
    ) -> Result<Option<(ShortcutRegistry, bool)>, StoreError> {
        let shortcuts = storage.read(LEGACY_SHORTCUTS_KEY)?;
        let active = storage.read(LEGACY_ACTIVE_KEY)?;

        if shortcuts.is_none() && active.is_none() {
            return Ok(None);
        }

        warn!("migrating legacy shortcut records to the unified settings record");

        let registry = match shortcuts {
            Some(text) => {
                serde_json::from_str(&text).map_err(|e| StoreError::Corrupt(e.to_string()))?
            }
            None => ShortcutRegistry::from_bindings(default_bindings()),
        };

        let listener_active = match active {
            Some(text) => {
                serde_json::from_str(&text).map_err(|e| StoreError::Corrupt(e.to_string()))?
            }
            None => true,
        };

        Ok(Some((registry, listener_active)))
    }

    /// Read-only view of the current registry
    pub fn registry(&self) -> &ShortcutRegistry {
        &self.registry
    }

    /// Whether the global listener is enabled
    pub fn is_active(&self) -> bool {
        self.listener_active
    }

    /// Insert or rebind a shortcut
    ///
    /// With `old_key` set, the old binding is removed as part of the same
    /// operation (rename semantics). Fails with [`StoreError::Conflict`],
    /// leaving the registry untouched, when `new_key` is already owned by
    /// a different action. On success the mutation is applied in memory and
    /// the full record persisted before returning.
    pub fn upsert(
        &mut self,
        old_key: Option<&KeyCombo>,
        new_key: KeyCombo,
        action: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), StoreError> {
        let action = action.into();

        if conflict::would_conflict(&self.registry, &new_key, &action) {
            let owner = self
                .registry
                .get(&new_key)
                .map(|binding| binding.action.clone())
                .unwrap_or_default();
            return Err(StoreError::Conflict {
                key: new_key,
                action: owner,
            });
        }

        let prior = old_key.and_then(|key| self.registry.remove(key));
        // A rename keeps its explicit category; a rebind to a new action
        // starts over.
        let category = prior
            .filter(|binding| binding.action == action)
            .and_then(|binding| binding.category);

        debug!(key = %new_key, action = %action, "binding shortcut");
        self.registry.insert(
            new_key,
            ShortcutBinding {
                action,
                description: description.into(),
                category,
            },
        );

        self.persist()
    }

    /// Delete a binding if present; absent keys are a no-op with no write
    pub fn remove(&mut self, key: &KeyCombo) -> Result<(), StoreError> {
        if self.registry.remove(key).is_none() {
            return Ok(());
        }

        debug!(key = %key, "removed shortcut");
        self.persist()
    }

    /// Overwrite the registry with the built-in default set
    ///
    /// The listener-active flag is left as the user set it.
    pub fn reset_to_defaults(&mut self) -> Result<(), StoreError> {
        self.registry = ShortcutRegistry::from_bindings(default_bindings());
        debug!("reset shortcuts to defaults");
        self.persist()
    }

    /// Flip the listener-active flag, persist it, return the new value
    pub fn toggle_active(&mut self) -> Result<bool, StoreError> {
        self.listener_active = !self.listener_active;
        self.persist()?;
        Ok(self.listener_active)
    }

    fn persist(&self) -> Result<(), StoreError> {
        let record = SettingsRecord {
            version: RECORD_VERSION,
            listener_active: self.listener_active,
            shortcuts: self.registry.clone(),
        };

        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| StoreError::Encode(e.to_string()))?;

        self.storage.write(SETTINGS_KEY, &json)?;
        Ok(())
    }
}
