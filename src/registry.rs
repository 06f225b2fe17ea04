//! Process-wide registry of shared resource managers.
//!
//! Managers are keyed by `(resource type, manager handle)`, so unrelated call
//! sites asking for the same pair converge on one cache without explicit
//! wiring. The type tag is the `TypeId` of `ResourceManager<T, L>`: managers of
//! the same resource type but different location types are distinct.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::config;
use crate::manager::{ManagerConfig, ResourceManager};

struct RegistryEntry {
    type_name: &'static str,
    manager: Arc<dyn Any + Send + Sync>,
}

/// Get-or-create table of `Arc<ResourceManager<T, L>>` keyed by type and handle.
pub struct ManagerRegistry {
    instances: DashMap<TypeId, HashMap<String, RegistryEntry>>,
    config: ManagerConfig,
}

impl ManagerRegistry {
    /// Create a registry whose managers use `config`.
    pub fn new(config: ManagerConfig) -> Self {
        Self {
            instances: DashMap::new(),
            config,
        }
    }

    /// Settings given to every manager this registry creates.
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Return the manager for `(T, L, handle)`, creating an unconfigured one on first use.
    ///
    /// Repeated calls return the same `Arc`.
    pub fn get_or_create<T, L>(&self, handle: &str) -> Arc<ResourceManager<T, L>>
    where
        T: Send + Sync + 'static,
        L: Send + Sync + 'static,
    {
        // The shard write lock held by `entry` guards the insert-if-absent step.
        let mut managers = self.instances.entry(TypeId::of::<ResourceManager<T, L>>()).or_default();

        let entry = managers.entry(handle.to_string()).or_insert_with(|| {
            tracing::debug!(manager = %handle, resource_type = type_name::<T>(), "creating resource manager");
            RegistryEntry {
                type_name: type_name::<ResourceManager<T, L>>(),
                manager: Arc::new(ResourceManager::<T, L>::with_config(handle, self.config.clone())),
            }
        });

        entry
            .manager
            .clone()
            .downcast::<ResourceManager<T, L>>()
            .unwrap_or_else(|_| unreachable!("registry entries are keyed by their own TypeId"))
    }

    /// Existing manager for `(T, L, handle)`, without creating one.
    pub fn get<T, L>(&self, handle: &str) -> Option<Arc<ResourceManager<T, L>>>
    where
        T: Send + Sync + 'static,
        L: Send + Sync + 'static,
    {
        let managers = self.instances.get(&TypeId::of::<ResourceManager<T, L>>())?;
        managers
            .get(handle)?
            .manager
            .clone()
            .downcast::<ResourceManager<T, L>>()
            .ok()
    }

    pub fn contains<T, L>(&self, handle: &str) -> bool
    where
        T: Send + Sync + 'static,
        L: Send + Sync + 'static,
    {
        self.instances
            .get(&TypeId::of::<ResourceManager<T, L>>())
            .is_some_and(|managers| managers.contains_key(handle))
    }

    /// Handles of every manager registered for `(T, L)`, sorted.
    pub fn handles<T, L>(&self) -> Vec<String>
    where
        T: Send + Sync + 'static,
        L: Send + Sync + 'static,
    {
        let mut handles: Vec<String> = self
            .instances
            .get(&TypeId::of::<ResourceManager<T, L>>())
            .map(|managers| managers.keys().cloned().collect())
            .unwrap_or_default();
        handles.sort();
        handles
    }

    /// `(manager type name, handle)` for every registered manager, sorted.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries: Vec<(&'static str, String)> = self
            .instances
            .iter()
            .flat_map(|managers| {
                managers
                    .iter()
                    .map(|(handle, entry)| (entry.type_name, handle.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();
        entries.sort();
        entries
    }

    /// Total number of managers across all types.
    pub fn len(&self) -> usize {
        self.instances.iter().map(|managers| managers.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ManagerRegistry {
    fn default() -> Self {
        Self::new(ManagerConfig::default())
    }
}

static GLOBAL_REGISTRY: OnceLock<ManagerRegistry> = OnceLock::new();

/// The process-wide registry, configured from the environment on first use.
pub fn global() -> &'static ManagerRegistry {
    GLOBAL_REGISTRY.get_or_init(|| ManagerRegistry::new(config::load().manager))
}

/// Shared manager for resource type `T` with location type `L`, named `handle`.
///
/// ```
/// use std::path::PathBuf;
/// use resourceful::get_resource_manager;
///
/// let sprites = get_resource_manager::<Vec<u8>, PathBuf>("sprites");
/// let again = get_resource_manager::<Vec<u8>, PathBuf>("sprites");
/// assert!(std::sync::Arc::ptr_eq(&sprites, &again));
/// ```
pub fn get_resource_manager<T, L>(handle: &str) -> Arc<ResourceManager<T, L>>
where
    T: Send + Sync + 'static,
    L: Send + Sync + 'static,
{
    global().get_or_create(handle)
}

/// [`get_resource_manager`] for path-located resources.
pub fn get_path_manager<T>(handle: &str) -> Arc<ResourceManager<T, PathBuf>>
where
    T: Send + Sync + 'static,
{
    get_resource_manager::<T, PathBuf>(handle)
}
