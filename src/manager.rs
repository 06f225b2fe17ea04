//! Lazy, handle-indexed resource cache.
//!
//! A [`ResourceManager`] maps resource handles to location descriptors and
//! materializes each resource on first request through a pluggable loader.
//! Loaded instances are shared as `Arc<T>`; repeated requests return the same
//! allocation until the entry is uncached, evicted or replaced.
//!
//! All state sits behind `parking_lot` locks, so every operation takes `&self`
//! and a manager can be shared freely. The loader always runs with no manager
//! lock held.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};

use crate::error::ResourceError;
use crate::hotswap::ForceUpdate;
use crate::suggest;
use crate::telemetry::{self, LoadSpan, SpanExt};

/// Loader function: turns a location descriptor into a resource, or `None` on failure.
pub type Loader<T, L> = Arc<dyn Fn(&L) -> Option<T> + Send + Sync>;

/// How concurrent first requests for the same handle are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Concurrent first requests may each run the loader; the last result is cached.
    #[default]
    Racy,
    /// A per-handle lock lets only one caller run the loader; the rest wait and hit the cache.
    Exclusive,
}

impl LoadPolicy {
    /// Parse `"racy"` or `"exclusive"` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "racy" => Some(Self::Racy),
            "exclusive" => Some(Self::Exclusive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Racy => "racy",
            Self::Exclusive => "exclusive",
        }
    }
}

/// Per-manager behavior settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerConfig {
    pub load_policy: LoadPolicy,
    /// Minimum similarity for a "did you mean" suggestion.
    pub suggestion_cutoff: f64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            load_policy: LoadPolicy::Racy,
            suggestion_cutoff: suggest::DEFAULT_CUTOFF,
        }
    }
}

/// Handle-indexed lazy cache over resources of type `T` located by `L`.
pub struct ResourceManager<T, L = PathBuf> {
    handle: String,
    config: ManagerConfig,
    locations: RwLock<HashMap<String, L>>,
    cache: RwLock<HashMap<String, Arc<T>>>,
    loader: RwLock<Option<Loader<T, L>>>,
    load_gates: DashMap<String, Arc<Mutex<()>>>,
}

impl<T, L> ResourceManager<T, L> {
    /// Create an unconfigured manager named `handle`.
    pub fn new(handle: impl Into<String>) -> Self {
        Self::with_config(handle, ManagerConfig::default())
    }

    pub fn with_config(handle: impl Into<String>, config: ManagerConfig) -> Self {
        Self {
            handle: handle.into(),
            config,
            locations: RwLock::new(HashMap::new()),
            cache: RwLock::new(HashMap::new()),
            loader: RwLock::new(None),
            load_gates: DashMap::new(),
        }
    }

    /// The manager's own name.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Install `loader`, replacing any previous one. Cache and locations are untouched.
    pub fn configure<F>(&self, loader: F)
    where
        F: Fn(&L) -> Option<T> + Send + Sync + 'static,
    {
        *self.loader.write() = Some(Arc::new(loader));
    }

    /// Install a shared loader. `None` leaves the current loader in place.
    pub fn set_loader(&self, loader: Option<Loader<T, L>>) {
        if let Some(loader) = loader {
            *self.loader.write() = Some(loader);
        }
    }

    pub fn is_configured(&self) -> bool {
        self.loader.read().is_some()
    }

    /// Record where the resource `handle` can be loaded from.
    ///
    /// Overwrites a previous location without invalidating a cached instance.
    pub fn register(&self, handle: impl Into<String>, location: L) {
        self.locations.write().insert(handle.into(), location);
    }

    /// Overwrite the cached instance for `handle`, returning the previous one.
    ///
    /// The handle does not need to be registered.
    pub fn update(&self, handle: impl Into<String>, resource: T) -> Option<Arc<T>> {
        self.cache.write().insert(handle.into(), Arc::new(resource))
    }

    /// Drop the cached instance. The location stays, so the next `get` reloads.
    pub fn uncache(&self, handle: &str) -> Option<Arc<T>> {
        let removed = self.cache.write().remove(handle);
        if removed.is_some() {
            telemetry::record_eviction(&self.handle);
        }
        removed
    }

    /// Drop both the cached instance and the location for `handle`.
    ///
    /// The location goes first so an exclusive load finishing concurrently
    /// cannot re-cache the handle after the cache entry is dropped.
    pub fn evict(&self, handle: &str) -> (Option<Arc<T>>, Option<L>) {
        let location = self.locations.write().remove(handle);
        let resource = self.uncache(handle);
        self.load_gates.remove(handle);
        (resource, location)
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.locations.read().contains_key(handle)
    }

    pub fn is_cached(&self, handle: &str) -> bool {
        self.cache.read().contains_key(handle)
    }

    /// Registered handles, sorted.
    pub fn handles(&self) -> Vec<String> {
        let mut handles: Vec<String> = self.locations.read().keys().cloned().collect();
        handles.sort();
        handles
    }

    /// Number of registered handles.
    pub fn len(&self) -> usize {
        self.locations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.read().is_empty()
    }

    /// Number of cached instances.
    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }

    /// Closest registered handle to `handle`, if any scores above the cutoff.
    pub fn suggest(&self, handle: &str) -> Option<String> {
        let locations = self.locations.read();
        suggest::closest_match(
            handle,
            locations.keys().map(String::as_str),
            self.config.suggestion_cutoff,
        )
        .map(str::to_string)
    }

    fn cached(&self, handle: &str) -> Option<Arc<T>> {
        self.cache.read().get(handle).cloned()
    }

    fn current_loader(&self) -> Result<Loader<T, L>, ResourceError> {
        self.loader
            .read()
            .clone()
            .ok_or_else(|| ResourceError::LoaderNotConfigured { manager: self.handle.clone() })
    }

    fn not_registered(&self, handle: &str) -> ResourceError {
        ResourceError::NotRegistered {
            manager: self.handle.clone(),
            handle: handle.to_string(),
            suggestion: self.suggest(handle),
        }
    }

    /// Run the loader for `handle` without touching the cache.
    fn invoke(&self, handle: &str, location: &L) -> Result<T, ResourceError> {
        let loader = self.current_loader()?;

        let span = LoadSpan::new(&self.handle, handle);
        let _entered = span.enter();
        let started = Instant::now();

        let result = loader(location).ok_or_else(|| ResourceError::LoadFailed {
            manager: self.handle.clone(),
            handle: handle.to_string(),
        });

        telemetry::record_load(&self.handle, result.is_ok(), started.elapsed());
        span.record_result(&result);

        match &result {
            Ok(_) => tracing::debug!(manager = %self.handle, handle = %handle, "resource loaded"),
            Err(_) => tracing::warn!(manager = %self.handle, handle = %handle, "loader returned no resource"),
        }

        result
    }

    /// Load and cache, overwriting whatever a concurrent load stored first.
    fn load(&self, handle: &str, location: &L) -> Result<Arc<T>, ResourceError> {
        let resource = Arc::new(self.invoke(handle, location)?);
        self.cache.write().insert(handle.to_string(), resource.clone());
        Ok(resource)
    }

    fn load_exclusive(&self, handle: &str, location: &L) -> Result<Arc<T>, ResourceError> {
        let gate = self.load_gates.entry(handle.to_string()).or_default().clone();
        let _held = gate.lock();

        // Another caller may have finished the load while we waited.
        if let Some(cached) = self.cached(handle) {
            telemetry::record_cache_hit(&self.handle);
            return Ok(cached);
        }

        let resource = Arc::new(self.invoke(handle, location)?);
        {
            // Holding the location table keeps `evict` out until the insert is done.
            let locations = self.locations.read();
            if locations.contains_key(handle) {
                self.cache.write().insert(handle.to_string(), resource.clone());
            } else {
                tracing::debug!(manager = %self.handle, handle = %handle, "handle evicted during load, not caching");
            }
        }

        // Failed loads keep the gate so queued and newly arriving callers still
        // take turns; the next success (or `evict`) retires it.
        self.load_gates.remove_if(handle, |_, current| Arc::ptr_eq(current, &gate));
        Ok(resource)
    }
}

impl<T, L: Clone> ResourceManager<T, L> {
    /// Location registered for `handle`.
    pub fn location(&self, handle: &str) -> Option<L> {
        self.locations.read().get(handle).cloned()
    }

    /// Fetch the resource for `handle`, loading it on first request.
    pub fn get(&self, handle: &str) -> Result<Arc<T>, ResourceError> {
        self.resolve(handle, None::<fn() -> Arc<T>>)
    }

    /// Like [`get`](Self::get), but returns `default` when the handle is unknown
    /// or fails to load. The default is never cached.
    pub fn get_or(&self, handle: &str, default: T) -> Result<Arc<T>, ResourceError> {
        self.resolve(handle, Some(move || Arc::new(default)))
    }

    /// Like [`get_or`](Self::get_or), building the default only when needed.
    pub fn get_or_else<F>(&self, handle: &str, default: F) -> Result<Arc<T>, ResourceError>
    where
        F: FnOnce() -> T,
    {
        self.resolve(handle, Some(move || Arc::new(default())))
    }

    /// Register `location` under `handle` and load it immediately.
    ///
    /// An instance already cached for `handle` wins over the fresh load and is
    /// what gets returned.
    pub fn force_load(&self, handle: impl Into<String>, location: L) -> Result<Arc<T>, ResourceError> {
        let handle = handle.into();
        self.register(handle.clone(), location.clone());

        let resource = self.invoke(&handle, &location)?;
        let mut cache = self.cache.write();
        Ok(cache.entry(handle).or_insert_with(|| Arc::new(resource)).clone())
    }

    fn resolve<D>(&self, handle: &str, default: Option<D>) -> Result<Arc<T>, ResourceError>
    where
        D: FnOnce() -> Arc<T>,
    {
        let Some(location) = self.location(handle) else {
            return match default {
                Some(default) => Ok(default()),
                None => Err(self.not_registered(handle)),
            };
        };

        if let Some(cached) = self.cached(handle) {
            telemetry::record_cache_hit(&self.handle);
            tracing::trace!(manager = %self.handle, handle = %handle, "cache hit");
            return Ok(cached);
        }

        telemetry::record_cache_miss(&self.handle);
        let result = match self.config.load_policy {
            LoadPolicy::Racy => self.load(handle, &location),
            LoadPolicy::Exclusive => self.load_exclusive(handle, &location),
        };

        match (result, default) {
            (Err(ResourceError::LoadFailed { .. }), Some(default)) => Ok(default()),
            (result, _) => result,
        }
    }
}

impl<T: ForceUpdate, L> ResourceManager<T, L> {
    /// Replace the cached instance so that existing holders observe the change.
    ///
    /// With nothing cached this is [`update`](Self::update). Otherwise the
    /// cached instance absorbs `resource` in place when `T` supports it; if it
    /// doesn't, the stored instance is replaced and old holders keep the old value.
    pub fn force_update(&self, handle: impl Into<String>, resource: T) {
        let handle = handle.into();

        let Some(existing) = self.cached(&handle) else {
            self.cache.write().insert(handle, Arc::new(resource));
            return;
        };

        if let Err(resource) = existing.update_in_place(resource) {
            tracing::debug!(manager = %self.handle, handle = %handle, "in-place update unsupported, replacing");
            self.cache.write().insert(handle, Arc::new(resource));
        }
    }
}

impl<T, L> fmt::Debug for ResourceManager<T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceManager")
            .field("handle", &self.handle)
            .field("registered", &self.len())
            .field("cached", &self.cached_len())
            .field("configured", &self.is_configured())
            .field("load_policy", &self.config.load_policy)
            .finish()
    }
}

impl<T, L> fmt::Display for ResourceManager<T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceManager('{}')", self.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_manager() -> (ResourceManager<i32, i32>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let manager = ResourceManager::new("Test");
        let counter = calls.clone();
        manager.configure(move |n: &i32| {
            counter.fetch_add(1, Ordering::SeqCst);
            (*n >= 0).then_some(*n)
        });
        (manager, calls)
    }

    #[test]
    fn test_new_manager_is_empty() {
        let manager: ResourceManager<i32> = ResourceManager::new("Test");
        assert_eq!(manager.handle(), "Test");
        assert!(manager.is_empty());
        assert_eq!(manager.cached_len(), 0);
        assert!(!manager.is_configured());
    }

    #[test]
    fn test_set_loader_none_keeps_existing() {
        let (manager, _) = counting_manager();
        manager.set_loader(None);
        assert!(manager.is_configured());
    }

    #[test]
    fn test_register_does_not_load() {
        let (manager, calls) = counting_manager();
        manager.register("a", 5);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.cached_len(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_load_failure_is_not_cached() {
        let (manager, calls) = counting_manager();
        manager.register("b", -1);
        assert!(matches!(manager.get("b"), Err(ResourceError::LoadFailed { .. })));
        assert!(matches!(manager.get("b"), Err(ResourceError::LoadFailed { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!manager.is_cached("b"));
    }

    #[test]
    fn test_evict_removes_load_gate() {
        let manager: ResourceManager<i32, i32> = ResourceManager::with_config(
            "Test",
            ManagerConfig { load_policy: LoadPolicy::Exclusive, ..Default::default() },
        );
        manager.configure(|n| Some(*n));
        manager.register("a", 1);
        assert_eq!(*manager.get("a").unwrap(), 1);
        manager.evict("a");
        assert!(manager.load_gates.is_empty());
    }

    #[test]
    fn test_load_policy_parse() {
        assert_eq!(LoadPolicy::parse("Exclusive"), Some(LoadPolicy::Exclusive));
        assert_eq!(LoadPolicy::parse(" racy "), Some(LoadPolicy::Racy));
        assert_eq!(LoadPolicy::parse("eager"), None);
        assert_eq!(LoadPolicy::Exclusive.as_str(), "exclusive");
    }

    #[test]
    fn test_debug_and_display() {
        let (manager, _) = counting_manager();
        manager.register("a", 1);
        assert_eq!(manager.to_string(), "ResourceManager('Test')");
        let debug = format!("{:?}", manager);
        assert!(debug.contains("registered: 1"));
        assert!(debug.contains("configured: true"));
    }
}
