//! resourceful
//!
//! A handle-indexed lazy resource cache. Callers register where a resource
//! lives under a string handle; the first request runs a pluggable loader and
//! every later request returns the cached instance.
//!
//! # Pieces
//!
//! - [`ResourceManager`]: location table, instance cache and loader for one
//!   resource type.
//! - [`ManagerRegistry`] / [`get_resource_manager`]: process-wide get-or-create
//!   access keyed by resource type and manager handle.
//! - [`DirectoryImport`] and [`ResourceManifest`]: turn a directory tree or a
//!   TOML manifest into registrations.
//! - [`prebuilt`]: ready-made managers for memory-mapped bytes and text.
//!
//! # Example
//!
//! ```
//! use resourceful::{ResourceError, ResourceManager};
//!
//! let numbers: ResourceManager<i64, i64> = ResourceManager::new("numbers");
//! numbers.configure(|n| (*n >= 0).then_some(*n));
//!
//! numbers.register("a", 5);
//! numbers.register("b", -1);
//!
//! assert_eq!(*numbers.get("a").unwrap(), 5);
//! assert!(matches!(numbers.get("b"), Err(ResourceError::LoadFailed { .. })));
//! assert_eq!(*numbers.get_or("b", 0).unwrap(), 0);
//! ```
//!
//! # Concurrency
//!
//! Managers are `Send + Sync` and take `&self` everywhere. By default two
//! threads requesting the same unloaded handle at once may both run the
//! loader (the last result is kept); [`LoadPolicy::Exclusive`] serializes
//! first loads per handle instead.

pub mod config;
pub mod error;
pub mod hotswap;
pub mod import;
pub mod manager;
pub mod manifest;
pub mod prebuilt;
pub mod registry;
pub mod suggest;
pub mod telemetry;

pub mod cli;

pub use error::ResourceError;
pub use hotswap::ForceUpdate;
pub use import::{DirectoryImport, ImportEntry, ImportError};
pub use manager::{LoadPolicy, Loader, ManagerConfig, ResourceManager};
pub use manifest::{ManifestError, ResourceManifest};
pub use prebuilt::{mapped_file_manager, text_manager, MappedFile};
pub use registry::{get_path_manager, get_resource_manager, ManagerRegistry};
