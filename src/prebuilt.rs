//! Prebuilt managers for common file-backed resources.
//!
//! These managers are process-wide but are NOT tracked by the registry:
//! `get_resource_manager::<MappedFile, PathBuf>("mapped_files")` returns a
//! different, unconfigured manager.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use memmap2::Mmap;

use crate::config;
use crate::manager::ResourceManager;

/// Name of the manager returned by [`mapped_file_manager`].
pub const MAPPED_FILES: &str = "mapped_files";
/// Name of the manager returned by [`text_manager`].
pub const TEXT_FILES: &str = "text_files";

/// Read-only memory-mapped file contents.
pub struct MappedFile {
    path: PathBuf,
    mmap: Mmap,
}

impl MappedFile {
    /// Memory-map `path` for zero-copy access.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        // SAFETY: the file is opened read-only; resources are not expected to be
        // truncated or rewritten while they are cached.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self {
            path: path.to_path_buf(),
            mmap,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File contents as a byte slice (zero-copy).
    pub fn as_bytes(&self) -> &[u8] {
        &self.mmap
    }

    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }
}

impl AsRef<[u8]> for MappedFile {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Debug for MappedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappedFile")
            .field("path", &self.path)
            .field("len", &self.len())
            .finish()
    }
}

/// Loader: memory-map the file at `location`.
#[allow(clippy::ptr_arg)]
pub fn load_mapped(location: &PathBuf) -> Option<MappedFile> {
    MappedFile::open(location)
        .map_err(|e| tracing::warn!(path = %location.display(), error = %e, "failed to map file"))
        .ok()
}

/// Loader: read the file at `location` as UTF-8 text.
#[allow(clippy::ptr_arg)]
pub fn load_text(location: &PathBuf) -> Option<String> {
    std::fs::read_to_string(location)
        .map_err(|e| tracing::warn!(path = %location.display(), error = %e, "failed to read text file"))
        .ok()
}

static MAPPED_FILE_MANAGER: OnceLock<Arc<ResourceManager<MappedFile>>> = OnceLock::new();
static TEXT_MANAGER: OnceLock<Arc<ResourceManager<String>>> = OnceLock::new();

/// Shared manager that memory-maps files on first request.
pub fn mapped_file_manager() -> Arc<ResourceManager<MappedFile>> {
    MAPPED_FILE_MANAGER
        .get_or_init(|| {
            let manager = ResourceManager::with_config(MAPPED_FILES, config::load().manager);
            manager.configure(load_mapped);
            Arc::new(manager)
        })
        .clone()
}

/// Shared manager that reads UTF-8 text files on first request.
pub fn text_manager() -> Arc<ResourceManager<String>> {
    TEXT_MANAGER
        .get_or_init(|| {
            let manager = ResourceManager::with_config(TEXT_FILES, config::load().manager);
            manager.configure(load_text);
            Arc::new(manager)
        })
        .clone()
}
