//! Directory import: turn a file tree into `register` calls.
//!
//! Walks with `std::fs::read_dir`. Each selected file becomes one
//! `(handle, location)` pair; by default the handle is the file's path relative
//! to the root with every suffix stripped (`maps/level1.tar.gz` → `maps/level1`)
//! and the location is the path itself.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::manager::ResourceManager;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Import root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

type FileFilter = Box<dyn Fn(&Path) -> bool + Send + Sync>;
type NameKey = Box<dyn Fn(&Path, &Path) -> String + Send + Sync>;

/// One selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    pub handle: String,
    pub path: PathBuf,
}

/// Builder describing which files under a root to import and how to name them.
pub struct DirectoryImport {
    root: PathBuf,
    recursive: bool,
    filter: Option<FileFilter>,
    name_key: Option<NameKey>,
}

impl DirectoryImport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: false,
            filter: None,
            name_key: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Descend into subdirectories. Off by default.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Only import files for which `filter` returns true.
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Derive handles with `name_key(root, file)` instead of the default.
    pub fn name_key<F>(mut self, name_key: F) -> Self
    where
        F: Fn(&Path, &Path) -> String + Send + Sync + 'static,
    {
        self.name_key = Some(Box::new(name_key));
        self
    }

    /// Walk the root and return the selected files, sorted by path.
    pub fn scan(&self) -> Result<Vec<ImportEntry>, ImportError> {
        if !self.root.is_dir() {
            return Err(ImportError::NotADirectory(self.root.clone()));
        }

        let mut files = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let read_dir = std::fs::read_dir(&dir).map_err(|source| ImportError::Io {
                path: dir.clone(),
                source,
            })?;

            for dir_entry in read_dir {
                let dir_entry = dir_entry.map_err(|source| ImportError::Io {
                    path: dir.clone(),
                    source,
                })?;
                let path = dir_entry.path();

                if path.is_dir() {
                    if self.recursive {
                        pending.push(path);
                    }
                    continue;
                }

                if self.filter.as_ref().map_or(true, |filter| filter(&path)) {
                    files.push(path);
                }
            }
        }

        files.sort();

        Ok(files
            .into_iter()
            .map(|path| ImportEntry {
                handle: self.handle_for(&path),
                path,
            })
            .collect())
    }

    /// Register every selected file with its path as location. Returns the count.
    pub fn import_into<T>(&self, manager: &ResourceManager<T, PathBuf>) -> Result<usize, ImportError> {
        self.import_into_with(manager, Path::to_path_buf)
    }

    /// Register every selected file, building each location with `location_key`.
    pub fn import_into_with<T, L, F>(
        &self,
        manager: &ResourceManager<T, L>,
        location_key: F,
    ) -> Result<usize, ImportError>
    where
        F: Fn(&Path) -> L,
    {
        let entries = self.scan()?;
        let count = entries.len();

        for entry in entries {
            manager.register(entry.handle, location_key(&entry.path));
        }

        tracing::info!(
            manager = %manager.handle(),
            root = %self.root.display(),
            count,
            "imported directory"
        );

        Ok(count)
    }

    fn handle_for(&self, path: &Path) -> String {
        match &self.name_key {
            Some(name_key) => name_key(&self.root, path),
            None => default_handle(&self.root, path),
        }
    }
}

impl fmt::Debug for DirectoryImport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryImport")
            .field("root", &self.root)
            .field("recursive", &self.recursive)
            .field("filter", &self.filter.is_some())
            .field("name_key", &self.name_key.is_some())
            .finish()
    }
}

/// Path relative to `root` with all suffixes stripped, components joined by `/`.
pub fn default_handle(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let mut parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if let Some(last) = parts.last_mut() {
        *last = strip_suffixes(last).to_string();
    }

    parts.join("/")
}

/// `"archive.tar.gz"` → `"archive"`; a leading dot is part of the name (`".env"`).
fn strip_suffixes(file_name: &str) -> &str {
    let search_from = usize::from(file_name.starts_with('.'));
    match file_name[search_from..].find('.') {
        Some(idx) => &file_name[..search_from + idx],
        None => file_name,
    }
}

impl<T> ResourceManager<T, PathBuf> {
    /// Register every file selected by `import`, located by its path.
    pub fn import_directory(&self, import: &DirectoryImport) -> Result<usize, ImportError> {
        import.import_into(self)
    }
}
