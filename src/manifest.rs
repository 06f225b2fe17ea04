//! Resource manifest parsing.
//!
//! A manifest is a TOML file listing handles and the paths they load from:
//!
//! ```toml
//! root = "assets"
//!
//! [resources]
//! hero = "images/hero.png"
//! theme = "music/theme.ogg"
//! ```
//!
//! Relative locations are resolved against `root`; a relative `root` read via
//! [`ResourceManifest::from_file`] is resolved against the manifest's directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::manager::ResourceManager;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid manifest: {0}")]
    Invalid(String),
}

/// Handle → location listing loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceManifest {
    /// Directory relative locations are joined onto.
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Resource handle → location.
    #[serde(default)]
    pub resources: BTreeMap<String, PathBuf>,
}

impl ResourceManifest {
    /// Load and validate a manifest file.
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut manifest = Self::from_toml(&content)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        manifest.root = Some(match manifest.root.take() {
            Some(root) => base.join(root),
            None => base.to_path_buf(),
        });

        Ok(manifest)
    }

    /// Parse and validate a manifest from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        let manifest: Self = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Reject empty handles and empty locations.
    pub fn validate(&self) -> Result<(), ManifestError> {
        for (handle, location) in &self.resources {
            if handle.trim().is_empty() {
                return Err(ManifestError::Invalid("resource handles cannot be empty".into()));
            }
            if location.as_os_str().is_empty() {
                return Err(ManifestError::Invalid(format!(
                    "resource '{}' has an empty location",
                    handle
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Resolved `(handle, location)` pairs, sorted by handle.
    pub fn entries(&self) -> Vec<(String, PathBuf)> {
        self.resources
            .iter()
            .map(|(handle, location)| (handle.clone(), self.resolve(location)))
            .collect()
    }

    /// Register every entry with `manager`. Returns the count.
    pub fn register_into<T>(&self, manager: &ResourceManager<T, PathBuf>) -> usize {
        let entries = self.entries();
        let count = entries.len();
        for (handle, location) in entries {
            manager.register(handle, location);
        }
        tracing::info!(manager = %manager.handle(), count, "registered manifest resources");
        count
    }

    fn resolve(&self, location: &Path) -> PathBuf {
        match &self.root {
            Some(root) if location.is_relative() => root.join(location),
            _ => location.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = ResourceManifest::from_toml("[resources]\nhero = \"hero.png\"\n").unwrap();
        assert_eq!(manifest.len(), 1);
        assert!(manifest.root.is_none());
        assert_eq!(manifest.entries(), vec![("hero".to_string(), PathBuf::from("hero.png"))]);
    }

    #[test]
    fn test_empty_manifest_is_valid() {
        let manifest = ResourceManifest::from_toml("").unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = ResourceManifest::from_toml("version = 2\n");
        assert!(matches!(result, Err(ManifestError::Parse(_))));
    }
}
