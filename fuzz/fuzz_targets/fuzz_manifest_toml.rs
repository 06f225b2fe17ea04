//! Fuzz target for resource manifest parsing.
//!
//! Tests that arbitrary text cannot cause panics when parsed as a manifest,
//! and that accepted manifests only yield non-empty handles and locations.

#![no_main]

use libfuzzer_sys::fuzz_target;
use resourceful::ResourceManifest;

fuzz_target!(|data: &str| {
    let Ok(manifest) = ResourceManifest::from_toml(data) else {
        return;
    };

    let entries = manifest.entries();
    assert_eq!(entries.len(), manifest.len());
    for (handle, location) in entries {
        assert!(!handle.trim().is_empty(), "blank handle accepted");
        assert!(!location.as_os_str().is_empty(), "empty location accepted");
    }
});
