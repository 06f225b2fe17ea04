// Copyright 2024-2026 resourceful Contributors
// SPDX-License-Identifier: Apache-2.0

//! `manifest` subcommand: show the resolved entries of a resource manifest.

use std::collections::BTreeMap;
use std::path::Path;

use crate::cli::{EXIT_IO, EXIT_OK};
use crate::manifest::ResourceManifest;

/// Run `manifest <file> [--json]`.
pub fn run_manifest(path: &str, json: bool) -> i32 {
    let manifest = match ResourceManifest::from_file(Path::new(path)) {
        Ok(manifest) => manifest,
        Err(e) => {
            eprintln!("{}", e);
            return EXIT_IO;
        }
    };

    let entries = manifest.entries();

    if json {
        let map: BTreeMap<&str, String> = entries
            .iter()
            .map(|(handle, location)| (handle.as_str(), location.display().to_string()))
            .collect();
        match serde_json::to_string_pretty(&map) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Failed to encode manifest: {}", e);
                return EXIT_IO;
            }
        }
    } else {
        for (handle, location) in &entries {
            println!("{} = {}", handle, location.display());
        }
        println!("{} resource(s)", entries.len());
    }

    EXIT_OK
}
