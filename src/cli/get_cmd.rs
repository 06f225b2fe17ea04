// Copyright 2024-2026 resourceful Contributors
// SPDX-License-Identifier: Apache-2.0

//! `get` subcommand: import a directory into a prebuilt manager and fetch one handle.

use crate::cli::{EXIT_IO, EXIT_NOT_FOUND, EXIT_OK};
use crate::import::DirectoryImport;
use crate::prebuilt::{mapped_file_manager, text_manager};

/// Run `get <dir> <handle> [--recursive] [--text]`.
///
/// Prints the resource size, or its contents with `--text`.
pub fn run_get(dir: &str, handle: &str, recursive: bool, text: bool) -> i32 {
    let import = DirectoryImport::new(dir).recursive(recursive);

    if text {
        let manager = text_manager();
        if let Err(e) = manager.import_directory(&import) {
            eprintln!("Error importing {}: {}", dir, e);
            return EXIT_IO;
        }
        match manager.get(handle) {
            Ok(contents) => {
                print!("{}", contents);
                EXIT_OK
            }
            Err(e) => {
                eprintln!("{}", e);
                EXIT_NOT_FOUND
            }
        }
    } else {
        let manager = mapped_file_manager();
        if let Err(e) = manager.import_directory(&import) {
            eprintln!("Error importing {}: {}", dir, e);
            return EXIT_IO;
        }
        match manager.get(handle) {
            Ok(file) => {
                println!("{}  {} bytes  {}", handle, file.len(), file.path().display());
                EXIT_OK
            }
            Err(e) => {
                eprintln!("{}", e);
                EXIT_NOT_FOUND
            }
        }
    }
}
