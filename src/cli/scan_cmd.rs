// Copyright 2024-2026 resourceful Contributors
// SPDX-License-Identifier: Apache-2.0

//! `scan` subcommand: list the handles a directory import would register.

use regex::Regex;
use serde::Serialize;

use crate::cli::{EXIT_IO, EXIT_OK, EXIT_USAGE};
use crate::import::{DirectoryImport, ImportEntry};

#[derive(Debug, Serialize)]
struct ScanRow<'a> {
    handle: &'a str,
    location: String,
}

/// Run `scan <dir> [--recursive] [--match <regex>] [--json]`.
pub fn run_scan(dir: &str, recursive: bool, pattern: Option<&str>, json: bool) -> i32 {
    let mut import = DirectoryImport::new(dir).recursive(recursive);

    if let Some(pattern) = pattern {
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(e) => {
                eprintln!("Invalid --match pattern: {}", e);
                return EXIT_USAGE;
            }
        };
        import = import.filter(move |path| regex.is_match(&path.to_string_lossy()));
    }

    match import.scan() {
        Ok(entries) => {
            if json {
                print_json(&entries)
            } else {
                print_entries(&entries);
                EXIT_OK
            }
        }
        Err(e) => {
            eprintln!("Error scanning {}: {}", dir, e);
            EXIT_IO
        }
    }
}

fn print_json(entries: &[ImportEntry]) -> i32 {
    let rows: Vec<ScanRow<'_>> = entries
        .iter()
        .map(|e| ScanRow {
            handle: &e.handle,
            location: e.path.display().to_string(),
        })
        .collect();

    match serde_json::to_string_pretty(&rows) {
        Ok(text) => {
            println!("{}", text);
            EXIT_OK
        }
        Err(e) => {
            eprintln!("Failed to encode scan results: {}", e);
            EXIT_IO
        }
    }
}

/// Format and print scan results to stdout.
pub fn print_entries(entries: &[ImportEntry]) {
    if entries.is_empty() {
        println!("No files selected.");
        return;
    }

    let width = entries.iter().map(|e| e.handle.len()).max().unwrap_or(0).max(6);
    println!("{:<width$}  LOCATION", "HANDLE", width = width);
    println!("{}", "-".repeat(width + 10));
    for entry in entries {
        println!("{:<width$}  {}", entry.handle, entry.path.display(), width = width);
    }
    println!("{} file(s)", entries.len());
}
