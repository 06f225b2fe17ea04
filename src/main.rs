// Copyright 2024-2026 resourceful Contributors
// SPDX-License-Identifier: Apache-2.0

//! resourceful CLI entry point.
//!
//! ## CLI Subcommands
//!
//! - `resourceful-cli scan <dir>` - List the handles a directory import registers
//! - `resourceful-cli get <dir> <handle>` - Import a directory and fetch one resource
//! - `resourceful-cli manifest <file>` - Show resolved manifest entries
//! - `resourceful-cli config show|defaults` - Print configuration

use std::process::ExitCode;

use resourceful::cli::{self, config_cmd, flag_value, has_flag, positional, EXIT_USAGE};
use resourceful::{config, telemetry};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");
    let rest = args.get(2..).unwrap_or(&[]);

    // Logging is best-effort; a bad RESOURCEFUL_LOG_FILE must not block the command.
    if let Err(e) = telemetry::init_logging(&config::load().log) {
        eprintln!("Logging disabled: {}", e);
    }

    let code = match command {
        "scan" => match positional(rest, &["--match"]).as_slice() {
            [dir] => cli::run_scan(
                dir,
                has_flag(rest, "--recursive"),
                flag_value(rest, "--match"),
                has_flag(rest, "--json"),
            ),
            _ => usage_error("scan"),
        },
        "get" => match positional(rest, &[]).as_slice() {
            [dir, handle] => cli::run_get(
                dir,
                handle,
                has_flag(rest, "--recursive"),
                has_flag(rest, "--text"),
            ),
            _ => usage_error("get"),
        },
        "manifest" => match positional(rest, &[]).as_slice() {
            [file] => cli::run_manifest(file, has_flag(rest, "--json")),
            _ => usage_error("manifest"),
        },
        "config" => {
            let subcommand = rest.first().map(|s| s.as_str()).unwrap_or("show");
            match subcommand {
                "show" => config_cmd::run_show(has_flag(rest, "--json")),
                "defaults" => {
                    config_cmd::run_defaults();
                    cli::EXIT_OK
                }
                _ => {
                    eprintln!("Unknown config subcommand: {}", subcommand);
                    usage_error("config")
                }
            }
        }
        "help" | "--help" | "-h" => {
            if let Some(subcommand) = rest.first() {
                print_command_help(subcommand);
            } else {
                print_usage();
            }
            cli::EXIT_OK
        }
        "version" | "--version" | "-V" => {
            println!("resourceful {}", env!("CARGO_PKG_VERSION"));
            cli::EXIT_OK
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            EXIT_USAGE
        }
    };

    ExitCode::from(code as u8)
}

fn usage_error(command: &str) -> i32 {
    print_command_help(command);
    EXIT_USAGE
}

fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "resourceful - handle-indexed lazy resource cache v{}

USAGE:
    resourceful-cli <COMMAND> [OPTIONS]

COMMANDS:
    scan         List the handles a directory import would register
    get          Import a directory and fetch one resource by handle
    manifest     Show the resolved entries of a TOML resource manifest
    config       Show configuration (show, defaults)
    version      Show version information
    help         Show this help message

EXAMPLES:
    resourceful-cli scan assets --recursive
    resourceful-cli scan assets --match '\\.png$' --json
    resourceful-cli get assets sprites/player --recursive
    resourceful-cli get docs intro --text
    resourceful-cli manifest assets/resources.toml
    resourceful-cli config show --json

ENVIRONMENT:
    RESOURCEFUL_LOAD_POLICY        racy (default) or exclusive
    RESOURCEFUL_SUGGESTION_CUTOFF  Minimum similarity for suggestions (default: 0.6)
    RESOURCEFUL_LOG_LEVEL          Log filter directive (default: info)
    RESOURCEFUL_LOG_FORMAT         json (default) or pretty
    RESOURCEFUL_LOG_FILE           Write JSON logs to this file

EXIT CODES:
    0  Success
    1  Resource not registered or failed to load
    2  Usage error
    3  I/O or manifest error
",
        version
    );
}

/// Print detailed help for a specific command.
fn print_command_help(command: &str) {
    match command {
        "scan" => {
            eprintln!(
                "resourceful-cli scan - List importable resources

USAGE:
    resourceful-cli scan <DIR> [OPTIONS]

OPTIONS:
    --recursive      Descend into subdirectories
    --match <REGEX>  Only include paths matching REGEX
    --json           Output in JSON format

DESCRIPTION:
    Walks DIR and prints each selected file with the handle it would be
    registered under: its path relative to DIR with all suffixes removed.
"
            );
        }
        "get" => {
            eprintln!(
                "resourceful-cli get - Fetch one resource

USAGE:
    resourceful-cli get <DIR> <HANDLE> [OPTIONS]

OPTIONS:
    --recursive  Descend into subdirectories
    --text       Load as UTF-8 text and print the contents

DESCRIPTION:
    Imports DIR into a shared manager and fetches HANDLE. Without --text
    the file is memory-mapped and its size is printed. Unknown handles
    report the closest registered handle when one is similar enough.

EXIT CODES:
    0  Resource loaded
    1  Not registered or failed to load
    3  DIR could not be read
"
            );
        }
        "manifest" => {
            eprintln!(
                "resourceful-cli manifest - Inspect a resource manifest

USAGE:
    resourceful-cli manifest <FILE> [--json]

DESCRIPTION:
    Parses a TOML manifest with an optional `root` and a [resources]
    table, then prints every handle with its resolved location.
"
            );
        }
        "config" => {
            eprintln!(
                "resourceful-cli config - Show configuration

USAGE:
    resourceful-cli config show [--json]
    resourceful-cli config defaults

DESCRIPTION:
    `show` prints the effective values after environment overrides.
    `defaults` prints the built-in values.
"
            );
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
        }
    }
}
