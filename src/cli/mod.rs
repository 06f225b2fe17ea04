// Copyright 2024-2026 resourceful Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI module for `resourceful-cli` commands.
//!
//! ## Usage
//!
//! ```bash
//! resourceful-cli scan assets --recursive --match '\.png$'
//! resourceful-cli get assets sprites/player --recursive
//! resourceful-cli manifest assets/resources.toml --json
//! resourceful-cli config show
//! ```
//!
//! Commands return a process exit code rather than an error so `main` can map
//! them straight onto `ExitCode`.

pub mod config_cmd;
pub mod get_cmd;
pub mod manifest_cmd;
pub mod scan_cmd;

pub use get_cmd::run_get;
pub use manifest_cmd::run_manifest;
pub use scan_cmd::run_scan;

/// Command succeeded.
pub const EXIT_OK: i32 = 0;
/// Resource not registered or failed to load.
pub const EXIT_NOT_FOUND: i32 = 1;
/// Bad command line.
pub const EXIT_USAGE: i32 = 2;
/// Filesystem or manifest could not be read.
pub const EXIT_IO: i32 = 3;

/// True if `flag` appears anywhere in `args`.
pub fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Value following `flag`, e.g. `--match <regex>`.
pub fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}

/// Arguments that are neither flags nor values of `value_flags`.
pub fn positional<'a>(args: &'a [String], value_flags: &[&str]) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if value_flags.contains(&arg.as_str()) {
            skip_next = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        out.push(arg.as_str());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_has_flag() {
        let a = args(&["assets", "--recursive"]);
        assert!(has_flag(&a, "--recursive"));
        assert!(!has_flag(&a, "--json"));
    }

    #[test]
    fn test_flag_value() {
        let a = args(&["assets", "--match", "png$"]);
        assert_eq!(flag_value(&a, "--match"), Some("png$"));
        assert_eq!(flag_value(&args(&["--match"]), "--match"), None);
    }

    #[test]
    fn test_positional_skips_flags_and_values() {
        let a = args(&["assets", "--match", "png$", "--recursive", "hero"]);
        assert_eq!(positional(&a, &["--match"]), vec!["assets", "hero"]);
    }
}
