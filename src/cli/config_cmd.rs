// Copyright 2024-2026 resourceful Contributors
// SPDX-License-Identifier: Apache-2.0

//! Config CLI subcommands: show, defaults.
//!
//! These commands read configuration directly from environment variables.

use crate::cli::{EXIT_IO, EXIT_OK};
use crate::config::{self, EffectiveConfig};
use crate::config::{LOAD_POLICY_VAR, LOG_FILE_VAR, LOG_FORMAT_VAR, LOG_LEVEL_VAR, SUGGESTION_CUTOFF_VAR};

/// Print effective config to stdout, as key-value pairs or JSON.
pub fn run_show(json: bool) -> i32 {
    let cfg = config::load().effective_config();
    if !json {
        print_config(&cfg);
        return EXIT_OK;
    }
    match serde_json::to_string_pretty(&cfg) {
        Ok(text) => {
            println!("{}", text);
            EXIT_OK
        }
        Err(e) => {
            eprintln!("Failed to encode config: {}", e);
            EXIT_IO
        }
    }
}

/// Print default config values (no env overrides) to stdout.
pub fn run_defaults() {
    println!("{}=racy", LOAD_POLICY_VAR);
    println!("{}=0.6", SUGGESTION_CUTOFF_VAR);
    println!("{}=info", LOG_LEVEL_VAR);
    println!("{}=json", LOG_FORMAT_VAR);
    println!("{}=", LOG_FILE_VAR);
}

fn print_config(cfg: &EffectiveConfig) {
    println!("{}={}", LOAD_POLICY_VAR, cfg.load_policy);
    println!("{}={}", SUGGESTION_CUTOFF_VAR, cfg.suggestion_cutoff);
    println!("{}={}", LOG_LEVEL_VAR, cfg.log_level);
    println!("{}={}", LOG_FORMAT_VAR, cfg.log_format);
    println!(
        "{}={}",
        LOG_FILE_VAR,
        cfg.log_file.as_ref().map(|p| p.display().to_string()).unwrap_or_default()
    );
}
