//! Fuzz target for "did you mean" suggestions.
//!
//! Tests that similarity scoring never panics, stays within `[0, 1]`, and that
//! suggestions always come from the candidate list.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use resourceful::suggest::{closest_match, similarity, DEFAULT_CUTOFF};

#[derive(Debug, Arbitrary)]
struct Input {
    query: String,
    candidates: Vec<String>,
}

fuzz_target!(|input: Input| {
    for candidate in &input.candidates {
        let score = similarity(&input.query, candidate);
        assert!((0.0..=1.0).contains(&score), "score out of range: {}", score);
    }

    let found = closest_match(
        &input.query,
        input.candidates.iter().map(String::as_str),
        DEFAULT_CUTOFF,
    );
    if let Some(found) = found {
        assert!(input.candidates.iter().any(|c| c == found));
        assert!(similarity(&input.query, found) >= DEFAULT_CUTOFF);
    }
});
