//! Span utilities for resource loads.

use tracing::{debug_span, Span};

/// Extension trait for recording an operation's outcome on a span.
pub trait SpanExt {
    /// Record the result of an operation into the span.
    fn record_result<T, E>(&self, result: &Result<T, E>)
    where
        E: std::fmt::Display;
}

impl SpanExt for Span {
    fn record_result<T, E>(&self, result: &Result<T, E>)
    where
        E: std::fmt::Display,
    {
        match result {
            Ok(_) => {
                self.record("status", "ok");
            }
            Err(e) => {
                self.record("status", "error");
                self.record("error.message", e.to_string().as_str());
            }
        }
    }
}

/// Factory for loader-invocation spans.
pub struct LoadSpan;

impl LoadSpan {
    /// Create a span for one loader call.
    ///
    /// `status` and `error.message` are filled in by [`SpanExt::record_result`].
    pub fn new(manager: &str, handle: &str) -> Span {
        debug_span!(
            "resource_load",
            manager = %manager,
            handle = %handle,
            status = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    }
}
