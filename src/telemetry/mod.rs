//! Telemetry for resource managers.
//!
//! Structured logging through `tracing`, per-load spans, and cache counters
//! through the `metrics` facade. Nothing here is required for correctness: with
//! no subscriber or recorder installed every call is a cheap no-op.

mod counters;
mod logging;
mod spans;

pub use counters::{record_cache_hit, record_cache_miss, record_eviction, record_load};
pub use logging::{init_logging, LogConfig, LogError, LogFormat};
pub use spans::{LoadSpan, SpanExt};
