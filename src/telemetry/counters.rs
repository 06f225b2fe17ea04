//! Cache counters reported through the `metrics` facade.

use std::time::Duration;

pub fn record_cache_hit(manager: &str) {
    metrics::counter!("resourceful_cache_hits_total", "manager" => manager.to_string()).increment(1);
}

pub fn record_cache_miss(manager: &str) {
    metrics::counter!("resourceful_cache_misses_total", "manager" => manager.to_string()).increment(1);
}

/// Count a loader call and record how long it took.
pub fn record_load(manager: &str, success: bool, elapsed: Duration) {
    let status = if success { "ok" } else { "failed" };
    metrics::counter!(
        "resourceful_loads_total",
        "manager" => manager.to_string(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!("resourceful_load_seconds", "manager" => manager.to_string())
        .record(elapsed.as_secs_f64());
}

/// Count a cached instance being dropped by `uncache` or `evict`.
pub fn record_eviction(manager: &str) {
    metrics::counter!("resourceful_evictions_total", "manager" => manager.to_string()).increment(1);
}
