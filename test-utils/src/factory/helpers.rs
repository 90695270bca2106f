use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Returns a process-wide unique id for factory defaults.
///
/// Keeps snowflake-like columns (channel ids, user ids) unique across
/// factories without coordination between tests.
pub fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}
