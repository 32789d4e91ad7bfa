//! Timestamp-gated refresh throttle.

use chrono::Utc;

/// Current time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Whether a refresh must be skipped because the slice is still fresh.
///
/// A slice updated at `last_updated` may be refreshed again once
/// `last_updated + upd_freq_ms` is no longer in the future.
pub fn is_throttled(last_updated: i64, upd_freq_ms: u64, now: i64) -> bool {
    let freq = i64::try_from(upd_freq_ms).unwrap_or(i64::MAX);
    last_updated.saturating_add(freq) > now
}
