use chrono::{DateTime, Local};

use super::decompose::decompose;
use super::models::TimeRemaining;
use super::MS_PER_DAY;

/// Percentage of the scheduled span that has elapsed, in `[0, 100]`.
///
/// The total span is counted in whole days rounded up while the remaining
/// part is the truncated `days` field of [`decompose`], so the value moves in
/// day-sized steps. A target that is not after `created_at` yields 0.
pub fn progress(
    created_at: DateTime<Local>,
    target: DateTime<Local>,
    now: DateTime<Local>,
) -> f64 {
    let span_ms = (target - created_at).num_milliseconds();
    if span_ms <= 0 {
        return 0.0;
    }

    // ceil(span / day) for a positive span
    let total_days = ((span_ms + MS_PER_DAY - 1) / MS_PER_DAY) as f64;
    let remaining_days = decompose(target, now).days as f64;
    let raw = (total_days - remaining_days) / total_days * 100.0;
    raw.clamp(0.0, 100.0)
}

/// Progress as shown to the user: expired countdowns always read 100.
pub fn displayed_progress(
    remaining: &TimeRemaining,
    created_at: DateTime<Local>,
    target: DateTime<Local>,
    now: DateTime<Local>,
) -> f64 {
    if remaining.is_expired {
        100.0
    } else {
        progress(created_at, target, now)
    }
}
