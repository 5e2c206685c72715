use chrono::{DateTime, Local};

use super::models::TimeRemaining;
use super::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};

/// Break the time from `now` until `target` into days, hours, minutes and
/// seconds. A target at or before `now` yields [`TimeRemaining::EXPIRED`].
///
/// Pure: the result depends only on the two instants.
pub fn decompose(target: DateTime<Local>, now: DateTime<Local>) -> TimeRemaining {
    if target <= now {
        return TimeRemaining::EXPIRED;
    }

    let delta_ms = (target - now).num_milliseconds();
    TimeRemaining {
        days: (delta_ms / MS_PER_DAY) as u64,
        hours: ((delta_ms % MS_PER_DAY) / MS_PER_HOUR) as u32,
        minutes: ((delta_ms % MS_PER_HOUR) / MS_PER_MINUTE) as u32,
        seconds: ((delta_ms % MS_PER_MINUTE) / MS_PER_SECOND) as u32,
        is_expired: false,
    }
}
