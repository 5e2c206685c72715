use chrono::{DateTime, Local};

use super::decompose::decompose;
use super::progress::displayed_progress;
use crate::models::countdown_event::CountdownEvent;

/// Time left until a target, broken into whole units.
///
/// Each unit holds the remainder after the larger units were removed, so
/// `hours < 24`, `minutes < 60` and `seconds < 60` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimeRemaining {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub is_expired: bool,
}

impl TimeRemaining {
    /// The all-zero breakdown reported once the target has been reached.
    pub const EXPIRED: TimeRemaining = TimeRemaining {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        is_expired: true,
    };

    /// Milliseconds represented by the unit fields (truncated to seconds).
    pub fn total_millis(&self) -> i64 {
        self.days as i64 * super::MS_PER_DAY
            + i64::from(self.hours) * super::MS_PER_HOUR
            + i64::from(self.minutes) * super::MS_PER_MINUTE
            + i64::from(self.seconds) * super::MS_PER_SECOND
    }
}

/// Lifecycle of a [`super::CountdownTicker`]. `Stopped` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerState {
    Idle,
    Running,
    Stopped,
}

impl Default for TickerState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Everything a card needs about one event at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountdownStatus {
    pub remaining: TimeRemaining,
    /// Completion in `[0, 100]`; 100 once expired
    pub progress: f64,
}

impl CountdownStatus {
    pub fn at(event: &CountdownEvent, now: DateTime<Local>) -> Self {
        let remaining = decompose(event.target_date, now);
        Self::with_remaining(event, remaining, now)
    }

    /// Build from a breakdown published by a ticker
    pub fn with_remaining(
        event: &CountdownEvent,
        remaining: TimeRemaining,
        now: DateTime<Local>,
    ) -> Self {
        let progress = displayed_progress(&remaining, event.created_at, event.target_date, now);
        Self {
            remaining,
            progress,
        }
    }
}
