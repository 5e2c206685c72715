//! Countdown core: time decomposition, progress and the refresh ticker.

mod clock;
mod decompose;
mod models;
mod progress;
mod ticker;

pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub(crate) use clock::MonotonicClock;
pub use decompose::decompose;
pub use models::{CountdownStatus, TickerState, TimeRemaining};
pub use progress::{displayed_progress, progress};
pub use ticker::{CountdownTicker, StopHandle, TickerHandle, CADENCE};

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
