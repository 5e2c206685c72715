use chrono::{DateTime, Local};

/// Source of the current instant for tickers and renderers.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// Reads the system wall clock on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Wall-clock reading taken once, advanced by tokio's timer so paused-time
/// tests can step it with `tokio::time::advance`.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    anchor_wall: DateTime<Local>,
    anchor: tokio::time::Instant,
}

#[cfg(test)]
impl MonotonicClock {
    pub fn anchored_at(wall: DateTime<Local>) -> Self {
        Self {
            anchor_wall: wall,
            anchor: tokio::time::Instant::now(),
        }
    }
}

#[cfg(test)]
impl Clock for MonotonicClock {
    fn now(&self) -> DateTime<Local> {
        let elapsed = chrono::Duration::from_std(self.anchor.elapsed())
            .unwrap_or_else(|_| chrono::Duration::zero());
        self.anchor_wall + elapsed
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Local> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now(&self) -> DateTime<Local> {
        (**self).now()
    }
}
