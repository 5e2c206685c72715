use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::clock::Clock;
use super::decompose::decompose;
use super::models::{TickerState, TimeRemaining};

/// Interval between two publications of a running ticker.
pub const CADENCE: Duration = Duration::from_secs(1);

type Observer = Box<dyn FnMut(TimeRemaining)>;

/// Cloneable handle that moves a ticker to [`TickerState::Stopped`].
///
/// Safe to call repeatedly and from inside the ticker's own observer.
#[derive(Debug, Clone)]
pub struct StopHandle {
    state: Rc<Cell<TickerState>>,
}

impl StopHandle {
    pub fn stop(&self) {
        if self.state.get() != TickerState::Stopped {
            self.state.set(TickerState::Stopped);
            log::debug!("Countdown ticker stopped");
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.state.get() == TickerState::Stopped
    }
}

/// Recomputes the breakdown for one target against a [`Clock`] and hands
/// each result to a single observer on the calling thread.
///
/// `start` moves Idle → Running and publishes at once, `tick` publishes while
/// Running, and `stop` is terminal. Once an expired breakdown has been
/// published every later one is expired too, even if the clock steps back.
pub struct CountdownTicker<C: Clock> {
    target: DateTime<Local>,
    cadence: Duration,
    clock: C,
    state: Rc<Cell<TickerState>>,
    last: Option<TimeRemaining>,
    observer: Option<Observer>,
}

impl<C: Clock> CountdownTicker<C> {
    pub fn new(target: DateTime<Local>, clock: C) -> Self {
        Self::with_cadence(target, CADENCE, clock)
    }

    /// A zero cadence falls back to [`CADENCE`].
    pub fn with_cadence(target: DateTime<Local>, cadence: Duration, clock: C) -> Self {
        let cadence = if cadence.is_zero() { CADENCE } else { cadence };
        Self {
            target,
            cadence,
            clock,
            state: Rc::new(Cell::new(TickerState::Idle)),
            last: None,
            observer: None,
        }
    }

    /// Register the observer, replacing any previous one.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(TimeRemaining) + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    pub fn target(&self) -> DateTime<Local> {
        self.target
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    pub fn state(&self) -> TickerState {
        self.state.get()
    }

    pub fn last_published(&self) -> Option<TimeRemaining> {
        self.last
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            state: Rc::clone(&self.state),
        }
    }

    /// Begin counting. Returns the first publication, or `None` if the
    /// ticker was not idle.
    pub fn start(&mut self) -> Option<TimeRemaining> {
        if self.state.get() != TickerState::Idle {
            return None;
        }
        self.state.set(TickerState::Running);
        log::debug!("Countdown ticker started for {}", self.target);
        Some(self.publish())
    }

    /// Publish a fresh breakdown. Returns `None` unless running.
    pub fn tick(&mut self) -> Option<TimeRemaining> {
        if self.state.get() != TickerState::Running {
            return None;
        }
        Some(self.publish())
    }

    pub fn stop(&self) {
        self.stop_handle().stop();
    }

    fn publish(&mut self) -> TimeRemaining {
        let expired_before = self.last.map_or(false, |last| last.is_expired);
        let remaining = if expired_before {
            TimeRemaining::EXPIRED
        } else {
            decompose(self.target, self.clock.now())
        };

        if remaining.is_expired && !expired_before {
            log::info!("Countdown to {} reached zero", self.target);
        }

        self.last = Some(remaining);
        if let Some(observer) = self.observer.as_mut() {
            observer(remaining);
        }
        remaining
    }
}

impl<C: Clock + 'static> CountdownTicker<C> {
    /// Drive this ticker from a `tokio::time::interval` on the current
    /// `LocalSet`: one publication immediately, then one per cadence.
    ///
    /// # Panics
    /// Panics when called outside of a `tokio::task::LocalSet`.
    pub fn spawn_local(mut self) -> TickerHandle {
        let stop = self.stop_handle();
        let task = tokio::task::spawn_local(async move {
            let mut interval = tokio::time::interval(self.cadence);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            interval.tick().await;
            if self.start().is_none() {
                return;
            }
            loop {
                interval.tick().await;
                // a stop issued while this tick was pending lands here
                if self.tick().is_none() {
                    break;
                }
            }
        });

        TickerHandle { stop, task }
    }
}

/// Owner of a running ticker task. Stopping or dropping it halts all
/// further publications.
pub struct TickerHandle {
    stop: StopHandle,
    task: JoinHandle<()>,
}

impl TickerHandle {
    pub fn stop(&self) {
        self.stop.stop();
        self.task.abort();
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::countdown::clock::{MockClock, MonotonicClock};
    use chrono::{Duration as ChronoDuration, TimeZone};
    use std::cell::RefCell;
    use tokio::task::LocalSet;

    fn wall() -> DateTime<Local> {
        Local.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn clock_reading(readings: Vec<DateTime<Local>>) -> MockClock {
        let mut clock = MockClock::new();
        let mut readings = readings.into_iter();
        clock
            .expect_now()
            .returning(move || readings.next().expect("clock read more often than expected"));
        clock
    }

    fn recorder<C: Clock>(ticker: &mut CountdownTicker<C>) -> Rc<RefCell<Vec<TimeRemaining>>> {
        let published = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&published);
        ticker.subscribe(move |remaining| sink.borrow_mut().push(remaining));
        published
    }

    #[test]
    fn test_start_publishes_immediately() {
        let target = wall() + ChronoDuration::seconds(90);
        let mut ticker = CountdownTicker::new(target, clock_reading(vec![wall()]));
        let published = recorder(&mut ticker);

        let first = ticker.start().unwrap();
        assert_eq!(ticker.state(), TickerState::Running);
        assert_eq!(first.minutes, 1);
        assert_eq!(first.seconds, 30);
        assert_eq!(*published.borrow(), vec![first]);
    }

    #[test]
    fn test_tick_before_start_is_ignored() {
        let mut ticker = CountdownTicker::new(wall(), MockClock::new());
        let published = recorder(&mut ticker);

        assert_eq!(ticker.tick(), None);
        assert_eq!(ticker.state(), TickerState::Idle);
        assert!(published.borrow().is_empty());
    }

    #[test]
    fn test_stop_is_terminal_and_idempotent() {
        let target = wall() + ChronoDuration::seconds(10);
        let mut ticker = CountdownTicker::new(target, clock_reading(vec![wall()]));
        let published = recorder(&mut ticker);

        ticker.start();
        ticker.stop();
        ticker.stop();

        assert_eq!(ticker.state(), TickerState::Stopped);
        assert_eq!(ticker.tick(), None);
        assert_eq!(ticker.start(), None);
        assert_eq!(published.borrow().len(), 1);
    }

    #[test]
    fn test_stop_from_idle_prevents_start() {
        let mut ticker = CountdownTicker::new(wall(), MockClock::new());
        ticker.stop_handle().stop();
        assert_eq!(ticker.start(), None);
        assert_eq!(ticker.state(), TickerState::Stopped);
    }

    #[test]
    fn test_expiry_is_latched() {
        let target = wall();
        let clock = clock_reading(vec![
            target - ChronoDuration::seconds(2),
            target + ChronoDuration::seconds(1),
            // clock stepped backwards
            target - ChronoDuration::seconds(30),
        ]);
        let mut ticker = CountdownTicker::new(target, clock);

        assert!(!ticker.start().unwrap().is_expired);
        assert_eq!(ticker.tick(), Some(TimeRemaining::EXPIRED));
        assert_eq!(ticker.tick(), Some(TimeRemaining::EXPIRED));
        assert_eq!(ticker.last_published(), Some(TimeRemaining::EXPIRED));
    }

    #[test]
    fn test_observer_can_stop_its_own_ticker() {
        let target = wall() + ChronoDuration::minutes(5);
        let mut ticker = CountdownTicker::new(target, clock_reading(vec![wall()]));
        let stop = ticker.stop_handle();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        ticker.subscribe(move |_| {
            seen.set(seen.get() + 1);
            stop.stop();
        });

        assert!(ticker.start().is_some());
        assert_eq!(ticker.tick(), None);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_zero_cadence_falls_back() {
        let ticker = CountdownTicker::with_cadence(wall(), Duration::ZERO, MockClock::new());
        assert_eq!(ticker.cadence(), CADENCE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_ticker_counts_down_to_expiry() {
        LocalSet::new()
            .run_until(async {
                let clock = MonotonicClock::anchored_at(wall());
                let target = clock.now() + ChronoDuration::milliseconds(1_500);
                let mut ticker = CountdownTicker::new(target, clock);
                let published = recorder(&mut ticker);
                let handle = ticker.spawn_local();

                tokio::time::sleep(Duration::from_millis(100)).await;
                {
                    let published = published.borrow();
                    assert_eq!(published.len(), 1);
                    assert_eq!(published[0].seconds, 1);
                    assert!(!published[0].is_expired);
                }

                tokio::time::sleep(Duration::from_millis(2_000)).await;
                {
                    let published = published.borrow();
                    assert_eq!(published.len(), 3);
                    // 500ms left at the second tick
                    assert!(!published[1].is_expired);
                    assert_eq!(published[1].total_millis(), 0);
                    assert!(published[2].is_expired);
                }

                handle.stop();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_publications_after_stop() {
        LocalSet::new()
            .run_until(async {
                let clock = MonotonicClock::anchored_at(wall());
                let target = clock.now() + ChronoDuration::hours(1);
                let mut ticker = CountdownTicker::new(target, clock);
                let published = recorder(&mut ticker);
                let handle = ticker.spawn_local();

                tokio::time::sleep(Duration::from_millis(2_500)).await;
                assert_eq!(published.borrow().len(), 3);

                handle.stop();
                handle.stop();
                tokio::time::sleep(Duration::from_secs(5)).await;

                assert!(handle.is_stopped());
                assert_eq!(published.borrow().len(), 3);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_ticker() {
        LocalSet::new()
            .run_until(async {
                let clock = MonotonicClock::anchored_at(wall());
                let mut ticker = CountdownTicker::new(clock.now() + ChronoDuration::hours(1), clock);
                let published = recorder(&mut ticker);
                let handle = ticker.spawn_local();

                tokio::time::sleep(Duration::from_millis(1_500)).await;
                drop(handle);
                tokio::time::sleep(Duration::from_secs(3)).await;

                assert_eq!(published.borrow().len(), 2);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_tickers_are_independent() {
        LocalSet::new()
            .run_until(async {
                let clock = MonotonicClock::anchored_at(wall());
                let mut first = CountdownTicker::new(clock.now() + ChronoDuration::hours(1), clock);
                let mut second = CountdownTicker::new(clock.now() + ChronoDuration::hours(2), clock);
                let first_published = recorder(&mut first);
                let second_published = recorder(&mut second);
                let first_handle = first.spawn_local();
                let _second_handle = second.spawn_local();

                tokio::time::sleep(Duration::from_millis(500)).await;
                first_handle.stop();
                tokio::time::sleep(Duration::from_secs(3)).await;

                assert_eq!(first_published.borrow().len(), 1);
                assert_eq!(second_published.borrow().len(), 4);
                assert_eq!(second_published.borrow()[0].hours, 2);
            })
            .await;
    }
}
