// Live countdown board
// One ticker per event, redrawn every cadence until interrupted

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tokio::task::LocalSet;

use super::board::render_board;
use crate::models::countdown_event::{CountdownEvent, EventId};
use crate::services::countdown::{
    Clock, CountdownStatus, CountdownTicker, SystemClock, TickerHandle, TimeRemaining, CADENCE,
};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Latest published breakdown per event.
pub struct LiveBoard {
    entries: Vec<(CountdownEvent, Option<TimeRemaining>)>,
}

impl LiveBoard {
    pub fn new(events: Vec<CountdownEvent>) -> Self {
        Self {
            entries: events.into_iter().map(|event| (event, None)).collect(),
        }
    }

    pub fn events(&self) -> impl Iterator<Item = &CountdownEvent> {
        self.entries.iter().map(|(event, _)| event)
    }

    /// Record a ticker publication. Unknown ids are ignored.
    pub fn publish(&mut self, id: &EventId, remaining: TimeRemaining) {
        if let Some((_, slot)) = self.entries.iter_mut().find(|(event, _)| event.id == *id) {
            *slot = Some(remaining);
        }
    }

    pub fn latest(&self, id: &EventId) -> Option<TimeRemaining> {
        self.entries
            .iter()
            .find(|(event, _)| event.id == *id)
            .and_then(|(_, remaining)| *remaining)
    }

    /// Events without a publication yet are computed directly at `now`.
    pub fn render(&self, now: DateTime<Local>, date_format: &str) -> String {
        let cards: Vec<_> = self
            .entries
            .iter()
            .map(|(event, remaining)| {
                let status = match remaining {
                    Some(remaining) => CountdownStatus::with_remaining(event, *remaining, now),
                    None => CountdownStatus::at(event, now),
                };
                (event, status)
            })
            .collect();
        render_board(&cards, now, date_format)
    }
}

/// Start one ticker per board entry, each publishing into the board.
///
/// Must run inside a `LocalSet`.
pub fn spawn_tickers<C>(board: &Rc<RefCell<LiveBoard>>, clock: C) -> Vec<TickerHandle>
where
    C: Clock + Clone + 'static,
{
    let targets: Vec<(EventId, DateTime<Local>)> = board
        .borrow()
        .events()
        .map(|event| (event.id.clone(), event.target_date))
        .collect();

    targets
        .into_iter()
        .map(|(id, target)| {
            let mut ticker = CountdownTicker::new(target, clock.clone());
            let board = Rc::clone(board);
            ticker.subscribe(move |remaining| board.borrow_mut().publish(&id, remaining));
            ticker.spawn_local()
        })
        .collect()
}

/// Redraw the board every cadence until Ctrl-C, then stop every ticker.
pub async fn watch(events: Vec<CountdownEvent>, date_format: String) -> Result<()> {
    LocalSet::new()
        .run_until(async move {
            let clock = SystemClock;
            let board = Rc::new(RefCell::new(LiveBoard::new(events)));
            let handles = spawn_tickers(&board, clock);
            log::info!("Watching {} countdowns", handles.len());

            let mut refresh = tokio::time::interval(CADENCE);
            let ctrl_c = tokio::signal::ctrl_c();
            tokio::pin!(ctrl_c);
            let mut stdout = std::io::stdout();

            let outcome = loop {
                tokio::select! {
                    _ = refresh.tick() => {
                        // let tickers due at the same instant publish first
                        tokio::task::yield_now().await;
                        let frame = board.borrow().render(clock.now(), &date_format);
                        let written = write!(stdout, "{CLEAR_SCREEN}{frame}")
                            .and_then(|_| stdout.flush())
                            .context("Failed to draw countdown board");
                        if let Err(err) = written {
                            break Err(err);
                        }
                    }
                    result = &mut ctrl_c => {
                        break result.context("Failed to listen for Ctrl-C");
                    }
                }
            };

            for handle in &handles {
                handle.stop();
            }
            log::info!("Stopped {} countdown tickers", handles.len());
            outcome
        })
        .await
}
