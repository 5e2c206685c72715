// Event board: active countdowns followed by past events

use std::fmt::Write;

use chrono::{DateTime, Local};

use super::card::render_card;
use crate::models::countdown_event::CountdownEvent;
use crate::services::countdown::CountdownStatus;

pub const EMPTY_BOARD: &str = "No Events Yet\n\
    Create your first countdown to get started!\n\
    \n    rust-countdown add \"My event\" --date 2030-12-31\n";

/// Render events split into "Active Countdowns" and "Past Events".
/// Sections without entries are omitted.
pub fn render_board(
    cards: &[(&CountdownEvent, CountdownStatus)],
    now: DateTime<Local>,
    date_format: &str,
) -> String {
    if cards.is_empty() {
        return EMPTY_BOARD.to_string();
    }

    let (past, active): (Vec<_>, Vec<_>) = cards
        .iter()
        .partition(|(_, status)| status.remaining.is_expired);

    let mut out = String::new();
    for (heading, section) in [("✨ Active Countdowns", &active), ("📅 Past Events", &past)] {
        if section.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "{heading} ({})", section.len());
        let _ = writeln!(out, "{}", "─".repeat(40));
        for (event, status) in section.iter() {
            out.push_str(&render_card(event, status, now, date_format));
            out.push('\n');
        }
    }
    out
}
