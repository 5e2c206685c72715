// Countdown card rendering
// One event as a block of terminal text

use std::fmt::Write;

use chrono::{DateTime, Local};

use super::format::{format_breakdown, format_distance, progress_bar};
use crate::models::countdown_event::CountdownEvent;
use crate::services::countdown::CountdownStatus;

const PROGRESS_WIDTH: usize = 20;

pub fn render_card(
    event: &CountdownEvent,
    status: &CountdownStatus,
    now: DateTime<Local>,
    date_format: &str,
) -> String {
    let mut out = String::new();
    let remaining = &status.remaining;

    let _ = writeln!(out, "{} {}  (id {})", event.display_icon(), event.title, event.id);
    if let Some(description) = &event.description {
        let _ = writeln!(out, "   {description}");
    }

    if remaining.is_expired {
        let _ = writeln!(
            out,
            "   Expired! Event was {} ago",
            format_distance(event.target_date, now)
        );
    } else {
        let _ = writeln!(out, "   {}", format_breakdown(remaining));
    }

    let days = if remaining.is_expired { 0 } else { remaining.days };
    let _ = writeln!(
        out,
        "   {}  {} days left",
        progress_bar(status.progress, PROGRESS_WIDTH),
        days
    );
    let _ = writeln!(
        out,
        "   📅 {}  ·  {}",
        event.target_date.format(date_format),
        event.category.label()
    );
    out
}
