// Text formatting helpers for cards

use chrono::{DateTime, Local};

use crate::services::countdown::TimeRemaining;

/// `15 days  03 hrs  12 min  09 sec`
pub fn format_breakdown(remaining: &TimeRemaining) -> String {
    format!(
        "{} {}  {:02} hrs  {:02} min  {:02} sec",
        remaining.days,
        if remaining.days == 1 { "day " } else { "days" },
        remaining.hours,
        remaining.minutes,
        remaining.seconds
    )
}

/// Horizontal bar for a percentage in `[0, 100]`.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let percent = percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!(
        "[{}{}] {:>3.0}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        percent
    )
}

/// Rough human distance between a past instant and now, e.g. "3 days".
pub fn format_distance(past: DateTime<Local>, now: DateTime<Local>) -> String {
    let seconds = (now - past).num_seconds().abs();
    let minutes = (seconds as f64 / 60.0).round() as i64;

    const DAY: i64 = 1_440;
    const MONTH: i64 = 43_200;
    const YEAR: i64 = 525_600;

    match minutes {
        0 => "less than a minute".to_string(),
        1 => "1 minute".to_string(),
        m if m < 45 => format!("{m} minutes"),
        m if m < 90 => "about 1 hour".to_string(),
        m if m < DAY => format!("about {} hours", rounded(m, 60)),
        m if m < 2_520 => "1 day".to_string(),
        m if m < MONTH => format!("{} days", rounded(m, DAY)),
        m if m < 2 * MONTH => "about 1 month".to_string(),
        m if m < YEAR => format!("{} months", rounded(m, MONTH)),
        m if m < 2 * YEAR => "about 1 year".to_string(),
        m => format!("about {} years", m / YEAR),
    }
}

fn rounded(value: i64, unit: i64) -> i64 {
    (value as f64 / unit as f64).round() as i64
}
