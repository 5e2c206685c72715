// Test fixtures - reusable test data
// Provides consistent test data across all test files
#![allow(dead_code)]

use chrono::{DateTime, Duration, Local, TimeZone};

/// Sample instants for testing
pub mod dates {
    use super::*;

    /// Jan 1, 2025 at noon, local time
    pub fn jan_1_2025() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    /// `n` whole days (of 24 hours) after `jan_1_2025`
    pub fn day(n: i64) -> DateTime<Local> {
        jan_1_2025() + Duration::days(n)
    }

    /// An arbitrary instant from epoch milliseconds
    pub fn at_millis(ms: i64) -> DateTime<Local> {
        Local.timestamp_millis_opt(ms).unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;
    use rust_countdown::models::countdown_event::{EventCategory, EventDraft};

    pub fn birthday_in(days: i64) -> EventDraft {
        EventDraft::new("Birthday Party", dates::jan_1_2025() + Duration::days(days))
            .description("My 25th birthday celebration")
            .category(EventCategory::Birthday)
    }

    pub fn vacation_in(days: i64) -> EventDraft {
        EventDraft::new("Summer Vacation", dates::jan_1_2025() + Duration::days(days))
            .description("Trip to Bali")
            .category(EventCategory::Travel)
    }

    pub fn already_over() -> EventDraft {
        EventDraft::new("Exam", dates::jan_1_2025() - Duration::seconds(1))
            .category(EventCategory::Work)
    }
}
