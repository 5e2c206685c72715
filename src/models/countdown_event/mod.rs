// Countdown event module
// User-defined events counted down toward a target date

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation and lookup failures for countdown events.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("Event title cannot be empty")]
    EmptyTitle,
    #[error("Unknown category '{0}' (expected birthday, holiday, work, personal or travel)")]
    UnknownCategory(String),
    #[error("No event with id {0}")]
    UnknownEvent(EventId),
    #[error("Could not parse date '{0}'")]
    InvalidDate(String),
}

/// Opaque identifier for an event. Immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    /// Derive a fresh id from the creation instant (epoch milliseconds),
    /// stepping forward until it does not collide with `existing`.
    pub fn generate<'a>(
        created_at: DateTime<Local>,
        existing: impl IntoIterator<Item = &'a EventId> + Clone,
    ) -> Self {
        let mut candidate = created_at.timestamp_millis();
        loop {
            let id = EventId(candidate.to_string());
            if !existing.clone().into_iter().any(|other| *other == id) {
                return id;
            }
            candidate += 1;
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Closed set of event categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Birthday,
    Holiday,
    Work,
    Personal,
    Travel,
}

impl Default for EventCategory {
    fn default() -> Self {
        Self::Personal
    }
}

impl EventCategory {
    pub const ALL: [EventCategory; 5] = [
        Self::Birthday,
        Self::Holiday,
        Self::Work,
        Self::Personal,
        Self::Travel,
    ];

    /// Lowercase name used for storage and on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Birthday => "birthday",
            Self::Holiday => "holiday",
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Travel => "travel",
        }
    }

    /// Capitalized label shown on cards
    pub fn label(self) -> &'static str {
        match self {
            Self::Birthday => "Birthday",
            Self::Holiday => "Holiday",
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Travel => "Travel",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Birthday => "🎂",
            Self::Holiday => "🎉",
            Self::Work => "💼",
            Self::Personal => "⭐",
            Self::Travel => "✈️",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = EventError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == needle)
            .ok_or_else(|| EventError::UnknownCategory(value.to_string()))
    }
}

/// A countdown event as persisted by the event store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownEvent {
    pub id: EventId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub target_date: DateTime<Local>,
    #[serde(default)]
    pub category: EventCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub created_at: DateTime<Local>,
}

impl CountdownEvent {
    /// Create a new event from a validated draft.
    ///
    /// # Examples
    /// ```
    /// use rust_countdown::models::countdown_event::{CountdownEvent, EventDraft, EventId};
    /// use chrono::{Duration, Local};
    ///
    /// let now = Local::now();
    /// let draft = EventDraft::new("Launch", now + Duration::days(3));
    /// let event = CountdownEvent::create(EventId::from("1"), draft, now).unwrap();
    /// assert_eq!(event.created_at, now);
    /// ```
    pub fn create(
        id: EventId,
        draft: EventDraft,
        created_at: DateTime<Local>,
    ) -> Result<Self, EventError> {
        let draft = draft.normalized()?;
        Ok(Self {
            id,
            title: draft.title,
            description: draft.description,
            target_date: draft.target_date,
            category: draft.category,
            icon: draft.icon,
            created_at,
        })
    }

    /// Replace every user-editable field. `id` and `created_at` are kept.
    pub fn apply(&mut self, draft: EventDraft) -> Result<(), EventError> {
        let draft = draft.normalized()?;
        self.title = draft.title;
        self.description = draft.description;
        self.target_date = draft.target_date;
        self.category = draft.category;
        self.icon = draft.icon;
        Ok(())
    }

    /// Draft pre-filled with this event's current values
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            target_date: self.target_date,
            category: self.category,
            icon: self.icon.clone(),
        }
    }

    /// True once the target instant has been reached
    pub fn is_expired(&self, now: DateTime<Local>) -> bool {
        self.target_date <= now
    }

    pub fn display_icon(&self) -> &str {
        self.icon.as_deref().unwrap_or_else(|| self.category.icon())
    }
}

/// User-editable fields shared by create and edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub target_date: DateTime<Local>,
    pub category: EventCategory,
    pub icon: Option<String>,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, target_date: DateTime<Local>) -> Self {
        Self {
            title: title.into(),
            description: None,
            target_date,
            category: EventCategory::default(),
            icon: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: EventCategory) -> Self {
        self.category = category;
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn validate(&self) -> Result<(), EventError> {
        if self.title.trim().is_empty() {
            return Err(EventError::EmptyTitle);
        }
        Ok(())
    }

    // Blank optional strings collapse to None.
    fn normalized(mut self) -> Result<Self, EventError> {
        self.validate()?;
        self.title = self.title.trim().to_string();
        self.description = non_blank(self.description);
        self.icon = non_blank(self.icon);
        Ok(self)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
