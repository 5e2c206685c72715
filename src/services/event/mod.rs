//! In-memory event list backed by an [`EventStore`].
//!
//! The list is loaded once when the service is created and written back in
//! full after every mutation.

use anyhow::Result;
use chrono::{DateTime, Duration, Local};

use crate::models::countdown_event::{CountdownEvent, EventCategory, EventDraft, EventError, EventId};
use crate::services::storage::EventStore;

/// Owns the event list shown by the presentation layer.
pub struct EventService<S: EventStore> {
    store: S,
    events: Vec<CountdownEvent>,
}

impl<S: EventStore> EventService<S> {
    /// Load events from `store`. When the store has never been written and
    /// `seed_samples` is set, the demo events are created and saved.
    pub fn load(store: S, seed_samples: bool, now: DateTime<Local>) -> Result<Self> {
        let initialized = store.is_initialized()?;
        let events = if initialized {
            store.load_all()?
        } else if seed_samples {
            let samples = sample_events(now);
            store.save_all(&samples)?;
            log::info!("Seeded {} sample events into a fresh store", samples.len());
            samples
        } else {
            Vec::new()
        };

        log::info!("Loaded {} countdown events", events.len());
        Ok(Self { store, events })
    }

    pub fn events(&self) -> &[CountdownEvent] {
        &self.events
    }

    pub fn get(&self, id: &EventId) -> Option<&CountdownEvent> {
        self.events.iter().find(|event| event.id == *id)
    }

    /// Events whose target is still in the future, in list order
    pub fn active(&self, now: DateTime<Local>) -> Vec<&CountdownEvent> {
        self.events.iter().filter(|event| !event.is_expired(now)).collect()
    }

    /// Events whose target has been reached, in list order
    pub fn expired(&self, now: DateTime<Local>) -> Vec<&CountdownEvent> {
        self.events.iter().filter(|event| event.is_expired(now)).collect()
    }

    /// Create an event stamped with `now` and persist the list.
    pub fn add(&mut self, draft: EventDraft, now: DateTime<Local>) -> Result<EventId> {
        let id = EventId::generate(now, self.events.iter().map(|event| &event.id));
        let event = CountdownEvent::create(id.clone(), draft, now)?;
        let title = event.title.clone();

        let mut staged = self.events.clone();
        staged.push(event);
        self.commit(staged)?;
        log::info!("Added event {} ({})", id, title);
        Ok(id)
    }

    /// Replace the editable fields of an existing event; id and creation
    /// time are preserved.
    pub fn update(&mut self, id: &EventId, draft: EventDraft) -> Result<()> {
        let mut staged = self.events.clone();
        let event = staged
            .iter_mut()
            .find(|event| event.id == *id)
            .ok_or_else(|| EventError::UnknownEvent(id.clone()))?;
        event.apply(draft)?;
        let title = event.title.clone();

        self.commit(staged)?;
        log::info!("Updated event {} ({})", id, title);
        Ok(())
    }

    /// Delete an event. Returns false when no event had that id.
    pub fn remove(&mut self, id: &EventId) -> Result<bool> {
        let staged: Vec<_> = self
            .events
            .iter()
            .filter(|event| event.id != *id)
            .cloned()
            .collect();
        if staged.len() == self.events.len() {
            return Ok(false);
        }

        self.commit(staged)?;
        log::info!("Removed event {}", id);
        Ok(true)
    }

    /// The in-memory list only changes once the store accepted `staged`.
    fn commit(&mut self, staged: Vec<CountdownEvent>) -> Result<()> {
        if let Err(err) = self.store.save_all(&staged) {
            log::error!("Failed to save events, keeping previous list: {err:#}");
            return Err(err);
        }
        self.events = staged;
        Ok(())
    }
}

/// Demo events created on first launch, relative to `now`.
pub fn sample_events(now: DateTime<Local>) -> Vec<CountdownEvent> {
    let samples = [
        ("1", "Birthday Party", "My 25th birthday celebration", 15, EventCategory::Birthday),
        ("2", "Summer Vacation", "Trip to Bali", 45, EventCategory::Travel),
        ("3", "Project Launch", "New product release", 7, EventCategory::Work),
    ];

    samples
        .into_iter()
        .map(|(id, title, description, days, category)| CountdownEvent {
            id: EventId::from(id),
            title: title.to_string(),
            description: Some(description.to_string()),
            target_date: now + Duration::days(days),
            category,
            icon: None,
            created_at: now,
        })
        .collect()
}
