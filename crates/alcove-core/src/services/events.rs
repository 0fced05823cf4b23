//! Event service.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tokio::sync::watch;

use crate::error::{Error, Result};
use crate::identity::UserId;
use crate::models::{events_by_date, week_of, Event};
use crate::sync::SyncCore;
use crate::util::normalize_text_option;

/// Operations on the event list.
#[derive(Clone)]
pub struct EventService {
    core: Arc<SyncCore<Event>>,
}

impl EventService {
    #[must_use]
    pub fn new(core: Arc<SyncCore<Event>>) -> Self {
        Self { core }
    }

    /// Publish the cached list.
    pub fn hydrate(&self) {
        self.core.hydrate();
    }

    /// Bind the list to a user's remote collection.
    pub async fn attach(&self, user: UserId) {
        self.core.attach(user).await;
    }

    /// Pull the remote list once and apply it.
    pub async fn refresh(&self) -> Result<bool> {
        self.core.refresh().await
    }

    #[must_use]
    pub fn list(&self) -> Vec<Event> {
        self.core.current()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Event>> {
        self.core.subscribe()
    }

    /// Create an event for a local date (`YYYY-MM-DD`) and time (`HH:MM`).
    /// With `with_reminder` set, the reminder instant is the event's own
    /// start converted to UTC.
    pub async fn add(
        &self,
        title: &str,
        date: &str,
        time: &str,
        with_reminder: bool,
        notes: Option<&str>,
    ) -> Result<Event> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput("event title must not be empty".to_string()));
        }
        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            return Err(Error::InvalidInput(format!(
                "event date must be YYYY-MM-DD, got {date:?}"
            )));
        }
        if NaiveTime::parse_from_str(time, "%H:%M").is_err() {
            return Err(Error::InvalidInput(format!(
                "event time must be HH:MM, got {time:?}"
            )));
        }

        let mut event = Event::new(title, date, time);
        event.notes = normalize_text_option(notes.map(str::to_string));
        if with_reminder {
            event.reminder_at = Event::reminder_instant_for(date, time);
            if event.reminder_at.is_none() {
                tracing::debug!(date, time, "start has no local representation, no reminder set");
            }
        }
        Ok(self.core.insert(event).await)
    }

    /// Turn an event's reminder on or off.
    pub async fn set_reminder(&self, id: &str, enabled: bool) -> Result<Event> {
        self.core
            .update(id, |event| {
                event.reminder_at = if enabled {
                    Event::reminder_instant_for(&event.date, &event.time)
                } else {
                    None
                };
            })
            .await
            .ok_or_else(|| Error::NotFound(format!("event {id}")))
    }

    /// Remove an event. Any armed reminder is cancelled by the scheduler
    /// on the next list emission.
    pub async fn remove(&self, id: &str) -> Result<Event> {
        self.core
            .remove(id)
            .await
            .ok_or_else(|| Error::NotFound(format!("event {id}")))
    }

    /// The week containing `date`, Monday first, with that week's events
    /// grouped per day.
    #[must_use]
    pub fn week_agenda(&self, date: NaiveDate) -> Vec<(NaiveDate, Vec<Event>)> {
        let grouped = events_by_date(&self.core.current());
        week_of(date)
            .into_iter()
            .map(|day| {
                let key = day.format("%Y-%m-%d").to_string();
                (day, grouped.get(&key).cloned().unwrap_or_default())
            })
            .collect()
    }

    /// Wait for queued remote writes.
    pub async fn flush(&self) {
        self.core.flush().await;
    }
}
