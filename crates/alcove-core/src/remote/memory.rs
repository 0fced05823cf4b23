//! In-memory remote store.
//!
//! Backs tests and the offline CLI with the same contract as the hosted
//! backend: records get server-style ids, links dedupe by URL, and every
//! collection is partitioned per user.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::identity::UserId;
use crate::models::{Event, Link, Note, Profile};

use super::RemoteStore;

#[derive(Default)]
struct Inner {
    links: HashMap<String, Vec<Link>>,
    notes: HashMap<String, Vec<Note>>,
    events: HashMap<String, Vec<Event>>,
    profiles: HashMap<String, Profile>,
    next_id: u64,
}

impl Inner {
    fn next_record_id(&mut self) -> String {
        self.next_id += 1;
        format!("rec-{}", self.next_id)
    }
}

/// Remote store backed by process memory
#[derive(Default)]
pub struct MemoryRemoteStore {
    inner: Mutex<Inner>,
}

impl MemoryRemoteStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| Error::Remote("memory remote store mutex poisoned".to_string()))
    }
}

#[async_trait]
impl RemoteStore for MemoryRemoteStore {
    async fn list_links(&self, user: &UserId) -> Result<Vec<Link>> {
        let inner = self.inner()?;
        Ok(inner.links.get(user.as_str()).cloned().unwrap_or_default())
    }

    async fn upsert_link(&self, user: &UserId, link: &Link) -> Result<()> {
        let mut inner = self.inner()?;
        let record_id = inner.next_record_id();
        let links = inner.links.entry(user.as_str().to_string()).or_default();
        let stored = Link {
            id: record_id,
            name: link.name.clone(),
            url: link.url.clone(),
            pinned: link.pinned,
            order: Some(link.order.unwrap_or(0)),
        };
        if let Some(existing) = links.iter_mut().find(|candidate| candidate.url == link.url) {
            // Keep the record id stable across upserts for the same URL.
            let id = existing.id.clone();
            *existing = Link { id, ..stored };
        } else {
            links.push(stored);
        }
        Ok(())
    }

    async fn remove_link_by_url(&self, user: &UserId, url: &str) -> Result<()> {
        let mut inner = self.inner()?;
        if let Some(links) = inner.links.get_mut(user.as_str()) {
            links.retain(|link| link.url != url);
        }
        Ok(())
    }

    async fn list_notes(&self, user: &UserId) -> Result<Vec<Note>> {
        let inner = self.inner()?;
        Ok(inner.notes.get(user.as_str()).cloned().unwrap_or_default())
    }

    async fn add_note(&self, user: &UserId, note: &Note) -> Result<String> {
        let mut inner = self.inner()?;
        let record_id = inner.next_record_id();
        let stored = Note {
            id: record_id.clone(),
            ..note.clone()
        };
        inner
            .notes
            .entry(user.as_str().to_string())
            .or_default()
            .push(stored);
        Ok(record_id)
    }

    async fn update_note(&self, user: &UserId, note: &Note) -> Result<()> {
        let mut inner = self.inner()?;
        let existing = inner
            .notes
            .get_mut(user.as_str())
            .and_then(|notes| notes.iter_mut().find(|candidate| candidate.id == note.id))
            .ok_or_else(|| Error::NotFound(format!("note {}", note.id)))?;
        let id = existing.id.clone();
        *existing = Note {
            id,
            ..note.clone()
        };
        Ok(())
    }

    async fn remove_note(&self, user: &UserId, id: &str) -> Result<()> {
        let mut inner = self.inner()?;
        if let Some(notes) = inner.notes.get_mut(user.as_str()) {
            notes.retain(|note| note.id != id);
        }
        Ok(())
    }

    async fn list_events(&self, user: &UserId) -> Result<Vec<Event>> {
        let inner = self.inner()?;
        Ok(inner.events.get(user.as_str()).cloned().unwrap_or_default())
    }

    async fn add_event(&self, user: &UserId, event: &Event) -> Result<String> {
        let mut inner = self.inner()?;
        let record_id = inner.next_record_id();
        let stored = Event {
            id: record_id.clone(),
            ..event.clone()
        };
        inner
            .events
            .entry(user.as_str().to_string())
            .or_default()
            .push(stored);
        Ok(record_id)
    }

    async fn update_event(&self, user: &UserId, event: &Event) -> Result<()> {
        let mut inner = self.inner()?;
        let existing = inner
            .events
            .get_mut(user.as_str())
            .and_then(|events| events.iter_mut().find(|candidate| candidate.id == event.id))
            .ok_or_else(|| Error::NotFound(format!("event {}", event.id)))?;
        let id = existing.id.clone();
        *existing = Event {
            id,
            ..event.clone()
        };
        Ok(())
    }

    async fn remove_event(&self, user: &UserId, id: &str) -> Result<()> {
        let mut inner = self.inner()?;
        if let Some(events) = inner.events.get_mut(user.as_str()) {
            events.retain(|event| event.id != id);
        }
        Ok(())
    }

    async fn get_profile(&self, user: &UserId) -> Result<Option<Profile>> {
        let inner = self.inner()?;
        Ok(inner.profiles.get(user.as_str()).cloned())
    }

    async fn upsert_profile(&self, user: &UserId, profile: &Profile) -> Result<()> {
        let mut inner = self.inner()?;
        inner
            .profiles
            .insert(user.as_str().to_string(), profile.clone());
        Ok(())
    }
}
