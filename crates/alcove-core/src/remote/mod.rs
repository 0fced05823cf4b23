//! Remote persistence layer.
//!
//! [`RemoteStore`] is the full remote surface. [`RemoteCollection`]
//! narrows it to the fetch/push operations one entity type needs, which is
//! what the sync core consumes. Writes for records that only exist locally
//! are skipped, except links, which the remote keys by URL.

mod http;
mod memory;
pub mod wire;

pub use http::HttpRemoteStore;
pub use memory::MemoryRemoteStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::identity::UserId;
use crate::models::{Event, Link, Note, Profile};
use crate::sync::SyncEntity;

/// Remote persistence operations, scoped per user
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn list_links(&self, user: &UserId) -> Result<Vec<Link>>;
    /// Insert or replace a link, keyed by `(user, url)`.
    async fn upsert_link(&self, user: &UserId, link: &Link) -> Result<()>;
    async fn remove_link_by_url(&self, user: &UserId, url: &str) -> Result<()>;

    async fn list_notes(&self, user: &UserId) -> Result<Vec<Note>>;
    /// Create a note and return the remote record id.
    async fn add_note(&self, user: &UserId, note: &Note) -> Result<String>;
    async fn update_note(&self, user: &UserId, note: &Note) -> Result<()>;
    async fn remove_note(&self, user: &UserId, id: &str) -> Result<()>;

    async fn list_events(&self, user: &UserId) -> Result<Vec<Event>>;
    /// Create an event and return the remote record id.
    async fn add_event(&self, user: &UserId, event: &Event) -> Result<String>;
    async fn update_event(&self, user: &UserId, event: &Event) -> Result<()>;
    async fn remove_event(&self, user: &UserId, id: &str) -> Result<()>;

    /// Fetch the profile singleton, `None` when the user has none yet.
    async fn get_profile(&self, user: &UserId) -> Result<Option<Profile>>;
    /// Patch the existing profile row or insert one.
    async fn upsert_profile(&self, user: &UserId, profile: &Profile) -> Result<()>;
}

/// The remote operations the sync core needs for one entity type
#[async_trait]
pub trait RemoteCollection<E>: Send + Sync {
    async fn fetch(&self, user: &UserId) -> Result<Vec<E>>;
    async fn push_insert(&self, user: &UserId, entity: &E) -> Result<()>;
    async fn push_update(&self, user: &UserId, entity: &E) -> Result<()>;
    async fn push_remove(&self, user: &UserId, entity: &E) -> Result<()>;
}

/// Link collection over a [`RemoteStore`]. Links are addressed by URL, so
/// every write goes through, even for locally created records.
pub struct LinkCollection {
    store: Arc<dyn RemoteStore>,
}

impl LinkCollection {
    #[must_use]
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RemoteCollection<Link> for LinkCollection {
    async fn fetch(&self, user: &UserId) -> Result<Vec<Link>> {
        self.store.list_links(user).await
    }

    async fn push_insert(&self, user: &UserId, entity: &Link) -> Result<()> {
        self.store.upsert_link(user, entity).await
    }

    async fn push_update(&self, user: &UserId, entity: &Link) -> Result<()> {
        self.store.upsert_link(user, entity).await
    }

    async fn push_remove(&self, user: &UserId, entity: &Link) -> Result<()> {
        self.store.remove_link_by_url(user, &entity.url).await
    }
}

/// Note collection over a [`RemoteStore`]
pub struct NoteCollection {
    store: Arc<dyn RemoteStore>,
}

impl NoteCollection {
    #[must_use]
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RemoteCollection<Note> for NoteCollection {
    async fn fetch(&self, user: &UserId) -> Result<Vec<Note>> {
        self.store.list_notes(user).await
    }

    async fn push_insert(&self, user: &UserId, entity: &Note) -> Result<()> {
        let remote_id = self.store.add_note(user, entity).await?;
        tracing::debug!(remote_id, "note created remotely");
        Ok(())
    }

    async fn push_update(&self, user: &UserId, entity: &Note) -> Result<()> {
        if entity.is_local() {
            tracing::debug!(id = entity.id, "skipping remote update for local-only note");
            return Ok(());
        }
        self.store.update_note(user, entity).await
    }

    async fn push_remove(&self, user: &UserId, entity: &Note) -> Result<()> {
        if entity.is_local() {
            tracing::debug!(id = entity.id, "skipping remote delete for local-only note");
            return Ok(());
        }
        self.store.remove_note(user, &entity.id).await
    }
}

/// Event collection over a [`RemoteStore`]
pub struct EventCollection {
    store: Arc<dyn RemoteStore>,
}

impl EventCollection {
    #[must_use]
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RemoteCollection<Event> for EventCollection {
    async fn fetch(&self, user: &UserId) -> Result<Vec<Event>> {
        self.store.list_events(user).await
    }

    async fn push_insert(&self, user: &UserId, entity: &Event) -> Result<()> {
        let remote_id = self.store.add_event(user, entity).await?;
        tracing::debug!(remote_id, "event created remotely");
        Ok(())
    }

    async fn push_update(&self, user: &UserId, entity: &Event) -> Result<()> {
        if entity.is_local() {
            tracing::debug!(id = entity.id, "skipping remote update for local-only event");
            return Ok(());
        }
        self.store.update_event(user, entity).await
    }

    async fn push_remove(&self, user: &UserId, entity: &Event) -> Result<()> {
        if entity.is_local() {
            tracing::debug!(id = entity.id, "skipping remote delete for local-only event");
            return Ok(());
        }
        self.store.remove_event(user, &entity.id).await
    }
}
