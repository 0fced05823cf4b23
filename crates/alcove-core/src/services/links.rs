//! Link service.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{Error, Result};
use crate::identity::UserId;
use crate::models::{default_links, merge_defaults, Link};
use crate::sync::SyncCore;
use crate::util::normalize_url;

/// Operations on the shared link list.
#[derive(Clone)]
pub struct LinkService {
    core: Arc<SyncCore<Link>>,
}

impl LinkService {
    #[must_use]
    pub fn new(core: Arc<SyncCore<Link>>) -> Self {
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
    pub fn list(&self) -> Vec<Link> {
        self.core.current()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Link>> {
        self.core.subscribe()
    }

    /// Add a link. The URL is normalized (scheme defaulted to https) and
    /// both fields must be non-empty. Adding a URL that is already in the
    /// list patches the existing link instead of duplicating it.
    pub async fn add(&self, name: &str, url: &str, pinned: bool) -> Result<Link> {
        let name = name.trim();
        let url = normalize_url(url);
        if name.is_empty() {
            return Err(Error::InvalidInput("link name must not be empty".to_string()));
        }
        if url.is_empty() {
            return Err(Error::InvalidInput("link url must not be empty".to_string()));
        }

        let existing = self
            .core
            .current()
            .iter()
            .find(|link| link.url == url)
            .map(|link| link.id.clone());
        if let Some(id) = existing {
            return self
                .core
                .update(&id, |link| {
                    link.name = name.to_string();
                    link.pinned = pinned;
                })
                .await
                .ok_or_else(|| Error::NotFound(format!("link {id}")));
        }

        let order = i64::try_from(self.core.current().len()).unwrap_or(i64::MAX);
        let mut link = Link::new(name, url);
        link.pinned = pinned;
        link.order = Some(order);
        Ok(self.core.insert(link).await)
    }

    /// Rename a link or change its URL.
    pub async fn edit(&self, id: &str, name: Option<&str>, url: Option<&str>) -> Result<Link> {
        let name = name.map(str::trim).map(str::to_string);
        let url = url.map(normalize_url);
        if name.as_deref() == Some("") {
            return Err(Error::InvalidInput("link name must not be empty".to_string()));
        }
        if url.as_deref() == Some("") {
            return Err(Error::InvalidInput("link url must not be empty".to_string()));
        }

        self.core
            .update(id, |link| {
                if let Some(name) = name {
                    link.name = name;
                }
                if let Some(url) = url {
                    link.url = url;
                }
            })
            .await
            .ok_or_else(|| Error::NotFound(format!("link {id}")))
    }

    /// Pin or unpin a link.
    pub async fn set_pinned(&self, id: &str, pinned: bool) -> Result<Link> {
        self.core
            .update(id, |link| link.pinned = pinned)
            .await
            .ok_or_else(|| Error::NotFound(format!("link {id}")))
    }

    /// Remove a link. The remote delete is keyed by URL, so the record
    /// cannot come back on the next pull.
    pub async fn remove(&self, id: &str) -> Result<Link> {
        self.core
            .remove(id)
            .await
            .ok_or_else(|| Error::NotFound(format!("link {id}")))
    }

    /// Move the link at `from` to position `to` and renumber the whole
    /// list so the order survives reconciliation.
    pub async fn reorder(&self, from: usize, to: usize) -> Result<()> {
        let mut links = self.core.current();
        if from >= links.len() || to >= links.len() {
            return Err(Error::InvalidInput(format!(
                "reorder positions out of range (list has {} links)",
                links.len()
            )));
        }

        let moved = links.remove(from);
        links.insert(to, moved);
        for (index, link) in links.iter_mut().enumerate() {
            link.order = Some(i64::try_from(index).unwrap_or(i64::MAX));
        }

        self.core.replace_all(links);
        self.core.push_all().await;
        Ok(())
    }

    /// Replace the list with the built-in catalog.
    pub async fn reset_defaults(&self) {
        let mut links = default_links();
        for (index, link) in links.iter_mut().enumerate() {
            link.order = Some(i64::try_from(index).unwrap_or(i64::MAX));
        }
        self.core.replace_all(links);
        self.core.push_all().await;
    }

    /// Append catalog entries the list does not have yet. Local-only; the
    /// adopted defaults are not pushed upstream.
    pub fn adopt_new_defaults(&self) {
        let merged = merge_defaults(self.core.current());
        self.core.replace_all(merged);
    }

    /// Wait for queued remote writes.
    pub async fn flush(&self) {
        self.core.flush().await;
    }
}
