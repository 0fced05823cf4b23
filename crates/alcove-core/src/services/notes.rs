//! Note service.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{Error, Result};
use crate::identity::UserId;
use crate::models::Note;
use crate::sync::SyncCore;

/// Operations on the note list.
#[derive(Clone)]
pub struct NoteService {
    core: Arc<SyncCore<Note>>,
}

impl NoteService {
    #[must_use]
    pub fn new(core: Arc<SyncCore<Note>>) -> Self {
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
    pub fn list(&self) -> Vec<Note> {
        self.core.current()
    }

    /// Notes in the given folder, newest first as stored.
    #[must_use]
    pub fn in_folder(&self, folder: &str) -> Vec<Note> {
        self.core
            .current()
            .into_iter()
            .filter(|note| note.folder == folder)
            .collect()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Note>> {
        self.core.subscribe()
    }

    /// Create a note. A note needs at least a title or a body; a blank
    /// title on a non-empty body becomes `Untitled`.
    pub async fn add(&self, title: &str, body: &str, folder: &str) -> Result<Note> {
        if title.trim().is_empty() && body.trim().is_empty() {
            return Err(Error::InvalidInput(
                "note needs a title or a body".to_string(),
            ));
        }
        Ok(self.core.insert(Note::new(title, body, folder)).await)
    }

    /// Patch a note's fields and stamp it updated.
    pub async fn edit(
        &self,
        id: &str,
        title: Option<&str>,
        body: Option<&str>,
        folder: Option<&str>,
    ) -> Result<Note> {
        self.core
            .update(id, |note| {
                if let Some(title) = title {
                    let title = title.trim();
                    note.title = if title.is_empty() {
                        "Untitled".to_string()
                    } else {
                        title.to_string()
                    };
                }
                if let Some(body) = body {
                    note.body = body.to_string();
                }
                if let Some(folder) = folder {
                    let folder = folder.trim();
                    if !folder.is_empty() {
                        note.folder = folder.to_string();
                    }
                }
                note.touch();
            })
            .await
            .ok_or_else(|| Error::NotFound(format!("note {id}")))
    }

    /// Remove a note.
    pub async fn remove(&self, id: &str) -> Result<Note> {
        self.core
            .remove(id)
            .await
            .ok_or_else(|| Error::NotFound(format!("note {id}")))
    }

    /// Wait for queued remote writes.
    pub async fn flush(&self) {
        self.core.flush().await;
    }
}
