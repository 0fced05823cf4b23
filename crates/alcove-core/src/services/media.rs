//! Media service.
//!
//! The media library never leaves the device; items live in the Entity
//! Cache as inline data URLs.

use std::path::Path;

use crate::error::{Error, Result};
use crate::models::MediaItem;
use crate::store::{keys, EntityCache};

/// Operations on the local media library.
#[derive(Clone)]
pub struct MediaService {
    cache: EntityCache,
}

impl MediaService {
    #[must_use]
    pub fn new(cache: EntityCache) -> Self {
        Self { cache }
    }

    /// All items, newest first.
    #[must_use]
    pub fn list(&self) -> Vec<MediaItem> {
        self.cache.load(keys::MEDIA).unwrap_or_default()
    }

    /// Items in the given folder.
    #[must_use]
    pub fn in_folder(&self, folder: &str) -> Vec<MediaItem> {
        self.list()
            .into_iter()
            .filter(|item| item.folder == folder)
            .collect()
    }

    /// Read a file and add it to the library.
    pub fn import(&self, path: &Path, folder: &str) -> Result<MediaItem> {
        let bytes = std::fs::read(path)?;
        let item = MediaItem::from_bytes(path, &bytes, folder)?;

        let mut items = self.list();
        items.insert(0, item.clone());
        self.cache.save(keys::MEDIA, &items)?;
        Ok(item)
    }

    /// Remove an item from the library.
    pub fn remove(&self, id: &str) -> Result<MediaItem> {
        let mut items = self.list();
        let index = items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| Error::NotFound(format!("media item {id}")))?;
        let removed = items.remove(index);
        self.cache.save(keys::MEDIA, &items)?;
        Ok(removed)
    }
}
