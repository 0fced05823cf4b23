//! On-device persistence: a synchronous key-value store and the typed
//! entity cache layered on top of it.

mod cache;
mod memory;
mod sqlite;

pub use cache::EntityCache;
pub use memory::MemoryStateStore;
pub use sqlite::SqliteStateStore;

use crate::error::Result;

/// Fixed keys for persisted state, one per entity list or settings blob.
pub mod keys {
    pub const LINKS: &str = "alcove.links";
    pub const NOTES: &str = "alcove.notes";
    pub const EVENTS: &str = "alcove.events";
    pub const PROFILE: &str = "alcove.profile";
    pub const MEDIA: &str = "alcove.media";
    pub const THEME: &str = "alcove.theme";
    pub const USER_ID: &str = "alcove.user_id";
    pub const SESSION: &str = "alcove.session";
}

/// Synchronous key-value storage addressed by fixed string keys.
pub trait StateStore: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any existing value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`, if any.
    fn remove(&self, key: &str) -> Result<()>;
}
