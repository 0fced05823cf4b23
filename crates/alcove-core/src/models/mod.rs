//! Entity models shared across the workspace.

mod event;
mod link;
mod media;
mod note;
mod profile;
mod theme;

pub use event::{add_days, date_key, events_by_date, start_of_week, week_of, Event};
pub use link::{default_links, merge_defaults, Link};
pub use media::{MediaItem, MediaKind};
pub use note::{Note, NOTE_FOLDERS};
pub use profile::Profile;
pub use theme::{Theme, THEME_FIELDS};
