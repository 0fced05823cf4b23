//! Entity services over the sync cores.
//!
//! Each service validates input, owns one entity's sync core (or the
//! cache, for local-only data), and exposes the operations the clients
//! call. Clients never talk to the sync layer directly.

mod events;
mod links;
mod media;
mod notes;
mod profile;
mod theme;

pub use events::EventService;
pub use links::LinkService;
pub use media::MediaService;
pub use notes::NoteService;
pub use profile::ProfileService;
pub use theme::ThemeService;
