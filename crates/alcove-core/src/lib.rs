//! alcove-core - Core library for Alcove
//!
//! This crate contains the entity models, the local-first sync core, the
//! reminder scheduler, and the services used by all Alcove interfaces.

pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod reminder;
pub mod remote;
pub mod services;
pub mod store;
pub mod sync;
pub mod util;
pub mod workspace;

pub use error::{Error, Result};
pub use identity::{IdentityProvider, UserId};
pub use models::{Event, Link, Note, Profile};
