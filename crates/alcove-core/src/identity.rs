//! Per-device user identity.
//!
//! Every remote query and mutation is partitioned by an opaque user id that
//! is generated once per device and persisted in the state store.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::store::{keys, StateStore};
use crate::util::normalize_text_option;

/// Opaque identifier partitioning all remote state by device owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Wrap an existing identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the string representation of this id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lazily generates and persists the device's user id.
pub struct IdentityProvider {
    store: Arc<dyn StateStore>,
}

impl IdentityProvider {
    /// Create a provider over the given state store.
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Return the persisted user id, generating and persisting a fresh one
    /// on first use.
    pub fn get_or_create(&self) -> Result<UserId> {
        if let Some(existing) = normalize_text_option(self.store.get(keys::USER_ID)?) {
            return Ok(UserId(existing));
        }

        let id = format!("user-{}", Uuid::now_v7());
        self.store.set(keys::USER_ID, &id)?;
        tracing::info!("generated device user id");
        Ok(UserId(id))
    }
}
