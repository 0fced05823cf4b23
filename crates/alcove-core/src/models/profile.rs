//! User profile model

use serde::{Deserialize, Serialize};

/// The workspace owner's profile. A single record per user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Avatar image URL or data URL
    #[serde(default)]
    pub avatar_url: Option<String>,
}
