//! Theme model

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Field names accepted by [`Theme::set_field`], in display order.
pub const THEME_FIELDS: [&str; 6] = [
    "background",
    "foreground",
    "sidebar",
    "sidebar_text",
    "surface",
    "accent",
];

/// Workspace color theme. Every field is a hex color string. Fields missing
/// from a stored payload fall back to their defaults, so themes saved by
/// older builds keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Main background color
    #[serde(default = "default_background")]
    pub background: String,
    /// Main text color
    #[serde(default = "default_foreground")]
    pub foreground: String,
    /// Sidebar background color
    #[serde(default = "default_sidebar")]
    pub sidebar: String,
    /// Sidebar text color
    #[serde(default = "default_sidebar_text")]
    pub sidebar_text: String,
    /// Card and panel surface color
    #[serde(default = "default_surface")]
    pub surface: String,
    /// Accent color for highlights and selection
    #[serde(default = "default_accent")]
    pub accent: String,
}

fn default_background() -> String {
    "#ffffff".to_string()
}

fn default_foreground() -> String {
    "#0b0b0b".to_string()
}

fn default_sidebar() -> String {
    "#0b0b0b".to_string()
}

fn default_sidebar_text() -> String {
    "#ffffff".to_string()
}

fn default_surface() -> String {
    "#1f2937".to_string()
}

fn default_accent() -> String {
    "#00f5ff".to_string()
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: default_background(),
            foreground: default_foreground(),
            sidebar: default_sidebar(),
            sidebar_text: default_sidebar_text(),
            surface: default_surface(),
            accent: default_accent(),
        }
    }
}

impl Theme {
    /// Set a single color field by name.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        match field {
            "background" => self.background = value,
            "foreground" => self.foreground = value,
            "sidebar" => self.sidebar = value,
            "sidebar_text" => self.sidebar_text = value,
            "surface" => self.surface = value,
            "accent" => self.accent = value,
            other => {
                return Err(Error::InvalidInput(format!("unknown theme field: {other}")));
            }
        }
        Ok(())
    }

    /// Read a single color field by name.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        match field {
            "background" => Some(&self.background),
            "foreground" => Some(&self.foreground),
            "sidebar" => Some(&self.sidebar),
            "sidebar_text" => Some(&self.sidebar_text),
            "surface" => Some(&self.surface),
            "accent" => Some(&self.accent),
            _ => None,
        }
    }
}
