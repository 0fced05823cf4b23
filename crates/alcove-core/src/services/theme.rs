//! Theme service.

use crate::error::{Error, Result};
use crate::models::Theme;
use crate::store::{keys, EntityCache};

/// Operations on the workspace theme.
#[derive(Clone)]
pub struct ThemeService {
    cache: EntityCache,
}

impl ThemeService {
    #[must_use]
    pub fn new(cache: EntityCache) -> Self {
        Self { cache }
    }

    /// The stored theme, with missing fields filled from the defaults. A
    /// corrupt payload falls back to the default theme entirely.
    #[must_use]
    pub fn load(&self) -> Theme {
        self.cache.load_value(keys::THEME).unwrap_or_default()
    }

    /// Persist a theme.
    pub fn save(&self, theme: &Theme) -> Result<()> {
        self.cache.save_value(keys::THEME, theme)
    }

    /// Set one color field. The value must be a `#rgb` or `#rrggbb` hex
    /// color.
    pub fn set_field(&self, field: &str, value: &str) -> Result<Theme> {
        let value = value.trim();
        if !is_hex_color(value) {
            return Err(Error::InvalidInput(format!(
                "expected a hex color like #1f2937, got {value:?}"
            )));
        }

        let mut theme = self.load();
        theme.set_field(field, value)?;
        self.save(&theme)?;
        Ok(theme)
    }

    /// Restore the default palette.
    pub fn reset(&self) -> Result<Theme> {
        let theme = Theme::default();
        self.save(&theme)?;
        Ok(theme)
    }
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
