//! Application settings loaded once at startup.

use ember_core::{Color, ConfigResult, Size};
use serde::Deserialize;

/// Root surface settings.
///
/// ```toml
/// width = 1024
/// height = 768
/// background = "#202028"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Surface width in pixels.
    pub width: i32,
    /// Surface height in pixels.
    pub height: i32,
    /// Fill color painted under every widget.
    pub background: Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Color::BLACK,
        }
    }
}

impl AppConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// [`ember_core::ConfigError::Manifest`] when the text is not valid
    /// TOML for this shape.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Surface size.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::ConfigError;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.size(), Size::new(800, 600));
    }

    #[test]
    fn test_full_document() {
        let config = AppConfig::from_toml_str("width = 320\nheight = 200\nbackground = \"#102030\"\n").unwrap();
        assert_eq!(config.size(), Size::new(320, 200));
        assert_eq!(config.background, Color::rgb(0x10, 0x20, 0x30));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            AppConfig::from_toml_str("background = \"teal\""),
            Err(ConfigError::Manifest(_))
        ));
        assert!(AppConfig::from_toml_str("depth = 3").is_err());
    }
}
