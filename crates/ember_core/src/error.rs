//! # Configuration Error Types
//!
//! Everything that can go wrong while building a widget or loading a theme.
//! Per-frame input handling never fails; these errors only surface at
//! construction time.

use thiserror::Error;

/// Errors raised while loading themes or building widget images.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A text-bearing widget was built from a theme without a font.
    #[error("theme has no font, required to build a {widget}")]
    MissingFont {
        /// Widget category being built.
        widget: &'static str,
    },

    /// A required decoration image is absent from the theme.
    #[error("theme has no `{slot}` image, required to build a {widget}")]
    MissingImage {
        /// Widget category being built.
        widget: &'static str,
        /// Theme slot that was empty.
        slot: &'static str,
    },

    /// The manifest names an image or font the asset source doesn't have.
    #[error("unknown asset: {0}")]
    UnknownAsset(String),

    /// Malformed color string.
    #[error("invalid color `{0}`, expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    /// The manifest or config file isn't valid TOML for its schema.
    #[error("invalid manifest: {0}")]
    Manifest(#[from] toml::de::Error),
}

/// Result type for construction-time operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
