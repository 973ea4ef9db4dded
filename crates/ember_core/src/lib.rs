//! # Ember Core
//!
//! Drawing primitives shared by the Ember widget engine:
//! - Integer geometry with nine-point anchors
//! - RGBA pixels and software images
//! - The [`Surface`] drawing capability (plus clipped regions and a
//!   command recorder)
//! - Nine-patch borders
//! - Fonts and themes
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  ThemeManifest (TOML) ──► Theme ──► widgets  │
//! │                            │                 │
//! │       Font + ninepatch ────┘                 │
//! │                                              │
//! │  widgets ──► Surface (Image / Region / Rec)  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Everything here is host-agnostic: no window, no GPU, no file system.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod color;
pub mod error;
pub mod font;
pub mod geometry;
pub mod image;
pub mod ninepatch;
pub mod surface;
pub mod theme;

pub use color::Color;
pub use error::{ConfigError, ConfigResult};
pub use font::{BlockFont, Font};
pub use geometry::{Anchor, Axis, Point, Rect, Size};
pub use image::Image;
pub use surface::{CommandRecorder, DrawCommand, Region, Surface};
pub use theme::{
    AssetSource, ButtonLook, Decoration, FontSpec, InputLook, LabelLook, MemoryAssets, MenuLook,
    ScrollBarLook, Theme, ThemeManifest, ThemeRegistry, WindowLook,
};
