//! Theme data: fonts, text colors and nine-patch decorations per widget
//! category.
//!
//! A [`Theme`] is read-only once built. Widgets take a value snapshot of it
//! at construction (cheap: images and fonts are behind `Arc`), so swapping
//! the current theme in a [`ThemeRegistry`] never changes the look of
//! widgets that already exist.
//!
//! ## Manifest format
//!
//! ```toml
//! [font]
//! key = "builtin:block"
//! size = 16
//! antialias = true
//!
//! [button]
//! default = "button.png"
//! hover = "button-hover.png"
//! click = "noimage"          # use the bare text
//! text_color = "#e0e0e0"
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Deserialize;

use crate::color::Color;
use crate::error::{ConfigError, ConfigResult};
use crate::font::{BlockFont, Font};
use crate::geometry::Size;
use crate::image::Image;
use crate::ninepatch;

/// Manifest value meaning "explicitly no decoration".
pub const NO_IMAGE: &str = "noimage";

/// Font key [`MemoryAssets`] resolves to a [`BlockFont`].
pub const BUILTIN_BLOCK_FONT: &str = "builtin:block";

/// A decoration slot of a theme category.
#[derive(Debug, Clone, Default)]
pub enum Decoration {
    /// Nine-patch border image.
    Image(Arc<Image>),
    /// Explicitly undecorated (`"noimage"` in a manifest).
    NoImage,
    /// Not configured.
    #[default]
    Absent,
}

impl Decoration {
    /// The border image, if any.
    #[must_use]
    pub fn image(&self) -> Option<&Arc<Image>> {
        match self {
            Self::Image(image) => Some(image),
            Self::NoImage | Self::Absent => None,
        }
    }

    /// Size of one nine-patch cell, or zero when undecorated.
    #[must_use]
    pub fn border(&self) -> Size {
        self.image().map_or(Size::ZERO, |image| ninepatch::border_size(image))
    }

    /// The border image, failing when the slot is required but empty.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingImage`] when there is no image.
    pub fn require(&self, widget: &'static str, slot: &'static str) -> ConfigResult<&Arc<Image>> {
        self.image().ok_or(ConfigError::MissingImage { widget, slot })
    }

    /// Frames `content` with this decoration.
    ///
    /// Undecorated slots return the content unchanged (forced sizes only
    /// apply to framed images).
    #[must_use]
    pub fn wrap(&self, content: &Image, width: Option<i32>, height: Option<i32>) -> Image {
        match self {
            Self::Image(border) => ninepatch::compose(border, content, width, height),
            Self::NoImage | Self::Absent => content.clone(),
        }
    }
}

/// Font settings shared by every text widget.
#[derive(Debug, Clone)]
pub struct FontSpec {
    /// Loaded face, if any.
    pub face: Option<Arc<dyn Font>>,
    /// Nominal pixel size the face was loaded at.
    pub size: u32,
    /// Antialiased rendering.
    pub antialias: bool,
}

impl FontSpec {
    /// The font face.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingFont`] when the theme has no font.
    pub fn face(&self, widget: &'static str) -> ConfigResult<&Arc<dyn Font>> {
        self.face.as_ref().ok_or(ConfigError::MissingFont { widget })
    }

    /// Renders a line of text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingFont`] when the theme has no font.
    pub fn render(&self, widget: &'static str, text: &str, color: Color) -> ConfigResult<Image> {
        Ok(self.face(widget)?.render(text, color, self.antialias))
    }
}

/// Three-state look used by buttons, window bars and menu entries.
#[derive(Debug, Clone)]
pub struct ButtonLook {
    /// Idle decoration.
    pub default: Decoration,
    /// Decoration while hovered.
    pub hover: Decoration,
    /// Decoration while pressed.
    pub click: Decoration,
    /// Text color.
    pub text_color: Color,
}

/// Label look.
#[derive(Debug, Clone)]
pub struct LabelLook {
    /// Backing decoration.
    pub image: Decoration,
    /// Text color.
    pub text_color: Color,
}

/// Drop-down menu look.
#[derive(Debug, Clone)]
pub struct MenuLook {
    /// Border around the option list.
    pub border: Decoration,
    /// Idle option decoration.
    pub entry_default: Decoration,
    /// Hovered option decoration.
    pub entry_hover: Decoration,
    /// Pressed option decoration.
    pub entry_click: Decoration,
    /// Option text color.
    pub entry_text_color: Color,
}

impl MenuLook {
    /// The button look menu options are built with.
    #[must_use]
    pub fn entry_look(&self) -> ButtonLook {
        ButtonLook {
            default: self.entry_default.clone(),
            hover: self.entry_hover.clone(),
            click: self.entry_click.clone(),
            text_color: self.entry_text_color,
        }
    }
}

/// Text input look.
#[derive(Debug, Clone)]
pub struct InputLook {
    /// Border around the field.
    pub border: Decoration,
    /// Text color (the cursor uses its inverse).
    pub text_color: Color,
}

/// Window look.
#[derive(Debug, Clone)]
pub struct WindowLook {
    /// Border around the window body.
    pub border: Decoration,
    /// Body fill used when there is no border image.
    pub background: Color,
}

/// Scroll bar look. All four images are required.
#[derive(Debug, Clone, Default)]
pub struct ScrollBarLook {
    /// Track.
    pub border: Decoration,
    /// Idle handle.
    pub default: Decoration,
    /// Hovered handle.
    pub hover: Decoration,
    /// Dragged handle.
    pub click: Decoration,
}

/// Complete theme.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Font for every text widget.
    pub font: FontSpec,
    /// Buttons.
    pub button: ButtonLook,
    /// Labels.
    pub label: LabelLook,
    /// Menus and their option lists.
    pub menu: MenuLook,
    /// Text inputs.
    pub input: InputLook,
    /// Window bodies.
    pub window: WindowLook,
    /// Window title bars.
    pub window_bar: ButtonLook,
    /// Scroll bars.
    pub scroll_bar: ScrollBarLook,
}

impl Theme {
    /// An undecorated theme: white text in `font`, no images anywhere.
    #[must_use]
    pub fn plain(font: Arc<dyn Font>, size: u32) -> Self {
        let bare = || ButtonLook {
            default: Decoration::Absent,
            hover: Decoration::Absent,
            click: Decoration::Absent,
            text_color: Color::WHITE,
        };
        Self {
            font: FontSpec {
                face: Some(font),
                size,
                antialias: true,
            },
            button: bare(),
            label: LabelLook {
                image: Decoration::Absent,
                text_color: Color::WHITE,
            },
            menu: MenuLook {
                border: Decoration::Absent,
                entry_default: Decoration::Absent,
                entry_hover: Decoration::Absent,
                entry_click: Decoration::Absent,
                entry_text_color: Color::WHITE,
            },
            input: InputLook {
                border: Decoration::Absent,
                text_color: Color::WHITE,
            },
            window: WindowLook {
                border: Decoration::Absent,
                background: Color::BLACK,
            },
            window_bar: bare(),
            scroll_bar: ScrollBarLook::default(),
        }
    }

    /// Copy of this theme whose button look is `look`.
    ///
    /// Composite widgets use this to build children (menu options, window
    /// bars) with a category-specific look without touching the original.
    #[must_use]
    pub fn with_button_look(&self, look: ButtonLook) -> Self {
        Self {
            button: look,
            ..self.clone()
        }
    }

    /// Builds a theme from a parsed manifest, resolving keys via `assets`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownAsset`] for keys the asset source can't resolve.
    pub fn from_manifest(manifest: &ThemeManifest, assets: &dyn AssetSource) -> ConfigResult<Self> {
        let deco = |key: &Option<String>| resolve_decoration(key.as_deref(), assets);
        let white = |c: Option<Color>| c.unwrap_or(Color::WHITE);

        let face = match manifest.font.key.as_deref() {
            Some(key) => Some(
                assets
                    .font(key, manifest.font.size)
                    .ok_or_else(|| ConfigError::UnknownAsset(key.to_owned()))?,
            ),
            None => None,
        };

        let button_look = |look: &LookManifest| -> ConfigResult<ButtonLook> {
            Ok(ButtonLook {
                default: deco(&look.default)?,
                hover: deco(&look.hover)?,
                click: deco(&look.click)?,
                text_color: white(look.text_color),
            })
        };

        Ok(Self {
            font: FontSpec {
                face,
                size: manifest.font.size,
                antialias: manifest.font.antialias,
            },
            button: button_look(&manifest.button)?,
            label: LabelLook {
                image: deco(&manifest.label.image)?,
                text_color: white(manifest.label.text_color),
            },
            menu: MenuLook {
                border: deco(&manifest.menu.border)?,
                entry_default: deco(&manifest.menu.entry_default)?,
                entry_hover: deco(&manifest.menu.entry_hover)?,
                entry_click: deco(&manifest.menu.entry_click)?,
                entry_text_color: white(manifest.menu.entry_text_color),
            },
            input: InputLook {
                border: deco(&manifest.input.border)?,
                text_color: white(manifest.input.text_color),
            },
            window: WindowLook {
                border: deco(&manifest.window.border)?,
                background: manifest.window.background.unwrap_or(Color::BLACK),
            },
            window_bar: button_look(&manifest.window_bar)?,
            scroll_bar: ScrollBarLook {
                border: deco(&manifest.scroll_bar.border)?,
                default: deco(&manifest.scroll_bar.default)?,
                hover: deco(&manifest.scroll_bar.hover)?,
                click: deco(&manifest.scroll_bar.click)?,
            },
        })
    }

    /// Parses a TOML manifest and builds the theme.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Manifest`] for malformed TOML, otherwise as
    /// [`Theme::from_manifest`].
    pub fn from_toml_str(text: &str, assets: &dyn AssetSource) -> ConfigResult<Self> {
        let manifest: ThemeManifest = toml::from_str(text)?;
        Self::from_manifest(&manifest, assets)
    }
}

fn resolve_decoration(key: Option<&str>, assets: &dyn AssetSource) -> ConfigResult<Decoration> {
    match key {
        None => Ok(Decoration::Absent),
        Some(NO_IMAGE) => Ok(Decoration::NoImage),
        Some(key) => assets
            .image(key)
            .map(Decoration::Image)
            .ok_or_else(|| ConfigError::UnknownAsset(key.to_owned())),
    }
}

/// Theme manifest as written in TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeManifest {
    /// Font settings.
    pub font: FontManifest,
    /// `[button]`
    pub button: LookManifest,
    /// `[label]`
    pub label: LookManifest,
    /// `[menu]`
    pub menu: LookManifest,
    /// `[input]`
    pub input: LookManifest,
    /// `[window]`
    pub window: LookManifest,
    /// `[window_bar]`
    pub window_bar: LookManifest,
    /// `[scroll_bar]`
    pub scroll_bar: LookManifest,
}

/// `[font]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontManifest {
    /// Asset key of the font face.
    pub key: Option<String>,
    /// Pixel size.
    pub size: u32,
    /// Antialiased rendering.
    pub antialias: bool,
}

impl Default for FontManifest {
    fn default() -> Self {
        Self {
            key: None,
            size: 16,
            antialias: true,
        }
    }
}

/// One category table. Each category reads only the keys it understands.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LookManifest {
    /// Label backing image.
    pub image: Option<String>,
    /// Border image (menu, input, window, scroll bar track).
    pub border: Option<String>,
    /// Idle image.
    pub default: Option<String>,
    /// Hover image.
    pub hover: Option<String>,
    /// Pressed image.
    pub click: Option<String>,
    /// Idle menu option image.
    pub entry_default: Option<String>,
    /// Hovered menu option image.
    pub entry_hover: Option<String>,
    /// Pressed menu option image.
    pub entry_click: Option<String>,
    /// Text color.
    pub text_color: Option<Color>,
    /// Menu option text color.
    pub entry_text_color: Option<Color>,
    /// Window body fill.
    pub background: Option<Color>,
}

/// Resolves asset keys named by a manifest. Loading and decoding is the
/// host's business.
pub trait AssetSource {
    /// Image for `key`.
    fn image(&self, key: &str) -> Option<Arc<Image>>;

    /// Font face for `key` at `size` pixels.
    fn font(&self, key: &str, size: u32) -> Option<Arc<dyn Font>>;
}

/// In-memory asset source.
#[derive(Default)]
pub struct MemoryAssets {
    images: HashMap<String, Arc<Image>>,
    fonts: HashMap<String, Arc<dyn Font>>,
}

impl MemoryAssets {
    /// Creates an empty asset source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an image.
    #[must_use]
    pub fn with_image(mut self, key: impl Into<String>, image: Image) -> Self {
        self.images.insert(key.into(), Arc::new(image));
        self
    }

    /// Registers a font face.
    #[must_use]
    pub fn with_font(mut self, key: impl Into<String>, font: Arc<dyn Font>) -> Self {
        self.fonts.insert(key.into(), font);
        self
    }
}

impl fmt::Debug for MemoryAssets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryAssets")
            .field("images", &self.images.keys().collect::<Vec<_>>())
            .field("fonts", &self.fonts.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl AssetSource for MemoryAssets {
    fn image(&self, key: &str) -> Option<Arc<Image>> {
        self.images.get(key).cloned()
    }

    fn font(&self, key: &str, size: u32) -> Option<Arc<dyn Font>> {
        if key == BUILTIN_BLOCK_FONT {
            return Some(Arc::new(BlockFont::new(size)));
        }
        self.fonts.get(key).cloned()
    }
}

/// The current theme, shared and swappable.
#[derive(Debug)]
pub struct ThemeRegistry {
    current: RwLock<Arc<Theme>>,
}

impl ThemeRegistry {
    /// Creates a registry holding `theme`.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            current: RwLock::new(Arc::new(theme)),
        }
    }

    /// Shared handle to the current theme.
    #[must_use]
    pub fn current(&self) -> Arc<Theme> {
        Arc::clone(&self.current.read())
    }

    /// Replaces the current theme, returning the previous one.
    pub fn swap(&self, theme: Theme) -> Arc<Theme> {
        std::mem::replace(&mut *self.current.write(), Arc::new(theme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets() -> MemoryAssets {
        MemoryAssets::new()
            .with_image("border", Image::filled(Size::new(6, 6), Color::WHITE))
            .with_image("handle", Image::filled(Size::new(3, 3), Color::BLACK))
    }

    #[test]
    fn test_manifest_resolution() {
        let theme = Theme::from_toml_str(
            r##"
            [font]
            key = "builtin:block"
            size = 12

            [button]
            default = "border"
            hover = "noimage"
            text_color = "#ff0000"

            [scroll_bar]
            border = "border"
            default = "handle"
            hover = "handle"
            click = "handle"
            "##,
            &assets(),
        )
        .unwrap();

        assert!(theme.font.face.is_some());
        assert_eq!(theme.font.size, 12);
        assert!(matches!(theme.button.default, Decoration::Image(_)));
        assert!(matches!(theme.button.hover, Decoration::NoImage));
        assert!(matches!(theme.button.click, Decoration::Absent));
        assert_eq!(theme.button.text_color, Color::rgb(255, 0, 0));
        assert_eq!(theme.label.text_color, Color::WHITE);
        assert_eq!(theme.scroll_bar.border.border(), Size::new(2, 2));
    }

    #[test]
    fn test_unknown_asset() {
        let err = Theme::from_toml_str("[label]\nimage = \"nope\"\n", &assets()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownAsset(key) if key == "nope"));
    }

    #[test]
    fn test_bad_toml() {
        let err = Theme::from_toml_str("[button]\nsparkle = 1\n", &assets()).unwrap_err();
        assert!(matches!(err, ConfigError::Manifest(_)));
    }

    #[test]
    fn test_missing_font_is_an_error() {
        let theme = Theme::from_toml_str("", &assets()).unwrap();
        assert!(matches!(
            theme.font.render("button", "x", Color::WHITE),
            Err(ConfigError::MissingFont { widget: "button" })
        ));
    }

    #[test]
    fn test_registry_swap_keeps_snapshots() {
        let registry = ThemeRegistry::new(Theme::plain(Arc::new(BlockFont::new(10)), 10));
        let snapshot: Theme = (*registry.current()).clone();

        let mut louder = snapshot.clone();
        louder.label.text_color = Color::rgb(1, 2, 3);
        let old = registry.swap(louder);

        assert_eq!(old.label.text_color, Color::WHITE);
        assert_eq!(snapshot.label.text_color, Color::WHITE);
        assert_eq!(registry.current().label.text_color, Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_decoration_wrap() {
        let content = Image::new(Size::new(4, 2));
        let framed = Decoration::Image(Arc::new(Image::filled(Size::new(3, 3), Color::WHITE)));

        assert_eq!(framed.wrap(&content, None, None).width(), 6);
        assert_eq!(Decoration::NoImage.wrap(&content, Some(50), None).width(), 4);
        assert!(Decoration::Absent.require("scroll bar", "border").is_err());
    }
}
