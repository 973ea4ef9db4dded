//! RGBA colors.
//!
//! A [`Color`] doubles as the pixel type of [`crate::Image`], so it is
//! `Pod` and laid out exactly as four bytes.

use serde::Deserialize;

use crate::error::ConfigError;

/// 8-bit RGBA color (straight alpha).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Solid black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Solid white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Creates a color from RGBA components.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Creates a color from hex value (0xRRGGBBAA).
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        Self::rgba(
            ((hex >> 24) & 0xFF) as u8,
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Returns the color with each RGB channel inverted. Alpha is kept.
    #[must_use]
    pub const fn inverted(self) -> Self {
        Self::rgba(255 - self.r, 255 - self.g, 255 - self.b, self.a)
    }

    /// Composites `self` over `dst` (source-over, straight alpha).
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        match self.a {
            255 => self,
            0 => dst,
            sa => {
                let sa = u32::from(sa);
                let da = u32::from(dst.a) * (255 - sa) / 255;
                let out_a = sa + da;
                let mix = |s: u8, d: u8| ((u32::from(s) * sa + u32::from(d) * da) / out_a) as u8;
                Self::rgba(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b), out_a as u8)
            }
        }
    }

    /// Parses `#rrggbb` or `#rrggbbaa`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidColor`] for anything else.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(text.to_owned());
        let digits = text.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        match digits.len() {
            6 => Ok(Self::hex((value << 8) | 0xFF)),
            8 => Ok(Self::hex(value)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
