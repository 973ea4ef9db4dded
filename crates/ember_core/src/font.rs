//! Font capability.
//!
//! Glyph rasterisation belongs to the host (or its asset pipeline); the
//! engine only needs to measure and render single lines of text.

use std::fmt;

use crate::color::Color;
use crate::geometry::{Point, Rect, Size};
use crate::image::Image;
use crate::surface::Surface;

/// A loaded font face at a fixed pixel size.
pub trait Font: fmt::Debug + Send + Sync {
    /// Renders one line of text onto a transparent image.
    fn render(&self, text: &str, color: Color, antialias: bool) -> Image;

    /// Size the rendered text would occupy.
    fn measure(&self, text: &str) -> Size;

    /// Recommended line height.
    fn line_height(&self) -> i32;
}

/// Fixed-cell font that draws every visible glyph as a solid block.
///
/// Useful for headless hosts, tools and tests: layout is exact and
/// predictable (`advance` pixels per char, `line_height` tall).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockFont {
    advance: i32,
    line_height: i32,
}

impl BlockFont {
    /// Creates a block font for a nominal pixel size.
    #[must_use]
    pub fn new(size: u32) -> Self {
        let size = size.max(2) as i32;
        Self {
            advance: (size / 2).max(1),
            line_height: size,
        }
    }

    /// Horizontal advance per character.
    #[must_use]
    pub const fn advance(&self) -> i32 {
        self.advance
    }
}

impl Font for BlockFont {
    fn render(&self, text: &str, color: Color, _antialias: bool) -> Image {
        let mut image = Image::new(self.measure(text));
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let cell = Rect::from_pos_size(
                Point::new(i as i32 * self.advance, 0),
                Size::new(self.advance, self.line_height),
            );
            image.fill_rect(cell.expand(-1, -1), color);
        }
        image
    }

    fn measure(&self, text: &str) -> Size {
        Size::new(text.chars().count() as i32 * self.advance, self.line_height)
    }

    fn line_height(&self) -> i32 {
        self.line_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_font_metrics() {
        let font = BlockFont::new(16);
        assert_eq!(font.measure("abc"), Size::new(24, 16));
        assert_eq!(font.measure(""), Size::new(0, 16));
        assert_eq!(font.line_height(), 16);
    }

    #[test]
    fn test_block_font_render() {
        let font = BlockFont::new(8);
        let image = font.render("a b", Color::WHITE, true);

        assert_eq!((image.width(), image.height()), (12, 8));
        assert_eq!(image.get(Point::new(1, 1)), Some(Color::WHITE));
        // space glyph stays empty
        assert_eq!(image.get(Point::new(5, 3)), Some(Color::TRANSPARENT));
        assert_eq!(image.get(Point::new(9, 3)), Some(Color::WHITE));
    }
}
