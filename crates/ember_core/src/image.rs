//! Software RGBA images.
//!
//! Widgets keep their looks as cached [`Image`]s built once from the theme.
//! Images are also a [`Surface`] so they can be composed by blitting.

use crate::color::Color;
use crate::geometry::{Point, Rect, Size};
use crate::surface::Surface;

/// An owned RGBA pixel buffer, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    size: Size,
    pixels: Vec<Color>,
}

impl Image {
    /// Creates a fully transparent image. Negative extents are treated as zero.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self::filled(size, Color::TRANSPARENT)
    }

    /// Creates an image filled with one color.
    #[must_use]
    pub fn filled(size: Size, color: Color) -> Self {
        let size = Size::new(size.width.max(0), size.height.max(0));
        Self {
            size,
            pixels: vec![color; size.area()],
        }
    }

    /// Image size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Image width.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.size.width
    }

    /// Image height.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.size.height
    }

    /// Bounds of the image at the origin.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::from_pos_size(Point::ZERO, self.size)
    }

    /// Pixel at `p`, or None outside the image.
    #[must_use]
    pub fn get(&self, p: Point) -> Option<Color> {
        self.index(p).map(|i| self.pixels[i])
    }

    /// Overwrites the pixel at `p`. Out-of-bounds writes are ignored.
    pub fn put(&mut self, p: Point, color: Color) {
        if let Some(i) = self.index(p) {
            self.pixels[i] = color;
        }
    }

    /// Raw pixel bytes (RGBA8), ready for upload by the host.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copies out the part of the image covered by `rect` (clipped to the image).
    #[must_use]
    pub fn sub_image(&self, rect: Rect) -> Self {
        let Some(clip) = rect.intersection(&self.bounds()) else {
            return Self::new(Size::ZERO);
        };
        let mut out = Self::new(clip.size());
        for y in 0..clip.height {
            for x in 0..clip.width {
                if let Some(c) = self.get(Point::new(clip.x + x, clip.y + y)) {
                    out.put(Point::new(x, y), c);
                }
            }
        }
        out
    }

    /// Nearest-neighbour scale to `size`.
    #[must_use]
    pub fn scaled(&self, size: Size) -> Self {
        let mut out = Self::new(size);
        if self.size.area() == 0 {
            return out;
        }
        let (sw, sh) = (i64::from(self.size.width), i64::from(self.size.height));
        let (dw, dh) = (i64::from(out.size.width), i64::from(out.size.height));
        for y in 0..dh {
            let sy = (y * sh / dh) as i32;
            for x in 0..dw {
                let sx = (x * sw / dw) as i32;
                if let Some(c) = self.get(Point::new(sx, sy)) {
                    out.put(Point::new(x as i32, y as i32), c);
                }
            }
        }
        out
    }

    /// Draws a 1px rectangle outline.
    pub fn outline_rect(&mut self, rect: Rect, color: Color) {
        for x in rect.x..rect.right() {
            self.put(Point::new(x, rect.y), color);
            self.put(Point::new(x, rect.bottom() - 1), color);
        }
        for y in rect.y..rect.bottom() {
            self.put(Point::new(rect.x, y), color);
            self.put(Point::new(rect.right() - 1, y), color);
        }
    }

    fn index(&self, p: Point) -> Option<usize> {
        if self.bounds().contains(p) {
            Some(p.y as usize * self.size.width as usize + p.x as usize)
        } else {
            None
        }
    }
}

impl Surface for Image {
    fn size(&self) -> Size {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(clip) = rect.intersection(&self.bounds()) else {
            return;
        };
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                self.put(Point::new(x, y), color);
            }
        }
    }

    fn blit(&mut self, image: &Image, at: Point) {
        let target = Rect::from_pos_size(at, image.size);
        let Some(clip) = target.intersection(&self.bounds()) else {
            return;
        };
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                let dst = Point::new(x, y);
                if let (Some(src), Some(under)) = (image.get(dst.minus(at)), self.get(dst)) {
                    self.put(dst, src.over(under));
                }
            }
        }
    }
}
