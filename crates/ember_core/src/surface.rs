//! Drawing surfaces.
//!
//! The engine never assumes anything about the host's pixel storage: it
//! paints through the [`Surface`] capability. Three implementations ship
//! here: [`Image`] (software), [`Region`] (clipped, offset view of another
//! surface) and [`CommandRecorder`] (records draw commands for hosts that
//! batch, and for tests that assert paint order).

use crate::color::Color;
use crate::geometry::{Point, Rect, Size};
use crate::image::Image;

/// A 2D drawing target.
pub trait Surface {
    /// Surface extent.
    fn size(&self) -> Size;

    /// Overwrites `rect` (clipped to the surface) with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Alpha-composites `image` with its top-left corner at `at`.
    fn blit(&mut self, image: &Image, at: Point);

    /// Overwrites the whole surface with `color`.
    fn fill(&mut self, color: Color) {
        let bounds = Rect::from_pos_size(Point::ZERO, self.size());
        self.fill_rect(bounds, color);
    }
}

/// A clipped, translated window onto another surface.
///
/// Coordinates given to a region are local: `(0, 0)` is `origin` on the
/// parent, and nothing is drawn outside `size`.
pub struct Region<'a, S: Surface + ?Sized> {
    parent: &'a mut S,
    origin: Point,
    size: Size,
}

impl<'a, S: Surface + ?Sized> Region<'a, S> {
    /// Creates a sub-region of `parent`.
    pub fn new(parent: &'a mut S, origin: Point, size: Size) -> Self {
        Self { parent, origin, size }
    }

    fn bounds(&self) -> Rect {
        Rect::from_pos_size(Point::ZERO, self.size)
    }
}

impl<S: Surface + ?Sized> Surface for Region<'_, S> {
    fn size(&self) -> Size {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if let Some(clip) = rect.intersection(&self.bounds()) {
            self.parent.fill_rect(clip.translate(self.origin), color);
        }
    }

    fn blit(&mut self, image: &Image, at: Point) {
        let target = Rect::from_pos_size(at, Size::new(image.width(), image.height()));
        let Some(clip) = target.intersection(&self.bounds()) else {
            return;
        };
        if clip == target {
            self.parent.blit(image, at.offset(self.origin));
        } else {
            let visible = image.sub_image(clip.translate(Point::new(-at.x, -at.y)));
            self.parent.blit(&visible, clip.top_left().offset(self.origin));
        }
    }
}

/// A recorded draw operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// Solid fill.
    Fill {
        /// Filled area.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// Image blit.
    Blit {
        /// Area covered by the image.
        rect: Rect,
    },
}

/// Surface that records commands instead of touching pixels.
#[derive(Debug)]
pub struct CommandRecorder {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    /// Creates a recorder pretending to be a surface of `size`.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::with_capacity(256),
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    /// Returns the commands recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns the total command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Blit rectangles in paint order.
    pub fn blits(&self) -> impl Iterator<Item = Rect> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Blit { rect } => Some(*rect),
            DrawCommand::Fill { .. } => None,
        })
    }
}

impl Surface for CommandRecorder {
    fn size(&self) -> Size {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Fill { rect, color });
    }

    fn blit(&mut self, image: &Image, at: Point) {
        self.commands.push(DrawCommand::Blit {
            rect: Rect::from_pos_size(at, Size::new(image.width(), image.height())),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_frame() {
        let mut recorder = CommandRecorder::new(Size::new(100, 100));

        recorder.fill(Color::BLACK);
        recorder.blit(&Image::new(Size::new(10, 5)), Point::new(3, 4));
        assert_eq!(recorder.command_count(), 2);
        assert_eq!(recorder.blits().collect::<Vec<_>>(), vec![Rect::new(3, 4, 10, 5)]);

        recorder.begin_frame();
        assert_eq!(recorder.command_count(), 0);
    }

    #[test]
    fn test_region_translates_and_clips() {
        let mut recorder = CommandRecorder::new(Size::new(100, 100));
        {
            let mut region = Region::new(&mut recorder, Point::new(10, 20), Size::new(5, 5));
            region.blit(&Image::new(Size::new(4, 4)), Point::new(3, -1));
            region.blit(&Image::new(Size::new(4, 4)), Point::new(50, 50));
            region.fill(Color::WHITE);
        }

        assert_eq!(
            recorder.commands(),
            &[
                DrawCommand::Blit { rect: Rect::new(13, 20, 2, 3) },
                DrawCommand::Fill { rect: Rect::new(10, 20, 5, 5), color: Color::WHITE },
            ]
        );
    }

    #[test]
    fn test_nested_regions() {
        let mut canvas = Image::new(Size::new(10, 10));
        {
            let mut outer = Region::new(&mut canvas, Point::new(2, 2), Size::new(4, 4));
            let mut inner = Region::new(&mut outer, Point::new(0, -2), Size::new(4, 8));
            inner.blit(&Image::filled(Size::new(1, 1), Color::WHITE), Point::new(1, 3));
        }
        assert_eq!(canvas.get(Point::new(3, 3)), Some(Color::WHITE));
    }
}
