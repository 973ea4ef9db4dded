//! Three-state image cache shared by buttons, window bars and scroll bar
//! handles.

use ember_core::{ninepatch, ButtonLook, Color, Font, Image, Size};

/// Which cached image is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visual {
    /// Nothing going on.
    #[default]
    Idle,
    /// Pointer over the widget.
    Hovered,
    /// Held down.
    Pressed,
}

/// Idle/hover/pressed images plus the one currently shown.
#[derive(Debug, Clone)]
pub struct Face {
    idle: Image,
    hover: Image,
    pressed: Image,
    visual: Visual,
}

impl Face {
    /// Builds the three images by framing `content` with each decoration
    /// of `look`.
    #[must_use]
    pub fn build(look: &ButtonLook, content: &Image, width: Option<i32>, height: Option<i32>) -> Self {
        Self::from_images(
            look.default.wrap(content, width, height),
            look.hover.wrap(content, width, height),
            look.click.wrap(content, width, height),
        )
    }

    /// Uses prebuilt images.
    #[must_use]
    pub fn from_images(idle: Image, hover: Image, pressed: Image) -> Self {
        Self {
            idle,
            hover,
            pressed,
            visual: Visual::Idle,
        }
    }

    /// Current visual.
    #[must_use]
    pub const fn visual(&self) -> Visual {
        self.visual
    }

    /// Switches visuals. Returns false, and changes nothing, when `visual`
    /// is already showing.
    pub fn set(&mut self, visual: Visual) -> bool {
        if self.visual == visual {
            return false;
        }
        self.visual = visual;
        true
    }

    /// The image to paint.
    #[must_use]
    pub const fn current(&self) -> &Image {
        match self.visual {
            Visual::Idle => &self.idle,
            Visual::Hovered => &self.hover,
            Visual::Pressed => &self.pressed,
        }
    }

    /// Size of the idle image, which defines the widget's rect.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.idle.size()
    }
}

/// Renders `text`, preceded by `icon` when there is one.
pub(crate) fn caption(font: &dyn Font, antialias: bool, text: &str, color: Color, icon: Option<&Image>) -> Image {
    let text = font.render(text, color, antialias);
    match icon {
        Some(icon) => ninepatch::combine_horizontal(&[icon, &text]),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::testing::framed_theme;
    use ember_core::Decoration;

    #[test]
    fn test_same_visual_is_a_no_op() {
        let mut face = Face::from_images(
            Image::new(Size::new(1, 1)),
            Image::new(Size::new(2, 2)),
            Image::new(Size::new(3, 3)),
        );

        assert!(!face.set(Visual::Idle));
        assert!(face.set(Visual::Pressed));
        assert_eq!(face.current().width(), 3);
        assert!(!face.set(Visual::Pressed));
        assert_eq!(face.size(), Size::new(1, 1));
    }

    #[test]
    fn test_build_mixes_decorations() {
        let mut look = framed_theme().button;
        look.hover = Decoration::NoImage;
        let text = Image::filled(Size::new(8, 8), Color::WHITE);

        let face = Face::build(&look, &text, Some(20), None);

        assert_eq!(face.size(), Size::new(20, 10));
        assert_eq!(face.hover.size(), Size::new(8, 8));
    }
}
