//! Nine-patch stretching and image combination.
//!
//! A border image is split into a 3x3 grid of equal cells. Corners keep
//! their size, edges stretch along one axis and the centre stretches along
//! both, so a small bordered tile can back a widget of any size.

use crate::geometry::{Point, Rect, Size};
use crate::image::Image;
use crate::surface::Surface;

/// Size of one grid cell of a nine-patch image (a third of each side).
#[must_use]
pub fn border_size(image: &Image) -> Size {
    Size::new(image.width() / 3, image.height() / 3)
}

/// Stretches a nine-patch image to `size`.
///
/// The target is never smaller than the source image: each axis is clamped
/// up to the source extent so corners never overlap.
#[must_use]
pub fn stretch(image: &Image, size: Size) -> Image {
    let size = Size::new(size.width.max(image.width()), size.height.max(image.height()));
    let cell = border_size(image);
    let mut out = Image::new(size);

    let mid = Size::new(size.width - cell.width * 2, size.height - cell.height * 2);
    // x/y of the three columns/rows in the source and the destination
    let src_x = [0, cell.width, cell.width * 2];
    let src_y = [0, cell.height, cell.height * 2];
    let dst_x = [0, cell.width, size.width - cell.width];
    let dst_y = [0, cell.height, size.height - cell.height];
    let dst_w = [cell.width, mid.width, cell.width];
    let dst_h = [cell.height, mid.height, cell.height];

    for row in 0..3 {
        for col in 0..3 {
            let piece = image.sub_image(Rect::new(src_x[col], src_y[row], cell.width, cell.height));
            let target = Size::new(dst_w[col], dst_h[row]);
            let piece = if target == cell { piece } else { piece.scaled(target) };
            out.blit(&piece, Point::new(dst_x[col], dst_y[row]));
        }
    }
    out
}

/// Wraps `content` in a nine-patch `border`.
///
/// The result is the content size plus one border cell on each side, unless
/// `width`/`height` force an explicit outer size. The content is painted at
/// the inner top-left corner.
#[must_use]
pub fn compose(border: &Image, content: &Image, width: Option<i32>, height: Option<i32>) -> Image {
    let cell = border_size(border);
    let size = Size::new(
        width.unwrap_or(content.width() + cell.width * 2),
        height.unwrap_or(content.height() + cell.height * 2),
    );
    let mut out = stretch(border, size);
    out.blit(content, Point::new(cell.width, cell.height));
    out
}

/// Places images side by side, left to right, top-aligned.
#[must_use]
pub fn combine_horizontal(images: &[&Image]) -> Image {
    let width: i32 = images.iter().map(|i| i.width()).sum();
    let height = images.iter().map(|i| i.height()).max().unwrap_or(0);

    let mut out = Image::new(Size::new(width, height));
    let mut x = 0;
    for image in images {
        out.blit(image, Point::new(x, 0));
        x += image.width();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    /// 3x3 tile: white corners, grey edges, black centre.
    fn tile() -> Image {
        let grey = Color::rgb(128, 128, 128);
        let mut img = Image::filled(Size::new(3, 3), grey);
        for p in [(0, 0), (2, 0), (0, 2), (2, 2)] {
            img.put(Point::new(p.0, p.1), Color::WHITE);
        }
        img.put(Point::new(1, 1), Color::BLACK);
        img
    }

    #[test]
    fn test_stretch_keeps_corners() {
        let out = stretch(&tile(), Size::new(10, 6));

        assert_eq!(out.width(), 10);
        assert_eq!(out.height(), 6);
        assert_eq!(out.get(Point::new(0, 0)), Some(Color::WHITE));
        assert_eq!(out.get(Point::new(9, 5)), Some(Color::WHITE));
        assert_eq!(out.get(Point::new(5, 0)), Some(Color::rgb(128, 128, 128)));
        assert_eq!(out.get(Point::new(5, 3)), Some(Color::BLACK));
    }

    #[test]
    fn test_stretch_never_shrinks() {
        let out = stretch(&tile(), Size::new(1, 1));
        assert_eq!((out.width(), out.height()), (3, 3));
    }

    #[test]
    fn test_compose_sizes() {
        let content = Image::filled(Size::new(8, 4), Color::rgb(255, 0, 0));

        let natural = compose(&tile(), &content, None, None);
        assert_eq!((natural.width(), natural.height()), (10, 6));
        assert_eq!(natural.get(Point::new(1, 1)), Some(Color::rgb(255, 0, 0)));

        let forced = compose(&tile(), &content, Some(20), None);
        assert_eq!((forced.width(), forced.height()), (20, 6));
    }

    #[test]
    fn test_combine_horizontal() {
        let a = Image::filled(Size::new(2, 5), Color::WHITE);
        let b = Image::filled(Size::new(3, 2), Color::BLACK);

        let out = combine_horizontal(&[&a, &b]);

        assert_eq!((out.width(), out.height()), (5, 5));
        assert_eq!(out.get(Point::new(2, 0)), Some(Color::BLACK));
        assert_eq!(out.get(Point::new(2, 4)), Some(Color::TRANSPARENT));
    }
}
