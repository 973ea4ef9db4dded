//! Pixel geometry: points, sizes, rectangles and rectangle anchors.

use serde::Deserialize;

/// A point (or offset) in pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum.
    #[must_use]
    pub const fn offset(self, by: Self) -> Self {
        Self::new(self.x + by.x, self.y + by.y)
    }

    /// Component-wise difference.
    #[must_use]
    pub const fn minus(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Returns the component along `axis`.
    #[must_use]
    pub const fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

/// A pixel size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// Zero-sized.
    pub const ZERO: Self = Self { width: 0, height: 0 };

    /// Creates a new size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns the extent along `axis`.
    #[must_use]
    pub const fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Number of pixels covered (zero for degenerate sizes).
    #[must_use]
    pub fn area(self) -> usize {
        if self.width <= 0 || self.height <= 0 {
            0
        } else {
            self.width as usize * self.height as usize
        }
    }
}

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

/// A named reference point on a rectangle.
///
/// A widget stores its position as "this anchor of my rectangle sits at
/// this point", so a bottom-centred caption stays bottom-centred when its
/// image changes size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    /// Top-left corner.
    #[default]
    TopLeft,
    /// Middle of the top edge.
    MidTop,
    /// Top-right corner.
    TopRight,
    /// Middle of the left edge.
    MidLeft,
    /// Centre.
    Center,
    /// Middle of the right edge.
    MidRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Middle of the bottom edge.
    MidBottom,
    /// Bottom-right corner.
    BottomRight,
}

impl Anchor {
    /// All nine anchors.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::MidTop,
        Self::TopRight,
        Self::MidLeft,
        Self::Center,
        Self::MidRight,
        Self::BottomLeft,
        Self::MidBottom,
        Self::BottomRight,
    ];

    /// Fractions (in halves) of the width and height the anchor sits at.
    const fn halves(self) -> (i32, i32) {
        match self {
            Self::TopLeft => (0, 0),
            Self::MidTop => (1, 0),
            Self::TopRight => (2, 0),
            Self::MidLeft => (0, 1),
            Self::Center => (1, 1),
            Self::MidRight => (2, 1),
            Self::BottomLeft => (0, 2),
            Self::MidBottom => (1, 2),
            Self::BottomRight => (2, 2),
        }
    }
}

/// A rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// X position (left edge).
    pub x: i32,
    /// Y position (top edge).
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle from position and size.
    #[must_use]
    pub const fn from_pos_size(pos: Point, size: Size) -> Self {
        Self::new(pos.x, pos.y, size.width, size.height)
    }

    /// Creates a rectangle of `size` whose `anchor` sits at `at`.
    #[must_use]
    pub fn anchored(size: Size, anchor: Anchor, at: Point) -> Self {
        let mut rect = Self::from_pos_size(Point::ZERO, size);
        rect.set_anchor(anchor, at);
        rect
    }

    /// Returns the right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Returns the bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Top-left corner.
    #[must_use]
    pub const fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Size of the rectangle.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the position of `anchor` on this rectangle.
    #[must_use]
    pub fn anchor(&self, anchor: Anchor) -> Point {
        let (hx, hy) = anchor.halves();
        Point::new(self.x + self.width * hx / 2, self.y + self.height * hy / 2)
    }

    /// Moves the rectangle so that `anchor` sits at `at`. Size is unchanged.
    pub fn set_anchor(&mut self, anchor: Anchor, at: Point) {
        let (hx, hy) = anchor.halves();
        self.x = at.x - self.width * hx / 2;
        self.y = at.y - self.height * hy / 2;
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Returns true if two rectangles intersect.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns the intersection of two rectangles, or None if they don't intersect.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(Self::new(x, y, right - x, bottom - y))
    }

    /// Returns the rectangle moved by `delta`.
    #[must_use]
    pub const fn translate(&self, delta: Point) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Expands the rectangle by the given amount on all sides.
    #[must_use]
    pub const fn expand(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x - dx, self.y - dy, self.width + dx * 2, self.height + dy * 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10, 20, 100, 50);

        assert!(rect.contains(Point::new(50, 30)));
        assert!(rect.contains(Point::new(10, 20)));
        assert!(!rect.contains(Point::new(110, 30)));
        assert!(!rect.contains(Point::new(5, 30)));
        assert!(!rect.contains(Point::new(50, 80)));
    }

    #[test]
    fn test_anchor_round_trip() {
        let size = Size::new(40, 20);
        let at = Point::new(100, 100);
        for anchor in Anchor::ALL {
            let rect = Rect::anchored(size, anchor, at);
            assert_eq!(rect.anchor(anchor), at, "{anchor:?}");
            assert_eq!(rect.size(), size);
        }
    }

    #[test]
    fn test_mid_bottom_anchor() {
        let rect = Rect::anchored(Size::new(40, 20), Anchor::MidBottom, Point::new(100, 100));
        assert_eq!(rect, Rect::new(80, 80, 40, 20));
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersection(&b), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(a.intersection(&Rect::new(20, 20, 1, 1)), None);
    }
}
