//! Widgets.
//!
//! Every widget implements [`Widget`]: it keeps its cached images, hands
//! raw events back as [`Outcome::Unconsumed`] when they are not for it, and
//! paints itself at its bounding rect. A widget talks to its owner only
//! through the [`EventCtx`] it is handed: the pointer in the owner's local
//! space, a redraw request and a raise-to-front request.

mod button;
mod face;
mod label;
mod menu;
mod scrollbar;
mod text_input;
mod window;

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};

use ember_core::{Anchor, Point, Rect, Size, Surface};

use crate::event::{Outcome, WidgetKind};
use crate::input::RawEvent;

pub use button::{Button, ButtonOptions};
pub use face::{Face, Visual};
pub use label::Label;
pub use menu::{Menu, MenuEntry, MenuList, MenuState};
pub use scrollbar::ScrollBar;
pub use text_input::TextInputBox;
pub use window::{Window, WindowBar};

/// Unique identifier for a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocates a fresh process-wide ID.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// One coordinate of a requested position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coord {
    /// Absolute pixel coordinate in the owner's space.
    Px(i32),
    /// Middle of the owner's surface, resolved on attach.
    Center,
}

impl Coord {
    const fn or_zero(self) -> i32 {
        match self {
            Self::Px(v) => v,
            Self::Center => 0,
        }
    }
}

/// Where a widget goes: a point and which anchor of its rect sits there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Horizontal coordinate.
    pub x: Coord,
    /// Vertical coordinate.
    pub y: Coord,
    /// Rect anchor placed at the point.
    pub anchor: Anchor,
}

impl Placement {
    /// Top-left corner at `(x, y)`.
    #[must_use]
    pub const fn at(x: i32, y: i32) -> Self {
        Self {
            x: Coord::Px(x),
            y: Coord::Px(y),
            anchor: Anchor::TopLeft,
        }
    }

    /// Centered on the owner's surface.
    #[must_use]
    pub const fn centered() -> Self {
        Self {
            x: Coord::Center,
            y: Coord::Center,
            anchor: Anchor::Center,
        }
    }

    /// Same point, different anchor.
    #[must_use]
    pub const fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }
}

impl From<Point> for Placement {
    fn from(p: Point) -> Self {
        Self::at(p.x, p.y)
    }
}

/// State every widget carries: identity, position and bounding rect.
#[derive(Debug, Clone)]
pub struct WidgetBase {
    id: WidgetId,
    name: String,
    placement: Placement,
    rect: Rect,
}

impl WidgetBase {
    /// Creates a base with a zero-sized rect at `placement`.
    #[must_use]
    pub fn new(name: impl Into<String>, placement: Placement) -> Self {
        let mut base = Self {
            id: WidgetId::next(),
            name: name.into(),
            placement,
            rect: Rect::ZERO,
        };
        base.set_size(Size::ZERO);
        base
    }

    /// Widget ID.
    #[must_use]
    pub const fn id(&self) -> WidgetId {
        self.id
    }

    /// Widget name. Names need not be unique.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bounding rect in the owner's space.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Anchor point; unresolved center coordinates read as 0.
    #[must_use]
    pub const fn pos(&self) -> Point {
        Point::new(self.placement.x.or_zero(), self.placement.y.or_zero())
    }

    /// Anchor of the rect placed at [`WidgetBase::pos`].
    #[must_use]
    pub const fn anchor(&self) -> Anchor {
        self.placement.anchor
    }

    /// Resizes the rect around the anchor point.
    pub fn set_size(&mut self, size: Size) {
        self.rect = Rect::anchored(size, self.placement.anchor, self.pos());
    }

    /// Moves the anchor point to `pos`.
    pub fn set_pos(&mut self, pos: Point) {
        self.placement.x = Coord::Px(pos.x);
        self.placement.y = Coord::Px(pos.y);
        self.set_size(self.rect.size());
    }

    /// Translates the widget.
    pub fn move_by(&mut self, delta: Point) {
        self.set_pos(self.pos().offset(delta));
    }

    /// Resolves center coordinates against the owner's surface size.
    pub fn resolve(&mut self, viewport: Size) {
        if self.placement.x == Coord::Center {
            self.placement.x = Coord::Px(viewport.width / 2);
        }
        if self.placement.y == Coord::Center {
            self.placement.y = Coord::Px(viewport.height / 2);
        }
        self.set_size(self.rect.size());
    }
}

/// What a widget may ask of its owner while handling an event.
#[derive(Debug, Clone, Default)]
pub struct EventCtx {
    pointer: Option<Point>,
    redraw: bool,
    raise: bool,
}

impl EventCtx {
    /// Context with the pointer at `pointer` (owner space, `None` when
    /// the pointer is outside the owner).
    #[must_use]
    pub const fn new(pointer: Option<Point>) -> Self {
        Self {
            pointer,
            redraw: false,
            raise: false,
        }
    }

    /// Pointer position in the owner's space.
    #[must_use]
    pub const fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// True when the pointer is inside `rect`.
    #[must_use]
    pub fn pointer_in(&self, rect: Rect) -> bool {
        self.pointer.is_some_and(|p| rect.contains(p))
    }

    /// Asks for the next render pass to repaint.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Asks the owner to move the calling widget to the front.
    pub fn raise(&mut self) {
        self.raise = true;
    }

    /// Whether a redraw was requested.
    #[must_use]
    pub const fn redraw_requested(&self) -> bool {
        self.redraw
    }

    /// Whether a raise was requested.
    #[must_use]
    pub const fn raise_requested(&self) -> bool {
        self.raise
    }

    /// Fresh context for a child, with the pointer in the child's space.
    #[must_use]
    pub const fn child(&self, pointer: Option<Point>) -> Self {
        Self::new(pointer)
    }

    /// Carries a child's redraw request up. Raise requests stay with the
    /// container that owns the child.
    pub fn absorb(&mut self, child: &Self) {
        self.redraw |= child.redraw;
    }
}

/// Type-erasure helper so applications can get concrete widgets back.
pub trait AsAny: Any {
    /// Upcast to [`Any`].
    fn as_any(&self) -> &dyn Any;
    /// Mutable upcast to [`Any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Base trait for all widgets.
pub trait Widget: AsAny {
    /// Returns the widget's common state.
    fn base(&self) -> &WidgetBase;

    /// Returns mutable access to the widget's common state.
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Widget category.
    fn kind(&self) -> WidgetKind;

    /// Offers a raw event.
    ///
    /// Returns [`Outcome::Unconsumed`] to let the owner keep looking, or
    /// [`Outcome::Consumed`] to claim it.
    fn handle_event(&mut self, event: &RawEvent, ctx: &mut EventCtx) -> Outcome;

    /// Paints the widget. Must not change any state.
    fn render(&self, surface: &mut dyn Surface);

    /// Drops hover/press/focus visuals without emitting events.
    fn deactivate(&mut self, ctx: &mut EventCtx) {
        let _ = ctx;
    }

    /// Called when the widget is added to an owner whose surface is
    /// `viewport` big.
    fn attach(&mut self, viewport: Size) {
        self.base_mut().resolve(viewport);
    }

    /// Translates the widget and everything it owns.
    fn move_by(&mut self, delta: Point) {
        self.base_mut().move_by(delta);
    }

    /// Widget ID.
    fn id(&self) -> WidgetId {
        self.base().id()
    }

    /// Widget name.
    fn name(&self) -> &str {
        self.base().name()
    }

    /// Bounding rect in the owner's space.
    fn rect(&self) -> Rect {
        self.base().rect()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use ember_core::{BlockFont, Color, Image, Theme};

    /// Plain theme with an 8px block font (4px per glyph, 8px lines).
    pub fn plain_theme() -> Theme {
        Theme::plain(Arc::new(BlockFont::new(8)), 8)
    }

    /// 3x3 nine-patch tile (1px border cells).
    pub fn tile() -> Image {
        Image::filled(ember_core::Size::new(3, 3), Color::rgb(90, 90, 90))
    }

    /// Plain theme with bordered buttons, menus and a usable scroll bar.
    pub fn framed_theme() -> Theme {
        use ember_core::Decoration;
        let deco = || Decoration::Image(Arc::new(tile()));
        let mut theme = plain_theme();
        theme.button.default = deco();
        theme.button.hover = deco();
        theme.button.click = deco();
        theme.menu.border = deco();
        theme.menu.entry_default = deco();
        theme.menu.entry_hover = deco();
        theme.menu.entry_click = deco();
        theme.scroll_bar.border = deco();
        theme.scroll_bar.default = deco();
        theme.scroll_bar.hover = deco();
        theme.scroll_bar.click = deco();
        theme.window.border = deco();
        theme.window_bar = theme.button.clone();
        theme
    }
}
