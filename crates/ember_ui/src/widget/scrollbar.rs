use ember_core::{ninepatch, Axis, ConfigResult, Image, Point, Rect, Size, Surface, Theme};

use super::face::{Face, Visual};
use super::{EventCtx, Placement, Widget, WidgetBase};
use crate::event::{Outcome, WidgetKind};
use crate::input::{MouseButton, RawEvent};

/// Scroll bar over `total` pixels of content of which `view` are visible.
///
/// The handle offset (`current`) runs from 0 to [`ScrollBar::max_value`];
/// [`ScrollBar::value`] maps it onto the scrollable content range.
#[derive(Debug)]
pub struct ScrollBar {
    base: WidgetBase,
    axis: Axis,
    total: i32,
    view: i32,
    track: Image,
    cell: Size,
    handle: Face,
    current: i32,
    max: i32,
    dragging: bool,
}

impl ScrollBar {
    /// Builds a scroll bar. The track is `view` long along `axis`.
    ///
    /// # Errors
    ///
    /// [`ember_core::ConfigError::MissingImage`] unless the theme has all
    /// four scroll bar images.
    pub fn new(
        theme: &Theme,
        placement: Placement,
        name: impl Into<String>,
        axis: Axis,
        total: i32,
        view: i32,
        start: i32,
    ) -> ConfigResult<Self> {
        let widget = WidgetKind::ScrollBar.as_str();
        let look = &theme.scroll_bar;
        let border = look.border.require(widget, "border")?;
        let default = look.default.require(widget, "default")?;
        let hover = look.hover.require(widget, "hover")?;
        let click = look.click.require(widget, "click")?;

        let cell = ninepatch::border_size(border);
        let track = ninepatch::stretch(
            border,
            match axis {
                Axis::Horizontal => Size::new(view, cell.height * 5),
                Axis::Vertical => Size::new(cell.width * 5, view),
            },
        );
        let area = Size::new(track.width() - cell.width * 2, track.height() - cell.height * 2);

        let length = handle_length(area.along(axis), total).max(default.size().along(axis));
        let handle_size = match axis {
            Axis::Horizontal => Size::new(length, area.height),
            Axis::Vertical => Size::new(area.width, length),
        };
        let handle = Face::from_images(
            ninepatch::stretch(default, handle_size),
            ninepatch::stretch(hover, handle_size),
            ninepatch::stretch(click, handle_size),
        );
        let max = (area.along(axis) - handle.size().along(axis)).max(0);

        let mut base = WidgetBase::new(name, placement);
        base.set_size(track.size());
        Ok(Self {
            base,
            axis,
            total,
            view,
            track,
            cell,
            handle,
            current: start.clamp(0, max),
            max,
            dragging: false,
        })
    }

    /// Axis the handle moves along.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Handle offset in pixels.
    #[must_use]
    pub const fn current(&self) -> i32 {
        self.current
    }

    /// Largest handle offset.
    #[must_use]
    pub const fn max_value(&self) -> i32 {
        self.max
    }

    /// True while the handle is being dragged.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Content offset the handle position stands for, from 0 to
    /// `total - view`.
    #[must_use]
    pub fn value(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        let range = (self.total - self.view).max(0) as f32;
        range * self.current as f32 / self.max as f32
    }

    /// Handle rect in the owner's space.
    #[must_use]
    pub fn handle_rect(&self) -> Rect {
        let offset = match self.axis {
            Axis::Horizontal => Point::new(self.current, 0),
            Axis::Vertical => Point::new(0, self.current),
        };
        let origin = self
            .base
            .rect()
            .top_left()
            .offset(Point::new(self.cell.width, self.cell.height))
            .offset(offset);
        Rect::from_pos_size(origin, self.handle.size())
    }

    fn scroll_to(&mut self, value: i32) {
        self.current = value.clamp(0, self.max);
    }

    fn show(&mut self, visual: Visual, ctx: &mut EventCtx) {
        if self.handle.set(visual) {
            ctx.request_redraw();
        }
    }
}

fn handle_length(area: i32, total: i32) -> i32 {
    if total <= 0 {
        return area;
    }
    let length = i64::from(area) * i64::from(area) / i64::from(total);
    i32::try_from(length).unwrap_or(i32::MAX)
}

impl Widget for ScrollBar {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::ScrollBar
    }

    fn handle_event(&mut self, event: &RawEvent, ctx: &mut EventCtx) -> Outcome {
        let on_handle = ctx.pointer_in(self.handle_rect());
        let hover = match (self.dragging, on_handle) {
            (true, _) => Visual::Pressed,
            (false, true) => Visual::Hovered,
            (false, false) => Visual::Idle,
        };
        self.show(hover, ctx);

        match *event {
            RawEvent::PointerDown {
                button: MouseButton::WheelUp,
                ..
            } => {
                self.scroll_to(self.current - 1);
                ctx.request_redraw();
                Outcome::SWALLOWED
            }
            RawEvent::PointerDown {
                button: MouseButton::WheelDown,
                ..
            } => {
                self.scroll_to(self.current + 1);
                ctx.request_redraw();
                Outcome::SWALLOWED
            }
            RawEvent::PointerDown {
                button: MouseButton::Left,
                ..
            } if on_handle => {
                self.dragging = true;
                self.show(Visual::Pressed, ctx);
                ctx.raise();
                Outcome::SWALLOWED
            }
            RawEvent::PointerUp { button, .. } => {
                if self.dragging {
                    self.dragging = false;
                    self.show(if on_handle { Visual::Hovered } else { Visual::Idle }, ctx);
                    Outcome::SWALLOWED
                } else if button.is_wheel() {
                    Outcome::SWALLOWED
                } else {
                    Outcome::Unconsumed
                }
            }
            RawEvent::PointerMove { delta, .. } if self.dragging => {
                self.scroll_to(self.current + delta.along(self.axis));
                ctx.request_redraw();
                Outcome::SWALLOWED
            }
            _ => Outcome::Unconsumed,
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.blit(&self.track, self.base.rect().top_left());
        surface.blit(self.handle.current(), self.handle_rect().top_left());
    }

    fn deactivate(&mut self, ctx: &mut EventCtx) {
        self.dragging = false;
        self.show(Visual::Idle, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::testing::{framed_theme, plain_theme};

    fn wheel(button: MouseButton) -> RawEvent {
        RawEvent::PointerDown { button, pos: Point::new(500, 500) }
    }

    fn offer(bar: &mut ScrollBar, event: RawEvent) -> Outcome {
        let mut ctx = EventCtx::new(event.pointer_pos());
        bar.handle_event(&event, &mut ctx)
    }

    /// Vertical bar: track 5x50, 48px of travel area, handle 48*48/100 = 23.
    fn bar() -> ScrollBar {
        ScrollBar::new(&framed_theme(), Placement::at(0, 0), "bar", Axis::Vertical, 100, 50, 0).unwrap()
    }

    #[test]
    fn test_geometry() {
        let bar = bar();
        assert_eq!(bar.rect(), Rect::new(0, 0, 5, 50));
        assert_eq!(bar.handle_rect(), Rect::new(1, 1, 3, 23));
        assert_eq!(bar.max_value(), 25);
    }

    #[test]
    fn test_wheel_clamps() {
        let mut bar = bar();

        for _ in 0..40 {
            assert_eq!(offer(&mut bar, wheel(MouseButton::WheelDown)), Outcome::SWALLOWED);
        }
        assert_eq!(bar.current(), bar.max_value());
        assert!((bar.value() - 50.0).abs() < f32::EPSILON);

        assert!(offer(&mut bar, wheel(MouseButton::WheelUp)).is_consumed());
        assert_eq!(bar.current(), 24);
        assert_eq!(
            offer(&mut bar, RawEvent::PointerUp { button: MouseButton::WheelUp, pos: Point::ZERO }),
            Outcome::SWALLOWED
        );
    }

    #[test]
    fn test_value_is_monotonic() {
        let mut bar = bar();
        let mut last = bar.value();
        for _ in 0..bar.max_value() {
            let _ = offer(&mut bar, wheel(MouseButton::WheelDown));
            assert!(bar.value() >= last);
            last = bar.value();
        }
    }

    #[test]
    fn test_drag() {
        let mut bar = bar();

        let press = RawEvent::PointerDown { button: MouseButton::Left, pos: Point::new(2, 5) };
        let mut ctx = EventCtx::new(Some(Point::new(2, 5)));
        assert_eq!(bar.handle_event(&press, &mut ctx), Outcome::SWALLOWED);
        assert!(bar.is_dragging());
        assert!(ctx.raise_requested());

        let drag = RawEvent::PointerMove { delta: Point::new(40, 10), pos: Point::new(42, 15) };
        assert_eq!(offer(&mut bar, drag), Outcome::SWALLOWED);
        assert_eq!(bar.current(), 10);

        let far = RawEvent::PointerMove { delta: Point::new(0, 500), pos: Point::new(42, 515) };
        let _ = offer(&mut bar, far);
        assert_eq!(bar.current(), 25);

        let release = RawEvent::PointerUp { button: MouseButton::Left, pos: Point::new(42, 515) };
        assert_eq!(offer(&mut bar, release), Outcome::SWALLOWED);
        assert!(!bar.is_dragging());
        assert_eq!(offer(&mut bar, release), Outcome::Unconsumed);
    }

    #[test]
    fn test_press_off_handle_passes() {
        let mut bar = bar();
        let press = RawEvent::PointerDown { button: MouseButton::Left, pos: Point::new(2, 40) };
        assert_eq!(offer(&mut bar, press), Outcome::Unconsumed);
        assert!(!bar.is_dragging());
    }

    #[test]
    fn test_no_travel_means_no_value() {
        let bar = ScrollBar::new(&framed_theme(), Placement::at(0, 0), "bar", Axis::Horizontal, 10, 50, 3).unwrap();
        assert_eq!(bar.max_value(), 0);
        assert_eq!(bar.current(), 0);
        assert!(bar.value().abs() < f32::EPSILON);
    }

    #[test]
    fn test_requires_images() {
        let err = ScrollBar::new(&plain_theme(), Placement::at(0, 0), "bar", Axis::Vertical, 10, 10, 0).unwrap_err();
        assert!(matches!(
            err,
            ember_core::ConfigError::MissingImage { slot: "border", .. }
        ));
    }
}
