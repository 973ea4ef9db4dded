use std::sync::Arc;

use ember_core::{Anchor, ConfigResult, Font, Image, Point, Region, Size, Surface, Theme};

use super::face::{caption, Face, Visual};
use super::{Button, ButtonOptions, EventCtx, Placement, Widget, WidgetBase, WidgetId};
use crate::container::WidgetList;
use crate::event::{Outcome, WidgetKind};
use crate::input::{MouseButton, RawEvent};

/// Title bar of a [`Window`]: drag handle plus a minimize/restore toggle.
#[derive(Debug)]
pub struct WindowBar {
    base: WidgetBase,
    face: Face,
    minimize: Button,
    restore: Button,
    minimized: bool,
    held: bool,
    drag: Point,
}

impl WindowBar {
    /// Builds a bar `width` wide whose bottom edge is centered on `at`.
    ///
    /// # Errors
    ///
    /// [`ember_core::ConfigError::MissingFont`] when the theme has no font.
    pub fn new(theme: &Theme, at: Point, width: i32, text: &str, icon: Option<&Image>) -> ConfigResult<Self> {
        let font: &Arc<dyn Font> = theme.font.face(WidgetKind::WindowBar.as_str())?;
        let content = caption(font.as_ref(), theme.font.antialias, text, theme.window_bar.text_color, icon);
        let face = Face::build(&theme.window_bar, &content, Some(width), None);

        let mut base = WidgetBase::new("", Placement::from(at).with_anchor(Anchor::MidBottom));
        base.set_size(face.size());

        let toggle = |label: &str, width: Option<i32>| {
            let options = ButtonOptions {
                width,
                ..ButtonOptions::default()
            };
            Button::new(theme, Placement::at(0, 0).with_anchor(Anchor::MidRight), label, label, options)
        };
        let natural = toggle("_", None)?.rect().width.max(toggle("+", None)?.rect().width);

        let mut bar = Self {
            base,
            face,
            minimize: toggle("_", Some(natural))?,
            restore: toggle("+", Some(natural))?,
            minimized: false,
            held: false,
            drag: Point::ZERO,
        };
        bar.place(at);
        Ok(bar)
    }

    /// True while the window body is hidden.
    #[must_use]
    pub const fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// The toggle button currently showing.
    #[must_use]
    pub const fn toggle(&self) -> &Button {
        if self.minimized {
            &self.restore
        } else {
            &self.minimize
        }
    }

    /// Movement dragged since the last call.
    pub fn take_drag(&mut self) -> Point {
        std::mem::take(&mut self.drag)
    }

    /// Puts the bottom-center of the bar at `at`.
    pub fn place(&mut self, at: Point) {
        self.base.set_pos(at);
        let right = self.base.rect().anchor(Anchor::MidRight);
        self.minimize.base_mut().set_pos(right);
        self.restore.base_mut().set_pos(right);
    }

    fn show(&mut self, visual: Visual, ctx: &mut EventCtx) {
        if self.face.set(visual) {
            ctx.request_redraw();
        }
    }
}

impl Widget for WindowBar {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::WindowBar
    }

    fn handle_event(&mut self, event: &RawEvent, ctx: &mut EventCtx) -> Outcome {
        let inside = ctx.pointer_in(self.base.rect());
        let hover = match (inside, self.held) {
            (true, true) => Visual::Pressed,
            (true, false) => Visual::Hovered,
            (false, _) => Visual::Idle,
        };
        self.show(hover, ctx);

        let toggle = if self.minimized { &mut self.restore } else { &mut self.minimize };
        let mut child = ctx.child(ctx.pointer());
        let outcome = toggle.handle_event(event, &mut child);
        ctx.absorb(&child);
        if outcome.is_consumed() {
            ctx.raise();
            if outcome.into_event().is_some() {
                self.minimized = !self.minimized;
                tracing::debug!(minimized = self.minimized, "window bar toggled");
                ctx.request_redraw();
            }
            return Outcome::SWALLOWED;
        }

        match *event {
            RawEvent::PointerDown {
                button: MouseButton::Left,
                ..
            } if inside => {
                self.held = true;
                self.show(Visual::Pressed, ctx);
                ctx.raise();
                Outcome::SWALLOWED
            }
            RawEvent::PointerUp {
                button: MouseButton::Left,
                ..
            } if self.held => {
                self.held = false;
                self.show(if inside { Visual::Hovered } else { Visual::Idle }, ctx);
                ctx.raise();
                Outcome::SWALLOWED
            }
            RawEvent::PointerMove { delta, .. } if self.held => {
                self.move_by(delta);
                self.drag = self.drag.offset(delta);
                ctx.request_redraw();
                Outcome::SWALLOWED
            }
            _ => Outcome::Unconsumed,
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.blit(self.face.current(), self.base.rect().top_left());
        self.toggle().render(surface);
    }

    fn deactivate(&mut self, ctx: &mut EventCtx) {
        self.held = false;
        self.show(Visual::Idle, ctx);
        self.minimize.deactivate(ctx);
        self.restore.deactivate(ctx);
    }

    fn move_by(&mut self, delta: Point) {
        self.base.move_by(delta);
        self.minimize.move_by(delta);
        self.restore.move_by(delta);
    }
}

/// Draggable, minimizable window holding its own z-ordered widgets.
///
/// Children are positioned in the window body's space. Events a child
/// produces come out wrapped in [`Action::Sub`].
#[derive(Debug)]
pub struct Window {
    base: WidgetBase,
    bar: WindowBar,
    frame: Image,
    cell: Size,
    body: WidgetList,
}

impl Window {
    /// Builds a window whose body is `size` big.
    ///
    /// # Errors
    ///
    /// [`ember_core::ConfigError::MissingFont`] when the theme has no font
    /// for the title bar.
    pub fn new(
        theme: &Theme,
        placement: Placement,
        name: impl Into<String>,
        size: Size,
        title: &str,
        icon: Option<Image>,
    ) -> ConfigResult<Self> {
        let (frame, cell) = match theme.window.border.image() {
            Some(border) => {
                let cell = ember_core::ninepatch::border_size(border);
                let outer = Size::new(size.width + cell.width * 2, size.height + cell.height * 2);
                (ember_core::ninepatch::stretch(border, outer), cell)
            }
            None => (Image::filled(size, theme.window.background), Size::ZERO),
        };

        let mut base = WidgetBase::new(name, placement);
        base.set_size(frame.size());
        let bar = WindowBar::new(
            theme,
            base.rect().anchor(Anchor::MidTop),
            frame.width(),
            title,
            icon.as_ref(),
        )?;

        Ok(Self {
            base,
            bar,
            frame,
            cell,
            body: WidgetList::new(size),
        })
    }

    /// The title bar.
    #[must_use]
    pub const fn bar(&self) -> &WindowBar {
        &self.bar
    }

    /// True while only the bar is showing.
    #[must_use]
    pub const fn is_minimized(&self) -> bool {
        self.bar.is_minimized()
    }

    /// Adds a child at the front. Its position is relative to the body.
    pub fn add(&mut self, widget: Box<dyn Widget>) -> WidgetId {
        self.body.add(widget)
    }

    /// Removes the frontmost child called `name`.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Widget>> {
        self.body.remove(name)
    }

    /// Moves a child to the front of the window.
    pub fn move_to_front(&mut self, id: WidgetId) -> bool {
        self.body.move_to_front(id)
    }

    /// Children, front to back.
    #[must_use]
    pub const fn children(&self) -> &WidgetList {
        &self.body
    }

    /// Child by ID, as its concrete type.
    #[must_use]
    pub fn widget<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.body.widget(id)
    }

    /// Mutable child by ID, as its concrete type.
    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.body.widget_mut(id)
    }

    /// Top-left corner of the body in the owner's space.
    #[must_use]
    pub fn body_origin(&self) -> Point {
        self.base.rect().top_left().offset(Point::new(self.cell.width, self.cell.height))
    }
}

impl Widget for Window {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Window
    }

    fn handle_event(&mut self, event: &RawEvent, ctx: &mut EventCtx) -> Outcome {
        let mut bar_ctx = ctx.child(ctx.pointer());
        let outcome = self.bar.handle_event(event, &mut bar_ctx);
        ctx.absorb(&bar_ctx);
        let drag = self.bar.take_drag();
        if drag != Point::ZERO {
            self.base.move_by(drag);
        }
        if outcome.is_consumed() {
            ctx.raise();
            return outcome;
        }

        if self.bar.is_minimized() {
            self.body.deactivate_except(None, ctx);
            return Outcome::Unconsumed;
        }

        let inside = ctx.pointer_in(self.base.rect());
        let button_event = matches!(event, RawEvent::PointerDown { .. } | RawEvent::PointerUp { .. });
        if button_event && !inside {
            self.body.deactivate_except(None, ctx);
            return Outcome::Unconsumed;
        }

        let origin = self.body_origin();
        let local = ctx.pointer().filter(|_| inside).map(|p| p.minus(origin));
        let mut body_ctx = ctx.child(local);
        let consumer = self.body.offer(event, &mut body_ctx);
        ctx.absorb(&body_ctx);

        match consumer {
            Some((id, outcome)) => {
                self.body.deactivate_except(Some(id), ctx);
                ctx.raise();
                outcome.map_event(|e| e.within_window(self.base.name()))
            }
            None if button_event => {
                ctx.raise();
                Outcome::SWALLOWED
            }
            None => Outcome::Unconsumed,
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.bar.render(surface);
        if self.bar.is_minimized() {
            return;
        }
        surface.blit(&self.frame, self.base.rect().top_left());
        let mut body = Region::new(&mut *surface, self.body_origin(), self.body.viewport());
        self.body.render(&mut body);
    }

    fn deactivate(&mut self, ctx: &mut EventCtx) {
        self.bar.deactivate(ctx);
        self.body.deactivate_except(None, ctx);
    }

    fn attach(&mut self, viewport: Size) {
        self.base.resolve(viewport);
        self.bar.place(self.base.rect().anchor(Anchor::MidTop));
    }

    fn move_by(&mut self, delta: Point) {
        self.base.move_by(delta);
        self.bar.move_by(delta);
    }
}
