use ember_core::{ConfigResult, Image, Surface, Theme};

use super::face::{caption, Face, Visual};
use super::{EventCtx, Placement, Widget, WidgetBase};
use crate::event::{Outcome, UiEvent, WidgetKind};
use crate::input::{MouseButton, RawEvent};

/// Optional button settings.
#[derive(Debug, Clone, Default)]
pub struct ButtonOptions {
    /// Icon drawn in front of the text.
    pub icon: Option<Image>,
    /// Forced outer width (framed looks only).
    pub width: Option<i32>,
    /// Forced outer height (framed looks only).
    pub height: Option<i32>,
}

impl ButtonOptions {
    /// Forces the outer width.
    #[must_use]
    pub fn width(mut self, width: i32) -> Self {
        self.width = Some(width);
        self
    }

    /// Forces the outer height.
    #[must_use]
    pub fn height(mut self, height: i32) -> Self {
        self.height = Some(height);
        self
    }
}

/// Push button: emits [`crate::Action::Click`] on press and release inside.
#[derive(Debug)]
pub struct Button {
    base: WidgetBase,
    text: String,
    face: Face,
    held: bool,
}

impl Button {
    /// Builds a button with the theme's button look.
    ///
    /// # Errors
    ///
    /// [`ember_core::ConfigError::MissingFont`] when the theme has no font.
    pub fn new(
        theme: &Theme,
        placement: Placement,
        name: impl Into<String>,
        text: impl Into<String>,
        options: ButtonOptions,
    ) -> ConfigResult<Self> {
        let text = text.into();
        let font = theme.font.face(WidgetKind::Button.as_str())?;
        let content = caption(
            font.as_ref(),
            theme.font.antialias,
            &text,
            theme.button.text_color,
            options.icon.as_ref(),
        );
        let face = Face::build(&theme.button, &content, options.width, options.height);

        let mut base = WidgetBase::new(name, placement);
        base.set_size(face.size());
        Ok(Self {
            base,
            text,
            face,
            held: false,
        })
    }

    /// Button text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Visual currently showing.
    #[must_use]
    pub const fn visual(&self) -> Visual {
        self.face.visual()
    }

    /// True between a press inside and the matching release.
    #[must_use]
    pub const fn is_held(&self) -> bool {
        self.held
    }

    fn show(&mut self, visual: Visual, ctx: &mut EventCtx) {
        if self.face.set(visual) {
            ctx.request_redraw();
        }
    }
}

impl Widget for Button {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Button
    }

    fn handle_event(&mut self, event: &RawEvent, ctx: &mut EventCtx) -> Outcome {
        let inside = ctx.pointer_in(self.base.rect());
        let hover = match (inside, self.held) {
            (true, true) => Visual::Pressed,
            (true, false) => Visual::Hovered,
            (false, _) => Visual::Idle,
        };
        self.show(hover, ctx);

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
                if inside {
                    self.show(Visual::Hovered, ctx);
                    ctx.raise();
                    tracing::trace!(button = %self.base.name(), "click");
                    Outcome::emit(UiEvent::click(WidgetKind::Button, self.base.name()))
                } else {
                    self.show(Visual::Idle, ctx);
                    Outcome::SWALLOWED
                }
            }
            _ => Outcome::Unconsumed,
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.blit(self.face.current(), self.base.rect().top_left());
    }

    fn deactivate(&mut self, ctx: &mut EventCtx) {
        self.held = false;
        self.show(Visual::Idle, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::testing::{framed_theme, plain_theme};
    use ember_core::{Point, Rect};

    fn down(x: i32, y: i32) -> RawEvent {
        RawEvent::PointerDown { button: MouseButton::Left, pos: Point::new(x, y) }
    }

    fn up(x: i32, y: i32) -> RawEvent {
        RawEvent::PointerUp { button: MouseButton::Left, pos: Point::new(x, y) }
    }

    fn offer(button: &mut Button, event: RawEvent) -> (Outcome, EventCtx) {
        let mut ctx = EventCtx::new(event.pointer_pos());
        let outcome = button.handle_event(&event, &mut ctx);
        (outcome, ctx)
    }

    fn ok_button() -> Button {
        let options = ButtonOptions::default().width(100).height(20);
        Button::new(&framed_theme(), Placement::at(0, 0), "ok", "OK", options).unwrap()
    }

    #[test]
    fn test_hover_press_click() {
        let mut button = ok_button();
        assert_eq!(button.rect(), Rect::new(0, 0, 100, 20));

        let (outcome, ctx) = offer(
            &mut button,
            RawEvent::PointerMove { delta: Point::new(50, 10), pos: Point::new(50, 10) },
        );
        assert_eq!(outcome, Outcome::Unconsumed);
        assert_eq!(button.visual(), Visual::Hovered);
        assert!(ctx.redraw_requested());

        let (outcome, ctx) = offer(&mut button, down(50, 10));
        assert_eq!(outcome, Outcome::SWALLOWED);
        assert_eq!(button.visual(), Visual::Pressed);
        assert!(ctx.raise_requested());

        let (outcome, _) = offer(&mut button, up(50, 10));
        assert_eq!(outcome, Outcome::emit(UiEvent::click(WidgetKind::Button, "ok")));
        assert_eq!(button.visual(), Visual::Hovered);
        assert!(!button.is_held());
    }

    #[test]
    fn test_release_outside_cancels() {
        let mut button = ok_button();

        let _ = offer(&mut button, down(5, 5));
        let (outcome, ctx) = offer(&mut button, up(300, 5));

        assert_eq!(outcome, Outcome::SWALLOWED);
        assert_eq!(button.visual(), Visual::Idle);
        assert!(!ctx.raise_requested());
    }

    #[test]
    fn test_outside_events_pass_through() {
        let mut button = ok_button();

        assert_eq!(offer(&mut button, down(200, 200)).0, Outcome::Unconsumed);
        assert_eq!(offer(&mut button, up(200, 200)).0, Outcome::Unconsumed);
        let (outcome, ctx) = offer(&mut button, RawEvent::KeyDown { key: crate::Key::Enter, text: None });
        assert_eq!(outcome, Outcome::Unconsumed);
        assert!(!ctx.redraw_requested());
    }

    #[test]
    fn test_repeated_hover_does_not_redraw() {
        let mut button = ok_button();
        let hover = RawEvent::PointerMove { delta: Point::new(1, 0), pos: Point::new(10, 10) };

        assert!(offer(&mut button, hover).1.redraw_requested());
        assert!(!offer(&mut button, hover).1.redraw_requested());
    }

    #[test]
    fn test_deactivate_resets() {
        let mut button = ok_button();
        let _ = offer(&mut button, down(5, 5));

        let mut ctx = EventCtx::default();
        button.deactivate(&mut ctx);

        assert_eq!(button.visual(), Visual::Idle);
        assert!(!button.is_held());
        assert!(ctx.redraw_requested());
    }

    #[test]
    fn test_plain_button_uses_bare_text() {
        let button = Button::new(&plain_theme(), Placement::at(0, 0), "b", "abc", ButtonOptions::default()).unwrap();
        assert_eq!(button.rect(), Rect::new(0, 0, 12, 8));
        assert_eq!(button.text(), "abc");
    }
}
