use std::sync::Arc;

use ember_core::{ninepatch, Color, ConfigResult, Font, Image, Point, Rect, Size, Surface, Theme};

use super::{EventCtx, Placement, Widget, WidgetBase};
use crate::event::{Action, Outcome, UiEvent, WidgetKind};
use crate::input::{Key, MouseButton, RawEvent};

/// Single-line text entry showing `"<prompt>: <text>"`.
///
/// Focus takes a press and a release inside the box. While focused, keys
/// edit the text at the cursor and Enter submits it.
#[derive(Debug)]
pub struct TextInputBox {
    base: WidgetBase,
    font: Arc<dyn Font>,
    antialias: bool,
    color: Color,
    backing: Image,
    cell: Size,
    display: Image,
    prompt: String,
    text: String,
    max_chars: usize,
    cursor: usize,
    focused: bool,
    held: bool,
}

impl TextInputBox {
    /// Builds a text input holding at most `max_chars` characters. The
    /// cursor starts at the end of `text`.
    ///
    /// # Errors
    ///
    /// [`ember_core::ConfigError::MissingFont`] when the theme has no font.
    pub fn new(
        theme: &Theme,
        placement: Placement,
        name: impl Into<String>,
        prompt: impl Into<String>,
        text: impl Into<String>,
        max_chars: usize,
    ) -> ConfigResult<Self> {
        let font = Arc::clone(theme.font.face(WidgetKind::TextInput.as_str())?);
        let prompt = prompt.into();
        let text: String = text.into();

        let sizing = format!("{prompt}: {}", "0".repeat(max_chars + 1));
        let inner = Size::new(font.measure(&sizing).width, font.line_height());
        let (backing, cell) = match theme.input.border.image() {
            Some(border) => {
                let cell = ninepatch::border_size(border);
                let size = Size::new(inner.width + cell.width * 2, inner.height + cell.height * 2);
                (ninepatch::stretch(border, size), cell)
            }
            None => (Image::new(inner), Size::ZERO),
        };

        let mut base = WidgetBase::new(name, placement);
        base.set_size(backing.size());
        let mut input = Self {
            base,
            font,
            antialias: theme.font.antialias,
            color: theme.input.text_color,
            backing,
            cell,
            display: Image::new(Size::ZERO),
            prompt,
            cursor: text.chars().count(),
            text,
            max_chars,
            focused: false,
            held: false,
        };
        input.rebuild();
        Ok(input)
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position, in characters.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// True while keys go to this box.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.text.char_indices().nth(chars).map_or(self.text.len(), |(i, _)| i)
    }

    fn set_focus(&mut self, focused: bool, ctx: &mut EventCtx) {
        if self.focused != focused {
            self.focused = focused;
            tracing::debug!(input = %self.base.name(), focused, "text input focus");
            self.rebuild();
            ctx.request_redraw();
        }
    }

    fn rebuild(&mut self) {
        let head = format!("{}: ", self.prompt);
        if !self.focused {
            self.display = self.font.render(&format!("{head}{}", self.text), self.color, self.antialias);
            return;
        }
        self.display = self.font.render(&format!("{head}{} ", self.text), self.color, self.antialias);
        let before = &self.text[..self.byte_index(self.cursor)];
        let x = self.font.measure(&head).width + self.font.measure(before).width;
        self.display
            .fill_rect(Rect::new(x, 0, 1, self.font.line_height()), self.color.inverted());
    }

    fn edit(&mut self, key: Key, typed: Option<char>) -> Option<UiEvent> {
        let len = self.len();
        match key {
            Key::Backspace if self.cursor > 0 => {
                let at = self.byte_index(self.cursor - 1);
                self.text.remove(at);
                self.cursor -= 1;
            }
            Key::Delete if self.cursor < len => {
                let at = self.byte_index(self.cursor);
                self.text.remove(at);
            }
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = len,
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            Key::Right => self.cursor = (self.cursor + 1).min(len),
            Key::Enter => {
                let text = std::mem::take(&mut self.text);
                self.cursor = 0;
                tracing::debug!(input = %self.base.name(), "submit");
                return Some(UiEvent::new(WidgetKind::TextInput, self.base.name(), Action::Submit { text }));
            }
            Key::Backspace | Key::Delete => {}
            _ => {
                if let Some(ch) = typed.filter(|c| !c.is_control()) {
                    if len < self.max_chars {
                        let at = self.byte_index(self.cursor);
                        self.text.insert(at, ch);
                        self.cursor += 1;
                    }
                }
            }
        }
        None
    }
}

impl Widget for TextInputBox {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::TextInput
    }

    fn handle_event(&mut self, event: &RawEvent, ctx: &mut EventCtx) -> Outcome {
        let inside = ctx.pointer_in(self.base.rect());
        match *event {
            RawEvent::PointerDown { button, .. } => {
                if !inside {
                    self.held = false;
                    self.set_focus(false, ctx);
                    Outcome::Unconsumed
                } else if button == MouseButton::Left {
                    self.held = true;
                    ctx.raise();
                    ctx.request_redraw();
                    Outcome::SWALLOWED
                } else {
                    Outcome::Unconsumed
                }
            }
            RawEvent::PointerUp { button, .. } => {
                if !inside {
                    self.held = false;
                    self.set_focus(false, ctx);
                    Outcome::Unconsumed
                } else if button == MouseButton::Left {
                    ctx.raise();
                    if self.held {
                        self.set_focus(true, ctx);
                    }
                    self.held = false;
                    Outcome::SWALLOWED
                } else {
                    Outcome::Unconsumed
                }
            }
            RawEvent::KeyDown { key, text } if self.focused => {
                let submitted = self.edit(key, text);
                self.rebuild();
                ctx.request_redraw();
                Outcome::Consumed(submitted)
            }
            _ => Outcome::Unconsumed,
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let at = self.base.rect().top_left();
        surface.blit(&self.backing, at);
        surface.blit(&self.display, at.offset(Point::new(self.cell.width, self.cell.height)));
    }

    fn deactivate(&mut self, ctx: &mut EventCtx) {
        self.held = false;
        self.set_focus(false, ctx);
    }
}
