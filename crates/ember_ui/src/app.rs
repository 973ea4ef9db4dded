//! Root container: owns the top-level widgets, the dirty flag and the
//! emitted event stream.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use ember_core::{Color, Point, Size, Surface, Theme, ThemeRegistry};

use crate::config::AppConfig;
use crate::container::WidgetList;
use crate::event::UiEvent;
use crate::input::RawEvent;
use crate::widget::{EventCtx, Widget, WidgetId};

/// Top of the widget tree.
///
/// One frame is [`App::dispatch`] followed by [`App::render`], or both at
/// once through [`App::step`]. The surface is only repainted when
/// something changed since the last paint.
#[derive(Debug)]
pub struct App {
    widgets: WidgetList,
    background: Color,
    themes: ThemeRegistry,
    pointer: Option<Point>,
    dirty: bool,
    subscribers: Vec<Sender<UiEvent>>,
}

impl App {
    /// Creates an app for a surface of `size`. The first render always
    /// paints.
    #[must_use]
    pub fn new(size: Size, theme: Theme) -> Self {
        Self {
            widgets: WidgetList::new(size),
            background: Color::BLACK,
            themes: ThemeRegistry::new(theme),
            pointer: None,
            dirty: true,
            subscribers: Vec::new(),
        }
    }

    /// Creates an app from loaded settings.
    #[must_use]
    pub fn from_config(config: &AppConfig, theme: Theme) -> Self {
        let mut app = Self::new(config.size(), theme);
        app.background = config.background;
        app
    }

    /// Surface size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.widgets.viewport()
    }

    /// Top-level widgets, front to back.
    #[must_use]
    pub const fn widgets(&self) -> &WidgetList {
        &self.widgets
    }

    /// Theme new widgets should be built from.
    #[must_use]
    pub fn theme(&self) -> Arc<Theme> {
        self.themes.current()
    }

    /// Replaces the current theme and returns the old one. Widgets that
    /// are already built keep their looks.
    pub fn swap_theme(&self, theme: Theme) -> Arc<Theme> {
        tracing::debug!("theme swapped");
        self.themes.swap(theme)
    }

    /// Adds a widget at the front.
    pub fn add(&mut self, widget: Box<dyn Widget>) -> WidgetId {
        self.dirty = true;
        self.widgets.add(widget)
    }

    /// Removes the frontmost widget called `name`. Absent names are a
    /// no-op.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Widget>> {
        let removed = self.widgets.remove(name);
        self.dirty |= removed.is_some();
        removed
    }

    /// Raises a widget to the front.
    pub fn move_to_front(&mut self, id: WidgetId) -> bool {
        let moved = self.widgets.move_to_front(id);
        self.dirty |= moved;
        moved
    }

    /// Forces a repaint on the next render.
    pub fn force_update(&mut self) {
        self.dirty = true;
    }

    /// True when the next render will paint.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Widget by ID, as its concrete type.
    #[must_use]
    pub fn widget<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.widgets.widget(id)
    }

    /// Mutable widget by ID, as its concrete type. Marks the app dirty,
    /// since the caller may change how it looks.
    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        let widget = self.widgets.widget_mut(id)?;
        self.dirty = true;
        Some(widget)
    }

    /// Registers a receiver for every event [`App::dispatch`] emits.
    pub fn subscribe(&mut self) -> Receiver<UiEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Routes a batch of raw events in arrival order.
    ///
    /// Each event goes to the widgets front to back until one consumes it.
    /// The consumer's siblings are then deactivated, so a focus or hover
    /// left on a widget behind it does not linger.
    /// Returns the semantic events produced, which are also sent to every
    /// subscriber.
    pub fn dispatch(&mut self, events: impl IntoIterator<Item = RawEvent>) -> Vec<UiEvent> {
        let mut emitted = Vec::new();

        for event in events {
            if let Some(pos) = event.pointer_pos() {
                self.pointer = Some(pos);
            }
            let mut ctx = EventCtx::new(self.pointer);
            let consumer = self.widgets.offer(&event, &mut ctx);
            if let Some((id, _)) = &consumer {
                self.widgets.deactivate_except(Some(*id), &mut ctx);
            }
            self.dirty |= ctx.redraw_requested();

            let Some((_, outcome)) = consumer else {
                continue;
            };
            self.dirty = true;
            if let Some(ui_event) = outcome.into_event() {
                tracing::debug!(kind = %ui_event.kind, name = %ui_event.name, "ui event");
                self.broadcast(&ui_event);
                emitted.push(ui_event);
            }
        }
        emitted
    }

    /// Paints everything if dirty. Returns whether it painted.
    pub fn render(&mut self, surface: &mut dyn Surface) -> bool {
        if !self.dirty {
            return false;
        }
        surface.fill(self.background);
        self.widgets.render(surface);
        self.dirty = false;
        tracing::trace!(widgets = self.widgets.len(), "frame painted");
        true
    }

    /// One frame: dispatch `events`, then render if needed.
    pub fn step(&mut self, events: impl IntoIterator<Item = RawEvent>, surface: &mut dyn Surface) -> Vec<UiEvent> {
        let emitted = self.dispatch(events);
        self.render(surface);
        emitted
    }

    fn broadcast(&mut self, event: &UiEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
