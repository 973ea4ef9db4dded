//! Z-ordered widget list shared by [`crate::App`] and [`crate::Window`].
//!
//! Index 0 is the front: it sees events first and is painted last.

use ember_core::{Size, Surface};

use crate::event::Outcome;
use crate::input::RawEvent;
use crate::widget::{EventCtx, Widget, WidgetId};

/// Owned widgets in z-order.
#[derive(Default)]
pub struct WidgetList {
    widgets: Vec<Box<dyn Widget>>,
    viewport: Size,
}

impl std::fmt::Debug for WidgetList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetList")
            .field("viewport", &self.viewport)
            .field("widgets", &self.widgets.iter().map(|w| w.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl WidgetList {
    /// Creates an empty list for an owner surface of `viewport` size.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            widgets: Vec::with_capacity(16),
            viewport,
        }
    }

    /// Size of the owner surface.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Number of widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// True when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Widgets front to back.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Widget> + '_ {
        self.widgets.iter().map(AsRef::as_ref)
    }

    /// IDs front to back.
    #[must_use]
    pub fn ids(&self) -> Vec<WidgetId> {
        self.widgets.iter().map(|w| w.id()).collect()
    }

    /// Attaches `widget` and puts it at the front.
    pub fn add(&mut self, mut widget: Box<dyn Widget>) -> WidgetId {
        widget.attach(self.viewport);
        let id = widget.id();
        self.widgets.insert(0, widget);
        id
    }

    /// Moves the widget to the front, keeping the others in order.
    /// Returns false if it isn't here.
    pub fn move_to_front(&mut self, id: WidgetId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        if index > 0 {
            let widget = self.widgets.remove(index);
            self.widgets.insert(0, widget);
        }
        true
    }

    /// Removes the frontmost widget called `name`.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Widget>> {
        let index = self.widgets.iter().position(|w| w.name() == name)?;
        Some(self.widgets.remove(index))
    }

    /// Widget by ID.
    #[must_use]
    pub fn get(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.iter().find(|w| w.id() == id)
    }

    /// Mutable widget by ID.
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut (dyn Widget + 'static)> {
        self.widgets.iter_mut().find(|w| w.id() == id).map(AsMut::as_mut)
    }

    /// Widget by ID, as its concrete type.
    #[must_use]
    pub fn widget<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.get(id)?.as_any().downcast_ref()
    }

    /// Mutable widget by ID, as its concrete type.
    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.get_mut(id)?.as_any_mut().downcast_mut()
    }

    /// Offers `event` front to back until a widget consumes it.
    ///
    /// `ctx` carries the pointer in this list's space. Raise requests are
    /// applied after the walk. Returns the consumer and its outcome.
    pub fn offer(&mut self, event: &RawEvent, ctx: &mut EventCtx) -> Option<(WidgetId, Outcome)> {
        let mut raise = None;
        let mut consumer = None;

        for widget in &mut self.widgets {
            let mut child = ctx.child(ctx.pointer());
            let outcome = widget.handle_event(event, &mut child);
            ctx.absorb(&child);
            if child.raise_requested() {
                raise = Some(widget.id());
            }
            if outcome.is_consumed() {
                tracing::trace!(widget = %widget.name(), kind = %widget.kind(), ?event, "consumed");
                consumer = Some((widget.id(), outcome));
                break;
            }
        }

        if let Some(id) = raise {
            if self.move_to_front(id) {
                ctx.request_redraw();
            }
        }
        consumer
    }

    /// Resets every widget except `keep`.
    pub fn deactivate_except(&mut self, keep: Option<WidgetId>, ctx: &mut EventCtx) {
        for widget in &mut self.widgets {
            if Some(widget.id()) != keep {
                widget.deactivate(ctx);
            }
        }
    }

    /// Paints back to front.
    pub fn render(&self, surface: &mut dyn Surface) {
        for widget in self.widgets.iter().rev() {
            widget.render(surface);
        }
    }

    fn position(&self, id: WidgetId) -> Option<usize> {
        self.widgets.iter().position(|w| w.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::testing::plain_theme;
    use crate::input::MouseButton;
    use crate::widget::{Button, ButtonOptions, Label, Placement, Visual};
    use ember_core::{CommandRecorder, Point, Rect};

    fn button(name: &str, x: i32) -> Box<dyn Widget> {
        Box::new(Button::new(&plain_theme(), Placement::at(x, 0), name, "btn", ButtonOptions::default()).unwrap())
    }

    fn list() -> (WidgetList, Vec<WidgetId>) {
        let mut list = WidgetList::new(Size::new(200, 100));
        let ids = vec![list.add(button("a", 0)), list.add(button("b", 20)), list.add(button("c", 40))];
        (list, ids)
    }

    #[test]
    fn test_add_puts_in_front() {
        let (list, ids) = list();
        assert_eq!(list.ids(), vec![ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn test_move_to_front_keeps_relative_order() {
        let (mut list, ids) = list();

        assert!(list.move_to_front(ids[0]));
        assert_eq!(list.ids(), vec![ids[0], ids[2], ids[1]]);

        assert!(list.move_to_front(ids[0]));
        assert_eq!(list.ids(), vec![ids[0], ids[2], ids[1]]);

        assert!(!list.move_to_front(WidgetId::next()));
    }

    #[test]
    fn test_remove_first_match() {
        let mut list = WidgetList::new(Size::new(100, 100));
        let older = list.add(button("dup", 0));
        let newer = list.add(button("dup", 50));

        let removed = list.remove("dup").unwrap();
        assert_eq!(removed.id(), newer);
        assert_eq!(list.ids(), vec![older]);
        assert!(list.remove("missing").is_none());
    }

    #[test]
    fn test_offer_stops_at_consumer_and_raises() {
        let (mut list, ids) = list();
        let press = RawEvent::PointerDown { button: MouseButton::Left, pos: Point::new(2, 2) };
        let mut ctx = EventCtx::new(press.pointer_pos());

        let (id, outcome) = list.offer(&press, &mut ctx).unwrap();

        assert_eq!(id, ids[0]);
        assert_eq!(outcome, Outcome::SWALLOWED);
        assert_eq!(list.ids()[0], ids[0]);
        assert!(ctx.redraw_requested());
        assert!(list.widget::<Button>(ids[0]).unwrap().is_held());
    }

    #[test]
    fn test_offer_overlap_front_wins() {
        let mut list = WidgetList::new(Size::new(100, 100));
        let wide =
            Button::new(&plain_theme(), Placement::at(0, 0), "back", "aaaaaa", ButtonOptions::default()).unwrap();
        let back = list.add(Box::new(wide));
        let front = list.add(button("front", 2));
        let press = RawEvent::PointerDown { button: MouseButton::Left, pos: Point::new(4, 4) };

        let (id, _) = list.offer(&press, &mut EventCtx::new(press.pointer_pos())).unwrap();

        assert_eq!(id, front);
        assert_eq!(list.ids(), vec![front, back]);
        let hidden = list.widget::<Button>(back).unwrap();
        assert!(!hidden.is_held());
        assert_eq!(hidden.visual(), Visual::Idle);
        assert!(list.widget::<Button>(front).unwrap().is_held());
    }

    #[test]
    fn test_offer_without_consumer() {
        let (mut list, _) = list();
        let press = RawEvent::PointerDown { button: MouseButton::Left, pos: Point::new(150, 80) };
        let before = list.ids();

        assert!(list.offer(&press, &mut EventCtx::new(press.pointer_pos())).is_none());
        assert_eq!(list.ids(), before);
    }

    #[test]
    fn test_render_back_to_front() {
        let (list, _) = list();
        let mut recorder = CommandRecorder::new(Size::new(200, 100));

        list.render(&mut recorder);

        let xs: Vec<i32> = recorder.blits().map(|r| r.x).collect();
        assert_eq!(xs, vec![0, 20, 40]);
    }

    #[test]
    fn test_typed_access() {
        let mut list = WidgetList::new(Size::new(100, 100));
        let label = list.add(Box::new(Label::new(&plain_theme(), Placement::at(1, 1), "l", "x", None).unwrap()));

        assert!(list.widget::<Button>(label).is_none());
        list.widget_mut::<Label>(label).unwrap().set_text("xyz");
        assert_eq!(list.get(label).unwrap().rect(), Rect::new(1, 1, 12, 8));
    }
}
