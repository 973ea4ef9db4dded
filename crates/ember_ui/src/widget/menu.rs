use ember_core::{Anchor, Axis, ConfigResult, Image, Point, Rect, Region, Size, Surface, Theme};

use super::{Button, ButtonOptions, EventCtx, Placement, ScrollBar, Widget, WidgetBase};
use crate::event::{Action, Outcome, UiEvent, WidgetKind};
use crate::input::{MouseButton, RawEvent};

/// One option of a menu.
#[derive(Debug, Clone)]
pub struct MenuEntry {
    /// Text shown, also reported as the selected entry.
    pub label: String,
    /// Icon in front of the text.
    pub icon: Option<Image>,
}

impl MenuEntry {
    /// Entry with an icon.
    #[must_use]
    pub fn with_icon(label: impl Into<String>, icon: Image) -> Self {
        Self {
            label: label.into(),
            icon: Some(icon),
        }
    }
}

impl From<&str> for MenuEntry {
    fn from(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            icon: None,
        }
    }
}

impl From<String> for MenuEntry {
    fn from(label: String) -> Self {
        Self { label, icon: None }
    }
}

/// Vertical list of option buttons, all as wide as the widest.
///
/// When the list would run past the bottom of its owner it is cut to fit
/// and gets a vertical scroll bar along its right edge.
#[derive(Debug)]
pub struct MenuList {
    base: WidgetBase,
    theme: Theme,
    options: Vec<Button>,
    content: Size,
    cell: Size,
    view_height: i32,
    panel: Image,
    scroll: Option<ScrollBar>,
}

impl MenuList {
    /// Builds the list with the theme's menu entry look.
    ///
    /// # Errors
    ///
    /// [`ember_core::ConfigError::MissingFont`] when the theme has no font.
    pub fn new(
        theme: &Theme,
        placement: Placement,
        name: impl Into<String>,
        entries: impl IntoIterator<Item = MenuEntry>,
    ) -> ConfigResult<Self> {
        let entries: Vec<MenuEntry> = entries.into_iter().collect();
        let entry_theme = theme.with_button_look(theme.menu.entry_look());

        let mut width = 0;
        for entry in &entries {
            let options = ButtonOptions {
                icon: entry.icon.clone(),
                ..ButtonOptions::default()
            };
            let natural = Button::new(&entry_theme, Placement::at(0, 0), "", entry.label.as_str(), options)?;
            width = width.max(natural.rect().width);
        }

        let mut options = Vec::with_capacity(entries.len());
        let mut height = 0;
        for entry in entries {
            let sized = ButtonOptions {
                icon: entry.icon,
                width: Some(width),
                height: None,
            };
            let label = entry.label;
            let button = Button::new(&entry_theme, Placement::at(0, height), label.clone(), label, sized)?;
            height += button.rect().height;
            options.push(button);
        }

        let content = Size::new(width, height);
        let mut list = Self {
            base: WidgetBase::new(name, placement),
            theme: theme.clone(),
            options,
            content,
            cell: theme.menu.border.border(),
            view_height: height,
            panel: Image::new(Size::ZERO),
            scroll: None,
        };
        list.rebuild_panel(0);
        Ok(list)
    }

    /// Option buttons, top to bottom.
    #[must_use]
    pub fn options(&self) -> &[Button] {
        &self.options
    }

    /// Where option `index` currently shows, in the owner's space.
    #[must_use]
    pub fn option_rect(&self, index: usize) -> Option<Rect> {
        let origin = self.content_origin().offset(Point::new(0, -self.scroll_offset()));
        self.options.get(index).map(|button| button.rect().translate(origin))
    }

    /// The overflow scroll bar, if the list needed one.
    #[must_use]
    pub const fn scroll_bar(&self) -> Option<&ScrollBar> {
        self.scroll.as_ref()
    }

    fn rebuild_panel(&mut self, bar_width: i32) {
        let size = Size::new(
            self.content.width + bar_width + self.cell.width * 2,
            self.view_height + self.cell.height * 2,
        );
        self.panel = match self.theme.menu.border.image() {
            Some(border) => ember_core::ninepatch::stretch(border, size),
            None => Image::new(size),
        };
        self.base.set_size(size);
    }

    fn content_origin(&self) -> Point {
        self.base.rect().top_left().offset(Point::new(self.cell.width, self.cell.height))
    }

    fn scroll_offset(&self) -> i32 {
        self.scroll.as_ref().map_or(0, |bar| bar.value().round() as i32)
    }

    fn fit(&mut self, viewport: Size) {
        let rect = self.base.rect();
        if self.scroll.is_some() || rect.bottom() <= viewport.height {
            return;
        }
        let view = (viewport.height - rect.y - self.cell.height * 2).max(1);
        self.view_height = view;

        let bar = ScrollBar::new(
            &self.theme,
            Placement::at(self.content.width, 0),
            self.base.name(),
            Axis::Vertical,
            self.content.height,
            view,
            0,
        );
        match bar {
            Ok(bar) => {
                let width = bar.rect().width;
                self.scroll = Some(bar);
                self.rebuild_panel(width);
            }
            Err(err) => {
                tracing::warn!(menu = %self.base.name(), %err, "menu list overflows, options clipped");
                self.rebuild_panel(0);
            }
        }
    }
}

impl Widget for MenuList {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::MenuList
    }

    fn handle_event(&mut self, event: &RawEvent, ctx: &mut EventCtx) -> Outcome {
        let dragging = self.scroll.as_ref().is_some_and(ScrollBar::is_dragging);
        if event.is_pointer() && !dragging && !ctx.pointer_in(self.base.rect()) {
            for button in &mut self.options {
                button.deactivate(ctx);
            }
            return Outcome::Unconsumed;
        }
        let local = ctx.pointer().map(|p| p.minus(self.content_origin()));

        if let Some(bar) = &mut self.scroll {
            let mut child = ctx.child(local);
            let outcome = bar.handle_event(event, &mut child);
            ctx.absorb(&child);
            if outcome.is_consumed() {
                ctx.request_redraw();
                return outcome;
            }
        }

        let offset = self.scroll_offset();
        let visible = Rect::new(0, 0, self.content.width, self.view_height);
        let pointer = local
            .filter(|p| visible.contains(*p))
            .map(|p| Point::new(p.x, p.y + offset));

        for button in &mut self.options {
            let mut child = ctx.child(pointer);
            let outcome = button.handle_event(event, &mut child);
            ctx.absorb(&child);
            if outcome.is_consumed() {
                ctx.request_redraw();
                return outcome.map_event(|e| {
                    UiEvent::new(WidgetKind::MenuList, self.base.name(), Action::Select { entry: e.name })
                });
            }
        }
        Outcome::Unconsumed
    }

    fn render(&self, surface: &mut dyn Surface) {
        let origin = self.base.rect().top_left();
        surface.blit(&self.panel, origin);

        let inner = self.content_origin();
        if let Some(bar) = &self.scroll {
            let mut area = Region::new(
                &mut *surface,
                inner,
                Size::new(self.content.width + bar.rect().width, self.view_height),
            );
            bar.render(&mut area);
        }

        let mut clip = Region::new(&mut *surface, inner, Size::new(self.content.width, self.view_height));
        let mut scrolled = Region::new(&mut clip, Point::new(0, -self.scroll_offset()), self.content);
        for button in &self.options {
            button.render(&mut scrolled);
        }
    }

    fn deactivate(&mut self, ctx: &mut EventCtx) {
        if let Some(bar) = &mut self.scroll {
            bar.deactivate(ctx);
        }
        for button in &mut self.options {
            button.deactivate(ctx);
        }
    }

    fn attach(&mut self, viewport: Size) {
        self.base.resolve(viewport);
        self.fit(viewport);
    }
}

/// Whether a menu's list is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    /// Only the head is showing.
    #[default]
    Closed,
    /// The option list is showing below the head.
    Open,
}

/// Drop-down menu: a head button that toggles a [`MenuList`] below it.
#[derive(Debug)]
pub struct Menu {
    base: WidgetBase,
    head: Button,
    list: MenuList,
    state: MenuState,
}

impl Menu {
    /// Builds a menu.
    ///
    /// # Errors
    ///
    /// [`ember_core::ConfigError::MissingFont`] when the theme has no font.
    pub fn new(
        theme: &Theme,
        placement: Placement,
        name: impl Into<String>,
        text: impl Into<String>,
        entries: impl IntoIterator<Item = MenuEntry>,
        icon: Option<Image>,
    ) -> ConfigResult<Self> {
        let name = name.into();
        let options = ButtonOptions {
            icon,
            ..ButtonOptions::default()
        };
        let head = Button::new(theme, placement, name.as_str(), text, options)?;
        let below = Placement::from(head.rect().anchor(Anchor::BottomLeft));
        let list = MenuList::new(theme, below, name.as_str(), entries)?;

        let mut base = WidgetBase::new(name, placement);
        base.set_size(head.rect().size());
        Ok(Self {
            base,
            head,
            list,
            state: MenuState::Closed,
        })
    }

    /// Open or closed.
    #[must_use]
    pub const fn state(&self) -> MenuState {
        self.state
    }

    /// The head button.
    #[must_use]
    pub const fn head(&self) -> &Button {
        &self.head
    }

    /// The option list.
    #[must_use]
    pub const fn list(&self) -> &MenuList {
        &self.list
    }

    fn set_state(&mut self, state: MenuState, ctx: &mut EventCtx) {
        if self.state == state {
            return;
        }
        self.state = state;
        tracing::debug!(menu = %self.base.name(), ?state, "menu");
        if state == MenuState::Closed {
            self.list.deactivate(ctx);
        }
        ctx.request_redraw();
    }
}

impl Widget for Menu {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Menu
    }

    fn handle_event(&mut self, event: &RawEvent, ctx: &mut EventCtx) -> Outcome {
        let outcome = self.head.handle_event(event, ctx);
        if outcome.is_consumed() {
            if matches!(&outcome, Outcome::Consumed(Some(e)) if e.action == Action::Click) {
                let next = match self.state {
                    MenuState::Closed => MenuState::Open,
                    MenuState::Open => MenuState::Closed,
                };
                self.set_state(next, ctx);
                ctx.raise();
            }
            return outcome.map_event(|e| e.retag(WidgetKind::Menu, self.base.name()));
        }

        if self.state == MenuState::Closed {
            return Outcome::Unconsumed;
        }

        let mut child = ctx.child(ctx.pointer());
        let outcome = self.list.handle_event(event, &mut child);
        ctx.absorb(&child);
        match outcome {
            Outcome::Consumed(Some(selected)) => {
                self.set_state(MenuState::Closed, ctx);
                Outcome::emit(selected.retag(WidgetKind::Menu, self.base.name()))
            }
            Outcome::Consumed(None) => Outcome::SWALLOWED,
            Outcome::Unconsumed => match *event {
                RawEvent::PointerDown {
                    button: MouseButton::Left,
                    ..
                } => {
                    if !ctx.pointer_in(self.list.rect()) {
                        self.set_state(MenuState::Closed, ctx);
                    }
                    Outcome::SWALLOWED
                }
                _ => Outcome::Unconsumed,
            },
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.head.render(surface);
        if self.state == MenuState::Open {
            self.list.render(surface);
        }
    }

    fn deactivate(&mut self, ctx: &mut EventCtx) {
        self.head.deactivate(ctx);
        self.set_state(MenuState::Closed, ctx);
        self.list.deactivate(ctx);
    }

    fn attach(&mut self, viewport: Size) {
        self.base.resolve(viewport);
        self.head.attach(viewport);
        self.list.base_mut().set_pos(self.head.rect().anchor(Anchor::BottomLeft));
        self.list.attach(viewport);
    }

    fn move_by(&mut self, delta: Point) {
        self.base.move_by(delta);
        self.head.move_by(delta);
        self.list.move_by(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::testing::framed_theme;

    const VIEWPORT: Size = Size::new(400, 300);

    fn menu() -> Menu {
        let mut menu = Menu::new(
            &framed_theme(),
            Placement::at(10, 10),
            "game",
            "Game",
            ["Join", "Host", "Quit"].map(MenuEntry::from),
            None,
        )
        .unwrap();
        menu.attach(VIEWPORT);
        menu
    }

    fn click_at(widget: &mut dyn Widget, p: Point) -> Vec<Outcome> {
        [
            RawEvent::PointerDown { button: MouseButton::Left, pos: p },
            RawEvent::PointerUp { button: MouseButton::Left, pos: p },
        ]
        .iter()
        .map(|e| widget.handle_event(e, &mut EventCtx::new(Some(p))))
        .collect()
    }

    fn center(rect: Rect) -> Point {
        rect.anchor(Anchor::Center)
    }

    #[test]
    fn test_list_equal_widths() {
        let list = MenuList::new(
            &framed_theme(),
            Placement::at(0, 0),
            "l",
            ["a", "abcd"].map(MenuEntry::from),
        )
        .unwrap();

        let widths: Vec<i32> = list.options().iter().map(|b| b.rect().width).collect();
        // "abcd" is 16px + 1px border cells
        assert_eq!(widths, vec![18, 18]);
        assert_eq!(list.options()[1].rect().y, 10);
        assert_eq!(list.rect(), Rect::new(0, 0, 20, 22));
    }

    #[test]
    fn test_open_select_closes() {
        let mut menu = menu();
        assert_eq!(menu.list().rect().top_left(), menu.head().rect().anchor(Anchor::BottomLeft));

        let head = center(menu.head().rect());
        let outcomes = click_at(&mut menu, head);
        assert_eq!(outcomes[0], Outcome::SWALLOWED);
        assert_eq!(outcomes[1], Outcome::emit(UiEvent::click(WidgetKind::Menu, "game")));
        assert_eq!(menu.state(), MenuState::Open);

        // options live in the list's content space; the list border is 1px
        let host = menu.list().options()[1].rect();
        let origin = menu.list().rect().top_left().offset(Point::new(1, 1));
        assert_eq!(menu.list().option_rect(1), Some(host.translate(origin)));
        let outcomes = click_at(&mut menu, center(host.translate(origin)));

        assert_eq!(outcomes[0], Outcome::SWALLOWED);
        assert_eq!(
            outcomes[1],
            Outcome::emit(UiEvent::new(
                WidgetKind::Menu,
                "game",
                Action::Select { entry: "Host".into() }
            ))
        );
        assert_eq!(menu.state(), MenuState::Closed);
    }

    #[test]
    fn test_head_click_toggles() {
        let mut menu = menu();
        let head = center(menu.head().rect());

        let _ = click_at(&mut menu, head);
        let _ = click_at(&mut menu, head);
        assert_eq!(menu.state(), MenuState::Closed);
    }

    #[test]
    fn test_press_outside_closes_and_swallows() {
        let mut menu = menu();
        let head = center(menu.head().rect());
        let _ = click_at(&mut menu, head);

        let outcomes = click_at(&mut menu, Point::new(390, 290));
        assert_eq!(outcomes[0], Outcome::SWALLOWED);
        assert_eq!(menu.state(), MenuState::Closed);
        // closed again: the release is no longer ours
        assert_eq!(outcomes[1], Outcome::Unconsumed);
    }

    #[test]
    fn test_closed_menu_ignores_list_area() {
        let mut menu = menu();
        let below = center(menu.list().rect());
        assert_eq!(click_at(&mut menu, below), vec![Outcome::Unconsumed, Outcome::Unconsumed]);
    }

    #[test]
    fn test_overflow_adds_scroll_bar() {
        let entries: Vec<MenuEntry> = (0..20).map(|i| MenuEntry::from(format!("item {i}"))).collect();
        let mut list = MenuList::new(&framed_theme(), Placement::at(0, 0), "long", entries).unwrap();
        // 20 options, 10px each
        assert_eq!(list.rect().height, 202);

        list.attach(Size::new(200, 100));

        let bar = list.scroll_bar().unwrap();
        assert_eq!(bar.rect().height, 98);
        assert_eq!(list.rect().height, 100);
        assert_eq!(list.rect().width, 2 + list.options()[0].rect().width + bar.rect().width);

        // wheel over the list scrolls the options
        let wheel = RawEvent::PointerDown { button: MouseButton::WheelDown, pos: Point::new(5, 5) };
        let mut ctx = EventCtx::new(wheel.pointer_pos());
        assert_eq!(list.handle_event(&wheel, &mut ctx), Outcome::SWALLOWED);
        assert_eq!(list.scroll_bar().unwrap().current(), 1);
        assert!(list.scroll_offset() > 0);
    }

    #[test]
    fn test_overflow_without_scroll_images_clips() {
        let mut theme = framed_theme();
        theme.scroll_bar = ember_core::ScrollBarLook::default();
        let entries: Vec<MenuEntry> = (0..20).map(|i| MenuEntry::from(format!("{i}"))).collect();
        let mut list = MenuList::new(&theme, Placement::at(0, 0), "long", entries).unwrap();

        list.attach(Size::new(200, 100));

        assert!(list.scroll_bar().is_none());
        assert_eq!(list.rect().height, 100);
    }

    #[test]
    fn test_render_clips_to_list() {
        let entries: Vec<MenuEntry> = (0..20).map(|i| MenuEntry::from(format!("item {i}"))).collect();
        let mut list = MenuList::new(&framed_theme(), Placement::at(0, 0), "long", entries).unwrap();
        list.attach(Size::new(200, 100));

        let mut recorder = ember_core::CommandRecorder::new(Size::new(200, 100));
        list.render(&mut recorder);

        assert!(recorder.blits().all(|r| r.bottom() <= 100));
    }
}
