//! # Headless Lobby
//!
//! Builds a small game lobby (ready button, game menu, chat window) from
//! TOML, replays a scripted input session against it and paints every
//! frame into an in-memory image.
//!
//! Exits non-zero if the session does not produce the expected events.

use std::error::Error;
use std::process::ExitCode;

use ember_core::{Anchor, Color, Image, MemoryAssets, Point, Rect, Size, Theme};
use ember_ui::{
    Action, App, AppConfig, Button, ButtonOptions, InputQueue, Key, Label, Menu, MenuEntry, MouseButton, Placement,
    TextInputBox, UiEvent, Widget, WidgetKind, Window,
};

const APP_TOML: &str = r##"
width = 640
height = 400
background = "#181820"
"##;

const THEME_TOML: &str = r##"
[font]
key = "builtin:block"
size = 10

[button]
default = "panel"
hover = "panel_hi"
click = "panel_lo"
text_color = "#f0f0f0"

[label]
text_color = "#c0c0c0"

[menu]
border = "panel"
entry_default = "panel"
entry_hover = "panel_hi"
entry_click = "panel_lo"

[input]
border = "panel"

[window]
border = "panel"
background = "#101018"

[window_bar]
default = "panel_hi"
hover = "panel_hi"
click = "panel_lo"

[scroll_bar]
border = "panel"
default = "panel_hi"
hover = "panel_hi"
click = "panel_lo"
"##;

fn tile(fill: Color) -> Image {
    let mut image = Image::filled(Size::new(3, 3), fill);
    image.outline_rect(image.bounds(), Color::rgb(200, 200, 210));
    image
}

fn assets() -> MemoryAssets {
    MemoryAssets::new()
        .with_image("panel", tile(Color::rgb(40, 40, 56)))
        .with_image("panel_hi", tile(Color::rgb(64, 64, 96)))
        .with_image("panel_lo", tile(Color::rgb(24, 24, 32)))
}

fn center(rect: Rect) -> Point {
    rect.anchor(Anchor::Center)
}

fn click(queue: &mut InputQueue, at: Point) {
    queue.mouse_moved(at);
    queue.mouse_button_down(MouseButton::Left);
    queue.mouse_button_up(MouseButton::Left);
}

struct Session {
    app: App,
    queue: InputQueue,
    frame: Image,
    painted: usize,
    events: Vec<UiEvent>,
}

impl Session {
    fn frame(&mut self, step: &str) {
        let events = self.app.dispatch(self.queue.drain());
        if self.app.render(&mut self.frame) {
            self.painted += 1;
        }
        println!("── {step}");
        for event in &events {
            println!("   {:<12} {:<8} {:?}", event.kind, event.name, event.innermost().action);
        }
        self.events.extend(events);
    }
}

fn run() -> Result<Session, Box<dyn Error>> {
    let config = AppConfig::from_toml_str(APP_TOML)?;
    let theme = Theme::from_toml_str(THEME_TOML, &assets())?;
    let mut app = App::from_config(&config, theme);
    let theme = app.theme();

    let ready = app.add(Box::new(Button::new(
        &theme,
        Placement::at(16, 16),
        "ready",
        "Ready",
        ButtonOptions::default(),
    )?));
    let game = app.add(Box::new(Menu::new(
        &theme,
        Placement::at(120, 16),
        "game",
        "Game",
        ["Create", "Join", "Spectate", "Quit"].map(MenuEntry::from),
        None,
    )?));

    let mut chat = Window::new(&theme, Placement::centered(), "chat", Size::new(240, 120), "Chat", None)?;
    let log = chat.add(Box::new(Label::new(&theme, Placement::at(4, 4), "log", "welcome", None)?));
    let say = chat.add(Box::new(TextInputBox::new(&theme, Placement::at(4, 96), "say", "say", "", 24)?));
    let chat = app.add(Box::new(chat));

    let frame = Image::filled(app.size(), Color::TRANSPARENT);
    let mut session = Session {
        app,
        queue: InputQueue::new(),
        frame,
        painted: 0,
        events: Vec::new(),
    };
    session.frame("first paint");

    let at = session.app.widgets().get(ready).map(|w| center(w.rect())).ok_or("ready button missing")?;
    click(&mut session.queue, at);
    session.frame("click ready");

    let menu = session.app.widget::<Menu>(game).ok_or("game menu missing")?;
    let head = center(menu.head().rect());
    click(&mut session.queue, head);
    session.frame("open game menu");

    let menu = session.app.widget::<Menu>(game).ok_or("game menu missing")?;
    let join = menu.list().option_rect(1).map(center).ok_or("join option missing")?;
    click(&mut session.queue, join);
    session.frame("pick join");

    let window = session.app.widget::<Window>(chat).ok_or("chat window missing")?;
    let field = window
        .widget::<TextInputBox>(say)
        .map(|input| center(input.rect()).offset(window.body_origin()))
        .ok_or("chat input missing")?;
    click(&mut session.queue, field);
    for c in "gg wp".chars() {
        session.queue.key_down(Key::Other, Some(c));
    }
    session.queue.key_down(Key::Enter, None);
    session.frame("say something");

    let said = session.events.iter().rev().find_map(|e| match &e.innermost().action {
        Action::Submit { text } => Some(text.clone()),
        _ => None,
    });
    if let Some(text) = said {
        let window = session.app.widget_mut::<Window>(chat).ok_or("chat window missing")?;
        if let Some(label) = window.widget_mut::<Label>(log) {
            label.set_text(format!("you: {text}"));
        }
        session.frame("echo chat line");
    }

    let bar = session.app.widget::<Window>(chat).ok_or("chat window missing")?.bar().rect();
    let grab = bar.anchor(Anchor::MidLeft).offset(Point::new(8, 0));
    session.queue.mouse_moved(grab);
    session.queue.mouse_button_down(MouseButton::Left);
    session.queue.mouse_moved(grab.offset(Point::new(40, -30)));
    session.queue.mouse_button_up(MouseButton::Left);
    session.frame("drag chat window");

    let toggle = center(session.app.widget::<Window>(chat).ok_or("chat window missing")?.bar().toggle().rect());
    click(&mut session.queue, toggle);
    session.frame("minimize chat");

    Ok(session)
}

fn main() -> ExitCode {
    println!("╔══════════════════════════════════════════════╗");
    println!("║          EMBER UI - HEADLESS LOBBY           ║");
    println!("╚══════════════════════════════════════════════╝");

    let session = match run() {
        Ok(session) => session,
        Err(err) => {
            eprintln!("lobby failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let kinds: Vec<(WidgetKind, &str)> = session.events.iter().map(|e| (e.kind, e.name.as_str())).collect();
    let expected = [
        (WidgetKind::Button, "ready"),
        (WidgetKind::Menu, "game"),
        (WidgetKind::Menu, "game"),
        (WidgetKind::Window, "chat"),
    ];
    let minimized = session
        .app
        .widgets()
        .iter()
        .find(|w| w.name() == "chat")
        .and_then(|w| session.app.widget::<Window>(w.id()))
        .is_some_and(Window::is_minimized);

    println!();
    println!("frames painted: {}", session.painted);
    println!("events emitted: {}", session.events.len());
    println!("chat minimized: {minimized}");

    if kinds == expected && minimized {
        ExitCode::SUCCESS
    } else {
        eprintln!("unexpected session: {kinds:?}");
        ExitCode::FAILURE
    }
}
