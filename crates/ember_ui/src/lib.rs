//! # Ember UI
//!
//! Retained widgets drawn onto a single surface once per frame:
//! - Every raw input event is consumed by at most one widget
//! - The surface is repainted only when something visibly changed
//! - Composite widgets (menus, scrollable lists, windows) are built from
//!   the simple ones and re-dispatch to them
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       ONE FRAME                          │
//! ├──────────────────────────────────────────────────────────┤
//! │  RawEvent batch → App::dispatch → front-to-back walk     │
//! │                        │                ↓                │
//! │                   UiEvents ◄── first consumer wins       │
//! │                        ↓                                 │
//! │  subscribers    App::render (if dirty) → back-to-front   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use ember_core::{BlockFont, CommandRecorder, Point, Size, Theme};
//! use ember_ui::{App, Button, ButtonOptions, MouseButton, Placement, RawEvent};
//!
//! let theme = Theme::plain(Arc::new(BlockFont::new(8)), 8);
//! let mut app = App::new(Size::new(320, 200), theme);
//! let ok = Button::new(&app.theme(), Placement::at(10, 10), "ok", "OK", ButtonOptions::default()).unwrap();
//! app.add(Box::new(ok));
//!
//! let at = Point::new(12, 12);
//! let mut surface = CommandRecorder::new(app.size());
//! let events = app.step(
//!     [
//!         RawEvent::PointerDown { button: MouseButton::Left, pos: at },
//!         RawEvent::PointerUp { button: MouseButton::Left, pos: at },
//!     ],
//!     &mut surface,
//! );
//! assert_eq!(events[0].name, "ok");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod app;
pub mod config;
pub mod container;
pub mod event;
pub mod input;
pub mod widget;

pub use app::App;
pub use config::AppConfig;
pub use container::WidgetList;
pub use event::{Action, Outcome, UiEvent, WidgetKind};
pub use input::{InputQueue, Key, MouseButton, RawEvent};
pub use widget::{
    Button, ButtonOptions, EventCtx, Label, Menu, MenuEntry, MenuList, MenuState, Placement, ScrollBar,
    TextInputBox, Visual, Widget, WidgetBase, WidgetId, Window, WindowBar,
};
