//! Semantic events and the consumption result of event handlers.

use std::fmt;

/// Widget category that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// [`crate::widget::Label`]
    Label,
    /// [`crate::widget::Button`]
    Button,
    /// [`crate::widget::ScrollBar`]
    ScrollBar,
    /// [`crate::widget::TextInputBox`]
    TextInput,
    /// [`crate::widget::MenuList`]
    MenuList,
    /// [`crate::widget::Menu`]
    Menu,
    /// [`crate::widget::Window`]
    Window,
    /// [`crate::widget::WindowBar`]
    WindowBar,
}

impl WidgetKind {
    /// Lowercase category name, as used in logs and errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Button => "button",
            Self::ScrollBar => "scroll bar",
            Self::TextInput => "text input",
            Self::MenuList => "menu list",
            Self::Menu => "menu",
            Self::Window => "window",
            Self::WindowBar => "window bar",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Press and release inside a button.
    Click,
    /// Enter pressed in a text input.
    Submit {
        /// Text at the time of submission.
        text: String,
    },
    /// Option picked from a menu.
    Select {
        /// Label of the chosen option.
        entry: String,
    },
    /// Event raised inside a window, wrapped by the window.
    Sub(Box<UiEvent>),
}

/// An application-level event produced by a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiEvent {
    /// Category of the widget reporting the event.
    pub kind: WidgetKind,
    /// Name of the widget reporting the event.
    pub name: String,
    /// The action.
    pub action: Action,
}

impl UiEvent {
    /// Creates a new event.
    #[must_use]
    pub fn new(kind: WidgetKind, name: impl Into<String>, action: Action) -> Self {
        Self {
            kind,
            name: name.into(),
            action,
        }
    }

    /// A click on `name`.
    #[must_use]
    pub fn click(kind: WidgetKind, name: impl Into<String>) -> Self {
        Self::new(kind, name, Action::Click)
    }

    /// Re-labels the event as coming from an enclosing widget.
    #[must_use]
    pub fn retag(mut self, kind: WidgetKind, name: &str) -> Self {
        self.kind = kind;
        name.clone_into(&mut self.name);
        self
    }

    /// Wraps the event in a window envelope.
    #[must_use]
    pub fn within_window(self, window: &str) -> Self {
        Self::new(WidgetKind::Window, window, Action::Sub(Box::new(self)))
    }

    /// The innermost event, unwrapping window envelopes.
    #[must_use]
    pub fn innermost(&self) -> &Self {
        match &self.action {
            Action::Sub(inner) => inner.innermost(),
            _ => self,
        }
    }
}

/// Result of offering a raw event to a widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub enum Outcome {
    /// Not for this widget; keep offering it.
    #[default]
    Unconsumed,
    /// Claimed. No other widget sees the event.
    Consumed(Option<UiEvent>),
}

impl Outcome {
    /// Consumed without producing an event.
    pub const SWALLOWED: Self = Self::Consumed(None);

    /// Consumed, producing `event`.
    pub fn emit(event: UiEvent) -> Self {
        Self::Consumed(Some(event))
    }

    /// True unless [`Outcome::Unconsumed`].
    #[must_use]
    pub const fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed(_))
    }

    /// The produced event, if any.
    #[must_use]
    pub fn into_event(self) -> Option<UiEvent> {
        match self {
            Self::Consumed(event) => event,
            Self::Unconsumed => None,
        }
    }

    /// Maps the produced event, leaving other outcomes alone.
    pub fn map_event(self, f: impl FnOnce(UiEvent) -> UiEvent) -> Self {
        match self {
            Self::Consumed(Some(event)) => Self::Consumed(Some(f(event))),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_envelope() {
        let click = UiEvent::click(WidgetKind::Button, "ok");
        let wrapped = click.clone().within_window("dialog").within_window("desktop");

        assert_eq!(wrapped.kind, WidgetKind::Window);
        assert_eq!(wrapped.name, "desktop");
        assert_eq!(wrapped.innermost(), &click);
    }

    #[test]
    fn test_outcome_mapping() {
        let outcome = Outcome::emit(UiEvent::click(WidgetKind::Button, "head"))
            .map_event(|e| e.retag(WidgetKind::Menu, "file"));

        assert!(outcome.is_consumed());
        let event = outcome.into_event().unwrap();
        assert_eq!((event.kind, event.name.as_str()), (WidgetKind::Menu, "file"));

        assert_eq!(Outcome::SWALLOWED.map_event(|e| e), Outcome::SWALLOWED);
        assert!(!Outcome::Unconsumed.is_consumed());
    }
}
