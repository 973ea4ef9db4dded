//! Raw input for the widget engine.
//!
//! The host translates its native events into [`RawEvent`]s, either
//! directly or through an [`InputQueue`] that tracks the pointer and
//! derives move deltas.

use ember_core::Point;

/// Pointer button. The wheel is reported as two pseudo buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Right,
    /// Wheel rolled away from the user.
    WheelUp,
    /// Wheel rolled towards the user.
    WheelDown,
}

impl MouseButton {
    /// True for the wheel pseudo buttons.
    #[must_use]
    pub const fn is_wheel(self) -> bool {
        matches!(self, Self::WheelUp | Self::WheelDown)
    }
}

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Tab key.
    Tab,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Space bar.
    Space,
    /// Any other key; the produced text (if any) travels with the event.
    Other,
}

/// One raw input event, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    /// Button pressed.
    PointerDown {
        /// Which button.
        button: MouseButton,
        /// Pointer position.
        pos: Point,
    },
    /// Button released.
    PointerUp {
        /// Which button.
        button: MouseButton,
        /// Pointer position.
        pos: Point,
    },
    /// Pointer moved.
    PointerMove {
        /// Motion since the previous position.
        delta: Point,
        /// New position.
        pos: Point,
    },
    /// Key pressed.
    KeyDown {
        /// Which key.
        key: Key,
        /// Character produced, if printable.
        text: Option<char>,
    },
}

impl RawEvent {
    /// Pointer position carried by the event.
    #[must_use]
    pub const fn pointer_pos(&self) -> Option<Point> {
        match *self {
            Self::PointerDown { pos, .. } | Self::PointerUp { pos, .. } | Self::PointerMove { pos, .. } => {
                Some(pos)
            }
            Self::KeyDown { .. } => None,
        }
    }

    /// True for events routed by pointer position.
    #[must_use]
    pub const fn is_pointer(&self) -> bool {
        self.pointer_pos().is_some()
    }
}

/// Collects host input for one frame.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pointer: Point,
    buttons_down: u8,
    events: Vec<RawEvent>,
}

impl InputQueue {
    /// Creates an empty queue with the pointer at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known pointer position.
    #[must_use]
    pub const fn pointer(&self) -> Point {
        self.pointer
    }

    /// Records a pointer move to `pos`.
    pub fn mouse_moved(&mut self, pos: Point) {
        let delta = pos.minus(self.pointer);
        self.pointer = pos;
        self.events.push(RawEvent::PointerMove { delta, pos });
    }

    /// Records a button press at the current pointer position.
    pub fn mouse_button_down(&mut self, button: MouseButton) {
        self.buttons_down |= Self::button_mask(button);
        self.events.push(RawEvent::PointerDown {
            button,
            pos: self.pointer,
        });
    }

    /// Records a button release at the current pointer position.
    pub fn mouse_button_up(&mut self, button: MouseButton) {
        self.buttons_down &= !Self::button_mask(button);
        self.events.push(RawEvent::PointerUp {
            button,
            pos: self.pointer,
        });
    }

    /// Records one wheel notch (positive = towards the user).
    pub fn scroll(&mut self, notches: i32) {
        let button = if notches > 0 { MouseButton::WheelDown } else { MouseButton::WheelUp };
        for _ in 0..notches.unsigned_abs() {
            self.events.push(RawEvent::PointerDown {
                button,
                pos: self.pointer,
            });
        }
    }

    /// Records a key press.
    pub fn key_down(&mut self, key: Key, text: Option<char>) {
        self.events.push(RawEvent::KeyDown { key, text });
    }

    /// Returns true if the button is currently held.
    #[must_use]
    pub const fn mouse_down(&self, button: MouseButton) -> bool {
        (self.buttons_down & Self::button_mask(button)) != 0
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Takes the pending events in arrival order.
    pub fn drain(&mut self) -> Vec<RawEvent> {
        std::mem::take(&mut self.events)
    }

    const fn button_mask(button: MouseButton) -> u8 {
        match button {
            MouseButton::Left => 1,
            MouseButton::Right => 2,
            MouseButton::Middle => 4,
            MouseButton::WheelUp => 8,
            MouseButton::WheelDown => 16,
        }
    }
}
