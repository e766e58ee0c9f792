//! Input events delivered by the host toolkit.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types.
///
/// Pointer positions are in whatever space the receiver documents; the menu
/// controller expects screen coordinates and converts them per popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Mouse moved to position
    MouseMove {
        /// New position
        position: Point,
    },
    /// Mouse button pressed
    MouseDown {
        /// Position of click
        position: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Mouse button released
    MouseUp {
        /// Position of release
        position: Point,
        /// Button released
        button: MouseButton,
    },
    /// Key pressed
    KeyDown {
        /// Key pressed
        key: Key,
    },
    /// Key released
    KeyUp {
        /// Key released
        key: Key,
    },
    /// Widget gained focus
    FocusIn,
    /// Widget lost focus
    FocusOut,
    /// Mouse entered widget bounds
    MouseEnter,
    /// Mouse left widget bounds
    MouseLeave,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (wheel click)
    Middle,
}

/// Keyboard key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Return key on the main block
    Enter,
    /// Enter key on the numeric keypad
    NumpadEnter,
    /// Escape key
    Escape,
    /// Space bar
    Space,
    /// Tab key
    Tab,
    /// Home key
    Home,
    /// End key
    End,

    // Arrow keys
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

impl Key {
    /// Either of the two enter keys.
    #[must_use]
    pub const fn is_enter(self) -> bool {
        matches!(self, Self::Enter | Self::NumpadEnter)
    }
}

impl Event {
    /// Check if this is a keyboard event.
    #[must_use]
    pub const fn is_keyboard(&self) -> bool {
        matches!(self, Self::KeyDown { .. } | Self::KeyUp { .. })
    }

    /// Pointer position carried by the event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::MouseMove { position }
            | Self::MouseDown { position, .. }
            | Self::MouseUp { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Same event with its pointer position shifted by `-origin`.
    ///
    /// Used to move screen-space events into a widget's local space.
    #[must_use]
    pub fn relative_to(&self, origin: Point) -> Self {
        match self {
            Self::MouseMove { position } => Self::MouseMove {
                position: *position - origin,
            },
            Self::MouseDown { position, button } => Self::MouseDown {
                position: *position - origin,
                button: *button,
            },
            Self::MouseUp { position, button } => Self::MouseUp {
                position: *position - origin,
                button: *button,
            },
            other => other.clone(),
        }
    }
}
