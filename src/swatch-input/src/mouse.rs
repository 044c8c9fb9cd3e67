//! Mouse input types and the normalized pointer event.
//!
//! Hosts deliver raw [`MouseEvent`]s in their own coordinate space. Surfaces
//! only care about [`PointerEvent`]: whether the left button is involved and
//! where the pointer is relative to the surface's top-left corner.

use crate::keyboard::KeyModifiers;
use serde::{Deserialize, Serialize};
use std::fmt;
use swatch_core::geometry::Point;

/// Represents a mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// Left mouse button (primary).
    #[default]
    Left,
    /// Right mouse button (secondary).
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

impl MouseButton {
    /// Converts a button number to a `MouseButton`.
    #[must_use]
    pub fn from_number(n: u8) -> Self {
        match n {
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            _ => MouseButton::Left,
        }
    }

    /// Converts this button to its numeric representation.
    #[must_use]
    pub fn to_number(self) -> u8 {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MouseButton::Left => write!(f, "left"),
            MouseButton::Right => write!(f, "right"),
            MouseButton::Middle => write!(f, "middle"),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        match btn {
            crossterm::event::MouseButton::Left => MouseButton::Left,
            crossterm::event::MouseButton::Right => MouseButton::Right,
            crossterm::event::MouseButton::Middle => MouseButton::Middle,
        }
    }
}

/// The kind of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// A button was pressed down.
    Down(MouseButton),
    /// A button was released.
    Up(MouseButton),
    /// The mouse was dragged while a button was held.
    Drag(MouseButton),
    /// The mouse was moved without any buttons pressed.
    Moved,
    /// The wheel or trackpad scrolled.
    Scroll,
}

impl fmt::Display for MouseEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MouseEventKind::Down(btn) => write!(f, "down({btn})"),
            MouseEventKind::Up(btn) => write!(f, "up({btn})"),
            MouseEventKind::Drag(btn) => write!(f, "drag({btn})"),
            MouseEventKind::Moved => write!(f, "moved"),
            MouseEventKind::Scroll => write!(f, "scroll"),
        }
    }
}

impl From<crossterm::event::MouseEventKind> for MouseEventKind {
    fn from(kind: crossterm::event::MouseEventKind) -> Self {
        use crossterm::event::MouseEventKind as CT;
        match kind {
            CT::Down(btn) => MouseEventKind::Down(btn.into()),
            CT::Up(btn) => MouseEventKind::Up(btn.into()),
            CT::Drag(btn) => MouseEventKind::Drag(btn.into()),
            CT::Moved => MouseEventKind::Moved,
            CT::ScrollDown | CT::ScrollUp | CT::ScrollLeft | CT::ScrollRight => {
                MouseEventKind::Scroll
            }
        }
    }
}

/// A raw mouse event in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// The kind of mouse event.
    pub kind: MouseEventKind,
    /// Where the event occurred.
    pub position: Point,
    /// Active keyboard modifiers during this event.
    pub modifiers: KeyModifiers,
}

impl MouseEvent {
    /// Creates a new mouse event.
    #[must_use]
    pub fn new(kind: MouseEventKind, position: Point, modifiers: KeyModifiers) -> Self {
        Self {
            kind,
            position,
            modifiers,
        }
    }

    /// Creates a button down event.
    #[must_use]
    pub fn down(button: MouseButton, x: f64, y: f64) -> Self {
        Self::new(
            MouseEventKind::Down(button),
            Point::new(x, y),
            KeyModifiers::NONE,
        )
    }

    /// Creates a button up event.
    #[must_use]
    pub fn up(button: MouseButton, x: f64, y: f64) -> Self {
        Self::new(
            MouseEventKind::Up(button),
            Point::new(x, y),
            KeyModifiers::NONE,
        )
    }

    /// Creates a move event.
    #[must_use]
    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(MouseEventKind::Moved, Point::new(x, y), KeyModifiers::NONE)
    }

    /// Converts a press or drag into a [`PointerEvent`] relative to `origin`.
    ///
    /// Other kinds yield `None`.
    #[must_use]
    pub fn to_pointer(&self, origin: Point) -> Option<PointerEvent> {
        match self.kind {
            MouseEventKind::Down(btn) | MouseEventKind::Drag(btn) => Some(PointerEvent {
                is_left_button: btn == MouseButton::Left,
                position: self.position - origin,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for MouseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@({},{})", self.kind, self.position.x, self.position.y)
    }
}

impl From<crossterm::event::MouseEvent> for MouseEvent {
    fn from(event: crossterm::event::MouseEvent) -> Self {
        Self {
            kind: event.kind.into(),
            position: Point::new(f64::from(event.column), f64::from(event.row)),
            modifiers: event.modifiers.into(),
        }
    }
}

/// A pointer press or drag, positioned relative to the surface it hit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Whether the left (primary) button is the one pressed or dragging.
    pub is_left_button: bool,
    /// Position relative to the surface's top-left corner.
    pub position: Point,
}

impl PointerEvent {
    /// A left-button pointer event at `(x, y)`.
    #[must_use]
    pub fn left(x: f64, y: f64) -> Self {
        Self {
            is_left_button: true,
            position: Point::new(x, y),
        }
    }

    /// A non-left-button pointer event at `(x, y)`.
    #[must_use]
    pub fn other(x: f64, y: f64) -> Self {
        Self {
            is_left_button: false,
            position: Point::new(x, y),
        }
    }
}

/// Tracks mouse button state so plain moves with a button held become drags.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    pressed_buttons: [bool; 3],
    last_position: Option<Point>,
    drag_button: Option<MouseButton>,
}

impl MouseState {
    /// Creates a new mouse state tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates state and returns the event surfaces should see.
    ///
    /// A `Moved` event while a button is held is rewritten to `Drag`.
    pub fn update(&mut self, event: &MouseEvent) -> MouseEvent {
        self.last_position = Some(event.position);

        match event.kind {
            MouseEventKind::Down(btn) => {
                self.pressed_buttons[btn.to_number() as usize] = true;
                *event
            }
            MouseEventKind::Up(btn) => {
                self.pressed_buttons[btn.to_number() as usize] = false;
                if self.drag_button == Some(btn) {
                    self.drag_button = None;
                }
                *event
            }
            MouseEventKind::Moved => match self.any_button_pressed() {
                Some(btn) => {
                    self.drag_button = Some(btn);
                    MouseEvent::new(MouseEventKind::Drag(btn), event.position, event.modifiers)
                }
                None => *event,
            },
            MouseEventKind::Drag(btn) => {
                self.drag_button = Some(btn);
                *event
            }
            MouseEventKind::Scroll => *event,
        }
    }

    /// Returns the first currently pressed button, if any.
    #[must_use]
    pub fn any_button_pressed(&self) -> Option<MouseButton> {
        if self.pressed_buttons[0] {
            Some(MouseButton::Left)
        } else if self.pressed_buttons[1] {
            Some(MouseButton::Middle)
        } else if self.pressed_buttons[2] {
            Some(MouseButton::Right)
        } else {
            None
        }
    }

    /// Returns true if a drag operation is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag_button.is_some()
    }

    /// Returns the last known mouse position.
    #[must_use]
    pub fn last_position(&self) -> Option<Point> {
        self.last_position
    }

    /// Resets the mouse state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_button_conversion() {
        assert_eq!(MouseButton::from_number(0), MouseButton::Left);
        assert_eq!(MouseButton::from_number(1), MouseButton::Middle);
        assert_eq!(MouseButton::from_number(2), MouseButton::Right);
        assert_eq!(MouseButton::Right.to_number(), 2);
    }

    #[test]
    fn test_to_pointer_is_relative_to_origin() {
        let event = MouseEvent::down(MouseButton::Left, 110.0, 65.0);
        let pointer = event.to_pointer(Point::new(100.0, 50.0)).unwrap();
        assert!(pointer.is_left_button);
        assert_eq!(pointer.position, Point::new(10.0, 15.0));
    }

    #[test]
    fn test_to_pointer_flags_other_buttons() {
        let event = MouseEvent::down(MouseButton::Right, 5.0, 5.0);
        let pointer = event.to_pointer(Point::ZERO).unwrap();
        assert!(!pointer.is_left_button);
    }

    #[test]
    fn test_to_pointer_ignores_release_and_move() {
        assert!(MouseEvent::up(MouseButton::Left, 1.0, 1.0)
            .to_pointer(Point::ZERO)
            .is_none());
        assert!(MouseEvent::moved(1.0, 1.0).to_pointer(Point::ZERO).is_none());
    }

    #[test]
    fn test_mouse_state_synthesizes_drag() {
        let mut state = MouseState::new();

        state.update(&MouseEvent::down(MouseButton::Left, 10.0, 10.0));
        let dragged = state.update(&MouseEvent::moved(15.0, 12.0));
        assert_eq!(dragged.kind, MouseEventKind::Drag(MouseButton::Left));
        assert!(state.is_dragging());
        assert_eq!(state.last_position(), Some(Point::new(15.0, 12.0)));

        state.update(&MouseEvent::up(MouseButton::Left, 20.0, 20.0));
        assert!(!state.is_dragging());

        let moved = state.update(&MouseEvent::moved(30.0, 30.0));
        assert_eq!(moved.kind, MouseEventKind::Moved);
    }

    #[test]
    fn test_crossterm_conversion() {
        let ct = crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Drag(crossterm::event::MouseButton::Left),
            column: 7,
            row: 3,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        let event = MouseEvent::from(ct);
        assert_eq!(event.kind, MouseEventKind::Drag(MouseButton::Left));
        assert_eq!(event.position, Point::new(7.0, 3.0));
    }
}
