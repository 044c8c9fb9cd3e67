//! Host input events and the adapter that normalizes them for surfaces.

use crate::keyboard::{KeyEvent, KeyboardState};
use crate::mouse::{MouseEvent, MouseState, PointerEvent};
use std::fmt;
use swatch_core::geometry::{Point, Size};

/// Any input event a host can deliver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A mouse event in host coordinates.
    Mouse(MouseEvent),
    /// A keyboard event.
    Key(KeyEvent),
    /// The viewport was resized.
    Resize(Size),
}

impl InputEvent {
    /// Converts a crossterm event, dropping the kinds the picker has no use for.
    #[must_use]
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        match event {
            crossterm::event::Event::Key(key) => Some(InputEvent::Key(key.into())),
            crossterm::event::Event::Mouse(mouse) => Some(InputEvent::Mouse(mouse.into())),
            crossterm::event::Event::Resize(w, h) => Some(InputEvent::Resize(Size::new(
                f64::from(w),
                f64::from(h),
            ))),
            _ => None,
        }
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputEvent::Mouse(mouse) => write!(f, "Mouse({mouse})"),
            InputEvent::Key(key) => write!(f, "Key({})", key.code),
            InputEvent::Resize(size) => write!(f, "Resize({}x{})", size.width, size.height),
        }
    }
}

/// What a surface receives after normalization.
#[derive(Debug, Clone, Copy)]
pub enum SurfaceInput<'a> {
    /// A press or drag relative to the surface.
    Pointer(PointerEvent),
    /// A key-down; query the held keys through the tracker.
    KeyDown(&'a KeyboardState),
}

/// Turns raw host events into [`SurfaceInput`]s.
///
/// Keeps button state (to recognize drags) and held keys (to answer
/// `has_key_pressed` for simultaneous presses).
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    mouse: MouseState,
    keyboard: KeyboardState,
}

impl InputAdapter {
    /// Creates an adapter with nothing pressed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one event; `origin` is the target surface's top-left corner.
    ///
    /// Returns `None` for events surfaces ignore (moves, releases, resizes).
    pub fn feed(&mut self, event: &InputEvent, origin: Point) -> Option<SurfaceInput<'_>> {
        match event {
            InputEvent::Mouse(mouse) => {
                let normalized = self.mouse.update(mouse);
                normalized.to_pointer(origin).map(SurfaceInput::Pointer)
            }
            InputEvent::Key(key) => {
                if self.keyboard.update(key) {
                    Some(SurfaceInput::KeyDown(&self.keyboard))
                } else {
                    None
                }
            }
            InputEvent::Resize(_) => None,
        }
    }

    /// The held-key tracker.
    #[must_use]
    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// Clears button and key state.
    pub fn reset(&mut self) {
        self.mouse.reset();
        self.keyboard.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{KeyCode, KeyQuery};
    use crate::mouse::MouseButton;

    #[test]
    fn test_adapter_pointer_press_and_drag() {
        let mut adapter = InputAdapter::new();
        let origin = Point::new(100.0, 100.0);

        let down = InputEvent::Mouse(MouseEvent::down(MouseButton::Left, 120.0, 130.0));
        match adapter.feed(&down, origin) {
            Some(SurfaceInput::Pointer(p)) => {
                assert!(p.is_left_button);
                assert_eq!(p.position, Point::new(20.0, 30.0));
            }
            other => panic!("expected pointer, got {other:?}"),
        }

        let moved = InputEvent::Mouse(MouseEvent::moved(150.0, 90.0));
        match adapter.feed(&moved, origin) {
            Some(SurfaceInput::Pointer(p)) => assert_eq!(p.position, Point::new(50.0, -10.0)),
            other => panic!("expected drag, got {other:?}"),
        }

        let up = InputEvent::Mouse(MouseEvent::up(MouseButton::Left, 150.0, 90.0));
        assert!(adapter.feed(&up, origin).is_none());
    }

    #[test]
    fn test_adapter_key_down_sees_simultaneous_keys() {
        let mut adapter = InputAdapter::new();

        adapter.feed(&InputEvent::Key(KeyEvent::press(KeyCode::Up)), Point::ZERO);
        match adapter.feed(&InputEvent::Key(KeyEvent::press(KeyCode::Left)), Point::ZERO) {
            Some(SurfaceInput::KeyDown(keys)) => {
                assert!(keys.has_key_pressed(KeyCode::Up));
                assert!(keys.has_key_pressed(KeyCode::Left));
            }
            other => panic!("expected key-down, got {other:?}"),
        }

        let release = InputEvent::Key(KeyEvent::release(KeyCode::Up));
        assert!(adapter.feed(&release, Point::ZERO).is_none());
        assert!(!adapter.keyboard().has_key_pressed(KeyCode::Up));
    }

    #[test]
    fn test_from_crossterm_drops_unused_events() {
        assert!(InputEvent::from_crossterm(crossterm::event::Event::FocusGained).is_none());
        let resize = InputEvent::from_crossterm(crossterm::event::Event::Resize(80, 24));
        assert_eq!(resize, Some(InputEvent::Resize(Size::new(80.0, 24.0))));
    }
}
