//! Keyboard input types and held-key tracking.
//!
//! Surfaces react to key-down events by asking which keys are currently held
//! ([`KeyQuery::has_key_pressed`]). [`KeyboardState`] answers that from the
//! press/release stream; a lone [`KeyEvent`] answers it for its own key, which
//! is all a terminal without release reporting can offer.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Represents the type of key event (press, release, or repeat).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed down.
    #[default]
    Press,
    /// Key is being held down and repeating.
    Repeat,
    /// Key was released.
    Release,
}

impl KeyEventKind {
    /// Returns true for presses and auto-repeats, the events surfaces act on.
    #[must_use]
    pub fn is_down(self) -> bool {
        matches!(self, KeyEventKind::Press | KeyEventKind::Repeat)
    }
}

impl From<crossterm::event::KeyEventKind> for KeyEventKind {
    fn from(kind: crossterm::event::KeyEventKind) -> Self {
        match kind {
            crossterm::event::KeyEventKind::Press => KeyEventKind::Press,
            crossterm::event::KeyEventKind::Repeat => KeyEventKind::Repeat,
            crossterm::event::KeyEventKind::Release => KeyEventKind::Release,
        }
    }
}

/// Represents a key on the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KeyCode {
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Tab key.
    Tab,
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Esc,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Function key F1-F24.
    F(u8),
    /// A regular character key.
    Char(char),
    /// A key with no meaning to the picker.
    Null,
}

impl KeyCode {
    /// Returns the normalized name for this key code.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            KeyCode::Up => "up".to_string(),
            KeyCode::Down => "down".to_string(),
            KeyCode::Left => "left".to_string(),
            KeyCode::Right => "right".to_string(),
            KeyCode::Home => "home".to_string(),
            KeyCode::End => "end".to_string(),
            KeyCode::PageUp => "pageup".to_string(),
            KeyCode::PageDown => "pagedown".to_string(),
            KeyCode::Tab => "tab".to_string(),
            KeyCode::Enter => "enter".to_string(),
            KeyCode::Esc => "escape".to_string(),
            KeyCode::Backspace => "backspace".to_string(),
            KeyCode::Delete => "delete".to_string(),
            KeyCode::F(n) => format!("f{n}"),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Null => "null".to_string(),
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when a key name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey(pub String);

impl fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key name: {:?}", self.0)
    }
}

impl std::error::Error for UnknownKey {}

impl FromStr for KeyCode {
    type Err = UnknownKey;

    /// Parses the names produced by [`KeyCode::name`], case-insensitively
    /// for multi-character names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(KeyCode::Char(c));
        }

        let lower = s.to_ascii_lowercase();
        let code = match lower.as_str() {
            "up" | "arrowup" => KeyCode::Up,
            "down" | "arrowdown" => KeyCode::Down,
            "left" | "arrowleft" => KeyCode::Left,
            "right" | "arrowright" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "tab" => KeyCode::Tab,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "backspace" => KeyCode::Backspace,
            "delete" => KeyCode::Delete,
            "space" => KeyCode::Char(' '),
            "null" => KeyCode::Null,
            other => match other.strip_prefix('f').map(str::parse::<u8>) {
                Some(Ok(n)) if (1..=24).contains(&n) => KeyCode::F(n),
                _ => return Err(UnknownKey(s.to_string())),
            },
        };
        Ok(code)
    }
}

impl TryFrom<String> for KeyCode {
    type Error = UnknownKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyCode> for String {
    fn from(code: KeyCode) -> Self {
        code.name()
    }
}

impl From<crossterm::event::KeyCode> for KeyCode {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode as CT;
        match code {
            CT::Up => KeyCode::Up,
            CT::Down => KeyCode::Down,
            CT::Left => KeyCode::Left,
            CT::Right => KeyCode::Right,
            CT::Home => KeyCode::Home,
            CT::End => KeyCode::End,
            CT::PageUp => KeyCode::PageUp,
            CT::PageDown => KeyCode::PageDown,
            CT::Tab | CT::BackTab => KeyCode::Tab,
            CT::Enter => KeyCode::Enter,
            CT::Esc => KeyCode::Esc,
            CT::Backspace => KeyCode::Backspace,
            CT::Delete => KeyCode::Delete,
            CT::F(n) => KeyCode::F(n),
            CT::Char(c) => KeyCode::Char(c),
            _ => KeyCode::Null,
        }
    }
}

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        /// No modifiers pressed.
        const NONE = 0b0000_0000;
        /// Shift modifier.
        const SHIFT = 0b0000_0001;
        /// Control modifier.
        const CONTROL = 0b0000_0010;
        /// Alt/Option modifier.
        const ALT = 0b0000_0100;
        /// Super/Windows/Command modifier.
        const SUPER = 0b0000_1000;
    }
}

impl From<crossterm::event::KeyModifiers> for KeyModifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        let mut result = KeyModifiers::NONE;
        if mods.contains(crossterm::event::KeyModifiers::SHIFT) {
            result |= KeyModifiers::SHIFT;
        }
        if mods.contains(crossterm::event::KeyModifiers::CONTROL) {
            result |= KeyModifiers::CONTROL;
        }
        if mods.contains(crossterm::event::KeyModifiers::ALT) {
            result |= KeyModifiers::ALT;
        }
        if mods.contains(crossterm::event::KeyModifiers::SUPER) {
            result |= KeyModifiers::SUPER;
        }
        result
    }
}

/// A complete keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key code that was pressed/released.
    pub code: KeyCode,
    /// Active modifiers during this event.
    pub modifiers: KeyModifiers,
    /// The kind of event (press, repeat, release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Creates a new press event.
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self::with_kind(code, modifiers, KeyEventKind::Press)
    }

    /// Creates a new key event with the specified kind.
    #[must_use]
    pub fn with_kind(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Self {
        Self {
            code,
            modifiers,
            kind,
        }
    }

    /// Creates a press event with no modifiers.
    #[must_use]
    pub fn press(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Creates a release event with no modifiers.
    #[must_use]
    pub fn release(code: KeyCode) -> Self {
        Self::with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    /// Returns true if this is a press or repeat.
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.kind.is_down()
    }
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        Self {
            code: event.code.into(),
            modifiers: event.modifiers.into(),
            kind: event.kind.into(),
        }
    }
}

/// Answers "is this key currently held?".
pub trait KeyQuery {
    /// Returns true if `key` is pressed.
    fn has_key_pressed(&self, key: KeyCode) -> bool;
}

impl KeyQuery for KeyEvent {
    fn has_key_pressed(&self, key: KeyCode) -> bool {
        self.is_down() && self.code == key
    }
}

impl KeyQuery for [KeyCode] {
    fn has_key_pressed(&self, key: KeyCode) -> bool {
        self.contains(&key)
    }
}

/// Tracks which keys are currently held down.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: SmallVec<[KeyCode; 4]>,
}

impl KeyboardState {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a key event and returns true if it was a key-down.
    pub fn update(&mut self, event: &KeyEvent) -> bool {
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if !self.held.contains(&event.code) {
                    self.held.push(event.code);
                }
                true
            }
            KeyEventKind::Release => {
                self.held.retain(|code| *code != event.code);
                false
            }
        }
    }

    /// Returns the keys currently held, in press order.
    #[must_use]
    pub fn held(&self) -> &[KeyCode] {
        &self.held
    }

    /// Forgets every held key, e.g. when the surface loses focus.
    pub fn reset(&mut self) {
        self.held.clear();
    }
}

impl KeyQuery for KeyboardState {
    fn has_key_pressed(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_code_name() {
        assert_eq!(KeyCode::Up.name(), "up");
        assert_eq!(KeyCode::Char('a').name(), "a");
        assert_eq!(KeyCode::F(5).name(), "f5");
        assert_eq!(KeyCode::Esc.name(), "escape");
    }

    #[test]
    fn test_key_code_from_str() {
        assert_eq!("Up".parse::<KeyCode>(), Ok(KeyCode::Up));
        assert_eq!("ArrowLeft".parse::<KeyCode>(), Ok(KeyCode::Left));
        assert_eq!("x".parse::<KeyCode>(), Ok(KeyCode::Char('x')));
        assert_eq!("f12".parse::<KeyCode>(), Ok(KeyCode::F(12)));
        assert!("f99".parse::<KeyCode>().is_err());
        assert!("sideways".parse::<KeyCode>().is_err());
    }

    #[test]
    fn test_key_event_query() {
        let up = KeyEvent::press(KeyCode::Up);
        assert!(up.has_key_pressed(KeyCode::Up));
        assert!(!up.has_key_pressed(KeyCode::Down));

        let released = KeyEvent::release(KeyCode::Up);
        assert!(!released.has_key_pressed(KeyCode::Up));
    }

    #[test]
    fn test_keyboard_state_tracks_held_keys() {
        let mut keys = KeyboardState::new();

        assert!(keys.update(&KeyEvent::press(KeyCode::Up)));
        assert!(keys.update(&KeyEvent::press(KeyCode::Left)));
        assert!(keys.has_key_pressed(KeyCode::Up));
        assert!(keys.has_key_pressed(KeyCode::Left));
        assert_eq!(keys.held(), &[KeyCode::Up, KeyCode::Left]);

        assert!(!keys.update(&KeyEvent::release(KeyCode::Up)));
        assert!(!keys.has_key_pressed(KeyCode::Up));
        assert!(keys.has_key_pressed(KeyCode::Left));
    }

    #[test]
    fn test_keyboard_state_repeat_does_not_duplicate() {
        let mut keys = KeyboardState::new();
        keys.update(&KeyEvent::press(KeyCode::Right));
        keys.update(&KeyEvent::with_kind(
            KeyCode::Right,
            KeyModifiers::NONE,
            KeyEventKind::Repeat,
        ));
        assert_eq!(keys.held(), &[KeyCode::Right]);

        keys.reset();
        assert!(keys.held().is_empty());
    }

    #[test]
    fn test_crossterm_conversion() {
        let ct = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Left,
            crossterm::event::KeyModifiers::SHIFT,
        );
        let event = KeyEvent::from(ct);
        assert_eq!(event.code, KeyCode::Left);
        assert_eq!(event.modifiers, KeyModifiers::SHIFT);
        assert!(event.is_down());
    }
}
