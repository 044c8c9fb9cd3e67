//! # swatch input
//!
//! The pointer/keyboard adapter in front of the color picker's surfaces.
//!
//! - **Keyboard**: key codes, modifiers, and [`KeyboardState`], which tracks
//!   held keys so a key-down handler can ask [`KeyQuery::has_key_pressed`].
//! - **Mouse**: raw [`MouseEvent`]s, drag detection via [`MouseState`], and the
//!   normalized [`PointerEvent`] (`is_left_button` + surface-relative position).
//! - **Adapter**: [`InputAdapter`] combines both trackers and yields
//!   [`SurfaceInput`] values ready for the picker.
//!
//! Every type converts from its `crossterm` counterpart, so a terminal host can
//! forward events unchanged.
//!
//! ```
//! use swatch_core::Point;
//! use swatch_input::{InputAdapter, InputEvent, MouseButton, MouseEvent, SurfaceInput};
//!
//! let mut adapter = InputAdapter::new();
//! let press = InputEvent::Mouse(MouseEvent::down(MouseButton::Left, 40.0, 25.0));
//!
//! if let Some(SurfaceInput::Pointer(pointer)) = adapter.feed(&press, Point::new(30.0, 20.0)) {
//!     assert_eq!(pointer.position, Point::new(10.0, 5.0));
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::match_same_arms)]

pub mod event;
pub mod keyboard;
pub mod mouse;

pub use event::{InputAdapter, InputEvent, SurfaceInput};
pub use keyboard::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyQuery, KeyboardState};
pub use mouse::{MouseButton, MouseEvent, MouseEventKind, MouseState, PointerEvent};
