//! # swatch picker
//!
//! The interaction engines behind an embeddable color picker.
//!
//! - [`ColorEngine`] keeps normalized HSV+alpha state and maps pointer and
//!   keyboard input on the board, hue and alpha surfaces to new state,
//!   reporting each change as [`Rgba`](swatch_core::Rgba).
//! - [`compute_placement`] picks the quadrant the dialog opens into.
//! - [`DialogController`] opens and closes the dialog, dismisses it on
//!   outside pointer-downs and debounces scroll-driven repositioning.
//! - [`ColorPicker`] ties them to a [`Host`] and owns every listener
//!   registration for its lifetime.
//!
//! ```
//! use swatch_core::Rgba;
//! use swatch_input::{KeyCode, PointerEvent};
//! use swatch_picker::ColorEngine;
//! use swatch_core::Size;
//!
//! let mut engine = ColorEngine::new(Rgba::RED);
//! engine.alpha_pointer(&PointerEvent::left(50.0, 0.0), 100.0);
//! assert_eq!(engine.rgba(), Rgba::new(255, 0, 0, 0.5));
//!
//! engine.board_key_down(&[KeyCode::Down][..]);
//! assert!((engine.state().v() - 0.99).abs() < 1e-9);
//!
//! engine.board_pointer(&PointerEvent::left(0.0, 0.0), Size::new(100.0, 100.0));
//! assert_eq!(engine.rgba(), Rgba::new(255, 255, 255, 0.5));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]

pub mod color_state;
pub mod config;
pub mod debounce;
pub mod dialog;
pub mod error;
pub mod host;
pub mod picker;
pub mod placement;
pub mod surface;
pub mod view;

pub use color_state::{ChangeCallback, ColorEngine, ColorState};
pub use config::{ColorChannels, ColorSpec, PickerConfig};
pub use debounce::Debouncer;
pub use dialog::{DialogController, Visibility};
pub use error::{ConfigError, ConfigResult};
pub use host::{DocumentEvent, Host, ListenerId, ListenerTarget, NodeId, Subscription};
pub use picker::ColorPicker;
pub use placement::{compute_placement, DialogPlacement, Horizontal, Vertical};
pub use surface::{Surface, SurfaceChannel};
pub use view::{Percent, PickerView, StyleMap};
