//! Core types for the `swatch` color picker.
//!
//! - [`color`]: the [`Rgba`] output type and the RGB↔HSV converter
//! - [`geometry`]: [`Point`], [`Size`] and [`Rect`] in device-independent pixels
//! - [`error`]: error types for color parsing
//!
//! # Examples
//!
//! ```
//! use swatch_core::{hsv_to_rgb, rgb_to_hsv, Rect, Rgba};
//!
//! let teal = Rgba::from_hex("#008080").unwrap();
//! let (h, s, v) = rgb_to_hsv(teal.r, teal.g, teal.b);
//! assert_eq!(hsv_to_rgb(h, s, v), (0, 128, 128));
//!
//! let swatch = Rect::new(16.0, 480.0, 24.0, 20.0);
//! assert_eq!(swatch.bottom(), 500.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::many_single_char_names)]

pub mod color;
pub mod error;
pub mod geometry;

pub use color::{hsv_to_rgb, rgb_to_hsv, Rgba};
pub use error::{ColorParseError, ColorParseResult};
pub use geometry::{Point, Rect, Size};
