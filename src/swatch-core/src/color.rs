//! RGBA color representation and the RGB↔HSV converter.
//!
//! Two representations live here:
//!
//! - [`Rgba`]: the picker's output format, integer RGB channels (0-255)
//!   with a floating alpha (0.0-1.0).
//! - The converter pair [`rgb_to_hsv`] / [`hsv_to_rgb`], which speak HSV with
//!   hue in degrees and saturation/value on a 0-100 scale.
//!
//! # Examples
//!
//! ```
//! use swatch_core::color::{hsv_to_rgb, rgb_to_hsv, Rgba};
//!
//! let orange = Rgba::from_hex("#FF8000").unwrap();
//! assert_eq!(orange.to_css(), "rgba(255, 128, 0, 1)");
//!
//! let (h, s, v) = rgb_to_hsv(orange.r, orange.g, orange.b);
//! assert_eq!(hsv_to_rgb(h, s, v), (255, 128, 0));
//! ```

use crate::error::ColorParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGBA color with integer RGB channels and a normalized alpha.
///
/// - `r`, `g`, `b`: 0-255
/// - `a`: 0.0 (fully transparent) to 1.0 (fully opaque)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha (0.0 - 1.0).
    #[serde(default = "default_alpha")]
    pub a: f64,
}

fn default_alpha() -> f64 {
    1.0
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_css())
    }
}

// ============================================================================
// Constants and constructors
// ============================================================================

impl Rgba {
    /// Opaque black, the value `set_color` falls back to.
    pub const BLACK: Self = Self::new(0, 0, 0, 1.0);

    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 1.0);

    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 1.0);

    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 1.0);

    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 1.0);

    /// Creates a color from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Returns whether the alpha channel is (approximately) fully opaque.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a >= 0.999
    }

    /// Returns the RGB channels as a tuple.
    #[inline]
    pub const fn to_rgb_u8(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

// ============================================================================
// Hex parsing and CSS formatting
// ============================================================================

impl Rgba {
    /// Parses a color from a hex string.
    ///
    /// Accepts `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA`; the `#` is optional.
    /// A trailing alpha byte maps to `a = byte / 255`.
    ///
    /// ```
    /// use swatch_core::color::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("f00").unwrap(), Rgba::RED);
    /// assert!(Rgba::from_hex("#12345").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if hex.is_empty() {
            return Err(ColorParseError::EmptyInput);
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHexChar);
        }

        let expanded: String = match hex.len() {
            3 | 4 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => hex.to_string(),
            len => return Err(ColorParseError::InvalidLength(len)),
        };

        let parse_component = |s: &str| -> Result<u8, ColorParseError> {
            u8::from_str_radix(s, 16).map_err(|_| ColorParseError::InvalidHexChar)
        };

        let r = parse_component(&expanded[0..2])?;
        let g = parse_component(&expanded[2..4])?;
        let b = parse_component(&expanded[4..6])?;
        let a = if expanded.len() == 8 {
            f64::from(parse_component(&expanded[6..8])?) / 255.0
        } else {
            1.0
        };

        Ok(Self::new(r, g, b, a))
    }

    /// Converts the color to a hex string.
    ///
    /// Returns `#RRGGBB` for opaque colors or `#RRGGBBAA` otherwise.
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            let alpha = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, alpha)
        }
    }

    /// Formats the color as a CSS `rgba(...)` function.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    /// Formats the RGB channels as a CSS `rgb(...)` function.
    pub fn to_css_rgb(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

// ============================================================================
// HSV conversion
// ============================================================================

/// Converts RGB channels to HSV.
///
/// Returns `(h, s, v)` with hue in degrees `[0, 360)` and saturation/value
/// on the converter's `[0, 100]` scale.
#[allow(clippy::many_single_char_names)]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };

    (h, s * 100.0, v * 100.0)
}

/// Converts HSV to RGB channels.
///
/// - `h`: hue in degrees, wraps around (`360` is red, like `0`)
/// - `s`, `v`: saturation and value on a `[0, 100]` scale, clamped
///
/// Channels are rounded to the nearest integer.
#[allow(clippy::many_single_char_names)]
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0);
    let s = (s / 100.0).clamp(0.0, 1.0);
    let v = (v / 100.0).clamp(0.0, 1.0);

    let sector = ((h / 60.0).floor() as u8) % 6;
    let f = h / 60.0 - (h / 60.0).floor();

    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        5 => (v, p, q),
        _ => unreachable!(),
    };

    (to_channel(r), to_channel(g), to_channel(b))
}

#[inline]
fn to_channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    mod hex_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_from_hex_6digit() {
            let c = Rgba::from_hex("#FF8000").unwrap();
            assert_eq!(c, Rgba::rgb(255, 128, 0));
        }

        #[test]
        fn test_from_hex_8digit() {
            let c = Rgba::from_hex("#FF800080").unwrap();
            assert_eq!(c.to_rgb_u8(), (255, 128, 0));
            assert!((c.a - 128.0 / 255.0).abs() < 1e-9);
        }

        #[test]
        fn test_from_hex_shorthand() {
            assert_eq!(Rgba::from_hex("#F80").unwrap(), Rgba::rgb(255, 136, 0));

            let c = Rgba::from_hex("F808").unwrap();
            assert_eq!(c.to_rgb_u8(), (255, 136, 0));
            assert!((c.a - 136.0 / 255.0).abs() < 1e-9);
        }

        #[test]
        fn test_from_hex_errors() {
            assert_eq!(Rgba::from_hex("#"), Err(ColorParseError::EmptyInput));
            assert_eq!(
                Rgba::from_hex("#12345"),
                Err(ColorParseError::InvalidLength(5))
            );
            assert_eq!(
                Rgba::from_hex("#GGGGGG"),
                Err(ColorParseError::InvalidHexChar)
            );
            assert_eq!(Rgba::from_hex("#ééé"), Err(ColorParseError::InvalidHexChar));
        }

        #[test]
        fn test_from_hex_rejects_signs() {
            assert_eq!(
                Rgba::from_hex("#+f+f+f"),
                Err(ColorParseError::InvalidHexChar)
            );
            assert_eq!(Rgba::from_hex("-ff"), Err(ColorParseError::InvalidHexChar));
        }

        #[test]
        fn test_to_hex() {
            assert_eq!(Rgba::RED.to_hex(), "#FF0000");
            assert_eq!(Rgba::new(255, 0, 0, 0.5).to_hex(), "#FF000080");
        }
    }

    mod css_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_to_css() {
            assert_eq!(Rgba::new(12, 34, 56, 0.5).to_css(), "rgba(12, 34, 56, 0.5)");
            assert_eq!(Rgba::WHITE.to_css(), "rgba(255, 255, 255, 1)");
            assert_eq!(Rgba::WHITE.to_css_rgb(), "rgb(255, 255, 255)");
        }

        #[test]
        fn test_deserialize_defaults_alpha() {
            let c: Rgba = serde_json::from_str(r#"{"r":1,"g":2,"b":3}"#).unwrap();
            assert_eq!(c, Rgba::rgb(1, 2, 3));
        }
    }

    mod hsv_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_primaries() {
            assert_eq!(hsv_to_rgb(0.0, 100.0, 100.0), (255, 0, 0));
            assert_eq!(hsv_to_rgb(120.0, 100.0, 100.0), (0, 255, 0));
            assert_eq!(hsv_to_rgb(240.0, 100.0, 100.0), (0, 0, 255));
        }

        #[test]
        fn test_full_turn_is_red() {
            assert_eq!(hsv_to_rgb(360.0, 100.0, 100.0), (255, 0, 0));
        }

        #[test]
        fn test_rgb_to_hsv_scale() {
            let (h, s, v) = rgb_to_hsv(255, 0, 0);
            assert_eq!((h, s, v), (0.0, 100.0, 100.0));

            let (h, s, v) = rgb_to_hsv(0, 0, 0);
            assert_eq!((h, s, v), (0.0, 0.0, 0.0));

            let (h, _, _) = rgb_to_hsv(255, 0, 128);
            assert!((0.0..360.0).contains(&h));
        }

        #[test]
        fn test_grayscale_has_no_saturation() {
            let (_, s, v) = rgb_to_hsv(128, 128, 128);
            assert_eq!(s, 0.0);
            assert!((v - 128.0 / 255.0 * 100.0).abs() < 1e-9);
        }

        #[test]
        fn test_roundtrip_across_cube() {
            for r in (0..=255u8).step_by(15) {
                for g in (0..=255u8).step_by(17) {
                    for b in (0..=255u8).step_by(51) {
                        let (h, s, v) = rgb_to_hsv(r, g, b);
                        assert_eq!(hsv_to_rgb(h, s, v), (r, g, b), "rgb({r}, {g}, {b})");
                    }
                }
            }
        }

        #[test]
        fn test_out_of_range_saturation_is_clamped() {
            assert_eq!(hsv_to_rgb(0.0, 150.0, 100.0), (255, 0, 0));
            assert_eq!(hsv_to_rgb(0.0, 100.0, -5.0), (0, 0, 0));
        }
    }
}
