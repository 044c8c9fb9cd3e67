//! Normalized HSV+alpha state and the engine that drives it from input.
//!
//! [`ColorState`] is the single source of truth: RGBA output is derived from
//! it on demand and never stored, so repeated RGB↔HSV conversions cannot
//! accumulate error.
//!
//! [`ColorEngine`] maps pointer and keyboard input on each surface to a new
//! state and reports every user-driven change through its `on_change`
//! callback. [`ColorEngine::set_color`] is the one mutation that stays silent.

use crate::surface::Surface;
use serde::Serialize;
use std::fmt;
use swatch_core::{hsv_to_rgb, rgb_to_hsv, Rgba, Size};
use swatch_input::{KeyCode, KeyQuery, PointerEvent, SurfaceInput};
use tracing::{debug, trace};

/// Keyboard step for saturation, value and alpha.
pub const KEY_STEP: f64 = 0.01;

/// Keyboard step for hue (1% of the circle).
pub const HUE_KEY_STEP: f64 = 3.6;

/// Upper bound of the hue range.
pub const MAX_HUE: f64 = 360.0;

// ============================================================================
// ColorState
// ============================================================================

/// Hue in degrees `[0, 360]`, saturation, value and alpha in `[0, 1]`.
///
/// Every constructor and mutation clamps, so the fields are always in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorState {
    h: f64,
    s: f64,
    v: f64,
    a: f64,
}

impl ColorState {
    /// Creates a state, clamping each component into range.
    #[must_use]
    pub fn new(h: f64, s: f64, v: f64, a: f64) -> Self {
        Self {
            h: clamp(h, 0.0, MAX_HUE),
            s: clamp(s, 0.0, 1.0),
            v: clamp(v, 0.0, 1.0),
            a: clamp(a, 0.0, 1.0),
        }
    }

    /// Converts an RGBA color, rescaling the converter's 0-100 s/v to 0-1.
    #[must_use]
    pub fn from_rgba(color: Rgba) -> Self {
        let (h, s, v) = rgb_to_hsv(color.r, color.g, color.b);
        Self::new(h, s / 100.0, v / 100.0, color.a)
    }

    /// Renders the state as RGBA.
    #[must_use]
    pub fn to_rgba(&self) -> Rgba {
        let (r, g, b) = hsv_to_rgb(self.h, self.s * 100.0, self.v * 100.0);
        Rgba::new(r, g, b, self.a)
    }

    /// The fully saturated, full-value color at this hue.
    #[must_use]
    pub fn pure_hue(&self) -> Rgba {
        let (r, g, b) = hsv_to_rgb(self.h, 100.0, 100.0);
        Rgba::rgb(r, g, b)
    }

    /// Hue in degrees.
    #[must_use]
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Saturation.
    #[must_use]
    pub fn s(&self) -> f64 {
        self.s
    }

    /// Value (brightness).
    #[must_use]
    pub fn v(&self) -> f64 {
        self.v
    }

    /// Alpha.
    #[must_use]
    pub fn a(&self) -> f64 {
        self.a
    }
}

impl Default for ColorState {
    fn default() -> Self {
        Self::from_rgba(Rgba::default())
    }
}

impl From<Rgba> for ColorState {
    fn from(color: Rgba) -> Self {
        Self::from_rgba(color)
    }
}

impl fmt::Display for ColorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsva({:.1}, {:.3}, {:.3}, {:.3})",
            self.h, self.s, self.v, self.a
        )
    }
}

/// Clamps `value` into `[min, max]`, mapping NaN to `min`.
fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// Position along an extent as a ratio in `[0, 1]`.
///
/// A surface with no extent yields 0 instead of dividing by zero.
fn ratio(offset: f64, extent: f64) -> f64 {
    if extent > 0.0 && extent.is_finite() {
        clamp(offset, 0.0, extent) / extent
    } else {
        0.0
    }
}

// ============================================================================
// ColorEngine
// ============================================================================

/// Callback invoked with the rendered color after each user-driven change.
pub type ChangeCallback = Box<dyn FnMut(Rgba)>;

/// Owns the [`ColorState`] and turns surface input into state changes.
pub struct ColorEngine {
    state: ColorState,
    on_change: ChangeCallback,
}

impl ColorEngine {
    /// Creates an engine from an initial color with a no-op callback.
    #[must_use]
    pub fn new(initial: Rgba) -> Self {
        Self {
            state: ColorState::from_rgba(initial),
            on_change: Box::new(|_| {}),
        }
    }

    /// Builder-style variant of [`set_on_change`](Self::set_on_change).
    #[must_use]
    pub fn with_on_change(mut self, callback: impl FnMut(Rgba) + 'static) -> Self {
        self.set_on_change(callback);
        self
    }

    /// Replaces the change callback.
    pub fn set_on_change(&mut self, callback: impl FnMut(Rgba) + 'static) {
        self.on_change = Box::new(callback);
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> ColorState {
        self.state
    }

    /// The current color as RGBA.
    #[must_use]
    pub fn rgba(&self) -> Rgba {
        self.state.to_rgba()
    }

    /// Replaces the state from an external color without notifying.
    pub fn set_color(&mut self, color: Rgba) {
        self.state = ColorState::from_rgba(color);
        debug!(color = %color, state = %self.state, "color set externally");
    }

    /// Routes normalized input to the handler for `surface`.
    ///
    /// `size` is the surface's current extent. Returns false if the input was
    /// ignored.
    pub fn handle(&mut self, surface: Surface, input: SurfaceInput<'_>, size: Size) -> bool {
        match (surface, input) {
            (Surface::Board, SurfaceInput::Pointer(event)) => self.board_pointer(&event, size),
            (Surface::Hue, SurfaceInput::Pointer(event)) => self.hue_pointer(&event, size.width),
            (Surface::Alpha, SurfaceInput::Pointer(event)) => {
                self.alpha_pointer(&event, size.width)
            }
            (Surface::Board, SurfaceInput::KeyDown(keys)) => {
                self.board_key_down(keys);
                true
            }
            (Surface::Hue, SurfaceInput::KeyDown(keys)) => {
                self.hue_key_down(keys);
                true
            }
            (Surface::Alpha, SurfaceInput::KeyDown(keys)) => {
                self.alpha_key_down(keys);
                true
            }
        }
    }

    /// Pointer press or drag on the saturation/value board.
    ///
    /// `s` follows x left to right, `v` follows y bottom to top.
    pub fn board_pointer(&mut self, event: &PointerEvent, size: Size) -> bool {
        if !event.is_left_button {
            trace!(surface = "board", "ignoring non-left button");
            return false;
        }
        let s = ratio(event.position.x, size.width);
        let v = 1.0 - ratio(event.position.y, size.height);
        self.change(ColorState::new(self.state.h, s, v, self.state.a));
        true
    }

    /// Key-down on the board: Up/Down adjust value, Left/Right saturation.
    ///
    /// Up wins over Down and Left over Right when both are held.
    pub fn board_key_down(&mut self, keys: &(impl KeyQuery + ?Sized)) {
        let ColorState { h, mut s, mut v, a } = self.state;

        if keys.has_key_pressed(KeyCode::Up) {
            v += KEY_STEP;
        } else if keys.has_key_pressed(KeyCode::Down) {
            v -= KEY_STEP;
        }

        if keys.has_key_pressed(KeyCode::Left) {
            s -= KEY_STEP;
        } else if keys.has_key_pressed(KeyCode::Right) {
            s += KEY_STEP;
        }

        self.change(ColorState::new(h, s, v, a));
    }

    /// Pointer press or drag on the hue strip. The strip is reversed: x = 0
    /// is hue 360 and x = width is hue 0.
    pub fn hue_pointer(&mut self, event: &PointerEvent, width: f64) -> bool {
        if !event.is_left_button {
            trace!(surface = "hue", "ignoring non-left button");
            return false;
        }
        let h = (1.0 - ratio(event.position.x, width)) * MAX_HUE;
        self.change(ColorState::new(h, self.state.s, self.state.v, self.state.a));
        true
    }

    /// Key-down on the hue strip: Left raises hue, Right lowers it.
    ///
    /// Clamps at both ends; hue never wraps around.
    pub fn hue_key_down(&mut self, keys: &(impl KeyQuery + ?Sized)) {
        let ColorState { mut h, s, v, a } = self.state;

        if keys.has_key_pressed(KeyCode::Left) {
            h += HUE_KEY_STEP;
        } else if keys.has_key_pressed(KeyCode::Right) {
            h -= HUE_KEY_STEP;
        }

        self.change(ColorState::new(h, s, v, a));
    }

    /// Pointer press or drag on the alpha strip.
    pub fn alpha_pointer(&mut self, event: &PointerEvent, width: f64) -> bool {
        if !event.is_left_button {
            trace!(surface = "alpha", "ignoring non-left button");
            return false;
        }
        let a = ratio(event.position.x, width);
        self.change(ColorState::new(self.state.h, self.state.s, self.state.v, a));
        true
    }

    /// Key-down on the alpha strip: Left lowers alpha, Right raises it.
    pub fn alpha_key_down(&mut self, keys: &(impl KeyQuery + ?Sized)) {
        let ColorState { h, s, v, mut a } = self.state;

        if keys.has_key_pressed(KeyCode::Left) {
            a -= KEY_STEP;
        } else if keys.has_key_pressed(KeyCode::Right) {
            a += KEY_STEP;
        }

        self.change(ColorState::new(h, s, v, a));
    }

    fn change(&mut self, next: ColorState) {
        self.state = next;
        let rgba = next.to_rgba();
        debug!(state = %next, color = %rgba, "color changed");
        (self.on_change)(rgba);
    }
}

impl Default for ColorEngine {
    fn default() -> Self {
        Self::new(Rgba::default())
    }
}

impl fmt::Debug for ColorEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorEngine")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
