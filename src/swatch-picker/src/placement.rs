//! Where the dialog opens relative to the swatch.

use serde::{Deserialize, Serialize};
use std::fmt;
use swatch_core::{Rect, Size};

/// Vertical side of the swatch the dialog opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vertical {
    /// Above the swatch.
    Top,
    /// Below the swatch.
    #[default]
    Bottom,
}

/// Horizontal direction the dialog extends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Horizontal {
    /// Extends to the left.
    Left,
    /// Extends to the right.
    #[default]
    Right,
}

impl Vertical {
    /// Lowercase name, as used in class names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Vertical::Top => "top",
            Vertical::Bottom => "bottom",
        }
    }
}

impl Horizontal {
    /// Lowercase name, as used in class names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Horizontal::Left => "left",
            Horizontal::Right => "right",
        }
    }
}

/// Which quadrant around the swatch the dialog is anchored to.
///
/// Defaults to bottom right, the placement before anything was measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DialogPlacement {
    /// Above or below.
    pub vertical: Vertical,
    /// Left or right.
    pub horizontal: Horizontal,
}

impl DialogPlacement {
    /// Creates a placement.
    #[must_use]
    pub const fn new(vertical: Vertical, horizontal: Horizontal) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// `"<vertical> <horizontal>"`, e.g. `"bottom right"`.
    #[must_use]
    pub fn class_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DialogPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.vertical.as_str(), self.horizontal.as_str())
    }
}

/// Picks the placement for a dialog of `dialog` size anchored at `anchor`.
///
/// Opens below when the space under the anchor exceeds the dialog height and
/// to the right when the space from the anchor's left edge exceeds the dialog
/// width. Depends only on the current geometry.
#[must_use]
pub fn compute_placement(anchor: Rect, dialog: Size, viewport: Size) -> DialogPlacement {
    let vertical = if viewport.height - anchor.bottom() > dialog.height {
        Vertical::Bottom
    } else {
        Vertical::Top
    };
    let horizontal = if viewport.width - anchor.left() > dialog.width {
        Horizontal::Right
    } else {
        Horizontal::Left
    };
    DialogPlacement::new(vertical, horizontal)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIALOG: Size = Size::new(200.0, 190.0);
    const VIEWPORT: Size = Size::new(1024.0, 800.0);

    fn anchor_with_bottom(bottom: f64) -> Rect {
        Rect::new(16.0, bottom - 20.0, 24.0, 20.0)
    }

    #[test]
    fn test_default_is_bottom_right() {
        assert_eq!(DialogPlacement::default().class_name(), "bottom right");
    }

    #[test]
    fn test_room_below_opens_bottom() {
        let placement = compute_placement(anchor_with_bottom(500.0), DIALOG, VIEWPORT);
        assert_eq!(placement.vertical, Vertical::Bottom);
    }

    #[test]
    fn test_near_bottom_edge_opens_top() {
        let placement = compute_placement(anchor_with_bottom(750.0), DIALOG, VIEWPORT);
        assert_eq!(placement.vertical, Vertical::Top);
    }

    #[test]
    fn test_exact_fit_is_not_enough() {
        let placement = compute_placement(anchor_with_bottom(610.0), DIALOG, VIEWPORT);
        assert_eq!(placement.vertical, Vertical::Top);
    }

    #[test]
    fn test_horizontal_uses_anchor_left() {
        let near_right = Rect::new(900.0, 100.0, 24.0, 20.0);
        let placement = compute_placement(near_right, DIALOG, VIEWPORT);
        assert_eq!(placement, DialogPlacement::new(Vertical::Bottom, Horizontal::Left));
        assert_eq!(placement.class_name(), "bottom left");

        let far_left = Rect::new(10.0, 700.0, 24.0, 20.0);
        let placement = compute_placement(far_left, DIALOG, VIEWPORT);
        assert_eq!(placement.class_name(), "top right");
    }

    #[test]
    fn test_no_hysteresis() {
        let viewports = [Size::new(400.0, 800.0), Size::new(400.0, 600.0)];
        let anchor = anchor_with_bottom(500.0);
        let flips: Vec<_> = viewports
            .iter()
            .cycle()
            .take(4)
            .map(|viewport| compute_placement(anchor, DIALOG, *viewport).vertical)
            .collect();
        assert_eq!(
            flips,
            vec![Vertical::Bottom, Vertical::Top, Vertical::Bottom, Vertical::Top]
        );
    }
}
