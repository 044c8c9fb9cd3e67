//! The three interactive surfaces inside the dialog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An input surface of the picker dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// The 2D saturation/value board.
    Board,
    /// The horizontal hue strip (rightmost is hue 0).
    Hue,
    /// The horizontal alpha strip.
    Alpha,
}

impl Surface {
    /// All surfaces, in render order.
    pub const ALL: [Surface; 3] = [Surface::Board, Surface::Hue, Surface::Alpha];

    /// Short lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Surface::Board => "board",
            Surface::Hue => "hue",
            Surface::Alpha => "alpha",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which event channel a surface listener is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceChannel {
    /// Pointer press and drag.
    Pointer,
    /// Key-down.
    Keys,
}
