//! Replay scripts: page geometry plus a list of input steps.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use swatch_core::{Rect, Size};
use swatch_input::{KeyCode, MouseButton};
use swatch_picker::{ColorSpec, Surface};

/// A replay script.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    /// Where things are on the page.
    #[serde(default)]
    pub layout: Layout,
    /// Steps, in order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Page geometry in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Layout {
    /// The viewport.
    #[serde(default = "default_viewport")]
    pub viewport: Size,
    /// The swatch.
    #[serde(default = "default_swatch")]
    pub swatch: Rect,
    /// The saturation/value board.
    #[serde(default = "default_board")]
    pub board: Rect,
    /// The hue strip.
    #[serde(default = "default_hue")]
    pub hue: Rect,
    /// The alpha strip.
    #[serde(default = "default_alpha")]
    pub alpha: Rect,
}

fn default_viewport() -> Size {
    Size::new(1024.0, 768.0)
}

fn default_swatch() -> Rect {
    Rect::new(20.0, 20.0, 24.0, 20.0)
}

fn default_board() -> Rect {
    Rect::new(28.0, 48.0, 184.0, 130.0)
}

fn default_hue() -> Rect {
    Rect::new(28.0, 186.0, 184.0, 10.0)
}

fn default_alpha() -> Rect {
    Rect::new(28.0, 204.0, 184.0, 10.0)
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            viewport: default_viewport(),
            swatch: default_swatch(),
            board: default_board(),
            hue: default_hue(),
            alpha: default_alpha(),
        }
    }
}

impl Layout {
    /// The rectangle of a surface.
    pub fn surface(&self, surface: Surface) -> Rect {
        match surface {
            Surface::Board => self.board,
            Surface::Hue => self.hue,
            Surface::Alpha => self.alpha,
        }
    }

    /// Moves every element vertically by `-dy`, as scrolling the page down does.
    pub fn scroll_by(&mut self, dy: f64) {
        for rect in [
            &mut self.swatch,
            &mut self.board,
            &mut self.hue,
            &mut self.alpha,
        ] {
            rect.y -= dy;
        }
    }
}

/// Mouse actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseAction {
    /// Press.
    Down,
    /// Release.
    Up,
    /// Move (a drag while a button is held).
    Move,
}

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// A mouse event at viewport coordinates.
    Mouse {
        /// What the mouse does.
        action: MouseAction,
        /// X in the viewport.
        x: f64,
        /// Y in the viewport.
        y: f64,
        /// Which button.
        #[serde(default)]
        button: MouseButton,
    },
    /// A key press (or release) while `surface` has focus.
    Key {
        /// The focused surface.
        surface: Surface,
        /// The key.
        key: KeyCode,
        /// Release instead of press.
        #[serde(default)]
        release: bool,
    },
    /// Scroll the page down by `dy` pixels.
    Scroll {
        /// Distance scrolled.
        dy: f64,
    },
    /// Resize the viewport.
    Resize {
        /// New width.
        width: f64,
        /// New height.
        height: f64,
    },
    /// Advance the clock.
    Wait {
        /// Milliseconds to advance.
        ms: u64,
    },
    /// Set the color programmatically.
    SetColor {
        /// The color.
        color: ColorSpec,
    },
    /// Close the dialog programmatically.
    Hide,
    /// Emit the current view.
    View,
}

impl Script {
    /// Reads a script from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid script {}", path.display()))
    }

    /// Parses a script from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse script TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_steps() {
        let script = Script::parse(
            r##"
            [layout]
            viewport = { width = 800, height = 600 }

            [[steps]]
            kind = "mouse"
            action = "down"
            x = 30
            y = 25

            [[steps]]
            kind = "key"
            surface = "hue"
            key = "left"

            [[steps]]
            kind = "set_color"
            color = "#00ff00"

            [[steps]]
            kind = "wait"
            ms = 16
            "##,
        )
        .unwrap();

        assert_eq!(script.layout.viewport, Size::new(800.0, 600.0));
        assert_eq!(script.layout.board, default_board());
        assert_eq!(
            script.steps,
            vec![
                Step::Mouse {
                    action: MouseAction::Down,
                    x: 30.0,
                    y: 25.0,
                    button: MouseButton::Left,
                },
                Step::Key {
                    surface: Surface::Hue,
                    key: KeyCode::Left,
                    release: false,
                },
                Step::SetColor {
                    color: ColorSpec::Hex("#00ff00".to_string()),
                },
                Step::Wait { ms: 16 },
            ]
        );
    }

    #[test]
    fn test_unknown_step_is_an_error() {
        let err = Script::parse("[[steps]]\nkind = \"teleport\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("parse script"));
    }

    #[test]
    fn test_scroll_moves_layout() {
        let mut layout = Layout::default();
        layout.scroll_by(15.0);
        assert_eq!(layout.swatch.y, 5.0);
        assert_eq!(layout.surface(Surface::Hue).y, 171.0);
    }
}
