//! Values a presentation shell needs to draw the picker.

use crate::color_state::{ColorState, MAX_HUE};
use crate::placement::DialogPlacement;
use serde::Serialize;
use std::collections::BTreeMap;
use swatch_core::Size;

/// Opaque CSS-style declarations, passed through untouched.
pub type StyleMap = BTreeMap<String, String>;

/// A position expressed in percent of the containing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Percent {
    /// Offset from the top edge.
    pub top: f64,
    /// Offset from the left edge.
    pub left: f64,
}

/// Snapshot of everything the shell renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickerView {
    /// Root class list.
    pub class_name: String,
    /// Root style.
    pub style: StyleMap,
    /// Swatch class list.
    pub palette_class_name: String,
    /// Swatch style: the current color as `background-color`, then the
    /// configured declarations.
    pub palette_style: StyleMap,
    /// Dialog class list, including placement and `show` while open.
    pub dialog_class_name: String,
    /// Whether the dialog is showing.
    pub open: bool,
    /// Where the dialog is anchored.
    pub placement: DialogPlacement,
    /// Dialog size; only set while open.
    pub dialog_size: Option<Size>,
    /// Board background: the pure hue.
    pub board_background: String,
    /// Board pointer position.
    pub board_pointer: Percent,
    /// Hue thumb offset in percent (the strip is reversed).
    pub hue_thumb_left: f64,
    /// Alpha thumb offset in percent.
    pub alpha_thumb_left: f64,
    /// Alpha strip gradient, transparent to the opaque current color.
    pub alpha_gradient: String,
}

/// Decorations configured by the embedder.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Decorations {
    pub class_name: String,
    pub style: StyleMap,
    pub palette_class_name: String,
    pub palette_style: StyleMap,
}

impl PickerView {
    pub(crate) fn build(
        state: &ColorState,
        decorations: &Decorations,
        open: bool,
        placement: DialogPlacement,
        dialog_size: Size,
    ) -> Self {
        let color = state.to_rgba();

        let mut palette_style = StyleMap::new();
        palette_style.insert("background-color".to_string(), color.to_css());
        palette_style.extend(
            decorations
                .palette_style
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        let placement_class = placement.class_name();
        let dialog_class_name = join_classes(&[
            "color-picker-dialog",
            if open { "show" } else { "" },
            &placement_class,
        ]);

        Self {
            class_name: join_classes(&["color-picker", &decorations.class_name]),
            style: decorations.style.clone(),
            palette_class_name: join_classes(&["color-palette", &decorations.palette_class_name]),
            palette_style,
            dialog_class_name,
            open,
            placement,
            dialog_size: open.then_some(dialog_size),
            board_background: state.pure_hue().to_css_rgb(),
            board_pointer: Percent {
                top: (1.0 - state.v()) * 100.0,
                left: state.s() * 100.0,
            },
            hue_thumb_left: (1.0 - state.h() / MAX_HUE) * 100.0,
            alpha_thumb_left: state.a() * 100.0,
            alpha_gradient: format!(
                "linear-gradient(to right, transparent, {})",
                color.to_css_rgb()
            ),
        }
    }
}

fn join_classes(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
