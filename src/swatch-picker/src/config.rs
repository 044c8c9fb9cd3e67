//! Picker configuration.

use std::path::Path;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use swatch_core::{Rgba, Size};

use crate::error::{ConfigError, ConfigResult};
use crate::view::StyleMap;

/// Environment variable overriding [`PickerConfig::dialog_width`].
pub const ENV_DIALOG_WIDTH: &str = "SWATCH_DIALOG_WIDTH";
/// Environment variable overriding [`PickerConfig::dialog_height`].
pub const ENV_DIALOG_HEIGHT: &str = "SWATCH_DIALOG_HEIGHT";
/// Environment variable overriding [`PickerConfig::scroll_debounce_ms`].
pub const ENV_SCROLL_DEBOUNCE_MS: &str = "SWATCH_SCROLL_DEBOUNCE_MS";

/// Picker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Initial color. Channels left out are picked at random.
    #[serde(default)]
    pub color: Option<ColorSpec>,

    /// Dialog width in pixels.
    #[serde(default = "default_dialog_width")]
    pub dialog_width: f64,

    /// Dialog height in pixels.
    #[serde(default = "default_dialog_height")]
    pub dialog_height: f64,

    /// Quiet period before a scroll burst repositions the dialog.
    #[serde(default)]
    pub scroll_debounce_ms: u64,

    /// Extra classes on the picker root.
    #[serde(default)]
    pub class_name: String,

    /// Style declarations on the picker root.
    #[serde(default)]
    pub style: StyleMap,

    /// Extra classes on the swatch.
    #[serde(default)]
    pub palette_class_name: String,

    /// Style declarations on the swatch.
    #[serde(default)]
    pub palette_style: StyleMap,
}

fn default_dialog_width() -> f64 {
    200.0
}

fn default_dialog_height() -> f64 {
    190.0
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            color: None,
            dialog_width: default_dialog_width(),
            dialog_height: default_dialog_height(),
            scroll_debounce_ms: 0,
            class_name: String::new(),
            style: StyleMap::new(),
            palette_class_name: String::new(),
            palette_style: StyleMap::new(),
        }
    }
}

/// How the initial color is written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// `"#RRGGBB"` and the other forms [`Rgba::from_hex`] accepts.
    Hex(String),
    /// A table of channels, any of which may be omitted.
    Channels(ColorChannels),
}

/// Individually optional RGBA channels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorChannels {
    /// Red.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<u8>,
    /// Green.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g: Option<u8>,
    /// Blue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<u8>,
    /// Alpha.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl From<Rgba> for ColorSpec {
    fn from(color: Rgba) -> Self {
        ColorSpec::Channels(ColorChannels {
            r: Some(color.r),
            g: Some(color.g),
            b: Some(color.b),
            a: Some(color.a),
        })
    }
}

impl ColorSpec {
    /// Resolves to a concrete color, filling missing channels.
    pub fn resolve(&self) -> ConfigResult<Rgba> {
        match self {
            ColorSpec::Hex(hex) => Ok(Rgba::from_hex(hex)?),
            ColorSpec::Channels(channels) => Ok(channels.resolve()),
        }
    }
}

impl ColorChannels {
    /// Fills missing r/g/b with random values in `[0, 255)` and alpha with 1.
    pub fn resolve(&self) -> Rgba {
        let mut rng = rand::rng();
        let mut channel = |value: Option<u8>| value.unwrap_or_else(|| rng.random_range(0..255));
        Rgba::new(
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a.unwrap_or(1.0),
        )
    }
}

impl PickerConfig {
    /// Loads configuration from a TOML file and validates it.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text and validates it.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Applies `SWATCH_*` environment overrides.
    pub fn apply_env(&mut self) -> ConfigResult<()> {
        self.apply_overrides(std::env::vars())
    }

    /// Applies overrides from `(name, value)` pairs; unknown names are ignored.
    pub fn apply_overrides<I, K, V>(&mut self, vars: I) -> ConfigResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            match key {
                ENV_DIALOG_WIDTH => self.dialog_width = parse_env(key, value)?,
                ENV_DIALOG_HEIGHT => self.dialog_height = parse_env(key, value)?,
                ENV_SCROLL_DEBOUNCE_MS => self.scroll_debounce_ms = parse_env(key, value)?,
                _ => {}
            }
        }
        self.validate()
    }

    /// Checks value ranges.
    pub fn validate(&self) -> ConfigResult<()> {
        for (key, value) in [
            ("dialog_width", self.dialog_width),
            ("dialog_height", self.dialog_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::invalid(key, format!("must be positive, got {value}")));
            }
        }

        match &self.color {
            Some(ColorSpec::Channels(ColorChannels { a: Some(a), .. }))
                if !(0.0..=1.0).contains(a) =>
            {
                Err(ConfigError::invalid("color.a", format!("must be within [0, 1], got {a}")))
            }
            Some(ColorSpec::Hex(hex)) => Rgba::from_hex(hex).map(|_| ()).map_err(Into::into),
            _ => Ok(()),
        }
    }

    /// The initial color, random where unspecified.
    pub fn initial_color(&self) -> ConfigResult<Rgba> {
        match &self.color {
            Some(spec) => spec.resolve(),
            None => Ok(ColorChannels::default().resolve()),
        }
    }

    /// Dialog size.
    pub fn dialog_size(&self) -> Size {
        Size::new(self.dialog_width, self.dialog_height)
    }

    /// Scroll debounce as a `Duration`.
    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms)
    }
}

fn parse_env<T>(key: &str, value: &str) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| ConfigError::invalid(key, format!("'{value}': {e}")))
}
