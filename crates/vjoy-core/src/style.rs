//! Joystick style: the host-facing configuration.
//!
//! Options arrive as camelCase keys (`innerRadius`, `timeOut`, ...) so a
//! browser host can hand over a plain object. `StyleOptions` is the partial
//! form merged into a `JoystickStyle`.

use crate::color::Paint;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Extra pixels around the discs so strokes are not clipped.
const SURFACE_PADDING: f32 = 20.0;

/// Fixed-mode page placement: `x` in percent of the viewport width,
/// `y` in percent of the viewport height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Where a dynamic joystick may spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatRange {
    /// A press anywhere in the window spawns the widget.
    #[default]
    Window,
    /// Only presses on the drawing surface spawn it.
    #[serde(alias = "canvas")]
    Surface,
}

/// What to do with option keys the style does not recognize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownKeyPolicy {
    Ignore,
    /// Log a warning and drop the key.
    #[default]
    Warn,
    /// Fail the whole merge with [`ConfigError::UnknownOption`].
    Reject,
}

/// Complete joystick configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JoystickStyle {
    /// Spawn on touch and fade out after release.
    pub dynamic: bool,
    pub pos: Position,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Handle fill.
    pub color: Paint,
    /// Handle stroke.
    pub outline_color: Paint,
    pub line_width: f32,
    pub background_color: Paint,
    pub background_outline_color: Paint,
    pub background_line_width: f32,
    /// Fade-out duration in frames.
    pub time_out: u32,
    pub float_range: FloatRange,
    /// Draw a line from the anchor to the handle.
    pub show_vector: bool,
    pub vector_color: Paint,
}

impl Default for JoystickStyle {
    fn default() -> Self {
        Self {
            dynamic: true,
            pos: Position::default(),
            inner_radius: 15.0,
            outer_radius: 50.0,
            color: Paint::from_css("lightgray"),
            outline_color: Paint::from_css("#222"),
            line_width: 4.0,
            background_color: Paint::None,
            background_outline_color: Paint::from_css("#222"),
            background_line_width: 4.0,
            time_out: 100,
            float_range: FloatRange::Window,
            show_vector: false,
            vector_color: Paint::from_css("green"),
        }
    }
}

impl JoystickStyle {
    /// Side length of the square drawing surface.
    pub fn surface_size(&self) -> f32 {
        self.outer_radius * 2.0 + self.inner_radius + SURFACE_PADDING
    }

    /// Merge recognized options. Unknown keys follow `policy`.
    ///
    /// Under [`UnknownKeyPolicy::Reject`] nothing is applied when any key is unknown.
    pub fn merge(&mut self, options: StyleOptions, policy: UnknownKeyPolicy) -> Result<(), ConfigError> {
        if !options.unknown.is_empty() {
            match policy {
                UnknownKeyPolicy::Reject => {
                    let key = options.unknown.keys().next().cloned().unwrap_or_default();
                    return Err(ConfigError::UnknownOption(key));
                }
                UnknownKeyPolicy::Warn => {
                    for key in options.unknown.keys() {
                        log::warn!("ignoring unknown joystick option `{key}`");
                    }
                }
                UnknownKeyPolicy::Ignore => {}
            }
        }

        let StyleOptions {
            dynamic,
            pos,
            inner_radius,
            outer_radius,
            color,
            outline_color,
            line_width,
            background_color,
            background_outline_color,
            background_line_width,
            time_out,
            float_range,
            show_vector,
            vector_color,
            unknown: _,
        } = options;

        if let Some(v) = dynamic {
            self.dynamic = v;
        }
        if let Some(v) = pos {
            self.pos = v;
        }
        if let Some(v) = inner_radius {
            self.inner_radius = v;
        }
        if let Some(v) = outer_radius {
            self.outer_radius = v;
        }
        if let Some(v) = color {
            self.color = v;
        }
        if let Some(v) = outline_color {
            self.outline_color = v;
        }
        if let Some(v) = line_width {
            self.line_width = v;
        }
        if let Some(v) = background_color {
            self.background_color = v;
        }
        if let Some(v) = background_outline_color {
            self.background_outline_color = v;
        }
        if let Some(v) = background_line_width {
            self.background_line_width = v;
        }
        if let Some(v) = time_out {
            self.time_out = v;
        }
        if let Some(v) = float_range {
            self.float_range = v;
        }
        if let Some(v) = show_vector {
            self.show_vector = v;
        }
        if let Some(v) = vector_color {
            self.vector_color = v;
        }
        Ok(())
    }
}

/// A partial style. Missing keys leave the current value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_outline_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_line_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_out: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub float_range: Option<FloatRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_vector: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_color: Option<Paint>,
    /// Keys the style does not recognize.
    #[serde(flatten)]
    pub unknown: Map<String, Value>,
}

impl StyleOptions {
    /// Parse a JSON object of options.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidOption {
            key: "options".to_string(),
            message: e.to_string(),
        })
    }

    /// A single `key = value` option.
    pub fn single(key: &str, value: Value) -> Result<Self, ConfigError> {
        let mut map = Map::new();
        map.insert(key.to_string(), value);
        serde_json::from_value(Value::Object(map)).map_err(|e| ConfigError::InvalidOption {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Whether the options change the surface geometry.
    pub fn touches_geometry(&self) -> bool {
        self.inner_radius.is_some() || self.outer_radius.is_some() || self.pos.is_some()
    }
}
