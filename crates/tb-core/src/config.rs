//! Board configuration.
//!
//! Every field has a default matching the stock board, so a host may pass
//! a partial JSON object (or nothing) and only override what it needs.

use crate::layout::StageMargins;
use crate::model::StrokeStyle;
use crate::persist::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};

/// Where and how new players appear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Unit position of the first player.
    pub origin_x: f64,
    pub origin_y: f64,
    /// Per-player offset so new markers don't stack.
    pub step_x: f64,
    pub step_y: f64,
    /// Hue is `(id * hue_step) % 360`.
    pub hue_step: u32,
    /// Saturation and lightness, in percent.
    pub saturation: f32,
    pub lightness: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            origin_x: 0.2,
            origin_y: 0.2,
            step_x: 0.04,
            step_y: 0.03,
            hue_step: 73,
            saturation: 80.0,
            lightness: 55.0,
        }
    }
}

/// Marker and trail geometry handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Marker radius in surface pixels; also the drag hit radius.
    pub radius: f64,
    /// Label anchor relative to the marker center.
    pub label_dx: f64,
    pub label_dy: f64,
    pub trail_width: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            radius: 20.0,
            label_dx: -6.0,
            label_dy: -8.0,
            trail_width: 4.0,
        }
    }
}

/// Top-level configuration for a board session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Key the player snapshot is stored under.
    pub storage_key: String,
    /// Minimum interval between accepted stroke points, in milliseconds.
    pub draw_throttle_ms: f64,
    /// Pen used for new strokes until the host picks another.
    pub stroke: StrokeStyle,
    pub marker: MarkerConfig,
    pub stage: StageMargins,
    pub spawn: SpawnConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            draw_throttle_ms: 8.0,
            stroke: StrokeStyle::default(),
            marker: MarkerConfig::default(),
            stage: StageMargins::default(),
            spawn: SpawnConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Parse a (possibly partial) JSON config. Blank input yields defaults.
    ///
    /// # Errors
    /// Returns a message if the JSON is malformed or a value has the wrong
    /// type, or if the throttle interval is negative or non-finite.
    pub fn from_json(text: &str) -> Result<Self, String> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: BoardConfig =
            serde_json::from_str(text).map_err(|e| format!("Config parse error: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.draw_throttle_ms.is_finite() && self.draw_throttle_ms >= 0.0) {
            return Err(format!(
                "draw_throttle_ms must be a non-negative number, got {}",
                self.draw_throttle_ms
            ));
        }
        if self.storage_key.is_empty() {
            return Err("storage_key must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_is_default() {
        assert_eq!(BoardConfig::from_json("").unwrap(), BoardConfig::default());
        assert_eq!(BoardConfig::from_json("{}").unwrap(), BoardConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = BoardConfig::from_json(
            r##"{ "draw_throttle_ms": 16, "stroke": { "color": "#f00" }, "marker": { "radius": 12 } }"##,
        )
        .unwrap();
        assert_eq!(config.draw_throttle_ms, 16.0);
        assert_eq!(config.stroke.color, Color::parse("#FF0000").unwrap());
        assert_eq!(config.stroke.width, 3.0);
        assert_eq!(config.marker.radius, 12.0);
        assert_eq!(config.marker.trail_width, 4.0);
        assert_eq!(config.storage_key, "sketch_players_v1");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(BoardConfig::from_json("{ \"draw_throttle_ms\": -1 }").is_err());
        assert!(BoardConfig::from_json("{ \"storage_key\": \"\" }").is_err());
        assert!(BoardConfig::from_json("not json").is_err());
    }
}
