//! Board data model: players, strokes, and the session-wide modes.
//!
//! Players are kept in unit coordinates (relative to the fitted court rect)
//! and survive resizes. Strokes are kept in surface coordinates and do not
//! re-fit when the viewport changes.

use crate::color::Color;
use crate::coords::{SurfacePoint, UnitPoint};
use crate::id::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─── Players ─────────────────────────────────────────────────────────────

/// A labeled, draggable marker on the court.
///
/// Serialized field names match the snapshot format boards were saved with:
/// `{ "id", "name", "x", "y", "color", "path" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: Color,
    #[serde(flatten)]
    pub position: UnitPoint,
    /// Positions visited while being dragged, in drag order.
    #[serde(rename = "path", default)]
    pub trail: Vec<UnitPoint>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, color: Color, position: UnitPoint) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            position,
            trail: Vec::new(),
        }
    }
}

/// Partial edit of a player's editable fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl PlayerPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            color: None,
        }
    }

    pub fn color(color: Color) -> Self {
        Self {
            name: None,
            color: Some(color),
        }
    }

    /// Merge into `player`. Returns whether any field actually changed.
    pub fn apply_to(&self, player: &mut Player) -> bool {
        let mut changed = false;
        if let Some(name) = &self.name
            && player.name != *name
        {
            player.name.clone_from(name);
            changed = true;
        }
        if let Some(color) = self.color
            && player.color != color
        {
            player.color = color;
            changed = true;
        }
        changed
    }
}

// ─── Strokes ─────────────────────────────────────────────────────────────

/// Pen settings applied to newly started strokes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 3.0,
        }
    }
}

/// One freehand gesture, in surface coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<SurfacePoint>,
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(start: SurfacePoint, style: StrokeStyle) -> Self {
        Self {
            points: vec![start],
            color: style.color,
            width: style.width,
        }
    }

    pub fn style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.color,
            width: self.width,
        }
    }
}

// ─── Modes ───────────────────────────────────────────────────────────────

/// Which layer receives pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Drag player markers; drags record trails.
    #[default]
    Play,
    /// Paint freehand strokes.
    Draw,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Play => "play",
            Mode::Draw => "draw",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" => Ok(Mode::Play),
            "draw" => Ok(Mode::Draw),
            other => Err(format!("unknown mode {other:?} (expected \"play\" or \"draw\")")),
        }
    }
}

/// Which background image is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourtVariant {
    /// The cropped (half) court.
    #[default]
    Cropped,
    /// The full court.
    Full,
}

impl CourtVariant {
    pub fn toggled(self) -> Self {
        match self {
            CourtVariant::Cropped => CourtVariant::Full,
            CourtVariant::Full => CourtVariant::Cropped,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CourtVariant::Cropped => "cropped",
            CourtVariant::Full => "full",
        }
    }
}

impl FromStr for CourtVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cropped" => Ok(CourtVariant::Cropped),
            "full" => Ok(CourtVariant::Full),
            other => Err(format!("unknown court {other:?} (expected \"cropped\" or \"full\")")),
        }
    }
}
