//! Unit ↔ surface coordinate mapping over a fitted rect.
//!
//! Players live in unit space (fractions of the fitted background rect) so
//! they stay put across resizes; pointers and strokes live in surface space
//! (viewport pixels).

use crate::layout::FittedRect;
use serde::{Deserialize, Serialize};

/// Position as a fraction of the fitted rect. Typically `0..=1` but never
/// clamped: a marker dragged off the court keeps its out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UnitPoint {
    pub x: f64,
    pub y: f64,
}

impl UnitPoint {
    pub const ORIGIN: UnitPoint = UnitPoint { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both components are real numbers (JSON can't carry NaN or infinity).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Absolute pixel position inside the drawing viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
}

impl SurfacePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Bidirectional transform between unit and surface space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordMapper {
    rect: FittedRect,
}

impl CoordMapper {
    pub const fn new(rect: FittedRect) -> Self {
        Self { rect }
    }

    pub fn rect(&self) -> FittedRect {
        self.rect
    }

    pub fn to_surface(&self, p: UnitPoint) -> SurfacePoint {
        SurfacePoint {
            x: self.rect.x + p.x * self.rect.width,
            y: self.rect.y + p.y * self.rect.height,
        }
    }

    /// Inverse of [`to_surface`](Self::to_surface). A zero-area rect maps
    /// everything to [`UnitPoint::ORIGIN`] instead of dividing by zero.
    pub fn to_unit(&self, p: SurfacePoint) -> UnitPoint {
        if self.rect.is_empty() {
            return UnitPoint::ORIGIN;
        }
        UnitPoint {
            x: (p.x - self.rect.x) / self.rect.width,
            y: (p.y - self.rect.y) / self.rect.height,
        }
    }
}

impl From<FittedRect> for CoordMapper {
    fn from(rect: FittedRect) -> Self {
        Self::new(rect)
    }
}
