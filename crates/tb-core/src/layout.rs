//! Stage sizing and the aspect-preserving rect fitter.
//!
//! The host reports its window size and fullscreen state; the stage turns
//! that into the drawing container (`Viewport`). The background image is
//! then fitted into the container, centered, keeping its aspect ratio.
//! Every player position is expressed relative to that fitted rect.

use serde::{Deserialize, Serialize};

/// The drawing container dimensions, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Intrinsic size of a loaded background image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width / height, or `None` when the size cannot define a ratio.
    pub fn aspect_ratio(&self) -> Option<f64> {
        let usable = self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0;
        usable.then(|| self.width / self.height)
    }
}

/// The region of the viewport where the background (and every player
/// marker) is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FittedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FittedRect {
    /// The degenerate rect reported while no image is available.
    pub const EMPTY: FittedRect = FittedRect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Fit an image of the given intrinsic size into the viewport.
///
/// Height binds when the viewport is wider than the image ratio, width binds
/// otherwise; the result is centered on both axes. Returns
/// [`FittedRect::EMPTY`] when the image is absent or either size is
/// zero, negative or non-finite.
///
/// Pure: rendering and drag mapping both call this and must agree exactly.
pub fn fit_rect(viewport: Viewport, image: Option<ImageSize>) -> FittedRect {
    let Some(ratio) = image.and_then(|img| img.aspect_ratio()) else {
        return FittedRect::EMPTY;
    };
    if !viewport.is_usable() {
        return FittedRect::EMPTY;
    }

    let (width, height) = if viewport.width / viewport.height > ratio {
        (viewport.height * ratio, viewport.height)
    } else {
        (viewport.width, viewport.width / ratio)
    };

    FittedRect {
        x: (viewport.width - width) / 2.0,
        y: (viewport.height - height) / 2.0,
        width,
        height,
    }
}

// ─── Stage ───────────────────────────────────────────────────────────────

/// Space reserved around the stage for the toolbar when not fullscreen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageMargins {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Default for StageMargins {
    fn default() -> Self {
        Self {
            horizontal: 20.0,
            vertical: 100.0,
        }
    }
}

/// Host window state the drawing container is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub window_width: f64,
    pub window_height: f64,
    pub fullscreen: bool,
}

impl Stage {
    pub const fn new(window_width: f64, window_height: f64) -> Self {
        Self {
            window_width,
            window_height,
            fullscreen: false,
        }
    }

    /// The container size: the whole window in fullscreen, the window minus
    /// toolbar margins otherwise. Never negative.
    pub fn viewport(&self, margins: StageMargins) -> Viewport {
        let (dw, dh) = if self.fullscreen {
            (0.0, 0.0)
        } else {
            (margins.horizontal, margins.vertical)
        };
        Viewport {
            width: (self.window_width - dw).max(0.0),
            height: (self.window_height - dh).max(0.0),
        }
    }
}
