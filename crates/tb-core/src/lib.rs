pub mod clock;
pub mod color;
pub mod config;
pub mod coords;
pub mod id;
pub mod layout;
pub mod model;
pub mod persist;
pub mod registry;
pub mod strokes;

pub use clock::{Clock, ManualClock};
pub use color::Color;
pub use config::BoardConfig;
pub use coords::{CoordMapper, SurfacePoint, UnitPoint};
pub use id::PlayerId;
pub use layout::{FittedRect, ImageSize, Stage, StageMargins, Viewport, fit_rect};
pub use model::*;
pub use persist::{KeyValueStore, MemoryStore, PlayerStore};
pub use registry::PlayerRegistry;
pub use strokes::{StrokeRecorder, Throttle};
