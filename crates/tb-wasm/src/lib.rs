//! WASM bridge for TB — exposes the board engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The host page forwards
//! window size, court image loads, pointer events and toolbar clicks, and
//! repaints from `render` (or from `frame_json` with its own painter).

#[cfg(target_arch = "wasm32")]
mod host;
mod render2d;

use tb_core::clock::Clock;
use tb_core::color::Color;
use tb_core::config::BoardConfig;
use tb_core::id::PlayerId;
use tb_core::layout::{ImageSize, Stage};
use tb_core::model::{CourtVariant, Mode, PlayerPatch, StrokeStyle};
use tb_core::persist::KeyValueStore;
use tb_editor::commands::BoardCommand;
use tb_editor::engine::BoardEngine;
use tb_editor::input::InputEvent;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

/// The main WASM-facing board controller.
///
/// All interaction from the page goes through this struct. Mutating calls
/// return `true` when the board changed and a repaint is due.
#[wasm_bindgen]
pub struct TbCanvas {
    engine: BoardEngine,
}

#[wasm_bindgen]
impl TbCanvas {
    /// Create a board for a window of the given size, restoring saved
    /// players.
    #[wasm_bindgen(constructor)]
    pub fn new(window_width: f64, window_height: f64) -> Self {
        Self::from_config(BoardConfig::default(), window_width, window_height)
    }

    /// Create a board from a JSON `BoardConfig`; missing fields take their
    /// defaults.
    pub fn with_config(
        config_json: &str,
        window_width: f64,
        window_height: f64,
    ) -> Result<TbCanvas, String> {
        let config = BoardConfig::from_json(config_json)?;
        Ok(Self::from_config(config, window_width, window_height))
    }

    fn from_config(config: BoardConfig, window_width: f64, window_height: f64) -> Self {
        init_logging();
        let engine = BoardEngine::new(
            config,
            host_store(),
            host_clock(),
            Stage::new(window_width, window_height),
        );
        Self { engine }
    }

    /// Paint the current frame. `court` is the loaded image for the active
    /// court variant, if any.
    pub fn render(&self, ctx: &CanvasRenderingContext2d, court: Option<HtmlImageElement>) {
        let viewport = self.engine.viewport();
        render2d::render_frame(
            ctx,
            &self.engine.frame(),
            viewport.width,
            viewport.height,
            court.as_ref(),
        );
    }

    // ─── Stage ───────────────────────────────────────────────────────────

    pub fn resize(&mut self, window_width: f64, window_height: f64) -> bool {
        self.engine.set_window_size(window_width, window_height)
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) -> bool {
        self.engine.set_fullscreen(fullscreen)
    }

    /// Drawing container size as `{"width":..,"height":..}`.
    pub fn viewport_json(&self) -> String {
        serde_json::to_string(&self.engine.viewport()).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn fitted_rect_json(&self) -> String {
        serde_json::to_string(&self.engine.fitted_rect()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Report a court image's intrinsic size once it has loaded.
    pub fn set_court_image(&mut self, variant: &str, width: f64, height: f64) -> bool {
        let Some(variant) = parse_or_warn::<CourtVariant>(variant) else {
            return false;
        };
        self.engine
            .set_image_size(variant, Some(ImageSize::new(width, height)))
    }

    /// Forget a court image (failed to load, or unloaded).
    pub fn clear_court_image(&mut self, variant: &str) -> bool {
        let Some(variant) = parse_or_warn::<CourtVariant>(variant) else {
            return false;
        };
        self.engine.set_image_size(variant, None)
    }

    pub fn set_court(&mut self, variant: &str) -> bool {
        parse_or_warn::<CourtVariant>(variant).is_some_and(|v| self.engine.set_court(v))
    }

    pub fn get_court(&self) -> String {
        self.engine.court().as_str().to_string()
    }

    // ─── Mode ────────────────────────────────────────────────────────────

    /// Switch to `"play"` or `"draw"`. Unknown names leave the mode as is.
    pub fn set_mode(&mut self, name: &str) -> bool {
        parse_or_warn::<Mode>(name).is_some_and(|mode| self.engine.set_mode(mode))
    }

    pub fn get_mode(&self) -> String {
        self.engine.mode().as_str().to_string()
    }

    // ─── Pointer input (surface coordinates) ─────────────────────────────

    pub fn handle_pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.engine
            .handle_event(InputEvent::from_pointer_down(x, y))
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.engine
            .handle_event(InputEvent::from_pointer_move(x, y))
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.engine.handle_event(InputEvent::from_pointer_up(x, y))
    }

    // ─── Players ─────────────────────────────────────────────────────────

    /// Add a player; returns its id.
    pub fn add_player(&mut self) -> u32 {
        self.engine.add_player().get()
    }

    pub fn remove_player(&mut self, id: u32) -> bool {
        self.engine.remove_player(PlayerId(id))
    }

    pub fn rename_player(&mut self, id: u32, name: &str) -> bool {
        self.engine
            .update_player(PlayerId(id), &PlayerPatch::name(name))
    }

    /// Recolor a player. Accepts `#hex`, `rgb()` / `rgba()` and `hsl()` /
    /// `hsla()`.
    pub fn recolor_player(&mut self, id: u32, color: &str) -> bool {
        let Some(color) = parse_or_warn::<Color>(color) else {
            return false;
        };
        self.engine
            .update_player(PlayerId(id), &PlayerPatch::color(color))
    }

    /// Move a player to unit coordinates. Ignored outside play mode.
    pub fn move_player(&mut self, id: u32, x: f64, y: f64) -> bool {
        self.engine
            .move_player(PlayerId(id), tb_core::coords::UnitPoint::new(x, y))
    }

    pub fn clear_trails(&mut self) -> bool {
        self.engine.clear_trails()
    }

    pub fn players_json(&self) -> String {
        serde_json::to_string(self.engine.players()).unwrap_or_else(|_| "[]".to_string())
    }

    // ─── Strokes ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.engine.undo_last()
    }

    pub fn clear_all(&mut self) -> bool {
        self.engine.clear_all()
    }

    /// Pen for subsequent strokes. Rejects unparsable colors and widths
    /// that are not positive.
    pub fn set_stroke_style(&mut self, color: &str, width: f64) -> bool {
        let Some(color) = parse_or_warn::<Color>(color) else {
            return false;
        };
        if !(width.is_finite() && width > 0.0) {
            log::warn!("ignoring stroke width {width}");
            return false;
        }
        self.engine.set_stroke_style(StrokeStyle { color, width });
        true
    }

    // ─── Toolbar ─────────────────────────────────────────────────────────

    /// Run a toolbar command by name (`"addPlayer"`, `"undo"`, ...).
    pub fn run_command(&mut self, name: &str) -> bool {
        parse_or_warn::<BoardCommand>(name).is_some_and(|c| c.apply(&mut self.engine))
    }

    /// The render feed as JSON, for painters outside this crate.
    pub fn frame_json(&self) -> String {
        self.engine.frame().to_json()
    }
}

fn parse_or_warn<T>(text: &str) -> Option<T>
where
    T: std::str::FromStr<Err = String>,
{
    match text.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("{e}");
            None
        }
    }
}

// ─── Host collaborators ──────────────────────────────────────────────────

#[cfg(target_arch = "wasm32")]
fn host_store() -> Box<dyn KeyValueStore> {
    Box::new(host::LocalStorage)
}

#[cfg(not(target_arch = "wasm32"))]
fn host_store() -> Box<dyn KeyValueStore> {
    Box::new(tb_core::persist::MemoryStore::new())
}

#[cfg(target_arch = "wasm32")]
fn host_clock() -> Box<dyn Clock> {
    Box::new(host::JsClock)
}

#[cfg(not(target_arch = "wasm32"))]
fn host_clock() -> Box<dyn Clock> {
    Box::new(tb_core::clock::SystemClock::default())
}

// ─── Logging and panics ──────────────────────────────────────────────────

fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Debug);
        });
    }
}
