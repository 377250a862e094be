//! Board engine: the single owner of a board session's state.
//!
//! Pointer events are routed to the tool for the current mode; the tool
//! returns `BoardMutation`s which are applied here. Every player mutation
//! that actually changed something is mirrored to the player store. Stroke
//! state is session-only and never persisted.
//!
//! The fitted court rect is never cached: it is recomputed from the stage,
//! the active court variant and that variant's image size whenever it is
//! needed, so resize and fullscreen notifications are idempotent.

use crate::input::InputEvent;
use crate::tools::{DragTool, PenTool, Tool};
use tb_core::clock::Clock;
use tb_core::config::BoardConfig;
use tb_core::coords::{CoordMapper, SurfacePoint, UnitPoint};
use tb_core::id::PlayerId;
use tb_core::layout::{FittedRect, ImageSize, Stage, Viewport, fit_rect};
use tb_core::model::{CourtVariant, Mode, Player, PlayerPatch, Stroke, StrokeStyle};
use tb_core::persist::{KeyValueStore, PlayerStore};
use tb_core::registry::PlayerRegistry;
use tb_core::strokes::StrokeRecorder;
use tb_render::frame::{Frame, FrameInput, build_frame};
use tb_render::hit::hit_test_marker;

/// A mutation that can be applied to the board from tools or the host.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardMutation {
    AddPlayer,
    RemovePlayer { id: PlayerId },
    UpdatePlayer { id: PlayerId, patch: PlayerPatch },
    MovePlayer { id: PlayerId, to: UnitPoint },
    ClearTrails,
    BeginStroke { at: SurfacePoint },
    ExtendStroke { at: SurfacePoint },
    EndStroke,
    UndoStroke,
    ClearStrokes,
}

/// Intrinsic image sizes per court variant, once loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct CourtImages {
    cropped: Option<ImageSize>,
    full: Option<ImageSize>,
}

impl CourtImages {
    fn get(&self, variant: CourtVariant) -> Option<ImageSize> {
        match variant {
            CourtVariant::Cropped => self.cropped,
            CourtVariant::Full => self.full,
        }
    }

    fn slot(&mut self, variant: CourtVariant) -> &mut Option<ImageSize> {
        match variant {
            CourtVariant::Cropped => &mut self.cropped,
            CourtVariant::Full => &mut self.full,
        }
    }
}

pub struct BoardEngine {
    config: BoardConfig,
    mode: Mode,
    stage: Stage,
    court: CourtVariant,
    images: CourtImages,
    registry: PlayerRegistry,
    recorder: StrokeRecorder,
    store: PlayerStore,
    clock: Box<dyn Clock>,
    drag_tool: DragTool,
    pen_tool: PenTool,
}

impl BoardEngine {
    /// Start a session, restoring whatever players `store` holds under the
    /// configured key.
    pub fn new(
        config: BoardConfig,
        store: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
        stage: Stage,
    ) -> Self {
        let store = PlayerStore::new(store, config.storage_key.clone());
        let registry = PlayerRegistry::from_players(store.load(), config.spawn);
        let recorder = StrokeRecorder::new(config.stroke, config.draw_throttle_ms);
        log::debug!(
            "board session with {} restored players, stage {}x{}",
            registry.len(),
            stage.window_width,
            stage.window_height
        );
        Self {
            config,
            mode: Mode::default(),
            stage,
            court: CourtVariant::default(),
            images: CourtImages::default(),
            registry,
            recorder,
            store,
            clock,
            drag_tool: DragTool::new(),
            pen_tool: PenTool::new(),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    // ─── Mode ────────────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch interaction mode.
    ///
    /// A drag in progress is dropped. An open stroke is left open; it only
    /// closes on the next draw-mode pointer-up, undo or clear.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        log::debug!("mode {} -> {mode}", self.mode);
        self.mode = mode;
        self.drag_tool.cancel();
        true
    }

    // ─── Stage and court ─────────────────────────────────────────────────

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn set_window_size(&mut self, width: f64, height: f64) -> bool {
        if self.stage.window_width == width && self.stage.window_height == height {
            return false;
        }
        self.stage.window_width = width;
        self.stage.window_height = height;
        log::trace!("window resized to {width}x{height}");
        true
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) -> bool {
        if self.stage.fullscreen == fullscreen {
            return false;
        }
        self.stage.fullscreen = fullscreen;
        log::debug!("fullscreen {fullscreen}");
        true
    }

    pub fn court(&self) -> CourtVariant {
        self.court
    }

    pub fn set_court(&mut self, court: CourtVariant) -> bool {
        if self.court == court {
            return false;
        }
        log::debug!("court {} -> {}", self.court.as_str(), court.as_str());
        self.court = court;
        true
    }

    pub fn toggle_court(&mut self) -> CourtVariant {
        self.set_court(self.court.toggled());
        self.court
    }

    /// Record the intrinsic size of a court image. `None` marks it as not
    /// loaded (or failed to load).
    pub fn set_image_size(&mut self, variant: CourtVariant, size: Option<ImageSize>) -> bool {
        let slot = self.images.slot(variant);
        if *slot == size {
            return false;
        }
        *slot = size;
        log::debug!("court image {} size {size:?}", variant.as_str());
        true
    }

    pub fn image_size(&self, variant: CourtVariant) -> Option<ImageSize> {
        self.images.get(variant)
    }

    /// The drawing container derived from the stage.
    pub fn viewport(&self) -> Viewport {
        self.stage.viewport(self.config.stage)
    }

    /// Where the active court image sits inside the viewport.
    pub fn fitted_rect(&self) -> FittedRect {
        fit_rect(self.viewport(), self.images.get(self.court))
    }

    pub fn mapper(&self) -> CoordMapper {
        CoordMapper::new(self.fitted_rect())
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Route a pointer event to the tool for the current mode and apply
    /// what it produces.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        let mapper = self.mapper();
        let mutations = match self.mode {
            Mode::Play => {
                let hit = match event {
                    InputEvent::PointerDown { x, y } => hit_test_marker(
                        self.registry.players(),
                        &mapper,
                        self.config.marker.radius,
                        x,
                        y,
                    ),
                    _ => None,
                };
                self.drag_tool.handle(&event, hit, &mapper)
            }
            Mode::Draw => self.pen_tool.handle(&event, None, &mapper),
        };

        let mut changed = false;
        for mutation in mutations {
            changed |= self.apply_mutation(mutation);
        }
        changed
    }

    /// The player currently being dragged, if any.
    pub fn dragging(&self) -> Option<PlayerId> {
        self.drag_tool.dragging()
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Apply a mutation. Returns whether board state changed.
    pub fn apply_mutation(&mut self, mutation: BoardMutation) -> bool {
        match mutation {
            BoardMutation::AddPlayer => {
                self.add_player();
                true
            }
            BoardMutation::RemovePlayer { id } => self.remove_player(id),
            BoardMutation::UpdatePlayer { id, patch } => self.update_player(id, &patch),
            BoardMutation::MovePlayer { id, to } => self.move_player(id, to),
            BoardMutation::ClearTrails => self.clear_trails(),
            BoardMutation::BeginStroke { at } => self.begin_stroke(at),
            BoardMutation::ExtendStroke { at } => self.extend_stroke(at),
            BoardMutation::EndStroke => self.end_stroke(),
            BoardMutation::UndoStroke => self.undo_last(),
            BoardMutation::ClearStrokes => self.clear_all(),
        }
    }

    fn persist_if(&mut self, changed: bool) -> bool {
        if changed {
            self.store.save(self.registry.players());
        }
        changed
    }

    pub fn add_player(&mut self) -> PlayerId {
        let id = self.registry.add();
        self.persist_if(true);
        id
    }

    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        let changed = self.registry.remove(id);
        self.persist_if(changed)
    }

    pub fn update_player(&mut self, id: PlayerId, patch: &PlayerPatch) -> bool {
        let changed = self.registry.update(id, patch);
        self.persist_if(changed)
    }

    /// Move a player to a unit position. Play mode only.
    pub fn move_player(&mut self, id: PlayerId, to: UnitPoint) -> bool {
        let changed = self.registry.move_player(id, to, self.mode);
        self.persist_if(changed)
    }

    pub fn clear_trails(&mut self) -> bool {
        let changed = self.registry.clear_trails();
        self.persist_if(changed)
    }

    pub fn begin_stroke(&mut self, at: SurfacePoint) -> bool {
        let now = self.clock.now_ms();
        self.recorder.begin(at, self.mode, now)
    }

    pub fn extend_stroke(&mut self, at: SurfacePoint) -> bool {
        let now = self.clock.now_ms();
        self.recorder.extend(at, self.mode, now)
    }

    pub fn end_stroke(&mut self) -> bool {
        self.recorder.end()
    }

    pub fn undo_last(&mut self) -> bool {
        self.recorder.undo_last()
    }

    pub fn clear_all(&mut self) -> bool {
        self.recorder.clear_all()
    }

    /// Pen for strokes started from now on.
    pub fn set_stroke_style(&mut self, style: StrokeStyle) {
        self.recorder.set_style(style);
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        self.recorder.style()
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn players(&self) -> &[Player] {
        self.registry.players()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.registry.get(id)
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.recorder.strokes()
    }

    pub fn is_stroke_open(&self) -> bool {
        self.recorder.is_open()
    }

    pub fn player_store(&self) -> &PlayerStore {
        &self.store
    }

    /// Everything the painter needs for the current state.
    pub fn frame(&self) -> Frame {
        build_frame(FrameInput {
            mode: self.mode,
            court: self.court,
            rect: self.fitted_rect(),
            players: self.registry.players(),
            strokes: self.recorder.strokes(),
            marker: &self.config.marker,
        })
    }
}

impl std::fmt::Debug for BoardEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardEngine")
            .field("mode", &self.mode)
            .field("stage", &self.stage)
            .field("court", &self.court)
            .field("players", &self.registry.len())
            .field("strokes", &self.recorder.strokes().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tb_core::clock::ManualClock;
    use tb_core::persist::MemoryStore;

    /// 820x700 window ⇒ 800x600 viewport with the default margins.
    fn engine() -> (BoardEngine, ManualClock) {
        let clock = ManualClock::new(0.0);
        let mut engine = BoardEngine::new(
            BoardConfig::default(),
            Box::new(MemoryStore::new()),
            Box::new(clock.clone()),
            Stage::new(820.0, 700.0),
        );
        engine.set_image_size(CourtVariant::Cropped, Some(ImageSize::new(400.0, 200.0)));
        (engine, clock)
    }

    #[test]
    fn fitted_rect_follows_stage() {
        let (mut engine, _) = engine();
        assert_eq!(engine.viewport(), Viewport::new(800.0, 600.0));
        assert_eq!(
            engine.fitted_rect(),
            FittedRect {
                x: 0.0,
                y: 100.0,
                width: 800.0,
                height: 400.0,
            }
        );

        assert!(engine.set_fullscreen(true));
        assert_eq!(engine.viewport(), Viewport::new(820.0, 700.0));
        assert!(!engine.set_fullscreen(true));
    }

    #[test]
    fn rect_is_empty_until_variant_image_loads() {
        let (mut engine, _) = engine();
        assert_eq!(engine.toggle_court(), CourtVariant::Full);
        assert!(engine.fitted_rect().is_empty());
        engine.set_image_size(CourtVariant::Full, Some(ImageSize::new(800.0, 600.0)));
        assert_eq!(engine.fitted_rect().width, 800.0);
    }

    #[test]
    fn mode_switch_reports_change() {
        let (mut engine, _) = engine();
        assert!(!engine.set_mode(Mode::Play));
        assert!(engine.set_mode(Mode::Draw));
        assert_eq!(engine.mode(), Mode::Draw);
    }

    #[test]
    fn mode_switch_drops_drag() {
        let (mut engine, _) = engine();
        engine.add_player();
        // Player A spawns at (0.2, 0.2) ⇒ (160, 180).
        engine.handle_event(InputEvent::from_pointer_down(160.0, 180.0));
        assert_eq!(engine.dragging(), Some(PlayerId(1)));
        engine.set_mode(Mode::Draw);
        assert_eq!(engine.dragging(), None);
    }

    #[test]
    fn orphaned_stroke_stays_open_across_mode_switch() {
        let (mut engine, clock) = engine();
        engine.set_mode(Mode::Draw);
        engine.handle_event(InputEvent::from_pointer_down(10.0, 10.0));
        engine.set_mode(Mode::Play);
        assert!(engine.is_stroke_open());

        // Extends are refused outside draw mode.
        clock.advance(50.0);
        assert!(!engine.extend_stroke(SurfacePoint::new(30.0, 30.0)));

        engine.set_mode(Mode::Draw);
        assert!(engine.handle_event(InputEvent::from_pointer_up(30.0, 30.0)));
        assert!(!engine.is_stroke_open());
        assert_eq!(engine.strokes()[0].points.len(), 1);
    }

    #[test]
    fn stroke_style_applies_to_new_strokes() {
        let (mut engine, _) = engine();
        engine.set_mode(Mode::Draw);
        engine.begin_stroke(SurfacePoint::new(0.0, 0.0));
        engine.end_stroke();

        let red = StrokeStyle {
            color: tb_core::color::Color::rgb8(255, 0, 0),
            width: 6.0,
        };
        engine.set_stroke_style(red);
        engine.begin_stroke(SurfacePoint::new(1.0, 1.0));

        assert_eq!(engine.strokes()[0].style(), StrokeStyle::default());
        assert_eq!(engine.strokes()[1].style(), red);
    }

    #[test]
    fn frame_hides_players_in_draw_mode() {
        let (mut engine, _) = engine();
        engine.add_player();
        assert_eq!(engine.frame().markers.len(), 1);
        engine.set_mode(Mode::Draw);
        assert!(engine.frame().markers.is_empty());
    }
}
