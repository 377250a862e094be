//! Tool system for board interactions.
//!
//! Each tool translates pointer events into `BoardMutation`s that the
//! `BoardEngine` applies. There is one tool per interaction mode:
//!
//! | Mode   | Tool       | Down                 | Move          | Up                         |
//! |--------|------------|----------------------|---------------|----------------------------|
//! | `play` | `DragTool` | grab marker under it | move player   | move if dragged, release   |
//! | `draw` | `PenTool`  | begin stroke         | extend stroke | end stroke                 |

use crate::engine::BoardMutation;
use crate::input::InputEvent;
use tb_core::coords::{CoordMapper, SurfacePoint};
use tb_core::id::PlayerId;
use tb_core::model::Mode;
use tb_render::hit::MarkerHit;

/// Trait for tools that handle input and produce mutations.
pub trait Tool {
    /// The mode this tool is active in.
    fn mode(&self) -> Mode;

    /// Handle an input event, returning zero or more mutations.
    ///
    /// `hit` is the marker under the pointer for pointer-down events, if
    /// the engine hit-tested one.
    fn handle(
        &mut self,
        event: &InputEvent,
        hit: Option<MarkerHit>,
        mapper: &CoordMapper,
    ) -> Vec<BoardMutation>;
}

// ─── Drag Tool ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
struct Grab {
    id: PlayerId,
    /// Marker center minus pointer at grab time.
    dx: f64,
    dy: f64,
    /// Whether the pointer moved since the press.
    moved: bool,
}

/// Drags player markers around the court.
///
/// The marker keeps the offset it was grabbed at, so it doesn't jump to
/// center itself under the pointer.
#[derive(Debug, Default)]
pub struct DragTool {
    grab: Option<Grab>,
}

impl DragTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragging(&self) -> Option<PlayerId> {
        self.grab.map(|g| g.id)
    }

    /// Drop the current grab without emitting anything.
    pub fn cancel(&mut self) {
        self.grab = None;
    }

    fn move_to(&self, x: f64, y: f64, mapper: &CoordMapper) -> Vec<BoardMutation> {
        let Some(grab) = self.grab else {
            return vec![];
        };
        if mapper.rect().is_empty() {
            return vec![];
        }
        let center = SurfacePoint::new(x + grab.dx, y + grab.dy);
        vec![BoardMutation::MovePlayer {
            id: grab.id,
            to: mapper.to_unit(center),
        }]
    }
}

impl Tool for DragTool {
    fn mode(&self) -> Mode {
        Mode::Play
    }

    fn handle(
        &mut self,
        event: &InputEvent,
        hit: Option<MarkerHit>,
        mapper: &CoordMapper,
    ) -> Vec<BoardMutation> {
        match *event {
            InputEvent::PointerDown { x, y } => {
                self.grab = hit.map(|hit| Grab {
                    id: hit.id,
                    dx: hit.center.x - x,
                    dy: hit.center.y - y,
                    moved: false,
                });
                vec![]
            }
            InputEvent::PointerMove { x, y } => {
                if let Some(grab) = self.grab.as_mut() {
                    grab.moved = true;
                }
                self.move_to(x, y, mapper)
            }
            InputEvent::PointerUp { x, y } => {
                // A drag records its release position too; a tap records
                // nothing.
                let mutations = match self.grab {
                    Some(grab) if grab.moved => self.move_to(x, y, mapper),
                    _ => vec![],
                };
                self.grab = None;
                mutations
            }
        }
    }
}

// ─── Pen Tool (freehand) ─────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct PenTool {
    drawing: bool,
}

impl PenTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }
}

impl Tool for PenTool {
    fn mode(&self) -> Mode {
        Mode::Draw
    }

    fn handle(
        &mut self,
        event: &InputEvent,
        _hit: Option<MarkerHit>,
        _mapper: &CoordMapper,
    ) -> Vec<BoardMutation> {
        match *event {
            InputEvent::PointerDown { x, y } => {
                self.drawing = true;
                vec![BoardMutation::BeginStroke {
                    at: SurfacePoint::new(x, y),
                }]
            }
            InputEvent::PointerMove { x, y } => {
                if !self.drawing {
                    return vec![];
                }
                vec![BoardMutation::ExtendStroke {
                    at: SurfacePoint::new(x, y),
                }]
            }
            // Any release in draw mode closes whatever stroke is open,
            // including one orphaned by a mode switch.
            InputEvent::PointerUp { .. } => {
                self.drawing = false;
                vec![BoardMutation::EndStroke]
            }
        }
    }
}
