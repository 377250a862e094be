//! Toolbar commands, addressable by name from the host.

use crate::engine::BoardEngine;
use std::fmt;
use std::str::FromStr;
use tb_core::model::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCommand {
    Play,
    Draw,
    AddPlayer,
    ClearTrails,
    Undo,
    ClearAll,
    ToggleCourt,
    EnterFullscreen,
    ExitFullscreen,
}

impl BoardCommand {
    pub const ALL: [BoardCommand; 9] = [
        Self::Play,
        Self::Draw,
        Self::AddPlayer,
        Self::ClearTrails,
        Self::Undo,
        Self::ClearAll,
        Self::ToggleCourt,
        Self::EnterFullscreen,
        Self::ExitFullscreen,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Draw => "draw",
            Self::AddPlayer => "addPlayer",
            Self::ClearTrails => "clearTrails",
            Self::Undo => "undo",
            Self::ClearAll => "clearAll",
            Self::ToggleCourt => "toggleCourt",
            Self::EnterFullscreen => "enterFullscreen",
            Self::ExitFullscreen => "exitFullscreen",
        }
    }

    /// Run the command. Returns whether board state changed.
    pub fn apply(self, engine: &mut BoardEngine) -> bool {
        log::debug!("command {}", self.name());
        match self {
            Self::Play => engine.set_mode(Mode::Play),
            Self::Draw => engine.set_mode(Mode::Draw),
            Self::AddPlayer => {
                engine.add_player();
                true
            }
            Self::ClearTrails => engine.clear_trails(),
            Self::Undo => engine.undo_last(),
            Self::ClearAll => engine.clear_all(),
            Self::ToggleCourt => {
                engine.toggle_court();
                true
            }
            Self::EnterFullscreen => engine.set_fullscreen(true),
            Self::ExitFullscreen => engine.set_fullscreen(false),
        }
    }
}

impl fmt::Display for BoardCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoardCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("Unknown command: {s:?}"))
    }
}
