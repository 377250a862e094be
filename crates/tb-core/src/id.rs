use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a player marker.
///
/// Assigned by the registry as `max(existing) + 1`, so ids are unique within a
/// board and grow monotonically while players are only added.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// The id handed out on an empty board.
    pub const FIRST: PlayerId = PlayerId(1);

    pub const fn get(self) -> u32 {
        self.0
    }

    /// The id following this one.
    pub const fn next(self) -> Self {
        PlayerId(self.0.saturating_add(1))
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for PlayerId {
    fn from(value: u32) -> Self {
        PlayerId(value)
    }
}
