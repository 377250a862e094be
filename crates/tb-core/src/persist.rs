//! Player snapshot persistence over a string key-value store.
//!
//! Storage is best-effort: a failed write is logged and dropped. Reading
//! back a missing key or text that isn't a JSON array loads an empty board;
//! individual entries that don't decode are skipped.

use crate::model::Player;
use std::collections::HashMap;

/// Key the player list has always been saved under.
pub const DEFAULT_STORAGE_KEY: &str = "sketch_players_v1";

/// Minimal durable string store (browser `localStorage`, a file, a map).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Returns a message when the backend refuses the write (quota, I/O).
    fn set(&mut self, key: &str, value: &str) -> Result<(), String>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        (**self).set(key, value)
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Serialize the full player list.
///
/// # Errors
/// Returns the serializer message; in practice only non-string map keys or
/// custom serializers can fail, neither of which `Player` has.
pub fn encode_players(players: &[Player]) -> Result<String, String> {
    serde_json::to_string(players).map_err(|e| format!("Snapshot encode error: {e}"))
}

/// Parse a saved player list.
///
/// Entries that don't decode as a player (bad color, missing field) are
/// skipped with a warning; the rest of the board still loads.
///
/// # Errors
/// Returns a message if the text is not a JSON array.
pub fn decode_players(text: &str) -> Result<Vec<Player>, String> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(text).map_err(|e| format!("Snapshot decode error: {e}"))?;
    let players = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(player) => Some(player),
            Err(e) => {
                log::warn!("skip saved player at index {index}: {e}");
                None
            }
        })
        .collect();
    Ok(players)
}

/// Saves and restores the player list under one fixed key.
pub struct PlayerStore {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl PlayerStore {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw access to the backing store.
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Write the full list. Failures are logged and otherwise ignored.
    pub fn save(&mut self, players: &[Player]) {
        let text = match encode_players(players) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("skip saving players: {e}");
                return;
            }
        };
        match self.store.set(&self.key, &text) {
            Ok(()) => log::trace!("saved {} players under {:?}", players.len(), self.key),
            Err(e) => log::warn!("failed to save players under {:?}: {e}", self.key),
        }
    }

    /// Read the saved list, or an empty one if there is nothing usable.
    pub fn load(&self) -> Vec<Player> {
        let Some(text) = self.store.get(&self.key) else {
            log::debug!("no saved players under {:?}", self.key);
            return Vec::new();
        };
        if text.trim().is_empty() {
            return Vec::new();
        }
        match decode_players(&text) {
            Ok(players) => {
                log::debug!("loaded {} players", players.len());
                players
            }
            Err(e) => {
                log::warn!("ignoring saved players under {:?}: {e}", self.key);
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for PlayerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerStore").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::coords::UnitPoint;
    use crate::id::PlayerId;
    use pretty_assertions::assert_eq;

    /// Store whose writes always fail, as with an exhausted quota.
    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), String> {
            Err("QuotaExceededError".to_string())
        }
    }

    fn sample() -> Vec<Player> {
        let mut p = Player::new(PlayerId(1), "A", Color::BLACK, UnitPoint::new(0.5, 0.5));
        p.trail.push(UnitPoint::new(0.5, 0.5));
        vec![p]
    }

    #[test]
    fn save_then_load() {
        let mut store = PlayerStore::new(Box::new(MemoryStore::new()), DEFAULT_STORAGE_KEY);
        store.save(&sample());
        assert_eq!(store.load(), sample());
    }

    #[test]
    fn missing_key_loads_empty() {
        let store = PlayerStore::new(Box::new(MemoryStore::new()), DEFAULT_STORAGE_KEY);
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_content_loads_empty() {
        for raw in ["{not json", "null", "{\"id\":1}", "[{\"id\":\"x\"}]", "   "] {
            let store = PlayerStore::new(
                Box::new(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, raw)),
                DEFAULT_STORAGE_KEY,
            );
            assert!(store.load().is_empty(), "expected empty for {raw:?}");
        }
    }

    #[test]
    fn bad_entry_does_not_drop_the_board() {
        let raw = r##"[
            {"id": 1, "name": "A", "x": 0.2, "y": 0.2, "color": "hsl(73 80% 55%)", "path": []},
            {"id": 2, "name": "B", "x": 0.3, "y": 0.3, "color": "chartreuse", "path": []},
            {"id": 3, "name": "C", "x": null, "y": 0.4, "color": "#FF0000", "path": []},
            {"id": 4, "name": "D", "x": 0.5, "y": 0.5, "color": "#00FF00"}
        ]"##;
        let store = PlayerStore::new(
            Box::new(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, raw)),
            DEFAULT_STORAGE_KEY,
        );
        let ids: Vec<u32> = store.load().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn failing_write_is_swallowed() {
        let mut store = PlayerStore::new(Box::new(FullStore), DEFAULT_STORAGE_KEY);
        store.save(&sample());
        assert!(store.load().is_empty());
    }

    #[test]
    fn other_keys_untouched() {
        let mut store = PlayerStore::new(
            Box::new(MemoryStore::with_entry("theme", "dark")),
            DEFAULT_STORAGE_KEY,
        );
        store.save(&sample());
        assert_eq!(store.store().get("theme").as_deref(), Some("dark"));
        assert!(store.store().get(DEFAULT_STORAGE_KEY).is_some());
    }
}
