//! The set of player markers on the board.
//!
//! All operations are total: unknown ids and out-of-mode moves are silent
//! no-ops. Mutators return `true` only when state actually changed, which
//! is what callers use to decide whether to persist.

use crate::color::Color;
use crate::config::SpawnConfig;
use crate::coords::UnitPoint;
use crate::id::PlayerId;
use crate::model::{Mode, Player, PlayerPatch};

const ALPHABET_LEN: usize = 26;

#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
    spawn: SpawnConfig,
}

impl PlayerRegistry {
    pub fn new(spawn: SpawnConfig) -> Self {
        Self {
            players: Vec::new(),
            spawn,
        }
    }

    /// Start from a previously saved list, kept in its saved order.
    pub fn from_players(players: Vec<Player>, spawn: SpawnConfig) -> Self {
        Self { players, spawn }
    }

    /// Players in creation order (last = drawn on top).
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// `max(existing) + 1`, or 1 on an empty board.
    pub fn next_id(&self) -> PlayerId {
        self.players
            .iter()
            .map(|p| p.id)
            .max()
            .map_or(PlayerId::FIRST, PlayerId::next)
    }

    /// Color for a given id: a fixed hue walk so neighbours differ.
    pub fn color_for(&self, id: PlayerId) -> Color {
        let hue = (u64::from(id.get()) * u64::from(self.spawn.hue_step)) % 360;
        Color::from_hsl(
            hue as f32,
            self.spawn.saturation / 100.0,
            self.spawn.lightness / 100.0,
        )
    }

    /// Create a player with the next id, an alphabet label, an id-derived
    /// color and a position nudged away from the previous ones.
    ///
    /// Labels cycle `A..Z` by current player count, so the 27th player is
    /// "A" again.
    pub fn add(&mut self) -> PlayerId {
        let count = self.players.len();
        let id = self.next_id();
        let name = char::from(b'A' + (count % ALPHABET_LEN) as u8).to_string();
        let position = UnitPoint::new(
            self.spawn.origin_x + count as f64 * self.spawn.step_x,
            self.spawn.origin_y + count as f64 * self.spawn.step_y,
        );
        let player = Player::new(id, name, self.color_for(id), position);
        log::debug!("add player {id} {:?} at {position:?}", player.name);
        self.players.push(player);
        id
    }

    pub fn remove(&mut self, id: PlayerId) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        let removed = self.players.len() != before;
        if removed {
            log::debug!("remove player {id}");
        }
        removed
    }

    pub fn update(&mut self, id: PlayerId, patch: &PlayerPatch) -> bool {
        self.get_mut(id).is_some_and(|p| patch.apply_to(p))
    }

    /// Move a player and record the new position on its trail.
    ///
    /// Only honoured in [`Mode::Play`]; in any other mode the board is
    /// untouched. Non-finite targets are refused so the snapshot stays
    /// loadable.
    pub fn move_player(&mut self, id: PlayerId, to: UnitPoint, mode: Mode) -> bool {
        if mode != Mode::Play {
            log::trace!("ignore move of {id} in {mode} mode");
            return false;
        }
        if !to.is_finite() {
            log::warn!("ignore move of {id} to non-finite {to:?}");
            return false;
        }
        let Some(player) = self.get_mut(id) else {
            return false;
        };
        player.position = to;
        player.trail.push(to);
        log::trace!("move player {id} to {to:?}");
        true
    }

    /// Forget every trail; positions stay where they are.
    pub fn clear_trails(&mut self) -> bool {
        let mut changed = false;
        for player in &mut self.players {
            if !player.trail.is_empty() {
                player.trail.clear();
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn registry() -> PlayerRegistry {
        PlayerRegistry::new(SpawnConfig::default())
    }

    #[test]
    fn first_player_defaults() {
        let mut reg = registry();
        let id = reg.add();
        assert_eq!(id, PlayerId(1));
        let p = reg.get(id).unwrap();
        assert_eq!(p.name, "A");
        assert_eq!(p.position, UnitPoint::new(0.2, 0.2));
        assert!(p.trail.is_empty());
        assert_eq!(p.color, Color::parse("hsl(73 80% 55%)").unwrap());
    }

    #[test]
    fn ids_and_names_distinct_up_to_alphabet() {
        let mut reg = registry();
        for _ in 0..26 {
            reg.add();
        }
        let ids: Vec<u32> = reg.players().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, (1..=26).collect::<Vec<_>>());
        let names: HashSet<&str> = reg.players().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), 26);

        // 27th wraps back to "A".
        let id = reg.add();
        assert_eq!(reg.get(id).unwrap().name, "A");
    }

    #[test]
    fn spawn_positions_step() {
        let mut reg = registry();
        reg.add();
        let second = reg.add();
        let p = reg.get(second).unwrap().position;
        assert!((p.x - 0.24).abs() < 1e-12);
        assert!((p.y - 0.23).abs() < 1e-12);
    }

    #[test]
    fn next_id_follows_max_not_count() {
        let mut reg = registry();
        reg.add();
        reg.add();
        reg.add();
        assert!(reg.remove(PlayerId(1)));
        assert_eq!(reg.add(), PlayerId(4));
        assert!(reg.remove(PlayerId(4)));
        assert!(reg.remove(PlayerId(3)));
        assert_eq!(reg.add(), PlayerId(3));
    }

    #[test]
    fn colors_differ_between_neighbours() {
        let reg = registry();
        let a = reg.color_for(PlayerId(1));
        let b = reg.color_for(PlayerId(2));
        assert_ne!(a, b);
        assert_eq!(reg.color_for(PlayerId(1)), a);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut reg = registry();
        reg.add();
        assert!(!reg.remove(PlayerId(9)));
        assert!(!reg.update(PlayerId(9), &PlayerPatch::name("X")));
        assert!(!reg.move_player(PlayerId(9), UnitPoint::new(0.5, 0.5), Mode::Play));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn move_in_play_appends_new_position() {
        let mut reg = registry();
        let id = reg.add();
        assert!(reg.move_player(id, UnitPoint::new(0.5, 0.5), Mode::Play));
        let p = reg.get(id).unwrap();
        assert_eq!(p.position, UnitPoint::new(0.5, 0.5));
        assert_eq!(p.trail, vec![UnitPoint::new(0.5, 0.5)]);
    }

    #[test]
    fn non_finite_move_is_ignored() {
        let mut reg = registry();
        let id = reg.add();
        for to in [
            UnitPoint::new(f64::NAN, 0.5),
            UnitPoint::new(0.5, f64::INFINITY),
            UnitPoint::new(f64::NEG_INFINITY, f64::NAN),
        ] {
            assert!(!reg.move_player(id, to, Mode::Play), "accepted {to:?}");
        }
        let p = reg.get(id).unwrap();
        assert_eq!(p.position, UnitPoint::new(0.2, 0.2));
        assert!(p.trail.is_empty());
    }

    #[test]
    fn move_in_draw_is_ignored() {
        let mut reg = registry();
        let id = reg.add();
        reg.move_player(id, UnitPoint::new(0.5, 0.5), Mode::Play);
        assert!(!reg.move_player(id, UnitPoint::new(0.9, 0.9), Mode::Draw));
        let p = reg.get(id).unwrap();
        assert_eq!(p.position, UnitPoint::new(0.5, 0.5));
        assert_eq!(p.trail.len(), 1);
    }

    #[test]
    fn positions_are_not_clamped() {
        let mut reg = registry();
        let id = reg.add();
        reg.move_player(id, UnitPoint::new(-0.25, 1.4), Mode::Play);
        assert_eq!(reg.get(id).unwrap().position, UnitPoint::new(-0.25, 1.4));
    }

    #[test]
    fn clear_trails_keeps_positions() {
        let mut reg = registry();
        let a = reg.add();
        let b = reg.add();
        reg.move_player(a, UnitPoint::new(0.3, 0.3), Mode::Play);
        reg.move_player(b, UnitPoint::new(0.7, 0.6), Mode::Play);
        assert!(reg.clear_trails());
        assert!(reg.players().iter().all(|p| p.trail.is_empty()));
        assert_eq!(reg.get(b).unwrap().position, UnitPoint::new(0.7, 0.6));
        assert!(!reg.clear_trails());
    }
}
