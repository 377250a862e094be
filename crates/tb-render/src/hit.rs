//! Hit testing: pointer position → player marker.
//!
//! Walks markers in reverse paint order so the topmost (last added) one
//! wins when markers overlap.

use kurbo::{Circle, Point, Shape};
use tb_core::coords::{CoordMapper, SurfacePoint};
use tb_core::id::PlayerId;
use tb_core::model::Player;

/// A marker under the pointer, with its current surface center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerHit {
    pub id: PlayerId,
    pub center: SurfacePoint,
}

/// Marker outline in surface space.
pub fn marker_shape(player: &Player, mapper: &CoordMapper, radius: f64) -> Circle {
    let c = mapper.to_surface(player.position);
    Circle::new(Point::new(c.x, c.y), radius)
}

/// Find the topmost marker containing `(px, py)`.
///
/// Returns `None` while the court rect is degenerate: without a fitted
/// rect there is no meaningful unit position to drag to.
pub fn hit_test_marker(
    players: &[Player],
    mapper: &CoordMapper,
    radius: f64,
    px: f64,
    py: f64,
) -> Option<MarkerHit> {
    if mapper.rect().is_empty() {
        return None;
    }
    let pointer = Point::new(px, py);
    players.iter().rev().find_map(|player| {
        let shape = marker_shape(player, mapper, radius);
        shape.contains(pointer).then(|| MarkerHit {
            id: player.id,
            center: SurfacePoint::new(shape.center.x, shape.center.y),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tb_core::color::Color;
    use tb_core::coords::UnitPoint;
    use tb_core::layout::FittedRect;

    const RECT: FittedRect = FittedRect {
        x: 0.0,
        y: 100.0,
        width: 800.0,
        height: 400.0,
    };

    fn player(id: u32, x: f64, y: f64) -> Player {
        Player::new(PlayerId(id), "A", Color::BLACK, UnitPoint::new(x, y))
    }

    #[test]
    fn hits_marker_within_radius() {
        let players = vec![player(1, 0.5, 0.5)];
        let mapper = CoordMapper::new(RECT);
        // Marker center is (400, 300).
        let hit = hit_test_marker(&players, &mapper, 20.0, 410.0, 310.0).unwrap();
        assert_eq!(hit.id, PlayerId(1));
        assert_eq!(hit.center, SurfacePoint::new(400.0, 300.0));
        assert!(hit_test_marker(&players, &mapper, 20.0, 430.0, 300.0).is_none());
    }

    #[test]
    fn topmost_marker_wins() {
        let players = vec![player(1, 0.5, 0.5), player(2, 0.51, 0.5)];
        let mapper = CoordMapper::new(RECT);
        let hit = hit_test_marker(&players, &mapper, 20.0, 404.0, 300.0).unwrap();
        assert_eq!(hit.id, PlayerId(2));
    }

    #[test]
    fn off_court_markers_are_still_hittable() {
        let players = vec![player(1, 1.1, -0.1)];
        let mapper = CoordMapper::new(RECT);
        // (880, 60)
        assert!(hit_test_marker(&players, &mapper, 20.0, 880.0, 60.0).is_some());
    }

    #[test]
    fn no_hits_without_court() {
        let players = vec![player(1, 0.0, 0.0)];
        let mapper = CoordMapper::new(FittedRect::EMPTY);
        assert!(hit_test_marker(&players, &mapper, 20.0, 0.0, 0.0).is_none());
    }
}
