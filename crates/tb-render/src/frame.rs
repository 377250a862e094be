//! Board state → render feed.
//!
//! The painter (Canvas2D in the browser, anything else natively) gets
//! everything already in surface coordinates and does no coordinate work of
//! its own. Paint order is the field order of [`Frame`]: background,
//! strokes, trails, markers.

use kurbo::{BezPath, Point};
use serde::Serialize;
use tb_core::color::Color;
use tb_core::config::MarkerConfig;
use tb_core::coords::{CoordMapper, SurfacePoint};
use tb_core::id::PlayerId;
use tb_core::layout::FittedRect;
use tb_core::model::{CourtVariant, Mode, Player, Stroke};

/// Everything the frame is built from. Borrowed for the duration of one
/// build; nothing is retained.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub mode: Mode,
    pub court: CourtVariant,
    pub rect: FittedRect,
    pub players: &'a [Player],
    pub strokes: &'a [Stroke],
    pub marker: &'a MarkerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokeFeed {
    pub color: Color,
    pub width: f64,
    pub points: Vec<SurfacePoint>,
    /// SVG path data (`M x y L x y ...`), ready for `Path2D`.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrailFeed {
    pub player: PlayerId,
    pub color: Color,
    pub width: f64,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerFeed {
    pub id: PlayerId,
    pub name: String,
    pub color: Color,
    pub center: SurfacePoint,
    pub radius: f64,
    /// Where the label text starts.
    pub label: SurfacePoint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub mode: Mode,
    pub court: CourtVariant,
    /// Where to draw the court image; `None` until it is available.
    pub background: Option<FittedRect>,
    pub strokes: Vec<StrokeFeed>,
    pub trails: Vec<TrailFeed>,
    pub markers: Vec<MarkerFeed>,
}

impl Frame {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::warn!("frame encode failed: {e}");
            "{}".to_string()
        })
    }
}

/// Open polyline through `points`, in order.
pub fn polyline<I>(points: I) -> BezPath
where
    I: IntoIterator<Item = SurfacePoint>,
{
    let mut path = BezPath::new();
    let mut points = points.into_iter();
    if let Some(first) = points.next() {
        path.move_to(Point::new(first.x, first.y));
        for p in points {
            path.line_to(Point::new(p.x, p.y));
        }
    }
    path
}

pub fn build_frame(input: FrameInput<'_>) -> Frame {
    let mapper = CoordMapper::new(input.rect);

    let strokes = input
        .strokes
        .iter()
        .map(|stroke| StrokeFeed {
            color: stroke.color,
            width: stroke.width,
            points: stroke.points.clone(),
            path: polyline(stroke.points.iter().copied()).to_svg(),
        })
        .collect();

    // Players and their trails are only shown while playing.
    let (trails, markers) = if input.mode == Mode::Play {
        let trails = input
            .players
            .iter()
            .filter(|p| p.trail.len() > 1)
            .map(|p| TrailFeed {
                player: p.id,
                color: p.color,
                width: input.marker.trail_width,
                path: polyline(p.trail.iter().map(|u| mapper.to_surface(*u))).to_svg(),
            })
            .collect();
        let markers = input
            .players
            .iter()
            .map(|p| {
                let center = mapper.to_surface(p.position);
                MarkerFeed {
                    id: p.id,
                    name: p.name.clone(),
                    color: p.color,
                    center,
                    radius: input.marker.radius,
                    label: center.offset(input.marker.label_dx, input.marker.label_dy),
                }
            })
            .collect();
        (trails, markers)
    } else {
        (Vec::new(), Vec::new())
    };

    Frame {
        mode: input.mode,
        court: input.court,
        background: (!input.rect.is_empty()).then_some(input.rect),
        strokes,
        trails,
        markers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tb_core::coords::UnitPoint;
    use tb_core::model::StrokeStyle;

    const RECT: FittedRect = FittedRect {
        x: 0.0,
        y: 100.0,
        width: 800.0,
        height: 400.0,
    };

    fn players() -> Vec<Player> {
        let mut a = Player::new(PlayerId(1), "A", Color::BLACK, UnitPoint::new(0.5, 0.5));
        a.trail = vec![UnitPoint::new(0.25, 0.25), UnitPoint::new(0.5, 0.5)];
        let mut b = Player::new(PlayerId(2), "B", Color::WHITE, UnitPoint::new(0.2, 0.2));
        b.trail = vec![UnitPoint::new(0.2, 0.2)];
        vec![a, b]
    }

    fn strokes() -> Vec<Stroke> {
        let mut s = Stroke::new(SurfacePoint::new(10.0, 10.0), StrokeStyle::default());
        s.points.push(SurfacePoint::new(20.0, 20.0));
        vec![s]
    }

    fn input<'a>(
        mode: Mode,
        players: &'a [Player],
        strokes: &'a [Stroke],
        marker: &'a MarkerConfig,
    ) -> FrameInput<'a> {
        FrameInput {
            mode,
            court: CourtVariant::Cropped,
            rect: RECT,
            players,
            strokes,
            marker,
        }
    }

    #[test]
    fn play_frame_maps_markers_to_surface() {
        let (p, s, m) = (players(), strokes(), MarkerConfig::default());
        let frame = build_frame(input(Mode::Play, &p, &s, &m));

        assert_eq!(frame.background, Some(RECT));
        assert_eq!(frame.markers.len(), 2);
        assert_eq!(frame.markers[0].center, SurfacePoint::new(400.0, 300.0));
        assert_eq!(frame.markers[0].label, SurfacePoint::new(394.0, 292.0));
        assert_eq!(frame.markers[0].radius, 20.0);
    }

    #[test]
    fn only_trails_with_two_points_are_fed() {
        let (p, s, m) = (players(), strokes(), MarkerConfig::default());
        let frame = build_frame(input(Mode::Play, &p, &s, &m));
        assert_eq!(frame.trails.len(), 1);
        assert_eq!(frame.trails[0].player, PlayerId(1));
        assert_eq!(
            BezPath::from_svg(&frame.trails[0].path).unwrap(),
            polyline([SurfacePoint::new(200.0, 200.0), SurfacePoint::new(400.0, 300.0)])
        );
        assert_eq!(frame.trails[0].width, 4.0);
    }

    #[test]
    fn draw_frame_hides_players() {
        let (p, s, m) = (players(), strokes(), MarkerConfig::default());
        let frame = build_frame(input(Mode::Draw, &p, &s, &m));
        assert!(frame.markers.is_empty());
        assert!(frame.trails.is_empty());
        assert_eq!(frame.strokes.len(), 1);
        assert_eq!(
            BezPath::from_svg(&frame.strokes[0].path).unwrap(),
            polyline(s[0].points.iter().copied())
        );
    }

    #[test]
    fn no_background_without_image() {
        let (p, s, m) = (players(), strokes(), MarkerConfig::default());
        let mut i = input(Mode::Play, &p, &s, &m);
        i.rect = FittedRect::EMPTY;
        assert_eq!(build_frame(i).background, None);
    }

    #[test]
    fn json_shape() {
        let (p, s, m) = (players(), strokes(), MarkerConfig::default());
        let json: serde_json::Value =
            serde_json::from_str(&build_frame(input(Mode::Play, &p, &s, &m)).to_json()).unwrap();
        assert_eq!(json["mode"], "play");
        assert_eq!(json["court"], "cropped");
        assert_eq!(json["markers"][0]["color"], "#000000");
        assert_eq!(json["strokes"][0]["points"][1]["x"], 20.0);
    }
}
