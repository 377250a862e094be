//! Free-draw layer: an ordered list of strokes with throttled point capture.
//!
//! Points arriving faster than the throttle interval are dropped, never
//! queued. There is no distance filter, so consecutive points may coincide;
//! only the sampling rate is bounded.

use crate::coords::SurfacePoint;
use crate::model::{Mode, Stroke, StrokeStyle};

/// Wall-clock rate limiter: accepts at most one event per interval,
/// measured from the last accepted one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throttle {
    interval_ms: f64,
    last_accepted_ms: Option<f64>,
}

impl Throttle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(0.0),
            last_accepted_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn set_interval_ms(&mut self, interval_ms: f64) {
        self.interval_ms = interval_ms.max(0.0);
    }

    /// Record `now_ms` as accepted unconditionally.
    pub fn mark(&mut self, now_ms: f64) {
        self.last_accepted_ms = Some(now_ms);
    }

    /// Accept and record `now_ms` if the interval has elapsed.
    ///
    /// A clock that steps backwards counts as elapsed, so a wall-clock
    /// adjustment can't stall capture.
    pub fn try_accept(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_accepted_ms {
            let elapsed = now_ms - last;
            if (0.0..self.interval_ms).contains(&elapsed) {
                return false;
            }
        }
        self.last_accepted_ms = Some(now_ms);
        true
    }
}

#[derive(Debug, Clone)]
pub struct StrokeRecorder {
    strokes: Vec<Stroke>,
    /// Whether the last stroke is still receiving points.
    open: bool,
    style: StrokeStyle,
    throttle: Throttle,
}

impl StrokeRecorder {
    pub fn new(style: StrokeStyle, throttle_ms: f64) -> Self {
        Self {
            strokes: Vec::new(),
            open: false,
            style,
            throttle: Throttle::new(throttle_ms),
        }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Pen for strokes started from now on; existing strokes keep theirs.
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    pub fn throttle_ms(&self) -> f64 {
        self.throttle.interval_ms()
    }

    pub fn set_throttle_ms(&mut self, interval_ms: f64) {
        self.throttle.set_interval_ms(interval_ms);
    }

    /// Start a stroke at `at` with the current pen. Draw mode only.
    ///
    /// A stroke still open from an earlier gesture is left as it is; the new
    /// one becomes the target of subsequent [`extend`](Self::extend) calls.
    pub fn begin(&mut self, at: SurfacePoint, mode: Mode, now_ms: f64) -> bool {
        if mode != Mode::Draw {
            return false;
        }
        self.strokes.push(Stroke::new(at, self.style));
        self.open = true;
        self.throttle.mark(now_ms);
        log::debug!("begin stroke #{} at {at:?}", self.strokes.len());
        true
    }

    /// Append `at` to the open stroke, subject to the throttle.
    pub fn extend(&mut self, at: SurfacePoint, mode: Mode, now_ms: f64) -> bool {
        if mode != Mode::Draw || !self.open {
            return false;
        }
        let Some(stroke) = self.strokes.last_mut() else {
            return false;
        };
        if !self.throttle.try_accept(now_ms) {
            log::trace!("drop stroke point {at:?} (throttled)");
            return false;
        }
        stroke.points.push(at);
        true
    }

    /// Close the open stroke. Later `extend` calls are ignored until the
    /// next `begin`.
    pub fn end(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        if let Some(stroke) = self.strokes.last() {
            log::debug!("end stroke with {} points", stroke.points.len());
        }
        true
    }

    /// Drop the most recent stroke, finished or not.
    pub fn undo_last(&mut self) -> bool {
        if self.strokes.pop().is_none() {
            return false;
        }
        self.open = false;
        log::debug!("undo stroke, {} left", self.strokes.len());
        true
    }

    pub fn clear_all(&mut self) -> bool {
        let changed = !self.strokes.is_empty() || self.open;
        self.strokes.clear();
        self.open = false;
        changed
    }
}

impl Default for StrokeRecorder {
    fn default() -> Self {
        Self::new(StrokeStyle::default(), 8.0)
    }
}
