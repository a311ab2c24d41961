// Copyright 2026 the Panzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ballistic deceleration for fling gestures.
//!
//! Each axis decelerates at a constant rate from its initial velocity and
//! stops either where the motion naturally runs out or at the edge of its
//! (slack-widened) legal range, whichever comes first. Like animations, the
//! scroller is sampled against host timestamps; the start time is stamped on
//! the first sample.

use crate::point::ScaledPoint;

/// Deceleration applied to fling velocity, in view pixels per second².
const DECELERATION: f64 = 4500.0;

#[derive(Clone, Copy, Debug)]
struct FlingAxis {
    start: f64,
    velocity: f64,
    end: f64,
    duration: f64,
}

impl FlingAxis {
    /// `min..max` is the strict legal range; `over` widens it on both ends.
    fn new(start: f64, velocity: f64, min: f64, max: f64, over: f64) -> Self {
        let lo = (min - over).min(start);
        let hi = (max + over).max(start);
        let duration = velocity.abs() / DECELERATION;
        // Distance covered by a full deceleration from `velocity` to zero.
        let natural_end = start + velocity * duration / 2.0;
        Self {
            start,
            velocity,
            end: natural_end.clamp(lo, hi),
            duration,
        }
    }

    /// Position after `t` seconds.
    fn sample(&self, t: f64) -> f64 {
        if t >= self.duration {
            return self.end;
        }
        let decel = if self.velocity >= 0.0 {
            DECELERATION
        } else {
            -DECELERATION
        };
        let position = self.start + self.velocity * t - 0.5 * decel * t * t;
        // Motion toward `end` is monotonic; never pass the clamped stop.
        if self.velocity >= 0.0 {
            position.min(self.end)
        } else {
            position.max(self.end)
        }
    }

    fn finished(&self, t: f64) -> bool {
        t >= self.duration || self.sample(t) == self.end
    }
}

/// A two-axis fling in scaled-pan coordinates.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FlingScroller {
    x: FlingAxis,
    y: FlingAxis,
    start_time: Option<u64>,
}

/// Strict range plus start position for one fling axis.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FlingRange {
    pub(crate) min: f64,
    pub(crate) start: f64,
    pub(crate) max: f64,
    /// Extra room beyond the strict range, zero when over-scroll is off.
    pub(crate) over: f64,
}

impl FlingScroller {
    pub(crate) fn new(x: FlingRange, velocity_x: f64, y: FlingRange, velocity_y: f64) -> Self {
        Self {
            x: FlingAxis::new(x.start, velocity_x, x.min, x.max, x.over),
            y: FlingAxis::new(y.start, velocity_y, y.min, y.max, y.over),
            start_time: None,
        }
    }

    /// The position at `now` and whether the fling has finished.
    pub(crate) fn sample(&mut self, now: u64) -> (ScaledPoint, bool) {
        let start = *self.start_time.get_or_insert(now);
        let t = now.saturating_sub(start) as f64 / 1000.0;
        let position = ScaledPoint::new(self.x.sample(t), self.y.sample(t));
        (position, self.x.finished(t) && self.y.finished(t))
    }
}
