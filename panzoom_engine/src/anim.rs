// Copyright 2026 the Panzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-interpolated transitions.
//!
//! An [`Animation`] is a one-shot target plus a duration. The engine samples
//! it against host-supplied timestamps on every frame tick and feeds the
//! interpolated values back through the ordinary apply primitives, so the
//! animated path goes through exactly the same clamping as the immediate
//! one. The start timestamp is captured lazily on the first tick; there is
//! no clock in this crate.

use crate::point::{AbsolutePoint, ScaledPoint};

/// What an animation interpolates toward.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Target {
    /// Plain zoom change about the viewport center.
    Zoom {
        from: f64,
        to: f64,
        allow_over_pinch: bool,
    },
    /// Combined zoom and absolute-pan change.
    ZoomPan {
        zoom_from: f64,
        zoom_to: f64,
        pan_from: AbsolutePoint,
        pan_to: AbsolutePoint,
        allow_over_scroll: bool,
    },
    /// Scaled-pan-only change, used for snap-back corrections.
    ScaledPan {
        from: ScaledPoint,
        to: ScaledPoint,
        allow_over_scroll: bool,
    },
}

/// A scheduled transition, stepped by the engine's frame tick.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Animation {
    pub(crate) target: Target,
    start: Option<u64>,
    duration_ms: u64,
}

impl Animation {
    pub(crate) fn new(target: Target, duration_ms: u64) -> Self {
        Self {
            target,
            start: None,
            duration_ms,
        }
    }

    /// Raw progress in `0.0..=1.0` at `now`, stamping the start time on the
    /// first call.
    pub(crate) fn progress(&mut self, now: u64) -> f64 {
        let start = *self.start.get_or_insert(now);
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_sub(start) as f64;
        (elapsed / self.duration_ms as f64).min(1.0)
    }
}

/// Symmetric ease-in-ease-out curve.
pub(crate) fn ease_in_out(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

pub(crate) fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
