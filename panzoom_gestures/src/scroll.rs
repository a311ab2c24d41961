// Copyright 2026 the Panzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag and fling handling.

use kurbo::Vec2;
use panzoom_engine::{Engine, ScaledPoint, State};

use crate::event::{FlingSample, ScrollSample};

/// Routes drag steps and flings into engine pan operations.
#[derive(Clone, Copy, Debug)]
pub struct ScrollFlingHandler {
    fling_enabled: bool,
}

impl Default for ScrollFlingHandler {
    fn default() -> Self {
        Self {
            fling_enabled: true,
        }
    }
}

impl ScrollFlingHandler {
    /// Creates a handler with flings enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether fling gestures are honored.
    #[must_use]
    pub fn fling_enabled(&self) -> bool {
        self.fling_enabled
    }

    /// Enables or disables fling gestures.
    pub fn set_fling_enabled(&mut self, enabled: bool) {
        self.fling_enabled = enabled;
    }

    /// Handles one drag step. Returns whether it was handled.
    ///
    /// Over-scroll is allowed here; whatever excursion remains on release is
    /// corrected by [`ScrollFlingHandler::on_scroll_end`]. Deltas on
    /// disabled pan axes are zeroed.
    pub fn on_scroll(&mut self, engine: &mut Engine, sample: ScrollSample) -> bool {
        if !engine.set_state(State::Dragging) {
            return false;
        }
        let dx = if engine.horizontal_pan_enabled() {
            sample.dx
        } else {
            0.0
        };
        let dy = if engine.vertical_pan_enabled() {
            sample.dy
        } else {
            0.0
        };
        if dx != 0.0 || dy != 0.0 {
            engine.apply_scaled_pan(ScaledPoint::new(dx, dy), true);
        }
        true
    }

    /// Handles a fling. Returns whether a fling started.
    ///
    /// Velocity on each disabled pan axis is forced to zero before handing
    /// off to the engine.
    pub fn on_fling(&mut self, engine: &mut Engine, sample: FlingSample) -> bool {
        if !self.fling_enabled {
            return false;
        }
        let vx = if engine.horizontal_pan_enabled() {
            sample.velocity_x
        } else {
            0.0
        };
        let vy = if engine.vertical_pan_enabled() {
            sample.velocity_y
        } else {
            0.0
        };
        engine.start_fling(Vec2::new(vx, vy))
    }

    /// Handles the end of a drag (pointer up or cancel while dragging).
    ///
    /// If over-scroll is enabled on an axis and the pan ended up outside the
    /// strict bounds, an animated snap-back starts; otherwise the engine
    /// goes idle directly.
    pub fn on_scroll_end(&mut self, engine: &mut Engine) {
        if engine.over_scroll_horizontal() || engine.over_scroll_vertical() {
            let correction = engine.pan_correction();
            if correction != ScaledPoint::ZERO {
                engine.animate_scaled_pan(correction, true);
                return;
            }
        }
        engine.set_state(State::Idle);
    }
}
