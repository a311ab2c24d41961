// Copyright 2026 the Panzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinch handling: focus capture and over-pinch release correction.

use panzoom_engine::{AbsolutePoint, Engine, State};

use crate::event::PinchSample;

/// Routes pinch steps into engine zoom operations.
///
/// The gesture focus is captured once, on the first step, and converted to a
/// content coordinate; that way it stays valid as the zoom changes under the
/// user's fingers mid-gesture.
#[derive(Clone, Copy, Debug, Default)]
pub struct PinchHandler {
    focus: Option<AbsolutePoint>,
}

impl PinchHandler {
    /// Creates a handler with no gesture in progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles one pinch step. Returns whether it was handled.
    ///
    /// Not handled when zooming is disabled or the transition to
    /// [`State::Pinching`] is denied.
    pub fn on_scale(&mut self, engine: &mut Engine, sample: PinchSample) -> bool {
        if !engine.zoom_enabled() {
            return false;
        }
        if !engine.set_state(State::Pinching) {
            return false;
        }
        let focus = *self
            .focus
            .get_or_insert_with(|| engine.view_point_to_content(sample.focus));
        let new_zoom = engine.zoom() * sample.factor;
        engine.apply_pinch(new_zoom, focus, true);
        true
    }

    /// Handles the end of the pinch gesture.
    ///
    /// If over-pinching is enabled and the zoom ended up outside the strict
    /// bounds, an animated correction back to the nearest bound starts;
    /// otherwise the engine goes idle.
    pub fn on_scale_end(&mut self, engine: &mut Engine) {
        self.focus = None;
        if engine.over_pinch_enabled() {
            let corrected = engine.clamp_zoom(engine.zoom(), false);
            if corrected != engine.zoom() {
                engine.animate_zoom(corrected, true);
                return;
            }
        }
        engine.set_state(State::Idle);
    }
}
