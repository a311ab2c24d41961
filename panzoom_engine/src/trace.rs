// Copyright 2026 the Panzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics hooks for embedders.
//!
//! The engine does not log. Embedders that want visibility into state
//! transitions, size changes or gesture outcomes install a [`Diagnostics`]
//! implementation and forward the structured callbacks into whatever logging
//! or inspection facility they use. Every hook has an empty default body, so
//! implementations only override what they care about; [`NoDiagnostics`] is
//! the default sink.

use kurbo::{Size, Vec2};

use crate::state::State;

/// A callback sink for engine diagnostics.
pub trait Diagnostics {
    /// Called for every requested state transition, including denied ones
    /// and no-op repeats.
    fn state_transition(&mut self, from: State, to: State, allowed: bool) {
        let _ = (from, to, allowed);
    }

    /// Called when content/viewport dimensions produce a new base zoom.
    ///
    /// `first_init` distinguishes the initial layout from later resizes.
    fn size_changed(&mut self, content: Size, viewport: Size, base_zoom: f64, first_init: bool) {
        let _ = (content, viewport, base_zoom, first_init);
    }

    /// Called when an animated transition is scheduled.
    fn animation_started(&mut self, duration_ms: u64) {
        let _ = duration_ms;
    }

    /// Called when a fling starts with the given velocity, in view pixels
    /// per second.
    fn fling_started(&mut self, velocity: Vec2) {
        let _ = velocity;
    }

    /// Called when a fling request is refused because no axis can move.
    fn fling_refused(&mut self) {}
}

/// The default diagnostics sink: discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {}
