// Copyright 2026 the Panzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observation of engine output.
//!
//! Observers receive a fresh [`TransformSnapshot`] on every mutation
//! (possibly many times per animated gesture) and an idle notification
//! exactly once when the engine settles. Snapshots are copies: an observer
//! can never alias or mutate engine state through them.

use alloc::boxed::Box;
use core::fmt;

use kurbo::Affine;
use smallvec::SmallVec;

use crate::point::{AbsolutePoint, ScaledPoint};

/// A copy of the engine's output at one point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformSnapshot {
    /// The full content-to-view transform. Apply this to pixels.
    pub transform: Affine,
    /// The logical zoom (`1.0` = as initially laid out).
    pub zoom: f64,
    /// The actual scale factor inside [`TransformSnapshot::transform`].
    pub real_zoom: f64,
    /// The pan in content coordinates.
    pub pan: AbsolutePoint,
    /// The pan in view pixels.
    pub scaled_pan: ScaledPoint,
}

/// Receives engine updates.
///
/// Register implementations with `Engine::add_observer`; any number of
/// observers may be registered and removed independently.
pub trait Observer {
    /// Called after every transform mutation.
    fn on_update(&mut self, snapshot: &TransformSnapshot);

    /// Called when the engine returns to the idle state.
    fn on_idle(&mut self) {}
}

/// Handle identifying a registered [`Observer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// The registered observer list.
#[derive(Default)]
pub(crate) struct Observers {
    entries: SmallVec<[(ObserverId, Box<dyn Observer>); 2]>,
    next_id: u64,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Box<dyn Observer>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> Option<Box<dyn Observer>> {
        let index = self.entries.iter().position(|(i, _)| *i == id)?;
        Some(self.entries.remove(index).1)
    }

    pub(crate) fn notify_update(&mut self, snapshot: &TransformSnapshot) {
        for (_, observer) in &mut self.entries {
            observer.on_update(snapshot);
        }
    }

    pub(crate) fn notify_idle(&mut self) {
        for (_, observer) in &mut self.entries {
            observer.on_idle();
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
