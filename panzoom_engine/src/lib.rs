// Copyright 2026 the Panzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=panzoom_engine --heading-base-level=0

//! Panzoom Engine: a headless pan/zoom transform engine for 2D content.
//!
//! This crate turns pan and zoom intents — programmatic calls or classified
//! gesture primitives — into a continuously-updated uniform scale +
//! translation transform over a content rectangle inside a bounded viewport.
//! It focuses on:
//! - Owning the transform and the gesture state machine
//!   (idle/drag/pinch/animate/fling).
//! - Enforcing zoom limits and pan boundaries, with elastic
//!   over-scroll/over-pinch slack during gestures.
//! - Centering policy, base-zoom fitting and per-axis gravity at layout.
//! - Time-interpolated transitions and fling deceleration, driven by
//!   host-supplied frame ticks.
//!
//! It does **not** render, recognize gestures from raw pointer streams, or
//! talk to any windowing system. Callers are expected to:
//! - Feed content/viewport dimensions from their layout pass.
//! - Apply the transform delivered through [`Observer::on_update`] to their
//!   pixels (a canvas, a view hierarchy, a video surface).
//! - Run platform gesture recognizers and route the classified primitives
//!   through a higher layer (see the `panzoom_gestures` crate).
//! - Call [`Engine::tick`] once per display frame while
//!   [`Engine::needs_frame`] is true.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use panzoom_engine::{AbsolutePoint, Engine};
//!
//! let mut engine = Engine::new();
//! engine.set_content_size(Size::new(2000.0, 1000.0));
//! engine.set_viewport_size(Size::new(800.0, 600.0));
//!
//! // The content was fitted inside the viewport; zoom in and pan, without
//! // animation.
//! engine.zoom_to(2.0, false);
//! engine.pan_to(AbsolutePoint::new(-100.0, -50.0), false);
//!
//! // The resulting transform maps content coordinates to view pixels.
//! let transform = engine.transform();
//! ```
//!
//! ## Zoom is two-level
//!
//! The engine distinguishes the *logical* zoom ([`Engine::zoom`], `1.0` =
//! as initially laid out) from the *real* zoom ([`Engine::real_zoom`], the
//! scale factor actually inside the transform). The two differ by the base
//! zoom computed from the [`Transformation`] policy at layout. Zoom
//! constraints can be expressed against either axis via [`ZoomKind`], so
//! they survive viewport resizes unchanged.
//!
//! ## Design notes
//!
//! - The transform is axis-aligned with a **uniform** scale factor; rotation
//!   and skew are intentionally out of scope.
//! - Observers receive copy-out snapshots, never live aliases of engine
//!   state.
//! - There is no clock in this crate: animations and flings are sampled
//!   against timestamps the host passes to [`Engine::tick`].
//! - Boundary violations are corrected silently; state-transition denial is
//!   an ordinary `bool` outcome. Only negative zoom constraints are errors.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod anim;
mod engine;
mod fling;
mod geometry;
mod modes;
mod observer;
mod point;
mod state;
mod trace;

pub mod bounds;

pub use engine::Engine;
pub use geometry::Geometry;
pub use modes::{Align, Gravity, Transformation, ZoomKind};
pub use observer::{Observer, ObserverId, TransformSnapshot};
pub use point::{AbsolutePoint, ScaledPoint};
pub use state::State;
pub use trace::{Diagnostics, NoDiagnostics};

pub use bounds::InvalidZoomBound;
