// Copyright 2026 the Panzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=panzoom_gestures --heading-base-level=0

//! Panzoom Gestures: arbitration between classified gesture primitives and
//! the panzoom engine.
//!
//! Two independently-operating recognizers — a pinch/scale recognizer and a
//! drag/fling recognizer — can fire on the same input stream. This crate
//! owns the precedence rules between them and routes their primitive
//! callbacks into `panzoom_engine` operations, respecting the engine's
//! state machine.
//!
//! Gesture *recognition* itself stays with the host: run your platform's
//! detectors over the raw pointer stream, wrap each raw event and its
//! classified samples in a [`TouchInput`], and hand it to
//! [`GestureRouter::process`]. The returned [`EventReply`] says whether to
//! consume the event in the intercept phase, keep listening, or let it go.
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use panzoom_engine::Engine;
//! use panzoom_gestures::{GestureRouter, PinchSample, TouchInput, TouchPhase};
//!
//! let mut engine = Engine::new();
//! engine.set_content_size(Size::new(1000.0, 1000.0));
//! engine.set_viewport_size(Size::new(500.0, 500.0));
//! let mut router = GestureRouter::new();
//!
//! // A pinch step scales about the gesture focus.
//! let pinch = TouchInput::new(TouchPhase::Move).with_pinch(PinchSample {
//!     factor: 1.1,
//!     focus: Point::new(250.0, 250.0),
//! });
//! let reply = router.process(&mut engine, &pinch);
//! assert!(reply.consumed());
//! assert!(engine.zoom() > 1.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod event;
mod pinch;
mod router;
mod scroll;

pub use event::{EventReply, FlingSample, PinchSample, ScrollSample, TouchInput, TouchPhase};
pub use pinch::PinchHandler;
pub use router::GestureRouter;
pub use scroll::ScrollFlingHandler;
