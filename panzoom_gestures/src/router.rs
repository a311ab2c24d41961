// Copyright 2026 the Panzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event ladder that resolves gesture precedence.

use panzoom_engine::{Engine, State};

use crate::event::{EventReply, TouchInput, TouchPhase};
use crate::pinch::PinchHandler;
use crate::scroll::ScrollFlingHandler;

/// Feeds classified gesture primitives into an [`Engine`], resolving
/// conflicts between the pinch recognizer and the drag/fling recognizer.
///
/// Precedence rules:
/// - While the engine is animating, every event is stolen outright and no
///   sample is processed: running animations are not interruptible by touch.
/// - Pinch samples are always processed; drag/fling samples are skipped
///   while a pinch is in progress.
/// - A pointer-up or cancel while dragging runs the scroll-end hook, which
///   may start an over-scroll snap-back.
/// - A pointer-down cancels a running fling (the content stops under the
///   finger).
///
/// ```
/// use kurbo::Size;
/// use panzoom_engine::Engine;
/// use panzoom_gestures::{GestureRouter, ScrollSample, TouchInput, TouchPhase};
///
/// let mut engine = Engine::new();
/// engine.set_content_size(Size::new(2000.0, 2000.0));
/// engine.set_viewport_size(Size::new(500.0, 500.0));
/// engine.zoom_to(2.0, false);
/// let mut router = GestureRouter::new();
///
/// let down = router.process(&mut engine, &TouchInput::new(TouchPhase::Down));
/// assert!(down.consumed());
///
/// let drag = TouchInput::new(TouchPhase::Move)
///     .with_scroll(ScrollSample { dx: -30.0, dy: 0.0 });
/// let reply = router.process(&mut engine, &drag);
/// assert!(reply.consumed_by_intercept());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureRouter {
    pinch: PinchHandler,
    scroll: ScrollFlingHandler,
}

impl GestureRouter {
    /// Creates a router with default handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether fling gestures are honored.
    #[must_use]
    pub fn fling_enabled(&self) -> bool {
        self.scroll.fling_enabled()
    }

    /// Enables or disables fling gestures.
    pub fn set_fling_enabled(&mut self, enabled: bool) {
        self.scroll.set_fling_enabled(enabled);
    }

    /// Processes one event envelope.
    ///
    /// Call this from both the intercept-phase and handle-phase entry points
    /// of the host view system, and consume the event according to
    /// [`EventReply::consumed_by_intercept`] / [`EventReply::consumed`].
    pub fn process(&mut self, engine: &mut Engine, input: &TouchInput) -> EventReply {
        if engine.state() == State::Animating {
            return EventReply::Steal;
        }

        let mut handled = false;
        let was_dragging = engine.state() == State::Dragging;

        if input.phase == TouchPhase::Down {
            // Stop a running fling under the finger. Also interesting when
            // idle: the gesture may start on a later event.
            engine.set_state(State::Idle);
            handled = true;
        }

        if let Some(sample) = input.pinch {
            handled |= self.pinch.on_scale(engine, sample);
        }
        if input.pinch_ended {
            self.pinch.on_scale_end(engine);
            handled = true;
        }

        // A pinch in progress must not simultaneously register as a drag.
        if engine.state() != State::Pinching {
            if let Some(sample) = input.scroll {
                handled |= self.scroll.on_scroll(engine, sample);
            }
            if let Some(sample) = input.fling {
                handled |= self.scroll.on_fling(engine, sample);
            }
        }

        // Detect drag ends. `was_dragging` covers a refused fling, which
        // reverts to idle but must still snap back from over-pan.
        if matches!(input.phase, TouchPhase::Up | TouchPhase::Cancel)
            && (engine.state() == State::Dragging
                || (was_dragging && engine.state() == State::Idle))
        {
            // Not simply going idle: we might be over-panned, and the hook
            // animates back to a legal position.
            self.scroll.on_scroll_end(engine);
            handled = true;
        }

        // Mid-gesture the stream stays owned even for events that carried no
        // sample; otherwise interest without a started gesture just listens.
        if engine.state() != State::Idle {
            EventReply::Steal
        } else if handled {
            EventReply::Listen
        } else {
            EventReply::Ignore
        }
    }
}
