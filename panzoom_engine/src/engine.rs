// Copyright 2026 the Panzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stateful engine that owns the transform.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Affine, Point, Size, Vec2};

use crate::anim::{Animation, Target, ease_in_out, lerp};
use crate::bounds::{Axis, InvalidZoomBound, PanBounds, ZoomBounds};
use crate::fling::{FlingRange, FlingScroller};
use crate::geometry::Geometry;
use crate::modes::{Align, Gravity, Transformation, ZoomKind};
use crate::observer::{Observer, ObserverId, Observers, TransformSnapshot};
use crate::point::{AbsolutePoint, ScaledPoint};
use crate::state::State;
use crate::trace::{Diagnostics, NoDiagnostics};

/// Translates pan/zoom intents into a continuously-updated 2D transform.
///
/// The engine owns a uniform scale + translation transform over a content
/// rectangle inside a viewport, and is the only place where that transform
/// is mutated. It becomes active once both [`Engine::set_content_size`] and
/// [`Engine::set_viewport_size`] have been given positive dimensions; until
/// then every operation is a silent no-op, since there is nothing to apply
/// it to.
///
/// Out-of-range pan and zoom requests are never errors: they are silently
/// clamped by the configured constraints, optionally with temporary elastic
/// slack during gestures. Only malformed constraint configuration
/// ([`Engine::set_min_zoom`] / [`Engine::set_max_zoom`] with a negative
/// value) fails, and it fails synchronously without touching engine state.
///
/// Animated transitions and flings are driven cooperatively: the host calls
/// [`Engine::tick`] with its own timestamps on every display frame while
/// [`Engine::needs_frame`] is true. Between frames, input may request state
/// transitions, which is how running animations get cancelled.
///
/// ```
/// use kurbo::Size;
/// use panzoom_engine::Engine;
///
/// let mut engine = Engine::new();
/// engine.set_content_size(Size::new(1000.0, 500.0));
/// engine.set_viewport_size(Size::new(500.0, 500.0));
///
/// // The content is fitted inside the viewport: real zoom is 0.5,
/// // logical zoom is 1.
/// assert_eq!(engine.real_zoom(), 0.5);
/// assert_eq!(engine.zoom(), 1.0);
///
/// // Requests outside the configured range are clamped, never rejected.
/// engine.zoom_to(100.0, false);
/// assert_eq!(engine.zoom(), 2.5);
/// ```
pub struct Engine {
    geometry: Geometry,
    zoom: f64,
    base_zoom: f64,
    initialized: bool,
    state: State,
    transformation: Transformation,
    gravity: Gravity,
    pan_bounds: PanBounds,
    zoom_bounds: ZoomBounds,
    allow_fling_in_over_scroll: bool,
    animation_duration: u64,
    clear_animation: bool,
    animation: Option<Animation>,
    fling: Option<FlingScroller>,
    observers: Observers,
    diagnostics: Box<dyn Diagnostics>,
}

impl Engine {
    /// The default duration of animated transitions, in milliseconds.
    pub const DEFAULT_ANIMATION_DURATION: u64 = 280;

    /// Creates an engine with default policy and no content.
    #[must_use]
    pub fn new() -> Self {
        Self {
            geometry: Geometry::new(),
            zoom: 1.0,
            base_zoom: 0.0,
            initialized: false,
            state: State::Idle,
            transformation: Transformation::default(),
            gravity: Gravity::default(),
            pan_bounds: PanBounds::default(),
            zoom_bounds: ZoomBounds::default(),
            allow_fling_in_over_scroll: false,
            animation_duration: Self::DEFAULT_ANIMATION_DURATION,
            clear_animation: false,
            animation: None,
            fling: None,
            observers: Observers::default(),
            diagnostics: Box::new(NoDiagnostics),
        }
    }

    //region Configuration

    /// Sets the base transformation applied when content is first laid out.
    ///
    /// Defaults to [`Transformation::CenterInside`] with centered gravity.
    /// Takes effect at the next (re)initialization.
    pub fn set_transformation(&mut self, transformation: Transformation, gravity: Gravity) {
        self.transformation = transformation;
        self.gravity = gravity;
    }

    /// Sets the minimum zoom and the axis it is measured against.
    ///
    /// If the current zoom violates the new bound, the engine animates to
    /// the nearest legal value.
    pub fn set_min_zoom(&mut self, zoom: f64, kind: ZoomKind) -> Result<(), InvalidZoomBound> {
        self.zoom_bounds.set_min(zoom, kind)?;
        if self.initialized {
            let min = self.zoom_bounds.resolved_min(self.base_zoom);
            if self.zoom < min {
                self.zoom_to(min, true);
            }
        }
        Ok(())
    }

    /// Sets the maximum zoom and the axis it is measured against.
    ///
    /// If the current zoom violates the new bound, the engine animates to
    /// the nearest legal value.
    pub fn set_max_zoom(&mut self, zoom: f64, kind: ZoomKind) -> Result<(), InvalidZoomBound> {
        self.zoom_bounds.set_max(zoom, kind)?;
        if self.initialized {
            let max = self.zoom_bounds.resolved_max(self.base_zoom);
            if self.zoom > max {
                self.zoom_to(max, true);
            }
        }
        Ok(())
    }

    /// Whether pinch zooming is enabled.
    #[must_use]
    pub fn zoom_enabled(&self) -> bool {
        self.zoom_bounds.zoom_enabled
    }

    /// Enables or disables pinch zooming.
    pub fn set_zoom_enabled(&mut self, enabled: bool) {
        self.zoom_bounds.zoom_enabled = enabled;
    }

    /// Whether pinch gestures may temporarily exceed the zoom bounds.
    #[must_use]
    pub fn over_pinch_enabled(&self) -> bool {
        self.zoom_bounds.over_pinch_enabled
    }

    /// Enables or disables over-pinching.
    pub fn set_over_pinch_enabled(&mut self, enabled: bool) {
        self.zoom_bounds.over_pinch_enabled = enabled;
    }

    /// Whether drags may pan horizontally.
    #[must_use]
    pub fn horizontal_pan_enabled(&self) -> bool {
        self.pan_bounds.horizontal_pan_enabled
    }

    /// Enables or disables horizontal panning.
    pub fn set_horizontal_pan_enabled(&mut self, enabled: bool) {
        self.pan_bounds.horizontal_pan_enabled = enabled;
    }

    /// Whether drags may pan vertically.
    #[must_use]
    pub fn vertical_pan_enabled(&self) -> bool {
        self.pan_bounds.vertical_pan_enabled
    }

    /// Enables or disables vertical panning.
    pub fn set_vertical_pan_enabled(&mut self, enabled: bool) {
        self.pan_bounds.vertical_pan_enabled = enabled;
    }

    /// Whether gestures may temporarily over-scroll horizontally.
    #[must_use]
    pub fn over_scroll_horizontal(&self) -> bool {
        self.pan_bounds.over_scroll_horizontal
    }

    /// Enables or disables horizontal over-scroll.
    pub fn set_over_scroll_horizontal(&mut self, enabled: bool) {
        self.pan_bounds.over_scroll_horizontal = enabled;
    }

    /// Whether gestures may temporarily over-scroll vertically.
    #[must_use]
    pub fn over_scroll_vertical(&self) -> bool {
        self.pan_bounds.over_scroll_vertical
    }

    /// Enables or disables vertical over-scroll.
    pub fn set_over_scroll_vertical(&mut self, enabled: bool) {
        self.pan_bounds.over_scroll_vertical = enabled;
    }

    /// Allows flings to start while the content is over-scrolled.
    ///
    /// Off by default, since it can produce visible artifacts.
    pub fn set_allow_fling_in_over_scroll(&mut self, allow: bool) {
        self.allow_fling_in_over_scroll = allow;
    }

    /// Sets the duration of animated transitions, in milliseconds.
    pub fn set_animation_duration(&mut self, duration_ms: u64) {
        self.animation_duration = duration_ms;
    }

    /// Installs a diagnostics sink, replacing the default no-op one.
    pub fn set_diagnostics(&mut self, diagnostics: Box<dyn Diagnostics>) {
        self.diagnostics = diagnostics;
    }

    /// Registers an observer, returning a handle for later removal.
    pub fn add_observer(&mut self, observer: Box<dyn Observer>) -> ObserverId {
        self.observers.add(observer)
    }

    /// Removes a previously registered observer, returning it.
    pub fn remove_observer(&mut self, id: ObserverId) -> Option<Box<dyn Observer>> {
        self.observers.remove(id)
    }

    //endregion

    //region Lifecycle

    /// Notifies the engine of the content size.
    ///
    /// Non-positive dimensions are ignored. The first time both content and
    /// viewport sizes are known, the engine initializes: the base zoom is
    /// computed from the configured [`Transformation`], the logical zoom is
    /// reset to `1.0` and the initial pan honors the configured [`Gravity`].
    /// Later changes preserve the on-screen (real) zoom instead.
    pub fn set_content_size(&mut self, size: Size) {
        if size.width <= 0.0 || size.height <= 0.0 {
            return;
        }
        if self.geometry.content_size() == size {
            return;
        }
        self.geometry.set_content(size);
        self.on_size_changed();
    }

    /// Notifies the engine of the viewport size.
    ///
    /// Same lifecycle rules as [`Engine::set_content_size`]. Call this again
    /// on layout changes (rotation, container resize); the real zoom is
    /// preserved across the change.
    pub fn set_viewport_size(&mut self, size: Size) {
        if size.width <= 0.0 || size.height <= 0.0 {
            return;
        }
        if self.geometry.viewport() == size {
            return;
        }
        self.geometry.set_viewport(size);
        self.on_size_changed();
    }

    /// Resets all geometry, zoom and transform state to uninitialized
    /// defaults. Observers and configuration are kept.
    ///
    /// Subsequent operations are no-ops until content and viewport sizes are
    /// provided again.
    pub fn clear(&mut self) {
        self.geometry = Geometry::new();
        self.zoom = 1.0;
        self.base_zoom = 0.0;
        self.state = State::Idle;
        self.initialized = false;
        self.clear_animation = false;
        self.animation = None;
        self.fling = None;
    }

    fn on_size_changed(&mut self) {
        let content = self.geometry.content_size();
        let viewport = self.geometry.viewport();
        if content.width <= 0.0
            || content.height <= 0.0
            || viewport.width <= 0.0
            || viewport.height <= 0.0
        {
            return;
        }

        // A dimension change invalidates whatever was in flight.
        self.set_state(State::Idle);

        let first_init = !self.initialized;
        if first_init {
            self.base_zoom = self.compute_base_zoom();
            self.geometry.set_transform(Affine::scale(self.base_zoom));
            self.zoom = 1.0;
            self.initialized = true;

            let corrected = self.clamp_zoom(self.zoom, false);
            if corrected != self.zoom {
                self.apply_zoom(corrected, false);
            }

            let delta = self.compute_base_pan() - self.geometry.scaled_pan();
            if delta != ScaledPoint::ZERO {
                self.apply_scaled_pan(delta, false);
            }
            self.ensure_pan_bounds(false);
            self.dispatch();
        } else {
            // Recompute the baseline but keep the on-screen zoom: the
            // transform is untouched unless the preserved zoom now violates
            // the bounds.
            let real_zoom = self.real_zoom();
            self.base_zoom = self.compute_base_zoom();
            self.zoom = real_zoom / self.base_zoom;

            let corrected = self.clamp_zoom(self.zoom, false);
            if corrected != self.zoom {
                self.apply_zoom(corrected, false);
            }
            self.ensure_pan_bounds(false);
            self.dispatch();
        }
        self.diagnostics
            .size_changed(content, viewport, self.base_zoom, first_init);
    }

    fn compute_base_zoom(&self) -> f64 {
        let content = self.geometry.content_size();
        let viewport = self.geometry.viewport();
        let scale_x = viewport.width / content.width;
        let scale_y = viewport.height / content.height;
        match self.transformation {
            Transformation::CenterInside => scale_x.min(scale_y),
            Transformation::CenterCrop => scale_x.max(scale_y),
            Transformation::None => 1.0,
        }
    }

    // Initial pan honoring gravity, for axes where the content overflows.
    // Axes where it fits are centered by the pan constraints instead.
    fn compute_base_pan(&self) -> ScaledPoint {
        let scaled = self.geometry.scaled_size();
        let viewport = self.geometry.viewport();
        let extra_w = scaled.width - viewport.width;
        let extra_h = scaled.height - viewport.height;
        let x = if extra_w > 0.0 {
            match self.gravity.horizontal {
                Align::Start => 0.0,
                Align::Center => -0.5 * extra_w,
                Align::End => -extra_w,
            }
        } else {
            0.0
        };
        let y = if extra_h > 0.0 {
            match self.gravity.vertical {
                Align::Start => 0.0,
                Align::Center => -0.5 * extra_h,
                Align::End => -extra_h,
            }
        } else {
            0.0
        };
        ScaledPoint::new(x, y)
    }

    //endregion

    //region Inspection

    /// Whether content and viewport sizes are known and the engine is active.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The current gesture/animation state.
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// The current logical zoom. `1.0` means "as initially laid out".
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// The actual scale factor of the content, `zoom × base_zoom`.
    #[must_use]
    pub fn real_zoom(&self) -> f64 {
        self.zoom * self.base_zoom
    }

    /// The scale applied at initialization to satisfy the configured
    /// [`Transformation`].
    #[must_use]
    pub fn base_zoom(&self) -> f64 {
        self.base_zoom
    }

    /// The current pan in content coordinates.
    #[must_use]
    pub fn pan(&self) -> AbsolutePoint {
        if !self.initialized {
            return AbsolutePoint::ZERO;
        }
        self.scaled_pan().to_absolute(self.real_zoom())
    }

    /// The horizontal pan in content coordinates.
    #[must_use]
    pub fn pan_x(&self) -> f64 {
        self.pan().x()
    }

    /// The vertical pan in content coordinates.
    #[must_use]
    pub fn pan_y(&self) -> f64 {
        self.pan().y()
    }

    /// The current pan in view pixels.
    #[must_use]
    pub fn scaled_pan(&self) -> ScaledPoint {
        self.geometry.scaled_pan()
    }

    /// A copy of the current content-to-view transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.geometry.transform()
    }

    /// The content size, or zero before it is set.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.geometry.content_size()
    }

    /// The viewport size, or zero before it is set.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.geometry.viewport()
    }

    /// A copy of the full output state, as delivered to observers.
    #[must_use]
    pub fn snapshot(&self) -> TransformSnapshot {
        TransformSnapshot {
            transform: self.geometry.transform(),
            zoom: self.zoom,
            real_zoom: self.real_zoom(),
            pan: self.pan(),
            scaled_pan: self.scaled_pan(),
        }
    }

    /// Clamps a proposed logical zoom against the configured bounds.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64, allow_over_pinch: bool) -> f64 {
        self.zoom_bounds.clamp(zoom, self.base_zoom, allow_over_pinch)
    }

    /// The strict (no-slack) correction that would bring the current pan
    /// back inside its legal range.
    #[must_use]
    pub fn pan_correction(&self) -> ScaledPoint {
        ScaledPoint::new(
            self.pan_bounds
                .correction(Axis::Horizontal, &self.geometry, self.zoom, false),
            self.pan_bounds
                .correction(Axis::Vertical, &self.geometry, self.zoom, false),
        )
    }

    /// Converts a viewport-relative point into content coordinates.
    ///
    /// With a 1000×1000 viewport over 3000×3000 content exactly centered,
    /// the viewport center `(500, 500)` maps to content `(1500, 1500)`.
    #[must_use]
    pub fn view_point_to_content(&self, point: Point) -> AbsolutePoint {
        let pan = self.scaled_pan();
        let scaled = ScaledPoint::new(point.x - pan.x(), point.y - pan.y());
        scaled.to_absolute(self.real_zoom())
    }

    /// Converts a content point into viewport-relative coordinates.
    ///
    /// The inverse of [`Engine::view_point_to_content`].
    #[must_use]
    pub fn content_point_to_view(&self, point: AbsolutePoint) -> Point {
        let scaled = point.to_scaled(self.real_zoom());
        let pan = self.scaled_pan();
        Point::new(scaled.x() + pan.x(), scaled.y() + pan.y())
    }

    /// The scroll offset in view pixels, for scrollbar rendering.
    #[must_use]
    pub fn scroll_offset(&self) -> Vec2 {
        -self.scaled_pan().to_vec2()
    }

    /// The scroll range in view pixels, for scrollbar rendering.
    #[must_use]
    pub fn scroll_range(&self) -> Size {
        self.geometry.scaled_size()
    }

    //endregion

    //region State

    /// Requests a state transition, returning whether it was applied.
    ///
    /// This is the low-level entry used by gesture arbitration; the position
    /// APIs transition internally. Denial leaves the state unchanged and
    /// means the requested operation must not start. Leaving
    /// [`State::Flinging`] cancels the fling; leaving [`State::Animating`]
    /// marks the running animation to stop on its next tick; entering
    /// [`State::Idle`] from another state notifies observers.
    pub fn set_state(&mut self, new: State) -> bool {
        if !self.initialized {
            return false;
        }
        let old = self.state;
        if new == old && !old.repeat_needs_cleanup() {
            self.diagnostics.state_transition(old, new, true);
            return true;
        }
        if !old.transition_allowed(new) {
            self.diagnostics.state_transition(old, new, false);
            return false;
        }
        if new == State::Idle {
            self.dispatch_idle();
        }
        match old {
            State::Flinging => self.fling = None,
            State::Animating => self.clear_animation = true,
            _ => {}
        }
        self.state = new;
        self.diagnostics.state_transition(old, new, true);
        true
    }

    //endregion

    //region Position APIs

    /// Sets zoom and absolute pan at the same time.
    ///
    /// The pan coordinates refer to the content size, so they do not depend
    /// on the current zoom.
    pub fn move_to(&mut self, zoom: f64, pan: AbsolutePoint, animate: bool) {
        if !self.initialized {
            return;
        }
        if animate {
            self.animate_zoom_and_pan(zoom, pan, false);
        } else {
            self.apply_zoom_and_pan(zoom, pan, false);
        }
    }

    /// Pans until the content top-left matches the given coordinates.
    pub fn pan_to(&mut self, pan: AbsolutePoint, animate: bool) {
        self.pan_by(pan - self.pan(), animate);
    }

    /// Pans by the given content-space delta.
    ///
    /// Asking to pan by one content unit moves more than one view pixel
    /// when the content is zoomed in.
    pub fn pan_by(&mut self, delta: AbsolutePoint, animate: bool) {
        self.move_to(self.zoom, self.pan() + delta, animate);
    }

    /// Zooms to the given logical value.
    pub fn zoom_to(&mut self, zoom: f64, animate: bool) {
        if !self.initialized {
            return;
        }
        if animate {
            self.animate_zoom(zoom, false);
        } else {
            self.apply_zoom(zoom, false);
        }
    }

    /// Applies a multiplicative factor to the current zoom.
    pub fn zoom_by(&mut self, factor: f64, animate: bool) {
        self.zoom_to(self.zoom * factor, animate);
    }

    /// A small animated zoom-in (factor 1.3).
    pub fn zoom_in(&mut self) {
        self.zoom_by(1.3, true);
    }

    /// A small animated zoom-out (factor 0.7).
    pub fn zoom_out(&mut self) {
        self.zoom_by(0.7, true);
    }

    /// Zooms so the content reaches the given real (on-screen) scale.
    pub fn real_zoom_to(&mut self, real_zoom: f64, animate: bool) {
        if !self.initialized {
            return;
        }
        self.zoom_to(real_zoom / self.base_zoom, animate);
    }

    //endregion

    //region Apply primitives

    /// Applies a logical zoom about the viewport center, synchronously.
    pub fn apply_zoom(&mut self, zoom: f64, allow_over_pinch: bool) {
        if !self.initialized {
            return;
        }
        let new_zoom = self.clamp_zoom(zoom, allow_over_pinch);
        let factor = new_zoom / self.zoom;
        let viewport = self.geometry.viewport();
        let pivot = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        self.geometry.post_scale(factor, pivot);
        self.zoom = new_zoom;
        self.ensure_pan_bounds(false);
        self.dispatch();
    }

    /// Applies zoom and absolute pan, synchronously.
    ///
    /// After this returns (and absent clamping), the zoom equals the given
    /// value and [`Engine::pan`] equals the given point. The translation is
    /// applied in content space first, then the scale about the origin, so
    /// the absolute-pan semantics are exact before the zoom correction is
    /// layered on.
    pub fn apply_zoom_and_pan(&mut self, zoom: f64, pan: AbsolutePoint, allow_over_scroll: bool) {
        if !self.initialized {
            return;
        }
        let delta = pan - self.pan();
        self.geometry.pre_translate(delta.to_vec2());

        let new_zoom = self.clamp_zoom(zoom, false);
        let factor = new_zoom / self.zoom;
        self.geometry.post_scale(factor, Point::ORIGIN);
        self.zoom = new_zoom;

        self.ensure_pan_bounds(allow_over_scroll);
        self.dispatch();
    }

    /// Applies a translation in view pixels, synchronously.
    pub fn apply_scaled_pan(&mut self, delta: ScaledPoint, allow_over_scroll: bool) {
        if !self.initialized {
            return;
        }
        self.geometry.post_translate(delta.to_vec2());
        self.ensure_pan_bounds(allow_over_scroll);
        self.dispatch();
    }

    /// Applies a logical zoom about a content-space focus point.
    ///
    /// Unlike [`Engine::apply_zoom`] the pivot is the point under the user's
    /// fingers, converted to view coordinates, so it stays stationary while
    /// the pinch changes the zoom around it.
    pub fn apply_pinch(&mut self, zoom: f64, focus: AbsolutePoint, allow_over_pinch: bool) {
        if !self.initialized {
            return;
        }
        // The pivot is the focus point's current position in view pixels,
        // re-derived each step so it tracks the content as zoom changes.
        let pivot = self.content_point_to_view(focus);
        let new_zoom = self.clamp_zoom(zoom, allow_over_pinch);
        let factor = new_zoom / self.zoom;
        self.geometry.post_scale(factor, pivot);
        self.zoom = new_zoom;
        self.ensure_pan_bounds(false);
        self.dispatch();
    }

    // Applies the pan correction to the transform if any is needed.
    fn ensure_pan_bounds(&mut self, allow_over_scroll: bool) {
        let fix_x =
            self.pan_bounds
                .correction(Axis::Horizontal, &self.geometry, self.zoom, allow_over_scroll);
        let fix_y =
            self.pan_bounds
                .correction(Axis::Vertical, &self.geometry, self.zoom, allow_over_scroll);
        if fix_x != 0.0 || fix_y != 0.0 {
            self.geometry.post_translate(Vec2::new(fix_x, fix_y));
        }
    }

    fn dispatch(&mut self) {
        let snapshot = self.snapshot();
        self.observers.notify_update(&snapshot);
    }

    fn dispatch_idle(&mut self) {
        self.observers.notify_idle();
    }

    //endregion

    //region Animation

    /// Starts an animated zoom about the viewport center.
    ///
    /// Dropped if the transition to [`State::Animating`] is denied.
    pub fn animate_zoom(&mut self, zoom: f64, allow_over_pinch: bool) {
        if !self.initialized || !self.set_state(State::Animating) {
            return;
        }
        self.clear_animation = false;
        let target = Target::Zoom {
            from: self.zoom,
            to: self.clamp_zoom(zoom, allow_over_pinch),
            allow_over_pinch,
        };
        self.animation = Some(Animation::new(target, self.animation_duration));
        self.diagnostics.animation_started(self.animation_duration);
    }

    /// Starts an animated combined zoom and absolute-pan transition.
    pub fn animate_zoom_and_pan(&mut self, zoom: f64, pan: AbsolutePoint, allow_over_scroll: bool) {
        if !self.initialized || !self.set_state(State::Animating) {
            return;
        }
        self.clear_animation = false;
        let target = Target::ZoomPan {
            zoom_from: self.zoom,
            zoom_to: self.clamp_zoom(zoom, false),
            pan_from: self.pan(),
            pan_to: pan,
            allow_over_scroll,
        };
        self.animation = Some(Animation::new(target, self.animation_duration));
        self.diagnostics.animation_started(self.animation_duration);
    }

    /// Starts an animated scaled-pan delta, used for snap-back corrections.
    pub fn animate_scaled_pan(&mut self, delta: ScaledPoint, allow_over_scroll: bool) {
        if !self.initialized || !self.set_state(State::Animating) {
            return;
        }
        self.clear_animation = false;
        let from = self.scaled_pan();
        let target = Target::ScaledPan {
            from,
            to: from + delta,
            allow_over_scroll,
        };
        self.animation = Some(Animation::new(target, self.animation_duration));
        self.diagnostics.animation_started(self.animation_duration);
    }

    /// Whether the host should keep scheduling frame ticks.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.animation.is_some() || self.fling.is_some()
    }

    /// Advances pending animations and flings to the given timestamp.
    ///
    /// `now` is a host-supplied monotonic time in milliseconds. Call once
    /// per display frame while [`Engine::needs_frame`] is true.
    pub fn tick(&mut self, now: u64) {
        self.tick_animation(now);
        self.tick_fling(now);
    }

    fn tick_animation(&mut self, now: u64) {
        let Some(mut animation) = self.animation.take() else {
            return;
        };
        // Something forced a transition away from Animating; abort without
        // applying further deltas.
        if self.clear_animation || self.state != State::Animating {
            return;
        }
        let t = animation.progress(now);
        let eased = ease_in_out(t);
        match animation.target {
            Target::Zoom {
                from,
                to,
                allow_over_pinch,
            } => {
                self.apply_zoom(lerp(from, to, eased), allow_over_pinch);
            }
            Target::ZoomPan {
                zoom_from,
                zoom_to,
                pan_from,
                pan_to,
                allow_over_scroll,
            } => {
                let zoom = lerp(zoom_from, zoom_to, eased);
                let pan = AbsolutePoint::new(
                    lerp(pan_from.x(), pan_to.x(), eased),
                    lerp(pan_from.y(), pan_to.y(), eased),
                );
                self.apply_zoom_and_pan(zoom, pan, allow_over_scroll);
            }
            Target::ScaledPan {
                from,
                to,
                allow_over_scroll,
            } => {
                let position = ScaledPoint::new(
                    lerp(from.x(), to.x(), eased),
                    lerp(from.y(), to.y(), eased),
                );
                let delta = position - self.scaled_pan();
                self.apply_scaled_pan(delta, allow_over_scroll);
            }
        }
        if t >= 1.0 {
            self.set_state(State::Idle);
        } else {
            self.animation = Some(animation);
        }
    }

    //endregion

    //region Fling

    /// Starts a fling with the given velocity, in view pixels per second.
    ///
    /// Returns whether the fling started. The request is refused (and the
    /// state reverted to idle) when no axis has a legal scroll range nor
    /// over-scroll slack, or when the content is currently over-scrolled and
    /// flings in over-scroll are not allowed.
    pub fn start_fling(&mut self, velocity: Vec2) -> bool {
        if !self.initialized || !self.set_state(State::Flinging) {
            return false;
        }
        let (x, x_over_scrolled) = self.fling_range(Axis::Horizontal);
        let (y, y_over_scrolled) = self.fling_range(Axis::Vertical);

        let no_range = x.min >= x.max
            && y.min >= y.max
            && !self.pan_bounds.over_scroll_horizontal
            && !self.pan_bounds.over_scroll_vertical;
        let blocked = !self.allow_fling_in_over_scroll && (x_over_scrolled || y_over_scrolled);
        if no_range || blocked {
            self.diagnostics.fling_refused();
            self.set_state(State::Idle);
            return false;
        }

        self.fling = Some(FlingScroller::new(x, velocity.x, y, velocity.y));
        self.diagnostics.fling_started(velocity);
        true
    }

    // The legal scroll range, slack and over-scroll status for one axis.
    // Pans are negative when content overflows, so the range minimum relates
    // to the bottom-right edge and the maximum to the top-left.
    fn fling_range(&self, axis: Axis) -> (FlingRange, bool) {
        let (current, viewport, content, over_scrollable) = match axis {
            Axis::Horizontal => (
                self.scaled_pan().x(),
                self.geometry.viewport().width,
                self.geometry.scaled_size().width,
                self.pan_bounds.over_scroll_horizontal,
            ),
            Axis::Vertical => (
                self.scaled_pan().y(),
                self.geometry.viewport().height,
                self.geometry.scaled_size().height,
                self.pan_bounds.over_scroll_vertical,
            ),
        };
        let fix = self
            .pan_bounds
            .correction(axis, &self.geometry, self.zoom, false);
        let (min, max) = if content <= viewport {
            // Content fits: pinned, no movement on this axis.
            (current + fix, current + fix)
        } else {
            (viewport - content, 0.0)
        };
        let over = if over_scrollable {
            PanBounds::max_over_scroll(self.geometry.viewport(), self.zoom)
        } else {
            0.0
        };
        (
            FlingRange {
                min,
                start: current,
                max,
                over,
            },
            fix != 0.0,
        )
    }

    fn tick_fling(&mut self, now: u64) {
        let Some(mut scroller) = self.fling.take() else {
            return;
        };
        if self.state != State::Flinging {
            return;
        }
        let (position, finished) = scroller.sample(now);
        let delta = position - self.scaled_pan();
        self.apply_scaled_pan(delta, true);
        if !finished {
            self.fling = Some(scroller);
            return;
        }
        // The deceleration may legally end inside the slack zone; correct
        // back to strict bounds with the usual snap-back animation.
        let correction = self.pan_correction();
        let over_scrollable =
            self.pan_bounds.over_scroll_horizontal || self.pan_bounds.over_scroll_vertical;
        if over_scrollable && correction != ScaledPoint::ZERO {
            self.animate_scaled_pan(correction, true);
        } else {
            self.set_state(State::Idle);
        }
    }

    //endregion
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("geometry", &self.geometry)
            .field("zoom", &self.zoom)
            .field("base_zoom", &self.base_zoom)
            .field("initialized", &self.initialized)
            .field("state", &self.state)
            .field("transformation", &self.transformation)
            .field("gravity", &self.gravity)
            .field("pan_bounds", &self.pan_bounds)
            .field("zoom_bounds", &self.zoom_bounds)
            .field("animation_duration", &self.animation_duration)
            .field("animating", &self.animation.is_some())
            .field("flinging", &self.fling.is_some())
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}
