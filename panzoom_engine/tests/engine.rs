// Copyright 2026 the Panzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end engine scenarios: initialization, clamping, animation, fling.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::{Point, Size, Vec2};
use panzoom_engine::{
    AbsolutePoint, Align, Engine, Gravity, Observer, ScaledPoint, State, Transformation,
    TransformSnapshot, ZoomKind,
};

fn engine(content: Size, viewport: Size) -> Engine {
    let mut engine = Engine::new();
    engine.set_content_size(content);
    engine.set_viewport_size(viewport);
    engine
}

#[track_caller]
fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

/// Drives pending animations and flings to completion with 16 ms frames,
/// returning the timestamp after the last tick.
fn settle(engine: &mut Engine, from_ms: u64) -> u64 {
    let mut now = from_ms;
    let mut steps = 0;
    while engine.needs_frame() {
        engine.tick(now);
        now += 16;
        steps += 1;
        assert!(steps < 10_000, "engine did not settle");
    }
    now
}

#[derive(Default)]
struct Recorder {
    updates: Cell<usize>,
    idles: Cell<usize>,
    last: RefCell<Option<TransformSnapshot>>,
}

struct SharedRecorder(Rc<Recorder>);

impl Observer for SharedRecorder {
    fn on_update(&mut self, snapshot: &TransformSnapshot) {
        self.0.updates.set(self.0.updates.get() + 1);
        *self.0.last.borrow_mut() = Some(*snapshot);
    }

    fn on_idle(&mut self) {
        self.0.idles.set(self.0.idles.get() + 1);
    }
}

#[test]
fn operations_before_initialization_are_ignored() {
    let mut engine = Engine::new();
    engine.zoom_to(2.0, false);
    engine.pan_to(AbsolutePoint::new(10.0, 10.0), false);
    engine.move_to(3.0, AbsolutePoint::new(1.0, 1.0), true);

    assert!(!engine.is_initialized());
    assert_eq!(engine.zoom(), 1.0);
    assert!(!engine.set_state(State::Dragging));
    assert!(!engine.start_fling(Vec2::new(100.0, 0.0)));
    assert!(!engine.needs_frame());
}

#[test]
fn initialization_fits_and_centers() {
    let engine = engine(Size::new(1000.0, 500.0), Size::new(500.0, 500.0));

    assert!(engine.is_initialized());
    assert_close(engine.base_zoom(), 0.5);
    assert_close(engine.zoom(), 1.0);
    assert_close(engine.real_zoom(), 0.5);

    // 500x250 footprint, horizontally flush, vertically centered.
    assert_eq!(engine.scroll_range(), Size::new(500.0, 250.0));
    assert_close(engine.scaled_pan().x(), 0.0);
    assert_close(engine.scaled_pan().y(), 125.0);

    let coeffs = engine.transform().as_coeffs();
    assert_close(coeffs[0], 0.5);
    assert_close(coeffs[3], 0.5);
}

#[test]
fn center_crop_covers_the_viewport() {
    let mut engine = Engine::new();
    engine.set_transformation(Transformation::CenterCrop, Gravity::CENTER);
    engine.set_content_size(Size::new(1000.0, 500.0));
    engine.set_viewport_size(Size::new(500.0, 500.0));

    assert_close(engine.base_zoom(), 1.0);
    // The horizontal overflow is centered, the fitting axis is flush.
    assert_close(engine.scaled_pan().x(), -250.0);
    assert_close(engine.scaled_pan().y(), 0.0);
}

#[test]
fn gravity_picks_the_visible_part_of_the_overflow() {
    let mut engine = Engine::new();
    engine.set_transformation(
        Transformation::None,
        Gravity::new(Align::Start, Align::End),
    );
    engine.set_content_size(Size::new(1000.0, 1000.0));
    engine.set_viewport_size(Size::new(500.0, 500.0));

    assert_close(engine.scaled_pan().x(), 0.0);
    assert_close(engine.scaled_pan().y(), -500.0);
}

#[test]
fn zoom_requests_are_clamped_not_rejected() {
    let mut engine = engine(Size::new(1000.0, 500.0), Size::new(500.0, 500.0));

    engine.zoom_to(5.0, false);
    assert_close(engine.zoom(), 2.5);

    engine.zoom_to(0.1, false);
    assert_close(engine.zoom(), 0.8);
}

#[test]
fn negative_zoom_bounds_error_without_touching_state() {
    let mut engine = engine(Size::new(1000.0, 500.0), Size::new(500.0, 500.0));
    engine.zoom_to(1.5, false);

    assert!(engine.set_min_zoom(-0.1, ZoomKind::Logical).is_err());
    assert!(engine.set_max_zoom(-1.0, ZoomKind::Real).is_err());
    assert_close(engine.zoom(), 1.5);
    assert_eq!(engine.state(), State::Idle);
}

#[test]
fn tightened_bound_animates_to_the_nearest_legal_value() {
    let mut engine = engine(Size::new(1000.0, 500.0), Size::new(500.0, 500.0));
    assert_close(engine.zoom(), 1.0);

    engine.set_min_zoom(1.5, ZoomKind::Logical).unwrap();
    assert_eq!(engine.state(), State::Animating);
    settle(&mut engine, 0);
    assert_close(engine.zoom(), 1.5);
    assert_eq!(engine.state(), State::Idle);
}

#[test]
fn real_mode_bounds_resolve_through_the_base_zoom() {
    let mut engine = engine(Size::new(1000.0, 500.0), Size::new(500.0, 500.0));
    // Base zoom is 0.5, so a real bound of 1.0 is a logical bound of 2.0.
    engine.set_max_zoom(1.0, ZoomKind::Real).unwrap();

    engine.zoom_to(5.0, false);
    assert_close(engine.zoom(), 2.0);
    assert_close(engine.real_zoom(), 1.0);
}

#[test]
fn zoom_to_is_idempotent() {
    let mut engine = engine(Size::new(1000.0, 500.0), Size::new(500.0, 500.0));

    engine.zoom_to(1.7, false);
    let first = engine.transform();
    engine.zoom_to(1.7, false);
    assert_eq!(engine.transform(), first);
}

#[test]
fn pan_round_trips_inside_the_legal_range() {
    let mut engine = engine(Size::new(1000.0, 1000.0), Size::new(500.0, 500.0));
    engine.zoom_to(2.0, false);

    engine.pan_to(AbsolutePoint::new(-100.0, -200.0), false);
    assert_close(engine.pan_x(), -100.0);
    assert_close(engine.pan_y(), -200.0);
}

#[test]
fn pan_outside_the_range_is_clamped() {
    let mut engine = engine(Size::new(1000.0, 1000.0), Size::new(500.0, 500.0));
    engine.zoom_to(2.0, false);

    engine.pan_to(AbsolutePoint::new(50.0, -2000.0), false);
    assert_close(engine.pan_x(), 0.0);
    assert_close(engine.pan_y(), -500.0);
}

#[test]
fn smaller_content_stays_centered_whatever_the_pan_history() {
    let mut engine = Engine::new();
    engine.set_transformation(Transformation::None, Gravity::CENTER);
    engine.set_content_size(Size::new(400.0, 400.0));
    engine.set_viewport_size(Size::new(500.0, 500.0));
    assert_close(engine.scaled_pan().x(), 50.0);
    assert_close(engine.scaled_pan().y(), 50.0);

    engine.pan_to(AbsolutePoint::new(30.0, -100.0), false);
    assert_close(engine.scaled_pan().x(), 50.0);
    assert_close(engine.scaled_pan().y(), 50.0);
}

#[test]
fn resize_preserves_real_zoom() {
    let mut engine = engine(Size::new(1000.0, 500.0), Size::new(500.0, 500.0));
    engine.set_max_zoom(10.0, ZoomKind::Logical).unwrap();
    engine.zoom_to(2.0, false);
    assert_close(engine.real_zoom(), 1.0);

    engine.set_viewport_size(Size::new(250.0, 500.0));
    assert_close(engine.base_zoom(), 0.25);
    assert_close(engine.zoom(), 4.0);
    assert_close(engine.real_zoom(), 1.0);
}

#[test]
fn resize_reclamps_only_when_bounds_are_violated() {
    let mut engine = engine(Size::new(1000.0, 500.0), Size::new(500.0, 500.0));
    engine.zoom_to(2.0, false);

    // The preserved real zoom of 1.0 maps to logical 4.0 under the new
    // baseline, which violates the default max of 2.5.
    engine.set_viewport_size(Size::new(250.0, 500.0));
    assert_close(engine.zoom(), 2.5);
    assert_close(engine.real_zoom(), 0.625);
}

#[test]
fn gestures_cannot_interrupt_animations() {
    let mut engine = engine(Size::new(1000.0, 500.0), Size::new(500.0, 500.0));
    engine.zoom_to(2.0, true);
    assert_eq!(engine.state(), State::Animating);

    assert!(!engine.set_state(State::Dragging));
    assert!(!engine.set_state(State::Pinching));
    assert!(!engine.start_fling(Vec2::new(500.0, 0.0)));
    assert_eq!(engine.state(), State::Animating);

    settle(&mut engine, 0);
    assert_eq!(engine.state(), State::Idle);
}

#[test]
fn animation_converges_and_notifies_idle_once() {
    let mut engine = engine(Size::new(1000.0, 500.0), Size::new(500.0, 500.0));
    let recorder = Rc::new(Recorder::default());
    engine.add_observer(Box::new(SharedRecorder(recorder.clone())));

    engine.zoom_to(2.0, true);
    settle(&mut engine, 1000);

    assert_close(engine.zoom(), 2.0);
    assert_eq!(engine.state(), State::Idle);
    assert_eq!(recorder.idles.get(), 1);
    assert!(recorder.updates.get() > 1);

    let last = recorder.last.borrow().unwrap();
    assert_close(last.zoom, 2.0);
    assert_close(last.real_zoom, 1.0);
    let coeffs = last.transform.as_coeffs();
    assert_close(coeffs[0], coeffs[3]);
    assert_close(coeffs[1], 0.0);
    assert_close(coeffs[2], 0.0);
}

#[test]
fn forcing_a_transition_cancels_the_animation_on_its_next_tick() {
    let mut engine = engine(Size::new(1000.0, 500.0), Size::new(500.0, 500.0));
    engine.zoom_to(2.0, true);
    engine.tick(0);
    engine.tick(100);
    let mid = engine.zoom();
    assert!(mid > 1.0 && mid < 2.0);

    assert!(engine.set_state(State::Idle));
    engine.tick(200);
    assert_close(engine.zoom(), mid);
    assert!(!engine.needs_frame());
}

#[test]
fn fling_without_range_or_slack_is_refused() {
    let mut engine = engine(Size::new(500.0, 500.0), Size::new(500.0, 500.0));
    engine.set_over_scroll_horizontal(false);
    engine.set_over_scroll_vertical(false);

    assert!(!engine.start_fling(Vec2::new(1000.0, 500.0)));
    assert_eq!(engine.state(), State::Idle);
    assert!(!engine.needs_frame());
}

#[test]
fn fling_decelerates_and_returns_to_idle() {
    let mut engine = engine(Size::new(1000.0, 1000.0), Size::new(500.0, 500.0));
    engine.zoom_to(2.0, false);
    assert_close(engine.scaled_pan().x(), -250.0);

    assert!(engine.start_fling(Vec2::new(450.0, 0.0)));
    assert_eq!(engine.state(), State::Flinging);
    engine.tick(0);
    engine.tick(200);

    // 450 px/s decelerating at 4500 px/s^2 travels 22.5 px.
    assert_close(engine.scaled_pan().x(), -227.5);
    assert_eq!(engine.state(), State::Idle);
    assert!(!engine.needs_frame());
}

#[test]
fn fling_overshoot_ends_in_slack_and_snaps_back() {
    let mut engine = engine(Size::new(1000.0, 1000.0), Size::new(500.0, 500.0));
    engine.zoom_to(2.0, false);
    engine.pan_to(AbsolutePoint::ZERO, false);
    assert_close(engine.scaled_pan().x(), 0.0);

    assert!(engine.start_fling(Vec2::new(20_000.0, 0.0)));
    engine.tick(0);
    engine.tick(4500);

    // The ballistic end is clamped to the slack edge: floor(500/20 * 2) = 50.
    assert_close(engine.scaled_pan().x(), 50.0);
    // The snap-back correction is already animating.
    assert_eq!(engine.state(), State::Animating);

    settle(&mut engine, 4516);
    assert_close(engine.scaled_pan().x(), 0.0);
    assert_eq!(engine.state(), State::Idle);
}

#[test]
fn move_to_sets_zoom_and_pan_together() {
    let mut engine = engine(Size::new(1000.0, 1000.0), Size::new(500.0, 500.0));

    engine.move_to(2.0, AbsolutePoint::new(-100.0, -150.0), false);
    assert_close(engine.zoom(), 2.0);
    assert_close(engine.pan_x(), -100.0);
    assert_close(engine.pan_y(), -150.0);
}

#[test]
fn plain_zoom_pivots_on_the_viewport_center() {
    let mut engine = engine(Size::new(1000.0, 1000.0), Size::new(500.0, 500.0));
    engine.zoom_to(2.0, false);

    let center = Point::new(250.0, 250.0);
    let before = engine.view_point_to_content(center);
    engine.zoom_to(1.5, false);
    let after = engine.view_point_to_content(center);

    assert_close(before.x(), after.x());
    assert_close(before.y(), after.y());
}

#[test]
fn view_and_content_coordinates_round_trip() {
    let mut engine = Engine::new();
    engine.set_transformation(Transformation::None, Gravity::CENTER);
    engine.set_content_size(Size::new(3000.0, 3000.0));
    engine.set_viewport_size(Size::new(1000.0, 1000.0));

    let content = engine.view_point_to_content(Point::new(500.0, 500.0));
    assert_close(content.x(), 1500.0);
    assert_close(content.y(), 1500.0);

    let view = engine.content_point_to_view(content);
    assert_close(view.x, 500.0);
    assert_close(view.y, 500.0);
}

#[test]
fn transform_scale_stays_uniform_through_mixed_operations() {
    let mut engine = engine(Size::new(1000.0, 500.0), Size::new(500.0, 500.0));
    engine.zoom_to(1.9, false);
    engine.pan_by(AbsolutePoint::new(-40.0, -10.0), false);
    engine.apply_pinch(2.2, AbsolutePoint::new(300.0, 200.0), true);
    engine.apply_scaled_pan(ScaledPoint::new(12.0, -7.0), true);

    let coeffs = engine.transform().as_coeffs();
    assert_close(coeffs[0], coeffs[3]);
    assert_close(coeffs[1], 0.0);
    assert_close(coeffs[2], 0.0);
    assert_close(coeffs[0], engine.real_zoom());
}

#[test]
fn clear_resets_to_uninitialized() {
    let mut engine = engine(Size::new(1000.0, 500.0), Size::new(500.0, 500.0));
    engine.zoom_to(2.0, false);

    engine.clear();
    assert!(!engine.is_initialized());
    assert_close(engine.zoom(), 1.0);
    engine.zoom_to(3.0, false);
    assert_close(engine.zoom(), 1.0);

    // Feeding sizes again re-initializes from scratch.
    engine.set_content_size(Size::new(1000.0, 500.0));
    engine.set_viewport_size(Size::new(500.0, 500.0));
    assert!(engine.is_initialized());
    assert_close(engine.base_zoom(), 0.5);
    assert_close(engine.real_zoom(), 0.5);
}

#[test]
fn scrollbar_helpers_reflect_the_footprint() {
    let mut engine = engine(Size::new(1000.0, 1000.0), Size::new(500.0, 500.0));
    engine.zoom_to(2.0, false);

    assert_eq!(engine.scroll_range(), Size::new(1000.0, 1000.0));
    assert_close(engine.scroll_offset().x, 250.0);
    assert_close(engine.scroll_offset().y, 250.0);
}

#[test]
fn custom_animation_duration_is_honored() {
    let mut engine = engine(Size::new(1000.0, 500.0), Size::new(500.0, 500.0));
    engine.set_animation_duration(100);

    engine.zoom_to(2.0, true);
    engine.tick(0);
    assert!(engine.needs_frame());
    engine.tick(100);
    assert_close(engine.zoom(), 2.0);
    assert_eq!(engine.state(), State::Idle);
}
