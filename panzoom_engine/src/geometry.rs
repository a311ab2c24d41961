// Copyright 2026 the Panzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content rectangle, viewport size and the affine transform between them.
//!
//! [`Geometry`] is a pure value type: it holds the pieces and keeps the
//! transformed footprint in sync, but has no policy, no state machine and no
//! observers. All mutation goes through the three transform operations,
//! which compose in a fixed order:
//!
//! - [`Geometry::pre_translate`] composes *before* the current transform and
//!   therefore works in content coordinates;
//! - [`Geometry::post_translate`] composes *after* it and works in view
//!   pixels;
//! - [`Geometry::post_scale`] scales in view space about a pivot.

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::point::ScaledPoint;

/// The geometric state shared by all engine operations.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    content: Rect,
    viewport: Size,
    transform: Affine,
    transformed: Rect,
}

impl Geometry {
    /// Creates an empty geometry with an identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self {
            content: Rect::ZERO,
            viewport: Size::ZERO,
            transform: Affine::IDENTITY,
            transformed: Rect::ZERO,
        }
    }

    /// Sets the content size. The content rect always has its origin at zero.
    pub fn set_content(&mut self, size: Size) {
        self.content = size.to_rect();
        self.sync();
    }

    /// Sets the viewport size.
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
    }

    /// Replaces the transform wholesale.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
        self.sync();
    }

    /// Translates in content coordinates (composes before the transform).
    pub fn pre_translate(&mut self, delta: Vec2) {
        self.transform = self.transform.pre_translate(delta);
        self.sync();
    }

    /// Translates in view pixels (composes after the transform).
    pub fn post_translate(&mut self, delta: Vec2) {
        self.transform = self.transform.then_translate(delta);
        self.sync();
    }

    /// Scales in view space by `factor` about `pivot`.
    pub fn post_scale(&mut self, factor: f64, pivot: Point) {
        let pivot = pivot.to_vec2();
        self.transform = Affine::translate(pivot)
            * Affine::scale(factor)
            * Affine::translate(-pivot)
            * self.transform;
        self.sync();
    }

    /// The content size as originally provided.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content.size()
    }

    /// The viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// The current transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// The on-screen footprint of the content under the current transform.
    #[must_use]
    pub fn transformed(&self) -> Rect {
        self.transformed
    }

    /// The transformed footprint size, in view pixels.
    #[must_use]
    pub fn scaled_size(&self) -> Size {
        self.transformed.size()
    }

    /// The transformed footprint origin, which is the scaled pan.
    #[must_use]
    pub fn scaled_pan(&self) -> ScaledPoint {
        self.transformed.origin().to_vec2().into()
    }

    // Maps the content rect through the transform. Must run after every
    // transform or content edit; the mutating methods above all do.
    fn sync(&mut self) {
        self.transformed = self.transform.transform_rect_bbox(self.content);
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, Point, Size, Vec2};

    use super::Geometry;

    fn geometry(content: Size) -> Geometry {
        let mut g = Geometry::new();
        g.set_content(content);
        g.set_viewport(Size::new(500.0, 500.0));
        g
    }

    #[test]
    fn transformed_follows_scale() {
        let mut g = geometry(Size::new(1000.0, 500.0));
        g.set_transform(Affine::scale(0.5));
        assert_eq!(g.scaled_size(), Size::new(500.0, 250.0));
        assert_eq!(g.scaled_pan().to_vec2(), Vec2::ZERO);
    }

    #[test]
    fn pre_translate_moves_in_content_units() {
        let mut g = geometry(Size::new(100.0, 100.0));
        g.set_transform(Affine::scale(2.0));
        g.pre_translate(Vec2::new(10.0, 0.0));
        // 10 content units under 2x zoom are 20 view pixels.
        assert!((g.scaled_pan().x() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn post_translate_moves_in_view_pixels() {
        let mut g = geometry(Size::new(100.0, 100.0));
        g.set_transform(Affine::scale(2.0));
        g.post_translate(Vec2::new(10.0, -5.0));
        assert!((g.scaled_pan().x() - 10.0).abs() < 1e-12);
        assert!((g.scaled_pan().y() + 5.0).abs() < 1e-12);
    }

    #[test]
    fn post_scale_about_pivot_keeps_pivot_fixed() {
        let mut g = geometry(Size::new(100.0, 100.0));
        g.post_translate(Vec2::new(-25.0, -25.0));
        let pivot = Point::new(30.0, 40.0);
        let before = g.transform().inverse() * pivot;

        g.post_scale(2.0, pivot);
        let after = g.transform().inverse() * pivot;

        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn post_scale_with_unit_factor_is_identity() {
        let mut g = geometry(Size::new(100.0, 100.0));
        g.post_translate(Vec2::new(7.0, 3.0));
        let before = g.transform();
        g.post_scale(1.0, Point::new(50.0, 50.0));
        assert_eq!(g.transform(), before);
    }
}
