// Copyright 2026 the Panzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed offsets for the two coordinate spaces the engine works in.
//!
//! Pan values exist in two flavors that differ only by a factor of the
//! current real zoom, and mixing them up is the classic source of subtle
//! positioning bugs. Wrapping both in distinct newtypes makes the conversion
//! explicit at every crossing point:
//!
//! - [`AbsolutePoint`]: content coordinates. `(0, 0)` is the content
//!   top-left, and values do not change when the content is zoomed.
//! - [`ScaledPoint`]: view coordinates. The same offset multiplied by the
//!   current real zoom, i.e. what you would measure on screen in pixels.

use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use kurbo::Vec2;

/// A point (or offset) on the content surface, independent of zoom.
///
/// It is *absolute* because it is defined with respect to the content's own
/// size and coordinate system: `(0, 0)` is the content top-left corner
/// regardless of how the content is currently scaled or panned.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AbsolutePoint(Vec2);

impl AbsolutePoint {
    /// An all-zero point.
    pub const ZERO: Self = Self(Vec2::ZERO);

    /// Creates a new point from content-space coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self(Vec2::new(x, y))
    }

    /// The horizontal component.
    #[must_use]
    pub const fn x(self) -> f64 {
        self.0.x
    }

    /// The vertical component.
    #[must_use]
    pub const fn y(self) -> f64 {
        self.0.y
    }

    /// Returns the underlying vector.
    #[must_use]
    pub const fn to_vec2(self) -> Vec2 {
        self.0
    }

    /// Converts into the view-space equivalent under the given real zoom.
    #[must_use]
    pub fn to_scaled(self, real_zoom: f64) -> ScaledPoint {
        ScaledPoint(self.0 * real_zoom)
    }
}

impl From<Vec2> for AbsolutePoint {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl Add for AbsolutePoint {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for AbsolutePoint {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for AbsolutePoint {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for AbsolutePoint {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for AbsolutePoint {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<f64> for AbsolutePoint {
    type Output = Self;
    fn mul(self, factor: f64) -> Self {
        Self(self.0 * factor)
    }
}

/// A point (or offset) on the content surface, in view pixels.
///
/// Unlike [`AbsolutePoint`] it is affected by the current zoom level: if the
/// content is zoomed in, the exact same content point has bigger
/// `ScaledPoint` coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScaledPoint(Vec2);

impl ScaledPoint {
    /// An all-zero point.
    pub const ZERO: Self = Self(Vec2::ZERO);

    /// Creates a new point from view-space coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self(Vec2::new(x, y))
    }

    /// The horizontal component.
    #[must_use]
    pub const fn x(self) -> f64 {
        self.0.x
    }

    /// The vertical component.
    #[must_use]
    pub const fn y(self) -> f64 {
        self.0.y
    }

    /// Returns the underlying vector.
    #[must_use]
    pub const fn to_vec2(self) -> Vec2 {
        self.0
    }

    /// Converts into the content-space equivalent under the given real zoom.
    #[must_use]
    pub fn to_absolute(self, real_zoom: f64) -> AbsolutePoint {
        AbsolutePoint(self.0 / real_zoom)
    }
}

impl From<Vec2> for ScaledPoint {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl Add for ScaledPoint {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for ScaledPoint {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for ScaledPoint {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for ScaledPoint {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for ScaledPoint {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<f64> for ScaledPoint {
    type Output = Self;
    fn mul(self, factor: f64) -> Self {
        Self(self.0 * factor)
    }
}
