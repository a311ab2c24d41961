// Copyright 2026 the Panzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legal ranges for zoom and pan, with optional elastic slack.
//!
//! Both resolvers never reject a value: they compute what a proposed value
//! should become (zoom) or how far the current value is outside the legal
//! range (pan). Gesture input is inherently "invalid" near the edges, so
//! correction is silent; only malformed constraint configuration is an
//! error.
//!
//! The pan resolver returns *correction deltas* rather than clamped absolute
//! values, so callers apply them as translations to whatever transform
//! produced the violation.

use core::fmt;

use kurbo::Size;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `floor`

use crate::geometry::Geometry;
use crate::modes::ZoomKind;

/// One of the two pan axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

/// Error returned when a zoom constraint is configured with a negative value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidZoomBound {
    /// The rejected value.
    pub value: f64,
}

impl fmt::Display for InvalidZoomBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zoom bounds must be >= 0, got {}", self.value)
    }
}

impl core::error::Error for InvalidZoomBound {}

/// Zoom constraints and the zoom-related policy flags.
///
/// Constraints can be expressed on either zoom axis (see [`ZoomKind`]); they
/// are resolved into logical-zoom units on every check, so they stay valid
/// when the base zoom is recomputed after a viewport resize.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomBounds {
    /// Whether pinch zooming is enabled at all.
    pub zoom_enabled: bool,
    /// Whether pinch gestures may temporarily exceed the zoom bounds.
    pub over_pinch_enabled: bool,
    min: f64,
    min_kind: ZoomKind,
    max: f64,
    max_kind: ZoomKind,
}

/// The fraction of the zoom range granted as over-pinch slack.
const OVER_PINCH_FACTOR: f64 = 0.1;

impl Default for ZoomBounds {
    fn default() -> Self {
        Self {
            zoom_enabled: true,
            over_pinch_enabled: true,
            min: 0.8,
            min_kind: ZoomKind::Logical,
            max: 2.5,
            max_kind: ZoomKind::Logical,
        }
    }
}

impl ZoomBounds {
    /// Sets the minimum zoom and the axis it is measured against.
    pub fn set_min(&mut self, value: f64, kind: ZoomKind) -> Result<(), InvalidZoomBound> {
        if value < 0.0 {
            return Err(InvalidZoomBound { value });
        }
        self.min = value;
        self.min_kind = kind;
        Ok(())
    }

    /// Sets the maximum zoom and the axis it is measured against.
    pub fn set_max(&mut self, value: f64, kind: ZoomKind) -> Result<(), InvalidZoomBound> {
        if value < 0.0 {
            return Err(InvalidZoomBound { value });
        }
        self.max = value;
        self.max_kind = kind;
        Ok(())
    }

    /// The minimum bound in logical-zoom units.
    #[must_use]
    pub fn resolved_min(&self, base_zoom: f64) -> f64 {
        match self.min_kind {
            ZoomKind::Logical => self.min,
            ZoomKind::Real => self.min / base_zoom,
        }
    }

    /// The maximum bound in logical-zoom units.
    #[must_use]
    pub fn resolved_max(&self, base_zoom: f64) -> f64 {
        match self.max_kind {
            ZoomKind::Logical => self.max,
            ZoomKind::Real => self.max / base_zoom,
        }
    }

    /// The slack granted beyond each bound while over-pinching.
    ///
    /// Proportional to the configured zoom range, not a fixed amount.
    #[must_use]
    pub fn max_over_pinch(&self, base_zoom: f64) -> f64 {
        OVER_PINCH_FACTOR * (self.resolved_max(base_zoom) - self.resolved_min(base_zoom))
    }

    /// Clamps a proposed logical zoom into the legal range.
    ///
    /// When `allow_over_pinch` is set and over-pinching is enabled, the range
    /// is widened by [`ZoomBounds::max_over_pinch`] first.
    #[must_use]
    pub fn clamp(&self, value: f64, base_zoom: f64, allow_over_pinch: bool) -> f64 {
        let mut min = self.resolved_min(base_zoom);
        let mut max = self.resolved_max(base_zoom);
        if allow_over_pinch && self.over_pinch_enabled {
            let slack = self.max_over_pinch(base_zoom);
            min -= slack;
            max += slack;
        }
        value.clamp(min, max)
    }
}

/// Pan policy flags and the per-axis pan correction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanBounds {
    /// Whether one-finger drags may pan horizontally.
    pub horizontal_pan_enabled: bool,
    /// Whether one-finger drags may pan vertically.
    pub vertical_pan_enabled: bool,
    /// Whether drags and flings may temporarily exceed the horizontal range.
    pub over_scroll_horizontal: bool,
    /// Whether drags and flings may temporarily exceed the vertical range.
    pub over_scroll_vertical: bool,
}

impl Default for PanBounds {
    fn default() -> Self {
        Self {
            horizontal_pan_enabled: true,
            vertical_pan_enabled: true,
            over_scroll_horizontal: true,
            over_scroll_vertical: true,
        }
    }
}

impl PanBounds {
    /// The over-scroll slack, in view pixels.
    ///
    /// Scales with the current logical zoom and the viewport size, and is
    /// floored to a whole pixel so repeated checks are deterministic.
    #[must_use]
    pub fn max_over_scroll(viewport: Size, zoom: f64) -> f64 {
        let over_x = viewport.width / 20.0 * zoom;
        let over_y = viewport.height / 20.0 * zoom;
        over_x.min(over_y).floor()
    }

    /// The correction to apply to the current scaled pan on `axis` to bring
    /// it back into the legal range, or `0.0` if it is legal already.
    ///
    /// When the content footprint fits the viewport on this axis the only
    /// legal value is the centering offset; otherwise the content may hide
    /// at most itself, never show empty space beyond its own edge. With
    /// `allow_over_scroll` set and the axis over-scrollable, both ends are
    /// widened by [`PanBounds::max_over_scroll`].
    #[must_use]
    pub fn correction(
        &self,
        axis: Axis,
        geometry: &Geometry,
        zoom: f64,
        allow_over_scroll: bool,
    ) -> f64 {
        let (value, viewport, content, over_scrollable) = match axis {
            Axis::Horizontal => (
                geometry.scaled_pan().x(),
                geometry.viewport().width,
                geometry.scaled_size().width,
                self.over_scroll_horizontal,
            ),
            Axis::Vertical => (
                geometry.scaled_pan().y(),
                geometry.viewport().height,
                geometry.scaled_size().height,
                self.over_scroll_vertical,
            ),
        };
        let slack = if over_scrollable && allow_over_scroll {
            Self::max_over_scroll(geometry.viewport(), zoom)
        } else {
            0.0
        };

        let (mut min, mut max) = if content <= viewport {
            // Content fits: stay centered, showing background on both sides.
            let center = (viewport - content) / 2.0;
            (center, center)
        } else {
            // Content overflows: a negative translation that hides content.
            (viewport - content, 0.0)
        };
        min -= slack;
        max += slack;
        value.clamp(min, max) - value
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, Size, Vec2};

    use super::{Axis, PanBounds, ZoomBounds};
    use crate::geometry::Geometry;
    use crate::modes::ZoomKind;

    #[test]
    fn negative_bounds_are_rejected() {
        let mut bounds = ZoomBounds::default();
        assert!(bounds.set_min(-0.1, ZoomKind::Logical).is_err());
        assert!(bounds.set_max(-2.0, ZoomKind::Real).is_err());
        // The stored configuration is untouched.
        assert_eq!(bounds, ZoomBounds::default());
    }

    #[test]
    fn real_bounds_resolve_through_base_zoom() {
        let mut bounds = ZoomBounds::default();
        bounds.set_min(1.0, ZoomKind::Real).unwrap();
        bounds.set_max(4.0, ZoomKind::Real).unwrap();
        assert!((bounds.resolved_min(2.0) - 0.5).abs() < 1e-12);
        assert!((bounds.resolved_max(2.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn clamp_respects_over_pinch_slack() {
        let mut bounds = ZoomBounds::default();
        bounds.set_min(1.0, ZoomKind::Logical).unwrap();
        bounds.set_max(3.0, ZoomKind::Logical).unwrap();

        assert_eq!(bounds.clamp(5.0, 1.0, false), 3.0);
        // Slack is 0.1 * (3 - 1) = 0.2 on each side.
        assert!((bounds.clamp(5.0, 1.0, true) - 3.2).abs() < 1e-12);
        assert!((bounds.clamp(0.0, 1.0, true) - 0.8).abs() < 1e-12);

        bounds.over_pinch_enabled = false;
        assert_eq!(bounds.clamp(5.0, 1.0, true), 3.0);
    }

    fn geometry(content: Size, viewport: Size, pan: Vec2) -> Geometry {
        let mut g = Geometry::new();
        g.set_content(content);
        g.set_viewport(viewport);
        g.set_transform(Affine::translate(pan));
        g
    }

    #[test]
    fn small_content_is_pinned_to_center() {
        let g = geometry(
            Size::new(200.0, 200.0),
            Size::new(500.0, 400.0),
            Vec2::new(30.0, -10.0),
        );
        let bounds = PanBounds::default();
        let fix_x = bounds.correction(Axis::Horizontal, &g, 1.0, false);
        let fix_y = bounds.correction(Axis::Vertical, &g, 1.0, false);
        // Centering offsets are (500-200)/2 and (400-200)/2.
        assert!((30.0 + fix_x - 150.0).abs() < 1e-12);
        assert!((-10.0 + fix_y - 100.0).abs() < 1e-12);
    }

    #[test]
    fn large_content_never_shows_its_far_edge() {
        let g = geometry(
            Size::new(1000.0, 1000.0),
            Size::new(500.0, 500.0),
            Vec2::new(100.0, -800.0),
        );
        let bounds = PanBounds::default();
        // Pan of +100 shows empty space on the left; correction pulls to 0.
        assert!((bounds.correction(Axis::Horizontal, &g, 1.0, false) + 100.0).abs() < 1e-12);
        // Pan of -800 goes past the bottom edge; the range floor is -500.
        assert!((bounds.correction(Axis::Vertical, &g, 1.0, false) - 300.0).abs() < 1e-12);
    }

    #[test]
    fn over_scroll_widens_the_range() {
        let g = geometry(
            Size::new(1000.0, 1000.0),
            Size::new(500.0, 500.0),
            Vec2::new(20.0, 0.0),
        );
        let bounds = PanBounds::default();
        // Slack is floor(500/20 * 1.0) = 25 on each end.
        assert_eq!(PanBounds::max_over_scroll(g.viewport(), 1.0), 25.0);
        assert_eq!(bounds.correction(Axis::Horizontal, &g, 1.0, true), 0.0);

        // Beyond the slack the correction only trims back to the slack edge.
        let g = geometry(
            Size::new(1000.0, 1000.0),
            Size::new(500.0, 500.0),
            Vec2::new(60.0, 0.0),
        );
        assert!((bounds.correction(Axis::Horizontal, &g, 1.0, true) + 35.0).abs() < 1e-12);
    }

    #[test]
    fn disabled_axis_gets_no_slack() {
        let g = geometry(
            Size::new(1000.0, 1000.0),
            Size::new(500.0, 500.0),
            Vec2::new(20.0, 0.0),
        );
        let bounds = PanBounds {
            over_scroll_horizontal: false,
            ..Default::default()
        };
        assert!((bounds.correction(Axis::Horizontal, &g, 1.0, true) + 20.0).abs() < 1e-12);
    }

    #[test]
    fn slack_scales_with_zoom() {
        let viewport = Size::new(500.0, 400.0);
        assert_eq!(PanBounds::max_over_scroll(viewport, 1.0), 20.0);
        assert_eq!(PanBounds::max_over_scroll(viewport, 2.0), 40.0);
        // Floored to a whole pixel.
        assert_eq!(PanBounds::max_over_scroll(viewport, 1.3), 26.0);
    }
}
