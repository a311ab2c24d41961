// Copyright 2026 the Panzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How the base zoom is computed when content and viewport sizes are known.
///
/// The selected policy determines the scale that is applied once at
/// initialization, before any user interaction; the engine's logical zoom is
/// `1.0` at exactly that scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Transformation {
    /// Scale the content so it fits entirely inside the viewport.
    ///
    /// The base zoom is the smaller of the two viewport/content ratios.
    #[default]
    CenterInside,
    /// Scale the content so it entirely covers the viewport.
    ///
    /// The base zoom is the larger of the two viewport/content ratios; one
    /// axis will typically overflow and be croppable by panning.
    CenterCrop,
    /// Apply no base scale; the content is laid out at its natural size.
    None,
}

/// Alignment of content along one axis of the viewport.
///
/// Consulted at first initialization for axes where the transformed content
/// overflows the viewport, to pick which part of the excess is initially
/// hidden. Axes where the content fits are centered by the pan constraints
/// instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Align {
    /// Align the content start (left/top) with the viewport start.
    Start,
    /// Center the excess space.
    #[default]
    Center,
    /// Align the content end (right/bottom) with the viewport end.
    End,
}

/// Per-axis alignment applied at first initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Gravity {
    /// Horizontal alignment.
    pub horizontal: Align,
    /// Vertical alignment.
    pub vertical: Align,
}

impl Gravity {
    /// Center on both axes.
    pub const CENTER: Self = Self {
        horizontal: Align::Center,
        vertical: Align::Center,
    };

    /// Creates a gravity from per-axis alignments.
    #[must_use]
    pub const fn new(horizontal: Align, vertical: Align) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Which axis a zoom constraint is measured against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ZoomKind {
    /// The constraint is a logical zoom value (relative to the base zoom,
    /// `1.0` meaning "as initially laid out").
    #[default]
    Logical,
    /// The constraint is a real zoom value (the actual scale factor in the
    /// output transform).
    Real,
}
