// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sedge Transform: plot-space ⇄ screen-space coordinate transforms.
//!
//! This crate provides the stateless affine mapping at the heart of a Sedge
//! plotting surface. A [`CoordinateTransform`] is built from a plot rectangle,
//! a screen rectangle, and an optional locked aspect ratio, and exposes pure
//! mapping functions in both directions.
//!
//! ## Coordinate frames
//!
//! Two frames are used throughout Sedge, and mixing them up is the most
//! common integration bug:
//!
//! - **Plot space**: y grows upward. For a [`kurbo::Rect`] in plot space the
//!   minimum y edge is the *bottom* of the content.
//! - **Screen space**: y grows downward, origin at the top-left. For a
//!   [`kurbo::Rect`] in screen space the minimum y edge is the *top*.
//!
//! Every method on [`CoordinateTransform`] documents which frame its inputs
//! and outputs are in.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use sedge_transform::CoordinateTransform;
//!
//! // Show plot coordinates 0..20 x 0..10 in a 200x100 screen area.
//! let plot = Rect::new(0.0, 0.0, 20.0, 10.0);
//! let screen = Rect::new(0.0, 0.0, 200.0, 100.0);
//! let t = CoordinateTransform::new(plot, screen, None);
//!
//! assert_eq!(t.plot_to_screen_x(0.0), 0.0);
//! // Plot y = 0 is the bottom of the content, i.e. the screen bottom edge.
//! assert_eq!(t.plot_to_screen_y(0.0), 100.0);
//! ```
//!
//! ## Rebuild, don't mutate
//!
//! A transform is always rebuilt from scratch when the plot rect, screen
//! rect, or aspect ratio changes. There are no incremental update methods;
//! accumulating deltas into an existing transform drifts. Dependent plots
//! read a [`Clone`]d snapshot rather than a live reference, so a dependent
//! can never observe a half-updated transform mid-layout.
//!
//! This crate is `no_std`.

#![no_std]

use kurbo::{Point, Rect, Size};

/// Affine mapping between plot space (y-up) and screen space (y-down).
///
/// The mapping is defined by independent x/y scale factors and offsets:
///
/// ```text
/// screen_x = offset_x + scale_x * plot_x
/// screen_y = offset_y - scale_y * plot_y
/// ```
///
/// When an aspect ratio `a` is supplied, the scales satisfy
/// `scale_x = a * scale_y`; one axis's scale is reduced so the visible plot
/// rect may come out **larger** than requested along that axis (letterboxing),
/// never smaller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateTransform {
    screen_rect: Rect,
    aspect_ratio: Option<f64>,
    scale_x: f64,
    scale_y: f64,
    offset_x: f64,
    offset_y: f64,
}

impl CoordinateTransform {
    /// Creates a transform that shows `plot_rect` (plot space) inside
    /// `screen_rect` (screen space).
    ///
    /// Zero, negative, or NaN plot spans are floored at a tiny fraction of
    /// the screen extent, which keeps the scales and offsets finite; callers
    /// are expected to have run degenerate bounds through the aggregation
    /// fallbacks first.
    ///
    /// `aspect_ratio`, if finite and positive, locks `scale_x / scale_y` to
    /// that value. The plot rect stays centered; the slack axis shows more
    /// plot space than requested.
    #[must_use]
    pub fn new(plot_rect: Rect, screen_rect: Rect, aspect_ratio: Option<f64>) -> Self {
        let plot_w = usable_span(plot_rect.width(), screen_rect.width());
        let plot_h = usable_span(plot_rect.height(), screen_rect.height());
        let mut scale_x = screen_rect.width() / plot_w;
        let mut scale_y = screen_rect.height() / plot_h;

        let aspect_ratio = aspect_ratio.filter(|a| a.is_finite() && *a > 0.0);
        if let Some(a) = aspect_ratio {
            if a * scale_y < scale_x {
                scale_x = a * scale_y;
            } else {
                scale_y = scale_x / a;
            }
        }

        let screen_center = screen_rect.center();
        let plot_center = plot_rect.center();
        Self {
            screen_rect,
            aspect_ratio,
            scale_x,
            scale_y,
            offset_x: screen_center.x - scale_x * plot_center.x,
            offset_y: screen_center.y + scale_y * plot_center.y,
        }
    }

    /// The screen rectangle this transform was built for (screen space).
    #[must_use]
    pub fn screen_rect(&self) -> Rect {
        self.screen_rect
    }

    /// The locked aspect ratio, if one was supplied at construction.
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f64> {
        self.aspect_ratio
    }

    /// Screen pixels per plot unit along x.
    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    /// Screen pixels per plot unit along y.
    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    /// Maps a plot-space x coordinate to screen space.
    #[must_use]
    pub fn plot_to_screen_x(&self, x: f64) -> f64 {
        self.offset_x + self.scale_x * x
    }

    /// Maps a plot-space y coordinate to screen space (flips orientation).
    #[must_use]
    pub fn plot_to_screen_y(&self, y: f64) -> f64 {
        self.offset_y - self.scale_y * y
    }

    /// Maps a screen-space x coordinate back to plot space.
    #[must_use]
    pub fn screen_to_plot_x(&self, x: f64) -> f64 {
        (x - self.offset_x) / self.scale_x
    }

    /// Maps a screen-space y coordinate back to plot space (flips orientation).
    #[must_use]
    pub fn screen_to_plot_y(&self, y: f64) -> f64 {
        (self.offset_y - y) / self.scale_y
    }

    /// Maps a plot-space width to screen pixels. No offset is applied.
    #[must_use]
    pub fn plot_to_screen_width(&self, width: f64) -> f64 {
        width * self.scale_x
    }

    /// Maps a plot-space height to screen pixels. No offset is applied.
    #[must_use]
    pub fn plot_to_screen_height(&self, height: f64) -> f64 {
        height * self.scale_y
    }

    /// Maps a screen-space width to plot units. No offset is applied.
    #[must_use]
    pub fn screen_to_plot_width(&self, width: f64) -> f64 {
        width / self.scale_x
    }

    /// Maps a screen-space height to plot units. No offset is applied.
    #[must_use]
    pub fn screen_to_plot_height(&self, height: f64) -> f64 {
        height / self.scale_y
    }

    /// Maps a plot-space point to screen space.
    #[must_use]
    pub fn plot_to_screen_point(&self, pt: Point) -> Point {
        Point::new(self.plot_to_screen_x(pt.x), self.plot_to_screen_y(pt.y))
    }

    /// Maps a screen-space point to plot space.
    #[must_use]
    pub fn screen_to_plot_point(&self, pt: Point) -> Point {
        Point::new(self.screen_to_plot_x(pt.x), self.screen_to_plot_y(pt.y))
    }

    /// Inverts a screen-space rectangle back to plot space.
    ///
    /// The vertical flip is included: the screen rect's top edge becomes the
    /// plot rect's maximum y. Returns a plot-space rect.
    #[must_use]
    pub fn plot_rect_of(&self, screen_rect: Rect) -> Rect {
        let x0 = self.screen_to_plot_x(screen_rect.x0);
        let x1 = self.screen_to_plot_x(screen_rect.x1);
        // Screen y0 is the top edge, which is the plot-space maximum y.
        let y_top = self.screen_to_plot_y(screen_rect.y0);
        let y_bottom = self.screen_to_plot_y(screen_rect.y1);
        Rect::new(x0, y_bottom, x1, y_top)
    }

    /// Projects a plot-space rectangle into screen space.
    ///
    /// Returns a screen-space rect (minimum y = top edge).
    #[must_use]
    pub fn screen_rect_of(&self, plot_rect: Rect) -> Rect {
        let x0 = self.plot_to_screen_x(plot_rect.x0);
        let x1 = self.plot_to_screen_x(plot_rect.x1);
        let y_top = self.plot_to_screen_y(plot_rect.y1);
        let y_bottom = self.plot_to_screen_y(plot_rect.y0);
        Rect::new(x0, y_top, x1, y_bottom)
    }

    /// The plot-space rectangle currently visible through the screen rect.
    ///
    /// With no aspect lock this equals the plot rect the transform was built
    /// from; with a lock it is the letterboxed (possibly larger) rect.
    #[must_use]
    pub fn visible_plot_rect(&self) -> Rect {
        self.plot_rect_of(self.screen_rect)
    }

    /// The screen size this transform was built for.
    #[must_use]
    pub fn screen_size(&self) -> Size {
        self.screen_rect.size()
    }
}

/// Smallest plot span accepted, as a fraction of the screen extent.
///
/// Flooring relative to the screen (rather than at the smallest positive
/// float) bounds the derived scale at roughly `1 / MIN_RELATIVE_SPAN`, so a
/// collapsed plot rect still yields finite scales and offsets.
const MIN_RELATIVE_SPAN: f64 = 1e-12;

fn usable_span(span: f64, screen_extent: f64) -> f64 {
    let floor = screen_extent.abs().max(1.0) * MIN_RELATIVE_SPAN;
    // `>` rejects NaN spans along with everything at or below the floor.
    if span > floor { span } else { floor }
}

impl Default for CoordinateTransform {
    /// Maps the plot-space unit square onto the screen-space unit square.
    fn default() -> Self {
        Self::new(
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Rect::new(0.0, 0.0, 1.0, 1.0),
            None,
        )
    }
}
