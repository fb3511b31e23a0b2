// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure gesture-to-rect math.
//!
//! These functions translate normalized gestures into new visible plot
//! rects without touching any navigation state, so they can be tested (and
//! reasoned about) in isolation from the controller that applies them.

use kurbo::{Point, Rect, Size, Vec2};

/// Translates `reference` by a screen-space pan delta.
///
/// Dragging content rightward (positive `delta.x`) moves the viewport left
/// in plot space; dragging downward (positive `delta.y`) moves it up,
/// because plot-space y is flipped relative to the screen. The rect's size
/// never changes. A degenerate screen size returns `reference` unchanged.
#[must_use]
pub fn panned_rect(reference: Rect, delta: Vec2, screen: Size) -> Rect {
    if !(screen.width > 0.0 && screen.height > 0.0) {
        return reference;
    }
    let dx = delta.x * reference.width() / screen.width;
    let dy = delta.y * reference.height() / screen.height;
    Rect::new(
        reference.x0 - dx,
        reference.y0 + dy,
        reference.x1 - dx,
        reference.y1 + dy,
    )
}

/// Scales `reference` by `factor` about a screen-space origin.
///
/// The plot point under `origin` stays under `origin` after the zoom, which
/// is what makes wheel-zooming "into" a feature feel anchored. A factor
/// greater than one zooms out (spans grow).
///
/// Per-axis rules:
/// - an axis with its `prevent_*` flag set keeps the reference span and
///   position,
/// - an axis whose new span would drop below `min_span` reverts to the
///   reference span and position (zoom-to-zero guard).
///
/// A degenerate screen size returns `reference` unchanged.
#[must_use]
pub fn zoomed_rect(
    reference: Rect,
    origin: Point,
    factor: f64,
    screen: Size,
    prevent_horizontal: bool,
    prevent_vertical: bool,
    min_span: f64,
) -> Rect {
    if !(screen.width > 0.0 && screen.height > 0.0) {
        return reference;
    }

    // The gesture origin, expressed in plot space. Screen y is flipped.
    let anchor = Point::new(
        reference.x0 + origin.x / screen.width * reference.width(),
        reference.y0 + (screen.height - origin.y) / screen.height * reference.height(),
    );

    let (x0, x1) = if prevent_horizontal {
        (reference.x0, reference.x1)
    } else {
        zoom_axis(reference.x0, reference.x1, anchor.x, factor, min_span)
    };
    let (y0, y1) = if prevent_vertical {
        (reference.y0, reference.y1)
    } else {
        zoom_axis(reference.y0, reference.y1, anchor.y, factor, min_span)
    };
    Rect::new(x0, y0, x1, y1)
}

fn zoom_axis(lo: f64, hi: f64, anchor: f64, factor: f64, min_span: f64) -> (f64, f64) {
    let span = hi - lo;
    let new_span = span * factor;
    if new_span < min_span {
        return (lo, hi);
    }
    // Keep the anchor at the same fractional position within the span.
    let new_lo = anchor - (anchor - lo) * factor;
    (new_lo, new_lo + new_span)
}
