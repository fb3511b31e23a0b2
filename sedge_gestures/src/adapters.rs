// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-modality adapter state machines.

use kurbo::Point;

use crate::{Gesture, GestureSource};

/// Multiplicative span change per wheel notch.
///
/// A notch toward the user multiplies the visible spans by this step (zoom
/// out); a notch away divides (zoom in).
pub const WHEEL_ZOOM_STEP: f64 = 1.2;

/// Pointer-drag panning.
///
/// Deltas are computed between consecutive move samples, not from the drag
/// origin; accumulating from the origin drifts once any other actor moves
/// the viewport mid-drag.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragPan {
    last: Option<Point>,
    source: GestureSource,
}

fn finite_point(pt: Point) -> bool {
    pt.x.is_finite() && pt.y.is_finite()
}

impl DragPan {
    /// Starts a drag at `pos`. Returns the [`Gesture::Pin`] announcing the
    /// new interaction.
    pub fn begin(&mut self, pos: Point, source: GestureSource) -> Gesture {
        self.last = Some(pos);
        self.source = source;
        Gesture::Pin { source }
    }

    /// Feeds a move sample. Returns a [`Gesture::Pan`] while a drag is
    /// active, `None` otherwise.
    pub fn update(&mut self, pos: Point) -> Option<Gesture> {
        if !finite_point(pos) {
            return None;
        }
        let last = self.last?;
        self.last = Some(pos);
        Some(Gesture::Pan {
            delta: pos - last,
            source: self.source,
        })
    }

    /// Ends the drag. Safe to call when no drag is active.
    pub fn end(&mut self) {
        self.last = None;
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }
}

/// Wheel zooming: a fixed multiplicative step per notch, direction by sign.
#[derive(Clone, Copy, Debug)]
pub struct WheelZoom {
    /// Step per notch; see [`WHEEL_ZOOM_STEP`].
    pub step: f64,
}

impl Default for WheelZoom {
    fn default() -> Self {
        Self {
            step: WHEEL_ZOOM_STEP,
        }
    }
}

impl WheelZoom {
    /// Converts one wheel sample into a zoom gesture.
    ///
    /// `notches` follows the common convention of positive values scrolling
    /// away from the user (zoom in). Zero or non-finite samples produce
    /// nothing.
    #[must_use]
    pub fn gesture(&self, origin: Point, notches: f64) -> Option<Gesture> {
        if notches == 0.0 || !notches.is_finite() {
            return None;
        }
        let scale_factor = if notches > 0.0 {
            1.0 / self.step
        } else {
            self.step
        };
        Some(Gesture::Zoom {
            origin,
            scale_factor,
            source: GestureSource::Mouse,
            prevent_horizontal: false,
            prevent_vertical: false,
        })
    }
}

/// Multi-touch pinch zooming.
///
/// The zoom factor of each update is the ratio of consecutive scale
/// samples, so the stream stays correct even when the platform reports an
/// absolute magnification.
#[derive(Clone, Copy, Debug, Default)]
pub struct PinchZoom {
    last_scale: Option<f64>,
}

impl PinchZoom {
    /// Starts a pinch with the platform's first scale sample. Returns the
    /// [`Gesture::Pin`] announcing the new interaction.
    pub fn begin(&mut self, scale: f64) -> Gesture {
        self.last_scale = (scale.is_finite() && scale > 0.0).then_some(scale);
        Gesture::Pin {
            source: GestureSource::Touch,
        }
    }

    /// Feeds a pinch scale sample around `origin` (screen coordinates).
    ///
    /// `scale` is the platform's running magnification for this pinch; the
    /// emitted factor is `previous_sample / scale` so growing magnification
    /// shrinks the visible spans. Degenerate samples are skipped and the
    /// pinch continues from the next good one.
    pub fn update(&mut self, origin: Point, scale: f64) -> Option<Gesture> {
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        let Some(last) = self.last_scale else {
            self.last_scale = Some(scale);
            return None;
        };
        self.last_scale = Some(scale);
        Some(Gesture::Zoom {
            origin,
            scale_factor: last / scale,
            source: GestureSource::Touch,
            prevent_horizontal: false,
            prevent_vertical: false,
        })
    }

    /// Ends the pinch. Safe to call when no pinch is active.
    pub fn end(&mut self) {
        self.last_scale = None;
    }

    /// Whether a pinch is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.last_scale.is_some()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::{DragPan, PinchZoom, WheelZoom, WHEEL_ZOOM_STEP};
    use crate::{Gesture, GestureSource};

    #[test]
    fn drag_emits_consecutive_deltas() {
        let mut drag = DragPan::default();
        let pin = drag.begin(Point::new(10.0, 10.0), GestureSource::Mouse);
        assert!(matches!(pin, Gesture::Pin { .. }));

        let Some(Gesture::Pan { delta, source }) = drag.update(Point::new(15.0, 12.0)) else {
            panic!("expected a pan");
        };
        assert_eq!(delta, Vec2::new(5.0, 2.0));
        assert_eq!(source, GestureSource::Mouse);

        // The next delta is relative to the previous sample, not the origin.
        let Some(Gesture::Pan { delta, .. }) = drag.update(Point::new(16.0, 12.0)) else {
            panic!("expected a pan");
        };
        assert_eq!(delta, Vec2::new(1.0, 0.0));

        drag.end();
        assert!(drag.update(Point::new(20.0, 20.0)).is_none());
    }

    #[test]
    fn wheel_alternates_by_sign() {
        let wheel = WheelZoom::default();
        let origin = Point::new(50.0, 50.0);

        let Some(Gesture::Zoom { scale_factor, .. }) = wheel.gesture(origin, 1.0) else {
            panic!("expected a zoom");
        };
        assert!((scale_factor - 1.0 / WHEEL_ZOOM_STEP).abs() < 1e-12);

        let Some(Gesture::Zoom { scale_factor, .. }) = wheel.gesture(origin, -3.0) else {
            panic!("expected a zoom");
        };
        assert!((scale_factor - WHEEL_ZOOM_STEP).abs() < 1e-12);

        assert!(wheel.gesture(origin, 0.0).is_none());
        assert!(wheel.gesture(origin, f64::NAN).is_none());
    }

    #[test]
    fn pinch_uses_ratio_of_consecutive_samples() {
        let mut pinch = PinchZoom::default();
        pinch.begin(1.0);

        let Some(Gesture::Zoom {
            scale_factor,
            source,
            ..
        }) = pinch.update(Point::new(30.0, 30.0), 2.0)
        else {
            panic!("expected a zoom");
        };
        // Magnification doubled, so half the plot range stays visible.
        assert!((scale_factor - 0.5).abs() < 1e-12);
        assert_eq!(source, GestureSource::Touch);

        let Some(Gesture::Zoom { scale_factor, .. }) = pinch.update(Point::new(30.0, 30.0), 1.0)
        else {
            panic!("expected a zoom");
        };
        assert!((scale_factor - 2.0).abs() < 1e-12);
    }

    #[test]
    fn pinch_skips_degenerate_samples() {
        let mut pinch = PinchZoom::default();
        pinch.begin(1.0);
        assert!(pinch.update(Point::new(0.0, 0.0), 0.0).is_none());
        assert!(pinch.update(Point::new(0.0, 0.0), f64::NAN).is_none());
        // The stream continues from the next good sample.
        assert!(pinch.update(Point::new(0.0, 0.0), 2.0).is_some());
    }
}
