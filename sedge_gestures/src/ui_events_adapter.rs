// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Translation from [`ui_events::pointer::PointerEvent`] into gesture samples.

use kurbo::Point;
use ui_events::pointer::{PointerEvent, PointerGesture, PointerType};
use ui_events::ScrollDelta;

use crate::surface::PointerGestures;
use crate::GestureSource;

/// Pixels of precise scrolling that count as one wheel notch.
const PIXELS_PER_NOTCH: f64 = 120.0;

/// Stateful translator from `ui-events` pointer events to gesture samples.
///
/// Platform pinch gestures arrive as incremental magnification deltas; this
/// adapter integrates them into the running scale samples
/// [`PointerGestures::pinch_update`] expects.
#[derive(Clone, Copy, Debug, Default)]
pub struct UiEventPointer {
    pinch_magnification: Option<f64>,
}

impl UiEventPointer {
    /// Creates an idle translator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one pointer event into the surface's adapters.
    pub fn apply(&mut self, event: &PointerEvent, gestures: &mut PointerGestures) {
        match event {
            PointerEvent::Down(e) => {
                let source = source_of(e.pointer.pointer_type);
                gestures.pointer_down_from(e.state.logical_point(), source);
            }
            PointerEvent::Move(update) => {
                gestures.pointer_move(update.current.logical_point());
            }
            PointerEvent::Up(_) => {
                gestures.pointer_up();
                self.end_pinch(gestures);
            }
            PointerEvent::Cancel(_) => {
                gestures.pointer_cancel();
                self.end_pinch(gestures);
            }
            PointerEvent::Scroll(e) => {
                let origin = e.state.logical_point();
                gestures.wheel(origin, scroll_notches(&e.delta, e.state.scale_factor));
            }
            PointerEvent::Gesture(e) => {
                if let PointerGesture::Pinch(delta) = &e.gesture {
                    self.pinch_delta(gestures, e.state.logical_point(), f64::from(*delta));
                }
            }
            _ => {}
        }
    }

    fn pinch_delta(&mut self, gestures: &mut PointerGestures, origin: Point, delta: f64) {
        let magnification = match self.pinch_magnification {
            Some(m) => m * (1.0 + delta),
            None => {
                gestures.pinch_begin(1.0);
                1.0 + delta
            }
        };
        self.pinch_magnification = Some(magnification);
        gestures.pinch_update(origin, magnification);
    }

    fn end_pinch(&mut self, gestures: &mut PointerGestures) {
        if self.pinch_magnification.take().is_some() {
            gestures.pinch_end();
        }
    }
}

fn source_of(pointer_type: PointerType) -> GestureSource {
    match pointer_type {
        PointerType::Touch => GestureSource::Touch,
        _ => GestureSource::Mouse,
    }
}

fn scroll_notches(delta: &ScrollDelta, scale_factor: f64) -> f64 {
    match delta {
        ScrollDelta::PixelDelta(pos) => {
            let logical = pos.to_logical(scale_factor);
            logical.y / PIXELS_PER_NOTCH
        }
        ScrollDelta::LineDelta(_, y) => f64::from(*y),
        ScrollDelta::PageDelta(_, y) => f64::from(*y),
    }
}
