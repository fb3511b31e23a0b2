// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sedge Gestures: heterogeneous input, one typed gesture stream.
//!
//! Navigation does not want to know about pointers, wheels, or touch
//! platforms. This crate converts each input modality into the same three
//! tagged events — [`Gesture::Pan`], [`Gesture::Zoom`], and [`Gesture::Pin`]
//! — and merges them into one ordered stream per surface.
//!
//! - [`DragPan`]: pointer drags, emitting deltas between *consecutive* move
//!   samples (never from the drag origin, which would drift).
//! - [`WheelZoom`]: one wheel notch is a fixed multiplicative step,
//!   direction chosen by the sign of the delta.
//! - [`PinchZoom`]: continuous pinches, emitting the ratio of consecutive
//!   scale samples.
//! - [`GestureBus`]: the merge point. Subscribers run synchronously in
//!   subscription order; malformed samples are dropped here so one bad
//!   input event cannot kill navigation for the rest of the session.
//! - [`PointerGestures`]: the per-surface bundle. A surface is either
//!   mouse-only or touch-capable ([`PointerProfile`]); the two platform
//!   adapter sets are mutually exclusive, but Pin/Pan/Zoom from the same
//!   platform always combine.
//!
//! A `Pin` means "the user started a deliberate new interaction"; it
//! carries no geometry and exists so navigation can cancel an in-flight
//! animation.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use sedge_gestures::{Gesture, PointerGestures, PointerProfile};
//!
//! let mut surface = PointerGestures::new(PointerProfile::MouseOnly);
//! # let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
//! # let sink = seen.clone();
//! surface.bus_mut().subscribe(move |g: &Gesture| {
//!     # sink.borrow_mut().push(*g);
//!     // feed navigation
//! });
//!
//! surface.pointer_down(Point::new(10.0, 10.0)); // Pin
//! surface.pointer_move(Point::new(15.0, 12.0)); // Pan { delta: (5, 2) }
//! surface.pointer_up();
//! # assert_eq!(seen.borrow().len(), 2);
//! ```
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

mod adapters;
mod bus;
mod surface;
#[cfg(feature = "ui_events_adapter")]
mod ui_events_adapter;

pub use adapters::{DragPan, PinchZoom, WheelZoom, WHEEL_ZOOM_STEP};
pub use bus::{GestureBus, SubscriptionId};
pub use surface::{PointerGestures, PointerProfile};
#[cfg(feature = "ui_events_adapter")]
pub use ui_events_adapter::UiEventPointer;

use kurbo::{Point, Vec2};

/// The input modality a gesture came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureSource {
    /// Mouse (or other single-pointer, wheel-capable) input.
    #[default]
    Mouse,
    /// Touch input, including multi-touch pinches.
    Touch,
}

/// A normalized navigation gesture. Immutable value object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    /// Translate the viewport.
    Pan {
        /// Movement since the previous sample, in **screen** pixels
        /// (positive y = downward).
        delta: Vec2,
        /// Originating modality.
        source: GestureSource,
    },
    /// Scale the viewport around a screen-space origin.
    Zoom {
        /// Zoom origin in **screen** coordinates.
        origin: Point,
        /// Multiplicative factor applied to the visible spans; `> 1` zooms
        /// out (more plot range visible), `< 1` zooms in.
        scale_factor: f64,
        /// Originating modality.
        source: GestureSource,
        /// Leave the horizontal span untouched.
        prevent_horizontal: bool,
        /// Leave the vertical span untouched.
        prevent_vertical: bool,
    },
    /// The user deliberately started a new interaction; cancels any
    /// in-flight animation. Carries no geometry.
    Pin {
        /// Originating modality.
        source: GestureSource,
    },
}

impl Gesture {
    /// The modality this gesture came from.
    #[must_use]
    pub fn source(&self) -> GestureSource {
        match self {
            Self::Pan { source, .. } | Self::Zoom { source, .. } | Self::Pin { source } => *source,
        }
    }

    /// Whether every numeric payload is finite and usable.
    ///
    /// The [`GestureBus`] drops gestures failing this check at the merge
    /// point rather than surfacing an error.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Pan { delta, .. } => delta.x.is_finite() && delta.y.is_finite(),
            Self::Zoom {
                origin,
                scale_factor,
                ..
            } => {
                origin.x.is_finite()
                    && origin.y.is_finite()
                    && scale_factor.is_finite()
                    && *scale_factor > 0.0
            }
            Self::Pin { .. } => true,
        }
    }
}
