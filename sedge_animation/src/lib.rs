// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sedge Animation: time-stepped interpolation between viewport rectangles.
//!
//! When navigation decides on a new visible rectangle it can apply it
//! immediately or hand it to an animation strategy. A strategy emits a
//! sequence of [`AnimationFrame`]s; the layout protocol applies each frame's
//! rect, and the terminal frame (always tagged [`AnimationFrame::is_last`])
//! returns the strategy to idle.
//!
//! Two strategies are provided:
//!
//! - [`PanZoomAnimation`]: plain easing. The viewport origin advances along
//!   a unit direction vector with a velocity proportional to the remaining
//!   distance (floored so short moves still terminate), while width/height
//!   interpolate linearly. Overshoot snaps to the target exactly.
//! - [`MapSyncAnimation`]: for surfaces synced to an external map provider.
//!   Pans reuse the plain interpolation; zooms delegate to the provider's
//!   own animated view change, and the strategy resynchronizes from the
//!   provider's view-change notifications instead of guaranteeing a frame
//!   rate — eventually consistent rather than fixed-rate.
//!
//! Strategies are headless: nothing here owns a timer. The host drives
//! [`ViewAnimation::tick`] from its frame callback (a [`FrameScheduler`]
//! requests the next one) at a nominal [`NOMINAL_FRAME_DT`] cadence.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Rect;
//! use sedge_animation::{PanZoomAnimation, ViewAnimation};
//!
//! let mut animation = PanZoomAnimation::default();
//! animation.start(Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(5.0, 0.0, 15.0, 10.0));
//!
//! let mut last = None;
//! while let Some(frame) = animation.tick(1.0 / 60.0) {
//!     last = Some(frame);
//!     if frame.is_last {
//!         break;
//!     }
//! }
//! assert_eq!(last.unwrap().plot_rect, Rect::new(5.0, 0.0, 15.0, 10.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod frame;
mod map_sync;
mod pan_zoom;

pub use frame::{AnimationFrame, FrameScheduler, ViewAnimation, NOMINAL_FRAME_DT};
pub use map_sync::{MapSyncAnimation, MapViewTarget};
pub use pan_zoom::{AnimationSettings, PanZoomAnimation};
