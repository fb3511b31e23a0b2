// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sedge Navigation: the controller tying a plot surface together.
//!
//! A [`PlotGroup`] owns one or more *masters* — charts, each with its own
//! plot tree, coordinate transform, and navigation state — and everything
//! that moves their viewports:
//!
//! - **Layout**: each pass aggregates the tree's bounds and padding, fits
//!   them into the screen (auto-fit), or keeps the last navigated rect.
//! - **Gestures**: normalized [`Gesture`]s from `sedge_gestures` become new
//!   visible rects; pans translate, zooms scale about the gesture origin,
//!   and either one takes the chart out of auto-fit mode.
//! - **Animation**: explicit viewport changes can run through a pluggable
//!   `sedge_animation` strategy; the group drives ticks from the host's
//!   frame callback and applies the emitted frames.
//! - **Binding**: viewports of different charts can be coupled per axis.
//!   Changes propagate through the whole connected component, with
//!   propagation suppressed on the receiving side so cycles cannot echo.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Rect, Size, Vec2};
//! use sedge_gestures::{Gesture, GestureSource};
//! use sedge_navigation::PlotGroup;
//! use sedge_plot_tree::{Boundable, BoundsPass, Paddable, Renderable};
//!
//! #[derive(Debug)]
//! struct Markers(Rect);
//! impl Boundable for Markers {
//!     fn compute_local_bounds(&self, _pass: BoundsPass, _prior: Option<Rect>) -> Option<Rect> {
//!         Some(self.0)
//!     }
//! }
//! impl Paddable for Markers {}
//! impl Renderable for Markers {
//!     fn render(&mut self, _plot_rect: Rect, _screen_size: Size) {}
//! }
//!
//! let mut group = PlotGroup::default();
//! let chart = group.create_master();
//! group
//!     .tree_mut(chart)
//!     .unwrap()
//!     .insert_root(Box::new(Markers(Rect::new(0.0, 0.0, 10.0, 10.0))))
//!     .unwrap();
//!
//! // Auto-fit frames the content.
//! group.layout(chart, Size::new(200.0, 200.0));
//! assert!(group.visible_rect(chart).unwrap().contains_rect(Rect::new(0.0, 0.0, 10.0, 10.0)));
//!
//! // A pan takes the chart out of auto-fit mode.
//! group.handle_gesture(
//!     chart,
//!     &Gesture::Pan {
//!         delta: Vec2::new(20.0, 0.0),
//!         source: GestureSource::Mouse,
//!     },
//! );
//! assert!(!group.is_auto_fit(chart));
//! ```
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

mod binding;
mod controller;
mod events;
mod group;
mod master;
mod settings;

pub use binding::{AxisFilter, BindError, BindingHandle};
pub use controller::{panned_rect, zoomed_rect};
pub use events::{ObserverId, Observers};
pub use group::{BoundPlots, MasterId, PlotGroup};
pub use master::{MasterDebugInfo, ViewConstraint};
pub use settings::{NavigationSettings, CHART_PADDING, MIN_PLOT_SPAN};

// Re-exported so hosts can name gesture and animation types without adding
// the crates separately.
pub use sedge_animation::{AnimationFrame, FrameScheduler, ViewAnimation};
pub use sedge_gestures::{Gesture, GestureSource};
