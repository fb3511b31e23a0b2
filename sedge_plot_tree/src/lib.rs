// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sedge Plot Tree: the tree of plot nodes behind one coordinate system.
//!
//! A Sedge chart is a tree of visual plot nodes that all share one
//! plot↔screen transform. This crate owns the structural half of that model:
//!
//! - The capability traits content must implement to participate in layout:
//!   [`Boundable`], [`Paddable`], and [`Renderable`] (combined as
//!   [`PlotContent`]).
//! - [`PlotTree`]: a generational-id arena of nodes with stable depth-first
//!   order.
//! - [`aggregate_bounds`] / [`aggregate_padding`]: the recursive two-pass
//!   computation of a tree's combined content rectangle and margins.
//!
//! It does not own the transform, navigation state, or any rendering
//! backend; those live in `sedge_transform` and `sedge_navigation`.
//!
//! ## Bounds aggregation
//!
//! Content reports its extent in plot space, or `None` meaning "unbounded;
//! I adapt to whatever rect I am given" (an infinite grid, for example).
//! Aggregation therefore runs in two passes over the flattened tree: pass
//! one unions every extent that is already defined; pass two revisits the
//! previously-undefined nodes with that union as context, so self-adapting
//! content can react to a real extent.
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use sedge_plot_tree::{
//!     aggregate_bounds, Boundable, BoundsPass, BoundsSettings, Paddable, PlotTree, Renderable,
//! };
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
//! let mut tree = PlotTree::new();
//! let root = tree.insert_root(Box::new(Markers(Rect::new(0.0, 0.0, 4.0, 2.0)))).unwrap();
//! tree.insert_child(root, Box::new(Markers(Rect::new(2.0, 1.0, 6.0, 3.0)))).unwrap();
//!
//! let bounds = aggregate_bounds(&tree, &BoundsSettings::default());
//! assert_eq!(bounds, Rect::new(0.0, 0.0, 6.0, 3.0));
//! ```
//!
//! Degenerate results never reach the transform: zero spans are inflated
//! symmetrically, non-finite aggregates fall back to a canonical default
//! extent, and an empty tree aggregates to the unit square.
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

mod aggregate;
mod content;
mod tree;

pub use aggregate::{
    aggregate_bounds, aggregate_padding, BoundsSettings, DEGENERATE_INFLATION, UNIT_EXTENT,
};
pub use content::{Boundable, BoundsPass, Padding, Paddable, PlotContent, Renderable};
pub use tree::{PlotId, PlotTree, TreeError};
