// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability traits for plot content and the screen-space padding type.

use core::fmt::Debug;

use kurbo::{Rect, Size};

/// Which aggregation pass a [`Boundable::compute_local_bounds`] call belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundsPass {
    /// The initial sweep. `prior` is always `None`.
    First,
    /// The follow-up sweep for content that answered `None` in the first
    /// pass. `prior` carries the union of every bound defined so far (or
    /// `None` if the whole tree was unbounded).
    Second,
}

/// Per-side margins in **screen** pixels.
///
/// Padding reserves room around the fitted content for parts of a plot that
/// have fixed pixel size regardless of zoom, such as marker radii or text
/// labels hanging over the data extent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    /// Margin on the left edge.
    pub left: f64,
    /// Margin on the right edge.
    pub right: f64,
    /// Margin on the top edge.
    pub top: f64,
    /// Margin on the bottom edge.
    pub bottom: f64,
}

impl Padding {
    /// Zero on all sides.
    pub const ZERO: Self = Self {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };

    /// The same margin on all sides.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }

    /// Per-side maximum of two paddings.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self {
            left: self.left.max(other.left),
            right: self.right.max(other.right),
            top: self.top.max(other.top),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Per-side sum of two paddings.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self {
            left: self.left + other.left,
            right: self.right + other.right,
            top: self.top + other.top,
            bottom: self.bottom + other.bottom,
        }
    }
}

/// Content that can report its extent in plot space.
pub trait Boundable {
    /// Returns this content's bounds in **plot space**, or `None` for
    /// unbounded content that adapts to whatever rect it is given.
    ///
    /// In [`BoundsPass::Second`], `prior` carries the union computed by the
    /// first pass so self-adapting content can answer relative to a real
    /// extent.
    fn compute_local_bounds(&self, pass: BoundsPass, prior: Option<Rect>) -> Option<Rect>;

    /// A whole-world extent to use when the entire tree produces no bounds.
    ///
    /// Map-style content overrides this with the full longitude/latitude
    /// extent; everything else leaves the default `None`, which falls back
    /// to the unit square.
    fn fallback_extent(&self) -> Option<Rect> {
        None
    }
}

/// Content that reserves fixed-pixel margins around the fitted extent.
pub trait Paddable {
    /// Returns this content's margin requirements in **screen** pixels.
    fn local_padding(&self) -> Padding {
        Padding::ZERO
    }
}

/// Content that can draw itself for a given viewport.
pub trait Renderable {
    /// Renders for the given visible rect (**plot space**) and screen size.
    ///
    /// Sedge calls this from the arrange step of a layout pass; content is
    /// expected to read the rect as a snapshot and not call back into
    /// navigation.
    fn render(&mut self, plot_rect: Rect, screen_size: Size);
}

/// Everything a plot node's content must provide.
///
/// Blanket-implemented for any type with the three capabilities, so concrete
/// plot kinds implement the small traits directly rather than inheriting
/// from a deep hierarchy.
pub trait PlotContent: Boundable + Paddable + Renderable + Debug {}

impl<T: Boundable + Paddable + Renderable + Debug> PlotContent for T {}
