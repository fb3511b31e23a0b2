// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-pass bounds aggregation and padding aggregation over a plot tree.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::content::{BoundsPass, Padding};
use crate::tree::{PlotId, PlotTree};

/// Inflation factor for degenerate (zero-span) aggregate axes.
///
/// A zero span at coordinate `c` becomes `c ± max(|c| * DEGENERATE_INFLATION,
/// DEGENERATE_INFLATION)`. The value is inherited from the original system
/// and is deliberately not derived from anything; override it through
/// [`BoundsSettings`] if content needs different slack.
pub const DEGENERATE_INFLATION: f64 = 0.01;

/// The canonical fallback extent: the unit square, in plot space.
pub const UNIT_EXTENT: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

/// Tuning knobs for [`aggregate_bounds`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundsSettings {
    /// Relative inflation applied to degenerate axes. See
    /// [`DEGENERATE_INFLATION`].
    pub degenerate_inflation: f64,
    /// Extent used when the tree yields no usable bounds and no content
    /// nominates a [`crate::Boundable::fallback_extent`].
    pub default_extent: Rect,
}

impl Default for BoundsSettings {
    fn default() -> Self {
        Self {
            degenerate_inflation: DEGENERATE_INFLATION,
            default_extent: UNIT_EXTENT,
        }
    }
}

/// Computes the combined content rectangle of the tree, in plot space.
///
/// Runs the two-pass protocol over the depth-first flattened tree: pass one
/// unions every extent that is already defined; pass two revisits the
/// previously-undefined nodes with the pass-one union as `prior`.
///
/// The result is guaranteed finite with non-zero spans:
/// - zero-span axes are inflated symmetrically,
/// - a non-finite union is replaced by the default extent,
/// - an empty result uses the first [`crate::Boundable::fallback_extent`]
///   nominated in tree order, or `settings.default_extent`.
#[must_use]
pub fn aggregate_bounds(tree: &PlotTree, settings: &BoundsSettings) -> Rect {
    let order = tree.flatten();

    let mut union: Option<Rect> = None;
    let mut undefined: Vec<PlotId> = Vec::new();
    for &id in &order {
        let Some(content) = tree.content(id) else {
            continue;
        };
        match content.compute_local_bounds(BoundsPass::First, None) {
            Some(bounds) => union = Some(union_rect(union, bounds)),
            None => undefined.push(id),
        }
    }

    let prior = union;
    for &id in &undefined {
        if let Some(content) = tree.content(id)
            && let Some(bounds) = content.compute_local_bounds(BoundsPass::Second, prior)
        {
            union = Some(union_rect(union, bounds));
        }
    }

    let aggregated = match union {
        Some(rect) if is_finite_rect(rect) => rect,
        // Either nothing reported bounds, or something reported a non-finite
        // rect. Both are reachable through normal empty-content states, so
        // fall back instead of erroring.
        Some(_) => settings.default_extent,
        None => fallback_extent(tree, &order).unwrap_or(settings.default_extent),
    };

    inflate_degenerate(aggregated, settings.degenerate_inflation)
}

/// Computes the tree-wide padding: the per-side maximum over all nodes.
///
/// The fixed chart-level padding is *not* included here; the layout pass
/// adds it once at the root.
#[must_use]
pub fn aggregate_padding(tree: &PlotTree) -> Padding {
    let mut padding = Padding::ZERO;
    for id in tree.flatten() {
        if let Some(content) = tree.content(id) {
            padding = padding.max(content.local_padding());
        }
    }
    padding
}

fn fallback_extent(tree: &PlotTree, order: &[PlotId]) -> Option<Rect> {
    order
        .iter()
        .filter_map(|&id| tree.content(id)?.fallback_extent())
        .find(|rect| is_finite_rect(*rect))
}

fn union_rect(acc: Option<Rect>, rect: Rect) -> Rect {
    match acc {
        Some(prev) => prev.union(rect),
        None => rect,
    }
}

fn is_finite_rect(rect: Rect) -> bool {
    rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite()
}

fn inflate_degenerate(rect: Rect, inflation: f64) -> Rect {
    let mut out = rect;
    if out.width() <= 0.0 {
        let c = out.x0;
        let delta = (c.abs() * inflation).max(inflation);
        out.x0 = c - delta;
        out.x1 = c + delta;
    }
    if out.height() <= 0.0 {
        let c = out.y0;
        let delta = (c.abs() * inflation).max(inflation);
        out.y0 = c - delta;
        out.y1 = c + delta;
    }
    out
}
