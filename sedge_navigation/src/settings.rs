// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunable constants for navigation and fitting.

use sedge_plot_tree::BoundsSettings;

/// Smallest plot-space span a zoom gesture may produce.
///
/// When a zoom would collapse a dimension below this threshold, that
/// dimension reverts to the reference rect's span (guards against runaway
/// zoom-to-zero). Inherited from the original system; deliberately a named
/// constant rather than something derived.
pub const MIN_PLOT_SPAN: f64 = 1e-9;

/// Fixed padding, in screen pixels, added once at the chart root on top of
/// the aggregated per-plot padding.
pub const CHART_PADDING: f64 = 10.0;

/// Knobs shared by every master in a [`crate::PlotGroup`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationSettings {
    /// Zoom collapse guard. See [`MIN_PLOT_SPAN`].
    pub min_plot_span: f64,
    /// Root padding constant. See [`CHART_PADDING`].
    pub chart_padding: f64,
    /// Settings forwarded to bounds aggregation.
    pub bounds: BoundsSettings,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            min_plot_span: MIN_PLOT_SPAN,
            chart_padding: CHART_PADDING,
            bounds: BoundsSettings::default(),
        }
    }
}
