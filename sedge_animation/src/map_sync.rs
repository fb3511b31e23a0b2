// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The map-provider-synced animation strategy.

use kurbo::Rect;

use crate::frame::{AnimationFrame, ViewAnimation};
use crate::pan_zoom::PanZoomAnimation;

/// An external map view Sedge stays in sync with.
///
/// The provider is opaque: Sedge only asks it to run its own animated view
/// change and listens for the resulting notifications. Tile fetching,
/// projections, and the provider's animation curve are none of Sedge's
/// business.
pub trait MapViewTarget {
    /// Asks the provider to animate its view toward the plot-space rect.
    fn request_view_change(&mut self, target: Rect);
}

/// Provider-synced transitions.
///
/// Pan targets (size unchanged) reuse the plain [`PanZoomAnimation`] so the
/// plot and the map move in lockstep. Zoom targets delegate to the
/// provider's native animated view change; the engine then resynchronizes
/// the plot rect from the provider's view-change notifications, emitting
/// frames tagged [`AnimationFrame::sync_update`]. There is no frame-rate
/// guarantee in that mode, only eventual consistency: the terminal frame
/// arrives with the provider's view-change-end notification.
pub struct MapSyncAnimation<T: MapViewTarget> {
    provider: T,
    inner: PanZoomAnimation,
    /// Target of a provider-delegated zoom in flight, if any.
    delegated: Option<Rect>,
    /// Latest rect the provider reported during the delegated run.
    provider_rect: Option<Rect>,
}

/// Relative size difference below which a transition counts as a pan.
const PAN_SIZE_TOLERANCE: f64 = 1e-9;

impl<T: MapViewTarget> MapSyncAnimation<T> {
    /// Creates an idle strategy syncing to `provider`.
    #[must_use]
    pub fn new(provider: T) -> Self {
        Self {
            provider,
            inner: PanZoomAnimation::default(),
            delegated: None,
            provider_rect: None,
        }
    }

    /// Borrows the provider handle.
    pub fn provider_mut(&mut self) -> &mut T {
        &mut self.provider
    }

    fn is_pan(current: Rect, target: Rect) -> bool {
        let w_scale = current.width().abs().max(1.0);
        let h_scale = current.height().abs().max(1.0);
        (target.width() - current.width()).abs() <= PAN_SIZE_TOLERANCE * w_scale
            && (target.height() - current.height()).abs() <= PAN_SIZE_TOLERANCE * h_scale
    }
}

impl<T: MapViewTarget> ViewAnimation for MapSyncAnimation<T> {
    fn start(&mut self, current: Rect, target: Rect) {
        if Self::is_pan(current, target) {
            self.delegated = None;
            self.provider_rect = None;
            self.inner.start(current, target);
        } else {
            // Supersede any interpolated run; the provider owns this
            // transition until its view-change-end notification.
            if self.inner.is_active() {
                let _ = self.inner.stop();
            }
            self.delegated = Some(target);
            self.provider_rect = None;
            self.provider.request_view_change(target);
        }
    }

    fn tick(&mut self, dt: f64) -> Option<AnimationFrame> {
        // Delegated zooms produce frames from notifications, not ticks.
        if self.delegated.is_some() {
            return None;
        }
        self.inner.tick(dt)
    }

    fn stop(&mut self) -> Option<AnimationFrame> {
        if let Some(target) = self.delegated.take() {
            // Best-known rect is the provider's last reported view, or the
            // target before any notification has arrived. The provider may
            // keep animating but we stop following it.
            let plot_rect = self.provider_rect.take().unwrap_or(target);
            return Some(AnimationFrame {
                plot_rect,
                is_last: true,
                sync_update: true,
            });
        }
        self.inner.stop()
    }

    fn is_active(&self) -> bool {
        self.delegated.is_some() || self.inner.is_active()
    }

    fn estimated_target(&self) -> Option<Rect> {
        self.delegated.or_else(|| self.inner.estimated_target())
    }

    fn provider_view_changed(&mut self, plot_rect: Rect, ended: bool) -> Option<AnimationFrame> {
        if self.delegated.is_none() {
            return None;
        }
        self.provider_rect = Some(plot_rect);
        if ended {
            self.delegated = None;
            self.provider_rect = None;
        }
        Some(AnimationFrame {
            plot_rect,
            is_last: ended,
            sync_update: true,
        })
    }
}

impl<T: MapViewTarget> core::fmt::Debug for MapSyncAnimation<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MapSyncAnimation")
            .field("inner", &self.inner)
            .field("delegated", &self.delegated)
            .finish_non_exhaustive()
    }
}
