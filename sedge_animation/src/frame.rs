// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame type, strategy trait, and host scheduling hook.

use kurbo::Rect;

/// Nominal tick interval, in seconds, when the host drives animation from a
/// fixed-rate timer.
pub const NOMINAL_FRAME_DT: f64 = 1.0 / 60.0;

/// One step of an animated viewport transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationFrame {
    /// The rect to apply, in **plot space**.
    pub plot_rect: Rect,
    /// Terminal frame marker. After a frame with `is_last` the strategy is
    /// idle; every run ends with exactly one such frame.
    pub is_last: bool,
    /// The frame resynchronizes from an external provider's view change
    /// rather than from this engine's own interpolation.
    pub sync_update: bool,
}

impl AnimationFrame {
    /// An intermediate interpolation frame.
    #[must_use]
    pub fn step(plot_rect: Rect) -> Self {
        Self {
            plot_rect,
            is_last: false,
            sync_update: false,
        }
    }

    /// A terminal frame.
    #[must_use]
    pub fn last(plot_rect: Rect) -> Self {
        Self {
            plot_rect,
            is_last: true,
            sync_update: false,
        }
    }
}

/// A pluggable animated transition between viewport rectangles.
///
/// State machine with two states, Idle and Animating. [`start`] moves to
/// Animating (restarting supersedes any previous run); the only ways back
/// to Idle are a terminal frame from [`tick`] or an explicit [`stop`].
///
/// [`start`]: ViewAnimation::start
/// [`tick`]: ViewAnimation::tick
/// [`stop`]: ViewAnimation::stop
pub trait ViewAnimation {
    /// Begins animating from `current` toward `target` (both plot space).
    fn start(&mut self, current: Rect, target: Rect);

    /// Advances by `dt` seconds, returning the next frame while Animating.
    fn tick(&mut self, dt: f64) -> Option<AnimationFrame>;

    /// Cancels the run, emitting one terminal frame with the best-known
    /// current rect. Idempotent: returns `None` when already Idle.
    fn stop(&mut self) -> Option<AnimationFrame>;

    /// Whether a run is in flight.
    fn is_active(&self) -> bool;

    /// The rect the in-flight run is heading for, if any. Navigation uses
    /// this as the reference rect for gesture composition.
    fn estimated_target(&self) -> Option<Rect>;

    /// Feeds an external provider's view-change notification.
    ///
    /// Only meaningful for provider-synced strategies; the default ignores
    /// the notification.
    fn provider_view_changed(&mut self, _plot_rect: Rect, _ended: bool) -> Option<AnimationFrame> {
        None
    }
}

/// Host-provided frame scheduling primitive.
///
/// Navigation calls [`request_frame`](Self::request_frame) whenever a
/// strategy stays active after a tick; the host is expected to invoke its
/// frame callback once, later, per request (`requestAnimationFrame`-style
/// semantics, or a fixed-delay timer).
pub trait FrameScheduler {
    /// Asks the host to schedule one future frame callback.
    fn request_frame(&mut self);
}
