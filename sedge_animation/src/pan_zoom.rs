// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The plain velocity-based pan/zoom interpolation strategy.

use kurbo::{Point, Rect, Size, Vec2};

use crate::frame::{AnimationFrame, ViewAnimation};

/// Fraction of the start width used as the minimum step base.
///
/// Very small moves would otherwise advance by vanishing amounts per tick;
/// flooring the step base at `start_width * MIN_STEP_FRACTION` bounds the
/// number of ticks any run can take.
const MIN_STEP_FRACTION: f64 = 1.0 / 1000.0;

/// Relative size change below which a run counts as position-only.
const SIZE_CHANGE_EPSILON: f64 = 1e-12;

/// Velocity constants for [`PanZoomAnimation`], in units of the remaining
/// distance per second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSettings {
    /// Velocity when only the position changes.
    pub pan_velocity: f64,
    /// Velocity when the size changes too; transitions that resize feel
    /// sluggish at pan speed.
    pub zoom_velocity: f64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            pan_velocity: 5.0,
            zoom_velocity: 10.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Run {
    start: Rect,
    target: Rect,
    current: Rect,
    /// Unit vector from the start origin to the target origin; the zero
    /// vector for pure resizes.
    direction: Vec2,
    path_length: f64,
    traveled: f64,
    /// Interpolation progress for pure resizes, where `traveled /
    /// path_length` is undefined.
    resize_progress: f64,
    velocity: f64,
}

/// Plain easing between two viewport rectangles.
///
/// See the crate docs for the interpolation scheme. All rects are in plot
/// space.
#[derive(Clone, Copy, Debug, Default)]
pub struct PanZoomAnimation {
    settings: AnimationSettings,
    run: Option<Run>,
}

impl PanZoomAnimation {
    /// Creates an idle strategy with the given velocity settings.
    #[must_use]
    pub fn new(settings: AnimationSettings) -> Self {
        Self {
            settings,
            run: None,
        }
    }

    /// The configured velocity settings.
    #[must_use]
    pub fn settings(&self) -> AnimationSettings {
        self.settings
    }
}

impl ViewAnimation for PanZoomAnimation {
    fn start(&mut self, current: Rect, target: Rect) {
        let offset = target.origin() - current.origin();
        let path_length = offset.hypot();
        let direction = if path_length > 0.0 {
            offset / path_length
        } else {
            Vec2::ZERO
        };

        let size_changed = (target.width() - current.width()).abs()
            > SIZE_CHANGE_EPSILON * current.width().abs().max(1.0)
            || (target.height() - current.height()).abs()
                > SIZE_CHANGE_EPSILON * current.height().abs().max(1.0);
        let velocity = if size_changed {
            self.settings.zoom_velocity
        } else {
            self.settings.pan_velocity
        };

        // Starting implicitly supersedes any previous run.
        self.run = Some(Run {
            start: current,
            target,
            current,
            direction,
            path_length,
            traveled: 0.0,
            resize_progress: 0.0,
            velocity,
        });
    }

    fn tick(&mut self, dt: f64) -> Option<AnimationFrame> {
        let run = self.run.as_mut()?;
        if !(dt > 0.0) {
            return Some(AnimationFrame::step(run.current));
        }

        let progress = if run.path_length > 0.0 {
            let remaining = run.path_length - run.traveled;
            let step_base = remaining.max(run.start.width() * MIN_STEP_FRACTION);
            run.traveled += step_base * run.velocity * dt;
            run.traveled / run.path_length
        } else {
            run.resize_progress += run.velocity * dt;
            run.resize_progress
        };

        if progress >= 1.0 {
            // Snap: the final frame's rect equals the target exactly.
            let target = run.target;
            self.run = None;
            return Some(AnimationFrame::last(target));
        }

        let origin = run.start.origin() + run.direction * (run.path_length * progress);
        let size = Size::new(
            lerp(run.start.width(), run.target.width(), progress),
            lerp(run.start.height(), run.target.height(), progress),
        );
        run.current = rect_from(origin, size);
        Some(AnimationFrame::step(run.current))
    }

    fn stop(&mut self) -> Option<AnimationFrame> {
        self.run.take().map(|run| AnimationFrame::last(run.current))
    }

    fn is_active(&self) -> bool {
        self.run.is_some()
    }

    fn estimated_target(&self) -> Option<Rect> {
        self.run.map(|run| run.target)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn rect_from(origin: Point, size: Size) -> Rect {
    Rect::new(
        origin.x,
        origin.y,
        origin.x + size.width,
        origin.y + size.height,
    )
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::{AnimationSettings, PanZoomAnimation};
    use crate::frame::{ViewAnimation, NOMINAL_FRAME_DT};

    fn run_to_completion(animation: &mut PanZoomAnimation, max_ticks: usize) -> (Rect, usize) {
        for ticks in 1..=max_ticks {
            let frame = animation.tick(NOMINAL_FRAME_DT).expect("still animating");
            if frame.is_last {
                return (frame.plot_rect, ticks);
            }
        }
        panic!("animation did not terminate within {max_ticks} ticks");
    }

    #[test]
    fn terminates_and_snaps_to_target() {
        let start = Rect::new(0.0, 0.0, 10.0, 10.0);
        let target = Rect::new(100.0, -40.0, 130.0, -10.0);
        let mut animation = PanZoomAnimation::default();
        animation.start(start, target);

        let (rect, _ticks) = run_to_completion(&mut animation, 10_000);
        assert_eq!(rect, target);
        assert!(!animation.is_active());
    }

    #[test]
    fn tiny_moves_still_terminate() {
        let start = Rect::new(0.0, 0.0, 10.0, 10.0);
        let target = Rect::new(1e-7, 0.0, 10.0 + 1e-7, 10.0);
        let mut animation = PanZoomAnimation::default();
        animation.start(start, target);

        // The step-base floor keeps the tick count bounded even though the
        // remaining distance is microscopic.
        let (rect, ticks) = run_to_completion(&mut animation, 10_000);
        assert_eq!(rect, target);
        assert!(ticks < 10_000);
    }

    #[test]
    fn pure_resize_animates_by_velocity() {
        let start = Rect::new(0.0, 0.0, 10.0, 10.0);
        let target = Rect::new(0.0, 0.0, 40.0, 40.0);
        let mut animation = PanZoomAnimation::default();
        animation.start(start, target);

        let frame = animation.tick(NOMINAL_FRAME_DT).unwrap();
        assert!(!frame.is_last);
        assert!(frame.plot_rect.width() > start.width());
        assert!(frame.plot_rect.width() < target.width());

        let (rect, _) = run_to_completion(&mut animation, 10_000);
        assert_eq!(rect, target);
    }

    #[test]
    fn intermediate_frames_interpolate_size_with_position() {
        let start = Rect::new(0.0, 0.0, 10.0, 10.0);
        let target = Rect::new(20.0, 0.0, 50.0, 30.0);
        let mut animation = PanZoomAnimation::default();
        animation.start(start, target);

        let frame = animation.tick(NOMINAL_FRAME_DT).unwrap();
        let rect = frame.plot_rect;
        assert!(rect.x0 > start.x0 && rect.x0 < target.x0);
        assert!(rect.width() > start.width() && rect.width() < target.width());
    }

    #[test]
    fn stop_emits_one_terminal_frame_then_is_idempotent() {
        let mut animation = PanZoomAnimation::default();
        animation.start(Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(5.0, 5.0, 6.0, 6.0));
        let _ = animation.tick(NOMINAL_FRAME_DT);

        let frame = animation.stop().expect("first stop yields a frame");
        assert!(frame.is_last);
        assert!(animation.stop().is_none());
        assert!(!animation.is_active());
    }

    #[test]
    fn restart_supersedes_previous_run() {
        let mut animation = PanZoomAnimation::default();
        animation.start(Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(5.0, 5.0, 6.0, 6.0));
        let _ = animation.tick(NOMINAL_FRAME_DT);

        let new_target = Rect::new(-3.0, 0.0, -2.0, 1.0);
        let current = animation.tick(NOMINAL_FRAME_DT).unwrap().plot_rect;
        animation.start(current, new_target);
        assert_eq!(animation.estimated_target(), Some(new_target));

        let (rect, _) = run_to_completion(&mut animation, 10_000);
        assert_eq!(rect, new_target);
    }

    #[test]
    fn pan_and_zoom_velocities_differ() {
        let settings = AnimationSettings::default();
        assert!(settings.zoom_velocity > settings.pan_velocity);
    }
}
