// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end navigation scenarios across the Sedge crates.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::{Point, Rect, Size, Vec2};

use sedge_animation::{FrameScheduler, PanZoomAnimation, NOMINAL_FRAME_DT};
use sedge_gestures::{Gesture, GestureSource};
use sedge_navigation::{AxisFilter, BindError, MasterId, PlotGroup};
use sedge_plot_tree::{Boundable, BoundsPass, Paddable, Renderable};

const EPS: f64 = 1e-9;

#[derive(Debug)]
struct Fixed(Rect);

impl Boundable for Fixed {
    fn compute_local_bounds(&self, _pass: BoundsPass, _prior: Option<Rect>) -> Option<Rect> {
        Some(self.0)
    }
}
impl Paddable for Fixed {}
impl Renderable for Fixed {
    fn render(&mut self, _plot_rect: Rect, _screen_size: Size) {}
}

/// A chart showing exactly `rect` on a 200x100 screen, auto-fit off.
fn chart_at(group: &mut PlotGroup, rect: Rect) -> MasterId {
    let id = group.create_master();
    group.layout(id, Size::new(200.0, 100.0));
    group.set_visible_rect(id, rect, false);
    id
}

fn pan(dx: f64, dy: f64) -> Gesture {
    Gesture::Pan {
        delta: Vec2::new(dx, dy),
        source: GestureSource::Mouse,
    }
}

#[test]
fn drag_pan_moves_the_viewport_against_the_drag() {
    let mut group = PlotGroup::default();
    let chart = chart_at(&mut group, Rect::new(0.0, 0.0, 20.0, 10.0));

    group.handle_gesture(chart, &pan(10.0, 0.0));

    let visible = group.visible_rect(chart).unwrap();
    assert!((visible.x0 + 1.0).abs() < EPS);
    assert!((visible.x1 - 19.0).abs() < EPS);
    assert!((visible.y0 - 0.0).abs() < EPS);
    assert!(!group.is_auto_fit(chart));
}

#[test]
fn wheel_zoom_keeps_the_cursor_point_anchored() {
    let mut group = PlotGroup::default();
    let chart = chart_at(&mut group, Rect::new(0.0, 0.0, 20.0, 10.0));

    let origin = Point::new(50.0, 25.0);
    group.handle_gesture(
        chart,
        &Gesture::Zoom {
            origin,
            scale_factor: 2.0,
            source: GestureSource::Mouse,
            prevent_horizontal: false,
            prevent_vertical: false,
        },
    );

    let visible = group.visible_rect(chart).unwrap();
    assert!((visible.width() - 40.0).abs() < EPS);
    // The plot point that was under the cursor is still under it.
    let anchored = Point::new(
        visible.x0 + origin.x / 200.0 * visible.width(),
        visible.y0 + (100.0 - origin.y) / 100.0 * visible.height(),
    );
    assert!((anchored.x - 5.0).abs() < EPS);
    assert!((anchored.y - 7.5).abs() < EPS);
}

#[test]
fn auto_fit_frames_content_until_first_navigation() {
    let mut group = PlotGroup::default();
    let chart = group.create_master();
    group
        .tree_mut(chart)
        .unwrap()
        .insert_root(Box::new(Fixed(Rect::new(0.0, 0.0, 10.0, 10.0))))
        .unwrap();

    group.layout(chart, Size::new(120.0, 120.0));
    assert!(group.is_auto_fit(chart));
    let fitted = group.visible_rect(chart).unwrap();
    assert!(fitted.contains_rect(Rect::new(0.0, 0.0, 10.0, 10.0)));

    group.handle_gesture(chart, &pan(5.0, 0.0));
    assert!(!group.is_auto_fit(chart));

    // Relayout at the same size keeps the navigated rect instead of refitting.
    let navigated = group.visible_rect(chart).unwrap();
    group.layout(chart, Size::new(120.0, 120.0));
    let after = group.visible_rect(chart).unwrap();
    assert!((after.x0 - navigated.x0).abs() < EPS);

    // An explicit fit restores auto-fit and the fitted frame.
    group.fit_to_view(chart);
    assert!(group.is_auto_fit(chart));
    let refit = group.visible_rect(chart).unwrap();
    assert!((refit.x0 - fitted.x0).abs() < EPS);
}

#[test]
fn degenerate_screen_parks_layout_until_a_real_size() {
    let mut group = PlotGroup::default();
    let chart = group.create_master();
    group
        .tree_mut(chart)
        .unwrap()
        .insert_root(Box::new(Fixed(Rect::new(0.0, 0.0, 4.0, 4.0))))
        .unwrap();

    group.layout(chart, Size::ZERO);
    assert_eq!(group.visible_rect(chart), None);

    group.layout(chart, Size::new(100.0, 100.0));
    assert!(group.visible_rect(chart).is_some());
}

#[test]
fn horizontal_binding_shares_only_the_x_span() {
    let mut group = PlotGroup::default();
    let a = chart_at(&mut group, Rect::new(0.0, 0.0, 20.0, 10.0));
    let b = chart_at(&mut group, Rect::new(100.0, 50.0, 120.0, 60.0));
    group.bind(a, b, AxisFilter::HORIZONTAL).unwrap();

    group.handle_gesture(a, &pan(10.0, 0.0));

    let visible_b = group.visible_rect(b).unwrap();
    // b's x span now mirrors a's...
    assert!((visible_b.x0 + 1.0).abs() < EPS);
    assert!((visible_b.x1 - 19.0).abs() < EPS);
    // ...while its y span is untouched.
    assert!((visible_b.y0 - 50.0).abs() < EPS);
    assert!((visible_b.y1 - 60.0).abs() < EPS);
    // Following a peer takes the receiver out of auto-fit mode.
    assert!(!group.is_auto_fit(b));
}

#[test]
fn set_visible_rect_propagates_like_a_gesture() {
    let mut group = PlotGroup::default();
    let a = chart_at(&mut group, Rect::new(0.0, 0.0, 20.0, 10.0));
    let b = chart_at(&mut group, Rect::new(100.0, 50.0, 120.0, 60.0));
    group.bind(a, b, AxisFilter::HORIZONTAL).unwrap();

    group.set_visible_rect(a, Rect::new(-4.0, 2.0, 36.0, 22.0), false);

    let visible_b = group.visible_rect(b).unwrap();
    assert!((visible_b.x0 + 4.0).abs() < EPS);
    assert!((visible_b.x1 - 36.0).abs() < EPS);
    assert!((visible_b.y0 - 50.0).abs() < EPS);
    assert!((visible_b.y1 - 60.0).abs() < EPS);
}

#[test]
fn binding_propagates_transitively_and_symmetrically() {
    let mut group = PlotGroup::default();
    let a = chart_at(&mut group, Rect::new(0.0, 0.0, 20.0, 10.0));
    let b = chart_at(&mut group, Rect::new(0.0, 0.0, 20.0, 10.0));
    let c = chart_at(&mut group, Rect::new(0.0, 0.0, 20.0, 10.0));
    group.bind(a, b, AxisFilter::BOTH).unwrap();
    group.bind(b, c, AxisFilter::BOTH).unwrap();

    // Navigating the far end reaches the whole component.
    group.handle_gesture(c, &pan(10.0, 0.0));
    for chart in [a, b, c] {
        let visible = group.visible_rect(chart).unwrap();
        assert!((visible.x0 + 1.0).abs() < EPS, "chart did not follow");
    }

    let bound = group.bound_plots(b);
    assert_eq!(bound.horizontal, vec![a, c]);
    assert_eq!(bound.vertical, vec![a, c]);
}

#[test]
fn bind_validates_its_endpoints() {
    let mut group = PlotGroup::default();
    let a = group.create_master();
    let b = group.create_master();
    let ghost = group.create_master();
    group.remove_master(ghost);

    assert_eq!(group.bind(a, a, AxisFilter::BOTH), Err(BindError::SamePlot));
    assert_eq!(
        group.bind(a, ghost, AxisFilter::BOTH),
        Err(BindError::UnknownPlot)
    );
    assert_eq!(
        group.bind(a, b, AxisFilter::empty()),
        Err(BindError::EmptyFilter)
    );
}

#[test]
fn unbind_stops_propagation() {
    let mut group = PlotGroup::default();
    let a = chart_at(&mut group, Rect::new(0.0, 0.0, 20.0, 10.0));
    let b = chart_at(&mut group, Rect::new(0.0, 0.0, 20.0, 10.0));
    let handle = group.bind(a, b, AxisFilter::BOTH).unwrap();

    assert!(group.unbind(&handle));
    assert!(!group.unbind(&handle));

    group.handle_gesture(a, &pan(10.0, 0.0));
    let visible_b = group.visible_rect(b).unwrap();
    assert!((visible_b.x0 - 0.0).abs() < EPS);
}

#[derive(Clone, Default)]
struct CountingScheduler(Rc<RefCell<usize>>);

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) {
        *self.0.borrow_mut() += 1;
    }
}

#[test]
fn animated_navigation_converges_through_frame_callbacks() {
    let mut group = PlotGroup::default();
    let chart = chart_at(&mut group, Rect::new(0.0, 0.0, 20.0, 10.0));
    group.set_animation(chart, Some(Box::new(PanZoomAnimation::default())));

    let scheduler = CountingScheduler::default();
    let requests = scheduler.0.clone();
    group.set_frame_scheduler(Box::new(scheduler));

    let target = Rect::new(50.0, 0.0, 70.0, 10.0);
    group.set_visible_rect(chart, target, true);
    assert!(group.is_animating(chart));
    assert!(*requests.borrow() > 0);

    for _ in 0..10_000 {
        if !group.is_animating(chart) {
            break;
        }
        group.advance_animations(NOMINAL_FRAME_DT);
    }
    assert!(!group.is_animating(chart));
    assert_eq!(group.visible_rect(chart), Some(target));
}

#[test]
fn pin_gesture_stops_an_animation_in_place() {
    let mut group = PlotGroup::default();
    let chart = chart_at(&mut group, Rect::new(0.0, 0.0, 20.0, 10.0));
    group.set_animation(chart, Some(Box::new(PanZoomAnimation::default())));

    group.set_visible_rect(chart, Rect::new(100.0, 0.0, 120.0, 10.0), true);
    group.advance_animations(NOMINAL_FRAME_DT);
    let mid = group.visible_rect(chart).unwrap();
    assert!(mid.x0 > 0.0 && mid.x0 < 100.0);

    group.handle_gesture(
        chart,
        &Gesture::Pin {
            source: GestureSource::Touch,
        },
    );
    assert!(!group.is_animating(chart));
    let stopped = group.visible_rect(chart).unwrap();
    assert!((stopped.x0 - mid.x0).abs() < EPS);
}

#[test]
fn gestures_compose_against_the_animation_target() {
    let mut group = PlotGroup::default();
    let chart = chart_at(&mut group, Rect::new(0.0, 0.0, 20.0, 10.0));
    group.set_animation(chart, Some(Box::new(PanZoomAnimation::default())));

    group.set_visible_rect(chart, Rect::new(40.0, 0.0, 60.0, 10.0), true);
    // A second pan while animating offsets the in-flight target, not the
    // stale on-screen rect.
    group.handle_gesture(chart, &pan(10.0, 0.0));

    for _ in 0..10_000 {
        if !group.is_animating(chart) {
            break;
        }
        group.advance_animations(NOMINAL_FRAME_DT);
    }
    let visible = group.visible_rect(chart).unwrap();
    assert!((visible.x0 - 39.0).abs() < EPS);
}

#[test]
fn visible_rect_observers_see_every_arrange() {
    let mut group = PlotGroup::default();
    let chart = chart_at(&mut group, Rect::new(0.0, 0.0, 20.0, 10.0));

    let seen: Rc<RefCell<Vec<Rect>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let id = group
        .subscribe_visible_rect(chart, move |r| sink.borrow_mut().push(*r))
        .unwrap();

    group.handle_gesture(chart, &pan(10.0, 0.0));
    group.set_visible_rect(chart, Rect::new(5.0, 5.0, 25.0, 15.0), false);
    assert_eq!(seen.borrow().len(), 2);

    assert!(group.unsubscribe_visible_rect(chart, id));
    group.handle_gesture(chart, &pan(10.0, 0.0));
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn debug_info_reflects_navigation_state() {
    let mut group = PlotGroup::default();
    let chart = group.create_master();

    let info = group.debug_info(chart).unwrap();
    assert!(info.auto_fit);
    assert_eq!(info.visible_rect, None);
    assert_eq!(info.observer_count, 0);

    group.layout(chart, Size::new(200.0, 100.0));
    group.handle_gesture(chart, &pan(10.0, 0.0));
    group.subscribe_visible_rect(chart, |_| {}).unwrap();

    let info = group.debug_info(chart).unwrap();
    assert!(!info.auto_fit);
    assert!(info.visible_rect.is_some());
    assert_eq!(info.screen_size, Size::new(200.0, 100.0));
    assert_eq!(info.observer_count, 1);
    assert!(!info.animating);
}

#[test]
fn aspect_lock_letterboxes_the_visible_rect() {
    let mut group = PlotGroup::default();
    let chart = group.create_master();
    group
        .tree_mut(chart)
        .unwrap()
        .insert_root(Box::new(Fixed(Rect::new(0.0, 0.0, 10.0, 10.0))))
        .unwrap();
    group.set_aspect_ratio(chart, Some(1.0));

    // Wide screen, square aspect: the x axis shows extra plot range.
    group.layout(chart, Size::new(300.0, 100.0));
    let visible = group.visible_rect(chart).unwrap();
    assert!(visible.width() > visible.height());
    assert!(visible.contains_rect(Rect::new(0.0, 0.0, 10.0, 10.0)));
}

#[test]
fn constraint_runs_on_resize_and_fit() {
    let mut group = PlotGroup::default();
    let chart = group.create_master();
    group
        .tree_mut(chart)
        .unwrap()
        .insert_root(Box::new(Fixed(Rect::new(0.0, 0.0, 10.0, 10.0))))
        .unwrap();
    // Clamp the viewport to x >= 0.
    group.set_constraint(
        chart,
        Some(Box::new(|rect: Rect, _screen: Size| {
            if rect.x0 < 0.0 {
                Rect::new(0.0, rect.y0, rect.width(), rect.y1)
            } else {
                rect
            }
        })),
    );

    group.layout(chart, Size::new(120.0, 120.0));
    let visible = group.visible_rect(chart).unwrap();
    assert!(visible.x0 >= -EPS);
}

#[test]
fn constraint_does_not_rerun_on_gestures() {
    let mut group = PlotGroup::default();
    let chart = group.create_master();
    group
        .tree_mut(chart)
        .unwrap()
        .insert_root(Box::new(Fixed(Rect::new(0.0, 0.0, 10.0, 10.0))))
        .unwrap();

    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    group.set_constraint(
        chart,
        Some(Box::new(move |rect: Rect, _screen: Size| {
            counter.set(counter.get() + 1);
            rect
        })),
    );

    group.layout(chart, Size::new(120.0, 120.0));
    assert_eq!(calls.get(), 1);

    // Gesture navigation goes through the collapse guard, not the
    // constraint; neither does a relayout at an unchanged size.
    group.handle_gesture(chart, &pan(10.0, 0.0));
    group.layout(chart, Size::new(120.0, 120.0));
    assert_eq!(calls.get(), 1);

    // Explicit fits and real size changes do re-run it.
    group.fit_to_view(chart);
    assert_eq!(calls.get(), 2);
    group.layout(chart, Size::new(150.0, 120.0));
    assert_eq!(calls.get(), 3);
}

#[test]
fn axis_refit_takes_one_span_and_leaves_the_rest() {
    let mut group = PlotGroup::default();
    let chart = group.create_master();
    group
        .tree_mut(chart)
        .unwrap()
        .insert_root(Box::new(Fixed(Rect::new(0.0, 0.0, 10.0, 10.0))))
        .unwrap();
    group.layout(chart, Size::new(120.0, 120.0));
    let fitted = group.visible_rect(chart).unwrap();

    group.set_visible_rect(chart, Rect::new(20.0, 30.0, 40.0, 50.0), false);
    assert!(!group.is_auto_fit(chart));

    // A vertical refit restores the fitted y span and nothing else.
    group.fit_to_view_y(chart);
    let visible = group.visible_rect(chart).unwrap();
    assert!((visible.x0 - 20.0).abs() < EPS);
    assert!((visible.x1 - 40.0).abs() < EPS);
    assert!((visible.y0 - fitted.y0).abs() < EPS);
    assert!((visible.y1 - fitted.y1).abs() < EPS);
    assert!(!group.is_auto_fit(chart));

    // The horizontal counterpart, keeping the y span the last refit set.
    group.fit_to_view_x(chart);
    let visible = group.visible_rect(chart).unwrap();
    assert!((visible.x0 - fitted.x0).abs() < EPS);
    assert!((visible.x1 - fitted.x1).abs() < EPS);
    assert!((visible.y0 - fitted.y0).abs() < EPS);
    assert!(!group.is_auto_fit(chart));

    // The refit was one-shot: a relayout at the same size keeps the rect
    // instead of refitting again.
    let before = group.visible_rect(chart).unwrap();
    group.layout(chart, Size::new(120.0, 120.0));
    let after = group.visible_rect(chart).unwrap();
    assert!((after.x0 - before.x0).abs() < EPS);
    assert!((after.y0 - before.y0).abs() < EPS);
}
