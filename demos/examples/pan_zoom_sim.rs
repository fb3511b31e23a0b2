// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless walkthrough of one chart's navigation life cycle: auto-fit,
//! wheel zoom, drag pan, and an animated fly-back to the fitted view.

use kurbo::{Point, Size, Vec2};
use sedge_animation::{PanZoomAnimation, NOMINAL_FRAME_DT};
use sedge_demos::Scatter;
use sedge_gestures::{Gesture, GestureSource, WHEEL_ZOOM_STEP};
use sedge_navigation::PlotGroup;

fn main() {
    let mut group = PlotGroup::default();
    let chart = group.create_master();
    group
        .tree_mut(chart)
        .unwrap()
        .insert_root(Box::new(Scatter::sample("wave", 40)))
        .unwrap();
    group.set_animation(chart, Some(Box::new(PanZoomAnimation::default())));

    println!("auto-fit layout:");
    group.layout(chart, Size::new(640.0, 480.0));

    println!("wheel zoom in, two notches at the screen center:");
    for _ in 0..2 {
        group.handle_gesture(
            chart,
            &Gesture::Zoom {
                origin: Point::new(320.0, 240.0),
                scale_factor: 1.0 / WHEEL_ZOOM_STEP,
                source: GestureSource::Mouse,
                prevent_horizontal: false,
                prevent_vertical: false,
            },
        );
        run_animation(&mut group, chart);
    }

    println!("drag pan, three move samples:");
    group.handle_gesture(
        chart,
        &Gesture::Pin {
            source: GestureSource::Mouse,
        },
    );
    for _ in 0..3 {
        group.handle_gesture(
            chart,
            &Gesture::Pan {
                delta: Vec2::new(-40.0, 15.0),
                source: GestureSource::Mouse,
            },
        );
        run_animation(&mut group, chart);
    }

    println!("fit to view (animated state discarded, auto-fit restored):");
    group.fit_to_view(chart);
    println!(
        "auto-fit is {} again",
        if group.is_auto_fit(chart) { "on" } else { "off" }
    );
}

/// Drives the in-flight animation to completion at a nominal 60 Hz.
fn run_animation(group: &mut PlotGroup, chart: sedge_navigation::MasterId) {
    while group.is_animating(chart) {
        group.advance_animations(NOMINAL_FRAME_DT);
    }
}
