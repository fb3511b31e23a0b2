// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two charts bound on the horizontal axis: panning the top chart drags the
//! bottom chart's x span along while each keeps its own y range.

use kurbo::{Size, Vec2};
use sedge_demos::Scatter;
use sedge_gestures::{Gesture, GestureSource};
use sedge_navigation::{AxisFilter, PlotGroup};

fn main() {
    let mut group = PlotGroup::default();

    let price = group.create_master();
    group
        .tree_mut(price)
        .unwrap()
        .insert_root(Box::new(Scatter::sample("price", 60)))
        .unwrap();

    let volume = group.create_master();
    group
        .tree_mut(volume)
        .unwrap()
        .insert_root(Box::new(Scatter::sample("volume", 60)))
        .unwrap();

    println!("initial auto-fit of both charts:");
    group.layout(price, Size::new(640.0, 320.0));
    group.layout(volume, Size::new(640.0, 160.0));

    group
        .bind(price, volume, AxisFilter::HORIZONTAL)
        .expect("both charts are live");

    println!("pan the price chart; the volume chart follows on x:");
    group.handle_gesture(
        price,
        &Gesture::Pan {
            delta: Vec2::new(120.0, 0.0),
            source: GestureSource::Mouse,
        },
    );

    let bound = group.bound_plots(price);
    println!(
        "price is bound to {} chart(s) horizontally, {} vertically",
        bound.horizontal.len(),
        bound.vertical.len(),
    );
}
