// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for viewport propagation across binding chains.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kurbo::{Rect, Size, Vec2};
use sedge_navigation::{AxisFilter, Gesture, GestureSource, MasterId, PlotGroup};

fn build_chain(charts: usize) -> (PlotGroup, Vec<MasterId>) {
    let mut group = PlotGroup::default();
    let ids: Vec<MasterId> = (0..charts).map(|_| group.create_master()).collect();
    for &id in &ids {
        group.layout(id, Size::new(200.0, 100.0));
        group.set_visible_rect(id, Rect::new(0.0, 0.0, 20.0, 10.0), false);
    }
    for pair in ids.windows(2) {
        group.bind(pair[0], pair[1], AxisFilter::BOTH).unwrap();
    }
    (group, ids)
}

fn bench_propagation(c: &mut Criterion) {
    let mut group = c.benchmark_group("binding_propagation");
    for charts in [2_usize, 8, 32] {
        group.bench_with_input(
            BenchmarkId::new("pan_chain", charts),
            &charts,
            |b, &charts| {
                let (mut plots, ids) = build_chain(charts);
                let gesture = Gesture::Pan {
                    delta: Vec2::new(1.0, 0.0),
                    source: GestureSource::Mouse,
                };
                b.iter(|| {
                    plots.handle_gesture(ids[0], &gesture);
                    black_box(plots.visible_rect(ids[charts - 1]));
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_propagation);
criterion_main!(benches);
