// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for two-pass bounds and padding aggregation.
//!
//! Uses a deterministic synthetic tree shaped like a busy dashboard chart:
//! a root line graph, a band of markers per series, and a handful of
//! unbounded overlay nodes that adapt to the first-pass union.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kurbo::{Rect, Size};
use sedge_plot_tree::{
    aggregate_bounds, aggregate_padding, Boundable, BoundsPass, BoundsSettings, Padding, Paddable,
    PlotTree, Renderable,
};

#[derive(Debug)]
struct Series {
    extent: Rect,
    padding: Padding,
}

impl Boundable for Series {
    fn compute_local_bounds(&self, _pass: BoundsPass, _prior: Option<Rect>) -> Option<Rect> {
        Some(self.extent)
    }
}
impl Paddable for Series {
    fn local_padding(&self) -> Padding {
        self.padding
    }
}
impl Renderable for Series {
    fn render(&mut self, _plot_rect: Rect, _screen_size: Size) {}
}

/// Overlay content with no extent of its own (grids, crosshairs).
#[derive(Debug)]
struct Overlay;

impl Boundable for Overlay {
    fn compute_local_bounds(&self, pass: BoundsPass, prior: Option<Rect>) -> Option<Rect> {
        match pass {
            BoundsPass::First => None,
            BoundsPass::Second => prior.map(|r| r.inflate(r.width() * 0.05, 0.0)),
        }
    }
}
impl Paddable for Overlay {}
impl Renderable for Overlay {
    fn render(&mut self, _plot_rect: Rect, _screen_size: Size) {}
}

fn build_tree(series: usize, markers_per_series: usize) -> PlotTree {
    let mut tree = PlotTree::new();
    let root = tree
        .insert_root(Box::new(Series {
            extent: Rect::new(0.0, 0.0, 100.0, 50.0),
            padding: Padding::uniform(4.0),
        }))
        .unwrap();

    for s in 0..series {
        let offset = s as f64 * 10.0;
        let parent = tree
            .insert_child(
                root,
                Box::new(Series {
                    extent: Rect::new(offset, -offset, 100.0 + offset, 50.0),
                    padding: Padding {
                        left: 2.0,
                        right: s as f64,
                        top: 0.0,
                        bottom: 1.0,
                    },
                }),
            )
            .unwrap();
        for m in 0..markers_per_series {
            let x = m as f64;
            tree.insert_child(
                parent,
                Box::new(Series {
                    extent: Rect::new(x, 0.0, x + 1.0, 1.0),
                    padding: Padding::ZERO,
                }),
            )
            .unwrap();
        }
        tree.insert_child(parent, Box::new(Overlay)).unwrap();
    }
    tree
}

fn bench_aggregation(c: &mut Criterion) {
    let settings = BoundsSettings::default();
    let mut group = c.benchmark_group("bounds_aggregation");
    for (series, markers) in [(4, 16), (16, 64), (64, 128)] {
        let tree = build_tree(series, markers);
        let nodes = tree.len();
        group.bench_with_input(BenchmarkId::new("bounds", nodes), &tree, |b, tree| {
            b.iter(|| black_box(aggregate_bounds(tree, &settings)));
        });
        group.bench_with_input(BenchmarkId::new("padding", nodes), &tree, |b, tree| {
            b.iter(|| black_box(aggregate_padding(tree)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_aggregation);
criterion_main!(benches);
