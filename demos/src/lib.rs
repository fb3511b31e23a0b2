// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared plot content for the Sedge demos.
//!
//! The demos are headless: instead of drawing, content renders by printing
//! which plot-space window it was asked to show.

use kurbo::{Point, Rect, Size};
use sedge_plot_tree::{Boundable, BoundsPass, Padding, Paddable, Renderable};

/// A scatter series over a fixed set of points, with marker padding.
#[derive(Debug)]
pub struct Scatter {
    /// Series label used in demo output.
    pub name: &'static str,
    /// Data points, in plot space.
    pub points: Vec<Point>,
    /// Marker radius, in screen pixels.
    pub marker_radius: f64,
}

impl Scatter {
    /// A small deterministic series for demo purposes.
    #[must_use]
    pub fn sample(name: &'static str, count: usize) -> Self {
        let points = (0..count)
            .map(|i| {
                let x = i as f64;
                // A gentle wave, no RNG so runs are reproducible.
                Point::new(x, (x * 0.7).sin() * 5.0 + x * 0.1)
            })
            .collect();
        Self {
            name,
            points,
            marker_radius: 4.0,
        }
    }
}

impl Boundable for Scatter {
    fn compute_local_bounds(&self, _pass: BoundsPass, _prior: Option<Rect>) -> Option<Rect> {
        let mut iter = self.points.iter();
        let first = iter.next()?;
        let mut bounds = Rect::from_points(*first, *first);
        for pt in iter {
            bounds = bounds.union_pt(*pt);
        }
        Some(bounds)
    }
}

impl Paddable for Scatter {
    fn local_padding(&self) -> Padding {
        Padding::uniform(self.marker_radius)
    }
}

impl Renderable for Scatter {
    fn render(&mut self, plot_rect: Rect, screen_size: Size) {
        let visible = self
            .points
            .iter()
            .filter(|pt| plot_rect.contains(**pt))
            .count();
        println!(
            "  [{}] showing x {:.2}..{:.2}, y {:.2}..{:.2} on {:.0}x{:.0} px ({visible}/{} points visible)",
            self.name,
            plot_rect.x0,
            plot_rect.x1,
            plot_rect.y0,
            plot_rect.y1,
            screen_size.width,
            screen_size.height,
            self.points.len(),
        );
    }
}
