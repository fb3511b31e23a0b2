// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-chart navigation state: tree, transform, fit flags, and observers.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Rect, Size};

use sedge_animation::ViewAnimation;
use sedge_plot_tree::{aggregate_bounds, aggregate_padding, Padding, PlotTree};
use sedge_transform::CoordinateTransform;

use crate::events::Observers;
use crate::settings::NavigationSettings;

/// Diagnostic snapshot of one master's navigation state.
///
/// Plain data, detached from the live master; safe to hold across further
/// navigation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MasterDebugInfo {
    /// The last requested visible rect, if navigation ever set one.
    pub plot_rect: Option<Rect>,
    /// What the transform actually shows (letterboxed under an aspect
    /// lock), or `None` before the first real arrange.
    pub visible_rect: Option<Rect>,
    /// The screen size of the last layout pass.
    pub screen_size: Size,
    /// Whether layout refits to content.
    pub auto_fit: bool,
    /// The locked aspect ratio, if any.
    pub aspect_ratio: Option<f64>,
    /// Whether an animated transition is in flight.
    pub animating: bool,
    /// Number of visible-rect observers.
    pub observer_count: usize,
}

/// A host-supplied restriction on the visible rect, applied during layout
/// whenever the screen size changes or a fit is requested. Receives the
/// candidate rect (plot space) and the screen size; returns the rect to use.
pub type ViewConstraint = Box<dyn FnMut(Rect, Size) -> Rect>;

/// One chart's navigation state.
///
/// The master owns the plot tree, the current transform, and the auto-fit
/// machinery. It never talks to its siblings; propagation between bound
/// masters is the group's job.
pub(crate) struct Master {
    pub(crate) tree: PlotTree,
    pub(crate) transform: CoordinateTransform,
    /// The requested visible rect, if navigation has ever set one. The
    /// transform's visible rect can differ under an aspect lock.
    pub(crate) plot_rect: Option<Rect>,
    pub(crate) screen_size: Size,
    pub(crate) auto_fit: bool,
    pub(crate) fit_pending: bool,
    pub(crate) fit_x_pending: bool,
    pub(crate) fit_y_pending: bool,
    pub(crate) aspect_ratio: Option<f64>,
    pub(crate) constraint: Option<ViewConstraint>,
    pub(crate) animation: Option<Box<dyn ViewAnimation>>,
    pub(crate) observers: Observers<Rect>,
}

impl Master {
    pub(crate) fn new() -> Self {
        Self {
            tree: PlotTree::new(),
            transform: CoordinateTransform::default(),
            plot_rect: None,
            screen_size: Size::ZERO,
            auto_fit: true,
            fit_pending: false,
            fit_x_pending: false,
            fit_y_pending: false,
            aspect_ratio: None,
            constraint: None,
            animation: None,
            observers: Observers::new(),
        }
    }

    pub(crate) fn has_screen(&self) -> bool {
        self.screen_size.width > 0.0 && self.screen_size.height > 0.0
    }

    /// The rect gestures compose against: the in-flight animation target if
    /// any, else the last requested rect, else whatever the transform shows.
    pub(crate) fn reference_rect(&self) -> Rect {
        if let Some(animation) = &self.animation
            && let Some(target) = animation.estimated_target()
        {
            return target;
        }
        self.plot_rect
            .unwrap_or_else(|| self.transform.visible_plot_rect())
    }

    /// Computes the auto-fit rect for the current content and screen size.
    ///
    /// Bounds are aggregated over the tree, padding (per-side tree maximum
    /// plus the fixed chart padding) insets the screen rect the bounds are
    /// fitted into, and the result is widened back out to the full screen
    /// rect so padded margins show real plot coordinates.
    pub(crate) fn fitted_rect(&self, settings: &NavigationSettings) -> Rect {
        let bounds = aggregate_bounds(&self.tree, &settings.bounds);
        let padding = aggregate_padding(&self.tree)
            .add(Padding::uniform(settings.chart_padding));
        let screen = Rect::from_origin_size(Point::ORIGIN, self.screen_size);
        let inset = inset_screen(screen, padding);
        let transform = CoordinateTransform::new(bounds, inset, self.aspect_ratio);
        transform.plot_rect_of(screen)
    }

    /// Rebuilds the transform for `rect`, stores it, and renders the tree.
    /// Emits the visible-rect observers with the transform's actual visible
    /// rect (which differs from `rect` under an aspect lock).
    pub(crate) fn arrange(&mut self, rect: Rect) {
        let screen = Rect::from_origin_size(Point::ORIGIN, self.screen_size);
        self.transform = CoordinateTransform::new(rect, screen, self.aspect_ratio);
        self.plot_rect = Some(rect);

        let visible = self.transform.visible_plot_rect();
        self.tree.render_all(visible, self.screen_size);
        self.observers.emit(&visible);
    }

    pub(crate) fn debug_info(&self) -> MasterDebugInfo {
        MasterDebugInfo {
            plot_rect: self.plot_rect,
            visible_rect: self
                .has_screen()
                .then(|| self.transform.visible_plot_rect()),
            screen_size: self.screen_size,
            auto_fit: self.auto_fit,
            aspect_ratio: self.aspect_ratio,
            animating: self.animation.as_ref().is_some_and(|a| a.is_active()),
            observer_count: self.observers.len(),
        }
    }
}

/// Insets a screen rect by padding, collapsing back to the full rect when
/// the padding would leave no room.
fn inset_screen(screen: Rect, padding: Padding) -> Rect {
    let inset = Rect::new(
        screen.x0 + padding.left,
        screen.y0 + padding.top,
        screen.x1 - padding.right,
        screen.y1 - padding.bottom,
    );
    if inset.width() > 0.0 && inset.height() > 0.0 {
        inset
    } else {
        screen
    }
}

impl fmt::Debug for Master {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Master")
            .field("tree", &self.tree)
            .field("plot_rect", &self.plot_rect)
            .field("screen_size", &self.screen_size)
            .field("auto_fit", &self.auto_fit)
            .field("aspect_ratio", &self.aspect_ratio)
            .field("has_constraint", &self.constraint.is_some())
            .field("has_animation", &self.animation.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use kurbo::{Rect, Size};

    use sedge_plot_tree::{Boundable, BoundsPass, Paddable, Padding, Renderable};

    use super::Master;
    use crate::settings::NavigationSettings;

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

    #[derive(Debug)]
    struct WithPadding(Rect, Padding);
    impl Boundable for WithPadding {
        fn compute_local_bounds(&self, _pass: BoundsPass, _prior: Option<Rect>) -> Option<Rect> {
            Some(self.0)
        }
    }
    impl Paddable for WithPadding {
        fn local_padding(&self) -> Padding {
            self.1
        }
    }
    impl Renderable for WithPadding {
        fn render(&mut self, _plot_rect: Rect, _screen_size: Size) {}
    }

    #[test]
    fn fit_includes_chart_padding() {
        let mut master = Master::new();
        master.screen_size = Size::new(120.0, 120.0);
        master
            .tree
            .insert_root(Box::new(Fixed(Rect::new(0.0, 0.0, 10.0, 10.0))))
            .unwrap();

        let settings = NavigationSettings::default();
        let rect = master.fitted_rect(&settings);

        // Content fits a 100x100 inset (120 minus 10 on each side); the
        // full-screen rect therefore spans 12 plot units.
        assert!((rect.width() - 12.0).abs() < 1e-9);
        assert!((rect.height() - 12.0).abs() < 1e-9);
        assert!((rect.x0 + 1.0).abs() < 1e-9);
        assert!((rect.y0 + 1.0).abs() < 1e-9);
    }

    #[test]
    fn fit_takes_per_side_padding_maximum() {
        let mut master = Master::new();
        master.screen_size = Size::new(140.0, 120.0);
        master
            .tree
            .insert_root(Box::new(WithPadding(
                Rect::new(0.0, 0.0, 10.0, 10.0),
                Padding {
                    left: 20.0,
                    right: 0.0,
                    top: 0.0,
                    bottom: 0.0,
                },
            )))
            .unwrap();

        let settings = NavigationSettings::default();
        let rect = master.fitted_rect(&settings);
        // Inset is 30 left, 10 elsewhere: content occupies 100x100 pixels,
        // so left of content there are 3 plot units of margin.
        assert!((rect.x0 + 3.0).abs() < 1e-9);
        assert!((rect.x1 - 11.0).abs() < 1e-9);
    }

    #[test]
    fn oversized_padding_collapses_to_full_screen() {
        let mut master = Master::new();
        master.screen_size = Size::new(15.0, 15.0);
        master
            .tree
            .insert_root(Box::new(Fixed(Rect::new(0.0, 0.0, 10.0, 10.0))))
            .unwrap();

        let settings = NavigationSettings::default();
        let rect = master.fitted_rect(&settings);
        // Chart padding (10 per side) exceeds the screen; the fit falls
        // back to the uninset screen rect.
        assert_eq!(rect, Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn arrange_stores_rect_and_notifies() {
        use alloc::rc::Rc;
        use core::cell::Cell;

        let mut master = Master::new();
        master.screen_size = Size::new(100.0, 100.0);

        let seen = Rc::new(Cell::new(Rect::ZERO));
        let sink = seen.clone();
        master.observers.subscribe(move |r: &Rect| sink.set(*r));

        let rect = Rect::new(0.0, 0.0, 4.0, 4.0);
        master.arrange(rect);
        assert_eq!(master.plot_rect, Some(rect));
        assert_eq!(seen.get(), rect);
    }
}
