// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The plot group: master ownership, layout, gestures, and propagation.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use kurbo::{Rect, Size};

use sedge_animation::{FrameScheduler, ViewAnimation};
use sedge_gestures::Gesture;
use sedge_plot_tree::PlotTree;

use crate::binding::{AxisFilter, BindError, BindingHandle, BindingRegistry};
use crate::controller::{panned_rect, zoomed_rect};
use crate::events::ObserverId;
use crate::master::{Master, MasterDebugInfo, ViewConstraint};
use crate::settings::NavigationSettings;

/// Handle of one master (one chart) within a [`PlotGroup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MasterId(u64);

impl MasterId {
    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// The masters transitively bound to one chart, per axis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoundPlots {
    /// Masters coupled on the horizontal axis.
    pub horizontal: Vec<MasterId>,
    /// Masters coupled on the vertical axis.
    pub vertical: Vec<MasterId>,
}

/// A group of charts sharing a binding graph and navigation settings.
///
/// The group owns every [`Master`]: its plot tree, transform, fit state,
/// animation strategy, and observers. All navigation goes through the group
/// so viewport changes can propagate across bindings without reentrancy;
/// propagated updates are applied with propagation suppressed, which is what
/// keeps binding cycles from echoing forever.
pub struct PlotGroup {
    masters: HashMap<MasterId, Master>,
    registry: BindingRegistry,
    settings: NavigationSettings,
    scheduler: Option<Box<dyn FrameScheduler>>,
    next_id: u64,
}

impl Default for PlotGroup {
    fn default() -> Self {
        Self::new(NavigationSettings::default())
    }
}

impl PlotGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new(settings: NavigationSettings) -> Self {
        Self {
            masters: HashMap::new(),
            registry: BindingRegistry::default(),
            settings,
            scheduler: None,
            next_id: 0,
        }
    }

    /// The group-wide settings.
    #[must_use]
    pub fn settings(&self) -> &NavigationSettings {
        &self.settings
    }

    /// Installs the host's frame scheduling hook, used to drive animations.
    pub fn set_frame_scheduler(&mut self, scheduler: Box<dyn FrameScheduler>) {
        self.scheduler = Some(scheduler);
    }

    // ---------------------------------------------------------------------
    // Master lifecycle
    // ---------------------------------------------------------------------

    /// Adds a new chart with an empty plot tree. Auto-fit starts enabled.
    pub fn create_master(&mut self) -> MasterId {
        let id = MasterId(self.next_id);
        self.next_id += 1;
        self.masters.insert(id, Master::new());
        id
    }

    /// Removes a chart, dropping every binding edge that touches it.
    /// Returns `false` if `id` was not a live master.
    pub fn remove_master(&mut self, id: MasterId) -> bool {
        if self.masters.remove(&id).is_none() {
            return false;
        }
        self.registry.remove_master(id);
        true
    }

    /// Whether `id` refers to a live master.
    #[must_use]
    pub fn contains(&self, id: MasterId) -> bool {
        self.masters.contains_key(&id)
    }

    /// Borrows a chart's plot tree.
    #[must_use]
    pub fn tree(&self, id: MasterId) -> Option<&PlotTree> {
        self.masters.get(&id).map(|m| &m.tree)
    }

    /// Mutably borrows a chart's plot tree.
    ///
    /// Structural edits do not relayout by themselves; call
    /// [`layout`](Self::layout) (or [`fit_to_view`](Self::fit_to_view))
    /// after editing content.
    #[must_use]
    pub fn tree_mut(&mut self, id: MasterId) -> Option<&mut PlotTree> {
        self.masters.get_mut(&id).map(|m| &mut m.tree)
    }

    // ---------------------------------------------------------------------
    // Layout
    // ---------------------------------------------------------------------

    /// Runs a layout pass for one chart at the given screen size.
    ///
    /// With auto-fit enabled (or a fit pending) the visible rect is
    /// recomputed from the tree's aggregated bounds and padding; otherwise
    /// the last navigated rect is kept. The host constraint, if set, runs
    /// whenever the screen size changed or a fit was explicitly requested.
    ///
    /// A degenerate (zero or negative) size parks the pass: state is kept
    /// and the chart lays out for real once a usable size arrives.
    pub fn layout(&mut self, id: MasterId, available: Size) {
        let rect;
        {
            let Some(master) = self.masters.get_mut(&id) else {
                return;
            };
            let size_changed = master.screen_size != available;
            master.screen_size = available;
            if !master.has_screen() {
                return;
            }

            let fit_requested =
                master.fit_pending || master.fit_x_pending || master.fit_y_pending;
            let full_fit =
                master.auto_fit || master.fit_pending || (master.fit_x_pending && master.fit_y_pending);

            let mut candidate = if full_fit {
                master.fitted_rect(&self.settings)
            } else if master.fit_x_pending || master.fit_y_pending {
                let fit = master.fitted_rect(&self.settings);
                let current = master.plot_rect.unwrap_or(fit);
                if master.fit_x_pending {
                    Rect::new(fit.x0, current.y0, fit.x1, current.y1)
                } else {
                    Rect::new(current.x0, fit.y0, current.x1, fit.y1)
                }
            } else {
                master
                    .plot_rect
                    .unwrap_or_else(|| master.fitted_rect(&self.settings))
            };
            master.fit_pending = false;
            master.fit_x_pending = false;
            master.fit_y_pending = false;

            if (size_changed || fit_requested)
                && let Some(constraint) = master.constraint.as_mut()
            {
                candidate = constraint(candidate, available);
            }
            rect = candidate;
        }
        self.apply_rect(id, rect, false);
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    /// Feeds one normalized gesture into a chart's navigation.
    ///
    /// Pan and zoom compose against the in-flight animation target when one
    /// exists, so repeated wheel notches accumulate instead of fighting the
    /// animation. Both disable auto-fit. A pin stops any in-flight
    /// animation at its current rect and changes nothing else.
    pub fn handle_gesture(&mut self, id: MasterId, gesture: &Gesture) {
        let target;
        {
            let Some(master) = self.masters.get_mut(&id) else {
                return;
            };
            if !master.has_screen() {
                return;
            }
            match gesture {
                Gesture::Pin { .. } => {
                    let frame = master.animation.as_mut().and_then(|a| a.stop());
                    if let Some(frame) = frame {
                        self.apply_rect(id, frame.plot_rect, false);
                    }
                    return;
                }
                Gesture::Pan { delta, .. } => {
                    target = panned_rect(master.reference_rect(), *delta, master.screen_size);
                }
                Gesture::Zoom {
                    origin,
                    scale_factor,
                    prevent_horizontal,
                    prevent_vertical,
                    ..
                } => {
                    target = zoomed_rect(
                        master.reference_rect(),
                        *origin,
                        *scale_factor,
                        master.screen_size,
                        *prevent_horizontal,
                        *prevent_vertical,
                        self.settings.min_plot_span,
                    );
                }
            }
        }
        self.request_view(id, target, true);
    }

    /// Navigates a chart to an explicit visible rect, disabling auto-fit.
    ///
    /// With `animate` set and an animation strategy installed the change is
    /// a transition; otherwise it applies immediately (cancelling any
    /// in-flight run without a terminal frame).
    pub fn set_visible_rect(&mut self, id: MasterId, rect: Rect, animate: bool) {
        self.request_view(id, rect, animate);
    }

    /// The plot-space rect a chart currently shows, if it has laid out.
    #[must_use]
    pub fn visible_rect(&self, id: MasterId) -> Option<Rect> {
        let master = self.masters.get(&id)?;
        if master.has_screen() {
            Some(master.transform.visible_plot_rect())
        } else {
            master.plot_rect
        }
    }

    /// Re-enables auto-fit and refits the chart to its content.
    pub fn fit_to_view(&mut self, id: MasterId) {
        if let Some(master) = self.masters.get_mut(&id) {
            master.auto_fit = true;
            master.fit_pending = true;
        }
        self.relayout(id);
    }

    /// One-shot horizontal refit; the vertical span and auto-fit state are
    /// left alone.
    pub fn fit_to_view_x(&mut self, id: MasterId) {
        if let Some(master) = self.masters.get_mut(&id) {
            master.fit_x_pending = true;
        }
        self.relayout(id);
    }

    /// One-shot vertical refit; the horizontal span and auto-fit state are
    /// left alone.
    pub fn fit_to_view_y(&mut self, id: MasterId) {
        if let Some(master) = self.masters.get_mut(&id) {
            master.fit_y_pending = true;
        }
        self.relayout(id);
    }

    /// Whether the chart refits to content on layout.
    #[must_use]
    pub fn is_auto_fit(&self, id: MasterId) -> bool {
        self.masters.get(&id).is_some_and(|m| m.auto_fit)
    }

    /// Turns auto-fit on or off. Enabling refits immediately.
    pub fn set_auto_fit(&mut self, id: MasterId, enabled: bool) {
        if enabled {
            self.fit_to_view(id);
        } else if let Some(master) = self.masters.get_mut(&id) {
            master.auto_fit = false;
        }
    }

    /// Locks (or unlocks) the width/height scale ratio of a chart.
    ///
    /// Takes effect on the next arrange; non-finite or non-positive values
    /// are treated as `None`.
    pub fn set_aspect_ratio(&mut self, id: MasterId, aspect_ratio: Option<f64>) {
        if let Some(master) = self.masters.get_mut(&id) {
            master.aspect_ratio = aspect_ratio.filter(|a| a.is_finite() && *a > 0.0);
        }
        self.relayout(id);
    }

    /// Installs a host constraint on a chart's visible rect.
    pub fn set_constraint(&mut self, id: MasterId, constraint: Option<ViewConstraint>) {
        if let Some(master) = self.masters.get_mut(&id) {
            master.constraint = constraint;
        }
    }

    /// Installs (or removes) a chart's animation strategy.
    pub fn set_animation(&mut self, id: MasterId, animation: Option<Box<dyn ViewAnimation>>) {
        if let Some(master) = self.masters.get_mut(&id) {
            master.animation = animation;
        }
    }

    /// Takes a diagnostic snapshot of one chart's navigation state.
    #[must_use]
    pub fn debug_info(&self, id: MasterId) -> Option<MasterDebugInfo> {
        self.masters.get(&id).map(Master::debug_info)
    }

    /// Whether a chart has an animated transition in flight.
    #[must_use]
    pub fn is_animating(&self, id: MasterId) -> bool {
        self.masters
            .get(&id)
            .and_then(|m| m.animation.as_ref())
            .is_some_and(|a| a.is_active())
    }

    // ---------------------------------------------------------------------
    // Animation driving
    // ---------------------------------------------------------------------

    /// Advances every in-flight animation by `dt` seconds, applying the
    /// emitted frames (which propagate across bindings like any other
    /// viewport change). Requests another host frame while anything is
    /// still active. Call this from the host's frame callback.
    pub fn advance_animations(&mut self, dt: f64) {
        let mut ids: Vec<MasterId> = self.masters.keys().copied().collect();
        ids.sort_unstable();

        let mut any_active = false;
        for id in ids {
            let frame = self
                .masters
                .get_mut(&id)
                .and_then(|m| m.animation.as_mut())
                .and_then(|a| a.tick(dt));
            if let Some(frame) = frame {
                self.apply_rect(id, frame.plot_rect, false);
            }
            if self.is_animating(id) {
                any_active = true;
            }
        }
        if any_active {
            self.request_frame();
        }
    }

    /// Feeds an external map provider's view-change notification into a
    /// chart's animation strategy, applying the resynchronization frame it
    /// produces (if any).
    pub fn notify_provider_view_changed(&mut self, id: MasterId, plot_rect: Rect, ended: bool) {
        let frame = self
            .masters
            .get_mut(&id)
            .and_then(|m| m.animation.as_mut())
            .and_then(|a| a.provider_view_changed(plot_rect, ended));
        if let Some(frame) = frame {
            self.apply_rect(id, frame.plot_rect, false);
        }
    }

    // ---------------------------------------------------------------------
    // Observers
    // ---------------------------------------------------------------------

    /// Subscribes to a chart's visible-rect changes. The observer runs
    /// synchronously on every arrange, animation frames included.
    pub fn subscribe_visible_rect(
        &mut self,
        id: MasterId,
        observer: impl FnMut(&Rect) + 'static,
    ) -> Option<ObserverId> {
        self.masters
            .get_mut(&id)
            .map(|m| m.observers.subscribe(observer))
    }

    /// Removes a visible-rect observer. Idempotent.
    pub fn unsubscribe_visible_rect(&mut self, id: MasterId, observer: ObserverId) -> bool {
        self.masters
            .get_mut(&id)
            .is_some_and(|m| m.observers.unsubscribe(observer))
    }

    // ---------------------------------------------------------------------
    // Binding
    // ---------------------------------------------------------------------

    /// Couples two charts' viewports on the filtered axes.
    ///
    /// Binding is undirected and transitive per axis. It does not move
    /// either viewport by itself; the charts align on the next navigation
    /// of any member. Rebinding an existing pair is idempotent.
    pub fn bind(
        &mut self,
        a: MasterId,
        b: MasterId,
        filter: AxisFilter,
    ) -> Result<BindingHandle, BindError> {
        if a == b {
            return Err(BindError::SamePlot);
        }
        if !self.contains(a) || !self.contains(b) {
            return Err(BindError::UnknownPlot);
        }
        if filter.is_empty() {
            return Err(BindError::EmptyFilter);
        }
        Ok(self.registry.bind(a, b, filter))
    }

    /// Removes a binding. Idempotent; returns whether any edge existed.
    pub fn unbind(&mut self, handle: &BindingHandle) -> bool {
        self.registry.unbind(handle)
    }

    /// Everything transitively bound to `id`, per axis (excluding `id`).
    #[must_use]
    pub fn bound_plots(&self, id: MasterId) -> BoundPlots {
        BoundPlots {
            horizontal: self.registry.reachable(id, AxisFilter::HORIZONTAL).to_vec(),
            vertical: self.registry.reachable(id, AxisFilter::VERTICAL).to_vec(),
        }
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn relayout(&mut self, id: MasterId) {
        let Some(size) = self
            .masters
            .get(&id)
            .filter(|m| m.has_screen())
            .map(|m| m.screen_size)
        else {
            return;
        };
        self.layout(id, size);
    }

    fn request_frame(&mut self) {
        if let Some(scheduler) = self.scheduler.as_mut() {
            scheduler.request_frame();
        }
    }

    /// Routes an explicit viewport change, animated when requested and a
    /// strategy is installed.
    fn request_view(&mut self, id: MasterId, target: Rect, animate: bool) {
        let mut animated = false;
        {
            let Some(master) = self.masters.get_mut(&id) else {
                return;
            };
            master.auto_fit = false;
            if animate && master.animation.is_some() {
                let current = master
                    .plot_rect
                    .unwrap_or_else(|| master.transform.visible_plot_rect());
                if let Some(animation) = master.animation.as_mut() {
                    animation.start(current, target);
                }
                animated = true;
            } else if let Some(animation) = master.animation.as_mut()
                && animation.is_active()
            {
                // Immediate changes supersede whatever was in flight.
                let _ = animation.stop();
            }
        }
        if animated {
            self.request_frame();
        } else {
            self.apply_rect(id, target, false);
        }
    }

    /// Arranges one master to `rect` and, unless suppressed, propagates the
    /// change across the binding graph. Propagated applications always
    /// suppress further propagation; combined with per-axis reachability
    /// being computed up front, that makes cycles safe.
    fn apply_rect(&mut self, id: MasterId, rect: Rect, suppress_propagation: bool) {
        {
            let Some(master) = self.masters.get_mut(&id) else {
                return;
            };
            if master.has_screen() {
                master.arrange(rect);
            } else {
                master.plot_rect = Some(rect);
            }
        }
        if !suppress_propagation {
            self.propagate(id, rect);
        }
    }

    /// Pushes `rect` from `source` to every transitively bound master.
    /// Masters bound on both axes take the whole rect; single-axis peers
    /// merge only that axis's span into their own rect. Receivers leave
    /// auto-fit mode; following a peer and refitting to content are
    /// mutually exclusive.
    fn propagate(&mut self, source: MasterId, rect: Rect) {
        let horizontal: Vec<MasterId> = self
            .registry
            .reachable(source, AxisFilter::HORIZONTAL)
            .to_vec();
        let vertical: Vec<MasterId> = self
            .registry
            .reachable(source, AxisFilter::VERTICAL)
            .to_vec();

        for &peer in &horizontal {
            let both = vertical.contains(&peer);
            let target = if both {
                rect
            } else {
                let current = self.peer_rect(peer);
                Rect::new(rect.x0, current.y0, rect.x1, current.y1)
            };
            self.apply_to_peer(peer, target);
        }
        for &peer in &vertical {
            if horizontal.contains(&peer) {
                continue;
            }
            let current = self.peer_rect(peer);
            let target = Rect::new(current.x0, rect.y0, current.x1, rect.y1);
            self.apply_to_peer(peer, target);
        }
    }

    fn peer_rect(&self, peer: MasterId) -> Rect {
        self.masters
            .get(&peer)
            .map_or(Rect::new(0.0, 0.0, 1.0, 1.0), Master::reference_rect)
    }

    fn apply_to_peer(&mut self, peer: MasterId, target: Rect) {
        {
            let Some(master) = self.masters.get_mut(&peer) else {
                return;
            };
            master.auto_fit = false;
            // A propagated rect overrides whatever transition the peer had.
            if let Some(animation) = master.animation.as_mut()
                && animation.is_active()
            {
                let _ = animation.stop();
            }
        }
        self.apply_rect(peer, target, true);
    }
}

impl fmt::Debug for PlotGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotGroup")
            .field("masters", &self.masters.len())
            .field("registry", &self.registry)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
