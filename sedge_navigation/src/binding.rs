// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The cross-master viewport binding graph.
//!
//! Bindings are undirected per-axis edges between masters. Propagation
//! reaches the whole connected component of the changed master on each
//! axis, so transitively bound charts stay in lockstep no matter which one
//! the user navigates.

use alloc::vec::Vec;
use core::fmt;

use bitflags::bitflags;
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::group::MasterId;

bitflags! {
    /// Which viewport axes a binding couples.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct AxisFilter: u8 {
        /// Couple the horizontal (x) spans.
        const HORIZONTAL = 1 << 0;
        /// Couple the vertical (y) spans.
        const VERTICAL = 1 << 1;
    }
}

impl AxisFilter {
    /// Both axes.
    pub const BOTH: Self = Self::HORIZONTAL.union(Self::VERTICAL);
}

/// Errors from [`crate::PlotGroup::bind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindError {
    /// Both endpoints are the same master.
    SamePlot,
    /// An endpoint is not a live master in the group.
    UnknownPlot,
    /// The axis filter selects no axes.
    EmptyFilter,
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SamePlot => write!(f, "cannot bind a master to itself"),
            Self::UnknownPlot => write!(f, "binding endpoint is not a live master"),
            Self::EmptyFilter => write!(f, "axis filter selects no axes"),
        }
    }
}

impl core::error::Error for BindError {}

/// A value handle describing one binding, returned by
/// [`crate::PlotGroup::bind`] and consumed by [`crate::PlotGroup::unbind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BindingHandle {
    pub(crate) a: MasterId,
    pub(crate) b: MasterId,
    pub(crate) filter: AxisFilter,
}

impl BindingHandle {
    /// The two bound masters, in the order they were passed to `bind`.
    #[must_use]
    pub fn endpoints(&self) -> (MasterId, MasterId) {
        (self.a, self.b)
    }

    /// The axes this binding couples.
    #[must_use]
    pub fn filter(&self) -> AxisFilter {
        self.filter
    }
}

/// One axis's undirected edge set plus its cached reachability.
#[derive(Default)]
struct AxisGraph {
    /// Normalized edges (`a < b`). Small and scanned linearly; binding
    /// graphs have a handful of charts, not thousands.
    edges: Vec<(MasterId, MasterId)>,
    /// Connected component of each master, excluding the master itself.
    /// Rebuilt after every mutation.
    reach: HashMap<MasterId, SmallVec<[MasterId; 4]>>,
}

impl AxisGraph {
    fn insert(&mut self, a: MasterId, b: MasterId) -> bool {
        let edge = normalize(a, b);
        if self.edges.contains(&edge) {
            return false;
        }
        self.edges.push(edge);
        self.rebuild();
        true
    }

    fn remove(&mut self, a: MasterId, b: MasterId) -> bool {
        let edge = normalize(a, b);
        let before = self.edges.len();
        self.edges.retain(|e| *e != edge);
        if self.edges.len() == before {
            return false;
        }
        self.rebuild();
        true
    }

    fn remove_touching(&mut self, id: MasterId) {
        let before = self.edges.len();
        self.edges.retain(|(a, b)| *a != id && *b != id);
        if self.edges.len() != before {
            self.rebuild();
        }
    }

    fn reachable(&self, id: MasterId) -> &[MasterId] {
        self.reach.get(&id).map_or(&[], SmallVec::as_slice)
    }

    /// Breadth-first flood from every vertex. Quadratic in the worst case,
    /// which is fine at binding-graph scale.
    fn rebuild(&mut self) {
        self.reach.clear();
        let mut vertices: Vec<MasterId> = Vec::new();
        for &(a, b) in &self.edges {
            if !vertices.contains(&a) {
                vertices.push(a);
            }
            if !vertices.contains(&b) {
                vertices.push(b);
            }
        }
        for &start in &vertices {
            let mut component: SmallVec<[MasterId; 4]> = SmallVec::new();
            let mut queue: Vec<MasterId> = Vec::new();
            queue.push(start);
            let mut head = 0;
            while head < queue.len() {
                let current = queue[head];
                head += 1;
                for &(a, b) in &self.edges {
                    let neighbor = if a == current {
                        b
                    } else if b == current {
                        a
                    } else {
                        continue;
                    };
                    if neighbor != start
                        && !component.contains(&neighbor)
                    {
                        component.push(neighbor);
                        queue.push(neighbor);
                    }
                }
            }
            component.sort_unstable();
            self.reach.insert(start, component);
        }
    }
}

fn normalize(a: MasterId, b: MasterId) -> (MasterId, MasterId) {
    if b < a { (b, a) } else { (a, b) }
}

/// The per-axis binding graph of one [`crate::PlotGroup`].
#[derive(Default)]
pub(crate) struct BindingRegistry {
    horizontal: AxisGraph,
    vertical: AxisGraph,
}

impl BindingRegistry {
    /// Adds edges for `filter`'s axes. Validation of endpoints happens in
    /// the group, which knows which masters are live. Idempotent: rebinding
    /// an existing pair on the same axes changes nothing.
    pub(crate) fn bind(&mut self, a: MasterId, b: MasterId, filter: AxisFilter) -> BindingHandle {
        if filter.contains(AxisFilter::HORIZONTAL) {
            self.horizontal.insert(a, b);
        }
        if filter.contains(AxisFilter::VERTICAL) {
            self.vertical.insert(a, b);
        }
        BindingHandle { a, b, filter }
    }

    /// Removes the handle's edges. Idempotent; returns whether any edge was
    /// actually removed.
    pub(crate) fn unbind(&mut self, handle: &BindingHandle) -> bool {
        let mut removed = false;
        if handle.filter.contains(AxisFilter::HORIZONTAL) {
            removed |= self.horizontal.remove(handle.a, handle.b);
        }
        if handle.filter.contains(AxisFilter::VERTICAL) {
            removed |= self.vertical.remove(handle.a, handle.b);
        }
        removed
    }

    /// Drops every edge touching a removed master.
    pub(crate) fn remove_master(&mut self, id: MasterId) {
        self.horizontal.remove_touching(id);
        self.vertical.remove_touching(id);
    }

    /// Masters transitively bound to `id` on one axis, excluding `id`.
    /// Empty for unbound masters.
    pub(crate) fn reachable(&self, id: MasterId, axis: AxisFilter) -> &[MasterId] {
        if axis == AxisFilter::HORIZONTAL {
            self.horizontal.reachable(id)
        } else if axis == AxisFilter::VERTICAL {
            self.vertical.reachable(id)
        } else {
            &[]
        }
    }
}

impl fmt::Debug for BindingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingRegistry")
            .field("horizontal_edges", &self.horizontal.edges.len())
            .field("vertical_edges", &self.vertical.edges.len())
            .finish_non_exhaustive()
    }
}
