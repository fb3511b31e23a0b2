// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational-id arena for plot nodes.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Rect, Size};
use smallvec::SmallVec;

use crate::content::PlotContent;

/// Generational handle of a plot node.
///
/// Stale ids (for removed nodes, or nodes whose slot was reused) are
/// detected and treated as absent by every [`PlotTree`] query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlotId(pub(crate) u32, pub(crate) u32);

struct Node {
    parent: Option<PlotId>,
    children: SmallVec<[PlotId; 4]>,
    content: Box<dyn PlotContent>,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Errors from structural tree edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// [`PlotTree::insert_root`] was called on a tree that already has a root.
    RootAlreadySet,
    /// The parent id passed to [`PlotTree::insert_child`] is not a live node.
    UnknownParent,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootAlreadySet => write!(f, "plot tree already has a root node"),
            Self::UnknownParent => write!(f, "parent plot id is not a live node"),
        }
    }
}

impl core::error::Error for TreeError {}

/// A tree of plot nodes sharing one coordinate system.
///
/// The root is the *master* position: the node whose owner holds the shared
/// transform and navigation state. All structural queries flatten the tree
/// depth-first with children in insertion order, which is the order bounds
/// aggregation and rendering observe.
#[derive(Default)]
pub struct PlotTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: Option<PlotId>,
    live: usize,
}

impl PlotTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// The root node, if one has been inserted.
    #[must_use]
    pub fn root(&self) -> Option<PlotId> {
        self.root
    }

    /// Whether `id` refers to a live node.
    #[must_use]
    pub fn contains(&self, id: PlotId) -> bool {
        self.node(id).is_some()
    }

    /// Inserts the root node.
    pub fn insert_root(&mut self, content: Box<dyn PlotContent>) -> Result<PlotId, TreeError> {
        if self.root.is_some() {
            return Err(TreeError::RootAlreadySet);
        }
        let id = self.alloc(Node {
            parent: None,
            children: SmallVec::new(),
            content,
        });
        self.root = Some(id);
        Ok(id)
    }

    /// Inserts a node as the last child of `parent`.
    pub fn insert_child(
        &mut self,
        parent: PlotId,
        content: Box<dyn PlotContent>,
    ) -> Result<PlotId, TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::UnknownParent);
        }
        let id = self.alloc(Node {
            parent: Some(parent),
            children: SmallVec::new(),
            content,
        });
        if let Some(node) = self.node_mut(parent) {
            node.children.push(id);
        }
        Ok(id)
    }

    /// Removes `id` and its whole subtree, detaching it from its parent's
    /// child list. Returns `false` if `id` was not a live node.
    pub fn remove(&mut self, id: PlotId) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        if let Some(parent) = node.parent
            && let Some(parent_node) = self.node_mut(parent)
        {
            parent_node.children.retain(|c| *c != id);
        }
        if self.root == Some(id) {
            self.root = None;
        }

        // Free the subtree iteratively; children lists are already detached
        // from anything outside the subtree.
        let mut stack: Vec<PlotId> = Vec::new();
        stack.push(id);
        while let Some(current) = stack.pop() {
            let idx = current.0 as usize;
            let Some(slot) = self.slots.get_mut(idx) else {
                continue;
            };
            if slot.generation != current.1 {
                continue;
            }
            if let Some(node) = slot.node.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.0);
                self.live -= 1;
                stack.extend(node.children);
            }
        }
        true
    }

    /// The parent of `id`, if any.
    #[must_use]
    pub fn parent(&self, id: PlotId) -> Option<PlotId> {
        self.node(id)?.parent
    }

    /// The children of `id` in insertion order.
    #[must_use]
    pub fn children(&self, id: PlotId) -> &[PlotId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Borrows a node's content.
    #[must_use]
    pub fn content(&self, id: PlotId) -> Option<&dyn PlotContent> {
        self.node(id).map(|n| &*n.content)
    }

    /// Mutably borrows a node's content.
    #[must_use]
    pub fn content_mut(&mut self, id: PlotId) -> Option<&mut (dyn PlotContent + 'static)> {
        self.node_mut(id).map(|n| &mut *n.content)
    }

    /// Flattens the tree depth-first, children in insertion order.
    #[must_use]
    pub fn flatten(&self) -> Vec<PlotId> {
        let mut out = Vec::with_capacity(self.live);
        let Some(root) = self.root else {
            return out;
        };
        let mut stack: Vec<PlotId> = Vec::new();
        stack.push(root);
        while let Some(id) = stack.pop() {
            if let Some(node) = self.node(id) {
                out.push(id);
                // Reverse so the first child is visited first.
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Renders every node in depth-first order for the given viewport.
    ///
    /// `plot_rect` is in plot space, `screen_size` in screen pixels.
    pub fn render_all(&mut self, plot_rect: Rect, screen_size: Size) {
        for id in self.flatten() {
            if let Some(content) = self.content_mut(id) {
                content.render(plot_rect, screen_size);
            }
        }
    }

    fn alloc(&mut self, node: Node) -> PlotId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            PlotId(index, slot.generation)
        } else {
            let index = u32::try_from(self.slots.len()).expect("plot tree exceeded u32 capacity");
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            PlotId(index, 0)
        }
    }

    fn node(&self, id: PlotId) -> Option<&Node> {
        let slot = self.slots.get(id.0 as usize)?;
        if slot.generation != id.1 {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: PlotId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(id.0 as usize)?;
        if slot.generation != id.1 {
            return None;
        }
        slot.node.as_mut()
    }
}

impl fmt::Debug for PlotTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotTree")
            .field("len", &self.live)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use kurbo::{Rect, Size};

    use super::{PlotTree, TreeError};
    use crate::content::{Boundable, BoundsPass, Paddable, Renderable};

    #[derive(Debug)]
    struct Dummy;

    impl Boundable for Dummy {
        fn compute_local_bounds(&self, _pass: BoundsPass, _prior: Option<Rect>) -> Option<Rect> {
            None
        }
    }
    impl Paddable for Dummy {}
    impl Renderable for Dummy {
        fn render(&mut self, _plot_rect: Rect, _screen_size: Size) {}
    }

    #[test]
    fn single_root_only() {
        let mut tree = PlotTree::new();
        let root = tree.insert_root(Box::new(Dummy)).unwrap();
        assert_eq!(tree.root(), Some(root));
        assert_eq!(
            tree.insert_root(Box::new(Dummy)),
            Err(TreeError::RootAlreadySet)
        );
    }

    #[test]
    fn flatten_is_depth_first_in_insertion_order() {
        let mut tree = PlotTree::new();
        let root = tree.insert_root(Box::new(Dummy)).unwrap();
        let a = tree.insert_child(root, Box::new(Dummy)).unwrap();
        let b = tree.insert_child(root, Box::new(Dummy)).unwrap();
        let a1 = tree.insert_child(a, Box::new(Dummy)).unwrap();

        assert_eq!(tree.flatten(), alloc::vec![root, a, a1, b]);
    }

    #[test]
    fn remove_detaches_subtree() {
        let mut tree = PlotTree::new();
        let root = tree.insert_root(Box::new(Dummy)).unwrap();
        let a = tree.insert_child(root, Box::new(Dummy)).unwrap();
        let a1 = tree.insert_child(a, Box::new(Dummy)).unwrap();
        let b = tree.insert_child(root, Box::new(Dummy)).unwrap();

        assert!(tree.remove(a));
        assert!(!tree.contains(a));
        assert!(!tree.contains(a1));
        assert_eq!(tree.children(root), &[b]);
        assert_eq!(tree.len(), 2);

        // Removal is not repeatable for the same id.
        assert!(!tree.remove(a));
    }

    #[test]
    fn stale_ids_miss_after_slot_reuse() {
        let mut tree = PlotTree::new();
        let root = tree.insert_root(Box::new(Dummy)).unwrap();
        let a = tree.insert_child(root, Box::new(Dummy)).unwrap();
        assert!(tree.remove(a));
        let b = tree.insert_child(root, Box::new(Dummy)).unwrap();

        // The slot was reused but the generation moved on.
        assert_eq!(a.0, b.0);
        assert!(!tree.contains(a));
        assert!(tree.contains(b));
    }

    #[test]
    fn removing_root_empties_the_tree() {
        let mut tree = PlotTree::new();
        let root = tree.insert_root(Box::new(Dummy)).unwrap();
        tree.insert_child(root, Box::new(Dummy)).unwrap();
        assert!(tree.remove(root));
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);

        // A new root can be inserted afterwards.
        assert!(tree.insert_root(Box::new(Dummy)).is_ok());
    }
}
