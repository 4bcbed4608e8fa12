//! Arena-backed node tree: ownership, the dirty state machine and the acknowledge protocol.

pub(crate) mod node;
pub(crate) mod setters;

use crate::{
    foundation::{
        core::{CACHE_EPSILON, Size},
        error::{LayoutError, LayoutResult},
    },
    layout::{cache::CachedLayout, record::Layout},
    style::model::Style,
    tree::node::{LayoutState, NodeData, NodeId},
};

/// Tuning knobs for a [`LayoutTree`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutOpts {
    /// Tolerance used when comparing cache keys.
    pub cache_epsilon: f32,
    /// When `false`, every node is recomputed on every pass.
    pub use_cache: bool,
}

impl Default for LayoutOpts {
    fn default() -> Self {
        Self {
            cache_epsilon: CACHE_EPSILON,
            use_cache: true,
        }
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<NodeData>,
}

/// Owner of every node and the entry point for mutations and layout passes.
///
/// A parent exclusively owns its children: [`LayoutTree::remove_node`] frees a whole
/// subtree. Each node keeps a non-owning back-reference to its parent.
#[derive(Debug, Default)]
pub struct LayoutTree {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    opts: LayoutOpts,
}

impl LayoutTree {
    /// Empty tree with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty tree with explicit options.
    pub fn with_opts(opts: LayoutOpts) -> Self {
        Self {
            opts,
            ..Self::default()
        }
    }

    /// Options this tree was built with.
    pub fn opts(&self) -> LayoutOpts {
        self.opts
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Returns `true` if the tree holds no live node.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `id` addresses a live node of this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_ok()
    }

    /// Create a detached node with the default style. New nodes start dirty.
    pub fn new_node(&mut self) -> NodeId {
        self.alloc(NodeData::new())
    }

    /// Create a detached, content-sized node whose intrinsic size comes from `measure`.
    pub fn new_leaf_with_measure(
        &mut self,
        measure: impl FnMut(NodeId, f32) -> Size + 'static,
    ) -> NodeId {
        let mut data = NodeData::new();
        data.measure = Some(Box::new(measure));
        data.content_sized = true;
        self.alloc(data)
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(data);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(data),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> LayoutResult<&NodeData> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or_else(|| LayoutError::unknown_node(id.to_string()))
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> LayoutResult<&mut NodeData> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or_else(|| LayoutError::unknown_node(id.to_string()))
    }

    /// Insert `child` into `parent`'s child list at `index`.
    ///
    /// The child must be detached; the tree never reparents implicitly. `index` may equal
    /// the current child count (append). Marks `parent` and its ancestors dirty.
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> LayoutResult<()> {
        let child_data = self.get(child)?;
        if let Some(owner) = child_data.parent {
            return Err(LayoutError::child_already_parented(format!(
                "{child} is owned by {owner}"
            )));
        }
        let count = self.get(parent)?.children.len();
        if index > count {
            return Err(LayoutError::child_index_out_of_bounds(format!(
                "index {index} > child count {count} of {parent}"
            )));
        }
        if self.is_ancestor_or_self(child, parent)? {
            return Err(LayoutError::cycle(format!(
                "{child} is {parent} or one of its ancestors"
            )));
        }
        self.ensure_dirtiable(parent)?;

        self.get_mut(parent)?.children.insert(index, child);
        self.get_mut(child)?.parent = Some(parent);
        self.mark_dirty(parent)
    }

    /// Append `child` at the end of `parent`'s child list.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> LayoutResult<()> {
        let count = self.child_count(parent)?;
        self.insert_child(parent, child, count)
    }

    /// Detach and return the child at `index`. The child stays alive as a detached node.
    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> LayoutResult<NodeId> {
        let count = self.get(parent)?.children.len();
        if index >= count {
            return Err(LayoutError::child_index_out_of_bounds(format!(
                "index {index} >= child count {count} of {parent}"
            )));
        }
        self.ensure_dirtiable(parent)?;

        let child = self.get_mut(parent)?.children.remove(index);
        self.get_mut(child)?.parent = None;
        self.mark_dirty(parent)?;
        Ok(child)
    }

    /// Destroy `id` and its whole subtree, detaching it from its parent first.
    pub fn remove_node(&mut self, id: NodeId) -> LayoutResult<()> {
        if let Some(parent) = self.get(id)?.parent {
            let index = self
                .index_of(parent, id)?
                .ok_or_else(|| LayoutError::unknown_node(format!("{id} missing from {parent}")))?;
            self.remove_child_at(parent, index)?;
        }

        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let slot = &mut self.slots[next.index as usize];
            if let Some(data) = slot.node.take() {
                stack.extend(data.children.iter().copied());
                slot.generation = slot.generation.wrapping_add(1);
                self.free_list.push(next.index);
            }
        }
        Ok(())
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, of: NodeId) -> LayoutResult<bool> {
        let mut cursor = Some(of);
        while let Some(id) = cursor {
            if id == candidate {
                return Ok(true);
            }
            cursor = self.get(id)?.parent;
        }
        Ok(false)
    }

    /// Number of children of `id`.
    pub fn child_count(&self, id: NodeId) -> LayoutResult<usize> {
        Ok(self.get(id)?.children.len())
    }

    /// Child of `id` at `index`.
    pub fn child_at(&self, id: NodeId, index: usize) -> LayoutResult<NodeId> {
        let children = &self.get(id)?.children;
        children.get(index).copied().ok_or_else(|| {
            LayoutError::child_index_out_of_bounds(format!(
                "index {index} >= child count {} of {id}",
                children.len()
            ))
        })
    }

    /// Children of `id` in insertion order.
    pub fn children(&self, id: NodeId) -> LayoutResult<&[NodeId]> {
        Ok(&self.get(id)?.children)
    }

    /// Parent of `id`, if attached.
    pub fn parent(&self, id: NodeId) -> LayoutResult<Option<NodeId>> {
        Ok(self.get(id)?.parent)
    }

    /// Position of `child` in `parent`'s child list, or `None` if it is not a child.
    pub fn index_of(&self, parent: NodeId, child: NodeId) -> LayoutResult<Option<usize>> {
        Ok(self.get(parent)?.children.iter().position(|&c| c == child))
    }

    /// Declared style of `id`. Use the setters to change it.
    pub fn style(&self, id: NodeId) -> LayoutResult<&Style> {
        Ok(&self.get(id)?.style)
    }

    /// Resolved geometry of `id` from the last pass that reached it.
    pub fn layout(&self, id: NodeId) -> LayoutResult<Layout> {
        Ok(self.get(id)?.layout)
    }

    /// Flex line the node was placed on by its parent.
    pub fn line_index(&self, id: NodeId) -> LayoutResult<usize> {
        Ok(self.get(id)?.line_index)
    }

    /// Cache entry of the layout currently stored under `id`, if it has been laid out at
    /// least once.
    pub fn cached_layout(&self, id: NodeId) -> LayoutResult<Option<CachedLayout>> {
        Ok(self.get(id)?.cache.newest())
    }

    /// Current state-machine position of `id`.
    pub fn state(&self, id: NodeId) -> LayoutResult<LayoutState> {
        Ok(self.get(id)?.state)
    }

    /// Returns `true` if `id` needs recomputation.
    pub fn is_dirty(&self, id: NodeId) -> LayoutResult<bool> {
        Ok(self.get(id)?.is_dirty())
    }

    /// Returns `true` if a completed pass left a layout the host has not acknowledged.
    pub fn has_new_layout(&self, id: NodeId) -> LayoutResult<bool> {
        Ok(self.get(id)?.state == LayoutState::HasNewLayout)
    }

    /// Acknowledge that the host consumed the new layout of `id`.
    ///
    /// Fails with [`LayoutError::NoPendingLayout`] when there is nothing to acknowledge.
    pub fn mark_layout_seen(&mut self, id: NodeId) -> LayoutResult<()> {
        let node = self.get_mut(id)?;
        if node.state != LayoutState::HasNewLayout {
            return Err(LayoutError::no_pending_layout(format!(
                "{id} is {:?}",
                node.state
            )));
        }
        node.state = LayoutState::UpToDate;
        Ok(())
    }

    /// Check that dirtying `id` would not discard an unacknowledged layout.
    ///
    /// Walks towards the root and stops at the first node that is already dirty.
    pub(crate) fn ensure_dirtiable(&self, id: NodeId) -> LayoutResult<()> {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.get(current)?;
            match node.state {
                LayoutState::Dirty => return Ok(()),
                LayoutState::HasNewLayout => {
                    return Err(LayoutError::unseen_layout(format!(
                        "{current} holds a layout that was never marked seen"
                    )));
                }
                LayoutState::UpToDate => cursor = node.parent,
            }
        }
        Ok(())
    }

    /// Mark `id` and its ancestors dirty, stopping at the first already-dirty node.
    ///
    /// Callers run [`LayoutTree::ensure_dirtiable`] first.
    pub(crate) fn mark_dirty(&mut self, id: NodeId) -> LayoutResult<()> {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.get_mut(current)?;
            if node.is_dirty() {
                break;
            }
            node.state = LayoutState::Dirty;
            cursor = node.parent;
        }
        Ok(())
    }

    /// Indented text rendering of the geometry under `root`, one node per line.
    ///
    /// Depth is shown with `__` so the dump survives log sinks that strip whitespace.
    pub fn debug_tree(&self, root: NodeId) -> LayoutResult<String> {
        let mut out = String::new();
        self.write_debug(root, 0, &mut out)?;
        Ok(out)
    }

    fn write_debug(&self, id: NodeId, level: usize, out: &mut String) -> LayoutResult<()> {
        let node = self.get(id)?;
        let indent = "__".repeat(level);
        out.push_str(&indent);
        out.push_str(&node.layout.to_string());
        if node.children.is_empty() {
            return Ok(());
        }
        out.push_str(", children: [\n");
        for &child in &node.children {
            self.write_debug(child, level + 1, out)?;
            out.push('\n');
        }
        out.push_str(&indent);
        out.push(']');
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/mod.rs"]
mod tests;
