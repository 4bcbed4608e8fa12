use smallvec::SmallVec;

use crate::{
    foundation::core::Size,
    layout::{cache::LayoutCache, record::Layout},
    style::model::Style,
};

/// Intrinsic-size callback: `(node, available_width) -> size`.
///
/// `available_width` may be [`crate::UNDEFINED`] (unbounded). The returned size must be
/// finite. Callbacks are invoked synchronously from inside a layout pass, at most one at a
/// time, and cannot reach back into the tree while it is being laid out.
pub type MeasureFunc = Box<dyn FnMut(NodeId, f32) -> Size>;

/// Handle to a node in a [`crate::LayoutTree`].
///
/// Ids carry a generation so a handle to a destroyed node is rejected instead of silently
/// addressing whatever reuses its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Freshness of a node's layout record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutState {
    /// Some input of this node or a descendant changed; the record is stale.
    #[default]
    Dirty,
    /// A completed pass produced a record the host has not acknowledged yet.
    HasNewLayout,
    /// The record is current and has been acknowledged (or was never pending).
    UpToDate,
}

pub(crate) struct NodeData {
    pub(crate) style: Style,
    pub(crate) layout: Layout,
    pub(crate) cache: LayoutCache,
    pub(crate) state: LayoutState,
    // 4 covers the typical container without spilling to the heap.
    pub(crate) children: SmallVec<[NodeId; 4]>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) measure: Option<MeasureFunc>,
    pub(crate) content_sized: bool,
    pub(crate) line_index: usize,
}

impl NodeData {
    pub(crate) fn new() -> Self {
        Self {
            style: Style::default(),
            layout: Layout::default(),
            cache: LayoutCache::default(),
            state: LayoutState::Dirty,
            children: SmallVec::new(),
            parent: None,
            measure: None,
            content_sized: false,
            line_index: 0,
        }
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.state == LayoutState::Dirty
    }
}

impl std::fmt::Debug for NodeData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeData")
            .field("state", &self.state)
            .field("layout", &self.layout)
            .field("children", &self.children.len())
            .field("parent", &self.parent)
            .field("measure", &self.measure.is_some())
            .field("line_index", &self.line_index)
            .finish_non_exhaustive()
    }
}
