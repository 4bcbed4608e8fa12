use crate::{
    foundation::error::LayoutResult,
    style::model::Direction,
    tree::{LayoutTree, node::NodeId},
};

/// Computed geometry of a subtree, shaped like the scene that produced it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutDump {
    /// Horizontal offset in the parent's space.
    pub x: f32,
    /// Vertical offset in the parent's space.
    pub y: f32,
    /// Border-box width.
    pub width: f32,
    /// Border-box height.
    pub height: f32,
    /// Resolved direction.
    pub direction: Direction,
    /// Flex line the node sits on inside its parent.
    #[serde(default)]
    pub line: usize,
    /// Children in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LayoutDump>,
}

impl LayoutDump {
    /// Snapshot the current layout records under `root`.
    pub fn capture(tree: &LayoutTree, root: NodeId) -> LayoutResult<Self> {
        let layout = tree.layout(root)?;
        let children = tree
            .children(root)?
            .iter()
            .map(|&child| Self::capture(tree, child))
            .collect::<LayoutResult<Vec<_>>>()?;
        Ok(Self {
            x: layout.x,
            y: layout.y,
            width: layout.width,
            height: layout.height,
            direction: layout.direction,
            line: tree.line_index(root)?,
            children,
        })
    }

    /// Number of nodes in this dump.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/dump.rs"]
mod tests;
