//! JSON scene descriptions: load, validate, build into a [`LayoutTree`], dump the result.

pub(crate) mod dump;

use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::Size,
        error::{LayoutError, LayoutResult},
    },
    style::{
        model::{Align, Direction, FlexDirection, FlexWrap, Justify, PositionType},
        spacing::Edge,
    },
    tree::{LayoutTree, node::NodeId},
};

/// A whole scene file: one root node.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    /// Root of the node tree.
    pub root: SceneNode,
}

/// One node of a scene.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneNode {
    /// Declared style; absent fields keep their defaults.
    #[serde(default)]
    pub style: StyleSpec,
    /// Fixed intrinsic size reported by the node's measurement callback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure: Option<Size>,
    /// Flag the node as content-sized even without a `measure`.
    #[serde(default)]
    pub content_sized: bool,
    /// Children in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SceneNode>,
}

/// Serialized form of a style. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
#[allow(missing_docs)]
pub struct StyleSpec {
    pub direction: Option<Direction>,
    pub flex_direction: Option<FlexDirection>,
    pub justify_content: Option<Justify>,
    pub align_items: Option<Align>,
    pub align_self: Option<Align>,
    pub position_type: Option<PositionType>,
    pub flex_wrap: Option<FlexWrap>,
    pub flex: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub min_width: Option<f32>,
    pub min_height: Option<f32>,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
    pub top: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
    pub right: Option<f32>,
    pub margin: Option<SpacingSpec>,
    pub padding: Option<SpacingSpec>,
    pub border: Option<SpacingSpec>,
    pub default_margin: Option<SpacingSpec>,
    pub default_padding: Option<SpacingSpec>,
    pub default_border: Option<SpacingSpec>,
}

/// Serialized spacing slots. Absent slots stay unset.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
#[allow(missing_docs)]
pub struct SpacingSpec {
    pub left: Option<f32>,
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub vertical: Option<f32>,
    pub horizontal: Option<f32>,
    pub start: Option<f32>,
    pub end: Option<f32>,
    pub all: Option<f32>,
}

impl SpacingSpec {
    /// The slots that carry a value, in storage order.
    pub fn entries(&self) -> impl Iterator<Item = (Edge, f32)> + '_ {
        let values = [
            self.left,
            self.top,
            self.right,
            self.bottom,
            self.vertical,
            self.horizontal,
            self.start,
            self.end,
            self.all,
        ];
        Edge::SLOTS
            .into_iter()
            .zip(values)
            .filter_map(|(edge, value)| value.map(|v| (edge, v)))
    }
}

impl Scene {
    /// Parse a scene from any JSON reader.
    pub fn from_reader(reader: impl std::io::Read) -> LayoutResult<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| LayoutError::scene(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file.
    ///
    /// IO failures surface as [`LayoutError::Other`]; malformed JSON as
    /// [`LayoutError::Scene`].
    pub fn from_path(path: impl AsRef<Path>) -> LayoutResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("open scene '{}'", path.display()))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a scene from a JSON string.
    pub fn from_json_str(json: &str) -> LayoutResult<Self> {
        serde_json::from_str(json).map_err(|e| LayoutError::scene(format!("parse scene JSON: {e}")))
    }

    /// Reject values no layout can make sense of.
    pub fn validate(&self) -> LayoutResult<()> {
        validate_node(&self.root, "root")
    }

    /// Create the scene's nodes in `tree` and return the root id.
    ///
    /// Every value goes through the public setters, so the new nodes are dirty and ready
    /// for [`LayoutTree::calculate_layout`].
    pub fn build(&self, tree: &mut LayoutTree) -> LayoutResult<NodeId> {
        build_node(&self.root, tree)
    }
}

fn validate_node(node: &SceneNode, path: &str) -> LayoutResult<()> {
    let style = &node.style;
    let sizes = [
        ("width", style.width),
        ("height", style.height),
        ("min_width", style.min_width),
        ("min_height", style.min_height),
        ("max_width", style.max_width),
        ("max_height", style.max_height),
        ("flex", style.flex),
    ];
    for (name, value) in sizes {
        if let Some(v) = value
            && (!v.is_finite() || v < 0.0)
        {
            return Err(LayoutError::scene(format!(
                "{path}: {name} must be finite and >= 0, got {v}"
            )));
        }
    }

    let spacings = [
        ("margin", &style.margin),
        ("padding", &style.padding),
        ("border", &style.border),
        ("default_margin", &style.default_margin),
        ("default_padding", &style.default_padding),
        ("default_border", &style.default_border),
    ];
    for (name, spec) in spacings {
        let Some(spec) = spec else { continue };
        for (edge, v) in spec.entries() {
            if !v.is_finite() {
                return Err(LayoutError::scene(format!(
                    "{path}: {name} {edge:?} must be finite, got {v}"
                )));
            }
        }
    }

    if let Some(size) = node.measure
        && (!size.is_finite() || size.width < 0.0 || size.height < 0.0)
    {
        return Err(LayoutError::scene(format!(
            "{path}: measure must be finite and >= 0, got {}x{}",
            size.width, size.height
        )));
    }
    if node.content_sized
        && node.measure.is_none()
        && (style.width.is_none() || style.height.is_none())
    {
        return Err(LayoutError::scene(format!(
            "{path}: content_sized node needs a measure or both width and height"
        )));
    }

    for (i, child) in node.children.iter().enumerate() {
        validate_node(child, &format!("{path}.children[{i}]"))?;
    }
    Ok(())
}

fn build_node(node: &SceneNode, tree: &mut LayoutTree) -> LayoutResult<NodeId> {
    let id = match node.measure {
        Some(size) => tree.new_leaf_with_measure(move |_, _| size),
        None => tree.new_node(),
    };
    if node.content_sized {
        tree.set_content_sized(id, true)?;
    }
    apply_style(tree, id, &node.style)?;

    for child in &node.children {
        let child_id = build_node(child, tree)?;
        tree.append_child(id, child_id)?;
    }
    Ok(id)
}

fn apply_style(tree: &mut LayoutTree, id: NodeId, style: &StyleSpec) -> LayoutResult<()> {
    if let Some(v) = style.direction {
        tree.set_direction(id, v)?;
    }
    if let Some(v) = style.flex_direction {
        tree.set_flex_direction(id, v)?;
    }
    if let Some(v) = style.justify_content {
        tree.set_justify_content(id, v)?;
    }
    if let Some(v) = style.align_items {
        tree.set_align_items(id, v)?;
    }
    if let Some(v) = style.align_self {
        tree.set_align_self(id, v)?;
    }
    if let Some(v) = style.position_type {
        tree.set_position_type(id, v)?;
    }
    if let Some(v) = style.flex_wrap {
        tree.set_flex_wrap(id, v)?;
    }

    type FloatSetter = fn(&mut LayoutTree, NodeId, f32) -> LayoutResult<bool>;
    let floats: [(Option<f32>, FloatSetter); 11] = [
        (style.flex, LayoutTree::set_flex),
        (style.width, LayoutTree::set_width),
        (style.height, LayoutTree::set_height),
        (style.min_width, LayoutTree::set_min_width),
        (style.min_height, LayoutTree::set_min_height),
        (style.max_width, LayoutTree::set_max_width),
        (style.max_height, LayoutTree::set_max_height),
        (style.top, LayoutTree::set_position_top),
        (style.bottom, LayoutTree::set_position_bottom),
        (style.left, LayoutTree::set_position_left),
        (style.right, LayoutTree::set_position_right),
    ];
    for (value, setter) in floats {
        if let Some(v) = value {
            setter(tree, id, v)?;
        }
    }

    type SpacingSetter = fn(&mut LayoutTree, NodeId, Edge, f32) -> LayoutResult<bool>;
    let spacings: [(&Option<SpacingSpec>, SpacingSetter); 6] = [
        (&style.margin, LayoutTree::set_margin),
        (&style.padding, LayoutTree::set_padding),
        (&style.border, LayoutTree::set_border),
        (&style.default_margin, LayoutTree::set_default_margin),
        (&style.default_padding, LayoutTree::set_default_padding),
        (&style.default_border, LayoutTree::set_default_border),
    ];
    for (spec, setter) in spacings {
        let Some(spec) = spec else { continue };
        for (edge, v) in spec.entries() {
            setter(tree, id, edge, v)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/mod.rs"]
mod tests;
