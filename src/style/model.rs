use crate::{
    foundation::core::{UNDEFINED, is_undefined},
    layout::axis::Axis,
    style::spacing::Spacing,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Inline direction of a node's content.
pub enum Direction {
    /// Use the parent's resolved direction (left-to-right at the root).
    #[default]
    Inherit,
    /// Left-to-right.
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl Direction {
    /// Resolve `Inherit` against the parent's resolved direction.
    pub(crate) fn resolve(self, parent: Direction) -> Direction {
        match self {
            Direction::Inherit => match parent {
                Direction::Inherit => Direction::Ltr,
                resolved => resolved,
            },
            resolved => resolved,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Main axis and flow direction of a container.
pub enum FlexDirection {
    /// Children flow along the width, start to end.
    Row,
    /// Children flow along the width, end to start.
    RowReverse,
    /// Children flow along the height, top to bottom.
    #[default]
    Column,
    /// Children flow along the height, bottom to top.
    ColumnReverse,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Distribution of leftover main-axis space between flow children.
pub enum Justify {
    /// Pack children at the start of the line.
    #[default]
    FlexStart,
    /// Center children within the line.
    Center,
    /// Pack children at the end of the line.
    FlexEnd,
    /// Equal gaps between children, none at the edges.
    SpaceBetween,
    /// Equal gaps around children, half-size at the edges.
    SpaceAround,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Cross-axis alignment of a child within its line.
pub enum Align {
    /// Defer to the parent's `align-items` (only meaningful for `align-self`).
    #[default]
    Auto,
    /// Align to the cross-axis start of the line.
    FlexStart,
    /// Center within the line.
    Center,
    /// Align to the cross-axis end of the line.
    FlexEnd,
    /// Fill the line's cross extent when the child has no cross size of its own.
    Stretch,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Whether a node takes part in its parent's flow.
pub enum PositionType {
    /// In flow, optionally nudged by its offsets.
    #[default]
    Relative,
    /// Out of flow, placed from its offsets inside the parent's content box.
    Absolute,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Line breaking of flow children.
pub enum FlexWrap {
    /// Everything on one line, overflow allowed.
    #[default]
    NoWrap,
    /// Start a new line when the next child would overflow the main axis.
    Wrap,
}

/// Declared constraints of one node.
///
/// Every `f32` field may hold [`UNDEFINED`], meaning "unconstrained". Styles are only
/// mutated through the [`crate::LayoutTree`] setters so changes mark nodes dirty.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Inline direction.
    pub direction: Direction,
    /// Main axis of this container.
    pub flex_direction: FlexDirection,
    /// Main-axis distribution of leftover space.
    pub justify_content: Justify,
    /// Default cross-axis alignment of children.
    pub align_items: Align,
    /// Per-node override of the parent's `align_items`.
    pub align_self: Align,
    /// Flow participation.
    pub position_type: PositionType,
    /// Line breaking.
    pub flex_wrap: FlexWrap,
    /// Flex factor; a positive value makes the node share leftover main-axis space.
    pub flex: f32,
    /// Outer spacing.
    pub margin: Spacing,
    /// Inner spacing.
    pub padding: Spacing,
    /// Border widths.
    pub border: Spacing,
    /// Top offset.
    pub top: f32,
    /// Bottom offset.
    pub bottom: f32,
    /// Left offset.
    pub left: f32,
    /// Right offset.
    pub right: f32,
    /// Border-box width.
    pub width: f32,
    /// Border-box height.
    pub height: f32,
    /// Lower width bound.
    pub min_width: f32,
    /// Lower height bound.
    pub min_height: f32,
    /// Upper width bound.
    pub max_width: f32,
    /// Upper height bound.
    pub max_height: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            direction: Direction::Inherit,
            flex_direction: FlexDirection::Column,
            justify_content: Justify::FlexStart,
            align_items: Align::Stretch,
            align_self: Align::Auto,
            position_type: PositionType::Relative,
            flex_wrap: FlexWrap::NoWrap,
            flex: 0.0,
            margin: Spacing::default(),
            padding: Spacing::default(),
            border: Spacing::default(),
            top: UNDEFINED,
            bottom: UNDEFINED,
            left: UNDEFINED,
            right: UNDEFINED,
            width: UNDEFINED,
            height: UNDEFINED,
            min_width: UNDEFINED,
            min_height: UNDEFINED,
            max_width: UNDEFINED,
            max_height: UNDEFINED,
        }
    }
}

impl Style {
    pub(crate) fn dimension(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Row => self.width,
            Axis::Column => self.height,
        }
    }

    /// A usable declared size: defined and non-negative.
    pub(crate) fn is_dim_defined(&self, axis: Axis) -> bool {
        let v = self.dimension(axis);
        !is_undefined(v) && v >= 0.0
    }

    /// Clamp `value` into the node's `[min, max]` range on `axis`.
    ///
    /// Undefined or negative bounds are ignored. The minimum is applied last, so it wins
    /// when `min > max`. An undefined `value` stays undefined.
    pub(crate) fn bound(&self, axis: Axis, value: f32) -> f32 {
        let (min, max) = match axis {
            Axis::Row => (self.min_width, self.max_width),
            Axis::Column => (self.min_height, self.max_height),
        };
        let mut v = value;
        if !is_undefined(max) && max >= 0.0 && v > max {
            v = max;
        }
        if !is_undefined(min) && min >= 0.0 && v < min {
            v = min;
        }
        v
    }

    /// Physical (leading, trailing) offsets on `axis`: (left, right) or (top, bottom).
    pub(crate) fn offsets(&self, axis: Axis) -> (f32, f32) {
        match axis {
            Axis::Row => (self.left, self.right),
            Axis::Column => (self.top, self.bottom),
        }
    }

    /// Shift applied to a relatively positioned node on `axis`.
    pub(crate) fn relative_offset(&self, axis: Axis) -> f32 {
        let (leading, trailing) = self.offsets(axis);
        if !is_undefined(leading) {
            leading
        } else if !is_undefined(trailing) {
            -trailing
        } else {
            0.0
        }
    }

    pub(crate) fn is_flex(&self) -> bool {
        self.position_type == PositionType::Relative && self.flex > 0.0
    }

    pub(crate) fn is_absolute(&self) -> bool {
        self.position_type == PositionType::Absolute
    }

    /// Effective cross-axis alignment of this node inside `parent`.
    pub(crate) fn align_in(&self, parent: &Style) -> Align {
        match self.align_self {
            Align::Auto => parent.align_items,
            own => own,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/model.rs"]
mod tests;
