use crate::style::{
    model::{Direction, FlexDirection},
    spacing::Edges,
};

/// Physical axis: `Row` is the width, `Column` the height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    Row,
    Column,
}

impl Axis {
    pub(crate) const BOTH: [Axis; 2] = [Axis::Row, Axis::Column];
}

/// A physical axis plus the direction children flow along it.
///
/// Reversal only changes where placement starts; sizes are resolved the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FlowAxis {
    pub(crate) axis: Axis,
    pub(crate) reversed: bool,
}

impl FlowAxis {
    /// Left-to-right / top-to-bottom flow on `axis`.
    pub(crate) const fn physical(axis: Axis) -> Self {
        Self {
            axis,
            reversed: false,
        }
    }

    /// Main axis of a container. Right-to-left content flips the row directions.
    pub(crate) fn main(flex_direction: FlexDirection, direction: Direction) -> Self {
        let rtl = direction == Direction::Rtl;
        match flex_direction {
            FlexDirection::Row => Self {
                axis: Axis::Row,
                reversed: rtl,
            },
            FlexDirection::RowReverse => Self {
                axis: Axis::Row,
                reversed: !rtl,
            },
            FlexDirection::Column => Self::physical(Axis::Column),
            FlexDirection::ColumnReverse => Self {
                axis: Axis::Column,
                reversed: true,
            },
        }
    }

    /// Cross axis paired with `main`. Lines never stack in reverse, but a column
    /// container's rows follow the inline direction.
    pub(crate) fn cross_of(main: FlowAxis, direction: Direction) -> Self {
        match main.axis {
            Axis::Row => Self::physical(Axis::Column),
            Axis::Column => Self {
                axis: Axis::Row,
                reversed: direction == Direction::Rtl,
            },
        }
    }
}

impl Edges {
    /// Edge where flow along `flow` starts.
    pub(crate) fn leading(&self, flow: FlowAxis) -> f32 {
        match (flow.axis, flow.reversed) {
            (Axis::Row, false) => self.left,
            (Axis::Row, true) => self.right,
            (Axis::Column, false) => self.top,
            (Axis::Column, true) => self.bottom,
        }
    }

    /// Edge where flow along `flow` ends.
    pub(crate) fn trailing(&self, flow: FlowAxis) -> f32 {
        match (flow.axis, flow.reversed) {
            (Axis::Row, false) => self.right,
            (Axis::Row, true) => self.left,
            (Axis::Column, false) => self.bottom,
            (Axis::Column, true) => self.top,
        }
    }

    pub(crate) fn sum(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Row => self.left + self.right,
            Axis::Column => self.top + self.bottom,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/axis.rs"]
mod tests;
