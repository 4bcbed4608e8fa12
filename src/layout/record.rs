use crate::{
    foundation::core::UNDEFINED,
    layout::axis::Axis,
    style::model::Direction,
};

/// Resolved geometry of one node.
///
/// `x`/`y` are the border-box origin in the parent's coordinate space (the root is placed
/// after its own margins). After a completed pass every field is finite.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Layout {
    /// Horizontal offset from the parent's border-box origin.
    pub x: f32,
    /// Vertical offset from the parent's border-box origin.
    pub y: f32,
    /// Border-box width.
    pub width: f32,
    /// Border-box height.
    pub height: f32,
    /// Direction the node's content was resolved with.
    pub direction: Direction,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: UNDEFINED,
            height: UNDEFINED,
            direction: Direction::Ltr,
        }
    }
}

impl Layout {
    /// Clear the record before a parent lays this node out again.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn dim(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Row => self.width,
            Axis::Column => self.height,
        }
    }

    pub(crate) fn set_dim(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Row => self.width = value,
            Axis::Column => self.height = value,
        }
    }

    pub(crate) fn pos(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Row => self.x,
            Axis::Column => self.y,
        }
    }

    pub(crate) fn set_pos(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Row => self.x = value,
            Axis::Column => self.y = value,
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{x: {}, y: {}, width: {}, height: {}}}",
            self.x, self.y, self.width, self.height
        )
    }
}
