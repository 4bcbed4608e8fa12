use crate::{
    foundation::core::{UNDEFINED, floats_equal, is_undefined},
    style::model::Direction,
};

/// One of the nine raw spacing slots of a margin, padding or border record.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Edge {
    /// Left edge.
    Left,
    /// Top edge.
    Top,
    /// Right edge.
    Right,
    /// Bottom edge.
    Bottom,
    /// Top and bottom together.
    Vertical,
    /// Left and right together.
    Horizontal,
    /// Left in left-to-right content, right in right-to-left content.
    Start,
    /// Right in left-to-right content, left in right-to-left content.
    End,
    /// Every edge.
    All,
}

impl Edge {
    /// All slots in storage order.
    pub const SLOTS: [Edge; 9] = [
        Edge::Left,
        Edge::Top,
        Edge::Right,
        Edge::Bottom,
        Edge::Vertical,
        Edge::Horizontal,
        Edge::Start,
        Edge::End,
        Edge::All,
    ];

    const fn index(self) -> usize {
        match self {
            Edge::Left => 0,
            Edge::Top => 1,
            Edge::Right => 2,
            Edge::Bottom => 3,
            Edge::Vertical => 4,
            Edge::Horizontal => 5,
            Edge::Start => 6,
            Edge::End => 7,
            Edge::All => 8,
        }
    }

    /// Slot consulted after the exact slot, before [`Edge::All`].
    const fn axis_alias(self) -> Option<Edge> {
        match self {
            Edge::Top | Edge::Bottom => Some(Edge::Vertical),
            Edge::Left | Edge::Right => Some(Edge::Horizontal),
            _ => None,
        }
    }

    /// Start and end never fall back to axis or "all" values: they only ever override the
    /// physical edge they map onto.
    const fn is_relative(self) -> bool {
        matches!(self, Edge::Start | Edge::End)
    }
}

/// Raw per-slot spacing values plus a per-slot default overlay.
///
/// Resolution for [`Spacing::get`], most specific first: the exact slot, the matching axis
/// slot (vertical for top/bottom, horizontal for left/right), [`Edge::All`], the default
/// overlay, then `0` ([`UNDEFINED`] for start/end).
#[derive(Clone, Debug, PartialEq)]
pub struct Spacing {
    values: [f32; 9],
    defaults: [f32; 9],
}

impl Default for Spacing {
    fn default() -> Self {
        let mut defaults = [0.0; 9];
        defaults[Edge::Start.index()] = UNDEFINED;
        defaults[Edge::End.index()] = UNDEFINED;
        Self {
            values: [UNDEFINED; 9],
            defaults,
        }
    }
}

impl Spacing {
    /// Record a raw value. Returns `true` if it differs from the previous raw value.
    ///
    /// Writing [`UNDEFINED`] clears the slot.
    pub fn set(&mut self, edge: Edge, value: f32) -> bool {
        let slot = &mut self.values[edge.index()];
        if floats_equal(*slot, value) {
            return false;
        }
        *slot = value;
        true
    }

    /// Seed the default overlay for one slot. Returns `true` on change.
    pub fn set_default(&mut self, edge: Edge, value: f32) -> bool {
        let slot = &mut self.defaults[edge.index()];
        if floats_equal(*slot, value) {
            return false;
        }
        *slot = value;
        true
    }

    /// Resolved value for `edge`.
    pub fn get(&self, edge: Edge) -> f32 {
        let raw = self.values[edge.index()];
        if !is_undefined(raw) {
            return raw;
        }
        if !edge.is_relative() {
            if let Some(alias) = edge.axis_alias() {
                let v = self.values[alias.index()];
                if !is_undefined(v) {
                    return v;
                }
            }
            let all = self.values[Edge::All.index()];
            if !is_undefined(all) {
                return all;
            }
        }
        self.defaults[edge.index()]
    }

    /// The value stored for `edge`, without any precedence resolution.
    pub fn get_raw(&self, edge: Edge) -> f32 {
        self.values[edge.index()]
    }

    /// Resolve the four physical edges for content flowing in `direction`.
    ///
    /// Start/end take priority over left/right when defined.
    pub(crate) fn resolve(&self, direction: Direction) -> Edges {
        let (left_rel, right_rel) = match direction {
            Direction::Rtl => (Edge::End, Edge::Start),
            _ => (Edge::Start, Edge::End),
        };
        let pick = |relative: Edge, physical: Edge| {
            let v = self.get(relative);
            if is_undefined(v) { self.get(physical) } else { v }
        };
        Edges {
            left: pick(left_rel, Edge::Left),
            top: self.get(Edge::Top),
            right: pick(right_rel, Edge::Right),
            bottom: self.get(Edge::Bottom),
        }
    }
}

/// Resolved physical edge values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Edges {
    pub(crate) left: f32,
    pub(crate) top: f32,
    pub(crate) right: f32,
    pub(crate) bottom: f32,
}

impl Edges {
    pub(crate) fn add(self, other: Edges) -> Edges {
        Edges {
            left: self.left + other.left,
            top: self.top + other.top,
            right: self.right + other.right,
            bottom: self.bottom + other.bottom,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/spacing.rs"]
mod tests;
