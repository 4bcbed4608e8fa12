use crate::{
    foundation::{
        core::{Size, floats_equal},
        error::LayoutResult,
    },
    style::{
        model::{Align, Direction, FlexDirection, FlexWrap, Justify, PositionType, Style},
        spacing::{Edge, Spacing},
    },
    tree::{
        LayoutTree,
        node::{MeasureFunc, NodeId},
    },
};

/// Change detection for style values: exact, with two undefined floats comparing equal.
pub(crate) trait StyleValue: Copy {
    fn same_as(self, other: Self) -> bool;
}

impl StyleValue for f32 {
    fn same_as(self, other: Self) -> bool {
        floats_equal(self, other)
    }
}

macro_rules! enum_style_value {
    ($($ty:ty),* $(,)?) => {
        $(impl StyleValue for $ty {
            fn same_as(self, other: Self) -> bool {
                self == other
            }
        })*
    };
}

enum_style_value!(Direction, FlexDirection, Justify, Align, PositionType, FlexWrap);

macro_rules! style_setters {
    ($($(#[$doc:meta])* $name:ident => $field:ident: $ty:ty;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&mut self, id: NodeId, value: $ty) -> LayoutResult<bool> {
                self.update_style(id, |s| &mut s.$field, value)
            }
        )*
    };
}

/// Which spacing record a spacing setter writes.
#[derive(Clone, Copy)]
enum SpacingKind {
    Margin,
    Padding,
    Border,
}

impl SpacingKind {
    fn record(self, style: &mut Style) -> &mut Spacing {
        match self {
            SpacingKind::Margin => &mut style.margin,
            SpacingKind::Padding => &mut style.padding,
            SpacingKind::Border => &mut style.border,
        }
    }
}

impl LayoutTree {
    /// Compare, assign if changed, dirty if changed.
    ///
    /// Returns whether the value changed. The unacknowledged-layout check runs before the
    /// write, so a rejected call leaves the style untouched.
    fn update_style<T: StyleValue>(
        &mut self,
        id: NodeId,
        field: impl Fn(&mut Style) -> &mut T,
        value: T,
    ) -> LayoutResult<bool> {
        let current = *field(&mut self.get_mut(id)?.style);
        if current.same_as(value) {
            return Ok(false);
        }
        self.ensure_dirtiable(id)?;
        *field(&mut self.get_mut(id)?.style) = value;
        self.mark_dirty(id)?;
        Ok(true)
    }

    fn update_spacing(
        &mut self,
        id: NodeId,
        kind: SpacingKind,
        write: impl Fn(&mut Spacing) -> bool,
    ) -> LayoutResult<bool> {
        let mut next = kind.record(&mut self.get_mut(id)?.style).clone();
        if !write(&mut next) {
            return Ok(false);
        }
        self.ensure_dirtiable(id)?;
        *kind.record(&mut self.get_mut(id)?.style) = next;
        self.mark_dirty(id)?;
        Ok(true)
    }

    style_setters! {
        /// Set the inline direction.
        set_direction => direction: Direction;
        /// Set the main axis.
        set_flex_direction => flex_direction: FlexDirection;
        /// Set main-axis distribution.
        set_justify_content => justify_content: Justify;
        /// Set the default cross-axis alignment of children.
        set_align_items => align_items: Align;
        /// Override the parent's `align_items` for this node.
        set_align_self => align_self: Align;
        /// Set flow participation.
        set_position_type => position_type: PositionType;
        /// Set line breaking.
        set_flex_wrap => flex_wrap: FlexWrap;
        /// Set the flex factor.
        set_flex => flex: f32;
        /// Set the declared width.
        set_width => width: f32;
        /// Set the declared height.
        set_height => height: f32;
        /// Set the minimum width.
        set_min_width => min_width: f32;
        /// Set the minimum height.
        set_min_height => min_height: f32;
        /// Set the maximum width.
        set_max_width => max_width: f32;
        /// Set the maximum height.
        set_max_height => max_height: f32;
        /// Set the top offset.
        set_position_top => top: f32;
        /// Set the bottom offset.
        set_position_bottom => bottom: f32;
        /// Set the left offset.
        set_position_left => left: f32;
        /// Set the right offset.
        set_position_right => right: f32;
    }

    /// Set one margin slot.
    pub fn set_margin(&mut self, id: NodeId, edge: Edge, value: f32) -> LayoutResult<bool> {
        self.update_spacing(id, SpacingKind::Margin, |s| s.set(edge, value))
    }

    /// Set one padding slot.
    pub fn set_padding(&mut self, id: NodeId, edge: Edge, value: f32) -> LayoutResult<bool> {
        self.update_spacing(id, SpacingKind::Padding, |s| s.set(edge, value))
    }

    /// Set one border slot.
    pub fn set_border(&mut self, id: NodeId, edge: Edge, value: f32) -> LayoutResult<bool> {
        self.update_spacing(id, SpacingKind::Border, |s| s.set(edge, value))
    }

    /// Seed the margin default for one slot.
    pub fn set_default_margin(&mut self, id: NodeId, edge: Edge, value: f32) -> LayoutResult<bool> {
        self.update_spacing(id, SpacingKind::Margin, |s| s.set_default(edge, value))
    }

    /// Seed the padding default for one slot.
    pub fn set_default_padding(
        &mut self,
        id: NodeId,
        edge: Edge,
        value: f32,
    ) -> LayoutResult<bool> {
        self.update_spacing(id, SpacingKind::Padding, |s| s.set_default(edge, value))
    }

    /// Seed the border default for one slot.
    pub fn set_default_border(&mut self, id: NodeId, edge: Edge, value: f32) -> LayoutResult<bool> {
        self.update_spacing(id, SpacingKind::Border, |s| s.set_default(edge, value))
    }

    /// Install a measurement callback. Always counts as a change.
    pub fn set_measure(
        &mut self,
        id: NodeId,
        measure: impl FnMut(NodeId, f32) -> Size + 'static,
    ) -> LayoutResult<()> {
        self.ensure_dirtiable(id)?;
        let boxed: MeasureFunc = Box::new(measure);
        self.get_mut(id)?.measure = Some(boxed);
        self.mark_dirty(id)
    }

    /// Remove the measurement callback. Returns whether one was installed.
    pub fn clear_measure(&mut self, id: NodeId) -> LayoutResult<bool> {
        if self.get(id)?.measure.is_none() {
            return Ok(false);
        }
        self.ensure_dirtiable(id)?;
        self.get_mut(id)?.measure = None;
        self.mark_dirty(id)?;
        Ok(true)
    }

    /// Returns `true` if `id` carries a measurement callback.
    pub fn has_measure(&self, id: NodeId) -> LayoutResult<bool> {
        Ok(self.get(id)?.measure.is_some())
    }

    /// Advertise that the size of `id` comes from its content.
    ///
    /// A content-sized node with an undefined declared dimension must carry a measurement
    /// callback by the time layout runs.
    pub fn set_content_sized(&mut self, id: NodeId, content_sized: bool) -> LayoutResult<bool> {
        if self.get(id)?.content_sized == content_sized {
            return Ok(false);
        }
        self.ensure_dirtiable(id)?;
        self.get_mut(id)?.content_sized = content_sized;
        self.mark_dirty(id)?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/setters.rs"]
mod tests;
