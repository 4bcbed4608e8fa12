//! Flexbox-subset box layout for trees of styled nodes.
//!
//! Build a [`LayoutTree`], style its nodes through the setters, then call
//! [`LayoutTree::calculate_layout`] on the root and read each node's [`Layout`].
//! Mutations mark nodes dirty up to the root; unchanged subtrees are served from a
//! per-node cache on the next pass.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod layout;
mod scene;
mod style;
mod tree;

pub use foundation::core::{Size, UNDEFINED, floats_equal, is_undefined};
pub use foundation::error::{LayoutError, LayoutResult};
pub use layout::cache::{CacheKey, CachedLayout};
pub use layout::engine::LayoutStats;
pub use layout::record::Layout;
pub use scene::dump::LayoutDump;
pub use scene::{Scene, SceneNode, SpacingSpec, StyleSpec};
pub use style::model::{
    Align, Direction, FlexDirection, FlexWrap, Justify, PositionType, Style,
};
pub use style::spacing::{Edge, Spacing};
pub use tree::node::{LayoutState, MeasureFunc, NodeId};
pub use tree::{LayoutOpts, LayoutTree};
