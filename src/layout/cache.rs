use crate::{
    foundation::core::{approx_eq, floats_equal},
    layout::record::Layout,
    style::model::Direction,
};

/// Inputs a node was laid out under.
///
/// `requested_width`/`requested_height` are the sizes the parent imposed before recursing
/// (undefined when the node sizes itself). Equality is exact, with undefined values
/// comparing equal.
#[derive(Clone, Copy, Debug)]
pub struct CacheKey {
    /// Width imposed by the parent, or undefined.
    pub requested_width: f32,
    /// Height imposed by the parent, or undefined.
    pub requested_height: f32,
    /// Width bound the parent offered for content measurement, or undefined.
    pub parent_max_width: f32,
    /// Resolved direction inherited from the parent.
    pub parent_direction: Direction,
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        floats_equal(self.requested_width, other.requested_width)
            && floats_equal(self.requested_height, other.requested_height)
            && floats_equal(self.parent_max_width, other.parent_max_width)
            && self.parent_direction == other.parent_direction
    }
}

impl CacheKey {
    /// Two keys match when every scalar is within `epsilon` (undefined only matches
    /// undefined) and the directions agree.
    pub(crate) fn matches(&self, other: &CacheKey, epsilon: f32) -> bool {
        approx_eq(self.requested_width, other.requested_width, epsilon)
            && approx_eq(self.requested_height, other.requested_height, epsilon)
            && approx_eq(self.parent_max_width, other.parent_max_width, epsilon)
            && self.parent_direction == other.parent_direction
    }
}

/// Output of the last real (non-skipped) layout of a node, keyed by its inputs.
///
/// Only the size and resolved direction are restored on a hit; the position always
/// comes from the parent's placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CachedLayout {
    /// Inputs the layout was computed under.
    pub key: CacheKey,
    /// The computed record.
    pub layout: Layout,
}

impl CachedLayout {
    /// Returns the cached record if it was produced under `key`.
    pub(crate) fn probe(&self, key: &CacheKey, epsilon: f32) -> Option<Layout> {
        self.key.matches(key, epsilon).then_some(self.layout)
    }
}

/// The two most recent layouts of a node.
///
/// A child stretched along the cross axis is laid out once at its natural size and once
/// stretched, so both keys are kept. Only the newest entry describes the geometry
/// currently stored in the node's descendants.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct LayoutCache {
    entries: [Option<CachedLayout>; 2],
    newest: usize,
}

impl LayoutCache {
    /// Returns the record cached under `key` and whether it is the newest entry.
    pub(crate) fn probe(&self, key: &CacheKey, epsilon: f32) -> Option<(Layout, bool)> {
        self.entries.iter().enumerate().find_map(|(slot, entry)| {
            let layout = entry.as_ref()?.probe(key, epsilon)?;
            Some((layout, slot == self.newest))
        })
    }

    /// Store the output of a real layout as the newest entry.
    ///
    /// An entry with an equal key is replaced; otherwise the older entry is evicted.
    pub(crate) fn write(&mut self, entry: CachedLayout) {
        let slot = self
            .entries
            .iter()
            .position(|e| e.as_ref().is_some_and(|e| e.key == entry.key))
            .unwrap_or(1 - self.newest);
        self.entries[slot] = Some(entry);
        self.newest = slot;
    }

    /// Entry matching the geometry currently stored under the node.
    pub(crate) fn newest(&self) -> Option<CachedLayout> {
        self.entries[self.newest]
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/cache.rs"]
mod tests;
