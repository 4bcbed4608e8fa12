use smallvec::SmallVec;

use crate::{
    foundation::{
        core::{Size, UNDEFINED, floats_equal, is_undefined},
        error::{LayoutError, LayoutResult},
    },
    layout::{
        axis::{Axis, FlowAxis},
        cache::{CacheKey, CachedLayout},
        record::Layout,
    },
    style::{
        model::{Align, Direction, FlexWrap, Justify, Style},
        spacing::Edges,
    },
    tree::{
        LayoutTree,
        node::{LayoutState, NodeId},
    },
};

/// Counters collected during one [`LayoutTree::calculate_layout`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Nodes whose layout was actually computed (cache misses).
    pub nodes_laid_out: usize,
    /// Nodes whose size was restored from the cache.
    pub cache_hits: usize,
    /// Invocations of measurement callbacks.
    pub measure_calls: usize,
}

impl LayoutTree {
    /// Lay out the subtree under `root` with an unbounded available width.
    ///
    /// Content-sized nodes are validated before anything is touched. If the root was dirty
    /// it ends up holding a new layout that must be acknowledged with
    /// [`LayoutTree::mark_layout_seen`] before the next mutation; descendants are simply
    /// brought up to date.
    #[tracing::instrument(skip(self))]
    pub fn calculate_layout(&mut self, root: NodeId) -> LayoutResult<LayoutStats> {
        self.validate_measures(root)?;

        let was_dirty = self.get(root)?.is_dirty();
        self.get_mut(root)?.layout.reset();

        let mut pass = LayoutPass {
            tree: self,
            stats: LayoutStats::default(),
        };
        pass.layout_node(root, UNDEFINED, Direction::Inherit, Intent::Commit)?;
        let stats = pass.stats;

        let node = self.get_mut(root)?;
        let margin = node.style.margin.resolve(node.layout.direction);
        node.layout.x = margin.left + node.style.relative_offset(Axis::Row);
        node.layout.y = margin.top + node.style.relative_offset(Axis::Column);
        if was_dirty {
            node.state = LayoutState::HasNewLayout;
        }

        tracing::debug!(
            laid_out = stats.nodes_laid_out,
            cache_hits = stats.cache_hits,
            measure_calls = stats.measure_calls,
            "layout pass complete"
        );
        Ok(stats)
    }

    /// Reject the pass up front if a dirty content-sized node has no way to be measured.
    ///
    /// Clean subtrees were validated the last time they were laid out.
    fn validate_measures(&self, root: NodeId) -> LayoutResult<()> {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = self.get(id)?;
            if !node.is_dirty() {
                continue;
            }
            let needs_measure = Axis::BOTH
                .iter()
                .any(|&axis| !node.style.is_dim_defined(axis));
            if node.content_sized && node.measure.is_none() && needs_measure {
                return Err(LayoutError::missing_measure(format!(
                    "{id} is content-sized but has no measure callback"
                )));
            }
            stack.extend(node.children.iter().copied());
        }
        Ok(())
    }
}

/// Snapshot of a flow child taken before its parent starts placing it.
#[derive(Clone)]
struct FlowItem {
    id: NodeId,
    style: Style,
    margin: Edges,
    pb: Edges,
    flex: f32,
    align: Align,
}

/// What the caller does with a child's layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Intent {
    /// Only the size is read; a stretch may lay the child out again under a new size.
    Sizing,
    /// The layout is final for this pass, descendants included.
    Commit,
}

struct LayoutPass<'t> {
    tree: &'t mut LayoutTree,
    stats: LayoutStats,
}

impl LayoutPass<'_> {
    /// Lay out `id` with whatever width/height its parent already wrote into its record.
    ///
    /// The node's own position is never touched here; the parent assigns it. Returns
    /// `false` when only the size was restored from an older cache entry, so the records
    /// under the node still belong to another layout. A [`Intent::Sizing`] caller must then
    /// follow up with a stretch or a [`Intent::Commit`] call.
    fn layout_node(
        &mut self,
        id: NodeId,
        parent_max_width: f32,
        parent_direction: Direction,
        intent: Intent,
    ) -> LayoutResult<bool> {
        let opts = self.tree.opts();
        let node = self.tree.get_mut(id)?;
        let key = CacheKey {
            requested_width: node.layout.width,
            requested_height: node.layout.height,
            parent_max_width,
            parent_direction,
        };

        if opts.use_cache
            && !node.is_dirty()
            && let Some((hit, newest)) = node.cache.probe(&key, opts.cache_epsilon)
        {
            let settled = newest || node.children.is_empty();
            if settled || intent == Intent::Sizing {
                node.layout.width = hit.width;
                node.layout.height = hit.height;
                node.layout.direction = hit.direction;
                self.stats.cache_hits += 1;
                tracing::trace!(node = %id, settled, "layout cache hit");
                return Ok(settled);
            }
        }

        tracing::trace!(node = %id, width = key.requested_width, height = key.requested_height, "layout cache miss");
        if let Err(err) = self.layout_node_impl(id, parent_max_width, parent_direction) {
            // Partially written geometry under this node can no longer be trusted.
            self.tree.get_mut(id)?.state = LayoutState::Dirty;
            return Err(err);
        }
        self.stats.nodes_laid_out += 1;

        let node = self.tree.get_mut(id)?;
        if node.is_dirty() {
            // Entries from before the mutation describe a different style.
            node.cache.clear();
            node.state = LayoutState::UpToDate;
        }
        node.cache.write(CachedLayout {
            key,
            layout: node.layout,
        });
        Ok(true)
    }

    fn layout_node_impl(
        &mut self,
        id: NodeId,
        parent_max_width: f32,
        parent_direction: Direction,
    ) -> LayoutResult<()> {
        let node = self.tree.get(id)?;
        let style = node.style.clone();
        let children: SmallVec<[NodeId; 4]> = node.children.clone();
        let has_measure = node.measure.is_some();

        let direction = style.direction.resolve(parent_direction);
        let main = FlowAxis::main(style.flex_direction, direction);
        let cross = FlowAxis::cross_of(main, direction);
        let margin = style.margin.resolve(direction);
        let pb = style.padding.resolve(direction).add(style.border.resolve(direction));

        {
            let node = self.tree.get_mut(id)?;
            node.layout.direction = direction;
            for axis in Axis::BOTH {
                if is_undefined(node.layout.dim(axis)) && style.is_dim_defined(axis) {
                    let value = style.bound(axis, style.dimension(axis)).max(pb.sum(axis));
                    node.layout.set_dim(axis, value);
                }
            }
        }

        if has_measure {
            let layout = self.tree.get(id)?.layout;
            let width_missing = is_undefined(layout.width);
            let height_missing = is_undefined(layout.height);
            if width_missing || height_missing {
                let outer = if width_missing {
                    parent_max_width - margin.sum(Axis::Row)
                } else {
                    layout.width
                };
                let available = non_negative(outer - pb.sum(Axis::Row));
                let measured = self.measure(id, available)?;

                let node = self.tree.get_mut(id)?;
                if width_missing {
                    let w = style.bound(Axis::Row, measured.width + pb.sum(Axis::Row));
                    node.layout.width = w.max(pb.sum(Axis::Row));
                }
                if height_missing {
                    let h = style.bound(Axis::Column, measured.height + pb.sum(Axis::Column));
                    node.layout.height = h.max(pb.sum(Axis::Column));
                }
            }
            if children.is_empty() {
                return Ok(());
            }
        }

        let mut items: Vec<FlowItem> = Vec::with_capacity(children.len());
        let mut absolutes: SmallVec<[NodeId; 4]> = SmallVec::new();
        for &child in &children {
            let data = self.tree.get_mut(child)?;
            data.layout.reset();
            data.line_index = 0;
            if data.style.is_absolute() {
                absolutes.push(child);
                continue;
            }
            let child_dir = data.style.direction.resolve(direction);
            let child_pb = data
                .style
                .padding
                .resolve(child_dir)
                .add(data.style.border.resolve(child_dir));
            let align = match data.style.align_in(&style) {
                Align::Auto => Align::Stretch,
                other => other,
            };
            items.push(FlowItem {
                id: child,
                margin: data.style.margin.resolve(child_dir),
                pb: child_pb,
                flex: if data.style.is_flex() { data.style.flex } else { 0.0 },
                align,
                style: data.style.clone(),
            });
        }

        let own = self.tree.get(id)?.layout;
        let wrap = style.flex_wrap == FlexWrap::Wrap;
        let main_dim = own.dim(main.axis);
        let cross_dim = own.dim(cross.axis);
        let main_defined = !is_undefined(main_dim);
        let cross_defined = !is_undefined(cross_dim);
        let main_inner = main_dim - pb.sum(main.axis);
        let cross_pb = pb.sum(cross.axis);

        let prefilled = cross_defined && !wrap;
        if prefilled {
            let cross_inner = cross_dim - cross_pb;
            for item in &items {
                if item.align == Align::Stretch && !item.style.is_dim_defined(cross.axis) {
                    let size = item
                        .style
                        .bound(cross.axis, cross_inner - item.margin.sum(cross.axis))
                        .max(item.pb.sum(cross.axis));
                    self.tree.get_mut(item.id)?.layout.set_dim(cross.axis, size);
                }
            }
        }

        let pb_row = pb.sum(Axis::Row);
        let child_max_width = if !is_undefined(own.width) {
            non_negative(own.width - pb_row)
        } else if main.axis != Axis::Row {
            non_negative(parent_max_width - margin.sum(Axis::Row) - pb_row)
        } else {
            UNDEFINED
        };

        // Items that may still be stretched once their line's cross size is known.
        let intents: Vec<Intent> = items
            .iter()
            .map(|item| {
                let stretchable = item.align == Align::Stretch
                    && !item.style.is_dim_defined(cross.axis)
                    && !prefilled;
                if stretchable { Intent::Sizing } else { Intent::Commit }
            })
            .collect();
        let mut settled = vec![true; items.len()];

        // Margin-box main size of each item, filled lazily while lines are formed.
        let mut item_main = vec![UNDEFINED; items.len()];
        let mut lines_main = pb.leading(main);
        let mut lines_cross = 0.0_f32;
        let mut line = 0;
        let mut start = 0;

        while start < items.len() {
            let mut end = start;
            let mut line_main = 0.0_f32;
            let mut total_flex = 0.0_f32;

            while end < items.len() {
                let item = &items[end];
                let flexible = item.flex > 0.0 && main_defined;
                if is_undefined(item_main[end]) {
                    item_main[end] = if flexible {
                        item.pb.sum(main.axis) + item.margin.sum(main.axis)
                    } else {
                        settled[end] =
                            self.layout_node(item.id, child_max_width, direction, intents[end])?;
                        let laid = self.tree.get(item.id)?.layout;
                        laid.dim(main.axis) + item.margin.sum(main.axis)
                    };
                }
                if wrap && main_defined && end != start && line_main + item_main[end] > main_inner
                {
                    break;
                }
                line_main += item_main[end];
                if flexible {
                    total_flex += item.flex;
                }
                self.tree.get_mut(item.id)?.line_index = line;
                end += 1;
            }

            let line_items = &items[start..end];
            let mut remaining = if main_defined {
                main_inner - line_main
            } else {
                0.0
            };

            if total_flex > 0.0 {
                let sizes = distribute_flex(line_items, main.axis, remaining, total_flex);
                for (n, (item, size)) in line_items.iter().zip(&sizes).enumerate() {
                    if item.flex <= 0.0 {
                        continue;
                    }
                    let at = start + n;
                    self.tree.get_mut(item.id)?.layout.set_dim(main.axis, *size);
                    settled[at] =
                        self.layout_node(item.id, child_max_width, direction, intents[at])?;
                    remaining -= *size - item.pb.sum(main.axis);
                }
            }

            let count = line_items.len() as f32;
            let (leading, between) = match style.justify_content {
                Justify::FlexStart => (0.0, 0.0),
                Justify::Center => (remaining / 2.0, 0.0),
                Justify::FlexEnd => (remaining, 0.0),
                Justify::SpaceBetween if count > 1.0 => (0.0, remaining.max(0.0) / (count - 1.0)),
                Justify::SpaceBetween => (0.0, 0.0),
                Justify::SpaceAround => {
                    let gap = remaining.max(0.0) / count;
                    (gap / 2.0, gap)
                }
            };

            let mut cursor = pb.leading(main) + leading;
            let mut max_cross = 0.0_f32;
            for (n, item) in line_items.iter().enumerate() {
                if n > 0 {
                    cursor += between;
                }
                let child = &mut self.tree.get_mut(item.id)?.layout;
                let pos = cursor + item.margin.leading(main);
                child.set_pos(main.axis, pos);
                cursor = pos + child.dim(main.axis) + item.margin.trailing(main);
                max_cross = max_cross.max(child.dim(cross.axis) + item.margin.sum(cross.axis));
            }
            lines_main = lines_main.max(cursor);

            let line_cross = if wrap {
                max_cross
            } else if cross_defined {
                cross_dim - cross_pb
            } else {
                style.bound(cross.axis, max_cross + cross_pb).max(cross_pb) - cross_pb
            };

            for (n, item) in line_items.iter().enumerate() {
                let at = start + n;
                let child_cross = self.tree.get(item.id)?.layout.dim(cross.axis);
                let margin_box = child_cross + item.margin.sum(cross.axis);
                let offset = match item.align {
                    Align::Stretch => {
                        if intents[at] == Intent::Sizing {
                            let stretched = item
                                .style
                                .bound(cross.axis, line_cross - item.margin.sum(cross.axis))
                                .max(item.pb.sum(cross.axis));
                            if !floats_equal(stretched, child_cross) {
                                self.stretch(item.id, cross.axis, stretched, child_max_width, direction)?;
                            } else if !settled[at] {
                                self.layout_node(item.id, child_max_width, direction, Intent::Commit)?;
                            }
                        }
                        0.0
                    }
                    Align::Center => (line_cross - margin_box) / 2.0,
                    Align::FlexEnd => line_cross - margin_box,
                    Align::FlexStart | Align::Auto => 0.0,
                };
                let pos = lines_cross + pb.leading(cross) + offset + item.margin.leading(cross);
                self.tree.get_mut(item.id)?.layout.set_pos(cross.axis, pos);
            }

            lines_cross += line_cross;
            line += 1;
            start = end;
        }

        let node = self.tree.get_mut(id)?;
        if !main_defined {
            let main_pb = pb.sum(main.axis);
            let value = style
                .bound(main.axis, lines_main + pb.trailing(main))
                .max(main_pb);
            node.layout.set_dim(main.axis, value);
        }
        if !cross_defined {
            let value = style.bound(cross.axis, lines_cross + cross_pb).max(cross_pb);
            node.layout.set_dim(cross.axis, value);
        }
        let container = node.layout;

        for item in &items {
            let child = &mut self.tree.get_mut(item.id)?.layout;
            for flow in [main, cross] {
                if flow.reversed {
                    let pos = container.dim(flow.axis) - child.dim(flow.axis) - child.pos(flow.axis);
                    child.set_pos(flow.axis, pos);
                }
            }
            child.x += item.style.relative_offset(Axis::Row);
            child.y += item.style.relative_offset(Axis::Column);
        }

        for &child in &absolutes {
            self.layout_absolute(child, &container, pb, direction)?;
        }
        Ok(())
    }

    /// Give a stretched child its new cross size, laying it out again when it has children
    /// that depend on it.
    fn stretch(
        &mut self,
        id: NodeId,
        axis: Axis,
        size: f32,
        child_max_width: f32,
        direction: Direction,
    ) -> LayoutResult<()> {
        let node = self.tree.get_mut(id)?;
        node.layout.set_dim(axis, size);
        if !node.children.is_empty() {
            self.layout_node(id, child_max_width, direction, Intent::Commit)?;
        }
        Ok(())
    }

    /// Size and place an out-of-flow child inside the content box of `container`.
    fn layout_absolute(
        &mut self,
        id: NodeId,
        container: &Layout,
        pb: Edges,
        direction: Direction,
    ) -> LayoutResult<()> {
        let data = self.tree.get(id)?;
        let style = data.style.clone();
        let child_dir = style.direction.resolve(direction);
        let margin = style.margin.resolve(child_dir);
        let child_pb = style.padding.resolve(child_dir).add(style.border.resolve(child_dir));

        for axis in Axis::BOTH {
            let (leading, trailing) = style.offsets(axis);
            if !style.is_dim_defined(axis) && !is_undefined(leading) && !is_undefined(trailing) {
                let size = container.dim(axis) - pb.sum(axis) - margin.sum(axis) - leading - trailing;
                let size = style.bound(axis, size).max(child_pb.sum(axis));
                self.tree.get_mut(id)?.layout.set_dim(axis, size);
            }
        }

        let max_width = non_negative(container.width - pb.sum(Axis::Row));
        self.layout_node(id, max_width, direction, Intent::Commit)?;

        let child = &mut self.tree.get_mut(id)?.layout;
        for axis in Axis::BOTH {
            let flow = FlowAxis::physical(axis);
            let (leading, trailing) = style.offsets(axis);
            let pos = if !is_undefined(leading) {
                pb.leading(flow) + margin.leading(flow) + leading
            } else if !is_undefined(trailing) {
                container.dim(axis)
                    - pb.trailing(flow)
                    - margin.trailing(flow)
                    - trailing
                    - child.dim(axis)
            } else {
                pb.leading(flow) + margin.leading(flow)
            };
            child.set_pos(axis, pos);
        }
        Ok(())
    }

    /// Run the measurement callback of `id`, rejecting non-finite results.
    fn measure(&mut self, id: NodeId, available_width: f32) -> LayoutResult<Size> {
        let node = self.tree.get_mut(id)?;
        let Some(measure) = node.measure.as_mut() else {
            return Err(LayoutError::missing_measure(format!("{id} has no measure callback")));
        };
        let size = measure(id, available_width);
        self.stats.measure_calls += 1;
        tracing::trace!(node = %id, available_width, width = size.width, height = size.height, "measured");
        if !size.is_finite() {
            return Err(LayoutError::invalid_measurement(format!(
                "{id} measured {}x{} for available width {available_width}",
                size.width, size.height
            )));
        }
        Ok(size)
    }
}

/// Final main-axis sizes (border box) for a line's flexible items.
///
/// Free space is shared by flex factor. Items whose share is clamped by their min/max are
/// frozen at the clamped size and the rest of the space is shared again among the others.
/// Negative free space gives no share at all, so flexible items fall back to their
/// padding and border, raised to any minimum.
fn distribute_flex(items: &[FlowItem], axis: Axis, remaining: f32, total_flex: f32) -> Vec<f32> {
    let mut sizes = vec![UNDEFINED; items.len()];
    let mut free = remaining;
    let mut flex_left = total_flex;

    let share = free.max(0.0) / total_flex;
    for (item, slot) in items.iter().zip(sizes.iter_mut()) {
        if item.flex <= 0.0 {
            continue;
        }
        let pb = item.pb.sum(axis);
        let base = share * item.flex + pb;
        let bounded = item.style.bound(axis, base);
        if !floats_equal(bounded, base) {
            *slot = bounded.max(pb);
            free -= *slot - pb;
            flex_left -= item.flex;
        }
    }

    let share = if flex_left > 0.0 {
        free.max(0.0) / flex_left
    } else {
        0.0
    };
    for (item, slot) in items.iter().zip(sizes.iter_mut()) {
        if item.flex <= 0.0 || !is_undefined(*slot) {
            continue;
        }
        let pb = item.pb.sum(axis);
        *slot = item.style.bound(axis, share * item.flex + pb).max(pb);
    }
    sizes
}

fn non_negative(value: f32) -> f32 {
    if is_undefined(value) {
        value
    } else {
        value.max(0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
