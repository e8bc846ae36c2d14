//! Shadow-tree layout state and the incremental dimension algorithm.
//!
//! The engine never materializes one widget per scene object. Instead it keeps
//! a shadow tree of [`LayoutNode`] entries in a slot arena ([`LayoutTree`]) and
//! recomputes geometry only for the rows invalidated by an expand/collapse or
//! a structural change. Collapsed subtrees cost O(1): their cached total
//! height is reused without visiting any descendant.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::HierarchyError;
use crate::traits::NodeId;

/// Index of a layout node inside the arena.
pub type LayoutSlot = usize;

/// Per-row shadow state for one tree node.
///
/// Geometry fields (`row`, `column`, `width`, `height`) are only valid
/// immediately after a layout pass; they go stale the instant the tree
/// structure or any ancestor's expansion changes.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    /// Backing scene object, or None for synthetic rows (the hidden root and
    /// per-group header rows).
    pub identity: Option<NodeId>,
    /// Display label, refreshed from the source on every resync.
    pub name: Arc<str>,
    /// Nesting depth in indent steps.
    pub column: usize,
    /// Vertical offset in accumulated height units. Not a line index: row
    /// heights vary per node, so this accumulates.
    pub row: f32,
    /// Full row footprint including the indent offset.
    pub width: f32,
    /// Own-plus-expanded-descendants total height.
    pub height: f32,
    /// Whether children are laid out and rendered. Sticky across resyncs.
    pub expanded: bool,
    /// Child slots in sibling/display order.
    pub children: Vec<LayoutSlot>,
    /// Non-owning back-reference, used only for locating the tree root.
    pub parent: Option<LayoutSlot>,
    /// Last-observed child count of the backing object, compared by the
    /// change detector.
    pub expected_child_count: usize,
    /// Preferred label width reported by the source at the last resync.
    pub element_width: f32,
    /// Preferred row height reported by the source at the last resync.
    pub element_height: f32,
    /// Active flag of the backing object at the last resync.
    pub active: bool,
    /// Pool-preference hint: label widget slot used for this row last frame.
    pub label_widget: Option<usize>,
    /// Pool-preference hint: toggle widget slot used for this row last frame.
    pub toggle_widget: Option<usize>,
    /// Transient marker for the mark-and-sweep resync pass.
    pub(crate) used: bool,
}

impl LayoutNode {
    pub(crate) fn new(identity: Option<NodeId>, name: Arc<str>, expanded: bool) -> Self {
        Self {
            identity,
            name,
            column: 0,
            row: 0.0,
            width: 0.0,
            height: 0.0,
            expanded,
            children: Vec::new(),
            parent: None,
            expected_child_count: 0,
            element_width: 0.0,
            element_height: 0.0,
            active: true,
            label_widget: None,
            toggle_widget: None,
            used: false,
        }
    }

    /// Height this row contributes on its own.
    ///
    /// Purely structural rows (no identity and no name, i.e. the hidden root)
    /// contribute nothing.
    pub fn own_height(&self) -> f32 {
        if self.identity.is_some() || !self.name.is_empty() {
            self.element_height
        } else {
            0.0
        }
    }

    /// Whether this row is drawable (the hidden root is not).
    pub fn is_visible_row(&self) -> bool {
        self.identity.is_some() || !self.name.is_empty()
    }
}

/// Running totals threaded through one dimension pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutPass {
    /// Widest row seen across the whole pass; this is the content width the
    /// host needs to size its scroll container.
    pub max_width: f32,
    /// Number of nodes the pass actually recursed into. Collapsed subtrees
    /// and rows reused below the floor do not count.
    pub nodes_visited: usize,
}

/// Slot arena holding the shadow tree.
///
/// Slots are stable across resyncs for surviving identities; evicted slots go
/// onto a free list and are recycled. Parent/child links are plain slot
/// indices and never own anything.
#[derive(Debug, Default)]
pub struct LayoutTree {
    slots: Vec<Option<LayoutNode>>,
    free: Vec<LayoutSlot>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes in the arena.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn insert(&mut self, node: LayoutNode) -> LayoutSlot {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                slot
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    pub(crate) fn remove(&mut self, slot: LayoutSlot) -> Option<LayoutNode> {
        let node = self.slots.get_mut(slot)?.take();
        if node.is_some() {
            self.free.push(slot);
        }
        node
    }

    pub fn get(&self, slot: LayoutSlot) -> Option<&LayoutNode> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, slot: LayoutSlot) -> Option<&mut LayoutNode> {
        self.slots.get_mut(slot).and_then(|s| s.as_mut())
    }

    /// Iterates over all live nodes.
    pub fn iter(&self) -> impl Iterator<Item = (LayoutSlot, &LayoutNode)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|n| (i, n)))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (LayoutSlot, &mut LayoutNode)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|n| (i, n)))
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Walks parent links from `start` to the tree root.
    ///
    /// The walk keeps a visited set: a revisited slot means a node was made
    /// its own ancestor, and the walk fails with
    /// [`HierarchyError::StructuralCycle`] instead of looping. A hop-count
    /// bound alone would miss short cycles masquerading as depth.
    pub fn find_root(&self, start: LayoutSlot) -> Result<LayoutSlot, HierarchyError> {
        let mut visited: HashSet<LayoutSlot> = HashSet::new();
        let mut current = start;
        loop {
            if !visited.insert(current) {
                return Err(HierarchyError::StructuralCycle { slot: current });
            }
            match self.get(current).and_then(|n| n.parent) {
                Some(parent) => current = parent,
                None => return Ok(current),
            }
        }
    }

    /// Recomputes geometry for the subtree rooted at `slot`.
    ///
    /// `row_floor` is the selective-recomputation threshold: a child whose
    /// whole subtree lies above it (starts before the floor and ends at or
    /// before it) keeps its cached height and is not recursed into. A toggle
    /// therefore passes the toggled row as the floor from the root: sibling
    /// subtrees entirely above the toggle point keep their cached geometry,
    /// while ancestors of the toggle point straddle the floor and are
    /// recursed as they must be. Passing `0.0` recomputes everything.
    ///
    /// Returns the node's own-plus-descendants height, which is also written
    /// back to the node's `height` field.
    pub fn compute_dimensions(
        &mut self,
        slot: LayoutSlot,
        depth: usize,
        row_floor: f32,
        indent_width: f32,
        pass: &mut LayoutPass,
    ) -> f32 {
        pass.nodes_visited += 1;

        let (own, row, expanded, has_identity, children) = {
            let Some(node) = self.get(slot) else {
                return 0.0;
            };
            (
                node.own_height(),
                node.row,
                node.expanded,
                node.identity.is_some(),
                node.children.clone(),
            )
        };

        // Collapsed or childless: the subtree costs O(1).
        if !expanded || children.is_empty() {
            if let Some(node) = self.get_mut(slot) {
                node.height = own;
            }
            return own;
        }

        let mut cursor = row + own;
        // Synthetic group rows do not add an indent level.
        let child_depth = if has_identity { depth + 1 } else { depth };

        for child_slot in children {
            let cached_height = {
                let Some(child) = self.get_mut(child_slot) else {
                    continue;
                };
                child.row = cursor;
                child.column = child_depth;
                child.width = indent_width * (child_depth as f32 + 1.0) + child.element_width;
                pass.max_width = pass.max_width.max(child.width);
                child.height
            };

            // Reuse only subtrees entirely above the floor. Anything
            // straddling it (the toggle point's ancestor chain) or starting
            // at/after it is recomputed.
            let reuse = cursor < row_floor && cursor + cached_height <= row_floor;
            let advanced = if reuse {
                cached_height
            } else {
                self.compute_dimensions(child_slot, child_depth, row_floor, indent_width, pass)
            };
            cursor += advanced;
        }

        let total = cursor - row;
        if let Some(node) = self.get_mut(slot) {
            node.height = total;
        }
        total
    }
}
