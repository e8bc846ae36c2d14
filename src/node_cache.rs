//! Identity cache and mark-and-sweep synchronization against the source.
//!
//! The cache owns the layout arena and maps external identities to layout
//! slots. A resync re-walks the external tree top-down: surviving identities
//! keep their layout node (and with it their sticky `expanded` flag and
//! widget-slot hints), new identities get fresh nodes, and anything the walk
//! did not touch is evicted afterwards. Geometry is never preserved — it is a
//! derived value recomputed by the next layout pass.

use std::collections::HashMap;

use crate::layout::{LayoutNode, LayoutSlot, LayoutTree};
use crate::name_pool::NamePool;
use crate::traits::{NodeId, SceneNode, SceneSource};

/// Parameters for one resync pass.
#[derive(Debug, Clone, Copy)]
pub struct ResyncOptions {
    /// Seed expansion state for identities seen for the first time.
    pub expanded_default: bool,
    /// Row height of synthetic group header rows (groups have no backing
    /// object to report a preferred size).
    pub group_row_height: f32,
    /// Label width of synthetic group header rows.
    pub group_row_width: f32,
}

impl Default for ResyncOptions {
    fn default() -> Self {
        Self {
            expanded_default: false,
            group_row_height: 20.0,
            group_row_width: 160.0,
        }
    }
}

/// Identity → layout slot cache plus the arena itself.
#[derive(Default)]
pub struct NodeCache {
    tree: LayoutTree,
    by_identity: HashMap<NodeId, LayoutSlot>,
    // Group header rows have no identity; they are keyed by label and get the
    // same mark-and-sweep lifecycle.
    by_group: HashMap<String, LayoutSlot>,
    root: Option<LayoutSlot>,
    names: NamePool,
}

impl NodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut LayoutTree {
        &mut self.tree
    }

    /// Hidden root of the shadow tree, if a resync has run.
    pub fn root(&self) -> Option<LayoutSlot> {
        self.root
    }

    /// Layout slot for an external identity, if cached.
    pub fn slot_of(&self, id: NodeId) -> Option<LayoutSlot> {
        self.by_identity.get(&id).copied()
    }

    /// Layout slot of a group header row, if cached.
    pub fn group_slot(&self, label: &str) -> Option<LayoutSlot> {
        self.by_group.get(label).copied()
    }

    /// Number of cached external identities (groups and the root excluded).
    pub fn len(&self) -> usize {
        self.by_identity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identity.is_empty()
    }

    /// Iterates over cached identities and their layout slots.
    pub fn identities(&self) -> impl Iterator<Item = (NodeId, LayoutSlot)> + '_ {
        self.by_identity.iter().map(|(&id, &slot)| (id, slot))
    }

    /// Drops the whole shadow tree.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.by_identity.clear();
        self.by_group.clear();
        self.root = None;
    }

    /// Reconciles the cache against the current external tree.
    ///
    /// Walk order defines sibling order. Objects carrying the ignore marker
    /// are skipped with their whole subtree. Returns the root slot; the
    /// caller is expected to run a full layout pass next, since every row
    /// position is stale after the walk.
    pub fn resync<S: SceneSource>(&mut self, source: &S, opts: &ResyncOptions) -> LayoutSlot {
        for (_, node) in self.tree.iter_mut() {
            node.used = false;
        }

        let root = match self.root {
            Some(slot) if self.tree.get(slot).is_some() => slot,
            _ => {
                let slot = self
                    .tree
                    .insert(LayoutNode::new(None, self.names.intern(""), true));
                self.root = Some(slot);
                slot
            }
        };
        if let Some(node) = self.tree.get_mut(root) {
            node.used = true;
            node.children.clear();
            node.parent = None;
            node.row = 0.0;
            node.column = 0;
        }

        for group in source.groups() {
            let group_slot = match self.by_group.get(&group.label) {
                Some(&slot) => slot,
                None => {
                    // Header rows stay expanded regardless of the seed
                    // default: a fully collapsed outliner still shows each
                    // group's top-level objects.
                    let slot = self
                        .tree
                        .insert(LayoutNode::new(None, self.names.intern(&group.label), true));
                    self.by_group.insert(group.label.clone(), slot);
                    slot
                }
            };
            if let Some(node) = self.tree.get_mut(group_slot) {
                node.used = true;
                node.parent = Some(root);
                node.children.clear();
                node.element_height = opts.group_row_height;
                node.element_width = opts.group_row_width;
                node.expected_child_count = group.root_ids.len();
            }
            if let Some(node) = self.tree.get_mut(root) {
                node.children.push(group_slot);
            }

            for id in &group.root_ids {
                if let Some(external) = source.get_node(*id) {
                    if !external.has_ignore_marker() {
                        self.attach(&external, group_slot, opts);
                    }
                }
            }
        }

        self.sweep();
        root
    }

    /// Re-attaches (or creates) the layout node for one external object and
    /// recurses over its children.
    fn attach<'a, N: SceneNode<'a>>(
        &mut self,
        external: &N,
        parent: LayoutSlot,
        opts: &ResyncOptions,
    ) {
        let id = external.id();
        let slot = match self.by_identity.get(&id) {
            Some(&slot) => slot,
            None => {
                let node = LayoutNode::new(
                    Some(id),
                    self.names.intern(&external.display_name()),
                    opts.expanded_default,
                );
                let slot = self.tree.insert(node);
                self.by_identity.insert(id, slot);
                slot
            }
        };

        if let Some(node) = self.tree.get_mut(slot) {
            node.used = true;
            node.parent = Some(parent);
            node.children.clear();
            node.active = external.is_active();
            node.element_width = external.preferred_width();
            node.element_height = external.preferred_height();
            node.expected_child_count = external.num_children();
        }
        if let Some(name) = self.refreshed_name(slot, external) {
            if let Some(node) = self.tree.get_mut(slot) {
                node.name = name;
            }
        }
        if let Some(node) = self.tree.get_mut(parent) {
            node.children.push(slot);
        }

        for index in 0..external.num_children() {
            if let Some(child) = external.child_at(index) {
                if !child.has_ignore_marker() {
                    self.attach(&child, slot, opts);
                }
            }
        }
    }

    /// Interns the freshly reported name only when it actually changed.
    fn refreshed_name<'a, N: SceneNode<'a>>(
        &mut self,
        slot: LayoutSlot,
        external: &N,
    ) -> Option<std::sync::Arc<str>> {
        let reported = external.display_name();
        match self.tree.get(slot) {
            Some(node) if &*node.name == reported.as_str() => None,
            _ => Some(self.names.intern(&reported)),
        }
    }

    /// Evicts every cached entry the walk did not re-mark.
    fn sweep(&mut self) {
        let dead_ids: Vec<NodeId> = self
            .by_identity
            .iter()
            .filter(|(_, &slot)| self.tree.get(slot).map(|n| !n.used).unwrap_or(true))
            .map(|(&id, _)| id)
            .collect();
        for id in dead_ids {
            if let Some(slot) = self.by_identity.remove(&id) {
                self.tree.remove(slot);
            }
        }

        let dead_groups: Vec<String> = self
            .by_group
            .iter()
            .filter(|(_, &slot)| self.tree.get(slot).map(|n| !n.used).unwrap_or(true))
            .map(|(label, _)| label.clone())
            .collect();
        for label in dead_groups {
            if let Some(slot) = self.by_group.remove(&label) {
                self.tree.remove(slot);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! In-memory scene source shared by the core module tests.

    use crate::traits::{NodeId, SceneGroup, SceneMetadata, SceneNode, SceneSource};
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Clone)]
    pub struct MockObject {
        pub id: NodeId,
        pub name: String,
        pub active: bool,
        pub ignored: bool,
        pub width: f32,
        pub height: f32,
        pub children: Vec<Arc<MockObject>>,
    }

    impl MockObject {
        pub fn new(id: NodeId, name: &str) -> Self {
            Self {
                id,
                name: name.to_string(),
                active: true,
                ignored: false,
                width: 60.0,
                height: 20.0,
                children: Vec::new(),
            }
        }

        pub fn with_children(mut self, children: Vec<MockObject>) -> Self {
            self.children = children.into_iter().map(Arc::new).collect();
            self
        }
    }

    pub struct MockScene {
        pub groups: Vec<(String, Vec<Arc<MockObject>>)>,
        pub objects: HashMap<NodeId, Arc<MockObject>>,
    }

    impl MockScene {
        pub fn new(groups: Vec<(&str, Vec<MockObject>)>) -> Self {
            let mut objects = HashMap::new();
            fn collect(object: &Arc<MockObject>, map: &mut HashMap<NodeId, Arc<MockObject>>) {
                map.insert(object.id, Arc::clone(object));
                for child in &object.children {
                    collect(child, map);
                }
            }
            let groups: Vec<(String, Vec<Arc<MockObject>>)> = groups
                .into_iter()
                .map(|(label, roots)| {
                    (
                        label.to_string(),
                        roots.into_iter().map(Arc::new).collect::<Vec<_>>(),
                    )
                })
                .collect();
            for (_, roots) in &groups {
                for root in roots {
                    collect(root, &mut objects);
                }
            }
            Self { groups, objects }
        }
    }

    pub struct MockMetadata;

    impl SceneMetadata for MockMetadata {
        fn version(&self) -> String {
            "mock-1.0".to_string()
        }
        fn header_data(&self) -> &serde_json::Value {
            &serde_json::Value::Null
        }
        fn total_groups(&self) -> Option<usize> {
            None
        }
        fn total_nodes(&self) -> Option<usize> {
            None
        }
    }

    impl SceneSource for MockScene {
        type Metadata<'a> = MockMetadata where Self: 'a;
        type Node<'a> = &'a MockObject where Self: 'a;

        fn metadata(&self) -> Self::Metadata<'_> {
            MockMetadata
        }

        fn groups(&self) -> Vec<SceneGroup> {
            self.groups
                .iter()
                .map(|(label, roots)| SceneGroup {
                    label: label.clone(),
                    root_ids: roots.iter().map(|r| r.id).collect(),
                })
                .collect()
        }

        fn get_node(&self, id: NodeId) -> Option<Self::Node<'_>> {
            self.objects.get(&id).map(|o| o.as_ref())
        }
    }

    impl<'a> SceneNode<'a> for &'a MockObject {
        fn id(&self) -> NodeId {
            self.id
        }
        fn display_name(&self) -> String {
            self.name.clone()
        }
        fn is_active(&self) -> bool {
            self.active
        }
        fn has_ignore_marker(&self) -> bool {
            self.ignored
        }
        fn num_children(&self) -> usize {
            self.children.len()
        }
        fn child_at(&self, index: usize) -> Option<Self> {
            self.children.get(index).map(|c| c.as_ref())
        }
        fn preferred_width(&self) -> f32 {
            self.width
        }
        fn preferred_height(&self) -> f32 {
            self.height
        }
    }
}
