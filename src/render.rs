//! Viewport-culled row rendering over pooled widgets.
//!
//! The renderer walks only expanded layout nodes, so a frame costs
//! O(visible), not O(total). Rows are monotonically non-decreasing in
//! pre-order among expanded nodes, which lets the walk stop as soon as the
//! cursor passes the bottom of the cull box. Widgets come from the engine's
//! pools; the concrete widget implementation is the host's business and only
//! the small trait surface below is required of it.

use egui::{pos2, vec2, Rect};

use crate::layout::{LayoutSlot, LayoutTree};
use crate::traits::NodeId;
use crate::widget_pool::{PoolWidget, WidgetPool};

/// A pooled row-label widget.
pub trait LabelWidget: PoolWidget {
    /// Places the widget at its content-space rectangle.
    fn set_rect(&mut self, rect: Rect);
    /// Updates the displayed text.
    fn set_text(&mut self, text: &str);
    /// Dims the label when the backing object is inactive.
    fn set_enabled(&mut self, enabled: bool);
    /// Binds the widget to its row so clicks can be routed back.
    fn bind(&mut self, row: LayoutSlot, identity: Option<NodeId>);
}

/// A pooled expand/collapse toggle widget.
pub trait ToggleWidget: PoolWidget {
    fn set_rect(&mut self, rect: Rect);
    fn set_expanded(&mut self, expanded: bool);
    fn bind(&mut self, row: LayoutSlot);
}

/// Factory and readiness surface the host provides.
///
/// Until the host is configured (`is_ready` returns false) the render pass is
/// a no-op; the check runs on every render entry.
pub trait WidgetHost {
    type Label: LabelWidget;
    type Toggle: ToggleWidget;

    fn is_ready(&self) -> bool;
    fn create_label(&mut self) -> Self::Label;
    fn create_toggle(&mut self) -> Self::Toggle;
}

/// Walks the shadow tree each frame and keeps the pools populated for exactly
/// the rows inside the cull box.
pub struct Renderer<H: WidgetHost> {
    labels: WidgetPool<H::Label>,
    toggles: WidgetPool<H::Toggle>,
}

impl<H: WidgetHost> Renderer<H> {
    pub fn new() -> Self {
        Self {
            labels: WidgetPool::new(),
            toggles: WidgetPool::new(),
        }
    }

    pub fn labels(&self) -> &WidgetPool<H::Label> {
        &self.labels
    }

    pub fn toggles(&self) -> &WidgetPool<H::Toggle> {
        &self.toggles
    }

    /// Runs one full render cycle: release every widget back to the pools,
    /// then re-acquire for each row intersecting `cull`.
    pub fn render(
        &mut self,
        tree: &mut LayoutTree,
        root: LayoutSlot,
        host: &mut H,
        cull: Rect,
        indent_width: f32,
        toggle_width: f32,
    ) {
        if !host.is_ready() {
            return;
        }
        self.labels.release_all();
        self.toggles.release_all();
        self.render_node(tree, root, host, cull, indent_width, toggle_width);
    }

    fn render_node(
        &mut self,
        tree: &mut LayoutTree,
        slot: LayoutSlot,
        host: &mut H,
        cull: Rect,
        indent_width: f32,
        toggle_width: f32,
    ) {
        let Some(node) = tree.get(slot) else {
            return;
        };
        let identity = node.identity;
        let row = node.row;
        let column = node.column;
        let element_width = node.element_width;
        let element_height = node.element_height;
        let expanded = node.expanded;
        let active = node.active;
        let has_children = !node.children.is_empty();
        let visible_row = node.is_visible_row();
        let label_hint = node.label_widget;
        let toggle_hint = node.toggle_widget;
        let name = node.name.clone();
        let children = node.children.clone();

        if visible_row {
            let x = indent_width * column as f32;
            let toggle_rect =
                Rect::from_min_size(pos2(x, row), vec2(toggle_width, element_height));
            let label_rect = Rect::from_min_size(
                pos2(x + toggle_width, row),
                vec2(element_width, element_height),
            );

            if has_children {
                if toggle_rect.intersects(cull) {
                    let widget_slot = self.toggles.acquire(toggle_hint, || host.create_toggle());
                    if let Some(widget) = self.toggles.get_mut(widget_slot) {
                        widget.set_rect(toggle_rect);
                        widget.set_expanded(expanded);
                        widget.bind(slot);
                    }
                    if let Some(node) = tree.get_mut(slot) {
                        node.toggle_widget = Some(widget_slot);
                    }
                } else if let Some(node) = tree.get_mut(slot) {
                    // Off-screen: drop the reference, the pool keeps the widget.
                    node.toggle_widget = None;
                }
            }

            if label_rect.intersects(cull) {
                let widget_slot = self.labels.acquire(label_hint, || host.create_label());
                if let Some(widget) = self.labels.get_mut(widget_slot) {
                    widget.set_rect(label_rect);
                    widget.set_text(&name);
                    widget.set_enabled(active);
                    widget.bind(slot, identity);
                }
                if let Some(node) = tree.get_mut(slot) {
                    node.label_widget = Some(widget_slot);
                }
            } else if let Some(node) = tree.get_mut(slot) {
                node.label_widget = None;
            }
        }

        if !expanded {
            return;
        }
        for child_slot in children {
            let Some(child) = tree.get(child_slot) else {
                continue;
            };
            // Rows are monotone in pre-order: everything after this child
            // starts even lower.
            if child.row > cull.max.y {
                break;
            }
            // Subtree entirely above the cull box.
            if child.row + child.height < cull.min.y {
                continue;
            }
            self.render_node(tree, child_slot, host, cull, indent_width, toggle_width);
        }
    }
}

impl<H: WidgetHost> Default for Renderer<H> {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockHost;
    use super::*;
    use crate::layout::{LayoutNode, LayoutPass};
    use std::sync::Arc;

    /// Synthetic root with `count` leaf rows of height 20.
    fn flat_tree(count: usize) -> (LayoutTree, LayoutSlot) {
        let mut tree = LayoutTree::new();
        let root = tree.insert(LayoutNode::new(None, Arc::from(""), true));
        for i in 0..count {
            let mut node =
                LayoutNode::new(Some(i as u64 + 1), Arc::from(format!("row_{}", i)), false);
            node.element_height = 20.0;
            node.element_width = 80.0;
            node.parent = Some(root);
            let slot = tree.insert(node);
            if let Some(r) = tree.get_mut(root) {
                r.children.push(slot);
            }
        }
        let mut pass = LayoutPass::default();
        tree.compute_dimensions(root, 0, 0.0, 14.0, &mut pass);
        (tree, root)
    }

    #[test]
    fn test_only_rows_in_cull_box_get_widgets() {
        let (mut tree, root) = flat_tree(100);
        let mut host = MockHost::new();
        let mut renderer: Renderer<MockHost> = Renderer::new();

        // 2000 units of content, window over rows 10..=19.
        let cull = Rect::from_min_max(pos2(0.0, 200.5), pos2(300.0, 399.5));
        renderer.render(&mut tree, root, &mut host, cull, 14.0, 16.0);

        assert_eq!(renderer.labels().stats().in_use, 10);
        assert_eq!(host.labels_created, 10);
        // Leaves have no children, so no toggles.
        assert_eq!(host.toggles_created, 0);
    }

    #[test]
    fn test_scrolling_reuses_pooled_widgets() {
        let (mut tree, root) = flat_tree(100);
        let mut host = MockHost::new();
        let mut renderer: Renderer<MockHost> = Renderer::new();

        let cull = Rect::from_min_max(pos2(0.0, 0.0), pos2(300.0, 199.0));
        renderer.render(&mut tree, root, &mut host, cull, 14.0, 16.0);
        assert_eq!(host.labels_created, 10);

        // Scroll down one window: same widget count, zero new instantiations.
        let cull = Rect::from_min_max(pos2(0.0, 200.5), pos2(300.0, 399.5));
        renderer.render(&mut tree, root, &mut host, cull, 14.0, 16.0);
        assert_eq!(host.labels_created, 10);
        assert_eq!(renderer.labels().stats().in_use, 10);
    }

    #[test]
    fn test_stable_rows_keep_their_widget_across_frames() {
        let (mut tree, root) = flat_tree(20);
        let mut host = MockHost::new();
        let mut renderer: Renderer<MockHost> = Renderer::new();

        let cull = Rect::from_min_max(pos2(0.0, 0.0), pos2(300.0, 399.0));
        renderer.render(&mut tree, root, &mut host, cull, 14.0, 16.0);
        let row_5 = tree
            .iter()
            .find(|(_, n)| n.identity == Some(5))
            .map(|(s, _)| s)
            .unwrap();
        let widget_before = tree.get(row_5).unwrap().label_widget;

        renderer.render(&mut tree, root, &mut host, cull, 14.0, 16.0);
        assert_eq!(tree.get(row_5).unwrap().label_widget, widget_before);
    }

    #[test]
    fn test_collapsed_subtrees_are_skipped() {
        let mut tree = LayoutTree::new();
        let root = tree.insert(LayoutNode::new(None, Arc::from(""), true));
        let mut parent = LayoutNode::new(Some(1), Arc::from("parent"), false);
        parent.element_height = 20.0;
        parent.element_width = 80.0;
        parent.parent = Some(root);
        let parent_slot = tree.insert(parent);
        tree.get_mut(root).unwrap().children.push(parent_slot);
        for i in 0..5 {
            let mut child = LayoutNode::new(Some(10 + i), Arc::from("child"), false);
            child.element_height = 20.0;
            child.parent = Some(parent_slot);
            let slot = tree.insert(child);
            tree.get_mut(parent_slot).unwrap().children.push(slot);
        }
        let mut pass = LayoutPass::default();
        tree.compute_dimensions(root, 0, 0.0, 14.0, &mut pass);

        let mut host = MockHost::new();
        let mut renderer: Renderer<MockHost> = Renderer::new();
        let cull = Rect::from_min_max(pos2(0.0, 0.0), pos2(300.0, 400.0));
        renderer.render(&mut tree, root, &mut host, cull, 14.0, 16.0);

        // One label for the collapsed parent, one toggle, no child widgets.
        assert_eq!(renderer.labels().stats().in_use, 1);
        assert_eq!(renderer.toggles().stats().in_use, 1);
        let toggle = renderer.toggles().iter_active().next().unwrap().1;
        assert!(!toggle.expanded);
        assert_eq!(toggle.row, Some(parent_slot));
    }

    #[test]
    fn test_offscreen_row_drops_widget_reference() {
        let (mut tree, root) = flat_tree(100);
        let mut host = MockHost::new();
        let mut renderer: Renderer<MockHost> = Renderer::new();

        let cull = Rect::from_min_max(pos2(0.0, 0.0), pos2(300.0, 199.0));
        renderer.render(&mut tree, root, &mut host, cull, 14.0, 16.0);
        let row_3 = tree
            .iter()
            .find(|(_, n)| n.identity == Some(3))
            .map(|(s, _)| s)
            .unwrap();
        assert!(tree.get(row_3).unwrap().label_widget.is_some());

        // Window far below row 3: rows 40..=59 only.
        let cull = Rect::from_min_max(pos2(0.0, 800.5), pos2(300.0, 1199.5));
        renderer.render(&mut tree, root, &mut host, cull, 14.0, 16.0);
        // Row 3 was never visited (subtree above the box), but the pool took
        // its widget back regardless.
        assert_eq!(renderer.labels().stats().in_use, 20);
    }

    #[test]
    fn test_unconfigured_host_renders_nothing() {
        let (mut tree, root) = flat_tree(10);
        let mut host = MockHost::new();
        host.ready = false;
        let mut renderer: Renderer<MockHost> = Renderer::new();

        let cull = Rect::from_min_max(pos2(0.0, 0.0), pos2(300.0, 400.0));
        renderer.render(&mut tree, root, &mut host, cull, 14.0, 16.0);
        assert_eq!(host.labels_created, 0);
        assert!(renderer.labels().is_empty());
    }

    #[test]
    fn test_label_binding_carries_identity() {
        let (mut tree, root) = flat_tree(3);
        let mut host = MockHost::new();
        let mut renderer: Renderer<MockHost> = Renderer::new();

        let cull = Rect::from_min_max(pos2(0.0, 0.0), pos2(300.0, 400.0));
        renderer.render(&mut tree, root, &mut host, cull, 14.0, 16.0);

        let mut identities: Vec<_> = renderer
            .labels()
            .iter_active()
            .filter_map(|(_, w)| w.identity)
            .collect();
        identities.sort_unstable();
        assert_eq!(identities, vec![1, 2, 3]);
    }
}
