//! The per-tick pipeline: change detection → resync → layout → render.
//!
//! One engine instance owns the identity cache, the change detector and the
//! widget pools; there are no ambient singletons. Everything runs
//! synchronously inside the host's display-tick callback, and within one tick
//! the order is fixed: a resync always completes before the layout pass,
//! which always completes before the render pass. Re-entrant calls (e.g. a
//! toggle callback invoking a render while one is in progress) are a
//! programmer error and are not guarded against.

use egui::{vec2, Rect, Vec2};

use crate::change_detector::ChangeDetector;
use crate::cull::{compute_cull_box, ViewRect};
use crate::error::HierarchyError;
use crate::layout::{LayoutPass, LayoutSlot};
use crate::node_cache::{NodeCache, ResyncOptions};
use crate::render::{Renderer, WidgetHost};
use crate::traits::{NodeId, SceneSource};
use crate::widget_pool::PoolStats;

/// Tunables for layout and culling.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Horizontal size of one indent step, in layout units.
    pub indent_width: f32,
    /// Width reserved for the expand/collapse toggle in front of each label.
    pub toggle_width: f32,
    /// Bevel margin added around the viewport when culling, so rows just
    /// off-screen are already rendered when they scroll in.
    pub cull_margin: f32,
    /// Row size used for synthetic group header rows.
    pub group_row_height: f32,
    pub group_row_width: f32,
    /// Seed expansion state for objects seen for the first time.
    pub expanded_default: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            indent_width: 14.0,
            toggle_width: 16.0,
            cull_margin: 24.0,
            group_row_height: 22.0,
            group_row_width: 160.0,
            expanded_default: false,
        }
    }
}

/// Interaction reported by the host for one of its pooled widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowInteraction {
    /// The expand/collapse toggle bound to this row was clicked.
    ToggleClicked(LayoutSlot),
    /// The label bound to this row was clicked.
    LabelClicked(LayoutSlot),
}

/// Event emitted back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyEvent {
    /// A row backed by a scene object was selected.
    Selected(NodeId),
}

/// The incremental hierarchy engine.
pub struct HierarchyEngine<H: WidgetHost> {
    cache: NodeCache,
    detector: ChangeDetector,
    renderer: Renderer<H>,
    config: EngineConfig,
    content_size: Vec2,
    last_cull: Option<Rect>,
    last_layout: LayoutPass,
    resync_pending: bool,
}

impl<H: WidgetHost> HierarchyEngine<H> {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            cache: NodeCache::new(),
            detector: ChangeDetector::new(),
            renderer: Renderer::new(),
            config,
            content_size: Vec2::ZERO,
            last_cull: None,
            last_layout: LayoutPass::default(),
            resync_pending: true,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &NodeCache {
        &self.cache
    }

    pub fn renderer(&self) -> &Renderer<H> {
        &self.renderer
    }

    /// Computed content size `(width, height)` after the last layout pass;
    /// the host sizes its scroll container from this.
    pub fn content_size(&self) -> Vec2 {
        self.content_size
    }

    /// Stats from the last layout pass (nodes visited, max width).
    pub fn layout_stats(&self) -> LayoutPass {
        self.last_layout
    }

    /// Stats of the label and toggle pools, in that order.
    pub fn pool_stats(&self) -> (PoolStats, PoolStats) {
        (
            self.renderer.labels().stats(),
            self.renderer.toggles().stats(),
        )
    }

    /// Invalidates the cached cull box so the next tick performs a full
    /// render even if nothing scrolled.
    pub fn request_refresh(&mut self) {
        self.last_cull = None;
    }

    /// Forces a full resync + layout + render on the next tick (or now, via
    /// [`Self::rebuild`]). Also the recovery path after a
    /// [`HierarchyError::StructuralCycle`].
    pub fn invalidate(&mut self) {
        self.resync_pending = true;
        self.detector.reset();
        self.last_cull = None;
    }

    /// Drops all engine state (cache and detector). Widget pools survive; the
    /// next render simply reuses them.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.detector.reset();
        self.content_size = Vec2::ZERO;
        self.last_cull = None;
        self.last_layout = LayoutPass::default();
        self.resync_pending = true;
    }

    /// Runs one display tick: resync when the change detector (or a pending
    /// invalidation) demands it, then re-render when the cull box moved.
    pub fn tick<S: SceneSource>(&mut self, source: &S, host: &mut H, view: &ViewRect) {
        if self.resync_pending || self.detector.needs_resync(source, &self.cache) {
            self.resync_pending = false;
            let opts = ResyncOptions {
                expanded_default: self.config.expanded_default,
                group_row_height: self.config.group_row_height,
                group_row_width: self.config.group_row_width,
            };
            let root = self.cache.resync(source, &opts);
            self.detector.observe(source);
            self.relayout(root, 0.0);
            self.last_cull = None;
        }

        let cull = compute_cull_box(view, self.content_size, self.config.cull_margin);
        if self.last_cull != Some(cull) {
            self.render(host, cull);
            self.last_cull = Some(cull);
        }
    }

    /// Forces full resync + layout + render now.
    pub fn rebuild<S: SceneSource>(&mut self, source: &S, host: &mut H, view: &ViewRect) {
        self.invalidate();
        self.tick(source, host, view);
    }

    /// Routes a host-reported widget interaction.
    ///
    /// A toggle click flips the row's expansion and synchronously runs a
    /// partial re-layout (`row_floor` = the toggled row, so sibling subtrees
    /// above it keep their cached geometry) followed by a full render pass —
    /// row positions of everything after the toggle point shift. A label
    /// click resolves to a selection event when the row has a backing object.
    pub fn handle_interaction(
        &mut self,
        interaction: RowInteraction,
        host: &mut H,
        view: &ViewRect,
    ) -> Result<Option<HierarchyEvent>, HierarchyError> {
        match interaction {
            RowInteraction::ToggleClicked(slot) => {
                let root = self.cache.tree().find_root(slot)?;
                let row_floor = {
                    let Some(node) = self.cache.tree_mut().get_mut(slot) else {
                        return Ok(None);
                    };
                    node.expanded = !node.expanded;
                    node.row
                };
                self.relayout(root, row_floor);
                let cull = compute_cull_box(view, self.content_size, self.config.cull_margin);
                self.render(host, cull);
                self.last_cull = Some(cull);
                Ok(None)
            }
            RowInteraction::LabelClicked(slot) => Ok(self
                .cache
                .tree()
                .get(slot)
                .and_then(|n| n.identity)
                .map(HierarchyEvent::Selected)),
        }
    }

    /// Expansion state of a row's backing object, for hosts that mirror it.
    pub fn is_expanded(&self, id: NodeId) -> Option<bool> {
        let slot = self.cache.slot_of(id)?;
        self.cache.tree().get(slot).map(|n| n.expanded)
    }

    fn relayout(&mut self, root: LayoutSlot, row_floor: f32) {
        let indent = self.config.indent_width;
        let mut pass = LayoutPass::default();
        let height = self
            .cache
            .tree_mut()
            .compute_dimensions(root, 0, row_floor, indent, &mut pass);
        self.content_size = vec2(pass.max_width, height);
        self.last_layout = pass;
    }

    fn render(&mut self, host: &mut H, cull: Rect) {
        let Some(root) = self.cache.root() else {
            return;
        };
        self.renderer.render(
            self.cache.tree_mut(),
            root,
            host,
            cull,
            self.config.indent_width,
            self.config.toggle_width,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_cache::mock::{MockObject, MockScene};
    use crate::render::mock::MockHost;

    fn scene_one() -> MockScene {
        MockScene::new(vec![(
            "Scene1",
            vec![
                MockObject::new(1, "A"),
                MockObject::new(2, "B").with_children(vec![MockObject::new(3, "C")]),
            ],
        )])
    }

    fn view() -> ViewRect {
        ViewRect::at_origin(vec2(400.0, 600.0))
    }

    fn active_rows(engine: &HierarchyEngine<MockHost>) -> Vec<String> {
        let mut rows: Vec<(f32, String)> = engine
            .renderer()
            .labels()
            .iter_active()
            .map(|(_, w)| (w.rect.min.y, w.text.clone()))
            .collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        rows.into_iter().map(|(_, text)| text).collect()
    }

    #[test]
    fn test_rebuild_shows_collapsed_top_level() {
        let scene = scene_one();
        let mut host = MockHost::new();
        let mut engine = HierarchyEngine::new(EngineConfig::default());
        engine.rebuild(&scene, &mut host, &view());

        // Everything collapsed by default: group header plus its two
        // top-level objects, C hidden under collapsed B.
        assert_eq!(active_rows(&engine), vec!["Scene1", "A", "B"]);
    }

    #[test]
    fn test_toggle_reveals_child_below_parent() {
        let scene = scene_one();
        let mut host = MockHost::new();
        let mut engine = HierarchyEngine::new(EngineConfig::default());
        engine.rebuild(&scene, &mut host, &view());

        let b_slot = engine.cache().slot_of(2).unwrap();
        let (a_row_before, b_row, b_height) = {
            let tree = engine.cache().tree();
            let a = tree.get(engine.cache().slot_of(1).unwrap()).unwrap();
            let b = tree.get(b_slot).unwrap();
            (a.row, b.row, b.height)
        };

        let event = engine
            .handle_interaction(RowInteraction::ToggleClicked(b_slot), &mut host, &view())
            .unwrap();
        assert_eq!(event, None);

        assert_eq!(active_rows(&engine), vec!["Scene1", "A", "B", "C"]);
        let tree = engine.cache().tree();
        let a = tree.get(engine.cache().slot_of(1).unwrap()).unwrap();
        let b = tree.get(b_slot).unwrap();
        let c = tree.get(engine.cache().slot_of(3).unwrap()).unwrap();
        assert_eq!(a.row, a_row_before);
        assert_eq!(c.column, b.column + 1);
        assert_eq!(c.row, b_row + b_height);
        assert!(engine.is_expanded(2).unwrap());
    }

    #[test]
    fn test_label_click_emits_selection_event() {
        let scene = scene_one();
        let mut host = MockHost::new();
        let mut engine = HierarchyEngine::new(EngineConfig::default());
        engine.rebuild(&scene, &mut host, &view());

        let a_slot = engine.cache().slot_of(1).unwrap();
        let event = engine
            .handle_interaction(RowInteraction::LabelClicked(a_slot), &mut host, &view())
            .unwrap();
        assert_eq!(event, Some(HierarchyEvent::Selected(1)));

        // Group header rows carry no identity and select nothing.
        let group_slot = engine.cache().group_slot("Scene1").unwrap();
        let event = engine
            .handle_interaction(RowInteraction::LabelClicked(group_slot), &mut host, &view())
            .unwrap();
        assert_eq!(event, None);
    }

    #[test]
    fn test_tick_resyncs_only_on_structural_change() {
        let scene = scene_one();
        let mut host = MockHost::new();
        let mut engine = HierarchyEngine::new(EngineConfig::default());
        engine.rebuild(&scene, &mut host, &view());
        let visits_after_rebuild = engine.layout_stats().nodes_visited;

        // Steady tick: no resync, no layout pass.
        engine.tick(&scene, &mut host, &view());
        assert_eq!(engine.layout_stats().nodes_visited, visits_after_rebuild);

        // Structural change: B lost its child.
        let changed = MockScene::new(vec![(
            "Scene1",
            vec![MockObject::new(1, "A"), MockObject::new(2, "B")],
        )]);
        engine.tick(&changed, &mut host, &view());
        assert!(engine.cache().slot_of(3).is_none());
    }

    #[test]
    fn test_structural_cycle_surfaces_error() {
        let scene = scene_one();
        let mut host = MockHost::new();
        let mut engine = HierarchyEngine::new(EngineConfig::default());
        engine.rebuild(&scene, &mut host, &view());

        // Corrupt the shadow tree: A becomes its own ancestor.
        let a_slot = engine.cache.slot_of(1).unwrap();
        let b_slot = engine.cache.slot_of(2).unwrap();
        engine.cache.tree_mut().get_mut(a_slot).unwrap().parent = Some(b_slot);
        engine.cache.tree_mut().get_mut(b_slot).unwrap().parent = Some(a_slot);

        let result =
            engine.handle_interaction(RowInteraction::ToggleClicked(a_slot), &mut host, &view());
        assert!(matches!(
            result,
            Err(HierarchyError::StructuralCycle { .. })
        ));

        // Recovery: invalidate + tick rebuilds the tree wholesale.
        engine.invalidate();
        engine.tick(&scene, &mut host, &view());
        assert_eq!(active_rows(&engine), vec!["Scene1", "A", "B"]);
    }

    #[test]
    fn test_content_size_tracks_layout() {
        let scene = scene_one();
        let mut host = MockHost::new();
        let mut engine = HierarchyEngine::new(EngineConfig::default());
        engine.rebuild(&scene, &mut host, &view());

        // Group row (22) + A (20) + B (20).
        assert_eq!(engine.content_size().y, 62.0);

        let b_slot = engine.cache().slot_of(2).unwrap();
        engine
            .handle_interaction(RowInteraction::ToggleClicked(b_slot), &mut host, &view())
            .unwrap();
        assert_eq!(engine.content_size().y, 82.0);
    }

    #[test]
    fn test_request_refresh_forces_render_without_scroll() {
        let scene = scene_one();
        let mut host = MockHost::new();
        let mut engine = HierarchyEngine::new(EngineConfig::default());
        engine.rebuild(&scene, &mut host, &view());
        let created = host.labels_created;

        // Same view, nothing changed: tick renders nothing new.
        engine.tick(&scene, &mut host, &view());
        assert_eq!(host.labels_created, created);

        engine.request_refresh();
        engine.tick(&scene, &mut host, &view());
        // Render ran again, reusing pooled widgets.
        assert_eq!(host.labels_created, created);
        assert_eq!(engine.pool_stats().0.in_use, 3);
    }
}
