use anyhow::Result;
use egui::{vec2, Rect};
use rhier::{
    DynSceneSource, EngineConfig, HierarchyEngine, HierarchyEvent, LabelWidget, NodeId,
    PoolWidget, RowInteraction, SceneFileReader, SceneMetadata, SceneNode, SceneReader,
    SceneSource, SceneWriter, ToggleWidget, ViewRect, VirtualSceneReader, WidgetHost,
};
use std::env;
use std::fs;

// ============================================================================
// Recording widget host
// ============================================================================

#[derive(Clone)]
struct TestLabel {
    visible: bool,
    rect: Rect,
    text: String,
    enabled: bool,
    identity: Option<NodeId>,
}

impl PoolWidget for TestLabel {
    fn set_active(&mut self, active: bool) {
        self.visible = active;
    }
}

impl LabelWidget for TestLabel {
    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
    fn bind(&mut self, _row: usize, identity: Option<NodeId>) {
        self.identity = identity;
    }
}

#[derive(Clone)]
struct TestToggle {
    visible: bool,
    expanded: bool,
}

impl PoolWidget for TestToggle {
    fn set_active(&mut self, active: bool) {
        self.visible = active;
    }
}

impl ToggleWidget for TestToggle {
    fn set_rect(&mut self, _rect: Rect) {}
    fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }
    fn bind(&mut self, _row: usize) {}
}

struct TestHost;

impl WidgetHost for TestHost {
    type Label = TestLabel;
    type Toggle = TestToggle;

    fn is_ready(&self) -> bool {
        true
    }
    fn create_label(&mut self) -> TestLabel {
        TestLabel {
            visible: false,
            rect: Rect::ZERO,
            text: String::new(),
            enabled: true,
            identity: None,
        }
    }
    fn create_toggle(&mut self) -> TestToggle {
        TestToggle {
            visible: false,
            expanded: false,
        }
    }
}

fn visible_rows(engine: &HierarchyEngine<TestHost>) -> Vec<String> {
    let mut rows: Vec<(f32, String)> = engine
        .renderer()
        .labels()
        .iter_active()
        .map(|(_, w)| (w.rect.min.y, w.text.clone()))
        .collect();
    rows.sort_by(|a, b| a.0.total_cmp(&b.0));
    rows.into_iter().map(|(_, text)| text).collect()
}

fn view() -> ViewRect {
    ViewRect::at_origin(vec2(400.0, 600.0))
}

// ============================================================================
// Scene file round trips
// ============================================================================

fn write_scene_one(path: &str) -> Result<()> {
    let mut writer = SceneWriter::new(path)?;
    writer.write_header(
        "1.0",
        serde_json::json!({
            "generator": "integration-test",
            "world": "TestWorld"
        }),
    )?;
    let group = writer.write_group("Scene1")?;
    writer.write_node(1, None, group, "A", true, 60.0, 20.0, false)?;
    writer.write_node(2, None, group, "B", true, 60.0, 20.0, false)?;
    writer.write_node(3, Some(2), group, "C", false, 72.0, 20.0, false)?;
    writer.write_footer()?;
    Ok(())
}

#[test]
fn test_write_and_read_basic_scene() -> Result<()> {
    let test_file = env::temp_dir().join("rhier_basic.hier");
    let test_file = test_file.to_str().unwrap();
    let _ = fs::remove_file(test_file);

    write_scene_one(test_file)?;

    let reader = SceneFileReader::new();
    let scene = reader.read(test_file)?;

    // Verify metadata
    assert_eq!(scene.metadata().version(), "1.0");
    assert_eq!(
        scene.metadata().header_data()["generator"],
        "integration-test"
    );
    assert_eq!(scene.metadata().total_groups(), Some(1));
    assert_eq!(scene.metadata().total_nodes(), Some(3));

    // Verify groups and structure
    let groups = scene.groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].label, "Scene1");
    assert_eq!(groups[0].root_ids, vec![1, 2]);

    let b = scene.get_node(2).unwrap();
    assert_eq!(b.display_name(), "B");
    assert_eq!(b.num_children(), 1);

    let c = b.child_at(0).unwrap();
    assert_eq!(c.id(), 3);
    assert!(!c.is_active());
    assert_eq!(c.preferred_width(), 72.0);

    let _ = fs::remove_file(test_file);
    Ok(())
}

#[test]
fn test_write_and_read_brotli_scene() -> Result<()> {
    let test_file = env::temp_dir().join("rhier_compressed.hier.br");
    let test_file = test_file.to_str().unwrap();
    let _ = fs::remove_file(test_file);

    write_scene_one(test_file)?;

    let scene = SceneFileReader::new().read(test_file)?;
    assert_eq!(scene.metadata().total_nodes(), Some(3));
    assert_eq!(scene.get_node(2).unwrap().num_children(), 1);

    let _ = fs::remove_file(test_file);
    Ok(())
}

// ============================================================================
// Engine end to end
// ============================================================================

#[test]
fn test_collapsed_scene_shows_top_level_rows_only() -> Result<()> {
    let test_file = env::temp_dir().join("rhier_engine.hier");
    let test_file = test_file.to_str().unwrap();
    let _ = fs::remove_file(test_file);
    write_scene_one(test_file)?;

    let scene = SceneFileReader::new().read(test_file)?;
    let mut host = TestHost;
    let mut engine = HierarchyEngine::new(EngineConfig::default());
    engine.rebuild(&scene, &mut host, &view());

    assert_eq!(visible_rows(&engine), vec!["Scene1", "A", "B"]);

    let _ = fs::remove_file(test_file);
    Ok(())
}

#[test]
fn test_toggle_expands_subtree_in_place() -> Result<()> {
    let test_file = env::temp_dir().join("rhier_toggle.hier");
    let test_file = test_file.to_str().unwrap();
    let _ = fs::remove_file(test_file);
    write_scene_one(test_file)?;

    let scene = SceneFileReader::new().read(test_file)?;
    let mut host = TestHost;
    let mut engine = HierarchyEngine::new(EngineConfig::default());
    engine.rebuild(&scene, &mut host, &view());

    let a_slot = engine.cache().slot_of(1).unwrap();
    let b_slot = engine.cache().slot_of(2).unwrap();
    let (a_row, b_row, b_height, b_column) = {
        let tree = engine.cache().tree();
        let a = tree.get(a_slot).unwrap();
        let b = tree.get(b_slot).unwrap();
        (a.row, b.row, b.height, b.column)
    };

    let event = engine
        .handle_interaction(RowInteraction::ToggleClicked(b_slot), &mut host, &view())
        .unwrap();
    assert!(event.is_none());

    assert_eq!(visible_rows(&engine), vec!["Scene1", "A", "B", "C"]);
    let tree = engine.cache().tree();
    let c = tree.get(engine.cache().slot_of(3).unwrap()).unwrap();
    assert_eq!(c.column, b_column + 1);
    assert_eq!(c.row, b_row + b_height);
    assert_eq!(tree.get(a_slot).unwrap().row, a_row);

    // The inactive child is rendered dimmed.
    let c_label = engine
        .renderer()
        .labels()
        .iter_active()
        .find(|(_, w)| w.text == "C")
        .unwrap()
        .1;
    assert!(!c_label.enabled);

    // Selecting C reports its external identity.
    let c_slot = engine.cache().slot_of(3).unwrap();
    let event = engine
        .handle_interaction(RowInteraction::LabelClicked(c_slot), &mut host, &view())
        .unwrap();
    assert_eq!(event, Some(HierarchyEvent::Selected(3)));

    let _ = fs::remove_file(test_file);
    Ok(())
}

#[test]
fn test_resync_against_mutating_virtual_scene() -> Result<()> {
    let mut scene = VirtualSceneReader::with_config(1, 3, 4, 9).read("virtual://scene")?;
    let mut host = TestHost;
    let mut engine = HierarchyEngine::new(EngineConfig {
        expanded_default: true,
        ..EngineConfig::default()
    });
    engine.rebuild(&scene, &mut host, &view());

    let groups = scene.groups();
    let keep_id = groups[0].root_ids[0];
    let drop_id = groups[0].root_ids[1];
    let keep_slot = engine.cache().slot_of(keep_id).unwrap();
    assert!(engine.cache().slot_of(drop_id).is_some());

    // Destroy one root upstream; the change detector notices the group's
    // child count changed and the next tick resyncs.
    if let DynSceneSource::Virtual(data) = &mut scene {
        data.despawn(drop_id);
    }
    engine.tick(&scene, &mut host, &view());

    assert!(engine.cache().slot_of(drop_id).is_none());
    // Survivors keep their layout node rather than being reallocated.
    assert_eq!(engine.cache().slot_of(keep_id), Some(keep_slot));

    // Steady state after the resync: no further work requested.
    let visits = engine.layout_stats().nodes_visited;
    engine.tick(&scene, &mut host, &view());
    assert_eq!(engine.layout_stats().nodes_visited, visits);

    Ok(())
}

#[test]
fn test_large_scene_renders_only_viewport_rows() -> Result<()> {
    // One group, three levels, everything expanded: hundreds of rows, but
    // the pools only ever hold a viewport's worth of widgets.
    let scene = VirtualSceneReader::with_config(1, 3, 4, 1234).read("virtual://scene")?;
    let mut host = TestHost;
    let mut engine = HierarchyEngine::new(EngineConfig {
        expanded_default: true,
        cull_margin: 0.0,
        ..EngineConfig::default()
    });

    engine.rebuild(&scene, &mut host, &view());
    let total_rows = engine.cache().len() + 1; // + group header
    let (labels, _) = engine.pool_stats();

    let content_height = engine.content_size().y;
    if content_height > 600.0 {
        assert!(labels.in_use < total_rows);
        // Roughly a viewport of 20-unit rows, never the whole scene.
        assert!(labels.in_use <= (600.0_f32 / 20.0) as usize + 2);
    }

    Ok(())
}
