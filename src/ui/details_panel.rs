//! Details panel UI rendering.
//!
//! Shows the selected object: source-reported fields plus the layout state
//! the engine has cached for its row.

use crate::app::AppState;
use egui::{Color32, RichText, ScrollArea};
use rhier::{SceneNode, SceneSource, ThemeColors};

/// Renders the details panel for the selected object.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
/// * `theme_colors` - Color palette for the current theme
pub fn render_details_panel(ui: &mut egui::Ui, state: &AppState, theme_colors: &ThemeColors) {
    let selected = state
        .scene
        .source()
        .zip(state.selection.selected_id())
        .and_then(|(source, id)| source.get_node(id).map(|node| (node, id)));

    let Some((node, id)) = selected else {
        ui.label("Object details (select a row to view)");
        return;
    };

    ui.label(RichText::new(format!("Details for object: {}", id)).strong());
    ui.separator();

    let available_height = ui.available_height();
    ScrollArea::vertical()
        .id_salt("details_scroll_area")
        .max_height(available_height)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let object_json = serde_json::json!({
                "id": node.id(),
                "name": node.display_name(),
                "active": node.is_active(),
                "children": node.num_children(),
                "preferred_size": [node.preferred_width(), node.preferred_height()],
            });
            ui.colored_label(
                theme_colors.accent,
                serde_json::to_string(&object_json).unwrap_or_default(),
            );

            ui.add_space(10.0);

            ui.label(RichText::new("Layout state:").strong());
            let slot = state.engine.cache().slot_of(id);
            match slot.and_then(|s| state.engine.cache().tree().get(s)) {
                Some(layout) => {
                    let layout_json = serde_json::json!({
                        "row": layout.row,
                        "column": layout.column,
                        "width": layout.width,
                        "height": layout.height,
                        "expanded": layout.expanded,
                    });
                    ui.colored_label(
                        theme_colors.node_active,
                        serde_json::to_string(&layout_json).unwrap_or_default(),
                    );
                }
                None => {
                    ui.colored_label(Color32::GRAY, "(not cached)");
                }
            }

            ui.add_space(10.0);

            ui.label(RichText::new("Children:").strong());
            if node.num_children() == 0 {
                ui.colored_label(Color32::GRAY, "(none)");
            } else {
                for index in 0..node.num_children() {
                    if let Some(child) = node.child_at(index) {
                        let color = if child.is_active() {
                            theme_colors.node_active
                        } else {
                            theme_colors.node_inactive
                        };
                        ui.colored_label(
                            color,
                            format!("{} (id {})", child.display_name(), child.id()),
                        );
                    }
                }
            }
        });
}
