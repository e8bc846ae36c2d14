//! Status bar UI rendering.
//!
//! Handles the bottom status bar displaying memory usage, scene metadata and
//! engine statistics (layout visits, pooled widgets).

use crate::app::AppState;
use crate::utils::{format_count, format_memory_mb, get_current_memory_mb};
use eframe::egui;
use egui::RichText;
use rhier::{DynSceneSource, SceneMetadata};

/// Renders the status panel at the bottom of the window.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState) {
    ui.horizontal(|ui| {
        // Always show memory usage first
        let memory_text = format_memory_mb(get_current_memory_mb());
        ui.label(RichText::new(&memory_text).strong());

        let Some(source) = state.scene.source() else {
            ui.label(RichText::new("| No scene loaded").strong());
            return;
        };

        ui.label(RichText::new("|").strong());

        let metadata = source.metadata();
        let groups = metadata
            .total_groups()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".to_string());
        let nodes = metadata
            .total_nodes()
            .map(format_count)
            .unwrap_or_else(|| "?".to_string());

        match source {
            DynSceneSource::Virtual(virtual_scene) => {
                ui.label(
                    RichText::new(format!(
                        "Virtual Scene | Groups: {} | Objects: {} | Edits: {}",
                        groups,
                        nodes,
                        virtual_scene.churn_count()
                    ))
                    .strong(),
                );
            }
            DynSceneSource::File(_) => {
                let file = state
                    .scene
                    .file_path()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "?".to_string());
                ui.label(
                    RichText::new(format!(
                        "{} (v{}) | Groups: {} | Objects: {}",
                        file,
                        metadata.version(),
                        groups,
                        nodes
                    ))
                    .strong(),
                );
            }
        }

        // Engine statistics: how little work the incremental passes did.
        let layout = state.engine.layout_stats();
        let (labels, toggles) = state.engine.pool_stats();
        ui.label(RichText::new("|").strong());
        ui.label(
            RichText::new(format!(
                "Layout visits: {} | Labels: {}/{} | Toggles: {}/{} | Instantiated: {}",
                layout.nodes_visited,
                labels.in_use,
                labels.in_use + labels.pooled,
                toggles.in_use,
                toggles.in_use + toggles.pooled,
                state.row_host.widgets_instantiated,
            ))
            .strong(),
        );
    });
}
