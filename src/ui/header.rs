//! Header panel UI rendering.
//!
//! Handles the top menu bar with file controls, rebuild, churn mode and the
//! theme selector.

use crate::app::AppState;
use egui::Color32;
use std::path::PathBuf;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User picked a scene file to open
    OpenFileRequested(PathBuf),
    /// User clicked "Virtual Scene"
    OpenVirtualSceneRequested,
    /// User clicked "Rebuild"
    RebuildRequested,
}

/// Renders the application header with file controls.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if ui.button("📁 Open Scene").clicked() {
            let mut dialog = rfd::FileDialog::new()
                .add_filter("Scene Snapshots", &["hier", "jsonl", "br"])
                .add_filter("All Files", &["*"]);

            if let Ok(cwd) = std::env::current_dir() {
                dialog = dialog.set_directory(cwd);
            }

            if let Some(path) = dialog.pick_file() {
                interaction = Some(HeaderInteraction::OpenFileRequested(path));
            }
        }

        if ui.button("🔮 Virtual Scene").clicked() {
            interaction = Some(HeaderInteraction::OpenVirtualSceneRequested);
        }

        ui.separator();

        if state.scene.source().is_some() {
            if ui.button("⟳ Rebuild").clicked() {
                interaction = Some(HeaderInteraction::RebuildRequested);
            }

            if state.scene.is_virtual() {
                let mut churn = state.scene.churn_enabled();
                let response = ui.checkbox(&mut churn, "⚡ Live churn");
                if response.changed() {
                    state.scene.set_churn_enabled(churn);
                }
                if response.hovered() {
                    response.on_hover_text(
                        "Mutate the virtual scene every few frames; the change \
                         detector picks the edits up and resyncs",
                    );
                }
            }
        }

        // Push theme selector to the right
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let old_theme = state.theme.current_theme_name().to_string();
            let mut current_theme = old_theme.clone();
            egui::ComboBox::from_id_salt("theme_selector")
                .selected_text(&current_theme)
                .show_ui(ui, |ui| {
                    for theme_name in state.theme.theme_manager().list_themes() {
                        ui.selectable_value(&mut current_theme, theme_name.to_string(), theme_name);
                    }
                });

            if old_theme != current_theme {
                state.theme.set_theme(current_theme);
                ui.ctx().request_repaint();
            }

            ui.label("Theme:");
        });
    });

    if let Some(err) = &state.error_message {
        ui.colored_label(Color32::RED, err);
    }

    interaction
}
