//! Panel orchestration and layout management.
//!
//! Coordinates all UI panels (header, outliner, details, status) and manages
//! their layout and interaction routing.

use crate::app::AppState;
use crate::presentation::color_mapping;
use crate::ui::{details_panel, header, outliner_panel, status_bar};
use rhier::RowInteraction;

/// Result of panel interactions that need to be handled by the application
/// coordinator.
pub enum PanelInteraction {
    /// User requested to open a scene file
    OpenFileRequested(std::path::PathBuf),
    /// User requested a virtual scene
    OpenVirtualSceneRequested,
    /// User requested a full rebuild
    RebuildRequested,
    /// A row widget in the outliner was clicked
    RowClicked(RowInteraction),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// This is the main entry point for rendering the entire UI, called from
    /// the eframe::App::update() implementation.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;

        // Get theme colors for rendering
        let theme_colors = color_mapping::theme_colors(
            state.theme.theme_manager(),
            state.theme.current_theme_name(),
        )
        .clone();

        // Header panel at the top
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state) {
                interaction = Some(match header_interaction {
                    header::HeaderInteraction::OpenFileRequested(path) => {
                        PanelInteraction::OpenFileRequested(path)
                    }
                    header::HeaderInteraction::OpenVirtualSceneRequested => {
                        PanelInteraction::OpenVirtualSceneRequested
                    }
                    header::HeaderInteraction::RebuildRequested => {
                        PanelInteraction::RebuildRequested
                    }
                });
            }
        });

        // Status panel at the very bottom
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        // Details panel above the status panel
        egui::TopBottomPanel::bottom("details_panel")
            .default_height(ctx.content_rect().height() * (1.0 - state.layout.split_ratio()))
            .resizable(true)
            .show(ctx, |ui| {
                egui::Frame::default().inner_margin(4.0).show(ui, |ui| {
                    details_panel::render_details_panel(ui, state, &theme_colors);
                });
            });

        // Central panel: the outliner itself
        let outliner_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(4))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default()
            .frame(outliner_frame)
            .show(ctx, |ui| {
                ui.heading("Hierarchy");
                ui.separator();

                if let Some(outliner_panel::OutlinerInteraction::Row(row)) =
                    outliner_panel::render_outliner_panel(ui, state, &theme_colors)
                {
                    interaction = Some(PanelInteraction::RowClicked(row));
                }
            });

        interaction
    }
}
