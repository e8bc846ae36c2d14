//! Hierarchy Outliner Viewer
//!
//! Interactive viewer for scene hierarchy snapshots, built on the rhier
//! incremental layout engine and egui. Features:
//! - Virtualized outliner: widgets exist only for rows inside the viewport
//! - Expand/collapse with partial re-layout (only rows below the toggle move)
//! - Live change detection against a mutating virtual scene
//! - Asynchronous file loading with a loading indicator
//! - Multiple theme support with persistent preferences
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state management and coordination
//! - `state/` - State components (scene, selection, theme, layout)
//! - `io/` - Scene file loading
//! - `ui/` - UI panel rendering and interaction
//! - `rendering/` - Pooled row widgets and text utilities
//! - `presentation/` - Color mapping
//! - `utils/` - Formatting helpers

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use std::path::PathBuf;

mod app;
mod io;
mod presentation;
mod rendering;
mod state;
mod ui;
mod utils;

use app::{AppState, ApplicationCoordinator, SettingsCoordinator, ThemeCoordinator};
use io::AsyncLoader;
use state::LayoutState;
use ui::panel_manager::PanelManager;

const LAYOUT_KEY: &str = "layout_settings";

/// Main application entry point for the outliner viewer.
fn main() -> eframe::Result {
    // Parse command-line arguments to check for an initial file to load
    let initial_file = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_title("Hierarchy Outliner"),
        ..Default::default()
    };

    eframe::run_native(
        "Hierarchy Outliner",
        options,
        Box::new(move |cc| Ok(Box::new(OutlinerApp::new(cc, initial_file)))),
    )
}

/// The main outliner viewer application.
///
/// Delegates most functionality to coordinators:
/// - `ApplicationCoordinator` handles loading, churn and interaction routing
/// - `ThemeCoordinator` handles theme persistence and application
/// - `PanelManager` handles UI panel layout and rendering
struct OutlinerApp {
    /// Centralized application state
    state: AppState,
    /// Asynchronous scene file loader
    loader: AsyncLoader,
    /// Optional file to load on first frame
    pending_file_load: Option<PathBuf>,
}

impl Default for OutlinerApp {
    fn default() -> Self {
        Self {
            state: AppState::new(),
            loader: AsyncLoader::new(),
            pending_file_load: None,
        }
    }
}

impl OutlinerApp {
    /// Creates a new viewer instance with settings loaded from persistent
    /// storage. Optionally accepts an initial file path to load on startup.
    fn new(cc: &eframe::CreationContext<'_>, initial_file: Option<PathBuf>) -> Self {
        let current_theme_name = ThemeCoordinator::load_theme_from_storage(cc.storage);
        let layout: LayoutState = SettingsCoordinator::load_setting(cc.storage, LAYOUT_KEY);

        let mut state = AppState::with_theme_and_layout(current_theme_name, layout);
        // The egui context exists now; render passes may run.
        state.row_host.configure();

        Self {
            state,
            loader: AsyncLoader::new(),
            pending_file_load: initial_file,
        }
    }

    /// Handles panel interactions by delegating to ApplicationCoordinator.
    fn handle_panel_interaction(
        &mut self,
        interaction: ui::panel_manager::PanelInteraction,
        ctx: &egui::Context,
    ) {
        match interaction {
            ui::panel_manager::PanelInteraction::OpenFileRequested(path) => {
                ApplicationCoordinator::open_file(&mut self.state, &mut self.loader, path, ctx);
            }
            ui::panel_manager::PanelInteraction::OpenVirtualSceneRequested => {
                ApplicationCoordinator::open_virtual_scene(&mut self.state, &mut self.loader);
            }
            ui::panel_manager::PanelInteraction::RebuildRequested => {
                ApplicationCoordinator::request_rebuild(&mut self.state);
            }
            ui::panel_manager::PanelInteraction::RowClicked(row_interaction) => {
                ApplicationCoordinator::handle_row_interaction(&mut self.state, row_interaction);
            }
        }
    }
}

impl eframe::App for OutlinerApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        ThemeCoordinator::save_theme_to_storage(storage, self.state.theme.current_theme_name());
        SettingsCoordinator::save_setting(storage, LAYOUT_KEY, &self.state.layout);
    }

    /// Main update loop that renders all UI panels and handles state.
    ///
    /// 1. Check for async loading completion
    /// 2. Apply theme
    /// 3. Drive churn of a live virtual scene
    /// 4. Load initial file if specified via command line
    /// 5. Render all panels via PanelManager
    /// 6. Handle panel interactions
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.frame_count += 1;

        ApplicationCoordinator::check_loading_completion(&mut self.state, &mut self.loader);
        ThemeCoordinator::apply_current_theme(ctx, &self.state);
        ApplicationCoordinator::drive_churn(&mut self.state);

        // Load initial file if specified via command line (only on first frame)
        if let Some(path) = self.pending_file_load.take() {
            ApplicationCoordinator::open_file(&mut self.state, &mut self.loader, path, ctx);
        }

        if self.loader.is_loading() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
            });
            return;
        }

        if let Some(interaction) = PanelManager::render_all_panels(ctx, &mut self.state) {
            self.handle_panel_interaction(interaction, ctx);
        }

        // A churning scene keeps moving even without input events.
        if self.state.scene.churn_enabled() {
            ctx.request_repaint();
        }
    }
}
