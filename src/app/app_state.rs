//! Centralized application state for the outliner viewer.
//!
//! This module implements the State pattern by composing focused state
//! components that each manage a specific aspect of the application's state.
//! This approach:
//! - Keeps invariants local within each component
//! - Allows borrow-checker friendly access to different state aspects
//! - Provides intent-revealing methods for state mutations
//! - Mirrors established Rust UI projects (dioxus, iced)

use crate::rendering::row_host::EguiRowHost;
use crate::state::{LayoutState, SceneState, SelectionState, ThemeState};
use rhier::{EngineConfig, HierarchyEngine, ViewRect};

/// Main application state composed of focused state components.
///
/// The hierarchy engine lives here too: exactly one instance per viewer,
/// constructed up front and torn down with the app, never a global.
pub struct AppState {
    // ===== Focused State Components =====
    /// Scene source and file state
    pub scene: SceneState,

    /// Selection state
    pub selection: SelectionState,

    /// Theme and styling state
    pub theme: ThemeState,

    /// UI layout state
    pub layout: LayoutState,

    // ===== Engine =====
    /// The incremental hierarchy engine driving the outliner panel
    pub engine: HierarchyEngine<EguiRowHost>,

    /// Widget factory handed to the engine during render passes
    pub row_host: EguiRowHost,

    /// Scroll view used for the last render, reused when routing clicks
    pub last_view: ViewRect,

    /// Raw scroll offset of the outliner scroll area, in points
    pub scroll_px: egui::Vec2,

    // ===== Top-Level State =====
    /// Current error message to display (if any)
    pub error_message: Option<String>,

    /// Frame counter driving periodic churn of virtual scenes
    pub frame_count: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates a new application state with default values.
    pub fn new() -> Self {
        Self {
            scene: SceneState::new(),
            selection: SelectionState::new(),
            theme: ThemeState::new(),
            layout: LayoutState::new(),
            engine: HierarchyEngine::new(EngineConfig::default()),
            row_host: EguiRowHost::new(),
            last_view: ViewRect::at_origin(egui::Vec2::ZERO),
            scroll_px: egui::Vec2::ZERO,
            error_message: None,
            frame_count: 0,
        }
    }

    /// Creates a new AppState with theme and layout settings loaded from
    /// persistent storage.
    pub fn with_theme_and_layout(theme_name: String, layout: LayoutState) -> Self {
        let config = EngineConfig {
            indent_width: layout.indent_width(),
            ..EngineConfig::default()
        };
        Self {
            scene: SceneState::new(),
            selection: SelectionState::new(),
            theme: ThemeState::with_theme(theme_name),
            layout,
            engine: HierarchyEngine::new(config),
            row_host: EguiRowHost::new(),
            last_view: ViewRect::at_origin(egui::Vec2::ZERO),
            scroll_px: egui::Vec2::ZERO,
            error_message: None,
            frame_count: 0,
        }
    }

    // ===== High-Level Coordination Methods =====

    /// Resets scene-related state when loading a new scene.
    ///
    /// This clears the scene source, selection, and the engine's cache.
    pub fn reset_scene_state(&mut self) {
        self.scene.clear();
        self.selection.clear();
        self.engine.clear();
        self.error_message = None;
    }
}
