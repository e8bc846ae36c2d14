//! Application-level coordination and workflow management.
//!
//! Handles high-level application operations like scene loading, error
//! handling, and routing outliner interactions into the engine.

use crate::app::AppState;
use crate::io::{AsyncLoader, LoadResult};
use rhier::{HierarchyError, HierarchyEvent, RowInteraction};
use std::path::PathBuf;

/// How many frames sit between two churn edits of a live virtual scene.
const CHURN_INTERVAL_FRAMES: u64 = 30;

/// Coordinates application-level operations and workflows.
///
/// This struct is responsible for:
/// - Managing scene loading workflows
/// - Handling loading completion
/// - Coordinating virtual scene generation and churn
/// - Routing row interactions into the engine
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Initiates asynchronous scene file loading.
    ///
    /// Immediately clears previous scene data to show the loading indicator.
    pub fn open_file(
        state: &mut AppState,
        loader: &mut AsyncLoader,
        path: PathBuf,
        ctx: &egui::Context,
    ) {
        state.reset_scene_state();
        loader.start_file_load(path, ctx);
    }

    /// Checks for loading completion and applies results to application state.
    ///
    /// Called once per frame in the update loop.
    /// Returns true if a load operation completed (success or error).
    pub fn check_loading_completion(state: &mut AppState, loader: &mut AsyncLoader) -> bool {
        match loader.check_completion() {
            LoadResult::Success { source, path } => {
                state.scene.load_scene(source, path);
                state.error_message = None;
                state.selection.clear();
                state.engine.invalidate();
                true
            }
            LoadResult::Error(error_msg) => {
                state.error_message = Some(format!("Error loading scene: {}", error_msg));
                state.scene.clear();
                true
            }
            LoadResult::None => false,
        }
    }

    /// Generates and loads a virtual scene in-memory.
    ///
    /// This is useful for testing and demonstration purposes.
    pub fn open_virtual_scene(state: &mut AppState, loader: &mut AsyncLoader) {
        match loader.load_virtual_scene() {
            Ok(source) => {
                state.scene.load_scene(source, None);
                state.error_message = None;
                state.selection.clear();
                state.engine.invalidate();
            }
            Err(e) => {
                state.error_message = Some(format!("Error generating virtual scene: {}", e));
            }
        }
    }

    /// Applies one churn edit to a live virtual scene every few frames.
    ///
    /// The structural change is picked up by the engine's change detector on
    /// the next tick; nothing here touches the engine directly.
    pub fn drive_churn(state: &mut AppState) {
        if !state.scene.churn_enabled() {
            return;
        }
        if state.frame_count % CHURN_INTERVAL_FRAMES != 0 {
            return;
        }
        if let Some(virtual_scene) = state.scene.source_mut().and_then(|s| s.as_virtual_mut()) {
            virtual_scene.churn();
        }
    }

    /// Routes a row interaction from the outliner panel into the engine.
    ///
    /// Toggle clicks re-layout and re-render synchronously inside the engine;
    /// selection events update the viewer's selection state. A structural
    /// cycle is surfaced in the error line and recovered by forcing a full
    /// resync on the next tick.
    pub fn handle_row_interaction(state: &mut AppState, interaction: RowInteraction) {
        let view = state.last_view;
        let result = state
            .engine
            .handle_interaction(interaction, &mut state.row_host, &view);
        match result {
            Ok(Some(HierarchyEvent::Selected(id))) => {
                state.selection.select(id);
            }
            Ok(None) => {}
            Err(error @ HierarchyError::StructuralCycle { .. }) => {
                state.error_message = Some(format!("Corrupt hierarchy: {}", error));
                state.engine.invalidate();
            }
            Err(error) => {
                state.error_message = Some(error.to_string());
            }
        }
    }

    /// Forces a full resync + layout + render on the next frame.
    pub fn request_rebuild(state: &mut AppState) {
        state.engine.invalidate();
    }
}
