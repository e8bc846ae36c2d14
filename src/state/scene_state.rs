//! Scene source and file state management.
//!
//! This module encapsulates all state related to the loaded scene snapshot:
//! the source itself, its file path, and live-churn mode for virtual scenes.

use rhier::DynSceneSource;
use std::path::PathBuf;

/// State related to the loaded scene source.
///
/// Responsibilities:
/// - Managing the scene source lifetime
/// - Tracking the source file path (None for virtual scenes)
/// - Tracking churn mode for live virtual scenes
#[derive(Default)]
pub struct SceneState {
    /// The currently loaded scene source (if any)
    source: Option<DynSceneSource>,
    /// Path to the currently loaded file (None for virtual scenes)
    file_path: Option<PathBuf>,
    /// Whether the virtual scene mutates itself over time
    churn_enabled: bool,
}

impl SceneState {
    /// Creates a new scene state with no loaded source.
    pub fn new() -> Self {
        Self {
            source: None,
            file_path: None,
            churn_enabled: false,
        }
    }

    /// Loads a new scene source.
    ///
    /// # Arguments
    /// * `source` - The scene source to load
    /// * `path` - Optional file path (None for virtual scenes)
    pub fn load_scene(&mut self, source: DynSceneSource, path: Option<PathBuf>) {
        self.source = Some(source);
        self.file_path = path;
        self.churn_enabled = false;
    }

    /// Clears all scene state.
    pub fn clear(&mut self) {
        self.source = None;
        self.file_path = None;
        self.churn_enabled = false;
    }

    // ===== Queries =====

    /// Returns a reference to the loaded scene source, if any.
    pub fn source(&self) -> Option<&DynSceneSource> {
        self.source.as_ref()
    }

    /// Returns a mutable reference to the loaded scene source, if any.
    pub fn source_mut(&mut self) -> Option<&mut DynSceneSource> {
        self.source.as_mut()
    }

    /// Returns the file path of the loaded scene, if any.
    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Returns true when the loaded source is a virtual scene.
    pub fn is_virtual(&self) -> bool {
        matches!(self.source, Some(DynSceneSource::Virtual(_)))
    }

    /// Returns whether live churn is enabled.
    pub fn churn_enabled(&self) -> bool {
        self.churn_enabled
    }

    // ===== Mutations =====

    /// Enables or disables live churn (virtual scenes only).
    pub fn set_churn_enabled(&mut self, enabled: bool) {
        self.churn_enabled = enabled && self.is_virtual();
    }
}
