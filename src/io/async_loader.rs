//! Asynchronous scene snapshot loading.
//!
//! This module handles loading `.hier` scene files in background threads,
//! keeping the GUI responsive during file I/O and Brotli decompression.

use crate::io::LoadingState;
use eframe::egui;
use rhier::{DynSceneSource, SceneFileReader, SceneReader, VirtualSceneReader};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;

/// Result of a completed scene loading operation.
pub enum LoadResult {
    /// Loading completed successfully
    Success {
        /// The loaded scene source
        source: DynSceneSource,
        /// Path to the file that was loaded (None for virtual scenes)
        path: Option<PathBuf>,
    },
    /// Loading failed with an error
    Error(String),
    /// No loading operation in progress
    None,
}

/// Manages asynchronous loading of scene files.
///
/// This struct coordinates background thread file loading with the main GUI
/// thread, ensuring responsive UI during potentially long-running I/O.
pub struct AsyncLoader {
    /// Shared loading state flag
    loading_state: Arc<Mutex<LoadingState>>,

    /// Channel receiver for loading results
    loading_receiver: Option<Receiver<Result<DynSceneSource, String>>>,

    /// Path of the file currently being loaded
    pending_load_path: Option<PathBuf>,
}

impl AsyncLoader {
    /// Creates a new async loader with no active loading operation.
    pub fn new() -> Self {
        Self {
            loading_state: Arc::new(Mutex::new(LoadingState::new())),
            loading_receiver: None,
            pending_load_path: None,
        }
    }

    /// Returns true while a background load is running.
    pub fn is_loading(&self) -> bool {
        self.loading_state
            .lock()
            .map(|state| state.in_progress)
            .unwrap_or(false)
    }

    /// Starts loading a scene file on a background thread.
    ///
    /// Repaint is requested when the thread finishes so the result is picked
    /// up on the next frame even if the UI is idle.
    pub fn start_file_load(&mut self, path: PathBuf, ctx: &egui::Context) {
        if self.is_loading() {
            return;
        }

        let (sender, receiver) = channel();
        self.loading_receiver = Some(receiver);
        self.pending_load_path = Some(path.clone());

        if let Ok(mut state) = self.loading_state.lock() {
            state.in_progress = true;
        }

        let loading_state = Arc::clone(&self.loading_state);
        let ctx = ctx.clone();
        thread::spawn(move || {
            let result = match path.to_str() {
                Some(path_str) => SceneFileReader::new()
                    .read(path_str)
                    .map_err(|e| format!("{:#}", e)),
                None => Err("Invalid file path".to_string()),
            };

            let _ = sender.send(result);
            if let Ok(mut state) = loading_state.lock() {
                state.in_progress = false;
            }
            ctx.request_repaint();
        });
    }

    /// Generates a virtual scene synchronously (no I/O involved).
    pub fn load_virtual_scene(&self) -> anyhow::Result<DynSceneSource> {
        VirtualSceneReader::new().read("virtual://scene")
    }

    /// Checks whether a background load finished, consuming its result.
    pub fn check_completion(&mut self) -> LoadResult {
        let Some(receiver) = &self.loading_receiver else {
            return LoadResult::None;
        };

        match receiver.try_recv() {
            Ok(Ok(source)) => {
                self.loading_receiver = None;
                let path = self.pending_load_path.take();
                LoadResult::Success { source, path }
            }
            Ok(Err(message)) => {
                self.loading_receiver = None;
                self.pending_load_path = None;
                LoadResult::Error(message)
            }
            Err(_) => LoadResult::None,
        }
    }
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}
