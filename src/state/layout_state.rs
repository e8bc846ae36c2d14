//! UI layout state management.
//!
//! This module encapsulates persisted UI layout values: the details-panel
//! split and the engine's indent step.

use serde::{Deserialize, Serialize};

/// State related to UI layout and sizing.
///
/// Responsibilities:
/// - Managing the details panel split ratio
/// - Tracking the outliner indent width
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutState {
    /// Split ratio between the outliner and the details panel (0.0 to 1.0)
    split_ratio: f32,
    /// Horizontal size of one indent step in the outliner
    indent_width: f32,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutState {
    /// Creates a new layout state with default values.
    pub fn new() -> Self {
        Self {
            split_ratio: 0.75,
            indent_width: 14.0,
        }
    }

    // ===== Queries =====

    /// Returns the outliner/details split ratio.
    pub fn split_ratio(&self) -> f32 {
        self.split_ratio
    }

    /// Returns the indent step width (applied to the engine at startup).
    pub fn indent_width(&self) -> f32 {
        self.indent_width
    }
}
