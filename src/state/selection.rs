//! Selection state management.
//!
//! This module encapsulates the user's current row selection in the outliner.

use rhier::NodeId;

/// State related to user selection.
///
/// Responsibilities:
/// - Tracking the selected object ID
/// - Providing intent-revealing selection queries
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    /// Currently selected object ID
    selected_id: Option<NodeId>,
}

impl SelectionState {
    /// Creates a new selection state with nothing selected.
    pub fn new() -> Self {
        Self { selected_id: None }
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.selected_id = None;
    }

    // ===== Queries =====

    /// Returns the currently selected object ID, if any.
    pub fn selected_id(&self) -> Option<NodeId> {
        self.selected_id
    }

    /// Returns true if the given object is selected.
    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selected_id == Some(id)
    }

    // ===== Mutations =====

    /// Selects an object.
    ///
    /// # Returns
    /// `true` if this changed the selection.
    pub fn select(&mut self, id: NodeId) -> bool {
        let changed = self.selected_id != Some(id);
        self.selected_id = Some(id);
        changed
    }
}
