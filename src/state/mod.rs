//! State management modules for the outliner viewer.
//!
//! This module contains state-only logic (no UI concerns):
//! - Scene state (scene source, file path, churn mode)
//! - Selection state (selected object)
//! - Theme state (theme manager, current theme)
//! - Layout state (split ratio, indent width)

mod scene_state;
mod selection;
mod theme_state;
mod layout_state;

pub use scene_state::SceneState;
pub use selection::SelectionState;
pub use theme_state::ThemeState;
pub use layout_state::LayoutState;
