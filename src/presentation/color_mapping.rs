//! Color mapping for outliner rows.
//!
//! This module provides functions for:
//! - Picking the label color for a row from its state
//! - Getting the current theme's color palette

use egui::Color32;
use rhier::{ThemeColors, ThemeManager};

/// Returns a reference to the current theme's color palette.
///
/// # Arguments
/// * `theme_manager` - The theme manager instance
/// * `current_theme_name` - The name of the currently active theme
///
/// # Returns
/// A reference to the theme's colors, or the dark theme colors as fallback
pub fn theme_colors<'a>(
    theme_manager: &'a ThemeManager,
    current_theme_name: &str,
) -> &'a ThemeColors {
    theme_manager
        .get_theme(current_theme_name)
        .map(|t| &t.colors)
        .unwrap_or_else(|| {
            // Fallback to dark theme colors
            &theme_manager.get_theme("Dark").unwrap().colors
        })
}

/// Returns the label color for a row.
///
/// # Arguments
/// * `is_group` - Whether the row is a synthetic group header
/// * `enabled` - Whether the backing object is active
/// * `colors` - The current theme's color palette
pub fn row_label_color(is_group: bool, enabled: bool, colors: &ThemeColors) -> Color32 {
    if is_group {
        colors.group_label
    } else if enabled {
        colors.node_active
    } else {
        colors.node_inactive
    }
}
