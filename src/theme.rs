//! Theme support for the outliner viewer.
//!
//! Provides color schemes with outliner-specific roles (group header rows,
//! active/inactive object labels, expand toggles, selection) plus a
//! centralized manager that applies a theme to egui visuals.
//!
//! # Examples
//!
//! ```
//! use rhier::theme::ThemeManager;
//!
//! let manager = ThemeManager::new();
//! let dracula = manager.get_theme("Dracula").unwrap();
//! println!("Dracula background: {:?}", dracula.colors.background);
//! ```

use egui::Color32;
use std::collections::HashMap;

/// Complete color palette for a theme, covering all outliner UI elements
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Background colors
    pub background: Color32,
    pub panel_background: Color32,
    pub extreme_background: Color32,

    // Foreground colors
    pub text: Color32,
    pub text_dim: Color32,

    // Interactive colors
    pub selection: Color32,
    pub hover: Color32,
    pub border: Color32,

    // Row colors
    /// Group header row labels (scenes/worlds)
    pub group_label: Color32,
    /// Labels of active objects
    pub node_active: Color32,
    /// Labels of inactive objects (dimmed)
    pub node_inactive: Color32,
    /// Expand/collapse toggle glyphs
    pub toggle: Color32,
    /// Indent guide lines
    pub guide: Color32,

    // Accents
    pub accent: Color32,
    pub warning: Color32,
    pub error: Color32,
}

/// A complete theme definition with metadata and color palette
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub colors: ThemeColors,
}

/// Centralized theme manager providing access to all available themes
pub struct ThemeManager {
    themes: HashMap<String, Theme>,
    current_theme_name: String,
}

impl ThemeManager {
    /// Creates a new ThemeManager initialized with all built-in themes
    pub fn new() -> Self {
        let mut themes = HashMap::new();

        themes.insert("Light".to_string(), light_theme());
        themes.insert("Dark".to_string(), dark_theme());
        themes.insert("Dracula".to_string(), dracula_theme());
        themes.insert("One Dark Pro".to_string(), one_dark_pro_theme());

        Self {
            themes,
            current_theme_name: "Dark".to_string(),
        }
    }

    /// Retrieves a theme by name
    pub fn get_theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Returns a list of all available theme names
    pub fn list_themes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Gets the currently selected theme
    pub fn current_theme(&self) -> &Theme {
        self.themes.get(&self.current_theme_name).unwrap()
    }

    /// Sets the current theme by name
    pub fn set_current_theme(&mut self, name: &str) -> Result<(), String> {
        if self.themes.contains_key(name) {
            self.current_theme_name = name.to_string();
            Ok(())
        } else {
            Err(format!("Theme '{}' not found", name))
        }
    }

    /// Applies a theme's colors to egui visuals
    pub fn apply_theme(&self, theme: &Theme, visuals: &mut egui::Visuals) {
        let colors = &theme.colors;

        // Override background colors
        visuals.panel_fill = colors.panel_background;
        visuals.extreme_bg_color = colors.extreme_background;
        visuals.faint_bg_color = colors.hover;

        // Override text colors
        visuals.override_text_color = Some(colors.text);

        // Override selection
        visuals.selection.bg_fill = colors.selection;
        visuals.selection.stroke.color = colors.accent;

        // Override widget colors
        visuals.widgets.noninteractive.bg_fill = colors.panel_background;
        visuals.widgets.inactive.bg_fill = colors.hover;
        visuals.widgets.hovered.bg_fill = colors.hover;
        visuals.widgets.active.bg_fill = colors.selection;

        // Override hyperlink
        visuals.hyperlink_color = colors.accent;

        // Override error/warning colors
        visuals.error_fg_color = colors.error;
        visuals.warn_fg_color = colors.warning;
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates the Light theme
fn light_theme() -> Theme {
    Theme {
        name: "Light".to_string(),
        description: "Light theme with egui default colors".to_string(),
        colors: ThemeColors {
            background: Color32::from_rgb(248, 248, 248),
            panel_background: Color32::from_rgb(248, 248, 248),
            extreme_background: Color32::from_rgb(255, 255, 255),

            text: Color32::from_rgb(0, 0, 0),
            text_dim: Color32::from_rgb(120, 120, 120),

            selection: Color32::from_rgb(180, 200, 255),
            hover: Color32::from_rgb(220, 220, 220),
            border: Color32::from_rgb(160, 160, 160),

            group_label: Color32::from_rgb(40, 100, 200),
            node_active: Color32::from_rgb(20, 20, 20),
            node_inactive: Color32::from_rgb(150, 150, 150),
            toggle: Color32::from_rgb(90, 90, 90),
            guide: Color32::from_rgb(200, 200, 200),

            accent: Color32::from_rgb(40, 100, 200),
            warning: Color32::from_rgb(230, 120, 20),
            error: Color32::from_rgb(200, 40, 40),
        },
    }
}

/// Creates the Dark theme
fn dark_theme() -> Theme {
    Theme {
        name: "Dark".to_string(),
        description: "Dark theme with egui default colors".to_string(),
        colors: ThemeColors {
            background: Color32::from_rgb(39, 39, 39),
            panel_background: Color32::from_rgb(39, 39, 39),
            extreme_background: Color32::from_rgb(16, 16, 16),

            text: Color32::from_rgb(255, 255, 255),
            text_dim: Color32::from_rgb(160, 160, 160),

            selection: Color32::from_rgb(50, 80, 120),
            hover: Color32::from_rgb(70, 70, 70),
            border: Color32::from_rgb(100, 100, 100),

            group_label: Color32::from_rgb(52, 152, 219),
            node_active: Color32::from_rgb(235, 235, 235),
            node_inactive: Color32::from_rgb(120, 120, 120),
            toggle: Color32::from_rgb(170, 170, 170),
            guide: Color32::from_rgb(80, 80, 80),

            accent: Color32::from_rgb(52, 152, 219),
            warning: Color32::from_rgb(243, 156, 18),
            error: Color32::from_rgb(231, 76, 60),
        },
    }
}

/// Creates the Dracula theme
///
/// Official colors from: https://draculatheme.com/spec
fn dracula_theme() -> Theme {
    Theme {
        name: "Dracula".to_string(),
        description: "Official Dracula theme color palette".to_string(),
        colors: ThemeColors {
            background: hex_to_color32("#282a36"),
            panel_background: hex_to_color32("#282a36"),
            extreme_background: hex_to_color32("#21222c"),

            text: hex_to_color32("#f8f8f2"),
            text_dim: hex_to_color32("#6272a4"),

            selection: hex_to_color32("#44475a"),
            hover: hex_to_color32("#44475a"),
            border: hex_to_color32("#6272a4"),

            group_label: hex_to_color32("#bd93f9"),
            node_active: hex_to_color32("#f8f8f2"),
            node_inactive: hex_to_color32("#6272a4"),
            toggle: hex_to_color32("#8be9fd"),
            guide: hex_to_color32("#44475a"),

            accent: hex_to_color32("#8be9fd"),
            warning: hex_to_color32("#ffb86c"),
            error: hex_to_color32("#ff5555"),
        },
    }
}

/// Creates the One Dark Pro theme
///
/// Official colors from: https://github.com/Binaryify/OneDark-Pro
fn one_dark_pro_theme() -> Theme {
    Theme {
        name: "One Dark Pro".to_string(),
        description: "VSCode One Dark Pro color palette".to_string(),
        colors: ThemeColors {
            background: hex_to_color32("#282c34"),
            panel_background: hex_to_color32("#282c34"),
            extreme_background: hex_to_color32("#21252b"),

            text: hex_to_color32("#abb2bf"),
            text_dim: hex_to_color32("#5c6370"),

            selection: hex_to_color32("#4b5263"),
            hover: hex_to_color32("#4b5263"),
            border: hex_to_color32("#5c6370"),

            group_label: hex_to_color32("#61afef"),
            node_active: hex_to_color32("#abb2bf"),
            node_inactive: hex_to_color32("#5c6370"),
            toggle: hex_to_color32("#56b6c2"),
            guide: hex_to_color32("#4b5263"),

            accent: hex_to_color32("#61afef"),
            warning: hex_to_color32("#d19a66"),
            error: hex_to_color32("#e06c75"),
        },
    }
}

/// Converts a hex color string (like "#282a36") to Color32
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color32::from_rgb(r, g, b)
    } else {
        Color32::from_rgb(0, 0, 0) // Fallback to black
    }
}

/// Adjusts the brightness of a color by a factor (1.0 = no change, >1.0 = brighter, <1.0 = darker)
pub fn adjust_brightness(color: Color32, factor: f32) -> Color32 {
    let r = (color.r() as f32 * factor).min(255.0) as u8;
    let g = (color.g() as f32 * factor).min(255.0) as u8;
    let b = (color.b() as f32 * factor).min(255.0) as u8;
    Color32::from_rgb(r, g, b)
}

/// Sets the alpha channel of a color
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_premultiplied(color.r(), color.g(), color.b(), alpha)
}
