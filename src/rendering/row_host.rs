//! egui-backed widget host for the hierarchy engine.
//!
//! The engine's pools own the row widgets; this module defines what a pooled
//! widget *is* on the egui side (plain retained structs, repainted every
//! frame) and implements the factory surface the engine requires. Drawing
//! and hit-testing live in the outliner panel, which reads the pools back
//! through the engine.

use egui::Rect;
use rhier::{LabelWidget, LayoutSlot, NodeId, PoolWidget, ToggleWidget, WidgetHost};

/// Pooled row label: name text at a content-space rectangle.
#[derive(Debug, Clone)]
pub struct RowLabel {
    /// False while the widget sits idle in the pool.
    pub visible: bool,
    pub rect: Rect,
    pub text: String,
    /// False dims the label (inactive scene object).
    pub enabled: bool,
    /// Row binding for click routing.
    pub row: Option<LayoutSlot>,
    /// Backing object, None for group header rows.
    pub identity: Option<NodeId>,
}

impl RowLabel {
    fn new() -> Self {
        Self {
            visible: false,
            rect: Rect::ZERO,
            text: String::new(),
            enabled: true,
            row: None,
            identity: None,
        }
    }

    /// Group header rows have a row binding but no backing object.
    pub fn is_group_header(&self) -> bool {
        self.identity.is_none()
    }
}

impl PoolWidget for RowLabel {
    fn set_active(&mut self, active: bool) {
        self.visible = active;
    }
}

impl LabelWidget for RowLabel {
    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text.clear();
            self.text.push_str(text);
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn bind(&mut self, row: LayoutSlot, identity: Option<NodeId>) {
        self.row = Some(row);
        self.identity = identity;
    }
}

/// Pooled expand/collapse toggle.
#[derive(Debug, Clone)]
pub struct RowToggle {
    pub visible: bool,
    pub rect: Rect,
    pub expanded: bool,
    pub row: Option<LayoutSlot>,
}

impl RowToggle {
    fn new() -> Self {
        Self {
            visible: false,
            rect: Rect::ZERO,
            expanded: false,
            row: None,
        }
    }
}

impl PoolWidget for RowToggle {
    fn set_active(&mut self, active: bool) {
        self.visible = active;
    }
}

impl ToggleWidget for RowToggle {
    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    fn bind(&mut self, row: LayoutSlot) {
        self.row = Some(row);
    }
}

/// Widget factory handed to the engine.
pub struct EguiRowHost {
    configured: bool,
    /// Widgets instantiated over the host's lifetime (status bar diagnostic).
    pub widgets_instantiated: usize,
}

impl EguiRowHost {
    /// A host that is not yet ready; render passes no-op until
    /// [`Self::configure`] is called.
    pub fn new() -> Self {
        Self {
            configured: false,
            widgets_instantiated: 0,
        }
    }

    /// Marks the host ready once the egui context exists.
    pub fn configure(&mut self) {
        self.configured = true;
    }
}

impl Default for EguiRowHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetHost for EguiRowHost {
    type Label = RowLabel;
    type Toggle = RowToggle;

    fn is_ready(&self) -> bool {
        self.configured
    }

    fn create_label(&mut self) -> RowLabel {
        self.widgets_instantiated += 1;
        RowLabel::new()
    }

    fn create_toggle(&mut self) -> RowToggle {
        self.widgets_instantiated += 1;
        RowToggle::new()
    }
}
