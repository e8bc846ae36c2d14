//! Outliner panel UI rendering.
//!
//! Hosts the hierarchy engine: each frame ticks the engine with the current
//! scroll view, then draws whatever row widgets the engine's pools hold.
//! Only rows inside the cull box have widgets at all, so drawing cost tracks
//! the viewport, not the scene.

use crate::app::AppState;
use crate::presentation::color_mapping;
use crate::rendering::text_utils::truncate_text_to_fit;
use egui::{vec2, FontId, Rect, ScrollArea, Sense, Stroke};
use rhier::{RowInteraction, ThemeColors, ViewRect};

/// Result of outliner panel interactions handled by the application.
pub enum OutlinerInteraction {
    /// A row widget was clicked
    Row(RowInteraction),
}

/// Renders the outliner panel with engine-driven virtual scrolling.
pub fn render_outliner_panel(
    ui: &mut egui::Ui,
    state: &mut AppState,
    theme_colors: &ThemeColors,
) -> Option<OutlinerInteraction> {
    if state.scene.source().is_none() {
        ui.label("No scene loaded");
        return None;
    }

    let viewport_size = ui.available_size();
    let mut interaction: Option<OutlinerInteraction> = None;

    let scroll_output = ScrollArea::both()
        .id_salt("outliner_scroll_area")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let AppState {
                scene,
                selection,
                engine,
                row_host,
                last_view,
                scroll_px,
                ..
            } = &mut *state;
            let Some(source) = scene.source() else {
                return;
            };

            // Tick with the scroll offset of the previous frame, normalized
            // into the engine's view space.
            let content = engine.content_size();
            let scrollable = (content - viewport_size).max(egui::Vec2::ZERO);
            let normalized = vec2(
                if scrollable.x > 0.0 { scroll_px.x / scrollable.x } else { 0.0 },
                if scrollable.y > 0.0 { scroll_px.y / scrollable.y } else { 0.0 },
            );
            let view = ViewRect::new(normalized, viewport_size);
            engine.tick(source, row_host, &view);
            *last_view = view;

            // Reserve the full content footprint so the scroll bars are
            // sized for the whole tree even though only the culled rows
            // exist as widgets.
            let content = engine.content_size().max(viewport_size);
            let (rect, _) = ui.allocate_exact_size(content, Sense::hover());
            let origin = rect.min.to_vec2();
            let painter = ui.painter().with_clip_rect(rect);
            let label_font = FontId::proportional(13.0);
            let toggle_font = FontId::proportional(11.0);

            for (widget_slot, label) in engine.renderer().labels().iter_active() {
                if !label.visible {
                    continue;
                }
                let screen_rect = label.rect.translate(origin);
                let is_selected = label
                    .identity
                    .map(|id| selection.is_selected(id))
                    .unwrap_or(false);

                if is_selected {
                    painter.rect_filled(screen_rect, 2.0, theme_colors.selection);
                }
                if label.is_group_header() {
                    painter.line_segment(
                        [screen_rect.left_bottom(), screen_rect.right_bottom()],
                        Stroke::new(1.0, theme_colors.guide),
                    );
                }

                let color =
                    color_mapping::row_label_color(label.is_group_header(), label.enabled, theme_colors);
                let text =
                    truncate_text_to_fit(&label.text, screen_rect.width(), &label_font, &painter);
                painter.text(
                    screen_rect.left_center() + vec2(4.0, 0.0),
                    egui::Align2::LEFT_CENTER,
                    text,
                    label_font.clone(),
                    color,
                );

                let id = ui.id().with(("outliner_label", widget_slot));
                let response = ui.interact(screen_rect, id, Sense::click());
                if response.clicked() {
                    if let Some(row) = label.row {
                        interaction =
                            Some(OutlinerInteraction::Row(RowInteraction::LabelClicked(row)));
                    }
                }
            }

            for (widget_slot, toggle) in engine.renderer().toggles().iter_active() {
                if !toggle.visible {
                    continue;
                }
                let screen_rect = toggle.rect.translate(origin);
                let glyph = if toggle.expanded { "▼" } else { "▶" };
                let glyph_rect = Rect::from_center_size(screen_rect.center(), vec2(14.0, 14.0));
                painter.text(
                    glyph_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    glyph,
                    toggle_font.clone(),
                    theme_colors.toggle,
                );

                let id = ui.id().with(("outliner_toggle", widget_slot));
                let response = ui.interact(screen_rect, id, Sense::click());
                if response.clicked() {
                    if let Some(row) = toggle.row {
                        interaction =
                            Some(OutlinerInteraction::Row(RowInteraction::ToggleClicked(row)));
                    }
                }
            }
        });

    // Remember the raw offset for the next frame's cull box.
    state.scroll_px = scroll_output.state.offset;

    interaction
}
