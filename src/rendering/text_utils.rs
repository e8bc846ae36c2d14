//! Text measurement helpers for row rendering.

use egui::{FontId, Painter};

/// Truncates text with an ellipsis so it fits within `max_width` pixels.
///
/// Returns the original text when it already fits.
pub fn truncate_text_to_fit(
    text: &str,
    max_width: f32,
    font_id: &FontId,
    painter: &Painter,
) -> String {
    let full_width = painter
        .layout_no_wrap(text.to_string(), font_id.clone(), egui::Color32::WHITE)
        .rect
        .width();
    if full_width <= max_width {
        return text.to_string();
    }

    let ellipsis = "…";
    let mut truncated = String::new();
    for ch in text.chars() {
        let candidate = format!("{}{}{}", truncated, ch, ellipsis);
        let width = painter
            .layout_no_wrap(candidate, font_id.clone(), egui::Color32::WHITE)
            .rect
            .width();
        if width > max_width {
            break;
        }
        truncated.push(ch);
    }
    format!("{}{}", truncated, ellipsis)
}
