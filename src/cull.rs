//! Viewport culling: mapping the visible scroll window into content space.

use egui::{pos2, vec2, Rect, Vec2};

/// The visible window over the content, as the host scroll container reports
/// it: a normalized scroll offset (0.0 = start, 1.0 = end on each axis) and
/// the viewport size in layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    /// Normalized scroll position per axis, each in `0.0..=1.0`.
    pub scroll: Vec2,
    /// Viewport size in layout units.
    pub size: Vec2,
}

impl ViewRect {
    pub fn new(scroll: Vec2, size: Vec2) -> Self {
        Self { scroll, size }
    }

    /// A viewport parked at the content origin.
    pub fn at_origin(size: Vec2) -> Self {
        Self {
            scroll: Vec2::ZERO,
            size,
        }
    }
}

/// Computes the cull box: the viewport rectangle translated by the normalized
/// scroll offset into content coordinates, expanded by `margin` so rows just
/// off-screen are pre-rendered and scrolling never reveals a blank edge.
pub fn compute_cull_box(view: &ViewRect, content_size: Vec2, margin: f32) -> Rect {
    let scrollable = (content_size - view.size).max(Vec2::ZERO);
    let offset = vec2(
        view.scroll.x.clamp(0.0, 1.0) * scrollable.x,
        view.scroll.y.clamp(0.0, 1.0) * scrollable.y,
    );
    Rect::from_min_size(pos2(offset.x, offset.y), view.size).expand(margin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscrolled_viewport_starts_at_origin() {
        let view = ViewRect::at_origin(vec2(300.0, 400.0));
        let cull = compute_cull_box(&view, vec2(500.0, 2000.0), 0.0);
        assert_eq!(cull.min, pos2(0.0, 0.0));
        assert_eq!(cull.max, pos2(300.0, 400.0));
    }

    #[test]
    fn test_scroll_translates_into_content_space() {
        let view = ViewRect::new(vec2(0.0, 0.5), vec2(300.0, 400.0));
        let cull = compute_cull_box(&view, vec2(300.0, 2400.0), 0.0);
        // Scrollable span is 2000; half of it is 1000.
        assert_eq!(cull.min.y, 1000.0);
        assert_eq!(cull.max.y, 1400.0);
    }

    #[test]
    fn test_margin_expands_both_edges() {
        let view = ViewRect::at_origin(vec2(300.0, 400.0));
        let cull = compute_cull_box(&view, vec2(300.0, 2400.0), 25.0);
        assert_eq!(cull.min.y, -25.0);
        assert_eq!(cull.max.y, 425.0);
    }

    #[test]
    fn test_content_smaller_than_viewport_never_scrolls() {
        let view = ViewRect::new(vec2(1.0, 1.0), vec2(300.0, 400.0));
        let cull = compute_cull_box(&view, vec2(100.0, 100.0), 0.0);
        assert_eq!(cull.min, pos2(0.0, 0.0));
    }

    #[test]
    fn test_out_of_range_scroll_is_clamped() {
        let view = ViewRect::new(vec2(0.0, 2.0), vec2(300.0, 400.0));
        let cull = compute_cull_box(&view, vec2(300.0, 1400.0), 0.0);
        assert_eq!(cull.min.y, 1000.0);
    }
}
