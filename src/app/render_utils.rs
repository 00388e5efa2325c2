use eframe::egui::{Color32, Pos2, Rect, Vec2};

pub(super) const NODE_COLOR: Color32 = Color32::WHITE;
// white at alpha 75
pub(super) const EDGE_COLOR: Color32 = Color32::from_rgba_premultiplied(75, 75, 75, 75);
pub(super) const MATCH_COLOR: Color32 = Color32::from_rgb(103, 196, 255);
pub(super) const HOVER_COLOR: Color32 = Color32::from_rgb(255, 164, 101);

/// Camera transform: `target` is the world point shown at the view centre.
pub(super) fn world_to_screen(rect: Rect, target: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + (world - target) * zoom
}

pub(super) fn screen_to_world(rect: Rect, target: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center()) / zoom + target
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2) -> bool {
    let min_x = start.x.min(end.x);
    let max_x = start.x.max(end.x);
    let min_y = start.y.min(end.y);
    let max_y = start.y.max(end.y);
    !(max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom())
}

/// Labels are `3 × radius` world units tall. Sizes are whole pixels so the
/// glyph cache sees a bounded set of font sizes.
pub(super) fn label_size(radius: f32, zoom: f32) -> Option<f32> {
    const MIN_LABEL_PX: f32 = 6.0;
    const MAX_LABEL_PX: f32 = 160.0;

    let size = 3.0 * radius * zoom;
    if !size.is_finite() || size < MIN_LABEL_PX {
        None
    } else {
        Some(size.min(MAX_LABEL_PX).round())
    }
}
