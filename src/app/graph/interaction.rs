use eframe::egui::{self, Key, Pos2, Rect, Ui, Vec2};

use super::super::ViewModel;
use super::super::render_utils::screen_to_world;

const KEY_ZOOM_STEP: f32 = 0.001;
const KEY_PAN_SPEED: f32 = 3.0;
const MIN_ZOOM: f32 = 0.002;
const MAX_ZOOM: f32 = 6.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(in crate::app) struct CameraKeys {
    pub(in crate::app) zoom_in: bool,
    pub(in crate::app) zoom_out: bool,
    pub(in crate::app) up: bool,
    pub(in crate::app) down: bool,
    pub(in crate::app) left: bool,
    pub(in crate::app) right: bool,
}

impl CameraKeys {
    fn read(ui: &Ui) -> Self {
        ui.input(|input| Self {
            zoom_in: input.key_down(Key::P),
            zoom_out: input.key_down(Key::O),
            up: input.key_down(Key::ArrowUp),
            down: input.key_down(Key::ArrowDown),
            left: input.key_down(Key::ArrowLeft),
            right: input.key_down(Key::ArrowRight),
        })
    }

    fn any(self) -> bool {
        self != Self::default()
    }
}

/// Held keys move the camera by a fixed amount per frame: zoom by
/// [`KEY_ZOOM_STEP`], pan by `KEY_PAN_SPEED / zoom` world units.
pub(in crate::app) fn apply_camera_keys(keys: CameraKeys, target: &mut Vec2, zoom: &mut f32) {
    if keys.zoom_in {
        *zoom += KEY_ZOOM_STEP;
    }
    if keys.zoom_out {
        *zoom -= KEY_ZOOM_STEP;
    }
    *zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);

    let step = KEY_PAN_SPEED / *zoom;
    if keys.up {
        target.y -= step;
    }
    if keys.down {
        target.y += step;
    }
    if keys.right {
        target.x += step;
    }
    if keys.left {
        target.x -= step;
    }
}

impl ViewModel {
    pub(in crate::app) fn handle_camera_keys(&mut self, ui: &Ui) {
        if ui.ctx().wants_keyboard_input() {
            return;
        }

        let keys = CameraKeys::read(ui);
        if keys.any() {
            apply_camera_keys(keys, &mut self.camera_target, &mut self.zoom);
        }
    }

    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.camera_target, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.camera_target = world_before - (pointer - rect.center()) / self.zoom;
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.camera_target -= response.drag_delta() / self.zoom;
        }
    }

    pub(in crate::app) fn hovered_index(
        ui: &Ui,
        visible_mask: &[bool],
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        (0..screen_positions.len())
            .filter(|&index| visible_mask.get(index).copied().unwrap_or(false))
            .filter_map(|index| {
                let distance = screen_positions[index].distance(pointer);
                (distance <= screen_radii[index]).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}
