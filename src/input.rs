use glam::Vec2;
use place_core::Camera;
use web_sys as web;

use crate::constants::PRIMARY_MOUSE_BUTTON;

/// Client-space point inside a rect to normalized device coordinates
/// (x right, y up, both in [-1, 1]). `None` for an empty rect.
#[inline]
pub fn client_to_ndc(client_x: f32, client_y: f32, left: f32, top: f32, width: f32, height: f32) -> Option<Vec2> {
    if !(width > 0.0 && height > 0.0) {
        return None;
    }
    let u = (client_x - left) / width;
    let v = (client_y - top) / height;
    Some(Vec2::new(u * 2.0 - 1.0, 1.0 - v * 2.0))
}

#[inline]
pub fn canvas_aspect(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[inline]
pub fn is_primary_button(button: i16) -> bool {
    button == PRIMARY_MOUSE_BUTTON
}

// ---------------- DOM wrappers ----------------
#[inline]
pub fn mouse_ndc(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    client_to_ndc(
        ev.client_x() as f32,
        ev.client_y() as f32,
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

/// Preview camera matching the canvas' current shape.
#[inline]
pub fn desktop_camera(canvas: &web::HtmlCanvasElement) -> Camera {
    Camera::desktop_default(canvas_aspect(canvas.width(), canvas.height()))
}
