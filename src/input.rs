use crate::core::Rect;
use glam::Vec2;
use web_sys as web;

// ---------------- DOM -> core geometry ----------------
#[inline]
pub fn pointer_client_pos(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

#[inline]
pub fn rect_from_dom(rect: &web::DomRect) -> Rect {
    Rect::new(
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}
