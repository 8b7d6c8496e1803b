use glam::Vec2;
use web_sys as web;

/// Maps a client-space position into canvas backing-store pixels.
///
/// `rect_*` is the canvas bounding rect in CSS pixels and `backing` the canvas
/// width/height attributes. Positions outside the rect are kept, not clamped.
#[inline]
pub fn client_to_canvas_px(
    client: Vec2,
    rect_origin: Vec2,
    rect_size: Vec2,
    backing: Vec2,
) -> Option<Vec2> {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return None;
    }
    Some((client - rect_origin) / rect_size * backing)
}

fn canvas_px(client: Vec2, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    client_to_canvas_px(
        client,
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
        Vec2::new(canvas.width() as f32, canvas.height() as f32),
    )
}

#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    canvas_px(Vec2::new(ev.client_x() as f32, ev.client_y() as f32), canvas)
}

/// Position of `touches[0]`; other touch points are ignored.
#[inline]
pub fn first_touch_canvas_px(
    ev: &web::TouchEvent,
    canvas: &web::HtmlCanvasElement,
) -> Option<Vec2> {
    let touch = ev.touches().get(0)?;
    canvas_px(Vec2::new(touch.client_x() as f32, touch.client_y() as f32), canvas)
}
