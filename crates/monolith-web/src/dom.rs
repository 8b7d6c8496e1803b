use monolith_core::Preset;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Canvas the scene renders into. `data-preset` on it picks the variant.
pub const CANVAS_ID: &str = "monolith";

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(
    document: &web::Document,
    id: &str,
) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", id, e))
}

/// Unknown or missing names fall back to the default scene.
pub fn preset_from_attribute(value: Option<&str>) -> Preset {
    match value.map(str::parse::<Preset>) {
        Some(Ok(preset)) => preset,
        Some(Err(e)) => {
            log::warn!("[dom] {}; using {}", e, Preset::Lilac);
            Preset::Lilac
        }
        None => Preset::Lilac,
    }
}

/// Device pixels per CSS pixel; 1 outside a browser window.
pub fn device_pixel_ratio() -> f64 {
    web::window().map_or(1.0, |w| w.device_pixel_ratio())
}

/// Match the canvas backing store to its CSS size times devicePixelRatio.
/// Returns the new size in device pixels; a hidden canvas reports (0, 0).
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let Some(w) = web::window() else {
        return (canvas.width(), canvas.height());
    };
    let dpr = w.device_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * dpr) as u32;
    let h_px = (rect.height() * dpr) as u32;
    if w_px > 0 && h_px > 0 {
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
    (w_px, h_px)
}
