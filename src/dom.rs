use crate::core::{ColorScheme, Rect, Viewport};
use crate::input;
use smallvec::SmallVec;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const COLOR_SCHEME_ATTR: &str = "data-color-scheme";

#[inline]
pub fn media_matches(window: &web::Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub fn viewport(window: &web::Window) -> Viewport {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Viewport::new(width as f32, height as f32).with_dpr(window.device_pixel_ratio() as f32)
}

/// Explicit `data-color-scheme` on the root element wins; otherwise follow
/// the OS preference.
pub fn color_scheme(window: &web::Window, document: &web::Document) -> ColorScheme {
    match document
        .document_element()
        .and_then(|el| el.get_attribute(COLOR_SCHEME_ATTR))
    {
        Some(v) if v == "dark" => ColorScheme::Dark,
        Some(_) => ColorScheme::Light,
        None if media_matches(window, "(prefers-color-scheme: dark)") => ColorScheme::Dark,
        None => ColorScheme::Light,
    }
}

/// Size the backing store to `viewport * devicePixelRatio` and scale the
/// transform so drawing stays in CSS pixels.
pub fn sync_canvas_backing_size(
    canvas: &web::HtmlCanvasElement,
    ctx: &web::CanvasRenderingContext2d,
    viewport: Viewport,
) {
    let (w_px, h_px) = viewport.backing_size();
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width));
    _ = style.set_property("height", &format!("{}px", viewport.height));
    let dpr = viewport.device_pixel_ratio as f64;
    _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
}

pub fn canvas_2d(
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("getContext failed: {:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// Bounding rectangles of every element matching `selector`.
pub fn element_rects(document: &web::Document, selector: &str) -> SmallVec<[Rect; 4]> {
    let mut out = SmallVec::new();
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("[dom] bad selector {:?}", selector);
        return out;
    };
    for i in 0..list.length() {
        if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
            out.push(input::rect_from_dom(&el.get_bounding_client_rect()));
        }
    }
    out
}
