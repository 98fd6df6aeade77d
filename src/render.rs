use crate::core::{BlockRasterizer, ColorScheme, GlyphSink, MaskLayout, TextRasterizer, Tone};
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Draws glyphs onto the visible canvas with the 2D context.
pub struct Canvas2dSink {
    ctx: web::CanvasRenderingContext2d,
    font: String,
    scheme: ColorScheme,
    tone: Option<Tone>,
}

impl Canvas2dSink {
    pub fn new(ctx: web::CanvasRenderingContext2d, font_size: f32) -> Self {
        Self {
            ctx,
            font: format!("{}px monospace", font_size),
            scheme: ColorScheme::Light,
            tone: None,
        }
    }

    pub fn ctx(&self) -> &web::CanvasRenderingContext2d {
        &self.ctx
    }
}

impl GlyphSink for Canvas2dSink {
    fn begin_frame(&mut self, width: f32, height: f32, scheme: ColorScheme) {
        self.scheme = scheme;
        self.tone = None;
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        self.ctx.set_font(&self.font);
        self.ctx.set_text_baseline("top");
    }

    fn glyph(&mut self, ch: char, x: f32, y: f32, alpha: f32, tone: Tone) {
        if self.tone != Some(tone) {
            self.ctx.set_fill_style_str(self.scheme.color(tone));
            self.tone = Some(tone);
        }
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        let mut buf = [0u8; 4];
        _ = self.ctx.fill_text(ch.encode_utf8(&mut buf), x as f64, y as f64);
    }

    fn end_frame(&mut self) {
        self.ctx.set_global_alpha(1.0);
    }
}

/// Rasterises highlight words with real glyph shapes: heavy monospace on an
/// offscreen canvas one pixel per cell, alpha read back with `getImageData`.
/// Falls back to [`BlockRasterizer`] if the offscreen context is unavailable.
pub struct OffscreenRasterizer {
    target: Option<(web::HtmlCanvasElement, web::CanvasRenderingContext2d)>,
    fallback: BlockRasterizer,
}

impl OffscreenRasterizer {
    pub fn new(document: &web::Document) -> Self {
        let target = document
            .create_element("canvas")
            .ok()
            .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
            .and_then(|canvas| match dom::canvas_2d(&canvas) {
                Ok(ctx) => Some((canvas, ctx)),
                Err(e) => {
                    log::warn!("[raster] offscreen canvas unavailable: {:?}", e);
                    None
                }
            });
        Self {
            target,
            fallback: BlockRasterizer,
        }
    }
}

impl TextRasterizer for OffscreenRasterizer {
    fn rasterize(&mut self, layout: &MaskLayout, cols: usize, rows: usize, alpha: &mut [u8]) {
        let Some((canvas, ctx)) = &self.target else {
            self.fallback.rasterize(layout, cols, rows, alpha);
            return;
        };
        canvas.set_width(cols as u32);
        canvas.set_height(rows as u32);
        ctx.clear_rect(0.0, 0.0, cols as f64, rows as f64);
        ctx.set_fill_style_str("white");
        ctx.set_text_baseline("middle");
        ctx.set_text_align("center");
        ctx.set_font(&format!("900 {}px monospace", layout.font_size));
        let mut buf = [0u8; 4];
        for (ch, x, y) in layout.glyphs() {
            _ = ctx.fill_text(ch.encode_utf8(&mut buf), x as f64, y as f64);
        }
        match ctx.get_image_data(0.0, 0.0, cols as f64, rows as f64) {
            Ok(img) => {
                let data = img.data();
                for (a, px) in alpha.iter_mut().zip(data.chunks_exact(4)) {
                    *a = px[3];
                }
            }
            Err(e) => {
                log::warn!("[raster] getImageData failed: {:?}", e);
                self.fallback.rasterize(layout, cols, rows, alpha);
            }
        }
    }
}
