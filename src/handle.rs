use crate::config::AmbientConfig;
use crate::core::{HighlightRequest, PointerCapability, Rect, RendererState};
use crate::dom;
use crate::events::{self, Listeners};
use crate::frame::{self, FrameContext, FrameLoop};
use crate::render::{Canvas2dSink, OffscreenRasterizer};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const DEFAULT_HOVER_SELECTOR: &str =
    r#"section[aria-label="Introduction"], section[aria-label="Get in touch"]"#;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ascii-ambient loaded");
    Ok(())
}

/// A mounted ambient canvas. Keep it alive for as long as the effect should
/// run; `destroy()` (or dropping it from JS with `free()`) stops everything.
#[wasm_bindgen]
pub struct AmbientHandle {
    ctx: Option<Rc<RefCell<FrameContext>>>,
    frame_loop: Rc<RefCell<Option<FrameLoop>>>,
    listeners: Listeners,
    destroyed: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl AmbientHandle {
    /// Attach to `<canvas id=canvas_id>`. `config_json` optionally overrides
    /// any subset of the tuning defaults; an invalid override falls back to
    /// the defaults. Never throws: without a canvas or 2D context the handle
    /// is inert and nothing renders.
    pub fn mount(canvas_id: &str, config_json: Option<String>) -> AmbientHandle {
        let config = AmbientConfig::from_json_or_default(config_json.as_deref());
        match mount(canvas_id, config) {
            Ok(handle) => handle,
            Err(e) => {
                log::error!("[handle] not rendering: {:#}", e);
                AmbientHandle::inert()
            }
        }
    }

    /// False when mounting failed or after `destroy()`.
    pub fn is_active(&self) -> bool {
        self.ctx.is_some()
    }

    /// Update what should be highlighted. Read on the next frame.
    pub fn set_highlight(&self, text: String, intensity: f32) {
        if let Some(ctx) = &self.ctx {
            ctx.borrow_mut().request = HighlightRequest { text, intensity };
        }
    }

    /// Rectangles of real page text as flat `[x, y, w, h, ...]` in viewport
    /// pixels. Recompute on scroll and resize.
    pub fn set_text_regions(&self, rects: &[f64]) {
        if let Some(ctx) = &self.ctx {
            ctx.borrow_mut().state.set_text_regions(Rect::from_flat(rects));
        }
    }

    /// CSS selector of the sections inside which the spotlight follows the
    /// pointer.
    pub fn set_hover_selector(&self, selector: String) {
        if let Some(ctx) = &self.ctx {
            ctx.borrow_mut().hover_selector = selector;
        }
    }

    pub fn destroy(&mut self) {
        self.teardown();
    }
}

impl AmbientHandle {
    fn inert() -> Self {
        Self {
            ctx: None,
            frame_loop: Rc::new(RefCell::new(None)),
            listeners: Listeners::default(),
            destroyed: Rc::new(Cell::new(true)),
        }
    }

    fn teardown(&mut self) {
        if self.destroyed.replace(true) {
            return;
        }
        if let Some(frame_loop) = self.frame_loop.borrow_mut().take() {
            frame_loop.stop();
        }
        let wired = self.listeners.len();
        self.listeners = Listeners::default();
        if let Some(ctx) = self.ctx.take() {
            match Rc::try_unwrap(ctx) {
                Ok(cell) => cell.into_inner().state.destroy(),
                // the font-loading task still holds a clone; it drops it
                // as soon as it sees `destroyed`
                Err(_) => log::debug!("[handle] state released by pending task"),
            }
        }
        log::info!("[handle] destroyed ({} callbacks removed)", wired);
    }
}

impl Drop for AmbientHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn mount(canvas_id: &str, config: AmbientConfig) -> anyhow::Result<AmbientHandle> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", canvas_id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let ctx2d = dom::canvas_2d(&canvas)?;

    let reduced_motion = dom::media_matches(&window, "(prefers-reduced-motion: reduce)");
    let fine_pointer = dom::media_matches(&window, "(pointer: fine)");
    let drift_ms = config.ambient.drift_interval_ms;
    let font_size = config.grid.font_size;

    let mut state = RendererState::create(dom::viewport(&window), config, rand::random())
        .with_rasterizer(Box::new(OffscreenRasterizer::new(&document)));
    state.set_color_scheme(dom::color_scheme(&window, &document));
    state.set_pointer_capability(if fine_pointer {
        PointerCapability::Fine
    } else {
        PointerCapability::Coarse
    });

    let ctx = Rc::new(RefCell::new(FrameContext {
        state,
        sink: Canvas2dSink::new(ctx2d, font_size),
        canvas,
        request: HighlightRequest::default(),
        hover_selector: DEFAULT_HOVER_SELECTOR.to_string(),
        reduced_motion,
    }));

    let mut listeners = Listeners::default();
    listeners
        .events
        .extend(events::wire_resize(&window, ctx.clone()));
    if fine_pointer {
        listeners
            .events
            .extend(events::wire_pointer(&window, &document, ctx.clone()));
    }
    if !reduced_motion {
        listeners.drift = events::wire_drift(&window, ctx.clone(), drift_ms);
    }
    listeners.scheme = events::wire_scheme_observer(&window, &document, ctx.clone());
    log::info!(
        "[handle] mounted on #{} (reduced_motion={}, fine_pointer={})",
        canvas_id,
        reduced_motion,
        fine_pointer
    );

    let handle = AmbientHandle {
        ctx: Some(ctx.clone()),
        frame_loop: Rc::new(RefCell::new(None)),
        listeners,
        destroyed: Rc::new(Cell::new(false)),
    };

    // Glyph metrics are only right once the page fonts are in.
    let frame_loop = handle.frame_loop.clone();
    let destroyed = handle.destroyed.clone();
    spawn_local(async move {
        if let Ok(ready) = document.fonts().ready() {
            _ = JsFuture::from(ready).await;
        }
        if destroyed.get() {
            return;
        }
        let reduced = {
            let mut c = ctx.borrow_mut();
            // paints the static frame itself under reduced motion
            c.resize(dom::viewport(&window));
            c.reduced_motion
        };
        if !reduced {
            *frame_loop.borrow_mut() = Some(frame::start_loop(ctx));
        }
    });

    Ok(handle)
}
