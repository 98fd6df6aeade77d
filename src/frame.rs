use crate::core::{ColorScheme, HighlightRequest, RendererState, Viewport};
use crate::dom;
use crate::render::Canvas2dSink;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the animation frame and the event handlers share.
pub struct FrameContext {
    pub state: RendererState,
    pub sink: Canvas2dSink,
    pub canvas: web::HtmlCanvasElement,
    pub request: HighlightRequest,
    pub hover_selector: String,
    pub reduced_motion: bool,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = instant::now();
        self.state.step(now, &self.request, &mut self.sink);
    }

    /// Resize backing store and grid in one go so no frame sees a canvas and
    /// grid of different sizes.
    pub fn resize(&mut self, viewport: Viewport) {
        dom::sync_canvas_backing_size(&self.canvas, self.sink.ctx(), viewport);
        self.state.resize(viewport);
        if self.reduced_motion {
            self.render_static();
        }
    }

    /// Frozen static frames are repainted so colour and amplitude follow.
    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.state.set_color_scheme(scheme);
        if self.reduced_motion {
            self.render_static();
        }
    }

    pub fn render_static(&mut self) {
        let drawn = self.state.render_static(&mut self.sink);
        log::info!("[frame] reduced motion: static frame with {} glyphs", drawn);
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A running requestAnimationFrame loop. Stopping (or dropping) cancels the
/// pending frame and releases the tick closure.
pub struct FrameLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Tick,
}

impl FrameLoop {
    pub fn stop(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        // breaks the tick -> tick reference cycle
        self.tick.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(tick: &Tick, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    let id = tick
        .borrow()
        .as_ref()
        .and_then(|cb| w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    raf_id.set(id);
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let tick: Tick = Rc::new(RefCell::new(None));
    let raf_id = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let raf_clone = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone, &raf_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &raf_id);
    log::info!("[frame] animation loop started");
    FrameLoop { raf_id, tick }
}
