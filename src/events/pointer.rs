use super::Listener;
use crate::dom;
use crate::frame::FrameContext;
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer tracking for the spotlight. Only wired for fine pointers; the
/// handlers update pointer state and never draw.
pub fn wire_pointer(
    window: &web::Window,
    document: &web::Document,
    ctx: Rc<RefCell<FrameContext>>,
) -> Vec<Listener> {
    let mut out = Vec::with_capacity(2);

    let ctx_move = ctx.clone();
    let doc = document.clone();
    out.extend(Listener::add(window, "pointermove", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        let pos = input::pointer_client_pos(ev);
        let mut c = ctx_move.borrow_mut();
        // Section rects move with scroll, so they are re-read on every move.
        let regions = dom::element_rects(&doc, &c.hover_selector);
        c.state.set_hover_regions(regions);
        c.state.pointer_moved(pos.x, pos.y, instant::now());
    }));

    out.extend(Listener::add(document, "pointerleave", move |_| {
        ctx.borrow_mut().state.pointer_left();
    }));

    out
}
