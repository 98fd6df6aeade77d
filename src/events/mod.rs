use crate::dom;
use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

mod pointer;

pub use pointer::wire_pointer;

/// An event listener that removes itself when dropped.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn add(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        if let Err(e) =
            target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        {
            log::warn!("[events] {} listener failed: {:?}", kind, e);
            return None;
        }
        Some(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// A `setInterval` timer, cleared on drop.
pub struct Interval {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(w) = web::window() {
            w.clear_interval_with_handle(self.id);
        }
    }
}

/// Observer on the root element's colour-scheme attribute, disconnected on drop.
pub struct SchemeObserver {
    observer: web::MutationObserver,
    _closure: Closure<dyn FnMut()>,
}

impl Drop for SchemeObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Every callback wired for one mounted canvas.
#[derive(Default)]
pub struct Listeners {
    pub events: Vec<Listener>,
    pub drift: Option<Interval>,
    pub scheme: Option<SchemeObserver>,
}

impl Listeners {
    pub fn len(&self) -> usize {
        self.events.len() + self.drift.is_some() as usize + self.scheme.is_some() as usize
    }
}

pub fn wire_resize(window: &web::Window, ctx: Rc<RefCell<FrameContext>>) -> Option<Listener> {
    let w = window.clone();
    Listener::add(window, "resize", move |_| {
        ctx.borrow_mut().resize(dom::viewport(&w));
    })
}

pub fn wire_drift(
    window: &web::Window,
    ctx: Rc<RefCell<FrameContext>>,
    interval_ms: i32,
) -> Option<Interval> {
    let closure = Closure::wrap(Box::new(move || {
        ctx.borrow_mut().state.drift();
    }) as Box<dyn FnMut()>);
    match window.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        interval_ms,
    ) {
        Ok(id) => Some(Interval {
            id,
            _closure: closure,
        }),
        Err(e) => {
            log::warn!("[events] drift timer failed: {:?}", e);
            None
        }
    }
}

pub fn wire_scheme_observer(
    window: &web::Window,
    document: &web::Document,
    ctx: Rc<RefCell<FrameContext>>,
) -> Option<SchemeObserver> {
    let root = document.document_element()?;
    let w = window.clone();
    let d = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        let scheme = dom::color_scheme(&w, &d);
        log::debug!("[events] colour scheme -> {:?}", scheme);
        ctx.borrow_mut().set_color_scheme(scheme);
    }) as Box<dyn FnMut()>);
    let observer = web::MutationObserver::new(closure.as_ref().unchecked_ref()).ok()?;
    let init = web::MutationObserverInit::new();
    init.set_attributes(true);
    let filter = js_sys::Array::of1(&dom::COLOR_SCHEME_ATTR.into());
    init.set_attribute_filter(&filter);
    if let Err(e) = observer.observe_with_options(&root, &init) {
        log::warn!("[events] colour scheme observer failed: {:?}", e);
        return None;
    }
    Some(SchemeObserver {
        observer,
        _closure: closure,
    })
}
