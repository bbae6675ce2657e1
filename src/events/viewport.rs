use crate::dom;
use crate::frame::SharedScheduler;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Window resizes resync the canvas and reach the pipeline before the next frame.
pub fn wire_resize(canvas: &web::HtmlCanvasElement, scheduler: &SharedScheduler) {
    let Some(window) = web::window() else {
        return;
    };
    let canvas = canvas.clone();
    let scheduler = scheduler.clone();
    let closure = Closure::wrap(Box::new(move || {
        let (width, height) = dom::sync_canvas_backing_size(&canvas);
        if let Ok(mut s) = scheduler.try_borrow_mut() {
            s.resize(width, height);
        }
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}
