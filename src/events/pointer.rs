use crate::dom;
use crate::frame::SharedScheduler;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Window-level pointer moves steer the orb.
pub fn wire_pointermove(scheduler: &SharedScheduler) {
    let Some(window) = web::window() else {
        return;
    };
    let scheduler = scheduler.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (vw, vh) = dom::viewport_size();
        if let Ok(mut s) = scheduler.try_borrow_mut() {
            s.on_pointer_move(ev.client_x() as f32, ev.client_y() as f32, vw, vh);
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Element-scoped move/leave listeners; `elements[i]` feeds magnet `i`.
pub fn wire_magnetic_elements(scheduler: &SharedScheduler, elements: &[web::HtmlElement]) {
    for (index, el) in elements.iter().enumerate() {
        let s_move = scheduler.clone();
        let on_move = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if let Ok(mut s) = s_move.try_borrow_mut() {
                s.on_element_pointer_move(index, ev.client_x() as f32, ev.client_y() as f32);
            }
        }) as Box<dyn FnMut(_)>);
        _ = el.add_event_listener_with_callback("pointermove", on_move.as_ref().unchecked_ref());
        on_move.forget();

        let s_leave = scheduler.clone();
        let on_leave = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            if let Ok(mut s) = s_leave.try_borrow_mut() {
                s.on_element_pointer_leave(index);
            }
        }) as Box<dyn FnMut(_)>);
        _ = el.add_event_listener_with_callback("pointerleave", on_leave.as_ref().unchecked_ref());
        on_leave.forget();
    }
}
