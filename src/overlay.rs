use crate::constants::{OVERLAY_FADE_MS, START_OVERLAY_ID};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Fade the start overlay out, then drop it from the document.
pub fn dismiss(document: &web::Document) {
    let Some(el) = document.get_element_by_id(START_OVERLAY_ID) else {
        return;
    };
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        _ = html.style().set_property("opacity", "0");
        _ = html.style().set_property("pointer-events", "none");
    }
    let remove = Closure::once_into_js(move || el.remove());
    if let Some(w) = web::window() {
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            remove.unchecked_ref(),
            OVERLAY_FADE_MS,
        );
    }
}
