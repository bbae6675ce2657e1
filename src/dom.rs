use crate::constants::{MAGNETIC_SELECTOR, MAX_PIXEL_RATIO};
use crate::core::{ElementHandle, ElementRect};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// CSS viewport size in pixels.
pub fn viewport_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width as f32, height as f32)
}

/// Resize the canvas backing store to its CSS size times the capped device
/// pixel ratio and return the new backing size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(MAX_PIXEL_RATIO);
        let rect = canvas.get_bounding_client_rect();
        let w_px = ((rect.width() * dpr) as u32).max(1);
        let h_px = ((rect.height() * dpr) as u32).max(1);
        if canvas.width() != w_px || canvas.height() != h_px {
            canvas.set_width(w_px);
            canvas.set_height(h_px);
        }
    }
    (canvas.width(), canvas.height())
}

pub fn magnetic_elements(document: &web::Document) -> Vec<web::HtmlElement> {
    let Ok(list) = document.query_selector_all(MAGNETIC_SELECTOR) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

/// A page element that magnetic offsets are written to via CSS transform.
pub struct DomElement {
    element: web::HtmlElement,
}

impl DomElement {
    pub fn new(element: web::HtmlElement) -> Self {
        Self { element }
    }
}

impl ElementHandle for DomElement {
    fn bounding_rect(&self) -> ElementRect {
        let r = self.element.get_bounding_client_rect();
        ElementRect {
            left: r.left() as f32,
            top: r.top() as f32,
            width: r.width() as f32,
            height: r.height() as f32,
        }
    }

    fn apply_offset(&self, offset: Vec2) {
        let transform = format!("translate({:.3}px, {:.3}px)", offset.x, offset.y);
        _ = self.element.style().set_property("transform", &transform);
    }
}
