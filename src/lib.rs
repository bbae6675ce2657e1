#![cfg(target_arch = "wasm32")]
use crate::constants::{CANVAS_ID, START_BUTTON_ID};
use crate::core::{FrameScheduler, MagneticElement, RenderPipeline};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Info);
    log::info!("[orb] starting");
    spawn_local(async {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("#{} is not a canvas", CANVAS_ID))?;
    let (width, height) = dom::sync_canvas_backing_size(&canvas);

    let gpu = frame::init_gpu(&canvas).await?;
    let pipeline = RenderPipeline::new(gpu, width, height);

    let elements = dom::magnetic_elements(&document);
    log::info!("[ui] {} magnetic elements", elements.len());
    let magnets = elements
        .iter()
        .cloned()
        .map(|el| MagneticElement::new(dom::DomElement::new(el)))
        .collect();

    let scheduler: frame::SharedScheduler =
        Rc::new(RefCell::new(FrameScheduler::new(pipeline, magnets)));

    events::wire_pointermove(&scheduler);
    events::wire_magnetic_elements(&scheduler, &elements);
    events::wire_resize(&canvas, &scheduler);
    wire_start_button(&document, &scheduler);

    frame::start_loop(scheduler);
    Ok(())
}

/// The start button requests microphone access; the overlay leaves either way.
fn wire_start_button(document: &web::Document, scheduler: &frame::SharedScheduler) {
    let scheduler = scheduler.clone();
    dom::add_click_listener(document, START_BUTTON_ID, move || {
        let begun = scheduler
            .try_borrow_mut()
            .map(|mut s| s.audio_mut().begin_activation())
            .unwrap_or(false);
        if !begun {
            return;
        }
        let scheduler = scheduler.clone();
        spawn_local(async move {
            let result = audio::open_microphone().await;
            scheduler.borrow_mut().audio_mut().complete_activation(result);
            if let Some(document) = dom::window_document() {
                overlay::dismiss(&document);
            }
        });
    });
}
