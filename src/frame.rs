use crate::audio::MicrophoneAnalyser;
use crate::dom::DomElement;
use crate::render::GpuState;
use crate::core::FrameScheduler;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type OrbScheduler = FrameScheduler<MicrophoneAnalyser, GpuState, DomElement>;
pub type SharedScheduler = Rc<RefCell<OrbScheduler>>;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> anyhow::Result<GpuState> {
    GpuState::new(canvas).await
}

/// Drive the scheduler from `requestAnimationFrame` for the page's lifetime.
pub fn start_loop(scheduler: SharedScheduler) {
    let tick: Tick = Rc::new(RefCell::new(None));
    let tick_next = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        run_frame(&scheduler);
        request_frame(&tick_next);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Tick) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn run_frame(scheduler: &SharedScheduler) {
    let Ok(mut s) = scheduler.try_borrow_mut() else {
        return;
    };
    match s.frame() {
        Ok(()) => {}
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            log::debug!("[gpu] surface reconfigured, frame skipped");
        }
        Err(e) => log::error!("render error: {:?}", e),
    }
}
