use crate::input::OrbitInput;
use crate::labels::LabelLayer;
use crate::render;
use globe_core::Globe;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub globe: Rc<RefCell<Globe>>,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,
    pub orbit: Rc<RefCell<OrbitInput>>,
    pub started: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let input = self.orbit.borrow_mut().take();
        let Some(g) = self.gpu.as_mut() else {
            return;
        };
        g.begin_frame(now_ms);
        g.resize_if_needed(self.canvas.width(), self.canvas.height());
        g.apply_orbit(input);
        self.globe.borrow_mut().sync(g);
        if let Err(e) = g.render() {
            log::error!("render error: {:?}", e);
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    labels: Option<LabelLayer>,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, labels).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
