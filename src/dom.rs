use wasm_bindgen::closure::Closure;
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
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Keep every canvas' backing store at CSS size * devicePixelRatio.
pub fn wire_canvas_resize(canvases: Vec<web::HtmlCanvasElement>) {
    for c in &canvases {
        sync_canvas_backing_size(c);
    }
    let resize_closure = Closure::wrap(Box::new(move || {
        for c in &canvases {
            sync_canvas_backing_size(c);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// `location.search` of the page, empty when unavailable.
pub fn query_string() -> String {
    web::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}
