use crate::input;
use crate::overlay;
use globe_core::Globe;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `g` flips the country overlay, same as the button.
pub fn wire_polygon_toggle_key(globe: Rc<RefCell<Globe>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
                    return;
                }
                if input::is_polygon_toggle_key(&ev.key()) {
                    overlay::toggle_polygons(&globe);
                    ev.prevent_default();
                }
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
