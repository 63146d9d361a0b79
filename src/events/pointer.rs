use crate::input::{self, DragState, OrbitInput};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Drag to rotate, wheel to zoom. Input accumulates in `orbit` and is
/// applied by the frame loop.
pub fn wire_orbit_controls(canvas: &web::HtmlCanvasElement, orbit: Rc<RefCell<OrbitInput>>) {
    let drag = Rc::new(RefCell::new(DragState::default()));
    wire_pointerdown(canvas, drag.clone());
    wire_pointermove(canvas, drag.clone(), orbit.clone());
    wire_pointerup(canvas, drag);
    wire_wheel(canvas, orbit);
}

fn pointer_pos(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

fn wire_pointerdown(canvas: &web::HtmlCanvasElement, drag: Rc<RefCell<DragState>>) {
    let target = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        drag.borrow_mut().begin(ev.pointer_id(), pointer_pos(&ev));
        _ = target.set_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(
    canvas: &web::HtmlCanvasElement,
    drag: Rc<RefCell<DragState>>,
    orbit: Rc<RefCell<OrbitInput>>,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if let Some(delta) = drag.borrow_mut().move_to(ev.pointer_id(), pointer_pos(&ev)) {
            orbit.borrow_mut().add_drag(delta);
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(canvas: &web::HtmlCanvasElement, drag: Rc<RefCell<DragState>>) {
    let target = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        drag.borrow_mut().end(ev.pointer_id());
        _ = target.release_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    for name in ["pointerup", "pointercancel"] {
        _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(canvas: &web::HtmlCanvasElement, orbit: Rc<RefCell<OrbitInput>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        ev.prevent_default();
        orbit
            .borrow_mut()
            .add_zoom(input::wheel_pixels(ev.delta_y(), ev.delta_mode()));
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
