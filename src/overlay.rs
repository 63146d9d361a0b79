use crate::constants::{
    POLYGON_TOGGLE_ID, TOGGLE_COLOR_HIDDEN, TOGGLE_COLOR_SHOWN, TOGGLE_LABEL_HIDDEN,
    TOGGLE_LABEL_SHOWN,
};
use globe_core::Globe;
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Reflect the overlay state on the toggle button (label and colour).
pub fn update_toggle_button(document: &web::Document, shown: bool) {
    let Some(el) = document.get_element_by_id(POLYGON_TOGGLE_ID) else {
        return;
    };
    el.set_text_content(Some(if shown {
        TOGGLE_LABEL_SHOWN
    } else {
        TOGGLE_LABEL_HIDDEN
    }));
    let cl = el.class_list();
    if shown {
        _ = cl.remove_1("hidden-grid");
    } else {
        _ = cl.add_1("hidden-grid");
    }
    if let Some(button) = el.dyn_ref::<web::HtmlElement>() {
        let color = if shown {
            TOGGLE_COLOR_SHOWN
        } else {
            TOGGLE_COLOR_HIDDEN
        };
        _ = button.style().set_property("background-color", color);
    }
}

/// Flip the country overlay and update the button; returns the new state.
pub fn toggle_polygons(globe: &RefCell<Globe>) -> bool {
    let shown = globe.borrow_mut().toggle_polygons();
    if let Some(document) = crate::dom::window_document() {
        update_toggle_button(&document, shown);
    }
    shown
}
