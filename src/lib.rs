#![cfg(target_arch = "wasm32")]
use crate::constants::{CANVAS_ID, LABEL_CANVAS_ID, POLYGON_TOGGLE_ID};
use crate::input::OrbitInput;
use globe_core::constants::{
    BACKGROUND_IMAGE_PATH, CITIES_PATH, COUNTRIES_PATH, GLOBE_IMAGE_PATH, MODEL_PATH,
};
use globe_core::{GeoCoordinate, Globe, GlobeConfig};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod camera;
mod constants;
mod core;
mod dom;
mod events;
mod fetch;
mod frame;
mod input;
mod labels;
mod overlay;
mod render;

thread_local! {
    // Set once init has built the component; read by the exported setters.
    static GLOBE: RefCell<Option<Rc<RefCell<Globe>>>> = const { RefCell::new(None) };
}

fn with_globe<T>(f: impl FnOnce(&Rc<RefCell<Globe>>) -> T) -> Option<T> {
    GLOBE.with(|g| g.borrow().as_ref().map(f))
}

/// Move the plane. Ignored until the page has finished initialising.
#[wasm_bindgen]
pub fn set_current_position(lat: f64, lng: f64) {
    if with_globe(|g| g.borrow_mut().set_current_position(GeoCoordinate::new(lat, lng))).is_none()
    {
        log::warn!("[globe] set_current_position before init");
    }
}

/// Flip the country overlay; returns whether it is now shown.
#[wasm_bindgen]
pub fn toggle_polygons() -> bool {
    with_globe(|g| overlay::toggle_polygons(g)).unwrap_or(false)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("flight-globe starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn spawn_data_loaders(globe: &Rc<RefCell<Globe>>) {
    let g = globe.clone();
    spawn_local(async move {
        let result = fetch::load_model(MODEL_PATH).await;
        g.borrow_mut().on_model_loaded(result);
    });
    let g = globe.clone();
    spawn_local(async move {
        let result = fetch::load_cities(CITIES_PATH).await;
        g.borrow_mut().on_cities_loaded(result);
    });
    let g = globe.clone();
    spawn_local(async move {
        let result = fetch::load_countries(COUNTRIES_PATH).await;
        g.borrow_mut().on_countries_loaded(result);
    });
}

fn spawn_texture_loaders(frame_ctx: &Rc<RefCell<frame::FrameContext<'static>>>) {
    let ctx = frame_ctx.clone();
    spawn_local(async move {
        match fetch::load_image(GLOBE_IMAGE_PATH).await {
            Ok(img) => {
                if let Some(gpu) = ctx.borrow_mut().gpu.as_mut() {
                    gpu.set_globe_texture((img.width, img.height), &img.pixels);
                    log::info!("[assets] globe texture {}x{}", img.width, img.height);
                }
            }
            Err(e) => log::error!("[assets] globe texture failed, using flat colour: {:?}", e),
        }
    });
    let ctx = frame_ctx.clone();
    spawn_local(async move {
        match fetch::load_image(BACKGROUND_IMAGE_PATH).await {
            Ok(img) => {
                if let Some(gpu) = ctx.borrow_mut().gpu.as_mut() {
                    gpu.set_sky_texture((img.width, img.height), &img.pixels);
                    log::info!("[assets] sky texture {}x{}", img.width, img.height);
                }
            }
            Err(e) => log::error!("[assets] sky texture failed, keeping star field: {:?}", e),
        }
    });
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, CANVAS_ID)?;

    // The label canvas is optional; without it the globe simply has no city names.
    let label_canvas = dom::canvas_by_id(&document, LABEL_CANVAS_ID)
        .map_err(|e| log::warn!("[cities] no label canvas: {:?}", e))
        .ok();
    let mut canvases = vec![canvas.clone()];
    canvases.extend(label_canvas.clone());
    dom::wire_canvas_resize(canvases);
    let labels = label_canvas.and_then(|c| {
        labels::LabelLayer::new(c)
            .map_err(|e| log::warn!("[cities] label layer unavailable: {:?}", e))
            .ok()
    });

    let config = GlobeConfig::from_query(&dom::query_string()).unwrap_or_else(|e| {
        log::warn!("[globe] ignoring query string: {}", e);
        GlobeConfig::default()
    });
    let globe = Rc::new(RefCell::new(Globe::new(config)));
    GLOBE.with(|g| *g.borrow_mut() = Some(globe.clone()));

    overlay::update_toggle_button(&document, globe.borrow().show_polygons());
    let g = globe.clone();
    dom::add_click_listener(&document, POLYGON_TOGGLE_ID, move || {
        overlay::toggle_polygons(&g);
    });
    events::wire_polygon_toggle_key(globe.clone());

    spawn_data_loaders(&globe);

    let gpu = frame::init_gpu(&canvas, labels).await;
    let orbit = Rc::new(RefCell::new(OrbitInput::default()));
    events::wire_orbit_controls(&canvas, orbit.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        globe,
        gpu,
        canvas,
        orbit,
        started: Instant::now(),
    }));
    spawn_texture_loaders(&frame_ctx);
    frame::start_loop(frame_ctx);
    Ok(())
}
