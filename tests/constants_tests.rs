// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn label_sizing_is_consistent() {
    assert!(LABEL_MIN_PX > 0.0);
    assert!(LABEL_MIN_PX < LABEL_MAX_PX);
    assert!(LABEL_TEXT_GAP_PX >= 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn mesh_and_sky_sizes_are_usable() {
    assert!(SPHERE_LAT_SEGMENTS >= 2);
    assert!(SPHERE_LNG_SEGMENTS >= 3);
    let (w, h) = STAR_TEXTURE_SIZE;
    assert_eq!(w, 2 * h, "equirectangular textures are 2:1");
    assert!(STAR_COUNT < (w * h) as usize);
    assert_eq!(GLOBE_FALLBACK_RGBA[3], 255);
}

#[test]
fn toggle_button_states_differ() {
    assert_ne!(TOGGLE_LABEL_SHOWN, TOGGLE_LABEL_HIDDEN);
    assert_eq!(TOGGLE_COLOR_SHOWN, "#4CAF50");
    assert_eq!(TOGGLE_COLOR_HIDDEN, "#f44336");
    assert!(!CANVAS_ID.is_empty() && CANVAS_ID != LABEL_CANVAS_ID);
}
