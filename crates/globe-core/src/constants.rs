use crate::palette::Rgba;

// Shared scene tuning constants used by the globe component and the web renderer.

// Globe geometry
pub const GLOBE_RADIUS: f32 = 1.0; // world units; altitudes are expressed in globe radii

// Camera follow
pub const FOLLOW_ALTITUDE: f64 = 1.5; // point-of-view altitude when tracking the plane
pub const FOLLOW_DURATION_MS: u32 = 1000;
pub const DEFAULT_POV_ALTITUDE: f64 = 2.5; // initial view before the first follow request

// Moving marker (plane model)
pub const MODEL_SCALE: f32 = 0.5; // uniform scale applied to the loaded template
pub const MODEL_UNITS_PER_GLOBE: f32 = 0.01; // model space to world space before MODEL_SCALE
pub const MARKER_ALTITUDE: f64 = 0.08;

// Point markers
pub const DEPARTURE_COLOR: Rgba = Rgba::from_hex(0xff0000ff);
pub const DESTINATION_COLOR: Rgba = Rgba::from_hex(0x00ff00ff);
pub const POINT_SIZE: f32 = 0.5;
pub const POINT_ALTITUDE: f64 = 0.04;

// Flight arcs
pub const EXPECTED_ARC_COLOR: Rgba = Rgba::from_hex(0x87b6e8ff);
pub const ACTUAL_ARC_COLOR: Rgba = Rgba::from_hex(0x20cb5fff);
pub const ARC_STROKE: f32 = 0.8; // ribbon width as an angle in degrees
pub const ARC_ALTITUDE: f64 = 0.1; // peak height of every arc, in globe radii
pub const ARC_SEGMENTS: usize = 64;

// City labels
pub const LABEL_SCALE: f64 = 4e-4; // size and dot radius = sqrt(population) * LABEL_SCALE
pub const LABEL_COLOR: Rgba = Rgba::new(255, 165, 0, 191);
pub const LABEL_ALTITUDE: f64 = 0.02;

// Country polygons
pub const POLYGON_CAP_COLOR: Rgba = Rgba::new(0, 255, 255, 13);
pub const POLYGON_SIDE_COLOR: Rgba = Rgba::new(0, 100, 255, 38);
pub const POLYGON_STROKE_COLOR: Rgba = Rgba::from_hex(0x00ffffff);
pub const POLYGON_ALTITUDE: f64 = 0.01;
pub const COUNTRY_PALETTE_SIZE: usize = 195;

// Orbit controls
pub const ROTATE_SPEED_DEG_PER_PX: f64 = 0.25; // scaled by altitude so zoomed-in drags stay precise
pub const ZOOM_SPEED: f64 = 0.001;
pub const MIN_ALTITUDE: f64 = 0.1;
pub const MAX_ALTITUDE: f64 = 10.0;
pub const MAX_LATITUDE: f64 = 89.9;

// Static resources served next to the wasm bundle
pub const MODEL_PATH: &str = "/plane.gltf";
pub const CITIES_PATH: &str = "/cities.json";
pub const COUNTRIES_PATH: &str = "/countries.geojson";
pub const GLOBE_IMAGE_PATH: &str = "/earth-night.jpg";
pub const BACKGROUND_IMAGE_PATH: &str = "/night-sky.png";
