// Web front-end tuning constants: DOM ids, GPU layer sizes and label styling.

// DOM
pub const CANVAS_ID: &str = "globe-canvas";
pub const LABEL_CANVAS_ID: &str = "label-canvas";
pub const POLYGON_TOGGLE_ID: &str = "polygon-toggle";

// Polygon toggle button
pub const TOGGLE_LABEL_SHOWN: &str = "Hide grid lines";
pub const TOGGLE_LABEL_HIDDEN: &str = "Show grid lines";
pub const TOGGLE_COLOR_SHOWN: &str = "#4CAF50";
pub const TOGGLE_COLOR_HIDDEN: &str = "#f44336";

// Globe mesh and fallbacks
pub const SPHERE_LAT_SEGMENTS: u32 = 64;
pub const SPHERE_LNG_SEGMENTS: u32 = 128;
pub const GLOBE_FALLBACK_RGBA: [u8; 4] = [12, 22, 48, 255]; // flat night-blue when the texture fails
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.0];

// Procedural sky used until (or instead of) the background image
pub const STAR_TEXTURE_SIZE: (u32, u32) = (1024, 512);
pub const STAR_COUNT: usize = 2500;
pub const STAR_SEED: u64 = 7;

// Labels on the 2D overlay
pub const LABEL_FONT_FAMILY: &str = "system-ui, sans-serif";
pub const LABEL_MIN_PX: f32 = 2.0; // below this a label is skipped
pub const LABEL_MAX_PX: f32 = 160.0; // only reached when zoomed right onto a megacity
pub const LABEL_TEXT_GAP_PX: f32 = 3.0;
