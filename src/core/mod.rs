// Shaders bundled as string constants
pub static GLOBE_WGSL: &str = include_str!("../../shaders/globe.wgsl");
pub static SKY_WGSL: &str = include_str!("../../shaders/sky.wgsl");
pub static COLOR_WGSL: &str = include_str!("../../shaders/color.wgsl");
pub static POINTS_WGSL: &str = include_str!("../../shaders/points.wgsl");
pub static MODEL_WGSL: &str = include_str!("../../shaders/model.wgsl");
