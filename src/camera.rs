use glam::{Mat4, Vec2, Vec3, Vec4};

/// Project a world point to canvas pixels (origin top-left). Returns `None`
/// for points behind the camera or outside the depth range.
#[inline]
pub fn project_to_screen(view_proj: Mat4, world: Vec3, width: f32, height: f32) -> Option<Vec2> {
    let clip = view_proj * Vec4::from((world, 1.0));
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    if !(0.0..=1.0).contains(&ndc.z) {
        return None;
    }
    Some(Vec2::new(
        (ndc.x * 0.5 + 0.5) * width,
        (0.5 - ndc.y * 0.5) * height,
    ))
}

/// Whether a point on the globe surface is on the hemisphere facing `eye`.
#[inline]
pub fn faces_camera(surface_point: Vec3, eye: Vec3) -> bool {
    surface_point.dot(eye - surface_point) > 0.0
}

/// Camera right and up axes in world space, for screen-aligned billboards.
#[inline]
pub fn billboard_axes(view: Mat4) -> (Vec3, Vec3) {
    let inv = view.inverse();
    (
        inv.x_axis.truncate().normalize_or_zero(),
        inv.y_axis.truncate().normalize_or_zero(),
    )
}

/// On-screen size in pixels of a world-space extent `world_size` seen
/// `distance` away through a perspective camera with vertical field of view
/// `fovy` (radians) on a viewport `viewport_height` pixels tall.
#[inline]
pub fn world_size_to_px(world_size: f32, distance: f32, viewport_height: f32, fovy: f32) -> f32 {
    let focal_px = viewport_height * 0.5 / (fovy * 0.5).tan();
    world_size * focal_px / distance.max(1e-3)
}

/// Pixel size of an extent given in degrees of arc on a globe of `globe_radius`.
#[inline]
pub fn angular_size_px(
    size_deg: f64,
    globe_radius: f32,
    distance: f32,
    viewport_height: f32,
    fovy: f32,
) -> f32 {
    let world = size_deg.to_radians() as f32 * globe_radius;
    world_size_to_px(world, distance, viewport_height, fovy)
}
