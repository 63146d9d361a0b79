use crate::camera::PointOfView;
use crate::constants::{
    MAX_ALTITUDE, MAX_LATITUDE, MIN_ALTITUDE, ROTATE_SPEED_DEG_PER_PX, ZOOM_SPEED,
};
use crate::geo::wrap_longitude;

/// Rotate the view by a pointer drag of (`dx_px`, `dy_px`) so the surface
/// follows the pointer. Rotation slows as the camera gets closer.
pub fn orbit(pov: PointOfView, dx_px: f64, dy_px: f64) -> PointOfView {
    let k = ROTATE_SPEED_DEG_PER_PX * pov.altitude.max(MIN_ALTITUDE);
    PointOfView {
        lat: (pov.lat + dy_px * k).clamp(-MAX_LATITUDE, MAX_LATITUDE),
        lng: wrap_longitude(pov.lng - dx_px * k),
        altitude: pov.altitude,
    }
}

/// Exponential wheel zoom; positive `delta` moves the camera away.
pub fn zoom(pov: PointOfView, delta: f64) -> PointOfView {
    PointOfView {
        altitude: (pov.altitude * (delta * ZOOM_SPEED).exp()).clamp(MIN_ALTITUDE, MAX_ALTITUDE),
        ..pov
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_right_turns_view_west() {
        let pov = orbit(PointOfView::new(0.0, 10.0, 1.0), 4.0, 0.0);
        assert!(pov.lng < 10.0);
        assert_eq!(pov.lat, 0.0);
    }

    #[test]
    fn latitude_is_clamped() {
        let pov = orbit(PointOfView::new(80.0, 0.0, 2.0), 0.0, 1000.0);
        assert_eq!(pov.lat, MAX_LATITUDE);
    }

    #[test]
    fn zoom_stays_in_bounds() {
        let p = PointOfView::new(0.0, 0.0, 1.5);
        assert!(zoom(p, 100.0).altitude > 1.5);
        assert!(zoom(p, -100.0).altitude < 1.5);
        assert_eq!(zoom(p, 1e6).altitude, MAX_ALTITUDE);
        assert_eq!(zoom(p, -1e6).altitude, MIN_ALTITUDE);
    }
}
