//! Point-of-view camera: the animated rig the renderer owns, and the follower
//! that asks it to track the plane.

use crate::constants::{FOLLOW_ALTITUDE, FOLLOW_DURATION_MS};
use crate::geo::{to_cartesian, wrap_longitude, GeoCoordinate};
use crate::renderer::SceneRenderer;
use glam::{Mat4, Vec3};

/// Vertical field of view of the globe camera.
pub const FOVY_RADIANS: f32 = std::f32::consts::FRAC_PI_4;
pub const ZNEAR: f32 = 0.01;
pub const ZFAR: f32 = 100.0;

/// Camera placement above the globe. `altitude` is in globe radii above the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointOfView {
    pub lat: f64,
    pub lng: f64,
    pub altitude: f64,
}

impl PointOfView {
    pub const fn new(lat: f64, lng: f64, altitude: f64) -> Self {
        Self { lat, lng, altitude }
    }

    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.lat, self.lng)
    }

    pub fn eye(&self) -> Vec3 {
        to_cartesian(self.coordinate(), self.altitude)
    }

    pub fn view_matrix(&self) -> Mat4 {
        // Near the poles the eye direction approaches +Y; switch the up hint.
        let up = if self.lat.abs() > 89.0 { Vec3::Z } else { Vec3::Y };
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, up)
    }

    pub fn projection_matrix(aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOVY_RADIANS, aspect.max(1e-3), ZNEAR, ZFAR)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        Self::projection_matrix(aspect) * self.view_matrix()
    }
}

#[inline]
pub fn ease_quad_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// One in-flight camera animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PovTransition {
    pub from: PointOfView,
    pub to: PointOfView,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl PovTransition {
    /// Interpolated view at `now_ms`; longitudes take the short way around.
    pub fn sample(&self, now_ms: f64) -> PointOfView {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let e = ease_quad_in_out((now_ms - self.start_ms) / self.duration_ms);
        let d_lng = wrap_longitude(self.to.lng - self.from.lng);
        PointOfView {
            lat: self.from.lat + (self.to.lat - self.from.lat) * e,
            lng: wrap_longitude(self.from.lng + d_lng * e),
            altitude: self.from.altitude + (self.to.altitude - self.from.altitude) * e,
        }
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms >= self.duration_ms
    }
}

/// Current camera view plus at most one running transition.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pov: PointOfView,
    transition: Option<PovTransition>,
}

impl CameraRig {
    pub fn new(pov: PointOfView) -> Self {
        Self {
            pov,
            transition: None,
        }
    }

    pub fn pov(&self) -> PointOfView {
        self.pov
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Start animating towards `target`. A transition already in flight is
    /// replaced, starting from wherever it had got to at `now_ms`.
    pub fn animate_to(&mut self, target: PointOfView, duration_ms: u32, now_ms: f64) {
        let from = self.advance(now_ms);
        if duration_ms == 0 {
            self.pov = target;
            self.transition = None;
            return;
        }
        self.transition = Some(PovTransition {
            from,
            to: target,
            start_ms: now_ms,
            duration_ms: duration_ms as f64,
        });
    }

    /// Step the running transition to `now_ms` and return the resulting view.
    pub fn advance(&mut self, now_ms: f64) -> PointOfView {
        if let Some(t) = self.transition {
            self.pov = t.sample(now_ms);
            if t.is_finished(now_ms) {
                self.pov = t.to;
                self.transition = None;
            }
        }
        self.pov
    }

    /// Direct manipulation (orbit controls). Cancels any running transition.
    pub fn set_pov(&mut self, pov: PointOfView) {
        self.transition = None;
        self.pov = pov;
    }
}

/// Re-centres the camera on the plane whenever its position changes.
#[derive(Clone, Debug)]
pub struct CameraFollower {
    last: Option<GeoCoordinate>,
    altitude: f64,
    duration_ms: u32,
}

impl Default for CameraFollower {
    fn default() -> Self {
        Self {
            last: None,
            altitude: FOLLOW_ALTITUDE,
            duration_ms: FOLLOW_DURATION_MS,
        }
    }
}

impl CameraFollower {
    pub fn new(altitude: f64, duration_ms: u32) -> Self {
        Self {
            last: None,
            altitude,
            duration_ms,
        }
    }

    /// Issue a transition if `current` differs from the last position seen.
    /// Does nothing (and remembers nothing) while the camera is detached, so
    /// the request goes out once it attaches. Returns whether a request was made.
    pub fn on_position<R: SceneRenderer + ?Sized>(
        &mut self,
        current: GeoCoordinate,
        renderer: &mut R,
    ) -> bool {
        let seen = self.last.is_some_and(|last| last.same_bits(current));
        if seen || !renderer.camera_attached() {
            return false;
        }
        self.last = Some(current);
        let target = PointOfView::new(current.lat, current.lng, self.altitude);
        log::info!(
            "[camera] follow -> lat={:.4} lng={:.4} alt={:.2} over {}ms",
            target.lat,
            target.lng,
            target.altitude,
            self.duration_ms
        );
        renderer.point_of_view(target, self.duration_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert_eq!(ease_quad_in_out(0.0), 0.0);
        assert_eq!(ease_quad_in_out(1.0), 1.0);
        assert!((ease_quad_in_out(0.5) - 0.5).abs() < 1e-12);
        assert_eq!(ease_quad_in_out(-1.0), 0.0);
        assert_eq!(ease_quad_in_out(2.0), 1.0);
    }

    #[test]
    fn eye_sits_above_the_surface() {
        let pov = PointOfView::new(0.0, 0.0, 1.5);
        assert!((pov.eye() - Vec3::new(0.0, 0.0, 2.5)).length() < 1e-5);
    }
}
