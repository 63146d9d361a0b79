//! Geographic primitives and the great-circle math the scene is built on.
//!
//! World space follows the globe renderer's convention: +Y points at the north
//! pole, (0°, 0°) sits on +Z and (0°, 90°E) on +X. Altitudes are expressed in
//! globe radii above the surface.

use crate::constants::GLOBE_RADIUS;
use glam::{DVec3, Mat3, Quat, Vec3};
use std::f64::consts::PI;

/// Latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lng: f64,
}

impl GeoCoordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Bitwise equality: a NaN component matches an identical NaN, unlike `==`.
    pub fn same_bits(self, other: Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lng.to_bits() == other.lng.to_bits()
    }

    /// Unit vector from the globe centre through this coordinate.
    pub fn unit_vector(self) -> DVec3 {
        let phi = (90.0 - self.lat).to_radians();
        let theta = (90.0 - self.lng).to_radians();
        DVec3::new(
            phi.sin() * theta.cos(),
            phi.cos(),
            phi.sin() * theta.sin(),
        )
    }

    /// Inverse of [`GeoCoordinate::unit_vector`]; `v` need not be normalized.
    pub fn from_vector(v: DVec3) -> Self {
        let r = v.length();
        if r == 0.0 {
            return Self::default();
        }
        let lat = 90.0 - (v.y / r).clamp(-1.0, 1.0).acos().to_degrees();
        let lng = 90.0 - v.z.atan2(v.x).to_degrees();
        Self::new(lat, wrap_longitude(lng))
    }
}

/// Initial compass bearing in radians (atan2 range) from `start` towards `end`
/// along the great circle. Coincident points give 0.
pub fn bearing(start: GeoCoordinate, end: GeoCoordinate) -> f64 {
    let lat1 = start.lat * PI / 180.0;
    let lat2 = end.lat * PI / 180.0;
    let delta_lng = (end.lng - start.lng) * PI / 180.0;

    let y = delta_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();

    y.atan2(x)
}

/// [`bearing`] as a compass heading in degrees, normalized to `[0, 360)`.
pub fn bearing_degrees(start: GeoCoordinate, end: GeoCoordinate) -> f64 {
    bearing(start, end).to_degrees().rem_euclid(360.0)
}

/// Great-circle distance between two coordinates as a central angle in radians.
pub fn haversine_distance(a: GeoCoordinate, b: GeoCoordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * h.sqrt().min(1.0).asin()
}

/// Point at fraction `t` of the way along the great circle from `a` to `b`.
pub fn interpolate(a: GeoCoordinate, b: GeoCoordinate, t: f64) -> GeoCoordinate {
    let va = a.unit_vector();
    let vb = b.unit_vector();
    let omega = va.dot(vb).clamp(-1.0, 1.0).acos();
    if omega.abs() < 1e-12 {
        return a;
    }
    let s = omega.sin();
    if s.abs() < 1e-12 {
        // Antipodal: every great circle works, fall back to a straight blend.
        return GeoCoordinate::from_vector(va.lerp(vb, t));
    }
    let v = va * (((1.0 - t) * omega).sin() / s) + vb * ((t * omega).sin() / s);
    GeoCoordinate::from_vector(v)
}

/// Bring a longitude into `(-180, 180]`.
pub fn wrap_longitude(lng: f64) -> f64 {
    let wrapped = (lng + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 {
        180.0
    } else {
        wrapped
    }
}

/// World-space position of a coordinate at `altitude` globe radii above the surface.
pub fn to_cartesian(coord: GeoCoordinate, altitude: f64) -> Vec3 {
    let r = GLOBE_RADIUS as f64 * (1.0 + altitude);
    (coord.unit_vector() * r).as_vec3()
}

/// Rotation taking model space (+Y up, +Z forward) to a pose resting on the
/// globe at `coord` with its nose pointing along `bearing_rad`.
pub fn marker_orientation(coord: GeoCoordinate, bearing_rad: f64) -> Quat {
    let up = coord.unit_vector();
    let mut north = DVec3::Y - up * up.dot(DVec3::Y);
    if north.length_squared() < 1e-12 {
        // At a pole every direction is south (or north); pick a stable reference.
        north = if up.y > 0.0 { -DVec3::Z } else { DVec3::Z };
    }
    let north = north.normalize();
    let east = north.cross(up);
    let forward = north * bearing_rad.cos() + east * bearing_rad.sin();
    let right = up.cross(forward);
    Quat::from_mat3(&Mat3::from_cols(
        right.as_vec3(),
        up.as_vec3(),
        forward.as_vec3(),
    ))
    .normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_longitude_keeps_range() {
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
        assert_eq!(wrap_longitude(-180.0), 180.0);
        assert_eq!(wrap_longitude(45.0), 45.0);
    }

    #[test]
    fn vector_round_trip_for_a_few_cities() {
        for c in [
            GeoCoordinate::new(40.7128, -74.0060),
            GeoCoordinate::new(-33.8688, 151.2093),
            GeoCoordinate::new(6.6085, 3.2281),
        ] {
            let back = GeoCoordinate::from_vector(c.unit_vector());
            assert!((back.lat - c.lat).abs() < 1e-9);
            assert!((back.lng - c.lng).abs() < 1e-9);
        }
    }
}
