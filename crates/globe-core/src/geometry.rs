//! CPU-side geometry for the globe layers. Everything here is plain vertex
//! data; the renderer only packs and uploads it.

use crate::constants::GLOBE_RADIUS;
use crate::geo::{haversine_distance, interpolate, to_cartesian, GeoCoordinate};
use glam::{Vec2, Vec3};
use std::f64::consts::PI;

// Longest polygon edge drawn as a straight chord before it gets subdivided.
const MAX_EDGE_DEG: f64 = 2.0;

/// Vertex of the textured globe: world position plus equirectangular UV.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereVertex {
    pub position: Vec3,
    pub uv: Vec2,
}

/// Latitude/longitude grid sphere whose UVs line up with an equirectangular
/// texture (u = 0 at 180°W, v = 0 at the north pole).
pub fn uv_sphere(lat_segments: u32, lng_segments: u32) -> (Vec<SphereVertex>, Vec<u32>) {
    let lat_segments = lat_segments.max(2);
    let lng_segments = lng_segments.max(3);
    let mut vertices = Vec::with_capacity(((lat_segments + 1) * (lng_segments + 1)) as usize);
    for i in 0..=lat_segments {
        let v = i as f64 / lat_segments as f64;
        let lat = 90.0 - v * 180.0;
        for j in 0..=lng_segments {
            let u = j as f64 / lng_segments as f64;
            let lng = u * 360.0 - 180.0;
            vertices.push(SphereVertex {
                position: to_cartesian(GeoCoordinate::new(lat, lng), 0.0),
                uv: Vec2::new(u as f32, v as f32),
            });
        }
    }
    let row = lng_segments + 1;
    let mut indices = Vec::with_capacity((lat_segments * lng_segments * 6) as usize);
    for i in 0..lat_segments {
        for j in 0..lng_segments {
            let a = i * row + j;
            let b = a + row;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    (vertices, indices)
}

/// Points along a flight arc: the great circle from `start` to `end`, lifted
/// by a sine profile that peaks at `peak_altitude` half way.
pub fn arc_points(
    start: GeoCoordinate,
    end: GeoCoordinate,
    peak_altitude: f64,
    segments: usize,
) -> Vec<Vec3> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            let altitude = peak_altitude * (PI * t).sin();
            to_cartesian(interpolate(start, end, t), altitude)
        })
        .collect()
}

/// World-space width of a stroke given as an angle in degrees.
#[inline]
pub fn stroke_width(stroke_deg: f32) -> f32 {
    stroke_deg.to_radians() * GLOBE_RADIUS
}

/// Triangle list for a flat ribbon of `width` following `points`, lying
/// tangent to the globe so it reads as a stroke from above.
pub fn ribbon(points: &[Vec3], width: f32) -> Vec<Vec3> {
    if points.len() < 2 {
        return Vec::new();
    }
    let half = width * 0.5;
    let last = points.len() - 1;
    let edges: Vec<(Vec3, Vec3)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let prev = points[i.saturating_sub(1)];
            let next = points[(i + 1).min(last)];
            let tangent = next - prev;
            let side = tangent.cross(p.normalize_or_zero()).normalize_or_zero() * half;
            (*p + side, *p - side)
        })
        .collect();
    let mut out = Vec::with_capacity(last * 6);
    for w in edges.windows(2) {
        let (l0, r0) = w[0];
        let (l1, r1) = w[1];
        out.extend_from_slice(&[l0, r0, l1, l1, r0, r1]);
    }
    out
}

/// Line list (pairs of endpoints) outlining closed rings at `altitude`.
/// Long edges are subdivided along the great circle so they hug the globe.
pub fn ring_outlines(rings: &[Vec<GeoCoordinate>], altitude: f64) -> Vec<Vec3> {
    let mut out = Vec::new();
    for ring in rings {
        if ring.len() < 2 {
            continue;
        }
        for pair in ring.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let steps = (haversine_distance(a, b).to_degrees() / MAX_EDGE_DEG).ceil().max(1.0) as usize;
            let mut prev = to_cartesian(a, altitude);
            for s in 1..=steps {
                let next = to_cartesian(interpolate(a, b, s as f64 / steps as f64), altitude);
                out.push(prev);
                out.push(next);
                prev = next;
            }
        }
    }
    out
}

/// Triangle list of the vertical walls between the surface and `altitude`
/// under every ring edge.
pub fn ring_walls(rings: &[Vec<GeoCoordinate>], altitude: f64) -> Vec<Vec3> {
    let mut out = Vec::new();
    for ring in rings {
        for pair in ring.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (a_lo, a_hi) = (to_cartesian(a, 0.0), to_cartesian(a, altitude));
            let (b_lo, b_hi) = (to_cartesian(b, 0.0), to_cartesian(b, altitude));
            out.extend_from_slice(&[a_lo, b_lo, a_hi, a_hi, b_lo, b_hi]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ARC_ALTITUDE, ARC_STROKE};

    #[test]
    fn uv_sphere_counts() {
        let (v, i) = uv_sphere(4, 8);
        assert_eq!(v.len(), 5 * 9);
        assert_eq!(i.len(), 4 * 8 * 6);
        assert!(i.iter().all(|&ix| (ix as usize) < v.len()));
    }

    #[test]
    fn ribbon_emits_two_triangles_per_segment() {
        let pts = arc_points(GeoCoordinate::new(0.0, 0.0), GeoCoordinate::new(0.0, 30.0), 0.1, 10);
        assert_eq!(ribbon(&pts, 0.01).len(), 10 * 6);
        assert!(ribbon(&pts[..1], 0.01).is_empty());
    }

    #[test]
    fn arcs_peak_at_the_fixed_altitude_mid_route() {
        let new_york = GeoCoordinate::new(40.7128, -74.0060);
        let london = GeoCoordinate::new(51.5074, -0.1278);
        let pts = arc_points(new_york, london, ARC_ALTITUDE, 64);
        assert!((pts[32].length() - 1.1).abs() < 1e-5);
        assert!((pts[0].length() - 1.0).abs() < 1e-6);
        assert!((pts[64].length() - 1.0).abs() < 1e-6);

        // Route length does not change the height.
        let short = arc_points(new_york, GeoCoordinate::new(41.0, -73.0), ARC_ALTITUDE, 8);
        assert!((short[4].length() - 1.1).abs() < 1e-5);
    }

    #[test]
    fn stroke_is_an_angular_width() {
        let w = stroke_width(ARC_STROKE);
        assert!((w - 0.013_962_6).abs() < 1e-6, "got {w}");
    }

    #[test]
    fn outlines_and_walls_per_edge() {
        let ring = vec![
            GeoCoordinate::new(0.0, 0.0),
            GeoCoordinate::new(0.0, 1.0),
            GeoCoordinate::new(1.0, 1.0),
            GeoCoordinate::new(0.0, 0.0),
        ];
        let rings = vec![ring];
        assert_eq!(ring_outlines(&rings, 0.01).len(), 3 * 2);
        assert_eq!(ring_walls(&rings, 0.01).len(), 3 * 6);
    }
}
