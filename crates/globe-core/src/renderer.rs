use crate::camera::PointOfView;
use crate::cities::CityLabel;
use crate::constants::{POLYGON_CAP_COLOR, POLYGON_SIDE_COLOR, POLYGON_STROKE_COLOR};
use crate::countries::CountryPolygon;
use crate::geo::{to_cartesian, GeoCoordinate};
use crate::palette::Rgba;
use crate::scene::{ArcDescriptor, MovingMarker, PointMarker};
use glam::Vec3;

/// Colours for the country overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonStyle {
    pub cap: Rgba,
    pub side: Rgba,
    pub stroke: Rgba,
    /// Per-country stroke colours, cycled by index; `None` uses `stroke` for all.
    pub palette: Option<Vec<Rgba>>,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            cap: POLYGON_CAP_COLOR,
            side: POLYGON_SIDE_COLOR,
            stroke: POLYGON_STROKE_COLOR,
            palette: None,
        }
    }
}

impl PolygonStyle {
    pub fn stroke_for(&self, index: usize) -> Rgba {
        match &self.palette {
            Some(p) if !p.is_empty() => p[index % p.len()],
            _ => self.stroke,
        }
    }
}

/// Everything the globe component needs from a rendering surface.
///
/// Each `set_*` call replaces the whole dataset for that layer. The globe
/// component only calls a setter when the derived data actually changed.
pub trait SceneRenderer {
    /// `None` removes the overlay entirely.
    fn set_polygons(&mut self, polygons: Option<&[CountryPolygon]>, style: &PolygonStyle);
    fn set_points(&mut self, points: &[PointMarker]);
    fn set_arcs(&mut self, arcs: &[ArcDescriptor]);
    fn set_labels(&mut self, labels: &[CityLabel]);
    fn set_custom_objects(&mut self, objects: &[MovingMarker]);

    /// Animate the camera to `pov` over `duration_ms` (0 jumps).
    fn point_of_view(&mut self, pov: PointOfView, duration_ms: u32);

    /// Whether the camera can accept [`SceneRenderer::point_of_view`] yet.
    fn camera_attached(&self) -> bool {
        true
    }

    /// World position of a coordinate at `altitude` globe radii.
    fn get_coords(&self, coord: GeoCoordinate, altitude: f64) -> Vec3 {
        to_cartesian(coord, altitude)
    }
}
