// End-to-end checks of the globe component against a renderer that only
// records what it was asked to draw.

use globe_core::cities::CityLabel;
use globe_core::config::{GlobeConfig, DEFAULT_CURRENT, LONDON, NEW_YORK};
use globe_core::constants::*;
use globe_core::countries::CountryPolygon;
use globe_core::geo::{bearing, marker_orientation, to_cartesian};
use globe_core::{
    ArcDescriptor, AssetState, GeoCoordinate, Globe, GlobeError, Mesh, MovingMarker,
    PointMarker, PointOfView, PolygonStyle, SceneNode, SceneRenderer,
};
use glam::{Vec3, Vec4};

#[derive(Default)]
struct RecordingRenderer {
    detached: bool,
    polygons: Vec<Option<Vec<String>>>,
    points: Vec<Vec<PointMarker>>,
    arcs: Vec<Vec<ArcDescriptor>>,
    labels: Vec<Vec<CityLabel>>,
    objects: Vec<Vec<MovingMarker>>,
    povs: Vec<(PointOfView, u32)>,
}

impl SceneRenderer for RecordingRenderer {
    fn set_polygons(&mut self, polygons: Option<&[CountryPolygon]>, _style: &PolygonStyle) {
        self.polygons
            .push(polygons.map(|p| p.iter().map(|c| c.name.clone()).collect()));
    }
    fn set_points(&mut self, points: &[PointMarker]) {
        self.points.push(points.to_vec());
    }
    fn set_arcs(&mut self, arcs: &[ArcDescriptor]) {
        self.arcs.push(arcs.to_vec());
    }
    fn set_labels(&mut self, labels: &[CityLabel]) {
        self.labels.push(labels.to_vec());
    }
    fn set_custom_objects(&mut self, objects: &[MovingMarker]) {
        self.objects.push(objects.to_vec());
    }
    fn point_of_view(&mut self, pov: PointOfView, duration_ms: u32) {
        self.povs.push((pov, duration_ms));
    }
    fn camera_attached(&self) -> bool {
        !self.detached
    }
}

fn plane() -> SceneNode {
    SceneNode::new(Mesh {
        positions: vec![Vec3::ZERO, Vec3::X, Vec3::Z],
        normals: vec![Vec3::Y; 3],
        colors: vec![Vec4::ONE; 3],
        indices: vec![0, 1, 2],
    })
}

fn country(name: &str) -> CountryPolygon {
    CountryPolygon {
        name: name.to_string(),
        rings: vec![vec![
            GeoCoordinate::new(0.0, 0.0),
            GeoCoordinate::new(0.0, 1.0),
            GeoCoordinate::new(1.0, 1.0),
            GeoCoordinate::new(0.0, 0.0),
        ]],
    }
}

fn assert_near(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn default_flight_scenario() {
    let mut globe = Globe::new(GlobeConfig::default());
    let mut r = RecordingRenderer::default();
    globe.sync(&mut r);

    assert_eq!(r.povs.len(), 1);
    let (pov, duration) = r.povs[0];
    assert_near(pov.lat, 6.6085);
    assert_near(pov.lng, 3.2281);
    assert_near(pov.altitude, 1.5);
    assert_eq!(duration, 1000);

    let arcs = &r.arcs[0];
    assert_eq!(arcs.len(), 2);
    assert_eq!(arcs[0].start, NEW_YORK);
    assert_eq!(arcs[0].end, LONDON);
    assert_eq!(arcs[0].color, [EXPECTED_ARC_COLOR; 2]);
    assert_eq!(arcs[1].start, NEW_YORK);
    assert_eq!(arcs[1].end, DEFAULT_CURRENT);
    assert_eq!(arcs[1].color, [ACTUAL_ARC_COLOR; 2]);

    let points = &r.points[0];
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].color, DEPARTURE_COLOR);
    assert_eq!(points[1].color, DESTINATION_COLOR);
    assert!(points.iter().all(|p| p.size == 0.5));

    // Model still loading: no marker yet.
    assert_eq!(r.objects.len(), 1);
    assert!(r.objects[0].is_empty());
    assert_eq!(globe.model_state(), AssetState::Loading);
}

#[test]
fn loaded_model_places_one_marker_facing_destination() {
    let mut globe = Globe::new(GlobeConfig::default());
    let mut r = RecordingRenderer::default();
    globe.sync(&mut r);
    globe.on_model_loaded(Ok(plane()));
    globe.sync(&mut r);

    let markers = r.objects.last().expect("markers pushed after load");
    assert_eq!(markers.len(), 1);
    let m = &markers[0];
    assert_eq!(m.coordinate(), DEFAULT_CURRENT);
    assert_eq!(m.object.transform.scale, Vec3::splat(MODEL_SCALE));

    let expected_pos = to_cartesian(DEFAULT_CURRENT, MARKER_ALTITUDE);
    assert!((m.object.transform.translation - expected_pos).length() < 1e-5);

    let heading = bearing(DEFAULT_CURRENT, LONDON);
    assert!((heading - -0.0515631).abs() < 1e-6);
    let expected_rot = marker_orientation(DEFAULT_CURRENT, heading);
    assert!(m.object.transform.rotation.dot(expected_rot).abs() > 0.99999);
}

#[test]
fn repeated_position_updates_keep_a_single_marker() {
    let mut globe = Globe::new(GlobeConfig::default());
    let mut r = RecordingRenderer::default();
    globe.on_model_loaded(Ok(plane()));
    globe.sync(&mut r);

    for i in 0..5 {
        globe.set_current_position(GeoCoordinate::new(10.0 + i as f64, 0.0));
        globe.sync(&mut r);
        assert_eq!(r.objects.last().map(Vec::len), Some(1));
    }
    assert_eq!(r.povs.len(), 6);

    // Same position again: nothing is rebuilt, no new camera request.
    let pushes = r.objects.len();
    globe.set_current_position(GeoCoordinate::new(14.0, 0.0));
    globe.sync(&mut r);
    assert_eq!(r.objects.len(), pushes);
    assert_eq!(r.povs.len(), 6);
}

#[test]
fn nan_position_does_not_rebuild_on_every_sync() {
    let mut globe = Globe::new(GlobeConfig::default());
    let mut r = RecordingRenderer::default();
    globe.on_model_loaded(Ok(plane()));
    globe.set_current_position(GeoCoordinate::new(f64::NAN, 0.0));
    globe.sync(&mut r);
    let counts = globe.builder().recompute_counts();
    let (pushes, povs) = (r.objects.len(), r.povs.len());

    globe.set_current_position(GeoCoordinate::new(f64::NAN, 0.0));
    globe.sync(&mut r);
    assert_eq!(globe.builder().recompute_counts(), counts);
    assert_eq!(r.objects.len(), pushes);
    assert_eq!(r.povs.len(), povs);
}

#[test]
fn position_change_leaves_points_and_expected_path_alone() {
    let mut globe = Globe::new(GlobeConfig::default());
    let mut r = RecordingRenderer::default();
    globe.sync(&mut r);
    let before = globe.builder().recompute_counts();

    globe.set_current_position(GeoCoordinate::new(20.0, -30.0));
    globe.sync(&mut r);
    let after = globe.builder().recompute_counts();

    assert_eq!(after.points, before.points);
    assert_eq!(after.expected_path, before.expected_path);
    assert_eq!(after.actual_path, before.actual_path + 1);
    assert_eq!(after.markers, before.markers + 1);
    assert_eq!(r.points.len(), 1);
    assert_eq!(r.arcs.len(), 2);
    assert_eq!(r.arcs[1][1].end, GeoCoordinate::new(20.0, -30.0));
}

#[test]
fn toggle_only_changes_polygons() {
    let mut globe = Globe::new(GlobeConfig::default());
    let mut r = RecordingRenderer::default();
    globe.on_countries_loaded(Ok(vec![country("Nigeria"), country("Ghana")]));
    globe.sync(&mut r);
    assert_eq!(
        r.polygons.last(),
        Some(&Some(vec!["Nigeria".to_string(), "Ghana".to_string()]))
    );

    assert!(!globe.toggle_polygons());
    globe.sync(&mut r);
    assert_eq!(r.polygons.last(), Some(&None));
    assert_eq!(r.points.len(), 1);
    assert_eq!(r.arcs.len(), 1);
    assert_eq!(r.labels.len(), 1);
    assert_eq!(r.povs.len(), 1);

    assert!(globe.toggle_polygons());
    globe.sync(&mut r);
    assert_eq!(r.polygons.len(), 3);
    assert!(matches!(r.polygons.last(), Some(Some(names)) if names.len() == 2));
}

#[test]
fn toggle_recreates_marker() {
    let mut globe = Globe::new(GlobeConfig::default());
    let mut r = RecordingRenderer::default();
    globe.on_model_loaded(Ok(plane()));
    globe.sync(&mut r);
    let markers_before = globe.builder().recompute_counts().markers;

    globe.toggle_polygons();
    globe.sync(&mut r);
    assert_eq!(
        globe.builder().recompute_counts().markers,
        markers_before + 1
    );
    assert_eq!(r.objects.last().map(Vec::len), Some(1));
}

#[test]
fn city_fetch_failure_leaves_labels_empty() {
    let mut globe = Globe::new(GlobeConfig::default());
    let mut r = RecordingRenderer::default();
    globe.on_cities_loaded(Err(GlobeError::HttpStatus {
        url: CITIES_PATH.to_string(),
        status: 404,
    }));
    globe.sync(&mut r);
    assert!(globe.cities().is_empty());
    assert_eq!(r.labels, vec![Vec::<CityLabel>::new()]);

    // Other layers still render.
    assert_eq!(r.points[0].len(), 2);
    assert_eq!(r.arcs[0].len(), 2);
}

#[test]
fn loaded_cities_are_pushed_once() {
    let mut globe = Globe::new(GlobeConfig::default());
    let mut r = RecordingRenderer::default();
    globe.sync(&mut r);
    globe.on_cities_loaded(Ok(vec![CityLabel {
        lat: 6.45,
        lng: 3.39,
        name: "Lagos".to_string(),
        population: 9_466_000.0,
    }]));
    globe.sync(&mut r);
    globe.sync(&mut r);
    assert_eq!(r.labels.len(), 2);
    assert_eq!(r.labels[1][0].name, "Lagos");
}

#[test]
fn model_failure_renders_no_marker() {
    let mut globe = Globe::new(GlobeConfig::default());
    let mut r = RecordingRenderer::default();
    globe.on_model_loaded(Err(GlobeError::EmptyModel));
    globe.sync(&mut r);
    assert_eq!(globe.model_state(), AssetState::Failed);
    assert!(r.objects.iter().all(Vec::is_empty));
}

#[test]
fn camera_follow_waits_for_attachment() {
    let mut globe = Globe::new(GlobeConfig::default());
    let mut r = RecordingRenderer {
        detached: true,
        ..Default::default()
    };
    globe.sync(&mut r);
    assert!(r.povs.is_empty());

    r.detached = false;
    globe.sync(&mut r);
    assert_eq!(r.povs.len(), 1);
    assert_eq!(r.povs[0].0.coordinate(), DEFAULT_CURRENT);
}

#[test]
fn absent_current_position_draws_actual_arc_to_origin() {
    let mut config = GlobeConfig::default();
    config.props.current = None;
    let mut globe = Globe::new(config);
    let mut r = RecordingRenderer::default();
    globe.on_model_loaded(Ok(plane()));
    globe.sync(&mut r);

    assert_eq!(r.arcs[0][1].end, GeoCoordinate::default());
    assert!(r.objects[0].is_empty());
    assert!(r.povs.is_empty());
}

#[test]
fn destination_change_turns_the_marker() {
    let mut globe = Globe::new(GlobeConfig::default());
    let mut r = RecordingRenderer::default();
    globe.on_model_loaded(Ok(plane()));
    globe.sync(&mut r);
    let before = r.objects.last().expect("marker")[0].object.transform.rotation;

    let mut props = *globe.props();
    props.destination = GeoCoordinate::new(-33.8688, 151.2093);
    globe.set_props(props);
    globe.sync(&mut r);
    let after = r.objects.last().expect("marker")[0].object.transform.rotation;

    assert_eq!(r.points.len(), 2);
    assert!(before.dot(after).abs() < 0.9999);
}

#[test]
fn countries_can_be_found_by_name() {
    let mut globe = Globe::new(GlobeConfig::default());
    globe.on_countries_loaded(Ok(vec![country("Nigeria"), country("Ghana")]));
    assert_eq!(globe.country("Ghana").map(|c| c.rings.len()), Some(1));
    assert!(globe.country("ghana").is_none());

    globe.on_countries_loaded(Err(GlobeError::Fetch {
        url: COUNTRIES_PATH.to_string(),
        message: "network down".to_string(),
    }));
    assert_eq!(globe.countries().len(), 2);
}
