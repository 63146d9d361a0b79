use globe_core::asset::AssetCache;
use globe_core::constants::{DEPARTURE_COLOR, DESTINATION_COLOR, POINT_SIZE};
use globe_core::scene::{FlightProps, Memo, SceneDataBuilder};
use globe_core::{GeoCoordinate, Mesh, SceneNode};
use glam::Vec3;

fn props() -> FlightProps {
    FlightProps::new(
        GeoCoordinate::new(40.7128, -74.0060),
        GeoCoordinate::new(51.5074, -0.1278),
    )
    .with_current(GeoCoordinate::new(6.6085, 3.2281))
}

fn loaded_cache() -> AssetCache<SceneNode> {
    let mut cache = AssetCache::new();
    cache.store(SceneNode::new(Mesh {
        positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        indices: vec![0, 1, 2],
        ..Default::default()
    }));
    cache
}

#[test]
fn memo_recomputes_only_on_key_change() {
    let mut memo: Memo<u32, String> = Memo::default();
    let (v, changed) = memo.get(1, |k| format!("v{k}"));
    assert_eq!((v.as_str(), changed), ("v1", true));
    let (_, changed) = memo.get(1, |_| unreachable!("cached"));
    assert!(!changed);
    let (v, changed) = memo.get(2, |k| format!("v{k}"));
    assert_eq!((v.as_str(), changed), ("v2", true));
    assert_eq!(memo.recomputes(), 2);
}

#[test]
fn points_are_always_departure_then_destination() {
    let mut b = SceneDataBuilder::new();
    let p = props();
    let (points, changed) = b.points(&p);
    assert!(changed);
    assert_eq!(points.len(), 2);
    assert_eq!((points[0].lat, points[0].lng), (p.departure.lat, p.departure.lng));
    assert_eq!(points[0].color, DEPARTURE_COLOR);
    assert_eq!((points[1].lat, points[1].lng), (p.destination.lat, p.destination.lng));
    assert_eq!(points[1].color, DESTINATION_COLOR);
    assert!(points.iter().all(|pt| pt.size == POINT_SIZE));

    // Degenerate route still yields two points.
    let same = FlightProps::new(p.departure, p.departure);
    assert_eq!(b.points(&same).0.len(), 2);
}

#[test]
fn each_output_tracks_only_its_own_inputs() {
    let mut b = SceneDataBuilder::new();
    let cache = loaded_cache();
    let mut p = props();
    b.points(&p);
    b.expected_path(&p);
    b.actual_path(&p);
    b.markers(&p, &cache, true);

    p.current = Some(GeoCoordinate::new(20.0, -20.0));
    assert!(!b.points(&p).1);
    assert!(!b.expected_path(&p).1);
    assert!(b.actual_path(&p).1);
    assert!(b.markers(&p, &cache, true).1);

    p.destination = GeoCoordinate::new(35.6762, 139.6503);
    assert!(b.points(&p).1);
    assert!(b.expected_path(&p).1);
    assert!(!b.actual_path(&p).1);
    assert!(!b.markers(&p, &cache, true).1);

    let counts = b.recompute_counts();
    assert_eq!(counts.points, 2);
    assert_eq!(counts.expected_path, 2);
    assert_eq!(counts.actual_path, 2);
    assert_eq!(counts.markers, 2);
}

#[test]
fn markers_appear_once_the_template_loads() {
    let mut b = SceneDataBuilder::new();
    let mut cache = AssetCache::new();
    let p = props();

    let (list, _) = b.markers(&p, &cache, true);
    assert!(list.is_empty());

    cache.store(SceneNode::new(Mesh::default()));
    let (list, changed) = b.markers(&p, &cache, true);
    assert!(changed);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].coordinate(), GeoCoordinate::new(6.6085, 3.2281));
}

#[test]
fn no_current_position_means_no_marker() {
    let mut b = SceneDataBuilder::new();
    let cache = loaded_cache();
    let mut p = props();
    p.current = None;
    assert!(b.markers(&p, &cache, true).0.is_empty());
    let (arc, _) = b.actual_path(&p);
    assert_eq!(arc.end, GeoCoordinate::default());
}

#[test]
fn marker_object_is_an_independent_copy() {
    let mut b = SceneDataBuilder::new();
    let cache = loaded_cache();
    let p = props();

    let (list, _) = b.markers(&p, &cache, true);
    list[0].object.transform.translation = Vec3::new(9.0, 9.0, 9.0);
    list[0].object.set_scale(3.0);

    let template = cache.template().expect("stored");
    assert_eq!(template.transform.translation, Vec3::ZERO);
    assert_eq!(template.transform.scale, Vec3::ONE);
    assert!(list[0].object.shares_mesh_with(template));
}

#[test]
fn overlay_flag_is_part_of_the_marker_key() {
    let mut b = SceneDataBuilder::new();
    let cache = loaded_cache();
    let p = props();
    b.markers(&p, &cache, true);
    assert!(!b.markers(&p, &cache, true).1);
    assert!(b.markers(&p, &cache, false).1);
    assert_eq!(b.recompute_counts().markers, 2);
}

#[test]
fn nan_position_is_cached_like_any_other() {
    let mut b = SceneDataBuilder::new();
    let cache = loaded_cache();
    let mut p = props();
    p.current = Some(GeoCoordinate::new(f64::NAN, 3.2281));
    assert!(b.markers(&p, &cache, true).1);
    assert!(b.actual_path(&p).1);
    assert!(!b.markers(&p, &cache, true).1);
    assert!(!b.actual_path(&p).1);
    let counts = b.recompute_counts();
    assert_eq!((counts.markers, counts.actual_path), (1, 1));
}
