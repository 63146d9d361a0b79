//! Derivation of the renderer's layer data from the flight props.
//!
//! Each output is memoized on exactly the inputs it reads, so unrelated prop
//! changes never rebuild it. That matters most for the moving marker, whose
//! object is a fresh clone of the model template.

use crate::asset::AssetCache;
use crate::constants::{
    ACTUAL_ARC_COLOR, DEPARTURE_COLOR, DESTINATION_COLOR, EXPECTED_ARC_COLOR, POINT_SIZE,
};
use crate::geo::GeoCoordinate;
use crate::model::SceneNode;
use crate::palette::Rgba;
use smallvec::SmallVec;

/// Inputs of the globe component.
///
/// `current` is optional; an absent position behaves like `{0, 0}` for the
/// actual-path arc but suppresses the moving marker and camera follow.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlightProps {
    pub departure: GeoCoordinate,
    pub destination: GeoCoordinate,
    pub current: Option<GeoCoordinate>,
}

impl FlightProps {
    pub fn new(departure: GeoCoordinate, destination: GeoCoordinate) -> Self {
        Self {
            departure,
            destination,
            current: None,
        }
    }

    pub fn with_current(mut self, current: GeoCoordinate) -> Self {
        self.current = Some(current);
        self
    }
}

/// Departure/destination pin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointMarker {
    pub lat: f64,
    pub lng: f64,
    pub color: Rgba,
    pub size: f32,
}

/// A rendered flight path between two coordinates with a start/end colour pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcDescriptor {
    pub start: GeoCoordinate,
    pub end: GeoCoordinate,
    pub color: [Rgba; 2],
}

/// The plane: a coordinate plus its own copy of the model node.
#[derive(Clone, Debug)]
pub struct MovingMarker {
    pub lat: f64,
    pub lng: f64,
    pub object: SceneNode,
}

impl MovingMarker {
    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.lat, self.lng)
    }
}

pub type MarkerList = SmallVec<[MovingMarker; 1]>;

/// Equality used to decide whether a memoized value is still current.
/// Coordinates compare by bit pattern so a NaN input is stable across syncs.
pub trait MemoKey {
    fn same_key(&self, other: &Self) -> bool;
}

macro_rules! eq_memo_key {
    ($($t:ty),*) => {
        $(impl MemoKey for $t {
            fn same_key(&self, other: &Self) -> bool {
                self == other
            }
        })*
    };
}

eq_memo_key!(bool, u32, u64);

impl MemoKey for GeoCoordinate {
    fn same_key(&self, other: &Self) -> bool {
        self.same_bits(*other)
    }
}

impl<T: MemoKey> MemoKey for Option<T> {
    fn same_key(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same_key(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<A: MemoKey, B: MemoKey> MemoKey for (A, B) {
    fn same_key(&self, other: &Self) -> bool {
        self.0.same_key(&other.0) && self.1.same_key(&other.1)
    }
}

impl<A: MemoKey, B: MemoKey, C: MemoKey> MemoKey for (A, B, C) {
    fn same_key(&self, other: &Self) -> bool {
        self.0.same_key(&other.0) && self.1.same_key(&other.1) && self.2.same_key(&other.2)
    }
}

/// Caches one derived value against the key it was computed from.
#[derive(Debug)]
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
    recomputes: u32,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            entry: None,
            recomputes: 0,
        }
    }
}

impl<K: MemoKey, V> Memo<K, V> {
    /// Return the cached value, recomputing only when `key` differs from the
    /// stored one. The flag reports whether a recomputation happened.
    pub fn get(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> (&mut V, bool) {
        let stale = !matches!(&self.entry, Some((k, _)) if k.same_key(&key));
        if stale {
            self.entry = None;
            self.recomputes += 1;
        }
        let (_, value) = self.entry.get_or_insert_with(|| {
            let value = compute(&key);
            (key, value)
        });
        (value, stale)
    }

    pub fn recomputes(&self) -> u32 {
        self.recomputes
    }
}

/// How many times each output has been rebuilt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecomputeCounts {
    pub points: u32,
    pub expected_path: u32,
    pub actual_path: u32,
    pub markers: u32,
}

type MarkerKey = (Option<GeoCoordinate>, u64, bool);

#[derive(Debug, Default)]
pub struct SceneDataBuilder {
    points: Memo<(GeoCoordinate, GeoCoordinate), [PointMarker; 2]>,
    expected: Memo<(GeoCoordinate, GeoCoordinate), ArcDescriptor>,
    actual: Memo<(GeoCoordinate, GeoCoordinate), ArcDescriptor>,
    markers: Memo<MarkerKey, MarkerList>,
}

impl SceneDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always two entries: departure (red) then destination (green).
    pub fn points(&mut self, props: &FlightProps) -> (&[PointMarker; 2], bool) {
        let (v, changed) = self
            .points
            .get((props.departure, props.destination), |(dep, dest)| {
                [
                    PointMarker {
                        lat: dep.lat,
                        lng: dep.lng,
                        color: DEPARTURE_COLOR,
                        size: POINT_SIZE,
                    },
                    PointMarker {
                        lat: dest.lat,
                        lng: dest.lng,
                        color: DESTINATION_COLOR,
                        size: POINT_SIZE,
                    },
                ]
            });
        (&*v, changed)
    }

    pub fn expected_path(&mut self, props: &FlightProps) -> (ArcDescriptor, bool) {
        let (v, changed) = self
            .expected
            .get((props.departure, props.destination), |(dep, dest)| {
                ArcDescriptor {
                    start: *dep,
                    end: *dest,
                    color: [EXPECTED_ARC_COLOR; 2],
                }
            });
        (*v, changed)
    }

    pub fn actual_path(&mut self, props: &FlightProps) -> (ArcDescriptor, bool) {
        let current = props.current.unwrap_or_default();
        let (v, changed) = self
            .actual
            .get((props.departure, current), |(dep, cur)| ArcDescriptor {
                start: *dep,
                end: *cur,
                color: [ACTUAL_ARC_COLOR; 2],
            });
        (*v, changed)
    }

    /// Zero or one moving marker. The overlay flag takes part in the key so
    /// that flipping it re-creates the marker.
    pub fn markers(
        &mut self,
        props: &FlightProps,
        model: &AssetCache<SceneNode>,
        show_polygons: bool,
    ) -> (&mut MarkerList, bool) {
        self.markers.get(
            (props.current, model.generation(), show_polygons),
            |(current, _, _)| {
                let mut list = MarkerList::new();
                if let (Some(c), Some(object)) = (current, model.instance()) {
                    list.push(MovingMarker {
                        lat: c.lat,
                        lng: c.lng,
                        object,
                    });
                }
                list
            },
        )
    }

    pub fn recompute_counts(&self) -> RecomputeCounts {
        RecomputeCounts {
            points: self.points.recomputes(),
            expected_path: self.expected.recomputes(),
            actual_path: self.actual.recomputes(),
            markers: self.markers.recomputes(),
        }
    }
}
