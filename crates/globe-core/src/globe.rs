//! The flight globe component: owns the props and loaded resources, and
//! pushes whatever changed to a [`SceneRenderer`] on each sync.

use crate::asset::{AssetCache, AssetState};
use crate::camera::CameraFollower;
use crate::cities::CityLabel;
use crate::config::GlobeConfig;
use crate::constants::{MARKER_ALTITUDE, MODEL_SCALE};
use crate::countries::CountryPolygon;
use crate::error::Result;
use crate::geo::{bearing, marker_orientation, GeoCoordinate};
use crate::model::SceneNode;
use crate::renderer::{PolygonStyle, SceneRenderer};
use crate::scene::{FlightProps, MovingMarker, SceneDataBuilder};
use fnv::FnvHashMap;

pub struct Globe {
    props: FlightProps,
    show_polygons: bool,
    polygon_style: PolygonStyle,
    builder: SceneDataBuilder,
    follower: CameraFollower,
    model: AssetCache<SceneNode>,
    cities: Vec<CityLabel>,
    countries: Vec<CountryPolygon>,
    country_index: FnvHashMap<String, usize>,
    polygons_dirty: bool,
    labels_dirty: bool,
    synced: bool,
}

impl Globe {
    pub fn new(config: GlobeConfig) -> Self {
        Self {
            props: config.props,
            show_polygons: config.show_polygons,
            polygon_style: config.polygon_style,
            builder: SceneDataBuilder::new(),
            follower: CameraFollower::new(config.follow_altitude, config.follow_duration_ms),
            model: AssetCache::new(),
            cities: Vec::new(),
            countries: Vec::new(),
            country_index: FnvHashMap::default(),
            polygons_dirty: true,
            labels_dirty: true,
            synced: false,
        }
    }

    pub fn props(&self) -> &FlightProps {
        &self.props
    }

    pub fn set_props(&mut self, props: FlightProps) {
        self.props = props;
    }

    pub fn set_current_position(&mut self, current: GeoCoordinate) {
        self.props.current = Some(current);
    }

    pub fn show_polygons(&self) -> bool {
        self.show_polygons
    }

    /// Flip the country overlay; returns the new state.
    pub fn toggle_polygons(&mut self) -> bool {
        self.show_polygons = !self.show_polygons;
        self.polygons_dirty = true;
        log::info!("[overlay] polygons {}", if self.show_polygons { "shown" } else { "hidden" });
        self.show_polygons
    }

    pub fn model_state(&self) -> AssetState {
        self.model.state()
    }

    pub fn cities(&self) -> &[CityLabel] {
        &self.cities
    }

    pub fn countries(&self) -> &[CountryPolygon] {
        &self.countries
    }

    /// Look a country up by its feature name (case-sensitive).
    pub fn country(&self, name: &str) -> Option<&CountryPolygon> {
        self.country_index.get(name).and_then(|&i| self.countries.get(i))
    }

    pub fn builder(&self) -> &SceneDataBuilder {
        &self.builder
    }

    /// Completion of the model load. The template is scaled once here and
    /// then cloned for every marker rebuild.
    pub fn on_model_loaded(&mut self, result: Result<SceneNode>) {
        match result {
            Ok(mut node) => {
                node.set_scale(MODEL_SCALE);
                self.model.store(node);
                log::info!("[assets] model ready (generation {})", self.model.generation());
            }
            Err(e) => {
                self.model.fail();
                log::error!("[assets] model load failed: {}", e);
            }
        }
    }

    /// Completion of the city fetch. On failure the label list stays as it was.
    pub fn on_cities_loaded(&mut self, result: Result<Vec<CityLabel>>) {
        match result {
            Ok(cities) => {
                log::info!("[cities] loaded {} labels", cities.len());
                self.cities = cities;
                self.labels_dirty = true;
            }
            Err(e) => log::error!("[cities] error fetching cities: {}", e),
        }
    }

    pub fn on_countries_loaded(&mut self, result: Result<Vec<CountryPolygon>>) {
        match result {
            Ok(countries) => {
                log::info!("[countries] loaded {} polygons", countries.len());
                self.country_index = countries
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (c.name.clone(), i))
                    .collect();
                self.countries = countries;
                self.polygons_dirty = true;
            }
            Err(e) => log::error!("[countries] error fetching countries: {}", e),
        }
    }

    /// Push every layer whose inputs changed since the last sync (everything
    /// on the first one), then let the camera follow the current position.
    pub fn sync<R: SceneRenderer + ?Sized>(&mut self, renderer: &mut R) {
        let first = !self.synced;

        let (points, points_changed) = self.builder.points(&self.props);
        if first || points_changed {
            renderer.set_points(points);
        }

        let (expected, expected_changed) = self.builder.expected_path(&self.props);
        let (actual, actual_changed) = self.builder.actual_path(&self.props);
        if first || expected_changed || actual_changed {
            renderer.set_arcs(&[expected, actual]);
        }

        if first || self.polygons_dirty {
            let polygons = self.show_polygons.then_some(self.countries.as_slice());
            renderer.set_polygons(polygons, &self.polygon_style);
            self.polygons_dirty = false;
        }

        if first || self.labels_dirty {
            renderer.set_labels(&self.cities);
            self.labels_dirty = false;
        }

        let destination = self.props.destination;
        let (markers, markers_changed) =
            self.builder
                .markers(&self.props, &self.model, self.show_polygons);
        if first || markers_changed || points_changed {
            for marker in markers.iter_mut() {
                place_marker(marker, destination, renderer);
            }
            renderer.set_custom_objects(markers.as_slice());
        }

        if let Some(current) = self.props.current {
            self.follower.on_position(current, renderer);
        }
        self.synced = true;
    }
}

/// Sit the marker just above the surface, nose towards the destination.
fn place_marker<R: SceneRenderer + ?Sized>(
    marker: &mut MovingMarker,
    destination: GeoCoordinate,
    renderer: &R,
) {
    let at = marker.coordinate();
    let heading = bearing(at, destination);
    marker.object.transform.translation = renderer.get_coords(at, MARKER_ALTITUDE);
    marker.object.transform.rotation = marker_orientation(at, heading);
}
