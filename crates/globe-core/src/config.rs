use crate::constants::{COUNTRY_PALETTE_SIZE, FOLLOW_ALTITUDE, FOLLOW_DURATION_MS};
use crate::error::{GlobeError, Result};
use crate::geo::GeoCoordinate;
use crate::palette::country_palette;
use crate::renderer::PolygonStyle;
use crate::scene::FlightProps;

pub const NEW_YORK: GeoCoordinate = GeoCoordinate::new(40.7128, -74.0060);
pub const LONDON: GeoCoordinate = GeoCoordinate::new(51.5074, -0.1278);
pub const DEFAULT_CURRENT: GeoCoordinate = GeoCoordinate::new(6.6085, 3.2281);

/// Start-up configuration of the globe component.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobeConfig {
    pub props: FlightProps,
    pub show_polygons: bool,
    pub polygon_style: PolygonStyle,
    pub follow_altitude: f64,
    pub follow_duration_ms: u32,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            props: FlightProps::new(NEW_YORK, LONDON).with_current(DEFAULT_CURRENT),
            show_polygons: true,
            polygon_style: PolygonStyle::default(),
            follow_altitude: FOLLOW_ALTITUDE,
            follow_duration_ms: FOLLOW_DURATION_MS,
        }
    }
}

impl GlobeConfig {
    /// Apply overrides from a URL query string such as
    /// `?from=40.7,-74&to=51.5,-0.12&at=6.6,3.2&palette=42&polygons=0`.
    ///
    /// `from`/`to` replace the route. When either is given without `at`, the
    /// current position falls back to `{0, 0}`. Unknown keys are ignored.
    pub fn from_query(query: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut route_overridden = false;
        let mut current = None;
        for (key, value) in query_pairs(query) {
            match key {
                "from" => {
                    config.props.departure = parse_coordinate(key, value)?;
                    route_overridden = true;
                }
                "to" => {
                    config.props.destination = parse_coordinate(key, value)?;
                    route_overridden = true;
                }
                "at" => current = Some(parse_coordinate(key, value)?),
                "polygons" => config.show_polygons = !matches!(value, "0" | "false" | "off"),
                "palette" => {
                    let seed = value.parse::<u64>().unwrap_or(0);
                    config.polygon_style.palette =
                        Some(country_palette(COUNTRY_PALETTE_SIZE, seed));
                }
                _ => {}
            }
        }
        match (current, route_overridden) {
            (Some(c), _) => config.props.current = Some(c),
            (None, true) => config.props.current = Some(GeoCoordinate::default()),
            (None, false) => {}
        }
        Ok(config)
    }
}

fn query_pairs(query: &str) -> impl Iterator<Item = (&str, &str)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|p| !p.is_empty())
        .map(|p| p.split_once('=').unwrap_or((p, "")))
}

/// Parse `lat,lng` (a URL-encoded comma is accepted too).
pub fn parse_coordinate(key: &str, value: &str) -> Result<GeoCoordinate> {
    let invalid = || GlobeError::InvalidCoordinate {
        key: key.to_string(),
        value: value.to_string(),
    };
    let normalized = value.replace("%2C", ",").replace("%2c", ",");
    let (lat, lng) = normalized.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;
    if !lat.is_finite() || !lng.is_finite() {
        return Err(invalid());
    }
    Ok(GeoCoordinate::new(lat, lng))
}
