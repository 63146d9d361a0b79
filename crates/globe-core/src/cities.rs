use crate::constants::LABEL_SCALE;
use crate::error::{GlobeError, Result};
use crate::geo::GeoCoordinate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CityFeatureCollection {
    features: Vec<CityFeature>,
}

#[derive(Debug, Deserialize)]
struct CityFeature {
    properties: CityProperties,
}

#[derive(Debug, Deserialize)]
struct CityProperties {
    latitude: f64,
    longitude: f64,
    name: String,
    pop_max: f64,
}

/// A populated place rendered as a text label with a dot.
#[derive(Clone, Debug, PartialEq)]
pub struct CityLabel {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    pub population: f64,
}

impl CityLabel {
    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.lat, self.lng)
    }

    /// Text height in globe-relative units; grows with the square root of population.
    pub fn size(&self) -> f64 {
        label_size(self.population)
    }

    /// Same scale as [`CityLabel::size`].
    pub fn dot_radius(&self) -> f64 {
        label_size(self.population)
    }
}

#[inline]
pub fn label_size(population: f64) -> f64 {
    population.max(0.0).sqrt() * LABEL_SCALE
}

/// Decode the `cities.json` feature collection.
pub fn parse_cities(json: &str) -> Result<Vec<CityLabel>> {
    let fc: CityFeatureCollection =
        serde_json::from_str(json).map_err(|source| GlobeError::Json {
            resource: "cities",
            source,
        })?;
    Ok(fc
        .features
        .into_iter()
        .map(|f| CityLabel {
            lat: f.properties.latitude,
            lng: f.properties.longitude,
            name: f.properties.name,
            population: f.properties.pop_max,
        })
        .collect())
}
