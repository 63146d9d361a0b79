use crate::error::{GlobeError, Result};
use crate::geo::GeoCoordinate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GeoJsonFeatureCollection {
    features: Vec<GeoJsonFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeature {
    #[serde(default)]
    properties: serde_json::Map<String, serde_json::Value>,
    geometry: Option<GeoJsonGeometry>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonGeometry {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

type Ring = Vec<Vec<f64>>;

/// Country outline as a set of closed rings (outer boundaries and holes alike).
#[derive(Clone, Debug, PartialEq)]
pub struct CountryPolygon {
    pub name: String,
    pub rings: Vec<Vec<GeoCoordinate>>,
}

fn ring(points: Ring) -> Vec<GeoCoordinate> {
    // GeoJSON positions are [longitude, latitude, (altitude)].
    points
        .into_iter()
        .filter_map(|p| match p.as_slice() {
            [lng, lat, ..] => Some(GeoCoordinate::new(*lat, *lng)),
            _ => None,
        })
        .collect()
}

fn feature_name(properties: &serde_json::Map<String, serde_json::Value>) -> String {
    ["NAME", "ADMIN", "name"]
        .iter()
        .find_map(|k| properties.get(*k).and_then(|v| v.as_str()))
        .unwrap_or_default()
        .to_string()
}

/// Decode a countries feature collection. Features without polygon geometry are skipped.
pub fn parse_countries(json: &str) -> Result<Vec<CountryPolygon>> {
    let fc: GeoJsonFeatureCollection =
        serde_json::from_str(json).map_err(|source| GlobeError::Json {
            resource: "countries",
            source,
        })?;
    let mut out = Vec::with_capacity(fc.features.len());
    for f in fc.features {
        let Some(geometry) = f.geometry else {
            continue;
        };
        let decoded = match geometry.ty.as_str() {
            "Polygon" => serde_json::from_value::<Vec<Ring>>(geometry.coordinates),
            "MultiPolygon" => serde_json::from_value::<Vec<Vec<Ring>>>(geometry.coordinates)
                .map(|polys| polys.into_iter().flatten().collect()),
            _ => continue,
        };
        let rings = decoded
            .map_err(|source| GlobeError::Json {
                resource: "countries",
                source,
            })?
            .into_iter()
            .map(ring)
            .collect();
        out.push(CountryPolygon {
            name: feature_name(&f.properties),
            rings,
        });
    }
    Ok(out)
}
