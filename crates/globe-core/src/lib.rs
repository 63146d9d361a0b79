//! Platform-independent logic for the flight globe.
//!
//! Nothing here touches the browser or the GPU: the web front-end feeds props
//! and loaded resources into [`Globe`] and implements [`SceneRenderer`].

pub mod asset;
pub mod camera;
pub mod cities;
pub mod config;
pub mod constants;
pub mod controls;
pub mod countries;
pub mod error;
pub mod geo;
pub mod geometry;
pub mod globe;
pub mod model;
pub mod palette;
pub mod renderer;
pub mod scene;

pub use asset::{AssetCache, AssetState};
pub use camera::{CameraFollower, CameraRig, PointOfView};
pub use cities::{parse_cities, CityLabel};
pub use config::GlobeConfig;
pub use countries::{parse_countries, CountryPolygon};
pub use error::{GlobeError, Result};
pub use geo::{bearing, to_cartesian, GeoCoordinate};
pub use globe::Globe;
pub use model::{Mesh, SceneNode, Transform};
pub use palette::Rgba;
pub use renderer::{PolygonStyle, SceneRenderer};
pub use scene::{ArcDescriptor, FlightProps, MovingMarker, PointMarker, SceneDataBuilder};
