//! OpenRouteService directions response, GeoJSON flavour. Only the fields we
//! read are modelled; everything else is ignored.

use serde::Deserialize;

pub use shared::{ApiError, Coordinate, RouteRequest, RouteResponse};

#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// `[lon, lat]` or `[lon, lat, elevation]` positions.
    pub coordinates: Vec<Vec<f64>>,
}
