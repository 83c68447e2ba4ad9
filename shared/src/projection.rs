//! Spherical Web Mercator (EPSG:3857), the projection the map surface draws in.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::Coordinate;

pub const EARTH_RADIUS_M: f64 = 6_378_137.0;
const HALF_SIZE: f64 = PI * EARTH_RADIUS_M;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl ProjectedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub fn from_lon_lat(coord: Coordinate) -> ProjectedPoint {
    let x = EARTH_RADIUS_M * coord.lon.to_radians();
    let mut y = EARTH_RADIUS_M * (PI / 4.0 + coord.lat.to_radians() / 2.0).tan().ln();
    // Poles project to infinity; clamp to the square world extent.
    if y > HALF_SIZE {
        y = HALF_SIZE;
    } else if y < -HALF_SIZE {
        y = -HALF_SIZE;
    }
    ProjectedPoint { x, y }
}

pub fn to_lon_lat(point: ProjectedPoint) -> Coordinate {
    let lon = (point.x / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (point.y / EARTH_RADIUS_M).exp().atan() - PI / 2.0).to_degrees();
    Coordinate {
        lon: wrap_lon(lon),
        lat,
    }
}

pub fn project_path(path: &[Coordinate]) -> Vec<ProjectedPoint> {
    path.iter().copied().map(from_lon_lat).collect()
}

fn wrap_lon(lon: f64) -> f64 {
    // Tolerate rounding noise at the antimeridian instead of flipping sides.
    if lon.abs() <= 180.0 + 1e-9 {
        return lon.clamp(-180.0, 180.0);
    }
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Bounding box in projected metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    /// An empty input yields the inverted infinite extent, which is not finite.
    pub fn of(points: &[ProjectedPoint]) -> Self {
        points.iter().fold(
            Extent {
                min_x: f64::INFINITY,
                min_y: f64::INFINITY,
                max_x: f64::NEG_INFINITY,
                max_y: f64::NEG_INFINITY,
            },
            |acc, p| Extent {
                min_x: acc.min_x.min(p.x),
                min_y: acc.min_y.min(p.y),
                max_x: acc.max_x.max(p.x),
                max_y: acc.max_y.max(p.y),
            },
        )
    }

    pub fn is_finite(&self) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite())
    }
}
