pub mod error;
pub mod form;
pub mod planner;
pub mod projection;
pub mod store;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use error::PlannerError;
pub use form::{FormError, LocationForm, NewLocation};
pub use planner::{DEFAULT_WAYPOINT_NAME, MapSurface, Planner};
pub use projection::{Extent, ProjectedPoint, from_lon_lat, project_path, to_lon_lat};
pub use store::WaypointStore;

/// Geographic WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn is_valid(&self) -> bool {
        (-180.0..=180.0).contains(&self.lon) && (-90.0..=90.0).contains(&self.lat)
    }

    /// `"<lon>,<lat>"`, the form OpenRouteService expects for `start`/`end`.
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.lon, self.lat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaypointId(Uuid);

impl WaypointId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WaypointId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

impl Waypoint {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lon, self.lat)
    }

    pub fn display_lon(&self) -> String {
        format_coord(self.lon)
    }

    pub fn display_lat(&self) -> String {
        format_coord(self.lat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// First and last selected waypoints, in list order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteEndpoints {
    pub start: Coordinate,
    pub end: Coordinate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl From<RouteEndpoints> for RouteRequest {
    fn from(endpoints: RouteEndpoints) -> Self {
        Self {
            start: endpoints.start,
            end: endpoints.end,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    /// Geographic path as returned by the routing service.
    pub path: Vec<Coordinate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

pub fn format_coord(value: f64) -> String {
    format!("{value:.5}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_query_value_is_lon_first() {
        let coord = Coordinate::new(8.681495, 49.41461);
        assert_eq!(coord.to_query_value(), "8.681495,49.41461");
    }

    #[test]
    fn test_coordinate_validity_bounds() {
        assert!(Coordinate::new(180.0, -90.0).is_valid());
        assert!(!Coordinate::new(180.1, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 90.5).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_waypoint_display_rounds_to_five_decimals() {
        let waypoint = Waypoint {
            id: WaypointId::new(),
            name: "A".into(),
            lon: 10.12345,
            lat: 20.54321,
        };
        assert_eq!(waypoint.display_lon(), "10.12345");
        assert_eq!(waypoint.display_lat(), "20.54321");
    }

    #[test]
    fn test_waypoint_id_serializes_as_plain_string() {
        let id = WaypointId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }

    #[test]
    fn test_move_direction_wire_format() {
        let json = serde_json::to_string(&MoveDirection::Up).unwrap();
        assert_eq!(json, "\"up\"");
    }
}
