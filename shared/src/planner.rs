use crate::{
    Coordinate, LocationForm, MoveDirection, PlannerError, RouteEndpoints, Waypoint, WaypointId,
    WaypointStore,
    projection::{Extent, ProjectedPoint, from_lon_lat, project_path, to_lon_lat},
};

pub const DEFAULT_WAYPOINT_NAME: &str = "New Location";

/// Rendering side of the map: a marker layer, a route layer and a viewport.
///
/// Both layers are cleared and redrawn on every call; implementations do not
/// need to diff.
pub trait MapSurface {
    fn draw_points(&mut self, points: &[ProjectedPoint]);
    fn draw_route(&mut self, geometry: &[ProjectedPoint]);
    fn fit_extent(&mut self, extent: Extent);
}

/// Owns the waypoint store and the current route, and keeps a map surface in
/// sync with both.
pub struct Planner<M> {
    store: WaypointStore,
    route: Vec<ProjectedPoint>,
    surface: M,
}

impl<M: MapSurface> Planner<M> {
    pub fn new(surface: M) -> Self {
        Self {
            store: WaypointStore::new(),
            route: Vec::new(),
            surface,
        }
    }

    /// A click on the map at a projected coordinate is an implicit add.
    pub fn handle_map_click(&mut self, at: ProjectedPoint) -> WaypointId {
        let coord = to_lon_lat(at);
        tracing::debug!("map click lat={:.5} lon={:.5}", coord.lat, coord.lon);
        self.add(DEFAULT_WAYPOINT_NAME, coord)
    }

    pub fn submit_form(&mut self, form: &mut LocationForm) -> Result<WaypointId, PlannerError> {
        let location = form.submit()?;
        Ok(self.add(location.name, location.coord))
    }

    pub fn add(&mut self, name: impl Into<String>, coord: Coordinate) -> WaypointId {
        let id = self.store.add(name, coord.lon, coord.lat);
        self.redraw_points();
        id
    }

    pub fn delete(&mut self, id: WaypointId) {
        self.store.delete(id);
        self.redraw_points();
    }

    pub fn rename(&mut self, id: WaypointId, new_name: impl Into<String>) {
        self.store.rename(id, new_name);
        self.redraw_points();
    }

    pub fn move_waypoint(&mut self, id: WaypointId, direction: MoveDirection) {
        self.store.move_waypoint(id, direction);
        self.redraw_points();
    }

    pub fn toggle_selection(&mut self, id: WaypointId) {
        self.store.toggle_selection(id);
        self.redraw_points();
    }

    pub fn route_endpoints(&self) -> Result<RouteEndpoints, PlannerError> {
        self.store.compute_route_endpoints()
    }

    /// Installs the outcome of a route request. Failures and empty paths
    /// leave the current route untouched.
    pub fn apply_route(
        &mut self,
        result: Result<Vec<Coordinate>, String>,
    ) -> Result<(), PlannerError> {
        let path = match result {
            Ok(path) if !path.is_empty() => path,
            Ok(_) => {
                return Err(self.routing_failure("routing service returned an empty path".into()));
            }
            Err(err) => return Err(self.routing_failure(err)),
        };

        self.route = project_path(&path);
        self.surface.draw_route(&self.route);

        let extent = Extent::of(&self.route);
        if !extent.is_finite() {
            tracing::error!("invalid extent for route feature: {extent:?}");
            return Err(PlannerError::DegenerateGeometry(extent));
        }
        self.surface.fit_extent(extent);
        Ok(())
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        self.store.waypoints()
    }

    pub fn store(&self) -> &WaypointStore {
        &self.store
    }

    pub fn route_geometry(&self) -> &[ProjectedPoint] {
        &self.route
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }

    fn redraw_points(&mut self) {
        let points: Vec<ProjectedPoint> = self.store.coordinates().map(from_lon_lat).collect();
        self.surface.draw_points(&points);
    }

    fn routing_failure(&self, message: String) -> PlannerError {
        tracing::error!("routing API error: {message}");
        PlannerError::RoutingServiceFailure(message)
    }
}
