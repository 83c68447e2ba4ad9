use std::collections::HashSet;

use crate::{Coordinate, MoveDirection, PlannerError, RouteEndpoints, Waypoint, WaypointId};

/// Ordered list of waypoints plus the subset selected for routing.
///
/// The selection is a view over the list: ids that are not (or no longer)
/// in the list are ignored by every reader, and `delete` drops the id from
/// the selection so that it stays a subset of the list.
#[derive(Debug, Default, Clone)]
pub struct WaypointStore {
    waypoints: Vec<Waypoint>,
    selected: HashSet<WaypointId>,
    revision: u64,
}

impl WaypointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a waypoint. Range checks belong to the caller.
    pub fn add(&mut self, name: impl Into<String>, lon: f64, lat: f64) -> WaypointId {
        let mut id = WaypointId::new();
        while self.position(id).is_some() {
            id = WaypointId::new();
        }
        let name = name.into();
        tracing::debug!("adding waypoint {id} {name:?} at ({lon:.5}, {lat:.5})");
        self.waypoints.push(Waypoint { id, name, lon, lat });
        self.bump();
        id
    }

    pub fn delete(&mut self, id: WaypointId) {
        let Some(index) = self.position(id) else {
            return;
        };
        self.waypoints.remove(index);
        self.selected.remove(&id);
        self.bump();
    }

    pub fn rename(&mut self, id: WaypointId, new_name: impl Into<String>) {
        if let Some(waypoint) = self.waypoints.iter_mut().find(|w| w.id == id) {
            waypoint.name = new_name.into();
            self.bump();
        }
    }

    /// Swaps the waypoint with its neighbour. Moving the first item up or
    /// the last item down leaves the list untouched.
    pub fn move_waypoint(&mut self, id: WaypointId, direction: MoveDirection) {
        let Some(index) = self.position(id) else {
            return;
        };
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|&i| i < self.waypoints.len()),
        };
        if let Some(target) = target {
            self.waypoints.swap(index, target);
            self.bump();
        }
    }

    /// Unknown ids are accepted; readers never see them.
    pub fn toggle_selection(&mut self, id: WaypointId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        self.bump();
    }

    /// First and last selected waypoint in list order. Selected waypoints in
    /// between are not part of the route.
    pub fn compute_route_endpoints(&self) -> Result<RouteEndpoints, PlannerError> {
        let mut selected = self.selected_waypoints();
        let first = selected.next();
        let last = selected.last();
        match (first, last) {
            (Some(start), Some(end)) => Ok(RouteEndpoints {
                start: start.coordinate(),
                end: end.coordinate(),
            }),
            (first, _) => Err(PlannerError::InsufficientSelection {
                selected: usize::from(first.is_some()),
            }),
        }
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn get(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| w.id == id)
    }

    pub fn is_selected(&self, id: WaypointId) -> bool {
        self.selected.contains(&id) && self.position(id).is_some()
    }

    /// Selected ids in list order.
    pub fn selected_ids(&self) -> Vec<WaypointId> {
        self.selected_waypoints().map(|w| w.id).collect()
    }

    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.waypoints.iter().map(Waypoint::coordinate)
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Incremented on every mutation of the list or the selection.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn selected_waypoints(&self) -> impl Iterator<Item = &Waypoint> + '_ {
        self.waypoints
            .iter()
            .filter(|w| self.selected.contains(&w.id))
    }

    fn position(&self, id: WaypointId) -> Option<usize> {
        self.waypoints.iter().position(|w| w.id == id)
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
