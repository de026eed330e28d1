//! Route geometry store: ordered waypoint sequences and their overlay state.
//!
//! T002: Implement geometry store with index-addressed waypoints

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::editor::EditorError;
use crate::map::surface::OverlayId;
use crate::routes::distance;

/// One geographic point in a route's sequence.
///
/// Position within the sequence is the array index at the time of access,
/// never a stored identity: deleting or inserting shifts every later index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// GPS latitude in degrees
    pub lat: f64,
    /// GPS longitude in degrees
    pub lng: f64,
}

impl Waypoint {
    /// Create a waypoint from latitude/longitude degrees.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Geometry and rendering state for one route.
#[derive(Debug, Default)]
pub struct RouteGeometry {
    pub(crate) points: Vec<Waypoint>,
    /// Handle to the route's rendered overlay, exclusively owned here.
    /// Only the render synchronizer creates or destroys it.
    pub(crate) overlay: Option<OverlayId>,
    /// Rebuild counter stamped into marker bindings; events carrying an
    /// older generation come from a superseded overlay and are dropped.
    pub(crate) generation: u64,
}

/// Outcome of deleting a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Points remain; the overlay must be rebuilt.
    PointsRemain,
    /// The last point went away; the caller must tear down the overlay,
    /// drop the catalog definition, and clear a matching selection.
    RouteEmptied,
}

/// Maps route id to its ordered waypoint sequence and overlay handle.
#[derive(Debug, Default)]
pub struct GeometryStore {
    routes: BTreeMap<String, RouteGeometry>,
    next_generation: u64,
}

impl GeometryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `point` to the route's sequence, creating the entry if absent.
    pub fn add_point(&mut self, id: &str, point: Waypoint) {
        self.routes.entry(id.to_string()).or_default().points.push(point);
    }

    /// Replace the waypoint at `index` with `point`.
    pub fn move_point(&mut self, id: &str, index: usize, point: Waypoint) -> Result<(), EditorError> {
        let geometry = self.routes.get_mut(id).ok_or_else(|| out_of_range(id, index, 0))?;
        let len = geometry.points.len();
        let slot = geometry
            .points
            .get_mut(index)
            .ok_or_else(|| out_of_range(id, index, len))?;
        *slot = point;
        Ok(())
    }

    /// Remove the waypoint at `index`, shifting later indices down by one.
    ///
    /// The entry itself survives even when emptied; the caller reacts to
    /// [`DeleteOutcome::RouteEmptied`] by tearing it down, so the cascade
    /// stays a single observable step.
    pub fn delete_point(&mut self, id: &str, index: usize) -> Result<DeleteOutcome, EditorError> {
        let geometry = self.routes.get_mut(id).ok_or_else(|| out_of_range(id, index, 0))?;
        if index >= geometry.points.len() {
            return Err(out_of_range(id, index, geometry.points.len()));
        }
        geometry.points.remove(index);
        if geometry.points.is_empty() {
            Ok(DeleteOutcome::RouteEmptied)
        } else {
            Ok(DeleteOutcome::PointsRemain)
        }
    }

    /// Remove and return the whole entry for `id`.
    pub(crate) fn remove_route(&mut self, id: &str) -> Option<RouteGeometry> {
        self.routes.remove(id)
    }

    /// Drop every entry. Overlay handles must already be destroyed.
    pub(crate) fn clear(&mut self) {
        self.routes.clear();
    }

    /// The route's waypoint sequence, if it has one.
    pub fn points(&self, id: &str) -> Option<&[Waypoint]> {
        self.routes.get(id).map(|geometry| geometry.points.as_slice())
    }

    /// Whether a geometry entry exists for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.routes.contains_key(id)
    }

    /// Total route length in meters; `0.0` for absent ids or fewer than
    /// two points.
    pub fn total_length(&self, id: &str) -> f64 {
        self.points(id).map(distance::path_length).unwrap_or(0.0)
    }

    /// Ids of every route with geometry, in stable order.
    pub fn route_ids(&self) -> Vec<String> {
        self.routes.keys().cloned().collect()
    }

    /// Current overlay handle for `id`.
    pub fn overlay(&self, id: &str) -> Option<OverlayId> {
        self.routes.get(id).and_then(|geometry| geometry.overlay)
    }

    /// Current overlay generation for `id`.
    pub fn generation(&self, id: &str) -> Option<u64> {
        self.routes.get(id).map(|geometry| geometry.generation)
    }

    /// Number of routes with geometry.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no route has geometry.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub(crate) fn entry_mut(&mut self, id: &str) -> Option<&mut RouteGeometry> {
        self.routes.get_mut(id)
    }

    pub(crate) fn bump_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Snapshot of every non-empty waypoint sequence, keyed by route id.
    ///
    /// This is the persisted shape: zero-point routes are omitted.
    pub fn to_point_map(&self) -> BTreeMap<String, Vec<Waypoint>> {
        self.routes
            .iter()
            .filter(|(_, geometry)| !geometry.points.is_empty())
            .map(|(id, geometry)| (id.clone(), geometry.points.clone()))
            .collect()
    }
}

fn out_of_range(id: &str, index: usize, len: usize) -> EditorError {
    EditorError::IndexOutOfRange { route: id.to_string(), index, len }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_point_creates_entry() {
        let mut store = GeometryStore::new();
        assert!(!store.contains("coastal"));
        store.add_point("coastal", Waypoint::new(39.0, 35.0));
        assert_eq!(store.points("coastal").unwrap().len(), 1);
    }

    #[test]
    fn test_move_point_replaces_in_place() {
        let mut store = GeometryStore::new();
        store.add_point("coastal", Waypoint::new(39.0, 35.0));
        store.add_point("coastal", Waypoint::new(39.5, 35.5));
        store.move_point("coastal", 0, Waypoint::new(38.0, 34.0)).unwrap();
        let points = store.points("coastal").unwrap();
        assert_eq!(points[0], Waypoint::new(38.0, 34.0));
        assert_eq!(points[1], Waypoint::new(39.5, 35.5));
    }

    #[test]
    fn test_move_point_out_of_range() {
        let mut store = GeometryStore::new();
        store.add_point("coastal", Waypoint::new(39.0, 35.0));
        let err = store.move_point("coastal", 1, Waypoint::new(0.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            EditorError::IndexOutOfRange { index: 1, len: 1, .. }
        ));
        // Unchanged on failure.
        assert_eq!(store.points("coastal").unwrap()[0], Waypoint::new(39.0, 35.0));
    }

    #[test]
    fn test_move_point_absent_route() {
        let mut store = GeometryStore::new();
        let err = store.move_point("ghost", 0, Waypoint::new(0.0, 0.0)).unwrap_err();
        assert!(matches!(err, EditorError::IndexOutOfRange { len: 0, .. }));
    }

    #[test]
    fn test_delete_point_shifts_indices() {
        let mut store = GeometryStore::new();
        store.add_point("coastal", Waypoint::new(39.0, 35.0));
        store.add_point("coastal", Waypoint::new(39.5, 35.5));
        let outcome = store.delete_point("coastal", 0).unwrap();
        assert_eq!(outcome, DeleteOutcome::PointsRemain);
        let points = store.points("coastal").unwrap();
        assert_eq!(points, &[Waypoint::new(39.5, 35.5)]);
    }

    #[test]
    fn test_delete_last_point_reports_emptied() {
        let mut store = GeometryStore::new();
        store.add_point("coastal", Waypoint::new(39.0, 35.0));
        let outcome = store.delete_point("coastal", 0).unwrap();
        assert_eq!(outcome, DeleteOutcome::RouteEmptied);
    }

    #[test]
    fn test_delete_point_out_of_range_leaves_points() {
        let mut store = GeometryStore::new();
        store.add_point("coastal", Waypoint::new(39.0, 35.0));
        assert!(store.delete_point("coastal", 5).is_err());
        assert_eq!(store.points("coastal").unwrap().len(), 1);
    }

    #[test]
    fn test_point_count_matches_adds_minus_deletes() {
        let mut store = GeometryStore::new();
        let mut expected = 0usize;
        for i in 0..10 {
            store.add_point("x", Waypoint::new(i as f64, i as f64));
            expected += 1;
        }
        for _ in 0..4 {
            store.delete_point("x", 0).unwrap();
            expected -= 1;
        }
        assert_eq!(store.points("x").unwrap().len(), expected);
        assert!(store.delete_point("x", 99).is_err());
        assert_eq!(store.points("x").unwrap().len(), expected);
    }

    #[test]
    fn test_total_length_zero_for_short_or_absent() {
        let mut store = GeometryStore::new();
        assert_eq!(store.total_length("ghost"), 0.0);
        store.add_point("x", Waypoint::new(39.0, 35.0));
        assert_eq!(store.total_length("x"), 0.0);
    }

    #[test]
    fn test_total_length_sums_consecutive_legs() {
        use crate::routes::distance::haversine_distance;

        let mut store = GeometryStore::new();
        store.add_point("x", Waypoint::new(39.0, 35.0));
        store.add_point("x", Waypoint::new(39.5, 35.5));
        store.add_point("x", Waypoint::new(40.0, 36.0));
        let expected = haversine_distance(39.0, 35.0, 39.5, 35.5)
            + haversine_distance(39.5, 35.5, 40.0, 36.0);
        assert!((store.total_length("x") - expected).abs() < 1e-9);
    }

    #[test]
    fn test_to_point_map_omits_empty_sequences() {
        let mut store = GeometryStore::new();
        store.add_point("drawn", Waypoint::new(39.0, 35.0));
        // Force an empty entry the way a mid-cascade store would look.
        store.routes.insert("emptied".to_string(), RouteGeometry::default());
        let map = store.to_point_map();
        assert!(map.contains_key("drawn"));
        assert!(!map.contains_key("emptied"));
    }
}
