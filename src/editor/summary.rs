//! Selected-route info projection.
//!
//! Pure derivation for the info panel: no mutation, no surface access.

use crate::routes::catalog::RouteCatalog;
use crate::routes::geometry::GeometryStore;

/// User-visible summary of the currently selected route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    /// Display name, `"None"` or `"Unknown"` when unavailable
    pub name: String,
    /// Number of waypoints
    pub point_count: usize,
    /// Total length formatted as `"12.34 km"`; `"0 km"` when no geometry
    pub total_distance: String,
}

/// Derive the summary for `selection` from the catalog and geometry store.
///
/// A selected route without geometry shows `"Unknown"` when its definition
/// exists (defined but never drawn) and `"None"` when it does not; a
/// geometry whose definition has vanished also shows `"Unknown"`.
pub fn summarize(
    selection: Option<&str>,
    catalog: &RouteCatalog,
    geometry: &GeometryStore,
) -> RouteSummary {
    let Some(id) = selection else {
        return RouteSummary {
            name: "None".to_string(),
            point_count: 0,
            total_distance: "0 km".to_string(),
        };
    };

    let definition = catalog.find(id);

    let Some(points) = geometry.points(id) else {
        return RouteSummary {
            name: if definition.is_some() { "Unknown" } else { "None" }.to_string(),
            point_count: 0,
            total_distance: "0 km".to_string(),
        };
    };

    RouteSummary {
        name: definition
            .map(|definition| definition.name.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        point_count: points.len(),
        total_distance: format!("{:.2} km", geometry.total_length(id) / 1000.0),
    }
}
