//! Map surface boundary: overlay requests and gesture events.
//!
//! The surface renders overlays and emits gestures; path computation between
//! waypoints is delegated to the surface's routing service (OSRM by default,
//! see [`crate::storage::config::MapSettings`]). The editor never sees the
//! computed path, it only requests full rebuilds.

use std::collections::BTreeMap;

use crate::routes::geometry::Waypoint;

/// Handle to a rendered overlay, issued by the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u64);

/// Visual style for a route's path line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    /// Line color (CSS color name or hex)
    pub color: String,
    /// Line weight in pixels
    pub weight: u32,
}

/// Immutable snapshot tying a rendered marker back to the model.
///
/// Captured at overlay construction time. An event carrying a binding whose
/// generation no longer matches the route's current overlay is stale (the
/// overlay was rebuilt or destroyed underneath it) and must be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerBinding {
    /// Owning route id
    pub route_id: String,
    /// Waypoint index at construction time
    pub index: usize,
    /// Overlay generation at construction time
    pub generation: u64,
}

/// Request to build one route overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayRequest {
    /// Owning route id
    pub route_id: String,
    /// Ordered waypoint sequence to render and route between
    pub waypoints: Vec<Waypoint>,
    /// Path line style
    pub style: LineStyle,
    /// One binding per waypoint, in sequence order
    pub markers: Vec<MarkerBinding>,
}

/// Rendering surface for route overlays.
pub trait MapSurface {
    /// Build and display an overlay. The returned handle is owned by the
    /// route's geometry entry until the synchronizer destroys it.
    fn create_overlay(&mut self, request: OverlayRequest) -> OverlayId;

    /// Tear down a previously created overlay. Unknown handles are ignored.
    fn remove_overlay(&mut self, overlay: OverlayId);
}

/// Gesture events emitted by the map surface.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Background map click; adds a waypoint to the selected route.
    Click {
        /// Clicked coordinate
        position: Waypoint,
    },
    /// A marker drag finished at a new position.
    DragEnd {
        /// Binding captured when the marker was built
        binding: MarkerBinding,
        /// Final coordinate
        position: Waypoint,
    },
    /// Right-click on a marker (desktop delete request).
    ContextMenu {
        /// Binding captured when the marker was built
        binding: MarkerBinding,
    },
    /// A touch press began on a marker.
    PressStart {
        /// Binding captured when the marker was built
        binding: MarkerBinding,
        /// Number of fingers down; more than one arms nothing
        touches: u8,
    },
    /// The press lifted.
    PressEnd,
    /// The press was cancelled by the platform.
    PressCancel,
}

/// Surface implementation that tracks overlays without rendering anything.
///
/// Backs the command-line shell and any test that cares about overlay
/// bookkeeping rather than pixels.
#[derive(Debug, Default)]
pub struct HeadlessMapSurface {
    next_id: u64,
    created: u64,
    live: BTreeMap<u64, OverlayRequest>,
}

impl HeadlessMapSurface {
    /// Create a surface with no live overlays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently live overlays.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total overlays ever created.
    pub fn created_count(&self) -> u64 {
        self.created
    }

    /// The request behind a live overlay.
    pub fn overlay(&self, id: OverlayId) -> Option<&OverlayRequest> {
        self.live.get(&id.0)
    }

    /// Route ids with a live overlay, in creation order.
    pub fn live_route_ids(&self) -> Vec<String> {
        self.live.values().map(|request| request.route_id.clone()).collect()
    }
}

impl MapSurface for HeadlessMapSurface {
    fn create_overlay(&mut self, request: OverlayRequest) -> OverlayId {
        self.next_id += 1;
        self.created += 1;
        tracing::debug!(
            route = %request.route_id,
            waypoints = request.waypoints.len(),
            color = %request.style.color,
            "overlay created"
        );
        self.live.insert(self.next_id, request);
        OverlayId(self.next_id)
    }

    fn remove_overlay(&mut self, overlay: OverlayId) {
        if self.live.remove(&overlay.0).is_none() {
            tracing::debug!(overlay = overlay.0, "remove of unknown overlay ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(route_id: &str) -> OverlayRequest {
        OverlayRequest {
            route_id: route_id.to_string(),
            waypoints: vec![Waypoint::new(39.0, 35.0)],
            style: LineStyle { color: "blue".to_string(), weight: 5 },
            markers: vec![MarkerBinding {
                route_id: route_id.to_string(),
                index: 0,
                generation: 1,
            }],
        }
    }

    #[test]
    fn test_headless_surface_issues_unique_handles() {
        let mut surface = HeadlessMapSurface::new();
        let a = surface.create_overlay(request("a"));
        let b = surface.create_overlay(request("b"));
        assert_ne!(a, b);
        assert_eq!(surface.live_count(), 2);
    }

    #[test]
    fn test_headless_surface_remove_is_idempotent() {
        let mut surface = HeadlessMapSurface::new();
        let id = surface.create_overlay(request("a"));
        surface.remove_overlay(id);
        surface.remove_overlay(id);
        assert_eq!(surface.live_count(), 0);
        assert_eq!(surface.created_count(), 1);
    }
}
