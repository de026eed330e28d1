//! Render synchronizer: keeps overlays in lockstep with route geometry.
//!
//! T005: Implement destroy-then-rebuild overlay synchronization
//!
//! The invariant is "at most one live overlay per route id, always
//! reflecting the current waypoint sequence exactly". Overlays are never
//! patched in place: every mutation destroys the previous handle and
//! constructs a fresh one with fresh marker bindings. Gesture callbacks from
//! the destroyed overlay keep their old generation and fail the editor's
//! staleness check, which is what makes the rebuild safe against in-flight
//! events.

use crate::map::surface::{LineStyle, MapSurface, MarkerBinding, OverlayRequest};
use crate::routes::catalog::RouteCatalog;
use crate::routes::geometry::GeometryStore;

/// Rebuilds route overlays and owns the default line styling.
#[derive(Debug, Clone)]
pub struct RenderSynchronizer {
    default_color: String,
    line_weight: u32,
}

impl RenderSynchronizer {
    /// Create a synchronizer with the configured style defaults.
    pub fn new(default_color: impl Into<String>, line_weight: u32) -> Self {
        Self { default_color: default_color.into(), line_weight }
    }

    /// Destroy and, if points remain, reconstruct the overlay for `id`.
    ///
    /// The new overlay carries one marker binding per waypoint stamped with
    /// a fresh generation. Routes without a geometry entry are ignored.
    pub fn rebuild<S: MapSurface>(
        &self,
        surface: &mut S,
        catalog: &RouteCatalog,
        store: &mut GeometryStore,
        id: &str,
    ) {
        let generation = store.bump_generation();
        let style = self.style_for(catalog, id);

        let Some(entry) = store.entry_mut(id) else {
            tracing::debug!(route = %id, "rebuild requested for route without geometry");
            return;
        };

        if let Some(overlay) = entry.overlay.take() {
            surface.remove_overlay(overlay);
        }
        entry.generation = generation;

        if entry.points.is_empty() {
            return;
        }

        let markers = (0..entry.points.len())
            .map(|index| MarkerBinding { route_id: id.to_string(), index, generation })
            .collect();
        let request = OverlayRequest {
            route_id: id.to_string(),
            waypoints: entry.points.clone(),
            style,
            markers,
        };
        entry.overlay = Some(surface.create_overlay(request));
    }

    /// Destroy the overlay and drop the geometry entry for `id`.
    pub fn teardown<S: MapSurface>(&self, surface: &mut S, store: &mut GeometryStore, id: &str) {
        if let Some(geometry) = store.remove_route(id) {
            if let Some(overlay) = geometry.overlay {
                surface.remove_overlay(overlay);
            }
        }
    }

    /// Destroy every live overlay; geometry entries survive.
    pub fn hide_all<S: MapSurface>(&self, surface: &mut S, store: &mut GeometryStore) {
        for id in store.route_ids() {
            if let Some(entry) = store.entry_mut(&id) {
                if let Some(overlay) = entry.overlay.take() {
                    surface.remove_overlay(overlay);
                }
            }
        }
    }

    /// Show only `id`: destroy every overlay, then rebuild `id`'s.
    ///
    /// Used when switching the active selection so a single editable route
    /// is visible. Calling it twice for the same id is idempotent in the
    /// set of visible overlays.
    pub fn show_only<S: MapSurface>(
        &self,
        surface: &mut S,
        catalog: &RouteCatalog,
        store: &mut GeometryStore,
        id: &str,
    ) {
        self.hide_all(surface, store);
        self.rebuild(surface, catalog, store, id);
    }

    /// Destroy every overlay and drop all geometry entries.
    pub fn teardown_all<S: MapSurface>(&self, surface: &mut S, store: &mut GeometryStore) {
        self.hide_all(surface, store);
        store.clear();
    }

    fn style_for(&self, catalog: &RouteCatalog, id: &str) -> LineStyle {
        let color = catalog
            .find(id)
            .map(|definition| definition.color.clone())
            .filter(|color| !color.is_empty())
            .unwrap_or_else(|| self.default_color.clone());
        LineStyle { color, weight: self.line_weight }
    }
}
