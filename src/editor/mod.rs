//! The route editor context: owned state and the operations that mutate it.
//!
//! T003: Create RouteEditor context wiring catalog, geometry, sync, storage
//!
//! Every user gesture lands here, synchronously: the geometry store is
//! mutated, the route's overlay is rebuilt whole, and the full model is
//! re-serialized to the blob store. There is no ambient global state; the
//! editor owns everything, including the press-and-hold tracker and the
//! current selection.

pub mod summary;

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::map::gestures::PressTracker;
use crate::map::surface::{MapEvent, MapSurface, MarkerBinding};
use crate::map::sync::RenderSynchronizer;
use crate::routes::catalog::{RouteCatalog, RouteDefinition};
use crate::routes::geometry::{DeleteOutcome, GeometryStore, Waypoint};
use crate::storage::blob::{BlobStore, StoreError};
use crate::storage::config::{EditorSettings, Theme};
use crate::storage::persist;

pub use summary::RouteSummary;

/// Errors surfaced by editor operations.
///
/// All recoverable: the shell reports them and the session continues. No
/// operation leaves the model partially mutated; a failed persistence write
/// leaves the in-memory state authoritative until the next successful save.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("A route named '{name}' already exists (id '{id}')")]
    DuplicateName { name: String, id: String },

    #[error("Waypoint index {index} is out of range for route '{route}' ({len} points)")]
    IndexOutOfRange { route: String, index: usize, len: usize },

    #[error("No valid route is selected")]
    InvalidSelection,

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Owned editing context for named routes on a map surface.
pub struct RouteEditor<S: MapSurface, B: BlobStore> {
    catalog: RouteCatalog,
    geometry: GeometryStore,
    selection: Option<String>,
    press: PressTracker,
    sync: RenderSynchronizer,
    theme: Theme,
    surface: S,
    store: B,
}

impl<S: MapSurface, B: BlobStore> RouteEditor<S, B> {
    /// Create an empty editor. Nothing is read from or written to the
    /// store until the first mutating operation.
    pub fn new(surface: S, store: B, settings: &EditorSettings) -> Self {
        Self {
            catalog: RouteCatalog::new(),
            geometry: GeometryStore::new(),
            selection: None,
            press: PressTracker::new(Duration::from_millis(settings.hold_ms)),
            sync: RenderSynchronizer::new(settings.default_color.clone(), settings.line_weight),
            theme: Theme::default(),
            surface,
            store,
        }
    }

    /// Restore catalog, geometries, and theme from the store, building an
    /// overlay for every restored route. When no theme preference is
    /// stored the system theme is detected instead.
    pub fn load(surface: S, store: B, settings: &EditorSettings) -> Result<Self, EditorError> {
        let mut editor = Self::new(surface, store, settings);

        editor.catalog = persist::load_catalog(&editor.store)?;
        let restored = persist::load_geometry(&editor.store)?;
        for (id, points) in restored {
            for point in points {
                editor.geometry.add_point(&id, point);
            }
            editor
                .sync
                .rebuild(&mut editor.surface, &editor.catalog, &mut editor.geometry, &id);
        }
        editor.theme = persist::load_theme(&editor.store)?.unwrap_or_else(Theme::from_system);

        tracing::info!(
            routes = editor.catalog.len(),
            drawn = editor.geometry.len(),
            "editor state restored"
        );
        Ok(editor)
    }

    // ========== Catalog operations ==========

    /// Add a route definition and select it. The first waypoint arrives
    /// later, via map clicks.
    pub fn add_route(&mut self, name: &str, color: &str) -> Result<String, EditorError> {
        let id = self.catalog.add(name, color)?;
        self.selection = Some(id.clone());
        tracing::info!(route = %id, "route added");
        persist::save_catalog(&mut self.store, &self.catalog)?;
        Ok(id)
    }

    /// Remove a route definition together with its geometry and overlay.
    /// Absent ids are a silent no-op.
    pub fn remove_route(&mut self, id: &str) -> Result<(), EditorError> {
        if self.catalog.find(id).is_none() && !self.geometry.contains(id) {
            return Ok(());
        }

        self.sync.teardown(&mut self.surface, &mut self.geometry, id);
        self.catalog.remove(id);
        if self.selection.as_deref() == Some(id) {
            self.selection = None;
        }
        tracing::info!(route = %id, "route removed");

        persist::save_catalog(&mut self.store, &self.catalog)?;
        persist::save_geometry(&mut self.store, &self.geometry)?;
        Ok(())
    }

    /// Remove every route: geometry, overlays, and definitions.
    pub fn clear_all(&mut self) -> Result<(), EditorError> {
        self.sync.teardown_all(&mut self.surface, &mut self.geometry);
        self.catalog.clear();
        self.selection = None;
        tracing::info!("all routes cleared");

        persist::save_catalog(&mut self.store, &self.catalog)?;
        persist::clear_geometry(&mut self.store)?;
        Ok(())
    }

    // ========== Selection ==========

    /// Select `id`, showing only its overlay; `None` clears the selection.
    pub fn select(&mut self, id: Option<&str>) -> Result<(), EditorError> {
        let Some(id) = id else {
            self.selection = None;
            return Ok(());
        };

        if self.catalog.find(id).is_none() {
            return Err(EditorError::InvalidSelection);
        }

        self.selection = Some(id.to_string());
        if self.geometry.contains(id) {
            self.sync.show_only(&mut self.surface, &self.catalog, &mut self.geometry, id);
        }
        Ok(())
    }

    /// Currently selected route id.
    pub fn selected(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    // ========== Waypoint operations ==========

    /// Append a waypoint to `id`, creating the geometry entry if absent,
    /// then rebuild the overlay and persist.
    pub fn add_point(&mut self, id: &str, point: Waypoint) -> Result<(), EditorError> {
        self.geometry.add_point(id, point);
        self.sync.rebuild(&mut self.surface, &self.catalog, &mut self.geometry, id);
        tracing::debug!(route = %id, lat = point.lat, lng = point.lng, "waypoint added");
        persist::save_geometry(&mut self.store, &self.geometry)?;
        Ok(())
    }

    /// Replace the waypoint at `index`, then rebuild the overlay and
    /// persist.
    pub fn move_point(&mut self, id: &str, index: usize, point: Waypoint) -> Result<(), EditorError> {
        self.geometry.move_point(id, index, point)?;
        self.sync.rebuild(&mut self.surface, &self.catalog, &mut self.geometry, id);
        tracing::debug!(route = %id, index, "waypoint moved");
        persist::save_geometry(&mut self.store, &self.geometry)?;
        Ok(())
    }

    /// Delete the waypoint at `index`, shifting later indices down.
    ///
    /// Removing the last point cascades: the geometry entry, the overlay,
    /// the catalog definition, and a matching selection all go away.
    pub fn delete_point(&mut self, id: &str, index: usize) -> Result<(), EditorError> {
        match self.geometry.delete_point(id, index)? {
            DeleteOutcome::PointsRemain => {
                self.sync.rebuild(&mut self.surface, &self.catalog, &mut self.geometry, id);
                tracing::debug!(route = %id, index, "waypoint deleted");
            }
            DeleteOutcome::RouteEmptied => {
                self.sync.teardown(&mut self.surface, &mut self.geometry, id);
                self.catalog.remove(id);
                if self.selection.as_deref() == Some(id) {
                    self.selection = None;
                }
                tracing::info!(route = %id, "last waypoint removed, route dropped");
                persist::save_catalog(&mut self.store, &self.catalog)?;
            }
        }
        persist::save_geometry(&mut self.store, &self.geometry)?;
        Ok(())
    }

    // ========== Gesture routing ==========

    /// Route a gesture event from the map surface.
    ///
    /// Events carrying a marker binding are validated against the route's
    /// current overlay generation first; stale bindings (the overlay was
    /// rebuilt or destroyed while the event was in flight) are dropped
    /// with a debug log, since the user cannot act on a race they cannot
    /// see. A map click with no selected route is an error the shell
    /// surfaces, matching the original's "select a route first" alert.
    pub fn handle_event(&mut self, event: MapEvent, now: Instant) -> Result<(), EditorError> {
        match event {
            MapEvent::Click { position } => {
                let Some(id) = self.selection.clone() else {
                    return Err(EditorError::InvalidSelection);
                };
                self.add_point(&id, position)
            }
            MapEvent::DragEnd { binding, position } => {
                if !self.binding_is_current(&binding) {
                    tracing::debug!(route = %binding.route_id, "stale drag-end ignored");
                    return Ok(());
                }
                self.move_point(&binding.route_id, binding.index, position)
            }
            MapEvent::ContextMenu { binding } => {
                if !self.binding_is_current(&binding) {
                    tracing::debug!(route = %binding.route_id, "stale context-menu ignored");
                    return Ok(());
                }
                self.delete_point(&binding.route_id, binding.index)
            }
            MapEvent::PressStart { binding, touches } => {
                if !self.binding_is_current(&binding) {
                    tracing::debug!(route = %binding.route_id, "stale press-start ignored");
                    return Ok(());
                }
                self.press.press_started(binding, touches, now);
                Ok(())
            }
            MapEvent::PressEnd | MapEvent::PressCancel => {
                self.press.press_ended();
                Ok(())
            }
        }
    }

    /// Advance the press-and-hold timer, firing at most one pending
    /// marker deletion.
    pub fn tick(&mut self, now: Instant) -> Result<(), EditorError> {
        if let Some(binding) = self.press.poll(now) {
            if self.binding_is_current(&binding) {
                return self.delete_point(&binding.route_id, binding.index);
            }
            tracing::debug!(route = %binding.route_id, "press fired for stale binding, ignored");
        }
        Ok(())
    }

    fn binding_is_current(&self, binding: &MarkerBinding) -> bool {
        self.geometry.overlay(&binding.route_id).is_some()
            && self.geometry.generation(&binding.route_id) == Some(binding.generation)
    }

    // ========== Theme ==========

    /// Current theme preference.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Set and persist the theme preference.
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), EditorError> {
        self.theme = theme;
        persist::save_theme(&mut self.store, theme)?;
        Ok(())
    }

    /// Flip between light and dark, returning the new theme.
    pub fn toggle_theme(&mut self) -> Result<Theme, EditorError> {
        self.set_theme(self.theme.toggled())?;
        Ok(self.theme)
    }

    // ========== Views ==========

    /// All route definitions in insertion order.
    pub fn routes(&self) -> &[RouteDefinition] {
        self.catalog.list()
    }

    /// Look up a definition by id.
    pub fn find_route(&self, id: &str) -> Option<&RouteDefinition> {
        self.catalog.find(id)
    }

    /// The waypoint sequence for `id`, if drawn.
    pub fn points(&self, id: &str) -> Option<&[Waypoint]> {
        self.geometry.points(id)
    }

    /// Total route length in meters.
    pub fn total_length(&self, id: &str) -> f64 {
        self.geometry.total_length(id)
    }

    /// Summary of the selected route for the info panel.
    pub fn summary(&self) -> RouteSummary {
        summary::summarize(self.selection.as_deref(), &self.catalog, &self.geometry)
    }

    /// The underlying map surface (inspection only).
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The underlying blob store (inspection only).
    pub fn store(&self) -> &B {
        &self.store
    }
}
