//! Route catalog: named route definitions and their identity rules.
//!
//! T001: Implement route catalog with name-derived ids

use serde::{Deserialize, Serialize};

use crate::editor::EditorError;

/// A named, colored route definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// Stable identifier derived from the name at creation time.
    ///
    /// This is the join key into the geometry store and never changes,
    /// even if the display name would derive differently today.
    pub id: String,
    /// Display name
    pub name: String,
    /// Path line color (CSS color name or hex)
    pub color: String,
}

/// Derive the stable route id from a display name.
///
/// Lowercased, with whitespace runs collapsed to single hyphens.
pub fn derive_id(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

/// Ordered collection of route definitions.
///
/// Owns identity and metadata only; waypoint sequences live in the
/// geometry store under the same ids. Persistence of the catalog is the
/// editor's responsibility, triggered after every mutating operation.
#[derive(Debug, Default)]
pub struct RouteCatalog {
    routes: Vec<RouteDefinition>,
}

impl RouteCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a catalog from persisted definitions, preserving their order.
    pub fn from_definitions(routes: Vec<RouteDefinition>) -> Self {
        Self { routes }
    }

    /// Add a definition for `name`, returning the derived id.
    ///
    /// Ids must stay unique: a name deriving to an id that already exists
    /// is rejected rather than silently overwriting the older route.
    pub fn add(&mut self, name: &str, color: &str) -> Result<String, EditorError> {
        let id = derive_id(name);
        if self.find(&id).is_some() {
            return Err(EditorError::DuplicateName { name: name.to_string(), id });
        }
        self.routes.push(RouteDefinition {
            id: id.clone(),
            name: name.to_string(),
            color: color.to_string(),
        });
        Ok(id)
    }

    /// Remove the definition with `id`. Absent ids are a silent no-op;
    /// the caller owns the cascading cleanup of geometry and selection.
    pub fn remove(&mut self, id: &str) {
        self.routes.retain(|route| route.id != id);
    }

    /// All definitions in insertion order.
    pub fn list(&self) -> &[RouteDefinition] {
        &self.routes
    }

    /// Look up a definition by id.
    pub fn find(&self, id: &str) -> Option<&RouteDefinition> {
        self.routes.iter().find(|route| route.id == id)
    }

    /// Drop every definition.
    pub fn clear(&mut self) {
        self.routes.clear();
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the catalog has no definitions.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_id_lowercases_and_hyphenates() {
        assert_eq!(derive_id("Coastal"), "coastal");
        assert_eq!(derive_id("North Loop"), "north-loop");
        assert_eq!(derive_id("  Harbor   Express  "), "harbor-express");
    }

    #[test]
    fn test_add_returns_derived_id() {
        let mut catalog = RouteCatalog::new();
        let id = catalog.add("Coastal", "red").unwrap();
        assert_eq!(id, "coastal");
        assert_eq!(catalog.find("coastal").unwrap().name, "Coastal");
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut catalog = RouteCatalog::new();
        catalog.add("Coastal", "red").unwrap();
        let err = catalog.add("coastal", "blue").unwrap_err();
        assert!(matches!(err, EditorError::DuplicateName { .. }));
        // The original definition is untouched.
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find("coastal").unwrap().color, "red");
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut catalog = RouteCatalog::new();
        catalog.add("B Line", "blue").unwrap();
        catalog.add("A Line", "green").unwrap();
        let ids: Vec<&str> = catalog.list().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b-line", "a-line"]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut catalog = RouteCatalog::new();
        catalog.add("Coastal", "red").unwrap();
        catalog.remove("no-such-route");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_definition_serde_shape() {
        let def = RouteDefinition {
            id: "coastal".to_string(),
            name: "Coastal".to_string(),
            color: "red".to_string(),
        };
        let json = serde_json::to_string(&def).unwrap();
        assert_eq!(json, r#"{"id":"coastal","name":"Coastal","color":"red"}"#);
        let back: RouteDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, def);
    }
}
