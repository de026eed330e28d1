//! Route domain model: catalog of named routes and their waypoint geometry.

pub mod catalog;
pub mod distance;
pub mod geometry;

pub use catalog::{derive_id, RouteCatalog, RouteDefinition};
pub use geometry::{DeleteOutcome, GeometryStore, Waypoint};
