//! RouteSketch - Interactive Map Route Sketching
//!
//! Maintains named routes as ordered waypoint sequences, keeps one rendered
//! overlay per route in lockstep with every edit (destroy-then-rebuild,
//! never patched), and round-trips the whole model through a pluggable blob
//! store. The map surface and its routing service are external
//! collaborators behind traits.

pub mod editor;
pub mod map;
pub mod routes;
pub mod storage;

// Re-export commonly used types
pub use editor::{EditorError, RouteEditor, RouteSummary};
pub use map::surface::{HeadlessMapSurface, MapEvent, MapSurface, MarkerBinding};
pub use routes::catalog::RouteDefinition;
pub use routes::geometry::Waypoint;
pub use storage::blob::{BlobStore, MemoryStore};
pub use storage::config::{AppConfig, Theme};
pub use storage::database::SqliteStore;
