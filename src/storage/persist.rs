//! Serialization of the route model to the blob store.
//!
//! Three logical keys hold the whole persisted state:
//! - [`KEY_CATALOG`]: JSON array of route definitions, insertion order.
//! - [`KEY_GEOMETRY`]: JSON object mapping route id to an array of
//!   `{"lat", "lng"}` points; routes with zero points are omitted.
//! - [`KEY_THEME`]: `"light"` or `"dark"`.

use std::collections::BTreeMap;

use crate::routes::catalog::{RouteCatalog, RouteDefinition};
use crate::routes::geometry::{GeometryStore, Waypoint};
use crate::storage::blob::{BlobStore, StoreError};
use crate::storage::config::Theme;

/// Storage key for the serialized route catalog.
pub const KEY_CATALOG: &str = "route-catalog";
/// Storage key for the serialized route geometries.
pub const KEY_GEOMETRY: &str = "route-geometry";
/// Storage key for the theme preference.
pub const KEY_THEME: &str = "theme";

/// Persist the whole catalog.
pub fn save_catalog<B: BlobStore>(store: &mut B, catalog: &RouteCatalog) -> Result<(), StoreError> {
    let json = serde_json::to_string(catalog.list())
        .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;
    store.set(KEY_CATALOG, &json)
}

/// Restore the catalog; an absent blob yields an empty catalog.
pub fn load_catalog<B: BlobStore>(store: &B) -> Result<RouteCatalog, StoreError> {
    match store.get(KEY_CATALOG)? {
        Some(raw) => {
            let definitions: Vec<RouteDefinition> = serde_json::from_str(&raw)
                .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;
            Ok(RouteCatalog::from_definitions(definitions))
        }
        None => Ok(RouteCatalog::new()),
    }
}

/// Persist every non-empty waypoint sequence.
pub fn save_geometry<B: BlobStore>(
    store: &mut B,
    geometry: &GeometryStore,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(&geometry.to_point_map())
        .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;
    store.set(KEY_GEOMETRY, &json)
}

/// Restore the persisted waypoint sequences, keyed by route id.
pub fn load_geometry<B: BlobStore>(
    store: &B,
) -> Result<BTreeMap<String, Vec<Waypoint>>, StoreError> {
    match store.get(KEY_GEOMETRY)? {
        Some(raw) => {
            serde_json::from_str(&raw).map_err(|e| StoreError::SerializationFailed(e.to_string()))
        }
        None => Ok(BTreeMap::new()),
    }
}

/// Drop the persisted geometry blob entirely (clear-all).
pub fn clear_geometry<B: BlobStore>(store: &mut B) -> Result<(), StoreError> {
    store.remove(KEY_GEOMETRY)
}

/// Persist the theme preference.
pub fn save_theme<B: BlobStore>(store: &mut B, theme: Theme) -> Result<(), StoreError> {
    store.set(KEY_THEME, theme.as_str())
}

/// Restore the theme preference; unknown stored values are dropped with a
/// warning rather than failing the load.
pub fn load_theme<B: BlobStore>(store: &B) -> Result<Option<Theme>, StoreError> {
    Ok(store.get(KEY_THEME)?.and_then(|raw| match raw.parse() {
        Ok(theme) => Some(theme),
        Err(_) => {
            tracing::warn!(stored = %raw, "ignoring unrecognized theme preference");
            None
        }
    }))
}
