//! Database schema definitions for RouteSketch.
//!
//! T008: Define blob table schema SQL

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- Named text blobs (route catalog, geometries, preferences)
CREATE TABLE IF NOT EXISTS blobs (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// SQL for schema version tracking (migrations)
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version
pub const CURRENT_VERSION: i32 = 1;
