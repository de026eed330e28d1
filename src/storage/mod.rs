//! Storage module for the blob store, persistence codec, and configuration.

pub mod blob;
pub mod config;
pub mod database;
pub mod persist;
pub mod schema;

pub use blob::{BlobStore, MemoryStore, StoreError};
pub use config::{AppConfig, ConfigError, EditorSettings, MapSettings, Theme};
pub use database::SqliteStore;
