//! Integration tests for persistence round-trips across editor sessions.

use routesketch::storage::config::EditorSettings;
use routesketch::storage::persist;
use routesketch::{
    BlobStore, HeadlessMapSurface, MemoryStore, RouteEditor, SqliteStore, Theme, Waypoint,
};

fn settings() -> EditorSettings {
    EditorSettings::default()
}

#[test]
fn test_total_length_survives_a_roundtrip() {
    let mut first =
        RouteEditor::new(HeadlessMapSurface::new(), MemoryStore::new(), &settings());
    first.add_route("Coastal", "red").unwrap();
    first.add_point("coastal", Waypoint::new(39.0, 35.0)).unwrap();
    first.add_point("coastal", Waypoint::new(39.5, 35.5)).unwrap();
    first.add_point("coastal", Waypoint::new(40.0, 36.0)).unwrap();
    let length_before = first.total_length("coastal");
    assert!(length_before > 0.0);

    let second =
        RouteEditor::load(HeadlessMapSurface::new(), first.store().clone(), &settings()).unwrap();
    let length_after = second.total_length("coastal");

    assert!((length_before - length_after).abs() < 1e-9);
}

#[test]
fn test_reload_restores_routes_and_builds_overlays() {
    let mut first =
        RouteEditor::new(HeadlessMapSurface::new(), MemoryStore::new(), &settings());
    first.add_route("Coastal", "red").unwrap();
    first.add_point("coastal", Waypoint::new(39.0, 35.0)).unwrap();
    first.add_route("Harbor", "green").unwrap();
    first.add_point("harbor", Waypoint::new(40.0, 36.0)).unwrap();
    first.add_point("harbor", Waypoint::new(40.5, 36.5)).unwrap();

    let second =
        RouteEditor::load(HeadlessMapSurface::new(), first.store().clone(), &settings()).unwrap();

    let ids: Vec<&str> = second.routes().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["coastal", "harbor"]);
    assert_eq!(second.points("coastal").unwrap().len(), 1);
    assert_eq!(second.points("harbor").unwrap().len(), 2);
    // Every restored route is rendered, the way the original rebuilds all
    // routing controls on load.
    assert_eq!(second.surface().live_count(), 2);
    // Selection does not survive sessions.
    assert_eq!(second.selected(), None);
}

#[test]
fn test_geometry_blob_omits_undrawn_routes() {
    let mut editor =
        RouteEditor::new(HeadlessMapSurface::new(), MemoryStore::new(), &settings());
    editor.add_route("Drawn", "red").unwrap();
    editor.add_route("Planned Only", "blue").unwrap();
    editor.add_point("drawn", Waypoint::new(39.0, 35.0)).unwrap();

    let raw = editor.store().get(persist::KEY_GEOMETRY).unwrap().unwrap();
    assert!(raw.contains("drawn"));
    assert!(!raw.contains("planned-only"));

    let restored = persist::load_geometry(editor.store()).unwrap();
    assert_eq!(restored.len(), 1);
}

#[test]
fn test_sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routes.db");

    {
        let store = SqliteStore::open(&path).unwrap();
        let mut editor = RouteEditor::new(HeadlessMapSurface::new(), store, &settings());
        editor.add_route("Coastal", "red").unwrap();
        editor.add_point("coastal", Waypoint::new(39.0, 35.0)).unwrap();
        editor.add_point("coastal", Waypoint::new(39.5, 35.5)).unwrap();
        editor.set_theme(Theme::Dark).unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    let editor = RouteEditor::load(HeadlessMapSurface::new(), store, &settings()).unwrap();

    assert_eq!(editor.routes().len(), 1);
    assert_eq!(editor.points("coastal").unwrap().len(), 2);
    assert_eq!(editor.theme(), Theme::Dark);
    assert_eq!(editor.surface().live_count(), 1);
}

#[test]
fn test_clearing_all_routes_persists_across_sessions() {
    let mut first =
        RouteEditor::new(HeadlessMapSurface::new(), MemoryStore::new(), &settings());
    first.add_route("Coastal", "red").unwrap();
    first.add_point("coastal", Waypoint::new(39.0, 35.0)).unwrap();
    first.clear_all().unwrap();

    let second =
        RouteEditor::load(HeadlessMapSurface::new(), first.store().clone(), &settings()).unwrap();
    assert!(second.routes().is_empty());
    assert_eq!(second.surface().live_count(), 0);
}

#[test]
fn test_stored_theme_wins_over_system_detection() {
    let mut store = MemoryStore::new();
    persist::save_theme(&mut store, Theme::Dark).unwrap();

    let editor = RouteEditor::load(HeadlessMapSurface::new(), store, &settings()).unwrap();
    assert_eq!(editor.theme(), Theme::Dark);
}
