//! Interactive shell mapping user commands onto editor operations.
//!
//! T013: Implement command shell over the route editor
//!
//! Each command is the terminal stand-in for one of the map UI's buttons or
//! gestures: `point` plays the role of a map click, `move`/`del` of marker
//! drags and right-clicks. Destructive commands confirm first, like the
//! original's blocking dialogs.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Context;

use routesketch::storage::config;
use routesketch::{HeadlessMapSurface, MapEvent, RouteEditor, SqliteStore, Waypoint};

type Editor = RouteEditor<HeadlessMapSurface, SqliteStore>;

pub fn run() -> anyhow::Result<()> {
    let config = config::load_config().context("loading configuration")?;
    let store =
        SqliteStore::open(&config::get_store_path()).context("opening the route store")?;
    let mut editor = RouteEditor::load(HeadlessMapSurface::new(), store, &config.editor)
        .context("restoring persisted routes")?;

    println!("RouteSketch v{} ({} theme)", env!("CARGO_PKG_VERSION"), editor.theme());
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush().ok();
        let Some(line) = lines.next() else { break };
        let line = line.context("reading input")?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else { continue };

        let outcome = match command {
            "help" => {
                print_help();
                Ok(())
            }
            "routes" => {
                list_routes(&editor);
                Ok(())
            }
            "add" => add_route(&mut editor, args),
            "remove" => remove_route(&mut editor, args, &mut lines),
            "select" => select_route(&mut editor, args),
            "point" => add_point(&mut editor, args),
            "move" => move_point(&mut editor, args),
            "del" => delete_point(&mut editor, args),
            "info" => {
                print_info(&editor);
                Ok(())
            }
            "clear" => clear_routes(&mut editor, &mut lines),
            "theme" => toggle_theme(&mut editor),
            "quit" | "exit" => break,
            other => {
                println!("Unknown command '{other}'. Type 'help' for commands.");
                Ok(())
            }
        };

        if let Err(error) = outcome {
            println!("Error: {error:#}");
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  routes                    list route definitions");
    println!("  add <name> <color>        add a route and select it");
    println!("  remove <id>               remove a route (asks first)");
    println!("  select <id|->             select a route, '-' to clear");
    println!("  point <lat> <lng>         add a waypoint to the selected route");
    println!("  move <index> <lat> <lng>  move a waypoint of the selected route");
    println!("  del <index>               delete a waypoint of the selected route");
    println!("  info                      show the selected route's summary");
    println!("  clear                     remove every route (asks first)");
    println!("  theme                     toggle light/dark");
    println!("  quit                      exit");
}

fn list_routes(editor: &Editor) {
    if editor.routes().is_empty() {
        println!("No routes yet. Use 'add <name> <color>' to create one.");
        return;
    }
    for definition in editor.routes() {
        let marker = if editor.selected() == Some(definition.id.as_str()) { "*" } else { " " };
        let points = editor.points(&definition.id).map(|p| p.len()).unwrap_or(0);
        println!(
            "{marker} {} | {} ({}, {} points)",
            definition.id, definition.name, definition.color, points
        );
    }
}

fn add_route(editor: &mut Editor, args: &[&str]) -> anyhow::Result<()> {
    let [name, color] = args else {
        println!("Usage: add <name> <color>");
        return Ok(());
    };
    if name.trim().is_empty() {
        println!("Please enter a name.");
        return Ok(());
    }
    let id = editor.add_route(name, color)?;
    println!("Added and selected route '{id}'.");
    Ok(())
}

fn remove_route(
    editor: &mut Editor,
    args: &[&str],
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<()> {
    let [id] = args else {
        println!("Usage: remove <id>");
        return Ok(());
    };
    let Some(definition) = editor.find_route(id) else {
        println!("No route '{id}'.");
        return Ok(());
    };
    if !confirm(&format!("Delete route \"{}\"?", definition.name), lines) {
        return Ok(());
    }
    editor.remove_route(id)?;
    println!("Removed route '{id}'.");
    Ok(())
}

fn select_route(editor: &mut Editor, args: &[&str]) -> anyhow::Result<()> {
    let [id] = args else {
        println!("Usage: select <id|->");
        return Ok(());
    };
    if *id == "-" {
        editor.select(None)?;
        println!("Selection cleared.");
    } else {
        editor.select(Some(id))?;
        println!("Selected '{id}'.");
    }
    Ok(())
}

fn add_point(editor: &mut Editor, args: &[&str]) -> anyhow::Result<()> {
    let [lat, lng] = args else {
        println!("Usage: point <lat> <lng>");
        return Ok(());
    };
    let position = parse_waypoint(lat, lng)?;
    editor.handle_event(MapEvent::Click { position }, Instant::now())?;
    print_info(editor);
    Ok(())
}

fn move_point(editor: &mut Editor, args: &[&str]) -> anyhow::Result<()> {
    let [index, lat, lng] = args else {
        println!("Usage: move <index> <lat> <lng>");
        return Ok(());
    };
    let index: usize = index.parse().context("parsing the waypoint index")?;
    let position = parse_waypoint(lat, lng)?;
    let Some(id) = editor.selected().map(str::to_string) else {
        println!("Please select a route first.");
        return Ok(());
    };
    editor.move_point(&id, index, position)?;
    print_info(editor);
    Ok(())
}

fn delete_point(editor: &mut Editor, args: &[&str]) -> anyhow::Result<()> {
    let [index] = args else {
        println!("Usage: del <index>");
        return Ok(());
    };
    let index: usize = index.parse().context("parsing the waypoint index")?;
    let Some(id) = editor.selected().map(str::to_string) else {
        println!("Please select a route first.");
        return Ok(());
    };
    editor.delete_point(&id, index)?;
    print_info(editor);
    Ok(())
}

fn clear_routes(
    editor: &mut Editor,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<()> {
    if !confirm("Clear ALL routes? This cannot be undone.", lines) {
        return Ok(());
    }
    editor.clear_all()?;
    println!("All routes cleared.");
    Ok(())
}

fn toggle_theme(editor: &mut Editor) -> anyhow::Result<()> {
    let theme = editor.toggle_theme()?;
    println!("Theme set to {theme}.");
    Ok(())
}

fn print_info(editor: &Editor) {
    let summary = editor.summary();
    println!(
        "Route: {} | Points: {} | Distance: {}",
        summary.name, summary.point_count, summary.total_distance
    );
}

fn parse_waypoint(lat: &str, lng: &str) -> anyhow::Result<Waypoint> {
    let lat: f64 = lat.parse().context("parsing latitude")?;
    let lng: f64 = lng.parse().context("parsing longitude")?;
    Ok(Waypoint::new(lat, lng))
}

fn confirm(prompt: &str, lines: &mut impl Iterator<Item = io::Result<String>>) -> bool {
    print!("{prompt} [y/N] ");
    io::stdout().flush().ok();
    matches!(
        lines.next().and_then(Result::ok).as_deref().map(str::trim),
        Some("y") | Some("Y")
    )
}
