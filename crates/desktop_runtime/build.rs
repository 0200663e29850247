use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridSection {
    cell_size: i32,
    columns: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppEntry {
    id: u32,
    display_name: String,
    icon_glyph: String,
    grid_x: i32,
    grid_y: i32,
    application_route: String,
    default_width: i32,
    default_height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    schema_version: u32,
    grid: GridSection,
    apps: Vec<AppEntry>,
}

fn validate(catalog: &CatalogFile, path: &str) {
    if catalog.schema_version != 1 {
        panic!(
            "catalog schema mismatch in {path}: expected 1 found {}",
            catalog.schema_version
        );
    }
    if catalog.grid.cell_size <= 0 || catalog.grid.columns <= 0 {
        panic!("catalog grid in {path} must have positive cell_size and columns");
    }

    let mut ids = HashSet::new();
    let mut cells = HashSet::new();
    for app in &catalog.apps {
        if !ids.insert(app.id) {
            panic!("duplicate app id {} in {path}", app.id);
        }
        if !cells.insert((app.grid_x, app.grid_y)) {
            panic!(
                "app {} shares grid cell ({}, {}) in {path}",
                app.id, app.grid_x, app.grid_y
            );
        }
        if app.grid_x < 0 || app.grid_y < 0 || app.grid_x >= catalog.grid.columns {
            panic!(
                "app {} cell ({}, {}) is outside the {}-column grid in {path}",
                app.id, app.grid_x, app.grid_y, catalog.grid.columns
            );
        }
        if app.default_width <= 0 || app.default_height <= 0 {
            panic!("app {} has a non-positive window size in {path}", app.id);
        }
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("catalog").join("desktop.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let mut catalog: CatalogFile = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    validate(&catalog, &path.display().to_string());

    catalog.apps.sort_by_key(|app| app.id);
    let json = serde_json::to_string_pretty(&catalog).expect("serialize desktop catalog");
    let generated = format!(
        "/// Build-time generated desktop catalog JSON.\n\
pub const DESKTOP_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("desktop_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
