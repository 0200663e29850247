//! Static launcher catalog generated at build time from `catalog/desktop.toml`.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    icon_grid::{IconLayout, LayoutError},
    model::{Boundary, DesktopState, GridCell, GridConfig, IconId, IconPlacement},
};

include!(concat!(env!("OUT_DIR"), "/desktop_catalog_generated.rs"));

pub const DESKTOP_CATALOG_SCHEMA_VERSION: u32 = 1;

/// One launcher record as it appears in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppCatalogEntry {
    pub id: u32,
    pub display_name: String,
    pub icon_glyph: String,
    pub grid_x: i32,
    pub grid_y: i32,
    pub application_route: String,
    pub default_width: i32,
    pub default_height: i32,
}

impl AppCatalogEntry {
    pub fn placement(&self) -> IconPlacement {
        IconPlacement {
            id: IconId(self.id),
            display_name: self.display_name.clone(),
            icon_glyph: self.icon_glyph.clone(),
            cell: GridCell::new(self.grid_x, self.grid_y),
            application_route: self.application_route.clone(),
            default_width: self.default_width,
            default_height: self.default_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopCatalog {
    pub schema_version: u32,
    pub grid: GridConfig,
    pub apps: Vec<AppCatalogEntry>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("desktop catalog parse failed: {0}")]
    Parse(String),
    #[error("desktop catalog schema mismatch: expected {expected} found {found}")]
    SchemaVersion { expected: u32, found: u32 },
    #[error("desktop catalog grid must have positive cell size and columns")]
    InvalidGrid,
    #[error("app {id} cell ({x}, {y}) is outside the grid")]
    OutOfGrid { id: u32, x: i32, y: i32 },
    #[error("app {0} has a non-positive window size")]
    InvalidWindowSize(u32),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl DesktopCatalog {
    /// Parses and validates a catalog JSON payload.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Self =
            serde_json::from_str(raw).map_err(|err| CatalogError::Parse(err.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.schema_version != DESKTOP_CATALOG_SCHEMA_VERSION {
            return Err(CatalogError::SchemaVersion {
                expected: DESKTOP_CATALOG_SCHEMA_VERSION,
                found: self.schema_version,
            });
        }
        if self.grid.cell_size <= 0 || self.grid.columns <= 0 {
            return Err(CatalogError::InvalidGrid);
        }
        for app in &self.apps {
            if app.grid_x < 0 || app.grid_y < 0 || app.grid_x >= self.grid.columns {
                return Err(CatalogError::OutOfGrid {
                    id: app.id,
                    x: app.grid_x,
                    y: app.grid_y,
                });
            }
            if app.default_width <= 0 || app.default_height <= 0 {
                return Err(CatalogError::InvalidWindowSize(app.id));
            }
        }
        self.layout().map(|_| ())
    }

    /// Builds the initial icon layout from the catalog records.
    pub fn layout(&self) -> Result<IconLayout, CatalogError> {
        let icons = self.apps.iter().map(AppCatalogEntry::placement).collect();
        Ok(IconLayout::new(self.grid, icons)?)
    }

    pub fn entry(&self, icon_id: IconId) -> Option<&AppCatalogEntry> {
        self.apps.iter().find(|app| app.id == icon_id.0)
    }

    pub fn entry_by_route(&self, route: &str) -> Option<&AppCatalogEntry> {
        self.apps.iter().find(|app| app.application_route == route)
    }
}

/// Returns the generated built-in catalog JSON payload.
pub fn builtin_catalog_json() -> &'static str {
    DESKTOP_CATALOG_JSON
}

/// Returns the built-in catalog, parsed once.
pub fn builtin_catalog() -> &'static DesktopCatalog {
    static CATALOG: OnceLock<DesktopCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        DesktopCatalog::from_json(DESKTOP_CATALOG_JSON)
            .expect("generated desktop catalog is validated by build.rs")
    })
}

impl DesktopState {
    /// Seeds shell state from `catalog` with no open windows.
    pub fn from_catalog(catalog: &DesktopCatalog, boundary: Boundary) -> Result<Self, CatalogError> {
        Ok(Self::new(catalog.layout()?, boundary))
    }
}
