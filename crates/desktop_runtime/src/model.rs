use serde::{Deserialize, Serialize};

use crate::{icon_grid::IconLayout, window_manager::WindowManager};

pub const DEFAULT_CELL_SIZE: i32 = 100;
pub const DEFAULT_GRID_COLUMNS: i32 = 8;
pub const DEFAULT_BOUNDARY_WIDTH: i32 = 1024;
pub const DEFAULT_BOUNDARY_HEIGHT: i32 = 768;

/// Stable launcher identifier. Windows reuse the id of the icon that opened them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IconId(pub u32);

/// Open windows are keyed by the id of their originating icon.
pub type WindowId = IconId;

impl std::fmt::Display for IconId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelDelta {
    pub dx: i32,
    pub dy: i32,
}

impl PixelDelta {
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub cell_size: i32,
    pub columns: i32,
}

impl GridConfig {
    /// Top-left pixel offset of `cell` within the icon container.
    ///
    /// Widened to `i64` so any cell and cell size can be combined with any `i32` displacement.
    pub fn cell_origin_px(self, cell: GridCell) -> (i64, i64) {
        let size = i64::from(self.cell_size);
        (i64::from(cell.x) * size, i64::from(cell.y) * size)
    }

    pub fn is_valid(self) -> bool {
        self.cell_size > 0 && self.columns > 0
    }
}

/// Narrows a widened pixel value back to `i32`, saturating at the bounds.
pub(crate) fn saturate_px(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            columns: DEFAULT_GRID_COLUMNS,
        }
    }
}

/// Pixel size of the area windows may be dragged within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boundary {
    pub width: i32,
    pub height: i32,
}

impl Default for Boundary {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOUNDARY_WIDTH,
            height: DEFAULT_BOUNDARY_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconPlacement {
    pub id: IconId,
    pub display_name: String,
    pub icon_glyph: String,
    pub cell: GridCell,
    pub application_route: String,
    pub default_width: i32,
    pub default_height: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenWindow {
    pub id: WindowId,
    pub title: String,
    pub application_route: String,
    pub width: i32,
    pub height: i32,
    pub screen_x: i32,
    pub screen_y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconDragSession {
    pub icon_id: IconId,
    pub pointer_start: PointerPosition,
    pub origin: GridCell,
    pub moved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub origin_x: i32,
    pub origin_y: i32,
}

/// Transient pointer state that never outlives a single gesture.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub icon_drag: Option<IconDragSession>,
    pub window_drag: Option<WindowDragSession>,
    /// Set when an icon drag moved the icon so the trailing click does not open it.
    pub suppress_icon_click: Option<IconId>,
}

/// Full-screen overlay raised from the start menu's power buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerOverlay {
    /// Blurred backdrop, dismissed by user activity once the sleep lock lapses.
    Sleep,
    /// "Restarting..." banner shown until the page reloads.
    Restarting,
    /// Solid black screen with no way back.
    ShutDown,
}

/// Randomized remote wallpaper image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallpaper {
    pub seed: String,
    pub cache_bust: u64,
}

/// Shell chrome around the desktop: start menu, power overlays, wallpaper and fullscreen gate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub start_menu_open: bool,
    pub overlay: Option<PowerOverlay>,
    /// While set, activity does not dismiss the sleep overlay.
    pub sleep_locked: bool,
    /// `None` until the first wallpaper roll.
    pub wallpaper: Option<Wallpaper>,
    /// The desktop is hidden behind the access gate while this is `false`.
    pub fullscreen: bool,
}

/// Shell state: the icon layout and the open-window set, each owned by its own component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DesktopState {
    pub layout: IconLayout,
    pub windows: WindowManager,
    pub session: SessionState,
}

impl DesktopState {
    pub fn new(layout: IconLayout, boundary: Boundary) -> Self {
        Self {
            layout,
            windows: WindowManager::new(boundary),
            session: SessionState::default(),
        }
    }
}
