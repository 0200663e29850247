//! Open-window set: at most one window per icon, positions clamped to the desktop boundary.

use thiserror::Error;

use crate::{
    icon_grid::IconLayout,
    model::{Boundary, IconId, OpenWindow, WindowId},
};

/// Base pixel offset for newly opened windows.
pub const CASCADE_ORIGIN: (i32, i32) = (40, 48);
/// Per-window cascade step in px.
pub const CASCADE_STEP: i32 = 20;
/// Number of cascade steps before the offset wraps.
pub const CASCADE_SLOTS: i32 = 8;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Window-manager failures. None of them are fatal to the shell.
pub enum WindowManagerError {
    /// An open was requested for an id the icon catalog does not know.
    #[error("no application registered for icon {0}")]
    UnknownApplication(IconId),
}

/// Result of a successful [`WindowManager::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened(WindowId),
    /// A window for this icon already exists; nothing changed.
    AlreadyOpen(WindowId),
}

/// Owned set of open windows in creation order. Creation order is also paint order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WindowManager {
    boundary: Boundary,
    windows: Vec<OpenWindow>,
}

impl WindowManager {
    pub fn new(boundary: Boundary) -> Self {
        Self {
            boundary,
            windows: Vec::new(),
        }
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Records new boundary dimensions. Windows are re-clamped on their next move.
    pub fn set_boundary(&mut self, boundary: Boundary) {
        self.boundary = boundary;
    }

    pub fn windows(&self) -> &[OpenWindow] {
        &self.windows
    }

    pub fn window(&self, window_id: WindowId) -> Option<&OpenWindow> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn is_open(&self, window_id: WindowId) -> bool {
        self.window(window_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Stacking order of `window_id`, starting at 1 for the earliest opened window.
    pub fn z_index(&self, window_id: WindowId) -> Option<u32> {
        self.windows
            .iter()
            .position(|w| w.id == window_id)
            .map(|idx| (idx + 1) as u32)
    }

    /// Opens the window for `icon_id`, seeded from its placement.
    ///
    /// Re-opening an already open icon is a no-op: the existing window is neither duplicated nor
    /// refocused.
    ///
    /// # Errors
    ///
    /// Returns [`WindowManagerError::UnknownApplication`] when `layout` has no icon `icon_id`.
    pub fn open(
        &mut self,
        layout: &IconLayout,
        icon_id: IconId,
    ) -> Result<OpenOutcome, WindowManagerError> {
        if self.is_open(icon_id) {
            return Ok(OpenOutcome::AlreadyOpen(icon_id));
        }
        let placement = layout
            .icon(icon_id)
            .ok_or(WindowManagerError::UnknownApplication(icon_id))?;

        let offset = (self.windows.len() as i32 % CASCADE_SLOTS) * CASCADE_STEP;
        let (screen_x, screen_y) = clamp_position(
            self.boundary,
            placement.default_width,
            placement.default_height,
            CASCADE_ORIGIN.0 + offset,
            CASCADE_ORIGIN.1 + offset,
        );
        self.windows.push(OpenWindow {
            id: placement.id,
            title: placement.display_name.clone(),
            application_route: placement.application_route.clone(),
            width: placement.default_width,
            height: placement.default_height,
            screen_x,
            screen_y,
        });
        Ok(OpenOutcome::Opened(icon_id))
    }

    /// Removes a window. Returns `false` when it was not open.
    pub fn close(&mut self, window_id: WindowId) -> bool {
        let before = self.windows.len();
        self.windows.retain(|w| w.id != window_id);
        self.windows.len() != before
    }

    /// Minimized windows are not kept around; this is the same as [`WindowManager::close`].
    pub fn minimize(&mut self, window_id: WindowId) -> bool {
        self.close(window_id)
    }

    /// Moves a window to the proposed position, clamped to the boundary.
    ///
    /// Returns the stored position, or `None` when the window is not open.
    pub fn move_to(&mut self, window_id: WindowId, x: i32, y: i32) -> Option<(i32, i32)> {
        let boundary = self.boundary;
        let window = self.windows.iter_mut().find(|w| w.id == window_id)?;
        let (x, y) = clamp_position(boundary, window.width, window.height, x, y);
        window.screen_x = x;
        window.screen_y = y;
        Some((x, y))
    }
}

/// Clamps a window origin so its rectangle stays inside `boundary`.
///
/// When the boundary is smaller than the window the floor of 0 wins and the window overflows to
/// the right/bottom.
pub fn clamp_position(boundary: Boundary, width: i32, height: i32, x: i32, y: i32) -> (i32, i32) {
    let max_x = boundary.width.saturating_sub(width).max(0);
    let max_y = boundary.height.saturating_sub(height).max(0);
    (x.clamp(0, max_x), y.clamp(0, max_y))
}
