//! Desktop icon layout engine: grid snapping and single-cell collision checks for icon drags.

use std::collections::HashSet;

use thiserror::Error;

use crate::model::{saturate_px, GridCell, GridConfig, IconId, IconPlacement, PixelDelta};

/// Result of evaluating a proposed icon move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The icon moved from `from` to `to`.
    Committed { from: GridCell, to: GridCell },
    /// The snapped cell is the icon's current cell.
    Unchanged,
    /// The snapped cell belongs to another icon; the icon stays put.
    Rejected { target: GridCell, occupied_by: IconId },
    /// No icon with the requested id exists.
    UnknownIcon,
}

impl MoveOutcome {
    pub fn is_committed(self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors raised when seeding a layout with placements that break its invariants.
pub enum LayoutError {
    #[error("grid cell size {cell_size} and column count {columns} must both be positive")]
    InvalidGrid { cell_size: i32, columns: i32 },
    #[error("icon id {0} appears more than once")]
    DuplicateIconId(IconId),
    #[error("icons {first} and {second} share grid cell ({}, {})", .cell.x, .cell.y)]
    DuplicateCell {
        first: IconId,
        second: IconId,
        cell: GridCell,
    },
}

/// Owned icon placements on a fixed grid.
///
/// Positions change only through [`IconLayout::propose_move`], which keeps every icon in a cell
/// of its own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IconLayout {
    config: GridConfig,
    icons: Vec<IconPlacement>,
}

impl IconLayout {
    /// Builds a layout, rejecting a degenerate grid, duplicate ids and shared cells.
    pub fn new(config: GridConfig, icons: Vec<IconPlacement>) -> Result<Self, LayoutError> {
        if !config.is_valid() {
            return Err(LayoutError::InvalidGrid {
                cell_size: config.cell_size,
                columns: config.columns,
            });
        }
        let mut ids = HashSet::new();
        for icon in &icons {
            if !ids.insert(icon.id) {
                return Err(LayoutError::DuplicateIconId(icon.id));
            }
        }
        for (idx, icon) in icons.iter().enumerate() {
            if let Some(other) = icons[..idx].iter().find(|other| other.cell == icon.cell) {
                return Err(LayoutError::DuplicateCell {
                    first: other.id,
                    second: icon.id,
                    cell: icon.cell,
                });
            }
        }
        Ok(Self { config, icons })
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    pub fn icons(&self) -> &[IconPlacement] {
        &self.icons
    }

    pub fn icon(&self, icon_id: IconId) -> Option<&IconPlacement> {
        self.icons.iter().find(|icon| icon.id == icon_id)
    }

    /// Returns the icon occupying `cell`, if any.
    pub fn occupant(&self, cell: GridCell) -> Option<IconId> {
        self.icons
            .iter()
            .find(|icon| icon.cell == cell)
            .map(|icon| icon.id)
    }

    /// Returns the id of an icon other than `icon_id` that occupies `cell`.
    pub fn occupied_by_other(&self, cell: GridCell, icon_id: IconId) -> Option<IconId> {
        self.icons
            .iter()
            .find(|icon| icon.id != icon_id && icon.cell == cell)
            .map(|icon| icon.id)
    }

    pub fn has_unique_cells(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.icons.len());
        self.icons.iter().all(|icon| seen.insert(icon.cell))
    }

    /// Evaluates and, when the target cell is free, commits a drag move.
    pub fn propose_move(&mut self, icon_id: IconId, delta: PixelDelta) -> MoveOutcome {
        let outcome = evaluate_move(self, icon_id, delta);
        if let MoveOutcome::Committed { to, .. } = outcome {
            if let Some(icon) = self.icons.iter_mut().find(|icon| icon.id == icon_id) {
                icon.cell = to;
            }
        }
        outcome
    }
}

/// Snaps a pixel displacement from `origin` to the nearest grid cell.
///
/// Halfway points round away from zero. Results beyond the `i32` range saturate.
pub fn snap_to_cell(config: GridConfig, origin: GridCell, delta: PixelDelta) -> GridCell {
    let (origin_x, origin_y) = config.cell_origin_px(origin);
    let cell = f64::from(config.cell_size);
    let snap =
        |origin: i64, delta: i32| ((origin + i64::from(delta)) as f64 / cell).round() as i32;
    GridCell {
        x: snap(origin_x, delta.dx),
        y: snap(origin_y, delta.dy),
    }
}

/// Evaluates a proposed move without mutating the layout.
pub fn evaluate_move(layout: &IconLayout, icon_id: IconId, delta: PixelDelta) -> MoveOutcome {
    let Some(icon) = layout.icon(icon_id) else {
        return MoveOutcome::UnknownIcon;
    };

    let target = snap_to_cell(layout.config, icon.cell, delta);
    if target == icon.cell {
        return MoveOutcome::Unchanged;
    }
    if let Some(occupied_by) = layout.occupied_by_other(target, icon_id) {
        return MoveOutcome::Rejected {
            target,
            occupied_by,
        };
    }

    MoveOutcome::Committed {
        from: icon.cell,
        to: target,
    }
}

/// Restricts a drag displacement so the dragged icon stays inside the icon container.
///
/// The container spans `columns` cells horizontally and grows downward without limit, so the
/// icon's pixel position is kept within `[0, (columns - 1) * cell_size] x [0, inf)`.
pub fn restrict_delta(config: GridConfig, origin: GridCell, delta: PixelDelta) -> PixelDelta {
    let (origin_x, origin_y) = config.cell_origin_px(origin);
    let max_x = i64::from(config.columns.saturating_sub(1).max(0))
        * i64::from(config.cell_size.max(0));
    let x = (origin_x + i64::from(delta.dx)).clamp(0, max_x);
    let y = (origin_y + i64::from(delta.dy)).max(0);
    PixelDelta {
        dx: saturate_px(x - origin_x),
        dy: saturate_px(y - origin_y),
    }
}
