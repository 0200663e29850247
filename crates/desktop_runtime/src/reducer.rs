//! Reducer actions, side-effect intents, and transition logic for the desktop shell.

use thiserror::Error;

use crate::{
    icon_grid::{restrict_delta, MoveOutcome},
    model::{
        saturate_px, Boundary, DesktopState, IconDragSession, IconId, InteractionState,
        PixelDelta, PointerPosition, PowerOverlay, Wallpaper, WindowDragSession, WindowId,
    },
    session::{RESTART_DELAY_MS, SLEEP_LOCK_MS},
    window_manager::{OpenOutcome, WindowManagerError},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Propose a grid move for an icon by a pixel displacement from its committed cell.
    ProposeIconMove {
        /// Icon being moved.
        icon_id: IconId,
        /// Displacement from the icon's committed cell origin.
        delta: PixelDelta,
    },
    /// Begin dragging a desktop icon.
    BeginIconDrag {
        /// Icon being dragged.
        icon_id: IconId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress icon drag.
    UpdateIconDrag {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active icon drag.
    EndIconDrag,
    /// Icon click. Ignored once right after a drag that moved the same icon.
    ActivateIcon {
        /// Clicked icon.
        icon_id: IconId,
    },
    /// Open the window bound to an icon.
    OpenWindow {
        /// Icon whose application should open.
        icon_id: IconId,
    },
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Minimize a window. Currently removes it exactly like [`DesktopAction::CloseWindow`].
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Move a window to an absolute position, clamped to the boundary.
    MoveWindow {
        /// Window to move.
        window_id: WindowId,
        /// Proposed left edge in px.
        x: i32,
        /// Proposed top edge in px.
        y: i32,
    },
    /// Begin dragging a window by its title bar.
    BeginWindowMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateWindowMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window drag.
    EndWindowMove,
    /// Record the measured window boundary.
    SetBoundary {
        /// Boundary dimensions in px.
        boundary: Boundary,
    },
    /// Show or hide the start menu.
    ToggleStartMenu,
    /// Blur the desktop behind the sleep overlay and lock it against activity for a while.
    Sleep,
    /// The sleep lock expired.
    SleepLockElapsed,
    /// Pointer, touch or scroll activity. Wakes an unlocked sleep overlay.
    UserActivity,
    /// Show the restart banner and reload the page shortly after.
    Restart,
    /// Black out the desktop for good.
    ShutDown,
    /// Replace the desktop wallpaper.
    SetWallpaper {
        /// Newly rolled wallpaper.
        wallpaper: Wallpaper,
    },
    /// Record whether the page is currently fullscreen.
    SetFullscreen {
        /// Fullscreen state reported by the host.
        active: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Move keyboard focus into a newly opened window.
    FocusWindow(WindowId),
    /// Dispatch [`DesktopAction::SleepLockElapsed`] once `after_ms` has passed.
    ScheduleSleepUnlock { after_ms: u32 },
    /// Reload the page once `after_ms` has passed.
    ReloadPage { after_ms: u32 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors. The runtime logs them; none abort the shell.
pub enum ReducerError {
    /// The icon id has no catalog entry.
    #[error("no application registered for icon {0}")]
    UnknownApplication(IconId),
    /// A drag was started for a window that is not open.
    #[error("window {0} not found")]
    WindowNotFound(WindowId),
}

impl From<WindowManagerError> for ReducerError {
    fn from(err: WindowManagerError) -> Self {
        match err {
            WindowManagerError::UnknownApplication(icon_id) => Self::UnknownApplication(icon_id),
        }
    }
}

/// Applies a [`DesktopAction`] to the shell state and collects resulting side effects.
///
/// Collision-rejected icon moves and close/minimize of windows that are not open are silent
/// no-ops, not errors.
///
/// # Errors
///
/// Returns [`ReducerError::UnknownApplication`] when an open references an id absent from the
/// catalog and [`ReducerError::WindowNotFound`] when a window drag starts on a closed window.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::ProposeIconMove { icon_id, delta } => {
            state.layout.propose_move(icon_id, delta);
        }
        DesktopAction::BeginIconDrag { icon_id, pointer } => {
            if let Some(icon) = state.layout.icon(icon_id) {
                interaction.icon_drag = Some(IconDragSession {
                    icon_id,
                    pointer_start: pointer,
                    origin: icon.cell,
                    moved: false,
                });
                interaction.suppress_icon_click = None;
            }
        }
        DesktopAction::UpdateIconDrag { pointer } => {
            if let Some(session) = interaction.icon_drag.as_mut() {
                if update_icon_drag(state, session, pointer).is_committed() {
                    session.moved = true;
                }
            }
        }
        DesktopAction::EndIconDrag => {
            if let Some(session) = interaction.icon_drag.take() {
                if session.moved {
                    interaction.suppress_icon_click = Some(session.icon_id);
                }
            }
        }
        DesktopAction::ActivateIcon { icon_id } => {
            if interaction.suppress_icon_click.take() == Some(icon_id) {
                return Ok(effects);
            }
            open_window(state, icon_id, &mut effects)?;
        }
        DesktopAction::OpenWindow { icon_id } => {
            open_window(state, icon_id, &mut effects)?;
        }
        DesktopAction::CloseWindow { window_id } => {
            state.windows.close(window_id);
            clear_window_drag(interaction, window_id);
        }
        DesktopAction::MinimizeWindow { window_id } => {
            state.windows.minimize(window_id);
            clear_window_drag(interaction, window_id);
        }
        DesktopAction::MoveWindow { window_id, x, y } => {
            state.windows.move_to(window_id, x, y);
        }
        DesktopAction::BeginWindowMove { window_id, pointer } => {
            let window = state
                .windows
                .window(window_id)
                .ok_or(ReducerError::WindowNotFound(window_id))?;
            interaction.window_drag = Some(WindowDragSession {
                window_id,
                pointer_start: pointer,
                origin_x: window.screen_x,
                origin_y: window.screen_y,
            });
        }
        DesktopAction::UpdateWindowMove { pointer } => {
            if let Some(session) = interaction.window_drag {
                let x = session
                    .origin_x
                    .saturating_add(pointer.x.saturating_sub(session.pointer_start.x));
                let y = session
                    .origin_y
                    .saturating_add(pointer.y.saturating_sub(session.pointer_start.y));
                if state.windows.move_to(session.window_id, x, y).is_none() {
                    interaction.window_drag = None;
                }
            }
        }
        DesktopAction::EndWindowMove => {
            interaction.window_drag = None;
        }
        DesktopAction::SetBoundary { boundary } => {
            state.windows.set_boundary(boundary);
        }
        DesktopAction::ToggleStartMenu => {
            state.session.start_menu_open = !state.session.start_menu_open;
        }
        DesktopAction::Sleep => {
            if powered_on(state) {
                state.session.overlay = Some(PowerOverlay::Sleep);
                state.session.sleep_locked = true;
                effects.push(RuntimeEffect::ScheduleSleepUnlock {
                    after_ms: SLEEP_LOCK_MS,
                });
            }
        }
        DesktopAction::SleepLockElapsed => {
            state.session.sleep_locked = false;
        }
        DesktopAction::UserActivity => {
            if state.session.overlay == Some(PowerOverlay::Sleep) && !state.session.sleep_locked {
                state.session.overlay = None;
            }
        }
        DesktopAction::Restart => {
            if powered_on(state) {
                state.session.overlay = Some(PowerOverlay::Restarting);
                effects.push(RuntimeEffect::ReloadPage {
                    after_ms: RESTART_DELAY_MS,
                });
            }
        }
        DesktopAction::ShutDown => {
            if powered_on(state) {
                state.session.overlay = Some(PowerOverlay::ShutDown);
            }
        }
        DesktopAction::SetWallpaper { wallpaper } => {
            state.session.wallpaper = Some(wallpaper);
        }
        DesktopAction::SetFullscreen { active } => {
            state.session.fullscreen = active;
        }
    }

    Ok(effects)
}

fn open_window(
    state: &mut DesktopState,
    icon_id: IconId,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    if let OpenOutcome::Opened(window_id) = state.windows.open(&state.layout, icon_id)? {
        effects.push(RuntimeEffect::FocusWindow(window_id));
    }
    Ok(())
}

/// Proposes the move implied by the pointer's total travel since the drag started.
///
/// The gesture is measured from the drag origin cell, restricted to the icon container, then
/// re-expressed relative to the icon's current committed cell.
fn update_icon_drag(
    state: &mut DesktopState,
    session: &IconDragSession,
    pointer: PointerPosition,
) -> MoveOutcome {
    let config = state.layout.config();
    let Some(current) = state.layout.icon(session.icon_id).map(|icon| icon.cell) else {
        return MoveOutcome::UnknownIcon;
    };

    let travel = restrict_delta(
        config,
        session.origin,
        PixelDelta::new(
            pointer.x.saturating_sub(session.pointer_start.x),
            pointer.y.saturating_sub(session.pointer_start.y),
        ),
    );
    let (origin_x, origin_y) = config.cell_origin_px(session.origin);
    let (current_x, current_y) = config.cell_origin_px(current);
    let delta = PixelDelta::new(
        saturate_px(origin_x + i64::from(travel.dx) - current_x),
        saturate_px(origin_y + i64::from(travel.dy) - current_y),
    );
    state.layout.propose_move(session.icon_id, delta)
}

/// Restart and shutdown are terminal; power buttons do nothing once either is underway.
fn powered_on(state: &DesktopState) -> bool {
    !matches!(
        state.session.overlay,
        Some(PowerOverlay::Restarting | PowerOverlay::ShutDown)
    )
}

fn clear_window_drag(interaction: &mut InteractionState, window_id: WindowId) {
    if interaction
        .window_drag
        .is_some_and(|session| session.window_id == window_id)
    {
        interaction.window_drag = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        icon_grid::IconLayout,
        model::{GridCell, GridConfig, IconPlacement},
    };

    fn state() -> DesktopState {
        let icons = [(1, 0, 0), (2, 2, 0), (3, 0, 1)]
            .into_iter()
            .map(|(id, x, y)| IconPlacement {
                id: IconId(id),
                display_name: format!("App {id}"),
                icon_glyph: "mdi:application".to_string(),
                cell: GridCell::new(x, y),
                application_route: format!("app-{id}"),
                default_width: 400,
                default_height: 300,
            })
            .collect();
        DesktopState::new(
            IconLayout::new(GridConfig::default(), icons).expect("valid layout"),
            Boundary {
                width: 1000,
                height: 700,
            },
        )
    }

    fn dispatch(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        action: DesktopAction,
    ) -> Vec<RuntimeEffect> {
        reduce_desktop(state, interaction, action).expect("reduce")
    }

    fn cell(state: &DesktopState, id: u32) -> GridCell {
        state.layout.icon(IconId(id)).expect("icon").cell
    }

    #[test]
    fn opening_emits_focus_once() {
        let mut state = state();
        let mut interaction = InteractionState::default();

        let first = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow { icon_id: IconId(3) },
        );
        let second = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow { icon_id: IconId(3) },
        );

        assert_eq!(first, vec![RuntimeEffect::FocusWindow(IconId(3))]);
        assert!(second.is_empty());
        assert_eq!(state.windows.len(), 1);
    }

    #[test]
    fn opening_unknown_icon_is_reported() {
        let mut state = state();
        let mut interaction = InteractionState::default();
        let before = state.clone();

        let err = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow {
                icon_id: IconId(77),
            },
        )
        .expect_err("unknown app");

        assert_eq!(err, ReducerError::UnknownApplication(IconId(77)));
        assert_eq!(state, before);
    }

    #[test]
    fn closing_missing_window_is_noop() {
        let mut state = state();
        let mut interaction = InteractionState::default();
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow { icon_id: IconId(1) },
        );

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow {
                window_id: IconId(2),
            },
        );

        assert_eq!(state.windows.len(), 1);
    }

    #[test]
    fn icon_drag_commits_along_the_way_and_suppresses_click() {
        let mut state = state();
        let mut interaction = InteractionState::default();

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginIconDrag {
                icon_id: IconId(3),
                pointer: PointerPosition { x: 50, y: 150 },
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateIconDrag {
                pointer: PointerPosition { x: 160, y: 150 },
            },
        );
        assert_eq!(cell(&state, 3), GridCell::new(1, 1));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateIconDrag {
                pointer: PointerPosition { x: 250, y: 360 },
            },
        );
        assert_eq!(cell(&state, 3), GridCell::new(2, 3));

        dispatch(&mut state, &mut interaction, DesktopAction::EndIconDrag);
        assert_eq!(interaction.icon_drag, None);

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::ActivateIcon { icon_id: IconId(3) },
        );
        assert!(effects.is_empty());
        assert!(state.windows.is_empty());

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::ActivateIcon { icon_id: IconId(3) },
        );
        assert!(state.windows.is_open(IconId(3)));
    }

    #[test]
    fn icon_drag_over_occupied_cell_keeps_last_committed_cell() {
        let mut state = state();
        let mut interaction = InteractionState::default();

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginIconDrag {
                icon_id: IconId(1),
                pointer: PointerPosition { x: 0, y: 0 },
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateIconDrag {
                pointer: PointerPosition { x: 199, y: 4 },
            },
        );
        assert_eq!(cell(&state, 1), GridCell::new(0, 0));

        dispatch(&mut state, &mut interaction, DesktopAction::EndIconDrag);
        assert_eq!(interaction.suppress_icon_click, None);
    }

    #[test]
    fn icon_drag_is_restricted_to_container() {
        let mut state = state();
        let mut interaction = InteractionState::default();

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginIconDrag {
                icon_id: IconId(2),
                pointer: PointerPosition { x: 250, y: 50 },
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateIconDrag {
                pointer: PointerPosition { x: 5000, y: -400 },
            },
        );

        assert_eq!(cell(&state, 2), GridCell::new(7, 0));
    }

    #[test]
    fn window_drag_clamps_to_boundary() {
        let mut state = state();
        let mut interaction = InteractionState::default();
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow { icon_id: IconId(1) },
        );

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginWindowMove {
                window_id: IconId(1),
                pointer: PointerPosition { x: 100, y: 100 },
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateWindowMove {
                pointer: PointerPosition { x: 130, y: 90 },
            },
        );
        let window = state.windows.window(IconId(1)).expect("window");
        assert_eq!((window.screen_x, window.screen_y), (70, 38));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateWindowMove {
                pointer: PointerPosition { x: -900, y: 4000 },
            },
        );
        let window = state.windows.window(IconId(1)).expect("window");
        assert_eq!((window.screen_x, window.screen_y), (0, 400));

        dispatch(&mut state, &mut interaction, DesktopAction::EndWindowMove);
        assert_eq!(interaction.window_drag, None);
    }

    #[test]
    fn closing_dragged_window_ends_drag() {
        let mut state = state();
        let mut interaction = InteractionState::default();
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow { icon_id: IconId(2) },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginWindowMove {
                window_id: IconId(2),
                pointer: PointerPosition { x: 0, y: 0 },
            },
        );

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow {
                window_id: IconId(2),
            },
        );

        assert_eq!(interaction.window_drag, None);
        assert!(state.windows.is_empty());
    }

    #[test]
    fn window_drag_requires_open_window() {
        let mut state = state();
        let mut interaction = InteractionState::default();

        let err = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginWindowMove {
                window_id: IconId(1),
                pointer: PointerPosition { x: 0, y: 0 },
            },
        )
        .expect_err("closed window");

        assert_eq!(err, ReducerError::WindowNotFound(IconId(1)));
    }

    #[test]
    fn start_menu_toggles() {
        let mut state = state();
        let mut interaction = InteractionState::default();

        dispatch(&mut state, &mut interaction, DesktopAction::ToggleStartMenu);
        assert!(state.session.start_menu_open);

        dispatch(&mut state, &mut interaction, DesktopAction::ToggleStartMenu);
        assert!(!state.session.start_menu_open);
    }

    #[test]
    fn sleep_ignores_activity_until_lock_elapses() {
        let mut state = state();
        let mut interaction = InteractionState::default();

        let effects = dispatch(&mut state, &mut interaction, DesktopAction::Sleep);
        assert_eq!(
            effects,
            vec![RuntimeEffect::ScheduleSleepUnlock {
                after_ms: SLEEP_LOCK_MS
            }]
        );
        assert_eq!(state.session.overlay, Some(PowerOverlay::Sleep));

        dispatch(&mut state, &mut interaction, DesktopAction::UserActivity);
        assert_eq!(state.session.overlay, Some(PowerOverlay::Sleep));

        dispatch(&mut state, &mut interaction, DesktopAction::SleepLockElapsed);
        dispatch(&mut state, &mut interaction, DesktopAction::UserActivity);
        assert_eq!(state.session.overlay, None);
        assert!(!state.session.sleep_locked);
    }

    #[test]
    fn restart_reloads_and_shutdown_is_final() {
        let mut interaction = InteractionState::default();

        let mut restarting = state();
        let effects = dispatch(&mut restarting, &mut interaction, DesktopAction::Restart);
        assert_eq!(
            effects,
            vec![RuntimeEffect::ReloadPage {
                after_ms: RESTART_DELAY_MS
            }]
        );
        assert_eq!(restarting.session.overlay, Some(PowerOverlay::Restarting));

        let mut halted = state();
        dispatch(&mut halted, &mut interaction, DesktopAction::ShutDown);
        let effects = dispatch(&mut halted, &mut interaction, DesktopAction::Sleep);
        dispatch(&mut halted, &mut interaction, DesktopAction::UserActivity);

        assert!(effects.is_empty());
        assert_eq!(halted.session.overlay, Some(PowerOverlay::ShutDown));
    }

    #[test]
    fn wallpaper_and_fullscreen_are_recorded() {
        let mut state = state();
        let mut interaction = InteractionState::default();
        let wallpaper = Wallpaper::from_sample(0.5, 42);

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::SetWallpaper {
                wallpaper: wallpaper.clone(),
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::SetFullscreen { active: true },
        );

        assert_eq!(state.session.wallpaper, Some(wallpaper));
        assert!(state.session.fullscreen);
    }

    #[test]
    fn extreme_window_drag_pointers_stay_clamped() {
        let mut state = state();
        let mut interaction = InteractionState::default();
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow { icon_id: IconId(1) },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginWindowMove {
                window_id: IconId(1),
                pointer: PointerPosition {
                    x: i32::MIN,
                    y: i32::MAX,
                },
            },
        );

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateWindowMove {
                pointer: PointerPosition {
                    x: i32::MAX,
                    y: i32::MIN,
                },
            },
        );

        let window = state.windows.window(IconId(1)).expect("window");
        assert_eq!((window.screen_x, window.screen_y), (600, 0));
    }
}
