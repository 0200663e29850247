use desktop_runtime::{
    builtin_catalog, reduce_desktop, Boundary, DesktopAction, DesktopState, GridCell, GridConfig,
    IconId, IconLayout, IconPlacement, InteractionState, MoveOutcome, PixelDelta,
    PointerPosition,
};

fn placement(id: u32, x: i32, y: i32) -> IconPlacement {
    IconPlacement {
        id: IconId(id),
        display_name: format!("App {id}"),
        icon_glyph: "mdi:application".to_string(),
        cell: GridCell::new(x, y),
        application_route: format!("app-{id}"),
        default_width: 420,
        default_height: 320,
    }
}

fn catalog_state() -> DesktopState {
    DesktopState::from_catalog(
        builtin_catalog(),
        Boundary {
            width: 1280,
            height: 800,
        },
    )
    .expect("builtin catalog seeds state")
}

#[test]
fn drag_onto_occupied_cell_on_eight_column_grid_is_rejected() {
    let config = GridConfig {
        cell_size: 100,
        columns: 8,
    };
    let mut layout = IconLayout::new(config, vec![placement(1, 0, 0), placement(2, 2, 0)])
        .expect("valid layout");

    let outcome = layout.propose_move(IconId(1), PixelDelta::new(199, 4));

    assert!(matches!(outcome, MoveOutcome::Rejected { .. }));
    assert_eq!(
        layout.icon(IconId(1)).map(|icon| icon.cell),
        Some(GridCell::new(0, 0))
    );
    assert_eq!(
        layout.icon(IconId(2)).map(|icon| icon.cell),
        Some(GridCell::new(2, 0))
    );
}

#[test]
fn no_two_icons_ever_share_a_cell() {
    let mut state = catalog_state();
    let mut interaction = InteractionState::default();
    let ids: Vec<IconId> = state.layout.icons().iter().map(|icon| icon.id).collect();

    let mut seed: u32 = 0x2545_f491;
    for _ in 0..500 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let icon_id = ids[(seed >> 16) as usize % ids.len()];
        let dx = ((seed >> 4) % 601) as i32 - 300;
        let dy = ((seed >> 10) % 601) as i32 - 300;

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ProposeIconMove {
                icon_id,
                delta: PixelDelta::new(dx, dy),
            },
        )
        .expect("icon moves never fail");

        assert!(state.layout.has_unique_cells());
    }
}

#[test]
fn clicking_an_open_icon_keeps_a_single_window() {
    let mut state = catalog_state();
    let mut interaction = InteractionState::default();
    let expected_title = builtin_catalog()
        .entry(IconId(3))
        .map(|entry| entry.display_name.clone())
        .expect("catalog has icon 3");

    for _ in 0..2 {
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ActivateIcon { icon_id: IconId(3) },
        )
        .expect("open");
    }

    let windows = state.windows.windows();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].id, IconId(3));
    assert_eq!(windows[0].title, expected_title);
}

#[test]
fn closing_a_window_that_is_not_open_changes_nothing() {
    let mut state = catalog_state();
    let mut interaction = InteractionState::default();
    reduce_desktop(
        &mut state,
        &mut interaction,
        DesktopAction::OpenWindow { icon_id: IconId(1) },
    )
    .expect("open");
    let before = state.windows.len();

    reduce_desktop(
        &mut state,
        &mut interaction,
        DesktopAction::CloseWindow {
            window_id: IconId(5),
        },
    )
    .expect("close is a no-op");

    assert_eq!(state.windows.len(), before);
}

#[test]
fn window_moves_always_land_inside_the_boundary() {
    let mut state = catalog_state();
    let mut interaction = InteractionState::default();
    reduce_desktop(
        &mut state,
        &mut interaction,
        DesktopAction::OpenWindow { icon_id: IconId(2) },
    )
    .expect("open");
    let boundary = state.windows.boundary();

    for (x, y) in [
        (-10_000, -10_000),
        (10_000, 10_000),
        (-1, 5_000),
        (640, 400),
        (i32::MIN, i32::MAX),
        (i32::MAX, i32::MIN),
    ] {
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MoveWindow {
                window_id: IconId(2),
                x,
                y,
            },
        )
        .expect("move");

        let window = state.windows.window(IconId(2)).expect("window stays open");
        assert!(window.screen_x >= 0 && window.screen_x <= boundary.width - window.width);
        assert!(window.screen_y >= 0 && window.screen_y <= boundary.height - window.height);
    }
}

#[test]
fn windows_larger_than_the_boundary_pin_to_the_origin() {
    let mut state = catalog_state();
    let mut interaction = InteractionState::default();
    reduce_desktop(
        &mut state,
        &mut interaction,
        DesktopAction::OpenWindow { icon_id: IconId(4) },
    )
    .expect("open");
    reduce_desktop(
        &mut state,
        &mut interaction,
        DesktopAction::SetBoundary {
            boundary: Boundary {
                width: 120,
                height: 90,
            },
        },
    )
    .expect("resize");

    for (x, y) in [(0, 0), (55, 40), (-300, 900), (i32::MAX, i32::MAX), (i32::MIN, i32::MIN)] {
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MoveWindow {
                window_id: IconId(4),
                x,
                y,
            },
        )
        .expect("move");

        let window = state.windows.window(IconId(4)).expect("window stays open");
        assert!(window.width > 120 && window.height > 90);
        assert_eq!((window.screen_x, window.screen_y), (0, 0));
    }
}

#[test]
fn extreme_icon_displacements_never_break_the_grid() {
    let mut state = catalog_state();
    let mut interaction = InteractionState::default();
    let moves = [
        (IconId(6), PixelDelta::new(i32::MAX, i32::MIN)),
        (IconId(6), PixelDelta::new(i32::MAX - 50, 0)),
        (IconId(9), PixelDelta::new(i32::MIN, i32::MAX)),
        (IconId(2), PixelDelta::new(i32::MAX, i32::MAX)),
    ];

    for (icon_id, delta) in moves {
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ProposeIconMove { icon_id, delta },
        )
        .expect("icon moves never fail");
        assert!(state.layout.has_unique_cells());
    }

    reduce_desktop(
        &mut state,
        &mut interaction,
        DesktopAction::BeginIconDrag {
            icon_id: IconId(5),
            pointer: PointerPosition {
                x: i32::MIN,
                y: i32::MAX,
            },
        },
    )
    .expect("begin drag");
    reduce_desktop(
        &mut state,
        &mut interaction,
        DesktopAction::UpdateIconDrag {
            pointer: PointerPosition {
                x: i32::MAX,
                y: i32::MIN,
            },
        },
    )
    .expect("update drag");

    let cell = state.layout.icon(IconId(5)).map(|icon| icon.cell);
    assert_eq!(cell, Some(GridCell::new(7, 0)));
    assert!(state.layout.has_unique_cells());
}
