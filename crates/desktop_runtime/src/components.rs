//! Desktop shell UI composition: wallpaper, icon grid, window layer, start menu, and the
//! fullscreen gate.

mod backdrop;
mod icon;
mod start_menu;
mod window;

use leptos::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use self::{
    backdrop::{FullscreenGate, WallpaperLayer},
    icon::DesktopIcon,
    start_menu::StartMenu,
    window::DesktopWindow,
};
use crate::{host_ui::WINDOW_BOUNDARY_DOM_ID, model::PointerPosition, reducer::DesktopAction};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Renders the desktop and its chrome, and routes pointer gestures to the reducer.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let grid_style = move || {
        let config = state.with(|desktop| desktop.layout.config());
        format!(
            "position:relative;width:{}px;",
            config.columns * config.cell_size
        )
    };
    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_pointer_event(&ev);
        let interaction = runtime.interaction.get_untracked();

        if interaction.icon_drag.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateIconDrag { pointer });
        }
        if interaction.window_drag.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateWindowMove { pointer });
        }
    };
    let on_pointer_end = move |_| end_active_pointer_interaction(runtime);

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            data-ui-kind="desktop-root"
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
            style="position:relative;min-height:100vh;"
        >
            <WallpaperLayer />
            <div
                id=WINDOW_BOUNDARY_DOM_ID
                class="window-boundary"
                data-ui-kind="window-boundary"
                style="position:relative;z-index:10;"
            >
                <div class="desktop-icon-grid" data-ui-kind="icon-grid" style=grid_style>
                    <For
                        each=move || state.with(|desktop| desktop.layout.icons().to_vec())
                        key=|icon| icon.id.0
                        let:icon
                    >
                        <DesktopIcon icon_id=icon.id />
                    </For>
                </div>

                <div class="desktop-window-layer" data-ui-kind="window-layer">
                    <For
                        each=move || state.with(|desktop| desktop.windows.windows().to_vec())
                        key=|win| win.id.0
                        let:win
                    >
                        <DesktopWindow window_id=win.id />
                    </For>
                </div>
            </div>
            <StartMenu />
            <FullscreenGate />
        </div>
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

/// Returns `true` for primary-button mouse presses and primary touch/pen contacts.
fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    let interaction = runtime.interaction.get_untracked();
    if interaction.icon_drag.is_some() {
        runtime.dispatch_action(DesktopAction::EndIconDrag);
    }
    if interaction.window_drag.is_some() {
        runtime.dispatch_action(DesktopAction::EndWindowMove);
    }
}
