//! Browser-side measurement and focus helpers used by the shell runtime.

#[cfg(target_arch = "wasm32")]
use std::time::Duration;

use leptos::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[cfg(target_arch = "wasm32")]
use crate::model::Wallpaper;
use crate::{
    model::{Boundary, WindowId},
    reducer::DesktopAction,
    runtime_context::DesktopRuntimeContext,
    session::{FULLSCREEN_CHANGE_EVENTS, WALLPAPER_CHANGE_EVENT},
};

/// DOM id of the element windows are dragged within.
pub const WINDOW_BOUNDARY_DOM_ID: &str = "desktop-window-boundary";

/// DOM id of the element hosting window `window_id`.
pub fn window_dom_id(window_id: WindowId) -> String {
    format!("desktop-window-{}", window_id.0)
}

/// Measures the window boundary element, falling back to the viewport and then to defaults.
pub(crate) fn measure_boundary() -> Boundary {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let element = window
                .document()
                .and_then(|document| document.get_element_by_id(WINDOW_BOUNDARY_DOM_ID));
            if let Some(element) = element {
                let (width, height) = (element.client_width(), element.client_height());
                if width > 0 && height > 0 {
                    return Boundary { width, height };
                }
            }

            let defaults = Boundary::default();
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(defaults.width);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(defaults.height);
            return Boundary { width, height };
        }
    }

    Boundary::default()
}

/// Dispatches the measured boundary after first paint and on every viewport resize.
pub(crate) fn install_boundary_tracking(runtime: DesktopRuntimeContext) {
    request_animation_frame(move || {
        runtime.dispatch_action(DesktopAction::SetBoundary {
            boundary: measure_boundary(),
        });
    });

    let resize_listener = window_event_listener(ev::resize, move |_| {
        runtime.dispatch_action(DesktopAction::SetBoundary {
            boundary: measure_boundary(),
        });
    });
    on_cleanup(move || resize_listener.remove());
}

/// Focuses the window element once the current render pass has flushed.
pub(crate) fn focus_window_element(window_id: WindowId) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let dom_id = window_dom_id(window_id);
        let callback = Closure::once_into_js(move || {
            let element = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(&dom_id))
                .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok());
            match element {
                Some(element) => {
                    let _ = element.focus();
                }
                None => logging::warn!("window element `{dom_id}` missing for focus"),
            }
        });
        let _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = window_id;
}

/// Reports whether the page is fullscreen, via the fullscreen element or a screen-sized viewport.
fn measure_fullscreen() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let has_element = window
                .document()
                .and_then(|document| document.fullscreen_element())
                .is_some();
            let viewport = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .zip(window.inner_height().ok().and_then(|value| value.as_f64()))
                .map(|(width, height)| (width as i32, height as i32));
            let screen = window
                .screen()
                .ok()
                .and_then(|screen| Some((screen.width().ok()?, screen.height().ok()?)));
            return crate::session::is_fullscreen(has_element, viewport, screen);
        }
    }

    false
}

/// Dispatches the fullscreen state now and on every resize or fullscreen transition.
pub(crate) fn install_fullscreen_tracking(runtime: DesktopRuntimeContext) {
    let sync = move || {
        runtime.dispatch_action(DesktopAction::SetFullscreen {
            active: measure_fullscreen(),
        });
    };
    sync();

    let mut listeners = vec![window_event_listener(ev::resize, move |_| sync())];
    listeners.extend(
        FULLSCREEN_CHANGE_EVENTS
            .into_iter()
            .map(|event| window_event_listener_untyped(event, move |_| sync())),
    );
    on_cleanup(move || {
        for listener in listeners {
            listener.remove();
        }
    });
}

/// Rolls a wallpaper now and again on every `wallpaper:change` window event.
pub(crate) fn install_wallpaper_rolls(runtime: DesktopRuntimeContext) {
    roll_wallpaper(runtime);

    let listener = window_event_listener_untyped(WALLPAPER_CHANGE_EVENT, move |_| {
        roll_wallpaper(runtime);
    });
    on_cleanup(move || listener.remove());
}

fn roll_wallpaper(runtime: DesktopRuntimeContext) {
    #[cfg(target_arch = "wasm32")]
    runtime.dispatch_action(DesktopAction::SetWallpaper {
        wallpaper: Wallpaper::from_sample(js_sys::Math::random(), js_sys::Date::now() as u64),
    });
    #[cfg(not(target_arch = "wasm32"))]
    let _ = runtime;
}

pub(crate) fn schedule_sleep_unlock(runtime: DesktopRuntimeContext, after_ms: u32) {
    #[cfg(target_arch = "wasm32")]
    set_timeout(
        move || runtime.dispatch_action(DesktopAction::SleepLockElapsed),
        Duration::from_millis(u64::from(after_ms)),
    );
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (runtime, after_ms);
}

pub(crate) fn reload_page_after(after_ms: u32) {
    #[cfg(target_arch = "wasm32")]
    set_timeout(
        || {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.location().reload() {
                    logging::warn!("page reload failed: {err:?}");
                }
            }
        },
        Duration::from_millis(u64::from(after_ms)),
    );
    #[cfg(not(target_arch = "wasm32"))]
    let _ = after_ms;
}
