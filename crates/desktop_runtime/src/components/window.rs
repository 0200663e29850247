use super::*;
use crate::{host_ui::window_dom_id, model::WindowId};

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    // Fixed for the window's lifetime; only position and stacking are reactive.
    let Some(win) = runtime
        .state
        .with_untracked(|desktop| desktop.windows.window(window_id).cloned())
    else {
        return ().into_view();
    };

    let (width, height) = (win.width, win.height);
    let style = move || {
        runtime.state.with(|desktop| {
            let windows = &desktop.windows;
            let (x, y) = windows
                .window(window_id)
                .map(|w| (w.screen_x, w.screen_y))
                .unwrap_or_default();
            format!(
                "position:absolute;left:0;top:0;width:{width}px;height:{height}px;transform:translate({x}px, {y}px);z-index:{};",
                1000 + windows.z_index(window_id).unwrap_or(0)
            )
        })
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginWindowMove {
            window_id,
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let minimize = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(DesktopAction::MinimizeWindow { window_id });
    };
    let close = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(DesktopAction::CloseWindow { window_id });
    };
    let keep_pointer = move |ev: web_sys::PointerEvent| {
        ev.prevent_default();
        ev.stop_propagation();
    };
    let frame_src = format!("/window/{}", win.application_route);

    view! {
        <section
            id=window_dom_id(window_id)
            class="desktop-window"
            data-ui-kind="window"
            style=style
            tabindex="-1"
            role="dialog"
            aria-label=win.title.clone()
        >
            <header class="titlebar" on:pointerdown=begin_move>
                <span class="titlebar-title">{win.title.clone()}</span>
                <div class="titlebar-controls">
                    <button
                        type="button"
                        class="titlebar-minimize"
                        aria-label="Minimize window"
                        on:pointerdown=keep_pointer
                        on:click=minimize
                    />
                    <button
                        type="button"
                        class="titlebar-close"
                        aria-label="Close window"
                        on:pointerdown=keep_pointer
                        on:click=close
                    />
                </div>
            </header>
            <iframe
                class="window-body"
                src=frame_src
                title=win.title
                style="border:0;width:100%;height:100%;"
            ></iframe>
        </section>
    }
    .into_view()
}
