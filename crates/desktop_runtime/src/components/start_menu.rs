use super::*;
use crate::{model::PowerOverlay, session::is_start_menu_chord};

#[component]
pub(super) fn StartMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();

    let shortcut_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() {
            return;
        }
        if is_start_menu_chord(&ev.key(), ev.ctrl_key(), ev.meta_key()) {
            runtime.dispatch_action(DesktopAction::ToggleStartMenu);
        }
    });
    on_cleanup(move || shortcut_listener.remove());

    let wake = move || {
        let can_wake = runtime.state.with_untracked(|desktop| {
            desktop.session.overlay == Some(PowerOverlay::Sleep) && !desktop.session.sleep_locked
        });
        if can_wake {
            runtime.dispatch_action(DesktopAction::UserActivity);
        }
    };
    let activity_listeners = [
        window_event_listener(ev::mousemove, move |_| wake()),
        window_event_listener(ev::click, move |_| wake()),
        window_event_listener(ev::scroll, move |_| wake()),
        window_event_listener(ev::touchstart, move |_| wake()),
    ];
    on_cleanup(move || {
        for listener in activity_listeners {
            listener.remove();
        }
    });

    let menu_open = move || runtime.state.with(|desktop| desktop.session.start_menu_open);
    let overlay = move || runtime.state.with(|desktop| desktop.session.overlay);

    view! {
        <Show when=menu_open>
            <div
                id="desktop-start-menu"
                class="start-menu"
                role="menu"
                data-ui-kind="start-menu"
                style="position:fixed;left:0;right:0;bottom:0;z-index:50;"
            >
                <h1 class="start-menu-clock">"🕒 00:00 - Clock is broken"</h1>
                <div class="start-menu-actions">
                    <button
                        type="button"
                        role="menuitem"
                        class="start-menu-button"
                        data-icon="mdi:power-sleep"
                        on:click=move |_| runtime.dispatch_action(DesktopAction::Sleep)
                    >
                        "Sleep"
                    </button>
                    <button
                        type="button"
                        role="menuitem"
                        class="start-menu-button"
                        data-icon="mdi:restart"
                        on:click=move |_| runtime.dispatch_action(DesktopAction::Restart)
                    >
                        "Restart"
                    </button>
                    <button
                        type="button"
                        role="menuitem"
                        class="start-menu-button danger"
                        data-icon="mdi:power"
                        on:click=move |_| runtime.dispatch_action(DesktopAction::ShutDown)
                    >
                        "Shutdown"
                    </button>
                </div>
            </div>
        </Show>
        {move || overlay().map(power_overlay_view)}
    }
}

fn power_overlay_view(overlay: PowerOverlay) -> View {
    let (class, style, label) = match overlay {
        PowerOverlay::Sleep => (
            "power-overlay sleep",
            "backdrop-filter:blur(12px);background:rgba(0,0,0,0.1);",
            "",
        ),
        PowerOverlay::Restarting => (
            "power-overlay restarting",
            "display:flex;align-items:center;justify-content:center;\
             background:rgba(0,0,0,0.8);color:#fff;font-size:1.25rem;",
            "Restarting...",
        ),
        PowerOverlay::ShutDown => ("power-overlay shutdown", "background:#000;", ""),
    };

    view! {
        <div
            class=class
            data-ui-kind="power-overlay"
            style=format!("position:fixed;inset:0;z-index:100;{style}")
        >
            {label}
        </div>
    }
    .into_view()
}
