use super::*;
use crate::model::IconId;

#[component]
pub(super) fn DesktopIcon(icon_id: IconId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let Some(icon) = runtime
        .state
        .with_untracked(|desktop| desktop.layout.icon(icon_id).cloned())
    else {
        return ().into_view();
    };

    let style = move || {
        runtime.state.with(|desktop| {
            let config = desktop.layout.config();
            let (x, y) = desktop
                .layout
                .icon(icon_id)
                .map(|icon| config.cell_origin_px(icon.cell))
                .unwrap_or_default();
            format!(
                "position:absolute;width:{size}px;height:{size}px;transform:translate({x}px, {y}px);",
                size = config.cell_size
            )
        })
    };
    let dragging = move || {
        runtime
            .interaction
            .with(|ui| ui.icon_drag.is_some_and(|session| session.icon_id == icon_id))
    };
    let begin_drag = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::BeginIconDrag {
            icon_id,
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let activate = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(DesktopAction::ActivateIcon { icon_id });
    };

    view! {
        <button
            type="button"
            class="desktop-icon"
            class:dragging=dragging
            data-ui-kind="desktop-icon"
            data-icon-id=icon_id.0.to_string()
            style=style
            on:pointerdown=begin_drag
            on:click=activate
        >
            <span class="desktop-icon-glyph" data-icon=icon.icon_glyph aria-hidden="true"></span>
            <span class="desktop-icon-label">{icon.display_name}</span>
        </button>
    }
    .into_view()
}
