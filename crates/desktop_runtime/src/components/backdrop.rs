use super::*;

const WALLPAPER_STYLE: &str = "position:absolute;inset:0;z-index:0;background-size:cover;\
                               background-position:center;opacity:0.8;filter:blur(1px);";

#[component]
pub(super) fn WallpaperLayer() -> impl IntoView {
    let runtime = use_desktop_runtime();

    let style = move || {
        runtime.state.with(|desktop| match &desktop.session.wallpaper {
            Some(wallpaper) => {
                format!("{WALLPAPER_STYLE}background-image:url({});", wallpaper.url())
            }
            None => WALLPAPER_STYLE.to_string(),
        })
    };

    view! {
        <div class="desktop-wallpaper" data-ui-kind="wallpaper" aria-hidden="true" style=style></div>
    }
}

/// Covers the whole desktop until the page is fullscreen.
#[component]
pub(super) fn FullscreenGate() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let denied = move || !runtime.state.with(|desktop| desktop.session.fullscreen);

    view! {
        <Show when=denied>
            <div
                class="fullscreen-gate"
                role="alertdialog"
                data-ui-kind="fullscreen-gate"
                style="position:fixed;inset:0;z-index:9999;display:flex;flex-direction:column;\
                       align-items:center;justify-content:center;text-align:center;\
                       background:#000;color:#ef4444;font-family:monospace;"
            >
                <h1>"ACCESS DENIED"</h1>
                <p>
                    "Parody OS requires fullscreen mode." <br />
                    "Please press " <kbd>"F11"</kbd> " or " <kbd>"Ctrl + Cmd + F"</kbd>
                    " on Mac."
                </p>
            </div>
        </Show>
    }
}
