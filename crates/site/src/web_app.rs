use desktop_runtime::{builtin_catalog, DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Parody OS" />
        <Meta name="description" content="A joke desktop operating system in the browser." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                    <Route path="/window/:route" view=AppSurface />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    view! {
        <DesktopProvider>
            <DesktopShell />
        </DesktopProvider>
    }
}

/// Application surface loaded inside a desktop window frame.
#[component]
pub fn AppSurface() -> impl IntoView {
    let params = use_params_map();
    let route = move || {
        params
            .with(|map| map.get("route").cloned())
            .unwrap_or_default()
    };
    let entry = move || builtin_catalog().entry_by_route(&route()).cloned();

    view! {
        <section class="app-surface" data-ui-kind="app-surface" data-route=route>
            {move || match entry() {
                Some(app) => view! {
                    <h1>{app.display_name}</h1>
                    <p class="app-surface-placeholder">"Nothing to see here yet. Try another icon."</p>
                }
                    .into_view(),
                None => view! {
                    <h1>"Unknown application"</h1>
                    <p>{move || format!("No app is installed at `{}`.", route())}</p>
                }
                    .into_view(),
            }}
        </section>
    }
}
