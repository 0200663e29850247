//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the runtime effect queue, and the host
//! trackers (boundary, fullscreen, wallpaper). UI composition stays in [`crate::components`].

use leptos::*;

use crate::{
    catalog::builtin_catalog,
    effect_executor, host_ui,
    model::{Boundary, DesktopState, InteractionState},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Reactive icon layout and open-window state.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer drag state.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and processed by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }
}

fn initial_state() -> DesktopState {
    match DesktopState::from_catalog(builtin_catalog(), Boundary::default()) {
        Ok(state) => state,
        Err(err) => {
            logging::warn!("desktop catalog load failed: {err}");
            DesktopState::default()
        }
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and seeds state from the catalog.
pub fn DesktopProvider(children: Children) -> impl IntoView {
    let state = create_rw_signal(initial_state());
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    // All mutation funnels through this callback on the UI thread, one action at a time.
    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_desktop = desktop.clone();
        let previous_ui = ui.clone();

        match reduce_desktop(&mut desktop, &mut ui, action) {
            Ok(new_effects) => {
                if desktop != previous_desktop {
                    state.set(desktop);
                }
                if ui != previous_ui {
                    interaction.set(ui);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("desktop reducer error: {err}"),
        }
    });

    let runtime = DesktopRuntimeContext {
        state,
        interaction,
        effects,
        dispatch,
    };

    provide_context(runtime);
    effect_executor::install(runtime);
    host_ui::install_boundary_tracking(runtime);
    host_ui::install_fullscreen_tracking(runtime);
    host_ui::install_wallpaper_rolls(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
