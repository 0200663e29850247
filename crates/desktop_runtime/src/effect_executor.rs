//! Explicit runtime effect-queue executor for reducer-emitted side effects.

use leptos::*;

use crate::{host_ui, reducer::RuntimeEffect, runtime_context::DesktopRuntimeContext};

/// Installs the effect executor that drains reducer-emitted runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Clear the queue before running so effects dispatched while draining start a fresh batch.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            run_runtime_effect(runtime, effect);
        }
    });
}

fn run_runtime_effect(runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
    match effect {
        RuntimeEffect::FocusWindow(window_id) => host_ui::focus_window_element(window_id),
        RuntimeEffect::ScheduleSleepUnlock { after_ms } => {
            host_ui::schedule_sleep_unlock(runtime, after_ms)
        }
        RuntimeEffect::ReloadPage { after_ms } => host_ui::reload_page_after(after_ms),
    }
}
