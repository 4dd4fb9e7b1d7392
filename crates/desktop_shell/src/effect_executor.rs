//! Explicit effect-queue executor for reducer-emitted runtime effects.

use leptos::*;

use crate::runtime_context::DesktopRuntimeContext;

/// Installs the executor that drains reducer-emitted effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        // Reset before draining so dispatches made while an effect runs
        // enqueue a fresh batch instead of being wiped at the end of this
        // pass.
        runtime.effects.set(Vec::new());

        let host = runtime.host.get_value();
        for effect in queued {
            host.run_runtime_effect(runtime, effect);
        }
    });
}
