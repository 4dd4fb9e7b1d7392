//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the runtime effect
//! queue, and the URL sync baseline. UI composition stays in
//! [`crate::components`].
#![allow(clippy::clone_on_copy)]

use leptos::*;
use platform_host::DesktopHostServices;

use desktop_core::{reduce_desktop, DesktopAction, DesktopState, RouteSyncState, RuntimeEffect};

use crate::{effect_executor, host::DesktopHostContext, route_watcher};

/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
#[derive(Clone, Copy)]
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects.
    pub host: StoredValue<DesktopHostContext>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// URL sync baseline consulted when observing the desktop for navigation.
    pub route_sync: RwSignal<RouteSyncState>,
    /// Queue of runtime effects emitted by the reducer and processed by the shell.
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

/// Provides [`DesktopRuntimeContext`] to descendant components and starts URL sync.
#[component]
pub fn DesktopProvider(
    /// Injected browser or test host bundle assembled by the entry layer.
    host_services: DesktopHostServices,
    children: Children,
) -> impl IntoView {
    let host = store_value(DesktopHostContext::new(host_services));
    let state = create_rw_signal(DesktopState::default());
    let route_sync = create_rw_signal(RouteSyncState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let previous = desktop.clone();

        let new_effects = reduce_desktop(&mut desktop, action);
        if desktop != previous {
            state.set(desktop);
        }
        if !new_effects.is_empty() {
            let mut queue = effects.get_untracked();
            queue.extend(new_effects);
            effects.set(queue);
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        state,
        route_sync,
        effects,
        dispatch,
    };

    provide_context(runtime.clone());

    effect_executor::install(runtime);
    route_watcher::install(runtime);

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
