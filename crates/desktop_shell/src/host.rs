//! Host-side execution of reducer effects behind the platform service boundary.
//!
//! The reducer stays pure; everything that touches the browser location,
//! history, or notification surface runs here against the injected
//! [`platform_host`] services.

use std::rc::Rc;

use desktop_core::{observe_desktop, parse_state_param, RuntimeEffect};
use leptos::{logging, spawn_local, SignalGetUntracked, SignalSet};
use platform_host::{
    ContentIndexService, DesktopHostServices, LocationService, NotificationService,
};

use crate::runtime_context::DesktopRuntimeContext;

/// Host service bundle for desktop runtime side effects.
#[derive(Clone)]
pub struct DesktopHostContext {
    content_index: Rc<dyn ContentIndexService>,
    location: Rc<dyn LocationService>,
    notifications: Rc<dyn NotificationService>,
}

impl DesktopHostContext {
    /// Wraps the service bundle assembled by the entry layer.
    pub fn new(services: DesktopHostServices) -> Self {
        Self {
            content_index: services.content_index,
            location: services.location,
            notifications: services.notifications,
        }
    }

    /// Returns the configured content index service.
    pub fn content_index(&self) -> Rc<dyn ContentIndexService> {
        self.content_index.clone()
    }

    /// Returns the configured location/history service.
    pub fn location_service(&self) -> Rc<dyn LocationService> {
        self.location.clone()
    }

    /// Returns the configured notification delivery service.
    pub fn notification_service(&self) -> Rc<dyn NotificationService> {
        self.notifications.clone()
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::SyncRoute { push } => self.sync_route(runtime, push),
            RuntimeEffect::Notify { title, body } => self.notify(title, body),
        }
    }

    fn sync_route(&self, runtime: DesktopRuntimeContext, push: bool) {
        let opaque_state = parse_state_param(&self.location.search());
        let mut state = runtime.state.get_untracked();
        let mut sync = runtime.route_sync.get_untracked();
        let previous_state = state.clone();
        let previous_sync = sync.clone();

        let navigation = observe_desktop(&mut state, &mut sync, opaque_state.as_deref(), push);

        if state != previous_state {
            runtime.state.set(state);
        }
        if sync != previous_sync {
            runtime.route_sync.set(sync);
        }

        if let Some(navigation) = navigation {
            if let Err(err) = self.location.navigate(&navigation.url, navigation.replace) {
                logging::warn!("history sync failed for `{}`: {err}", navigation.url);
            }
        }
    }

    fn notify(&self, title: String, body: String) {
        let notifications = self.notifications.clone();
        spawn_local(async move {
            if let Err(err) = notifications.notify(&title, &body).await {
                logging::warn!("notification dispatch failed: {err}");
            }
        });
    }
}
