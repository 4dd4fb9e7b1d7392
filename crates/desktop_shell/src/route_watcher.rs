//! URL-driven reconciliation: decodes the location into desired window configs.
//!
//! One pass runs at mount and another on every history traversal. Content
//! resolution is async, so each pass snapshots the query string, resolves the
//! index records it needs, then dispatches a single reconcile action.

use std::rc::Rc;

use leptos::*;

use desktop_core::{
    build_window_configs, content_paths_for, parse_window_identifiers, url_from_search,
    DesktopAction, ResolvedContent, RouteIssue,
};

use crate::runtime_context::DesktopRuntimeContext;

/// Installs the location watcher that keeps the window set in step with the URL.
pub fn install(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        reconcile_from_location(runtime);
    });

    let location = runtime.host.get_value().location_service();
    location.on_location_change(Rc::new(move || {
        reconcile_from_location(runtime);
    }));
}

fn reconcile_from_location(runtime: DesktopRuntimeContext) {
    let search = runtime.host.get_value().location_service().search();

    // Baseline the sync state on the URL actually displayed so the follow-up
    // sync pass replaces a non-canonical URL instead of suppressing it.
    let displayed = url_from_search(&search);
    runtime.route_sync.update(|sync| {
        sync.last_synced = Some(displayed);
    });

    let identifiers = parse_window_identifiers(&search);
    let index = runtime.host.get_value().content_index();
    spawn_local(async move {
        let mut resolved = ResolvedContent::new();
        for path in content_paths_for(&identifiers) {
            let lookup = index.resolve(&path).await;
            match lookup {
                Ok(Some(record)) => {
                    resolved.insert(path, record);
                }
                Ok(None) => {}
                Err(err) => {
                    logging::warn!("content index lookup failed for `{path}`: {err}");
                }
            }
        }

        let (desired, issues) = build_window_configs(&identifiers, &resolved);
        for issue in &issues {
            if let RouteIssue::UnknownIdentifier { .. } = issue {
                logging::warn!("{issue}");
            }
        }
        runtime.dispatch_action(DesktopAction::ReconcileRoute { desired, issues });
    });
}
