//! Desktop-to-URL synchronization with echo suppression.
//!
//! [`observe_desktop`] is the outbound half of the sync loop: the inbound
//! half ([`crate::reconcile::reconcile_windows`]) marks every window it
//! mutates, and this observer consumes those marks instead of navigating, so
//! a URL-originated change is never pushed back into history as a duplicate
//! entry.

use crate::model::DesktopState;
use crate::routes::serialize_windows_to_url;

/// Sync-loop memory carried between observations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSyncState {
    /// The URL the desktop last agreed on with the browser, `None` until the
    /// first observation baselines it.
    pub last_synced: Option<String>,
}

/// A navigation the host should perform against browser history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteNavigation {
    /// Absolute path-and-query to navigate to.
    pub url: String,
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

/// Observes the desktop after a mutation and decides whether the browser URL
/// must change.
///
/// Returns `None` when the serialized URL already matches the last synced
/// one, when this is the first observation (which only records the baseline),
/// or when the mutation originated from the URL itself. In all three cases
/// the baseline still advances, so a later user action diffs against the
/// current URL rather than a stale one.
pub fn observe_desktop(
    state: &mut DesktopState,
    sync: &mut RouteSyncState,
    opaque_state: Option<&str>,
    push: bool,
) -> Option<RouteNavigation> {
    let url = serialize_windows_to_url(state, opaque_state);

    let mut suppressed = false;
    for window in &mut state.windows {
        if window.skip_next_route_sync {
            window.skip_next_route_sync = false;
            suppressed = true;
        }
    }

    let first_observation = sync.last_synced.is_none();
    let unchanged = sync.last_synced.as_deref() == Some(url.as_str());
    sync.last_synced = Some(url.clone());
    if suppressed || first_observation || unchanged {
        return None;
    }
    Some(RouteNavigation {
        url,
        replace: !push,
    })
}
