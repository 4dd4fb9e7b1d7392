pub mod model;
pub mod reconcile;
pub mod reducer;
pub mod route_sync;
pub mod routes;
pub mod strategy;

pub use model::*;
pub use reconcile::reconcile_windows;
pub use reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
pub use route_sync::{observe_desktop, RouteNavigation, RouteSyncState};
pub use routes::{
    build_window_configs, content_paths_for, parse_state_param, parse_window_identifiers,
    serialize_window, serialize_windows_to_url, url_from_search, ResolvedContent, RouteIssue,
};
pub use strategy::{strategy_for_identifier, strategy_for_kind, WindowStrategy};
