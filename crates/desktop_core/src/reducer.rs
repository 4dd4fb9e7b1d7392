//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use crate::model::{
    DesktopState, OpenWindowRequest, WindowConfig, WindowContent, WindowId, WindowPatch,
    WindowPosition, WindowRecord, WindowSize, CASCADE_OFFSET_PX, CASCADE_SLOTS, DEFAULT_WINDOW_X,
    DEFAULT_WINDOW_Y, Z_INDEX_BASE,
};
use crate::reconcile::reconcile_windows;
use crate::routes::RouteIssue;

/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
#[derive(Debug, Clone, PartialEq)]
pub enum DesktopAction {
    /// Open a new window using the supplied request.
    OpenWindow(OpenWindowRequest),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Move a window to an absolute position.
    MoveWindow {
        /// Window to move.
        window_id: WindowId,
        /// New top-left position.
        position: WindowPosition,
    },
    /// Resize a window.
    ResizeWindow {
        /// Window to resize.
        window_id: WindowId,
        /// New outer size.
        size: WindowSize,
    },
    /// Toggle a window's minimized state.
    ToggleMinimized {
        /// Window to minimize or restore.
        window_id: WindowId,
    },
    /// Replace a window's kind-specific content.
    SetWindowContent {
        /// Window whose content is replaced.
        window_id: WindowId,
        /// New content payload.
        content: WindowContent,
    },
    /// Apply a generic partial update to a window.
    UpdateWindow {
        /// Window to patch.
        window_id: WindowId,
        /// Fields to merge into the record.
        patch: WindowPatch,
        /// Marks the mutation as URL-originated so the sync loop skips it.
        skip_route_sync: bool,
    },
    /// Converge the live window set to a URL-derived desired list.
    ReconcileRoute {
        /// Ordered desired window configs.
        desired: Vec<WindowConfig>,
        /// Issues raised while decoding the URL these configs came from.
        issues: Vec<RouteIssue>,
    },
    /// Recompute `max_z_index` after an out-of-sequence bulk z reassignment.
    RecomputeMaxZIndex,
}

/// Side-effect intents emitted by [`reduce_desktop`] for the shell to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeEffect {
    /// Re-observe the window set and sync the URL if it diverged.
    SyncRoute {
        /// Push a history entry instead of replacing the current one.
        push: bool,
    },
    /// Show a user-visible notification.
    Notify {
        /// Notification title.
        title: String,
        /// Notification body.
        body: String,
    },
}

/// Applies a [`DesktopAction`] to the desktop state and collects side effects.
///
/// Every action either succeeds or is a no-op: mutations addressed to a
/// missing window change nothing and emit nothing.
pub fn reduce_desktop(state: &mut DesktopState, action: DesktopAction) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow(request) => {
            open_window(state, request);
            effects.push(RuntimeEffect::SyncRoute { push: true });
        }
        DesktopAction::CloseWindow { window_id } => {
            if close_window(state, window_id) {
                effects.push(RuntimeEffect::SyncRoute { push: true });
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            if focus_window(state, window_id) {
                effects.push(RuntimeEffect::SyncRoute { push: false });
            }
        }
        DesktopAction::MoveWindow {
            window_id,
            position,
        } => {
            if let Some(window) = state.window_mut(window_id) {
                window.position = position;
                effects.push(RuntimeEffect::SyncRoute { push: false });
            }
        }
        DesktopAction::ResizeWindow { window_id, size } => {
            if let Some(window) = state.window_mut(window_id) {
                window.size = size;
                effects.push(RuntimeEffect::SyncRoute { push: false });
            }
        }
        DesktopAction::ToggleMinimized { window_id } => {
            if let Some(window) = state.window_mut(window_id) {
                let now_minimized = !window.minimized;
                window.minimized = now_minimized;
                if now_minimized {
                    if state.active_window == Some(window_id) {
                        state.active_window = state.topmost_visible().map(|w| w.id);
                    }
                } else {
                    focus_window(state, window_id);
                }
                effects.push(RuntimeEffect::SyncRoute { push: false });
            }
        }
        DesktopAction::SetWindowContent { window_id, content } => {
            if let Some(window) = state.window_mut(window_id) {
                window.content = content;
                effects.push(RuntimeEffect::SyncRoute { push: false });
            }
        }
        DesktopAction::UpdateWindow {
            window_id,
            patch,
            skip_route_sync,
        } => {
            if apply_patch(state, window_id, &patch, skip_route_sync) {
                effects.push(RuntimeEffect::SyncRoute { push: false });
            }
        }
        DesktopAction::ReconcileRoute { desired, issues } => {
            let mut any_missing = false;
            for issue in &issues {
                if let RouteIssue::MissingContent { .. } = issue {
                    any_missing = true;
                    effects.push(RuntimeEffect::Notify {
                        title: "File not found".to_string(),
                        body: issue.to_string(),
                    });
                }
            }
            // A URL naming unindexed content falls back to the empty desktop;
            // the follow-up sync replaces the bad URL with the canonical root.
            if any_missing {
                reconcile_windows(state, &[]);
            } else {
                reconcile_windows(state, &desired);
            }
            effects.push(RuntimeEffect::SyncRoute { push: false });
        }
        DesktopAction::RecomputeMaxZIndex => {
            recompute_max_z_index(state);
        }
    }
    effects
}

pub(crate) fn open_window(state: &mut DesktopState, request: OpenWindowRequest) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    let cascade = ((id.0.saturating_sub(1) % CASCADE_SLOTS) as i32) * CASCADE_OFFSET_PX;
    let kind = request.kind;
    state.max_z_index += 1;
    let record = WindowRecord {
        id,
        kind,
        title: request.title.unwrap_or_else(|| kind.title().to_string()),
        position: request.position.unwrap_or(WindowPosition {
            x: DEFAULT_WINDOW_X + cascade,
            y: DEFAULT_WINDOW_Y + cascade,
        }),
        size: request.size.unwrap_or_else(|| kind.default_size()),
        z_index: state.max_z_index,
        minimized: false,
        content: request
            .content
            .unwrap_or_else(|| WindowContent::default_for(kind)),
        skip_next_route_sync: false,
    };
    state.windows.push(record);
    state.active_window = Some(id);
    id
}

pub(crate) fn close_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let before = state.windows.len();
    state.windows.retain(|w| w.id != window_id);
    if state.windows.len() == before {
        return false;
    }
    if state.active_window == Some(window_id) {
        state.active_window = state.topmost_visible().map(|w| w.id);
    }
    true
}

pub(crate) fn focus_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(index) = state.windows.iter().position(|w| w.id == window_id) else {
        return false;
    };
    let already_focused_top = state.active_window == Some(window_id)
        && state.windows[index].z_index == state.max_z_index
        && !state.windows[index].minimized;
    if !already_focused_top {
        state.max_z_index += 1;
        let window = &mut state.windows[index];
        window.z_index = state.max_z_index;
        window.minimized = false;
    }
    state.active_window = Some(window_id);
    true
}

pub(crate) fn apply_patch(
    state: &mut DesktopState,
    window_id: WindowId,
    patch: &WindowPatch,
    skip_route_sync: bool,
) -> bool {
    let Some(window) = state.window_mut(window_id) else {
        return false;
    };
    if let Some(title) = &patch.title {
        window.title = title.clone();
    }
    if let Some(position) = patch.position {
        window.position = position;
    }
    if let Some(size) = patch.size {
        window.size = size;
    }
    if let Some(content) = &patch.content {
        window.content = content.clone();
    }
    if skip_route_sync {
        window.skip_next_route_sync = true;
    }
    true
}

pub(crate) fn recompute_max_z_index(state: &mut DesktopState) {
    state.max_z_index = state
        .windows
        .iter()
        .map(|w| w.z_index)
        .max()
        .unwrap_or(Z_INDEX_BASE - 1)
        .max(Z_INDEX_BASE - 1);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::WindowKind;

    fn open(state: &mut DesktopState, kind: WindowKind) -> WindowId {
        let effects = reduce_desktop(
            state,
            DesktopAction::OpenWindow(OpenWindowRequest::new(kind)),
        );
        assert_eq!(effects, vec![RuntimeEffect::SyncRoute { push: true }]);
        state.windows.last().expect("window").id
    }

    #[test]
    fn open_assigns_base_z_then_monotonic_increments() {
        let mut state = DesktopState::default();

        let first = open(&mut state, WindowKind::Terminal);
        let second = open(&mut state, WindowKind::Finder);

        assert_eq!(state.window(first).expect("first").z_index, Z_INDEX_BASE);
        assert_eq!(
            state.window(second).expect("second").z_index,
            Z_INDEX_BASE + 1
        );
        assert_eq!(state.max_z_index, Z_INDEX_BASE + 1);
        assert_eq!(state.active_window, Some(second));
        assert!(!state.window(first).expect("first").minimized);
    }

    #[test]
    fn successive_opens_cascade_positions() {
        let mut state = DesktopState::default();

        let first = open(&mut state, WindowKind::Terminal);
        let second = open(&mut state, WindowKind::Terminal);

        let first_pos = state.window(first).expect("first").position;
        let second_pos = state.window(second).expect("second").position;
        assert_eq!(second_pos.x - first_pos.x, CASCADE_OFFSET_PX);
        assert_eq!(second_pos.y - first_pos.y, CASCADE_OFFSET_PX);
    }

    #[test]
    fn open_uses_kind_default_geometry_when_request_has_none() {
        let mut state = DesktopState::default();
        let id = open(&mut state, WindowKind::TextEdit);
        assert_eq!(
            state.window(id).expect("window").size,
            WindowKind::TextEdit.default_size()
        );
    }

    #[test]
    fn focus_raises_to_new_max_and_short_circuits_when_already_top() {
        let mut state = DesktopState::default();
        let first = open(&mut state, WindowKind::Terminal);
        let second = open(&mut state, WindowKind::Finder);

        reduce_desktop(&mut state, DesktopAction::FocusWindow { window_id: first });
        assert_eq!(state.active_window, Some(first));
        assert_eq!(
            state.window(first).expect("first").z_index,
            Z_INDEX_BASE + 2
        );
        assert_eq!(state.max_z_index, Z_INDEX_BASE + 2);

        let before = state.clone();
        reduce_desktop(&mut state, DesktopAction::FocusWindow { window_id: first });
        assert_eq!(state, before);
        assert!(state.window(second).is_some());
    }

    #[test]
    fn close_transfers_activation_to_topmost_visible() {
        let mut state = DesktopState::default();
        let first = open(&mut state, WindowKind::Terminal);
        let second = open(&mut state, WindowKind::Finder);
        let third = open(&mut state, WindowKind::TextEdit);

        reduce_desktop(&mut state, DesktopAction::CloseWindow { window_id: third });
        assert_eq!(state.active_window, Some(second));

        reduce_desktop(&mut state, DesktopAction::CloseWindow { window_id: second });
        reduce_desktop(&mut state, DesktopAction::CloseWindow { window_id: first });
        assert_eq!(state.active_window, None);
        assert!(state.windows.is_empty());
    }

    #[test]
    fn minimize_excludes_window_and_transfers_activation() {
        let mut state = DesktopState::default();
        let first = open(&mut state, WindowKind::Terminal);
        let second = open(&mut state, WindowKind::Finder);

        reduce_desktop(
            &mut state,
            DesktopAction::ToggleMinimized { window_id: second },
        );
        assert!(state.window(second).expect("second").minimized);
        assert_eq!(state.active_window, Some(first));
        assert_eq!(state.visible_windows().len(), 1);

        reduce_desktop(
            &mut state,
            DesktopAction::ToggleMinimized { window_id: second },
        );
        assert!(!state.window(second).expect("second").minimized);
        assert_eq!(state.active_window, Some(second));
    }

    #[test]
    fn mutations_on_missing_windows_are_noops_without_effects() {
        let mut state = DesktopState::default();
        open(&mut state, WindowKind::Terminal);
        let stale = WindowId(999);
        let before = state.clone();

        let actions = vec![
            DesktopAction::CloseWindow { window_id: stale },
            DesktopAction::FocusWindow { window_id: stale },
            DesktopAction::MoveWindow {
                window_id: stale,
                position: WindowPosition { x: 1, y: 2 },
            },
            DesktopAction::ResizeWindow {
                window_id: stale,
                size: WindowSize {
                    width: 10,
                    height: 10,
                },
            },
            DesktopAction::ToggleMinimized { window_id: stale },
            DesktopAction::SetWindowContent {
                window_id: stale,
                content: WindowContent::Terminal,
            },
            DesktopAction::UpdateWindow {
                window_id: stale,
                patch: WindowPatch::default(),
                skip_route_sync: true,
            },
        ];
        for action in actions {
            let effects = reduce_desktop(&mut state, action);
            assert_eq!(effects, Vec::new());
        }
        assert_eq!(state, before);
    }

    #[test]
    fn update_with_skip_marks_window_for_route_sync_suppression() {
        let mut state = DesktopState::default();
        let id = open(&mut state, WindowKind::Terminal);

        let effects = reduce_desktop(
            &mut state,
            DesktopAction::UpdateWindow {
                window_id: id,
                patch: WindowPatch {
                    title: Some("Shell".to_string()),
                    ..WindowPatch::default()
                },
                skip_route_sync: true,
            },
        );

        let window = state.window(id).expect("window");
        assert_eq!(window.title, "Shell");
        assert!(window.skip_next_route_sync);
        assert_eq!(effects, vec![RuntimeEffect::SyncRoute { push: false }]);
    }

    #[test]
    fn missing_content_notifies_and_falls_back_to_an_empty_desktop() {
        let mut state = DesktopState::default();
        open(&mut state, WindowKind::Terminal);

        let effects = reduce_desktop(
            &mut state,
            DesktopAction::ReconcileRoute {
                desired: Vec::new(),
                issues: vec![RouteIssue::MissingContent {
                    identifier: "textedit:gone".to_string(),
                    path: "/gone".to_string(),
                }],
            },
        );

        assert!(state.windows.is_empty());
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::Notify {
                    title: "File not found".to_string(),
                    body: "no indexed content at /gone for textedit:gone".to_string(),
                },
                RuntimeEffect::SyncRoute { push: false },
            ]
        );
    }

    #[test]
    fn unknown_identifier_issues_do_not_notify() {
        let mut state = DesktopState::default();
        let effects = reduce_desktop(
            &mut state,
            DesktopAction::ReconcileRoute {
                desired: Vec::new(),
                issues: vec![RouteIssue::UnknownIdentifier {
                    identifier: "zzz".to_string(),
                }],
            },
        );
        assert_eq!(effects, vec![RuntimeEffect::SyncRoute { push: false }]);
    }

    #[test]
    fn recompute_max_z_floors_at_base() {
        let mut state = DesktopState::default();
        reduce_desktop(&mut state, DesktopAction::RecomputeMaxZIndex);
        assert_eq!(state.max_z_index, Z_INDEX_BASE - 1);

        let id = open(&mut state, WindowKind::Terminal);
        state.window_mut(id).expect("window").z_index = Z_INDEX_BASE + 7;
        reduce_desktop(&mut state, DesktopAction::RecomputeMaxZIndex);
        assert_eq!(state.max_z_index, Z_INDEX_BASE + 7);
    }
}
