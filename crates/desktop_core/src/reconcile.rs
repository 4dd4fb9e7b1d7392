//! URL-driven window reconciliation: converge live windows to a desired list.

use std::collections::{HashMap, HashSet};

use crate::model::{
    DesktopState, OpenWindowRequest, WindowConfig, WindowId, WindowPatch, WindowRecord,
    Z_INDEX_BASE,
};
use crate::reducer::{apply_patch, close_window, focus_window, open_window, recompute_max_z_index};
use crate::routes::serialize_window;
use crate::strategy::{strategy_for_identifier, strategy_for_kind};

/// Converges the live window set to `desired`, the ordered configs decoded
/// from the URL.
///
/// Order of operations: singleton merge, close, update (marked so the sync
/// loop does not echo URL-originated mutations back), open, deterministic
/// z reassignment, focus of the last desired window. Closing first frees
/// identifiers, updating before opening preserves continuity, and z/focus run
/// last because they depend on the final window set. Every step is a store
/// mutation that cannot fail; unparseable identifiers never reach this
/// function.
pub fn reconcile_windows(state: &mut DesktopState, desired: &[WindowConfig]) {
    let desired = collapse_singleton_configs(desired);

    let mut live: HashMap<String, WindowId> = HashMap::new();
    for window in state.visible_windows() {
        if let Some(identifier) = serialize_window(window) {
            live.insert(identifier, window.id);
        }
    }

    // Singleton pass: merge in place instead of close+reopen so continuity
    // (scroll position, selection) survives the URL change.
    let singleton_windows: Vec<WindowId> = state
        .visible_windows()
        .iter()
        .filter(|w| strategy_for_kind(w.kind).requires_special_reconciliation())
        .map(|w| w.id)
        .collect();
    let mut consumed: HashSet<String> = HashSet::new();
    for window_id in singleton_windows {
        let Some(kind) = state.window(window_id).map(|w| w.kind) else {
            continue;
        };
        let strategy = strategy_for_kind(kind);
        let matched = desired
            .iter()
            .filter(|config| strategy.matches_identifier(&config.identifier))
            .last();
        match matched {
            Some(config) if !consumed.contains(&config.identifier) => {
                apply_patch(state, window_id, &config.config, true);
                consumed.insert(config.identifier.clone());
            }
            // No desired config left for this kind: a surplus instance would
            // break the one-live-window rule, so it closes.
            _ => {
                close_window(state, window_id);
            }
        }
        live.retain(|_, id| *id != window_id);
    }

    let mut to_close: Vec<WindowId> = live
        .iter()
        .filter(|(identifier, _)| !desired.iter().any(|c| &c.identifier == *identifier))
        .map(|(_, id)| *id)
        .collect();
    to_close.sort();

    let mut to_update: Vec<(WindowId, &WindowConfig)> = Vec::new();
    let mut to_open: Vec<&WindowConfig> = Vec::new();
    for config in &desired {
        if consumed.contains(&config.identifier) {
            continue;
        }
        match live.get(&config.identifier) {
            Some(&window_id) => {
                let needs_update = state
                    .window(window_id)
                    .map(|window| {
                        strategy_for_identifier(&config.identifier)
                            .map(|strategy| strategy.needs_update(window, &config.config))
                            .unwrap_or(false)
                            || geometry_differs(window, &config.config)
                    })
                    .unwrap_or(false);
                if needs_update {
                    to_update.push((window_id, config));
                }
            }
            None => to_open.push(config),
        }
    }

    for window_id in to_close {
        close_window(state, window_id);
    }
    for (window_id, config) in to_update {
        apply_patch(state, window_id, &config.config, true);
    }
    for config in to_open {
        let Some(strategy) = strategy_for_identifier(&config.identifier) else {
            continue;
        };
        let mut request = OpenWindowRequest::new(strategy.kind());
        request.title = config.config.title.clone();
        request.position = config.config.position;
        request.size = config.config.size;
        request.content = config.config.content.clone();
        open_window(state, request);
    }

    if desired.is_empty() {
        return;
    }

    // All but the last desired window get sequential z from the base;
    // already-correct indices are left untouched.
    for (index, config) in desired[..desired.len() - 1].iter().enumerate() {
        let target_z = Z_INDEX_BASE + index as u32;
        if let Some(window_id) = visible_window_by_identifier(state, &config.identifier) {
            if let Some(window) = state.window_mut(window_id) {
                if window.z_index != target_z {
                    window.z_index = target_z;
                }
            }
        }
    }
    recompute_max_z_index(state);

    // The singleton-merged window may serialize differently from the desired
    // identifier, so singleton kinds resolve focus by kind instead.
    let last = &desired[desired.len() - 1];
    let focus_target = match strategy_for_identifier(&last.identifier) {
        Some(strategy) if strategy.requires_special_reconciliation() => state
            .windows
            .iter()
            .find(|w| !w.minimized && w.kind == strategy.kind())
            .map(|w| w.id),
        _ => visible_window_by_identifier(state, &last.identifier),
    };
    if let Some(window_id) = focus_target.or_else(|| state.topmost_visible().map(|w| w.id)) {
        focus_window(state, window_id);
    }
}

/// Keeps only the last desired config per singleton kind, matching the
/// last-wins rule used when a live window merges multiple configs.
fn collapse_singleton_configs(desired: &[WindowConfig]) -> Vec<WindowConfig> {
    desired
        .iter()
        .enumerate()
        .filter(|&(index, config)| {
            let Some(strategy) = strategy_for_identifier(&config.identifier) else {
                return true;
            };
            if !strategy.requires_special_reconciliation() {
                return true;
            }
            !desired[index + 1..]
                .iter()
                .any(|later| strategy.matches_identifier(&later.identifier))
        })
        .map(|(_, config)| config.clone())
        .collect()
}

fn geometry_differs(window: &WindowRecord, patch: &WindowPatch) -> bool {
    patch
        .position
        .map(|position| position != window.position)
        .unwrap_or(false)
        || patch.size.map(|size| size != window.size).unwrap_or(false)
}

fn visible_window_by_identifier(state: &DesktopState, identifier: &str) -> Option<WindowId> {
    state
        .windows
        .iter()
        .filter(|w| !w.minimized)
        .find(|w| serialize_window(w).as_deref() == Some(identifier))
        .map(|w| w.id)
}

#[cfg(test)]
mod tests {
    use platform_host::ContentRecord;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{FinderViewMode, WindowContent, WindowKind};
    use crate::reducer::{reduce_desktop, DesktopAction};
    use crate::routes::{build_window_configs, ResolvedContent};

    fn resolved_with(entries: &[(&str, &str)]) -> ResolvedContent {
        let mut resolved = ResolvedContent::new();
        for (path, title) in entries {
            resolved.insert(
                path.to_string(),
                ContentRecord {
                    path: path.to_string(),
                    title: title.to_string(),
                    app_type: "textedit".to_string(),
                    file_extension: "txt".to_string(),
                    body: format!("{title} body"),
                },
            );
        }
        resolved
    }

    fn configs(identifiers: &[&str], resolved: &ResolvedContent) -> Vec<WindowConfig> {
        let identifiers: Vec<String> = identifiers.iter().map(|s| s.to_string()).collect();
        let (configs, issues) = build_window_configs(&identifiers, resolved);
        assert_eq!(issues, Vec::new());
        configs
    }

    fn open(state: &mut DesktopState, kind: WindowKind) -> WindowId {
        reduce_desktop(
            state,
            DesktopAction::OpenWindow(OpenWindowRequest::new(kind)),
        );
        state.windows.last().expect("window").id
    }

    fn visible_identifiers(state: &DesktopState) -> Vec<String> {
        state
            .visible_windows()
            .iter()
            .filter_map(|w| serialize_window(w))
            .collect()
    }

    #[test]
    fn converges_visible_set_to_desired_identifiers() {
        let mut state = DesktopState::default();
        open(&mut state, WindowKind::Terminal);
        let finder = open(&mut state, WindowKind::Finder);
        reduce_desktop(
            &mut state,
            DesktopAction::SetWindowContent {
                window_id: finder,
                content: WindowContent::Finder {
                    current_path: "/old".to_string(),
                    view_mode: FinderViewMode::Icons,
                    history: vec!["/old".to_string()],
                    history_index: 0,
                },
            },
        );

        let resolved = resolved_with(&[("/documents/readme", "Readme")]);
        let desired = configs(&["finder:documents", "textedit:documents/readme"], &resolved);
        reconcile_windows(&mut state, &desired);

        assert_eq!(
            visible_identifiers(&state),
            vec![
                "finder:documents".to_string(),
                "textedit:documents/readme".to_string(),
            ]
        );
    }

    #[test]
    fn empty_desired_list_closes_every_window() {
        let mut state = DesktopState::default();
        open(&mut state, WindowKind::Terminal);
        open(&mut state, WindowKind::Finder);

        reconcile_windows(&mut state, &[]);

        assert!(state.windows.is_empty());
        assert_eq!(state.active_window, None);
    }

    #[test]
    fn fresh_textedit_opens_on_base_z_with_default_geometry_and_focus() {
        let mut state = DesktopState::default();
        let resolved = resolved_with(&[("/readme", "Readme")]);

        reconcile_windows(&mut state, &configs(&["textedit:readme"], &resolved));

        assert_eq!(state.windows.len(), 1);
        let window = &state.windows[0];
        assert_eq!(window.z_index, Z_INDEX_BASE);
        assert_eq!(window.size, WindowKind::TextEdit.default_size());
        assert_eq!(window.title, "Readme");
        assert_eq!(state.active_window, Some(window.id));
    }

    #[test]
    fn photos_window_updates_in_place_and_stays_focused() {
        let mut state = DesktopState::default();
        let resolved = resolved_with(&[("/desktop/sunset", "Sunset"), ("/desktop/ocean", "Ocean")]);
        reconcile_windows(&mut state, &configs(&["photos:desktop:sunset"], &resolved));
        let photos_id = state.windows[0].id;
        let photos_z = state.windows[0].z_index;

        reconcile_windows(&mut state, &configs(&["photos:desktop:ocean"], &resolved));

        assert_eq!(state.windows.len(), 1);
        let window = &state.windows[0];
        assert_eq!(window.id, photos_id);
        assert_eq!(window.z_index, photos_z);
        assert_eq!(
            window.content,
            WindowContent::Photos {
                album: "desktop".to_string(),
                photo: "ocean".to_string(),
            }
        );
        assert!(window.skip_next_route_sync);
        assert_eq!(state.active_window, Some(photos_id));
    }

    #[test]
    fn two_singleton_configs_collapse_to_the_last_one() {
        let mut state = DesktopState::default();
        let resolved = resolved_with(&[("/a/x", "X"), ("/b/y", "Y")]);

        reconcile_windows(&mut state, &configs(&["photos:a:x", "photos:b:y"], &resolved));

        let photos: Vec<&WindowRecord> = state
            .windows
            .iter()
            .filter(|w| w.kind == WindowKind::Photos)
            .collect();
        assert_eq!(photos.len(), 1);
        assert_eq!(
            photos[0].content,
            WindowContent::Photos {
                album: "b".to_string(),
                photo: "y".to_string(),
            }
        );

        // Same collapse when a live window absorbs the update in place.
        reconcile_windows(&mut state, &configs(&["photos:a:x", "photos:b:y"], &resolved));
        assert_eq!(
            state
                .windows
                .iter()
                .filter(|w| w.kind == WindowKind::Photos)
                .count(),
            1
        );
    }

    #[test]
    fn z_order_follows_desired_order_with_last_focused() {
        let mut state = DesktopState::default();
        let resolved = resolved_with(&[("/readme", "Readme")]);
        let desired = configs(&["finder", "textedit:readme", "terminal"], &resolved);

        reconcile_windows(&mut state, &desired);

        let z_of = |identifier: &str| {
            state
                .windows
                .iter()
                .find(|w| serialize_window(w).as_deref() == Some(identifier))
                .map(|w| (w.id, w.z_index))
                .expect("window")
        };
        let (_, finder_z) = z_of("finder");
        let (_, textedit_z) = z_of("textedit:readme");
        let (terminal_id, terminal_z) = z_of("terminal");
        assert!(finder_z < textedit_z);
        assert!(textedit_z < terminal_z);
        assert_eq!(state.active_window, Some(terminal_id));
        assert_eq!(state.max_z_index, terminal_z);
    }

    #[test]
    fn reconciliation_is_idempotent_for_an_unchanged_url() {
        let mut state = DesktopState::default();
        let resolved = resolved_with(&[("/readme", "Readme")]);
        let desired = configs(&["finder", "textedit:readme", "terminal"], &resolved);

        reconcile_windows(&mut state, &desired);
        for window in &mut state.windows {
            window.skip_next_route_sync = false;
        }
        let before = state.clone();

        reconcile_windows(&mut state, &desired);
        let mut after = state.clone();
        for window in &mut after.windows {
            window.skip_next_route_sync = false;
        }
        assert_eq!(after, before);
    }

    #[test]
    fn same_identifier_with_changed_view_mode_updates_in_place() {
        let mut state = DesktopState::default();
        let resolved = ResolvedContent::new();
        reconcile_windows(&mut state, &configs(&["finder:documents"], &resolved));
        let finder_id = state.windows[0].id;
        reduce_desktop(
            &mut state,
            DesktopAction::SetWindowContent {
                window_id: finder_id,
                content: WindowContent::Finder {
                    current_path: "/documents".to_string(),
                    view_mode: FinderViewMode::List,
                    history: vec!["/documents".to_string()],
                    history_index: 0,
                },
            },
        );

        reconcile_windows(&mut state, &configs(&["finder:documents"], &resolved));

        assert_eq!(state.windows.len(), 1);
        let window = &state.windows[0];
        assert_eq!(window.id, finder_id);
        assert!(window.skip_next_route_sync);
        assert_eq!(
            window.content,
            WindowContent::Finder {
                current_path: "/documents".to_string(),
                view_mode: FinderViewMode::Icons,
                history: vec!["/documents".to_string()],
                history_index: 0,
            }
        );
    }

    #[test]
    fn minimized_windows_are_invisible_to_reconciliation() {
        let mut state = DesktopState::default();
        let terminal = open(&mut state, WindowKind::Terminal);
        reduce_desktop(
            &mut state,
            DesktopAction::ToggleMinimized {
                window_id: terminal,
            },
        );

        reconcile_windows(&mut state, &configs(&["terminal"], &ResolvedContent::new()));

        assert_eq!(state.windows.len(), 2);
        assert!(state.window(terminal).expect("terminal").minimized);
        assert_eq!(visible_identifiers(&state), vec!["terminal".to_string()]);
    }

    #[test]
    fn singleton_update_does_not_steal_focus_when_not_last() {
        let mut state = DesktopState::default();
        let resolved = resolved_with(&[("/a/x", "X"), ("/a/y", "Y")]);
        reconcile_windows(&mut state, &configs(&["photos:a:x"], &resolved));

        reconcile_windows(&mut state, &configs(&["photos:a:y", "terminal"], &resolved));

        let terminal = state
            .windows
            .iter()
            .find(|w| w.kind == WindowKind::Terminal)
            .expect("terminal");
        let photos = state
            .windows
            .iter()
            .find(|w| w.kind == WindowKind::Photos)
            .expect("photos");
        assert_eq!(state.active_window, Some(terminal.id));
        assert_eq!(
            photos.content,
            WindowContent::Photos {
                album: "a".to_string(),
                photo: "y".to_string(),
            }
        );
        assert!(photos.z_index < terminal.z_index);
    }
}
