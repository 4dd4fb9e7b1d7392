//! Desktop shell UI composition: menu bar, window layer, and dock.

use leptos::*;

use desktop_core::{
    DesktopAction, DesktopState, FinderViewMode, OpenWindowRequest, WindowContent, WindowId,
    WindowKind,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

const DOCK_KINDS: [WindowKind; 6] = [
    WindowKind::Finder,
    WindowKind::TextEdit,
    WindowKind::PdfViewer,
    WindowKind::Photos,
    WindowKind::Terminal,
    WindowKind::Browser,
];

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

/// Picks the window a dock click should focus: topmost visible of the kind,
/// else any minimized one, else nothing.
fn dock_target_for_kind(state: &DesktopState, kind: WindowKind) -> Option<WindowId> {
    state
        .windows
        .iter()
        .filter(|w| w.kind == kind && !w.minimized)
        .max_by_key(|w| w.z_index)
        .or_else(|| state.windows.iter().find(|w| w.kind == kind))
        .map(|w| w.id)
}

fn activate_dock_kind(runtime: DesktopRuntimeContext, kind: WindowKind) {
    let state = runtime.state.get_untracked();
    match dock_target_for_kind(&state, kind) {
        Some(window_id) => {
            let minimized = state
                .window(window_id)
                .map(|w| w.minimized)
                .unwrap_or(false);
            if minimized {
                runtime.dispatch_action(DesktopAction::ToggleMinimized { window_id });
            } else {
                runtime.dispatch_action(DesktopAction::FocusWindow { window_id });
            }
        }
        None => runtime.dispatch_action(DesktopAction::OpenWindow(OpenWindowRequest::new(kind))),
    }
}

/// Full desktop surface: menu bar, window layer, and dock.
#[component]
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    view! {
        <div class="desktop">
            <MenuBar />
            <main class="window-layer">
                <For each=move || state.get().windows key=|win| win.id.0 let:win>
                    <DesktopWindow window_id=win.id />
                </For>
            </main>
            <Dock />
        </div>
    }
}

#[component]
fn MenuBar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let active_title = move || {
        let state = runtime.state.get();
        state
            .active_window
            .and_then(|id| state.window(id).map(|w| w.kind.title().to_string()))
            .unwrap_or_else(|| "Desktop".to_string())
    };

    view! {
        <header class="menu-bar">
            <span class="menu-bar-app">{active_title}</span>
        </header>
    }
}

#[component]
fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let window = Signal::derive(move || {
        runtime
            .state
            .get()
            .windows
            .into_iter()
            .find(|w| w.id == window_id)
    });

    let focus = move |_| {
        let already_active = runtime.state.get_untracked().active_window == Some(window_id);
        if !already_active {
            runtime.dispatch_action(DesktopAction::FocusWindow { window_id });
        }
    };
    let minimize = move |_| runtime.dispatch_action(DesktopAction::ToggleMinimized { window_id });
    let close = move |_| runtime.dispatch_action(DesktopAction::CloseWindow { window_id });

    view! {
        <Show when=move || window.get().map(|w| !w.minimized).unwrap_or(false) fallback=|| ()>
            {move || {
                let win = window.get().expect("window exists while shown");
                let style = format!(
                    "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                    win.position.x, win.position.y, win.size.width, win.size.height, win.z_index
                );
                let active = runtime.state.get().active_window == Some(win.id);
                let active_class = if active { " active" } else { "" };

                view! {
                    <section
                        class=format!("desktop-window{active_class}")
                        style=style
                        on:mousedown=focus
                        role="dialog"
                        aria-label=win.title.clone()
                    >
                        <header class="titlebar">
                            <div class="titlebar-controls">
                                <button
                                    aria-label="Close window"
                                    on:mousedown=move |ev| stop_mouse_event(&ev)
                                    on:click=move |ev| {
                                        stop_mouse_event(&ev);
                                        close(ev);
                                    }
                                >
                                    "×"
                                </button>
                                <button
                                    aria-label="Minimize window"
                                    on:mousedown=move |ev| stop_mouse_event(&ev)
                                    on:click=move |ev| {
                                        stop_mouse_event(&ev);
                                        minimize(ev);
                                    }
                                >
                                    "−"
                                </button>
                            </div>
                            <div class="titlebar-title">{win.title.clone()}</div>
                        </header>
                        <div class="window-body">
                            <WindowBody window_id=win.id />
                        </div>
                    </section>
                }
                    .into_view()
            }}
        </Show>
    }
}

#[component]
fn WindowBody(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let content = Signal::derive(move || {
        runtime
            .state
            .get()
            .windows
            .into_iter()
            .find(|w| w.id == window_id)
            .map(|w| w.content)
    });

    move || match content.get() {
        Some(WindowContent::Finder {
            current_path,
            view_mode,
            history,
            history_index,
        }) => view! {
            <FinderBody window_id current_path view_mode history history_index />
        }
        .into_view(),
        Some(WindowContent::TextEdit { path, body }) => view! {
            <TextEditBody window_id path body />
        }
        .into_view(),
        Some(WindowContent::PdfViewer { path }) => {
            let label = if path.is_empty() {
                "No document".to_string()
            } else {
                path
            };
            view! {
                <div class="pdf-viewer">
                    <p class="pdf-path">{label}</p>
                </div>
            }
            .into_view()
        }
        Some(WindowContent::Photos { album, photo }) => {
            let caption = if album.is_empty() {
                "No photo selected".to_string()
            } else {
                format!("{album} / {photo}")
            };
            view! {
                <figure class="photos">
                    <div class="photo-frame"></div>
                    <figcaption>{caption}</figcaption>
                </figure>
            }
            .into_view()
        }
        Some(WindowContent::Terminal) => view! { <pre class="terminal">"$ "</pre> }.into_view(),
        Some(WindowContent::Browser { url }) => {
            let address = if url.is_empty() {
                "about:blank".to_string()
            } else {
                url
            };
            view! {
                <div class="browser">
                    <div class="browser-address">{address}</div>
                </div>
            }
            .into_view()
        }
        None => ().into_view(),
    }
}

/// Builds Finder content pointing at `target` with it appended to history.
///
/// Entries ahead of the current index are discarded first, mirroring how
/// browser history behaves after navigating from a mid-stack position.
fn finder_content_navigated(
    view_mode: FinderViewMode,
    history: &[String],
    history_index: usize,
    target: &str,
) -> WindowContent {
    let mut history: Vec<String> = history[..=history_index].to_vec();
    history.push(target.to_string());
    let history_index = history.len() - 1;
    WindowContent::Finder {
        current_path: target.to_string(),
        view_mode,
        history,
        history_index,
    }
}

#[component]
fn FinderBody(
    window_id: WindowId,
    current_path: String,
    view_mode: FinderViewMode,
    history: Vec<String>,
    history_index: usize,
) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let back_target = (history_index > 0).then(|| WindowContent::Finder {
        current_path: history[history_index - 1].clone(),
        view_mode,
        history: history.clone(),
        history_index: history_index - 1,
    });
    let forward_target = (history_index + 1 < history.len()).then(|| WindowContent::Finder {
        current_path: history[history_index + 1].clone(),
        view_mode,
        history: history.clone(),
        history_index: history_index + 1,
    });
    let back_disabled = back_target.is_none();
    let forward_disabled = forward_target.is_none();

    let go_back = move |_| {
        if let Some(content) = back_target.clone() {
            runtime.dispatch_action(DesktopAction::SetWindowContent { window_id, content });
        }
    };
    let go_forward = move |_| {
        if let Some(content) = forward_target.clone() {
            runtime.dispatch_action(DesktopAction::SetWindowContent { window_id, content });
        }
    };

    let crumbs: Vec<(String, String)> = {
        let mut crumbs = vec![("/".to_string(), "/".to_string())];
        let mut prefix = String::new();
        for segment in current_path.split('/').filter(|s| !s.is_empty()) {
            prefix.push('/');
            prefix.push_str(segment);
            crumbs.push((segment.to_string(), prefix.clone()));
        }
        crumbs
    };

    let mode_buttons = [
        ("Icons", FinderViewMode::Icons),
        ("List", FinderViewMode::List),
        ("Columns", FinderViewMode::Columns),
    ];
    let listing_class = match view_mode {
        FinderViewMode::Icons => "finder-listing icons",
        FinderViewMode::List => "finder-listing list",
        FinderViewMode::Columns => "finder-listing columns",
    };

    view! {
        <div class="finder">
            <div class="finder-toolbar">
                <button disabled=back_disabled on:click=go_back>
                    "‹"
                </button>
                <button disabled=forward_disabled on:click=go_forward>
                    "›"
                </button>
                <div class="finder-crumbs">
                    {crumbs
                        .into_iter()
                        .map(|(label, target)| {
                            let here = target == current_path;
                            let go = {
                                let history = history.clone();
                                move |_| {
                                    runtime
                                        .dispatch_action(DesktopAction::SetWindowContent {
                                            window_id,
                                            content: finder_content_navigated(
                                                view_mode,
                                                &history,
                                                history_index,
                                                &target,
                                            ),
                                        });
                                }
                            };
                            view! {
                                <button class="finder-crumb" disabled=here on:click=go>
                                    {label}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <div class="finder-view-modes">
                    {mode_buttons
                        .into_iter()
                        .map(|(label, mode)| {
                            let selected = mode == view_mode;
                            let class = if selected {
                                "view-mode selected"
                            } else {
                                "view-mode"
                            };
                            let content = WindowContent::Finder {
                                current_path: current_path.clone(),
                                view_mode: mode,
                                history: history.clone(),
                                history_index,
                            };
                            let set_mode = move |_| {
                                runtime
                                    .dispatch_action(DesktopAction::SetWindowContent {
                                        window_id,
                                        content: content.clone(),
                                    });
                            };
                            view! {
                                <button class=class disabled=selected on:click=set_mode>
                                    {label}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
            <div class=listing_class></div>
        </div>
    }
}

#[component]
fn TextEditBody(window_id: WindowId, path: Option<String>, body: String) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let display_path = path.clone().unwrap_or_else(|| "Untitled".to_string());
    let on_change = move |ev| {
        let edited = event_target_value(&ev);
        runtime.dispatch_action(DesktopAction::SetWindowContent {
            window_id,
            content: WindowContent::TextEdit {
                path: path.clone(),
                body: edited,
            },
        });
    };

    view! {
        <div class="text-edit">
            <div class="text-edit-path">{display_path}</div>
            <textarea prop:value=body on:change=on_change></textarea>
        </div>
    }
}

#[component]
fn Dock() -> impl IntoView {
    let runtime = use_desktop_runtime();

    let minimized = move || {
        runtime
            .state
            .get()
            .windows
            .into_iter()
            .filter(|w| w.minimized)
            .collect::<Vec<_>>()
    };

    view! {
        <nav class="dock">
            {DOCK_KINDS
                .into_iter()
                .map(|kind| {
                    let activate = move |_| activate_dock_kind(runtime, kind);
                    view! {
                        <button class="dock-item" on:click=activate>
                            {kind.title()}
                        </button>
                    }
                })
                .collect_view()}
            <div class="dock-minimized">
                <For each=minimized key=|win| win.id.0 let:win>
                    {{
                        let window_id = win.id;
                        view! {
                            <button
                                class="dock-item minimized"
                                on:click=move |_| {
                                    runtime
                                        .dispatch_action(DesktopAction::ToggleMinimized {
                                            window_id,
                                        })
                                }
                            >
                                {win.title.clone()}
                            </button>
                        }
                    }}
                </For>
            </div>
        </nav>
    }
}
