use std::rc::Rc;

use desktop_shell::{DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use platform_host::{ContentIndexService, MemoryContentIndex};
use platform_host_web::browser_host_services;

/// Demo content served by the in-memory index until a real build step
/// generates one.
const DEMO_CONTENT: &str = r#"[
    {"path": "/documents/readme", "title": "Readme", "app_type": "textedit", "file_extension": "txt", "body": "Welcome to the desktop.\n\nEvery window you open lives in the URL, so the back button and bookmarks restore the layout you were looking at."},
    {"path": "/documents/notes", "title": "Notes", "app_type": "textedit", "file_extension": "txt", "body": "Scratch space."},
    {"path": "/resume", "title": "Resume", "app_type": "pdfviewer", "file_extension": "pdf", "body": ""},
    {"path": "/vacation/sunset", "title": "Sunset", "app_type": "photos", "file_extension": "jpg", "body": ""},
    {"path": "/vacation/ocean", "title": "Ocean", "app_type": "photos", "file_extension": "jpg", "body": ""}
]"#;

fn demo_content_index() -> Rc<dyn ContentIndexService> {
    let index = MemoryContentIndex::default();
    if let Err(err) = index.seed_json(DEMO_CONTENT) {
        logging::warn!("demo content seed failed: {err}");
    }
    Rc::new(index)
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Web Desktop" />
        <Meta name="description" content="A desktop-style site shell with URL-addressable windows." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    let host_services = browser_host_services(demo_content_index());

    view! {
        <DesktopProvider host_services>
            <DesktopShell />
        </DesktopProvider>
    }
}
