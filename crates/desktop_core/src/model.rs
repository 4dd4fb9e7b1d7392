use serde::{Deserialize, Serialize};

pub const Z_INDEX_BASE: u32 = 100;
pub const CASCADE_OFFSET_PX: i32 = 24;
pub const CASCADE_SLOTS: u64 = 8;
pub const DEFAULT_WINDOW_X: i32 = 96;
pub const DEFAULT_WINDOW_Y: i32 = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowKind {
    Finder,
    TextEdit,
    PdfViewer,
    Photos,
    Terminal,
    Browser,
}

impl WindowKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Finder => "Finder",
            Self::TextEdit => "TextEdit",
            Self::PdfViewer => "PDF Viewer",
            Self::Photos => "Photos",
            Self::Terminal => "Terminal",
            Self::Browser => "Browser",
        }
    }

    pub fn identifier_prefix(self) -> &'static str {
        match self {
            Self::Finder => "finder",
            Self::TextEdit => "textedit",
            Self::PdfViewer => "pdfviewer",
            Self::Photos => "photos",
            Self::Terminal => "terminal",
            Self::Browser => "browser",
        }
    }

    pub fn default_size(self) -> WindowSize {
        match self {
            Self::Finder => WindowSize {
                width: 640,
                height: 440,
            },
            Self::TextEdit => WindowSize {
                width: 560,
                height: 480,
            },
            Self::PdfViewer => WindowSize {
                width: 680,
                height: 760,
            },
            Self::Photos => WindowSize {
                width: 720,
                height: 540,
            },
            Self::Terminal => WindowSize {
                width: 560,
                height: 360,
            },
            Self::Browser => WindowSize {
                width: 860,
                height: 600,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinderViewMode {
    Icons,
    List,
    Columns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowContent {
    Finder {
        current_path: String,
        view_mode: FinderViewMode,
        history: Vec<String>,
        history_index: usize,
    },
    TextEdit {
        path: Option<String>,
        body: String,
    },
    PdfViewer {
        path: String,
    },
    Photos {
        album: String,
        photo: String,
    },
    Terminal,
    Browser {
        url: String,
    },
}

impl WindowContent {
    pub fn kind(&self) -> WindowKind {
        match self {
            Self::Finder { .. } => WindowKind::Finder,
            Self::TextEdit { .. } => WindowKind::TextEdit,
            Self::PdfViewer { .. } => WindowKind::PdfViewer,
            Self::Photos { .. } => WindowKind::Photos,
            Self::Terminal => WindowKind::Terminal,
            Self::Browser { .. } => WindowKind::Browser,
        }
    }

    pub fn default_for(kind: WindowKind) -> Self {
        match kind {
            WindowKind::Finder => Self::Finder {
                current_path: "/".to_string(),
                view_mode: FinderViewMode::Icons,
                history: vec!["/".to_string()],
                history_index: 0,
            },
            WindowKind::TextEdit => Self::TextEdit {
                path: None,
                body: String::new(),
            },
            WindowKind::PdfViewer => Self::PdfViewer {
                path: String::new(),
            },
            WindowKind::Photos => Self::Photos {
                album: String::new(),
                photo: String::new(),
            },
            WindowKind::Terminal => Self::Terminal,
            WindowKind::Browser => Self::Browser { url: String::new() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub kind: WindowKind,
    pub title: String,
    pub position: WindowPosition,
    pub size: WindowSize,
    pub z_index: u32,
    pub minimized: bool,
    pub content: WindowContent,
    #[serde(skip)]
    pub skip_next_route_sync: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    pub next_window_id: u64,
    pub windows: Vec<WindowRecord>,
    pub max_z_index: u32,
    pub active_window: Option<WindowId>,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            next_window_id: 1,
            windows: Vec::new(),
            max_z_index: Z_INDEX_BASE - 1,
            active_window: None,
        }
    }
}

impl DesktopState {
    pub fn window(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    pub fn visible_windows(&self) -> Vec<&WindowRecord> {
        let mut visible: Vec<&WindowRecord> =
            self.windows.iter().filter(|w| !w.minimized).collect();
        visible.sort_by_key(|w| w.z_index);
        visible
    }

    pub fn topmost_visible(&self) -> Option<&WindowRecord> {
        self.windows
            .iter()
            .filter(|w| !w.minimized)
            .max_by_key(|w| w.z_index)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub kind: WindowKind,
    pub title: Option<String>,
    pub position: Option<WindowPosition>,
    pub size: Option<WindowSize>,
    pub content: Option<WindowContent>,
}

impl OpenWindowRequest {
    pub fn new(kind: WindowKind) -> Self {
        Self {
            kind,
            title: None,
            position: None,
            size: None,
            content: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowPatch {
    pub title: Option<String>,
    pub position: Option<WindowPosition>,
    pub size: Option<WindowSize>,
    pub content: Option<WindowContent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub identifier: String,
    pub config: WindowPatch,
}
