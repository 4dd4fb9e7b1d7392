//! Per-window-kind policy objects consulted by the codec and the reconciler.

use crate::model::{FinderViewMode, WindowContent, WindowKind, WindowPatch, WindowRecord};
use crate::routes::{ResolvedContent, RouteIssue};

/// Behavioral contract for one window kind.
///
/// Strategies keep the codec and the reconciliation engine kind-agnostic: all
/// identifier grammar, update comparison, and singleton policy live here.
pub trait WindowStrategy: Sync {
    /// The window kind this strategy governs.
    fn kind(&self) -> WindowKind;

    /// Whether a serialized identifier belongs to this kind.
    ///
    /// Default rule: the identifier is exactly the kind prefix, or the prefix
    /// followed by a `:` disambiguator.
    fn matches_identifier(&self, identifier: &str) -> bool {
        match identifier.strip_prefix(self.kind().identifier_prefix()) {
            Some("") => true,
            Some(rest) => rest.starts_with(':'),
            None => false,
        }
    }

    /// Serializes a record to its identifier, or `None` when the record has no
    /// stable identity (for example an unsaved editor buffer).
    fn identifier_for(&self, record: &WindowRecord) -> Option<String>;

    /// Reconstructs the desired window patch for an identifier of this kind.
    ///
    /// Path-shaped identifiers are resolved against `resolved`, the plain-data
    /// result of the shell's earlier async index lookups.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteIssue`] when the identifier is structurally invalid or
    /// names content absent from the index.
    fn parse_identifier(
        &self,
        identifier: &str,
        resolved: &ResolvedContent,
    ) -> Result<WindowPatch, RouteIssue>;

    /// The index path this identifier needs pre-resolved, if any.
    fn content_path(&self, _identifier: &str) -> Option<String> {
        None
    }

    /// Kind-specific difference check beyond generic geometry comparison.
    fn needs_update(&self, record: &WindowRecord, patch: &WindowPatch) -> bool;

    /// Whether at most one live window of this kind may exist.
    fn requires_special_reconciliation(&self) -> bool {
        false
    }
}

fn disambiguator(identifier: &str) -> Option<&str> {
    identifier
        .split_once(':')
        .map(|(_, rest)| rest)
        .filter(|rest| !rest.is_empty())
}

fn index_path(disambiguator: &str) -> String {
    format!("/{disambiguator}")
}

struct FinderStrategy;

impl WindowStrategy for FinderStrategy {
    fn kind(&self) -> WindowKind {
        WindowKind::Finder
    }

    fn identifier_for(&self, record: &WindowRecord) -> Option<String> {
        match &record.content {
            WindowContent::Finder { current_path, .. } if current_path == "/" => {
                Some("finder".to_string())
            }
            WindowContent::Finder { current_path, .. } => {
                Some(format!("finder:{}", current_path.trim_start_matches('/')))
            }
            _ => None,
        }
    }

    fn parse_identifier(
        &self,
        identifier: &str,
        _resolved: &ResolvedContent,
    ) -> Result<WindowPatch, RouteIssue> {
        let current_path = match disambiguator(identifier) {
            Some(rest) => index_path(rest),
            None => "/".to_string(),
        };
        Ok(WindowPatch {
            title: Some(WindowKind::Finder.title().to_string()),
            content: Some(WindowContent::Finder {
                current_path: current_path.clone(),
                view_mode: FinderViewMode::Icons,
                history: vec![current_path],
                history_index: 0,
            }),
            ..WindowPatch::default()
        })
    }

    fn needs_update(&self, record: &WindowRecord, patch: &WindowPatch) -> bool {
        let (
            WindowContent::Finder {
                current_path,
                view_mode,
                ..
            },
            Some(WindowContent::Finder {
                current_path: desired_path,
                view_mode: desired_mode,
                ..
            }),
        ) = (&record.content, patch.content.as_ref())
        else {
            return false;
        };
        current_path != desired_path || view_mode != desired_mode
    }
}

struct TextEditStrategy;

impl WindowStrategy for TextEditStrategy {
    fn kind(&self) -> WindowKind {
        WindowKind::TextEdit
    }

    fn identifier_for(&self, record: &WindowRecord) -> Option<String> {
        match &record.content {
            WindowContent::TextEdit {
                path: Some(path), ..
            } => Some(format!("textedit:{}", path.trim_start_matches('/'))),
            _ => None,
        }
    }

    fn content_path(&self, identifier: &str) -> Option<String> {
        disambiguator(identifier).map(index_path)
    }

    fn parse_identifier(
        &self,
        identifier: &str,
        resolved: &ResolvedContent,
    ) -> Result<WindowPatch, RouteIssue> {
        let Some(rest) = disambiguator(identifier) else {
            // Bare `textedit` opens a fresh unsaved buffer.
            return Ok(WindowPatch {
                title: Some("Untitled".to_string()),
                content: Some(WindowContent::TextEdit {
                    path: None,
                    body: String::new(),
                }),
                ..WindowPatch::default()
            });
        };
        let path = index_path(rest);
        let Some(record) = resolved.get(&path) else {
            return Err(RouteIssue::MissingContent {
                identifier: identifier.to_string(),
                path,
            });
        };
        Ok(WindowPatch {
            title: Some(record.title.clone()),
            content: Some(WindowContent::TextEdit {
                path: Some(path),
                body: record.body.clone(),
            }),
            ..WindowPatch::default()
        })
    }

    fn needs_update(&self, record: &WindowRecord, patch: &WindowPatch) -> bool {
        let (
            WindowContent::TextEdit { path, .. },
            Some(WindowContent::TextEdit {
                path: desired_path, ..
            }),
        ) = (&record.content, patch.content.as_ref())
        else {
            return false;
        };
        path != desired_path
    }
}

struct PdfViewerStrategy;

impl WindowStrategy for PdfViewerStrategy {
    fn kind(&self) -> WindowKind {
        WindowKind::PdfViewer
    }

    fn identifier_for(&self, record: &WindowRecord) -> Option<String> {
        match &record.content {
            WindowContent::PdfViewer { path } if !path.is_empty() => {
                Some(format!("pdfviewer:{}", path.trim_start_matches('/')))
            }
            _ => None,
        }
    }

    fn content_path(&self, identifier: &str) -> Option<String> {
        disambiguator(identifier).map(index_path)
    }

    fn parse_identifier(
        &self,
        identifier: &str,
        resolved: &ResolvedContent,
    ) -> Result<WindowPatch, RouteIssue> {
        let Some(rest) = disambiguator(identifier) else {
            return Err(RouteIssue::UnknownIdentifier {
                identifier: identifier.to_string(),
            });
        };
        let path = index_path(rest);
        let Some(record) = resolved.get(&path) else {
            return Err(RouteIssue::MissingContent {
                identifier: identifier.to_string(),
                path,
            });
        };
        Ok(WindowPatch {
            title: Some(record.title.clone()),
            content: Some(WindowContent::PdfViewer { path }),
            ..WindowPatch::default()
        })
    }

    fn needs_update(&self, record: &WindowRecord, patch: &WindowPatch) -> bool {
        let (
            WindowContent::PdfViewer { path },
            Some(WindowContent::PdfViewer { path: desired_path }),
        ) = (&record.content, patch.content.as_ref())
        else {
            return false;
        };
        path != desired_path
    }
}

struct PhotosStrategy;

impl PhotosStrategy {
    fn split_album_photo(identifier: &str) -> Option<(&str, &str)> {
        let rest = disambiguator(identifier)?;
        let (album, photo) = rest.split_once(':')?;
        if album.is_empty() || photo.is_empty() || photo.contains(':') {
            return None;
        }
        Some((album, photo))
    }
}

impl WindowStrategy for PhotosStrategy {
    fn kind(&self) -> WindowKind {
        WindowKind::Photos
    }

    fn identifier_for(&self, record: &WindowRecord) -> Option<String> {
        match &record.content {
            WindowContent::Photos { album, photo } if !album.is_empty() && !photo.is_empty() => {
                Some(format!("photos:{album}:{photo}"))
            }
            _ => None,
        }
    }

    fn content_path(&self, identifier: &str) -> Option<String> {
        Self::split_album_photo(identifier).map(|(album, photo)| format!("/{album}/{photo}"))
    }

    fn parse_identifier(
        &self,
        identifier: &str,
        resolved: &ResolvedContent,
    ) -> Result<WindowPatch, RouteIssue> {
        let Some((album, photo)) = Self::split_album_photo(identifier) else {
            return Err(RouteIssue::UnknownIdentifier {
                identifier: identifier.to_string(),
            });
        };
        let path = format!("/{album}/{photo}");
        let Some(record) = resolved.get(&path) else {
            return Err(RouteIssue::MissingContent {
                identifier: identifier.to_string(),
                path,
            });
        };
        Ok(WindowPatch {
            title: Some(record.title.clone()),
            content: Some(WindowContent::Photos {
                album: album.to_string(),
                photo: photo.to_string(),
            }),
            ..WindowPatch::default()
        })
    }

    fn needs_update(&self, record: &WindowRecord, patch: &WindowPatch) -> bool {
        let (
            WindowContent::Photos { album, photo },
            Some(WindowContent::Photos {
                album: desired_album,
                photo: desired_photo,
            }),
        ) = (&record.content, patch.content.as_ref())
        else {
            return false;
        };
        album != desired_album || photo != desired_photo
    }

    fn requires_special_reconciliation(&self) -> bool {
        true
    }
}

struct TerminalStrategy;

impl WindowStrategy for TerminalStrategy {
    fn kind(&self) -> WindowKind {
        WindowKind::Terminal
    }

    fn matches_identifier(&self, identifier: &str) -> bool {
        identifier == "terminal"
    }

    fn identifier_for(&self, record: &WindowRecord) -> Option<String> {
        match &record.content {
            WindowContent::Terminal => Some("terminal".to_string()),
            _ => None,
        }
    }

    fn parse_identifier(
        &self,
        _identifier: &str,
        _resolved: &ResolvedContent,
    ) -> Result<WindowPatch, RouteIssue> {
        Ok(WindowPatch {
            title: Some(WindowKind::Terminal.title().to_string()),
            content: Some(WindowContent::Terminal),
            ..WindowPatch::default()
        })
    }

    fn needs_update(&self, _record: &WindowRecord, _patch: &WindowPatch) -> bool {
        false
    }
}

struct BrowserStrategy;

impl WindowStrategy for BrowserStrategy {
    fn kind(&self) -> WindowKind {
        WindowKind::Browser
    }

    fn identifier_for(&self, record: &WindowRecord) -> Option<String> {
        match &record.content {
            WindowContent::Browser { url } if !url.is_empty() => Some(format!("browser:{url}")),
            _ => None,
        }
    }

    fn parse_identifier(
        &self,
        identifier: &str,
        _resolved: &ResolvedContent,
    ) -> Result<WindowPatch, RouteIssue> {
        let Some(url) = disambiguator(identifier) else {
            return Err(RouteIssue::UnknownIdentifier {
                identifier: identifier.to_string(),
            });
        };
        Ok(WindowPatch {
            title: Some(WindowKind::Browser.title().to_string()),
            content: Some(WindowContent::Browser {
                url: url.to_string(),
            }),
            ..WindowPatch::default()
        })
    }

    fn needs_update(&self, record: &WindowRecord, patch: &WindowPatch) -> bool {
        let (WindowContent::Browser { url }, Some(WindowContent::Browser { url: desired_url })) =
            (&record.content, patch.content.as_ref())
        else {
            return false;
        };
        url != desired_url
    }
}

static STRATEGY_REGISTRY: [&dyn WindowStrategy; 6] = [
    &FinderStrategy,
    &TextEditStrategy,
    &PdfViewerStrategy,
    &PhotosStrategy,
    &TerminalStrategy,
    &BrowserStrategy,
];

pub fn strategy_registry() -> &'static [&'static dyn WindowStrategy] {
    &STRATEGY_REGISTRY
}

pub fn strategy_for_kind(kind: WindowKind) -> &'static dyn WindowStrategy {
    strategy_registry()
        .iter()
        .copied()
        .find(|strategy| strategy.kind() == kind)
        .expect("strategy registered for kind")
}

pub fn strategy_for_identifier(identifier: &str) -> Option<&'static dyn WindowStrategy> {
    strategy_registry()
        .iter()
        .copied()
        .find(|strategy| strategy.matches_identifier(identifier))
}
