//! Content index service contracts and the shared record model.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

/// One indexed content entry addressable by virtual path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Virtual path, e.g. `/documents/readme`.
    pub path: String,
    /// Display title used for window chrome.
    pub title: String,
    /// Stable token naming the app type that opens this entry.
    pub app_type: String,
    /// Lowercase file extension without the leading dot.
    pub file_extension: String,
    /// Inline body for text-like entries; empty otherwise.
    pub body: String,
}

/// Object-safe boxed future used by [`ContentIndexService`].
pub type ContentIndexFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host lookup service over the pre-built content index.
///
/// The index itself is built outside the desktop runtime; the runtime only
/// resolves paths it finds in window identifiers.
pub trait ContentIndexService {
    /// Resolves a virtual path to its indexed record, if any.
    fn resolve<'a>(
        &'a self,
        path: &'a str,
    ) -> ContentIndexFuture<'a, Result<Option<ContentRecord>, String>>;
}

/// No-op index for unsupported targets; resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopContentIndex;

impl ContentIndexService for NoopContentIndex {
    fn resolve<'a>(
        &'a self,
        _path: &'a str,
    ) -> ContentIndexFuture<'a, Result<Option<ContentRecord>, String>> {
        Box::pin(async { Ok(None) })
    }
}

/// In-memory index keyed by path, seeded by tests and demo sites.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentIndex {
    inner: Rc<RefCell<HashMap<String, ContentRecord>>>,
}

impl MemoryContentIndex {
    /// Inserts one record, replacing any previous entry at the same path.
    pub fn insert(&self, record: ContentRecord) {
        self.inner.borrow_mut().insert(record.path.clone(), record);
    }

    /// Seeds the index from a JSON array of records.
    ///
    /// # Errors
    ///
    /// Returns an error when `json` is not a valid record array.
    pub fn seed_json(&self, json: &str) -> Result<(), String> {
        let records: Vec<ContentRecord> = serde_json::from_str(json).map_err(|e| e.to_string())?;
        for record in records {
            self.insert(record);
        }
        Ok(())
    }
}

impl ContentIndexService for MemoryContentIndex {
    fn resolve<'a>(
        &'a self,
        path: &'a str,
    ) -> ContentIndexFuture<'a, Result<Option<ContentRecord>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(path).cloned()) })
    }
}
