//! Browser location/history service contracts and adapters.

use std::{cell::RefCell, rc::Rc};

/// One navigation recorded by [`MemoryLocationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedNavigation {
    /// Absolute-path URL passed to `navigate`.
    pub url: String,
    /// Whether the navigation replaced the current history entry.
    pub replace: bool,
}

/// Host service for reading and writing the browser location.
///
/// The underlying History/Location calls are synchronous on every supported
/// host, so this trait is synchronous as well.
pub trait LocationService {
    /// Returns the current query string, leading `?` included when non-empty.
    fn search(&self) -> String;

    /// Navigates to `url`, pushing a history entry or replacing the current one.
    ///
    /// # Errors
    ///
    /// Returns an error when the host rejects the history mutation.
    fn navigate(&self, url: &str, replace: bool) -> Result<(), String>;

    /// Registers a listener invoked on history traversal (back/forward).
    ///
    /// Programmatic [`LocationService::navigate`] calls never fire listeners,
    /// matching `history.pushState` semantics.
    fn on_location_change(&self, listener: Rc<dyn Fn()>);
}

/// No-op location service for unsupported targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLocationService;

impl LocationService for NoopLocationService {
    fn search(&self) -> String {
        String::new()
    }

    fn navigate(&self, _url: &str, _replace: bool) -> Result<(), String> {
        Ok(())
    }

    fn on_location_change(&self, _listener: Rc<dyn Fn()>) {}
}

/// In-memory location service recording navigations for tests.
#[derive(Clone, Default)]
pub struct MemoryLocationService {
    inner: Rc<RefCell<MemoryLocationInner>>,
}

#[derive(Default)]
struct MemoryLocationInner {
    search: String,
    navigations: Vec<RecordedNavigation>,
    listeners: Vec<Rc<dyn Fn()>>,
}

impl MemoryLocationService {
    /// Sets the current query string without recording a navigation.
    pub fn set_search(&self, search: impl Into<String>) {
        self.inner.borrow_mut().search = search.into();
    }

    /// Returns the navigations recorded so far, oldest first.
    pub fn navigations(&self) -> Vec<RecordedNavigation> {
        self.inner.borrow().navigations.clone()
    }

    /// Simulates a history traversal: restores `search`, then fires listeners.
    pub fn emit_change(&self, search: impl Into<String>) {
        let listeners: Vec<Rc<dyn Fn()>> = {
            let mut inner = self.inner.borrow_mut();
            inner.search = search.into();
            inner.listeners.clone()
        };
        for listener in listeners {
            listener();
        }
    }
}

impl LocationService for MemoryLocationService {
    fn search(&self) -> String {
        self.inner.borrow().search.clone()
    }

    fn navigate(&self, url: &str, replace: bool) -> Result<(), String> {
        let mut inner = self.inner.borrow_mut();
        inner.search = match url.find('?') {
            Some(idx) => url[idx..].to_string(),
            None => String::new(),
        };
        inner.navigations.push(RecordedNavigation {
            url: url.to_string(),
            replace,
        });
        Ok(())
    }

    fn on_location_change(&self, listener: Rc<dyn Fn()>) {
        self.inner.borrow_mut().listeners.push(listener);
    }
}
