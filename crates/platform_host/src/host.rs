//! Host service bundle injected into the desktop runtime.

use std::rc::Rc;

use crate::{
    ContentIndexService, LocationService, NoopContentIndex, NoopLocationService,
    NoopNotificationService, NotificationService,
};

/// Host service bundle selected before the desktop runtime mounts.
///
/// All environment-specific adapter selection happens in the composition
/// crates; the runtime only ever sees these trait objects.
#[derive(Clone)]
pub struct DesktopHostServices {
    /// Content index lookup used to resolve path-shaped window identifiers.
    pub content_index: Rc<dyn ContentIndexService>,
    /// Browser location/history access for URL synchronization.
    pub location: Rc<dyn LocationService>,
    /// User-visible notification delivery.
    pub notifications: Rc<dyn NotificationService>,
}

impl DesktopHostServices {
    /// Returns a bundle of no-op services for unsupported targets and tests.
    pub fn noop() -> Self {
        Self {
            content_index: Rc::new(NoopContentIndex),
            location: Rc::new(NoopLocationService),
            notifications: Rc::new(NoopNotificationService),
        }
    }
}
