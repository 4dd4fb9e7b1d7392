//! Concrete adapter assembly for browser-hosted builds.

use std::rc::Rc;

use platform_host::{ContentIndexService, DesktopHostServices};

use crate::{BrowserLocationService, WebNotificationService};

/// Bundles the browser adapters into a [`DesktopHostServices`] set.
///
/// The content index is injected rather than constructed here because its
/// contents are a site concern; the entry layer seeds it before mounting the
/// desktop runtime.
pub fn browser_host_services(content_index: Rc<dyn ContentIndexService>) -> DesktopHostServices {
    DesktopHostServices {
        content_index,
        location: Rc::new(BrowserLocationService),
        notifications: Rc::new(WebNotificationService),
    }
}
