//! Typed host-domain contracts shared by the desktop runtime and its browser adapters.
//!
//! This crate is the API-first boundary for platform services: content-index
//! lookup, browser location/history access, and notification delivery. Concrete
//! browser adapters live in `platform_host_web`; the `Noop*` and `Memory*`
//! adapters here cover unsupported targets and native tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod content_index;
pub mod host;
pub mod location;
pub mod notifications;

pub use content_index::{
    ContentIndexFuture, ContentIndexService, ContentRecord, MemoryContentIndex, NoopContentIndex,
};
pub use host::DesktopHostServices;
pub use location::{
    LocationService, MemoryLocationService, NoopLocationService, RecordedNavigation,
};
pub use notifications::{
    MemoryNotificationService, NoopNotificationService, NotificationFuture, NotificationService,
};
