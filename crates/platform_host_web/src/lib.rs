//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer for location,
//! history, and notification services. On non-wasm targets every adapter
//! degrades to a harmless no-op so the workspace stays testable natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod adapters;
pub mod location;
pub mod notifications;

pub use adapters::browser_host_services;
pub use location::BrowserLocationService;
pub use notifications::WebNotificationService;
