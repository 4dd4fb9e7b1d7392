//! Notification adapter for browser contexts.

use platform_host::{NotificationFuture, NotificationService};

/// Browser notification adapter backed by the Web Notifications API.
///
/// Delivery is best-effort: when the API is unavailable or permission has not
/// been granted, the error goes back to the caller and nothing is shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebNotificationService;

impl NotificationService for WebNotificationService {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move { deliver(title, body) })
    }
}

#[cfg(target_arch = "wasm32")]
fn deliver(title: &str, body: &str) -> Result<(), String> {
    let options = web_sys::NotificationOptions::new();
    options.set_body(body);
    web_sys::Notification::new_with_options(title, &options)
        .map(|_| ())
        .map_err(|err| format!("notification dispatch failed: {err:?}"))
}

#[cfg(not(target_arch = "wasm32"))]
fn deliver(_title: &str, _body: &str) -> Result<(), String> {
    Ok(())
}
