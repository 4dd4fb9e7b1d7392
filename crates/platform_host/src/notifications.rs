//! Notification service contracts and adapters.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`NotificationService`].
pub type NotificationFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for user-visible notifications.
pub trait NotificationService {
    /// Dispatches a notification message.
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>>;
}

/// No-op notification service for unsupported targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn notify<'a>(
        &'a self,
        _title: &'a str,
        _body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

/// In-memory notification service recording delivered messages for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotificationService {
    inner: Rc<RefCell<Vec<(String, String)>>>,
}

impl MemoryNotificationService {
    /// Returns the `(title, body)` pairs delivered so far, oldest first.
    pub fn delivered(&self) -> Vec<(String, String)> {
        self.inner.borrow().clone()
    }
}

impl NotificationService for MemoryNotificationService {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .push((title.to_string(), body.to_string()));
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_notifications_record_in_delivery_order() {
        let notifications = MemoryNotificationService::default();
        let notifications_obj: &dyn NotificationService = &notifications;

        block_on(notifications_obj.notify("File not found", "/missing")).expect("notify");
        block_on(notifications_obj.notify("Done", "ok")).expect("notify");

        assert_eq!(
            notifications.delivered(),
            vec![
                ("File not found".to_string(), "/missing".to_string()),
                ("Done".to_string(), "ok".to_string()),
            ]
        );
    }

    #[test]
    fn noop_notifications_succeed_silently() {
        let notifications = NoopNotificationService;
        let notifications_obj: &dyn NotificationService = &notifications;
        block_on(notifications_obj.notify("x", "y")).expect("notify");
    }
}
