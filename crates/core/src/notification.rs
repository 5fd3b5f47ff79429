//! Transient user-facing notifications (toasts).

use std::time::Duration;

use serde::Serialize;

/// How long a notification stays visible before it dismisses itself.
pub const DISMISS_AFTER: Duration = Duration::from_secs(3);

/// Visual treatment of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
}

/// A message shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// Holds at most one visible notification.
///
/// Showing a new notification replaces the current one instead of queueing.
#[derive(Debug, Clone, Default)]
pub struct NotificationSlot {
    current: Option<Notification>,
}

impl NotificationSlot {
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Show `notification`, returning the one it displaced.
    pub fn show(&mut self, notification: Notification) -> Option<Notification> {
        self.current.replace(notification)
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Remove and return the visible notification.
    pub const fn take(&mut self) -> Option<Notification> {
        self.current.take()
    }
}

/// Something that can display a [`Notification`].
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

impl Notifier for NotificationSlot {
    fn notify(&mut self, notification: Notification) {
        self.show(notification);
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, notification: Notification) {
        (**self).notify(notification);
    }
}
