//! Notification sink — the presentation-layer collaborator contract.
//!
//! RULE: The session decides *that* and *what* to notify; presentation
//! is someone else's job. Sinks receive a title and a message, nothing
//! more.

use serde::{Deserialize, Serialize};
use std::any::Any;

/// A single user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Receives notifications synchronously. Fire-and-forget from the
/// session's point of view — a sink must not fail.
pub trait NotificationSink: Send {
    fn notify(&mut self, notification: &Notification);

    /// For downcasting in tests and tooling only.
    fn as_any(&self) -> &dyn Any;
}

/// Default sink: routes notifications to the log.
#[derive(Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&mut self, notification: &Notification) {
        log::info!("{}: {}", notification.title, notification.message);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Sink that records everything it receives. Used by tests and the
/// runner to inspect what a session raised.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub received: Vec<Notification>,
}

impl NotificationSink for MemorySink {
    fn notify(&mut self, notification: &Notification) {
        self.received.push(notification.clone());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
