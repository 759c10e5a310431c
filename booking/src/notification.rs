//! Toast-style notifications shown to the traveller.

use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

/// How a notification should be presented
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Something went right
    Success,
    /// The traveller needs to fix something
    Error,
}

/// A short, non-blocking message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Headline
    pub title: String,
    /// One-sentence detail
    pub description: String,
    /// Presentation
    pub severity: Severity,
}

impl Notification {
    /// Notification with the given texts
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    /// Shown once a booking goes through
    #[must_use]
    pub fn booking_successful() -> Self {
        Self::new(
            "Booking Successful!",
            "Your bus ticket has been booked successfully. \
             You will receive a confirmation email shortly.",
            Severity::Success,
        )
    }

    /// Shown when checkout is submitted with blank passenger fields
    #[must_use]
    pub fn incomplete_details() -> Self {
        Self::new(
            "Incomplete Details",
            "Please fill in all passenger details",
            Severity::Error,
        )
    }
}

/// Delivers notifications to wherever the traveller sees them
pub trait Notifier: Send + Sync {
    /// Show a notification
    fn notify(&self, notification: &Notification);
}

/// Writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.severity {
            Severity::Success => tracing::info!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            ),
            Severity::Error => tracing::warn!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            ),
        }
    }
}

/// Keeps every notification it receives
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far, oldest first
    #[must_use]
    pub fn received(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}
