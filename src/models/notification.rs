//! Notification payloads and dispatch reporting.

use serde::{Deserialize, Serialize};

/// The message delivered to each subscriber.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub url: String,
}

/// Aggregate delivery counts for one notification's fan-out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOutcome {
    /// Title of the notification this outcome belongs to.
    pub title: String,
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Report produced by one dispatch run, one outcome per notification.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DispatchReport {
    pub notifications: Vec<NotificationOutcome>,
}

impl DispatchReport {
    /// Total successful deliveries across all notifications.
    pub fn delivered(&self) -> usize {
        self.notifications.iter().map(|n| n.delivered).sum()
    }

    /// Total failed deliveries across all notifications.
    pub fn failed(&self) -> usize {
        self.notifications.iter().map(|n| n.failed).sum()
    }
}

/// Summary returned by the scheduled check endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSummary {
    pub new_posts: usize,
    pub new_guides: usize,
    pub subscribers: usize,
    /// RFC 3339 timestamp of this check.
    pub last_checked: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notifications: Vec<NotificationOutcome>,
}

/// Request body for the operator broadcast endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub url: Option<String>,
}
