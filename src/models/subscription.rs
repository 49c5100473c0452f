//! Push subscription models matching the browser PushSubscription JSON shape.

use serde::{Deserialize, Serialize};

/// Encryption material from the browser's push registration.
///
/// Opaque to this system; passed through to the push transport unmodified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// One device/browser endpoint registered for push notifications.
///
/// The endpoint string is the registry's primary key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscription {
    pub endpoint: String,
    pub keys: SubscriptionKeys,
    /// RFC 3339 timestamp assigned by the registry at registration time.
    pub subscribed_at: String,
}

/// Subscription payload as submitted by the browser.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingSubscription {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub keys: Option<SubscriptionKeys>,
}

/// Request body for registering a subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeRequest {
    pub subscription: IncomingSubscription,
}

/// Request body for removing a subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct UnsubscribeRequest {
    #[serde(default)]
    pub endpoint: String,
}

/// Subscriber count returned by the subscription endpoints.
#[derive(Debug, Serialize)]
pub struct SubscriberCount {
    pub subscribers: usize,
}
