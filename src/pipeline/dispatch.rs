//! Notification formatting and fan-out.
//!
//! Each new record becomes one notification; each notification is sent to
//! every subscriber independently and the outcomes are aggregated. A single
//! failed delivery never blocks the remaining sends, is never retried, and
//! never evicts the subscription.

use std::sync::Arc;

use futures::future;

use crate::errors::AppError;
use crate::models::{
    ContentRecord, DispatchReport, NotificationOutcome, NotificationPayload, PushSubscription,
};
use crate::push::PushTransport;

const NEW_POST_TITLE: &str = "New post on Chronicle";
const NEW_POST_FALLBACK_BODY: &str = "A new post just went live.";
const NEW_GUIDE_TITLE: &str = "New guide on Chronicle";
const NEW_GUIDE_BODY: &str = "Fresh guides are now available.";

/// Formats notifications for new content and fans them out to subscribers.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn PushTransport>,
    site_url: String,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn PushTransport>, site_url: String) -> Self {
        Self {
            transport,
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build and deliver one notification per new record.
    pub async fn notify_new(
        &self,
        new_posts: &[ContentRecord],
        new_guides: &[ContentRecord],
        subscribers: &[PushSubscription],
    ) -> Result<DispatchReport, AppError> {
        let mut payloads = Vec::with_capacity(new_posts.len() + new_guides.len());
        payloads.extend(new_posts.iter().map(|record| self.post_payload(record)));
        payloads.extend(new_guides.iter().map(|_| self.guide_payload()));

        let mut report = DispatchReport::default();
        for payload in &payloads {
            report
                .notifications
                .push(self.fan_out(payload, subscribers).await?);
        }

        tracing::info!(
            "Dispatched {} notifications to {} subscribers ({} delivered, {} failed)",
            payloads.len(),
            subscribers.len(),
            report.delivered(),
            report.failed()
        );
        Ok(report)
    }

    /// Send one payload to every subscriber, collecting aggregate counts.
    ///
    /// All sends are issued together and joined once every one has settled.
    pub async fn fan_out(
        &self,
        payload: &NotificationPayload,
        subscribers: &[PushSubscription],
    ) -> Result<NotificationOutcome, AppError> {
        let bytes = serde_json::to_vec(payload)?;

        let sends = subscribers.iter().map(|subscription| {
            let transport = Arc::clone(&self.transport);
            let bytes = &bytes;
            async move {
                transport
                    .send(subscription, bytes)
                    .await
                    .map_err(|e| (subscription.endpoint.clone(), e))
            }
        });

        let results = future::join_all(sends).await;

        let mut delivered = 0;
        let mut failed = 0;
        for result in results {
            match result {
                Ok(()) => delivered += 1,
                Err((endpoint, e)) => {
                    tracing::debug!("Delivery to {} failed: {}", endpoint, e);
                    failed += 1;
                }
            }
        }

        Ok(NotificationOutcome {
            title: payload.title.clone(),
            attempted: subscribers.len(),
            delivered,
            failed,
        })
    }

    fn post_payload(&self, record: &ContentRecord) -> NotificationPayload {
        let body = if record.title.is_empty() {
            NEW_POST_FALLBACK_BODY.to_string()
        } else {
            record.title.clone()
        };

        NotificationPayload {
            title: NEW_POST_TITLE.to_string(),
            body,
            url: format!("{}/blog/{}", self.site_url, record.id),
        }
    }

    fn guide_payload(&self) -> NotificationPayload {
        NotificationPayload {
            title: NEW_GUIDE_TITLE.to_string(),
            body: NEW_GUIDE_BODY.to_string(),
            url: format!("{}/guides", self.site_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::SubscriptionKeys;
    use crate::push::PushError;

    /// Transport that records sends and fails for configured endpoints.
    struct FlakyTransport {
        fail_endpoints: HashSet<String>,
        sent: Mutex<Vec<String>>,
    }

    impl FlakyTransport {
        fn new(fail_endpoints: &[&str]) -> Self {
            Self {
                fail_endpoints: fail_endpoints.iter().map(|s| s.to_string()).collect(),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PushTransport for FlakyTransport {
        async fn send(
            &self,
            subscription: &PushSubscription,
            _payload: &[u8],
        ) -> Result<(), PushError> {
            self.sent
                .lock()
                .unwrap()
                .push(subscription.endpoint.clone());
            if self.fail_endpoints.contains(&subscription.endpoint) {
                Err(PushError::Transport("simulated failure".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn subscriber(endpoint: &str) -> PushSubscription {
        PushSubscription {
            endpoint: endpoint.to_string(),
            keys: SubscriptionKeys {
                p256dh: "pk".to_string(),
                auth: "auth".to_string(),
            },
            subscribed_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    fn dispatcher(transport: Arc<FlakyTransport>) -> Dispatcher {
        Dispatcher::new(transport, "https://chronicle.example".to_string())
    }

    #[tokio::test]
    async fn test_fan_out_isolates_failures() {
        let transport = Arc::new(FlakyTransport::new(&["https://push.example/b"]));
        let dispatcher = dispatcher(Arc::clone(&transport));
        let subscribers = vec![
            subscriber("https://push.example/a"),
            subscriber("https://push.example/b"),
            subscriber("https://push.example/c"),
        ];

        let report = dispatcher
            .notify_new(&[ContentRecord::new("rec1", "Hello")], &[], &subscribers)
            .await
            .unwrap();

        assert_eq!(report.notifications.len(), 1);
        let outcome = &report.notifications[0];
        assert_eq!(outcome.attempted, 3);
        assert_eq!(outcome.delivered, 2);
        assert_eq!(outcome.failed, 1);

        // The failing subscriber did not stop the third send
        assert_eq!(transport.sent.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_one_notification_per_record() {
        let transport = Arc::new(FlakyTransport::new(&[]));
        let dispatcher = dispatcher(Arc::clone(&transport));
        let subscribers = vec![subscriber("https://push.example/a")];

        let report = dispatcher
            .notify_new(
                &[
                    ContentRecord::new("rec1", "First"),
                    ContentRecord::new("rec2", "Second"),
                ],
                &[ContentRecord::new("rec3", "Guide")],
                &subscribers,
            )
            .await
            .unwrap();

        assert_eq!(report.notifications.len(), 3);
        assert_eq!(report.delivered(), 3);
        assert_eq!(transport.sent.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_post_payload_links_record() {
        let transport = Arc::new(FlakyTransport::new(&[]));
        let dispatcher = dispatcher(transport);

        let payload = dispatcher.post_payload(&ContentRecord::new("rec42", "Shipping season"));
        assert_eq!(payload.title, NEW_POST_TITLE);
        assert_eq!(payload.body, "Shipping season");
        assert_eq!(payload.url, "https://chronicle.example/blog/rec42");
    }

    #[tokio::test]
    async fn test_post_payload_empty_title_fallback() {
        let transport = Arc::new(FlakyTransport::new(&[]));
        let dispatcher = dispatcher(transport);

        let payload = dispatcher.post_payload(&ContentRecord::new("rec42", ""));
        assert_eq!(payload.body, NEW_POST_FALLBACK_BODY);
    }

    #[tokio::test]
    async fn test_guide_payload_targets_listing() {
        let transport = Arc::new(FlakyTransport::new(&[]));
        let dispatcher = dispatcher(transport);

        let payload = dispatcher.guide_payload();
        assert_eq!(payload.title, NEW_GUIDE_TITLE);
        assert_eq!(payload.url, "https://chronicle.example/guides");
    }

    #[tokio::test]
    async fn test_no_subscribers_reports_zero_counts() {
        let transport = Arc::new(FlakyTransport::new(&[]));
        let dispatcher = dispatcher(Arc::clone(&transport));

        let report = dispatcher
            .notify_new(&[ContentRecord::new("rec1", "Hello")], &[], &[])
            .await
            .unwrap();

        assert_eq!(report.notifications[0].attempted, 0);
        assert_eq!(report.delivered(), 0);
        assert_eq!(report.failed(), 0);
    }
}
