//! Scheduled check and operator broadcast endpoints.
//!
//! Both sit behind the bearer-auth layer; the check endpoint is what the
//! external cron invokes.

use std::collections::HashSet;

use axum::{extract::State, Json};
use chrono::Utc;

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    BroadcastRequest, CheckSummary, ContentRecord, NotificationOutcome, NotificationPayload,
};
use crate::pipeline::detect;
use crate::AppState;

/// POST /api/notify/check - Run the fetch → diff → dispatch pipeline once.
pub async fn run_check(State(state): State<AppState>) -> ApiResult<CheckSummary> {
    // Either list failing aborts the whole run; no partial notification
    let fetched = tokio::try_join!(state.content.fetch_posts(), state.content.fetch_guides());
    let (posts, guides) = match fetched {
        Ok(lists) => lists,
        Err(e) => return error(e),
    };

    let current_posts: HashSet<String> = posts.iter().map(|r| r.id.clone()).collect();
    let current_guides: HashSet<String> = guides.iter().map(|r| r.id.clone()).collect();

    // Diff and snapshot replacement form one critical section, so overlapping
    // invocations serialize instead of interleaving read-modify-write. The
    // snapshot is replaced before dispatch: a delivery outage is not retried.
    let now = Utc::now();
    let (new_post_ids, new_guide_ids) = {
        let mut snapshot = state.snapshot.lock().expect("snapshot lock poisoned");
        let new_post_ids = detect(&current_posts, &snapshot.posts);
        let new_guide_ids = detect(&current_guides, &snapshot.guides);
        snapshot.replace(current_posts, current_guides, now);
        (new_post_ids, new_guide_ids)
    };

    let new_posts: Vec<ContentRecord> = posts
        .into_iter()
        .filter(|r| new_post_ids.contains(&r.id))
        .collect();
    let new_guides: Vec<ContentRecord> = guides
        .into_iter()
        .filter(|r| new_guide_ids.contains(&r.id))
        .collect();

    let subscribers = state.registry.count();

    let mut notifications = Vec::new();
    if !new_posts.is_empty() || !new_guides.is_empty() {
        let recipients = state.registry.list();
        match state
            .dispatcher
            .notify_new(&new_posts, &new_guides, &recipients)
            .await
        {
            Ok(report) => notifications = report.notifications,
            Err(e) => return error(e),
        }
    }

    tracing::info!(
        "Check complete: {} new posts, {} new guides, {} subscribers",
        new_posts.len(),
        new_guides.len(),
        subscribers
    );

    success(CheckSummary {
        new_posts: new_posts.len(),
        new_guides: new_guides.len(),
        subscribers,
        last_checked: now.to_rfc3339(),
        notifications,
    })
}

/// POST /api/notify/broadcast - Send a one-off notification to all subscribers.
pub async fn broadcast(
    State(state): State<AppState>,
    Json(request): Json<BroadcastRequest>,
) -> ApiResult<NotificationOutcome> {
    // Validate required fields
    if request.title.trim().is_empty() {
        return error(AppError::Validation("Title is required".to_string()));
    }
    if request.body.trim().is_empty() {
        return error(AppError::Validation("Body is required".to_string()));
    }

    let payload = NotificationPayload {
        title: request.title,
        body: request.body,
        url: request
            .url
            .unwrap_or_else(|| state.config.site_url.clone()),
    };

    let recipients = state.registry.list();
    match state.dispatcher.fan_out(&payload, &recipients).await {
        Ok(outcome) => success(outcome),
        Err(e) => error(e),
    }
}
