//! Subscription management endpoints.

use axum::{extract::State, Json};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{SubscribeRequest, SubscriberCount, UnsubscribeRequest};
use crate::AppState;

/// POST /api/subscriptions - Register a push subscription.
///
/// Registering an endpoint that already exists overwrites the stored keys.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> ApiResult<SubscriberCount> {
    let subscription = request.subscription;

    // Validate required fields
    if subscription.endpoint.trim().is_empty() {
        return error(AppError::Validation(
            "Subscription endpoint is required".to_string(),
        ));
    }
    let Some(keys) = subscription.keys else {
        return error(AppError::Validation(
            "Subscription keys are required".to_string(),
        ));
    };

    state.registry.add(subscription.endpoint, keys);
    tracing::debug!("Subscription registered, {} total", state.registry.count());

    success(SubscriberCount {
        subscribers: state.registry.count(),
    })
}

/// DELETE /api/subscriptions - Remove a push subscription.
///
/// Removing an endpoint that was never registered succeeds without effect.
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(request): Json<UnsubscribeRequest>,
) -> ApiResult<SubscriberCount> {
    if request.endpoint.trim().is_empty() {
        return error(AppError::Validation(
            "Subscription endpoint is required".to_string(),
        ));
    }

    state.registry.remove(&request.endpoint);

    success(SubscriberCount {
        subscribers: state.registry.count(),
    })
}

/// GET /api/subscriptions/count - Current number of registered subscriptions.
pub async fn subscriber_count(State(state): State<AppState>) -> ApiResult<SubscriberCount> {
    success(SubscriberCount {
        subscribers: state.registry.count(),
    })
}
