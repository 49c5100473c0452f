//! Bearer-token authentication for the cron/notify endpoints.
//!
//! Implements constant-time comparison to mitigate timing attacks.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::errors::{codes, ErrorDetails, ErrorResponse};

/// Bearer authentication layer function that takes the expected secret as a parameter.
pub async fn bearer_auth_layer(
    expected_secret: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    // If no secret is configured, allow all requests (dev mode)
    let Some(expected) = expected_secret else {
        return next.run(request).await;
    };

    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    match bearer {
        Some(token) if constant_time_compare(&token, &expected) => next.run(request).await,
        Some(_) => unauthorized_response("Invalid bearer token"),
        None => unauthorized_response("Missing bearer token"),
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    // Constant-time comparison
    a_bytes.ct_eq(b_bytes).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse {
        success: false,
        error: ErrorDetails {
            code: codes::UNAUTHORIZED.to_string(),
            message: message.to_string(),
        },
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}
