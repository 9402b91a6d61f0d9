//! Optional admin key guarding document writes.
//!
//! Admin mode is a client-side state; when `SITE_ADMIN_KEY` is set, saves
//! additionally have to present it. Keys are compared in constant time.

use axum::{extract::Request, http::header, middleware::Next, response::IntoResponse, response::Response};
use subtle::ConstantTimeEq;

use crate::errors::AppError;

/// Header name for the admin key.
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Admin key layer function that takes the expected key as a parameter.
pub async fn admin_key_layer(expected_key: Option<String>, request: Request, next: Next) -> Response {
    // No key configured: writes are open, as in client-only admin mode
    let Some(expected) = expected_key else {
        return next.run(request).await;
    };

    let headers = request.headers();
    let provided = headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
        })
        .map(str::to_string);

    match provided {
        Some(key) if constant_time_compare(&key, &expected) => next.run(request).await,
        Some(_) => AppError::Unauthorized("Invalid admin key".to_string()).into_response(),
        None => AppError::Unauthorized("Missing admin key".to_string()).into_response(),
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::{middleware, routing::post, Router};
    use tower::ServiceExt;

    fn guarded(admin_key: Option<&str>) -> Router {
        let admin_key = admin_key.map(str::to_string);
        Router::new()
            .route("/save", post(|| async { "saved" }))
            .layer(middleware::from_fn(move |req, next| {
                admin_key_layer(admin_key.clone(), req, next)
            }))
    }

    async fn status_of(app: Router, sent: Option<(&str, &str)>) -> StatusCode {
        let mut request = HttpRequest::post("/save");
        if let Some((name, value)) = sent {
            request = request.header(name, value);
        }
        app.oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_no_configured_key_lets_writes_through() {
        assert_eq!(status_of(guarded(None), None).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_key_is_rejected() {
        assert_eq!(
            status_of(guarded(Some("s3cret")), None).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_wrong_bearer_token_is_rejected() {
        let sent = Some((header::AUTHORIZATION.as_str(), "Bearer guess"));
        assert_eq!(
            status_of(guarded(Some("s3cret")), sent).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_bearer_prefix_without_key_is_rejected() {
        let sent = Some((header::AUTHORIZATION.as_str(), "Bearer "));
        assert_eq!(
            status_of(guarded(Some("s3cret")), sent).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_key_prefix_is_not_enough() {
        let sent = Some((ADMIN_KEY_HEADER, "s3cre"));
        assert_eq!(
            status_of(guarded(Some("s3cret")), sent).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_matching_keys_pass() {
        let app = guarded(Some("s3cret"));
        assert_eq!(
            status_of(app.clone(), Some((ADMIN_KEY_HEADER, "s3cret"))).await,
            StatusCode::OK
        );
        let sent = Some((header::AUTHORIZATION.as_str(), "Bearer s3cret"));
        assert_eq!(status_of(app, sent).await, StatusCode::OK);
    }
}
