//! Authentication integration tests.
//!
//! Tests verify:
//! - Login returns a token for an existing headquarter and the right password
//! - Wrong passwords and unknown names are rejected with distinct statuses
//! - Protected routes require a valid, unexpired bearer token
//! - A valid token without any request body is served, never stalled

use axum::http::Method;

use practitioner_api::auth::now_secs;
use practitioner_api::{Claims, TokenPayload, TokenService};

use super::test_utils::{
    login, request, send, test_router, token_for, DIRECTOR_PASSWORD, TEST_SECRET,
};

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_success_returns_token() {
    let router = test_router().await;

    let before = now_secs();
    let token = login(&router, "HQ7").await;
    let after = now_secs();

    let claims: Claims<TokenPayload> = TokenService::new(TEST_SECRET)
        .verify_claims(&token)
        .unwrap();
    assert_eq!(claims.data.id, 7);
    assert_eq!(claims.exp - claims.iat, 300);
    assert!(claims.exp >= before + 300 && claims.exp <= after + 300);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let router = test_router().await;

    let (status, body) = send(
        &router,
        request(
            Method::POST,
            "/auth/login",
            None,
            Some(serde_json::json!({ "name": "HQ1", "password": "not-the-password" })),
        ),
    )
    .await;

    assert_eq!(status, 401);
    assert_eq!(body["error"], "invalid_credentials");
}

#[tokio::test]
async fn test_login_unknown_headquarter() {
    let router = test_router().await;

    let (status, body) = send(
        &router,
        request(
            Method::POST,
            "/auth/login",
            None,
            Some(serde_json::json!({ "name": "HQ404", "password": DIRECTOR_PASSWORD })),
        ),
    )
    .await;

    assert_eq!(status, 404);
    assert_eq!(body["error"], "headquarter_not_found");
}

#[tokio::test]
async fn test_login_malformed_body() {
    let router = test_router().await;

    let (status, body) = send(
        &router,
        request(
            Method::POST,
            "/auth/login",
            None,
            Some(serde_json::json!({ "name": "HQ1" })),
        ),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "invalid_body");
}

// =============================================================================
// Middleware
// =============================================================================

#[tokio::test]
async fn test_missing_token_rejected() {
    let router = test_router().await;

    let (status, body) = send(&router, request(Method::GET, "/practitioners", None, None)).await;

    assert_eq!(status, 401);
    assert_eq!(body["error"], "missing_token");
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let router = test_router().await;

    let (status, body) = send(
        &router,
        request(Method::GET, "/practitioners", Some("garbage.token.value"), None),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_rejected() {
    let router = test_router().await;
    let token = TokenService::new("some-other-secret")
        .issue(&TokenPayload { id: 1 }, 5)
        .unwrap();

    let (status, _) = send(
        &router,
        request(Method::GET, "/practitioners", Some(&token), None),
    )
    .await;

    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let router = test_router().await;
    let token = TokenService::new(TEST_SECRET)
        .issue_with_expiry(&TokenPayload { id: 1 }, now_secs() - 30)
        .unwrap();

    let (status, body) = send(
        &router,
        request(Method::GET, "/practitioners", Some(&token), None),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_valid_token_without_body_is_served() {
    let router = test_router().await;
    let token = login(&router, "HQ1").await;

    let (status, body) = send(
        &router,
        request(Method::GET, "/practitioners", Some(&token), None),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_get_by_id_with_token_and_no_body_does_not_stall() {
    let router = test_router().await;

    let (status, body) = send(
        &router,
        request(Method::GET, "/practitioners/1", Some(&token_for(1)), None),
    )
    .await;

    // Nothing stored yet: a defined 404, not a hang
    assert_eq!(status, 404);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let router = test_router().await;

    let (status, body) = send(&router, request(Method::GET, "/health", None, None)).await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
}
