//! Bearer-token authentication for protected routes.
//!
//! Requests must carry `Authorization: Bearer <token>`, where the token was
//! issued by `POST /auth/login`. On success the verified headquarter identity
//! is attached to the request as an [`AuthenticatedHeadquarter`] extension, so
//! handlers can read it with `Extension<AuthenticatedHeadquarter>`.
//!
//! | Condition                          | Status | `error`         |
//! |------------------------------------|--------|-----------------|
//! | No header, or no bearer token      | 401    | `missing_token` |
//! | Bad signature, malformed, expired  | 400    | `invalid_token` |
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware, routing::get};
//! use practitioner_api::auth::TokenService;
//! use practitioner_api::server::auth::auth_middleware;
//!
//! let tokens = TokenService::new("secret-key");
//! let app = Router::new()
//!     .route("/practitioners", get(handler))
//!     .route_layer(middleware::from_fn_with_state(tokens, auth_middleware));
//! ```

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, warn};

use crate::auth::{TokenPayload, TokenService};

use super::handlers::ErrorResponse;

// =============================================================================
// Types
// =============================================================================

/// Identity of the headquarter that presented a valid token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedHeadquarter {
    /// Headquarter id embedded in the token
    pub id: i64,
}

/// Reasons a request is rejected by [`auth_middleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenRejection {
    /// No bearer token in the Authorization header
    MissingToken,

    /// Token failed verification
    InvalidToken,
}

impl std::fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenRejection::MissingToken => write!(f, "Access denied: missing bearer token"),
            TokenRejection::InvalidToken => write!(f, "Invalid token"),
        }
    }
}

impl IntoResponse for TokenRejection {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            TokenRejection::MissingToken => (StatusCode::UNAUTHORIZED, "missing_token"),
            TokenRejection::InvalidToken => (StatusCode::BAD_REQUEST, "invalid_token"),
        };
        let message = self.to_string();

        // Bad tokens may indicate tampering; missing ones are routine
        match &self {
            TokenRejection::InvalidToken => warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Authentication failed: {}",
                message
            ),
            TokenRejection::MissingToken => debug!(
                error_type = error_type,
                status = status.as_u16(),
                "Authentication failed: {}",
                message
            ),
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);
        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Token Extraction
// =============================================================================

/// Extract the bearer token from request headers.
///
/// The scheme is matched case-insensitively. Returns `None` when the header is
/// absent, not valid UTF-8, uses another scheme, or carries an empty token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

// =============================================================================
// Axum Middleware
// =============================================================================

/// Axum middleware that verifies bearer tokens.
///
/// Valid requests continue with an [`AuthenticatedHeadquarter`] extension;
/// everything else is answered immediately.
pub async fn auth_middleware(
    State(tokens): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Result<Response, TokenRejection> {
    let token = bearer_token(request.headers()).ok_or(TokenRejection::MissingToken)?;

    let payload: TokenPayload = tokens
        .verify(token)
        .map_err(|_| TokenRejection::InvalidToken)?;

    debug!(headquarter_id = payload.id, "token verified");

    request
        .extensions_mut()
        .insert(AuthenticatedHeadquarter { id: payload.id });

    Ok(next.run(request).await)
}

// =============================================================================
// Tests
// =============================================================================
