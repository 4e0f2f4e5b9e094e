//! Router configuration for the practitioner API.
//!
//! # Route Structure
//!
//! ```text
//! /health                  GET                 - Health check (public)
//! /auth/login              POST                - Login (public)
//! /practitioners           GET, POST           - List / create (protected)
//! /practitioners/{id}      GET, PUT, DELETE    - Read / update / delete (protected)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use practitioner_api::server::routes::{create_router, RouterConfig};
//! use practitioner_api::store::SqliteStore;
//!
//! let store = Arc::new(SqliteStore::open("practitioners.db")?);
//! let config = RouterConfig::new("signing-secret", "director-password")
//!     .with_cors_origins(vec!["https://example.com".to_string()]);
//!
//! let router = create_router(store, config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::auth_middleware;
use super::handlers::{
    create_practitioner_handler, delete_practitioner_handler, get_practitioner_handler,
    health_handler, list_practitioners_handler, login_handler, update_practitioner_handler,
    AppState,
};
use crate::auth::{AuthService, TokenService, DEFAULT_TOKEN_TTL_MINUTES};
use crate::practitioner::PractitionerService;
use crate::store::Store;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Secret used to sign and verify tokens
    pub token_secret: String,

    /// Password shared by every headquarter
    pub director_password: String,

    /// Validity window of login tokens, in minutes
    pub token_ttl_minutes: u64,

    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a router configuration.
    ///
    /// By default:
    /// - Tokens are valid for 5 minutes
    /// - CORS allows any origin
    /// - Tracing is enabled
    pub fn new(token_secret: impl Into<String>, director_password: impl Into<String>) -> Self {
        Self {
            token_secret: token_secret.into(),
            director_password: director_password.into(),
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Set the validity window of login tokens.
    pub fn with_token_ttl_minutes(mut self, minutes: u64) -> Self {
        self.token_ttl_minutes = minutes;
        self
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router over the given store.
pub fn create_router<S>(store: Arc<S>, config: RouterConfig) -> Router
where
    S: Store + 'static,
{
    let tokens = TokenService::new(&config.token_secret);

    let auth = AuthService::new(
        Arc::clone(&store),
        tokens.clone(),
        &config.director_password,
    )
    .with_token_ttl_minutes(config.token_ttl_minutes);
    let practitioners = PractitionerService::new(store);

    let app_state = AppState::new(practitioners, auth);
    let cors = build_cors_layer(&config);

    // Protected routes; route_layer keeps unknown paths at 404
    let practitioner_routes = Router::new()
        .route(
            "/practitioners",
            get(list_practitioners_handler::<S>).post(create_practitioner_handler::<S>),
        )
        .route(
            "/practitioners/{id}",
            get(get_practitioner_handler::<S>)
                .put(update_practitioner_handler::<S>)
                .delete(delete_practitioner_handler::<S>),
        )
        .route_layer(middleware::from_fn_with_state(tokens, auth_middleware))
        .with_state(app_state.clone());

    let public_routes = Router::new()
        .route("/health", get(health_handler))
        .route("/auth/login", post(login_handler::<S>))
        .with_state(app_state);

    let router = Router::new()
        .merge(practitioner_routes)
        .merge(public_routes)
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
