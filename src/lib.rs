//! # Practitioner API
//!
//! A small record-management backend. A headquarter logs in with the shared
//! director password and receives a short-lived signed token; the token then
//! grants access to CRUD operations over practitioner records stored in a
//! relational table.
//!
//! ## Architecture
//!
//! ```text
//! request ─▶ router ─▶ auth middleware ─▶ handler ─▶ service ─▶ repository ─▶ Store
//! ```
//!
//! - [`store`] - Persistence gateway trait and its SQLite implementation
//! - [`practitioner`] - Practitioner model, repository and service
//! - [`headquarter`] - Headquarter lookup for login
//! - [`auth`] - Token issuance/verification and the login flow
//! - [`server`] - Axum handlers, bearer-token middleware and router
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use practitioner_api::{create_router, RouterConfig, SqliteStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(SqliteStore::open("practitioners.db").unwrap());
//!     let router = create_router(store, RouterConfig::new("signing-secret", "director-password"));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod headquarter;
pub mod practitioner;
pub mod server;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use auth::{AuthService, Claims, TokenPayload, TokenService, DEFAULT_TOKEN_TTL_MINUTES};
pub use config::{Cli, Command, ServeConfig, SignConfig, SignOutputFormat};
pub use error::{AuthError, StoreError, TokenError};
pub use headquarter::{Headquarter, HeadquarterRepository};
pub use practitioner::{Practitioner, PractitionerInput, PractitionerRepository, PractitionerService};
pub use server::{
    auth_middleware, create_router, ApiError, AppState, AuthenticatedHeadquarter, ErrorResponse,
    RouterConfig, TokenRejection,
};
pub use store::{ExecResult, Row, SqliteStore, Store, Value};
