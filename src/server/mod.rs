//! HTTP server layer for the practitioner API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │       POST /auth/login          /practitioners[/{id}]           │
//! │                                                                 │
//! │  ┌─────────────┐  ┌──────────────┐  ┌────────────────────────┐  │
//! │  │  handlers   │  │    auth      │  │        routes          │  │
//! │  │ (requests)  │  │ (bearer JWT) │  │  (router config)       │  │
//! │  └─────────────┘  └──────────────┘  └────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::{auth_middleware, bearer_token, AuthenticatedHeadquarter, TokenRejection};
pub use handlers::{
    create_practitioner_handler, delete_practitioner_handler, get_practitioner_handler,
    health_handler, list_practitioners_handler, login_handler, update_practitioner_handler,
    ApiError, AppState, CreatedResponse, ErrorResponse, HealthResponse, LoginRequest,
    LoginResponse, MessageResponse, UpdatedResponse,
};
pub use routes::{create_router, RouterConfig};
