//! HTTP request handlers for the practitioner API.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /auth/login` - Exchange headquarter credentials for a token
//! - `GET /practitioners` - List practitioners
//! - `GET /practitioners/{id}` - Fetch one practitioner
//! - `POST /practitioners` - Create a practitioner
//! - `PUT /practitioners/{id}` - Overwrite a practitioner
//! - `DELETE /practitioners/{id}` - Delete a practitioner

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::auth::AuthService;
use crate::error::{AuthError, StoreError};
use crate::practitioner::{Practitioner, PractitionerInput, PractitionerService};
use crate::store::Store;

use super::auth::AuthenticatedHeadquarter;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<S: Store> {
    /// Practitioner CRUD
    pub practitioners: Arc<PractitionerService<S>>,

    /// Headquarter login
    pub auth: Arc<AuthService<S>>,
}

impl<S: Store> AppState<S> {
    pub fn new(practitioners: PractitionerService<S>, auth: AuthService<S>) -> Self {
        Self {
            practitioners: Arc::new(practitioners),
            auth: Arc::new(auth),
        }
    }
}

impl<S: Store> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            practitioners: Arc::clone(&self.practitioners),
            auth: Arc::clone(&self.auth),
        }
    }
}

// =============================================================================
// Request and Response Types
// =============================================================================

/// Body of `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

/// Successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// A plain acknowledgement.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Acknowledgement of a created practitioner.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,

    /// Id assigned by the store
    pub id: i64,
}

/// Result descriptor of an update.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatedResponse {
    pub message: String,
    pub affected_rows: u64,
}

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "not_found", "invalid_token")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Errors returned by the API handlers.
#[derive(Debug)]
pub enum ApiError {
    /// No headquarter with the requested name
    HeadquarterNotFound(String),

    /// No practitioner with the requested id
    PractitionerNotFound(i64),

    /// Wrong director password
    InvalidCredentials,

    /// Request body is missing, malformed, or lacks fields
    InvalidBody(String),

    /// Path id is not an integer
    InvalidId(String),

    /// The store failed
    Store(StoreError),

    /// A token could not be issued
    Token(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotFound { name } => ApiError::HeadquarterNotFound(name),
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::Store(e) => ApiError::Store(e),
            AuthError::Token(e) => ApiError::Token(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidId(rejection.body_text())
    }
}

/// Convert ApiError to HTTP response.
///
/// - 5xx errors are logged at ERROR level
/// - 404s are logged at DEBUG level
/// - other 4xx errors are logged at WARN level
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::HeadquarterNotFound(name) => (
                StatusCode::NOT_FOUND,
                "headquarter_not_found",
                format!("Headquarter not found: {}", name),
            ),
            ApiError::PractitionerNotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Practitioner not found: {}", id),
            ),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid credentials".to_string(),
            ),
            ApiError::InvalidBody(reason) => (
                StatusCode::BAD_REQUEST,
                "invalid_body",
                format!("Invalid request body: {}", reason),
            ),
            ApiError::InvalidId(reason) => (
                StatusCode::BAD_REQUEST,
                "invalid_id",
                format!("Invalid id: {}", reason),
            ),
            ApiError::Store(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                err.to_string(),
            ),
            ApiError::Token(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "token_error",
                reason.clone(),
            ),
        };

        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Server error: {}",
                message
            );
        } else if status == StatusCode::NOT_FOUND {
            debug!(
                error_type = error_type,
                status = status.as_u16(),
                "Resource not found: {}",
                message
            );
        } else {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                message
            );
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);
        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle health check requests.
///
/// `GET /health` → `200 {"status": "healthy", "version": "..."}`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle headquarter login.
///
/// # Endpoint
///
/// `POST /auth/login` with `{"name": "...", "password": "..."}`
///
/// # Response
///
/// - `200 OK`: `{"token": "..."}`
/// - `400 Bad Request`: Malformed body
/// - `401 Unauthorized`: Wrong password
/// - `404 Not Found`: Unknown headquarter
/// - `500 Internal Server Error`: Store or signing failure
pub async fn login_handler<S: Store>(
    State(state): State<AppState<S>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(credentials) = body?;
    let token = state
        .auth
        .login(&credentials.name, &credentials.password)
        .await?;
    Ok(Json(LoginResponse { token }))
}

/// `GET /practitioners`: every practitioner in store order.
pub async fn list_practitioners_handler<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Practitioner>>, ApiError> {
    let practitioners = state.practitioners.get_all().await?;
    Ok(Json(practitioners))
}

/// `GET /practitioners/{id}`: one practitioner, or `404 Not Found`.
pub async fn get_practitioner_handler<S: Store>(
    State(state): State<AppState<S>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Practitioner>, ApiError> {
    let Path(id) = id?;
    state
        .practitioners
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::PractitionerNotFound(id))
}

/// Handle practitioner creation.
///
/// # Endpoint
///
/// `POST /practitioners` with all nine practitioner fields.
///
/// # Response
///
/// - `201 Created`: `{"message": "Practitioner created", "id": <new id>}`
/// - `400 Bad Request`: Missing or mistyped fields
pub async fn create_practitioner_handler<S: Store>(
    State(state): State<AppState<S>>,
    Extension(principal): Extension<AuthenticatedHeadquarter>,
    body: Result<Json<PractitionerInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(input) = body?;
    let result = state.practitioners.create(input).await?;

    info!(
        headquarter_id = principal.id,
        practitioner_id = result.last_insert_id,
        "practitioner created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Practitioner created".to_string(),
            id: result.last_insert_id,
        }),
    ))
}

/// Handle practitioner updates.
///
/// # Endpoint
///
/// `PUT /practitioners/{id}` with all nine practitioner fields. Every column
/// is overwritten.
///
/// # Response
///
/// - `200 OK`: `{"message": "...", "affected_rows": n}`
/// - `400 Bad Request`: Invalid id or body
/// - `404 Not Found`: No practitioner with this id
pub async fn update_practitioner_handler<S: Store>(
    State(state): State<AppState<S>>,
    Extension(principal): Extension<AuthenticatedHeadquarter>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<PractitionerInput>, JsonRejection>,
) -> Result<Json<UpdatedResponse>, ApiError> {
    let Path(id) = id?;
    let Json(input) = body?;

    let result = state.practitioners.update(id, input).await?;
    if result.affected_rows == 0 {
        return Err(ApiError::PractitionerNotFound(id));
    }

    info!(
        headquarter_id = principal.id,
        practitioner_id = id,
        "practitioner updated"
    );

    Ok(Json(UpdatedResponse {
        message: "Practitioner updated".to_string(),
        affected_rows: result.affected_rows,
    }))
}

/// Handle practitioner deletion.
///
/// # Response
///
/// - `200 OK`: At least one row deleted
/// - `404 Not Found`: Nothing to delete
/// - `500 Internal Server Error`: Store failure
pub async fn delete_practitioner_handler<S: Store>(
    State(state): State<AppState<S>>,
    Extension(principal): Extension<AuthenticatedHeadquarter>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;

    let result = state.practitioners.delete(id).await?;
    if result.affected_rows == 0 {
        return Err(ApiError::PractitionerNotFound(id));
    }

    info!(
        headquarter_id = principal.id,
        practitioner_id = id,
        "practitioner deleted"
    );

    Ok(Json(MessageResponse {
        message: "Practitioner deleted successfully".to_string(),
    }))
}
