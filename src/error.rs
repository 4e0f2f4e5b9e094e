use thiserror::Error;

/// Errors raised by the persistence gateway.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The database could not be opened or configured
    #[error("Connection error: {0}")]
    Connection(String),

    /// A statement failed to prepare or execute
    #[error("Query error: {0}")]
    Query(String),

    /// A row did not have the expected shape
    #[error("Decode error: column '{column}': {message}")]
    Decode {
        column: String,
        message: String,
    },

    /// The blocking task running the statement did not complete
    #[error("Task error: {0}")]
    Task(String),
}

/// Errors raised when issuing or verifying tokens.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    /// The secret or payload could not be used to sign a token
    #[error("Failed to sign token: {0}")]
    Signing(String),

    /// Bad signature, malformed structure, or expired token
    #[error("Invalid token")]
    Invalid,
}

/// Errors that can occur while logging a headquarter in.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// No headquarter has the requested name
    #[error("Headquarter not found: {name}")]
    NotFound { name: String },

    /// The supplied password does not match the director password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The headquarter lookup failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The token could not be issued
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}
