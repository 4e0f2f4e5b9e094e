//! Configuration management for the practitioner API.
//!
//! Configuration comes from command-line arguments via clap, with environment
//! variable fallbacks and sensible defaults for all optional settings.
//!
//! # Commands
//!
//! - `serve` (default): run the HTTP server
//! - `sign`: issue a headquarter token offline
//!
//! # Environment Variables
//!
//! - `PRACTITIONER_HOST` - Server bind address (default: 0.0.0.0)
//! - `PORT` - Server port (default: 3000)
//! - `DATABASE_PATH` - SQLite database file (required for `serve`)
//! - `KEY_TOKEN` - Token signing secret (required)
//! - `DIRECTOR_PASSWORD` - Password shared by all headquarters (required for `serve`)
//! - `TOKEN_TTL_MINUTES` - Login token validity (default: 5)
//! - `PRACTITIONER_CORS_ORIGINS` - Allowed CORS origins, comma-separated

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::auth::DEFAULT_TOKEN_TTL_MINUTES;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Practitioner API - headquarter login and practitioner records.
///
/// Without a subcommand, `serve` is assumed.
#[derive(Parser, Debug, Clone)]
#[command(name = "practitioner-api")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub serve: ServeConfig,
}

impl Cli {
    /// Resolve the command to run, defaulting to `serve`.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Serve(self.serve))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeConfig),

    /// Issue a token for a headquarter id without going through login
    Sign(SignConfig),
}

// =============================================================================
// Serve Configuration
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "PRACTITIONER_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    /// Path to the SQLite database holding `headquarter` and `practitioners`.
    #[arg(long, env = "DATABASE_PATH")]
    pub database: Option<PathBuf>,

    /// Secret used to sign and verify tokens.
    #[arg(long, env = "KEY_TOKEN", hide_env_values = true)]
    pub key_token: Option<String>,

    /// Password shared by every headquarter.
    #[arg(long, env = "DIRECTOR_PASSWORD", hide_env_values = true)]
    pub director_password: Option<String>,

    /// How long login tokens stay valid, in minutes.
    #[arg(long, default_value_t = DEFAULT_TOKEN_TTL_MINUTES, env = "TOKEN_TTL_MINUTES")]
    pub token_ttl_minutes: u64,

    /// Allowed CORS origins (comma-separated). Any origin if not specified.
    #[arg(long, env = "PRACTITIONER_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl ServeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.database.is_none() {
            return Err("Database path is required. Set --database or DATABASE_PATH".to_string());
        }

        match self.key_token.as_deref() {
            None | Some("") => {
                return Err(
                    "Token signing secret is required. Set --key-token or KEY_TOKEN".to_string(),
                )
            }
            Some(_) => {}
        }

        match self.director_password.as_deref() {
            None | Some("") => {
                return Err(
                    "Director password is required. Set --director-password or DIRECTOR_PASSWORD"
                        .to_string(),
                )
            }
            Some(_) => {}
        }

        if self.token_ttl_minutes == 0 {
            return Err("token_ttl_minutes must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the signing secret, or "" if unset (call validate() first).
    pub fn key_token_or_empty(&self) -> &str {
        self.key_token.as_deref().unwrap_or("")
    }

    /// Get the director password, or "" if unset (call validate() first).
    pub fn director_password_or_empty(&self) -> &str {
        self.director_password.as_deref().unwrap_or("")
    }
}

// =============================================================================
// Sign Configuration
// =============================================================================

/// Output format of the `sign` command.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignOutputFormat {
    /// Just the token
    #[default]
    Token,

    /// JSON with token, expiry and payload
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct SignConfig {
    /// Secret used to sign the token.
    #[arg(long, env = "KEY_TOKEN", hide_env_values = true)]
    pub key_token: String,

    /// Headquarter id to embed in the token.
    #[arg(long)]
    pub headquarter_id: i64,

    /// Validity window in minutes.
    #[arg(long, default_value_t = DEFAULT_TOKEN_TTL_MINUTES)]
    pub ttl_minutes: u64,

    /// Output format.
    #[arg(long, value_enum, default_value_t = SignOutputFormat::Token)]
    pub format: SignOutputFormat,
}

impl SignConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.key_token.is_empty() {
            return Err("Token signing secret must not be empty".to_string());
        }
        if self.ttl_minutes == 0 {
            return Err("ttl_minutes must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Expiry timestamp for a token issued at `now`, saturating at `u64::MAX`.
    pub fn expiry_from(&self, now: u64) -> u64 {
        now.saturating_add(self.ttl_minutes.saturating_mul(60))
    }
}

// =============================================================================
// Tests
// =============================================================================
