//! Practitioner API - headquarter login and practitioner records.
//!
//! This binary starts the HTTP server and configures all components.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use practitioner_api::{
    auth::{now_secs, TokenPayload, TokenService},
    config::{Cli, Command, ServeConfig, SignConfig, SignOutputFormat},
    server::{create_router, RouterConfig},
    store::SqliteStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Serve(config) => run_serve(config).await,
        Command::Sign(config) => run_sign(config),
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: ServeConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let Some(database) = config.database.clone() else {
        return ExitCode::FAILURE;
    };

    info!(
        "Practitioner API v{} starting",
        env!("CARGO_PKG_VERSION")
    );
    info!("Configuration:");
    info!("  Database: {}", database.display());
    info!("  Token TTL: {} minute(s)", config.token_ttl_minutes);
    match config.cors_origins {
        Some(ref origins) => info!("  CORS origins: {}", origins.join(", ")),
        None => info!("  CORS origins: any"),
    }

    let store = match SqliteStore::open(&database) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to open database {}: {}", database.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let router = create_router(store, build_router_config(&config));

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server listening on: http://{}", addr);
    info!("  curl -X POST http://{}/auth/login -H 'content-type: application/json' \\", addr);
    info!("       -d '{{\"name\":\"<headquarter>\",\"password\":\"<password>\"}}'");

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "practitioner_api=debug,tower_http=debug"
    } else {
        "practitioner_api=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the ServeConfig.
fn build_router_config(config: &ServeConfig) -> RouterConfig {
    let mut router_config =
        RouterConfig::new(config.key_token_or_empty(), config.director_password_or_empty())
            .with_token_ttl_minutes(config.token_ttl_minutes)
            .with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}

// =============================================================================
// Sign Command
// =============================================================================

fn run_sign(config: SignConfig) -> ExitCode {
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match sign_output(&config, now_secs()) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Issue a token for `config` as of `now` and render it in the requested format.
fn sign_output(config: &SignConfig, now: u64) -> Result<String, String> {
    let tokens = TokenService::new(&config.key_token);
    let payload = TokenPayload {
        id: config.headquarter_id,
    };
    let expiry = config.expiry_from(now);

    let token = tokens
        .issue_with_expiry(&payload, expiry)
        .map_err(|e| e.to_string())?;

    match config.format {
        SignOutputFormat::Token => Ok(token),
        SignOutputFormat::Json => {
            let json = serde_json::json!({
                "token": token,
                "expiry": expiry,
                "ttl_minutes": config.ttl_minutes,
                "data": payload,
            });
            serde_json::to_string_pretty(&json).map_err(|e| e.to_string())
        }
    }
}
