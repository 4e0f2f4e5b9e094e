//! Headquarter login.
//!
//! Every existing headquarter shares one director password, injected at
//! startup. The comparison is constant-time.

use std::sync::Arc;

use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::error::AuthError;
use crate::headquarter::HeadquarterRepository;
use crate::store::Store;

use super::token::{TokenPayload, TokenService};

/// Default validity window of login tokens, in minutes.
pub const DEFAULT_TOKEN_TTL_MINUTES: u64 = 5;

/// Exchanges headquarter credentials for a token.
pub struct AuthService<S: Store> {
    headquarters: HeadquarterRepository<S>,
    tokens: TokenService,
    director_password: Vec<u8>,
    token_ttl_minutes: u64,
}

impl<S: Store> AuthService<S> {
    pub fn new(store: Arc<S>, tokens: TokenService, director_password: impl AsRef<[u8]>) -> Self {
        Self {
            headquarters: HeadquarterRepository::new(store),
            tokens,
            director_password: director_password.as_ref().to_vec(),
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
        }
    }

    /// Set how long issued tokens stay valid.
    pub fn with_token_ttl_minutes(mut self, minutes: u64) -> Self {
        self.token_ttl_minutes = minutes;
        self
    }

    /// The token service used to sign login tokens.
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Log a headquarter in and return a signed token embedding its id.
    pub async fn login(&self, name: &str, password: &str) -> Result<String, AuthError> {
        let headquarter = self
            .headquarters
            .find_by_name(name)
            .await?
            .ok_or_else(|| AuthError::NotFound {
                name: name.to_string(),
            })?;

        if !self.password_matches(password) {
            warn!(headquarter_id = headquarter.id, "login rejected: bad password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(
            &TokenPayload { id: headquarter.id },
            self.token_ttl_minutes,
        )?;

        info!(headquarter_id = headquarter.id, "headquarter logged in");
        Ok(token)
    }

    fn password_matches(&self, candidate: &str) -> bool {
        candidate
            .as_bytes()
            .ct_eq(self.director_password.as_slice())
            .into()
    }
}
