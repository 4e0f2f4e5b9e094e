//! Authentication: token issuance/verification and headquarter login.

pub mod login;
pub mod token;

pub use login::{AuthService, DEFAULT_TOKEN_TTL_MINUTES};
pub use token::{now_secs, Claims, TokenPayload, TokenService};
