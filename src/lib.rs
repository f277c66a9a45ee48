//! Bearer-token authorization for APIs protected by a remote identity
//! provider.
//!
//! Every protected operation goes through [`AuthGuard::authorize`]: the
//! `Authorization` header is extracted, the token's signing key is resolved
//! from the provider's published key set, the RS256 signature and standard
//! claims are verified, and the token is checked for a required permission.
//! The result is either the decoded [`Claims`] or an [`AuthError`] carrying
//! the HTTP status to surface.
//!
//! Axum services wire this in with [`middleware::auth::require`], which runs
//! the guard in front of a router and makes the claims available to handlers
//! as an extractor.

pub mod config;
pub mod error;
pub mod middleware;
pub mod services;

pub use config::{AuthConfig, ConfigError};
pub use error::AuthError;
pub use services::auth::guard::AuthGuard;
pub use services::auth::verify::Claims;
