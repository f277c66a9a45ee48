use axum::http::HeaderMap;
use tracing::debug;

use crate::config::{AuthConfig, ConfigError};
use crate::error::AuthError;
use crate::services::auth::jwks::JwksClient;
use crate::services::auth::verify::{Claims, TokenVerifier};
use crate::services::auth::{bearer, permissions};

/// Entry point protected operations depend on.
///
/// Wires header extraction, key resolution, token verification and the
/// permission check into one call. The first failing step short-circuits and
/// its error is propagated unchanged.
pub struct AuthGuard {
    verifier: TokenVerifier,
    jwks: JwksClient,
}

impl AuthGuard {
    /// Build a guard from configuration.
    ///
    /// The HTTP client used for key retrieval carries the configured request
    /// timeout so one hung provider call cannot stall a worker indefinitely.
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|_| ConfigError::Invalid("JWKS_HTTP_TIMEOUT_SECONDS"))?;

        Ok(Self {
            verifier: TokenVerifier::new(&config.issuer, &config.audience, config.leeway_seconds),
            jwks: JwksClient::new(http, config.jwks_url.clone(), config.jwks_cache_ttl),
        })
    }

    /// Authorize one request for `required`.
    ///
    /// On success the decoded claim set is handed back for the caller to
    /// branch on further; on failure the error says which check failed and
    /// which HTTP status to surface. Verification failures are never
    /// retried.
    pub async fn authorize(
        &self,
        headers: &HeaderMap,
        required: &str,
    ) -> Result<Claims, AuthError> {
        let token = bearer::extract(headers)?;
        let kid = self.verifier.key_id(token)?;
        let jwk = self.jwks.resolve(&kid).await?;
        let claims = self.verifier.verify(token, &jwk)?;
        permissions::check(&claims, required)?;

        debug!(sub = %claims.sub, permission = required, "request authorized");
        Ok(claims)
    }
}
