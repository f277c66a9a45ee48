use std::time::Duration;
use std::{env, fmt};

use url::Url;

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Expected `iss` claim, `https://{domain}/`.
    pub issuer: String,
    /// Expected `aud` claim (the API identifier registered with the provider).
    pub audience: String,
    /// Where the provider publishes its signing keys.
    pub jwks_url: String,
    /// Clock-skew allowance for `exp` validation (seconds).
    pub leeway_seconds: u64,
    /// How long a fetched key set stays valid before a refetch.
    pub jwks_cache_ttl: Duration,
    /// Request timeout for key-set fetches.
    pub http_timeout: Duration,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let domain = env::var("AUTH0_DOMAIN").map_err(|_| ConfigError::Missing("AUTH0_DOMAIN"))?;
        let audience =
            env::var("API_AUDIENCE").map_err(|_| ConfigError::Missing("API_AUDIENCE"))?;

        let leeway_seconds = env::var("JWT_LEEWAY_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        let cache_ttl_seconds: u64 = env::var("JWKS_CACHE_TTL_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(600); // 10 min
        let http_timeout_seconds: u64 = env::var("JWKS_HTTP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        let jwks_url = jwks_url_for(&domain);
        Url::parse(&jwks_url).map_err(|_| ConfigError::Invalid("AUTH0_DOMAIN"))?;

        Ok(AuthConfig {
            issuer: issuer_for(&domain),
            audience,
            jwks_url,
            leeway_seconds,
            jwks_cache_ttl: Duration::from_secs(cache_ttl_seconds),
            http_timeout: Duration::from_secs(http_timeout_seconds),
        })
    }
}

fn issuer_for(domain: &str) -> String {
    format!("https://{domain}/")
}

fn jwks_url_for(domain: &str) -> String {
    format!("https://{domain}/.well-known/jwks.json")
}
