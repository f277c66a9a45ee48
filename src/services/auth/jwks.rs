use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::error::AuthError;

/// One public key record from the provider's key-set document (RFC 7517
/// subset, enough to verify RS256).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    pub kid: String,
    pub kty: String,
    #[serde(default)]
    pub alg: Option<String>,
    #[serde(rename = "use", default)]
    pub use_: Option<String>,
    pub n: String,
    pub e: String,
}

/// The full `{"keys": [...]}` document as served by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

struct CacheState {
    keys: HashMap<String, Jwk>,
    fetched_at: Option<Instant>,
}

/// Resolves signing keys by key id from the provider's JWKS endpoint.
///
/// The fetched document is cached in memory for a bounded TTL and a lookup
/// miss triggers a refetch, so a freshly rotated key is picked up without
/// waiting out the TTL. The refresh lock keeps concurrent misses down to a
/// single outbound request; tasks that waited on it decide from the
/// refreshed cache instead of fetching again.
pub struct JwksClient {
    http: reqwest::Client,
    jwks_url: String,
    cache_ttl: Duration,
    cache: RwLock<CacheState>,
    refresh: Mutex<()>,
}

impl JwksClient {
    pub fn new(http: reqwest::Client, jwks_url: String, cache_ttl: Duration) -> Self {
        Self {
            http,
            jwks_url,
            cache_ttl,
            cache: RwLock::new(CacheState {
                keys: HashMap::new(),
                fetched_at: None,
            }),
            refresh: Mutex::new(()),
        }
    }

    /// Look up the signing key for `kid`.
    ///
    /// A missing key after a fresh fetch is the expected outcome for tokens
    /// signed by an unknown or rotated-out key.
    pub async fn resolve(&self, kid: &str) -> Result<Jwk, AuthError> {
        let seen = {
            let cache = self.cache.read().await;
            if let Some(jwk) = self.lookup(&cache, kid) {
                debug!(kid, "signing key served from cache");
                return Ok(jwk);
            }
            cache.fetched_at
        };

        let _refresh = self.refresh.lock().await;

        {
            let cache = self.cache.read().await;
            if cache.fetched_at != seen {
                // Another task refreshed while this one waited on the lock;
                // its result settles this lookup either way.
                return self.lookup(&cache, kid).ok_or(AuthError::KeyNotFound);
            }
        }

        let set = self.fetch().await?;
        let mut cache = self.cache.write().await;
        cache.keys = set.keys.into_iter().map(|k| (k.kid.clone(), k)).collect();
        cache.fetched_at = Some(Instant::now());

        cache.keys.get(kid).cloned().ok_or(AuthError::KeyNotFound)
    }

    fn lookup(&self, cache: &CacheState, kid: &str) -> Option<Jwk> {
        let fetched_at = cache.fetched_at?;
        if fetched_at.elapsed() >= self.cache_ttl {
            return None;
        }
        cache.keys.get(kid).cloned()
    }

    async fn fetch(&self) -> Result<JwkSet, AuthError> {
        debug!(url = %self.jwks_url, "refreshing signing key set");

        let response = self.http.get(&self.jwks_url).send().await.map_err(|e| {
            warn!(error = %e, "signing key set request failed");
            AuthError::KeyRetrieval("key set endpoint is unreachable".to_string())
        })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "signing key set endpoint returned an error");
            return Err(AuthError::KeyRetrieval(format!(
                "key set endpoint returned {}",
                response.status()
            )));
        }

        response.json::<JwkSet>().await.map_err(|e| {
            warn!(error = %e, "signing key set body could not be parsed");
            AuthError::KeyRetrieval("key set body could not be parsed".to_string())
        })
    }
}
