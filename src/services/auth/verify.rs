use jsonwebtoken::{Algorithm, DecodingKey, TokenData, Validation, decode, decode_header};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthError;
use crate::services::auth::jwks::Jwk;

/// Decoded payload of a verified access token.
///
/// Only produced by [`TokenVerifier::verify`] after the signature and the
/// standard claims have checked out; nothing else constructs one.
///
/// `aud` stays a raw JSON value because providers emit either a single
/// string or an array of strings; jsonwebtoken's audience validation accepts
/// both shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    #[serde(default)]
    pub aud: serde_json::Value,
    #[serde(default)]
    pub iat: Option<u64>,
    pub exp: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// `None` means the claim was absent from the payload, which is distinct
    /// from an empty permission list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

/// RS256 access-token verifier bound to one issuer/audience pair.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(issuer: &str, audience: &str, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = leeway_seconds;

        Self { validation }
    }

    /// Read the key id from the unverified header segment.
    ///
    /// Also enforces the RS256 allow-list, so a token declaring any other
    /// algorithm never reaches key resolution.
    pub fn key_id(&self, token: &str) -> Result<String, AuthError> {
        let header = decode_header(token).map_err(|_| {
            AuthError::TokenMalformed("unable to parse the token header".to_string())
        })?;

        if header.alg != Algorithm::RS256 {
            return Err(AuthError::TokenMalformed(
                "token must be signed with RS256".to_string(),
            ));
        }

        header
            .kid
            .ok_or_else(|| AuthError::TokenMalformed("token header has no key id".to_string()))
    }

    /// Verify the signature against `jwk`, then validate `exp`, `aud` and
    /// `iss`. No partial claim set is ever returned.
    pub fn verify(&self, token: &str, jwk: &Jwk) -> Result<Claims, AuthError> {
        let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e).map_err(|e| {
            AuthError::KeyRetrieval(format!("signing key material is invalid: {e}"))
        })?;

        let data: TokenData<Claims> =
            decode(token, &key, &self.validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                jsonwebtoken::errors::ErrorKind::InvalidAudience
                | jsonwebtoken::errors::ErrorKind::InvalidIssuer
                | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_) => {
                    AuthError::ClaimInvalid
                }
                _ => {
                    debug!(error = %e, "token rejected during decode");
                    AuthError::TokenMalformed("unable to parse and verify the token".to_string())
                }
            })?;

        Ok(data.claims)
    }
}
