use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Failure taxonomy of the authorization pipeline.
///
/// Every variant is terminal for the current request and maps to exactly one
/// HTTP status; the `Display` text is the message placed in the response
/// body. Errors are propagated unchanged from the component that raised
/// them, never wrapped or reclassified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("authorization header is expected")]
    HeaderMissing,

    #[error("authorization header must be of the form 'Bearer <token>'")]
    HeaderMalformed,

    #[error("unable to retrieve signing keys: {0}")]
    KeyRetrieval(String),

    #[error("unable to find a signing key matching the token")]
    KeyNotFound,

    #[error("token is malformed: {0}")]
    TokenMalformed(String),

    #[error("token signature could not be verified")]
    InvalidSignature,

    #[error("token is expired")]
    TokenExpired,

    #[error("incorrect claims, please check the audience and issuer")]
    ClaimInvalid,

    #[error("permissions claim is not included in the token")]
    PermissionsClaimMissing,

    #[error("permission '{0}' is not granted")]
    PermissionDenied(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::HeaderMissing
            | AuthError::HeaderMalformed
            | AuthError::KeyNotFound
            | AuthError::TokenMalformed(_)
            | AuthError::InvalidSignature
            | AuthError::TokenExpired
            | AuthError::ClaimInvalid => StatusCode::UNAUTHORIZED,
            AuthError::PermissionsClaimMissing => StatusCode::BAD_REQUEST,
            AuthError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AuthError::KeyRetrieval(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
