//! Bearer authorization for protected routes.
//!
//! [`require`] wraps a router so every request must present a token granting
//! the named permission; on success the verified [`Claims`] are inserted
//! into request extensions, where handlers receive them through the
//! [`Claims`] extractor.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode, request::Parts},
    middleware::{self, Next},
    response::Response,
};
use tracing::warn;

use crate::error::AuthError;
use crate::services::auth::guard::AuthGuard;
use crate::services::auth::verify::Claims;

/// Gate every route of `router` behind `permission`.
///
/// ```ignore
/// let detail = Router::new().route("/drinks-detail", get(drink_detail));
/// let detail = middleware::auth::require(detail, guard.clone(), "get:drinks-detail");
/// app = app.merge(detail);
/// ```
pub fn require<S>(
    router: Router<S>,
    guard: Arc<AuthGuard>,
    permission: &'static str,
) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn(
        move |req: Request<Body>, next: Next| {
            let guard = guard.clone();
            async move { authorize(guard, permission, req, next).await }
        },
    ))
}

async fn authorize(
    guard: Arc<AuthGuard>,
    permission: &'static str,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = match guard.authorize(req.headers(), permission).await {
        Ok(claims) => claims,
        Err(err) => {
            warn!(permission, error = %err, "request rejected");
            return Err(err);
        }
    };

    // middleware → extractor hand-off
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Handlers take `Claims` as an argument; [`require`] must have run for the
/// route, otherwise the request is rejected with 401.
impl<S> FromRequestParts<S> for Claims
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
