use crate::error::AuthError;
use crate::services::auth::verify::Claims;

/// Check that the verified claim set grants `required`.
///
/// A token carrying no `permissions` claim at all indicates a misconfigured
/// token format and is reported separately from a well-formed token that
/// simply lacks the permission.
pub fn check(claims: &Claims, required: &str) -> Result<(), AuthError> {
    let permissions = claims
        .permissions
        .as_ref()
        .ok_or(AuthError::PermissionsClaimMissing)?;

    if !permissions.iter().any(|p| p == required) {
        return Err(AuthError::PermissionDenied(required.to_string()));
    }

    Ok(())
}
