use crate::auth::error::AuthError;

/// A record that belongs to exactly one principal.
pub trait OwnedResource {
    /// Email of the owning principal.
    fn owner(&self) -> &str;
}

/// Allows the operation only when `caller` is the recorded owner.
pub fn authorize(owner: &str, caller: &str) -> Result<(), AuthError> {
    if owner == caller {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

/// [`authorize`] against an already fetched resource.
pub fn authorize_resource<R: OwnedResource + ?Sized>(
    resource: &R,
    caller: &str,
) -> Result<(), AuthError> {
    authorize(resource.owner(), caller)
}
