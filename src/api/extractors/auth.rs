use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use tracing::Span;

use crate::domain::ports::Capability;
use crate::error::AppError;
use crate::state::AppState;

/// Identity asserted by the fronting gateway. The gateway terminates the
/// session and forwards the caller as plain headers; this service only
/// enforces capabilities on top of the asserted role.
pub struct AuthUser {
    pub id: String,
    pub role: String,
}

impl AuthUser {
    pub fn require(&self, state: &AppState, capability: Capability) -> Result<(), AppError> {
        if state.authorizer.can(&self.role, capability) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "Role '{}' may not perform this action",
                self.role
            )))
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get("X-User-Id")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or(StatusCode::UNAUTHORIZED)?
            .to_string();

        let role = parts
            .headers
            .get("X-Role")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("member")
            .to_string();

        Span::current().record("user_id", id.as_str());

        Ok(AuthUser { id, role })
    }
}
