//! Buyer identity extraction.
//!
//! Authentication itself is out of scope: an upstream layer resolves the
//! buyer and forwards the id in the `X-User-Id` header. This extractor
//! turns that header into an explicit value handed to the order
//! orchestrator - no handler or service ever reads ambient auth state.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;

/// Header carrying the resolved buyer id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The already-authenticated buyer identity.
#[derive(Debug, Clone)]
pub struct UserId(pub String);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ApiError::validation("user id is required"))?;

        Ok(UserId(user_id.to_string()))
    }
}
