use axum::{async_trait, extract::FromRequestParts, http::request::Parts, http::StatusCode};
use contracts::system::auth::TokenClaims;

use crate::shared::api_error::ApiError;

/// Claims of the signed-in staff member
///
/// Only available behind `require_auth`, which puts the claims into the
/// request extensions; elsewhere extraction fails with 401.
pub struct CurrentUser(pub TokenClaims);

impl CurrentUser {
    pub fn user_id(&self) -> &str {
        &self.0.sub
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<TokenClaims>() {
            Some(claims) => Ok(CurrentUser(claims.clone())),
            None => Err(ApiError::new(StatusCode::UNAUTHORIZED, "Not authenticated")),
        }
    }
}
