use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::errors::ApiError;
use crate::auth::jwt::verify_token;
use crate::domain::user::User;
use crate::state::AppState;

/// Authenticated user extractor for protected routes
///
/// Requires `Authorization: Bearer <token>` for an existing, active user.
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(AuthUser(user): AuthUser) -> Result<String, ApiError> {
///     Ok(format!("Hello {}", user.username))
/// }
/// ```
pub struct AuthUser(pub User);

/// Authenticated user with the admin role
pub struct AdminUser(pub User);

/// Caller identity when a valid token is present; never rejects
pub struct OptionalUser(pub Option<User>);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

async fn resolve_user(token: &str, state: &AppState) -> Result<User, ApiError> {
    let claims = verify_token(token, &state.config.jwt_secret).map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        ApiError::unauthorized("Invalid or expired token")
    })?;

    let user = state
        .users
        .find_by_id(claims.sub)
        .await?
        .filter(|user| user.is_active)
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))?;

    Ok(user)
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token =
            bearer_token(parts).ok_or_else(|| ApiError::unauthorized("Access token required"))?;
        resolve_user(token, state).await.map(AuthUser)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_admin() {
            return Err(ApiError::forbidden("Admin access required"));
        }
        Ok(AdminUser(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(OptionalUser(None));
        };
        Ok(OptionalUser(resolve_user(token, state).await.ok()))
    }
}

impl OptionalUser {
    pub fn is_admin(&self) -> bool {
        self.0.as_ref().map_or(false, |user| user.role.is_admin())
    }
}
