use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::middleware::{AdminUser, AuthUser};
use crate::api::response::Envelope;
use crate::auth::jwt::create_token;
use crate::auth::password::{hash_password, verify_password};
use crate::domain::errors::FieldError;
use crate::domain::user::value_objects::check_password_policy;
use crate::domain::user::{Email, Role, User, Username};
use crate::state::AppState;

/// Request body for login; `username` may also be the account email
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for registering another account
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<Role>,
}

/// Public view of an account
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.to_string(),
            email: user.email.to_string(),
            role: user.role,
            last_login: user.last_login,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub user: UserView,
    pub token: String,
}

fn issue_token(state: &AppState, user: &User) -> Result<String, ApiError> {
    create_token(user.id, &state.config.jwt_secret, state.config.jwt_ttl).map_err(|e| {
        tracing::error!(error = %e, "failed to sign token");
        ApiError::internal_server_error("Failed to create token")
    })
}

/// Login with username (or email) and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Envelope<AuthPayload>, ApiError> {
    let mut errors = Vec::new();
    if req.username.trim().is_empty() {
        errors.push(FieldError::new("username", "Username is required"));
    }
    if req.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let user = state
        .users
        .find_by_login(&req.username)
        .await?
        .filter(|user| user.is_active)
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
        tracing::error!(error = %e, user_id = %user.id, "password verification failed");
        ApiError::internal_server_error("Login failed")
    })?;
    if !valid {
        tracing::warn!(username = %user.username, "failed login attempt");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    if let Err(e) = state.users.update_last_login(user.id).await {
        tracing::warn!(error = %e, user_id = %user.id, "failed to record last login");
    }

    let token = issue_token(&state, &user)?;
    tracing::info!(username = %user.username, "user logged in");

    let mut view = UserView::from(&user);
    view.last_login = Some(Utc::now());
    Ok(Envelope::data(AuthPayload { user: view, token }).with_message("Login successful"))
}

/// Stateless logout; the client discards its token
///
/// POST /api/auth/logout
pub async fn logout() -> Envelope<()> {
    Envelope::message("Logout successful")
}

/// Current user
///
/// GET /api/auth/me
pub async fn me(AuthUser(user): AuthUser) -> Envelope<UserView> {
    Envelope::data(UserView::from(&user))
}

/// Register a new account (admin only)
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<Envelope<AuthPayload>, ApiError> {
    let mut errors = Vec::new();
    let username = Username::new(req.username.as_str())
        .map_err(|e| errors.push(FieldError::new("username", e)))
        .ok();
    let email = Email::new(req.email.as_str())
        .map_err(|e| errors.push(FieldError::new("email", e)))
        .ok();
    if let Err(e) = check_password_policy(&req.password) {
        errors.push(FieldError::new("password", e));
    }
    let (Some(username), Some(email), true) = (username, email, errors.is_empty()) else {
        return Err(ApiError::validation(errors));
    };

    let password_hash = hash_password(&req.password, state.config.bcrypt_cost).map_err(|e| {
        tracing::error!(error = %e, "failed to hash password");
        ApiError::internal_server_error("Registration failed")
    })?;

    let user = User::new(username, email, password_hash, req.role.unwrap_or_default());
    state.users.create(&user).await?;
    tracing::info!(username = %user.username, created_by = %admin.username, "user registered");

    let token = issue_token(&state, &user)?;
    Ok(Envelope::data(AuthPayload {
        user: UserView::from(&user),
        token,
    })
    .with_message("User registered successfully")
    .created())
}
