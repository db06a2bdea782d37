// JWT token creation and verification
// HS256 tokens scoped to this API by issuer and audience claims

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

pub const ISSUER: &str = "portfolio-api";
pub const AUDIENCE: &str = "portfolio-users";

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (user_id)
/// * `iat` - Issued at (seconds since epoch)
/// * `exp` - Expiry time (seconds since epoch)
/// * `iss` / `aud` - Fixed issuer and audience of this API
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

/// Creates a JWT token for a user
///
/// # Arguments
/// * `user_id` - The user's ID to include in the token
/// * `secret` - The signing secret
/// * `ttl` - How long the token stays valid
///
/// # Example
/// ```
/// use portfolio_api::auth::jwt::create_token;
/// use std::time::Duration;
/// use uuid::Uuid;
///
/// let token = create_token(Uuid::new_v4(), "your-secret-key", Duration::from_secs(3600))
///     .expect("valid token");
/// assert_eq!(token.split('.').count(), 3);
/// ```
pub fn create_token(user_id: Uuid, secret: &str, ttl: Duration) -> Result<String, String> {
    let now = Utc::now().timestamp();
    let ttl = i64::try_from(ttl.as_secs()).map_err(|e| e.to_string())?;
    let claims = Claims {
        sub: user_id,
        iat: now as usize,
        exp: now.saturating_add(ttl) as usize,
        iss: ISSUER.to_string(),
        aud: AUDIENCE.to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| e.to_string())
}

/// Verifies and decodes a JWT token
///
/// Rejects expired tokens and tokens minted for another issuer or audience.
///
/// # Example
/// ```
/// use portfolio_api::auth::jwt::{create_token, verify_token};
/// use std::time::Duration;
/// use uuid::Uuid;
///
/// let user_id = Uuid::new_v4();
/// let token = create_token(user_id, "secret", Duration::from_secs(60)).unwrap();
///
/// let claims = verify_token(&token, "secret").expect("valid token");
/// assert_eq!(claims.sub, user_id);
/// ```
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    let mut validation = Validation::default();
    validation.set_issuer(&[ISSUER]);
    validation.set_audience(&[AUDIENCE]);

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_ref()), &validation)
        .map(|data| data.claims)
        .map_err(|e| e.to_string())
}
