// User domain module
// Accounts that can sign in to manage portfolio content

pub mod value_objects;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use value_objects::{Email, Role, Username};

/// User account data for persistence
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: Username,
    pub email: Email,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active account with a pre-hashed password
    pub fn new(username: Username, email: Email, password_hash: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            role,
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
        }
    }
}
