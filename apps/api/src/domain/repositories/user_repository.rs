use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::user::User;

/// Repository trait for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user; duplicate username or email is a `Conflict`
    async fn create(&self, user: &User) -> DomainResult<()>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>>;

    /// Find a user whose username or email equals `login`
    async fn find_by_login(&self, login: &str) -> DomainResult<Option<User>>;

    /// Whether any admin account exists
    async fn admin_exists(&self) -> DomainResult<bool>;

    /// Update user's last login timestamp
    async fn update_last_login(&self, user_id: Uuid) -> DomainResult<()>;
}
