// Startup tasks: database pool, migrations and the first admin account

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::auth::password::hash_password;
use crate::config::Config;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::UserRepository;
use crate::domain::user::{Email, Role, User, Username};

/// Connects to PostgreSQL and applies pending migrations
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_connect_timeout)
        .connect(&config.database_url)
        .await?;
    tracing::info!("Database connected successfully");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

/// Creates the configured admin account when no admin exists yet
///
/// Returns `true` when an account was created.
pub async fn ensure_default_admin(
    users: &dyn UserRepository,
    config: &Config,
) -> DomainResult<bool> {
    if users.admin_exists().await? {
        return Ok(false);
    }

    let admin = &config.default_admin;
    let username = Username::new(admin.username.as_str())
        .map_err(|e| DomainError::invalid("DEFAULT_ADMIN_USERNAME", e))?;
    let email = Email::new(admin.email.as_str())
        .map_err(|e| DomainError::invalid("DEFAULT_ADMIN_EMAIL", e))?;
    let password_hash = hash_password(&admin.password, config.bcrypt_cost)
        .map_err(DomainError::Storage)?;

    let user = User::new(username, email, password_hash, Role::Admin);
    users.create(&user).await?;

    tracing::info!(username = %user.username, "Default admin user created");
    if admin.uses_default_password() {
        tracing::warn!("Default admin password is in use; change DEFAULT_ADMIN_PASSWORD");
    }
    Ok(true)
}
