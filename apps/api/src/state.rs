// Shared application state handed to every handler

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::domain::repositories::{
    ContactRepository, EnhancedProjectRepository, ProfileRepository, ProjectRepository,
    UiEffectRepository, UserRepository,
};
use crate::infrastructure::repositories::{
    PostgresContactRepository, PostgresEnhancedProjectRepository, PostgresProfileRepository,
    PostgresProjectRepository, PostgresUiEffectRepository, PostgresUserRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub users: Arc<dyn UserRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub effects: Arc<dyn UiEffectRepository>,
    pub enhanced_projects: Arc<dyn EnhancedProjectRepository>,
}

impl AppState {
    /// State backed by PostgreSQL repositories sharing one pool
    pub fn postgres(config: Config, pool: PgPool) -> Self {
        Self {
            config: Arc::new(config),
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
            contacts: Arc::new(PostgresContactRepository::new(pool.clone())),
            profiles: Arc::new(PostgresProfileRepository::new(pool.clone())),
            effects: Arc::new(PostgresUiEffectRepository::new(pool.clone())),
            enhanced_projects: Arc::new(PostgresEnhancedProjectRepository::new(pool)),
        }
    }
}
