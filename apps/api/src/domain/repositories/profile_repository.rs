use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::profile::Profile;

/// Repository trait for the single site profile
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn get(&self) -> DomainResult<Option<Profile>>;

    /// Insert or replace the profile
    async fn save(&self, profile: &Profile) -> DomainResult<()>;
}
