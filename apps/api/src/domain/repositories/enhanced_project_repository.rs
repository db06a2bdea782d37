use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::enhanced_project::{
    BulkUpdate, BulkUpdateResult, EnhancedProject, EnhancedProjectFilter, ProjectStats,
};
use crate::domain::errors::DomainResult;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::project::{ProjectCategory, ProjectSort};

/// Repository trait for enhanced (interactive card) projects
#[async_trait]
pub trait EnhancedProjectRepository: Send + Sync {
    async fn list(
        &self,
        filter: &EnhancedProjectFilter,
        sort: ProjectSort,
        page: PageRequest,
    ) -> DomainResult<Page<EnhancedProject>>;

    /// Public featured projects by priority then newest
    async fn featured(&self, limit: i64) -> DomainResult<Vec<EnhancedProject>>;

    /// Projects in one category by priority then newest
    async fn by_category(
        &self,
        category: ProjectCategory,
        include_private: bool,
        limit: i64,
    ) -> DomainResult<Vec<EnhancedProject>>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<EnhancedProject>>;

    async fn create(&self, project: &EnhancedProject) -> DomainResult<()>;

    async fn update(&self, project: &EnhancedProject) -> DomainResult<()>;

    async fn delete(&self, id: Uuid) -> DomainResult<bool>;

    /// Apply the same change to every listed project
    async fn bulk_update(&self, ids: &[Uuid], update: &BulkUpdate)
        -> DomainResult<BulkUpdateResult>;

    async fn stats(&self) -> DomainResult<ProjectStats>;
}
