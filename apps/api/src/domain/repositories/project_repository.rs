use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::project::{Project, ProjectFilter, ProjectSort};

/// Repository trait for portfolio projects
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// List projects matching `filter`
    ///
    /// Ties are broken by priority (highest first) unless sorting by priority.
    async fn list(
        &self,
        filter: &ProjectFilter,
        sort: ProjectSort,
        page: PageRequest,
    ) -> DomainResult<Page<Project>>;

    /// Public projects with priority of at least `min_priority`, by priority then newest
    async fn featured(&self, min_priority: i32, limit: i64) -> DomainResult<Vec<Project>>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Project>>;

    async fn create(&self, project: &Project) -> DomainResult<()>;

    /// Persist changes to an existing project; `NotFound` when it is gone
    async fn update(&self, project: &Project) -> DomainResult<()>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: Uuid) -> DomainResult<bool>;
}
