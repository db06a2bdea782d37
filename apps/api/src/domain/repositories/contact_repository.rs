use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::contact::{ContactFilter, ContactMessage};
use crate::domain::errors::DomainResult;
use crate::domain::pagination::{Page, PageRequest};

/// Repository trait for contact form messages
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, message: &ContactMessage) -> DomainResult<()>;

    /// Messages matching `filter`, newest first
    async fn list(
        &self,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> DomainResult<Page<ContactMessage>>;

    /// Flags a message as read and returns it
    async fn mark_read(&self, id: Uuid) -> DomainResult<Option<ContactMessage>>;

    async fn delete(&self, id: Uuid) -> DomainResult<bool>;
}
