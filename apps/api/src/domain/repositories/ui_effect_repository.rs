use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::ui_effect::{EffectType, UiEffect, UiEffectFilter};

/// Repository trait for UI effect configurations
#[async_trait]
pub trait UiEffectRepository: Send + Sync {
    /// Effects matching `filter`, ordered by type then name
    async fn list(&self, filter: &UiEffectFilter) -> DomainResult<Vec<UiEffect>>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<UiEffect>>;

    /// Any effect of the given type, preferring active ones
    async fn find_by_type(&self, effect_type: EffectType) -> DomainResult<Option<UiEffect>>;

    /// The active effect of the given type, if any
    async fn find_active_by_type(&self, effect_type: EffectType)
        -> DomainResult<Option<UiEffect>>;

    /// Create a new effect; duplicate names are a `Conflict`
    async fn create(&self, effect: &UiEffect) -> DomainResult<()>;

    async fn update(&self, effect: &UiEffect) -> DomainResult<()>;

    async fn delete(&self, id: Uuid) -> DomainResult<bool>;
}
