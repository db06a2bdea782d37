use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::{parse_filter, search_term};
use crate::api::errors::ApiError;
use crate::api::extract::{ApiJson, ApiQuery, OptionalJson, PathId};
use crate::api::middleware::{AdminUser, AuthUser};
use crate::api::response::Envelope;
use crate::domain::enhanced_project::{
    BulkUpdate, BulkUpdateResult, CardSettings, CloneOverrides, EffectSettings, EnhancedProject,
    EnhancedProjectFilter, EnhancedProjectInput, ProjectStats,
};
use crate::domain::errors::DomainError;
use crate::domain::pagination::{PageRequest, SortOrder, MAX_PAGE_SIZE};
use crate::domain::project::{ProjectCategory, ProjectSort, ProjectSortField};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 10;
const DEFAULT_FEATURED_LIMIT: i64 = 6;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnhancedQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub public: Option<bool>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuery {
    pub limit: Option<i64>,
    #[serde(default)]
    pub include_private: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSettingsRequest {
    pub card_settings: Option<CardSettings>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectSettingsRequest {
    pub effect_settings: Option<EffectSettings>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateRequest {
    #[serde(default)]
    pub project_ids: Vec<Uuid>,
    #[serde(default)]
    pub updates: BulkUpdate,
}

async fn load_project(state: &AppState, id: Uuid) -> Result<EnhancedProject, ApiError> {
    state
        .enhanced_projects
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Enhanced project not found"))
}

fn clamp_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, MAX_PAGE_SIZE)
}

/// List enhanced projects
///
/// GET /api/enhanced-projects
pub async fn list_projects(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListEnhancedQuery>,
) -> Result<Envelope<Vec<EnhancedProject>>, ApiError> {
    let filter = EnhancedProjectFilter {
        category: parse_filter("category", query.category.as_deref())?,
        status: parse_filter("status", query.status.as_deref())?,
        is_featured: query.featured,
        is_public: query.public,
        search: search_term(query.search),
    };
    let sort = ProjectSort {
        field: ProjectSortField::parse(query.sort_by.as_deref(), ProjectSortField::Priority),
        order: SortOrder::parse(query.sort_order.as_deref()),
    };
    let page = PageRequest::new(query.page, query.limit, DEFAULT_PAGE_SIZE);

    let result = state.enhanced_projects.list(&filter, sort, page).await?;

    Ok(Envelope::data(result.items).with_pagination(json!({
        "currentPage": page.page,
        "totalPages": page.total_pages(result.total),
        "totalItems": result.total,
        "itemsPerPage": page.limit,
    })))
}

/// Public featured projects
///
/// GET /api/enhanced-projects/featured
pub async fn featured_projects(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LimitQuery>,
) -> Result<Envelope<Vec<EnhancedProject>>, ApiError> {
    let limit = clamp_limit(query.limit, DEFAULT_FEATURED_LIMIT);
    let projects = state.enhanced_projects.featured(limit).await?;
    Ok(Envelope::data(projects))
}

/// Projects in one category
///
/// GET /api/enhanced-projects/category/:category
pub async fn projects_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    ApiQuery(query): ApiQuery<CategoryQuery>,
) -> Result<Envelope<Vec<EnhancedProject>>, ApiError> {
    let category: ProjectCategory = category
        .parse()
        .map_err(|message: String| ApiError::from(DomainError::invalid("category", message)))?;
    let limit = clamp_limit(query.limit, DEFAULT_PAGE_SIZE);

    let projects = state
        .enhanced_projects
        .by_category(category, query.include_private, limit)
        .await?;
    let count = projects.len();
    Ok(Envelope::data(projects).with_count(count))
}

/// Totals by visibility, category and status
///
/// GET /api/enhanced-projects/stats
pub async fn project_stats(
    State(state): State<AppState>,
) -> Result<Envelope<ProjectStats>, ApiError> {
    Ok(Envelope::data(state.enhanced_projects.stats().await?))
}

/// GET /api/enhanced-projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Envelope<EnhancedProject>, ApiError> {
    Ok(Envelope::data(load_project(&state, id).await?))
}

/// POST /api/enhanced-projects
pub async fn create_project(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(input): ApiJson<EnhancedProjectInput>,
) -> Result<Envelope<EnhancedProject>, ApiError> {
    let project = input.validate()?.into_project();
    state.enhanced_projects.create(&project).await?;

    tracing::info!(project_id = %project.id, created_by = %user.username, "enhanced project created");
    Ok(Envelope::data(project)
        .with_message("Enhanced project created successfully")
        .created())
}

/// PUT /api/enhanced-projects/:id
pub async fn update_project(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    PathId(id): PathId,
    ApiJson(input): ApiJson<EnhancedProjectInput>,
) -> Result<Envelope<EnhancedProject>, ApiError> {
    let mut project = load_project(&state, id).await?;
    input.validate()?.apply_to(&mut project);
    state.enhanced_projects.update(&project).await?;

    Ok(Envelope::data(project).with_message("Enhanced project updated successfully"))
}

/// Replace a project's card settings
///
/// PATCH /api/enhanced-projects/:id/card-settings
pub async fn update_card_settings(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    PathId(id): PathId,
    ApiJson(req): ApiJson<CardSettingsRequest>,
) -> Result<Envelope<EnhancedProject>, ApiError> {
    let settings = req
        .card_settings
        .ok_or_else(|| ApiError::bad_request("Card settings are required"))?;
    settings.validate()?;

    let mut project = load_project(&state, id).await?;
    project.card_settings = settings;
    project.touch();
    state.enhanced_projects.update(&project).await?;

    Ok(Envelope::data(project).with_message("Project card settings updated successfully"))
}

/// Replace a project's effect settings
///
/// PATCH /api/enhanced-projects/:id/effect-settings
pub async fn update_effect_settings(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    PathId(id): PathId,
    ApiJson(req): ApiJson<EffectSettingsRequest>,
) -> Result<Envelope<EnhancedProject>, ApiError> {
    let settings = req
        .effect_settings
        .ok_or_else(|| ApiError::bad_request("Effect settings are required"))?;
    settings.validate()?;

    let mut project = load_project(&state, id).await?;
    project.effect_settings = settings;
    project.touch();
    state.enhanced_projects.update(&project).await?;

    Ok(Envelope::data(project).with_message("Project effect settings updated successfully"))
}

/// Copy a project as a private draft
///
/// POST /api/enhanced-projects/:id/clone
pub async fn clone_project(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    PathId(id): PathId,
    OptionalJson(overrides): OptionalJson<CloneOverrides>,
) -> Result<Envelope<EnhancedProject>, ApiError> {
    let source = state
        .enhanced_projects
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Original project not found"))?;

    let copy = source.duplicate(overrides.unwrap_or_default())?;
    state.enhanced_projects.create(&copy).await?;

    tracing::info!(source_id = %id, project_id = %copy.id, cloned_by = %user.username, "project cloned");
    Ok(Envelope::data(copy)
        .with_message("Project cloned successfully")
        .created())
}

/// DELETE /api/enhanced-projects/:id
pub async fn delete_project(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    PathId(id): PathId,
) -> Result<Envelope<()>, ApiError> {
    if !state.enhanced_projects.delete(id).await? {
        return Err(ApiError::not_found("Enhanced project not found"));
    }

    tracing::info!(project_id = %id, deleted_by = %admin.username, "enhanced project deleted");
    Ok(Envelope::message("Enhanced project deleted successfully"))
}

/// Apply one change to many projects
///
/// PATCH /api/enhanced-projects/bulk/update
pub async fn bulk_update(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(req): ApiJson<BulkUpdateRequest>,
) -> Result<Envelope<BulkUpdateResult>, ApiError> {
    if req.project_ids.is_empty() {
        return Err(ApiError::bad_request("Project IDs array is required"));
    }
    req.updates.validate()?;

    let result = state
        .enhanced_projects
        .bulk_update(&req.project_ids, &req.updates)
        .await?;

    tracing::info!(
        matched = result.matched,
        modified = result.modified,
        updated_by = %admin.username,
        "bulk update applied"
    );
    Ok(Envelope::data(result)
        .with_message(format!("Successfully updated {} projects", result.modified)))
}
