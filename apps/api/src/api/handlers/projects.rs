use axum::extract::State;
use serde::{Deserialize, Serialize};

use super::{parse_filter, search_term};
use crate::api::errors::ApiError;
use crate::api::extract::{ApiJson, ApiQuery, PathId};
use crate::api::middleware::{AdminUser, OptionalUser};
use crate::api::response::{page_summary, Envelope};
use crate::domain::pagination::{PageRequest, SortOrder};
use crate::domain::project::{
    Project, ProjectFilter, ProjectInput, ProjectSort, ProjectSortField, FEATURED_PRIORITY,
};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 10;
const FEATURED_LIMIT: i64 = 6;

/// Query parameters for the public project listing
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectList {
    pub projects: Vec<Project>,
    pub pagination: serde_json::Value,
}

/// List public projects
///
/// GET /api/projects
pub async fn list_projects(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListProjectsQuery>,
) -> Result<Envelope<ProjectList>, ApiError> {
    let filter = ProjectFilter {
        public_only: true,
        category: parse_filter("category", query.category.as_deref())?,
        status: parse_filter("status", query.status.as_deref())?,
        search: search_term(query.search),
    };
    let sort = ProjectSort {
        field: ProjectSortField::parse(query.sort_by.as_deref(), ProjectSortField::CreatedAt),
        order: SortOrder::parse(query.sort_order.as_deref()),
    };
    let page = PageRequest::new(query.page, query.limit, DEFAULT_PAGE_SIZE);

    let result = state.projects.list(&filter, sort, page).await?;

    Ok(Envelope::data(ProjectList {
        projects: result.items,
        pagination: page_summary(page, result.total, "totalProjects"),
    }))
}

/// Highest-priority public projects
///
/// GET /api/projects/featured
pub async fn featured_projects(
    State(state): State<AppState>,
) -> Result<Envelope<Vec<Project>>, ApiError> {
    let projects = state
        .projects
        .featured(FEATURED_PRIORITY, FEATURED_LIMIT)
        .await?;
    Ok(Envelope::data(projects))
}

/// Get a project by ID; private projects are visible to admins only
///
/// GET /api/projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    caller: OptionalUser,
    PathId(id): PathId,
) -> Result<Envelope<Project>, ApiError> {
    let project = state
        .projects
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;

    if !project.details.is_public && !caller.is_admin() {
        return Err(ApiError::forbidden("Access denied to private project"));
    }

    Ok(Envelope::data(project))
}

/// Create a project
///
/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(input): ApiJson<ProjectInput>,
) -> Result<Envelope<Project>, ApiError> {
    let project = Project::new(input.validate()?);
    state.projects.create(&project).await?;

    tracing::info!(project_id = %project.id, created_by = %admin.username, "project created");
    Ok(Envelope::data(project)
        .with_message("Project created successfully")
        .created())
}

/// Replace a project's writable fields
///
/// PUT /api/projects/:id
pub async fn update_project(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    PathId(id): PathId,
    ApiJson(input): ApiJson<ProjectInput>,
) -> Result<Envelope<Project>, ApiError> {
    let mut project = state
        .projects
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;

    project.replace(input.validate()?);
    state.projects.update(&project).await?;

    Ok(Envelope::data(project).with_message("Project updated successfully"))
}

/// Delete a project
///
/// DELETE /api/projects/:id
pub async fn delete_project(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    PathId(id): PathId,
) -> Result<Envelope<()>, ApiError> {
    if !state.projects.delete(id).await? {
        return Err(ApiError::not_found("Project not found"));
    }

    tracing::info!(project_id = %id, deleted_by = %admin.username, "project deleted");
    Ok(Envelope::message("Project deleted successfully"))
}
