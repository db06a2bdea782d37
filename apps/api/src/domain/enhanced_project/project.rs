use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::settings::{CardSettings, EffectSettings};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::project::{ProjectCategory, ProjectDetails, ProjectInput, ProjectStatus};
use crate::domain::validation::{trim_optional, Validator};

/// Project rendered as an interactive card
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedProject {
    pub id: Uuid,
    #[serde(flatten)]
    pub details: ProjectDetails,
    pub preview_image: Option<String>,
    pub is_featured: bool,
    pub card_settings: CardSettings,
    pub effect_settings: EffectSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EnhancedProject {
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Copies this project as a private, unfeatured draft
    ///
    /// The copy is named `<name> (Copy)` unless the overrides carry a name.
    pub fn duplicate(&self, overrides: CloneOverrides) -> DomainResult<EnhancedProject> {
        let mut details = self.details.clone();
        details.name = overrides
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("{} (Copy)", self.details.name));
        details.is_public = overrides.is_public.unwrap_or(false);
        details.priority = overrides.priority.unwrap_or(0);
        if let Some(description) = overrides.description {
            details.description = description.trim().to_string();
        }
        if let Some(category) = overrides.category {
            details.category = category;
        }
        if let Some(status) = overrides.status {
            details.status = status;
        }

        let mut v = Validator::default();
        v.length(
            "name",
            &details.name,
            1,
            100,
            "Project name must be between 1 and 100 characters",
        );
        v.length(
            "description",
            &details.description,
            10,
            500,
            "Description must be between 10 and 500 characters",
        );
        v.range(
            "priority",
            details.priority,
            0,
            10,
            "Priority must be a number between 0 and 10",
        );
        v.finish()?;

        let now = Utc::now();
        Ok(EnhancedProject {
            id: Uuid::new_v4(),
            details,
            preview_image: self.preview_image.clone(),
            is_featured: overrides.is_featured.unwrap_or(false),
            card_settings: self.card_settings.clone(),
            effect_settings: self.effect_settings.clone(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Request body for creating or replacing an enhanced project
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedProjectInput {
    #[serde(flatten)]
    pub project: ProjectInput,
    pub preview_image: Option<String>,
    pub is_featured: Option<bool>,
    pub card_settings: Option<CardSettings>,
    pub effect_settings: Option<EffectSettings>,
}

/// Validated writable fields of an enhanced project
#[derive(Debug, Clone, PartialEq)]
pub struct EnhancedProjectDraft {
    pub details: ProjectDetails,
    pub preview_image: Option<String>,
    pub is_featured: Option<bool>,
    pub card_settings: Option<CardSettings>,
    pub effect_settings: Option<EffectSettings>,
}

impl EnhancedProjectInput {
    pub fn validate(self) -> DomainResult<EnhancedProjectDraft> {
        let mut v = Validator::default();
        let details = self.project.check(&mut v);
        let preview_image = trim_optional(self.preview_image);
        v.http_url(
            "previewImage",
            preview_image.as_deref(),
            "Please enter a valid preview image URL",
        );
        if let Some(settings) = &self.card_settings {
            v.nested("cardSettings", settings.validate());
        }
        if let Some(settings) = &self.effect_settings {
            v.nested("effectSettings", settings.validate());
        }
        v.finish()?;

        let details =
            details.ok_or_else(|| DomainError::invalid("body", "Invalid project"))?;
        Ok(EnhancedProjectDraft {
            details,
            preview_image,
            is_featured: self.is_featured,
            card_settings: self.card_settings,
            effect_settings: self.effect_settings,
        })
    }
}

impl EnhancedProjectDraft {
    pub fn into_project(self) -> EnhancedProject {
        let now = Utc::now();
        EnhancedProject {
            id: Uuid::new_v4(),
            details: self.details,
            preview_image: self.preview_image,
            is_featured: self.is_featured.unwrap_or(false),
            card_settings: self.card_settings.unwrap_or_default(),
            effect_settings: self.effect_settings.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the writable fields; omitted settings keep their stored values
    pub fn apply_to(self, project: &mut EnhancedProject) {
        project.details = self.details;
        project.preview_image = self.preview_image;
        if let Some(is_featured) = self.is_featured {
            project.is_featured = is_featured;
        }
        if let Some(settings) = self.card_settings {
            project.card_settings = settings;
        }
        if let Some(settings) = self.effect_settings {
            project.effect_settings = settings;
        }
        project.touch();
    }
}

/// Fields a clone request may override
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneOverrides {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
    pub is_featured: Option<bool>,
    pub priority: Option<i32>,
    pub category: Option<ProjectCategory>,
    pub status: Option<ProjectStatus>,
}

/// Changes applied to every project in a bulk update
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdate {
    pub is_public: Option<bool>,
    pub is_featured: Option<bool>,
    pub priority: Option<i32>,
    pub category: Option<ProjectCategory>,
    pub status: Option<ProjectStatus>,
}

impl BulkUpdate {
    pub fn is_empty(&self) -> bool {
        self.is_public.is_none()
            && self.is_featured.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.status.is_none()
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.is_empty() {
            return Err(DomainError::BadRequest("Updates object is required".into()));
        }
        let mut v = Validator::default();
        if let Some(priority) = self.priority {
            v.range("priority", priority, 0, 10, "Priority must be a number between 0 and 10");
        }
        v.finish()
    }

    pub fn apply_to(&self, project: &mut EnhancedProject) {
        if let Some(is_public) = self.is_public {
            project.details.is_public = is_public;
        }
        if let Some(is_featured) = self.is_featured {
            project.is_featured = is_featured;
        }
        if let Some(priority) = self.priority {
            project.details.priority = priority;
        }
        if let Some(category) = self.category {
            project.details.category = category;
        }
        if let Some(status) = self.status {
            project.details.status = status;
        }
        project.touch();
    }
}

/// Outcome of a bulk update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkUpdateResult {
    pub matched: u64,
    pub modified: u64,
}

/// Filters for the enhanced project listing
#[derive(Debug, Clone, Default)]
pub struct EnhancedProjectFilter {
    pub category: Option<ProjectCategory>,
    pub status: Option<ProjectStatus>,
    pub is_featured: Option<bool>,
    pub is_public: Option<bool>,
    pub search: Option<String>,
}

impl EnhancedProjectFilter {
    pub fn matches(&self, project: &EnhancedProject) -> bool {
        self.category.map_or(true, |c| project.details.category == c)
            && self.status.map_or(true, |s| project.details.status == s)
            && self.is_featured.map_or(true, |f| project.is_featured == f)
            && self.is_public.map_or(true, |p| project.details.is_public == p)
            && self
                .search
                .as_deref()
                .map_or(true, |term| project.details.matches_search(term))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsOverview {
    pub total: i64,
    pub public: i64,
    pub featured: i64,
    pub private: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: ProjectCategory,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: ProjectStatus,
    pub count: i64,
}

/// Aggregate counts over all enhanced projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub overview: StatsOverview,
    pub by_category: Vec<CategoryCount>,
    pub by_status: Vec<StatusCount>,
}

impl ProjectStats {
    /// Builds stats from raw counts; categories are ordered by count, highest first
    pub fn new(
        total: i64,
        public: i64,
        featured: i64,
        mut by_category: Vec<CategoryCount>,
        by_status: Vec<StatusCount>,
    ) -> Self {
        by_category.sort_by(|a, b| b.count.cmp(&a.count));
        Self {
            overview: StatsOverview {
                total,
                public,
                featured,
                private: total - public,
            },
            by_category,
            by_status,
        }
    }
}
