use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{ProjectCategory, ProjectStatus};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::SortOrder;
use crate::domain::validation::{trim_optional, Validator};

/// Projects at or above this priority count as featured
pub const FEATURED_PRIORITY: i32 = 7;

/// Fields shared by plain and enhanced projects
///
/// # Invariants
/// - Name is 1-100 characters, description 10-500
/// - At least one technology, each 1-50 characters
/// - Priority is within 0..=10
/// - End date is not before start date
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    pub name: String,
    pub description: String,
    pub long_description: Option<String>,
    pub technologies: Vec<String>,
    pub features: Vec<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub image_url: Option<String>,
    pub category: ProjectCategory,
    pub status: ProjectStatus,
    pub priority: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_public: bool,
}

/// Portfolio project shown on the projects page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    #[serde(flatten)]
    pub details: ProjectDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(details: ProjectDetails) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            details,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the writable fields and bumps `updated_at`
    pub fn replace(&mut self, details: ProjectDetails) {
        self.details = details;
        self.updated_at = Utc::now();
    }
}

/// Request body for creating or replacing a project
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub long_description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub priority: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_public: Option<bool>,
}

impl ProjectInput {
    /// Validates the input and produces normalised project details
    ///
    /// # Example
    /// ```
    /// use portfolio_api::domain::project::ProjectInput;
    ///
    /// let input = ProjectInput {
    ///     name: "Portfolio".into(),
    ///     description: "Personal portfolio website".into(),
    ///     technologies: vec!["Rust".into()],
    ///     category: Some("web".into()),
    ///     status: Some("completed".into()),
    ///     ..Default::default()
    /// };
    /// let details = input.validate().expect("valid project");
    /// assert!(details.is_public);
    /// ```
    pub fn validate(self) -> DomainResult<ProjectDetails> {
        let mut v = Validator::default();
        let details = self.check(&mut v);
        v.finish()?;
        details.ok_or_else(|| DomainError::invalid("body", "Invalid project"))
    }

    /// Records every rule violation in `v`; returns details when the
    /// enumerated fields could be parsed
    pub fn check(self, v: &mut Validator) -> Option<ProjectDetails> {
        let name = self.name.trim().to_string();
        let description = self.description.trim().to_string();
        let long_description = trim_optional(self.long_description);
        let technologies: Vec<String> = self
            .technologies
            .into_iter()
            .map(|t| t.trim().to_string())
            .collect();
        let features: Vec<String> = self
            .features
            .into_iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
        let github_url = trim_optional(self.github_url);
        let demo_url = trim_optional(self.demo_url);
        let image_url = trim_optional(self.image_url);
        let priority = self.priority.unwrap_or(0);

        v.length("name", &name, 1, 100, "Project name must be between 1 and 100 characters");
        v.length(
            "description",
            &description,
            10,
            500,
            "Description must be between 10 and 500 characters",
        );
        v.max_length(
            "longDescription",
            long_description.as_deref(),
            2000,
            "Long description cannot exceed 2000 characters",
        );
        if technologies.is_empty() {
            v.push("technologies", "At least one technology is required");
        }
        for (i, tech) in technologies.iter().enumerate() {
            v.length(
                &format!("technologies[{}]", i),
                tech,
                1,
                50,
                "Each technology must be between 1 and 50 characters",
            );
        }
        for (i, feature) in features.iter().enumerate() {
            v.max_length(
                &format!("features[{}]", i),
                Some(feature.as_str()),
                200,
                "Each feature cannot exceed 200 characters",
            );
        }
        v.github_url("githubUrl", github_url.as_deref());
        v.http_url("demoUrl", demo_url.as_deref(), "Demo URL must be a valid URL");
        v.http_url("imageUrl", image_url.as_deref(), "Image URL must be a valid URL");
        v.range("priority", priority, 0, 10, "Priority must be a number between 0 and 10");
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                v.push("endDate", "End date cannot be before start date");
            }
        }

        let category = match self.category.as_deref().map(str::parse::<ProjectCategory>) {
            Some(Ok(category)) => Some(category),
            Some(Err(message)) => {
                v.push("category", message);
                None
            }
            None => {
                v.push(
                    "category",
                    "Category must be one of: web, mobile, desktop, game, ai, other",
                );
                None
            }
        };
        let status = match self.status.as_deref().map(str::parse::<ProjectStatus>) {
            Some(Ok(status)) => Some(status),
            Some(Err(message)) => {
                v.push("status", message);
                None
            }
            None => {
                v.push("status", "Status must be one of: completed, in-progress, planned");
                None
            }
        };

        Some(ProjectDetails {
            name,
            description,
            long_description,
            technologies,
            features,
            github_url,
            demo_url,
            image_url,
            category: category?,
            status: status?,
            priority,
            start_date: self.start_date,
            end_date: self.end_date,
            is_public: self.is_public.unwrap_or(true),
        })
    }
}

/// Column a project listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSortField {
    CreatedAt,
    UpdatedAt,
    Name,
    Priority,
    StartDate,
}

impl ProjectSortField {
    /// Parses the `sortBy` query value, falling back to `default`
    pub fn parse(value: Option<&str>, default: ProjectSortField) -> Self {
        match value {
            Some("createdAt") => ProjectSortField::CreatedAt,
            Some("updatedAt") => ProjectSortField::UpdatedAt,
            Some("name") => ProjectSortField::Name,
            Some("priority") => ProjectSortField::Priority,
            Some("startDate") => ProjectSortField::StartDate,
            _ => default,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            ProjectSortField::CreatedAt => "created_at",
            ProjectSortField::UpdatedAt => "updated_at",
            ProjectSortField::Name => "name",
            ProjectSortField::Priority => "priority",
            ProjectSortField::StartDate => "start_date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectSort {
    pub field: ProjectSortField,
    pub order: SortOrder,
}

/// Filters applied to the public project listing
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub public_only: bool,
    pub category: Option<ProjectCategory>,
    pub status: Option<ProjectStatus>,
    pub search: Option<String>,
}

impl ProjectDetails {
    /// Case-insensitive substring match over name, description and technologies
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
            || self
                .technologies
                .iter()
                .any(|t| t.to_lowercase().contains(&term))
    }
}
