// Sample content for a fresh deployment: profile, projects, UI effects and
// enhanced project cards

use serde::Deserialize;
use serde_json::Value;

use crate::domain::enhanced_project::{EnhancedProjectFilter, EnhancedProjectInput};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::{PageRequest, SortOrder};
use crate::domain::profile::ProfileUpdate;
use crate::domain::project::{Project, ProjectFilter, ProjectInput, ProjectSort, ProjectSortField};
use crate::domain::ui_effect::{
    merge_settings, DitherSettings, EffectType, ProfileCardSettings, SpotlightSettings,
    StaggeredMenuSettings, UiEffect, UiEffectFilter, UiEffectInput,
};
use crate::state::AppState;

const BUNDLED: &str = include_str!("../../seed/portfolio.json");

/// Content loaded by `portfolio-api seed`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    pub profile: ProfileUpdate,
    #[serde(default)]
    pub projects: Vec<ProjectInput>,
    #[serde(default)]
    pub ui_effects: Vec<UiEffectInput>,
    #[serde(default)]
    pub enhanced_projects: Vec<EnhancedProjectInput>,
}

impl SeedData {
    /// The sample portfolio shipped with the binary
    pub fn bundled() -> DomainResult<Self> {
        serde_json::from_str(BUNDLED)
            .map_err(|e| DomainError::Storage(format!("invalid bundled seed data: {}", e)))
    }
}

/// What a seed run wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub profile: bool,
    pub projects: usize,
    pub ui_effects: usize,
    pub enhanced_projects: usize,
}

/// Writes `data` into every collection that is still empty
///
/// Collections that already hold records are left untouched, so running the
/// seed twice is harmless. Every record passes the same validation as the
/// HTTP API.
pub async fn seed(state: &AppState, data: SeedData) -> DomainResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    if state.profiles.get().await?.is_none() {
        let profile = data.profile.apply_to(None)?;
        state.profiles.save(&profile).await?;
        summary.profile = true;
        tracing::info!(full_name = %profile.full_name, "Profile seeded");
    } else {
        tracing::info!("Profile exists; skipping");
    }

    let first = PageRequest::new(None, Some(1), 1);
    let sort = ProjectSort {
        field: ProjectSortField::CreatedAt,
        order: SortOrder::Desc,
    };

    if state.projects.list(&ProjectFilter::default(), sort, first).await?.total == 0 {
        for input in data.projects {
            let project = Project::new(input.validate()?);
            state.projects.create(&project).await?;
            summary.projects += 1;
        }
        tracing::info!(count = summary.projects, "Projects seeded");
    } else {
        tracing::info!("Projects exist; skipping");
    }

    if state.effects.list(&UiEffectFilter::default()).await?.is_empty() {
        for input in data.ui_effects {
            let mut effect = input.into_effect()?;
            normalise_settings(&mut effect)?;
            state.effects.create(&effect).await?;
            summary.ui_effects += 1;
        }
        tracing::info!(count = summary.ui_effects, "UI effects seeded");
    } else {
        tracing::info!("UI effects exist; skipping");
    }

    let existing = state
        .enhanced_projects
        .list(&EnhancedProjectFilter::default(), sort, first)
        .await?;
    if existing.total == 0 {
        for input in data.enhanced_projects {
            let project = input.validate()?.into_project();
            state.enhanced_projects.create(&project).await?;
            summary.enhanced_projects += 1;
        }
        tracing::info!(count = summary.enhanced_projects, "Enhanced projects seeded");
    } else {
        tracing::info!("Enhanced projects exist; skipping");
    }

    Ok(summary)
}

/// Validates component settings of the typed effects and fills defaults
fn normalise_settings(effect: &mut UiEffect) -> DomainResult<()> {
    let settings = &effect.component_settings;
    effect.component_settings = match effect.effect_type {
        EffectType::Dither => merge_settings::<DitherSettings>(&Value::Null, settings)?,
        EffectType::Spotlight => merge_settings::<SpotlightSettings>(&Value::Null, settings)?,
        EffectType::ProfileCard => merge_settings::<ProfileCardSettings>(&Value::Null, settings)?,
        EffectType::StaggeredMenu => {
            merge_settings::<StaggeredMenuSettings>(&Value::Null, settings)?
        }
        _ => return Ok(()),
    };
    Ok(())
}
