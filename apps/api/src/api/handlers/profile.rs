use axum::extract::State;

use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::middleware::AdminUser;
use crate::api::response::Envelope;
use crate::domain::profile::{
    Availability, Education, Experience, Profile, ProfileUpdate, SkillsView, StatsView,
};
use crate::state::AppState;

async fn load_profile(state: &AppState) -> Result<Profile, ApiError> {
    state
        .profiles
        .get()
        .await?
        .ok_or_else(|| ApiError::not_found("Profile not found"))
}

/// GET /api/profile
pub async fn get_profile(State(state): State<AppState>) -> Result<Envelope<Profile>, ApiError> {
    Ok(Envelope::data(load_profile(&state).await?))
}

/// Skills grouped by category
///
/// GET /api/profile/skills
pub async fn get_skills(State(state): State<AppState>) -> Result<Envelope<SkillsView>, ApiError> {
    let profile = load_profile(&state).await?;
    Ok(Envelope::data(profile.skills_view()))
}

/// GET /api/profile/experience
pub async fn get_experience(
    State(state): State<AppState>,
) -> Result<Envelope<Vec<Experience>>, ApiError> {
    let profile = load_profile(&state).await?;
    Ok(Envelope::data(profile.sorted_experience()))
}

/// GET /api/profile/education
pub async fn get_education(
    State(state): State<AppState>,
) -> Result<Envelope<Vec<Education>>, ApiError> {
    let profile = load_profile(&state).await?;
    Ok(Envelope::data(profile.sorted_education()))
}

/// Stored counters plus skill and experience totals
///
/// GET /api/profile/stats
pub async fn get_stats(State(state): State<AppState>) -> Result<Envelope<StatsView>, ApiError> {
    let profile = load_profile(&state).await?;
    Ok(Envelope::data(profile.stats_view()))
}

/// GET /api/profile/availability
pub async fn get_availability(
    State(state): State<AppState>,
) -> Result<Envelope<Availability>, ApiError> {
    let profile = load_profile(&state).await?;
    Ok(Envelope::data(profile.availability))
}

/// Create or update the profile
///
/// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> Result<Envelope<Profile>, ApiError> {
    let existing = state.profiles.get().await?;
    let created = existing.is_none();

    let profile = update.apply_to(existing)?;
    state.profiles.save(&profile).await?;

    tracing::info!(updated_by = %admin.username, created, "profile saved");
    Ok(Envelope::data(profile).with_message("Profile updated successfully"))
}
