use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;

use super::parse_filter;
use crate::api::errors::ApiError;
use crate::api::extract::{ApiJson, ApiQuery, PathId};
use crate::api::middleware::AuthUser;
use crate::api::response::Envelope;
use crate::domain::errors::{DomainError, FieldError};
use crate::domain::ui_effect::{
    merge_settings, ComponentSettings, UiEffect, UiEffectFilter, UiEffectInput,
};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListEffectsQuery {
    #[serde(rename = "type")]
    pub effect_type: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub is_active: Option<bool>,
}

async fn load_effect(state: &AppState, id: uuid::Uuid) -> Result<UiEffect, ApiError> {
    state
        .effects
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("UI effect not found"))
}

/// Active effects ordered by type
///
/// GET /api/ui-effects/active
pub async fn active_effects(
    State(state): State<AppState>,
) -> Result<Envelope<Vec<UiEffect>>, ApiError> {
    let filter = UiEffectFilter {
        effect_type: None,
        is_active: Some(true),
    };
    let effects = state.effects.list(&filter).await?;
    let count = effects.len();
    Ok(Envelope::data(effects).with_count(count))
}

/// Settings of the active effect of one type, or the built-in defaults
///
/// GET /api/ui-effects/{dither,spotlight,profile-card,staggered-menu}
pub async fn component_settings<S>(State(state): State<AppState>) -> Result<Envelope<Value>, ApiError>
where
    S: ComponentSettings + Send + 'static,
{
    if let Some(effect) = state.effects.find_active_by_type(S::EFFECT_TYPE).await? {
        return Ok(Envelope::data(effect.effective_settings().clone()));
    }

    let defaults = serde_json::to_value(S::default())
        .map_err(|e| DomainError::Storage(e.to_string()))?;
    Ok(Envelope::data(defaults).with_message(format!(
        "Default {} settings returned",
        S::EFFECT_TYPE.label().to_lowercase()
    )))
}

/// Merge new values into one type's component settings
///
/// Creates a default effect of that type when none exists.
///
/// PUT /api/ui-effects/{dither,spotlight,profile-card,staggered-menu}/settings
pub async fn update_component_settings<S>(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(patch): ApiJson<Value>,
) -> Result<Envelope<Value>, ApiError>
where
    S: ComponentSettings + Send + 'static,
{
    let effect_type = S::EFFECT_TYPE;
    let existing = state.effects.find_by_type(effect_type).await?;

    let effect = match existing {
        Some(mut effect) => {
            effect.component_settings = merge_settings::<S>(&effect.component_settings, &patch)?;
            effect.updated_at = chrono::Utc::now();
            state.effects.update(&effect).await?;
            effect
        }
        None => {
            let mut effect = UiEffect::new(effect_type.default_effect_name(), effect_type);
            effect.component_settings = merge_settings::<S>(&Value::Null, &patch)?;
            state.effects.create(&effect).await?;
            tracing::info!(effect_type = %effect_type, "created default effect");
            effect
        }
    };

    tracing::debug!(effect_id = %effect.id, updated_by = %user.username, "effect settings updated");
    Ok(Envelope::data(effect.component_settings)
        .with_message(format!("{} settings updated successfully", effect_type.label())))
}

/// All effects, optionally filtered by type and active flag
///
/// GET /api/ui-effects
pub async fn list_effects(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    ApiQuery(query): ApiQuery<ListEffectsQuery>,
) -> Result<Envelope<Vec<UiEffect>>, ApiError> {
    let filter = UiEffectFilter {
        effect_type: parse_filter("type", query.effect_type.as_deref())?,
        is_active: query.active,
    };
    let effects = state.effects.list(&filter).await?;
    let count = effects.len();
    Ok(Envelope::data(effects).with_count(count))
}

/// GET /api/ui-effects/:id
pub async fn get_effect(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    PathId(id): PathId,
) -> Result<Envelope<UiEffect>, ApiError> {
    Ok(Envelope::data(load_effect(&state, id).await?))
}

/// POST /api/ui-effects
pub async fn create_effect(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(input): ApiJson<UiEffectInput>,
) -> Result<Envelope<UiEffect>, ApiError> {
    let effect = input.into_effect()?;
    state.effects.create(&effect).await?;

    tracing::info!(effect_id = %effect.id, name = %effect.name, created_by = %user.username, "effect created");
    Ok(Envelope::data(effect)
        .with_message("UI effect created successfully")
        .created())
}

/// PUT /api/ui-effects/:id
pub async fn update_effect(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    PathId(id): PathId,
    ApiJson(input): ApiJson<UiEffectInput>,
) -> Result<Envelope<UiEffect>, ApiError> {
    let mut effect = load_effect(&state, id).await?;
    input.apply_to(&mut effect)?;
    state.effects.update(&effect).await?;

    Ok(Envelope::data(effect).with_message("UI effect updated successfully"))
}

/// DELETE /api/ui-effects/:id
pub async fn delete_effect(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    PathId(id): PathId,
) -> Result<Envelope<()>, ApiError> {
    if !state.effects.delete(id).await? {
        return Err(ApiError::not_found("UI effect not found"));
    }

    tracing::info!(effect_id = %id, deleted_by = %user.username, "effect deleted");
    Ok(Envelope::message("UI effect deleted successfully"))
}

/// Switch an effect on or off
///
/// PATCH /api/ui-effects/:id/toggle
pub async fn toggle_effect(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    PathId(id): PathId,
    ApiJson(req): ApiJson<ToggleRequest>,
) -> Result<Envelope<UiEffect>, ApiError> {
    let is_active = req.is_active.ok_or_else(|| {
        ApiError::validation(vec![FieldError::new("isActive", "isActive must be a boolean")])
    })?;

    let mut effect = load_effect(&state, id).await?;
    effect.set_active(is_active);
    state.effects.update(&effect).await?;

    let verb = if is_active { "activated" } else { "deactivated" };
    Ok(Envelope::data(effect).with_message(format!("Effect {} successfully", verb)))
}
