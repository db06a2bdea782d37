use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::UiEffectRepository;
use crate::domain::ui_effect::{EffectType, UiEffect, UiEffectFilter};

/// PostgreSQL implementation of UiEffectRepository
pub struct PostgresUiEffectRepository {
    pool: PgPool,
}

impl PostgresUiEffectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UiEffectRow {
    id: Uuid,
    name: String,
    effect_type: EffectType,
    is_active: bool,
    global_settings: Json<Value>,
    component_settings: Json<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UiEffectRow> for UiEffect {
    fn from(r: UiEffectRow) -> Self {
        UiEffect {
            id: r.id,
            name: r.name,
            effect_type: r.effect_type,
            is_active: r.is_active,
            global_settings: r.global_settings.0,
            component_settings: r.component_settings.0,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

const EFFECT_COLUMNS: &str = "id, name, effect_type, is_active, global_settings, \
     component_settings, created_at, updated_at";

fn name_conflict(err: sqlx::Error) -> DomainError {
    match DomainError::from(err) {
        DomainError::Conflict(_) => DomainError::Conflict("Effect with this name already exists".into()),
        other => other,
    }
}

#[async_trait]
impl UiEffectRepository for PostgresUiEffectRepository {
    async fn list(&self, filter: &UiEffectFilter) -> DomainResult<Vec<UiEffect>> {
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM ui_effects WHERE TRUE", EFFECT_COLUMNS));
        if let Some(effect_type) = filter.effect_type {
            qb.push(" AND effect_type = ").push_bind(effect_type);
        }
        if let Some(is_active) = filter.is_active {
            qb.push(" AND is_active = ").push_bind(is_active);
        }
        qb.push(" ORDER BY effect_type::text, name");

        let rows = qb.build_query_as::<UiEffectRow>().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(UiEffect::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<UiEffect>> {
        let row = sqlx::query_as::<_, UiEffectRow>(&format!(
            "SELECT {} FROM ui_effects WHERE id = $1",
            EFFECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UiEffect::from))
    }

    async fn find_by_type(&self, effect_type: EffectType) -> DomainResult<Option<UiEffect>> {
        let row = sqlx::query_as::<_, UiEffectRow>(&format!(
            r#"
            SELECT {}
            FROM ui_effects
            WHERE effect_type = $1
            ORDER BY is_active DESC, created_at
            LIMIT 1
            "#,
            EFFECT_COLUMNS
        ))
        .bind(effect_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UiEffect::from))
    }

    async fn find_active_by_type(
        &self,
        effect_type: EffectType,
    ) -> DomainResult<Option<UiEffect>> {
        let row = sqlx::query_as::<_, UiEffectRow>(&format!(
            r#"
            SELECT {}
            FROM ui_effects
            WHERE effect_type = $1 AND is_active = TRUE
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
            EFFECT_COLUMNS
        ))
        .bind(effect_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UiEffect::from))
    }

    async fn create(&self, effect: &UiEffect) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO ui_effects (
                id, name, effect_type, is_active, global_settings, component_settings,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(effect.id)
        .bind(&effect.name)
        .bind(effect.effect_type)
        .bind(effect.is_active)
        .bind(Json(&effect.global_settings))
        .bind(Json(&effect.component_settings))
        .bind(effect.created_at)
        .bind(effect.updated_at)
        .execute(&self.pool)
        .await
        .map_err(name_conflict)?;

        Ok(())
    }

    async fn update(&self, effect: &UiEffect) -> DomainResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE ui_effects SET
                name = $2, effect_type = $3, is_active = $4, global_settings = $5,
                component_settings = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(effect.id)
        .bind(&effect.name)
        .bind(effect.effect_type)
        .bind(effect.is_active)
        .bind(Json(&effect.global_settings))
        .bind(Json(&effect.component_settings))
        .bind(effect.updated_at)
        .execute(&self.pool)
        .await
        .map_err(name_conflict)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("UI effect not found".into()));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM ui_effects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
