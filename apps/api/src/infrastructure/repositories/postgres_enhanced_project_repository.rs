use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{push_order, push_search};
use crate::domain::enhanced_project::{
    BulkUpdate, BulkUpdateResult, CardSettings, CategoryCount, EffectSettings, EnhancedProject,
    EnhancedProjectFilter, ProjectStats, StatusCount,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::project::{ProjectCategory, ProjectDetails, ProjectSort, ProjectStatus};
use crate::domain::repositories::EnhancedProjectRepository;

/// PostgreSQL implementation of EnhancedProjectRepository
///
/// Card and effect settings live in JSONB columns next to the project fields.
pub struct PostgresEnhancedProjectRepository {
    pool: PgPool,
}

impl PostgresEnhancedProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct EnhancedProjectRow {
    id: Uuid,
    name: String,
    description: String,
    long_description: Option<String>,
    technologies: Vec<String>,
    features: Vec<String>,
    github_url: Option<String>,
    demo_url: Option<String>,
    image_url: Option<String>,
    preview_image: Option<String>,
    category: ProjectCategory,
    status: ProjectStatus,
    priority: i32,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    is_public: bool,
    is_featured: bool,
    card_settings: Json<CardSettings>,
    effect_settings: Json<EffectSettings>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EnhancedProjectRow> for EnhancedProject {
    fn from(r: EnhancedProjectRow) -> Self {
        EnhancedProject {
            id: r.id,
            details: ProjectDetails {
                name: r.name,
                description: r.description,
                long_description: r.long_description,
                technologies: r.technologies,
                features: r.features,
                github_url: r.github_url,
                demo_url: r.demo_url,
                image_url: r.image_url,
                category: r.category,
                status: r.status,
                priority: r.priority,
                start_date: r.start_date,
                end_date: r.end_date,
                is_public: r.is_public,
            },
            preview_image: r.preview_image,
            is_featured: r.is_featured,
            card_settings: r.card_settings.0,
            effect_settings: r.effect_settings.0,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

const COLUMNS: &str = "id, name, description, long_description, technologies, features, \
     github_url, demo_url, image_url, preview_image, category, status, priority, start_date, \
     end_date, is_public, is_featured, card_settings, effect_settings, created_at, updated_at";

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &EnhancedProjectFilter) {
    qb.push(" WHERE TRUE");
    if let Some(category) = filter.category {
        qb.push(" AND category = ").push_bind(category);
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(is_featured) = filter.is_featured {
        qb.push(" AND is_featured = ").push_bind(is_featured);
    }
    if let Some(is_public) = filter.is_public {
        qb.push(" AND is_public = ").push_bind(is_public);
    }
    if let Some(term) = filter.search.as_deref() {
        push_search(qb, term);
    }
}

#[async_trait]
impl EnhancedProjectRepository for PostgresEnhancedProjectRepository {
    async fn list(
        &self,
        filter: &EnhancedProjectFilter,
        sort: ProjectSort,
        page: PageRequest,
    ) -> DomainResult<Page<EnhancedProject>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM enhanced_projects");
        push_filters(&mut count, filter);
        let total = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM enhanced_projects", COLUMNS));
        push_filters(&mut qb, filter);
        push_order(&mut qb, sort);
        qb.push(" LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = qb
            .build_query_as::<EnhancedProjectRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(Page {
            items: rows.into_iter().map(EnhancedProject::from).collect(),
            total,
        })
    }

    async fn featured(&self, limit: i64) -> DomainResult<Vec<EnhancedProject>> {
        let rows = sqlx::query_as::<_, EnhancedProjectRow>(&format!(
            r#"
            SELECT {}
            FROM enhanced_projects
            WHERE is_public = TRUE AND is_featured = TRUE
            ORDER BY priority DESC, created_at DESC
            LIMIT $1
            "#,
            COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EnhancedProject::from).collect())
    }

    async fn by_category(
        &self,
        category: ProjectCategory,
        include_private: bool,
        limit: i64,
    ) -> DomainResult<Vec<EnhancedProject>> {
        let rows = sqlx::query_as::<_, EnhancedProjectRow>(&format!(
            r#"
            SELECT {}
            FROM enhanced_projects
            WHERE category = $1 AND ($2 OR is_public = TRUE)
            ORDER BY priority DESC, created_at DESC
            LIMIT $3
            "#,
            COLUMNS
        ))
        .bind(category)
        .bind(include_private)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EnhancedProject::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<EnhancedProject>> {
        let row = sqlx::query_as::<_, EnhancedProjectRow>(&format!(
            "SELECT {} FROM enhanced_projects WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(EnhancedProject::from))
    }

    async fn create(&self, project: &EnhancedProject) -> DomainResult<()> {
        let d = &project.details;
        sqlx::query(
            r#"
            INSERT INTO enhanced_projects (
                id, name, description, long_description, technologies, features,
                github_url, demo_url, image_url, preview_image, category, status, priority,
                start_date, end_date, is_public, is_featured, card_settings, effect_settings,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21)
            "#,
        )
        .bind(project.id)
        .bind(&d.name)
        .bind(&d.description)
        .bind(&d.long_description)
        .bind(&d.technologies)
        .bind(&d.features)
        .bind(&d.github_url)
        .bind(&d.demo_url)
        .bind(&d.image_url)
        .bind(&project.preview_image)
        .bind(d.category)
        .bind(d.status)
        .bind(d.priority)
        .bind(d.start_date)
        .bind(d.end_date)
        .bind(d.is_public)
        .bind(project.is_featured)
        .bind(Json(&project.card_settings))
        .bind(Json(&project.effect_settings))
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, project: &EnhancedProject) -> DomainResult<()> {
        let d = &project.details;
        let result = sqlx::query(
            r#"
            UPDATE enhanced_projects SET
                name = $2, description = $3, long_description = $4, technologies = $5,
                features = $6, github_url = $7, demo_url = $8, image_url = $9,
                preview_image = $10, category = $11, status = $12, priority = $13,
                start_date = $14, end_date = $15, is_public = $16, is_featured = $17,
                card_settings = $18, effect_settings = $19, updated_at = $20
            WHERE id = $1
            "#,
        )
        .bind(project.id)
        .bind(&d.name)
        .bind(&d.description)
        .bind(&d.long_description)
        .bind(&d.technologies)
        .bind(&d.features)
        .bind(&d.github_url)
        .bind(&d.demo_url)
        .bind(&d.image_url)
        .bind(&project.preview_image)
        .bind(d.category)
        .bind(d.status)
        .bind(d.priority)
        .bind(d.start_date)
        .bind(d.end_date)
        .bind(d.is_public)
        .bind(project.is_featured)
        .bind(Json(&project.card_settings))
        .bind(Json(&project.effect_settings))
        .bind(project.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Enhanced project not found".into()));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM enhanced_projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn bulk_update(
        &self,
        ids: &[Uuid],
        update: &BulkUpdate,
    ) -> DomainResult<BulkUpdateResult> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE enhanced_projects SET updated_at = NOW()");
        if let Some(is_public) = update.is_public {
            qb.push(", is_public = ").push_bind(is_public);
        }
        if let Some(is_featured) = update.is_featured {
            qb.push(", is_featured = ").push_bind(is_featured);
        }
        if let Some(priority) = update.priority {
            qb.push(", priority = ").push_bind(priority);
        }
        if let Some(category) = update.category {
            qb.push(", category = ").push_bind(category);
        }
        if let Some(status) = update.status {
            qb.push(", status = ").push_bind(status);
        }
        qb.push(" WHERE id = ANY(").push_bind(ids.to_vec()).push(")");

        let result = qb.build().execute(&self.pool).await?;
        let affected = result.rows_affected();
        Ok(BulkUpdateResult {
            matched: affected,
            modified: affected,
        })
    }

    async fn stats(&self) -> DomainResult<ProjectStats> {
        let (total, public, featured): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE is_public),
                COUNT(*) FILTER (WHERE is_featured)
            FROM enhanced_projects
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let by_category: Vec<(ProjectCategory, i64)> = sqlx::query_as(
            "SELECT category, COUNT(*) FROM enhanced_projects GROUP BY category ORDER BY COUNT(*) DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let by_status: Vec<(ProjectStatus, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM enhanced_projects GROUP BY status")
                .fetch_all(&self.pool)
                .await?;

        Ok(ProjectStats::new(
            total,
            public,
            featured,
            by_category
                .into_iter()
                .map(|(category, count)| CategoryCount { category, count })
                .collect(),
            by_status
                .into_iter()
                .map(|(status, count)| StatusCount { status, count })
                .collect(),
        ))
    }
}
