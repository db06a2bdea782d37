use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{push_order, push_search};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::project::{
    Project, ProjectCategory, ProjectDetails, ProjectFilter, ProjectSort, ProjectStatus,
};
use crate::domain::repositories::ProjectRepository;

/// PostgreSQL implementation of ProjectRepository
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ProjectRow {
    id: Uuid,
    name: String,
    description: String,
    long_description: Option<String>,
    technologies: Vec<String>,
    features: Vec<String>,
    github_url: Option<String>,
    demo_url: Option<String>,
    image_url: Option<String>,
    category: ProjectCategory,
    status: ProjectStatus,
    priority: i32,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    is_public: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(r: ProjectRow) -> Self {
        Project {
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
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

const PROJECT_COLUMNS: &str = "id, name, description, long_description, technologies, features, \
     github_url, demo_url, image_url, category, status, priority, start_date, end_date, \
     is_public, created_at, updated_at";

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &ProjectFilter) {
    qb.push(" WHERE TRUE");
    if filter.public_only {
        qb.push(" AND is_public = TRUE");
    }
    if let Some(category) = filter.category {
        qb.push(" AND category = ").push_bind(category);
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(term) = filter.search.as_deref() {
        push_search(qb, term);
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn list(
        &self,
        filter: &ProjectFilter,
        sort: ProjectSort,
        page: PageRequest,
    ) -> DomainResult<Page<Project>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM projects");
        push_filters(&mut count, filter);
        let total = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM projects", PROJECT_COLUMNS));
        push_filters(&mut qb, filter);
        push_order(&mut qb, sort);
        qb.push(" LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = qb.build_query_as::<ProjectRow>().fetch_all(&self.pool).await?;
        Ok(Page {
            items: rows.into_iter().map(Project::from).collect(),
            total,
        })
    }

    async fn featured(&self, min_priority: i32, limit: i64) -> DomainResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            SELECT {}
            FROM projects
            WHERE is_public = TRUE AND priority >= $1
            ORDER BY priority DESC, created_at DESC
            LIMIT $2
            "#,
            PROJECT_COLUMNS
        ))
        .bind(min_priority)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {} FROM projects WHERE id = $1",
            PROJECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Project::from))
    }

    async fn create(&self, project: &Project) -> DomainResult<()> {
        let d = &project.details;
        sqlx::query(
            r#"
            INSERT INTO projects (
                id, name, description, long_description, technologies, features,
                github_url, demo_url, image_url, category, status, priority,
                start_date, end_date, is_public, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
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
        .bind(d.category)
        .bind(d.status)
        .bind(d.priority)
        .bind(d.start_date)
        .bind(d.end_date)
        .bind(d.is_public)
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, project: &Project) -> DomainResult<()> {
        let d = &project.details;
        let result = sqlx::query(
            r#"
            UPDATE projects SET
                name = $2, description = $3, long_description = $4, technologies = $5,
                features = $6, github_url = $7, demo_url = $8, image_url = $9,
                category = $10, status = $11, priority = $12, start_date = $13,
                end_date = $14, is_public = $15, updated_at = $16
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
        .bind(d.category)
        .bind(d.status)
        .bind(d.priority)
        .bind(d.start_date)
        .bind(d.end_date)
        .bind(d.is_public)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Project not found".into()));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
