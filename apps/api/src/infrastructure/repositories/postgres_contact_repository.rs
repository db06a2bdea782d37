use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::contact::{ContactFilter, ContactMessage, ContactPriority};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repositories::ContactRepository;
use crate::domain::user::Email;

/// PostgreSQL implementation of ContactRepository
pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ContactRow {
    id: Uuid,
    name: String,
    email: String,
    subject: String,
    message: String,
    is_read: bool,
    is_replied: bool,
    priority: ContactPriority,
    ip_address: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for ContactMessage {
    type Error = DomainError;

    fn try_from(r: ContactRow) -> Result<Self, Self::Error> {
        Ok(ContactMessage {
            id: r.id,
            name: r.name,
            email: Email::new(r.email)
                .map_err(|e| DomainError::Storage(format!("Invalid email from database: {}", e)))?,
            subject: r.subject,
            message: r.message,
            is_read: r.is_read,
            is_replied: r.is_replied,
            priority: r.priority,
            ip_address: r.ip_address,
            user_agent: r.user_agent,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

const CONTACT_COLUMNS: &str = "id, name, email, subject, message, is_read, is_replied, priority, \
     ip_address, user_agent, created_at, updated_at";

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &ContactFilter) {
    qb.push(" WHERE TRUE");
    if let Some(is_read) = filter.is_read {
        qb.push(" AND is_read = ").push_bind(is_read);
    }
    if let Some(priority) = filter.priority {
        qb.push(" AND priority = ").push_bind(priority);
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn create(&self, message: &ContactMessage) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contact_messages (
                id, name, email, subject, message, is_read, is_replied, priority,
                ip_address, user_agent, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(message.id)
        .bind(&message.name)
        .bind(message.email.as_str())
        .bind(&message.subject)
        .bind(&message.message)
        .bind(message.is_read)
        .bind(message.is_replied)
        .bind(message.priority)
        .bind(&message.ip_address)
        .bind(&message.user_agent)
        .bind(message.created_at)
        .bind(message.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(
        &self,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> DomainResult<Page<ContactMessage>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM contact_messages");
        push_filters(&mut count, filter);
        let total = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM contact_messages",
            CONTACT_COLUMNS
        ));
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC, id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = qb.build_query_as::<ContactRow>().fetch_all(&self.pool).await?;
        let items = rows
            .into_iter()
            .map(ContactMessage::try_from)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Page { items, total })
    }

    async fn mark_read(&self, id: Uuid) -> DomainResult<Option<ContactMessage>> {
        let row = sqlx::query_as::<_, ContactRow>(&format!(
            r#"
            UPDATE contact_messages
            SET is_read = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CONTACT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ContactMessage::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
