// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod postgres_contact_repository;
pub mod postgres_enhanced_project_repository;
pub mod postgres_profile_repository;
pub mod postgres_project_repository;
pub mod postgres_ui_effect_repository;
pub mod postgres_user_repository;

pub use postgres_contact_repository::PostgresContactRepository;
pub use postgres_enhanced_project_repository::PostgresEnhancedProjectRepository;
pub use postgres_profile_repository::PostgresProfileRepository;
pub use postgres_project_repository::PostgresProjectRepository;
pub use postgres_ui_effect_repository::PostgresUiEffectRepository;
pub use postgres_user_repository::PostgresUserRepository;

use sqlx::{Postgres, QueryBuilder};

use crate::domain::project::{ProjectSort, ProjectSortField};

/// Escapes LIKE wildcards so the term matches literally
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Case-insensitive match over name, description and any technology
fn push_search(qb: &mut QueryBuilder<'_, Postgres>, term: &str) {
    let pattern = like_pattern(term);
    qb.push(" AND (name ILIKE ")
        .push_bind(pattern.clone())
        .push(" OR description ILIKE ")
        .push_bind(pattern.clone())
        .push(" OR EXISTS (SELECT 1 FROM unnest(technologies) AS tech WHERE tech ILIKE ")
        .push_bind(pattern)
        .push("))");
}

fn push_order(qb: &mut QueryBuilder<'_, Postgres>, sort: ProjectSort) {
    qb.push(" ORDER BY ")
        .push(sort.field.column())
        .push(" ")
        .push(sort.order.as_sql())
        .push(" NULLS LAST");
    if sort.field != ProjectSortField::Priority {
        qb.push(", priority DESC");
    }
    qb.push(", id");
}
