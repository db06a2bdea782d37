//! Shared test harness: in-memory repositories and a router builder
//!
//! The in-memory repositories follow the ordering and filtering rules of
//! the PostgreSQL adapters so handler tests see the same behaviour.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tower::util::ServiceExt; // for oneshot
use uuid::Uuid;

use portfolio_api::api::routes::router;
use portfolio_api::auth::jwt::create_token;
use portfolio_api::auth::password::hash_password;
use portfolio_api::config::Config;
use portfolio_api::domain::contact::{ContactFilter, ContactMessage};
use portfolio_api::domain::enhanced_project::{
    BulkUpdate, BulkUpdateResult, CategoryCount, EnhancedProject, EnhancedProjectFilter,
    ProjectStats, StatusCount,
};
use portfolio_api::domain::errors::{DomainError, DomainResult};
use portfolio_api::domain::pagination::{Page, PageRequest, SortOrder};
use portfolio_api::domain::profile::Profile;
use portfolio_api::domain::project::{
    Project, ProjectCategory, ProjectDetails, ProjectFilter, ProjectSort, ProjectSortField,
    ProjectStatus,
};
use portfolio_api::domain::repositories::{
    ContactRepository, EnhancedProjectRepository, ProfileRepository, ProjectRepository,
    UiEffectRepository, UserRepository,
};
use portfolio_api::domain::ui_effect::{EffectType, UiEffect, UiEffectFilter};
use portfolio_api::domain::user::{Email, Role, User, Username};
use portfolio_api::state::AppState;

// ---------------------------------------------------------------------------
// Shared ordering helpers
// ---------------------------------------------------------------------------

fn directed<T: Ord>(a: T, b: T, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => a.cmp(&b),
        SortOrder::Desc => b.cmp(&a),
    }
}

/// `ORDER BY <field> <dir> NULLS LAST, priority DESC, id`
fn compare_projects(
    sort: ProjectSort,
    a: (&ProjectDetails, DateTime<Utc>, DateTime<Utc>, Uuid),
    b: (&ProjectDetails, DateTime<Utc>, DateTime<Utc>, Uuid),
) -> Ordering {
    let primary = match sort.field {
        ProjectSortField::CreatedAt => directed(a.1, b.1, sort.order),
        ProjectSortField::UpdatedAt => directed(a.2, b.2, sort.order),
        ProjectSortField::Name => directed(&a.0.name, &b.0.name, sort.order),
        ProjectSortField::Priority => directed(a.0.priority, b.0.priority, sort.order),
        ProjectSortField::StartDate => match (a.0.start_date, b.0.start_date) {
            (Some(x), Some(y)) => directed(x, y, sort.order),
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (None, None) => Ordering::Equal,
        },
    };
    let secondary = if sort.field == ProjectSortField::Priority {
        Ordering::Equal
    } else {
        b.0.priority.cmp(&a.0.priority)
    };
    primary.then(secondary).then(a.3.cmp(&b.3))
}

fn paginate<T: Clone>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len() as i64;
    let items = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .collect();
    Page { items, total }
}

// ---------------------------------------------------------------------------
// In-memory repositories
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create(&self, user: &User) -> DomainResult<()> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(DomainError::Conflict(
                "User with this email or username already exists".into(),
            ));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> DomainResult<Option<User>> {
        let login = login.trim();
        let email = login.to_lowercase();
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username.as_str() == login || u.email.as_str() == email)
            .cloned())
    }

    async fn admin_exists(&self) -> DomainResult<bool> {
        Ok(self.users.lock().unwrap().iter().any(|u| u.role.is_admin()))
    }

    async fn update_last_login(&self, user_id: Uuid) -> DomainResult<()> {
        if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == user_id) {
            user.last_login = Some(Utc::now());
        }
        Ok(())
    }
}

impl InMemoryUsers {
    /// Marks an account inactive
    pub fn deactivate(&self, id: Uuid) {
        if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            user.is_active = false;
        }
    }
}

#[derive(Default)]
pub struct InMemoryProjects {
    projects: Mutex<Vec<Project>>,
}

#[async_trait]
impl ProjectRepository for InMemoryProjects {
    async fn list(
        &self,
        filter: &ProjectFilter,
        sort: ProjectSort,
        page: PageRequest,
    ) -> DomainResult<Page<Project>> {
        let mut matching: Vec<Project> = self
            .projects
            .lock()
            .unwrap()
            .iter()
            .filter(|p| !filter.public_only || p.details.is_public)
            .filter(|p| filter.category.map_or(true, |c| p.details.category == c))
            .filter(|p| filter.status.map_or(true, |s| p.details.status == s))
            .filter(|p| {
                filter
                    .search
                    .as_deref()
                    .map_or(true, |term| p.details.matches_search(term))
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            compare_projects(
                sort,
                (&a.details, a.created_at, a.updated_at, a.id),
                (&b.details, b.created_at, b.updated_at, b.id),
            )
        });
        Ok(paginate(matching, page))
    }

    async fn featured(&self, min_priority: i32, limit: i64) -> DomainResult<Vec<Project>> {
        let mut featured: Vec<Project> = self
            .projects
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.details.is_public && p.details.priority >= min_priority)
            .cloned()
            .collect();
        featured.sort_by(|a, b| {
            b.details
                .priority
                .cmp(&a.details.priority)
                .then(b.created_at.cmp(&a.created_at))
        });
        featured.truncate(limit as usize);
        Ok(featured)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Project>> {
        Ok(self.projects.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, project: &Project) -> DomainResult<()> {
        self.projects.lock().unwrap().push(project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> DomainResult<()> {
        let mut projects = self.projects.lock().unwrap();
        let slot = projects
            .iter_mut()
            .find(|p| p.id == project.id)
            .ok_or_else(|| DomainError::NotFound("Project not found".into()))?;
        *slot = project.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let mut projects = self.projects.lock().unwrap();
        let before = projects.len();
        projects.retain(|p| p.id != id);
        Ok(projects.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryContacts {
    messages: Mutex<Vec<ContactMessage>>,
}

#[async_trait]
impl ContactRepository for InMemoryContacts {
    async fn create(&self, message: &ContactMessage) -> DomainResult<()> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn list(
        &self,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> DomainResult<Page<ContactMessage>> {
        let mut matching: Vec<ContactMessage> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| filter.is_read.map_or(true, |r| m.is_read == r))
            .filter(|m| filter.priority.map_or(true, |p| m.priority == p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matching, page))
    }

    async fn mark_read(&self, id: Uuid) -> DomainResult<Option<ContactMessage>> {
        let mut messages = self.messages.lock().unwrap();
        Ok(messages.iter_mut().find(|m| m.id == id).map(|m| {
            m.is_read = true;
            m.updated_at = Utc::now();
            m.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let mut messages = self.messages.lock().unwrap();
        let before = messages.len();
        messages.retain(|m| m.id != id);
        Ok(messages.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryProfile {
    profile: Mutex<Option<Profile>>,
}

#[async_trait]
impl ProfileRepository for InMemoryProfile {
    async fn get(&self) -> DomainResult<Option<Profile>> {
        Ok(self.profile.lock().unwrap().clone())
    }

    async fn save(&self, profile: &Profile) -> DomainResult<()> {
        *self.profile.lock().unwrap() = Some(profile.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryEffects {
    effects: Mutex<Vec<UiEffect>>,
}

#[async_trait]
impl UiEffectRepository for InMemoryEffects {
    async fn list(&self, filter: &UiEffectFilter) -> DomainResult<Vec<UiEffect>> {
        let mut effects: Vec<UiEffect> = self
            .effects
            .lock()
            .unwrap()
            .iter()
            .filter(|e| filter.effect_type.map_or(true, |t| e.effect_type == t))
            .filter(|e| filter.is_active.map_or(true, |a| e.is_active == a))
            .cloned()
            .collect();
        effects.sort_by(|a, b| {
            a.effect_type
                .as_str()
                .cmp(b.effect_type.as_str())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(effects)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<UiEffect>> {
        Ok(self.effects.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn find_by_type(&self, effect_type: EffectType) -> DomainResult<Option<UiEffect>> {
        let effects = self.effects.lock().unwrap();
        let mut of_type: Vec<&UiEffect> =
            effects.iter().filter(|e| e.effect_type == effect_type).collect();
        of_type.sort_by(|a, b| b.is_active.cmp(&a.is_active));
        Ok(of_type.first().map(|e| (*e).clone()))
    }

    async fn find_active_by_type(
        &self,
        effect_type: EffectType,
    ) -> DomainResult<Option<UiEffect>> {
        Ok(self
            .effects
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.effect_type == effect_type && e.is_active)
            .cloned())
    }

    async fn create(&self, effect: &UiEffect) -> DomainResult<()> {
        let mut effects = self.effects.lock().unwrap();
        if effects.iter().any(|e| e.name == effect.name) {
            return Err(DomainError::Conflict(
                "Effect with this name already exists".into(),
            ));
        }
        effects.push(effect.clone());
        Ok(())
    }

    async fn update(&self, effect: &UiEffect) -> DomainResult<()> {
        let mut effects = self.effects.lock().unwrap();
        if effects.iter().any(|e| e.name == effect.name && e.id != effect.id) {
            return Err(DomainError::Conflict(
                "Effect with this name already exists".into(),
            ));
        }
        let slot = effects
            .iter_mut()
            .find(|e| e.id == effect.id)
            .ok_or_else(|| DomainError::NotFound("UI effect not found".into()))?;
        *slot = effect.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let mut effects = self.effects.lock().unwrap();
        let before = effects.len();
        effects.retain(|e| e.id != id);
        Ok(effects.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryEnhancedProjects {
    projects: Mutex<Vec<EnhancedProject>>,
}

fn by_priority_then_newest(a: &EnhancedProject, b: &EnhancedProject) -> Ordering {
    b.details
        .priority
        .cmp(&a.details.priority)
        .then(b.created_at.cmp(&a.created_at))
}

#[async_trait]
impl EnhancedProjectRepository for InMemoryEnhancedProjects {
    async fn list(
        &self,
        filter: &EnhancedProjectFilter,
        sort: ProjectSort,
        page: PageRequest,
    ) -> DomainResult<Page<EnhancedProject>> {
        let mut matching: Vec<EnhancedProject> = self
            .projects
            .lock()
            .unwrap()
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            compare_projects(
                sort,
                (&a.details, a.created_at, a.updated_at, a.id),
                (&b.details, b.created_at, b.updated_at, b.id),
            )
        });
        Ok(paginate(matching, page))
    }

    async fn featured(&self, limit: i64) -> DomainResult<Vec<EnhancedProject>> {
        let mut featured: Vec<EnhancedProject> = self
            .projects
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.details.is_public && p.is_featured)
            .cloned()
            .collect();
        featured.sort_by(by_priority_then_newest);
        featured.truncate(limit as usize);
        Ok(featured)
    }

    async fn by_category(
        &self,
        category: ProjectCategory,
        include_private: bool,
        limit: i64,
    ) -> DomainResult<Vec<EnhancedProject>> {
        let mut projects: Vec<EnhancedProject> = self
            .projects
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.details.category == category)
            .filter(|p| include_private || p.details.is_public)
            .cloned()
            .collect();
        projects.sort_by(by_priority_then_newest);
        projects.truncate(limit as usize);
        Ok(projects)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<EnhancedProject>> {
        Ok(self.projects.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, project: &EnhancedProject) -> DomainResult<()> {
        self.projects.lock().unwrap().push(project.clone());
        Ok(())
    }

    async fn update(&self, project: &EnhancedProject) -> DomainResult<()> {
        let mut projects = self.projects.lock().unwrap();
        let slot = projects
            .iter_mut()
            .find(|p| p.id == project.id)
            .ok_or_else(|| DomainError::NotFound("Enhanced project not found".into()))?;
        *slot = project.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let mut projects = self.projects.lock().unwrap();
        let before = projects.len();
        projects.retain(|p| p.id != id);
        Ok(projects.len() < before)
    }

    async fn bulk_update(
        &self,
        ids: &[Uuid],
        update: &BulkUpdate,
    ) -> DomainResult<BulkUpdateResult> {
        let mut touched = 0;
        for project in self.projects.lock().unwrap().iter_mut() {
            if ids.contains(&project.id) {
                update.apply_to(project);
                touched += 1;
            }
        }
        Ok(BulkUpdateResult {
            matched: touched,
            modified: touched,
        })
    }

    async fn stats(&self) -> DomainResult<ProjectStats> {
        let projects = self.projects.lock().unwrap();
        let total = projects.len() as i64;
        let public = projects.iter().filter(|p| p.details.is_public).count() as i64;
        let featured = projects.iter().filter(|p| p.is_featured).count() as i64;

        let mut categories: BTreeMap<&'static str, (ProjectCategory, i64)> = BTreeMap::new();
        let mut statuses: BTreeMap<&'static str, (ProjectStatus, i64)> = BTreeMap::new();
        for p in projects.iter() {
            categories
                .entry(p.details.category.as_str())
                .or_insert((p.details.category, 0))
                .1 += 1;
            statuses
                .entry(p.details.status.as_str())
                .or_insert((p.details.status, 0))
                .1 += 1;
        }

        Ok(ProjectStats::new(
            total,
            public,
            featured,
            categories
                .into_values()
                .map(|(category, count)| CategoryCount { category, count })
                .collect(),
            statuses
                .into_values()
                .map(|(status, count)| StatusCount { status, count })
                .collect(),
        ))
    }
}

// ---------------------------------------------------------------------------
// App builder
// ---------------------------------------------------------------------------

pub struct TestApp {
    pub state: AppState,
    pub users: Arc<InMemoryUsers>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUsers::default());
        let state = AppState {
            config: Arc::new(Config::for_tests()),
            users: users.clone(),
            projects: Arc::new(InMemoryProjects::default()),
            contacts: Arc::new(InMemoryContacts::default()),
            profiles: Arc::new(InMemoryProfile::default()),
            effects: Arc::new(InMemoryEffects::default()),
            enhanced_projects: Arc::new(InMemoryEnhancedProjects::default()),
        };
        let router = router(state.clone());
        Self {
            state,
            users,
            router,
        }
    }

    /// Stores a user with the given role and returns it with a fresh token
    pub async fn seed_user(&self, username: &str, password: &str, role: Role) -> (User, String) {
        let cost = self.state.config.bcrypt_cost;
        let user = User::new(
            Username::new(username).unwrap(),
            Email::new(format!("{}@example.com", username)).unwrap(),
            hash_password(password, cost).unwrap(),
            role,
        );
        self.state.users.create(&user).await.unwrap();
        let token = self.token_for(&user);
        (user, token)
    }

    pub async fn admin_token(&self) -> String {
        self.seed_user("siteadmin", "Admin123", Role::Admin).await.1
    }

    pub async fn user_token(&self) -> String {
        self.seed_user("visitor", "Visitor123", Role::User).await.1
    }

    pub fn token_for(&self, user: &User) -> String {
        let config = &self.state.config;
        create_token(user.id, &config.jwt_secret, config.jwt_ttl).unwrap()
    }

    /// Sends one request and returns the status with the parsed JSON body
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.send_with_headers(method, uri, token, &[], body).await
    }

    /// Like `send`, with extra request headers
    pub async fn send_with_headers(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let body = body.map(|body| serde_json::to_vec(&body).unwrap());
        self.dispatch(method, uri, token, headers, body).await
    }

    /// Sends `raw` verbatim as a JSON body
    pub async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        raw: &str,
    ) -> (StatusCode, Value) {
        self.dispatch(method, uri, token, &[], Some(raw.as_bytes().to_vec()))
            .await
    }

    async fn dispatch(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        headers: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send("GET", uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send("PATCH", uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send("DELETE", uri, token, None).await
    }
}
