// Service banner, health checks, endpoint catalogue and the 404 fallback

use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Who may call an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Public,
    Auth,
    Admin,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
    pub access: Access,
    pub description: &'static str,
}

const fn endpoint(
    method: &'static str,
    path: &'static str,
    access: Access,
    description: &'static str,
) -> Endpoint {
    Endpoint {
        method,
        path,
        access,
        description,
    }
}

/// Every route the router serves, grouped by resource
pub const CATALOGUE: &[(&str, &[Endpoint])] = &[
    (
        "auth",
        &[
            endpoint("POST", "/api/auth/login", Access::Public, "Sign in with username or email"),
            endpoint("POST", "/api/auth/logout", Access::Public, "Sign out"),
            endpoint("GET", "/api/auth/me", Access::Auth, "Current user"),
            endpoint("POST", "/api/auth/register", Access::Admin, "Create a user"),
        ],
    ),
    (
        "projects",
        &[
            endpoint("GET", "/api/projects", Access::Public, "List public projects"),
            endpoint("GET", "/api/projects/featured", Access::Public, "Featured projects"),
            endpoint("GET", "/api/projects/:id", Access::Public, "Project details"),
            endpoint("POST", "/api/projects", Access::Admin, "Create a project"),
            endpoint("PUT", "/api/projects/:id", Access::Admin, "Replace a project"),
            endpoint("DELETE", "/api/projects/:id", Access::Admin, "Delete a project"),
        ],
    ),
    (
        "contact",
        &[
            endpoint("POST", "/api/contact", Access::Public, "Send a message"),
            endpoint("GET", "/api/contact", Access::Admin, "List messages"),
            endpoint("PUT", "/api/contact/:id/read", Access::Admin, "Mark a message as read"),
            endpoint("DELETE", "/api/contact/:id", Access::Admin, "Delete a message"),
        ],
    ),
    (
        "profile",
        &[
            endpoint("GET", "/api/profile", Access::Public, "Full profile"),
            endpoint("GET", "/api/profile/skills", Access::Public, "Skills by category"),
            endpoint("GET", "/api/profile/experience", Access::Public, "Work experience"),
            endpoint("GET", "/api/profile/education", Access::Public, "Education"),
            endpoint("GET", "/api/profile/stats", Access::Public, "Profile statistics"),
            endpoint("GET", "/api/profile/availability", Access::Public, "Availability"),
            endpoint("PUT", "/api/profile", Access::Admin, "Create or update the profile"),
        ],
    ),
    (
        "uiEffects",
        &[
            endpoint("GET", "/api/ui-effects/active", Access::Public, "Active effects"),
            endpoint("GET", "/api/ui-effects/dither", Access::Public, "Dither settings"),
            endpoint("GET", "/api/ui-effects/spotlight", Access::Public, "Spotlight settings"),
            endpoint("GET", "/api/ui-effects/profile-card", Access::Public, "Profile card settings"),
            endpoint("GET", "/api/ui-effects/staggered-menu", Access::Public, "Staggered menu settings"),
            endpoint("GET", "/api/ui-effects", Access::Auth, "List effects"),
            endpoint("GET", "/api/ui-effects/:id", Access::Auth, "Effect details"),
            endpoint("POST", "/api/ui-effects", Access::Auth, "Create an effect"),
            endpoint("PUT", "/api/ui-effects/:id", Access::Auth, "Update an effect"),
            endpoint("DELETE", "/api/ui-effects/:id", Access::Auth, "Delete an effect"),
            endpoint("PATCH", "/api/ui-effects/:id/toggle", Access::Auth, "Activate or deactivate"),
            endpoint("PUT", "/api/ui-effects/dither/settings", Access::Auth, "Update dither settings"),
            endpoint("PUT", "/api/ui-effects/spotlight/settings", Access::Auth, "Update spotlight settings"),
            endpoint("PUT", "/api/ui-effects/profile-card/settings", Access::Auth, "Update profile card settings"),
            endpoint("PUT", "/api/ui-effects/staggered-menu/settings", Access::Auth, "Update staggered menu settings"),
        ],
    ),
    (
        "enhancedProjects",
        &[
            endpoint("GET", "/api/enhanced-projects", Access::Public, "List enhanced projects"),
            endpoint("GET", "/api/enhanced-projects/featured", Access::Public, "Featured projects"),
            endpoint("GET", "/api/enhanced-projects/category/:category", Access::Public, "Projects in a category"),
            endpoint("GET", "/api/enhanced-projects/stats", Access::Public, "Project statistics"),
            endpoint("GET", "/api/enhanced-projects/:id", Access::Public, "Project details"),
            endpoint("POST", "/api/enhanced-projects", Access::Auth, "Create a project"),
            endpoint("PUT", "/api/enhanced-projects/:id", Access::Auth, "Update a project"),
            endpoint("PATCH", "/api/enhanced-projects/:id/card-settings", Access::Auth, "Replace card settings"),
            endpoint("PATCH", "/api/enhanced-projects/:id/effect-settings", Access::Auth, "Replace effect settings"),
            endpoint("POST", "/api/enhanced-projects/:id/clone", Access::Auth, "Clone a project"),
            endpoint("DELETE", "/api/enhanced-projects/:id", Access::Admin, "Delete a project"),
            endpoint("PATCH", "/api/enhanced-projects/bulk/update", Access::Admin, "Bulk update projects"),
        ],
    ),
];

/// GET /
pub async fn banner() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Portfolio API",
        "version": VERSION,
        "documentation": "/api/docs",
        "health": "/health",
        "endpoints": {
            "Auth": "/api/auth",
            "Projects": "/api/projects",
            "Contact": "/api/contact",
            "Profile": "/api/profile",
            "UI Effects": "/api/ui-effects",
            "Enhanced Projects": "/api/enhanced-projects",
        }
    }))
}

/// Health check endpoint
///
/// GET /health, GET /api/health
pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Portfolio API is running",
        "timestamp": Utc::now().to_rfc3339(),
        "version": VERSION,
    }))
}

/// GET /api
pub async fn api_info() -> Json<Value> {
    let endpoints: serde_json::Map<String, Value> = CATALOGUE
        .iter()
        .map(|(group, routes)| {
            let base = routes.first().map_or("", |e| base_path(e.path));
            (group.to_string(), Value::String(base.to_string()))
        })
        .collect();

    Json(json!({
        "success": true,
        "message": "Portfolio API",
        "version": VERSION,
        "endpoints": endpoints,
        "health": "/api/health",
        "documentation": "/api/docs",
    }))
}

/// GET /api/docs
pub async fn docs() -> Json<Value> {
    let groups: serde_json::Map<String, Value> = CATALOGUE
        .iter()
        .map(|(group, routes)| (group.to_string(), json!(routes)))
        .collect();
    let total: usize = CATALOGUE.iter().map(|(_, routes)| routes.len()).sum();

    Json(json!({
        "success": true,
        "data": {
            "version": VERSION,
            "authentication": "Bearer token in the Authorization header",
            "totalEndpoints": total,
            "endpoints": groups,
        }
    }))
}

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Endpoint not found",
            "path": uri.path(),
            "suggestion": "Check /api/docs for available endpoints",
        })),
    )
}

/// `/api/projects/:id` -> `/api/projects`
fn base_path(path: &str) -> &str {
    path.match_indices('/')
        .nth(2)
        .map_or(path, |(i, _)| &path[..i])
}
