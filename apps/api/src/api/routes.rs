// Router assembly: resource routes plus the shared middleware stack

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{self, HeaderName, HeaderValue},
        Method,
    },
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::api::handlers::{
    auth, contact, enhanced_projects, meta, profile, projects, ui_effects,
};
use crate::config::Config;
use crate::domain::ui_effect::{
    DitherSettings, ProfileCardSettings, SpotlightSettings, StaggeredMenuSettings,
};
use crate::state::AppState;

const BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Builds the full application router
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    let routes = Router::new()
        .route("/", get(meta::banner))
        .route("/health", get(meta::health))
        .route("/api", get(meta::api_info))
        .route("/api/health", get(meta::health))
        .route("/api/docs", get(meta::docs))
        .merge(auth_routes())
        .merge(project_routes())
        .merge(contact_routes())
        .merge(profile_routes())
        .merge(ui_effect_routes())
        .merge(enhanced_project_routes())
        .fallback(meta::not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT));

    with_security_headers(routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/register", post(auth::register))
}

fn project_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route("/api/projects/featured", get(projects::featured_projects))
        .route(
            "/api/projects/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
}

fn contact_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/contact",
            post(contact::submit_message).get(contact::list_messages),
        )
        .route("/api/contact/:id/read", put(contact::mark_read))
        .route("/api/contact/:id", delete(contact::delete_message))
}

fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route("/api/profile/skills", get(profile::get_skills))
        .route("/api/profile/experience", get(profile::get_experience))
        .route("/api/profile/education", get(profile::get_education))
        .route("/api/profile/stats", get(profile::get_stats))
        .route("/api/profile/availability", get(profile::get_availability))
}

fn ui_effect_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/ui-effects",
            get(ui_effects::list_effects).post(ui_effects::create_effect),
        )
        .route("/api/ui-effects/active", get(ui_effects::active_effects))
        .route(
            "/api/ui-effects/dither",
            get(ui_effects::component_settings::<DitherSettings>),
        )
        .route(
            "/api/ui-effects/dither/settings",
            put(ui_effects::update_component_settings::<DitherSettings>),
        )
        .route(
            "/api/ui-effects/spotlight",
            get(ui_effects::component_settings::<SpotlightSettings>),
        )
        .route(
            "/api/ui-effects/spotlight/settings",
            put(ui_effects::update_component_settings::<SpotlightSettings>),
        )
        .route(
            "/api/ui-effects/profile-card",
            get(ui_effects::component_settings::<ProfileCardSettings>),
        )
        .route(
            "/api/ui-effects/profile-card/settings",
            put(ui_effects::update_component_settings::<ProfileCardSettings>),
        )
        .route(
            "/api/ui-effects/staggered-menu",
            get(ui_effects::component_settings::<StaggeredMenuSettings>),
        )
        .route(
            "/api/ui-effects/staggered-menu/settings",
            put(ui_effects::update_component_settings::<StaggeredMenuSettings>),
        )
        .route(
            "/api/ui-effects/:id",
            get(ui_effects::get_effect)
                .put(ui_effects::update_effect)
                .delete(ui_effects::delete_effect),
        )
        .route("/api/ui-effects/:id/toggle", patch(ui_effects::toggle_effect))
}

fn enhanced_project_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/enhanced-projects",
            get(enhanced_projects::list_projects).post(enhanced_projects::create_project),
        )
        .route(
            "/api/enhanced-projects/featured",
            get(enhanced_projects::featured_projects),
        )
        .route(
            "/api/enhanced-projects/stats",
            get(enhanced_projects::project_stats),
        )
        .route(
            "/api/enhanced-projects/category/:category",
            get(enhanced_projects::projects_by_category),
        )
        .route(
            "/api/enhanced-projects/bulk/update",
            patch(enhanced_projects::bulk_update),
        )
        .route(
            "/api/enhanced-projects/:id",
            get(enhanced_projects::get_project)
                .put(enhanced_projects::update_project)
                .delete(enhanced_projects::delete_project),
        )
        .route(
            "/api/enhanced-projects/:id/card-settings",
            patch(enhanced_projects::update_card_settings),
        )
        .route(
            "/api/enhanced-projects/:id/effect-settings",
            patch(enhanced_projects::update_effect_settings),
        )
        .route(
            "/api/enhanced-projects/:id/clone",
            post(enhanced_projects::clone_project),
        )
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
}

/// Applies the security response headers to `router`
fn with_security_headers(router: Router<AppState>) -> Router<AppState> {
    router
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        ))
}
