//! End-to-end API integration tests
//!
//! These tests drive the full router with in-memory repositories:
//! - Authentication and role checks
//! - Project, contact and profile flows
//! - UI effect settings and enhanced project management
//! - Meta endpoints and the error envelope

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::TestApp;
use portfolio_api::api::handlers::meta::{Access, CATALOGUE};
use portfolio_api::domain::user::Role;
use portfolio_api::infrastructure::seed::{self, SeedData, SeedSummary};

fn project_body(name: &str, priority: i32) -> Value {
    json!({
        "name": name,
        "description": "A project used in integration tests",
        "technologies": ["Rust", "PostgreSQL"],
        "category": "web",
        "status": "completed",
        "priority": priority
    })
}

fn profile_body() -> Value {
    json!({
        "fullName": "Ada Lovelace",
        "title": "Software Engineer",
        "bio": "Engineer building reliable web services and tools.",
        "shortBio": "Builds reliable services.",
        "email": "ada@example.com",
        "location": "London",
        "skills": [
            { "name": "Rust", "category": "backend", "level": "expert" },
            { "name": "React", "category": "frontend", "level": "advanced" },
            { "name": "Axum", "category": "backend", "level": "advanced" }
        ],
        "experience": [
            {
                "title": "Engineer",
                "company": "Analytical Engines",
                "startDate": "2019-01-01",
                "endDate": "2021-06-30",
                "description": "Built the difference engine firmware"
            },
            {
                "title": "Lead Engineer",
                "company": "Babbage Labs",
                "startDate": "2021-07-01",
                "description": "Leads the platform team",
                "isCurrentJob": true
            }
        ],
        "stats": { "projectsCompleted": 12, "yearsOfExperience": 6 }
    })
}

fn enhanced_body(name: &str, category: &str, featured: bool, public: bool) -> Value {
    json!({
        "name": name,
        "description": "Interactive card project for tests",
        "technologies": ["TypeScript"],
        "category": category,
        "status": "in-progress",
        "priority": 5,
        "isFeatured": featured,
        "isPublic": public
    })
}

// ---------------------------------------------------------------------------
// Meta
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();

    for uri in ["/health", "/api/health"] {
        let (status, body) = app.get(uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["timestamp"].is_string());
        assert!(body["version"].is_string());
    }
}

#[tokio::test]
async fn test_docs_and_info() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/docs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["totalEndpoints"].as_u64().unwrap() > 40);

    let (status, body) = app.get("/api", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["projects"], "/api/projects");

    let (status, body) = app.get("/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["documentation"], "/api/docs");
}

#[tokio::test]
async fn test_catalogue_matches_router() {
    let app = TestApp::new();
    let id = uuid::Uuid::new_v4().to_string();

    for (group, endpoints) in CATALOGUE {
        for endpoint in endpoints.iter() {
            let path = endpoint
                .path
                .replace(":id", &id)
                .replace(":category", "web");
            let (status, body) = app.send(endpoint.method, &path, None, None).await;
            let route = format!("{} {} ({})", endpoint.method, endpoint.path, group);

            assert_ne!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", route);
            assert_ne!(body["message"], "Endpoint not found", "{}", route);
            match endpoint.access {
                Access::Public => assert_ne!(status, StatusCode::UNAUTHORIZED, "{}", route),
                Access::Auth | Access::Admin => {
                    assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", route)
                }
            }
        }
    }
}

#[tokio::test]
async fn test_unknown_endpoint_returns_envelope() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Endpoint not found");
    assert_eq!(body["path"], "/api/nope");
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_login_with_username_or_email() {
    let app = TestApp::new();
    app.seed_user("siteadmin", "Admin123", Role::Admin).await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "siteadmin", "password": "Admin123" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["role"], "admin");
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "siteadmin@example.com", "password": "Admin123" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "siteadmin");

    let (status, body) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "siteadmin@example.com");
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = TestApp::new();
    let (user, _) = app.seed_user("siteadmin", "Admin123", Role::Admin).await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "siteadmin", "password": "wrong" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, _) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "nobody", "password": "Admin123" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    app.users.deactivate(user.id);
    let (status, _) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "siteadmin", "password": "Admin123" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_requires_fields() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/auth/login", None, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_protected_route_token_checks() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Access token required");

    let (status, body) = app.get("/api/auth/me", Some("not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired token");

    let (user, token) = app.seed_user("visitor", "Visitor123", Role::User).await;
    app.users.deactivate(user.id);
    let (status, _) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_requires_admin() {
    let app = TestApp::new();
    let user_token = app.user_token().await;
    let payload = json!({
        "username": "newuser",
        "email": "newuser@example.com",
        "password": "Secret123"
    });

    let (status, body) = app
        .post("/api/auth/register", Some(&user_token), payload.clone())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Admin access required");

    let admin_token = app.admin_token().await;
    let (status, body) = app
        .post("/api/auth/register", Some(&admin_token), payload.clone())
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["role"], "user");
    assert!(body["data"]["token"].is_string());

    let (status, _) = app
        .post("/api/auth/register", Some(&admin_token), payload)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_enforces_password_policy() {
    let app = TestApp::new();
    let admin_token = app.admin_token().await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            Some(&admin_token),
            json!({ "username": "weak", "email": "weak@example.com", "password": "password" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "password");
}

#[tokio::test]
async fn test_logout() {
    let app = TestApp::new();
    let (status, body) = app.send("POST", "/api/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_project_crud() {
    let app = TestApp::new();
    let admin = app.admin_token().await;

    let (status, body) = app
        .post("/api/projects", Some(&admin), project_body("Chat App", 8))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["isPublic"], true);

    let (status, body) = app.get(&format!("/api/projects/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Chat App");

    let (status, body) = app
        .put(
            &format!("/api/projects/{}", id),
            Some(&admin),
            project_body("Chat App v2", 9),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["priority"], 9);

    let (status, _) = app.delete(&format!("/api/projects/{}", id), Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get(&format!("/api/projects/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Project not found");
}

#[tokio::test]
async fn test_project_validation_errors() {
    let app = TestApp::new();
    let admin = app.admin_token().await;

    let (status, body) = app
        .post(
            "/api/projects",
            Some(&admin),
            json!({ "name": "", "description": "short", "technologies": [], "category": "web", "status": "done" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"description"));
    assert!(fields.contains(&"technologies"));
    assert!(fields.contains(&"status"));
}

#[tokio::test]
async fn test_project_writes_require_admin() {
    let app = TestApp::new();

    let (status, _) = app.post("/api/projects", None, project_body("X", 1)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user = app.user_token().await;
    let (status, _) = app
        .post("/api/projects", Some(&user), project_body("X", 1))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_private_project_visible_to_admin_only() {
    let app = TestApp::new();
    let admin = app.admin_token().await;

    let mut body = project_body("Secret", 3);
    body["isPublic"] = json!(false);
    let (_, created) = app.post("/api/projects", Some(&admin), body).await;
    let uri = format!("/api/projects/{}", created["data"]["id"].as_str().unwrap());

    let (status, _) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get(&uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = app.get("/api/projects", None).await;
    assert_eq!(list["data"]["pagination"]["totalProjects"], 0);
}

#[tokio::test]
async fn test_project_listing_filters_and_pagination() {
    let app = TestApp::new();
    let admin = app.admin_token().await;

    for i in 0..12 {
        let mut body = project_body(&format!("Project {:02}", i), i % 11);
        if i % 3 == 0 {
            body["status"] = json!("planned");
        }
        app.post("/api/projects", Some(&admin), body).await;
    }

    let (status, body) = app.get("/api/projects?page=2&limit=5", None).await;
    assert_eq!(status, StatusCode::OK);
    let pagination = &body["data"]["pagination"];
    assert_eq!(pagination["currentPage"], 2);
    assert_eq!(pagination["totalPages"], 3);
    assert_eq!(pagination["totalProjects"], 12);
    assert_eq!(pagination["hasNextPage"], true);
    assert_eq!(pagination["hasPrevPage"], true);
    assert_eq!(body["data"]["projects"].as_array().unwrap().len(), 5);

    let (_, body) = app.get("/api/projects?status=planned", None).await;
    assert_eq!(body["data"]["pagination"]["totalProjects"], 4);

    let (_, body) = app.get("/api/projects?status=all", None).await;
    assert_eq!(body["data"]["pagination"]["totalProjects"], 12);

    let (_, body) = app.get("/api/projects?search=postgres", None).await;
    assert_eq!(body["data"]["pagination"]["totalProjects"], 12);

    let (_, body) = app.get("/api/projects?search=project%2007", None).await;
    assert_eq!(body["data"]["pagination"]["totalProjects"], 1);

    let (_, body) = app
        .get("/api/projects?sortBy=name&sortOrder=asc&limit=3", None)
        .await;
    let names: Vec<&str> = body["data"]["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Project 00", "Project 01", "Project 02"]);

    let (status, _) = app.get("/api/projects?category=music", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_featured_projects() {
    let app = TestApp::new();
    let admin = app.admin_token().await;

    for priority in [2, 7, 10, 8, 9, 7, 7, 8] {
        app.post(
            "/api/projects",
            Some(&admin),
            project_body(&format!("P{}", priority), priority),
        )
        .await;
    }

    let (status, body) = app.get("/api/projects/featured", None).await;
    assert_eq!(status, StatusCode::OK);
    let priorities: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["priority"].as_i64().unwrap())
        .collect();
    assert_eq!(priorities, vec![10, 9, 8, 8, 7, 7]);
}

#[tokio::test]
async fn test_invalid_id_is_bad_request() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/projects/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid id");
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    app.post("/api/projects", Some(&admin), project_body("Lonely", 5))
        .await;

    let (status, body) = app
        .get("/api/projects?page=9223372036854775807", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["projects"].as_array().unwrap().len(), 0);
    assert_eq!(body["data"]["pagination"]["totalProjects"], 1);
    assert_eq!(body["data"]["pagination"]["hasNextPage"], false);

    let (status, _) = app
        .get("/api/contact?page=9223372036854775807", Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .get("/api/enhanced-projects?page=9223372036854775807&limit=100", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_contact_submission_flow() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/contact",
            None,
            json!({
                "name": "Grace Hopper",
                "email": "grace@example.com",
                "subject": "Speaking invitation",
                "message": "Would you like to speak at our conference?"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert!(body["data"]["timestamp"].is_string());

    let admin = app.admin_token().await;
    let (status, body) = app.get("/api/contact", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["totalMessages"], 1);
    assert_eq!(body["data"]["messages"][0]["isRead"], false);

    let (status, body) = app
        .send("PUT", &format!("/api/contact/{}/read", id), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isRead"], true);

    let (_, body) = app.get("/api/contact?isRead=false", Some(&admin)).await;
    assert_eq!(body["data"]["pagination"]["totalMessages"], 0);

    let (status, _) = app.delete(&format!("/api/contact/{}", id), Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.delete(&format!("/api/contact/{}", id), Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_contact_validation_and_access() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/contact",
            None,
            json!({ "name": "X", "email": "nope", "subject": "Hi", "message": "short" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 4);

    let (status, _) = app.get("/api/contact", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_contact_records_forwarded_client() {
    let app = TestApp::new();

    let (status, _) = app
        .send_with_headers(
            "POST",
            "/api/contact",
            None,
            &[
                ("x-forwarded-for", "203.0.113.7, 10.0.0.1"),
                ("user-agent", "Mozilla/5.0 (X11; Linux x86_64)"),
            ],
            Some(json!({
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "subject": "Analytical engine",
                "message": "Notes on the analytical engine attached."
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let admin = app.admin_token().await;
    let (_, body) = app.get("/api/contact", Some(&admin)).await;
    let message = &body["data"]["messages"][0];
    assert_eq!(message["ipAddress"], "203.0.113.7");
    assert_eq!(message["userAgent"], "Mozilla/5.0 (X11; Linux x86_64)");
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_profile_missing_is_not_found() {
    let app = TestApp::new();

    for uri in ["/api/profile", "/api/profile/skills", "/api/profile/availability"] {
        let (status, body) = app.get(uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Profile not found");
    }
}

#[tokio::test]
async fn test_profile_update_and_views() {
    let app = TestApp::new();
    let admin = app.admin_token().await;

    let (status, body) = app.put("/api/profile", Some(&admin), profile_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fullName"], "Ada Lovelace");

    let (_, body) = app.get("/api/profile/skills", None).await;
    assert_eq!(body["data"]["totalSkills"], 3);
    assert_eq!(body["data"]["skillsByCategory"]["backend"].as_array().unwrap().len(), 2);

    let (_, body) = app.get("/api/profile/experience", None).await;
    assert_eq!(body["data"][0]["company"], "Babbage Labs");

    let (_, body) = app.get("/api/profile/stats", None).await;
    assert_eq!(body["data"]["projectsCompleted"], 12);
    assert_eq!(body["data"]["totalExperience"], 2);
    assert_eq!(body["data"]["currentJobs"], 1);
    assert_eq!(body["data"]["skillsByLevel"]["advanced"], 2);

    let (_, body) = app.get("/api/profile/availability", None).await;
    assert_eq!(body["data"]["isAvailable"], true);

    // omitted collections keep their stored values
    let mut update = profile_body();
    update.as_object_mut().unwrap().remove("skills");
    update["title"] = json!("Principal Engineer");
    let (status, body) = app.put("/api/profile", Some(&admin), update).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Principal Engineer");
    assert_eq!(body["data"]["skills"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_profile_update_validation() {
    let app = TestApp::new();
    let admin = app.admin_token().await;

    let mut body = profile_body();
    body["fullName"] = json!("A");
    body["email"] = json!("broken");
    let (status, body) = app.put("/api/profile", Some(&admin), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"fullName"));
    assert!(fields.contains(&"email"));
}

// ---------------------------------------------------------------------------
// UI effects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_default_effect_settings_returned() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/ui-effects/dither", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Default dither settings returned");
    assert_eq!(body["data"]["colorNum"], 6);
    assert_eq!(body["data"]["coverage"], "section");

    let (_, body) = app.get("/api/ui-effects/profile-card", None).await;
    assert_eq!(body["message"], "Default profile card settings returned");

    let (_, body) = app.get("/api/ui-effects/staggered-menu", None).await;
    assert_eq!(body["data"]["socialLinks"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_settings_update_creates_then_merges() {
    let app = TestApp::new();
    let token = app.user_token().await;

    let (status, body) = app
        .put(
            "/api/ui-effects/dither/settings",
            Some(&token),
            json!({ "colorNum": 12 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["colorNum"], 12);
    assert_eq!(body["data"]["waveAmplitude"], 0.25);

    let (_, body) = app
        .put(
            "/api/ui-effects/dither/settings",
            Some(&token),
            json!({ "intensity": 0.4 }),
        )
        .await;
    assert_eq!(body["data"]["colorNum"], 12);
    assert_eq!(body["data"]["intensity"], 0.4);

    let (_, body) = app.get("/api/ui-effects", Some(&token)).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Default Dither Effect");

    let (_, body) = app.get("/api/ui-effects/dither", None).await;
    assert!(body.get("message").is_none());
    assert_eq!(body["data"]["colorNum"], 12);
}

#[tokio::test]
async fn test_settings_update_rejects_out_of_range() {
    let app = TestApp::new();
    let token = app.user_token().await;

    let (status, body) = app
        .put(
            "/api/ui-effects/dither/settings",
            Some(&token),
            json!({ "colorNum": 64 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = app
        .put("/api/ui-effects/dither/settings", None, json!({ "colorNum": 4 }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_effect_crud_and_toggle() {
    let app = TestApp::new();
    let token = app.user_token().await;

    let (status, body) = app
        .post(
            "/api/ui-effects",
            Some(&token),
            json!({ "name": "Hero Spotlight", "type": "spotlight", "componentSettings": { "spotlightSize": 300 } }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["type"], "spotlight");
    assert_eq!(body["data"]["isActive"], true);

    let (status, _) = app
        .post(
            "/api/ui-effects",
            Some(&token),
            json!({ "name": "Hero Spotlight", "type": "dither" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post("/api/ui-effects", Some(&token), json!({ "name": "Odd", "type": "sparkles" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.get("/api/ui-effects/active", None).await;
    assert_eq!(body["count"], 1);

    let (status, body) = app
        .patch(
            &format!("/api/ui-effects/{}/toggle", id),
            Some(&token),
            json!({ "isActive": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Effect deactivated successfully");

    let (_, body) = app.get("/api/ui-effects/active", None).await;
    assert_eq!(body["count"], 0);

    let (_, body) = app.get("/api/ui-effects?active=false", Some(&token)).await;
    assert_eq!(body["count"], 1);

    let (status, body) = app
        .put(
            &format!("/api/ui-effects/{}", id),
            Some(&token),
            json!({ "name": "Card Spotlight", "type": "spotlight" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Card Spotlight");
    assert_eq!(body["data"]["componentSettings"]["spotlightSize"], 300);

    let (status, _) = app.delete(&format!("/api/ui-effects/{}", id), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.get(&format!("/api/ui-effects/{}", id), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Enhanced projects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_enhanced_project_lifecycle() {
    let app = TestApp::new();
    let token = app.user_token().await;

    let (status, body) = app
        .post(
            "/api/enhanced-projects",
            Some(&token),
            enhanced_body("Shader Lab", "web", true, true),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["cardSettings"]["display"]["accentColor"], "#8B5CF6");
    assert_eq!(body["data"]["effectSettings"]["dither"]["colorNum"], 6);

    let (status, body) = app
        .patch(
            &format!("/api/enhanced-projects/{}/card-settings", id),
            Some(&token),
            json!({ "cardSettings": { "display": { "accentColor": "#10B981", "tags": ["3d"] } } }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["cardSettings"]["display"]["accentColor"], "#10B981");

    let (status, body) = app
        .patch(
            &format!("/api/enhanced-projects/{}/card-settings", id),
            Some(&token),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Card settings are required");

    let (status, _) = app
        .patch(
            &format!("/api/enhanced-projects/{}/effect-settings", id),
            Some(&token),
            json!({ "effectSettings": { "dither": { "colorNum": 99 } } }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post(
            &format!("/api/enhanced-projects/{}/clone", id),
            Some(&token),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Shader Lab (Copy)");
    assert_eq!(body["data"]["isPublic"], false);
    assert_eq!(body["data"]["isFeatured"], false);
    assert_eq!(body["data"]["priority"], 0);
    assert_eq!(body["data"]["cardSettings"]["display"]["accentColor"], "#10B981");

    let (status, _) = app
        .delete(&format!("/api/enhanced-projects/{}", id), Some(&token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = app.admin_token().await;
    let (status, _) = app
        .delete(&format!("/api/enhanced-projects/{}", id), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_enhanced_clone_body_handling() {
    let app = TestApp::new();
    let token = app.user_token().await;

    let (_, body) = app
        .post(
            "/api/enhanced-projects",
            Some(&token),
            enhanced_body("Ripple Grid", "web", true, true),
        )
        .await;
    let uri = format!("/api/enhanced-projects/{}/clone", body["data"]["id"].as_str().unwrap());

    let (status, body) = app
        .send_raw("POST", &uri, Some(&token), r#"{"name": 42, "priority": "high"}"#)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = app.send_raw("POST", &uri, Some(&token), "{oops").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post(&uri, Some(&token), json!({ "name": "Ripple Fork", "priority": 3 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Ripple Fork");
    assert_eq!(body["data"]["priority"], 3);

    let (status, body) = app.send("POST", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Ripple Grid (Copy)");

    let (_, body) = app.get("/api/enhanced-projects/stats", None).await;
    assert_eq!(body["data"]["overview"]["total"], 3);
}

#[tokio::test]
async fn test_enhanced_project_queries() {
    let app = TestApp::new();
    let token = app.user_token().await;

    app.post("/api/enhanced-projects", Some(&token), enhanced_body("Alpha", "web", true, true)).await;
    app.post("/api/enhanced-projects", Some(&token), enhanced_body("Beta", "web", false, false)).await;
    app.post("/api/enhanced-projects", Some(&token), enhanced_body("Gamma", "game", true, true)).await;

    let (status, body) = app.get("/api/enhanced-projects?limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["totalItems"], 3);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["itemsPerPage"], 2);

    let (_, body) = app.get("/api/enhanced-projects?featured=true", None).await;
    assert_eq!(body["pagination"]["totalItems"], 2);

    let (_, body) = app.get("/api/enhanced-projects/featured", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, body) = app.get("/api/enhanced-projects/category/web", None).await;
    assert_eq!(body["count"], 1);
    let (_, body) = app
        .get("/api/enhanced-projects/category/web?includePrivate=true", None)
        .await;
    assert_eq!(body["count"], 2);
    let (status, _) = app.get("/api/enhanced-projects/category/music", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.get("/api/enhanced-projects/stats", None).await;
    let overview = &body["data"]["overview"];
    assert_eq!(overview["total"], 3);
    assert_eq!(overview["public"], 2);
    assert_eq!(overview["featured"], 2);
    assert_eq!(overview["private"], 1);
    assert_eq!(body["data"]["byCategory"][0]["category"], "web");
    assert_eq!(body["data"]["byCategory"][0]["count"], 2);
}

#[tokio::test]
async fn test_enhanced_bulk_update() {
    let app = TestApp::new();
    let admin = app.admin_token().await;

    let mut ids = Vec::new();
    for name in ["One", "Two"] {
        let (_, body) = app
            .post(
                "/api/enhanced-projects",
                Some(&admin),
                enhanced_body(name, "web", false, true),
            )
            .await;
        ids.push(body["data"]["id"].clone());
    }

    let (status, body) = app
        .patch(
            "/api/enhanced-projects/bulk/update",
            Some(&admin),
            json!({ "projectIds": ids, "updates": { "isFeatured": true, "priority": 9 } }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["matched"], 2);
    assert_eq!(body["data"]["modified"], 2);

    let (_, body) = app.get("/api/enhanced-projects/featured", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["priority"], 9);

    let (status, body) = app
        .patch(
            "/api/enhanced-projects/bulk/update",
            Some(&admin),
            json!({ "projectIds": ids, "updates": {} }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Updates object is required");

    let (status, body) = app
        .patch(
            "/api/enhanced-projects/bulk/update",
            Some(&admin),
            json!({ "projectIds": [], "updates": { "isPublic": false } }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Project IDs array is required");
}

#[tokio::test]
async fn test_security_headers_present() {
    use axum::{body::Body, http::Request};
    use tower::util::ServiceExt;

    let app = TestApp::new();
    let response = portfolio_api::api::routes::router(app.state.clone())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_seed_populates_empty_store_once() {
    let app = TestApp::new();

    let data = SeedData::bundled().unwrap();
    let summary = seed::seed(&app.state, data).await.unwrap();
    assert!(summary.profile);
    assert_eq!(summary.projects, 6);
    assert_eq!(summary.ui_effects, 5);
    assert_eq!(summary.enhanced_projects, 5);

    let (status, body) = app.get("/api/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fullName"], "Alex Morgan");

    let (_, body) = app.get("/api/projects", None).await;
    assert_eq!(body["data"]["pagination"]["totalProjects"], 6);

    let (_, body) = app.get("/api/projects/featured", None).await;
    assert_eq!(body["data"][0]["name"], "Portfolio Website");

    let (_, body) = app.get("/api/ui-effects/dither", None).await;
    assert!(body.get("message").is_none());
    assert_eq!(body["data"]["zIndex"], 1000);

    let (_, body) = app.get("/api/ui-effects/active", None).await;
    assert_eq!(body["count"], 5);

    let (_, body) = app.get("/api/enhanced-projects/featured", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let again = seed::seed(&app.state, SeedData::bundled().unwrap())
        .await
        .unwrap();
    assert_eq!(again, SeedSummary::default());
    let (_, body) = app.get("/api/projects", None).await;
    assert_eq!(body["data"]["pagination"]["totalProjects"], 6);
}
