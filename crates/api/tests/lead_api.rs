//! HTTP-level integration tests for the `/leads` resource.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_lead, delete_auth, get, get_auth, patch_json_auth, post_json_auth,
    put_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_lead_applies_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register_and_login(app.clone(), "owner@example.com").await;

    let body = json!({ "clientName": "  Ana  ", "serviceType": "SEO", "email": "" });
    let response = post_json_auth(app, "/api/leads", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Lead created successfully");
    let lead = &json["data"];
    assert_eq!(lead["clientName"], "Ana");
    assert_eq!(lead["serviceStatus"], "INTERESTED");
    assert_eq!(lead["approachCount"], 0);
    assert_eq!(lead["emailSent"], false);
    assert_eq!(lead["whatsappSent"], false);
    assert!(lead["email"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_lead_validation_errors_use_the_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register_and_login(app.clone(), "owner@example.com").await;

    let cases = [
        (json!({ "serviceType": "SEO" }), "clientName is required"),
        (json!({ "clientName": "Ana" }), "serviceType is required"),
    ];
    for (body, message) in cases {
        let response = post_json_auth(app.clone(), "/api/leads", body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["message"], message);
    }

    let bad_email = json!({ "clientName": "Ana", "serviceType": "SEO", "email": "ana.example.com" });
    let response = post_json_auth(app.clone(), "/api/leads", bad_email, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bad_site = json!({ "clientName": "Ana", "serviceType": "SEO", "website": "ana.dev" });
    let response = post_json_auth(app, "/api/leads", bad_site, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn leads_require_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/leads").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_paginates_newest_first(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register_and_login(app.clone(), "owner@example.com").await;

    for i in 1..=3 {
        let body = json!({ "clientName": format!("Lead {i}"), "serviceType": "WEB" });
        create_lead(app.clone(), &token, body).await;
    }

    let response = get_auth(app, "/api/leads?page=1&limit=2", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let leads = json["data"].as_array().unwrap();
    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0]["clientName"], "Lead 3");
    assert_eq!(json["pagination"]["total"], 3);
    assert_eq!(json["pagination"]["totalPages"], 2);
    assert_eq!(json["pagination"]["limit"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_past_the_last_page_is_empty(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register_and_login(app.clone(), "owner@example.com").await;
    let body = json!({ "clientName": "Ana", "serviceType": "SEO" });
    create_lead(app.clone(), &token, body).await;

    let response = get_auth(app, "/api/leads?page=9223372036854775807", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], json!([]));
    assert_eq!(json["pagination"]["total"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_and_searches(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register_and_login(app.clone(), "owner@example.com").await;

    let body = json!({ "clientName": "Ana Costa", "serviceType": "SEO", "email": "ana@costa.io" });
    create_lead(app.clone(), &token, body).await;
    let body = json!({ "clientName": "Bruno", "serviceType": "DESIGN", "phone": "+351 900" });
    create_lead(app.clone(), &token, body).await;

    let json = body_json(get_auth(app.clone(), "/api/leads?serviceType=DESIGN", &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["clientName"], "Bruno");

    let json = body_json(get_auth(app.clone(), "/api/leads?search=COSTA", &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["clientName"], "Ana Costa");

    let json = body_json(get_auth(app.clone(), "/api/leads?search=900", &token).await).await;
    assert_eq!(json["data"][0]["clientName"], "Bruno");

    let json = body_json(get_auth(app.clone(), "/api/leads?emailSent=true", &token).await).await;
    assert_eq!(json["pagination"]["total"], 0);

    let response = get_auth(app, "/api/leads?serviceType=PAINTING", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn users_only_see_their_own_leads(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = common::register_and_login(app.clone(), "owner@example.com").await;
    let other = common::register_and_login(app.clone(), "other@example.com").await;

    let id = create_lead(app.clone(), &owner, json!({ "clientName": "Ana", "serviceType": "SEO" })).await;

    let json = body_json(get_auth(app.clone(), "/api/leads", &other).await).await;
    assert_eq!(json["pagination"]["total"], 0);

    let response = get_auth(app.clone(), &format!("/api/leads/{id}"), &other).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, &format!("/api/leads/{id}"), &other).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Get, update, delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_lead_includes_history(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register_and_login(app.clone(), "owner@example.com").await;
    let id = create_lead(app.clone(), &token, json!({ "clientName": "Ana", "serviceType": "SEO" })).await;

    let response = get_auth(app, &format!("/api/leads/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["clientName"], "Ana");
    assert_eq!(json["data"]["messages"], json!([]));
    assert_eq!(json["data"]["aiMessages"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_is_partial(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register_and_login(app.clone(), "owner@example.com").await;
    let body = json!({ "clientName": "Ana", "serviceType": "SEO", "notes": "met at expo" });
    let id = create_lead(app.clone(), &token, body).await;

    let body = json!({ "serviceStatus": "CONVERTED" });
    let response = put_json_auth(app.clone(), &format!("/api/leads/{id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["serviceStatus"], "CONVERTED");
    assert_eq!(json["data"]["notes"], "met at expo");

    let body = json!({ "serviceStatus": "MAYBE" });
    let response = put_json_auth(app, &format!("/api/leads/{id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_trims_like_create(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register_and_login(app.clone(), "owner@example.com").await;
    let body = json!({ "clientName": "Ana", "serviceType": "SEO", "email": "ana@example.com" });
    let id = create_lead(app.clone(), &token, body).await;

    let body = json!({ "clientName": "  Ana Lima  ", "email": "   " });
    let response = put_json_auth(app, &format!("/api/leads/{id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["clientName"], "Ana Lima");
    assert_eq!(json["data"]["email"], "ana@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_the_lead(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register_and_login(app.clone(), "owner@example.com").await;
    let id = create_lead(app.clone(), &token, json!({ "clientName": "Ana", "serviceType": "SEO" })).await;

    let response = delete_auth(app.clone(), &format!("/api/leads/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Lead deleted successfully");

    let response = get_auth(app, &format!("/api/leads/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Bulk status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn bulk_status_skips_foreign_leads(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = common::register_and_login(app.clone(), "owner@example.com").await;
    let other = common::register_and_login(app.clone(), "other@example.com").await;

    let a = create_lead(app.clone(), &owner, json!({ "clientName": "A", "serviceType": "SEO" })).await;
    let b = create_lead(app.clone(), &owner, json!({ "clientName": "B", "serviceType": "SEO" })).await;
    let foreign = create_lead(app.clone(), &other, json!({ "clientName": "C", "serviceType": "SEO" })).await;

    let body = json!({ "leadIds": [a, b, foreign], "serviceStatus": "NOT_INTERESTED" });
    let response = patch_json_auth(app.clone(), "/api/leads/bulk/status", body, &owner).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["updated"], 2);

    let json = body_json(get_auth(app.clone(), &format!("/api/leads/{foreign}"), &other).await).await;
    assert_eq!(json["data"]["serviceStatus"], "INTERESTED");

    let body = json!({ "leadIds": [], "serviceStatus": "CONVERTED" });
    let response = patch_json_auth(app, "/api/leads/bulk/status", body, &owner).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
