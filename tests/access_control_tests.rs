#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use battlenet_api::{auth::verify_password, models::domain::Role};
use common::TestContext;

#[actix_web::test]
async fn test_missing_token_is_unauthorized() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "UNAUTHORIZED");
    assert_eq!(body["code"], 401);
}

#[actix_web::test]
async fn test_garbage_token_is_unauthorized() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/dashboard/stats")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_expired_token_is_unauthorized() {
    let ctx = TestContext::new();
    ctx.seed_user(5, "player5", Role::User, "secret5").await;
    let app = test_app!(ctx);

    let stale = ctx
        .state
        .jwt_service
        .issue_at(5, Role::User, Utc::now() - Duration::days(8))
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", stale)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_valid_token_reaches_handler() {
    let ctx = TestContext::new();
    ctx.seed_user(5, "player5", Role::User, "secret5").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(ctx.bearer(5, Role::User))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["id"], 5);
    assert!(body["user"].get("password_hash").is_none());
}

#[actix_web::test]
async fn test_moderator_cannot_delete_game() {
    let ctx = TestContext::new();
    ctx.seed_user(2, "mod", Role::Moderator, "secret2").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(ctx.bearer(2, Role::Moderator))
        .set_json(json!({
            "title": "StarCraft II",
            "description": "Real-time strategy",
            "category": "strategy",
            "price": 0.0,
            "is_free": true
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["game"]["id"].as_i64().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/games/{}", id))
        .insert_header(ctx.bearer(2, Role::Moderator))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "FORBIDDEN");
    assert_eq!(ctx.games.all().await.len(), 1);
}

#[actix_web::test]
async fn test_role_gate_has_no_hierarchy_for_plain_users() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/analytics/metrics")
        .insert_header(ctx.bearer(7, Role::User))
        .set_json(json!({ "metric_name": "page_views", "metric_value": 10.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_owner_updates_own_profile() {
    let ctx = TestContext::new();
    ctx.seed_user(5, "player5", Role::User, "secret5").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/users/5")
        .insert_header(ctx.bearer(5, Role::User))
        .set_json(json!({ "full_name": "Player Five" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let stored = ctx.users.get(5).await.unwrap();
    assert_eq!(stored.full_name.as_deref(), Some("Player Five"));
}

#[actix_web::test]
async fn test_other_user_cannot_update_profile() {
    let ctx = TestContext::new();
    ctx.seed_user(5, "player5", Role::User, "secret5").await;
    ctx.seed_user(6, "player6", Role::User, "secret6").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/users/5")
        .insert_header(ctx.bearer(6, Role::User))
        .set_json(json!({ "full_name": "Hijacked" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    assert_eq!(ctx.users.get(5).await.unwrap().full_name, None);
}

#[actix_web::test]
async fn test_admin_updates_any_profile() {
    let ctx = TestContext::new();
    ctx.seed_user(5, "player5", Role::User, "secret5").await;
    ctx.seed_user(6, "admin6", Role::Administrator, "secret6").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/users/5")
        .insert_header(ctx.bearer(6, Role::Administrator))
        .set_json(json!({ "full_name": "Renamed By Admin" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["full_name"], "Renamed By Admin");
}

#[actix_web::test]
async fn test_moderator_is_not_owner_of_other_accounts() {
    let ctx = TestContext::new();
    ctx.seed_user(5, "player5", Role::User, "secret5").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/users/5")
        .insert_header(ctx.bearer(2, Role::Moderator))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_wrong_current_password_changes_nothing() {
    let ctx = TestContext::new();
    let before = ctx.seed_user(5, "player5", Role::User, "secret5").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/users/5/password")
        .insert_header(ctx.bearer(5, Role::User))
        .set_json(json!({ "current_password": "not-it", "new_password": "brand-new" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let after = ctx.users.get(5).await.unwrap();
    assert_eq!(after.password_hash, before.password_hash);
    assert_eq!(*ctx.users.password_writes.lock().await, 0);
}

#[actix_web::test]
async fn test_correct_current_password_changes_hash() {
    let ctx = TestContext::new();
    ctx.seed_user(5, "player5", Role::User, "secret5").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/users/5/password")
        .insert_header(ctx.bearer(5, Role::User))
        .set_json(json!({ "current_password": "secret5", "new_password": "brand-new" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let after = ctx.users.get(5).await.unwrap();
    assert!(verify_password("brand-new", &after.password_hash).await.unwrap());
}

#[actix_web::test]
async fn test_role_change_is_admin_only() {
    let ctx = TestContext::new();
    ctx.seed_user(5, "player5", Role::User, "secret5").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/users/5/role")
        .insert_header(ctx.bearer(2, Role::Moderator))
        .set_json(json!({ "role": "moderator" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(ctx.users.get(5).await.unwrap().role, Role::User);

    let req = test::TestRequest::put()
        .uri("/api/users/5/role")
        .insert_header(ctx.bearer(1, Role::Administrator))
        .set_json(json!({ "role": "moderator" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.users.get(5).await.unwrap().role, Role::Moderator);
}

#[actix_web::test]
async fn test_unknown_role_is_rejected() {
    let ctx = TestContext::new();
    ctx.seed_user(5, "player5", Role::User, "secret5").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/users/5/role")
        .insert_header(ctx.bearer(1, Role::Administrator))
        .set_json(json!({ "role": "superuser" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_responses_carry_request_id() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("x-request-id", "trace-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-123");
}
