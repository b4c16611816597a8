// Integration tests for the token routes, running against a real token
// service with the bundled test keys and an in-memory revocation store.

use std::sync::Arc;

use actix_web::{
    http::header::{AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE},
    http::StatusCode,
    test, web,
};
use serde_json::{json, Value};

use tg_api::{create_app, AppState};
use tg_core::domain::entities::{Identity, TokenPair};
use tg_core::repositories::InMemoryRevocationRegistry;
use tg_core::services::{TokenAuthority, TokenService};
use tg_core::testing::{test_identity, test_service};

fn setup() -> (Arc<TokenService<InMemoryRevocationRegistry>>, web::Data<AppState>) {
    let service = Arc::new(test_service());
    let authority: Arc<dyn TokenAuthority> = service.clone();
    (service, web::Data::new(AppState::new(authority)))
}

fn bearer(pair: &TokenPair) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {}", pair.access_token))
}

#[actix_web::test]
async fn test_health_check() {
    let (_, state) = setup();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let (_, state) = setup();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
}

#[actix_web::test]
async fn test_verify_without_credential_is_unauthorized() {
    let (_, state) = setup();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/api/v1/auth/verify").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get(WWW_AUTHENTICATE).unwrap(), "Bearer");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "unauthorized");
    assert_eq!(body["message"], "Unauthorized");
}

#[actix_web::test]
async fn test_verify_rejects_other_schemes() {
    let (service, state) = setup();
    let app = test::init_service(create_app(state)).await;
    let pair = service.issue_default(&test_identity()).unwrap();

    for header in [
        format!("bearer {}", pair.access_token),
        format!("Basic {}", pair.access_token),
        "Bearer ".to_string(),
        "Bearer not-a-jwt".to_string(),
    ] {
        let req = test::TestRequest::get()
            .uri("/api/v1/auth/verify")
            .insert_header((AUTHORIZATION, header.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "header {:?}", header);
    }
}

#[actix_web::test]
async fn test_verify_valid_token() {
    let (service, state) = setup();
    let app = test::init_service(create_app(state)).await;
    let pair = service.issue_default(&test_identity()).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/verify")
        .insert_header(bearer(&pair))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["claims"]["sub"], "user123");
    assert_eq!(body["claims"]["token_type"], "access");
    assert!(body["expires_in"].as_i64().unwrap() > 0);
}

#[actix_web::test]
async fn test_refresh_token_is_not_a_bearer_credential() {
    let (service, state) = setup();
    let app = test::init_service(create_app(state)).await;
    let pair = service.issue_default(&test_identity()).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/verify")
        .insert_header((AUTHORIZATION, format!("Bearer {}", pair.refresh_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_me_returns_identity() {
    let (service, state) = setup();
    let app = test::init_service(create_app(state)).await;
    let pair = service.issue_default(&test_identity()).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&pair))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["subject_id"], "user123");
    assert_eq!(body["email"], "test@example.com");
    assert_eq!(body["roles"], json!(["admin", "user"]));
}

#[actix_web::test]
async fn test_refresh_rotates_and_is_single_use() {
    let (service, state) = setup();
    let app = test::init_service(create_app(state)).await;
    let pair = service.issue_default(&test_identity()).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": pair.refresh_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let renewed: TokenPair = test::read_body_json(resp).await;
    assert_eq!(renewed.token_type, "Bearer");
    assert_ne!(renewed.refresh_token, pair.refresh_token);

    let claims = service.verify(&renewed.access_token).await.unwrap();
    assert_eq!(claims.subject_id, "user123");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": pair.refresh_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_refresh_rejects_access_token() {
    let (service, state) = setup();
    let app = test::init_service(create_app(state)).await;
    let pair = service.issue_default(&test_identity()).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": pair.access_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_refresh_with_unreadable_body_is_bad_request() {
    let (_, state) = setup();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_request");
}

#[actix_web::test]
async fn test_revoke_access_token() {
    let (service, state) = setup();
    let app = test::init_service(create_app(state)).await;
    let pair = service.issue_default(&test_identity()).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/revoke")
        .insert_header(bearer(&pair))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/verify")
        .insert_header(bearer(&pair))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // The refresh token was not named, so it still works
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": pair.refresh_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_revoke_with_refresh_token() {
    let (service, state) = setup();
    let app = test::init_service(create_app(state)).await;
    let pair = service.issue_default(&test_identity()).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/revoke")
        .insert_header(bearer(&pair))
        .set_json(json!({ "refresh_token": pair.refresh_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": pair.refresh_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_admin_ping_requires_admin_role() {
    let (service, state) = setup();
    let app = test::init_service(create_app(state)).await;

    let admin = service.issue_default(&test_identity()).unwrap();
    let req = test::TestRequest::get()
        .uri("/api/v1/admin/ping")
        .insert_header(bearer(&admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "pong");

    let user = service
        .issue_default(&Identity::new("user456", "plain@example.com", ["user"]))
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/api/v1/admin/ping")
        .insert_header(bearer(&user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "forbidden");

    let req = test::TestRequest::get().uri("/api/v1/admin/ping").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
