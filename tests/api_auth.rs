mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use serde_json::{json, Value};
use studio_booking::build_app;
use studio_booking::test_utils::TEST_PASSWORD;

#[actix_rt::test]
async fn register_stores_hashed_password() {
    let ctx = common::setup();
    let app = test::init_service(build_app(&ctx.state)).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "new@example.com",
            "firstName": "Newton",
            "lastName": "Comer",
            "password": "password123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User registered successfully!");

    let stored = ctx
        .state
        .user_ops
        .get_user_by_email("new@example.com")
        .expect("registered user");
    assert!(!stored.admin);
    assert_ne!(stored.password_hash, "password123");
    assert!(stored.password_hash.starts_with("$argon2"));
}

#[actix_rt::test]
async fn register_duplicate_email_is_bad_request() {
    let ctx = common::setup();
    let app = test::init_service(build_app(&ctx.state)).await;

    let payload = json!({
        "email": "new@example.com",
        "firstName": "Newton",
        "lastName": "Comer",
        "password": "password123"
    });
    let first = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&payload)
        .to_request();
    assert_eq!(test::call_service(&app, first).await.status(), StatusCode::OK);

    let second = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, second).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Email is already taken!" }));
}

#[actix_rt::test]
async fn register_rejects_invalid_payload() {
    let ctx = common::setup();
    let app = test::init_service(build_app(&ctx.state)).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "not-an-email",
            "firstName": "Al",
            "lastName": "Comer",
            "password": "123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let broken = test::TestRequest::post()
        .uri("/api/auth/register")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    assert_eq!(
        test::call_service(&app, broken).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_rt::test]
async fn login_returns_token_for_same_user() {
    let ctx = common::setup();
    let app = test::init_service(build_app(&ctx.state)).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "email": ctx.fixtures.user_email,
            "password": TEST_PASSWORD
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["type"], "Bearer");
    assert_eq!(body["id"], ctx.fixtures.user_id);
    assert_eq!(body["username"], ctx.fixtures.user_email.as_str());
    assert_eq!(body["firstName"], "John");
    assert_eq!(body["admin"], false);

    let token = body["token"].as_str().expect("token string");
    let subject = ctx.state.tokens.validate(token).expect("valid token");
    assert_eq!(subject, ctx.fixtures.user_email);

    // The issued token opens protected endpoints.
    let req = test::TestRequest::get()
        .uri("/api/teacher")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn login_with_wrong_password_is_unauthorized() {
    let ctx = common::setup();
    let app = test::init_service(build_app(&ctx.state)).await;

    for (email, password) in [
        (ctx.fixtures.user_email.as_str(), "wrong-password"),
        ("nobody@example.com", TEST_PASSWORD),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}

#[actix_rt::test]
async fn protected_endpoint_requires_valid_bearer() {
    let ctx = common::setup();
    let app = test::init_service(build_app(&ctx.state)).await;

    let missing = test::TestRequest::get().uri("/api/session").to_request();
    let resp = test::call_service(&app, missing).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthorized");

    let garbage = test::TestRequest::get()
        .uri("/api/session")
        .insert_header((header::AUTHORIZATION, "Bearer not.a.jwt"))
        .to_request();
    assert_eq!(
        test::call_service(&app, garbage).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let not_bearer = test::TestRequest::get()
        .uri("/api/session")
        .insert_header((header::AUTHORIZATION, "Basic am9objpwYXNz"))
        .to_request();
    assert_eq!(
        test::call_service(&app, not_bearer).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let unknown_user = test::TestRequest::get()
        .uri("/api/session")
        .insert_header(ctx.bearer("ghost@example.com"))
        .to_request();
    assert_eq!(
        test::call_service(&app, unknown_user).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let expired_token = ctx
        .state
        .tokens
        .issue_at(
            &ctx.fixtures.user_email,
            jsonwebtoken::get_current_timestamp() - 2 * ctx.state.tokens.expiry_secs(),
        )
        .expect("token");
    let expired = test::TestRequest::get()
        .uri("/api/session")
        .insert_header((header::AUTHORIZATION, format!("Bearer {expired_token}")))
        .to_request();
    assert_eq!(
        test::call_service(&app, expired).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let valid = test::TestRequest::get()
        .uri("/api/session")
        .insert_header(ctx.user_bearer())
        .to_request();
    assert_eq!(test::call_service(&app, valid).await.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn public_routes_need_no_token() {
    let ctx = common::setup();
    let app = test::init_service(build_app(&ctx.state)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "Server up!");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api-docs/openapi.json")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc: Value = test::read_body_json(resp).await;
    assert!(doc["paths"]
        .get("/api/session/{id}/participate/{user_id}")
        .is_some());
}
