mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};
use studio_booking::build_app;

fn session_body(teacher_id: i64) -> Value {
    json!({
        "name": "Morning Hatha",
        "date": "2030-01-15T08:00:00Z",
        "teacher_id": teacher_id,
        "description": "Gentle start of the day"
    })
}

#[actix_rt::test]
async fn list_and_get_sessions() {
    let ctx = common::setup();
    let app = test::init_service(build_app(&ctx.state)).await;

    let req = test::TestRequest::get()
        .uri("/api/session")
        .insert_header(ctx.user_bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let sessions = body.as_array().expect("array");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["teacher_id"], ctx.fixtures.teacher_id);

    let req = test::TestRequest::get()
        .uri(&format!("/api/session/{}", ctx.fixtures.session_id))
        .insert_header(ctx.user_bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Yoga Session");
    assert_eq!(body["users"], json!([]));
}

#[actix_rt::test]
async fn get_session_with_bad_ids() {
    let ctx = common::setup();
    let app = test::init_service(build_app(&ctx.state)).await;

    let req = test::TestRequest::get()
        .uri("/api/session/invalid")
        .insert_header(ctx.user_bearer())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get()
        .uri("/api/session/999")
        .insert_header(ctx.user_bearer())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_rt::test]
async fn create_update_delete_session() {
    let ctx = common::setup();
    let app = test::init_service(build_app(&ctx.state)).await;

    let req = test::TestRequest::post()
        .uri("/api/session")
        .insert_header(ctx.user_bearer())
        .set_json(session_body(ctx.fixtures.teacher_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let new_id = body["id"].as_i64().expect("id");
    assert_eq!(body["name"], "Morning Hatha");

    let mut changed = session_body(ctx.fixtures.teacher_id);
    changed["name"] = json!("Evening Yin");
    let req = test::TestRequest::put()
        .uri(&format!("/api/session/{new_id}"))
        .insert_header(ctx.user_bearer())
        .set_json(&changed)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Evening Yin");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/session/{new_id}"))
        .insert_header(ctx.user_bearer())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/session/{new_id}"))
        .insert_header(ctx.user_bearer())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_rt::test]
async fn create_session_with_plain_date() {
    let ctx = common::setup();
    let app = test::init_service(build_app(&ctx.state)).await;

    let req = test::TestRequest::post()
        .uri("/api/session")
        .insert_header(ctx.user_bearer())
        .set_json(json!({
            "name": "New Session",
            "date": "2025-02-20",
            "teacher_id": ctx.fixtures.teacher_id,
            "description": "Join us"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "New Session");
    assert_eq!(body["teacher_id"], ctx.fixtures.teacher_id);
    let stored = ctx
        .state
        .session_ops
        .get_session(body["id"].as_i64().expect("id"))
        .expect("stored session");
    assert_eq!(stored.session.date.to_rfc3339(), "2025-02-20T00:00:00+00:00");
}

#[actix_rt::test]
async fn create_session_validation() {
    let ctx = common::setup();
    let app = test::init_service(build_app(&ctx.state)).await;

    let req = test::TestRequest::post()
        .uri("/api/session")
        .insert_header(ctx.user_bearer())
        .set_json(json!({ "name": "  " }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::post()
        .uri("/api/session")
        .insert_header(ctx.user_bearer())
        .set_json(session_body(999))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::put()
        .uri("/api/session/999")
        .insert_header(ctx.user_bearer())
        .set_json(session_body(ctx.fixtures.teacher_id))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_rt::test]
async fn participate_then_leave() {
    let ctx = common::setup();
    let app = test::init_service(build_app(&ctx.state)).await;
    let join_uri = format!(
        "/api/session/{}/participate/{}",
        ctx.fixtures.session_id, ctx.fixtures.other_user_id
    );

    let req = test::TestRequest::post()
        .uri(&join_uri)
        .insert_header(ctx.user_bearer())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let session = ctx
        .state
        .session_ops
        .get_session(ctx.fixtures.session_id)
        .expect("session");
    assert_eq!(session.users, vec![ctx.fixtures.other_user_id]);

    let req = test::TestRequest::post()
        .uri(&join_uri)
        .insert_header(ctx.user_bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().is_some());

    let req = test::TestRequest::delete()
        .uri(&join_uri)
        .insert_header(ctx.user_bearer())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&join_uri)
        .insert_header(ctx.user_bearer())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_rt::test]
async fn participate_with_bad_ids() {
    let ctx = common::setup();
    let app = test::init_service(build_app(&ctx.state)).await;

    let cases = [
        (format!("/api/session/invalid/participate/{}", ctx.fixtures.user_id), StatusCode::BAD_REQUEST),
        (format!("/api/session/{}/participate/abc", ctx.fixtures.session_id), StatusCode::BAD_REQUEST),
        (format!("/api/session/999/participate/{}", ctx.fixtures.user_id), StatusCode::NOT_FOUND),
        (format!("/api/session/{}/participate/999", ctx.fixtures.session_id), StatusCode::NOT_FOUND),
    ];
    for (uri, status) in cases {
        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header(ctx.user_bearer())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), status, "{uri}");
    }
}
