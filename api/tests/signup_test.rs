mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use common::{test_context, test_context_with, verified_account};
use ed_api::app::create_app;

fn signup_payload() -> serde_json::Value {
    json!({
        "name": "Bob",
        "email": "bob@academy.example",
        "phone": "+61498765432",
        "password": "initial-password"
    })
}

#[actix_web::test]
async fn signup_persists_an_unverified_account_and_sends_the_link() {
    let ctx = test_context().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(signup_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "bob@academy.example");

    let sent = ctx.email.last_sent().expect("verification email");
    assert_eq!(sent.to, "bob@academy.example");
    let token = ctx.email.last_token().expect("token in url");
    assert_eq!(token.len(), 32);

    // not verified yet, so login is refused
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "identifier": "bob@academy.example", "password": "initial-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn verification_link_is_single_use_and_unlocks_login() {
    let ctx = test_context().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(signup_payload())
        .to_request();
    test::call_service(&app, req).await;
    let token = ctx.email.last_token().expect("token in url");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-email")
        .set_json(json!({ "token": token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // verified account can log in now
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "identifier": "bob@academy.example", "password": "initial-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // replaying the link misses the lookup
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-email")
        .set_json(json!({ "token": token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_token");
}

#[actix_web::test]
async fn unknown_verification_token_gets_the_same_generic_rejection() {
    let ctx = test_context().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-email")
        .set_json(json!({ "token": "z".repeat(32) }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_token");
}

#[actix_web::test]
async fn duplicate_email_and_phone_are_conflicts() {
    let ctx = test_context_with(vec![verified_account()]).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({
            "name": "Mallory",
            "email": "alice@academy.example",
            "phone": "+61400000000",
            "password": "another-password"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "email_already_registered");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({
            "name": "Mallory",
            "email": "mallory@academy.example",
            "phone": "+61412345678",
            "password": "another-password"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "phone_already_registered");

    // neither attempt sent an email
    assert_eq!(ctx.email.sent_count(), 0);
}

#[actix_web::test]
async fn short_password_fails_validation_before_the_repository_is_touched() {
    let ctx = test_context().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({
            "name": "Bob",
            "email": "bob@academy.example",
            "phone": "+61498765432",
            "password": "short"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
}
