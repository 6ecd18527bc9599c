mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_register_returns_token_and_profile() {
    let app = TestApp::new().await;

    let res = app
        .request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Alice",
                "email": "alice@example.com",
                "password": "secret",
                "role": "site_supervisor",
                "company": "Acme Civil"
            })),
        )
        .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;

    assert!(body["token"].as_str().unwrap().len() >= 32);
    assert_eq!(body["user"]["name"], "Alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["role"], "site_supervisor");
    assert_eq!(body["user"]["company"], "Acme Civil");
    assert!(body["user"]["password"].is_null(), "password must never be returned");
}

#[tokio::test]
async fn test_register_defaults_to_site_supervisor() {
    let app = TestApp::new().await;

    let res = app
        .request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Bob",
                "email": "bob@example.com",
                "password": "secret"
            })),
        )
        .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["user"]["role"], "site_supervisor");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    app.register("Alice", "alice@example.com", "secret", "site_supervisor").await;

    let res = app
        .request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Impostor",
                "email": "alice@example.com",
                "password": "other"
            })),
        )
        .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_register_rejects_missing_fields_and_bad_role() {
    let app = TestApp::new().await;

    let res = app
        .request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "name": "", "email": "x@example.com", "password": "p" })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app
        .request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Eve",
                "email": "eve@example.com",
                "password": "p",
                "role": "superadmin"
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
async fn test_login_rejects_unknown_email_and_wrong_password() {
    let app = TestApp::new().await;
    app.register("Alice", "alice@example.com", "secret", "site_supervisor").await;

    let res = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ghost@example.com", "password": "secret" })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "invalid_credentials");

    let res = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "alice@example.com", "password": "wrong" })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_token_lifecycle() {
    let app = TestApp::new().await;
    let (user_id, _) = app.register("Alice", "alice@example.com", "secret", "site_supervisor").await;

    let token = app.login("alice@example.com", "secret").await;

    // Issued token resolves back to the same user.
    let res = app
        .request("POST", "/api/auth/validate-token", None, Some(json!({ "token": &token })))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["id"].as_i64().unwrap(), user_id);

    // Revoked token stops resolving.
    let res = app.request("POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .request("POST", "/api/auth/validate-token", None, Some(json!({ "token": &token })))
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "invalid_token");

    // Revoking twice is not an error.
    let res = app.request("POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_multiple_sessions_per_user() {
    let app = TestApp::new().await;
    let (_, first) = app.register("Alice", "alice@example.com", "secret", "site_supervisor").await;
    let second = app.login("alice@example.com", "secret").await;

    // Revoking one session leaves the other valid.
    let res = app.request("POST", "/api/auth/logout", Some(&first), None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .request("POST", "/api/auth/validate-token", None, Some(json!({ "token": second })))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_routes_fail_closed() {
    let app = TestApp::new().await;

    let res = app.request("GET", "/api/projects", None, None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app.request("GET", "/api/projects", Some("not-a-real-token"), None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
