/// API integration tests
/// Tests complete HTTP request/response cycles with real database
mod common;

use axum::http::{Method, StatusCode};
use axum::routing::on;
use common::{error_message, fixtures, TestApp};
use serde_json::json;
use std::time::Duration;
use vidshare_server::routes::{build_router_from, Access, HttpMethod, Route};

/// Health is public and wrapped in the success envelope
#[tokio::test]
async fn test_health_envelope() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

/// Protected routes reject requests without a bearer token
#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new().await;

    for (method, uri) in [
        (Method::GET, "/api/dashboard/stats"),
        (Method::GET, "/api/dashboard/videos"),
        (Method::POST, "/api/playlists"),
        (
            Method::DELETE,
            "/api/comments/67e55044-10b1-426f-9247-bb680e5fe0c8",
        ),
    ] {
        let (status, body) = app.send(method, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        error_message(status, &body);
    }
}

/// Garbage and refresh tokens are not accepted as access tokens
#[tokio::test]
async fn test_invalid_tokens_rejected() {
    let app = TestApp::new().await;
    let (user, _) = app.create_user("alice").await;

    let (status, _) = app.get("/api/dashboard/stats", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let refresh = app.auth_service.create_refresh_token(&user.id).unwrap();
    let (status, _) = app.get("/api/dashboard/stats", Some(&refresh)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// Test login flow and token usage
#[tokio::test]
async fn test_login_flow() {
    let app = TestApp::new().await;
    let (user, _) = app.create_user("testuser").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "testuser", "password": fixtures::TEST_PASSWORD })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tokenType"], "Bearer");
    assert_eq!(body["data"]["user"]["id"], user.id.as_str());

    let access_token = body["data"]["accessToken"].as_str().unwrap().to_string();
    let (status, _) = app.get("/api/dashboard/stats", Some(&access_token)).await;
    assert_eq!(status, StatusCode::OK);

    let refresh_token = body["data"]["refreshToken"].as_str().unwrap().to_string();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/refresh",
            None,
            Some(json!({ "refreshToken": refresh_token })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["accessToken"].is_string());
}

/// Wrong password and unknown user both yield 401
#[tokio::test]
async fn test_login_bad_credentials() {
    let app = TestApp::new().await;
    app.create_user("testuser").await;

    for (username, password) in [("testuser", "wrong"), ("nobody", fixtures::TEST_PASSWORD)] {
        let (status, body) = app
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            error_message(status, &body),
            "Invalid username or password"
        );
    }
}

/// An access token cannot be used to refresh
#[tokio::test]
async fn test_refresh_with_access_token_rejected() {
    let app = TestApp::new().await;
    let (_, access_token) = app.create_user("alice").await;

    let (status, _) = app
        .send(
            Method::POST,
            "/api/auth/refresh",
            None,
            Some(json!({ "refreshToken": access_token })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// Malformed JSON bodies become 400 envelopes
#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": 42 })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    error_message(status, &body);
}

/// Unknown paths get the error envelope
#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(status, &body), "Route not found");
}

/// A known path with an unsupported method gets a 405 envelope
#[tokio::test]
async fn test_wrong_method_is_enveloped() {
    let app = TestApp::new().await;
    let (_, token) = app.create_user("alice").await;

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/comments/67e55044-10b1-426f-9247-bb680e5fe0c8",
            Some(&token),
            Some(json!({ "text": "hi" })),
        )
        .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(error_message(status, &body), "Method not allowed");

    let (status, body) = app.send(Method::POST, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    error_message(status, &body);
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(5)).await;
    "done"
}

/// Handlers that outlive the request timeout get a 408 envelope
#[tokio::test]
async fn test_request_timeout_is_enveloped() {
    let app = TestApp::new().await;
    let table = [Route {
        method: HttpMethod::Get,
        path: "/slow",
        access: Access::Public,
        operation: "slow",
        handler: |m| on(m, slow),
    }];
    let router = build_router_from(&table, app.state.clone(), Duration::from_millis(50)).unwrap();
    let app = app.with_router(router);

    let (status, body) = app.get("/api/slow", None).await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(error_message(status, &body), "Request timed out");
}
