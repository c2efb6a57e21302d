//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tempfile::TempDir;
use tower::util::ServiceExt;
use vidshare_core::{CreateUser, CreateVideo, StorageContext, User, Video};
use vidshare_server::{
    config::PaginationSettings, routes::build_router, services::AuthService, state::AppState,
};
use vidshare_storage::LocalStorageContext;

/// Test user credentials
pub mod fixtures {
    pub const TEST_PASSWORD: &str = "TestPassword123!";
    pub const JWT_SECRET: &str = "test-secret-key";
}

/// Minimum bcrypt cost keeps tests fast
pub fn create_test_auth_service() -> AuthService {
    AuthService::new(fixtures::JWT_SECRET.to_string(), 1, 1).with_bcrypt_cost(4)
}

/// Create a test database with migrations applied, backed by a temp file
pub async fn create_test_database() -> (LocalStorageContext, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

    let pool = vidshare_storage::create_pool(&db_url).await.unwrap();
    vidshare_storage::run_migrations(&pool).await.unwrap();

    (LocalStorageContext::new(pool), temp_dir)
}

/// Full application wired the same way `serve` wires it
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub db: Arc<LocalStorageContext>,
    pub auth_service: Arc<AuthService>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let (db, temp_dir) = create_test_database().await;
        let db = Arc::new(db);
        let auth_service = Arc::new(create_test_auth_service());

        let state = AppState::new(
            db.clone(),
            Arc::clone(&auth_service),
            PaginationSettings::default(),
        );
        let router = build_router(state.clone(), Duration::from_secs(5)).unwrap();

        Self {
            router,
            state,
            db,
            auth_service,
            _temp_dir: temp_dir,
        }
    }

    /// Swap in a router built from a custom route table
    pub fn with_router(mut self, router: Router) -> Self {
        self.router = router;
        self
    }

    /// Create a user with `fixtures::TEST_PASSWORD` and return an access token
    pub async fn create_user(&self, username: &str) -> (User, String) {
        let hash = self
            .auth_service
            .hash_password(fixtures::TEST_PASSWORD)
            .unwrap();
        let user = self
            .db
            .create_user(
                CreateUser {
                    username: username.to_string(),
                    full_name: format!("{username} Full"),
                    avatar: None,
                },
                &hash,
            )
            .await
            .unwrap();
        let token = self.auth_service.create_access_token(&user.id).unwrap();
        (user, token)
    }

    pub async fn create_video(&self, owner: &User, title: &str) -> Video {
        self.db
            .create_video(CreateVideo {
                owner_id: owner.id.clone(),
                title: title.to_string(),
                description: String::new(),
                is_published: true,
            })
            .await
            .unwrap()
    }

    /// Send a request and decode the JSON envelope
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }
}

/// Assert the error envelope shape and return its message
pub fn error_message(status: StatusCode, body: &Value) -> String {
    assert_eq!(body["statusCode"], status.as_u16());
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
    body["message"].as_str().unwrap().to_string()
}
