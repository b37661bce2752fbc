//! Common test utilities for integration tests.
//!
//! Builds the application on the in-memory stores with a seeded
//! `admin` / `admin123` account.

// Not every test binary uses every helper.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use domain::models::AdminRole;
use domain::services::{InMemoryCredentialStore, InMemoryFeedbackStore};
use feedback_desk_api::{
    app::create_app,
    config::{
        AdminBootstrapConfig, AuthConfig, Config, DatabaseConfig, LoggingConfig, ServerConfig,
        StorageBackend, StorageConfig,
    },
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Test configuration on the in-memory backend.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        },
        storage: StorageConfig {
            backend: StorageBackend::Memory,
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 10,
            idle_timeout_secs: 600,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            session_ttl_secs: 3600,
            leeway_secs: 0,
        },
        admin: AdminBootstrapConfig {
            bootstrap_username: ADMIN_USERNAME.to_string(),
            bootstrap_password: ADMIN_PASSWORD.to_string(),
            bootstrap_role: "super_admin".to_string(),
        },
    }
}

/// Router plus a handle on its feedback store for seeding and fault injection.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryFeedbackStore>,
}

pub fn create_test_app() -> TestApp {
    create_test_app_with_config(test_config())
}

pub fn create_test_app_with_config(config: Config) -> TestApp {
    let store = Arc::new(InMemoryFeedbackStore::new());
    let credentials = Arc::new(
        InMemoryCredentialStore::with_admin(ADMIN_USERNAME, ADMIN_PASSWORD, AdminRole::SuperAdmin)
            .expect("Failed to seed admin account"),
    );
    let router = create_app(config, store.clone(), credentials);
    TestApp { router, store }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> axum::response::Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Logs in as the seeded admin and returns the bearer token.
    pub async fn admin_token(&self) -> String {
        let response = self
            .send(json_request(
                Method::POST,
                "/api/v1/admin/login",
                json!({"username": ADMIN_USERNAME, "password": ADMIN_PASSWORD}),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_response_body(response).await;
        body["access_token"]
            .as_str()
            .expect("login response carries access_token")
            .to_string()
    }

    /// Submits a form and returns the created record.
    pub async fn submit(&self, form: Value) -> Value {
        let response = self
            .send(json_request(Method::POST, "/api/v1/feedback", form))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        parse_response_body(response).await
    }
}

/// The broken-elevator complaint used throughout the tests.
pub fn elevator_complaint() -> Value {
    json!({
        "student_id": "CU2023099",
        "student_name": "Tobi Adeyemi",
        "email": "tobi@caleb.edu.ng",
        "department": "Engineering",
        "feedback_type": "Complaint",
        "category": "Facilities",
        "priority": "Urgent",
        "feedback_text": "Broken elevator"
    })
}

/// A valid form with generated student details.
pub fn random_form(priority: &str, category: &str) -> Value {
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    json!({
        "student_id": format!("CU{}", (2020000u32..2026000).fake::<u32>()),
        "student_name": name,
        "email": email,
        "department": "Computer Science",
        "course_code": "CSC201",
        "feedback_type": "Suggestion",
        "category": category,
        "priority": priority,
        "feedback_text": "Please extend lab hours"
    })
}

/// Build a JSON request without authentication.
pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a JSON request with authentication.
pub fn json_request_with_auth(
    method: Method,
    uri: &str,
    body: Value,
    token: &str,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a GET request without authentication.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Build a GET request with authentication.
pub fn get_request_with_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Helper to parse JSON response body.
pub async fn parse_response_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}
