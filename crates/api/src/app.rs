use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use domain::services::{CredentialStore, FeedbackService, FeedbackStore};
use shared::jwt::JwtConfig;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, request_id};
use crate::routes::{admin_auth, admin_feedback, dashboard, feedback, health};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub feedback: FeedbackService,
    pub credentials: Arc<dyn CredentialStore>,
    pub jwt: Arc<JwtConfig>,
}

pub fn create_app(
    config: Config,
    feedback_store: Arc<dyn FeedbackStore>,
    credentials: Arc<dyn CredentialStore>,
) -> Router {
    let config = Arc::new(config);
    let jwt = Arc::new(JwtConfig::from_secret(
        &config.auth.jwt_secret,
        config.auth.session_ttl_secs,
        config.auth.leeway_secs,
    ));

    let state = AppState {
        config: config.clone(),
        feedback: FeedbackService::new(feedback_store),
        credentials,
        jwt,
    };

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/feedback/options", get(feedback::get_options))
        .route("/api/v1/feedback", post(feedback::submit_feedback))
        .route("/api/v1/stats", get(feedback::get_public_stats))
        .route("/api/v1/admin/login", post(admin_auth::login))
        .route("/api/v1/admin/session", get(admin_auth::get_session));

    // Admin routes; handlers take the `AdminAuth` extractor, which rejects
    // requests without a valid session token.
    let admin_routes = Router::new()
        .route("/api/v1/admin/feedback", get(admin_feedback::list_feedback))
        .route(
            "/api/v1/admin/feedback/:id",
            get(admin_feedback::get_feedback).patch(admin_feedback::update_feedback),
        )
        .route("/api/v1/admin/dashboard", get(dashboard::get_dashboard))
        .route("/api/v1/admin/analytics", get(dashboard::get_analytics));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id))
        .layer(cors)
        .with_state(state)
}
