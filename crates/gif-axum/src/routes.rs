//! Route definitions and router construction.
//!
//! This module defines the HTTP routes and creates the main router.
//! Handlers delegate to the shared `AppCore` facade.

use axum::Json;
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{delete, get, patch, post, put};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::CurrentUser;
use crate::bootstrap::AxumContext;
use crate::config::CorsConfig;
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
///
/// Explicit origins may send credentials; that rules out wildcard headers.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_credentials(true)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        }
    }
}

/// Build all API routes without `/api` prefix (for nesting under /api).
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        // Auth API
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/confirm", post(handlers::auth::confirm))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
        .route(
            "/auth/forgot-password",
            post(handlers::password::forgot_password),
        )
        .route("/auth/verify-otp", post(handlers::password::verify_otp))
        .route(
            "/auth/reset-password",
            post(handlers::password::reset_password),
        )
        .route(
            "/auth/otp-status/{email}",
            get(handlers::password::otp_status),
        )
        // Users API
        .route(
            "/users",
            get(handlers::users::list).post(handlers::users::create),
        )
        .route(
            "/users/",
            get(handlers::users::list).post(handlers::users::create),
        )
        .route("/users/{id}", get(handlers::users::get))
        // Notifications API
        .route(
            "/notifications",
            get(handlers::notifications::list).post(handlers::notifications::create),
        )
        .route(
            "/notifications/search",
            get(handlers::notifications::search),
        )
        .route(
            "/notifications/mark-read",
            patch(handlers::notifications::mark_read_many),
        )
        .route(
            "/notifications/{id}/read",
            patch(handlers::notifications::mark_read),
        )
        .route(
            "/notifications/{id}/dismiss",
            delete(handlers::notifications::dismiss),
        )
        .route(
            "/flagged-content/{alert_id}/ignore",
            post(handlers::notifications::ignore_flagged),
        )
        .route(
            "/flagged-content/{alert_id}/action",
            post(handlers::notifications::act_on_flagged),
        )
        // Student API
        .route("/student/dashboard", get(handlers::student::dashboard))
        .route(
            "/student/learning-path",
            get(handlers::student::learning_path),
        )
        .route("/student/lessons", get(handlers::student::lessons))
        .route(
            "/student/lessons/history",
            get(handlers::student::lesson_history),
        )
        .route(
            "/student/lessons/{lesson_id}",
            get(handlers::student::lesson),
        )
        .route(
            "/student/reports/time-tracking",
            get(handlers::student::time_tracking_report),
        )
        .route(
            "/student/reports/academic-performance",
            get(handlers::student::academic_performance_report),
        )
        .route(
            "/student/reports/topics-summary",
            get(handlers::student::topics_summary_report),
        )
        // Teacher API
        .route("/teacher/dashboard", get(handlers::teacher::dashboard))
        .route("/teacher/classes", get(handlers::teacher::classes))
        .route(
            "/teacher/classes/{class_id}",
            get(handlers::teacher::class_details),
        )
        .route(
            "/teacher/classes/{class_id}/assignments",
            get(handlers::teacher::assignments).post(handlers::teacher::create_assignment),
        )
        .route(
            "/teacher/classes/{class_id}/grades",
            post(handlers::teacher::update_grades),
        )
        .route(
            "/teacher/reports/class-performance",
            get(handlers::teacher::class_performance_report),
        )
        .route(
            "/teacher/class-chat/conversations",
            get(handlers::teacher::conversations),
        )
        .route(
            "/teacher/class-chat/conversation/{chat_id}/messages",
            get(handlers::teacher::messages),
        )
        .route(
            "/teacher/class-chat/conversation/{chat_id}/message",
            post(handlers::teacher::post_message),
        )
        .route("/teacher/settings", get(handlers::teacher::settings))
        // Class chat API
        .route(
            "/class-chat/conversations",
            get(handlers::class_chat::conversations),
        )
        .route(
            "/class-chat/conversation/{chat_id}/messages",
            get(handlers::class_chat::messages),
        )
        .route(
            "/class-chat/conversation/{chat_id}/message",
            post(handlers::class_chat::post_message),
        )
        // User settings API
        .route(
            "/user/personal-info",
            get(handlers::settings::personal_info).put(handlers::settings::personal_info),
        )
        .route(
            "/user/tutor-customization",
            get(handlers::settings::tutor_customization)
                .put(handlers::settings::tutor_customization),
        )
        .route(
            "/user/preferences",
            get(handlers::settings::preferences).put(handlers::settings::preferences),
        )
        .route(
            "/user/system-settings",
            get(handlers::settings::system_settings).put(handlers::settings::system_settings),
        )
        .route("/user/avatar", patch(handlers::settings::avatar))
        .route(
            "/user/change-password",
            post(handlers::settings::change_password),
        )
        .route("/user/2fa", put(handlers::settings::two_factor))
        .route(
            "/user/login-history",
            get(handlers::settings::login_history),
        )
}

/// Create the main Axum router with all API routes.
///
/// # Path Parameter Syntax
/// Axum 0.8 uses brace syntax for path parameters: `{id}`, `{email}`
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes().with_state(state).layer(cors))
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}

/// Authenticated welcome message at `GET /api`.
async fn welcome(_user: CurrentUser) -> Json<Value> {
    Json(json!({ "message": "Welcome to GiF (Growing is Fun) API" }))
}
