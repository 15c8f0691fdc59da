//! Registration, login and bearer-auth routes.

mod common;

use axum::http::{StatusCode, header};
use gif_core::testing::{FakeIdentityProvider, StaticTokenVerifier};
use gif_core::{IdentityError, NewUser, UserRole};
use serde_json::json;
use tower::ServiceExt;

use common::{app, builder, get, get_with_token, json};

fn registration() -> serde_json::Value {
    json!({
        "name": "Ana Lima",
        "email": "Ana@School.org",
        "password": "s3cret-pass",
        "role": "seller"
    })
}

#[tokio::test]
async fn health_endpoint_returns_ok_without_auth() {
    let app = app();
    let response = app.router.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let (_, body) = app.send(get("/health")).await;
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn register_creates_profile_once() {
    let app = app();

    let (status, body) = app.send(json("POST", "/api/auth/register", &registration())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["message"],
        "User registered. Please check your email for the confirmation code."
    );
    assert_eq!(body["role"], "seller");
    let user_id = body["user_id"].as_str().unwrap().to_string();

    let (status, body) = app.send(json("POST", "/api/auth/register", &registration())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User already exists.");
    assert_eq!(body["user_id"], user_id.as_str());

    let stored = app.repos.users.find_by_email("ana@school.org").await.unwrap().unwrap();
    assert_eq!(stored.full_name.as_deref(), Some("Ana Lima"));
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = app();
    let mut body = registration();
    body["password"] = json!("short");
    let (status, body) = app.send(json("POST", "/api/auth/register", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["detail"].as_str().unwrap().contains("8"));
}

#[tokio::test]
async fn register_surfaces_provider_rejection() {
    let app = builder()
        .identity(FakeIdentityProvider::default().with_sign_up_error(
            IdentityError::InvalidPassword("Password must have symbol characters".into()),
        ))
        .build();
    let (status, body) = app.send(json("POST", "/api/auth/register", &registration())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Sign-up failed: Password must have symbol characters"
    );
    assert!(app.repos.users.find_by_email("ana@school.org").await.unwrap().is_none());
}

#[tokio::test]
async fn confirm_reports_bad_code() {
    let app = app();
    let (status, body) = app
        .send(json(
            "POST",
            "/api/auth/confirm",
            &json!({"email": "ana@school.org", "code": "123456"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User confirmed successfully.");

    let (status, _) = app
        .send(json(
            "POST",
            "/api/auth/confirm",
            &json!({"email": "ana@school.org", "code": "000000"}),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_returns_tokens() {
    let app = app();
    let (status, body) = app
        .send(json(
            "POST",
            "/api/auth/login",
            &json!({"email": "ana@school.org", "password": "s3cret-pass"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["access_token"], "access-ana@school.org");
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
}

#[tokio::test]
async fn login_failures_map_to_status_codes() {
    let cases = [
        (
            IdentityError::NotAuthorized("Incorrect username or password.".into()),
            StatusCode::UNAUTHORIZED,
        ),
        (
            IdentityError::UserNotConfirmed("User is not confirmed.".into()),
            StatusCode::UNAUTHORIZED,
        ),
        (
            IdentityError::LimitExceeded("Attempt limit exceeded".into()),
            StatusCode::TOO_MANY_REQUESTS,
        ),
        (
            IdentityError::Unavailable("connection refused".into()),
            StatusCode::SERVICE_UNAVAILABLE,
        ),
    ];
    for (error, expected) in cases {
        let app = builder()
            .identity(FakeIdentityProvider::default().with_login_error(error))
            .build();
        let (status, _) = app
            .send(json(
                "POST",
                "/api/auth/login",
                &json!({"email": "ana@school.org", "password": "whatever1"}),
            ))
            .await;
        assert_eq!(status, expected);
    }
}

#[tokio::test]
async fn bad_credentials_use_uniform_message() {
    let app = builder()
        .identity(
            FakeIdentityProvider::default()
                .with_login_error(IdentityError::UserNotFound("User does not exist.".into())),
        )
        .build();
    let (status, body) = app
        .send(json(
            "POST",
            "/api/auth/login",
            &json!({"email": "ghost@school.org", "password": "whatever1"}),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Incorrect email or password");
}

#[tokio::test]
async fn me_requires_bearer_token() {
    let app = app();
    let response = app.router.clone().oneshot(get("/api/auth/me")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");

    let (status, body) = app.send(get_with_token("/api/auth/me", "forged")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["detail"].as_str().unwrap().starts_with("Invalid token"));
}

#[tokio::test]
async fn me_resolves_user_from_email_claim() {
    let tokens = StaticTokenVerifier::default()
        .with_token("good", StaticTokenVerifier::claims_for("kid@school.org"))
        .with_token("orphan", StaticTokenVerifier::claims_for("gone@school.org"));
    let app = builder().tokens(tokens).build();
    app.repos
        .users
        .insert(&NewUser {
            email: "kid@school.org".to_string(),
            full_name: Some("Kid".to_string()),
            role: UserRole::Customer,
        })
        .await
        .unwrap();

    let (status, body) = app.send(get_with_token("/api/auth/me", "good")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "kid@school.org");
    assert_eq!(body["name"], "Kid");

    let (status, body) = app.send(get_with_token("/api/auth/me", "orphan")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
}

#[tokio::test]
async fn token_without_email_is_unauthorized() {
    let mut claims = StaticTokenVerifier::claims_for("x@school.org");
    claims.email = None;
    let app = builder()
        .tokens(StaticTokenVerifier::default().with_token("noemail", claims))
        .build();
    let (status, body) = app.send(get_with_token("/api", "noemail")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Email not found in token");
}

#[tokio::test]
async fn api_root_welcomes_authenticated_user() {
    let app = builder()
        .tokens(
            StaticTokenVerifier::default()
                .with_token("good", StaticTokenVerifier::claims_for("kid@school.org")),
        )
        .build();
    app.repos
        .users
        .insert(&NewUser {
            email: "kid@school.org".to_string(),
            full_name: None,
            role: UserRole::Customer,
        })
        .await
        .unwrap();

    let (status, _) = app.send(get("/api")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.send(get_with_token("/api", "good")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to GiF (Growing is Fun) API");
}
