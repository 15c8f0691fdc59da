//! Forgot-password / OTP routes.

mod common;

use axum::http::StatusCode;
use gif_core::testing::{FakeIdentityProvider, RecordingMailer};
use gif_core::{CodeDelivery, IdentityError, MailError};
use serde_json::{Value, json};

use common::{TestApp, app, builder, get, json};

const EMAIL: &str = "kid@school.org";

fn unavailable_provider() -> FakeIdentityProvider {
    FakeIdentityProvider::default().with_forgot_password(Err(IdentityError::Unavailable(
        "UnrecognizedClientException".into(),
    )))
}

async fn forgot(app: &TestApp) -> (StatusCode, Value) {
    app.send(json(
        "POST",
        "/api/auth/forgot-password",
        &json!({ "email": "Kid@School.org" }),
    ))
    .await
}

async fn verify(app: &TestApp, otp: &str) -> (StatusCode, Value) {
    app.send(json(
        "POST",
        "/api/auth/verify-otp",
        &json!({ "email": EMAIL, "otp": otp }),
    ))
    .await
}

async fn reset(app: &TestApp, otp: &str) -> (StatusCode, Value) {
    app.send(json(
        "POST",
        "/api/auth/reset-password",
        &json!({
            "email": EMAIL,
            "otp": otp,
            "new_password": "n3w-password",
            "confirm_password": "n3w-password"
        }),
    ))
    .await
}

/// The code from the last fallback mail.
fn mailed_code(app: &TestApp) -> String {
    let sent = app.mailer.sent();
    let html = &sent.last().expect("no mail sent").html;
    let start = html.find("<strong>").unwrap() + "<strong>".len();
    html[start..start + 6].to_string()
}

#[tokio::test]
async fn provider_flow_resets_password() {
    let app = app();

    let (status, body) = forgot(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["expires_in"], 600);
    assert_eq!(
        body["message"],
        "OTP has been sent to ki***@school.org. Please check your email (including spam folder)."
    );

    let (status, body) = app.send(get(&format!("/api/auth/otp-status/{EMAIL}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(body["remaining_attempts"], 3);

    let (status, body) = verify(&app, "482913").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "OTP verified successfully. You can now reset your password."
    );
    assert!(body["expires_in"].is_null());

    let (status, body) = reset(&app, "111111").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Invalid OTP. Please check the code and try again."
    );

    let (status, body) = reset(&app, "482913").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Password has been reset successfully. You can now login with your new password."
    );
    assert_eq!(
        app.identity.resets(),
        vec![(EMAIL.to_string(), "482913".to_string())]
    );
    assert!(app.repos.otps.find(EMAIL, true).await.unwrap().is_none());
}

#[tokio::test]
async fn unknown_account_gets_generic_answer() {
    let app = builder()
        .identity(FakeIdentityProvider::default().with_forgot_password(Err(
            IdentityError::UserNotFound("Username/client id combination not found.".into()),
        )))
        .build();
    let (status, body) = forgot(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "If an account with this email exists, an OTP has been sent."
    );
    assert!(app.repos.otps.find(EMAIL, false).await.unwrap().is_none());
}

#[tokio::test]
async fn throttled_and_sms_requests_fail() {
    let app = builder()
        .identity(FakeIdentityProvider::default().with_forgot_password(Err(
            IdentityError::LimitExceeded("Attempt limit exceeded".into()),
        )))
        .build();
    let (status, _) = forgot(&app).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    let app = builder()
        .identity(FakeIdentityProvider::default().with_forgot_password(Ok(CodeDelivery {
            medium: "SMS".into(),
            destination: "+***1234".into(),
        })))
        .build();
    let (status, body) = forgot(&app).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Email delivery failed. Delivery medium: SMS");
}

#[tokio::test]
async fn fallback_code_is_mailed_and_counts_attempts() {
    let app = builder().identity(unavailable_provider()).build();

    let (status, body) = forgot(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expires_in"], 600);

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, EMAIL);
    assert_eq!(sent[0].subject, "Password Reset OTP - MaiTech");

    let code = mailed_code(&app);
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let (status, body) = verify(&app, wrong).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid OTP. 2 attempts remaining");

    let (_, body) = app.send(get(&format!("/api/auth/otp-status/{EMAIL}"))).await;
    assert_eq!(body["attempts"], 1);

    let (status, _) = verify(&app, &code).await;
    assert_eq!(status, StatusCode::OK);

    // The identity provider cannot accept a code it did not issue.
    let (status, _) = reset(&app, &code).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn fallback_locks_out_after_three_attempts() {
    let app = builder().identity(unavailable_provider()).build();
    forgot(&app).await;
    let code = mailed_code(&app);
    let wrong = if code == "999999" { "999998" } else { "999999" };

    for remaining in [2, 1, 0] {
        let (_, body) = verify(&app, wrong).await;
        assert_eq!(
            body["detail"],
            format!("Invalid OTP. {remaining} attempts remaining")
        );
    }
    let (status, body) = verify(&app, &code).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Maximum verification attempts exceeded");

    let (status, body) = verify(&app, &code).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "No active OTP found for this email. Please request a new OTP."
    );
}

#[tokio::test]
async fn mail_failure_does_not_fail_request() {
    let app = builder()
        .identity(unavailable_provider())
        .mailer(RecordingMailer::failing(MailError::Disabled))
        .build();
    let (status, _) = forgot(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert!(app.repos.otps.find(EMAIL, false).await.unwrap().is_some());
}

#[tokio::test]
async fn malformed_codes_are_rejected() {
    let app = app();
    forgot(&app).await;

    let (status, body) = verify(&app, "12ab56").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "OTP must be a 6-digit number");

    let (status, body) = app
        .send(json(
            "POST",
            "/api/auth/reset-password",
            &json!({
                "email": EMAIL,
                "otp": "123456",
                "new_password": "n3w-password",
                "confirm_password": "other-password"
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Passwords do not match");
}

#[tokio::test]
async fn reset_requires_verification() {
    let app = app();
    forgot(&app).await;
    let (status, body) = reset(&app, "123456").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "No verified OTP found for this email. Please verify OTP first."
    );
}

#[tokio::test]
async fn otp_status_without_record() {
    let app = app();
    let (status, body) = app.send(get("/api/auth/otp-status/nobody@school.org")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "not_found");
    assert_eq!(body["message"], "No active OTP found for this email");
}

#[tokio::test]
async fn missing_body_field_gets_json_error() {
    let app = app();
    let (status, body) = app
        .send(json("POST", "/api/auth/verify-otp", &json!({ "email": EMAIL })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("otp"));
}
