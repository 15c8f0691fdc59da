//! Cognito Identity Provider client.
//!
//! Speaks the AWS JSON 1.1 protocol directly: every operation is a `POST` to
//! the regional endpoint with the operation named in `X-Amz-Target`.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use gif_core::{AuthTokens, CodeDelivery, IdentityError, IdentityProvider, SignUpOutcome};

use crate::config::CognitoConfig;
use crate::error::CognitoError;

const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const AMZ_JSON: &str = "application/x-amz-json-1.1";

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Attribute<'a> {
    name: &'a str,
    value: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpResponse {
    user_sub: String,
    #[serde(default)]
    user_confirmed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    authentication_result: Option<AuthenticationResult>,
    challenge_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    access_token: String,
    id_token: String,
    refresh_token: Option<String>,
    expires_in: i64,
    token_type: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ForgotPasswordResponse {
    code_delivery_details: Option<DeliveryDetails>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DeliveryDetails {
    #[serde(default)]
    delivery_medium: String,
    #[serde(default)]
    destination: String,
}

/// Operations that return nothing useful.
#[derive(Deserialize)]
struct Empty {}

// ============================================================================
// Client
// ============================================================================

/// `IdentityProvider` backed by an Amazon Cognito user pool app client.
pub struct CognitoClient {
    http: reqwest::Client,
    endpoint: String,
    client_id: String,
}

impl CognitoClient {
    pub fn new(config: &CognitoConfig) -> Result<Self, CognitoError> {
        Ok(Self {
            http: config.http_client()?,
            endpoint: config.endpoint(),
            client_id: config.client_id().to_string(),
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        operation: &str,
        body: serde_json::Value,
    ) -> Result<T, CognitoError> {
        debug!(target: "gif.identity", operation, "Calling identity provider");
        let response = self
            .http
            .post(&self.endpoint)
            .header("X-Amz-Target", format!("{TARGET_PREFIX}.{operation}"))
            .header(CONTENT_TYPE, AMZ_JSON)
            .body(serde_json::to_vec(&body)?)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if status.is_success() {
            return Ok(serde_json::from_str(&text)?);
        }

        let err = CognitoError::from_body(status.as_u16(), &text);
        warn!(target: "gif.identity", operation, error = %err, "Identity provider call failed");
        Err(err)
    }
}

#[async_trait]
impl IdentityProvider for CognitoClient {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<SignUpOutcome, IdentityError> {
        let attributes = [
            Attribute {
                name: "email",
                value: email,
            },
            Attribute { name: "name", value: name },
        ];
        let response: SignUpResponse = self
            .call(
                "SignUp",
                json!({
                    "ClientId": self.client_id,
                    "Username": email,
                    "Password": password,
                    "UserAttributes": attributes,
                }),
            )
            .await?;
        Ok(SignUpOutcome {
            user_sub: response.user_sub,
            confirmed: response.user_confirmed,
        })
    }

    async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<(), IdentityError> {
        let _: Empty = self
            .call(
                "ConfirmSignUp",
                json!({
                    "ClientId": self.client_id,
                    "Username": email,
                    "ConfirmationCode": code,
                }),
            )
            .await?;
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, IdentityError> {
        let response: InitiateAuthResponse = self
            .call(
                "InitiateAuth",
                json!({
                    "AuthFlow": "USER_PASSWORD_AUTH",
                    "ClientId": self.client_id,
                    "AuthParameters": { "USERNAME": email, "PASSWORD": password },
                }),
            )
            .await?;

        match (response.authentication_result, response.challenge_name) {
            (Some(result), _) => Ok(AuthTokens {
                access_token: result.access_token,
                id_token: result.id_token,
                refresh_token: result.refresh_token,
                expires_in: result.expires_in,
                token_type: result.token_type,
            }),
            (None, Some(challenge)) => Err(IdentityError::NotAuthorized(format!(
                "Sign-in requires the {challenge} challenge"
            ))),
            (None, None) => Err(IdentityError::Other {
                code: "InvalidResponse".to_string(),
                message: "InitiateAuth returned neither tokens nor a challenge".to_string(),
            }),
        }
    }

    async fn forgot_password(&self, email: &str) -> Result<CodeDelivery, IdentityError> {
        let response: ForgotPasswordResponse = self
            .call(
                "ForgotPassword",
                json!({ "ClientId": self.client_id, "Username": email }),
            )
            .await?;
        let details = response.code_delivery_details.unwrap_or(DeliveryDetails {
            delivery_medium: String::new(),
            destination: String::new(),
        });
        Ok(CodeDelivery {
            medium: details.delivery_medium,
            destination: details.destination,
        })
    }

    async fn confirm_forgot_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let _: Empty = self
            .call(
                "ConfirmForgotPassword",
                json!({
                    "ClientId": self.client_id,
                    "Username": email,
                    "ConfirmationCode": code,
                    "Password": new_password,
                }),
            )
            .await?;
        Ok(())
    }
}
