//! Internal error types for Cognito calls.
//!
//! Mapped to `gif_core::IdentityError` at the port boundary.

use gif_core::IdentityError;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CognitoError {
    /// The API answered with an error document.
    #[error("{code}: {message}")]
    Api {
        /// Exception name without the namespace prefix.
        code: String,
        message: String,
        status: u16,
    },

    /// The API answered with something that is not an error document.
    #[error("Unexpected response (status {status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Error document returned by the AWS JSON protocol.
#[derive(Debug, Deserialize)]
pub(crate) struct AwsErrorBody {
    #[serde(rename = "__type")]
    pub kind: String,
    #[serde(alias = "Message", default)]
    pub message: String,
}

impl CognitoError {
    /// Build from an error response body, if it is an AWS error document.
    pub(crate) fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<AwsErrorBody>(body) {
            Ok(err) => Self::Api {
                // "com.amazonaws...#NotAuthorizedException" -> "NotAuthorizedException"
                code: err
                    .kind
                    .rsplit('#')
                    .next()
                    .unwrap_or(&err.kind)
                    .to_string(),
                message: err.message,
                status,
            },
            Err(_) => Self::UnexpectedResponse {
                status,
                body: body.chars().take(200).collect(),
            },
        }
    }
}

impl From<CognitoError> for IdentityError {
    fn from(e: CognitoError) -> Self {
        match e {
            CognitoError::Api { code, message, .. } => match code.as_str() {
                "UserNotFoundException" => Self::UserNotFound(message),
                "UsernameExistsException" | "AliasExistsException" => Self::UserExists(message),
                "NotAuthorizedException" => Self::NotAuthorized(message),
                "UserNotConfirmedException" => Self::UserNotConfirmed(message),
                "CodeMismatchException" => Self::CodeMismatch(message),
                "ExpiredCodeException" => Self::ExpiredCode(message),
                "LimitExceededException"
                | "TooManyRequestsException"
                | "TooManyFailedAttemptsException" => Self::LimitExceeded(message),
                "InvalidParameterException" => Self::InvalidParameter(message),
                "InvalidPasswordException" => Self::InvalidPassword(message),
                "UnrecognizedClientException"
                | "InvalidUserPoolConfigurationException"
                | "ResourceNotFoundException" => Self::Unavailable(format!("{code}: {message}")),
                _ => Self::Other { code, message },
            },
            CognitoError::UnexpectedResponse { status, body } if status >= 500 => {
                Self::Unavailable(format!("status {status}: {body}"))
            }
            CognitoError::UnexpectedResponse { status, body } => Self::Other {
                code: format!("HTTP{status}"),
                message: body,
            },
            CognitoError::Network(e) => Self::Unavailable(e.to_string()),
            CognitoError::JsonParse(e) => Self::Other {
                code: "InvalidResponse".to_string(),
                message: e.to_string(),
            },
        }
    }
}
