//! Input validation for request payloads.
//!
//! Each validator returns the normalized value or a `CoreError::Validation`
//! carrying the message shown to API clients.

use crate::domain::OTP_LENGTH;
use crate::ports::CoreError;

/// Shortest password accepted at registration and reset.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Longest accepted display name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Trim and lower-case an email, rejecting anything that is clearly not one.
///
/// The check is structural only (one `@`, non-empty local part, dotted domain,
/// no whitespace). Deliverability is the identity provider's concern.
pub fn normalize_email(email: &str) -> Result<String, CoreError> {
    let email = email.trim().to_lowercase();
    let invalid = || CoreError::Validation(format!("Invalid email address: {email}"));

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(invalid());
    }
    Ok(email)
}

/// Trim a display name and enforce 1..=100 characters.
pub fn validate_name(name: &str) -> Result<String, CoreError> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 {
        return Err(CoreError::Validation("Name must not be empty".to_string()));
    }
    if len > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Trim an OTP and require exactly six ASCII digits.
pub fn validate_otp(otp: &str) -> Result<&str, CoreError> {
    let otp = otp.trim();
    if otp.len() != OTP_LENGTH || !otp.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "OTP must be a {OTP_LENGTH}-digit number"
        )));
    }
    Ok(otp)
}

/// Sign-up confirmation codes are 4..=10 characters.
pub fn validate_confirmation_code(code: &str) -> Result<&str, CoreError> {
    let code = code.trim();
    if !(4..=10).contains(&code.chars().count()) {
        return Err(CoreError::Validation(
            "Confirmation code must be between 4 and 10 characters".to_string(),
        ));
    }
    Ok(code)
}
