//! Small helpers shared by the services.

pub mod masking;
pub mod validation;

pub use masking::mask_email;
pub use validation::{
    normalize_email, validate_confirmation_code, validate_name, validate_otp, validate_password,
};
