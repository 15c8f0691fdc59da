//! Masking for addresses echoed back to unauthenticated callers.

/// Keep the first two characters of the local part and the whole domain.
///
/// ```
/// use gif_core::utils::mask_email;
///
/// assert_eq!(mask_email("student@school.org"), "st***@school.org");
/// assert_eq!(mask_email("not-an-email"), "not-an-email");
/// ```
#[must_use]
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at) => {
            let head: String = email[..at].chars().take(2).collect();
            format!("{head}***{}", &email[at..])
        }
        None => email.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_local_part_is_kept_whole() {
        assert_eq!(mask_email("a@x.io"), "a***@x.io");
    }

    #[test]
    fn multibyte_local_part_does_not_split_chars() {
        assert_eq!(mask_email("émile@x.io"), "ém***@x.io");
    }
}
