use std::sync::LazyLock;

use regex::Regex;

use super::ValidationError;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").unwrap()
});

/// Trims and lowercases an email, then checks its format.
///
/// Stored user emails are always in this normalized form.
pub fn normalize_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim().to_lowercase();

    if email.is_empty() {
        return Err(ValidationError::EmailEmpty);
    }

    if email.len() > 254 {
        return Err(ValidationError::EmailTooLong);
    }

    if !EMAIL_REGEX.is_match(&email) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        assert_eq!(
            normalize_email("  Coach.Anna@Example.COM ").unwrap(),
            "coach.anna@example.com"
        );
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(normalize_email("").unwrap_err(), ValidationError::EmailEmpty);
        assert_eq!(normalize_email("   ").unwrap_err(), ValidationError::EmailEmpty);
        assert_eq!(
            normalize_email("notanemail").unwrap_err(),
            ValidationError::EmailInvalidFormat
        );
        assert_eq!(
            normalize_email("missing@domain").unwrap_err(),
            ValidationError::EmailInvalidFormat
        );
    }

    #[test]
    fn test_email_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(normalize_email(&long).unwrap_err(), ValidationError::EmailTooLong);
    }
}
