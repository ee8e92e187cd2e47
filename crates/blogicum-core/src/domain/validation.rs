//! Field rules shared by the domain drafts.

use crate::error::DomainError;

pub const TITLE_MAX_LENGTH: usize = 256;
pub const USERNAME_MAX_LENGTH: usize = 150;
pub const NAME_MAX_LENGTH: usize = 150;
pub const PASSWORD_MIN_LENGTH: usize = 8;

pub fn not_blank(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

pub fn max_len(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

pub fn title(field: &str, value: &str) -> Result<(), DomainError> {
    not_blank(field, value)?;
    max_len(field, value, TITLE_MAX_LENGTH)
}

/// Latin letters, digits, hyphen and underscore.
pub fn slug(value: &str) -> Result<(), DomainError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(DomainError::Validation(
            "slug may contain only latin letters, digits, hyphen and underscore".to_string(),
        ));
    }
    Ok(())
}

pub fn username(value: &str) -> Result<(), DomainError> {
    not_blank("username", value)?;
    max_len("username", value, USERNAME_MAX_LENGTH)?;
    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(DomainError::Validation(
            "username may contain only letters, digits and @/./+/-/_".to_string(),
        ));
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), DomainError> {
    if value.is_empty() || !value.contains('@') {
        return Err(DomainError::Validation("Invalid email address".to_string()));
    }
    Ok(())
}

pub fn password(value: &str) -> Result<(), DomainError> {
    if value.len() < PASSWORD_MIN_LENGTH {
        return Err(DomainError::Validation(format!(
            "Password must be at least {PASSWORD_MIN_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_rules() {
        assert!(slug("travel_2024-notes").is_ok());
        assert!(slug("").is_err());
        assert!(slug("with space").is_err());
        assert!(slug("кириллица").is_err());
    }

    #[test]
    fn test_title_length_limit() {
        assert!(title("title", &"a".repeat(TITLE_MAX_LENGTH)).is_ok());
        assert!(title("title", &"a".repeat(TITLE_MAX_LENGTH + 1)).is_err());
        assert!(title("title", "   ").is_err());
    }

    #[test]
    fn test_username_rules() {
        assert!(username("anna.k+blog@home").is_ok());
        assert!(username("no spaces").is_err());
    }
}
