//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID cannot be empty")]
    EmptyId,

    #[error("User name cannot be empty")]
    EmptyName,

    #[error("User name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Email must contain a single '@' with text on both sides")]
    InvalidEmail,
}

const MAX_USER_NAME_LENGTH: usize = 100;
const MAX_EMAIL_LENGTH: usize = 254;

/// Validate a user ID (any non-blank string)
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.trim().is_empty() {
        return Err(UserValidationError::EmptyId);
    }

    Ok(())
}

/// Validate a display name
pub fn validate_user_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    if name.chars().count() > MAX_USER_NAME_LENGTH {
        return Err(UserValidationError::NameTooLong(MAX_USER_NAME_LENGTH));
    }

    Ok(())
}

/// Validate an email address
///
/// Only the shape `local@domain` is checked; deliverability is not.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.trim().is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(UserValidationError::InvalidEmail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_empty() {
        assert_eq!(validate_user_id(""), Err(UserValidationError::EmptyId));
        assert_eq!(validate_user_id("  "), Err(UserValidationError::EmptyId));
        assert!(validate_user_id("mockedUserId3").is_ok());
    }

    #[test]
    fn test_valid_names() {
        assert!(validate_user_name("MemberThree").is_ok());
        assert!(validate_user_name("Team Owner").is_ok());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(validate_user_name(""), Err(UserValidationError::EmptyName));
    }

    #[test]
    fn test_name_too_long() {
        let long_name = "a".repeat(101);
        assert_eq!(
            validate_user_name(&long_name),
            Err(UserValidationError::NameTooLong(100))
        );
    }

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("user3@jest.co").is_ok());
        assert!(validate_email("owner@example.com").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(validate_email(""), Err(UserValidationError::EmptyEmail));
        assert_eq!(validate_email("user"), Err(UserValidationError::InvalidEmail));
        assert_eq!(validate_email("@jest.co"), Err(UserValidationError::InvalidEmail));
        assert_eq!(validate_email("user@"), Err(UserValidationError::InvalidEmail));
        assert_eq!(validate_email("a@b@c"), Err(UserValidationError::InvalidEmail));
    }
}
